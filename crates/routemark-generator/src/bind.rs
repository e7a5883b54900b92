//! Content binding.
//!
//! Attaches the content leaf addressed by each file's data path.

use routemark_core::{
    ContentLeaf, ContentNode, ContentTree, OutputFile, content::CONTENT_EXTENSIONS,
};
use tracing::debug;

/// Bind content leaves to resolved files.
///
/// Route metadata wins over leaf metadata; files whose data path addresses
/// no leaf are returned unchanged.
pub fn bind(files: Vec<OutputFile>, content: &ContentTree) -> Vec<OutputFile> {
    files
        .into_iter()
        .map(|file| {
            let Some(leaf) = file
                .data_path
                .as_deref()
                .and_then(|data_path| find_leaf(content, data_path))
            else {
                return file;
            };

            debug!(path = %file.path, "bound content");
            OutputFile {
                title: file.title.or_else(|| leaf.title.clone()),
                description: file.description.or_else(|| leaf.description.clone()),
                content: Some(leaf.content.clone()),
                ..file
            }
        })
        .collect()
}

/// Find the leaf a data path addresses.
///
/// `/posts/a` matches the key `a`, then `a.md`, then `a.markdown` under
/// `posts`. A trailing slash addresses the directory's `index` document.
pub fn find_leaf<'a>(content: &'a ContentTree, data_path: &str) -> Option<&'a ContentLeaf> {
    let mut segments: Vec<&str> = data_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let name = if data_path.ends_with('/') || segments.is_empty() {
        "index"
    } else {
        segments.pop()?
    };

    let dir = if segments.is_empty() {
        content
    } else {
        content.lookup(&segments)?.as_tree()?
    };

    leaf_named(dir, name).or_else(|| {
        CONTENT_EXTENSIONS
            .iter()
            .find_map(|ext| leaf_named(dir, &format!("{name}.{ext}")))
    })
}

fn leaf_named<'a>(dir: &'a ContentTree, key: &str) -> Option<&'a ContentLeaf> {
    dir.get(key).and_then(ContentNode::as_leaf)
}

#[cfg(test)]
mod tests {
    use routemark_core::{NOT_FOUND_PATH, RouteNode};

    use super::*;
    use crate::resolve::resolve;

    fn site_content() -> ContentTree {
        let mut content = ContentTree::new();
        content.insert_leaf(&["index.md"], ContentLeaf::new("Welcome", "home body"));
        content.insert_leaf(&["about.md"], ContentLeaf::new("About", "about body"));
        content.insert_leaf(&["docs", "index.md"], ContentLeaf::new("Docs", "docs body"));
        content.insert_leaf(&["posts", "a.md"], ContentLeaf::new("Post A", "alpha"));
        content.insert_leaf(&["raw", "notes"], ContentLeaf::new("Notes", "no extension"));
        content
    }

    #[test]
    fn test_find_leaf() {
        let content = site_content();

        let title = |path: &str| find_leaf(&content, path).and_then(|l| l.title.as_deref());
        assert_eq!(title("/"), Some("Welcome"));
        assert_eq!(title("/about"), Some("About"));
        assert_eq!(title("/docs/"), Some("Docs"));
        assert_eq!(title("/posts/a"), Some("Post A"));
        assert_eq!(title("/raw/notes"), Some("Notes"));
        assert_eq!(title("/posts/missing"), None);
        assert_eq!(title("/nowhere/a"), None);
        // A directory is not a leaf.
        assert_eq!(title("/posts"), None);
    }

    #[test]
    fn test_bind_attaches_content_and_keeps_route_title() {
        let routes = vec![
            RouteNode::new("/"),
            RouteNode::new("/about").with_title("About Us"),
            RouteNode::new("/posts/:slug"),
            RouteNode::new("/contact"),
        ];
        let content = site_content();
        let files = bind(resolve(&routes, &content).expect("resolve"), &content);

        assert_eq!(files[0].path, "/index.html");
        assert_eq!(files[0].title.as_deref(), Some("Welcome"));
        assert_eq!(files[0].content.as_deref(), Some("home body"));

        assert_eq!(files[1].title.as_deref(), Some("About Us"));
        assert_eq!(files[1].content.as_deref(), Some("about body"));

        assert_eq!(files[2].path, "/posts/a.html");
        assert_eq!(files[2].title.as_deref(), Some("a.md"));
        assert_eq!(files[2].content.as_deref(), Some("alpha"));

        // No content for /contact.
        assert_eq!(files[3].path, "/contact.html");
        assert!(files[3].content.is_none());

        assert_eq!(files[4].path, NOT_FOUND_PATH);
        assert!(files[4].content.is_none());
    }
}
