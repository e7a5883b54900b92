//! CLI command implementations.

pub mod check;
pub mod plan;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use routemark_core::ContentTree;
use routemark_generator::Planner;

/// Load the content tree from a JSON file, or from the configured source
/// directory when no file is given.
pub fn load_content(planner: &Planner, tree_file: Option<&Path>) -> Result<ContentTree> {
    match tree_file {
        Some(path) => {
            tracing::info!(?path, "Loading content tree from JSON");
            let raw = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .wrap_err_with(|| format!("Failed to parse content tree {}", path.display()))
        }
        None => planner
            .load_content()
            .wrap_err("Failed to load content directory"),
    }
}

#[cfg(test)]
mod tests {
    use routemark_core::Config;

    use super::*;

    #[test]
    fn test_load_content_from_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let tree_path = dir.path().join("tree.json");
        std::fs::write(
            &tree_path,
            r#"{ "posts": { "a.md": { "title": "A", "content": "alpha" } } }"#,
        )
        .expect("write");

        let planner = Planner::new(Config::new("Test", Vec::new()));
        let tree = load_content(&planner, Some(&tree_path)).expect("load");
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_load_content_rejects_bad_json() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let tree_path = dir.path().join("tree.json");
        std::fs::write(&tree_path, "[1, 2, 3]").expect("write");

        let planner = Planner::new(Config::new("Test", Vec::new()));
        let err = load_content(&planner, Some(&tree_path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse content tree"));
    }
}
