//! Path resolution.
//!
//! Expands template routes against the content tree and names the output
//! file of every concrete route. Each expansion pass substitutes only the
//! leftmost parameter of a route's data path; the results are expanded again
//! until no template remains or the depth limit is hit.

use routemark_core::{
    ContentTree, FlattenedRoute, OutputFile, RouteNode,
    content::strip_content_extension,
    route::{has_params, is_param_segment},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::flatten::flatten;

/// Default limit on nested parameter expansions.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Resolution errors. Both indicate a malformed route configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The route still had parameters after `max_depth` expansion passes.
    #[error("route {path} exceeds the maximum expansion depth of {max_depth}")]
    DepthExceeded { path: String, max_depth: usize },

    /// The route path has a parameter but its data path has none to bind.
    #[error("route {path} has parameters but its data path {data_path} has none")]
    UnboundParameter { path: String, data_path: String },
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Counters and findings gathered while resolving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Routes produced by flattening the tree.
    pub flattened: usize,

    /// Template routes encountered, at any expansion depth.
    pub templates: usize,

    /// Routes produced by template expansion.
    pub expanded: usize,

    /// Templates whose content lookup matched nothing.
    pub unmatched_templates: Vec<String>,

    /// Whether the not-found document was added by the resolver.
    pub synthetic_not_found: bool,
}

/// Output files with the report that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub files: Vec<OutputFile>,
    pub report: ResolveReport,
}

/// Resolves route trees into output files.
#[derive(Debug, Clone)]
pub struct Resolver {
    max_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Resolver {
    /// Create a resolver with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of nested parameter expansions.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve route trees into output files.
    pub fn resolve<'a>(
        &self,
        routes: impl IntoIterator<Item = &'a RouteNode>,
        content: &ContentTree,
    ) -> Result<Vec<OutputFile>> {
        Ok(self.resolve_with_report(routes, content)?.files)
    }

    /// Resolve route trees, also returning what happened along the way.
    pub fn resolve_with_report<'a>(
        &self,
        routes: impl IntoIterator<Item = &'a RouteNode>,
        content: &ContentTree,
    ) -> Result<Resolution> {
        let flattened = flatten(routes);
        let mut report = ResolveReport {
            flattened: flattened.len(),
            ..ResolveReport::default()
        };

        let mut files = Vec::with_capacity(flattened.len() + 1);
        self.expand_all(flattened, content, 0, &mut files, &mut report)?;

        if !files.iter().any(OutputFile::is_not_found) {
            files.push(OutputFile::not_found());
            report.synthetic_not_found = true;
        }

        info!(
            routes = report.flattened,
            templates = report.templates,
            files = files.len(),
            "resolved routes"
        );

        Ok(Resolution { files, report })
    }

    fn expand_all(
        &self,
        routes: Vec<FlattenedRoute>,
        content: &ContentTree,
        depth: usize,
        out: &mut Vec<OutputFile>,
        report: &mut ResolveReport,
    ) -> Result<()> {
        for route in routes {
            if !route.is_template() {
                let file = route.into_output();
                debug!(path = %file.path, "concrete route");
                out.push(file);
                continue;
            }

            report.templates += 1;
            if depth >= self.max_depth {
                return Err(ResolveError::DepthExceeded {
                    path: route.path,
                    max_depth: self.max_depth,
                });
            }

            let expanded = expand_template(&route, content)?;
            debug!(
                path = %route.path,
                data_path = %route.data_path,
                count = expanded.len(),
                "expanded template"
            );

            if expanded.is_empty() {
                warn!(path = %route.path, "template matched no content");
                report.unmatched_templates.push(route.path);
                continue;
            }

            report.expanded += expanded.len();
            self.expand_all(expanded, content, depth + 1, out, report)?;
        }
        Ok(())
    }
}

/// Resolve route trees with the default depth limit.
pub fn resolve<'a>(
    routes: impl IntoIterator<Item = &'a RouteNode>,
    content: &ContentTree,
) -> Result<Vec<OutputFile>> {
    Resolver::default().resolve(routes, content)
}

/// Expand the leftmost parameter of a template route once.
///
/// The content directory addressed by the data path segments before the
/// parameter supplies one route per key. A missing directory yields none.
pub fn expand_template(
    route: &FlattenedRoute,
    content: &ContentTree,
) -> Result<Vec<FlattenedRoute>> {
    let segments: Vec<&str> = route
        .data_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    let Some(param_index) = segments.iter().position(|s| is_param_segment(s)) else {
        return Err(ResolveError::UnboundParameter {
            path: route.path.clone(),
            data_path: route.data_path.clone(),
        });
    };
    let placeholder = segments[param_index];

    let empty = ContentTree::new();
    let dataset = content.subtree_or(&segments[..param_index], &empty);

    let expanded = dataset
        .keys()
        .map(|key| {
            let value = strip_content_extension(key);
            FlattenedRoute {
                path: substitute_param(&route.path, placeholder, value),
                data_path: substitute_param(&route.data_path, placeholder, value),
                title: Some(key.to_string()),
                description: None,
            }
        })
        .collect();

    Ok(expanded)
}

/// Replace every segment equal to `placeholder` with `value`.
fn substitute_param(path: &str, placeholder: &str, value: &str) -> String {
    if !has_params(path) {
        return path.to_string();
    }
    path.split('/')
        .map(|segment| if segment == placeholder { value } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use routemark_core::{ContentLeaf, NOT_FOUND_PATH, NOT_FOUND_TITLE};

    use super::*;

    fn posts_content() -> ContentTree {
        let mut content = ContentTree::new();
        content.insert_leaf(&["posts", "a.md"], ContentLeaf::new("A", "alpha"));
        content.insert_leaf(&["posts", "b.md"], ContentLeaf::new("B", "beta"));
        content
    }

    fn output_paths(files: &[OutputFile]) -> Vec<&str> {
        files.iter().map(|f| f.path.as_str()).collect()
    }

    #[test]
    fn test_substitute_param_replaces_all_matching_segments() {
        assert_eq!(
            substitute_param("/:lang/docs/:lang/x", ":lang", "en"),
            "/en/docs/en/x"
        );
        assert_eq!(
            substitute_param("/:id/:identity", ":id", "7"),
            "/7/:identity"
        );
        assert_eq!(substitute_param("/plain/", ":id", "7"), "/plain/");
    }

    #[test]
    fn test_concrete_routes_use_terminal_convention() {
        let routes = vec![
            RouteNode::new("/").with_title("Home"),
            RouteNode::new("/about").with_description("About us"),
        ];
        let files = resolve(&routes, &ContentTree::new()).expect("resolve");

        assert_eq!(
            output_paths(&files),
            vec!["/index.html", "/about.html", NOT_FOUND_PATH]
        );
        assert_eq!(files[0].title.as_deref(), Some("Home"));
        assert_eq!(files[1].description.as_deref(), Some("About us"));
        assert!(files.iter().all(|f| f.content.is_none()));
    }

    #[test]
    fn test_template_expands_per_content_key() {
        let routes = vec![RouteNode::new("/posts/:slug")];
        let files = resolve(&routes, &posts_content()).expect("resolve");

        assert_eq!(
            output_paths(&files),
            vec!["/posts/a.html", "/posts/b.html", NOT_FOUND_PATH]
        );
        assert_eq!(files[0].title.as_deref(), Some("a.md"));
        assert_eq!(files[0].data_path.as_deref(), Some("/posts/a"));
    }

    #[test]
    fn test_template_without_content_yields_nothing() {
        let routes = vec![RouteNode::new("/posts/:slug")];
        let resolution = Resolver::new()
            .resolve_with_report(&routes, &ContentTree::new())
            .expect("resolve");

        assert_eq!(output_paths(&resolution.files), vec![NOT_FOUND_PATH]);
        assert_eq!(resolution.files[0].title.as_deref(), Some(NOT_FOUND_TITLE));
        assert_eq!(resolution.report.unmatched_templates, vec!["/posts/:slug"]);
        assert!(resolution.report.synthetic_not_found);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unmatched_template_is_logged_as_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let routes = vec![RouteNode::new("/drafts/:slug")];
        tracing::subscriber::with_default(subscriber, || {
            resolve(&routes, &posts_content()).expect("resolve");
        });

        let output = String::from_utf8(logs.0.lock().expect("log buffer").clone())
            .expect("utf-8 logs");
        assert!(output.contains("WARN"));
        assert!(output.contains("template matched no content"));
        assert!(output.contains("/drafts/:slug"));
    }

    #[test]
    fn test_relative_data_path_addresses_content_root() {
        let routes = vec![
            RouteNode::new("/p/:slug").with_data_path("posts/:slug"),
            RouteNode::new("/q/:slug").with_data_path("posts//:slug/"),
        ];
        let files = resolve(&routes, &posts_content()).expect("resolve");

        assert_eq!(
            output_paths(&files),
            vec!["/p/a.html", "/p/b.html", "/q/a.html", "/q/b.html", NOT_FOUND_PATH]
        );
        assert_eq!(files[0].data_path.as_deref(), Some("posts/a"));
        assert_eq!(files[2].data_path.as_deref(), Some("posts//a/"));
    }

    #[test]
    fn test_lookup_addressing_a_leaf_yields_nothing() {
        let mut content = ContentTree::new();
        content.insert_leaf(&["posts"], ContentLeaf::new("Posts", "not a directory"));

        let routes = vec![RouteNode::new("/posts/:slug")];
        let files = resolve(&routes, &content).expect("resolve");
        assert_eq!(output_paths(&files), vec![NOT_FOUND_PATH]);
    }

    #[test]
    fn test_explicit_not_found_suppresses_synthetic_one() {
        let routes = vec![
            RouteNode::new("/404").with_title("Lost"),
            RouteNode::new("/about"),
        ];
        let resolution = Resolver::new()
            .resolve_with_report(&routes, &ContentTree::new())
            .expect("resolve");

        let not_found: Vec<_> = resolution
            .files
            .iter()
            .filter(|f| f.is_not_found())
            .collect();
        assert_eq!(not_found.len(), 1);
        assert_eq!(not_found[0].title.as_deref(), Some("Lost"));
        assert!(!resolution.report.synthetic_not_found);
    }

    #[test]
    fn test_not_found_from_expansion_is_not_duplicated() {
        let mut content = ContentTree::new();
        content.insert_leaf(&["errors", "404.md"], ContentLeaf::new("Missing", ""));
        content.insert_leaf(&["errors", "500.md"], ContentLeaf::new("Broken", ""));

        let routes = vec![RouteNode::new("/:code").with_data_path("/errors/:code")];
        let files = resolve(&routes, &content).expect("resolve");

        assert_eq!(output_paths(&files), vec![NOT_FOUND_PATH, "/500.html"]);
    }

    #[test]
    fn test_multi_parameter_template() {
        let mut content = ContentTree::new();
        content.insert_leaf(&["category", "go", "intro.md"], ContentLeaf::new("Intro", ""));
        content.insert_leaf(&["category", "rust", "borrow.md"], ContentLeaf::new("Borrow", ""));
        content.insert_leaf(&["category", "rust", "traits.md"], ContentLeaf::new("Traits", ""));

        let routes = vec![RouteNode::new("/category/:cat/:slug")];
        let resolution = Resolver::new()
            .resolve_with_report(&routes, &content)
            .expect("resolve");

        assert_eq!(
            output_paths(&resolution.files),
            vec![
                "/category/go/intro.html",
                "/category/rust/borrow.html",
                "/category/rust/traits.html",
                NOT_FOUND_PATH,
            ]
        );
        // One top-level template plus one per category.
        assert_eq!(resolution.report.templates, 3);
        assert_eq!(resolution.report.expanded, 5);
    }

    #[test]
    fn test_unbound_parameter_is_an_error() {
        let routes = vec![RouteNode::new("/posts/:slug").with_data_path("/posts")];
        let err = resolve(&routes, &posts_content()).unwrap_err();
        assert!(matches!(err, ResolveError::UnboundParameter { .. }));
    }

    #[test]
    fn test_depth_limit() {
        let mut content = ContentTree::new();
        content.insert_leaf(&["a", "x", "y.md"], ContentLeaf::new("Y", ""));
        let routes = vec![RouteNode::new("/a/:one/:two")];

        let err = Resolver::new()
            .with_max_depth(1)
            .resolve(&routes, &content)
            .unwrap_err();
        assert!(matches!(err, ResolveError::DepthExceeded { max_depth: 1, .. }));

        let files = Resolver::new()
            .with_max_depth(2)
            .resolve(&routes, &content)
            .expect("resolve");
        assert_eq!(files[0].path, "/a/x/y.html");
    }

    #[test]
    fn test_self_reproducing_key_hits_depth_limit() {
        let mut content = ContentTree::new();
        content.insert_leaf(&["loop", ":slug.md"], ContentLeaf::new("Loop", ""));

        let routes = vec![RouteNode::new("/loop/:slug")];
        let err = resolve(&routes, &content).unwrap_err();
        assert!(matches!(err, ResolveError::DepthExceeded { .. }));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let routes = vec![
            RouteNode::new("/").with_child(RouteNode::new("posts/:slug")),
            RouteNode::new("/about"),
        ];
        let content = posts_content();

        let first = resolve(&routes, &content).expect("resolve");
        let second = resolve(&routes, &content).expect("resolve");
        assert_eq!(first, second);
    }
}
