//! Route tree types and URL path helpers.

use serde::{Deserialize, Serialize};

/// Sigil that marks a path segment as a parameter placeholder (`:slug`).
pub const PARAM_SIGIL: char = ':';

/// Output path reserved for the not-found document.
pub const NOT_FOUND_PATH: &str = "/404.html";

/// Title given to the synthetic not-found document.
pub const NOT_FOUND_TITLE: &str = "404 Not Found";

/// A node in the authored route tree.
///
/// Nodes are never modified by the generator; child paths are composed into
/// new values during flattening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// URL path template, possibly containing `:param` segments.
    pub path: String,

    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description for meta tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Path used to address the content tree. Defaults to the composed `path`.
    #[serde(default, alias = "dataPath", skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,

    /// Nested routes, relative to this node's path.
    #[serde(default, alias = "childRoutes", skip_serializing_if = "Vec::is_empty")]
    pub child_routes: Vec<RouteNode>,
}

impl RouteNode {
    /// Create a route with only a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
            description: None,
            data_path: None,
            child_routes: Vec::new(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an explicit data path.
    #[must_use]
    pub fn with_data_path(mut self, data_path: impl Into<String>) -> Self {
        self.data_path = Some(data_path.into());
        self
    }

    /// Append a child route.
    #[must_use]
    pub fn with_child(mut self, child: RouteNode) -> Self {
        self.child_routes.push(child);
        self
    }
}

/// A route after nested paths have been composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenedRoute {
    /// Composed URL path.
    pub path: String,

    /// Path used to address the content tree.
    pub data_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FlattenedRoute {
    /// Whether the route still contains a parameter and must be expanded.
    pub fn is_template(&self) -> bool {
        has_params(&self.path)
    }

    /// Apply the terminal naming convention to a concrete route.
    pub fn into_output(self) -> OutputFile {
        OutputFile {
            path: output_file_path(&self.path),
            title: self.title,
            description: self.description,
            content: None,
            data_path: Some(self.data_path),
        }
    }
}

/// A concrete file the site build must emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    /// URL path of the file, always ending in `.html`.
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw content body, attached by binding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Data path the file was resolved from. Absent on the synthetic 404.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<String>,
}

impl OutputFile {
    /// The synthetic not-found document.
    pub fn not_found() -> Self {
        Self {
            path: NOT_FOUND_PATH.to_string(),
            title: Some(NOT_FOUND_TITLE.to_string()),
            description: None,
            content: None,
            data_path: None,
        }
    }

    /// Whether this is the not-found document.
    pub fn is_not_found(&self) -> bool {
        self.path == NOT_FOUND_PATH
    }
}

/// Whether a path segment is a parameter placeholder.
pub fn is_param_segment(segment: &str) -> bool {
    segment.starts_with(PARAM_SIGIL)
}

/// Whether any segment of `path` is a parameter placeholder.
pub fn has_params(path: &str) -> bool {
    path.split('/').any(is_param_segment)
}

/// Map a concrete route path to its output file path.
///
/// `/docs/` becomes `/docs/index.html`, `/docs/api` becomes `/docs/api.html`.
pub fn output_file_path(path: &str) -> String {
    if path.ends_with('/') {
        format!("{path}index.html")
    } else {
        format!("{path}.html")
    }
}

/// Join a child route path onto its parent with POSIX path semantics.
///
/// Both parts are concatenated and normalized, so an absolute child is still
/// nested under the parent (`/docs` + `/api` is `/docs/api`).
pub fn join_route_path(parent: &str, child: &str) -> String {
    let joined = [parent, child]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        return ".".to_string();
    }
    normalize_route_path(&joined)
}

/// Normalize a path: collapse repeated slashes, resolve `.` and `..`, keep a
/// trailing slash.
pub fn normalize_route_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let absolute = path.starts_with('/');
    let trailing = path.ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let mut normalized = segments.join("/");
    if normalized.is_empty() && !absolute {
        normalized.push('.');
    }
    if !normalized.is_empty() && trailing {
        normalized.push('/');
    }
    if absolute {
        normalized.insert(0, '/');
    }
    normalized
}
