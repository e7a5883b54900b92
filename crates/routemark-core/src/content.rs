//! Content tree types.
//!
//! A content tree mirrors the content directory: directories become nested
//! trees and markdown files become leaves keyed by their file name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// File extensions recognised as content files.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// One loaded content unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLeaf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Raw markdown body.
    pub content: String,

    /// Any other frontmatter fields.
    #[serde(default, flatten)]
    pub meta: BTreeMap<String, serde_yaml::Value>,
}

impl ContentLeaf {
    /// Create a leaf with a title and body.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: content.into(),
            ..Self::default()
        }
    }
}

/// Either a nested directory or a content leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Leaf(ContentLeaf),
    Tree(ContentTree),
}

impl ContentNode {
    pub fn as_tree(&self) -> Option<&ContentTree> {
        match self {
            Self::Tree(tree) => Some(tree),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&ContentLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Tree(_) => None,
        }
    }
}

/// Nested mapping from path segment to content.
///
/// Keys enumerate in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentTree {
    entries: BTreeMap<String, ContentNode>,
}

impl ContentTree {
    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContentNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Insert a leaf at a segment path, creating intermediate trees.
    ///
    /// An intermediate leaf in the way is replaced by a tree.
    pub fn insert_leaf<S: AsRef<str>>(&mut self, segments: &[S], leaf: ContentLeaf) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut tree = self;
        for segment in parents {
            let node = tree
                .entries
                .entry(segment.as_ref().to_string())
                .or_insert_with(|| ContentNode::Tree(ContentTree::new()));
            if let ContentNode::Leaf(_) = node {
                *node = ContentNode::Tree(ContentTree::new());
            }
            tree = match node {
                ContentNode::Tree(next) => next,
                ContentNode::Leaf(_) => return,
            };
        }
        tree.entries
            .insert(last.as_ref().to_string(), ContentNode::Leaf(leaf));
    }

    /// Look up the node at a segment path. An empty path has no node.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<&ContentNode> {
        let (first, rest) = segments.split_first()?;
        let node = self.entries.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(node);
        }
        node.as_tree()?.lookup(rest)
    }

    /// Sub-tree at a segment path, or `default` when any segment is absent or
    /// addresses a leaf. An empty path is this tree.
    pub fn subtree_or<'a, S: AsRef<str>>(
        &'a self,
        segments: &[S],
        default: &'a ContentTree,
    ) -> &'a ContentTree {
        if segments.is_empty() {
            return self;
        }
        self.lookup(segments)
            .and_then(ContentNode::as_tree)
            .unwrap_or(default)
    }

    /// Total number of leaves in this tree and all sub-trees.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                ContentNode::Leaf(_) => 1,
                ContentNode::Tree(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

/// Whether a file name has a content extension.
pub fn is_content_file(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| CONTENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Strip a trailing content extension from a content key.
///
/// Keys without one (sub-directories) are returned unchanged.
pub fn strip_content_extension(key: &str) -> &str {
    match key.rsplit_once('.') {
        Some((stem, ext)) if CONTENT_EXTENSIONS.contains(&ext.to_lowercase().as_str()) => stem,
        _ => key,
    }
}
