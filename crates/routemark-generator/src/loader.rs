//! Markdown content loading.
//!
//! Walks the content directory and builds the content tree routes are
//! expanded against.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rayon::prelude::*;
use routemark_core::{
    ContentLeaf, ContentTree, CoreError, content::is_content_file, frontmatter::parse_frontmatter,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Content loading errors.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Loads a markdown directory into a content tree.
#[derive(Debug)]
pub struct ContentLoader {
    source_dir: PathBuf,
}

impl ContentLoader {
    /// Create a new content loader.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
        }
    }

    /// Load every content file under the source directory.
    ///
    /// Hidden entries and non-content files are skipped, as are files whose
    /// frontmatter fails to parse. A missing directory is an empty tree.
    pub fn load(&self) -> Result<ContentTree> {
        if !self.source_dir.exists() {
            debug!(dir = %self.source_dir.display(), "content directory does not exist");
            return Ok(ContentTree::new());
        }

        info!(dir = %self.source_dir.display(), "loading content");

        let files = self.find_content_files()?;
        debug!(count = files.len(), "found content files");

        let leaves: Vec<(Vec<String>, ContentLeaf)> = files
            .par_iter()
            .filter_map(|path| match self.load_file(path) {
                Ok(loaded) => Some(loaded),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load content file");
                    None
                }
            })
            .collect();

        let mut tree = ContentTree::new();
        for (segments, leaf) in leaves {
            tree.insert_leaf(&segments, leaf);
        }

        info!(leaves = tree.leaf_count(), "content loaded");
        Ok(tree)
    }

    fn find_content_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e))
        {
            let entry = entry?;
            if entry.file_type().is_file() && is_content_file(&entry.file_name().to_string_lossy())
            {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    /// Parse one file into its tree segments and leaf.
    fn load_file(&self, path: &Path) -> std::result::Result<(Vec<String>, ContentLeaf), CoreError> {
        let raw = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_frontmatter(&raw, path)?;

        let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok((segments, frontmatter.into_leaf(body, &stem)))
    }
}

// The root itself may be a dot-directory (temp dirs are).
fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}
