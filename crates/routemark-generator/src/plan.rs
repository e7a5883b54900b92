//! Build planning.
//!
//! Resolves the configured routes against the content tree, binds content
//! and places every file under the output root. Writing the files is left
//! to the renderer.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Instant,
};

use routemark_core::{Config, ContentTree, OutputFile};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::{
    bind::bind,
    loader::{ContentLoader, LoaderError},
    resolve::{ResolveError, Resolver},
};

/// Planning errors.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Route resolution error.
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Content loading error.
    #[error("loader error: {0}")]
    Loader(#[from] LoaderError),
}

/// Result type for planning operations.
pub type Result<T> = std::result::Result<T, PlanError>;

/// A resolved file and where it lands on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    /// Output location, relative to the working directory.
    pub output: PathBuf,

    #[serde(flatten)]
    pub file: OutputFile,
}

/// Plan statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    /// Route nodes in the configured tree.
    pub routes: usize,

    /// Template routes expanded, at any depth.
    pub templates: usize,

    /// Routes produced by template expansion, at any depth.
    pub expanded: usize,

    /// Files in the plan.
    pub files: usize,

    /// Files with content attached.
    pub bound: usize,

    /// Planning duration in milliseconds.
    pub duration_ms: u64,
}

/// The full set of files a build must emit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildPlan {
    pub files: Vec<PlannedFile>,
    pub stats: PlanStats,

    /// Templates that matched no content.
    pub unmatched_templates: Vec<String>,

    /// Output paths produced by more than one route.
    pub collisions: Vec<String>,
}

/// Plans a site build from its configuration.
#[derive(Debug)]
pub struct Planner {
    config: Config,
}

impl Planner {
    /// Create a new planner.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the content tree from the configured source directory.
    pub fn load_content(&self) -> Result<ContentTree> {
        Ok(ContentLoader::new(&self.config.build.source).load()?)
    }

    /// Plan the build against a content tree.
    pub fn plan(&self, content: &ContentTree) -> Result<BuildPlan> {
        let start = Instant::now();

        let resolution = Resolver::new()
            .with_max_depth(self.config.build.max_depth)
            .resolve_with_report(&self.config.routes, content)?;

        let output_root = Path::new(&self.config.build.output);
        let files: Vec<PlannedFile> = bind(resolution.files, content)
            .into_iter()
            .map(|file| PlannedFile {
                output: output_root.join(file.path.trim_start_matches('/')),
                file,
            })
            .collect();

        let stats = PlanStats {
            routes: self.config.route_count(),
            templates: resolution.report.templates,
            expanded: resolution.report.expanded,
            files: files.len(),
            bound: files.iter().filter(|p| p.file.content.is_some()).count(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        let collisions = find_collisions(&files);

        info!(
            files = stats.files,
            bound = stats.bound,
            unmatched = resolution.report.unmatched_templates.len(),
            collisions = collisions.len(),
            "build plan ready"
        );

        Ok(BuildPlan {
            files,
            stats,
            unmatched_templates: resolution.report.unmatched_templates,
            collisions,
        })
    }
}

/// URL paths that appear more than once, in first-seen order.
fn find_collisions(files: &[PlannedFile]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut collisions = Vec::new();
    for planned in files {
        let count = seen.entry(planned.file.path.as_str()).or_default();
        *count += 1;
        if *count == 2 {
            collisions.push(planned.file.path.clone());
        }
    }
    collisions
}
