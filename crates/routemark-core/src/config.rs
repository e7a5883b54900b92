//! Site configuration management.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    route::RouteNode,
};

/// Main configuration structure for routemark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// The route tree.
    #[serde(default)]
    pub routes: Vec<RouteNode>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// URL root the site is served from.
    ///
    /// Passed through to the renderer for link building. Route resolution
    /// works on route paths alone and never reads it.
    #[serde(default = "default_root")]
    pub root: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Content directory.
    #[serde(default = "default_source")]
    pub source: String,

    /// Output directory for generated files.
    #[serde(default = "default_output")]
    pub output: String,

    /// Maximum number of nested parameter expansions per route.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_root() -> String {
    "/".to_string()
}

fn default_source() -> String {
    "content".to_string()
}

fn default_output() -> String {
    "_site".to_string()
}

fn default_max_depth() -> usize {
    16
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
            max_depth: default_max_depth(),
        }
    }
}

impl Config {
    /// Create a configuration in code, with default build settings.
    pub fn new(title: impl Into<String>, routes: Vec<RouteNode>) -> Self {
        Self {
            site: SiteConfig {
                title: title.into(),
                root: default_root(),
            },
            build: BuildConfig::default(),
            routes,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `ROUTEMARK__*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("ROUTEMARK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.build.max_depth == 0 {
            return Err(CoreError::config("build.max_depth must be at least 1"));
        }

        if !self.site.root.starts_with('/') {
            tracing::warn!(root = %self.site.root, "site.root should start with a slash");
        }

        for (i, route) in self.routes.iter().enumerate() {
            validate_route(route, &format!("routes[{i}]"))?;
        }

        Ok(())
    }

    /// Number of route nodes in the tree, children included.
    pub fn route_count(&self) -> usize {
        fn count(route: &RouteNode) -> usize {
            1 + route.child_routes.iter().map(count).sum::<usize>()
        }
        self.routes.iter().map(count).sum()
    }
}

fn validate_route(route: &RouteNode, location: &str) -> Result<()> {
    if route.path.is_empty() {
        return Err(CoreError::config(format!("{location}.path cannot be empty")));
    }
    if route.data_path.as_deref().is_some_and(str::is_empty) {
        return Err(CoreError::config(format!(
            "{location}.data_path cannot be empty"
        )));
    }
    for (i, child) in route.child_routes.iter().enumerate() {
        validate_route(child, &format!("{location}.child_routes[{i}]"))?;
    }
    Ok(())
}
