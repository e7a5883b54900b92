//! Check command - validate configuration, content and routes

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use routemark_core::Config;
use routemark_generator::{BuildPlan, Planner};

use super::load_content;

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration, loads content and resolves every route.
pub fn run(config_path: &Path, content: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and routes");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid ({} routes)", c.route_count());
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(config) = config {
        check_config_values(&config, &mut result);

        println!("\nResolving routes...");
        let planner = Planner::new(config);
        match load_content(&planner, content) {
            Ok(tree) => match planner.plan(&tree) {
                Ok(plan) => {
                    println!(
                        "  ✓ {} files from {} content leaves",
                        plan.stats.files,
                        tree.leaf_count()
                    );
                    check_plan(&plan, &mut result);
                }
                Err(e) => {
                    result.add_error(format!("Route error: {e}"));
                    println!("  ✗ Routes failed to resolve: {e}");
                }
            },
            Err(e) => {
                result.add_error(format!("Content error: {e:#}"));
                println!("  ✗ Content failed to load: {e:#}");
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.routes.is_empty() {
        result.add_warning("No routes configured; only the 404 page will be planned");
    }

    if !config.site.root.starts_with('/') {
        result.add_warning(format!(
            "site.root should start with a slash: {}",
            config.site.root
        ));
    }

    let output = Path::new(&config.build.output);
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            config.build.output
        ));
    }
}

/// Report templates that matched nothing and paths planned twice.
fn check_plan(plan: &BuildPlan, result: &mut ValidationResult) {
    for template in &plan.unmatched_templates {
        result.add_warning(format!("Template {template} matched no content"));
    }
    for path in &plan.collisions {
        result.add_warning(format!("Output {path} is produced by more than one route"));
    }
}
