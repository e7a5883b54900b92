//! Plan command - lists the files a build would emit

use std::{path::Path, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use routemark_core::Config;
use routemark_generator::{BuildPlan, Planner};

use super::load_content;

/// Output format for the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// Human-readable table.
    #[default]
    Text,
    /// JSON array of planned files.
    Json,
}

/// Run the plan command.
///
/// Resolves the configured routes against the content and prints every file
/// that a build would write.
pub fn run(
    config_path: &Path,
    content: Option<&Path>,
    output: Option<&Path>,
    format: Format,
) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?content, ?output, ?format, "Starting plan");

    let mut config = Config::load(config_path).wrap_err("Failed to load configuration")?;

    if let Some(out) = output {
        tracing::info!(output = %out.display(), "Overriding output directory from CLI");
        config.build.output = out.to_string_lossy().to_string();
    }

    tracing::debug!(?config, "Loaded configuration");

    let planner = Planner::new(config);
    let tree = load_content(&planner, content)?;
    let plan = planner.plan(&tree).wrap_err("Failed to resolve routes")?;

    match format {
        Format::Json => println!("{}", render_json(&plan)?),
        Format::Text => print!("{}", render_text(&plan)),
    }

    tracing::info!(stats = ?plan.stats, duration = ?start.elapsed(), "Plan completed");

    Ok(())
}

/// Render the planned files as pretty JSON.
pub fn render_json(plan: &BuildPlan) -> Result<String> {
    serde_json::to_string_pretty(&plan.files).wrap_err("Failed to serialize plan")
}

/// Render the plan as a table followed by a summary.
pub fn render_text(plan: &BuildPlan) -> String {
    let width = plan
        .files
        .iter()
        .map(|p| p.file.path.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push('\n');
    for planned in &plan.files {
        let title = planned.file.title.as_deref().unwrap_or("-");
        let marker = if planned.file.content.is_some() { "●" } else { "○" };
        out.push_str(&format!(
            "  {marker} {:<width$}  {title}\n",
            planned.file.path
        ));
    }

    out.push('\n');
    out.push_str(&format!("  Routes:     {}\n", plan.stats.routes));
    out.push_str(&format!("  Templates:  {}\n", plan.stats.templates));
    out.push_str(&format!("  Expanded:   {}\n", plan.stats.expanded));
    out.push_str(&format!("  Files:      {}\n", plan.stats.files));
    out.push_str(&format!("  With body:  {}\n", plan.stats.bound));

    if !plan.unmatched_templates.is_empty() {
        out.push('\n');
        out.push_str("  Templates without content:\n");
        for template in &plan.unmatched_templates {
            out.push_str(&format!("  ⚠ {template}\n"));
        }
    }
    out.push('\n');
    out
}
