//! Routemark CLI Library
//!
//! Command implementations for the routemark binary, exposed as a library so
//! they can be driven from tests and other tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (plan, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use routemark::cmd::{self, plan::Format};
//!
//! cmd::plan::run(Path::new("routemark.toml"), None, None, Format::Text).unwrap();
//! ```

pub mod cmd;

pub use routemark_core::{Config, OutputFile, RouteNode};
pub use routemark_generator::{BuildPlan, Planner};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
