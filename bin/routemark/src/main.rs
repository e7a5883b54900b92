//! Routemark CLI
//!
//! Plans the files a static site build emits from a route tree and a
//! markdown content tree.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use routemark::cmd::plan::Format;

/// Command-line interface for routemark.
#[derive(Parser)]
#[command(
    name = "routemark",
    version,
    about = "Resolve site routes and markdown content into output files"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "routemark.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// List every file the build would emit
    Plan {
        /// Read the content tree from a JSON file instead of the source directory
        #[arg(long)]
        content: Option<std::path::PathBuf>,
        /// Override the output directory
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Validate configuration, content and routes
    Check {
        /// Read the content tree from a JSON file instead of the source directory
        #[arg(long)]
        content: Option<std::path::PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    routemark::init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            content,
            output,
            format,
        } => {
            routemark::cmd::plan::run(
                &cli.config,
                content.as_deref(),
                output.as_deref(),
                format,
            )?;
        }
        Commands::Check { content, strict } => {
            routemark::cmd::check::run(&cli.config, content.as_deref(), strict)?;
        }
    }

    Ok(())
}
