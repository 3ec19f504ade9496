//! cssvars CLI - Generate CSS custom property stylesheets from variable maps.

mod build;
mod check;
mod colors;
mod render;

use std::path::Path;

use clap::{Parser, Subcommand};
use cssvars_core::{TracingSink, VirtualModules, load_options};

#[derive(Parser)]
#[command(name = "cssvars")]
#[command(about = "Generate CSS custom property stylesheets from variable maps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every module with variables to a directory
    Build {
        /// Path to the options file (.json)
        options: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out_dir: String,
    },

    /// Print a single module
    Render {
        /// Path to the options file (.json)
        options: String,

        /// Virtual module id
        module_id: String,
    },

    /// Print several modules concatenated in the given order
    Bundle {
        /// Path to the options file (.json)
        options: String,

        /// Virtual module ids
        #[arg(required = true)]
        module_ids: Vec<String>,
    },

    /// Validate options and report diagnostics
    Check {
        /// Path to the options file (.json)
        options: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for generated stylesheets
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build { options, out_dir } => build::execute(&options, &out_dir)?,
        Commands::Render { options, module_id } => render::execute(&options, &module_id)?,
        Commands::Bundle {
            options,
            module_ids,
        } => render::bundle(&options, &module_ids)?,
        Commands::Check { options } => check::execute(&options)?,
    }

    Ok(())
}

/// Load options and compile them, logging diagnostics as they are delivered.
pub(crate) fn load_modules(options_path: &str) -> anyhow::Result<VirtualModules> {
    let path = Path::new(options_path);
    if !path.exists() {
        anyhow::bail!("Options file not found: {}", options_path);
    }

    let specs = load_options(path)?;
    let mut sink = TracingSink;
    Ok(VirtualModules::build(&specs, &mut sink))
}

/// Fail if the build produced a fatal diagnostic.
pub(crate) fn ensure_no_errors(modules: &VirtualModules) -> anyhow::Result<()> {
    let fatal = modules
        .diagnostics()
        .iter()
        .filter(|diagnostic| diagnostic.is_fatal())
        .count();
    if fatal > 0 {
        anyhow::bail!("{} module option(s) could not be registered", fatal);
    }
    Ok(())
}
