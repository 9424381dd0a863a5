//! CLI entry point for the pbxgen project generator.
//!
//! This binary scans an app's source tree and writes the matching Xcode
//! `project.pbxproj`, so the project file never has to be committed or
//! merged by hand.
//!
//! # Usage
//!
//! ```bash
//! pbxgen [OPTIONS] <COMMAND>
//!
//! # Write VoiceMemo.xcodeproj/project.pbxproj under the current directory
//! pbxgen generate
//!
//! # Fail if the committed project file is out of date
//! pbxgen --root path/to/app check
//!
//! # Show the identifier derived for a key
//! pbxgen id project group:main
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod output;

use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use pbx_core::{Config, ObjectId, assemble};
use pbx_render::Serializer;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::output::{Freshness, compare, write_project};

/// Configuration file looked up in the project root when `--config` is not
/// given.
const DEFAULT_CONFIG_FILE: &str = "pbxgen.json";

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Generates an Xcode project file from the sources on disk.
#[derive(Parser)]
#[command(name = "pbxgen", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Project root directory.
    ///
    /// Overrides `scan.root_path` from the configuration file. Defaults to
    /// the current directory.
    #[arg(short, long, global = true, env = "PBXGEN_ROOT")]
    root: Option<Utf8PathBuf>,

    /// JSON configuration file.
    ///
    /// Defaults to `pbxgen.json` in the project root, if present.
    #[arg(short, long, global = true, env = "PBXGEN_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Generate the project file.
    Generate {
        /// Print the project file instead of writing it.
        #[arg(long)]
        stdout: bool,
    },

    /// Check that the project file on disk is up to date.
    Check,

    /// Print the identifier derived from each key.
    Id {
        /// Keys such as `project` or `file:Sources/App/Main.swift`.
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr so `generate --stdout` output stays clean.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from CLI arguments.
///
/// Loads `--config` if given, else `pbxgen.json` in the root if it
/// exists, else the built-in defaults. `--root` replaces the configured
/// root.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or is
/// invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let search_root = cli.root.clone().unwrap_or_else(|| Utf8PathBuf::from("."));
    let path = cli
        .config
        .clone()
        .or_else(|| Some(search_root.join(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()));

    let mut config = match &path {
        Some(path) => Config::load(path)
            .wrap_err_with(|| format!("Failed to load configuration from {path}"))?,
        None => {
            debug!("No configuration file, using defaults");
            Config::default()
        }
    };

    if let Some(root) = &cli.root {
        config.scan.root_path.clone_from(root);
    }

    Ok(config)
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Runs the pipeline: enumerate, assemble, serialize.
fn render_project(config: &Config) -> color_eyre::Result<String> {
    let inventory =
        pbx_scanner::enumerate(&config.scan).wrap_err("Failed to enumerate project files")?;
    let catalog = assemble(&config.project, &config.packages, &inventory)
        .wrap_err("Failed to assemble project graph")?;

    Ok(Serializer::new(config.project.tools.object_version).serialize(&catalog))
}

fn run_generate(config: &Config, stdout: bool) -> color_eyre::Result<()> {
    let text = render_project(config)?;

    if stdout {
        print!("{text}");
        return Ok(());
    }

    let path = config.output_path();
    if compare(&path, &text)? == Freshness::Current {
        info!(path = %path, "Project file unchanged");
        return Ok(());
    }

    write_project(&path, &text)?;
    info!(path = %path, bytes = text.len(), "Wrote project file");
    Ok(())
}

/// Returns `true` if the file on disk matches what would be generated.
fn run_check(config: &Config) -> color_eyre::Result<bool> {
    let text = render_project(config)?;
    let path = config.output_path();

    let current = match compare(&path, &text)? {
        Freshness::Current => {
            info!(path = %path, "Project file is up to date");
            true
        }
        Freshness::Stale => {
            warn!(path = %path, "Project file is out of date, run `pbxgen generate`");
            false
        }
        Freshness::Missing => {
            warn!(path = %path, "Project file does not exist, run `pbxgen generate`");
            false
        }
    };
    Ok(current)
}

fn run_id(keys: &[String]) {
    for key in keys {
        println!("{}  {key}", ObjectId::from_key(key));
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<ExitCode> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    match &cli.command {
        Commands::Generate { stdout } => {
            let config = build_config(&cli)?;
            info!(root = %config.scan.root_path, "Generating project");
            run_generate(&config, *stdout)?;
        }
        Commands::Check => {
            let config = build_config(&cli)?;
            if !run_check(&config)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Id { keys } => run_id(keys),
    }

    Ok(ExitCode::SUCCESS)
}
