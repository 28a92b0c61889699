mod commands;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "asset-kit")]
#[command(version, about = "Placeholder sounds and asset checks for the game client", long_about = None)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Write silent placeholder files for missing sounds
    Generate {
        /// Project directory the manifest paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Asset manifest (defaults to <root>/assets.toml, then the built-in list)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Overwrite the five legacy sounds with the old fixed template
        #[arg(long)]
        legacy: bool,
    },

    /// Check that every expected asset is present
    Validate {
        /// Project directory the manifest paths are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Asset manifest (defaults to <root>/assets.toml, then the built-in list)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Exit with an error when files are missing or the markup check fails
        #[arg(long)]
        strict: bool,

        /// Check that present files are recognized as audio
        #[arg(long)]
        probe: bool,
    },

    /// Print the built-in asset manifest as TOML
    Manifest {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Generate {
            root,
            manifest,
            legacy,
        } => {
            if legacy {
                commands::generate::run_legacy(root, manifest)
            } else {
                commands::generate::run(root, manifest)
            }
        }
        Command::Validate {
            root,
            manifest,
            format,
            strict,
            probe,
        } => commands::validate::run(root, manifest, format, strict, probe),
        Command::Manifest { output } => commands::manifest::run(output),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "asset-kit", &mut io::stdout());
            Ok(())
        }
    }
}

/// Diagnostics go to stderr so reports on stdout stay clean.
/// `--verbose` forces debug; otherwise `RUST_LOG` decides, defaulting to warn.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}
