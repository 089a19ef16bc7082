//! CLI entry point for neverendingloop

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use neverendingloop::{commands, Site};

#[derive(Parser)]
#[command(name = "neverendingloop")]
#[command(author = "Jan Karlo Dela Cruz")]
#[command(version)]
#[command(about = "A small static site generator for a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site (the default)
    #[command(alias = "b")]
    Build {
        /// Rebuild whenever a source file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Remove the output directory
    Clean,

    /// Create a new draft post
    New {
        /// Title of the new post
        title: String,

        /// Path relative to the pages directory
        #[arg(short, long)]
        path: Option<String>,
    },

    /// List posts and drafts
    List,

    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "neverendingloop=debug,info"
    } else {
        "neverendingloop=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let is_build = matches!(cli.command, None | Some(Commands::Build { .. }));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if is_build {
                eprintln!("Build failed: {:#}", e);
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command.unwrap_or(Commands::Build { watch: false }) {
        Commands::Build { watch } => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Building {:?}", base_dir);
            if watch {
                // A broken first build still leaves the watcher running
                commands::build::run_or_log(&site);
                commands::build::watch(&site)?;
            } else {
                commands::build::run(&site)?;
            }
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            commands::clean::run(&site)?;
            println!("Cleaned successfully!");
        }

        Commands::New { title, path } => {
            let site = Site::new(&base_dir)?;
            let file = commands::new::create_post(&site, &title, path.as_deref())?;
            println!("Created: {}", file.display());
        }

        Commands::List => {
            let site = Site::new(&base_dir)?;
            commands::list::run(&site)?;
        }

        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized new site in {}", target_dir.display());
        }
    }

    Ok(())
}
