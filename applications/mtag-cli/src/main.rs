/// MTag - inspect and edit media file tags
use clap::{Parser, Subcommand};
use mtag_core::MTag;
use mtag_lofty::LoftyEngine;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "mtag")]
#[command(about = "Inspect and edit media file tags", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MTAG_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the file type
    Info {
        path: PathBuf,
    },
    /// Print every field of a tag
    Show {
        path: PathBuf,
        /// Tag flavor (default tag if omitted)
        #[arg(short, long)]
        flavor: Option<String>,
    },
    /// Print one field
    Get {
        path: PathBuf,
        key: String,
        /// Tag flavor (default tag if omitted)
        #[arg(short, long)]
        flavor: Option<String>,
    },
    /// Set one field and save
    Set {
        path: PathBuf,
        key: String,
        value: String,
        /// Tag flavor (default tag if omitted)
        #[arg(short, long)]
        flavor: Option<String>,
        /// Create the flavor if the file lacks it
        #[arg(long)]
        create: bool,
    },
    /// Remove tag flavors and save
    Strip {
        path: PathBuf,
        #[arg(required = true)]
        flavors: Vec<String>,
    },
    /// Exit successfully if the file has a tag of the flavor
    Has {
        path: PathBuf,
        flavor: String,
    },
    /// Strip ID3v1, dump the default tag and edit the artist (without saving)
    Demo {
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("MTAG_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mtag = MTag::new(LoftyEngine::new(config.engine));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Info { path } => commands::info(&mtag, &path, &mut out)?,
        Commands::Show { path, flavor } => {
            commands::show(&mtag, &path, flavor.as_deref(), &mut out)?;
        }
        Commands::Get { path, key, flavor } => {
            commands::get(&mtag, &path, &key, flavor.as_deref(), &mut out)?;
        }
        Commands::Set {
            path,
            key,
            value,
            flavor,
            create,
        } => commands::set(&mtag, &path, &key, &value, flavor.as_deref(), create)?,
        Commands::Strip { path, flavors } => commands::strip(&mtag, &path, &flavors)?,
        Commands::Has { path, flavor } => {
            if !commands::has(&mtag, &path, &flavor, &mut out)? {
                out.flush()?;
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Demo { path } => commands::demo(&mtag, &path, &mut out)?,
    }

    out.flush()?;
    Ok(ExitCode::SUCCESS)
}
