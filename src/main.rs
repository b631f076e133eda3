mod commands;

use crate::commands::{batches, calculate, resolve_municipality, CalculateOptions};
use clap::{Args, Parser, Subcommand};
use council_mandates::allocation::ScrutinyRules;
use council_mandates::source::{Election, SourceConfig, DEFAULT_BASE_URL, DEFAULT_MUNICIPALITY};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[clap(name = "council-mandates", about = "Calculate municipal council mandates from volby.cz statements")]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SourceArgs {
    /// Use the previous (2018) municipal elections
    #[clap(short = 'p', long)]
    previous: bool,
    /// Base URL of the elections server
    #[clap(long, env = "VOLBY_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// HTTP timeout in seconds
    #[clap(long, default_value = "30")]
    timeout_secs: u64,
}

impl SourceArgs {
    fn config(&self) -> SourceConfig {
        SourceConfig {
            base_url: self.base_url.clone(),
            election: Election::from_previous_flag(self.previous),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Download a statement and calculate the council mandates.
    Calculate {
        /// Municipality code (six digits). May be repeated.
        #[clap(long = "org")]
        orgs: Vec<String>,
        /// Read the statement from a file instead of downloading it
        #[clap(long)]
        file: Option<PathBuf>,
        /// Print the results as JSON
        #[clap(long)]
        json: bool,
        #[clap(flatten)]
        source: SourceArgs,
    },
    /// Find the result batches that contain a municipality.
    Batches {
        /// Municipality code (six digits)
        #[clap(long, default_value = DEFAULT_MUNICIPALITY)]
        org: String,
        #[clap(flatten)]
        source: SourceArgs,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Opts::parse();

    match opts.command {
        Command::Calculate {
            orgs,
            file,
            json,
            source,
        } => {
            let municipalities = if orgs.is_empty() {
                vec![DEFAULT_MUNICIPALITY.to_string()]
            } else {
                orgs.iter().map(|code| resolve_municipality(code)).collect()
            };

            let options = CalculateOptions {
                municipalities,
                file,
                json,
                source: source.config(),
                rules: ScrutinyRules::default(),
            };
            if let Err(e) = calculate(&options).await {
                eprintln!("❌ Calculation failed: {}", e);
                std::process::exit(1);
            }
        }
        Command::Batches { org, source } => {
            let org = resolve_municipality(&org);
            if let Err(e) = batches(&org, source.config()).await {
                eprintln!("❌ Batch scan failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
