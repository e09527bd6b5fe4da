//! Judge companion CLI
//!
//! Parse a problem or contest page and send the tasks to local receivers.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use judge_companion::{
    error::{AppError, Result},
    models::Config,
    parsers::{FanOut, ParserRegistry},
    pipeline::{self, ParseOutcome},
    services::{ConfiguredHosts, Delivery, Signal},
    utils::http::{self, HttpFetcher},
};
use tokio::sync::mpsc;

/// Judge companion - competitive programming task parser
#[derive(Parser, Debug)]
#[command(
    name = "judge-companion",
    version,
    about = "Parse judge problem pages and deliver them to local tools"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a problem or contest page and deliver the tasks
    Parse {
        /// Page URL
        url: String,

        /// Parser to use, by name (skips URL matching)
        #[arg(short, long)]
        parser: Option<String>,

        /// Read the page from a file instead of fetching it
        #[arg(long)]
        html: Option<PathBuf>,

        /// Print the tasks as JSON instead of delivering them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the parsers that accept a URL
    Parsers {
        /// Page URL
        url: String,
    },

    /// List every registered parser
    List,

    /// Fetch an external file through the permission gate
    Relay {
        /// File URL
        link: String,

        /// Extra granted origin pattern (repeatable)
        #[arg(long = "grant")]
        grants: Vec<String>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    let registry = ParserRegistry::builtin()?;

    match cli.command {
        Command::Parse {
            url,
            parser,
            html,
            dry_run,
        } => {
            let html = html.map(std::fs::read_to_string).transpose()?;
            let fetcher = HttpFetcher::from_config(&config.fetcher)?;
            let fan_out = FanOut::from(&config.fetcher);

            let outcome =
                pipeline::run_parse(&registry, &fetcher, &fan_out, &url, parser.as_deref(), html)
                    .await?;

            let tasks = match outcome {
                ParseOutcome::Ambiguous(choices) => {
                    log::warn!("Several parsers accept {}, pick one with --parser", url);
                    print_json(&choices)?;
                    return Ok(());
                }
                ParseOutcome::Tasks { tasks, failures } => {
                    for (link, error) in &failures {
                        log::warn!("Skipped {}: {}", link, error);
                    }
                    tasks
                }
            };

            if dry_run {
                return print_json(&tasks);
            }

            let client = http::create_async_client(&config.fetcher)?;
            let delivery = Delivery::new(
                ConfiguredHosts::new(client, config.delivery.clone()).with_config_path(&cli.config),
            );
            let (tx, mut rx) = mpsc::unbounded_channel();
            pipeline::deliver_tasks(&delivery, &tasks, &tx).await?;
            drop(tx);

            let mut sent = 0;
            while let Some(signal) = rx.recv().await {
                if signal == Signal::TaskSent {
                    sent += 1;
                }
            }
            log::info!("Sent {} task(s)", sent);
        }

        Command::Parsers { url } => {
            let choices = pipeline::run_choices(&registry, &url);
            if choices.is_empty() {
                return Err(AppError::NoParser { url });
            }
            print_json(&choices)?;
        }

        Command::List => {
            print_json(&pipeline::run_list(&registry))?;
        }

        Command::Relay { link, grants } => {
            let mut permissions = config.permissions.clone();
            permissions.granted_origins.extend(grants);
            let fetcher = Arc::new(HttpFetcher::from_config(&config.fetcher)?);

            let (tx, mut rx) = mpsc::unbounded_channel();
            pipeline::run_relay(&permissions, fetcher, &link, &tx).await?;
            drop(tx);

            match rx.recv().await {
                Some(Signal::FileResult { content }) => print!("{content}"),
                _ => return Err(AppError::fetch(link, "relay failed")),
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK, {} parsers registered", registry.len());
        }
    }

    Ok(())
}
