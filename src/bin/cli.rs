//! Mortimer CLI
//!
//! Command-line interface for Mortimer operations:
//! - List sessions and their grids
//! - Resolve client locations against the route table
//! - Look up grid preview images
//! - Mark or move grids

use clap::{ArgGroup, Parser, Subcommand};
use mortimer::api::{ApiClient, HttpTransport};
use mortimer::config::generate_default_config;
use mortimer::state::{grid_info, grid_names, session_names, session_path, session_record};
use mortimer::{logging, routes, Config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mortimer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse and annotate screening sessions")]
#[command(group(ArgGroup::new("verbosity").multiple(false)))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend origin, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print errors only
    #[arg(short, long, group = "verbosity", global = true)]
    pub quiet: bool,

    /// Print info, warnings and errors (default)
    #[arg(short, long, group = "verbosity", global = true)]
    pub verbose: bool,

    /// Print debug output
    #[arg(long, group = "verbosity", global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available sessions
    Sessions {
        /// Also list each session's grids
        #[arg(short, long)]
        grids: bool,
    },

    /// Resolve a client location to a route
    Resolve {
        /// Location, e.g. /mortimer/sessions/Screening-20220617
        path: String,
    },

    /// Print the route table
    Routes,

    /// List aligned preview images for a grid
    Images {
        session: String,
        grid: String,
    },

    /// Set a grid's state
    Mark {
        session: String,
        grid: String,
        state: String,
    },

    /// Record where a grid was moved
    Move {
        session: String,
        grid: String,
        location: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn level(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else if self.debug {
            Some("debug")
        } else if self.verbose {
            Some("info")
        } else {
            None
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.url = url.clone();
    }

    logging::init(&config.logging, cli.level());

    let client = || -> anyhow::Result<ApiClient<HttpTransport>> {
        let transport = HttpTransport::from_config(&config.api)?;
        Ok(ApiClient::new(transport).with_endpoint(config.api.endpoint.clone()))
    };

    match cli.command {
        Commands::Sessions { grids } => {
            let sessions = client()?.get_sessions().await?;
            let names = session_names(&sessions);

            if names.is_empty() {
                println!("No sessions.");
                return Ok(());
            }

            println!("Sessions:");
            for name in names {
                println!("  {name}");
                if !grids {
                    continue;
                }
                let Some(record) = session_record(&sessions, &name) else {
                    continue;
                };
                for grid in grid_names(record) {
                    let info = grid_info(record, &grid).unwrap_or_default();
                    println!(
                        "    grid {:<6} {:<12} {}",
                        grid,
                        info.state.as_deref().unwrap_or("-"),
                        info.moved_to
                            .map(|to| format!("moved to {to}"))
                            .unwrap_or_default()
                    );
                }
            }
        }

        Commands::Resolve { path } => {
            let table = routes(&config.router.base_url)?;
            match table.resolve(&path) {
                Some(resolved) => println!("{}", serde_json::to_string_pretty(&resolved)?),
                None => {
                    eprintln!(
                        "{path} is outside the router base {:?}",
                        config.router.base_url
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Routes => {
            let table = routes(&config.router.base_url)?;
            println!("Base: {:?}", table.base());
            println!();
            println!("{:<34} {:<12} {}", "Pattern", "Name", "View");
            println!("{}", "-".repeat(56));
            for entry in table.entries() {
                println!(
                    "{:<34} {:<12} {}",
                    entry.pattern.as_str(),
                    entry.name,
                    entry.view.as_str()
                );
            }
        }

        Commands::Images { session, grid } => {
            let client = client()?;
            let sessions = client.get_sessions().await?;
            let Some(path) = session_record(&sessions, &session).and_then(session_path) else {
                eprintln!("Session {session:?} has no path on record");
                std::process::exit(1);
            };

            let images = client.check_images(path, &grid).await?;
            if images.is_empty() {
                println!("No aligned images for grid {grid} yet.");
            }
            for image in images {
                println!("{image}");
            }
        }

        Commands::Mark {
            session,
            grid,
            state,
        } => {
            client()?.mark_grid(&session, &grid, &state).await?;
            println!("Marked {session} grid {grid}: {state}");
        }

        Commands::Move {
            session,
            grid,
            location,
        } => {
            client()?.move_grid(&session, &grid, &location).await?;
            println!("Moved {session} grid {grid} to {location}");
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{content}"),
            }
        }
    }

    Ok(())
}
