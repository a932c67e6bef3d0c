use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use projectmanage::client::ApiClient;
use projectmanage::db::{self, Database};
use projectmanage::{config, server, ui};

/// Project management: REST API server and terminal client
#[derive(Parser)]
#[command(version, about)]
struct Arguments {
    /// Increase logging verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve(ServeArgs),
    /// Open the terminal client against a running server
    Ui(UiArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on (overrides BIND_ADDR)
    #[arg(long)]
    bind: Option<String>,

    /// Database URL (overrides DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Keep everything in memory; nothing survives a restart
    #[arg(long, conflicts_with = "database_url")]
    in_memory: bool,
}

#[derive(Args)]
struct UiArgs {
    /// Base URL of the API (overrides API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Arguments::parse();

    // The terminal client owns the screen, so it only logs when asked to.
    let quiet = args.quiet || (matches!(args.command, Commands::Ui(_)) && args.verbose == 0);
    stderrlog::new()
        .quiet(quiet)
        .verbosity(args.verbose as usize + 2)
        .init()?;

    // Load configuration
    let mut config = config::init()?;

    match args.command {
        Commands::Serve(serve) => {
            if let Some(bind) = serve.bind {
                config.bind_addr = bind;
            }
            if let Some(url) = serve.database_url {
                config.database_url = url;
            }

            let db = if serve.in_memory {
                log::warn!("Using an in-memory database");
                Database::in_memory().await?
            } else {
                db::init(&config).await?
            };

            server::start_server(db, &config.bind_addr).await?;
        }
        Commands::Ui(ui_args) => {
            if let Some(url) = ui_args.api_url {
                config.api_url = url;
            }

            let client = ApiClient::new(config.api_url.clone(), config.uploader.clone());
            if let Err(err) = ui::app::run(client).await {
                println!("Error: {}", err);
            }
        }
    }

    Ok(())
}
