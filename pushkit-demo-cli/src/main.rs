//! Pushkit Demo CLI
//!
//! Command-line client for the Pushkit notification API and the realtime
//! database it writes to.

use anyhow::Result;
use clap::{Parser, Subcommand};

use pushkit_demo_cli::api::{ApiClient, DEFAULT_API_URL};
use pushkit_demo_cli::commands::{self, send::parse_key_value};

#[derive(Parser)]
#[command(name = "pushkit-demo")]
#[command(about = "Pushkit Demo CLI - register users, send notifications and listen for them", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Notification API base URL
    #[arg(long, global = true, env = "PUSHKIT_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the token derived from an identifier (offline)
    Hash {
        /// User identifier
        identifier: String,
    },

    /// Show the storage path and listen URL for an identifier (offline)
    Path {
        /// User identifier
        identifier: String,

        /// Database root URL to build the listen URL on
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Register a user and receive the welcome notification
    Register {
        /// User identifier
        user_id: String,
    },

    /// Send a random notification to a user
    SendRandom {
        /// User identifier
        user_id: String,
    },

    /// Send a custom notification to a user
    Send {
        /// User identifier
        user_id: String,

        /// Notification title
        #[arg(short, long)]
        title: String,

        /// Notification body
        #[arg(short, long, default_value = "")]
        body: String,

        /// Extra fields such as type=deploy, priority=2 or category=warning
        #[arg(short, long = "data", value_parser = parse_data)]
        data: Vec<(String, String)>,
    },

    /// List stored notifications for a user, newest first
    Inbox {
        /// User identifier
        user_id: String,

        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show the Firebase settings advertised by the server
    Config {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the server is up
    Status,

    /// Follow the newest notification on a listen URL until Ctrl+C
    Listen {
        /// Listen URL returned by `register`
        listen_url: String,

        /// Database secret or ID token
        #[arg(long, env = "PUSHKIT_AUTH_TOKEN")]
        auth_token: Option<String>,

        /// Exit after this many notifications
        #[arg(short, long)]
        count: Option<usize>,
    },
}

fn parse_data(raw: &str) -> std::result::Result<(String, String), String> {
    parse_key_value(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("pushkit_demo_cli=debug,pushkit_lib=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("pushkit_demo_cli=info,pushkit_lib=warn")
            .init();
    }

    let api = || ApiClient::new(&cli.api_url);

    // Dispatch commands
    match &cli.command {
        Commands::Hash { identifier } => {
            commands::hash::run(identifier, cli.verbose).await?;
        }
        Commands::Path {
            identifier,
            base_url,
        } => {
            commands::path::run(identifier, base_url.as_deref(), cli.verbose).await?;
        }
        Commands::Register { user_id } => {
            commands::register::run(&api()?, user_id, cli.verbose).await?;
        }
        Commands::SendRandom { user_id } => {
            commands::send_random::run(&api()?, user_id, cli.verbose).await?;
        }
        Commands::Send {
            user_id,
            title,
            body,
            data,
        } => {
            commands::send::run(&api()?, user_id, title, body, data.clone(), cli.verbose).await?;
        }
        Commands::Inbox { user_id, limit } => {
            commands::inbox::run(&api()?, user_id, *limit, cli.verbose).await?;
        }
        Commands::Config { json } => {
            commands::config::run(&api()?, *json, cli.verbose).await?;
        }
        Commands::Status => {
            commands::status::run(&api()?, cli.verbose).await?;
        }
        Commands::Listen {
            listen_url,
            auth_token,
            count,
        } => {
            commands::listen::run(listen_url, auth_token.as_deref(), *count, cli.verbose).await?;
        }
    }

    Ok(())
}
