//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use sessctl_core::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "sessctl")]
#[command(version)]
#[command(about = "Session and auth client for the demo auth server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the auth server (overrides config)
    #[arg(long, env = "SESSCTL_BASE_URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in with email + password, or via Google
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,
        /// Account password (read from stdin if omitted)
        #[arg(long)]
        password: Option<String>,
        /// Use the Google redirect flow instead of a password
        #[arg(long)]
        google: bool,
    },

    /// Register a new account
    Register {
        /// Display name
        #[arg(long)]
        name: String,
        /// Account email
        #[arg(long)]
        email: String,
        /// Account password (read from stdin if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Set a password on the current account (requires a session)
    SetPassword {
        /// New password (read from stdin if omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out (clear the stored session)
    Logout,

    /// Show the current session, confirmed against the server
    Status,

    /// Probe a demo endpoint with the stored token
    Probe {
        /// Endpoint path, e.g. /api/protected
        #[arg(value_name = "ENDPOINT")]
        endpoint: Option<String>,
        /// Probe every demo endpoint
        #[arg(long, conflicts_with = "endpoint")]
        all: bool,
        /// Send the request without the bearer token
        #[arg(long = "no-token")]
        no_token: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Logs go to stderr so command output stays pipeable.
/// Level via SESSCTL_LOG (default: warn).
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("SESSCTL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;
    let base_url = config.resolve_base_url(cli.base_url.as_deref());

    match cli.command {
        Commands::Login {
            email,
            password,
            google,
        } => match (email, google) {
            (None, true) => commands::google::login(&base_url).await,
            (Some(email), false) => {
                commands::auth::login(&base_url, &email, password.as_deref()).await
            }
            (Some(_), true) => {
                anyhow::bail!("--email and --google are mutually exclusive")
            }
            (None, false) => {
                anyhow::bail!("Please specify --email <EMAIL> or --google")
            }
        },

        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&base_url, &name, &email, password.as_deref()).await,

        Commands::SetPassword { password } => {
            commands::auth::set_password(&base_url, password.as_deref()).await
        }

        Commands::Logout => commands::auth::logout(),

        Commands::Status => commands::status::run(&base_url).await,

        Commands::Probe {
            endpoint,
            all,
            no_token,
        } => commands::probe::run(&base_url, endpoint.as_deref(), all, no_token).await,

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
