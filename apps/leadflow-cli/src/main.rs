//! Leadflow CLI
//!
//! Command-line interface for the Leadflow lead-management API: browse and
//! edit webhook configurations, manage contacts, and drive email-verification
//! jobs.

mod commands;
mod config;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "leadflow",
    version,
    about = "Leadflow - lead and contact management",
    long_about = "Command-line interface for the Leadflow platform.\n\n\
                  Use this CLI to manage contacts, configure webhooks,\n\
                  and run email-verification jobs against your directory."
)]
struct Cli {
    /// API endpoint URL
    #[arg(short, long, env = "LEADFLOW_API_URL")]
    api_url: Option<String>,

    /// API key for authentication
    #[arg(short = 'k', long, env = "LEADFLOW_API_KEY")]
    api_key: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(short, long, value_parser = ["text", "json", "yaml"])]
    format: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage webhook configurations
    #[command(subcommand)]
    Webhook(WebhookCommands),

    /// Manage contacts
    #[command(subcommand)]
    Contact(ContactCommands),

    /// Email-verification jobs
    #[command(subcommand)]
    Verify(VerifyCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum WebhookCommands {
    /// List configured webhooks
    List,
    /// Add a new webhook
    Add,
    /// Edit an existing webhook
    Edit {
        /// Webhook ID
        id: String,
    },
    /// Delete a webhook
    Delete {
        /// Webhook ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ContactCommands {
    /// List contacts
    List,
    /// Add a new contact
    Add {
        /// First name
        #[arg(long)]
        first_name: Option<String>,
        /// Last name
        #[arg(long)]
        last_name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
enum VerifyCommands {
    /// Create a verification job for the given contact ids
    Create {
        /// Contact ids to verify
        #[arg(required = true)]
        contact_ids: Vec<i64>,
    },
    /// Run a previously created verification job
    Run {
        /// Job ID
        job_id: String,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "leadflow_webhook=debug,leadflow_sdk=debug".into()),
            )
            .init();
    }

    let config = config::CliConfig::load().unwrap_or_default();
    let (api_url, api_key) = config.with_overrides(cli.api_url.as_deref(), cli.api_key.as_deref());
    let format = cli
        .format
        .or_else(|| config.output_format.clone())
        .unwrap_or_else(|| "text".to_string());

    let result = match cli.command {
        Commands::Webhook(cmd) => {
            commands::webhook::run(&api_url, api_key.as_deref(), cmd, &format).await
        }
        Commands::Contact(cmd) => {
            commands::contact::run(&api_url, api_key.as_deref(), cmd, &format).await
        }
        Commands::Verify(cmd) => {
            commands::verify::run(&api_url, api_key.as_deref(), cmd, &format).await
        }
        Commands::Config(cmd) => commands::config::run(cmd),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            if cli.verbose {
                if let Some(source) = e.source() {
                    eprintln!("{}: {}", "Caused by".yellow(), source);
                }
            }
            ExitCode::FAILURE
        }
    }
}
