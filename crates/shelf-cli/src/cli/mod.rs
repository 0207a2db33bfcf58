//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use shelf_core::{ArticleId, Config, Session, logging};

mod commands;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(version)]
#[command(about = "Search Wikipedia articles and keep a tagged reading list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out (clear the stored session token)
    Logout,
    /// Create an account
    Register {
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        /// Password confirmation
        #[arg(short, long)]
        confirm: Option<String>,
    },
    /// Show session and backend information
    Status,
    /// Search Wikipedia articles
    Search {
        /// Search terms
        #[arg(value_name = "QUERY", required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Save an article to your list
    Save {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        url: String,
    },
    /// List saved articles
    Saved,
    /// Manage tags of a saved article
    Tags {
        #[command(subcommand)]
        command: TagsCommands,
    },
    /// Delete a saved article
    Delete {
        #[arg(value_name = "ID")]
        id: ArticleId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open a saved article in the browser
    Open {
        #[arg(value_name = "ID")]
        id: ArticleId,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum TagsCommands {
    /// Ask the backend to generate tags
    Generate {
        #[arg(value_name = "ID")]
        id: ArticleId,
    },
    /// Replace all tags with a comma-separated list
    Set {
        #[arg(value_name = "ID")]
        id: ArticleId,
        /// Comma-separated tag names, e.g. "rust, cli"
        #[arg(value_name = "TAGS")]
        tags: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Generate a fresh config from Rust defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config commands must work even when the config file is broken.
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        };
    }

    let config = Config::load().context("load config")?;
    let session = Session::load().context("load session")?;

    // default to the interactive client
    let Some(command) = cli.command else {
        return shelf_tui::run_interactive(&config, session).await;
    };

    logging::init_stderr(config.log_filter.as_deref());
    let mut ctx = commands::Context::new(&config, session)?;

    match command {
        Commands::Login { username, password } => {
            commands::auth::login(&mut ctx, username, password).await
        }
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Register {
            username,
            password,
            confirm,
        } => commands::auth::register(&ctx, username, password, confirm).await,
        Commands::Status => {
            commands::auth::status(&ctx);
            Ok(())
        }
        Commands::Search { query } => commands::articles::search(&mut ctx, &query.join(" ")).await,
        Commands::Save { title, url } => commands::articles::save(&mut ctx, &title, &url).await,
        Commands::Saved => commands::articles::saved(&mut ctx).await,
        Commands::Tags { command } => match command {
            TagsCommands::Generate { id } => commands::articles::generate_tags(&mut ctx, &id).await,
            TagsCommands::Set { id, tags } => {
                commands::articles::set_tags(&mut ctx, &id, &tags).await
            }
        },
        Commands::Delete { id, yes } => commands::articles::delete(&mut ctx, &id, yes).await,
        Commands::Open { id } => commands::articles::open(&mut ctx, &id).await,
        // Handled before loading config.
        Commands::Config { .. } => Ok(()),
    }
}
