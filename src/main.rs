use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use repo_lens::browser::{BrowserState, RepoBrowser};
use repo_lens::config::{find_config_file, get_config, load_config};
use repo_lens::fetcher::GithubFetcher;
use repo_lens::ui;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// repo-lens - Search and browse a GitHub user's public repositories
#[derive(Parser, Debug)]
#[command(name = "repo-lens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "hongkongkiwi")]
#[command(about = "Search and browse a GitHub user's public repositories", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List a user's or organization's repositories
    List {
        /// Username or organization to list
        subject: String,

        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Repositories per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Show details of one repository by name
    Show {
        /// Username or organization to search
        subject: String,

        /// Exact repository name to resolve
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("repo_lens={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)?
    } else {
        get_config()
    };

    match cli.command {
        Commands::List {
            subject,
            pages,
            page_size,
        } => {
            let subject = subject.trim();
            if subject.is_empty() {
                bail!("subject must not be blank");
            }

            let fetcher = Arc::new(GithubFetcher::from_config(&config.github));
            let browser = RepoBrowser::new(fetcher)
                .with_page_size(page_size.unwrap_or(config.github.page_size));

            browser.search(subject).await;

            // Page forward until the requested depth or end-of-data; the
            // browser no-ops these calls once exhausted or errored.
            for _ in 1..pages {
                if browser.is_exhausted() {
                    break;
                }
                browser.load_more().await;
            }

            render_state(&browser.current_state(), cli.output)?;
        }

        Commands::Show { subject, name } => {
            let subject = subject.trim();
            if subject.is_empty() {
                bail!("subject must not be blank");
            }

            let fetcher = Arc::new(GithubFetcher::from_config(&config.github));
            let browser =
                RepoBrowser::new(fetcher).with_page_size(config.github.page_size);

            browser.search(subject).await;

            // Keep paging until the name resolves or pages run out.
            while browser.lookup(&name).is_none() {
                if browser.is_exhausted()
                    || !matches!(browser.current_state(), BrowserState::Success { .. })
                {
                    break;
                }
                browser.load_more().await;
            }

            if let BrowserState::Error { message } = browser.current_state() {
                bail!(message);
            }

            match browser.lookup(&name) {
                Some(repo) => {
                    if use_json(cli.output) {
                        println!("{}", serde_json::to_string_pretty(&repo)?);
                    } else {
                        ui::print_repo_detail(&repo);
                    }
                }
                None => bail!("repository \"{}\" not found for {}", name, subject),
            }
        }
    }

    Ok(())
}

fn use_json(output: OutputFormat) -> bool {
    match output {
        OutputFormat::Json => true,
        OutputFormat::Table => false,
        OutputFormat::Auto => !ui::is_terminal(),
    }
}

fn render_state(state: &BrowserState, output: OutputFormat) -> Result<()> {
    match state {
        BrowserState::Success { repos, .. } => {
            if use_json(output) {
                println!("{}", serde_json::to_string_pretty(repos)?);
            } else {
                println!("{}", ui::repo_table(repos));
                ui::print_state(state);
            }
            Ok(())
        }
        BrowserState::Error { message } => bail!(message.clone()),
        // List always searches first, so these are unreachable in practice
        BrowserState::Idle | BrowserState::Loading => Ok(()),
    }
}
