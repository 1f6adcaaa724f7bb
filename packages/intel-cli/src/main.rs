//! Interactive terminal for the company intelligence pipeline.
//!
//! Three views, mirroring the workflow: collect data from the directory,
//! explore a dataset company by company, chat with the assistant about
//! the selected company.

mod session;
mod views;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use company_intel::{
    ChatProvider, DatasetStore, GeminiChat, HttpFetcher, NeuScraperClient, Pipeline,
    PipelineConfig, DEFAULT_DIRECTORY_URL, DEFAULT_EXTRACTOR_ENDPOINT,
};

use session::SessionState;

/// The concrete pipeline the CLI drives.
pub type AppPipeline = Pipeline<HttpFetcher, NeuScraperClient>;

#[derive(Parser)]
#[command(name = "intel", about = "Collect, explore and chat about company data")]
struct Args {
    /// Directory for saved datasets
    #[arg(long, default_value = "company_data")]
    data_dir: PathBuf,

    /// Content-extraction service endpoint (falls back to $NEUSCRAPER_ENDPOINT)
    #[arg(long)]
    extractor_endpoint: Option<String>,

    /// Directory search URL
    #[arg(long, default_value = DEFAULT_DIRECTORY_URL)]
    directory_url: Url,

    /// Listing pages to fetch per collection run
    #[arg(long, default_value_t = 1)]
    page_limit: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,company_intel=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let term = Term::stdout();
    print_banner(&term)?;

    let extractor_endpoint = args
        .extractor_endpoint
        .or_else(|| std::env::var("NEUSCRAPER_ENDPOINT").ok())
        .unwrap_or_else(|| DEFAULT_EXTRACTOR_ENDPOINT.to_string());

    let store = DatasetStore::new(&args.data_dir)
        .with_context(|| format!("failed to open data directory {}", args.data_dir.display()))?;
    let config = PipelineConfig::default().with_directory_url(args.directory_url);
    let pipeline = Pipeline::new(
        HttpFetcher::new(),
        NeuScraperClient::new(extractor_endpoint),
        store,
        config,
    );

    let chat_provider = match GeminiChat::from_env() {
        Ok(provider) => Some(provider),
        Err(e) => {
            println!("{}", format!("⚠️  Chat disabled: {e}").yellow());
            None
        }
    };

    let mut state = SessionState::default();

    // Main interactive loop
    loop {
        println!();
        let options = vec![
            "📊 Collect company data",
            "🏢 Explore companies",
            "💬 Chat assistant",
            "🛑 Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(&options)
            .default(0)
            .interact_on(&term)?;

        match selection {
            0 => views::collect::run(&pipeline, &mut state, args.page_limit).await?,
            1 => {
                let provider = chat_provider.as_ref().map(|p| p as &dyn ChatProvider);
                views::explore::run(&pipeline, &mut state, provider).await?
            }
            2 => {
                let provider = chat_provider.as_ref().map(|p| p as &dyn ChatProvider);
                views::chat::run(&mut state, provider).await?
            }
            3 => {
                println!("{}", "👋 Goodbye!".bright_blue());
                break;
            }
            _ => unreachable!(),
        }
    }

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║    Company Intelligence Platform       ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}
