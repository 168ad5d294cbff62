//! Shopscout command-line entry point.

mod args;
mod output;

use anyhow::{Context, Result};
use args::Command;
use shopscout_auth::ServiceAccount;
use shopscout_browser::BrowserEngine;
use shopscout_core::{AppConfig, SearchQuery};
use shopscout_search::SearchExecutor;
use tracing::{info, warn};

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,shopscout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    match args::parse(std::env::args().skip(1))? {
        Command::Search {
            query,
            json,
            headful,
        } => search(&query, json, headful).await,
        Command::CheckCredentials => check_credentials(),
        Command::ConfigPath => {
            println!("{}", AppConfig::config_path()?.display());
            Ok(())
        }
        Command::Help => {
            print!("{}", include_str!("help.txt"));
            Ok(())
        }
    }
}

async fn search(query: &str, json: bool, headful: bool) -> Result<()> {
    info!("Starting Shopscout v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_with_env().context("failed to load configuration")?;
    if headful {
        config.browser.headless = false;
    }

    let query = SearchQuery::new(query)?;
    let executor = SearchExecutor::new(&config)?;
    let engine = BrowserEngine::with_config(&config.browser)
        .await
        .context("failed to launch browser")?;

    let outcome = executor.search(&engine, &query).await;

    if let Err(e) = engine.shutdown().await {
        warn!("Browser did not shut down cleanly: {}", e);
    }

    let outcome = outcome.with_context(|| format!("search for '{query}' failed"))?;

    if json {
        println!("{}", output::render_json(&outcome.into_result())?);
    } else {
        print!("{}", output::render_table(query.as_str(), &outcome));
    }

    Ok(())
}

fn check_credentials() -> Result<()> {
    let config = AppConfig::load_with_env().context("failed to load configuration")?;
    let account = ServiceAccount::load_from_config(&config)?;

    println!(
        "Service account {} (project {}) loaded",
        account.client_email, account.project_id
    );
    Ok(())
}
