//! Tool server over stdin/stdout

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tokio::io::BufReader;
use tracing::info;

use flipkart_scraper::commands::serve;
use flipkart_scraper::infrastructure::logging::{init_logging_with_config, log_system_info};
use flipkart_scraper::{AppConfig, HttpClient, ParsingService, ScraperTools};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_arg()?;
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    init_logging_with_config(&config.logging)?;
    log_system_info();

    let fetcher = HttpClient::new(config.http.clone()).context("Failed to create HTTP client")?;
    let parsing = ParsingService::new(&config.parsing).context("Failed to compile selectors")?;
    let tools = ScraperTools::new(fetcher, parsing);

    info!("Serving tool requests on stdin");
    serve(&tools, BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("Tool server I/O failed")?;

    info!("Shutting down");
    Ok(())
}

/// `--config <path>`, the only accepted argument
fn config_path_arg() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--config") => args
            .next()
            .map(|path| Some(PathBuf::from(path)))
            .context("--config requires a path"),
        Some(other) => bail!("Unknown argument: {other} (usage: flipkart-scraper [--config <path>])"),
    }
}
