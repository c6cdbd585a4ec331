use std::sync::Arc;

use anyhow::Result;
use carter_desktop::{app, cli, logging};
use carter_infrastructure::{CarterClient, ConfigService};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let paths = cli.paths();
    let config = ConfigService::new(paths.clone()).get_config()?;
    let paths = match cli.data_dir.clone().or_else(|| config.data_dir.clone()) {
        Some(data_dir) => paths.with_data_dir(data_dir),
        None => paths,
    };

    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let log_dir = if config.log_to_file {
        Some(paths.logs_dir()?)
    } else {
        None
    };
    let _log_guard = logging::init(log_level, log_dir.as_deref())?;

    let api_url = cli.api_url.as_deref().unwrap_or(&config.api_url);
    let api = Arc::new(CarterClient::new(api_url));

    let boot = app::bootstrap(&paths, api).await?;
    let output = cli::run(cli.command, boot.router).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
