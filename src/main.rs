mod cli;

use clap::Parser;
use cli::{App, Cli};
use colored::*;
use gios_air_quality::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    info!("Looking up station {}", cli.station_id);

    let app = App::new(cli.base_url.clone())?;

    if let Err(e) = app.run(&cli).await {
        error!("Lookup for station {} failed: {:?}", cli.station_id, e);
        eprintln!("{} {}", "Error:".red().bold(), e.to_string().red());
        return Err(e);
    }

    Ok(())
}
