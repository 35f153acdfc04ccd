use chrono::{DateTime, Utc};
use chrono_tz::Europe::Warsaw;
use clap::{Parser, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use gios_air_quality::{AQIndexLevel, AirQuality, AppError, GiosClient, Result, API_BASE_URL};
use std::env;
use tracing::{debug, info};

/// Environment variable overriding the upstream API base URL.
pub const BASE_URL_ENV: &str = "GIOS_API_BASE_URL";

/// Show the current air quality index of a GIOS monitoring station
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Station identifier, as listed by the GIOS station catalogue
    #[arg(value_parser = clap::value_parser!(i64).range(1..))]
    pub station_id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// API base URL (default: $GIOS_API_BASE_URL, then the public GIOS API)
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

/// CLI application
pub struct App {
    client: GiosClient,
}

impl App {
    /// Create the application, resolving the API base URL from the flag, the
    /// environment (including a `.env` file) or the built-in default.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        dotenv::dotenv().ok();

        let base_url = match base_url {
            Some(url) => url,
            None => match env::var(BASE_URL_ENV) {
                Ok(url) => url,
                Err(env::VarError::NotPresent) => API_BASE_URL.to_string(),
                Err(e) => return Err(AppError::Env(e)),
            },
        };
        debug!("Using API base URL {}", base_url);

        Ok(Self {
            client: GiosClient::with_base_url(&base_url),
        })
    }

    /// Fetch the station's index and print it in the requested format
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        let quality = self.client.get_air_quality(cli.station_id).await?;
        info!(
            "Station {} reports {} pollutant indexes",
            quality.station_id,
            quality.indexes.len()
        );

        println!("{}", render(&quality, cli.format)?);
        Ok(())
    }
}

/// Render a record as a table or pretty-printed JSON
pub fn render(quality: &AirQuality, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(quality)?),
        OutputFormat::Table => Ok(render_table(quality)),
    }
}

fn render_table(quality: &AirQuality) -> String {
    let general = &quality.general_index;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Index",
        "Level",
        "Calculated",
        "Source data",
    ]);

    table.add_row(vec![
        Cell::new("General"),
        level_cell(&general.index_level),
        Cell::new(local_time(general.calc_time)),
        Cell::new(local_time(general.source_time)),
    ]);
    for index in &quality.indexes {
        table.add_row(vec![
            Cell::new(index.name.label()),
            level_cell(&index.index_level),
            Cell::new(local_time(index.calc_time)),
            Cell::new(local_time(index.source_time)),
        ]);
    }

    format!("Station {}\n{}", quality.station_id, table)
}

// Level ids run from 0 (very good) to 5 (very bad); -1 means no index
fn level_cell(level: &AQIndexLevel) -> Cell {
    let color = match level.id {
        0 | 1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::DarkYellow,
        4 => Color::Red,
        5 => Color::DarkRed,
        _ => Color::Grey,
    };
    Cell::new(&level.name).fg(color)
}

fn local_time(time: DateTime<Utc>) -> String {
    time.with_timezone(&Warsaw)
        .format("%Y-%m-%d %H:%M %Z")
        .to_string()
}
