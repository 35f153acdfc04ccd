//! Fetches the current air quality index of a GIOS monitoring station and
//! decodes it into a strongly-typed [`AirQuality`] record.
//!
//! ```no_run
//! # async fn run() -> gios_air_quality::Result<()> {
//! let quality = gios_air_quality::get_air_quality(117).await?;
//! println!("{}: {}", quality.station_id, quality.general_index.index_level.name);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod decode;
pub mod error;
pub mod models;

pub use api::{get_air_quality, GiosClient, API_BASE_URL};
pub use error::{AppError, DecodeError, Result};
pub use models::{
    AQGeneralIndex, AQIndex, AQIndexLevel, AirQuality, GeneralIndexName, Pollutant,
};
