//! # groundtrack
//!
//! A satellite tracking engine for near-Earth catalogued objects:
//! TLE acquisition and caching, SGP4 propagation to geodetic
//! coordinates, velocity and illumination state, ground-track
//! generation, and the day/night terminator curve.
//!
//! The pipeline runs from a catalogued object's NORAD ID to a
//! renderable position:
//!
//! ```text
//! catalog entry → TleStore (fetch/cache/fallback) → SatRec (SGP4)
//!              → KinematicState { lat, lon, alt, velocity, illumination }
//! ```
//!
//! # Example
//!
//! ```no_run
//! use chrono::Utc;
//! use groundtrack::{SatelliteTracker, TleStore, TrackSample};
//!
//! let store = TleStore::new()?;
//! let tracker = SatelliteTracker::new(store);
//!
//! match tracker.sample(25544, Utc::now()) {
//!     TrackSample::Ok(state) => println!(
//!         "ISS at {:.2}°, {:.2}°, {:.0} km",
//!         state.position.latitude, state.position.longitude, state.position.altitude_km
//!     ),
//!     TrackSample::Unpositionable => println!("TLE present but propagation failed"),
//!     TrackSample::Unavailable => println!("no orbital data for this object"),
//! }
//! # Ok::<(), groundtrack::TrackError>(())
//! ```

use thiserror::Error;

pub mod catalog;
pub mod constants;
pub mod earthlib;
pub mod eclipselib;
pub mod scheduler;
pub mod sgp4lib;
pub mod solarlib;
pub mod terminator;
pub mod timelib;
pub mod tlelib;
pub mod tracker;
pub mod tracklib;

pub use catalog::{CatalogEntry, Category, SATELLITE_CATALOG};
pub use earthlib::{eci_to_geodetic, normalize_longitude, GeodeticPosition};
pub use eclipselib::{illumination, Illumination};
pub use scheduler::RepeatingTask;
pub use sgp4lib::{propagate, KinematicState, SatRec};
pub use terminator::{night_region, TerminatorPoint};
pub use tlelib::{CelestrakSource, TleSource, TleStore, TwoLineElement};
pub use tracker::{SatelliteTracker, TrackSample};
pub use tracklib::{
    ground_track, split_at_antimeridian, split_past_future, GroundTrackConfig, OrbitPathPoint,
    PositionHistory,
};

/// Main error type for groundtrack functionality
#[derive(Error, Debug)]
pub enum TrackError {
    /// Error when data could not be retrieved or parsed
    #[error("Data error: {0}")]
    DataError(String),

    /// Error when a calculation fails
    #[error("Calculation error: {0}")]
    CalculationError(String),

    /// Error when a file I/O operation fails
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for groundtrack operations
pub type Result<T> = std::result::Result<T, TrackError>;
