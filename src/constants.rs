//! Physical and astronomical constants shared across the crate

/// Earth's mean radius in km (used for the eclipse shadow cylinder)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// WGS84 equatorial radius in km
pub const WGS84_RADIUS_KM: f64 = 6378.137;

/// WGS84 inverse flattening (a / (a - b))
pub const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;

/// Astronomical unit in km
pub const AU_KM: f64 = 149_597_870.7;

/// Julian date of the J2000.0 epoch (2000 January 1, 12:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Julian date of the Unix epoch (1970 January 1, 00:00 UTC)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Seconds per day
pub const DAY_S: f64 = 86_400.0;

/// Seconds per hour (km/s → km/h conversion)
pub const HOUR_S: f64 = 3600.0;
