//! Julian dates and Greenwich Mean Sidereal Time
//!
//! The engine works in UTC throughout and treats UTC as UT1 for Earth
//! rotation, which is accurate to under a second (sub-arcsecond GMST
//! error) — far below the accuracy of SGP4 itself.

use chrono::{DateTime, Utc};

use crate::constants::{J2000_JD, UNIX_EPOCH_JD};

/// Convert a UTC instant to a Julian date.
pub fn julian_date(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

/// Days elapsed since the J2000.0 epoch for a Julian date.
pub fn days_since_j2000(jd: f64) -> f64 {
    jd - J2000_JD
}

/// Compute Greenwich Mean Sidereal Time in radians for a Julian date.
///
/// Uses the IAU 1982 polynomial (Meeus, *Astronomical Algorithms*,
/// eq. 12.4), with the input Julian date taken as UT1. The result is
/// wrapped to [0, 2π).
pub fn gmst(jd: f64) -> f64 {
    let d = days_since_j2000(jd);
    let t = d / 36525.0;
    let gmst_deg =
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0;
    gmst_deg.rem_euclid(360.0).to_radians()
}
