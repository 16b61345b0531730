//! Low-precision analytic solar ephemeris
//!
//! Computes the Sun's apparent right ascension, declination, and an
//! ECI-frame direction vector from the mean longitude plus the
//! equation-of-center correction (the standard Almanac low-precision
//! formula, good to ~0.01°). Both the eclipse test and the terminator
//! curve consume this one routine — at their accuracy requirements
//! (minutes near shadow/terminator crossings) a higher-precision
//! ephemeris would be wasted work.

use nalgebra::Vector3;

use crate::constants::{AU_KM, J2000_JD};

/// Mean obliquity of the ecliptic in degrees (J2000, slow drift ignored)
const OBLIQUITY_DEG: f64 = 23.439;

/// The Sun's apparent equatorial coordinates at some instant.
#[derive(Debug, Clone, Copy)]
pub struct SolarPosition {
    /// Apparent right ascension in radians, [-π, π]
    pub right_ascension: f64,
    /// Apparent declination in radians
    pub declination: f64,
    /// Apparent ecliptic longitude in radians
    pub ecliptic_longitude: f64,
}

/// Compute the Sun's apparent equatorial position for a Julian date.
pub fn solar_position(jd: f64) -> SolarPosition {
    let n = jd - J2000_JD;

    // Mean longitude and mean anomaly, wrapped to [0, 360)
    let l = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let g = (357.528 + 0.985_600_3 * n).rem_euclid(360.0).to_radians();

    // Ecliptic longitude with the equation-of-center correction
    let lambda = (l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();
    let epsilon = OBLIQUITY_DEG.to_radians();

    let right_ascension = (epsilon.cos() * lambda.sin()).atan2(lambda.cos());
    let declination = (epsilon.sin() * lambda.sin()).asin();

    SolarPosition {
        right_ascension,
        declination,
        ecliptic_longitude: lambda,
    }
}

/// Compute the Sun's position vector in the ECI frame, in km.
///
/// The Sun-Earth distance is approximated as one astronomical unit;
/// only the direction matters for shadow geometry.
pub fn sun_position_eci(jd: f64) -> Vector3<f64> {
    let pos = solar_position(jd);
    let lambda = pos.ecliptic_longitude;
    let epsilon = OBLIQUITY_DEG.to_radians();

    Vector3::new(
        AU_KM * lambda.cos(),
        AU_KM * epsilon.cos() * lambda.sin(),
        AU_KM * epsilon.sin() * lambda.sin(),
    )
}
