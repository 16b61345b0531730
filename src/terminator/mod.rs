//! Day/night terminator geometry
//!
//! Builds the night-side region of Earth as a closed polygon in
//! latitude/longitude space: one terminator vertex per degree of
//! longitude, clamped to ±85° so the polygon stays renderable on a
//! Mercator map, then closed across the pole opposite the Sun's
//! declination.

use chrono::{DateTime, Utc};

use crate::solarlib::{solar_position, SolarPosition};
use crate::timelib::{gmst, julian_date};

/// Latitude clamp for polygon vertices, degrees
const POLAR_CLAMP_DEG: f64 = 85.0;

/// Below this |declination| (radians) the terminator is treated as the
/// equator, avoiding the tan singularity at equinox
const DECLINATION_EPSILON: f64 = 1e-4;

/// One vertex of the night-region polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminatorPoint {
    /// Latitude in degrees, clamped to [-85, 85]
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180]
    pub longitude: f64,
}

/// Latitude of the terminator at a given longitude, in degrees.
///
/// Solves the sunrise equation for the Sun's hour angle at that
/// meridian. Within [`DECLINATION_EPSILON`] of zero declination the
/// terminator runs along the equator.
fn terminator_latitude(longitude_deg: f64, gmst_rad: f64, sun: &SolarPosition) -> f64 {
    if sun.declination.abs() < DECLINATION_EPSILON {
        return 0.0;
    }
    let hour_angle = gmst_rad + longitude_deg.to_radians() - sun.right_ascension;
    (-hour_angle.cos() / sun.declination.tan()).atan().to_degrees()
}

/// Compute the night-side region polygon at an instant.
///
/// Returns terminator vertices at one-degree longitude spacing from
/// -180° to +180° inclusive, followed by two closure vertices along
/// the dark pole's 85th parallel. The result is a closed polygon
/// ready for a fill layer; vertices are in polygon winding order, not
/// normalized longitude space.
pub fn night_region(t: DateTime<Utc>) -> Vec<TerminatorPoint> {
    let jd = julian_date(t);
    let sun = solar_position(jd);
    let gmst_rad = gmst(jd);

    let mut polygon = Vec::with_capacity(363);
    let mut lng = -180.0;
    while lng <= 180.0 {
        let lat = terminator_latitude(lng, gmst_rad, &sun);
        if lat.is_finite() {
            polygon.push(TerminatorPoint {
                latitude: lat.clamp(-POLAR_CLAMP_DEG, POLAR_CLAMP_DEG),
                longitude: lng,
            });
        }
        lng += 1.0;
    }

    // Close across the pole opposite the Sun: night is to the south
    // when the Sun is north of the equator, and vice versa.
    let dark_pole_lat = if sun.declination >= 0.0 {
        -POLAR_CLAMP_DEG
    } else {
        POLAR_CLAMP_DEG
    };
    polygon.push(TerminatorPoint {
        latitude: dark_pole_lat,
        longitude: 180.0,
    });
    polygon.push(TerminatorPoint {
        latitude: dark_pole_lat,
        longitude: -180.0,
    });

    polygon
}
