//! Earth-fixed coordinate transformations
//!
//! Converts ECI position vectors to geodetic latitude, longitude, and
//! altitude above the WGS84 ellipsoid, and provides longitude
//! normalization into the (-180, 180] interval used throughout the
//! crate.

use nalgebra::Vector3;

use crate::constants::{WGS84_INVERSE_FLATTENING, WGS84_RADIUS_KM};
use crate::timelib::gmst;
use crate::{Result, TrackError};

/// Convergence tolerance for the iterative geodetic latitude solve, radians
const LATITUDE_TOLERANCE: f64 = 1e-10;

/// Iteration cap for the geodetic latitude solve; convergence is
/// quadratic and in practice takes 3-4 passes
const MAX_ITERATIONS: usize = 10;

/// A geodetic position on or above the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    /// Geodetic latitude in degrees, [-90, 90]
    pub latitude: f64,
    /// Longitude in degrees, (-180, 180]
    pub longitude: f64,
    /// Height above the ellipsoid in km
    pub altitude_km: f64,
}

/// Normalize a longitude in degrees into the (-180, 180] interval.
///
/// The upper bound is inclusive: -180 maps to 180, so the antimeridian
/// has a single representation. The function is idempotent.
pub fn normalize_longitude(degrees: f64) -> f64 {
    let wrapped = (degrees + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Convert an ECI position vector (km) to geodetic coordinates.
///
/// Longitude comes from the vector's inertial right ascension minus
/// GMST at the given Julian date. Latitude and altitude are solved
/// iteratively against the WGS84 ellipsoid (Vallado's method, starting
/// from the geocentric latitude).
///
/// # Arguments
///
/// * `position` - ECI position vector in km
/// * `jd` - Julian date of the observation, used for Earth rotation
///
/// # Returns
///
/// The geodetic position, or a `CalculationError` if the input vector
/// is non-finite or degenerate.
pub fn eci_to_geodetic(position: &Vector3<f64>, jd: f64) -> Result<GeodeticPosition> {
    let (x, y, z) = (position.x, position.y, position.z);
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(TrackError::CalculationError(
            "non-finite ECI position".to_string(),
        ));
    }

    let r = (x * x + y * y).sqrt();
    let magnitude = (r * r + z * z).sqrt();
    if magnitude < 1.0 {
        return Err(TrackError::CalculationError(format!(
            "degenerate ECI position, |r| = {:.3} km",
            magnitude
        )));
    }

    let longitude = normalize_longitude((y.atan2(x) - gmst(jd)).to_degrees());

    let a = WGS84_RADIUS_KM;
    let f = 1.0 / WGS84_INVERSE_FLATTENING;
    let e2 = f * (2.0 - f);

    // Iterate geodetic latitude from the geocentric value.
    let mut latitude = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..MAX_ITERATIONS {
        let previous = latitude;
        let sin_lat = latitude.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (z + a * c * e2 * sin_lat).atan2(r);
        if (latitude - previous).abs() < LATITUDE_TOLERANCE {
            break;
        }
    }

    // Near the poles cos(lat) vanishes; measure altitude along the
    // polar axis instead.
    let altitude_km = if latitude.cos().abs() > 1e-6 {
        r / latitude.cos() - a * c
    } else {
        z.abs() - a * (1.0 - f)
    };

    Ok(GeodeticPosition {
        latitude: latitude.to_degrees(),
        longitude,
        altitude_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::J2000_JD;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_longitude_in_range() {
        assert_relative_eq!(normalize_longitude(0.0), 0.0);
        assert_relative_eq!(normalize_longitude(179.5), 179.5);
        assert_relative_eq!(normalize_longitude(-179.5), -179.5);
    }

    #[test]
    fn test_normalize_longitude_wraps() {
        assert_relative_eq!(normalize_longitude(190.0), -170.0);
        assert_relative_eq!(normalize_longitude(-190.0), 170.0);
        assert_relative_eq!(normalize_longitude(540.0), 180.0);
        assert_relative_eq!(normalize_longitude(-540.0), 180.0);
    }

    #[test]
    fn test_normalize_longitude_antimeridian_single_representation() {
        // -180 and 180 are the same meridian; both normalize to +180.
        assert_relative_eq!(normalize_longitude(180.0), 180.0);
        assert_relative_eq!(normalize_longitude(-180.0), 180.0);
    }

    #[test]
    fn test_normalize_longitude_idempotent() {
        for deg in [-720.0, -180.0, -0.001, 0.0, 123.456, 180.0, 359.9, 1000.0] {
            let once = normalize_longitude(deg);
            let twice = normalize_longitude(once);
            assert_relative_eq!(once, twice);
            assert!(once > -180.0 && once <= 180.0);
        }
    }

    #[test]
    fn test_equatorial_point_on_surface() {
        // A point on the equator at the WGS84 equatorial radius, with
        // the x axis aligned to Greenwich (choose jd so GMST = 0 would
        // be needed; instead just check latitude and altitude).
        let p = Vector3::new(WGS84_RADIUS_KM, 0.0, 0.0);
        let geo = eci_to_geodetic(&p, J2000_JD).unwrap();
        assert_relative_eq!(geo.latitude, 0.0, epsilon = 1e-9);
        assert_relative_eq!(geo.altitude_km, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_polar_point() {
        // 400 km above the north pole. Polar radius is a(1 - f).
        let f = 1.0 / WGS84_INVERSE_FLATTENING;
        let polar_radius = WGS84_RADIUS_KM * (1.0 - f);
        let p = Vector3::new(0.0, 0.0, polar_radius + 400.0);
        let geo = eci_to_geodetic(&p, J2000_JD).unwrap();
        assert_relative_eq!(geo.latitude, 90.0, epsilon = 1e-6);
        assert_relative_eq!(geo.altitude_km, 400.0, epsilon = 1e-3);
    }

    #[test]
    fn test_vallado_example() {
        // Vallado, Fundamentals of Astrodynamics, example 3-3 vector:
        // geodetic latitude 34.35°, altitude ~5085.22 km.
        let p = Vector3::new(6524.834, 6862.875, 6448.296);
        let geo = eci_to_geodetic(&p, J2000_JD).unwrap();
        assert_relative_eq!(geo.latitude, 34.352_496, epsilon = 1e-3);
        assert_relative_eq!(geo.altitude_km, 5085.22, epsilon = 0.1);
    }

    #[test]
    fn test_rejects_degenerate_vector() {
        assert!(eci_to_geodetic(&Vector3::new(0.0, 0.0, 0.0), J2000_JD).is_err());
        assert!(eci_to_geodetic(&Vector3::new(f64::NAN, 0.0, 0.0), J2000_JD).is_err());
    }

    #[test]
    fn test_latitude_in_range_everywhere() {
        for i in 0..200 {
            let theta = i as f64 * 0.1;
            let p = Vector3::new(
                7000.0 * theta.cos(),
                7000.0 * theta.sin() * 0.5,
                6000.0 * (theta * 0.7).sin(),
            );
            let geo = eci_to_geodetic(&p, J2000_JD + i as f64).unwrap();
            assert!((-90.0..=90.0).contains(&geo.latitude));
            assert!(geo.longitude > -180.0 && geo.longitude <= 180.0);
            assert!(geo.altitude_km.is_finite());
        }
    }
}
