//! Satellite illumination state
//!
//! Determines whether a satellite sits inside Earth's shadow using a
//! cylindrical shadow model: the umbra is treated as an infinite
//! cylinder of Earth's mean radius extending anti-sunward. At LEO
//! altitudes the penumbral transition lasts under ten seconds, so the
//! simpler model costs almost nothing in accuracy.

use nalgebra::Vector3;

use crate::constants::EARTH_RADIUS_KM;
use crate::solarlib::sun_position_eci;

/// Whether the satellite is in direct sunlight or in Earth's shadow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Illumination {
    /// The satellite is in direct sunlight
    Sunlit,
    /// The satellite is inside Earth's shadow cylinder
    Eclipsed,
}

/// Classify a satellite's illumination state from its ECI position.
///
/// The satellite is eclipsed when it lies on the anti-sunward side of
/// Earth and its perpendicular distance from the Earth-Sun axis is
/// less than Earth's mean radius.
///
/// # Arguments
///
/// * `position` - satellite ECI position in km
/// * `jd` - Julian date, used to place the Sun
pub fn illumination(position: &Vector3<f64>, jd: f64) -> Illumination {
    let sun_dir = sun_position_eci(jd).normalize();
    let sat_dist = position.norm();
    if sat_dist == 0.0 {
        return Illumination::Sunlit;
    }

    // Cosine of the angle between the satellite and the Sun as seen
    // from Earth's center.
    let cos_angle = position.dot(&sun_dir) / sat_dist;

    if cos_angle >= 0.0 {
        // Sunward hemisphere, always lit.
        return Illumination::Sunlit;
    }

    // Perpendicular distance from the Earth-Sun axis.
    let axis_distance = sat_dist * (1.0 - cos_angle * cos_angle).max(0.0).sqrt();
    if axis_distance < EARTH_RADIUS_KM {
        Illumination::Eclipsed
    } else {
        Illumination::Sunlit
    }
}
