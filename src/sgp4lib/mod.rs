//! SGP4 propagation to geodetic coordinates
//!
//! Wraps the `sgp4` crate's element parsing and propagation, then
//! carries the TEME state vector through Earth rotation to a geodetic
//! position, speed over ground in km/h, and illumination state. TEME
//! is treated as ECI for the longitude rotation, which is consistent
//! with the few-km accuracy of SGP4 itself.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;

use crate::constants::HOUR_S;
use crate::earthlib::{eci_to_geodetic, GeodeticPosition};
use crate::eclipselib::{illumination, Illumination};
use crate::timelib::julian_date;
use crate::{Result, TrackError};

/// A satellite ready for propagation: parsed orbital elements plus the
/// derived SGP4 constants.
pub struct SatRec {
    elements: sgp4::Elements,
    constants: sgp4::Constants,
}

/// A satellite's full kinematic state at one instant.
#[derive(Debug, Clone, Copy)]
pub struct KinematicState {
    /// Sub-satellite point and height above the ellipsoid
    pub position: GeodeticPosition,
    /// Inertial speed in km/h
    pub velocity_kmh: f64,
    /// Sunlit or eclipsed
    pub illumination: Illumination,
}

impl SatRec {
    /// Parse a TLE line pair into a propagatable record.
    ///
    /// # Arguments
    ///
    /// * `name` - optional satellite name (the "line 0" of a 3LE)
    /// * `line1` - first TLE line, with valid checksum
    /// * `line2` - second TLE line, with valid checksum
    pub fn new(name: Option<&str>, line1: &str, line2: &str) -> Result<Self> {
        let elements = sgp4::Elements::from_tle(
            name.map(|n| n.to_string()),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| TrackError::DataError(format!("TLE parse failed: {}", e)))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| TrackError::DataError(format!("SGP4 initialization failed: {}", e)))?;
        Ok(SatRec {
            elements,
            constants,
        })
    }

    /// NORAD catalog number of this satellite.
    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    /// Satellite name, if the element set carried one.
    pub fn name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    /// Orbital inclination in degrees, which bounds the reachable
    /// ground-track latitude.
    pub fn inclination_deg(&self) -> f64 {
        self.elements.inclination
    }

    /// Propagate to an instant, returning the TEME position (km) and
    /// velocity (km/s) vectors.
    pub fn propagate_eci(&self, t: DateTime<Utc>) -> Result<(Vector3<f64>, Vector3<f64>)> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&t.naive_utc())
            .map_err(|e| {
                TrackError::CalculationError(format!("time outside propagation range: {}", e))
            })?;
        let prediction = self.constants.propagate(minutes).map_err(|e| {
            TrackError::CalculationError(format!("SGP4 propagation failed: {}", e))
        })?;
        let position = Vector3::from(prediction.position);
        let velocity = Vector3::from(prediction.velocity);
        if !position.iter().all(|v| v.is_finite()) || !velocity.iter().all(|v| v.is_finite()) {
            return Err(TrackError::CalculationError(
                "SGP4 produced a non-finite state vector".to_string(),
            ));
        }
        Ok((position, velocity))
    }
}

/// Propagate a satellite to an instant and reduce the state vector to
/// geodetic coordinates, speed, and illumination.
pub fn propagate(sat: &SatRec, t: DateTime<Utc>) -> Result<KinematicState> {
    let (position, velocity) = sat.propagate_eci(t)?;
    let jd = julian_date(t);
    let geodetic = eci_to_geodetic(&position, jd)?;
    Ok(KinematicState {
        position: geodetic,
        velocity_kmh: velocity.norm() * HOUR_S,
        illumination: illumination(&position, jd),
    })
}
