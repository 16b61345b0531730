//! Ground-track sampling and position history
//!
//! Samples a satellite's sub-satellite point over a time window
//! centered on an instant, producing the polyline a map layer draws as
//! the orbit path. Longitudes are normalized but deliberately NOT
//! split at the antimeridian: consecutive points may jump from near
//! +180° to near -180°, and the rendering layer decides how to break
//! the polyline. Splitting here would bake one renderer's needs into
//! the data.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::sgp4lib::{propagate, SatRec};

/// Maximum number of retained history samples per satellite
const HISTORY_CAP: usize = 500;

/// One sample of the ground track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPathPoint {
    pub timestamp: DateTime<Utc>,
    /// Geodetic latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees, (-180, 180]
    pub longitude: f64,
}

/// Sampling window for [`ground_track`].
#[derive(Debug, Clone, Copy)]
pub struct GroundTrackConfig {
    /// Total window length, centered on the reference instant
    pub window: Duration,
    /// Spacing between samples
    pub step: Duration,
}

impl Default for GroundTrackConfig {
    /// 90 minutes at one-minute steps, roughly one ISS orbit.
    fn default() -> Self {
        GroundTrackConfig {
            window: Duration::minutes(90),
            step: Duration::minutes(1),
        }
    }
}

/// Sample a satellite's ground track over a window centered on `t`.
///
/// Instants where propagation fails (for example the far edge of a
/// decayed element set's validity) are skipped rather than aborting
/// the whole track, so the result may have fewer points than the
/// window nominally holds. With the default config a healthy LEO
/// element set yields 91 points.
pub fn ground_track(
    sat: &SatRec,
    t: DateTime<Utc>,
    config: &GroundTrackConfig,
) -> Vec<OrbitPathPoint> {
    let mut points = Vec::new();
    if config.step <= Duration::zero() {
        return points;
    }
    let half = config.window / 2;
    let mut cursor = t - half;
    let end = t + half;
    while cursor <= end {
        match propagate(sat, cursor) {
            Ok(state) => points.push(OrbitPathPoint {
                timestamp: cursor,
                latitude: state.position.latitude,
                longitude: state.position.longitude,
            }),
            Err(e) => debug!(
                "skipping ground-track sample for {} at {}: {}",
                sat.norad_id(),
                cursor,
                e
            ),
        }
        cursor += config.step;
    }
    points
}

/// Split a chronological track into past and future halves around a
/// reference instant. Points at exactly the reference go to the past
/// half.
pub fn split_past_future(
    points: &[OrbitPathPoint],
    reference: DateTime<Utc>,
) -> (&[OrbitPathPoint], &[OrbitPathPoint]) {
    let idx = points.partition_point(|p| p.timestamp <= reference);
    points.split_at(idx)
}

/// Break a track into renderable segments at antimeridian crossings.
///
/// A crossing is a raw longitude jump of more than 180° between
/// consecutive points, the detection rule the track data contract
/// leaves to consumers.
pub fn split_at_antimeridian(points: &[OrbitPathPoint]) -> Vec<&[OrbitPathPoint]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for i in 1..points.len() {
        if (points[i].longitude - points[i - 1].longitude).abs() > 180.0 {
            segments.push(&points[start..i]);
            start = i;
        }
    }
    if start < points.len() {
        segments.push(&points[start..]);
    }
    segments
}

/// Bounded trail of recently observed positions for one satellite.
///
/// Oldest samples are dropped once the buffer holds 500 points, which
/// at a 5-second sampling cadence covers about 40 minutes of trail.
#[derive(Debug, Default)]
pub struct PositionHistory {
    samples: VecDeque<OrbitPathPoint>,
}

impl PositionHistory {
    pub fn new() -> Self {
        PositionHistory {
            samples: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append a sample, evicting the oldest once at capacity.
    pub fn push(&mut self, point: OrbitPathPoint) {
        if self.samples.len() == HISTORY_CAP {
            self.samples.pop_front();
        }
        self.samples.push_back(point);
    }

    /// Samples in chronological order.
    pub fn points(&self) -> impl Iterator<Item = &OrbitPathPoint> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn iss() -> SatRec {
        SatRec::new(None, ISS_LINE1, ISS_LINE2).unwrap()
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2008, 9, 20, 12, 25, 40).unwrap()
    }

    #[test]
    fn test_default_window_point_count() {
        let track = ground_track(&iss(), epoch(), &GroundTrackConfig::default());
        assert_eq!(track.len(), 91);
    }

    #[test]
    fn test_track_is_centered() {
        let t = epoch();
        let track = ground_track(&iss(), t, &GroundTrackConfig::default());
        assert_eq!(track.first().map(|p| p.timestamp), Some(t - Duration::minutes(45)));
        assert_eq!(track.last().map(|p| p.timestamp), Some(t + Duration::minutes(45)));
    }

    #[test]
    fn test_track_values_in_range() {
        let track = ground_track(&iss(), epoch(), &GroundTrackConfig::default());
        for p in &track {
            assert!(p.latitude.abs() <= 90.0);
            assert!(p.longitude > -180.0 && p.longitude <= 180.0);
        }
    }

    #[test]
    fn test_antimeridian_left_unsplit() {
        // Over a full orbit the track must cross the antimeridian at
        // least once, visible as a raw longitude jump of more than
        // 180° between consecutive samples.
        let track = ground_track(&iss(), epoch(), &GroundTrackConfig::default());
        let jumps = track
            .windows(2)
            .filter(|w| (w[1].longitude - w[0].longitude).abs() > 180.0)
            .count();
        assert!(jumps >= 1, "expected at least one antimeridian jump");
    }

    #[test]
    fn test_track_deterministic() {
        let sat = iss();
        let a = ground_track(&sat, epoch(), &GroundTrackConfig::default());
        let b = ground_track(&sat, epoch(), &GroundTrackConfig::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_step() {
        let config = GroundTrackConfig {
            window: Duration::minutes(10),
            step: Duration::seconds(30),
        };
        let track = ground_track(&iss(), epoch(), &config);
        assert_eq!(track.len(), 21);
    }

    #[test]
    fn test_split_past_future() {
        let track = ground_track(&iss(), epoch(), &GroundTrackConfig::default());
        let (past, future) = split_past_future(&track, epoch());
        // 45 past points plus the center sample, then 45 future.
        assert_eq!(past.len(), 46);
        assert_eq!(future.len(), 45);
        assert!(past.iter().all(|p| p.timestamp <= epoch()));
        assert!(future.iter().all(|p| p.timestamp > epoch()));
    }

    #[test]
    fn test_split_at_antimeridian_rejoins_to_original() {
        let track = ground_track(&iss(), epoch(), &GroundTrackConfig::default());
        let segments = split_at_antimeridian(&track);
        assert!(segments.len() >= 2, "one orbit must cross the antimeridian");
        let rejoined: Vec<OrbitPathPoint> =
            segments.iter().flat_map(|s| s.iter().copied()).collect();
        assert_eq!(rejoined, track);
        for segment in &segments {
            for w in segment.windows(2) {
                assert!((w[1].longitude - w[0].longitude).abs() <= 180.0);
            }
        }
    }

    #[test]
    fn test_split_empty_track() {
        assert!(split_at_antimeridian(&[]).is_empty());
        let (past, future) = split_past_future(&[], epoch());
        assert!(past.is_empty() && future.is_empty());
    }

    #[test]
    fn test_history_caps_at_limit() {
        let mut history = PositionHistory::new();
        let t0 = epoch();
        for i in 0..(HISTORY_CAP + 100) {
            history.push(OrbitPathPoint {
                timestamp: t0 + Duration::seconds(i as i64),
                latitude: 0.0,
                longitude: 0.0,
            });
        }
        assert_eq!(history.len(), HISTORY_CAP);
        // The oldest 100 samples were evicted.
        let first = history.points().next().unwrap();
        assert_eq!(first.timestamp, t0 + Duration::seconds(100));
    }
}
