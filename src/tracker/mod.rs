//! High-level satellite tracking facade
//!
//! Ties the TLE store, the propagator, and the position history
//! together behind one call per satellite per instant. Failures are
//! split into two observable states a consumer renders differently:
//! [`TrackSample::Unavailable`] means no element set could be produced
//! at all, while [`TrackSample::Unpositionable`] means an element set
//! exists but refused to parse or propagate.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use log::warn;

use crate::catalog::SATELLITE_CATALOG;
use crate::scheduler::RepeatingTask;
use crate::sgp4lib::{propagate, KinematicState, SatRec};
use crate::tlelib::{TleStore, TwoLineElement};
use crate::tracklib::{ground_track, GroundTrackConfig, OrbitPathPoint, PositionHistory};
use crate::{Result, TrackError};

/// How often live positions are recomputed
pub const POSITION_REFRESH: StdDuration = StdDuration::from_secs(5);

/// How often the terminator polygon is recomputed
pub const TERMINATOR_REFRESH: StdDuration = StdDuration::from_secs(30);

/// How often ground tracks are recomputed and element sets re-checked
pub const TRACK_REFRESH: StdDuration = StdDuration::from_secs(60);

/// Outcome of sampling one satellite at one instant.
#[derive(Debug, Clone, Copy)]
pub enum TrackSample {
    /// Position computed successfully
    Ok(KinematicState),
    /// An element set exists but could not be parsed or propagated
    Unpositionable,
    /// No element set from any tier (network, cache, or fallback)
    Unavailable,
}

struct TrackedSat {
    tle: TwoLineElement,
    satrec: SatRec,
    history: PositionHistory,
}

/// Tracks any number of satellites against a shared [`TleStore`].
pub struct SatelliteTracker {
    store: TleStore,
    sats: Mutex<HashMap<u64, TrackedSat>>,
}

impl SatelliteTracker {
    pub fn new(store: TleStore) -> Self {
        SatelliteTracker {
            store,
            sats: Mutex::new(HashMap::new()),
        }
    }

    /// Warm the TLE cache for the whole built-in catalog; returns the
    /// number of catalog entries with orbital data available.
    pub fn prefetch_catalog(&self) -> usize {
        let ids: Vec<u64> = SATELLITE_CATALOG.iter().map(|e| e.norad_id).collect();
        self.store.prefetch_all(&ids)
    }

    /// Sample a satellite's kinematic state at an instant.
    ///
    /// Successful samples are appended to the satellite's position
    /// history. Element sets are re-parsed only when the store hands
    /// back different lines than last time.
    pub fn sample(&self, norad_id: u64, t: DateTime<Utc>) -> TrackSample {
        let tle = match self.store.get(norad_id) {
            Ok(tle) => tle,
            Err(e) => {
                warn!("no orbital data for {}: {}", norad_id, e);
                return TrackSample::Unavailable;
            }
        };

        let mut sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
        let entry = match self.refresh_satrec(&mut sats, norad_id, tle) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("element set for {} unusable: {}", norad_id, e);
                return TrackSample::Unpositionable;
            }
        };

        match propagate(&entry.satrec, t) {
            Ok(state) => {
                entry.history.push(OrbitPathPoint {
                    timestamp: t,
                    latitude: state.position.latitude,
                    longitude: state.position.longitude,
                });
                TrackSample::Ok(state)
            }
            Err(e) => {
                warn!("propagation failed for {} at {}: {}", norad_id, t, e);
                TrackSample::Unpositionable
            }
        }
    }

    /// Ground track for a satellite over a window centered on `t`.
    ///
    /// # Errors
    ///
    /// `DataError` when no element set is available or it cannot be
    /// parsed; a healthy element set always yields a (possibly short)
    /// track.
    pub fn track(
        &self,
        norad_id: u64,
        t: DateTime<Utc>,
        config: &GroundTrackConfig,
    ) -> Result<Vec<OrbitPathPoint>> {
        let tle = self.store.get(norad_id)?;
        let mut sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
        let entry = self.refresh_satrec(&mut sats, norad_id, tle)?;
        Ok(ground_track(&entry.satrec, t, config))
    }

    /// Chronological copy of the recorded positions for a satellite.
    pub fn history(&self, norad_id: u64) -> Vec<OrbitPathPoint> {
        let sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
        sats.get(&norad_id)
            .map(|s| s.history.points().copied().collect())
            .unwrap_or_default()
    }

    /// Drop the recorded trail for a satellite.
    pub fn clear_history(&self, norad_id: u64) {
        let mut sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(sat) = sats.get_mut(&norad_id) {
            sat.history.clear();
        }
    }

    /// Start following a satellite live: a background task samples it
    /// every [`POSITION_REFRESH`] until the returned handle is stopped
    /// or dropped, feeding the position history.
    pub fn start_tracking(self: &std::sync::Arc<Self>, norad_id: u64) -> Result<RepeatingTask> {
        let tracker = std::sync::Arc::clone(self);
        RepeatingTask::spawn(&format!("track-{}", norad_id), POSITION_REFRESH, move || {
            tracker.sample(norad_id, Utc::now());
        })
    }

    /// Re-check every tracked satellite's element set against the
    /// store, re-parsing any that changed. Intended to run on the
    /// [`TRACK_REFRESH`] cadence.
    pub fn refresh_elements(&self) {
        let ids: Vec<u64> = {
            let sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
            sats.keys().copied().collect()
        };
        for id in ids {
            match self.store.get(id) {
                Ok(tle) => {
                    let mut sats = self.sats.lock().unwrap_or_else(|e| e.into_inner());
                    if let Err(e) = self.refresh_satrec(&mut sats, id, tle) {
                        warn!("refreshed element set for {} unusable: {}", id, e);
                    }
                }
                Err(e) => warn!("element refresh for {} failed: {}", id, e),
            }
        }
    }

    /// Insert or update the parsed record for `norad_id`, keeping the
    /// existing one (and its history) when the lines are unchanged.
    fn refresh_satrec<'a>(
        &self,
        sats: &'a mut HashMap<u64, TrackedSat>,
        norad_id: u64,
        tle: TwoLineElement,
    ) -> Result<&'a mut TrackedSat> {
        let needs_parse = match sats.get(&norad_id) {
            Some(existing) => existing.tle != tle,
            None => true,
        };
        if needs_parse {
            let satrec = SatRec::new(tle.name.as_deref(), &tle.line1, &tle.line2)?;
            let history = sats
                .remove(&norad_id)
                .map(|s| s.history)
                .unwrap_or_default();
            sats.insert(
                norad_id,
                TrackedSat {
                    tle,
                    satrec,
                    history,
                },
            );
        }
        sats.get_mut(&norad_id).ok_or_else(|| {
            TrackError::CalculationError(format!("satellite {} vanished from tracker", norad_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tlelib::TleSource;
    use chrono::TimeZone;

    const L1: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const L2: &str = "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    struct FixedSource;

    impl TleSource for FixedSource {
        fn fetch(&self, _norad_id: u64) -> Result<TwoLineElement> {
            Ok(TwoLineElement {
                name: Some("ISS (ZARYA)".to_string()),
                line1: L1.to_string(),
                line2: L2.to_string(),
            })
        }
    }

    struct DownSource;

    impl TleSource for DownSource {
        fn fetch(&self, _norad_id: u64) -> Result<TwoLineElement> {
            Err(TrackError::DataError("network down".to_string()))
        }
    }

    struct GarbageSource;

    impl TleSource for GarbageSource {
        fn fetch(&self, _norad_id: u64) -> Result<TwoLineElement> {
            Ok(TwoLineElement {
                name: None,
                line1: format!("1 00000U 00000A   00000.00000000  {:<47}", "not orbital data"),
                line2: format!("2 00000  {:<58}", "also not orbital data"),
            })
        }
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2008, 9, 20, 12, 25, 40).unwrap()
    }

    #[test]
    fn test_sample_ok_records_history() {
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(FixedSource)));
        let sample = tracker.sample(25544, epoch());
        assert!(matches!(sample, TrackSample::Ok(_)));
        let history = tracker.history(25544);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].timestamp, epoch());

        tracker.sample(25544, epoch() + chrono::Duration::seconds(5));
        assert_eq!(tracker.history(25544).len(), 2);
        tracker.clear_history(25544);
        assert!(tracker.history(25544).is_empty());
    }

    #[test]
    fn test_unknown_satellite_is_unavailable() {
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(DownSource)));
        // 99999 is not in the fallback table, so no tier can serve it.
        assert!(matches!(
            tracker.sample(99999, epoch()),
            TrackSample::Unavailable
        ));
        assert!(tracker.track(99999, epoch(), &GroundTrackConfig::default()).is_err());
    }

    #[test]
    fn test_unparseable_elements_are_unpositionable() {
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(GarbageSource)));
        assert!(matches!(
            tracker.sample(25544, epoch()),
            TrackSample::Unpositionable
        ));
    }

    #[test]
    fn test_track_through_facade() {
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(FixedSource)));
        let track = tracker
            .track(25544, epoch(), &GroundTrackConfig::default())
            .unwrap();
        assert_eq!(track.len(), 91);
    }

    #[test]
    fn test_fallback_tier_keeps_catalog_sampling_alive() {
        // Network down end to end: the built-in table still positions
        // the ISS near its fallback epoch.
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(DownSource)));
        let near_fallback_epoch = Utc.with_ymd_and_hms(2026, 1, 27, 12, 45, 0).unwrap();
        assert!(matches!(
            tracker.sample(25544, near_fallback_epoch),
            TrackSample::Ok(_)
        ));
    }

    /// Rewrite the ISS TLE's epoch field to noon today so sampling at
    /// `Utc::now()` stays well inside SGP4's validity window.
    fn tle_epoch_now(line: &str) -> String {
        use chrono::Datelike;
        let now = Utc::now();
        let epoch = format!("{:02}{:03}.50000000", now.year() % 100, now.ordinal());
        let body = format!("{}{}{}", &line[..18], epoch, &line[32..68]);
        let sum: u32 = body
            .chars()
            .map(|c| match c {
                '0'..='9' => c.to_digit(10).unwrap_or(0),
                '-' => 1,
                _ => 0,
            })
            .sum();
        format!("{}{}", body, sum % 10)
    }

    struct EpochNowSource;

    impl TleSource for EpochNowSource {
        fn fetch(&self, _norad_id: u64) -> Result<TwoLineElement> {
            Ok(TwoLineElement {
                name: None,
                line1: tle_epoch_now(L1),
                line2: L2.to_string(),
            })
        }
    }

    #[test]
    fn test_start_tracking_feeds_history_until_stopped() {
        let tracker = std::sync::Arc::new(SatelliteTracker::new(TleStore::with_source(
            Box::new(EpochNowSource),
        )));
        let task = tracker.start_tracking(25544).unwrap();
        // The first sample runs immediately on spawn.
        std::thread::sleep(std::time::Duration::from_millis(200));
        task.stop();
        let recorded = tracker.history(25544).len();
        assert!(recorded >= 1);
        std::thread::sleep(std::time::Duration::from_millis(50));
        assert_eq!(tracker.history(25544).len(), recorded);
    }

    #[test]
    fn test_refresh_elements_survives_outage() {
        let tracker = SatelliteTracker::new(TleStore::with_source(Box::new(FixedSource)));
        tracker.sample(25544, epoch());
        tracker.refresh_elements();
        assert!(matches!(tracker.sample(25544, epoch()), TrackSample::Ok(_)));
    }
}
