//! TLE acquisition, caching, and offline fallback
//!
//! The [`TleStore`] is the single entry point for orbital data. For
//! each NORAD ID it serves, in order of preference: a cached element
//! set younger than the cache TTL, a freshly fetched one from the
//! network source, a stale cached copy, and finally the built-in
//! fallback table. Degraded results (stale or fallback) re-arm a short
//! retry window so the next network attempt happens well before the
//! full TTL elapses.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};

use crate::{Result, TrackError};

mod fallback;

pub use fallback::fallback_tle;

/// How long a fetched element set is considered fresh
fn cache_ttl() -> Duration {
    Duration::hours(4)
}

/// Retry window armed when a stale or fallback element set is served
fn retry_grace() -> Duration {
    Duration::minutes(30)
}

/// Network timeout for a single TLE fetch
const FETCH_TIMEOUT: StdDuration = StdDuration::from_secs(5);

const CELESTRAK_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// A raw two-line element set, optionally with its name line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoLineElement {
    /// Satellite name from the 3LE name line, if present
    pub name: Option<String>,
    /// First data line ("1 ...")
    pub line1: String,
    /// Second data line ("2 ...")
    pub line2: String,
}

impl TwoLineElement {
    /// Parse a CelesTrak-style response body: either two data lines or
    /// a name line followed by two data lines.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
        let (name, rest) = match lines.as_slice() {
            [l1, l2] if l1.starts_with("1 ") && l2.starts_with("2 ") => (None, (*l1, *l2)),
            [l0, l1, l2] if l1.starts_with("1 ") && l2.starts_with("2 ") => {
                (Some(l0.trim().to_string()), (*l1, *l2))
            }
            _ => {
                return Err(TrackError::DataError(format!(
                    "response is not a TLE ({} lines)",
                    lines.len()
                )))
            }
        };
        if rest.0.len() < 69 || rest.1.len() < 69 {
            return Err(TrackError::DataError("truncated TLE line".to_string()));
        }
        Ok(TwoLineElement {
            name,
            line1: rest.0.to_string(),
            line2: rest.1.to_string(),
        })
    }
}

/// Something that can produce a current element set for a NORAD ID.
///
/// The store talks to its source only through this trait, so tests can
/// substitute canned or failing sources for the network.
pub trait TleSource: Send + Sync {
    fn fetch(&self, norad_id: u64) -> Result<TwoLineElement>;
}

/// TLE source backed by the CelesTrak GP query endpoint.
pub struct CelestrakSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl CelestrakSource {
    pub fn new() -> Result<Self> {
        Self::with_base_url(CELESTRAK_URL)
    }

    /// Point the source at a different GP endpoint (e.g. a mirror).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| TrackError::DataError(format!("HTTP client setup failed: {}", e)))?;
        Ok(CelestrakSource {
            client,
            base_url: base_url.to_string(),
        })
    }
}

impl TleSource for CelestrakSource {
    fn fetch(&self, norad_id: u64) -> Result<TwoLineElement> {
        let url = format!("{}?CATNR={}&FORMAT=TLE", self.base_url, norad_id);
        debug!("fetching TLE for {} from {}", norad_id, url);
        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| TrackError::DataError(format!("TLE fetch failed: {}", e)))?;
        if body.contains("No GP data found") {
            return Err(TrackError::DataError(format!(
                "no GP data for NORAD ID {}",
                norad_id
            )));
        }
        TwoLineElement::parse(&body)
    }
}

struct CachedTle {
    tle: TwoLineElement,
    fetched_at: DateTime<Utc>,
}

/// Caching TLE store with network fetch and offline fallback.
pub struct TleStore {
    source: Box<dyn TleSource>,
    cache: Mutex<HashMap<u64, CachedTle>>,
    ttl: Duration,
}

impl TleStore {
    /// Create a store backed by CelesTrak with the default 4 h TTL.
    pub fn new() -> Result<Self> {
        Ok(Self::with_source(Box::new(CelestrakSource::new()?)))
    }

    /// Create a store over an arbitrary source.
    pub fn with_source(source: Box<dyn TleSource>) -> Self {
        TleStore {
            source,
            cache: Mutex::new(HashMap::new()),
            ttl: cache_ttl(),
        }
    }

    /// Override the cache TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Get an element set for a NORAD ID.
    ///
    /// Serves the cached copy while fresh; otherwise fetches from the
    /// source. When the fetch fails, a stale cached copy is preferred
    /// over the built-in fallback table, and either degraded answer
    /// re-arms the cache so the next fetch attempt happens after the
    /// retry grace period rather than a full TTL.
    ///
    /// # Errors
    ///
    /// `DataError` when no element set can be produced from any tier.
    pub fn get(&self, norad_id: u64) -> Result<TwoLineElement> {
        let now = Utc::now();
        {
            let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = cache.get(&norad_id) {
                if now - entry.fetched_at < self.ttl {
                    debug!("serving cached TLE for {}", norad_id);
                    return Ok(entry.tle.clone());
                }
            }
        }

        // The lock is not held across the fetch, so lookups for other
        // satellites proceed while this one waits on the network.
        // Interleaved fetches for the same ID are last-write-wins,
        // which is safe because every written value is equally valid.
        match self.source.fetch(norad_id) {
            Ok(tle) => {
                info!("fetched TLE for {}", norad_id);
                let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
                cache.insert(
                    norad_id,
                    CachedTle {
                        tle: tle.clone(),
                        fetched_at: now,
                    },
                );
                Ok(tle)
            }
            Err(fetch_err) => {
                // A stale copy of a once-live element set beats the
                // built-in table, whose epochs may be months old.
                let rearmed_at = now - (self.ttl - retry_grace());
                let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
                if let Some(entry) = cache.get_mut(&norad_id) {
                    warn!(
                        "TLE fetch for {} failed ({}), serving stale cache",
                        norad_id, fetch_err
                    );
                    entry.fetched_at = rearmed_at;
                    return Ok(entry.tle.clone());
                }
                if let Some(tle) = fallback_tle(norad_id) {
                    warn!(
                        "TLE fetch for {} failed ({}), using built-in fallback",
                        norad_id, fetch_err
                    );
                    cache.insert(
                        norad_id,
                        CachedTle {
                            tle: tle.clone(),
                            fetched_at: rearmed_at,
                        },
                    );
                    return Ok(tle);
                }
                Err(TrackError::DataError(format!(
                    "no orbital data for NORAD ID {}: {}",
                    norad_id, fetch_err
                )))
            }
        }
    }

    /// Warm the cache for a set of NORAD IDs, fetching concurrently.
    ///
    /// Returns the number of IDs for which an element set (from any
    /// tier) is now available.
    pub fn prefetch_all(&self, norad_ids: &[u64]) -> usize {
        std::thread::scope(|scope| {
            let handles: Vec<_> = norad_ids
                .iter()
                .map(|&id| scope.spawn(move || self.get(id).is_ok()))
                .collect();
            handles
                .into_iter()
                .filter_map(|h| h.join().ok())
                .filter(|&available| available)
                .count()
        })
    }
}
