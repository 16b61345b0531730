//! Command-line satellite tracker
//!
//! Resolves a catalog id (or raw NORAD number), prints the current
//! position, ground track, and terminator summary, then follows the
//! satellite live for a short while on the standard refresh cadence.

use std::env;
use std::process;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use log::info;

use groundtrack::tracker::POSITION_REFRESH;
use groundtrack::{
    catalog, night_region, GroundTrackConfig, RepeatingTask, SatelliteTracker, TleStore,
    TrackSample,
};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> groundtrack::Result<()> {
    let arg = env::args().nth(1).unwrap_or_else(|| "iss".to_string());
    let norad_id = resolve(&arg)?;

    let tracker = Arc::new(SatelliteTracker::new(TleStore::new()?));
    let warmed = tracker.prefetch_catalog();
    info!("orbital data available for {} catalog entries", warmed);

    let now = Utc::now();
    print_sample(&tracker, norad_id);

    let track = tracker.track(norad_id, now, &GroundTrackConfig::default())?;
    if let (Some(first), Some(last)) = (track.first(), track.last()) {
        println!(
            "ground track: {} points, {} -> {}",
            track.len(),
            first.timestamp.format("%H:%M:%S"),
            last.timestamp.format("%H:%M:%S")
        );
    }

    let night = night_region(now);
    println!("night region polygon: {} vertices", night.len());

    println!("following live for 30 s (refresh every {:?})...", POSITION_REFRESH);
    let live = Arc::clone(&tracker);
    let task = RepeatingTask::spawn("position-refresh", POSITION_REFRESH, move || {
        print_sample(&live, norad_id);
    })?;
    thread::sleep(Duration::from_secs(30));
    task.stop();

    Ok(())
}

fn resolve(arg: &str) -> groundtrack::Result<u64> {
    if let Ok(norad_id) = arg.parse::<u64>() {
        return Ok(norad_id);
    }
    catalog::find_by_id(arg)
        .map(|entry| entry.norad_id)
        .ok_or_else(|| {
            let known: Vec<&str> = catalog::SATELLITE_CATALOG.iter().map(|e| e.id).collect();
            groundtrack::TrackError::DataError(format!(
                "unknown satellite '{}' (known: {})",
                arg,
                known.join(", ")
            ))
        })
}

fn print_sample(tracker: &SatelliteTracker, norad_id: u64) {
    let name = catalog::find_by_norad(norad_id)
        .map(|e| e.short_name)
        .unwrap_or("satellite");
    match tracker.sample(norad_id, Utc::now()) {
        TrackSample::Ok(state) => println!(
            "{}: {:+8.3}°, {:+9.3}°  alt {:7.1} km  {:7.0} km/h  {:?}",
            name,
            state.position.latitude,
            state.position.longitude,
            state.position.altitude_km,
            state.velocity_kmh,
            state.illumination
        ),
        TrackSample::Unpositionable => println!("{}: element set present but unusable", name),
        TrackSample::Unavailable => println!("{}: no orbital data available", name),
    }
}
