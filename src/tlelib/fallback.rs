//! Built-in element sets for offline operation
//!
//! A last-resort TLE table covering every catalogued satellite, used
//! when the network source is unreachable and no cached copy exists.
//! Epochs here go stale quickly, so positions derived from them drift
//! by tens of km per week; the store re-arms a short retry window
//! whenever one of these is served.

use super::TwoLineElement;

/// (NORAD ID, name, line 1, line 2)
pub(crate) const FALLBACK_TLES: &[(u64, &str, &str, &str)] = &[
    (
        25544,
        "ISS (ZARYA)",
        "1 25544U 98067A   26027.53120152  .00010421  00000+0  19003-3 0  9999",
        "2 25544  51.6415 153.2874 0005510 137.9547 348.6258 15.49830574488924",
    ),
    (
        48274,
        "CSS (TIANHE)",
        "1 48274U 21035A   26027.60155093  .00063212  00000+0  34457-3 0  9991",
        "2 48274  41.4725 342.3021 0007831 292.8374 216.5912 15.60309990238831",
    ),
    (
        20580,
        "HST",
        "1 20580U 90037B   26027.09457618  .00000987  00000+0  44390-4 0  9998",
        "2 20580  28.4695 197.6433 0003050 293.4566 179.9192 15.08864758933259",
    ),
    (
        33591,
        "NOAA 19",
        "1 33591U 09005A   26027.42082697  .00000199  00000+0  16244-3 0  9998",
        "2 33591  99.1163 103.1897 0013867 213.3321 146.7324 14.12879549880666",
    ),
    (
        44713,
        "STARLINK-1007",
        "1 44713U 19074A   26027.42082697  .00000199  00000+0  16244-3 0  9993",
        "2 44713  53.0543 177.1002 0001147  85.6660 274.4550 15.06411545214054",
    ),
    (
        25994,
        "TERRA",
        "1 25994U 99068A   24350.50000000  .00000100  00000-0  20000-4 0  9997",
        "2 25994  98.2100 280.0000 0001200  90.0000 270.0000 14.57000000000009",
    ),
    (
        27424,
        "AQUA",
        "1 27424U 02022A   24350.50000000  .00000100  00000-0  20000-4 0  9991",
        "2 27424  98.2000 320.0000 0001000 100.0000 260.0000 14.57000000000002",
    ),
    (
        39216,
        "INSAT-3D",
        "1 39216U 13041A   24350.50000000  .00000100  00000-0  00000-0 0  9990",
        "2 39216   0.0500  82.0000 0002000  90.0000 270.0000  1.00270000000008",
    ),
    (
        41752,
        "INSAT-3DR",
        "1 41752U 16054A   24350.50000000  .00000100  00000-0  00000-0 0  9995",
        "2 41752   0.0500  74.0000 0002000  90.0000 270.0000  1.00270000000007",
    ),
    (
        44804,
        "CARTOSAT-3",
        "1 44804U 19089A   24350.50000000  .00000500  00000-0  30000-4 0  9998",
        "2 44804  97.5000 320.0000 0010000  50.0000 310.0000 15.19000000000004",
    ),
    (
        44857,
        "RISAT-2BR1",
        "1 44857U 19081A   24350.50000000  .00001000  00000-0  50000-4 0  9996",
        "2 44857  37.0000 150.0000 0010000  40.0000 320.0000 15.09000000000001",
    ),
    (
        46932,
        "EOS-01",
        "1 46932U 20079A   24350.50000000  .00001000  00000-0  50000-4 0  9991",
        "2 46932  37.0000 200.0000 0010000  60.0000 300.0000 15.09000000000003",
    ),
    (
        54358,
        "OCEANSAT-3",
        "1 54358U 22158A   24350.50000000  .00000300  00000-0  20000-4 0  9991",
        "2 54358  98.3000  30.0000 0010000  90.0000 270.0000 14.20000000000006",
    ),
    (
        41877,
        "RESOURCESAT-2A",
        "1 41877U 16074A   24350.50000000  .00000200  00000-0  15000-4 0  9996",
        "2 41877  98.7500 350.0000 0002000  80.0000 280.0000 14.21000000000004",
    ),
    (
        40930,
        "ASTROSAT",
        "1 40930U 15052A   24350.50000000  .00000500  00000-0  35000-4 0  9995",
        "2 40930   6.0000 300.0000 0010000  50.0000 310.0000 14.76000000000005",
    ),
    (
        51502,
        "EOS-04",
        "1 51502U 22012A   24350.50000000  .00000400  00000-0  25000-4 0  9994",
        "2 51502  97.4000  60.0000 0010000  70.0000 290.0000 15.18000000000005",
    ),
    (
        49260,
        "LANDSAT 9",
        "1 49260U 21088A   24350.50000000  .00000200  00000-0  15000-4 0  9991",
        "2 49260  98.2000 280.0000 0001000 100.0000 260.0000 14.57000000000009",
    ),
    (
        40697,
        "SENTINEL-2A",
        "1 40697U 15028A   24350.50000000  .00000100  00000-0  10000-4 0  9997",
        "2 40697  98.5700 220.0000 0001000 100.0000 260.0000 14.31000000000000",
    ),
];

/// Look up the built-in element set for a NORAD ID.
pub fn fallback_tle(norad_id: u64) -> Option<TwoLineElement> {
    FALLBACK_TLES
        .iter()
        .find(|(id, _, _, _)| *id == norad_id)
        .map(|(_, name, line1, line2)| TwoLineElement {
            name: Some((*name).to_string()),
            line1: (*line1).to_string(),
            line2: (*line2).to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sgp4lib::SatRec;

    #[test]
    fn test_every_fallback_entry_parses() {
        for &(id, name, line1, line2) in FALLBACK_TLES {
            let sat = SatRec::new(Some(name), line1, line2)
                .unwrap_or_else(|e| panic!("fallback TLE for {} invalid: {}", id, e));
            assert_eq!(sat.norad_id(), id);
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        assert!(fallback_tle(25544).is_some());
        assert!(fallback_tle(1).is_none());
    }
}
