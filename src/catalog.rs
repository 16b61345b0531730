//! Built-in catalog of trackable satellites
//!
//! A curated set of well-known objects spanning space stations,
//! observatories, Earth-observation and weather satellites. Every
//! entry has a matching element set in the offline fallback table or
//! can be fetched live by NORAD ID.

/// Broad class of a catalogued object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    SpaceStation,
    Satellite,
}

/// One trackable object in the built-in catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Stable lowercase identifier ("iss", "hubble", ...)
    pub id: &'static str,
    /// Full display name
    pub name: &'static str,
    /// Abbreviated name for dense UIs
    pub short_name: &'static str,
    /// NORAD catalog number
    pub norad_id: u64,
    /// Operating country or agency
    pub country: &'static str,
    pub category: Category,
}

/// The built-in satellite catalog.
pub const SATELLITE_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: "iss",
        name: "International Space Station",
        short_name: "ISS",
        norad_id: 25544,
        country: "International",
        category: Category::SpaceStation,
    },
    CatalogEntry {
        id: "css",
        name: "Tiangong Space Station",
        short_name: "Tiangong",
        norad_id: 48274,
        country: "China",
        category: Category::SpaceStation,
    },
    CatalogEntry {
        id: "hubble",
        name: "Hubble Space Telescope",
        short_name: "Hubble",
        norad_id: 20580,
        country: "USA",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "astrosat",
        name: "AstroSat",
        short_name: "AstroSat",
        norad_id: 40930,
        country: "India",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "terra",
        name: "Terra (EOS AM-1)",
        short_name: "Terra",
        norad_id: 25994,
        country: "USA",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "aqua",
        name: "Aqua (EOS PM-1)",
        short_name: "Aqua",
        norad_id: 27424,
        country: "USA",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "landsat9",
        name: "Landsat 9",
        short_name: "Landsat-9",
        norad_id: 49260,
        country: "USA",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "sentinel2a",
        name: "Sentinel-2A",
        short_name: "Sentinel-2A",
        norad_id: 40697,
        country: "Europe",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "cartosat3",
        name: "Cartosat-3",
        short_name: "Cartosat-3",
        norad_id: 44804,
        country: "India",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "risat2br1",
        name: "RISAT-2BR1",
        short_name: "RISAT-2B",
        norad_id: 44857,
        country: "India",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "noaa19",
        name: "NOAA 19",
        short_name: "NOAA-19",
        norad_id: 33591,
        country: "USA",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "insat3d",
        name: "INSAT-3D",
        short_name: "INSAT-3D",
        norad_id: 39216,
        country: "India",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "insat3dr",
        name: "INSAT-3DR",
        short_name: "INSAT-3DR",
        norad_id: 41752,
        country: "India",
        category: Category::Satellite,
    },
    CatalogEntry {
        id: "starlink",
        name: "Starlink-1007",
        short_name: "Starlink",
        norad_id: 44713,
        country: "SpaceX",
        category: Category::Satellite,
    },
];

/// Look up a catalog entry by its stable identifier.
pub fn find_by_id(id: &str) -> Option<&'static CatalogEntry> {
    SATELLITE_CATALOG.iter().find(|e| e.id == id)
}

/// Look up a catalog entry by NORAD number.
pub fn find_by_norad(norad_id: u64) -> Option<&'static CatalogEntry> {
    SATELLITE_CATALOG.iter().find(|e| e.norad_id == norad_id)
}
