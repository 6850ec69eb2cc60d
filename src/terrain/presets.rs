//! Prebuilt terrain presets: thresholds and noise scale per map flavor.

pub struct TerrainPreset {
    pub water_threshold: f64,
    pub dark_threshold: f64,
    pub medium_threshold: f64,
    pub scale: f64,
}

pub fn get(name: &str) -> TerrainPreset {
    match name.to_ascii_lowercase().as_str() {
        "islands" => TerrainPreset {
            water_threshold: 0.35,
            dark_threshold: 0.52,
            medium_threshold: 0.72,
            scale: 85.0,
        },
        "lakes" => TerrainPreset {
            water_threshold: 0.30,
            dark_threshold: 0.50,
            medium_threshold: 0.72,
            scale: 55.0,
        },
        "dry" => TerrainPreset {
            water_threshold: 0.15,
            dark_threshold: 0.42,
            medium_threshold: 0.68,
            scale: 60.0,
        },
        _ => TerrainPreset {
            water_threshold: 0.25,
            dark_threshold: 0.45,
            medium_threshold: 0.70,
            scale: 60.0,
        },
    }
}
