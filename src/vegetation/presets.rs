//! Vegetation presets: density / patchiness knobs for the noise field.

pub struct VegetationPreset {
    pub scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
}

pub fn get(name: &str) -> VegetationPreset {
    match name.to_ascii_lowercase().as_str() {
        "overgrown" => VegetationPreset { scale: 45.0, octaves: 5, persistence: 0.6, lacunarity: 2.1 },
        "rural" => VegetationPreset { scale: 65.0, octaves: 4, persistence: 0.5, lacunarity: 2.0 },
        "suburban" => VegetationPreset { scale: 85.0, octaves: 3, persistence: 0.45, lacunarity: 2.0 },
        _ => VegetationPreset { scale: 50.0, octaves: 5, persistence: 0.55, lacunarity: 2.0 },
    }
}
