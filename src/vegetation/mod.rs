//! Vegetation synthesizer: one noise field quantized into an ordered density
//! band list, optionally masked by the terrain raster so nothing grows on
//! water or asphalt.

pub mod presets;

use image::RgbaImage;

use crate::config::MapConfig;
use crate::field::{NoiseBackend, NoiseField, NoiseParams};
use crate::palette::{self, Rgb};
use crate::raster::{self, Mask};

/// Lowest to highest density. Noise 0..1 maps onto this list.
pub const BANDS: [Rgb; 7] = [
    palette::VEG_NONE,
    palette::VEG_GRASS_SOME_TREES,
    palette::VEG_LIGHT_LONG_GRASS,
    palette::VEG_TREES_GRASS,
    palette::VEG_DENSE_TREES_GRASS,
    palette::VEG_DENSE_FOREST,
    palette::VEG_BUSHES_GRASS,
];

/// Terrain colors vegetation must not overwrite when respect_terrain is on.
/// Exact match, not distance-based.
pub const TERRAIN_BLOCKLIST: [Rgb; 4] = [
    palette::WATER,
    palette::LIGHT_ASPHALT,
    palette::DARK_ASPHALT,
    palette::MEDIUM_ASPHALT,
];

pub fn generate(
    conf: &MapConfig,
    width: u32,
    height: u32,
    terrain: Option<&RgbaImage>,
) -> RgbaImage {
    let vc = &conf.vegetation;
    let preset = presets::get(&vc.preset);

    let params = NoiseParams {
        // shifted so vegetation never aligns with terrain noise
        seed: ((conf.seed.wrapping_add(999)) & 0xFFFF_FFFF) as u32,
        scale: vc.scale.unwrap_or(preset.scale),
        octaves: vc.octaves.unwrap_or(preset.octaves),
        persistence: vc.persistence.unwrap_or(preset.persistence),
        lacunarity: vc.lacunarity.unwrap_or(preset.lacunarity),
    };
    let field = NoiseField::generate(width, height, &params, NoiseBackend::Fractal);

    let blocked = match (vc.respect_terrain, terrain) {
        (true, Some(t)) => Some(Mask::from_colors(t, &TERRAIN_BLOCKLIST)),
        _ => None,
    };

    let mut img = raster::new_opaque(width, height);
    for y in 0..height {
        for x in 0..width {
            if let Some(m) = &blocked {
                if m.get(x as i32, y as i32) {
                    img.put_pixel(x, y, palette::opaque(palette::VEG_NONE));
                    continue;
                }
            }
            let v = field.normalized(x, y);
            let idx = ((v * BANDS.len() as f64) as usize).min(BANDS.len() - 1);
            img.put_pixel(x, y, palette::opaque(BANDS[idx]));
        }
    }
    img
}
