//! Terrain synthesizer: classifies normalized noise fields into the vanilla
//! base-map palette. Two interchangeable modes: a six-band threshold
//! quantizer, or an ordered list of independently-noised layers. An optional
//! rotation + toroidal offset transform runs last.

pub mod postprocess;
pub mod presets;

use image::RgbaImage;
use rand_pcg::Pcg64Mcg;

use crate::config::MapConfig;
use crate::field::{NoiseBackend, NoiseField, NoiseParams};
use crate::palette;
use crate::raster;
use crate::rng;

pub fn generate(conf: &MapConfig, width: u32, height: u32, rng: &mut Pcg64Mcg) -> RgbaImage {
    let mut img = if conf.terrain.layers.is_empty() {
        generate_threshold(conf, width, height)
    } else {
        generate_layers(conf, width, height)
    };
    postprocess::apply_all(&mut img, &conf.terrain.postprocess, rng);
    apply_transform(&mut img, conf);
    img
}

/// Simple mode: one field quantized into six contiguous bands in strictly
/// increasing order of the normalized value.
fn generate_threshold(conf: &MapConfig, width: u32, height: u32) -> RgbaImage {
    let tc = &conf.terrain;
    let preset = presets::get(&tc.preset);

    let params = NoiseParams {
        scale: tc.scale.unwrap_or(preset.scale),
        octaves: tc.octaves,
        persistence: tc.persistence,
        lacunarity: tc.lacunarity,
        seed: (conf.seed & 0xFFFF_FFFF) as u32,
    };
    let water_th = tc.water_threshold.unwrap_or(preset.water_threshold);
    let dark_th = tc.dark_threshold.unwrap_or(preset.dark_threshold);
    let med_th = tc.medium_threshold.unwrap_or(preset.medium_threshold);

    let field = NoiseField::generate(width, height, &params, NoiseBackend::Fractal);

    let mut img = raster::new_opaque(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = field.normalized(x, y);
            let c = if v < water_th {
                palette::WATER
            } else if v < dark_th {
                palette::DARK_GRASS
            } else if v < med_th {
                palette::MED_GRASS
            } else if v < (med_th + 0.10).min(1.0) {
                palette::LIGHT_GRASS
            } else if v < (med_th + 0.18).min(1.0) {
                palette::DIRT
            } else {
                palette::SAND
            };
            img.put_pixel(x, y, palette::opaque(c));
        }
    }
    img
}

/// Layer mode: each named layer gets its own independently normalized field
/// and paints wherever its value reaches the threshold. Later layers
/// overwrite earlier ones; plain z-order, no blending.
fn generate_layers(conf: &MapConfig, width: u32, height: u32) -> RgbaImage {
    let mut img = raster::new_transparent(width, height);

    for layer in &conf.terrain.layers {
        let seed = layer
            .seed
            .unwrap_or_else(|| rng::derive_seed(conf.seed, &layer.name));
        let params = NoiseParams {
            scale: layer.scale,
            octaves: layer.octaves,
            persistence: layer.persistence,
            lacunarity: layer.lacunarity,
            seed,
        };
        let field = NoiseField::generate(width, height, &params, NoiseBackend::Fractal);
        let color = image::Rgba(layer.color);
        for y in 0..height {
            for x in 0..width {
                if field.normalized(x, y) >= layer.threshold {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }
    img
}

fn apply_transform(img: &mut RgbaImage, conf: &MapConfig) {
    let tr = &conf.terrain.transform;
    let rot = tr.rotation.rem_euclid(360);
    if rot != 0 {
        *img = rotate_nearest(img, rot);
    }
    if tr.offset_x != 0 || tr.offset_y != 0 {
        *img = offset_wrap(img, tr.offset_x, tr.offset_y);
    }
}

/// Nearest-neighbor rotation about the canvas center, size preserved.
/// Pixels rotated in from outside the canvas become transparent black.
fn rotate_nearest(img: &RgbaImage, degrees: i32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let (s, c) = (degrees as f64).to_radians().sin_cos();
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);

    let mut out = raster::new_transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let ox = x as f64 + 0.5 - cx;
            let oy = y as f64 + 0.5 - cy;
            let sx = (c * ox - s * oy + cx).floor() as i32;
            let sy = (s * ox + c * oy + cy).floor() as i32;
            if sx >= 0 && sy >= 0 && (sx as u32) < w && (sy as u32) < h {
                out.put_pixel(x, y, *img.get_pixel(sx as u32, sy as u32));
            }
        }
    }
    out
}

/// Toroidal pixel shift: content moves by (dx, dy) and wraps around.
fn offset_wrap(img: &RgbaImage, dx: i32, dy: i32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let mut out = raster::new_transparent(w, h);
    for y in 0..h {
        for x in 0..w {
            let nx = (x as i32 + dx).rem_euclid(w as i32) as u32;
            let ny = (y as i32 + dy).rem_euclid(h as i32) as u32;
            out.put_pixel(nx, ny, *img.get_pixel(x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayerConfig, MapConfig};
    use crate::rng::RngSeq;

    fn quiet_conf() -> MapConfig {
        let mut c = MapConfig::default();
        c.terrain.postprocess.edge_ragging = false;
        c.terrain.postprocess.speckle = false;
        c.terrain.postprocess.erosion = false;
        c
    }

    #[test]
    fn default_scenario_has_water_and_variation() {
        let conf = quiet_conf();
        let mut rng = RngSeq::new(conf.seed).stream("terrain_post");
        let img = generate(&conf, 300, 300, &mut rng);
        assert_eq!(img.dimensions(), (300, 300));

        let mut saw_water = false;
        let first = *img.get_pixel(0, 0);
        let mut uniform = true;
        for p in img.pixels() {
            if [p[0], p[1], p[2]] == palette::WATER {
                saw_water = true;
            }
            if *p != first {
                uniform = false;
            }
        }
        assert!(saw_water, "default thresholds should produce water");
        assert!(!uniform, "raster should not be a single color");
    }

    #[test]
    fn bands_are_monotonic_in_noise_value() {
        fn band(c: palette::Rgb) -> usize {
            [
                palette::WATER,
                palette::DARK_GRASS,
                palette::MED_GRASS,
                palette::LIGHT_GRASS,
                palette::DIRT,
                palette::SAND,
            ]
            .iter()
            .position(|b| *b == c)
            .unwrap()
        }
        let conf = quiet_conf();
        let img = generate_threshold(&conf, 64, 64);
        let params = NoiseParams {
            scale: 60.0,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: (conf.seed & 0xFFFF_FFFF) as u32,
        };
        let field = NoiseField::generate(64, 64, &params, NoiseBackend::Fractal);

        let mut samples: Vec<(f64, usize)> = Vec::new();
        for y in 0..64 {
            for x in 0..64 {
                let p = img.get_pixel(x, y);
                samples.push((field.normalized(x, y), band([p[0], p[1], p[2]])));
            }
        }
        samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
        for pair in samples.windows(2) {
            assert!(pair[0].1 <= pair[1].1, "band must not decrease as noise rises");
        }
    }

    #[test]
    fn later_layers_paint_over_earlier_ones() {
        let mut conf = quiet_conf();
        conf.terrain.layers = vec![
            LayerConfig {
                name: "base".into(),
                color: [10, 20, 30, 255],
                threshold: 0.0, // everywhere
                ..Default::default()
            },
            LayerConfig {
                name: "top".into(),
                color: [200, 100, 50, 255],
                threshold: 0.0, // everywhere, wins by z-order
                ..Default::default()
            },
        ];
        let img = generate_layers(&conf, 16, 16);
        assert!(img.pixels().all(|p| p.0 == [200, 100, 50, 255]));
    }

    #[test]
    fn offset_wraps_around() {
        let mut img = raster::new_opaque(8, 8);
        raster::put_rgb(&mut img, 7, 0, palette::SAND);
        let out = offset_wrap(&img, 2, 0);
        assert_eq!(raster::get_rgb(&out, 1, 0), Some(palette::SAND));
    }

    #[test]
    fn rotation_preserves_canvas_size() {
        let img = raster::new_opaque(10, 6);
        let out = rotate_nearest(&img, 90);
        assert_eq!(out.dimensions(), (10, 6));
    }
}
