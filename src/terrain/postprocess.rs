//! Terrain post-processing. Two pass sets share the same three toggles:
//! the default set perturbs pixels geometrically/numerically, the
//! palette-aware set keeps every write inside the vanilla color table.
//! Every pass reads the incoming buffer and writes a fresh one.

use image::RgbaImage;
use rand::Rng;
use rand_pcg::Pcg64Mcg;

use crate::config::TerrainPostConfig;
use crate::palette::{self, Rgb};
use crate::raster;

pub fn apply_all(img: &mut RgbaImage, conf: &TerrainPostConfig, rng: &mut Pcg64Mcg) {
    if conf.palette_aware {
        if conf.edge_ragging {
            *img = edge_ragging_palette(img, conf.strength, rng);
        }
        if conf.speckle {
            *img = speckle_palette(img, 0.01, rng);
        }
        if conf.erosion {
            *img = erosion_soft(img, conf.strength, rng);
        }
    } else {
        if conf.edge_ragging {
            *img = edge_perturbation(img, 1, 0.35, rng);
        }
        if conf.speckle {
            *img = speckle(img, 0.01, 18, rng);
        }
        if conf.erosion {
            *img = erosion(img, 1);
        }
    }
}

/// For a `probability` fraction of pixels, copy a neighbor from a random
/// offset within [-amount, amount] on both axes (clamped to the canvas).
pub fn edge_perturbation(
    src: &RgbaImage,
    amount: i32,
    probability: f64,
    rng: &mut Pcg64Mcg,
) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            if rng.gen::<f64>() < probability {
                let jx = (x + rng.gen_range(-amount..=amount)).clamp(0, w as i32 - 1);
                let jy = (y + rng.gen_range(-amount..=amount)).clamp(0, h as i32 - 1);
                out.put_pixel(x as u32, y as u32, *src.get_pixel(jx as u32, jy as u32));
            }
        }
    }
    out
}

/// For a `density` fraction of pixels, nudge each RGB channel independently
/// by a signed delta in [-strength, strength]. Alpha untouched.
pub fn speckle(src: &RgbaImage, density: f64, strength: i32, rng: &mut Pcg64Mcg) -> RgbaImage {
    let mut out = src.clone();
    for p in out.pixels_mut() {
        if rng.gen::<f64>() < density {
            for k in 0..3 {
                let d = rng.gen_range(-strength..=strength);
                p[k] = (p[k] as i32 + d).clamp(0, 255) as u8;
            }
        }
    }
    out
}

/// Replace each pixel with the darkest neighbor by luminance in its
/// (2r+1)^2 neighborhood. Ties keep the first found in scan order.
pub fn erosion(src: &RgbaImage, radius: i32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let mut darkest = *src.get_pixel(x as u32, y as u32);
            let mut darkest_lum = palette::luminance([darkest[0], darkest[1], darkest[2]]);
            for ny in (y - radius).max(0)..=(y + radius).min(h as i32 - 1) {
                for nx in (x - radius).max(0)..=(x + radius).min(w as i32 - 1) {
                    let c = *src.get_pixel(nx as u32, ny as u32);
                    let l = palette::luminance([c[0], c[1], c[2]]);
                    if l < darkest_lum {
                        darkest_lum = l;
                        darkest = c;
                    }
                }
            }
            out.put_pixel(x as u32, y as u32, darkest);
        }
    }
    out
}

fn neighbors4(src: &RgbaImage, x: i32, y: i32) -> Vec<Rgb> {
    let mut v = Vec::with_capacity(4);
    for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
        if let Some(c) = raster::get_rgb(src, x + dx, y + dy) {
            v.push(c);
        }
    }
    v
}

/// Palette-aware ragging: on a color boundary, let one of the contrasting
/// neighbor colors invade with probability strength * 0.6.
pub fn edge_ragging_palette(src: &RgbaImage, strength: f64, rng: &mut Pcg64Mcg) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let Some(here) = raster::get_rgb(src, x, y) else { continue };
            let invaders: Vec<Rgb> = neighbors4(src, x, y)
                .into_iter()
                .filter(|n| palette::dist(here, *n) > palette::BOUNDARY_DIST)
                .collect();
            if invaders.is_empty() {
                continue;
            }
            if rng.gen::<f64>() < strength * 0.6 {
                let pick = invaders[rng.gen_range(0..invaders.len())];
                raster::put_rgb(&mut out, x, y, pick);
            }
        }
    }
    out
}

/// Sprinkle related vanilla colors; water is never speckled.
pub fn speckle_palette(src: &RgbaImage, density: f64, rng: &mut Pcg64Mcg) -> RgbaImage {
    const CANDIDATES: [Rgb; 7] = [
        palette::DARK_GRASS,
        palette::MED_GRASS,
        palette::LIGHT_GRASS,
        palette::DIRT,
        palette::DIRT_GRASS,
        palette::SAND,
        palette::GRAVEL_DIRT,
    ];
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    let target = ((w * h) as f64 * density) as u32;
    for _ in 0..target {
        let x = rng.gen_range(0..w) as i32;
        let y = rng.gen_range(0..h) as i32;
        let Some(current) = raster::get_rgb(&out, x, y) else { continue };
        if current == palette::WATER {
            continue;
        }
        let choices: Vec<Rgb> = CANDIDATES.iter().copied().filter(|c| *c != current).collect();
        let pick = choices[rng.gen_range(0..choices.len())];
        raster::put_rgb(&mut out, x, y, pick);
    }
    out
}

/// Soft erosion: shores gain sand, high-contrast edges decay to dirt or
/// dirt-grass.
pub fn erosion_soft(src: &RgbaImage, strength: f64, rng: &mut Pcg64Mcg) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let Some(here) = raster::get_rgb(src, x, y) else { continue };
            let neigh = neighbors4(src, x, y);

            let near_water = neigh
                .iter()
                .any(|n| palette::dist(*n, palette::WATER) < palette::TOL_WATER_EDGE);
            if near_water && here != palette::WATER {
                if rng.gen::<f64>() < strength * 0.75 {
                    raster::put_rgb(&mut out, x, y, palette::SAND);
                    continue;
                }
            }

            let high_contrast = neigh
                .iter()
                .any(|n| palette::dist(here, *n) > palette::HIGH_CONTRAST_DIST);
            if high_contrast && rng.gen::<f64>() < strength * 0.5 {
                let c = if rng.gen::<f64>() < 0.5 { palette::DIRT } else { palette::DIRT_GRASS };
                raster::put_rgb(&mut out, x, y, c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngSeq;

    fn rng() -> Pcg64Mcg {
        RngSeq::new(1).stream("terrain_post")
    }

    #[test]
    fn disabled_passes_leave_raster_untouched() {
        let mut img = raster::new_opaque(16, 16);
        raster::put_rgb(&mut img, 3, 3, palette::SAND);
        let before = img.clone();
        let conf = TerrainPostConfig {
            edge_ragging: false,
            speckle: false,
            erosion: false,
            strength: 0.6,
            palette_aware: false,
        };
        apply_all(&mut img, &conf, &mut rng());
        assert_eq!(img.as_raw(), before.as_raw());
    }

    #[test]
    fn erosion_picks_darkest_neighbor() {
        let mut img = raster::new_opaque(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                raster::put_rgb(&mut img, x, y, palette::SAND);
            }
        }
        raster::put_rgb(&mut img, 1, 1, palette::DIRT_GRASS); // darkest around
        let out = erosion(&img, 1);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(raster::get_rgb(&out, x, y), Some(palette::DIRT_GRASS));
            }
        }
    }

    #[test]
    fn speckle_keeps_alpha() {
        let img = raster::new_transparent(8, 8);
        let out = speckle(&img, 1.0, 18, &mut rng());
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn palette_speckle_never_touches_water() {
        let mut img = raster::new_opaque(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                raster::put_rgb(&mut img, x, y, palette::WATER);
            }
        }
        let out = speckle_palette(&img, 1.0, &mut rng());
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(raster::get_rgb(&out, x, y), Some(palette::WATER));
            }
        }
    }

    #[test]
    fn ragging_only_moves_existing_colors() {
        let mut img = raster::new_opaque(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                raster::put_rgb(&mut img, x, y, if x < 4 { palette::WATER } else { palette::SAND });
            }
        }
        let out = edge_ragging_palette(&img, 1.0, &mut rng());
        for y in 0..8i32 {
            for x in 0..8i32 {
                let c = raster::get_rgb(&out, x, y).unwrap();
                assert!(c == palette::WATER || c == palette::SAND);
            }
        }
    }
}
