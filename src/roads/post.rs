//! Road raster post-processing: pothole stamping and lot rectangles.
//! Potholes only ever land on asphalt; dirt, gravel and sand are never
//! pitted, and the polygon fill is gated per-pixel so a stamp can never
//! leak past the asphalt it was sampled on.

use glam::IVec2;
use image::RgbaImage;
use rand::Rng;
use rand_pcg::Pcg64Mcg;

use crate::palette;
use crate::raster;

pub const LOT_COLOR: image::Rgba<u8> = image::Rgba([255, 0, 0, 255]);

pub fn apply_potholes(img: &mut RgbaImage, density: f64, rng: &mut Pcg64Mcg) {
    if density <= 0.0 {
        return;
    }
    let (w, h) = img.dimensions();
    let attempts = ((w * h) as f64 * density * 0.15) as u32;

    for _ in 0..attempts {
        let x = rng.gen_range(0..w) as i32;
        let y = rng.gen_range(0..h) as i32;
        let Some(base) = raster::get_rgb(img, x, y) else { continue };
        // no retry on a miss
        if !palette::ASPHALTS.contains(&base) {
            continue;
        }

        let color = if base == palette::DARK_ASPHALT || base == palette::MEDIUM_ASPHALT {
            palette::DARK_POTHOLE
        } else {
            palette::LIGHT_POTHOLE
        };

        // jagged little polygon around the sampled point
        let radius = rng.gen_range(2..=4);
        let count = rng.gen_range(4..=7);
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(IVec2::new(
                x + rng.gen_range(-radius..=radius),
                y + rng.gen_range(-radius..=radius),
            ));
        }
        raster::fill_polygon_where(img, &points, color, |c| palette::ASPHALTS.contains(&c));
    }
}

pub fn add_lot_rect(lots: &mut RgbaImage, origin: IVec2, w: i32, h: i32) {
    raster::fill_rect(lots, origin, w, h, LOT_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngSeq;

    fn rng() -> Pcg64Mcg {
        RngSeq::new(3).stream("potholes")
    }

    #[test]
    fn zero_density_is_a_no_op() {
        let mut img = raster::new_transparent(64, 64);
        raster::fill_rect(&mut img, IVec2::new(10, 10), 20, 20, palette::opaque(palette::DARK_ASPHALT));
        let before = img.clone();
        apply_potholes(&mut img, 0.0, &mut rng());
        assert_eq!(img.as_raw(), before.as_raw());
    }

    #[test]
    fn only_asphalt_pixels_ever_change() {
        let mut img = raster::new_transparent(128, 128);
        raster::fill_rect(&mut img, IVec2::new(20, 20), 40, 6, palette::opaque(palette::DARK_ASPHALT));
        raster::fill_rect(&mut img, IVec2::new(20, 60), 40, 6, palette::opaque(palette::DIRT));
        let before = img.clone();

        apply_potholes(&mut img, 1.0, &mut rng());

        for (x, y, p) in img.enumerate_pixels() {
            let prev = before.get_pixel(x, y);
            if p != prev {
                let was = [prev[0], prev[1], prev[2]];
                assert!(
                    palette::ASPHALTS.contains(&was),
                    "non-asphalt pixel changed at ({x},{y})"
                );
                let now = [p[0], p[1], p[2]];
                assert!(now == palette::DARK_POTHOLE || now == palette::LIGHT_POTHOLE);
            }
        }
    }

    #[test]
    fn pothole_shade_follows_asphalt_shade() {
        // a light-asphalt-only canvas can only ever get light potholes
        let mut img = raster::new_transparent(64, 64);
        raster::fill_rect(&mut img, IVec2::new(0, 0), 64, 64, palette::opaque(palette::LIGHT_ASPHALT));
        apply_potholes(&mut img, 1.0, &mut rng());
        for p in img.pixels() {
            let c = [p[0], p[1], p[2]];
            assert!(c == palette::LIGHT_ASPHALT || c == palette::LIGHT_POTHOLE);
        }
    }
}
