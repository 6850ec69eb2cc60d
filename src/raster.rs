//! Raster canvas helpers. All map layers are `image::RgbaImage` buffers of
//! the same canvas size: terrain and vegetation opaque, roads and lots
//! transparent overlays.

use bitvec::prelude::*;
use glam::IVec2;
use image::{Rgba, RgbaImage};

use crate::palette::{self, Rgb};

pub fn new_opaque(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]))
}

pub fn new_transparent(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]))
}

#[inline]
pub fn in_bounds(img: &RgbaImage, x: i32, y: i32, margin: i32) -> bool {
    x >= margin
        && y >= margin
        && x < img.width() as i32 - margin
        && y < img.height() as i32 - margin
}

#[inline]
pub fn get_rgb(img: &RgbaImage, x: i32, y: i32) -> Option<Rgb> {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return None;
    }
    let p = img.get_pixel(x as u32, y as u32);
    Some([p[0], p[1], p[2]])
}

#[inline]
pub fn put_rgb(img: &mut RgbaImage, x: i32, y: i32, c: Rgb) {
    if x >= 0 && y >= 0 && x < img.width() as i32 && y < img.height() as i32 {
        img.put_pixel(x as u32, y as u32, palette::opaque(c));
    }
}

/// Bresenham stepper shared by line and polyline drawing.
fn bresenham(a: IVec2, b: IVec2, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (a.x, a.y);
    let dx = (b.x - x0).abs();
    let sx = if x0 < b.x { 1 } else { -1 };
    let dy = -(b.y - y0).abs();
    let sy = if y0 < b.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);
        if x0 == b.x && y0 == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Single-pixel line, clipped at the canvas.
pub fn draw_line(img: &mut RgbaImage, a: IVec2, b: IVec2, c: Rgb) {
    bresenham(a, b, |x, y| put_rgb(img, x, y, c));
}

/// Filled disk, clipped at the canvas.
pub fn draw_disk(img: &mut RgbaImage, c: IVec2, r: i32, color: Rgb) {
    let r = r.max(0);
    for y in (c.y - r)..=(c.y + r) {
        for x in (c.x - r)..=(c.x + r) {
            let dx = x - c.x;
            let dy = y - c.y;
            if dx * dx + dy * dy <= r * r {
                put_rgb(img, x, y, color);
            }
        }
    }
}

/// Connected stroke through `points`: every Bresenham step stamps a disk of
/// radius width/2, which gives rounded joins with no gaps at turns.
pub fn draw_polyline(img: &mut RgbaImage, points: &[IVec2], color: Rgb, width: i32) {
    let r = (width / 2).max(0);
    for pair in points.windows(2) {
        bresenham(pair[0], pair[1], |x, y| {
            draw_disk(img, IVec2::new(x, y), r, color);
        });
    }
}

pub fn fill_rect(img: &mut RgbaImage, origin: IVec2, w: i32, h: i32, color: Rgba<u8>) {
    for y in origin.y..origin.y + h {
        for x in origin.x..origin.x + w {
            if x >= 0 && y >= 0 && x < img.width() as i32 && y < img.height() as i32 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Even-odd scanline polygon fill, writing only where `keep` approves the
/// pixel's current color. Used by pothole stamping, which must never touch
/// anything that is not asphalt.
pub fn fill_polygon_where(
    img: &mut RgbaImage,
    points: &[IVec2],
    color: Rgb,
    keep: impl Fn(Rgb) -> bool,
) {
    if points.len() < 3 {
        return;
    }
    let ymin = points.iter().fold(i32::MAX, |m, p| m.min(p.y)).max(0);
    let ymax = points.iter().fold(i32::MIN, |m, p| m.max(p.y)).min(img.height() as i32 - 1);

    for y in ymin..=ymax {
        let mut xs: Vec<i32> = Vec::new();
        for i in 0..points.len() {
            let a = points[i];
            let b = points[(i + 1) % points.len()];
            if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
                let t = (y - a.y) as f64 / (b.y - a.y) as f64;
                xs.push((a.x as f64 + t * (b.x - a.x) as f64).round() as i32);
            }
        }
        xs.sort_unstable();
        for pair in xs.chunks(2) {
            if let [x0, x1] = pair {
                for x in *x0..=*x1 {
                    if let Some(cur) = get_rgb(img, x, y) {
                        if keep(cur) {
                            put_rgb(img, x, y, color);
                        }
                    }
                }
            }
        }
    }
}

/// Standard alpha-over compositing of `overlay` onto `base`, in place.
pub fn composite_over(base: &mut RgbaImage, overlay: &RgbaImage) {
    debug_assert_eq!(base.dimensions(), overlay.dimensions());
    for (b, o) in base.pixels_mut().zip(overlay.pixels()) {
        let oa = o[3] as u32;
        if oa == 0 {
            continue;
        }
        if oa == 255 {
            *b = *o;
            continue;
        }
        let ba = b[3] as u32;
        let out_a = oa + ba * (255 - oa) / 255;
        for k in 0..3 {
            let top = o[k] as u32 * oa;
            let bot = b[k] as u32 * ba * (255 - oa) / 255;
            b[k] = if out_a > 0 { ((top + bot) / out_a) as u8 } else { 0 };
        }
        b[3] = out_a as u8;
    }
}

/// Per-pixel boolean mask over the canvas.
#[derive(Clone)]
pub struct Mask {
    pub w: i32,
    pub h: i32,
    bits: BitVec,
}

impl Mask {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h, bits: bitvec![0; (w * h) as usize] }
    }

    /// Mark every pixel whose color is an exact member of `colors`.
    pub fn from_colors(img: &RgbaImage, colors: &[Rgb]) -> Self {
        let mut m = Self::new(img.width() as i32, img.height() as i32);
        for (x, y, p) in img.enumerate_pixels() {
            let rgb = [p[0], p[1], p[2]];
            if colors.contains(&rgb) {
                m.set(x as i32, y as i32, true);
            }
        }
        m
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.w + x) as usize
    }

    pub fn set(&mut self, x: i32, y: i32, v: bool) {
        let i = self.idx(x, y);
        self.bits.set(i, v);
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        self.bits[self.idx(x, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    #[test]
    fn polyline_is_connected_and_thick() {
        let mut img = new_transparent(40, 40);
        let pts = [IVec2::new(5, 5), IVec2::new(30, 5), IVec2::new(30, 30)];
        draw_polyline(&mut img, &pts, palette::DARK_ASPHALT, 5);
        // the corner must be covered (rounded join)
        assert_eq!(get_rgb(&img, 30, 5), Some(palette::DARK_ASPHALT));
        // stroke width: two pixels above/below the horizontal run
        assert_eq!(get_rgb(&img, 15, 3), Some(palette::DARK_ASPHALT));
        assert_eq!(get_rgb(&img, 15, 7), Some(palette::DARK_ASPHALT));
        assert_eq!(img.get_pixel(15, 12)[3], 0);
    }

    #[test]
    fn predicate_fill_skips_rejected_pixels() {
        let mut img = new_transparent(20, 20);
        fill_rect(&mut img, IVec2::new(5, 5), 5, 5, palette::opaque(palette::DARK_ASPHALT));
        let poly = [IVec2::new(2, 2), IVec2::new(15, 2), IVec2::new(15, 15), IVec2::new(2, 15)];
        fill_polygon_where(&mut img, &poly, palette::DARK_POTHOLE, |c| {
            palette::ASPHALTS.contains(&c)
        });
        assert_eq!(get_rgb(&img, 7, 7), Some(palette::DARK_POTHOLE));
        // outside the asphalt rect: untouched transparent black
        assert_eq!(img.get_pixel(3, 3)[3], 0);
    }

    #[test]
    fn mask_from_exact_colors() {
        let mut img = new_opaque(4, 4);
        put_rgb(&mut img, 1, 1, palette::WATER);
        let m = Mask::from_colors(&img, &[palette::WATER]);
        assert!(m.get(1, 1));
        assert!(!m.get(0, 0));
    }
}
