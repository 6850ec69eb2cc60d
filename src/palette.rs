//! Fixed vanilla-style palette for the base map and the vegetation map.
//! The generators never invent colors, they only select from these tables;
//! "closeness" everywhere is the Manhattan distance over RGB with the named
//! tolerances below.

use image::Rgba;

pub type Rgb = [u8; 3];

// ---- base map ----
pub const WATER: Rgb = [0, 138, 255];
pub const DARK_GRASS: Rgb = [90, 100, 35];
pub const MED_GRASS: Rgb = [117, 117, 47];
pub const LIGHT_GRASS: Rgb = [145, 135, 60];
pub const DIRT_GRASS: Rgb = [80, 55, 20];
pub const SAND: Rgb = [210, 200, 160];
pub const LIGHT_ASPHALT: Rgb = [165, 160, 140];
pub const DARK_ASPHALT: Rgb = [100, 100, 100];
pub const MEDIUM_ASPHALT: Rgb = [120, 120, 120];
pub const GRAVEL_DIRT: Rgb = [140, 70, 15];
pub const DIRT: Rgb = [120, 70, 20];
pub const DARK_POTHOLE: Rgb = [110, 100, 100];
pub const LIGHT_POTHOLE: Rgb = [130, 120, 120];

// ---- vegetation map ----
pub const VEG_DENSE_FOREST: Rgb = [255, 0, 0];
pub const VEG_DENSE_TREES_GRASS: Rgb = [200, 0, 0];
pub const VEG_TREES_GRASS: Rgb = [127, 0, 0];
pub const VEG_FIR_TREES_GRASS: Rgb = [64, 0, 0];
pub const VEG_GRASS_SOME_TREES: Rgb = [0, 128, 0];
pub const VEG_LIGHT_LONG_GRASS: Rgb = [0, 255, 0];
pub const VEG_BUSHES_GRASS: Rgb = [255, 0, 255];
pub const VEG_DEAD_CORN_1: Rgb = [255, 128, 0];
pub const VEG_DEAD_CORN_2: Rgb = [220, 100, 0];
pub const VEG_NONE: Rgb = [0, 0, 0];

// Per-class match tolerances, shared by cost tables and blocklists.
pub const TOL_GRASS: u32 = 12;
pub const TOL_DIRT: u32 = 15;
pub const TOL_ASPHALT: u32 = 10;
pub const TOL_WATER_EDGE: u32 = 12;
pub const TOL_DENSE_VEG: u32 = 60;
// Edge detection thresholds for the palette-aware post passes.
pub const BOUNDARY_DIST: u32 = 25;
pub const HIGH_CONTRAST_DIST: u32 = 35;

pub const ASPHALTS: [Rgb; 3] = [DARK_ASPHALT, MEDIUM_ASPHALT, LIGHT_ASPHALT];

#[inline]
pub fn dist(a: Rgb, b: Rgb) -> u32 {
    a[0].abs_diff(b[0]) as u32 + a[1].abs_diff(b[1]) as u32 + a[2].abs_diff(b[2]) as u32
}

#[inline]
pub fn close(a: Rgb, b: Rgb, tol: u32) -> bool {
    dist(a, b) <= tol
}

#[inline]
pub fn opaque(c: Rgb) -> Rgba<u8> {
    Rgba([c[0], c[1], c[2], 255])
}

#[inline]
pub fn luminance(c: Rgb) -> f32 {
    0.299 * c[0] as f32 + 0.587 * c[1] as f32 + 0.114 * c[2] as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_manhattan() {
        assert_eq!(dist([0, 0, 0], [1, 2, 3]), 6);
        assert_eq!(dist(WATER, WATER), 0);
    }

    #[test]
    fn asphalts_are_mutually_distinguishable() {
        for (i, a) in ASPHALTS.iter().enumerate() {
            for (j, b) in ASPHALTS.iter().enumerate() {
                if i != j {
                    assert!(!close(*a, *b, TOL_ASPHALT));
                }
            }
        }
    }
}
