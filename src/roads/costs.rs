//! Traversal cost model. Samples the terrain/vegetation rasters and maps
//! palette matches to scalar costs; road growth accepts or rejects segments
//! on the mean cost along the segment.

use image::RgbaImage;

use crate::palette::{self, Rgb};
use crate::raster;

/// Cost for water when it is not ignored; effectively "never".
pub const COST_IMPASSABLE: f64 = 9999.0;
/// Cost for colors the table does not recognize, and for water when
/// `ignore_water` pretends it is grass.
pub const COST_DEFAULT: f64 = 2.0;
/// Cost when no terrain raster is available at all.
pub const COST_NO_TERRAIN: f64 = 1.5;
const COST_DENSE_VEG: f64 = 1.2;
const SEGMENT_SAMPLES: u32 = 6;

/// (color, tolerance, cost), matched in order.
const TERRAIN_COST_TABLE: [(Rgb, u32, f64); 10] = [
    (palette::WATER, palette::TOL_GRASS, COST_IMPASSABLE),
    (palette::DARK_GRASS, palette::TOL_GRASS, 2.5),
    (palette::MED_GRASS, palette::TOL_GRASS, 2.0),
    (palette::LIGHT_GRASS, palette::TOL_GRASS, 1.7),
    (palette::DIRT, palette::TOL_DIRT, 1.2),
    (palette::GRAVEL_DIRT, palette::TOL_DIRT, 1.3),
    (palette::SAND, palette::TOL_DIRT, 1.5),
    (palette::LIGHT_ASPHALT, palette::TOL_ASPHALT, 1.0),
    (palette::MEDIUM_ASPHALT, palette::TOL_ASPHALT, 1.0),
    (palette::DARK_ASPHALT, palette::TOL_ASPHALT, 1.0),
];

/// Vegetation considered thick enough to charge for.
const DENSE_VEG: [Rgb; 4] = [
    palette::VEG_DENSE_FOREST,
    palette::VEG_DENSE_TREES_GRASS,
    palette::VEG_BUSHES_GRASS,
    palette::VEG_TREES_GRASS,
];

pub struct CostModel<'a> {
    pub terrain: Option<&'a RgbaImage>,
    pub vegetation: Option<&'a RgbaImage>,
    pub ignore_water: bool,
    pub ignore_trees: bool,
}

impl<'a> CostModel<'a> {
    pub fn terrain_cost_at(&self, x: i32, y: i32) -> f64 {
        let Some(img) = self.terrain else {
            return COST_NO_TERRAIN;
        };
        let Some(rgb) = raster::get_rgb(img, x, y) else {
            return COST_IMPASSABLE; // out of bounds
        };
        for (color, tol, cost) in TERRAIN_COST_TABLE {
            if palette::close(rgb, color, tol) {
                if self.ignore_water && cost >= COST_IMPASSABLE {
                    return COST_DEFAULT; // pretend water is grass
                }
                return cost;
            }
        }
        COST_DEFAULT
    }

    pub fn vegetation_cost_at(&self, x: i32, y: i32) -> f64 {
        let Some(img) = self.vegetation else {
            return 0.0;
        };
        let Some(rgb) = raster::get_rgb(img, x, y) else {
            return 0.0;
        };
        for dense in DENSE_VEG {
            if palette::dist(rgb, dense) < palette::TOL_DENSE_VEG {
                return if self.ignore_trees { 0.0 } else { COST_DENSE_VEG };
            }
        }
        0.0
    }

    #[inline]
    pub fn cost_at(&self, x: i32, y: i32) -> f64 {
        self.terrain_cost_at(x, y) + self.vegetation_cost_at(x, y)
    }

    /// Mean cost over evenly spaced samples (endpoints included) along the
    /// straight segment, with integer-truncated sample coordinates.
    pub fn segment_avg_cost(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
        let mut total = 0.0;
        for i in 0..SEGMENT_SAMPLES {
            let t = i as f64 / (SEGMENT_SAMPLES - 1) as f64;
            let sx = (x1 + (x2 - x1) * t) as i32;
            let sy = (y1 + (y2 - y1) * t) as i32;
            total += self.cost_at(sx, sy);
        }
        total / SEGMENT_SAMPLES as f64
    }
}
