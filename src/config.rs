//! One fully-defaulted configuration structure for the whole pipeline.
//! Every field has a documented default; unknown fields in a config file are
//! ignored. Defaults are resolved here and in the per-stage presets, never
//! re-derived deep inside an algorithm.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Error;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub seed: u64,
    pub output_dir: String,
    pub canvas: CanvasConfig,
    pub terrain: TerrainConfig,
    pub vegetation: VegetationConfig,
    pub roads: RoadsConfig,
    pub export: ExportConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            output_dir: "output".into(),
            canvas: CanvasConfig::default(),
            terrain: TerrainConfig::default(),
            vegetation: VegetationConfig::default(),
            roads: RoadsConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let s = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&s)?)
    }

    /// Canvas dimensions in pixels, validated once at the pipeline boundary.
    pub fn canvas_size(&self) -> Result<(u32, u32), Error> {
        let width = self.canvas.cell_size * self.canvas.cells_x;
        let height = self.canvas.cell_size * self.canvas.cells_y;
        if width == 0 || height == 0 {
            return Err(Error::InvalidCanvas { width, height });
        }
        Ok((width, height))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub cells_x: u32,
    pub cells_y: u32,
    pub cell_size: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { cells_x: 1, cells_y: 1, cell_size: 300 }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub enabled: bool,
    pub preset: String,
    /// Explicit values override the preset field-by-field.
    pub scale: Option<f64>,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
    pub water_threshold: Option<f64>,
    pub dark_threshold: Option<f64>,
    pub medium_threshold: Option<f64>,
    /// Non-empty list switches the synthesizer into layer mode.
    pub layers: Vec<LayerConfig>,
    pub transform: TransformConfig,
    pub postprocess: TerrainPostConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preset: "default".into(),
            scale: None,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
            water_threshold: None,
            dark_threshold: None,
            medium_threshold: None,
            layers: Vec::new(),
            transform: TransformConfig::default(),
            postprocess: TerrainPostConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub name: String,
    pub color: [u8; 4],
    pub scale: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub lacunarity: f64,
    /// Explicit seed; otherwise derived from the master seed + layer name.
    pub seed: Option<u32>,
    pub threshold: f64,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: "layer".into(),
            color: [255, 0, 255, 255],
            scale: 60.0,
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: None,
            threshold: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Integer degrees, nearest-neighbor, canvas size preserved.
    pub rotation: i32,
    /// Toroidal pixel shift, applied after rotation.
    pub offset_x: i32,
    pub offset_y: i32,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainPostConfig {
    pub edge_ragging: bool,
    pub speckle: bool,
    pub erosion: bool,
    pub strength: f64,
    /// Switches to the palette-aware pass set (same three toggles apply).
    pub palette_aware: bool,
}

impl Default for TerrainPostConfig {
    fn default() -> Self {
        Self { edge_ragging: true, speckle: true, erosion: true, strength: 0.6, palette_aware: false }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationConfig {
    pub enabled: bool,
    pub preset: String,
    pub scale: Option<f64>,
    pub octaves: Option<usize>,
    pub persistence: Option<f64>,
    pub lacunarity: Option<f64>,
    /// No vegetation on water or asphalt.
    pub respect_terrain: bool,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            preset: "overgrown".into(),
            scale: None,
            octaves: None,
            persistence: None,
            lacunarity: None,
            respect_terrain: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    Free,
    Ortho,
    Ortho45,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadsConfig {
    pub enabled: bool,
    pub mode: AngleMode,
    pub num_highways: u32,
    pub num_majors: u32,
    pub num_mains: u32,
    pub num_sides: u32,
    pub branch_prob: f64,
    pub max_branch_depth: u32,
    pub highway_min_len: f64,
    pub highway_max_len: f64,
    pub major_min_len: f64,
    pub major_max_len: f64,
    pub main_min_len: f64,
    pub main_max_len: f64,
    pub side_min_len: f64,
    pub side_max_len: f64,
    pub min_turn: f64,
    pub max_turn: f64,
    pub max_segment_cost: f64,
    pub pothole_density: f64,
    pub lot_spawn_chance: f64,
    pub lot_min_w: i32,
    pub lot_max_w: i32,
    pub lot_min_h: i32,
    pub lot_max_h: i32,
    pub ignore_water: bool,
    pub ignore_trees: bool,
    pub num_dirt_paths: u32,
}

impl Default for RoadsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mode: AngleMode::Ortho45,
            num_highways: 2,
            num_majors: 3,
            num_mains: 6,
            num_sides: 12,
            branch_prob: 0.15,
            max_branch_depth: 3,
            highway_min_len: 120.0,
            highway_max_len: 240.0,
            major_min_len: 90.0,
            major_max_len: 180.0,
            main_min_len: 70.0,
            main_max_len: 140.0,
            side_min_len: 40.0,
            side_max_len: 90.0,
            min_turn: 10.0,
            max_turn: 35.0,
            max_segment_cost: 3.0,
            pothole_density: 0.02,
            lot_spawn_chance: 0.25,
            lot_min_w: 16,
            lot_max_w: 40,
            lot_min_h: 16,
            lot_max_h: 40,
            ignore_water: false,
            ignore_trees: false,
            num_dirt_paths: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub terrain_png: String,
    pub vegetation_png: String,
    pub roads_png: String,
    pub lots_png: String,
    pub preview_png: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            terrain_png: "terrain.png".into(),
            vegetation_png: "vegetation.png".into(),
            roads_png: "roads.png".into(),
            lots_png: "lots.png".into(),
            preview_png: "preview.png".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = MapConfig::default();
        assert_eq!(c.seed, 12345);
        assert_eq!(c.canvas_size().unwrap(), (300, 300));
        assert_eq!(c.roads.mode, AngleMode::Ortho45);
        assert_eq!(c.roads.max_branch_depth, 3);
        assert!(c.terrain.layers.is_empty());
    }

    #[test]
    fn partial_ron_fills_defaults_and_ignores_unknown_sections() {
        let src = r#"(
            seed: 7,
            canvas: (cell_size: 100),
            roads: (enabled: false, mode: ortho),
            not_a_real_section: 42,
        )"#;
        let c: MapConfig = ron::from_str(src).unwrap();
        assert_eq!(c.seed, 7);
        assert_eq!(c.canvas_size().unwrap(), (100, 100));
        assert!(!c.roads.enabled);
        assert_eq!(c.roads.mode, AngleMode::Ortho);
        assert_eq!(c.roads.num_highways, 2);
        assert!(c.terrain.enabled);
    }

    #[test]
    fn zero_canvas_is_a_configuration_error() {
        let mut c = MapConfig::default();
        c.canvas.cells_x = 0;
        assert!(c.canvas_size().is_err());
    }
}
