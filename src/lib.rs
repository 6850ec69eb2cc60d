//! zedmap generates a layered raster map for a tile-based world: a noise
//! classified terrain base, a vegetation density overlay, and a cost-guided
//! branching road network with lots and potholes. Everything is driven by a
//! single master seed; the same seed and config reproduce the same rasters.

pub mod config;
pub mod error;
pub mod export;
pub mod field;
pub mod palette;
pub mod pipeline;
pub mod raster;
pub mod rng;
pub mod roads;
pub mod terrain;
pub mod vegetation;

pub use config::MapConfig;
pub use error::Error;
pub use pipeline::{generate, MapOutputs};
