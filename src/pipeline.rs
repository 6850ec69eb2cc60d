//! Pipeline orchestration. Single-threaded and synchronous: each stage owns
//! its raster outright and hands a read-only view to the next. All
//! randomness comes from per-stage streams derived from the master seed, so
//! one seed reproduces the full output byte for byte.

use image::RgbaImage;

use crate::config::MapConfig;
use crate::error::Error;
use crate::rng::RngSeq;
use crate::{roads, terrain, vegetation};

/// Up to four same-sized rasters; a stage disabled in config stays `None`.
#[derive(Debug, Default)]
pub struct MapOutputs {
    pub terrain: Option<RgbaImage>,
    pub vegetation: Option<RgbaImage>,
    pub roads: Option<RgbaImage>,
    pub lots: Option<RgbaImage>,
}

pub fn generate(conf: &MapConfig) -> Result<MapOutputs, Error> {
    let (width, height) = conf.canvas_size()?;
    let seq = RngSeq::new(conf.seed);

    let mut out = MapOutputs::default();

    if conf.terrain.enabled {
        let mut rng = seq.stream("terrain_post");
        out.terrain = Some(terrain::generate(conf, width, height, &mut rng));
    }

    if conf.vegetation.enabled {
        out.vegetation = Some(vegetation::generate(conf, width, height, out.terrain.as_ref()));
    }

    if conf.roads.enabled {
        // roads take their canvas from the terrain raster; never guess a size
        let terrain_raster = out.terrain.as_ref().ok_or(Error::MissingTerrain)?;
        let (road_img, lots_img) =
            roads::generate(conf, terrain_raster, out.vegetation.as_ref(), &seq);
        out.roads = Some(road_img);
        out.lots = Some(lots_img);
    }

    Ok(out)
}
