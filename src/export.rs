//! PNG export: writes each generated raster under its configured name and a
//! composite preview (terrain, then vegetation, then roads).

use std::fs;
use std::path::Path;

use crate::config::MapConfig;
use crate::error::Error;
use crate::pipeline::MapOutputs;
use crate::raster;

pub fn save_all(conf: &MapConfig, out: &MapOutputs) -> Result<(), Error> {
    let dir = Path::new(&conf.output_dir);
    fs::create_dir_all(dir)?;

    if let Some(img) = &out.terrain {
        img.save(dir.join(&conf.export.terrain_png))?;
    }
    if let Some(img) = &out.vegetation {
        img.save(dir.join(&conf.export.vegetation_png))?;
    }
    if let Some(img) = &out.roads {
        img.save(dir.join(&conf.export.roads_png))?;
    }
    if let Some(img) = &out.lots {
        img.save(dir.join(&conf.export.lots_png))?;
    }

    if let Some(base) = &out.terrain {
        let mut preview = base.clone();
        if let Some(veg) = &out.vegetation {
            raster::composite_over(&mut preview, veg);
        }
        if let Some(roads) = &out.roads {
            raster::composite_over(&mut preview, roads);
        }
        preview.save(dir.join(&conf.export.preview_png))?;
    }

    Ok(())
}
