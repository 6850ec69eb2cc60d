//! Dirt path generation: short A* walks between opposite canvas edges on a
//! coarsened grid, steered by the same cost model as road growth, drawn as
//! thin gravel strokes. Off by default (`num_dirt_paths = 0`).

use glam::IVec2;
use image::RgbaImage;
use pathfinding::prelude::astar;
use rand::Rng;
use rand_pcg::Pcg64Mcg;

use crate::config::RoadsConfig;
use crate::palette;
use crate::raster;
use super::costs::CostModel;

/// One search cell covers a 4x4 pixel block.
const CELL: i32 = 4;
const PATH_WIDTH: i32 = 2;
/// Paths give up on ground this expensive (water stays uncrossed).
const MAX_CELL_COST: f64 = 50.0;

pub fn generate_paths(
    rc: &RoadsConfig,
    width: u32,
    height: u32,
    model: &CostModel,
    roads: &mut RgbaImage,
    rng: &mut Pcg64Mcg,
) {
    let gw = (width as i32 / CELL).max(2);
    let gh = (height as i32 / CELL).max(2);

    for _ in 0..rc.num_dirt_paths {
        let (from, to) = endpoints(gw, gh, rng);

        let step_cost = |cell: IVec2| -> Option<u32> {
            let px = cell.x * CELL + CELL / 2;
            let py = cell.y * CELL + CELL / 2;
            let c = model.cost_at(px, py);
            if c > MAX_CELL_COST {
                return None;
            }
            Some(10 + (c * 10.0) as u32)
        };

        let result = astar(
            &from,
            |p| {
                let p = *p;
                let mut succ = Vec::with_capacity(8);
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let q = IVec2::new(p.x + dx, p.y + dy);
                        if q.x < 0 || q.y < 0 || q.x >= gw || q.y >= gh {
                            continue;
                        }
                        if let Some(c) = step_cost(q) {
                            succ.push((q, c));
                        }
                    }
                }
                succ
            },
            |p| ((p.x - to.x).abs() + (p.y - to.y).abs()) as u32,
            |p| *p == to,
        );

        if let Some((cells, _)) = result {
            let points: Vec<IVec2> = cells
                .iter()
                .map(|c| IVec2::new(c.x * CELL + CELL / 2, c.y * CELL + CELL / 2))
                .collect();
            raster::draw_polyline(roads, &points, palette::GRAVEL_DIRT, PATH_WIDTH);
        }
    }
}

/// Random start/goal cells on opposite edges of the coarse grid.
fn endpoints(gw: i32, gh: i32, rng: &mut Pcg64Mcg) -> (IVec2, IVec2) {
    if rng.gen::<f64>() < 0.5 {
        // left to right
        (
            IVec2::new(0, rng.gen_range(0..gh)),
            IVec2::new(gw - 1, rng.gen_range(0..gh)),
        )
    } else {
        // top to bottom
        (
            IVec2::new(rng.gen_range(0..gw), 0),
            IVec2::new(rng.gen_range(0..gw), gh - 1),
        )
    }
}
