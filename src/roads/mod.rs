//! Road network grower. Each seed point starts an independent growth run for
//! one road class; runs are processed from an explicit work stack (branches
//! push new tasks instead of recursing), accepted segments accumulate into
//! polylines, and everything is drawn only after all runs complete.

pub mod costs;
pub mod dirt_paths;
pub mod patterns;
pub mod post;

use glam::IVec2;
use image::RgbaImage;
use rand::Rng;
use rand_pcg::Pcg64Mcg;

use crate::config::{AngleMode, MapConfig, RoadsConfig};
use crate::palette::{self, Rgb};
use crate::raster;
use crate::rng::RngSeq;
use costs::CostModel;

/// Candidate points this close to a canvas edge end the run.
pub const BOUNDARY_MARGIN: i32 = 3;
/// Hard iteration cap per run so pathological cost maps still terminate.
const MAX_SEGMENTS: u32 = 600;
const LOT_MARGIN: i32 = 5;
const LOT_OFFSET: f64 = 5.0;
/// Chance to keep the current heading in the grid angle modes.
const KEEP_HEADING_PROB: f64 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoadClass {
    Highway,
    Major,
    Main,
    Side,
}

impl RoadClass {
    pub fn color(self) -> Rgb {
        match self {
            RoadClass::Highway => palette::DARK_ASPHALT,
            RoadClass::Major => palette::MEDIUM_ASPHALT,
            RoadClass::Main => palette::LIGHT_ASPHALT,
            RoadClass::Side => palette::DIRT,
        }
    }

    pub fn stroke_width(self) -> i32 {
        match self {
            RoadClass::Highway => 7,
            RoadClass::Major => 6,
            RoadClass::Main => 5,
            RoadClass::Side => 3,
        }
    }

    /// Class used for branches spawned off this one.
    pub fn next_down(self) -> RoadClass {
        match self {
            RoadClass::Highway => RoadClass::Major,
            RoadClass::Major => RoadClass::Main,
            RoadClass::Main | RoadClass::Side => RoadClass::Side,
        }
    }

    fn len_range(self, rc: &RoadsConfig) -> (f64, f64) {
        match self {
            RoadClass::Highway => (rc.highway_min_len, rc.highway_max_len),
            RoadClass::Major => (rc.major_min_len, rc.major_max_len),
            RoadClass::Main => (rc.main_min_len, rc.main_max_len),
            RoadClass::Side => (rc.side_min_len, rc.side_max_len),
        }
    }
}

/// One pending growth run on the work stack.
struct GrowthTask {
    class: RoadClass,
    x: f64,
    y: f64,
    heading: f64,
    depth: u32,
}

/// Grow, then draw. Returns (roads overlay, lots overlay), both transparent
/// where nothing was stamped.
pub fn generate(
    conf: &MapConfig,
    terrain: &RgbaImage,
    vegetation: Option<&RgbaImage>,
    seq: &RngSeq,
) -> (RgbaImage, RgbaImage) {
    let (width, height) = terrain.dimensions();
    let rc = &conf.roads;

    let model = CostModel {
        terrain: Some(terrain),
        vegetation,
        ignore_water: rc.ignore_water,
        ignore_trees: rc.ignore_trees,
    };

    let mut roads = raster::new_transparent(width, height);
    let mut lots = raster::new_transparent(width, height);

    let mut rng = seq.stream("roads");
    let polylines = grow_network(rc, width, height, &model, &mut lots, &mut rng);
    for (class, points) in &polylines {
        if points.len() > 1 {
            raster::draw_polyline(&mut roads, points, class.color(), class.stroke_width());
        }
    }

    if rc.num_dirt_paths > 0 {
        let mut path_rng = seq.stream("dirt_paths");
        dirt_paths::generate_paths(rc, width, height, &model, &mut roads, &mut path_rng);
    }

    if rc.pothole_density > 0.0 {
        let mut pothole_rng = seq.stream("potholes");
        post::apply_potholes(&mut roads, rc.pothole_density, &mut pothole_rng);
    }

    (roads, lots)
}

/// Run every seeded growth task to completion and return the committed
/// polylines. Lots are stamped as a side effect of committed segments.
fn grow_network(
    rc: &RoadsConfig,
    width: u32,
    height: u32,
    model: &CostModel,
    lots: &mut RgbaImage,
    rng: &mut Pcg64Mcg,
) -> Vec<(RoadClass, Vec<IVec2>)> {
    let mut stack: Vec<GrowthTask> = Vec::new();
    let seeds = [
        (RoadClass::Highway, rc.num_highways),
        (RoadClass::Major, rc.num_majors),
        (RoadClass::Main, rc.num_mains),
        (RoadClass::Side, rc.num_sides),
    ];
    for (class, count) in seeds {
        for _ in 0..count {
            let (x, y, heading) = pick_edge_start(width, height, rng);
            stack.push(GrowthTask { class, x, y, heading, depth: 0 });
        }
    }

    let mut polylines = Vec::new();
    while let Some(task) = stack.pop() {
        let points = grow_run(&task, rc, width, height, model, lots, &mut stack, rng);
        polylines.push((task.class, points));
    }
    polylines
}

/// The per-run state machine: step, test bounds and cost, commit, maybe stamp
/// a lot, maybe push a branch task, turn.
fn grow_run(
    task: &GrowthTask,
    rc: &RoadsConfig,
    width: u32,
    height: u32,
    model: &CostModel,
    lots: &mut RgbaImage,
    stack: &mut Vec<GrowthTask>,
    rng: &mut Pcg64Mcg,
) -> Vec<IVec2> {
    let (min_len, max_len) = task.class.len_range(rc);
    let (w, h) = (width as i32, height as i32);
    let inside = |x: f64, y: f64, margin: i32| {
        let (xi, yi) = (x as i32, y as i32);
        xi >= margin && yi >= margin && xi < w - margin && yi < h - margin
    };

    let mut angle = patterns::snap_angle(task.heading, rc.mode);
    let (mut x, mut y) = (task.x, task.y);
    let mut points = vec![IVec2::new(x as i32, y as i32)];

    for _ in 0..MAX_SEGMENTS {
        let seg_len = rng.gen_range(min_len..=max_len);
        let rad = angle.to_radians();
        let nx = x + rad.cos() * seg_len;
        let ny = y + rad.sin() * seg_len;

        // terminal: ran into the boundary margin
        if !inside(nx, ny, BOUNDARY_MARGIN) {
            break;
        }
        // reject: segment crosses ground too expensive to pave
        if model.segment_avg_cost(x, y, nx, ny) > rc.max_segment_cost {
            break;
        }

        points.push(IVec2::new(nx as i32, ny as i32));

        if rng.gen::<f64>() < rc.lot_spawn_chance {
            let lw = rng.gen_range(rc.lot_min_w..=rc.lot_max_w);
            let lh = rng.gen_range(rc.lot_min_h..=rc.lot_max_h);
            let lx = (nx + LOT_OFFSET) as i32;
            let ly = (ny + LOT_OFFSET) as i32;
            if raster::in_bounds(lots, lx, ly, LOT_MARGIN) {
                post::add_lot_rect(lots, IVec2::new(lx, ly), lw, lh);
            }
        }

        if task.depth < rc.max_branch_depth && rng.gen::<f64>() < rc.branch_prob {
            let turn = if rng.gen::<f64>() < 0.5 { -90.0 } else { 90.0 };
            let branch_heading = match rc.mode {
                AngleMode::Free => (angle + turn).rem_euclid(360.0),
                _ => patterns::snap_angle(angle + turn, rc.mode),
            };
            stack.push(GrowthTask {
                class: task.class.next_down(),
                x: nx,
                y: ny,
                heading: branch_heading,
                depth: task.depth + 1,
            });
        }

        x = nx;
        y = ny;

        angle = match rc.mode {
            AngleMode::Free => {
                let mut jitter = rng.gen_range(rc.min_turn..=rc.max_turn);
                if rng.gen::<f64>() < 0.5 {
                    jitter = -jitter;
                }
                patterns::snap_angle(angle + jitter, rc.mode)
            }
            AngleMode::Ortho => {
                if rng.gen::<f64>() < KEEP_HEADING_PROB {
                    angle
                } else {
                    let turn = if rng.gen::<f64>() < 0.5 { -90.0 } else { 90.0 };
                    patterns::snap_angle(angle + turn, rc.mode)
                }
            }
            AngleMode::Ortho45 => {
                if rng.gen::<f64>() < KEEP_HEADING_PROB {
                    angle
                } else {
                    let turns = [-90.0, -45.0, 45.0, 90.0];
                    let turn = turns[rng.gen_range(0..turns.len())];
                    patterns::snap_angle(angle + turn, rc.mode)
                }
            }
        };
    }

    points
}

/// Uniformly random point on a uniformly random canvas edge, kept inside the
/// boundary margin, heading pointing inward.
fn pick_edge_start(width: u32, height: u32, rng: &mut Pcg64Mcg) -> (f64, f64, f64) {
    let m = BOUNDARY_MARGIN;
    let (w, h) = (width as i32, height as i32);
    let x_span = m..(w - m).max(m + 1);
    let y_span = m..(h - m).max(m + 1);
    match rng.gen_range(0..4) {
        0 => (rng.gen_range(x_span) as f64, m as f64, 90.0), // top, growing down
        1 => (rng.gen_range(x_span) as f64, (h - 1 - m) as f64, 270.0), // bottom, growing up
        2 => (m as f64, rng.gen_range(y_span) as f64, 0.0), // left, growing right
        _ => ((w - 1 - m) as f64, rng.gen_range(y_span) as f64, 180.0), // right, growing left
    }
}
