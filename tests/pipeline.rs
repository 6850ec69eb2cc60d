use std::env;
use std::fs;

use zedmap::config::MapConfig;
use zedmap::{export, palette, pipeline};

fn small_config(seed: u64) -> MapConfig {
    let mut conf = MapConfig::default();
    conf.seed = seed;
    conf.canvas.cell_size = 150;
    conf
}

#[test]
fn default_map_contains_terrain_bands_and_roads() {
    let out = pipeline::generate(&small_config(12345)).unwrap();

    let terrain = out.terrain.unwrap();
    let has = |c: [u8; 3]| terrain.pixels().any(|p| [p[0], p[1], p[2]] == c);
    assert!(has(palette::WATER), "default thresholds should produce water");
    assert!(
        has(palette::DARK_GRASS) || has(palette::MED_GRASS) || has(palette::LIGHT_GRASS),
        "default thresholds should produce grass"
    );

    let roads = out.roads.unwrap();
    let road_colors = [
        palette::DARK_ASPHALT,
        palette::MEDIUM_ASPHALT,
        palette::LIGHT_ASPHALT,
        palette::DIRT,
        palette::DARK_POTHOLE,
        palette::LIGHT_POTHOLE,
    ];
    let mut drawn = 0;
    for p in roads.pixels() {
        if p[3] != 0 {
            drawn += 1;
            assert!(
                road_colors.contains(&[p[0], p[1], p[2]]),
                "road overlay contains a non-road color"
            );
        }
    }
    assert!(drawn > 0, "edge-seeded growth should draw at least one run");
}

#[test]
fn different_seeds_diverge() {
    let a = pipeline::generate(&small_config(1)).unwrap();
    let b = pipeline::generate(&small_config(2)).unwrap();
    assert_ne!(
        a.terrain.unwrap().as_raw(),
        b.terrain.unwrap().as_raw(),
        "terrain must depend on the master seed"
    );
    assert_ne!(
        a.roads.unwrap().as_raw(),
        b.roads.unwrap().as_raw(),
        "roads must depend on the master seed"
    );
}

#[test]
fn vegetation_stays_off_water_through_the_pipeline() {
    let mut conf = small_config(7);
    conf.vegetation.respect_terrain = true;
    let out = pipeline::generate(&conf).unwrap();

    let terrain = out.terrain.unwrap();
    let veg = out.vegetation.unwrap();
    for (x, y, p) in terrain.enumerate_pixels() {
        if [p[0], p[1], p[2]] == palette::WATER {
            let v = veg.get_pixel(x, y);
            assert_eq!(
                [v[0], v[1], v[2]],
                palette::VEG_NONE,
                "water pixel ({x},{y}) carries vegetation"
            );
        }
    }
}

#[test]
fn save_all_writes_every_configured_file() {
    let dir = env::temp_dir().join(format!("zedmap-test-{}", std::process::id()));
    let mut conf = small_config(3);
    conf.output_dir = dir.to_string_lossy().into_owned();

    let out = pipeline::generate(&conf).unwrap();
    export::save_all(&conf, &out).unwrap();

    for name in [
        &conf.export.terrain_png,
        &conf.export.vegetation_png,
        &conf.export.roads_png,
        &conf.export.lots_png,
        &conf.export.preview_png,
    ] {
        assert!(dir.join(name).is_file(), "missing export {name}");
    }

    fs::remove_dir_all(&dir).unwrap();
}
