use anyhow::Result;
use clap::Parser;

use zedmap::{config::MapConfig, export, pipeline};

#[derive(Parser)]
#[command(name = "zedmap", about = "Layered raster map generator")]
struct Args {
    /// Path to a RON config file; defaults are used when omitted.
    #[arg(long)]
    config: Option<String>,

    /// Override the master seed from the config.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the output directory from the config.
    #[arg(long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut conf = match &args.config {
        Some(path) => {
            log::info!("loading config from {path}");
            MapConfig::from_file(path)?
        }
        None => {
            log::info!("using default config");
            MapConfig::default()
        }
    };
    if let Some(seed) = args.seed {
        conf.seed = seed;
    }
    if let Some(out) = args.out {
        conf.output_dir = out;
    }

    let (w, h) = conf.canvas_size()?;
    log::info!("generating {w}x{h} map, seed {}", conf.seed);

    let outputs = pipeline::generate(&conf)?;
    export::save_all(&conf, &outputs)?;

    log::info!("wrote rasters to {}", conf.output_dir);
    Ok(())
}
