use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::Context;
use clap::Parser;
use log::info;

use pathtracer::progress::Progress;
use pathtracer::*;

mod cli;
mod logger;

use cli::{Args, SceneChoice};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.clone().into());

    let settings = args.settings()?;

    let world = match args.scene {
        SceneChoice::Final => scene::random_scene(&mut Sampler::new(settings.seed)),
        SceneChoice::Ground => scene::single_ground(),
    };
    info!("scene has {} objects", world.len());
    let camera = scene::demo_camera(settings.aspect());

    let progress = if args.no_progress {
        Progress::hidden()
    } else {
        Progress::stderr()
    };
    let image = render(&settings, &camera, &world, &progress)?;

    match &args.output {
        Some(path) => {
            info!("writing image to {}", path.display());
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_ppm(&mut BufWriter::new(file), &image)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => {
            info!("writing image to stdout");
            let stdout = io::stdout();
            write_ppm(&mut BufWriter::new(stdout.lock()), &image)
                .context("writing image to stdout")?;
        }
    }
    info!("done");
    Ok(())
}
