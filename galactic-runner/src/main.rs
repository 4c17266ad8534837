//! Galactic scene runner
//!
//! Loads a scene config from JSON, generates the galaxy, steps the solar
//! system for a number of frames and writes the result.
//!
//! With `--out`, writes `snapshot.json` and one PNG per cached texture (plus
//! `sun-glow.png`) into DIR. Without it, prints the snapshot to stdout.
//! Set `RUST_LOG=debug` for generation details.

use clap::Parser;
use galactic::prelude::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "galactic-runner")]
#[command(about = "Generate a spiral galaxy and step the solar system through it")]
struct Args {
    /// Scene config (JSON). Defaults are used when omitted or unreadable.
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    delta: f64,

    /// Seed override for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for snapshot.json and texture PNGs
    #[arg(long)]
    out: Option<PathBuf>,
}

fn load_config(args: &Args) -> SceneConfig {
    let mut config = match &args.config {
        Some(path) => match SceneConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to load config from {:?}: {}", path, e);
                log::warn!("Using default configuration.");
                SceneConfig::default()
            }
        },
        None => {
            log::info!("No config file specified, using defaults.");
            SceneConfig::default()
        }
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Err(e) = config.validate() {
        log::warn!("Config is out of range: {}", e);
    }
    config
}

fn write_output(scene: &Scene, out: &Path) -> Result<(), ExportError> {
    std::fs::create_dir_all(out)?;

    scene.snapshot(true).save(out.join("snapshot.json"))?;
    let written = scene.galaxy().textures().save_pngs(out)?;
    scene.solar_system().glow().save_png(out.join("sun-glow.png"))?;

    log::info!("Wrote snapshot and {} textures to {:?}", written + 1, out);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let config = load_config(&args);
    let mut scene = Scene::new(config);

    for _ in 0..args.frames {
        scene.update(args.delta);
    }

    let clock = scene.solar_system().clock();
    log::info!(
        "Ran {} frames: {:.2}s elapsed, {:.2} Myr simulated",
        clock.frame(),
        clock.elapsed(),
        clock.simulated_myr()
    );

    match &args.out {
        Some(out) => {
            if let Err(e) = write_output(&scene, out) {
                log::error!("Failed to write output: {}", e);
                return ExitCode::FAILURE;
            }
        }
        None => match serde_json::to_string_pretty(&scene.snapshot(false)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["galactic-runner"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(args.frames, 600);
        assert_eq!(args.delta, 1.0 / 60.0);
        assert!(args.seed.is_none());
        assert!(args.out.is_none());
    }

    #[test]
    fn test_equals_form_and_positional_config() {
        let args = Args::try_parse_from([
            "galactic-runner",
            "--frames=10",
            "--delta",
            "0.5",
            "--seed=7",
            "scene.json",
            "--out",
            "out",
        ])
        .unwrap();
        assert_eq!(args.frames, 10);
        assert_eq!(args.delta, 0.5);
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.config, Some(PathBuf::from("scene.json")));
        assert_eq!(args.out, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        assert!(Args::try_parse_from(["galactic-runner", "--frames", "many"]).is_err());
        assert!(Args::try_parse_from(["galactic-runner", "--bogus"]).is_err());
    }

    #[test]
    fn test_seed_overrides_config() {
        let args = Args::try_parse_from(["galactic-runner", "--seed", "99"]).unwrap();
        assert_eq!(load_config(&args).seed, Some(99));
    }
}
