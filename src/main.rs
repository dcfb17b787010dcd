use std::path::PathBuf;

use aion::{SceneConfig, ViewerError};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Particle shape morphing scene with turbo and scan sequences.
#[derive(Parser, Debug)]
#[command(name = "aion", version, about)]
struct Cli {
    /// JSON scene configuration; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of points in the main cloud
    #[arg(long)]
    particles: Option<usize>,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Shape shown first (e.g. sphere, torus, lorenz)
    #[arg(long)]
    shape: Option<String>,
}

impl Cli {
    fn scene_config(&self) -> Result<SceneConfig, ViewerError> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };
        if let Some(count) = self.particles {
            config.particle_count = count;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(shape) = &self.shape {
            config.initial_shape = shape.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), ViewerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aion=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.scene_config()?;
    tracing::info!(
        particles = config.particle_count,
        shape = %config.initial_shape,
        "starting viewer"
    );
    aion::run(config)
}
