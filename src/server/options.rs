use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use crate::prelude::*;

#[derive(Clone, Debug, Parser)]
pub struct ServerOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    #[arg(short, long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = STEPS_PER_SECOND)]
    pub rate: u32,
}

impl ServerOptions {
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::default();
        config.rows = self.rows;
        config.steps_per_second = self.rate;
        config
    }

    /// A reproducible generator when a seed was given, otherwise one seeded by the OS.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_os_rng()
        }
    }
}
