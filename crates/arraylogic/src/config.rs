use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Host-side settings for the array engine.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogicConfig {
    /// Maximum number of arrays an `ArrayBank` holds.
    pub bank_capacity: usize,
    /// Default resize mode when a host does not specify one.
    pub lossless_resize: bool,
    /// Seed for shuffles. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for LogicConfig {
    fn default() -> Self {
        Self {
            bank_capacity: 8,
            lossless_resize: false,
            seed: None,
        }
    }
}

impl LogicConfig {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
