//! Core registry configuration parameters.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Core system configuration parameters.
#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CoreConfig {
    /// Allocation registry settings.
    #[validate(nested)]
    pub registry: RegistryConfig,
}

/// Allocation registry configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct RegistryConfig {
    /// Slot capacity reserved at registry construction. Purely a growth
    /// hint; the registry appends past it on demand.
    #[serde(default = "default_initial_slots")]
    #[validate(range(max = 1048576))]
    pub initial_slots: usize,
}

fn default_initial_slots() -> usize {
    64
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_slots: default_initial_slots(),
        }
    }
}
