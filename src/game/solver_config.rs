use serde::{Deserialize, Serialize};

use super::GameError;

/// Tolerance used for every sign and zero test of the pivoting algorithm. It decides both whether
/// a row takes part in the minimum ratio test and whether a ratio improves on the current
/// minimum, so results are only reproducible under the same value.
pub const DEFAULT_EPS: f64 = 1e-20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    pub eps: f64,
}

impl SolverConfig {
    pub fn new(eps: f64) -> Result<Self, GameError> {
        if !eps.is_finite() || eps <= 0. {
            return Err(GameError::InvalidTolerance(eps));
        }
        Ok(Self { eps })
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { eps: DEFAULT_EPS }
    }
}
