use serde::{Deserialize, Serialize};

/// Mean squared training error of one reported epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLoss {
    /// 0-based epoch index.
    pub epoch: usize,
    pub loss: f64,
}
