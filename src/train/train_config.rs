use crate::error::ConfigError;

/// Loss is reported every this many epochs unless configured otherwise.
pub const DEFAULT_REPORT_INTERVAL: usize = 5;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`          — full passes over the training data; 0 is allowed
/// - `report_interval` — an `EpochLoss` is kept for epoch 0, every multiple
///                       of this, and the final epoch
/// - `shuffle_seed`    — seeds the per-epoch sample shuffle; `None` draws
///                       from OS entropy, making sample order vary per run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub report_interval: usize,
    pub shuffle_seed: Option<u64>,
}

impl TrainConfig {
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            report_interval: DEFAULT_REPORT_INTERVAL,
            shuffle_seed: None,
        }
    }

    pub fn with_report_interval(mut self, interval: usize) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_interval == 0 {
            return Err(ConfigError::InvalidReportInterval);
        }
        Ok(())
    }

    /// Whether `epoch` produces an `EpochLoss` record.
    pub fn is_reported(&self, epoch: usize) -> bool {
        epoch == 0 || epoch % self.report_interval == 0 || epoch + 1 == self.epochs
    }
}
