use thiserror::Error;

/// Rejected network or training configuration.
///
/// Raised before any parameters are allocated, so a failed construction never
/// leaves a half-built network behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("hidden layer sizes must be specified")]
    EmptyHiddenLayers,
    #[error("hidden layer {index} has size {size}; all hidden layer sizes must be positive")]
    NonPositiveLayerSize { index: usize, size: i64 },
    #[error("invalid activation function '{0}'; valid options: SIGMOID, TANH, RELU, LEAKY_RELU")]
    UnknownActivation(String),
    #[error("learning rate must be a positive finite number, got {0}")]
    InvalidLearningRate(f64),
    #[error("network would need more than {limit} parameters")]
    TooManyParameters { limit: usize },
    #[error("input size must be positive")]
    ZeroInputSize,
    #[error("loss report interval must be at least 1")]
    InvalidReportInterval,
    #[error("train fraction must lie in (0, 1], got {0}")]
    InvalidTrainFraction(f64),
    #[error("parameter shapes do not match the architecture: {0}")]
    ParameterShape(String),
}

/// Dataset could not be read or has no usable structure.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("the dataset is empty or invalid")]
    Empty,
    #[error("no valid feature columns found in the dataset")]
    NoFeatureColumns,
    #[error("could not read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset is not valid UTF-8")]
    Utf8,
    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
    #[error("row {row}: {actual} features, expected {expected}")]
    WidthMismatch { row: usize, expected: usize, actual: usize },
}

/// Snapshot storage failure. A missing snapshot is not an error; stores
/// report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("model store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("model snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model snapshot is corrupt: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("incorrect feature vector size: expected {expected}, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[error("{0}")]
    InvalidSaveState(String),
    #[error("no trained model available")]
    NoTrainedModel,
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
