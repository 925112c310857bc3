use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATASET_PATH: &str = "data/emails.csv";
pub const DEFAULT_MODEL_DIR: &str = "trained_models";

/// Server settings. Each field can be overridden from the environment:
/// `SPAM_STUDIO_ADDR`, `SPAM_DATASET_PATH`, `SPAM_MODEL_DIR`.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioConfig {
    pub addr: String,
    pub dataset_path: PathBuf,
    pub model_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            addr: DEFAULT_ADDR.to_owned(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
        }
    }
}

impl StudioConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = StudioConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        StudioConfig {
            addr: non_empty("SPAM_STUDIO_ADDR").unwrap_or(defaults.addr),
            dataset_path: non_empty("SPAM_DATASET_PATH").map(PathBuf::from).unwrap_or(defaults.dataset_path),
            model_dir: non_empty("SPAM_MODEL_DIR").map(PathBuf::from).unwrap_or(defaults.model_dir),
        }
    }
}
