use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ConfigError, DatasetError};

/// Seed of the train/test shuffle. Independent of any per-epoch shuffle.
pub const DEFAULT_SPLIT_SEED: u64 = 42;
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Requires one label per row and exactly `width` features in every row.
pub(crate) fn check_rows(features: &[Vec<f64>], labels: &[u8], width: usize) -> Result<(), DatasetError> {
    if features.len() != labels.len() {
        return Err(DatasetError::LengthMismatch { features: features.len(), labels: labels.len() });
    }
    if let Some((row, r)) = features.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(DatasetError::WidthMismatch { row, expected: width, actual: r.len() });
    }
    Ok(())
}

/// A numeric feature matrix with binary labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<u8>,
    feature_names: Vec<String>,
}

/// Train and test partitions of a `Dataset`.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit {
    pub train_features: Vec<Vec<f64>>,
    pub train_labels: Vec<u8>,
    pub test_features: Vec<Vec<f64>>,
    pub test_labels: Vec<u8>,
}

impl Dataset {
    /// Checks that there is one label per row and every row has the same
    /// width. Feature names default to `f0`, `f1`, …
    pub fn from_parts(features: Vec<Vec<f64>>, labels: Vec<u8>) -> Result<Dataset, DatasetError> {
        let width = features.first().map(Vec::len).ok_or(DatasetError::Empty)?;
        if width == 0 {
            return Err(DatasetError::NoFeatureColumns);
        }
        check_rows(&features, &labels, width)?;
        let feature_names = (0..width).map(|i| format!("f{}", i)).collect();
        Ok(Dataset { features, labels, feature_names })
    }

    /// Replaces the column names; ignored unless there is one per feature.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Dataset {
        if names.len() == self.feature_count() {
            self.feature_names = names;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn positive_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }

    /// Shuffles row indices with `seed` and puts the first
    /// `floor(len · train_fraction)` rows in the training partition.
    pub fn split(&self, train_fraction: f64, seed: u64) -> Result<DatasetSplit, ConfigError> {
        if !(train_fraction > 0.0 && train_fraction <= 1.0) {
            return Err(ConfigError::InvalidTrainFraction(train_fraction));
        }
        let n = self.len();
        let train_size = (n as f64 * train_fraction) as usize;

        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut StdRng::seed_from_u64(seed));
        let (train_idx, test_idx) = indices.split_at(train_size);

        let pick = |idx: &[usize]| -> (Vec<Vec<f64>>, Vec<u8>) {
            idx.iter().map(|&i| (self.features[i].clone(), self.labels[i])).unzip()
        };
        let (train_features, train_labels) = pick(train_idx);
        let (test_features, test_labels) = pick(test_idx);

        Ok(DatasetSplit { train_features, train_labels, test_features, test_labels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Dataset {
        let features = (0..n).map(|i| vec![i as f64]).collect();
        let labels = (0..n).map(|i| (i % 2) as u8).collect();
        Dataset::from_parts(features, labels).unwrap()
    }

    #[test]
    fn eighty_twenty_split_partitions_rows() {
        let ds = dataset(11);
        let split = ds.split(DEFAULT_TRAIN_FRACTION, DEFAULT_SPLIT_SEED).unwrap();
        assert_eq!(split.train_features.len(), 8);
        assert_eq!(split.test_features.len(), 3);

        let mut seen: Vec<f64> = split.train_features.iter().chain(&split.test_features).map(|r| r[0]).collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..11).map(|i| i as f64).collect::<Vec<_>>());

        for (x, &y) in split.train_features.iter().zip(&split.train_labels) {
            assert_eq!((x[0] as usize % 2) as u8, y);
        }
    }

    #[test]
    fn split_is_deterministic_per_seed() {
        let ds = dataset(30);
        assert_eq!(ds.split(0.8, 42).unwrap(), ds.split(0.8, 42).unwrap());
        assert_ne!(ds.split(0.8, 42).unwrap(), ds.split(0.8, 43).unwrap());
    }

    #[test]
    fn rejects_bad_fraction_and_shapes() {
        let ds = dataset(4);
        assert_eq!(ds.split(0.0, 1), Err(ConfigError::InvalidTrainFraction(0.0)));
        assert!(matches!(
            Dataset::from_parts(vec![vec![1.0], vec![1.0, 2.0]], vec![0, 1]),
            Err(DatasetError::WidthMismatch { row: 1, expected: 1, actual: 2 })
        ));
        assert!(matches!(
            Dataset::from_parts(vec![vec![1.0]], vec![0, 1]),
            Err(DatasetError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn counts_positives() {
        assert_eq!(dataset(7).positive_count(), 3);
    }
}
