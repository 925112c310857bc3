use log::{info, warn};

use crate::activation::ActivationFunction;
use crate::data::dataset::{Dataset, DEFAULT_SPLIT_SEED, DEFAULT_TRAIN_FRACTION};
use crate::error::{ClassifierError, Result};
use crate::eval::metrics::TrainingMetrics;
use crate::network::config::{hidden_sizes_from_signed, NetworkConfig};
use crate::network::network::Network;
use crate::network::summary::ArchitectureSummary;
use crate::persist::snapshot::PersistedModel;
use crate::persist::store::ModelStore;
use crate::service::dto::{Prediction, TrainingReport, TrainingRequest};
use crate::text::vectorizer::Vectorizer;
use crate::train::session::train;
use crate::train::train_config::TrainConfig;

/// The network produced by the latest successful training run.
#[derive(Debug, Clone)]
struct TrainedModel {
    network: Network,
    metrics: TrainingMetrics,
}

/// Trains, serves and persists the spam classifier.
///
/// The service owns the current model outright; it is replaced wholesale by
/// each successful `train` call and never mutated in place. Callers sharing
/// a service across threads serialise access themselves (the studio keeps it
/// behind a mutex).
pub struct ClassifierService<S: ModelStore> {
    store: S,
    vectorizer: Vectorizer,
    current: Option<TrainedModel>,
}

impl<S: ModelStore> ClassifierService<S> {
    pub fn new(store: S, vectorizer: Vectorizer) -> Self {
        ClassifierService { store, vectorizer, current: None }
    }

    /// Validates `request`, splits `dataset` 80/20 and trains a new network.
    ///
    /// On success the new network becomes the current model and the
    /// vectorizer switches to the dataset's vocabulary. On failure the
    /// previous model is kept.
    pub fn train(&mut self, request: &TrainingRequest, dataset: &Dataset) -> Result<TrainingReport> {
        let hidden = hidden_sizes_from_signed(&request.hidden_sizes)?;
        let activation: ActivationFunction = request.activation_function.parse()?;

        let mut config = NetworkConfig::new(dataset.feature_count(), hidden, request.learning_rate, activation);
        if let Some(seed) = request.seed {
            config = config.with_seed(seed);
        }
        config.validate()?;

        let mut train_config = TrainConfig::new(request.epochs);
        if let Some(interval) = request.report_interval {
            train_config = train_config.with_report_interval(interval);
        }
        if let Some(seed) = request.shuffle_seed {
            train_config = train_config.with_shuffle_seed(seed);
        }
        train_config.validate()?;

        let split = dataset.split(DEFAULT_TRAIN_FRACTION, DEFAULT_SPLIT_SEED)?;
        let outcome = train(
            config,
            &split.train_features,
            &split.train_labels,
            &split.test_features,
            &split.test_labels,
            &train_config,
        )?;

        let message = format!(
            "Model trained successfully with {} hidden layers using {} activation",
            outcome.metrics.num_hidden_layers, activation
        );
        let report = TrainingReport {
            status: "success",
            message,
            metrics: outcome.metrics.clone(),
            epoch_losses: outcome.loss_history,
        };

        self.vectorizer = Vectorizer::from_dataset(dataset);
        self.current = Some(TrainedModel { network: outcome.network, metrics: outcome.metrics });
        Ok(report)
    }

    pub fn predict_text(&self, text: &str) -> Result<Prediction> {
        self.predict_features(&self.vectorizer.vectorize(text))
    }

    pub fn predict_features(&self, features: &[f64]) -> Result<Prediction> {
        let model = self.current.as_ref().ok_or(ClassifierError::NoTrainedModel)?;
        let probability = model.network.predict(features)?;
        Ok(Prediction::from_probability(probability, network_info("Network", &model.network)))
    }

    /// `Ok(None)` when no model has been saved.
    pub fn predict_pretrained_text(&self, text: &str) -> Result<Option<Prediction>> {
        self.predict_pretrained_features(&self.vectorizer.vectorize(text))
    }

    pub fn predict_pretrained_features(&self, features: &[f64]) -> Result<Option<Prediction>> {
        let Some(network) = self.load_pretrained()? else {
            return Ok(None);
        };
        let probability = network.predict(features)?;
        Ok(Some(Prediction::from_probability(probability, network_info("Pretrained network", &network))))
    }

    /// Reconstructs the saved network for inference.
    pub fn load_pretrained(&self) -> Result<Option<Network>> {
        match self.store.load()? {
            Some(snapshot) => Ok(Some(snapshot.to_network()?)),
            None => Ok(None),
        }
    }

    pub fn last_metrics(&self) -> Option<&TrainingMetrics> {
        self.current.as_ref().map(|m| &m.metrics)
    }

    pub fn pretrained_metrics(&self) -> Result<Option<TrainingMetrics>> {
        Ok(self.store.load()?.map(|s| s.metrics))
    }

    pub fn model_info(&self) -> Result<ArchitectureSummary> {
        self.current
            .as_ref()
            .map(|m| m.network.describe())
            .ok_or(ClassifierError::NoTrainedModel)
    }

    pub fn pretrained_model_info(&self) -> Result<Option<ArchitectureSummary>> {
        Ok(self.store.load()?.map(|s| ArchitectureSummary {
            input_size: s.input_size,
            num_hidden_layers: s.hidden_sizes.len(),
            hidden_layer_sizes: s.hidden_sizes,
            activation_function: s.activation_function,
            learning_rate: s.learning_rate,
        }))
    }

    pub fn activation_functions() -> Vec<&'static str> {
        ActivationFunction::ALL.iter().map(ActivationFunction::name).collect()
    }

    /// Persists the current model, replacing any earlier snapshot.
    pub fn save_pretrained(&self) -> Result<()> {
        let Some(model) = self.current.as_ref() else {
            warn!("save requested with no trained model");
            return Err(ClassifierError::InvalidSaveState(
                "No trained model or metrics available to save".to_owned(),
            ));
        };
        self.store.save(&PersistedModel::capture(&model.network, model.metrics.clone()))?;
        info!("pretrained model replaced");
        Ok(())
    }
}

fn network_info(label: &str, network: &Network) -> String {
    format!(
        "{}: {} layers, activation {}",
        label,
        network.num_hidden_layers(),
        network.activation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::persist::store::MemoryStore;

    fn dataset() -> Dataset {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..40 {
            let spam = i % 2 == 0;
            let f = i as f64 / 40.0;
            features.push(if spam { vec![2.0 + f, 0.0, 1.0] } else { vec![0.0, 2.0 + f, 1.0] });
            labels.push(u8::from(spam));
        }
        Dataset::from_parts(features, labels)
            .unwrap()
            .with_feature_names(vec!["free".into(), "meeting".into(), "the".into()])
    }

    fn request(hidden: Vec<i64>, activation: &str, epochs: usize) -> TrainingRequest {
        TrainingRequest {
            hidden_sizes: hidden,
            activation_function: activation.into(),
            learning_rate: 0.5,
            epochs,
            report_interval: None,
            shuffle_seed: Some(5),
            seed: None,
        }
    }

    fn service() -> ClassifierService<MemoryStore> {
        ClassifierService::new(MemoryStore::new(), Vectorizer::new(Vec::new()))
    }

    #[test]
    fn nothing_available_before_training() {
        let svc = service();
        assert!(matches!(svc.predict_text("free"), Err(ClassifierError::NoTrainedModel)));
        assert!(matches!(svc.model_info(), Err(ClassifierError::NoTrainedModel)));
        assert!(svc.last_metrics().is_none());
        assert!(svc.pretrained_metrics().unwrap().is_none());
        assert!(svc.predict_pretrained_text("free").unwrap().is_none());
        assert!(matches!(svc.save_pretrained(), Err(ClassifierError::InvalidSaveState(_))));
    }

    #[test]
    fn invalid_requests_keep_previous_model() {
        let mut svc = service();
        svc.train(&request(vec![4], "tanh", 3), &dataset()).unwrap();

        let err = svc.train(&request(vec![], "tanh", 3), &dataset()).unwrap_err();
        assert_eq!(err.to_string(), "hidden layer sizes must be specified");
        let err = svc.train(&request(vec![4, -1], "tanh", 3), &dataset()).unwrap_err();
        assert!(matches!(err, ClassifierError::Config(_)));
        let err = svc.train(&request(vec![4], "softplus", 3), &dataset()).unwrap_err();
        assert!(err.to_string().starts_with("invalid activation function"));
        let err = svc.train(&request(vec![1 << 62], "tanh", 3), &dataset()).unwrap_err();
        assert!(matches!(err, ClassifierError::Config(ConfigError::TooManyParameters { .. })));

        assert_eq!(svc.model_info().unwrap().activation_function, ActivationFunction::Tanh);
    }

    #[test]
    fn trains_predicts_and_saves() {
        let mut svc = service();
        let report = svc.train(&request(vec![4], "SIGMOID", 40), &dataset()).unwrap();
        assert_eq!(report.status, "success");
        assert_eq!(report.metrics.train_size, 32);
        assert_eq!(report.metrics.test_size, 8);
        assert_eq!(report.metrics.total_emails, 40);
        assert_eq!(report.metrics.spam_emails, 20);
        assert_eq!(report.epoch_losses.last().map(|e| e.epoch), Some(39));

        let spam = svc.predict_text("FREE free free money").unwrap();
        let ham = svc.predict_text("meeting meeting about the meeting").unwrap();
        assert!(spam.prediction > ham.prediction);
        assert_eq!(spam.model_info, "Network: 1 layers, activation SIGMOID");

        svc.save_pretrained().unwrap();
        let pretrained = svc.predict_pretrained_text("FREE free free money").unwrap().unwrap();
        assert_eq!(pretrained.prediction, spam.prediction);
        assert_eq!(svc.pretrained_metrics().unwrap().as_ref(), svc.last_metrics());
        assert_eq!(svc.pretrained_model_info().unwrap().unwrap(), svc.model_info().unwrap());
    }

    #[test]
    fn wrong_vector_size_is_reported() {
        let mut svc = service();
        svc.train(&request(vec![2], "relu", 1), &dataset()).unwrap();
        match svc.predict_features(&[1.0]) {
            Err(ClassifierError::InputSizeMismatch { expected, actual }) => assert_eq!((expected, actual), (3, 1)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn lists_activation_names() {
        assert_eq!(
            ClassifierService::<MemoryStore>::activation_functions(),
            vec!["SIGMOID", "TANH", "RELU", "LEAKY_RELU"]
        );
    }
}
