use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochLoss;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_sample;

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place for exactly `config.epochs` epochs and returns
/// the reported loss history.
///
/// Each epoch visits every sample once in a freshly shuffled order, takes
/// one SGD step per sample, then measures that sample's squared error with
/// the updated parameters. The epoch's mean is kept when
/// `config.is_reported(epoch)`.
///
/// Callers guarantee `inputs` is non-empty, the same length as `labels`, and
/// that every row has `network.input_size()` features. With `epochs == 0`
/// the network is untouched and the history is empty.
pub(crate) fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[u8],
    config: &TrainConfig,
) -> Vec<EpochLoss> {
    let optimizer = Sgd::new(network.learning_rate());
    let mut rng = match config.shuffle_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut history = Vec::new();
    for epoch in 0..config.epochs {
        let loss = run_one_epoch(network, inputs, labels, &optimizer, &mut rng);
        if config.is_reported(epoch) {
            debug!("epoch {}/{}: loss {:.6}", epoch, config.epochs, loss);
            history.push(EpochLoss { epoch, loss });
        }
    }
    history
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One shuffled pass of online SGD. Returns the mean squared error.
fn run_one_epoch(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[u8],
    optimizer: &Sgd,
    rng: &mut StdRng,
) -> f64 {
    let n = inputs.len();
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);

    let mut total_loss = 0.0;
    for &idx in &indices {
        let input = &inputs[idx];
        let target = f64::from(labels[idx]);
        train_sample(network, optimizer, input, target);
        total_loss += MseLoss::loss(network.forward(input), target);
    }

    total_loss / n as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::ActivationFunction;
    use crate::network::config::NetworkConfig;

    fn toy() -> (Vec<Vec<f64>>, Vec<u8>) {
        let inputs = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ];
        (inputs, vec![0, 1, 1, 1])
    }

    fn network() -> Network {
        Network::new(NetworkConfig::new(2, vec![4], 0.5, ActivationFunction::Tanh)).unwrap()
    }

    #[test]
    fn zero_epochs_leaves_network_untouched() {
        let (x, y) = toy();
        let mut net = network();
        let history = train_loop(&mut net, &x, &y, &TrainConfig::new(0));
        assert!(history.is_empty());
        assert_eq!(net, network());
    }

    #[test]
    fn history_follows_report_interval() {
        let (x, y) = toy();
        let mut net = network();
        let cfg = TrainConfig::new(13).with_shuffle_seed(1);
        let epochs: Vec<_> = train_loop(&mut net, &x, &y, &cfg).iter().map(|e| e.epoch).collect();
        assert_eq!(epochs, vec![0, 5, 10, 12]);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let (x, y) = toy();
        let cfg = TrainConfig::new(20).with_shuffle_seed(9);
        let mut a = network();
        let mut b = network();
        let ha = train_loop(&mut a, &x, &y, &cfg);
        let hb = train_loop(&mut b, &x, &y, &cfg);
        assert_eq!(ha, hb);
        assert_eq!(a, b);
    }

    #[test]
    fn loss_decreases_on_separable_data() {
        let (x, y) = toy();
        let mut net = network();
        let cfg = TrainConfig::new(300).with_shuffle_seed(3);
        let history = train_loop(&mut net, &x, &y, &cfg);
        let first = history.first().unwrap().loss;
        let last = history.last().unwrap().loss;
        assert!(last < first, "loss went from {} to {}", first, last);
    }
}
