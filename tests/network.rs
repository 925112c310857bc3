use approx::assert_relative_eq;

use ferrite_spam::{
    deserialize, serialize, ActivationFunction, Network, NetworkConfig, PersistedModel, TrainingMetrics,
};

fn metrics_for(network: &Network) -> TrainingMetrics {
    TrainingMetrics {
        total_emails: 10,
        spam_emails: 4,
        non_spam_emails: 6,
        feature_dimensions: network.input_size(),
        train_size: 8,
        test_size: 2,
        accuracy: 0.5,
        spam_detection_rate: 1.0,
        non_spam_detection_rate: 0.0,
        hidden_layer_sizes: network.hidden_layer_sizes().to_vec(),
        num_hidden_layers: network.num_hidden_layers(),
        activation_function: network.activation(),
    }
}

/// 2-2-1 sigmoid network with hand-picked parameters.
fn textbook_network() -> Network {
    let config = NetworkConfig::new(2, vec![2], 0.5, ActivationFunction::Sigmoid);
    Network::from_parameters(
        config,
        vec![
            (vec![vec![0.15, 0.25], vec![0.20, 0.30]], vec![0.35, 0.35]),
            (vec![vec![0.40], vec![0.45]], vec![0.60]),
        ],
    )
    .unwrap()
}

#[test]
fn single_step_matches_hand_computed_update() {
    let mut net = textbook_network();
    assert_relative_eq!(net.predict(&[1.0, 0.0]).unwrap(), 0.7575931652488075, epsilon = 1e-12);

    net.train_sample(&[1.0, 0.0], 1).unwrap();

    let w = net.weights();
    let b = net.biases();
    assert_relative_eq!(w[0][0][0], 0.15209233147273574, epsilon = 1e-12);
    assert_relative_eq!(w[0][0][1], 0.25229157667372554, epsilon = 1e-12);
    // Second input was zero, so its outgoing weights are untouched.
    assert_eq!(w[0][1], vec![0.20, 0.30]);
    assert_relative_eq!(b[0][0], 0.3520923314727357, epsilon = 1e-12);
    assert_relative_eq!(b[0][1], 0.3522915766737255, epsilon = 1e-12);
    assert_relative_eq!(w[1][0][0], 0.41385500719297624, epsilon = 1e-12);
    assert_relative_eq!(w[1][1][0], 0.4643713369187937, epsilon = 1e-12);
    assert_relative_eq!(b[1][0], 0.6222584938460554, epsilon = 1e-12);
}

#[test]
fn predictions_are_probabilities_and_pure() {
    for act in ActivationFunction::ALL {
        let net = Network::new(NetworkConfig::new(6, vec![8, 4], 0.05, act)).unwrap();
        let x = [3.0, 0.0, 1.0, 12.0, 0.0, 2.0];
        let first = net.predict(&x).unwrap();
        assert!(first > 0.0 && first < 1.0, "{} gave {}", act, first);
        assert_eq!(net.predict(&x).unwrap(), first);
    }
}

#[test]
fn parameter_shapes_follow_architecture() {
    let net = Network::new(NetworkConfig::new(7, vec![5, 3, 2], 0.1, ActivationFunction::Tanh)).unwrap();
    let w = net.weights();
    let b = net.biases();
    assert_eq!(w.len(), 4);
    let dims: Vec<(usize, usize)> = w.iter().map(|l| (l.len(), l[0].len())).collect();
    assert_eq!(dims, vec![(7, 5), (5, 3), (3, 2), (2, 1)]);
    let bias_lens: Vec<usize> = b.iter().map(Vec::len).collect();
    assert_eq!(bias_lens, vec![5, 3, 2, 1]);
}

#[test]
fn json_round_trip_preserves_predictions_bit_for_bit() {
    let mut net = Network::new(NetworkConfig::new(4, vec![6, 3], 0.3, ActivationFunction::LeakyReLU)).unwrap();
    for i in 0..25 {
        let x = [i as f64 * 0.13, 1.0 / (i as f64 + 1.0), (i % 3) as f64, -0.7];
        net.train_sample(&x, (i % 2) as u8).unwrap();
    }

    let snapshot = serialize(&net, metrics_for(&net));
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: PersistedModel = serde_json::from_str(&json).unwrap();
    let copy = deserialize(&restored).unwrap();

    assert_eq!(copy, net);
    for x in [[0.1, 0.2, 0.3, 0.4], [5.0, 0.0, 2.0, 1.0], [0.0; 4]] {
        assert_eq!(copy.predict(&x).unwrap().to_bits(), net.predict(&x).unwrap().to_bits());
    }
}

#[test]
fn snapshot_uses_camel_case_keys() {
    let net = textbook_network();
    let value = serde_json::to_value(serialize(&net, metrics_for(&net))).unwrap();
    assert_eq!(value["id"], "pretrained_model");
    assert_eq!(value["inputSize"], 2);
    assert_eq!(value["hiddenSizes"], serde_json::json!([2]));
    assert_eq!(value["activationFunction"], "SIGMOID");
    assert_eq!(value["metrics"]["spamDetectionRate"], 1.0);
}
