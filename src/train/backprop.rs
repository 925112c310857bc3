use crate::network::network::{ForwardTrace, Network};

/// Per-layer error signals for one sample, indexed like `Network::layers()`.
///
/// The output delta uses the sigmoid slope `o·(1-o)` regardless of the hidden
/// activation. Hidden deltas are pulled back through the next layer's
/// weights and scaled by the configured activation's derivative at the raw
/// pre-activation. Deltas carry `target - output`, so they point downhill.
pub(crate) fn backpropagate(network: &Network, trace: &ForwardTrace, target: f64) -> Vec<Vec<f64>> {
    let layers = network.layers();
    let mut deltas: Vec<Vec<f64>> = vec![Vec::new(); layers.len()];

    let output = trace.output();
    let output_idx = layers.len() - 1;
    deltas[output_idx] = vec![(target - output) * output * (1.0 - output)];

    for l in (0..output_idx).rev() {
        let next = &layers[l + 1];
        let activator = layers[l].activator();
        let layer_deltas: Vec<f64> = trace.pre_activations[l]
            .iter()
            .enumerate()
            .map(|(i, &z)| {
                let error: f64 = deltas[l + 1]
                    .iter()
                    .enumerate()
                    .map(|(j, &d)| d * next.weights[(i, j)])
                    .sum();
                error * activator.slope(z)
            })
            .collect();
        deltas[l] = layer_deltas;
    }

    deltas
}
