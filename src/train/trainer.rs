use crate::error::ClassifierError;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::backprop::backpropagate;

/// One online step on a single `(input, target)` pair.
///
/// All deltas are computed from the pre-update weights before any layer is
/// touched. Returns the prediction made before the update. Callers
/// guarantee `input.len() == network.input_size()`.
pub(crate) fn train_sample(network: &mut Network, optimizer: &Sgd, input: &[f64], target: f64) -> f64 {
    let trace = network.forward_trace(input);
    let deltas = backpropagate(network, &trace, target);

    for (l, layer) in network.layers_mut().iter_mut().enumerate() {
        optimizer.step(layer, &deltas[l], &trace.activations[l]);
    }

    trace.output()
}

impl Network {
    /// One SGD step with the configured learning rate.
    ///
    /// A wrong-sized input is rejected before any parameter changes.
    pub fn train_sample(&mut self, input: &[f64], target: u8) -> Result<f64, ClassifierError> {
        self.check_input(input)?;
        let optimizer = Sgd::new(self.learning_rate());
        Ok(train_sample(self, &optimizer, input, f64::from(target)))
    }
}
