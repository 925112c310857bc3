use crate::layers::dense::Layer;

/// Plain online gradient descent: no momentum, no decay, no clipping.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one in-place update to `layer`.
    ///
    /// `deltas` already point downhill (they carry `target - output`), so the
    /// step adds them: `w[i][j] += lr · δ[j] · input[i]`, `b[j] += lr · δ[j]`.
    pub fn step(&self, layer: &mut Layer, deltas: &[f64], layer_input: &[f64]) {
        for (i, &x) in layer_input.iter().enumerate() {
            for (j, &delta) in deltas.iter().enumerate() {
                layer.weights[(i, j)] += self.learning_rate * delta * x;
            }
        }
        for (bias, &delta) in layer.biases.iter_mut().zip(deltas) {
            *bias += self.learning_rate * delta;
        }
    }
}
