pub struct MseLoss;

impl MseLoss {
    /// Squared error of one prediction: `(target - predicted)²`.
    pub fn loss(predicted: f64, target: f64) -> f64 {
        (target - predicted).powi(2)
    }
}
