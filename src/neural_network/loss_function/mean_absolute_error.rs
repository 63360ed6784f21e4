use super::validate_loss_inputs;
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;

/// Mean Absolute Error loss function
///
/// loss = mean(|y_pred - y_true|). The gradient is `1 / n` where the prediction is above the
/// target and `-1 / n` everywhere else, including at equality.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAbsoluteError;

impl MeanAbsoluteError {
    /// Creates a new instance of MeanAbsoluteError
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for MeanAbsoluteError {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let abs_diff = (y_pred - y_true).mapv(f64::abs);
        Ok(abs_diff.sum() / abs_diff.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        Ok(Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&t, &p| if p > t { 1.0 / n } else { -1.0 / n }))
    }

    fn name(&self) -> &str {
        "MeanAbsoluteError"
    }
}
