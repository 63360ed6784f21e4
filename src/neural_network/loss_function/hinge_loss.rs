use super::validate_loss_inputs;
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;

/// Hinge loss function for targets encoded as -1 / +1
///
/// loss = mean(max(0, 1 - y * p))
#[derive(Debug, Clone, Copy, Default)]
pub struct HingeLoss;

impl HingeLoss {
    /// Creates a new instance of HingeLoss
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for HingeLoss {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let margins = Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&t, &p| (1.0 - t * p).max(0.0));
        Ok(margins.sum() / margins.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        Ok(Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&t, &p| if t * p < 1.0 { -t / n } else { 0.0 }))
    }

    fn name(&self) -> &str {
        "HingeLoss"
    }
}
