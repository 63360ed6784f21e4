use super::validate_loss_inputs;
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;
use std::f64::consts::LN_2;

/// Log-cosh loss function
///
/// loss = mean(ln(cosh(y_pred - y_true))), gradient = tanh(y_pred - y_true) / n
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCoshLoss;

impl LogCoshLoss {
    /// Creates a new instance of LogCoshLoss
    pub fn new() -> Self {
        Self {}
    }
}

/// ln(cosh(x)) without overflowing for large |x|
fn log_cosh(x: f64) -> f64 {
    let a = x.abs();
    a + (-2.0 * a).exp().ln_1p() - LN_2
}

impl LossFunction for LogCoshLoss {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let losses = Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&t, &p| log_cosh(p - t));
        Ok(losses.sum() / losses.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        Ok(Zip::from(y_true)
            .and(y_pred)
            .map_collect(|&t, &p| (p - t).tanh() / n))
    }

    fn name(&self) -> &str {
        "LogCoshLoss"
    }
}
