use super::validate_loss_inputs;
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};

/// Mean Squared Error loss function
///
/// loss = mean((y_pred - y_true)^2), gradient = 2 * (y_pred - y_true) / n
///
/// # Example
///
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let mse = MeanSquaredError::new();
///
/// let y_true = array![1.0, 2.0, 3.0].into_dyn();
/// let y_pred = array![1.0, 2.0, 6.0].into_dyn();
///
/// assert_eq!(mse.compute(&y_true, &y_pred).unwrap(), 3.0);
/// assert_eq!(mse.derivative(&y_true, &y_pred).unwrap()[[2]], 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSquaredError;

impl MeanSquaredError {
    /// Creates a new instance of MeanSquaredError
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for MeanSquaredError {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let squared_diff = (y_pred - y_true).mapv(|x| x * x);
        Ok(squared_diff.sum() / squared_diff.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        Ok((y_pred - y_true).mapv(|x| 2.0 * x / n))
    }

    fn name(&self) -> &str {
        "MeanSquaredError"
    }
}
