use super::validate_loss_inputs;
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;

/// Default threshold between the quadratic and the linear regime
const DEFAULT_DELTA: f64 = 1.0;

/// Huber loss function
///
/// For an error `e = y_pred - y_true`, the loss is `0.5 * e^2` when `|e| <= delta` and
/// `delta * (|e| - 0.5 * delta)` otherwise, averaged over all elements.
///
/// # Example
///
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let huber = HuberLoss::new(1.0).unwrap();
/// let y_true = array![0.0, 0.0].into_dyn();
/// let y_pred = array![0.5, 3.0].into_dyn();
///
/// // (0.125 + 2.5) / 2
/// assert_eq!(huber.compute(&y_true, &y_pred).unwrap(), 1.3125);
/// assert!(HuberLoss::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HuberLoss {
    delta: f64,
}

impl HuberLoss {
    /// Creates a new Huber loss.
    ///
    /// # Returns
    ///
    /// - `Ok(HuberLoss)` - The loss function
    /// - `Err(ModelError::ConfigurationError)` - If `delta` is not positive and finite
    pub fn new(delta: f64) -> Result<Self, ModelError> {
        if !(delta > 0.0 && delta.is_finite()) {
            return Err(ModelError::ConfigurationError(format!(
                "delta must be positive and finite, got {}",
                delta
            )));
        }
        Ok(Self { delta })
    }

    get_field!(delta, delta, f64);
}

impl Default for HuberLoss {
    fn default() -> Self {
        Self {
            delta: DEFAULT_DELTA,
        }
    }
}

impl LossFunction for HuberLoss {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let delta = self.delta;
        let losses = Zip::from(y_true).and(y_pred).map_collect(|&t, &p| {
            let error = (p - t).abs();
            if error <= delta {
                0.5 * error * error
            } else {
                delta * (error - 0.5 * delta)
            }
        });
        Ok(losses.sum() / losses.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        let delta = self.delta;
        Ok(Zip::from(y_true).and(y_pred).map_collect(|&t, &p| {
            let error = p - t;
            if error.abs() <= delta {
                error / n
            } else {
                delta * error.signum() / n
            }
        }))
    }

    fn name(&self) -> &str {
        "HuberLoss"
    }
}
