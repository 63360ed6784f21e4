use super::{clip_probabilities, validate_loss_inputs};
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};
use ndarray::Zip;

/// Binary Cross Entropy loss function
///
/// loss = -mean(y * ln(p) + (1 - y) * ln(1 - p)) with `p` clipped into `[1e-15, 1 - 1e-15]`.
///
/// # Example
///
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let bce = BinaryCrossEntropy::new();
/// let y_true = array![1.0, 0.0].into_dyn();
///
/// let good = bce.compute(&y_true, &array![0.9, 0.1].into_dyn()).unwrap();
/// let bad = bce.compute(&y_true, &array![0.1, 0.9].into_dyn()).unwrap();
/// assert!(good < bad);
///
/// // exact 0 and 1 are clipped, never infinite
/// assert!(bce.compute(&y_true, &array![0.0, 1.0].into_dyn()).unwrap().is_finite());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCrossEntropy;

impl BinaryCrossEntropy {
    /// Creates a new instance of BinaryCrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

impl LossFunction for BinaryCrossEntropy {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let p = clip_probabilities(y_pred);
        let losses = Zip::from(y_true)
            .and(&p)
            .map_collect(|&t, &p| t * p.ln() + (1.0 - t) * (1.0 - p).ln());
        Ok(-losses.sum() / losses.len() as f64)
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let n = y_pred.len() as f64;
        let p = clip_probabilities(y_pred);
        Ok(Zip::from(y_true)
            .and(&p)
            .map_collect(|&t, &p| (p - t) / (p * (1.0 - p) * n)))
    }

    fn name(&self) -> &str {
        "BinaryCrossEntropy"
    }
}
