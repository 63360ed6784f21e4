use super::{clip_probabilities, validate_loss_inputs};
use crate::ModelError;
use crate::neural_network::{LossFunction, Tensor};

/// Categorical Cross Entropy loss function for one-hot encoded targets
///
/// loss = -Σ y * ln(p) / n where `n` is the leading dimension of the tensors (the number of
/// samples for a batch, the number of classes for a single sample) and `p` is clipped into
/// `[1e-15, 1 - 1e-15]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalCrossEntropy;

impl CategoricalCrossEntropy {
    /// Creates a new instance of CategoricalCrossEntropy
    pub fn new() -> Self {
        Self {}
    }
}

/// Leading dimension of the tensor, 1 for a scalar.
fn leading_dim(tensor: &Tensor) -> f64 {
    tensor.shape().first().copied().unwrap_or(1) as f64
}

impl LossFunction for CategoricalCrossEntropy {
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let p = clip_probabilities(y_pred);
        let losses = y_true * &p.mapv(f64::ln);
        Ok(-losses.sum() / leading_dim(y_true))
    }

    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError> {
        validate_loss_inputs(y_true, y_pred, self.name())?;

        let p = clip_probabilities(y_pred);
        let grad = -(y_true / &p);
        Ok(grad / leading_dim(y_true))
    }

    fn name(&self) -> &str {
        "CategoricalCrossEntropy"
    }
}
