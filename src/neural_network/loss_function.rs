use crate::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::input::format_shape;

/// Binary Cross Entropy loss function for binary classification
pub mod binary_cross_entropy;
/// Categorical Cross Entropy loss function for multi-class classification
pub mod categorical_cross_entropy;
/// Hinge loss function for maximum-margin classification
pub mod hinge_loss;
/// Huber loss function, quadratic for small errors and linear for large ones
pub mod huber_loss;
/// Log-cosh loss function
pub mod log_cosh_loss;
/// Mean Absolute Error loss function
pub mod mean_absolute_error;
/// Mean Squared Error loss function
pub mod mean_squared_error;

pub use binary_cross_entropy::*;
pub use categorical_cross_entropy::*;
pub use hinge_loss::*;
pub use huber_loss::*;
pub use log_cosh_loss::*;
pub use mean_absolute_error::*;
pub use mean_squared_error::*;

/// Predictions are clipped into `[EPSILON, 1 - EPSILON]` before any logarithm is taken
pub const EPSILON: f64 = 1e-15;

/// Checks that targets and predictions have the same shape and are not empty.
pub(crate) fn validate_loss_inputs(
    y_true: &Tensor,
    y_pred: &Tensor,
    loss_name: &str,
) -> Result<(), ModelError> {
    if y_true.shape() != y_pred.shape() {
        return Err(ModelError::ShapeError(format!(
            "{}: y_true has shape {} but y_pred has shape {}",
            loss_name,
            format_shape(y_true.shape()),
            format_shape(y_pred.shape())
        )));
    }
    if y_pred.is_empty() {
        return Err(ModelError::ShapeError(format!(
            "{}: cannot compute a loss over an empty tensor",
            loss_name
        )));
    }
    Ok(())
}

/// Clips probabilities away from 0 and 1.
pub(crate) fn clip_probabilities(y_pred: &Tensor) -> Tensor {
    y_pred.mapv(|p| p.clamp(EPSILON, 1.0 - EPSILON))
}
