use crate::error::ModelError;

/// Validates that the learning rate is positive and finite.
///
/// # Parameters
///
/// * `learning_rate` - The learning rate value to validate
///
/// # Returns
///
/// - `Ok(())` if the learning rate is positive and finite
/// - `Err(ModelError::ConfigurationError)` if the learning rate is not positive or not finite
pub(super) fn validate_learning_rate(learning_rate: f64) -> Result<(), ModelError> {
    if !(learning_rate > 0.0 && learning_rate.is_finite()) {
        return Err(ModelError::ConfigurationError(format!(
            "learning_rate must be positive and finite, got {}",
            learning_rate
        )));
    }
    Ok(())
}

/// Validates that weights and gradients have the same length.
pub(super) fn validate_gradient_len(weights: usize, gradients: usize) -> Result<(), ModelError> {
    if weights != gradients {
        return Err(ModelError::ShapeError(format!(
            "expected {} gradients (one per weight), got {}",
            weights, gradients
        )));
    }
    Ok(())
}
