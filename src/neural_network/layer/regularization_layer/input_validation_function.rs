use crate::error::ModelError;

/// Validates that a rate parameter is in `[0, 1)`
pub(super) fn validate_rate_exclusive(rate: f64, param_name: &str) -> Result<(), ModelError> {
    if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
        return Err(ModelError::ConfigurationError(format!(
            "{} must be in range [0, 1), got {}",
            param_name, rate
        )));
    }
    Ok(())
}
