use crate::ModelError;

/// Collapses a shape into its flattened element count.
///
/// # Parameters
///
/// * `shape` - A non-empty list of positive dimensions
///
/// # Returns
///
/// - `Ok(usize)` - The product of all dimensions
/// - `Err(ModelError::ConfigurationError)` - If the shape is empty or contains a zero
///
/// # Example
/// ```rust
/// use nodenet::neural_network::input_size;
///
/// assert_eq!(input_size(&[2, 3, 4]).unwrap(), 24);
/// assert!(input_size(&[]).is_err());
/// assert!(input_size(&[3, 0]).is_err());
/// ```
pub fn input_size(shape: &[usize]) -> Result<usize, ModelError> {
    validate_shape(shape, "input_shape")?;
    Ok(shape.iter().product())
}

/// Checks that a shape is non-empty and every dimension is positive.
pub(crate) fn validate_shape(shape: &[usize], param_name: &str) -> Result<(), ModelError> {
    if shape.is_empty() {
        return Err(ModelError::ConfigurationError(format!(
            "{} must contain at least one dimension",
            param_name
        )));
    }
    if shape.iter().any(|&d| d == 0) {
        return Err(ModelError::ConfigurationError(format!(
            "{} numbers must be > 0, got {:?}",
            param_name, shape
        )));
    }
    Ok(())
}

/// Formats a shape the way summaries and error messages show it, e.g. `(4,)` or `(2, 3)`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [single] => format!("({},)", single),
        _ => format!(
            "({})",
            shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
