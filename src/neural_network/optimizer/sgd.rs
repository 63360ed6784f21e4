use super::input_validation_function::{validate_gradient_len, validate_learning_rate};
use crate::ModelError;
use crate::neural_network::{Optimizer, Vector};
use ndarray::Zip;

/// Learning rate used by `SGD::default()` and by a model that was never compiled
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Stochastic Gradient Descent (SGD) optimizer.
///
/// Updates every weight in the direction of the negative gradient, scaled by the learning
/// rate: `w = w - learning_rate * g`. The optimizer keeps no per-weight state.
///
/// # Fields
///
/// - `learning_rate` - Learning rate controlling the size of parameter updates
/// - `name` - Name reported by `Optimizer::name`
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let sgd = SGD::new(0.1).unwrap();
/// let mut weights = array![1.0, 2.0];
/// sgd.apply_gradients(&mut weights, &array![10.0, -10.0]).unwrap();
/// assert_eq!(weights, array![0.0, 3.0]);
///
/// assert!(SGD::new(0.0).is_err());
/// assert!(SGD::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SGD {
    learning_rate: f64,
    name: String,
}

impl SGD {
    /// Creates a new SGD optimizer with the specified learning rate.
    ///
    /// # Parameters
    ///
    /// * `learning_rate` - Step size for parameter updates
    ///
    /// # Returns
    ///
    /// - `Ok(SGD)` - A new SGD optimizer instance
    /// - `Err(ModelError::ConfigurationError)` - If the learning rate is not positive and finite
    pub fn new(learning_rate: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        Ok(Self {
            learning_rate,
            name: "SGD".to_string(),
        })
    }

    /// Renames the optimizer.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

impl Default for SGD {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            name: "SGD".to_string(),
        }
    }
}

impl Optimizer for SGD {
    fn apply_gradients<'a>(
        &self,
        weights: &'a mut Vector,
        gradients: &Vector,
    ) -> Result<&'a mut Vector, ModelError> {
        validate_gradient_len(weights.len(), gradients.len())?;

        let lr = self.learning_rate;
        Zip::from(&mut *weights)
            .and(gradients)
            .for_each(|w, &g| *w -= lr * g);
        Ok(weights)
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    fn name(&self) -> &str {
        &self.name
    }
}
