use crate::ModelError;
use crate::neural_network::{Activation, Vector};

/// Bound applied to the weighted sum before activation, keeping `exp` and friends finite
pub const WEIGHTED_SUM_LIMIT: f64 = 1e10;

/// A single perceptron.
///
/// A node owns one weight per input and an activation. `calc` computes the weighted sum of
/// its input, remembers that sum and the input, and returns the activated value; the cached
/// values are what `compute_gradient` needs during the following backward pass.
///
/// # Example
/// ```rust
/// use nodenet::neural_network::{Activation, Node};
/// use ndarray::array;
///
/// let mut node = Node::with_weights(array![0.5, -1.0], Activation::Linear);
/// let out = node.calc(&array![2.0, 1.0]).unwrap();
/// assert_eq!(out, 0.0);
/// assert!(node.calc(&array![1.0]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    weights: Vector,
    activation: Activation,
    input: Option<Vector>,
    z: Option<f64>,
}

impl Node {
    /// Creates a node with no weights yet. Weights are sized when the owning layer is built.
    pub fn new(activation: Activation) -> Self {
        Self::with_weights(Vector::zeros(0), activation)
    }

    /// Creates a node with the given weights.
    pub fn with_weights(weights: Vector, activation: Activation) -> Self {
        Node {
            weights,
            activation,
            input: None,
            z: None,
        }
    }

    /// Returns the weight vector.
    pub fn weights(&self) -> &Vector {
        &self.weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut Vector {
        &mut self.weights
    }

    pub(crate) fn set_weights(&mut self, weights: Vector) {
        self.weights = weights;
        self.input = None;
        self.z = None;
    }

    /// Returns the activation of the node.
    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    pub(crate) fn set_activation(&mut self, activation: Activation) {
        self.activation = activation;
    }

    /// Number of inputs the node accepts.
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// The weighted sum of the last forward pass, after clamping.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// The input of the last forward pass.
    pub fn input(&self) -> Option<&Vector> {
        self.input.as_ref()
    }

    /// Calculates the output of the node for one input vector.
    ///
    /// # Parameters
    ///
    /// * `input` - Vector with one value per weight
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The activated weighted sum
    /// - `Err(ModelError::ShapeError)` - If the input length differs from the number of weights
    pub fn calc(&mut self, input: &Vector) -> Result<f64, ModelError> {
        if input.len() != self.weights.len() {
            return Err(ModelError::ShapeError(format!(
                "Input size {} does not match number of weights {}",
                input.len(),
                self.weights.len()
            )));
        }

        let z = input
            .dot(&self.weights)
            .clamp(-WEIGHTED_SUM_LIMIT, WEIGHTED_SUM_LIMIT);

        self.input = Some(input.clone());
        self.z = Some(z);

        self.activation.apply_formula(z)
    }

    /// Computes the gradient of the loss with respect to each weight.
    ///
    /// The gradient is `output_gradient * activation'(z) * input`, element-wise over the
    /// input of the last forward pass.
    ///
    /// # Returns
    ///
    /// - `Ok(Vector)` - One gradient per weight
    /// - `Err(ModelError::ProcessingError)` - If `calc` has not been called yet
    pub fn compute_gradient(&self, output_gradient: f64) -> Result<Vector, ModelError> {
        let (Some(input), Some(z)) = (&self.input, self.z) else {
            return Err(ModelError::ProcessingError(
                "Forward pass has not been run".to_string(),
            ));
        };

        let activation_derivative = self.activation.derivative(z)?;
        Ok(input * (output_gradient * activation_derivative))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.weights == other.weights && self.activation == other.activation
    }
}
