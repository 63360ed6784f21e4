use super::*;
use crate::neural_network::layer::{LayerCore, Placement};
use rand::rngs::StdRng;

/// Defines the interface for neural network layers.
///
/// Every layer owns a [`LayerCore`] holding its nodes, bias, activation, flags and shapes.
/// Most methods have default implementations that operate on that core, so a concrete
/// layer only has to provide `forward`, `layer_type` and access to its core. Shape-transform
/// layers override `build` and `backward_pass_through` as well.
pub trait Layer {
    /// Returns the shared layer state.
    fn core(&self) -> &LayerCore;

    /// Returns the shared layer state mutably.
    fn core_mut(&mut self) -> &mut LayerCore;

    /// Performs forward propagation through the layer.
    ///
    /// # Parameters
    ///
    /// * `input` - The input tensor of a single sample
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - The output tensor after forward computation
    /// - `Err(ModelError)` - If the input does not fit the layer
    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError>;

    /// Returns the type name of the layer (e.g. "Dense").
    fn layer_type(&self) -> &str;

    /// Sizes the layer for the given fan-in and draws its random state.
    ///
    /// Called by the model when the layer is appended. The default implementation draws
    /// every node's weights uniformly in `[-1, 1]`, the bias (if enabled) and any missing
    /// activation parameters.
    ///
    /// # Parameters
    ///
    /// - `fan_in` - Number of inputs every node of this layer receives
    /// - `rng` - The model's random generator
    fn build(&mut self, fan_in: usize, rng: &mut StdRng) -> Result<(), ModelError> {
        self.core_mut().build(fan_in, rng)
    }

    /// Computes one weight-gradient vector per node.
    ///
    /// # Parameters
    ///
    /// * `output_gradients` - Gradient of the loss with respect to each node output
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Vector>)` - The gradient for every node, in node order
    /// - `Err(ModelError)` - If the gradient length does not match the node count or no forward pass ran
    fn compute_gradients(&self, output_gradients: &Vector) -> Result<Vec<Vector>, ModelError> {
        self.core().compute_gradients(output_gradients)
    }

    /// Applies the optimizer to every node's weights in place.
    fn update_weights(
        &mut self,
        optimizer: &dyn Optimizer,
        gradients: &[Vector],
    ) -> Result<(), ModelError> {
        self.core_mut().update_weights(optimizer, gradients)
    }

    /// Propagates a gradient through a non-trainable layer.
    ///
    /// The default passes the gradient through unchanged.
    fn backward_pass_through(&mut self, grad: &Vector) -> Result<Vector, ModelError> {
        Ok(grad.clone())
    }

    /// Switches between training and inference state. Only stochastic layers care.
    fn set_training(&mut self, _is_training: bool) {}

    /// Attaches a loss function that overrides the model loss for this layer.
    fn add_loss(&mut self, loss: Box<dyn LossFunction>) {
        self.core_mut().loss = Some(loss);
    }

    /// Returns the per-layer loss override, if one was attached.
    fn loss(&self) -> Option<&dyn LossFunction> {
        self.core().loss.as_deref()
    }

    /// Returns the nodes of the layer.
    fn nodes(&self) -> &[Node] {
        &self.core().nodes
    }

    /// Returns the number of nodes in the layer.
    fn units(&self) -> usize {
        self.core().nodes.len()
    }

    /// Returns the shared bias added to every output.
    fn bias(&self) -> f64 {
        self.core().bias
    }

    /// Returns the activation of the layer.
    fn activation(&self) -> &Activation {
        &self.core().activation
    }

    /// Whether the layer participates in weight updates.
    fn is_trainable(&self) -> bool {
        self.core().trainable
    }

    /// Whether the layer receives the whole input tensor rather than a per-node vector.
    fn all_input_at_once(&self) -> bool {
        self.core().all_input_at_once
    }

    /// Whether shape inference skips over this layer.
    fn is_pass_through(&self) -> bool {
        self.core().pass_through
    }

    /// Where the layer may appear in a model.
    fn placement(&self) -> Placement {
        self.core().placement
    }

    /// Returns the declared or inferred input shape.
    fn input_shape(&self) -> Option<&[usize]> {
        self.core().input_shape.as_deref()
    }

    /// Whether the layer can consume samples of the given shape. Checked by the model when
    /// the layer is appended.
    fn accepts_input_shape(&self, _shape: &[usize]) -> bool {
        true
    }

    /// Records the input shape inferred by the model.
    fn set_input_shape(&mut self, shape: Vec<usize>) {
        self.core_mut().input_shape = Some(shape);
    }

    /// Returns the declared output shape, if any.
    fn output_shape(&self) -> Option<&[usize]> {
        self.core().output_shape.as_deref()
    }

    /// Returns the output shape used for downstream inference: the declared output shape, or `(units,)`.
    fn effective_output_shape(&self) -> Vec<usize> {
        match self.output_shape() {
            Some(shape) => shape.to_vec(),
            None => vec![self.units()],
        }
    }

    /// Returns the sum of all node weight-vector lengths.
    fn param_count(&self) -> usize {
        self.core().param_count()
    }

    /// Replaces every node's weights. The count and the length of each vector must match.
    fn set_weights(&mut self, weights: Vec<Vector>) -> Result<(), ModelError> {
        self.core_mut().set_weights(weights)
    }

    /// Replaces the shared bias.
    fn set_bias(&mut self, bias: f64) {
        self.core_mut().bias = bias;
    }

    /// Two layers are equal when node count, per-node state and bias all match.
    fn layer_eq(&self, other: &dyn Layer) -> bool {
        self.core() == other.core()
    }
}

/// Defines the interface for loss functions used in neural network training.
///
/// Both methods average over the samples they receive so that the gradient magnitude is
/// independent of how many values were compared.
pub trait LossFunction {
    /// Computes the loss between true and predicted values.
    ///
    /// # Parameters
    ///
    /// - `y_true` - Tensor containing the ground truth values
    /// - `y_pred` - Tensor containing the predicted values
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The scalar loss value
    /// - `Err(ModelError::ShapeError)` - If the tensors have different shapes
    fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError>;

    /// Computes the gradient of the loss with respect to the predictions.
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Gradient with the same shape as `y_pred`
    /// - `Err(ModelError::ShapeError)` - If the tensors have different shapes
    fn derivative(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<Tensor, ModelError>;

    /// Returns the name of the loss function.
    fn name(&self) -> &str;
}

/// Defines the interface for optimization algorithms.
///
/// An optimizer maps a node's weights and their gradient to updated weights. It holds no
/// per-call state, so one instance serves every node of every layer.
pub trait Optimizer {
    /// Updates `weights` in place and returns the same reference.
    ///
    /// # Parameters
    ///
    /// - `weights` - The weight vector to update
    /// - `gradients` - Gradient of the loss with respect to each weight
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Vector)` - The updated weights
    /// - `Err(ModelError::ShapeError)` - If the vectors have different lengths
    fn apply_gradients<'a>(
        &self,
        weights: &'a mut Vector,
        gradients: &Vector,
    ) -> Result<&'a mut Vector, ModelError>;

    /// Returns the learning rate.
    fn learning_rate(&self) -> f64;

    /// Returns the name of the optimizer.
    fn name(&self) -> &str;
}
