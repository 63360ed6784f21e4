use crate::ModelError;
use crate::neural_network::layer::LayerCore;
use crate::neural_network::{Activation, Layer, Tensor, Vector};

/// Dense (fully connected) layer made of individual perceptron nodes.
///
/// Every node receives the whole input vector and produces one output value. The layer adds
/// its shared bias to every output and, when its activation is vectorial (softmax), applies
/// that activation to the assembled output vector; the nodes themselves then run linear.
///
/// # Dimensions
///
/// - Input shape: `(fan_in,)`, a single sample
/// - Output shape: `(units,)`
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let mut model = Model::new(ModelConfig::seeded(42));
/// model
///     .add_layer(
///         Dense::new(3)
///             .unwrap()
///             .with_activation(Activation::ReLU)
///             .with_input_shape(&[2])
///             .unwrap(),
///     )
///     .unwrap();
///
/// let output = model.predict(&array![[0.5, -0.5]].into_dyn(), false).unwrap();
/// assert_eq!(output.shape(), &[1, 3]);
/// ```
#[derive(Debug)]
pub struct Dense {
    core: LayerCore,
}

impl Dense {
    /// Creates a dense layer with `units` nodes, a linear activation and no bias.
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - The new layer; weights are drawn once it is added to a model
    /// - `Err(ModelError::ConfigurationError)` - If `units` is 0
    pub fn new(units: usize) -> Result<Self, ModelError> {
        Ok(Dense {
            core: LayerCore::new(units, Activation::Linear)?,
        })
    }

    /// Sets the activation of the layer.
    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.core.set_activation(activation);
        self
    }

    /// Sets the activation of the layer by name, e.g. `"relu"` or `"softmax"`.
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - The layer with the parsed activation
    /// - `Err(ModelError::ConfigurationError)` - If the name is unknown
    pub fn with_activation_name(self, name: &str) -> Result<Self, ModelError> {
        Ok(self.with_activation(name.parse()?))
    }

    /// Enables or disables the shared bias. When enabled, the bias is drawn from N(0, 1) at build.
    pub fn with_bias(mut self, use_bias: bool) -> Self {
        self.core.use_bias = use_bias;
        self
    }

    /// Declares the input shape. Required when this is the first layer of a model.
    ///
    /// Nodes consume vectors, so the shape must have a single dimension. Put a Flatten
    /// layer in front to feed multi-dimensional samples.
    ///
    /// # Returns
    ///
    /// - `Ok(Dense)` - The layer with the declared shape
    /// - `Err(ModelError::ConfigurationError)` - If the shape is not 1-D or contains a zero
    pub fn with_input_shape(mut self, shape: &[usize]) -> Result<Self, ModelError> {
        if shape.len() > 1 {
            return Err(ModelError::ConfigurationError(format!(
                "Dense input_shape must be 1-D, got {:?}; add a Flatten layer first",
                shape
            )));
        }
        self.core.declare_input_shape(shape)?;
        Ok(self)
    }

    /// Marks the layer as frozen: it still runs forward but its weights are never updated.
    ///
    /// A frozen layer still propagates a gradient to the layer before it: the column sum of
    /// its per-node gradients, the same vector a trainable layer passes on. Handing the
    /// incoming gradient through unchanged would give it the length of this layer's output
    /// instead of its input.
    pub fn with_trainable(mut self, trainable: bool) -> Self {
        self.core.trainable = trainable;
        self
    }

    /// Returns the input of the last forward pass.
    pub fn last_input(&self) -> Option<&Tensor> {
        self.core.input_cache.as_ref()
    }

    /// Returns the output of the last forward pass.
    pub fn last_output(&self) -> Option<&Tensor> {
        self.core.output_cache.as_ref()
    }
}

impl Layer for Dense {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LayerCore {
        &mut self.core
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        let input_vector = self.core.vector_input(input, "Dense")?;
        let output = self.core.forward_nodes(&input_vector)?.into_dyn();

        self.core.input_cache = Some(input.clone());
        self.core.output_cache = Some(output.clone());
        Ok(output)
    }

    fn layer_type(&self) -> &str {
        "Dense"
    }

    fn accepts_input_shape(&self, shape: &[usize]) -> bool {
        shape.len() == 1
    }

    fn backward_pass_through(&mut self, grad: &Vector) -> Result<Vector, ModelError> {
        // frozen: same propagation as a trainable layer, without the update
        let node_gradients = self.core.compute_gradients(grad)?;
        Ok(self.core.column_sum(&node_gradients))
    }
}

impl PartialEq for Dense {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
    }
}
