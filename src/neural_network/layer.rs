use super::*;
use crate::neural_network::input::validate_shape;
use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, StandardNormal, Uniform};

/// Lower bound of the uniform weight initialization
const WEIGHT_INIT_LOW: f64 = -1.0;
/// Upper bound of the uniform weight initialization
const WEIGHT_INIT_HIGH: f64 = 1.0;

/// Dense (fully connected) layer
pub mod dense;
/// Flatten layer, collapses any input into a vector
pub mod flatten;
/// Regularization layers such as dropout
pub mod regularization_layer;
/// Reshape layer
pub mod reshape;

pub use dense::*;
pub use flatten::*;
pub use regularization_layer::*;
pub use reshape::*;

/// Where a layer may be placed inside a model.
///
/// Checked by the model: first-layer placement in `add_layer`, last-layer placement in
/// `compile` and `train`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    #[default]
    Unrestricted,
    /// The layer cannot receive the model input directly
    NotFirst,
    /// The layer cannot produce the model output
    NotLast,
    /// The layer can only sit between two other layers
    Hidden,
}

impl Placement {
    /// Whether the layer may be the first layer of a model.
    pub fn allows_first(self) -> bool {
        matches!(self, Placement::Unrestricted | Placement::NotLast)
    }

    /// Whether the layer may be the last layer of a model.
    pub fn allows_last(self) -> bool {
        matches!(self, Placement::Unrestricted | Placement::NotFirst)
    }
}

/// State shared by every layer: nodes, bias, activation, flags and shapes.
///
/// # Fields
///
/// - `nodes` - The perceptrons of the layer, all with the same fan-in
/// - `bias` - A single value added to every output, 0 when the bias is disabled
/// - `use_bias` - Whether a bias is drawn from N(0, 1) when the layer is built
/// - `activation` - Activation of the layer; nodes carry its scalar counterpart
/// - `trainable` - Whether the layer participates in weight updates
/// - `all_input_at_once` - Whether the layer consumes the whole input tensor
/// - `pass_through` - Whether shape inference skips this layer
/// - `placement` - Placement constraint checked by the model
/// - `input_shape` / `output_shape` - Declared or inferred shapes
/// - `input_cache` / `output_cache` - Values of the last forward pass
/// - `loss` - Optional per-layer loss override
pub struct LayerCore {
    pub(crate) nodes: Vec<Node>,
    pub(crate) bias: f64,
    pub(crate) use_bias: bool,
    pub(crate) activation: Activation,
    pub(crate) trainable: bool,
    pub(crate) all_input_at_once: bool,
    pub(crate) pass_through: bool,
    pub(crate) placement: Placement,
    pub(crate) input_shape: Option<Vec<usize>>,
    pub(crate) output_shape: Option<Vec<usize>>,
    pub(crate) input_cache: Option<Tensor>,
    pub(crate) output_cache: Option<Tensor>,
    pub(crate) loss: Option<Box<dyn LossFunction>>,
}

impl LayerCore {
    /// Creates the core of a layer with `units` nodes.
    ///
    /// # Returns
    ///
    /// - `Ok(LayerCore)` - A core with unsized nodes
    /// - `Err(ModelError::ConfigurationError)` - If `units` is 0
    pub fn new(units: usize, activation: Activation) -> Result<Self, ModelError> {
        if units < 1 {
            return Err(ModelError::ConfigurationError(
                "Invalid number of nodes: units < 1".to_string(),
            ));
        }

        let node_activation = activation.node_activation();
        Ok(Self {
            nodes: (0..units).map(|_| Node::new(node_activation.clone())).collect(),
            bias: 0.0,
            use_bias: false,
            activation,
            trainable: true,
            all_input_at_once: false,
            pass_through: false,
            placement: Placement::Unrestricted,
            input_shape: None,
            output_shape: None,
            input_cache: None,
            output_cache: None,
            loss: None,
        })
    }

    /// Creates the core of a shape-transform layer: one linear pass-through node, no bias,
    /// not trainable, consuming the whole input at once.
    pub(crate) fn shape_transform() -> Self {
        Self {
            nodes: vec![Node::new(Activation::Linear)],
            bias: 0.0,
            use_bias: false,
            activation: Activation::Linear,
            trainable: false,
            all_input_at_once: true,
            pass_through: false,
            placement: Placement::Unrestricted,
            input_shape: None,
            output_shape: None,
            input_cache: None,
            output_cache: None,
            loss: None,
        }
    }

    /// Replaces the activation of the layer and of all its nodes.
    pub(crate) fn set_activation(&mut self, activation: Activation) {
        let node_activation = activation.node_activation();
        for node in &mut self.nodes {
            node.set_activation(node_activation.clone());
        }
        self.activation = activation;
    }

    /// Records a declared input shape after validating it.
    pub(crate) fn declare_input_shape(&mut self, shape: &[usize]) -> Result<(), ModelError> {
        validate_shape(shape, "input_shape")?;
        self.input_shape = Some(shape.to_vec());
        Ok(())
    }

    /// Draws fresh weights in `[-1, 1]` for every node, the bias if enabled and any missing
    /// activation parameters.
    pub fn build(&mut self, fan_in: usize, rng: &mut StdRng) -> Result<(), ModelError> {
        if fan_in == 0 {
            return Err(ModelError::ShapeError(
                "cannot build a layer with a fan-in of 0".to_string(),
            ));
        }

        self.activation.initialize(rng);
        let node_activation = self.activation.node_activation();

        let uniform = Uniform::new_inclusive(WEIGHT_INIT_LOW, WEIGHT_INIT_HIGH)
            .map_err(|e| ModelError::ProcessingError(format!("weight distribution: {}", e)))?;
        for node in &mut self.nodes {
            let weights: Vector = (0..fan_in).map(|_| uniform.sample(rng)).collect();
            node.set_weights(weights);
            node.set_activation(node_activation.clone());
        }

        self.bias = if self.use_bias {
            StandardNormal.sample(rng)
        } else {
            0.0
        };
        Ok(())
    }

    /// Sizes the single pass-through node of a shape-transform layer: all weights are one.
    pub(crate) fn build_pass_through_node(&mut self, fan_in: usize) {
        self.nodes = vec![Node::with_weights(Vector::ones(fan_in), Activation::Linear)];
    }

    /// Fan-in shared by all nodes.
    pub fn fan_in(&self) -> usize {
        self.nodes.first().map_or(0, Node::fan_in)
    }

    /// Sum of all node weight-vector lengths.
    pub fn param_count(&self) -> usize {
        self.nodes.iter().map(Node::fan_in).sum()
    }

    /// Runs every node on the same input vector and adds the bias.
    ///
    /// The layer's vectorial activation, if any, is applied to the assembled vector.
    pub(crate) fn forward_nodes(&mut self, input: &Vector) -> Result<Vector, ModelError> {
        let mut outputs = Vec::with_capacity(self.nodes.len());
        for node in &mut self.nodes {
            outputs.push(node.calc(input)?);
        }

        let mut outputs = Vector::from(outputs);
        if self.bias != 0.0 {
            outputs += self.bias;
        }

        if self.activation.kind() == ActivationKind::Vectorial {
            outputs = self.activation.apply_vector(&outputs)?;
        }
        Ok(outputs)
    }

    /// Computes one weight-gradient vector per node.
    ///
    /// When the layer activation is not differentiable, every node's gradient is zero and
    /// its weights are left unchanged by this step. This is a known approximation.
    pub fn compute_gradients(&self, output_gradients: &Vector) -> Result<Vec<Vector>, ModelError> {
        if output_gradients.len() != self.nodes.len() {
            return Err(ModelError::ShapeError(format!(
                "expected {} output gradients (one per node), got {}",
                self.nodes.len(),
                output_gradients.len()
            )));
        }

        let differentiable = self.activation.is_differentiable();
        self.nodes
            .iter()
            .zip(output_gradients.iter())
            .map(|(node, &grad)| {
                if differentiable {
                    node.compute_gradient(grad)
                } else {
                    // zero derivative contribution, the weights keep their values
                    Ok(Vector::zeros(node.fan_in()))
                }
            })
            .collect()
    }

    /// Hands every node's (weights, gradient) pair to the optimizer.
    pub fn update_weights(
        &mut self,
        optimizer: &dyn Optimizer,
        gradients: &[Vector],
    ) -> Result<(), ModelError> {
        if gradients.len() != self.nodes.len() {
            return Err(ModelError::ShapeError(format!(
                "expected {} gradient vectors (one per node), got {}",
                self.nodes.len(),
                gradients.len()
            )));
        }

        for (node, gradient) in self.nodes.iter_mut().zip(gradients) {
            optimizer.apply_gradients(node.weights_mut(), gradient)?;
        }
        Ok(())
    }

    /// Element-wise sum of per-node gradient vectors, i.e. the column sum of the gradient
    /// matrix. This is what the layer hands to the layer before it.
    pub fn column_sum(&self, node_gradients: &[Vector]) -> Vector {
        node_gradients
            .iter()
            .fold(Vector::zeros(self.fan_in()), |acc, gradient| acc + gradient)
    }

    /// Replaces every node's weights.
    pub fn set_weights(&mut self, weights: Vec<Vector>) -> Result<(), ModelError> {
        if weights.len() != self.nodes.len() {
            return Err(ModelError::ShapeError(format!(
                "expected weights for {} nodes, got {}",
                self.nodes.len(),
                weights.len()
            )));
        }

        let fan_in = weights.first().map_or(0, Vector::len);
        if weights.iter().any(|w| w.len() != fan_in) {
            return Err(ModelError::ShapeError(
                "all nodes of a layer must share the same fan-in".to_string(),
            ));
        }
        if self.fan_in() != 0 && fan_in != self.fan_in() {
            return Err(ModelError::ShapeError(format!(
                "expected weight vectors of length {}, got {}",
                self.fan_in(),
                fan_in
            )));
        }

        for (node, w) in self.nodes.iter_mut().zip(weights) {
            node.set_weights(w);
        }
        Ok(())
    }

    /// Collects the input tensor of a node layer into a vector, rejecting anything but 1-D input.
    pub(crate) fn vector_input(&self, input: &Tensor, layer_name: &str) -> Result<Vector, ModelError> {
        if input.ndim() != 1 {
            return Err(ModelError::ShapeError(format!(
                "{} expects a 1-D input vector, got shape {:?}; add a Flatten layer first",
                layer_name,
                input.shape()
            )));
        }
        if input.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InputValidationError(
                "Input tensor contains NaN or infinite values".to_string(),
            ));
        }
        Ok(input.iter().cloned().collect())
    }

    /// Draws a seed for a layer-owned generator from the model generator.
    pub(crate) fn derive_seed(rng: &mut StdRng) -> u64 {
        rng.random()
    }
}

impl PartialEq for LayerCore {
    fn eq(&self, other: &Self) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.nodes.iter().zip(&other.nodes).all(|(a, b)| a == b)
            && self.bias == other.bias
    }
}

impl std::fmt::Debug for LayerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerCore")
            .field("nodes", &self.nodes.len())
            .field("bias", &self.bias)
            .field("activation", &self.activation)
            .field("trainable", &self.trainable)
            .field("input_shape", &self.input_shape)
            .field("output_shape", &self.output_shape)
            .finish()
    }
}
