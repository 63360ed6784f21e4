use crate::ModelError;
use crate::neural_network::input::{format_shape, validate_shape};
use crate::neural_network::layer::LayerCore;
use crate::neural_network::{Layer, Tensor};
use ndarray::IxDyn;
use rand::rngs::StdRng;

/// Layer that rearranges its input into a fixed target shape.
///
/// The element count must be preserved: reshaping never pads or truncates. Unlike Flatten,
/// Reshape declares an output shape, so the layer after it takes its fan-in from the
/// product of that shape. Gradients pass through it unchanged.
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
///
/// let mut model = Model::new(ModelConfig::seeded(3));
/// model.add_layer(Dense::new(6).unwrap().with_input_shape(&[2]).unwrap()).unwrap();
/// model.add_layer(Reshape::new(&[2, 3]).unwrap()).unwrap();
/// assert_eq!(model.output_shape(), Some(&[2, 3][..]));
///
/// // 6 elements cannot become 4
/// assert!(model.add_layer(Reshape::new(&[2, 2]).unwrap()).is_err());
/// ```
#[derive(Debug)]
pub struct Reshape {
    core: LayerCore,
    target_shape: Vec<usize>,
}

impl Reshape {
    /// Creates a Reshape layer.
    ///
    /// # Returns
    ///
    /// - `Ok(Reshape)` - The new layer
    /// - `Err(ModelError::ConfigurationError)` - If the target shape is empty or contains a zero
    pub fn new(target_shape: &[usize]) -> Result<Self, ModelError> {
        validate_shape(target_shape, "target_shape")?;

        let mut core = LayerCore::shape_transform();
        core.output_shape = Some(target_shape.to_vec());
        Ok(Reshape {
            core,
            target_shape: target_shape.to_vec(),
        })
    }

    /// Declares the input shape, needed when Reshape is the first layer of a model.
    pub fn with_input_shape(mut self, shape: &[usize]) -> Result<Self, ModelError> {
        self.core.declare_input_shape(shape)?;
        Ok(self)
    }

    /// Returns the shape every input is rearranged into.
    pub fn target_shape(&self) -> &[usize] {
        &self.target_shape
    }

    fn target_len(&self) -> usize {
        self.target_shape.iter().product()
    }
}

impl Layer for Reshape {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LayerCore {
        &mut self.core
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        if input.len() != self.target_len() {
            return Err(ModelError::ShapeError(format!(
                "cannot reshape input of shape {} ({} elements) into {} ({} elements)",
                format_shape(input.shape()),
                input.len(),
                format_shape(&self.target_shape),
                self.target_len()
            )));
        }

        self.core.input_cache = Some(input.clone());

        let output = input
            .iter()
            .cloned()
            .collect::<Vec<f64>>();
        let output = Tensor::from_shape_vec(IxDyn(&self.target_shape), output)
            .map_err(|e| ModelError::ProcessingError(format!("reshape failed: {}", e)))?;
        self.core.output_cache = Some(output.clone());
        Ok(output)
    }

    fn layer_type(&self) -> &str {
        "Reshape"
    }

    fn build(&mut self, fan_in: usize, _rng: &mut StdRng) -> Result<(), ModelError> {
        if fan_in != self.target_len() {
            return Err(ModelError::ShapeError(format!(
                "Reshape expects {} input elements to produce {}, but the previous layer provides {}",
                self.target_len(),
                format_shape(&self.target_shape),
                fan_in
            )));
        }
        self.core.build_pass_through_node(fan_in);
        Ok(())
    }
}
