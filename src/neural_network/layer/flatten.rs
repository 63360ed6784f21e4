use crate::ModelError;
use crate::neural_network::layer::LayerCore;
use crate::neural_network::{Layer, Tensor, Vector};
use rand::rngs::StdRng;

/// Layer that collapses its input into a 1-D vector in row-major order.
///
/// Flatten is a pass-through layer: shape inference skips over it, and the layer after it
/// takes its fan-in from the nearest shape-producing layer before it. It owns a single
/// pass-through node whose weights are all ones and is never trained.
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::Array2;
///
/// let mut model = Model::new(ModelConfig::seeded(1));
/// model.add_layer(Flatten::new().with_input_shape(&[2, 3]).unwrap()).unwrap();
/// model.add_layer(Dense::new(4).unwrap()).unwrap();
///
/// assert_eq!(model.layers()[1].nodes()[0].fan_in(), 6);
///
/// let x = Array2::<f64>::ones((2, 3)).insert_axis(ndarray::Axis(0)).into_dyn();
/// assert_eq!(model.predict(&x, false).unwrap().shape(), &[1, 4]);
/// ```
#[derive(Debug)]
pub struct Flatten {
    core: LayerCore,
}

impl Flatten {
    /// Creates a new Flatten layer.
    pub fn new() -> Self {
        let mut core = LayerCore::shape_transform();
        core.pass_through = true;
        Flatten { core }
    }

    /// Declares the input shape, needed when Flatten is the first layer of a model.
    pub fn with_input_shape(mut self, shape: &[usize]) -> Result<Self, ModelError> {
        self.core.declare_input_shape(shape)?;
        Ok(self)
    }
}

impl Default for Flatten {
    fn default() -> Self {
        Self::new()
    }
}

impl Layer for Flatten {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LayerCore {
        &mut self.core
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        self.core.input_cache = Some(input.clone());

        let output = input.iter().cloned().collect::<Vector>().into_dyn();
        self.core.output_cache = Some(output.clone());
        Ok(output)
    }

    fn layer_type(&self) -> &str {
        "Flatten"
    }

    fn build(&mut self, fan_in: usize, _rng: &mut StdRng) -> Result<(), ModelError> {
        self.core.build_pass_through_node(fan_in);
        self.core.output_shape = Some(vec![fan_in]);
        Ok(())
    }
}
