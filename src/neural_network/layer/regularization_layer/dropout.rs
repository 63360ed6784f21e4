use super::input_validation_function::validate_rate_exclusive;
use crate::ModelError;
use crate::neural_network::layer::{LayerCore, Placement};
use crate::neural_network::{Layer, Tensor, Vector};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Bernoulli, Distribution};

/// Dropout layer, which zeroes a fraction of its inputs while training to reduce overfitting.
///
/// In training state every element is dropped independently with probability `rate` and the
/// survivors are scaled by `1 / (1 - rate)` ("inverted dropout"), so inference needs no
/// rescaling and simply passes the input through. The layer can be neither the first nor
/// the last layer of a model and is skipped by shape inference.
///
/// Dropout owns its random generator. It is seeded from the explicit seed if one was given,
/// otherwise from the model's generator when the layer is built.
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::Array1;
///
/// let mut dropout = Dropout::new(0.5).unwrap().with_seed(9);
/// let input = Array1::<f64>::ones(1000).into_dyn();
///
/// // inference: identity
/// assert_eq!(dropout.forward(&input).unwrap(), input);
///
/// dropout.set_training(true);
/// let output = dropout.forward(&input).unwrap();
/// assert!(output.iter().all(|&v| v == 0.0 || v == 2.0));
/// ```
#[derive(Debug)]
pub struct Dropout {
    core: LayerCore,
    rate: f64,
    seed: Option<u64>,
    rng: Option<StdRng>,
    mask: Option<Tensor>,
    training: bool,
}

impl Dropout {
    /// Creates a new Dropout layer.
    ///
    /// # Parameters
    ///
    /// * `rate` - Probability of dropping each element, in `[0, 1)`
    ///
    /// # Returns
    ///
    /// - `Ok(Dropout)` - The new layer, in inference state
    /// - `Err(ModelError::ConfigurationError)` - If `rate` is outside `[0, 1)`
    pub fn new(rate: f64) -> Result<Self, ModelError> {
        validate_rate_exclusive(rate, "rate")?;
        if rate == 0.0 {
            tracing::warn!("Dropout rate is 0.0, so this layer has no effect on the output");
        }

        let mut core = LayerCore::shape_transform();
        core.pass_through = true;
        core.placement = Placement::Hidden;
        Ok(Dropout {
            core,
            rate,
            seed: None,
            rng: None,
            mask: None,
            training: false,
        })
    }

    /// Fixes the seed of the layer's own generator, making the masks reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    get_field!(rate, rate, f64);
    get_field!(is_training, training, bool);

    /// Returns the mask of the last training forward pass: 1 where kept, 0 where dropped.
    pub fn mask(&self) -> Option<&Tensor> {
        self.mask.as_ref()
    }

    fn scale(&self) -> f64 {
        1.0 / (1.0 - self.rate)
    }
}

impl Layer for Dropout {
    fn core(&self) -> &LayerCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut LayerCore {
        &mut self.core
    }

    fn forward(&mut self, input: &Tensor) -> Result<Tensor, ModelError> {
        self.core.input_cache = Some(input.clone());

        if !self.training || self.rate == 0.0 {
            self.core.output_cache = Some(input.clone());
            return Ok(input.clone());
        }

        let keep = Bernoulli::new(1.0 - self.rate)
            .map_err(|e| ModelError::ProcessingError(format!("dropout mask: {}", e)))?;
        let rng = self.rng.get_or_insert_with(StdRng::from_os_rng);
        let mask = input.mapv(|_| if keep.sample(rng) { 1.0 } else { 0.0 });

        let output = input * &mask * self.scale();
        self.mask = Some(mask);
        self.core.output_cache = Some(output.clone());
        Ok(output)
    }

    fn layer_type(&self) -> &str {
        "Dropout"
    }

    fn build(&mut self, fan_in: usize, rng: &mut StdRng) -> Result<(), ModelError> {
        self.core.build_pass_through_node(fan_in);
        let output_shape = match self.core.input_shape.as_ref() {
            Some(shape) => shape.clone(),
            None => vec![fan_in],
        };
        self.core.output_shape = Some(output_shape);

        let seed = match self.seed {
            Some(seed) => seed,
            None => LayerCore::derive_seed(rng),
        };
        self.rng = Some(StdRng::seed_from_u64(seed));
        Ok(())
    }

    fn backward_pass_through(&mut self, grad: &Vector) -> Result<Vector, ModelError> {
        if !self.training {
            return Ok(grad.clone());
        }
        let Some(mask) = self.mask.as_ref() else {
            return Ok(grad.clone());
        };

        if mask.len() != grad.len() {
            return Err(ModelError::ShapeError(format!(
                "Dropout gradient has {} elements but the last mask has {}",
                grad.len(),
                mask.len()
            )));
        }

        let scale = self.scale();
        Ok(grad
            .iter()
            .zip(mask.iter())
            .map(|(g, m)| g * m * scale)
            .collect())
    }

    mode_dependent_layer_set_training!();
}
