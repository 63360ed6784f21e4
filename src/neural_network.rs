/// Module that contains activation function implementations
pub mod activation;
/// Module that contains training and model configuration structures
pub mod config;
/// Module that contains evaluation and training history results
pub mod evaluation;
/// Module that contains the input shape helper
pub mod input;
/// Module that contains neural network layer implementations
pub mod layer;
/// Module that contains loss function implementations
pub mod loss_function;
/// Module that contains the model (layer stack) implementation
pub mod model;
/// Module that contains the traits shared by layers, losses and optimizers
pub mod neural_network_trait;
/// Module that contains the perceptron node implementation
pub mod node;
/// Module that contains optimization algorithms for neural network training
pub mod optimizer;
/// Module that contains serializable representations of model weights
pub mod serialize_weight;

pub use activation::*;
pub use config::*;
pub use evaluation::*;
pub use input::*;
pub use layer::*;
pub use loss_function::*;
pub use model::*;
pub use node::*;
pub use optimizer::*;

use crate::ModelError;
use ndarray::{Array1, ArrayD};

/// Type alias for n-dimensional arrays used as tensors in the neural network
pub type Tensor = ArrayD<f64>;

/// Type alias for the 1-D vectors held by nodes (weights, cached inputs, gradients)
pub type Vector = Array1<f64>;

pub use neural_network_trait::{Layer, LossFunction, Optimizer};
