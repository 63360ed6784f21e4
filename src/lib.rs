//! # nodenet
//!
//! A feed-forward neural network engine built from individual perceptron nodes.
//!
//! A [`Model`](neural_network::Model) owns an ordered stack of layers. Every layer owns its
//! nodes, and every node owns a weight vector and an activation. When a layer is added the
//! model infers its fan-in from the layers before it, walking past pass-through layers
//! (flatten, dropout) until it finds a layer that actually produces a shape.
//!
//! ```rust
//! use nodenet::prelude::*;
//! use ndarray::array;
//!
//! let mut model = Model::new(ModelConfig::seeded(7));
//! model.add_layer(Dense::new(4).unwrap().with_input_shape(&[3]).unwrap()).unwrap();
//! model.add_layer(Dense::new(2).unwrap().with_activation(Activation::Sigmoid)).unwrap();
//! model
//!     .compile(
//!         Box::new(MeanSquaredError::new()),
//!         Box::new(SGD::new(0.05).unwrap()),
//!         vec![Metric::MeanAbsoluteError],
//!     )
//!     .unwrap();
//!
//! let x = array![[0.0, 1.0, 0.5], [1.0, 0.0, 0.25]].into_dyn();
//! let y = array![[1.0, 0.0], [0.0, 1.0]].into_dyn();
//!
//! let options = TrainOptions { epochs: 3, verbose: false, ..TrainOptions::default() };
//! let history = model.train(&x, &y, &options).unwrap();
//! assert_eq!(history.epoch_losses().len(), 3);
//!
//! let evaluation = model.evaluate(&x, &y).unwrap();
//! assert!(evaluation.loss().is_finite());
//! ```

/// Module `error` contains the error types returned by every fallible operation of the crate.
pub mod error;

pub use error::{IoError, ModelError};

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the specified field.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_learning_rate)
/// - `$field_name` - The name of the field to access (e.g., learning_rate)
/// - `$return_type` - The return type of the getter method
#[cfg(feature = "neural_network")]
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// Module `metric` provides evaluation metrics reported by `Model::evaluate`.
///
/// # Metrics
///
/// - `mean_squared_error` - Average squared difference between targets and predictions
/// - `mean_absolute_error` - Average absolute difference between targets and predictions
/// - `categorical_accuracy` - Whether the arg-max of the prediction matches the arg-max of the target
/// - `binary_accuracy` - Fraction of outputs on the correct side of a 0.5 threshold
#[cfg(feature = "neural_network")]
pub mod metric;

/// Module `neural_network` contains the node/layer computation engine.
///
/// # Components
///
/// - `activation` - Scalar, parametric and vectorial activation functions
/// - `node` - A single perceptron: weights, weighted sum and activation
/// - `layer` - Dense, Flatten, Reshape and Dropout layers built on a shared layer core
/// - `loss_function` - Loss functions and their gradients
/// - `optimizer` - Weight update strategies
/// - `model` - The layer stack: shape inference, prediction, backward propagation and training
#[cfg(feature = "neural_network")]
pub mod neural_network;

/// Convenience re-exports of the most commonly used types.
pub mod prelude;

/// Module `utility` contains data helpers consumed by training, such as
/// joint shuffling and validation splits.
#[cfg(feature = "utility")]
pub mod utility;
