/// A macro that implements `Layer::set_training` for a layer whose behavior depends on
/// whether it is training or running inference.
///
/// The implementing struct must have a `training: bool` field.
macro_rules! mode_dependent_layer_set_training {
    () => {
        /// Sets the training mode of the layer.
        ///
        /// # Arguments
        ///
        /// * `is_training` - `true` while the model is training, `false` for inference
        fn set_training(&mut self, is_training: bool) {
            self.training = is_training;
        }
    };
}

/// Dropout layer
pub mod dropout;
/// Input validation functions for regularization layers
mod input_validation_function;

pub use dropout::*;
