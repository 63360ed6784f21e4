/// Input validation functions for optimizers
mod input_validation_function;
/// Stochastic Gradient Descent optimizer
pub mod sgd;

pub use sgd::*;
