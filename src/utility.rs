/// This module provides the data helpers used around training: a joint shuffle of inputs
/// and targets, and an ordered split into training and validation sets
pub mod data_processing;

pub use data_processing::*;
