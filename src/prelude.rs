/// Prelude module for the neural network engine.
#[cfg(feature = "neural_network")]
pub mod neural_network_prelude;
/// Prelude module for utility functions.
#[cfg(feature = "utility")]
pub mod utility_prelude;

#[cfg(feature = "neural_network")]
pub use neural_network_prelude::*;
#[cfg(feature = "utility")]
pub use utility_prelude::*;
