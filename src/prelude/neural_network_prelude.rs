pub use crate::metric::Metric;
pub use crate::neural_network::activation::{Activation, ActivationKind, ParametricFunction};
pub use crate::neural_network::config::{ModelConfig, TrainOptions};
pub use crate::neural_network::evaluation::{Evaluation, History};
pub use crate::neural_network::layer::{Dense, Dropout, Flatten, Placement, Reshape};
pub use crate::neural_network::loss_function::*;
pub use crate::neural_network::model::Model;
pub use crate::neural_network::node::Node;
pub use crate::neural_network::optimizer::*;
pub use crate::neural_network::{Layer, LossFunction, Optimizer, Tensor, Vector};
pub use crate::{IoError, ModelError};
