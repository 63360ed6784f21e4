use crate::IoError;
use crate::neural_network::{Activation, Layer, ParametricFunction, Vector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Serializable snapshot of a whole model: one entry per layer, in forward order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableModel {
    pub name: String,
    pub layers: Vec<SerializableLayer>,
}

/// Serializable state of one layer.
///
/// # Fields
///
/// - `layer_type` - Type name of the layer, checked when loading
/// - `activation` - Activation name and its parameters (PReLU slope)
/// - `bias` - Shared bias
/// - `weights` - One weight vector per node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayer {
    pub layer_type: String,
    pub activation: SerializableActivation,
    pub bias: f64,
    pub weights: Vec<Vec<f64>>,
}

/// Serializable activation: its name and, for parametric functions, its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableActivation {
    pub name: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl SerializableActivation {
    fn from_activation(activation: &Activation) -> Self {
        let params = match activation {
            Activation::Parametric(func) => func
                .params()
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            _ => BTreeMap::new(),
        };
        Self {
            name: activation.name().to_string(),
            params,
        }
    }

    fn to_activation(&self, index: usize) -> Result<Activation, IoError> {
        let activation: Activation = self.name.parse().map_err(|e| {
            IoError::StructureMismatch(format!(
                "layer {}: cannot restore activation {:?}: {}",
                index, self.name, e
            ))
        })?;
        Ok(match activation {
            Activation::Parametric(func) => Activation::Parametric(ParametricFunction::from_params(
                func.kind(),
                self.params
                    .iter()
                    .map(|(k, v)| (k.clone(), *v))
                    .collect(),
            )),
            other => other,
        })
    }
}

impl SerializableLayer {
    /// Captures the state of a layer.
    pub fn from_layer(layer: &dyn Layer) -> Self {
        Self {
            layer_type: layer.layer_type().to_string(),
            activation: SerializableActivation::from_activation(layer.activation()),
            bias: layer.bias(),
            weights: layer
                .nodes()
                .iter()
                .map(|node| node.weights().to_vec())
                .collect(),
        }
    }

    /// Checks that the captured state fits a layer without touching it.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - `apply_to_layer` can restore this state into `layer`
    /// - `Err(IoError::StructureMismatch)` - If the layer type, activation, node count or
    ///   fan-in differ from the saved layer
    pub fn check_layer(&self, layer: &dyn Layer, index: usize) -> Result<(), IoError> {
        if self.layer_type != layer.layer_type() {
            return Err(IoError::StructureMismatch(format!(
                "layer {}: saved type is {}, model has {}",
                index,
                self.layer_type,
                layer.layer_type()
            )));
        }
        if self.activation.name != layer.activation().name() {
            return Err(IoError::StructureMismatch(format!(
                "layer {}: saved activation is {}, model has {}",
                index,
                self.activation.name,
                layer.activation()
            )));
        }
        if self.weights.len() != layer.units() {
            return Err(IoError::StructureMismatch(format!(
                "layer {}: saved {} nodes, model has {}",
                index,
                self.weights.len(),
                layer.units()
            )));
        }

        let fan_in = layer.core().fan_in();
        if let Some(weights) = self.weights.iter().find(|w| w.len() != fan_in) {
            return Err(IoError::StructureMismatch(format!(
                "layer {}: saved weight vectors of length {}, model fan-in is {}",
                index,
                weights.len(),
                fan_in
            )));
        }

        self.activation.to_activation(index)?;
        Ok(())
    }

    /// Writes the captured state back into a layer of the same structure.
    ///
    /// The layer is only modified once [`SerializableLayer::check_layer`] has accepted it.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The layer now holds the saved weights, bias and activation parameters
    /// - `Err(IoError::StructureMismatch)` - If the saved state does not fit the layer
    pub fn apply_to_layer(&self, layer: &mut dyn Layer, index: usize) -> Result<(), IoError> {
        self.check_layer(layer, index)?;

        let activation = self.activation.to_activation(index)?;
        layer
            .set_weights(self.weights.iter().cloned().map(Vector::from).collect())
            .map_err(|e| {
                IoError::StructureMismatch(format!("layer {}: cannot restore weights: {}", index, e))
            })?;
        layer.core_mut().set_activation(activation);
        layer.set_bias(self.bias);
        Ok(())
    }
}
