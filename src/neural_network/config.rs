use crate::ModelError;
use serde::{Deserialize, Serialize};

/// Default number of samples between two progress refreshes
pub const DEFAULT_BATCH_SIZE: usize = 16;
/// Default number of passes over the training data
pub const DEFAULT_EPOCHS: usize = 5;

/// Construction-time settings of a [`Model`](crate::neural_network::Model).
///
/// # Fields
///
/// - `name` - Name shown by `summary`; a generated name is used when absent
/// - `seed` - Seed of the model's random generator; OS entropy is used when absent
///
/// # Example
/// ```rust
/// use nodenet::neural_network::ModelConfig;
///
/// let config = ModelConfig::from_json_str(r#"{ "name": "xor", "seed": 7 }"#).unwrap();
/// assert_eq!(config.seed, Some(7));
///
/// let config = ModelConfig::from_json_str("{}").unwrap();
/// assert_eq!(config, ModelConfig::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: Option<String>,
    pub seed: Option<u64>,
}

impl ModelConfig {
    /// A configuration with a fixed seed, for reproducible models.
    pub fn seeded(seed: u64) -> Self {
        Self {
            name: None,
            seed: Some(seed),
        }
    }

    /// Sets the model name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Parses a configuration from JSON. Missing fields take their default.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json)
            .map_err(|e| ModelError::ConfigurationError(format!("invalid model config: {}", e)))
    }
}

/// Options of a training run.
///
/// # Fields
///
/// - `batch_size` - Number of samples between two progress refreshes; weights are still
///   updated after every sample
/// - `epochs` - Number of passes over the training data
/// - `shuffle` - Whether samples are shuffled (jointly with their targets) before each epoch
/// - `verbose` - Whether a progress bar is drawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    pub batch_size: usize,
    pub epochs: usize,
    pub shuffle: bool,
    pub verbose: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            epochs: DEFAULT_EPOCHS,
            shuffle: false,
            verbose: true,
        }
    }
}

impl TrainOptions {
    /// Parses training options from JSON. Missing fields take their default.
    ///
    /// # Example
    /// ```rust
    /// use nodenet::neural_network::TrainOptions;
    ///
    /// let options = TrainOptions::from_json_str(r#"{ "epochs": 20, "shuffle": true }"#).unwrap();
    /// assert_eq!(options.epochs, 20);
    /// assert_eq!(options.batch_size, 16);
    ///
    /// assert!(TrainOptions::from_json_str(r#"{ "epochs": 0 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| ModelError::ConfigurationError(format!("invalid train options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that `epochs` and `batch_size` are at least 1.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.epochs < 1 {
            return Err(ModelError::InputValidationError(format!(
                "epochs must be >= 1, got {}",
                self.epochs
            )));
        }
        if self.batch_size < 1 {
            return Err(ModelError::InputValidationError(format!(
                "batch_size must be >= 1, got {}",
                self.batch_size
            )));
        }
        Ok(())
    }
}
