use crate::metric::Metric;
use crate::neural_network::input::{format_shape, input_size};
use crate::neural_network::serialize_weight::{SerializableLayer, SerializableModel};
use crate::neural_network::*;
use crate::utility::data_processing::shuffle;
use crate::{IoError, ModelError};
use ahash::AHashMap;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::{Axis, IxDyn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::{from_reader, to_writer_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{debug, info};

/// Name used when the configuration does not provide one
const DEFAULT_MODEL_NAME: &str = "model";

/// A feed-forward model: an ordered stack of layers plus a loss and an optimizer.
///
/// Layers are appended with [`Model::add_layer`], which infers every new layer's fan-in from
/// the layers before it and draws its weights from the model's random generator. Layers run
/// in insertion order for prediction and in reverse order for the backward pass. Training
/// processes samples one at a time: forward, loss, backward.
///
/// Until [`Model::compile`] is called the model uses `MeanSquaredError` and `SGD(0.01)`; it
/// can predict and train, but not evaluate.
///
/// # Example
/// ```rust
/// use nodenet::prelude::*;
/// use ndarray::array;
///
/// let mut model = Model::new(ModelConfig::seeded(0).with_name("demo"));
/// model.add_layer(Dense::new(16).unwrap().with_input_shape(&[16]).unwrap()).unwrap();
/// model.add_layer(Dense::new(8).unwrap().with_activation(Activation::ReLU)).unwrap();
/// model.add_layer(Dense::new(4).unwrap().with_activation(Activation::Softmax)).unwrap();
///
/// assert_eq!(model.output_shape(), Some(&[4][..]));
///
/// let summary = model.summary(false);
/// assert!(summary.contains("Total number of parameters: 416"));
/// ```
pub struct Model {
    name: String,
    layers: Vec<Box<dyn Layer>>,
    loss: Box<dyn LossFunction>,
    optimizer: Box<dyn Optimizer>,
    metrics: Vec<Metric>,
    input_shape: Option<Vec<usize>>,
    input_size: Option<usize>,
    output_shape: Option<Vec<usize>>,
    compiled: bool,
    rng: StdRng,
}

impl Model {
    /// Creates an empty model.
    ///
    /// The random generator is seeded from `config.seed`, or from OS entropy when no seed is given.
    pub fn new(config: ModelConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Model {
            name: config
                .name
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            layers: Vec::new(),
            loss: Box::new(MeanSquaredError::new()),
            optimizer: Box::new(SGD::default()),
            metrics: Vec::new(),
            input_shape: None,
            input_size: None,
            output_shape: None,
            compiled: false,
            rng,
        }
    }

    /// Creates a model and adds the given layers in order.
    ///
    /// # Returns
    ///
    /// - `Ok(Model)` - The model with every layer built
    /// - `Err(ModelError)` - The first error raised by `add_layer`
    pub fn with_layers(layers: Vec<Box<dyn Layer>>, config: ModelConfig) -> Result<Self, ModelError> {
        let mut model = Self::new(config);
        for layer in layers {
            model.add_boxed_layer(layer)?;
        }
        Ok(model)
    }

    /// Appends a layer to the model.
    ///
    /// The first layer must declare an input shape and allow first placement. Every later
    /// layer gets its fan-in from the nearest previous layer that is not pass-through, or from
    /// the model input when only pass-through layers precede it. A declared input shape must
    /// match the output shape of the layer right before it.
    ///
    /// # Returns
    ///
    /// - `Ok(&mut Self)` - The model, for chaining
    /// - `Err(ModelError::ConfigurationError)` - Missing input shape, forbidden placement, or
    ///   an input shape the layer cannot consume
    /// - `Err(ModelError::ShapeError)` - Conflicting input shape or impossible reshape
    pub fn add_layer<L: Layer + 'static>(&mut self, layer: L) -> Result<&mut Self, ModelError> {
        self.add_boxed_layer(Box::new(layer))
    }

    /// Appends an already boxed layer. See [`Model::add_layer`].
    pub fn add_boxed_layer(&mut self, mut layer: Box<dyn Layer>) -> Result<&mut Self, ModelError> {
        let index = self.layers.len();

        let mut model_input = None;
        let fan_in = match self.layers.last() {
            None => {
                if !layer.placement().allows_first() {
                    return Err(ModelError::ConfigurationError(format!(
                        "{} cannot be the first layer of a model",
                        layer.layer_type()
                    )));
                }
                let shape = layer.input_shape().map(<[usize]>::to_vec).ok_or_else(|| {
                    ModelError::ConfigurationError(format!(
                        "the first layer ({}) must declare an input_shape",
                        layer.layer_type()
                    ))
                })?;
                Self::check_input_shape(layer.as_ref(), &shape, index)?;
                let size = input_size(&shape)?;
                model_input = Some((shape, size));
                size
            }
            Some(previous) => {
                let previous_output = previous.effective_output_shape();
                if let Some(declared) = layer.input_shape() {
                    if declared != previous_output.as_slice() {
                        return Err(ModelError::ShapeError(format!(
                            "{} (layer {}) declares input shape {} but the previous layer {} (layer {}) outputs {}",
                            layer.layer_type(),
                            index,
                            format_shape(declared),
                            previous.layer_type(),
                            index - 1,
                            format_shape(&previous_output)
                        )));
                    }
                }
                Self::check_input_shape(layer.as_ref(), &previous_output, index)?;
                let fan_in = self.inferred_fan_in()?;
                layer.set_input_shape(previous_output);
                fan_in
            }
        };

        layer.build(fan_in, &mut self.rng)?;
        debug!(
            index,
            layer_type = layer.layer_type(),
            fan_in,
            "layer built"
        );

        if let Some((shape, size)) = model_input {
            self.input_shape = Some(shape);
            self.input_size = Some(size);
        }
        self.output_shape = Some(layer.effective_output_shape());
        self.layers.push(layer);
        Ok(self)
    }

    fn check_input_shape(layer: &dyn Layer, shape: &[usize], index: usize) -> Result<(), ModelError> {
        if !layer.accepts_input_shape(shape) {
            return Err(ModelError::ConfigurationError(format!(
                "{} (layer {}) cannot consume samples of shape {}; add a Flatten layer first",
                layer.layer_type(),
                index,
                format_shape(shape)
            )));
        }
        Ok(())
    }

    /// Fan-in of the next layer: walk back past pass-through layers to the nearest layer
    /// that produces a shape, falling back to the model input size.
    fn inferred_fan_in(&self) -> Result<usize, ModelError> {
        match self.layers.iter().rev().find(|layer| !layer.is_pass_through()) {
            Some(layer) => input_size(&layer.effective_output_shape()),
            None => self.input_size.ok_or_else(|| {
                ModelError::StateError("the model input size is unknown".to_string())
            }),
        }
    }

    /// Replaces the loss, the optimizer and the evaluation metrics, and marks the model compiled.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The model can now be evaluated
    /// - `Err(ModelError::ConfigurationError)` - If the last layer cannot produce the model output
    pub fn compile(
        &mut self,
        loss: Box<dyn LossFunction>,
        optimizer: Box<dyn Optimizer>,
        metrics: Vec<Metric>,
    ) -> Result<(), ModelError> {
        self.check_last_placement()?;

        debug!(
            loss = loss.name(),
            optimizer = optimizer.name(),
            learning_rate = optimizer.learning_rate(),
            "model compiled"
        );
        self.loss = loss;
        self.optimizer = optimizer;
        self.metrics = metrics;
        self.compiled = true;
        Ok(())
    }

    fn check_last_placement(&self) -> Result<(), ModelError> {
        if let Some(last) = self.layers.last() {
            if !last.placement().allows_last() {
                return Err(ModelError::ConfigurationError(format!(
                    "{} cannot be the last layer of a model",
                    last.layer_type()
                )));
            }
        }
        Ok(())
    }

    fn require_layers(&self) -> Result<(), ModelError> {
        if self.layers.is_empty() {
            return Err(ModelError::StateError(
                "the model has no layers".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks that `x` is a batch of samples of the model's input shape.
    fn validate_batch_shape(&self, x: &Tensor) -> Result<(), ModelError> {
        let input_shape = self
            .input_shape
            .as_ref()
            .ok_or_else(|| ModelError::StateError("the model has no input shape".to_string()))?;

        if x.ndim() != input_shape.len() + 1 || &x.shape()[1..] != input_shape.as_slice() {
            let expected = input_shape
                .iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(ModelError::ShapeError(format!(
                "expected input of shape (n, {}), got {}",
                expected,
                format_shape(x.shape())
            )));
        }
        if x.shape()[0] == 0 {
            return Err(ModelError::InputValidationError(
                "Input tensor contains no samples".to_string(),
            ));
        }
        Ok(())
    }

    /// Brings targets to the shape `(n, ...output_shape)`.
    ///
    /// A target tensor whose samples hold the right number of values in another layout (for
    /// instance `(n,)` for a single-output model) is reshaped; anything else is rejected.
    fn align_targets(&self, y: &Tensor, n_samples: usize) -> Result<Tensor, ModelError> {
        let output_shape = self
            .output_shape
            .as_ref()
            .ok_or_else(|| ModelError::StateError("the model has no output shape".to_string()))?;

        let mut expected = vec![n_samples];
        expected.extend_from_slice(output_shape);
        if y.shape() == expected.as_slice() {
            return Ok(y.clone());
        }

        let per_sample: usize = output_shape.iter().product();
        if y.ndim() >= 1 && y.shape()[0] == n_samples && y.len() == n_samples * per_sample {
            return Tensor::from_shape_vec(IxDyn(&expected), y.iter().cloned().collect())
                .map_err(|e| ModelError::ProcessingError(format!("target reshape failed: {}", e)));
        }

        Err(ModelError::ShapeError(format!(
            "expected targets of shape {}, got {}",
            format_shape(&expected),
            format_shape(y.shape())
        )))
    }

    fn set_training(&mut self, is_training: bool) {
        for layer in &mut self.layers {
            layer.set_training(is_training);
        }
    }

    /// Runs one sample through every layer in order.
    ///
    /// # Parameters
    ///
    /// * `sample` - A single sample of the model's input shape
    pub fn forward(&mut self, sample: &Tensor) -> Result<Tensor, ModelError> {
        self.require_layers()?;

        let mut output = sample.clone();
        for layer in &mut self.layers {
            output = layer.forward(&output)?;
        }
        Ok(output)
    }

    /// Predicts the output of a single sample or of every sample of a batch.
    ///
    /// A tensor of exactly the model's input shape is one sample and gives one unbatched
    /// output. A tensor with one extra leading axis is a batch.
    ///
    /// # Parameters
    ///
    /// - `x` - One sample of shape `input_shape`, or a batch of shape `(n, ...input_shape)`
    /// - `verbose` - Draws a progress bar over the samples
    ///
    /// # Returns
    ///
    /// - `Ok(Tensor)` - Output of shape `output_shape` for a sample, `(n, ...output_shape)` for a batch
    /// - `Err(ModelError::StateError)` - If the model has no layers
    /// - `Err(ModelError::ShapeError)` - If `x` is neither a sample nor a batch of the input shape
    pub fn predict(&mut self, x: &Tensor, verbose: bool) -> Result<Tensor, ModelError> {
        self.require_layers()?;
        if self.input_shape.as_deref() == Some(x.shape()) {
            self.set_training(false);
            let output = self.forward(x)?;
            debug!(samples = 1, "prediction completed");
            return Ok(output);
        }
        self.validate_batch_shape(x)?;
        self.set_training(false);

        let n_samples = x.shape()[0];
        let progress_bar = progress_bar(n_samples as u64, verbose, "{pos}/{len} | {msg}")?;
        progress_bar.set_message("Predicting");

        let mut outputs = Vec::with_capacity(n_samples);
        for sample in x.axis_iter(Axis(0)) {
            outputs.push(self.forward(&sample.to_owned())?);
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Prediction completed");
        debug!(samples = n_samples, "prediction completed");

        stack_samples(&outputs)
    }

    /// The loss used for training and evaluation: the last layer's override if it has one,
    /// otherwise the model loss.
    fn active_loss(&self) -> &dyn LossFunction {
        self.layers
            .last()
            .and_then(|layer| layer.loss())
            .unwrap_or(&*self.loss)
    }

    /// Computes the loss between targets and predictions with the active loss function.
    pub fn compute_loss(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        self.active_loss().compute(y_true, y_pred)
    }

    /// Propagates the loss gradient of one sample backward and updates the weights.
    ///
    /// The gradient of the loss with respect to `y_pred` is flattened and handed to the layers
    /// in reverse order. A trainable layer computes one gradient per node, lets the optimizer
    /// update the node weights and passes on the column sum of its per-node gradients; a
    /// non-trainable layer passes the gradient through `backward_pass_through`.
    ///
    /// Must follow a `forward` call on the same sample.
    pub fn backward(&mut self, y_true: &Tensor, y_pred: &Tensor) -> Result<(), ModelError> {
        self.require_layers()?;

        let loss_gradient = self.active_loss().derivative(y_true, y_pred)?;
        let mut gradient: Vector = loss_gradient.iter().cloned().collect();

        for layer in self.layers.iter_mut().rev() {
            gradient = if layer.is_trainable() {
                let node_gradients = layer.compute_gradients(&gradient)?;
                layer.update_weights(&*self.optimizer, &node_gradients)?;
                layer.core().column_sum(&node_gradients)
            } else {
                layer.backward_pass_through(&gradient)?
            };
        }
        Ok(())
    }

    /// Trains the model.
    ///
    /// Samples are processed one at a time: forward, loss, backward with a weight update.
    /// `options.batch_size` only sets how often the progress bar refreshes.
    ///
    /// # Parameters
    ///
    /// - `x` - Batch of shape `(n, ...input_shape)`
    /// - `y` - Targets, one per sample
    /// - `options` - Epochs, batch size, shuffling and verbosity
    ///
    /// # Returns
    ///
    /// - `Ok(History)` - Mean loss of every epoch
    /// - `Err(ModelError::InputValidationError)` - Invalid options or sample count mismatch
    /// - `Err(ModelError::ShapeError)` - If `x` or `y` do not match the model shapes
    pub fn train(
        &mut self,
        x: &Tensor,
        y: &Tensor,
        options: &TrainOptions,
    ) -> Result<History, ModelError> {
        options.validate()?;
        self.require_layers()?;
        self.check_last_placement()?;

        if x.ndim() == 0 || y.ndim() == 0 || x.shape()[0] != y.shape()[0] {
            return Err(ModelError::InputValidationError(format!(
                "x and y must contain the same number of samples, got {} and {}",
                format_shape(x.shape()),
                format_shape(y.shape())
            )));
        }
        self.validate_batch_shape(x)?;
        let y = self.align_targets(y, x.shape()[0])?;

        self.set_training(true);
        let result = self.run_epochs(x, &y, options);
        self.set_training(false);
        result
    }

    fn run_epochs(
        &mut self,
        x: &Tensor,
        y: &Tensor,
        options: &TrainOptions,
    ) -> Result<History, ModelError> {
        let n_samples = x.shape()[0];
        let progress_bar = progress_bar(
            (options.epochs * n_samples) as u64,
            options.verbose,
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Epoch {msg}",
        )?;

        let mut history = History::default();
        for epoch in 0..options.epochs {
            let (x_epoch, y_epoch) = if options.shuffle {
                shuffle(x, y, &mut self.rng)?
            } else {
                (x.clone(), y.clone())
            };

            let mut epoch_loss = 0.0;
            let samples = x_epoch.axis_iter(Axis(0)).zip(y_epoch.axis_iter(Axis(0)));
            for (i, (x_sample, y_sample)) in samples.enumerate() {
                let y_sample = y_sample.to_owned();
                let y_pred = self.forward(&x_sample.to_owned())?;
                epoch_loss += self.compute_loss(&y_sample, &y_pred)?;
                self.backward(&y_sample, &y_pred)?;

                let seen = i + 1;
                if seen % options.batch_size == 0 || seen == n_samples {
                    progress_bar.set_position((epoch * n_samples + seen) as u64);
                    progress_bar.set_message(format!(
                        "{}/{} | Avg Loss: {:.6}",
                        epoch + 1,
                        options.epochs,
                        epoch_loss / seen as f64
                    ));
                }
            }

            let mean_loss = epoch_loss / n_samples as f64;
            info!(epoch = epoch + 1, loss = mean_loss, "epoch completed");
            history.record_epoch(mean_loss);
        }
        progress_bar.finish_with_message("Training completed");

        Ok(history)
    }

    /// Evaluates the model without updating any weight.
    ///
    /// # Returns
    ///
    /// - `Ok(Evaluation)` - Mean per-sample loss and every metric given to `compile`
    /// - `Err(ModelError::StateError)` - If the model is not compiled or has no layers
    /// - `Err(ModelError::ShapeError)` - If `x` or `y` do not match the model shapes
    pub fn evaluate(&mut self, x: &Tensor, y: &Tensor) -> Result<Evaluation, ModelError> {
        if !self.compiled {
            return Err(ModelError::StateError(
                "the model must be compiled before evaluation".to_string(),
            ));
        }
        self.require_layers()?;
        self.validate_batch_shape(x)?;

        let n_samples = x.shape()[0];
        let y = self.align_targets(y, n_samples)?;
        let predictions = self.predict(x, false)?;

        let mut total_loss = 0.0;
        for (y_sample, y_pred) in y.axis_iter(Axis(0)).zip(predictions.axis_iter(Axis(0))) {
            total_loss += self.compute_loss(&y_sample.to_owned(), &y_pred.to_owned())?;
        }
        let loss = total_loss / n_samples as f64;

        let mut metrics = AHashMap::new();
        for metric in &self.metrics {
            metrics.insert(*metric, metric.compute(&y, &predictions)?);
        }

        let evaluation = Evaluation::new(loss, metrics);
        info!(samples = n_samples, "evaluation: {}", evaluation);
        Ok(evaluation)
    }

    /// Describes the model: every layer's type, output shape, node count and parameter count.
    ///
    /// The parameter count of a layer is the sum of its node weight-vector lengths.
    ///
    /// # Parameters
    ///
    /// * `verbose` - Also prints the summary to stdout
    pub fn summary(&self, verbose: bool) -> String {
        let col1_width = 33;
        let col2_width = 20;
        let col3_width = 9;
        let col4_width = 15;

        let mut lines = vec![
            format!("Model: \"{}\"", self.name),
            format!(
                "┏{}┳{}┳{}┳{}┓",
                "━".repeat(col1_width),
                "━".repeat(col2_width),
                "━".repeat(col3_width),
                "━".repeat(col4_width)
            ),
            format!(
                "┃ {:<31} ┃ {:<18} ┃ {:>7} ┃ {:>13} ┃",
                "Layer (type)", "Output Shape", "Nodes", "Param #"
            ),
            format!(
                "┡{}╇{}╇{}╇{}┩",
                "━".repeat(col1_width),
                "━".repeat(col2_width),
                "━".repeat(col3_width),
                "━".repeat(col4_width)
            ),
        ];

        let mut trainable_param_count = 0;
        let mut non_trainable_param_count = 0;
        for (i, layer) in self.layers.iter().enumerate() {
            let layer_name = if i == 0 {
                "Layer".to_string()
            } else {
                format!("Layer_{}", i)
            };
            let param_count = layer.param_count();
            if layer.is_trainable() {
                trainable_param_count += param_count;
            } else {
                non_trainable_param_count += param_count;
            }

            lines.push(format!(
                "│ {:<31} │ {:<18} │ {:>7} │ {:>13} │",
                format!("{} ({})", layer_name, layer.layer_type()),
                format_shape(&layer.effective_output_shape()),
                layer.units(),
                param_count
            ));
        }

        lines.push(format!(
            "└{}┴{}┴{}┴{}┘",
            "─".repeat(col1_width),
            "─".repeat(col2_width),
            "─".repeat(col3_width),
            "─".repeat(col4_width)
        ));
        lines.push(format!(
            "Total number of parameters: {}",
            trainable_param_count + non_trainable_param_count
        ));
        lines.push(format!(" Trainable params: {}", trainable_param_count));
        lines.push(format!(" Non-trainable params: {}", non_trainable_param_count));

        let summary = lines.join("\n");
        if verbose {
            println!("{}", summary);
        }
        summary
    }

    /// Saves every layer's weights, bias and activation parameters to a JSON file.
    pub fn save_weights(&self, path: &str) -> Result<(), IoError> {
        let serializable_model = SerializableModel {
            name: self.name.clone(),
            layers: self
                .layers
                .iter()
                .map(|layer| SerializableLayer::from_layer(layer.as_ref()))
                .collect(),
        };

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        to_writer_pretty(&mut writer, &serializable_model)?;
        writer.flush()?;

        debug!(path, layers = self.layers.len(), "weights saved");
        Ok(())
    }

    /// Loads weights saved by [`Model::save_weights`] into a model of the same structure.
    ///
    /// Every saved layer is checked against the model before any layer is modified, so a
    /// failed load leaves the model unchanged.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Every layer holds the saved state
    /// - `Err(IoError::StructureMismatch)` - If the layer count or any layer differs
    /// - `Err(IoError::StdIoError | IoError::JsonError)` - If the file cannot be read or parsed
    pub fn load_weights(&mut self, path: &str) -> Result<(), IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        let serializable_model: SerializableModel = from_reader(reader)?;

        if serializable_model.layers.len() != self.layers.len() {
            return Err(IoError::StructureMismatch(format!(
                "Layer count mismatch: model has {} layers, file has {} layers",
                self.layers.len(),
                serializable_model.layers.len()
            )));
        }

        // no layer is written until every layer passed its check
        for (index, (saved, layer)) in serializable_model.layers.iter().zip(&self.layers).enumerate() {
            saved.check_layer(layer.as_ref(), index)?;
        }
        for (index, (saved, layer)) in serializable_model
            .layers
            .iter()
            .zip(self.layers.iter_mut())
            .enumerate()
        {
            saved.apply_to_layer(layer.as_mut(), index)?;
        }

        debug!(path, layers = self.layers.len(), "weights loaded");
        Ok(())
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the layers in forward order.
    pub fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    /// Returns the layers mutably, e.g. to set weights by hand.
    pub fn layers_mut(&mut self) -> &mut [Box<dyn Layer>] {
        &mut self.layers
    }

    /// Returns the input shape declared by the first layer.
    pub fn input_shape(&self) -> Option<&[usize]> {
        self.input_shape.as_deref()
    }

    get_field!(input_size, input_size, Option<usize>);
    get_field!(is_compiled, compiled, bool);

    /// Returns the output shape of the last layer.
    pub fn output_shape(&self) -> Option<&[usize]> {
        self.output_shape.as_deref()
    }

    /// Returns the model loss function.
    pub fn loss(&self) -> &dyn LossFunction {
        self.loss.as_ref()
    }

    /// Returns the optimizer.
    pub fn optimizer(&self) -> &dyn Optimizer {
        self.optimizer.as_ref()
    }

    /// Returns the metrics reported by `evaluate`.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }
}

/// Stacks per-sample tensors along a new leading axis.
fn stack_samples(samples: &[Tensor]) -> Result<Tensor, ModelError> {
    let views: Vec<_> = samples.iter().map(|s| s.view()).collect();
    ndarray::stack(Axis(0), &views)
        .map_err(|e| ModelError::ProcessingError(format!("cannot stack outputs: {}", e)))
}

/// A progress bar of `len` steps, hidden unless `verbose`.
fn progress_bar(len: u64, verbose: bool, template: &str) -> Result<ProgressBar, ModelError> {
    if !verbose {
        return Ok(ProgressBar::hidden());
    }

    let progress_bar = ProgressBar::new(len);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .map_err(|e| ModelError::ProcessingError(format!("progress bar template: {}", e)))?
            .progress_chars("█▓░"),
    );
    Ok(progress_bar)
}
