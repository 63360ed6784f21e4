use crate::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::input::format_shape;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threshold separating the negative and the positive class in `binary_accuracy`
const BINARY_THRESHOLD: f64 = 0.5;

/// Metrics that `Model::evaluate` can report next to the loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    MeanSquaredError,
    MeanAbsoluteError,
    CategoricalAccuracy,
    BinaryAccuracy,
}

impl Metric {
    /// Computes the metric over a batch of targets and predictions of the same shape.
    pub fn compute(&self, y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
        match self {
            Metric::MeanSquaredError => mean_squared_error(y_true, y_pred),
            Metric::MeanAbsoluteError => mean_absolute_error(y_true, y_pred),
            Metric::CategoricalAccuracy => categorical_accuracy(y_true, y_pred),
            Metric::BinaryAccuracy => binary_accuracy(y_true, y_pred),
        }
    }

    /// Snake-case name used as the key in evaluation results.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::MeanSquaredError => "mean_squared_error",
            Metric::MeanAbsoluteError => "mean_absolute_error",
            Metric::CategoricalAccuracy => "categorical_accuracy",
            Metric::BinaryAccuracy => "binary_accuracy",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn validate_metric_inputs(y_true: &Tensor, y_pred: &Tensor) -> Result<(), ModelError> {
    if y_true.shape() != y_pred.shape() {
        return Err(ModelError::ShapeError(format!(
            "metric inputs must have the same shape: y_true {} vs y_pred {}",
            format_shape(y_true.shape()),
            format_shape(y_pred.shape())
        )));
    }
    if y_true.is_empty() {
        return Err(ModelError::InputValidationError(
            "cannot compute a metric over empty tensors".to_string(),
        ));
    }
    Ok(())
}

/// Calculates the Mean Squared Error between targets and predictions.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use nodenet::metric::mean_squared_error;
///
/// let actual = array![3.0, -0.5, 2.0, 7.0].into_dyn();
/// let predicted = array![2.5, 0.0, 2.1, 7.8].into_dyn();
/// // (0.25 + 0.25 + 0.01 + 0.64) / 4
/// let mse = mean_squared_error(&actual, &predicted).unwrap();
/// assert!((mse - 0.2875).abs() < 1e-10);
/// ```
pub fn mean_squared_error(y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
    validate_metric_inputs(y_true, y_pred)?;

    let sum_squared_diff = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(0.0, |acc, (&actual, &pred)| {
            let error = actual - pred;
            acc + error * error
        });
    Ok(sum_squared_diff / y_true.len() as f64)
}

/// Calculates the Mean Absolute Error between targets and predictions.
pub fn mean_absolute_error(y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
    validate_metric_inputs(y_true, y_pred)?;

    let sum_abs_diff = y_true
        .iter()
        .zip(y_pred.iter())
        .fold(0.0, |acc, (&actual, &pred)| acc + (actual - pred).abs());
    Ok(sum_abs_diff / y_true.len() as f64)
}

/// Index of the largest value, first one wins on ties.
fn arg_max<'a>(values: impl Iterator<Item = &'a f64>) -> Option<usize> {
    values
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Fraction of samples whose predicted class (arg-max) matches the target class.
///
/// The leading axis indexes samples; every sample is flattened before the arg-max. A 1-D
/// input is treated as a single sample.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use nodenet::metric::categorical_accuracy;
///
/// let y_true = array![[0.0, 1.0], [1.0, 0.0], [1.0, 0.0]].into_dyn();
/// let y_pred = array![[0.2, 0.8], [0.6, 0.4], [0.3, 0.7]].into_dyn();
/// let accuracy = categorical_accuracy(&y_true, &y_pred).unwrap();
/// assert!((accuracy - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn categorical_accuracy(y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
    validate_metric_inputs(y_true, y_pred)?;

    if y_true.ndim() < 2 {
        let hit = arg_max(y_true.iter()) == arg_max(y_pred.iter());
        return Ok(if hit { 1.0 } else { 0.0 });
    }

    let n_samples = y_true.shape()[0];
    let correct = y_true
        .axis_iter(Axis(0))
        .zip(y_pred.axis_iter(Axis(0)))
        .filter(|(t, p)| arg_max(t.iter()) == arg_max(p.iter()))
        .count();
    Ok(correct as f64 / n_samples as f64)
}

/// Fraction of outputs on the same side of 0.5 as their target.
///
/// # Examples
/// ```rust
/// use ndarray::array;
/// use nodenet::metric::binary_accuracy;
///
/// let y_true = array![1.0, 0.0, 1.0, 0.0].into_dyn();
/// let y_pred = array![0.9, 0.2, 0.4, 0.6].into_dyn();
/// assert_eq!(binary_accuracy(&y_true, &y_pred).unwrap(), 0.5);
/// ```
pub fn binary_accuracy(y_true: &Tensor, y_pred: &Tensor) -> Result<f64, ModelError> {
    validate_metric_inputs(y_true, y_pred)?;

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|&(&t, &p)| (t >= BINARY_THRESHOLD) == (p >= BINARY_THRESHOLD))
        .count();
    Ok(correct as f64 / y_true.len() as f64)
}
