use crate::error::ModelError;
use ndarray::{ArrayD, Axis};
use rand::Rng;
use rand::seq::SliceRandom;

/// Ensures two arrays hold the same, non-zero number of samples along axis 0.
fn validate_sample_counts(x: &ArrayD<f64>, y: &ArrayD<f64>) -> Result<usize, ModelError> {
    if x.ndim() == 0 || y.ndim() == 0 {
        return Err(ModelError::InputValidationError(
            "x and y must have a sample axis".to_string(),
        ));
    }

    let n_samples = x.shape()[0];
    if n_samples == 0 {
        return Err(ModelError::InputValidationError(
            "Cannot process an empty dataset".to_string(),
        ));
    }
    if n_samples != y.shape()[0] {
        return Err(ModelError::InputValidationError(format!(
            "x and y must have the same number of samples, x: {}, y: {}",
            n_samples,
            y.shape()[0]
        )));
    }
    Ok(n_samples)
}

/// Shuffles inputs and targets with one shared permutation of axis 0.
///
/// Sample `i` of the shuffled `x` still belongs to sample `i` of the shuffled `y`.
///
/// # Parameters
///
/// - `x` - Inputs, samples along axis 0
/// - `y` - Targets, samples along axis 0
/// - `rng` - Random generator drawing the permutation
///
/// # Returns
///
/// - `Ok((ArrayD<f64>, ArrayD<f64>))` - Shuffled copies of `x` and `y`
/// - `Err(ModelError::InputValidationError)` - If the sample counts differ or are zero
///
/// # Example
/// ```rust
/// use nodenet::utility::shuffle;
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let x = array![[0.0], [1.0], [2.0], [3.0]].into_dyn();
/// let y = array![0.0, 10.0, 20.0, 30.0].into_dyn();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let (x_shuffled, y_shuffled) = shuffle(&x, &y, &mut rng).unwrap();
/// for i in 0..4 {
///     assert_eq!(x_shuffled[[i, 0]] * 10.0, y_shuffled[[i]]);
/// }
/// ```
pub fn shuffle<R: Rng + ?Sized>(
    x: &ArrayD<f64>,
    y: &ArrayD<f64>,
    rng: &mut R,
) -> Result<(ArrayD<f64>, ArrayD<f64>), ModelError> {
    let n_samples = validate_sample_counts(x, y)?;

    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);

    Ok((x.select(Axis(0), &indices), y.select(Axis(0), &indices)))
}

/// Splits inputs and targets into a training part and a validation part, keeping sample order.
///
/// The first `floor(n * (1 - val_split))` samples form the training set and the remaining
/// samples the validation set.
///
/// # Parameters
///
/// - `x` - Inputs, samples along axis 0
/// - `y` - Targets, samples along axis 0
/// - `val_split` - Fraction of the samples used for validation, in `(0, 1)`
///
/// # Returns
///
/// - `Ok((x_train, y_train, x_val, y_val))` - The four parts
/// - `Err(ModelError::InputValidationError)` - If `val_split` is out of range, the sample
///   counts differ, or either part would be empty
///
/// # Example
/// ```rust
/// use nodenet::utility::validation_split;
/// use ndarray::array;
///
/// let x = array![[1.0], [2.0], [3.0], [4.0]].into_dyn();
/// let y = array![1.0, 2.0, 3.0, 4.0].into_dyn();
///
/// let (x_train, y_train, x_val, y_val) = validation_split(&x, &y, 0.25).unwrap();
/// assert_eq!(x_train.shape(), &[3, 1]);
/// assert_eq!(y_val, array![4.0].into_dyn());
/// ```
pub fn validation_split(
    x: &ArrayD<f64>,
    y: &ArrayD<f64>,
    val_split: f64,
) -> Result<(ArrayD<f64>, ArrayD<f64>, ArrayD<f64>, ArrayD<f64>), ModelError> {
    if !(val_split > 0.0 && val_split < 1.0) {
        return Err(ModelError::InputValidationError(format!(
            "val_split must be between 0 and 1 (exclusive), got {}",
            val_split
        )));
    }
    let n_samples = validate_sample_counts(x, y)?;

    let split_index = (n_samples as f64 * (1.0 - val_split)).floor() as usize;
    if split_index == 0 || split_index == n_samples {
        return Err(ModelError::InputValidationError(format!(
            "val_split {} leaves an empty training or validation set for {} samples",
            val_split, n_samples
        )));
    }

    let x_train = x.slice_axis(Axis(0), (..split_index).into()).to_owned();
    let y_train = y.slice_axis(Axis(0), (..split_index).into()).to_owned();
    let x_val = x.slice_axis(Axis(0), (split_index..).into()).to_owned();
    let y_val = y.slice_axis(Axis(0), (split_index..).into()).to_owned();

    Ok((x_train, y_train, x_val, y_val))
}
