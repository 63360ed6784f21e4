use crate::ModelError;
use crate::neural_network::Vector;
use ahash::AHashMap;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use std::fmt;
use std::str::FromStr;

/// Slope applied to negative inputs by `LeakyReLU`
const LEAKY_RELU_SLOPE: f64 = 0.1;

/// Name of the learned slope parameter of `PReLU`
const PRELU_SLOPE: &str = "a";

/// Whether an activation works on single values, carries parameters, or needs the whole output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationKind {
    Scalar,
    Parametric,
    Vectorial,
}

/// Activation functions applied to one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarFunction {
    /// f(x) = x
    Linear,
    /// f(x) = 1 / (1 + e^(-x))
    Sigmoid,
    /// f(x) = e^x
    Exponential,
    /// f(x) = max(0, x)
    ReLU,
    /// f(x) = max(x, 0.1x)
    LeakyReLU,
    /// f(x) = tanh(x)
    Tanh,
    /// f(x) = x * sigmoid(x)
    Swish,
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        // same value, but e^x cannot overflow for negative x
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl ScalarFunction {
    /// Applies the function to `x`.
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            ScalarFunction::Linear => x,
            ScalarFunction::Sigmoid => sigmoid(x),
            ScalarFunction::Exponential => x.exp(),
            ScalarFunction::ReLU => x.max(0.0),
            ScalarFunction::LeakyReLU => x.max(LEAKY_RELU_SLOPE * x),
            ScalarFunction::Tanh => x.tanh(),
            ScalarFunction::Swish => x * sigmoid(x),
        }
    }

    /// Evaluates the analytic derivative at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ScalarFunction::Linear => 1.0,
            ScalarFunction::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            ScalarFunction::Exponential => x.exp(),
            ScalarFunction::ReLU => {
                if x <= 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            ScalarFunction::LeakyReLU => {
                if x >= 0.0 {
                    1.0
                } else {
                    LEAKY_RELU_SLOPE
                }
            }
            ScalarFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ScalarFunction::Swish => {
                let s = sigmoid(x);
                s + x * s * (1.0 - s)
            }
        }
    }
}

/// The shapes of parametric activation known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParametricKind {
    /// f(x) = a * x for x < 0, x otherwise
    PReLU,
}

/// An activation that carries named parameters.
///
/// Parameters not supplied by the caller are drawn from a standard normal distribution when
/// the owning layer is built, using the model's random generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParametricFunction {
    kind: ParametricKind,
    params: AHashMap<String, f64>,
}

impl ParametricFunction {
    /// Creates a PReLU activation.
    ///
    /// # Parameters
    ///
    /// * `a` - Slope for negative inputs. `None` draws it from N(0, 1) at build time.
    pub fn prelu(a: Option<f64>) -> Self {
        let mut params = AHashMap::new();
        if let Some(a) = a {
            params.insert(PRELU_SLOPE.to_string(), a);
        }
        Self {
            kind: ParametricKind::PReLU,
            params,
        }
    }

    /// Rebuilds a parametric function from stored parameters.
    pub fn from_params(kind: ParametricKind, params: AHashMap<String, f64>) -> Self {
        Self { kind, params }
    }

    get_field!(kind, kind, ParametricKind);

    /// Returns the named parameters.
    pub fn params(&self) -> &AHashMap<String, f64> {
        &self.params
    }

    /// Returns one parameter by name.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.params.get(name).copied()
    }

    /// Names of the parameters this kind of function needs.
    fn required_params(&self) -> &'static [&'static str] {
        match self.kind {
            ParametricKind::PReLU => &[PRELU_SLOPE],
        }
    }

    /// Draws every missing parameter from N(0, 1).
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for name in self.required_params() {
            if !self.params.contains_key(*name) {
                let value: f64 = StandardNormal.sample(rng);
                self.params.insert((*name).to_string(), value);
            }
        }
    }

    fn require(&self, name: &str) -> Result<f64, ModelError> {
        self.param(name).ok_or_else(|| {
            ModelError::ConfigurationError(format!(
                "parameter '{}' of {:?} has not been initialized",
                name, self.kind
            ))
        })
    }

    /// Applies the function to `x`.
    pub fn apply(&self, x: f64) -> Result<f64, ModelError> {
        match self.kind {
            ParametricKind::PReLU => {
                let a = self.require(PRELU_SLOPE)?;
                Ok(if x < 0.0 { a * x } else { x })
            }
        }
    }

    /// Evaluates the analytic derivative at `x`.
    pub fn derivative(&self, x: f64) -> Result<f64, ModelError> {
        match self.kind {
            ParametricKind::PReLU => {
                let a = self.require(PRELU_SLOPE)?;
                Ok(if x < 0.0 { a } else { 1.0 })
            }
        }
    }
}

/// Activation functions that need the whole output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorialFunction {
    /// Normalized exponential: e^(x_i) / Σ e^(x_j)
    Softmax,
}

impl VectorialFunction {
    /// Applies the function to a full vector.
    pub fn apply(&self, x: &Vector) -> Vector {
        match self {
            VectorialFunction::Softmax => {
                let max_val = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let exp = x.mapv(|v| (v - max_val).exp());
                let sum = exp.sum();
                exp / sum
            }
        }
    }
}

/// Activation attached to a layer and its nodes.
///
/// Names given as strings are resolved once, through [`FromStr`], into one of these variants,
/// so no lookup happens on the forward path.
///
/// # Example
/// ```rust
/// use nodenet::neural_network::Activation;
///
/// let tanh: Activation = "tanh".parse().unwrap();
/// assert_eq!(tanh, Activation::Tanh);
/// assert!("unknown".parse::<Activation>().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Activation {
    #[default]
    Linear,
    Sigmoid,
    Exponential,
    ReLU,
    LeakyReLU,
    Tanh,
    Swish,
    Parametric(ParametricFunction),
    Softmax,
}

impl Activation {
    /// Creates a PReLU activation. `None` draws the slope at build time.
    pub fn prelu(a: Option<f64>) -> Self {
        Activation::Parametric(ParametricFunction::prelu(a))
    }

    /// Returns the variant family of the activation.
    pub fn kind(&self) -> ActivationKind {
        match self {
            Activation::Parametric(_) => ActivationKind::Parametric,
            Activation::Softmax => ActivationKind::Vectorial,
            _ => ActivationKind::Scalar,
        }
    }

    /// Returns the scalar function behind a scalar variant.
    pub fn as_scalar(&self) -> Option<ScalarFunction> {
        match self {
            Activation::Linear => Some(ScalarFunction::Linear),
            Activation::Sigmoid => Some(ScalarFunction::Sigmoid),
            Activation::Exponential => Some(ScalarFunction::Exponential),
            Activation::ReLU => Some(ScalarFunction::ReLU),
            Activation::LeakyReLU => Some(ScalarFunction::LeakyReLU),
            Activation::Tanh => Some(ScalarFunction::Tanh),
            Activation::Swish => Some(ScalarFunction::Swish),
            Activation::Parametric(_) | Activation::Softmax => None,
        }
    }

    /// Whether `derivative` is supported.
    ///
    /// Vectorial functions are not; layers treat their derivative contribution as zero.
    pub fn is_differentiable(&self) -> bool {
        self.kind() != ActivationKind::Vectorial
    }

    /// The activation a node of a layer with this activation should carry.
    ///
    /// Nodes only ever see scalars, so a vectorial layer activation leaves its nodes linear
    /// and is applied by the layer over the assembled output vector.
    pub fn node_activation(&self) -> Activation {
        match self.kind() {
            ActivationKind::Vectorial => Activation::Linear,
            _ => self.clone(),
        }
    }

    /// Draws missing parameters of a parametric activation.
    pub fn initialize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Activation::Parametric(func) = self {
            func.initialize(rng);
        }
    }

    /// Applies the activation to a single value.
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The activated value
    /// - `Err(ModelError::NotImplemented)` - For vectorial activations
    pub fn apply_formula(&self, x: f64) -> Result<f64, ModelError> {
        match self {
            Activation::Parametric(func) => func.apply(x),
            Activation::Softmax => Err(ModelError::NotImplemented(
                "Softmax needs the whole output vector, use apply_vector".to_string(),
            )),
            scalar => Ok(scalar.as_scalar().map_or(x, |f| f.apply(x))),
        }
    }

    /// Evaluates the derivative at a single value.
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The derivative
    /// - `Err(ModelError::NotImplemented)` - For vectorial activations
    pub fn derivative(&self, x: f64) -> Result<f64, ModelError> {
        match self {
            Activation::Parametric(func) => func.derivative(x),
            Activation::Softmax => Err(ModelError::NotImplemented(
                "Softmax derivative is usually combined with cross-entropy loss".to_string(),
            )),
            scalar => Ok(scalar.as_scalar().map_or(1.0, |f| f.derivative(x))),
        }
    }

    /// Applies the activation over a full vector.
    pub fn apply_vector(&self, x: &Vector) -> Result<Vector, ModelError> {
        match self {
            Activation::Softmax => Ok(VectorialFunction::Softmax.apply(x)),
            Activation::Parametric(func) => {
                let values = x.iter().map(|&v| func.apply(v)).collect::<Result<Vec<_>, _>>()?;
                Ok(Vector::from(values))
            }
            scalar => Ok(match scalar.as_scalar() {
                Some(f) => x.mapv(|v| f.apply(v)),
                None => x.clone(),
            }),
        }
    }

    /// Evaluates the element-wise derivative over a full vector.
    pub fn derivative_vector(&self, x: &Vector) -> Result<Vector, ModelError> {
        let values = x
            .iter()
            .map(|&v| self.derivative(v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Vector::from(values))
    }

    /// The lowercase name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Linear => "linear",
            Activation::Sigmoid => "sigmoid",
            Activation::Exponential => "exponential",
            Activation::ReLU => "relu",
            Activation::LeakyReLU => "leakyrelu",
            Activation::Tanh => "tanh",
            Activation::Swish => "swish",
            Activation::Parametric(func) => match func.kind() {
                ParametricKind::PReLU => "prelu",
            },
            Activation::Softmax => "softmax",
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Activation {
    type Err = ModelError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "exponential" => Ok(Activation::Exponential),
            "leakyrelu" => Ok(Activation::LeakyReLU),
            "linear" => Ok(Activation::Linear),
            "prelu" => Ok(Activation::prelu(None)),
            "relu" => Ok(Activation::ReLU),
            "sigmoid" => Ok(Activation::Sigmoid),
            "softmax" => Ok(Activation::Softmax),
            "swish" => Ok(Activation::Swish),
            "tanh" => Ok(Activation::Tanh),
            other => Err(ModelError::ConfigurationError(format!(
                "unknown activation '{}'",
                other
            ))),
        }
    }
}
