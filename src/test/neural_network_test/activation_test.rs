use super::*;

const STEP: f64 = 1e-6;

fn numerical_derivative(activation: &Activation, x: f64) -> f64 {
    let forward = activation.apply_formula(x + STEP).unwrap();
    let backward = activation.apply_formula(x - STEP).unwrap();
    (forward - backward) / (2.0 * STEP)
}

fn check_against_finite_differences(activation: Activation, points: &[f64]) {
    for &x in points {
        let analytic = activation.derivative(x).unwrap();
        let numeric = numerical_derivative(&activation, x);
        assert_abs_diff_eq!(analytic, numeric, epsilon = 1e-5);
        println!("{} derivative at {}: {} (numeric {})", activation, x, analytic, numeric);
    }
}

#[test]
fn test_smooth_activation_derivatives_match_finite_differences() {
    let points = [0.0, 0.5, -0.5, 8.0, -8.0];
    check_against_finite_differences(Activation::Linear, &points);
    check_against_finite_differences(Activation::Sigmoid, &points);
    check_against_finite_differences(Activation::Tanh, &points);
    check_against_finite_differences(Activation::Swish, &points);
    check_against_finite_differences(Activation::Exponential, &[0.0, 0.5, -0.5, 3.0, -8.0]);
}

#[test]
fn test_kinked_activation_derivatives_away_from_zero() {
    let points = [0.5, -0.5, 8.0, -8.0];
    check_against_finite_differences(Activation::ReLU, &points);
    check_against_finite_differences(Activation::LeakyReLU, &points);
    check_against_finite_differences(Activation::prelu(Some(0.25)), &points);
}

#[test]
fn test_relu_derivative_is_zero_at_zero() {
    assert_eq!(Activation::ReLU.derivative(0.0).unwrap(), 0.0);
    assert_eq!(Activation::ReLU.derivative(-3.0).unwrap(), 0.0);
    assert_eq!(Activation::ReLU.derivative(3.0).unwrap(), 1.0);
}

#[test]
fn test_leaky_relu_and_prelu_values() {
    assert_relative_eq!(Activation::LeakyReLU.apply_formula(-2.0).unwrap(), -0.2);
    assert_relative_eq!(Activation::LeakyReLU.apply_formula(2.0).unwrap(), 2.0);

    let prelu = Activation::prelu(Some(0.5));
    assert_relative_eq!(prelu.apply_formula(-4.0).unwrap(), -2.0);
    assert_relative_eq!(prelu.derivative(-4.0).unwrap(), 0.5);
    assert_relative_eq!(prelu.derivative(4.0).unwrap(), 1.0);
}

#[test]
fn test_sigmoid_is_stable_for_large_inputs() {
    let large = Activation::Sigmoid.apply_formula(1e10).unwrap();
    let small = Activation::Sigmoid.apply_formula(-1e10).unwrap();
    assert!(large.is_finite() && small.is_finite());
    assert_relative_eq!(large, 1.0);
    assert_abs_diff_eq!(small, 0.0);
}

#[test]
fn test_prelu_parameter_is_drawn_when_missing() {
    let mut prelu = Activation::prelu(None);
    assert!(matches!(
        prelu.apply_formula(-1.0),
        Err(ModelError::ConfigurationError(_))
    ));

    let mut rng = StdRng::seed_from_u64(5);
    prelu.initialize(&mut rng);
    let Activation::Parametric(func) = &prelu else {
        panic!("expected a parametric activation");
    };
    let a = func.param("a").unwrap();
    assert_relative_eq!(prelu.apply_formula(-1.0).unwrap(), -a);

    // an explicit value is never overwritten
    let mut fixed = Activation::prelu(Some(0.3));
    fixed.initialize(&mut rng);
    assert_relative_eq!(fixed.derivative(-1.0).unwrap(), 0.3);
}

#[test]
fn test_softmax_is_vectorial() {
    let softmax = Activation::Softmax;
    assert_eq!(softmax.kind(), ActivationKind::Vectorial);
    assert!(!softmax.is_differentiable());
    assert_eq!(softmax.node_activation(), Activation::Linear);

    let output = softmax.apply_vector(&array![1.0, 2.0, 3.0]).unwrap();
    assert_relative_eq!(output.sum(), 1.0, epsilon = 1e-12);
    assert!(output[2] > output[1] && output[1] > output[0]);

    // shifting by the max keeps huge inputs finite
    let output = softmax.apply_vector(&array![1000.0, 1000.0]).unwrap();
    assert_relative_eq!(output[0], 0.5);

    assert!(matches!(
        softmax.derivative_vector(&array![1.0, 2.0]),
        Err(ModelError::NotImplemented(_))
    ));
    assert!(matches!(
        softmax.derivative(1.0),
        Err(ModelError::NotImplemented(_))
    ));
}

#[test]
fn test_activation_from_str() {
    let names = [
        "exponential",
        "leakyrelu",
        "linear",
        "prelu",
        "relu",
        "sigmoid",
        "softmax",
        "swish",
        "tanh",
    ];
    for name in names {
        let activation: Activation = name.parse().unwrap();
        assert_eq!(activation.name(), name);
    }

    assert_eq!("ReLU".parse::<Activation>().unwrap(), Activation::ReLU);
    assert!(matches!(
        "gelu".parse::<Activation>(),
        Err(ModelError::ConfigurationError(_))
    ));
}
