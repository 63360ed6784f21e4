use super::*;

#[test]
fn test_dense_forward_pass_dimensions() {
    let mut dense = built_dense(3, 4, Activation::ReLU);
    let input = Array1::<f64>::ones(4).into_dyn();

    let output = dense.forward(&input).unwrap();
    assert_eq!(output.shape(), &[3]);
    println!(
        "Forward pass dimension test passed: {:?} -> {:?}",
        input.shape(),
        output.shape()
    );
}

#[test]
fn test_dense_rejects_wrong_input() {
    let mut dense = built_dense(3, 4, Activation::Linear);

    let too_short = Array1::<f64>::ones(3).into_dyn();
    assert!(matches!(
        dense.forward(&too_short),
        Err(ModelError::ShapeError(_))
    ));

    let two_dimensional = Array2::<f64>::ones((2, 2)).into_dyn();
    assert!(matches!(
        dense.forward(&two_dimensional),
        Err(ModelError::ShapeError(_))
    ));
}

#[test]
fn test_dense_rejects_zero_units() {
    assert!(matches!(
        Dense::new(0),
        Err(ModelError::ConfigurationError(_))
    ));
}

#[test]
fn test_dense_build_draws_uniform_weights() {
    let dense = built_dense(8, 5, Activation::Linear);

    assert_eq!(dense.units(), 8);
    assert_eq!(dense.param_count(), 40);
    for node in dense.nodes() {
        assert_eq!(node.fan_in(), 5);
        assert!(node.weights().iter().all(|w| (-1.0..=1.0).contains(w)));
    }
    // bias disabled by default
    assert_eq!(dense.bias(), 0.0);
}

#[test]
fn test_dense_bias_is_added_to_every_output() {
    let mut dense = Dense::new(2).unwrap().with_bias(true);
    let mut rng = StdRng::seed_from_u64(11);
    dense.build(2, &mut rng).unwrap();
    dense
        .set_weights(vec![array![1.0, 0.0], array![0.0, 1.0]])
        .unwrap();
    dense.set_bias(0.5);

    let output = dense.forward(&array![2.0, 3.0].into_dyn()).unwrap();
    assert_eq!(output, array![2.5, 3.5].into_dyn());
}

#[test]
fn test_dense_softmax_applies_to_the_output_vector() {
    let mut dense = built_dense(3, 2, Activation::Softmax);
    for node in dense.nodes() {
        assert_eq!(node.activation(), &Activation::Linear);
    }

    let output = dense.forward(&array![0.3, -0.7].into_dyn()).unwrap();
    assert_relative_eq!(output.sum(), 1.0, epsilon = 1e-12);
    assert!(output.iter().all(|&p| p > 0.0 && p < 1.0));
}

#[test]
fn test_dense_gradients_per_node() {
    let mut dense = built_dense(2, 3, Activation::Linear);
    let input = array![1.0, 2.0, 3.0];
    dense.forward(&input.clone().into_dyn()).unwrap();

    let gradients = dense.compute_gradients(&array![1.0, -2.0]).unwrap();
    assert_eq!(gradients.len(), 2);
    assert_eq!(gradients[0], input);
    assert_eq!(gradients[1], &input * -2.0);

    assert!(matches!(
        dense.compute_gradients(&array![1.0]),
        Err(ModelError::ShapeError(_))
    ));
}

#[test]
fn test_dense_softmax_gradients_are_zero() {
    let mut dense = built_dense(3, 2, Activation::Softmax);
    dense.forward(&array![1.0, 1.0].into_dyn()).unwrap();

    let gradients = dense.compute_gradients(&array![1.0, 1.0, 1.0]).unwrap();
    for gradient in gradients {
        assert_eq!(gradient, Array1::<f64>::zeros(2));
    }
}

#[test]
fn test_dense_set_weights_checks_structure() {
    let mut dense = built_dense(2, 2, Activation::Linear);

    assert!(dense.set_weights(vec![array![1.0, 2.0]]).is_err());
    assert!(
        dense
            .set_weights(vec![array![1.0, 2.0], array![1.0, 2.0, 3.0]])
            .is_err()
    );
    assert!(
        dense
            .set_weights(vec![array![1.0, 2.0, 3.0], array![1.0, 2.0, 3.0]])
            .is_err()
    );
    dense
        .set_weights(vec![array![1.0, 2.0], array![3.0, 4.0]])
        .unwrap();
    assert_eq!(dense.nodes()[1].weights(), &array![3.0, 4.0]);
}

#[test]
fn test_dense_layer_equality() {
    let a = built_dense(2, 3, Activation::Linear);
    let b = built_dense(2, 3, Activation::Linear);
    let mut c = built_dense(2, 3, Activation::Linear);
    c.set_bias(1.0);

    // same seed, same weights
    assert!(a.layer_eq(&b));
    assert!(!a.layer_eq(&c));
    assert!(a == b);
}

#[test]
fn test_dense_add_loss_override() {
    let mut dense = built_dense(1, 1, Activation::Linear);
    assert!(dense.loss().is_none());

    dense.add_loss(Box::new(MeanAbsoluteError::new()));
    assert_eq!(dense.loss().map(|l| l.name()), Some("MeanAbsoluteError"));
}
