use super::*;

#[test]
fn test_sgd_updates_in_place() {
    let sgd = SGD::new(0.5).unwrap();
    let mut weights = array![1.0, -1.0, 0.0];

    let updated = sgd
        .apply_gradients(&mut weights, &array![2.0, -2.0, 1.0])
        .unwrap();
    assert_eq!(*updated, array![0.0, 0.0, -0.5]);
    assert_eq!(weights, array![0.0, 0.0, -0.5]);
}

#[test]
fn test_sgd_rejects_length_mismatch() {
    let sgd = SGD::default();
    let mut weights = array![1.0, 2.0];

    assert!(matches!(
        sgd.apply_gradients(&mut weights, &array![1.0]),
        Err(ModelError::ShapeError(_))
    ));
    assert_eq!(weights, array![1.0, 2.0]);
}

#[test]
fn test_sgd_learning_rate_validation() {
    assert!(SGD::new(-0.1).is_err());
    assert!(SGD::new(0.0).is_err());
    assert!(SGD::new(f64::INFINITY).is_err());

    let sgd = SGD::default();
    assert_eq!(sgd.learning_rate(), 0.01);
    assert_eq!(sgd.name(), "SGD");
    assert_eq!(SGD::new(0.1).unwrap().with_name("plain").name(), "plain");
}

#[test]
fn test_layer_update_weights_through_optimizer() {
    let mut dense = built_dense(2, 2, Activation::Linear);
    dense
        .set_weights(vec![array![1.0, 1.0], array![2.0, 2.0]])
        .unwrap();

    let sgd = SGD::new(0.1).unwrap();
    dense
        .update_weights(&sgd, &[array![1.0, 0.0], array![0.0, 10.0]])
        .unwrap();

    assert_relative_eq!(dense.nodes()[0].weights()[0], 0.9);
    assert_relative_eq!(dense.nodes()[0].weights()[1], 1.0);
    assert_relative_eq!(dense.nodes()[1].weights()[1], 1.0);

    assert!(dense.update_weights(&sgd, &[array![1.0, 0.0]]).is_err());
}
