use super::*;

#[test]
fn test_dropout_rate_validation() {
    assert!(Dropout::new(0.0).is_ok());
    assert!(Dropout::new(0.99).is_ok());
    assert!(matches!(
        Dropout::new(1.0),
        Err(ModelError::ConfigurationError(_))
    ));
    assert!(Dropout::new(-0.1).is_err());
    assert!(Dropout::new(f64::NAN).is_err());
}

#[test]
fn test_dropout_zero_fraction_matches_rate() {
    let rate = 0.3;
    let mut dropout = Dropout::new(rate).unwrap().with_seed(2024);
    dropout.set_training(true);

    let input = Array1::<f64>::ones(20_000).into_dyn();
    let output = dropout.forward(&input).unwrap();

    let zero_fraction = output.iter().filter(|&&v| v == 0.0).count() as f64 / 20_000.0;
    assert_abs_diff_eq!(zero_fraction, rate, epsilon = 0.02);

    let scale = 1.0 / (1.0 - rate);
    for &v in output.iter().filter(|&&v| v != 0.0) {
        assert_relative_eq!(v, scale);
    }
    println!("Dropout zero fraction: {:.4} (rate {})", zero_fraction, rate);
}

#[test]
fn test_dropout_is_identity_outside_training() {
    let mut dropout = Dropout::new(0.5).unwrap().with_seed(1);
    let input = array![[1.0, 2.0], [3.0, 4.0]].into_dyn();

    assert!(!dropout.is_training());
    assert_eq!(dropout.forward(&input).unwrap(), input);
    assert!(dropout.mask().is_none());
}

#[test]
fn test_dropout_backward_reapplies_mask() {
    let mut dropout = Dropout::new(0.5).unwrap().with_seed(8);
    dropout.set_training(true);

    let input = Array1::<f64>::ones(50).into_dyn();
    dropout.forward(&input).unwrap();
    let mask: Vec<f64> = dropout.mask().unwrap().iter().cloned().collect();

    let grad = Array1::<f64>::ones(50);
    let propagated = dropout.backward_pass_through(&grad).unwrap();
    for (g, m) in propagated.iter().zip(mask) {
        assert_relative_eq!(*g, m * 2.0);
    }

    assert!(matches!(
        dropout.backward_pass_through(&Array1::<f64>::ones(3)),
        Err(ModelError::ShapeError(_))
    ));

    dropout.set_training(false);
    assert_eq!(dropout.backward_pass_through(&grad).unwrap(), grad);
}

#[test]
fn test_dropout_seed_makes_masks_reproducible() {
    let input = Array1::<f64>::ones(64).into_dyn();

    let mut first = Dropout::new(0.5).unwrap().with_seed(77);
    let mut second = Dropout::new(0.5).unwrap().with_seed(77);
    first.set_training(true);
    second.set_training(true);

    assert_eq!(
        first.forward(&input).unwrap(),
        second.forward(&input).unwrap()
    );
}

#[test]
fn test_dropout_flags() {
    let dropout = Dropout::new(0.2).unwrap();
    assert!(dropout.is_pass_through());
    assert!(!dropout.is_trainable());
    assert_eq!(dropout.placement(), Placement::Hidden);
    assert_eq!(dropout.layer_type(), "Dropout");
}
