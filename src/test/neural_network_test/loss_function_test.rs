use super::*;

fn tensors(y_true: &[f64], y_pred: &[f64]) -> (Tensor, Tensor) {
    (
        Array1::from(y_true.to_vec()).into_dyn(),
        Array1::from(y_pred.to_vec()).into_dyn(),
    )
}

#[test]
fn test_mean_squared_error() {
    let mse = MeanSquaredError::new();
    let (y_true, y_pred) = tensors(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0]);

    // (0.25 + 0 + 1) / 3
    assert_relative_eq!(mse.compute(&y_true, &y_pred).unwrap(), 1.25 / 3.0);

    let grad = mse.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0]], 2.0 * 0.5 / 3.0);
    assert_relative_eq!(grad[[1]], 0.0);
    assert_relative_eq!(grad[[2]], 2.0 * -1.0 / 3.0);
}

#[test]
fn test_mean_absolute_error() {
    let mae = MeanAbsoluteError::new();
    let (y_true, y_pred) = tensors(&[0.0, 0.0, 1.0, 1.0], &[1.0, -1.0, 1.0, 3.0]);

    assert_relative_eq!(mae.compute(&y_true, &y_pred).unwrap(), 1.0);

    let grad = mae.derivative(&y_true, &y_pred).unwrap();
    assert_eq!(grad, array![0.25, -0.25, -0.25, 0.25].into_dyn());
}

#[test]
fn test_binary_cross_entropy() {
    let bce = BinaryCrossEntropy::new();
    let (y_true, y_pred) = tensors(&[1.0, 0.0], &[0.8, 0.4]);

    let expected = -((0.8f64).ln() + (0.6f64).ln()) / 2.0;
    assert_relative_eq!(bce.compute(&y_true, &y_pred).unwrap(), expected, epsilon = 1e-12);

    let grad = bce.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0]], (0.8 - 1.0) / (0.8 * 0.2 * 2.0), epsilon = 1e-12);
    assert_relative_eq!(grad[[1]], 0.4 / (0.4 * 0.6 * 2.0), epsilon = 1e-12);

    // clipping keeps certainty finite
    let (y_true, y_pred) = tensors(&[1.0, 0.0], &[0.0, 1.0]);
    let loss = bce.compute(&y_true, &y_pred).unwrap();
    assert!(loss.is_finite());
    assert_relative_eq!(loss, -(EPSILON.ln()), epsilon = 1e-2);
    assert!(bce.derivative(&y_true, &y_pred).unwrap().iter().all(|g| g.is_finite()));
}

#[test]
fn test_categorical_cross_entropy_divides_by_leading_dimension() {
    let cce = CategoricalCrossEntropy::new();
    let y_true = array![[0.0, 1.0], [1.0, 0.0]].into_dyn();
    let y_pred = array![[0.5, 0.5], [0.25, 0.75]].into_dyn();

    let expected = -((0.5f64).ln() + (0.25f64).ln()) / 2.0;
    assert_relative_eq!(cce.compute(&y_true, &y_pred).unwrap(), expected, epsilon = 1e-12);

    let grad = cce.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0, 1]], -1.0 / 0.5 / 2.0);
    assert_relative_eq!(grad[[1, 0]], -1.0 / 0.25 / 2.0);
    assert_eq!(grad[[0, 0]], 0.0);
}

#[test]
fn test_hinge_loss() {
    let hinge = HingeLoss::new();
    let (y_true, y_pred) = tensors(&[1.0, -1.0, 1.0], &[2.0, 0.5, 0.0]);

    // margins: 0, 1.5, 1
    assert_relative_eq!(hinge.compute(&y_true, &y_pred).unwrap(), 2.5 / 3.0);

    let grad = hinge.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0]], 0.0);
    assert_relative_eq!(grad[[1]], 1.0 / 3.0);
    assert_relative_eq!(grad[[2]], -1.0 / 3.0);
}

#[test]
fn test_huber_loss_regimes() {
    let huber = HuberLoss::new(1.0).unwrap();
    let (y_true, y_pred) = tensors(&[0.0, 0.0], &[0.5, -3.0]);

    assert_relative_eq!(huber.compute(&y_true, &y_pred).unwrap(), (0.125 + 2.5) / 2.0);

    let grad = huber.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0]], 0.5 / 2.0);
    assert_relative_eq!(grad[[1]], -1.0 / 2.0);

    assert_eq!(HuberLoss::default().delta(), 1.0);
    assert!(HuberLoss::new(-1.0).is_err());
}

#[test]
fn test_log_cosh_loss() {
    let log_cosh = LogCoshLoss::new();
    let (y_true, y_pred) = tensors(&[0.0, 1.0], &[1.0, 1.0]);

    assert_relative_eq!(
        log_cosh.compute(&y_true, &y_pred).unwrap(),
        (1.0f64).cosh().ln() / 2.0,
        epsilon = 1e-12
    );

    let grad = log_cosh.derivative(&y_true, &y_pred).unwrap();
    assert_relative_eq!(grad[[0]], (1.0f64).tanh() / 2.0, epsilon = 1e-12);
    assert_relative_eq!(grad[[1]], 0.0);

    // no overflow for huge errors
    let (y_true, y_pred) = tensors(&[0.0], &[1000.0]);
    assert!(log_cosh.compute(&y_true, &y_pred).unwrap().is_finite());
}

#[test]
fn test_loss_shape_mismatch() {
    let y_true = array![1.0, 2.0].into_dyn();
    let y_pred = array![1.0, 2.0, 3.0].into_dyn();

    let losses: Vec<Box<dyn LossFunction>> = vec![
        Box::new(MeanSquaredError::new()),
        Box::new(MeanAbsoluteError::new()),
        Box::new(BinaryCrossEntropy::new()),
        Box::new(CategoricalCrossEntropy::new()),
        Box::new(HingeLoss::new()),
        Box::new(HuberLoss::default()),
        Box::new(LogCoshLoss::new()),
    ];
    for loss in losses {
        assert!(
            matches!(loss.compute(&y_true, &y_pred), Err(ModelError::ShapeError(_))),
            "{} accepted mismatched shapes",
            loss.name()
        );
        assert!(matches!(
            loss.derivative(&y_true, &y_pred),
            Err(ModelError::ShapeError(_))
        ));
    }
}
