use super::*;
use crate::metric::Metric;

fn quiet(epochs: usize) -> TrainOptions {
    TrainOptions {
        epochs,
        verbose: false,
        ..TrainOptions::default()
    }
}

fn three_layer_model() -> Model {
    let mut model = Model::new(ModelConfig::seeded(21));
    model
        .add_layer(Dense::new(16).unwrap().with_input_shape(&[16]).unwrap())
        .unwrap();
    model.add_layer(Dense::new(8).unwrap()).unwrap();
    model.add_layer(Dense::new(4).unwrap()).unwrap();
    model
}

#[test]
fn test_shape_inference_through_dense_stack() {
    let model = three_layer_model();

    let fan_ins: Vec<usize> = model
        .layers()
        .iter()
        .map(|layer| layer.nodes()[0].fan_in())
        .collect();
    assert_eq!(fan_ins, vec![16, 16, 8]);
    assert_eq!(model.input_shape(), Some(&[16][..]));
    assert_eq!(model.input_size(), Some(16));
    assert_eq!(model.output_shape(), Some(&[4][..]));
}

#[test]
fn test_first_layer_needs_input_shape() {
    let mut model = Model::new(ModelConfig::seeded(0));
    assert!(matches!(
        model.add_layer(Dense::new(3).unwrap()),
        Err(ModelError::ConfigurationError(_))
    ));
    assert!(model.layers().is_empty());
    assert_eq!(model.input_shape(), None);
}

#[test]
fn test_first_layer_placement() {
    let mut model = Model::new(ModelConfig::seeded(0));
    let mut dropout = Dropout::new(0.5).unwrap();
    dropout.set_input_shape(vec![3]);

    assert!(matches!(
        model.add_layer(dropout),
        Err(ModelError::ConfigurationError(_))
    ));
}

#[test]
fn test_conflicting_input_shape_names_both_layers() {
    let mut model = Model::new(ModelConfig::seeded(0));
    model
        .add_layer(Dense::new(4).unwrap().with_input_shape(&[2]).unwrap())
        .unwrap();

    let result = model.add_layer(Dense::new(2).unwrap().with_input_shape(&[5]).unwrap());
    match result {
        Err(ModelError::ShapeError(msg)) => {
            assert!(msg.contains("layer 1") && msg.contains("layer 0"), "{}", msg);
            assert!(msg.contains("(5,)") && msg.contains("(4,)"), "{}", msg);
        }
        Err(other) => panic!("expected a shape error, got {:?}", other),
        Ok(_) => panic!("expected a shape error"),
    }

    // a matching declaration is accepted
    model
        .add_layer(Dense::new(2).unwrap().with_input_shape(&[4]).unwrap())
        .unwrap();
}

#[test]
fn test_flatten_between_dense_layers() {
    let mut model = Model::new(ModelConfig::seeded(3));
    model
        .add_layer(Dense::new(5).unwrap().with_input_shape(&[3]).unwrap())
        .unwrap();
    model.add_layer(Flatten::new()).unwrap();
    model.add_layer(Dense::new(2).unwrap()).unwrap();

    assert_eq!(model.layers()[2].nodes()[0].fan_in(), 5);
    assert_eq!(model.output_shape(), Some(&[2][..]));
}

#[test]
fn test_backward_single_sgd_step() {
    let mut model = Model::new(ModelConfig::seeded(1));
    model
        .add_layer(Dense::new(1).unwrap().with_input_shape(&[1]).unwrap())
        .unwrap();
    model.layers_mut()[0]
        .set_weights(vec![array![1.0]])
        .unwrap();

    let x = array![2.0].into_dyn();
    let y = array![5.0].into_dyn();

    let y_pred = model.forward(&x).unwrap();
    assert_relative_eq!(y_pred[[0]], 2.0);
    assert_relative_eq!(model.compute_loss(&y, &y_pred).unwrap(), 9.0);
    assert_relative_eq!(model.loss().derivative(&y, &y_pred).unwrap()[[0]], -6.0);

    model.backward(&y, &y_pred).unwrap();
    assert_relative_eq!(
        model.layers()[0].nodes()[0].weights()[0],
        1.12,
        epsilon = 1e-12
    );
}

#[test]
fn test_summary_counts_every_weight() {
    let model = three_layer_model();
    let expected: usize = model
        .layers()
        .iter()
        .flat_map(|layer| layer.nodes())
        .map(|node| node.weights().len())
        .sum();

    let summary = model.summary(false);
    assert!(summary.contains(&format!("Total number of parameters: {}", expected)));
    assert!(summary.contains("Dense"));
    assert_eq!(expected, 16 * 16 + 8 * 16 + 4 * 8);
}

#[test]
fn test_predict_is_deterministic() {
    let mut model = three_layer_model();
    let x = Array2::from_shape_fn((3, 16), |(i, j)| (i * 16 + j) as f64 / 48.0).into_dyn();

    let first = model.predict(&x, false).unwrap();
    let second = model.predict(&x, false).unwrap();
    assert_eq!(first.shape(), &[3, 4]);
    assert_eq!(first, second);
}

#[test]
fn test_predict_validates_input() {
    let mut empty = Model::new(ModelConfig::seeded(0));
    assert!(matches!(
        empty.predict(&array![[1.0]].into_dyn(), false),
        Err(ModelError::StateError(_))
    ));

    let mut model = three_layer_model();
    assert!(matches!(
        model.predict(&Array2::<f64>::zeros((2, 15)).into_dyn(), false),
        Err(ModelError::ShapeError(_))
    ));
}

#[test]
fn test_evaluate_requires_compile() {
    let mut model = three_layer_model();
    let x = Array2::<f64>::zeros((2, 16)).into_dyn();
    let y = Array2::<f64>::zeros((2, 4)).into_dyn();

    assert!(matches!(
        model.evaluate(&x, &y),
        Err(ModelError::StateError(_))
    ));

    model
        .compile(
            Box::new(MeanSquaredError::new()),
            Box::new(SGD::new(0.1).unwrap()),
            vec![Metric::MeanAbsoluteError],
        )
        .unwrap();
    assert!(model.is_compiled());

    let evaluation = model.evaluate(&x, &y).unwrap();
    // zero input, no bias: every output is exactly zero
    assert_eq!(evaluation.loss(), 0.0);
    assert_eq!(evaluation.metric(Metric::MeanAbsoluteError), Some(0.0));
    assert_eq!(evaluation.metric(Metric::BinaryAccuracy), None);

    match model.evaluate(&Array2::<f64>::zeros((2, 3)).into_dyn(), &y) {
        Err(ModelError::ShapeError(msg)) => assert!(msg.contains("(n, 16)"), "{}", msg),
        other => panic!("expected a shape error, got {:?}", other.map(|e| e.loss())),
    }
}

#[test]
fn test_compile_rejects_dropout_as_last_layer() {
    let mut model = Model::new(ModelConfig::seeded(0));
    model
        .add_layer(Dense::new(4).unwrap().with_input_shape(&[2]).unwrap())
        .unwrap();
    model.add_layer(Dropout::new(0.5).unwrap()).unwrap();

    let result = model.compile(
        Box::new(MeanSquaredError::new()),
        Box::new(SGD::default()),
        vec![],
    );
    assert!(matches!(result, Err(ModelError::ConfigurationError(_))));
}

#[test]
fn test_train_reduces_loss() {
    let mut model = Model::new(ModelConfig::seeded(12));
    model
        .add_layer(Dense::new(1).unwrap().with_input_shape(&[1]).unwrap())
        .unwrap();
    model
        .compile(
            Box::new(MeanSquaredError::new()),
            Box::new(SGD::new(0.05).unwrap()),
            vec![],
        )
        .unwrap();

    let x = array![[-1.0], [-0.5], [0.0], [0.5], [1.0]].into_dyn();
    let y = array![-2.0, -1.0, 0.0, 1.0, 2.0].into_dyn();

    let history = model.train(&x, &y, &quiet(60)).unwrap();
    assert_eq!(history.epochs(), 60);
    let losses = history.epoch_losses();
    assert!(losses[losses.len() - 1] < losses[0]);
    assert_abs_diff_eq!(model.layers()[0].nodes()[0].weights()[0], 2.0, epsilon = 0.05);
}

#[test]
fn test_train_validates_arguments() {
    let mut model = three_layer_model();
    let x = Array2::<f64>::zeros((4, 16)).into_dyn();
    let y = Array2::<f64>::zeros((3, 4)).into_dyn();

    assert!(matches!(
        model.train(&x, &y, &quiet(1)),
        Err(ModelError::InputValidationError(_))
    ));

    let y = Array2::<f64>::zeros((4, 4)).into_dyn();
    assert!(matches!(
        model.train(&x, &y, &quiet(0)),
        Err(ModelError::InputValidationError(_))
    ));

    let options = TrainOptions {
        batch_size: 0,
        ..quiet(1)
    };
    assert!(matches!(
        model.train(&x, &y, &options),
        Err(ModelError::InputValidationError(_))
    ));

    let wrong_targets = Array2::<f64>::zeros((4, 3)).into_dyn();
    assert!(matches!(
        model.train(&x, &wrong_targets, &quiet(1)),
        Err(ModelError::ShapeError(_))
    ));
}

#[test]
fn test_train_with_dropout_and_shuffle() {
    let mut model = Model::new(ModelConfig::seeded(99));
    model
        .add_layer(
            Dense::new(6)
                .unwrap()
                .with_activation(Activation::Tanh)
                .with_input_shape(&[2])
                .unwrap(),
        )
        .unwrap();
    model.add_layer(Dropout::new(0.25).unwrap()).unwrap();
    model
        .add_layer(Dense::new(1).unwrap().with_activation(Activation::Sigmoid))
        .unwrap();

    let x = array![[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]].into_dyn();
    let y = array![[0.0], [1.0], [1.0], [1.0]].into_dyn();
    let options = TrainOptions {
        shuffle: true,
        batch_size: 2,
        ..quiet(5)
    };

    let history = model.train(&x, &y, &options).unwrap();
    assert_eq!(history.epoch_losses().len(), 5);
    assert!(history.epoch_losses().iter().all(|l| l.is_finite()));

    // back in inference state: dropout is identity
    let first = model.predict(&x, false).unwrap();
    let second = model.predict(&x, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_layer_loss_override_is_used() {
    let mut model = Model::new(ModelConfig::seeded(4));
    let mut output = Dense::new(1).unwrap().with_input_shape(&[1]).unwrap();
    output.add_loss(Box::new(MeanAbsoluteError::new()));
    model.add_layer(output).unwrap();

    let y_true = array![3.0].into_dyn();
    let y_pred = array![1.0].into_dyn();
    assert_relative_eq!(model.compute_loss(&y_true, &y_pred).unwrap(), 2.0);
    assert_eq!(model.loss().name(), "MeanSquaredError");
}

#[test]
fn test_with_layers() {
    let layers: Vec<Box<dyn Layer>> = vec![
        Box::new(Flatten::new().with_input_shape(&[2, 2]).unwrap()),
        Box::new(Dense::new(3).unwrap()),
        Box::new(Dense::new(2).unwrap()),
    ];
    let model = Model::with_layers(layers, ModelConfig::seeded(0).with_name("stack")).unwrap();
    assert_eq!(model.name(), "stack");
    assert_eq!(model.layers()[1].nodes()[0].fan_in(), 4);
    assert_eq!(model.layers()[2].nodes()[0].fan_in(), 3);
}

#[test]
fn test_dense_needs_vector_samples() {
    assert!(matches!(
        Dense::new(2).unwrap().with_input_shape(&[2, 3]),
        Err(ModelError::ConfigurationError(_))
    ));

    let mut model = Model::new(ModelConfig::seeded(0));
    model
        .add_layer(Dense::new(6).unwrap().with_input_shape(&[2]).unwrap())
        .unwrap();
    model.add_layer(Reshape::new(&[2, 3]).unwrap()).unwrap();

    match model.add_layer(Dense::new(2).unwrap()) {
        Err(ModelError::ConfigurationError(msg)) => assert!(msg.contains("(2, 3)"), "{}", msg),
        Err(other) => panic!("expected a configuration error, got {:?}", other),
        Ok(_) => panic!("expected a configuration error"),
    }
    assert_eq!(model.layers().len(), 2);

    // a Flatten in between makes it valid
    model.add_layer(Flatten::new()).unwrap();
    model.add_layer(Dense::new(2).unwrap()).unwrap();
    assert_eq!(model.layers()[3].nodes()[0].fan_in(), 6);
}

#[test]
fn test_predict_single_sample_and_batch() {
    let mut model = Model::new(ModelConfig::seeded(17));
    model
        .add_layer(
            Dense::new(3)
                .unwrap()
                .with_activation(Activation::Sigmoid)
                .with_input_shape(&[2])
                .unwrap(),
        )
        .unwrap();

    let sample = array![0.5, 1.0].into_dyn();
    let single = model.predict(&sample, false).unwrap();
    assert_eq!(single.shape(), &[3]);

    let batch = array![[0.5, 1.0], [-1.0, 0.25]].into_dyn();
    let batched = model.predict(&batch, false).unwrap();
    assert_eq!(batched.shape(), &[2, 3]);
    assert_eq!(batched.index_axis(Axis(0), 0), single.view());

    assert!(matches!(
        model.predict(&array![0.5, 1.0, 2.0].into_dyn(), false),
        Err(ModelError::ShapeError(_))
    ));
}
