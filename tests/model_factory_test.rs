//! Integration tests for the MLP-or-CNN model factory

use afinar::hpo::{Assignment, GridSearch, HPOError, ParameterValue, TuneSearcher};
use afinar::model::{build, build_assignment, HyperModel, ImageClassifier, Layer, ModelSpec};
use afinar::Error;

fn mlp(widths: &[i64], dropout: bool) -> Assignment {
    let mut assignment = Assignment::new()
        .with("model_type", "mlp")
        .with("mlp_layers", widths.len() as i64)
        .with("dropout", dropout);
    for (i, w) in widths.iter().enumerate() {
        assignment = assignment.with(&format!("units_{i}"), *w);
    }
    assignment
}

fn cnn(filters: &[i64], dropout: bool) -> Assignment {
    let mut assignment = Assignment::new()
        .with("model_type", "cnn")
        .with("cnn_layers", filters.len() as i64)
        .with("dropout", dropout);
    for (i, f) in filters.iter().enumerate() {
        assignment = assignment.with(&format!("filters_{i}"), *f);
    }
    assignment
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_cnn_two_blocks_without_dropout() {
    let model = build(&cnn(&[32, 64], false)).unwrap();
    assert_eq!(model.to_string(), "[conv(32)+pool, conv(64)+pool, flatten, dense(10, softmax)]");
}

#[test]
fn test_mlp_single_layer_with_dropout() {
    let model = build(&mlp(&[128], true)).unwrap();
    assert_eq!(model.to_string(), "[flatten, dense(128, relu), dropout(0.5), dense(10, softmax)]");
}

#[test]
fn test_leftover_width_is_ignored() {
    let assignment = cnn(&[32], false).with("filters_2", 96).with("units_0", 64);
    let model = ImageClassifier::default();
    let space = model.search_space().unwrap();
    let built = build_assignment(&model, &space, &assignment).unwrap();

    assert_eq!(built.spec.to_string(), "[conv(32)+pool, flatten, dense(10, softmax)]");
    assert_eq!(built.unused, vec!["filters_2".to_string(), "units_0".to_string()]);
    assert!(!built.active.contains("filters_2"));
}

#[test]
fn test_out_of_range_depth_rejected() {
    let assignment = mlp(&[32], false).with("mlp_layers", 4);
    let err = build(&assignment).unwrap_err();
    assert!(matches!(err, Error::Hpo(HPOError::OutOfDomainValue { ref name, .. }) if name == "mlp_layers"));
}

#[test]
fn test_unknown_model_type_rejected() {
    let assignment = mlp(&[32], false).with("model_type", "transformer");
    let err = build(&assignment).unwrap_err();
    assert!(matches!(err, Error::Hpo(HPOError::OutOfDomainValue { ref value, .. }) if value == "transformer"));
}

#[test]
fn test_missing_active_value_rejected() {
    let assignment = Assignment::new().with("model_type", "mlp").with("mlp_layers", 2).with("units_0", 32);
    let err = build(&assignment).unwrap_err();
    assert!(matches!(err, Error::Hpo(HPOError::MissingValue(_))));
}

// ============================================================================
// Properties over every active configuration
// ============================================================================

fn every_active_model() -> Vec<(Assignment, ModelSpec)> {
    let model = ImageClassifier::default();
    let space = model.search_space().unwrap();
    let mut grid = GridSearch::new(space.clone());
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    while let Ok(trial) = grid.suggest() {
        let built = build_assignment(&model, &space, &trial.assignment).unwrap();
        if seen.insert(built.active.clone()) {
            out.push((built.active, built.spec));
        }
    }
    out
}

#[test]
fn test_structural_properties_hold_everywhere() {
    let models = every_active_model();
    assert_eq!(models.len(), 336);

    for (active, spec) in &models {
        assert_eq!(spec.output_units(), 10);
        assert_eq!(spec.input_shape(), [28, 28, 1]);

        let dropout = active.get("dropout") == Some(&ParameterValue::Bool(true));
        assert_eq!(spec.dropout_count(), usize::from(dropout));
        if dropout {
            assert!(matches!(spec.stages().last(), Some(Layer::Dropout { .. })));
        }

        match active.get("model_type").and_then(ParameterValue::as_str) {
            Some("mlp") => {
                let depth = active.get("mlp_layers").and_then(ParameterValue::as_int).unwrap();
                let widths: Vec<usize> = (0..depth)
                    .map(|i| active.get(&format!("units_{i}")).and_then(ParameterValue::as_int).unwrap() as usize)
                    .collect();
                assert_eq!(spec.dense_units(), widths);
                assert!(spec.conv_blocks().is_empty());
            }
            Some("cnn") => {
                let depth = active.get("cnn_layers").and_then(ParameterValue::as_int).unwrap();
                let filters: Vec<usize> = (0..depth)
                    .map(|i| active.get(&format!("filters_{i}")).and_then(ParameterValue::as_int).unwrap() as usize)
                    .collect();
                assert_eq!(spec.conv_blocks(), filters);
                assert!(spec.dense_units().is_empty());
            }
            other => panic!("unexpected model_type {other:?}"),
        }

        assert!(spec.summary().is_ok());
    }
}

#[test]
fn test_build_is_deterministic() {
    for (active, spec) in every_active_model().iter().step_by(17) {
        assert_eq!(&build(active).unwrap(), spec);
    }
}

#[test]
fn test_summary_parameter_counts() {
    // conv(32): (9*1+1)*32 = 320, conv(64): (9*32+1)*64 = 18496, dense: (5*5*64+1)*10 = 16010
    let summary = build(&cnn(&[32, 64], false)).unwrap().summary().unwrap();
    assert_eq!(summary.total_params, 320 + 18_496 + 16_010);

    // dense(128): (784+1)*128 = 100480, dense(10): (128+1)*10 = 1290
    let summary = build(&mlp(&[128], true)).unwrap().summary().unwrap();
    assert_eq!(summary.total_params, 100_480 + 1_290);
    assert!(summary.to_string().ends_with("Total params: 101770"));
}

#[test]
fn test_model_spec_json_round_trip() {
    let spec = build(&cnn(&[96, 32, 128], true)).unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"type\":\"conv2d\""));
    let back: ModelSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}
