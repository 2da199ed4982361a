//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use crate::model::ImageClassifier;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = TuneConfig> {
    (
        1usize..500,                  // max_trials
        1usize..100,                  // epochs
        22usize..256,                 // side
        1usize..4,                    // channels
        2usize..1000,                 // num_classes
        proptest::option::of(any::<u64>()), // seed
    )
        .prop_map(|(max_trials, epochs, side, channels, num_classes, seed)| TuneConfig {
            model: ImageClassifier::new([side, side, channels], num_classes),
            max_trials,
            epochs,
            seed,
            ..TuneConfig::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_small_inputs_rejected(side in 1usize..22) {
        let config = TuneConfig { model: ImageClassifier::new([side, 64, 1], 10), ..TuneConfig::default() };
        let rejected = matches!(
            validate_config(&config),
            Err(ValidationError::InputTooSmall { .. })
        );
        prop_assert!(rejected);
    }

    #[test]
    fn prop_yaml_round_trip_preserves_validity(config in arb_valid_config()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: TuneConfig = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(&back, &config);
        prop_assert!(validate_config(&back).is_ok());
    }
}
