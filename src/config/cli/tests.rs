//! Tests for CLI argument parsing

use super::*;
use crate::hpo::ParameterValue;
use std::path::PathBuf;

#[test]
fn test_parse_space_command() {
    let cli = parse_args(["afinar", "space"]).unwrap();
    match cli.command {
        Command::Space(args) => {
            assert!(args.config.is_none());
            assert_eq!(args.format, OutputFormat::Text);
        }
        _ => panic!("Expected Space command"),
    }
}

#[test]
fn test_parse_build_with_sets() {
    let cli = parse_args([
        "afinar",
        "build",
        "--set",
        "model_type=cnn",
        "-s",
        "cnn_layers=2",
        "--set",
        "dropout=false",
        "--summary",
    ])
    .unwrap();

    match cli.command {
        Command::Build(args) => {
            assert!(args.assignment.is_none());
            assert!(args.summary);
            assert_eq!(
                args.set,
                vec![
                    ("model_type".to_string(), ParameterValue::from("cnn")),
                    ("cnn_layers".to_string(), ParameterValue::Int(2)),
                    ("dropout".to_string(), ParameterValue::Bool(false)),
                ]
            );
        }
        _ => panic!("Expected Build command"),
    }
}

#[test]
fn test_parse_build_from_file() {
    let cli = parse_args(["afinar", "build", "best.yaml", "--format", "json"]).unwrap();
    match cli.command {
        Command::Build(args) => {
            assert_eq!(args.assignment, Some(PathBuf::from("best.yaml")));
            assert_eq!(args.format, OutputFormat::Json);
        }
        _ => panic!("Expected Build command"),
    }
}

#[test]
fn test_parse_build_rejects_bad_pair() {
    assert!(parse_args(["afinar", "build", "--set", "dropout"]).is_err());
    assert!(parse_args(["afinar", "build", "--set", "=3"]).is_err());
}

#[test]
fn test_parse_sample_command() {
    let cli = parse_args(["afinar", "sample", "-n", "12", "--seed", "42", "-f", "yaml"]).unwrap();
    match cli.command {
        Command::Sample(args) => {
            assert_eq!(args.count, 12);
            assert_eq!(args.seed, Some(42));
            assert_eq!(args.format, OutputFormat::Yaml);
        }
        _ => panic!("Expected Sample command"),
    }
}

#[test]
fn test_parse_sample_defaults() {
    let cli = parse_args(["afinar", "sample"]).unwrap();
    match cli.command {
        Command::Sample(args) => {
            assert_eq!(args.count, 5);
            assert!(args.seed.is_none());
        }
        _ => panic!("Expected Sample command"),
    }
}

#[test]
fn test_parse_trials_command() {
    let cli = parse_args(["afinar", "trials", "tune.yaml", "--top", "3"]).unwrap();
    match cli.command {
        Command::Trials(args) => {
            assert_eq!(args.config, PathBuf::from("tune.yaml"));
            assert_eq!(args.top, Some(3));
        }
        _ => panic!("Expected Trials command"),
    }
}

#[test]
fn test_parse_trials_requires_config() {
    assert!(parse_args(["afinar", "trials"]).is_err());
}

#[test]
fn test_parse_validate_detailed() {
    let cli = parse_args(["afinar", "validate", "tune.yaml", "--detailed"]).unwrap();
    match cli.command {
        Command::Validate(args) => {
            assert_eq!(args.config, PathBuf::from("tune.yaml"));
            assert!(args.detailed);
        }
        _ => panic!("Expected Validate command"),
    }
}

#[test]
fn test_parse_global_flags() {
    let cli = parse_args(["afinar", "info", "tune.yaml", "--verbose"]).unwrap();
    assert!(cli.verbose);
    assert!(!cli.quiet);

    let cli = parse_args(["afinar", "-q", "space"]).unwrap();
    assert!(cli.quiet);
}

#[test]
fn test_parse_unknown_format() {
    assert!(parse_args(["afinar", "info", "tune.yaml", "--format", "xml"]).is_err());
}

#[test]
fn test_parse_key_value() {
    assert_eq!(parse_key_value("units_0=64").unwrap(), ("units_0".to_string(), ParameterValue::Int(64)));
    assert_eq!(parse_key_value(" dropout = true ").unwrap(), ("dropout".to_string(), ParameterValue::Bool(true)));
    assert_eq!(parse_key_value("model_type=mlp").unwrap().1, ParameterValue::from("mlp"));
    assert!(parse_key_value("no_equals").is_err());
}
