mod common;

use common::{manifest, setup};
use std::fs;

use deploycat::validate::{manifests as validate, reports, to_json};
use deploycat::{Config, ValidationError};
use deploycat_definitions::ErrorKind;
use deploycat_filebacked::{load_file, parse};

#[test]
fn hello_world_validates() {
    setup();
    let raw = fs::read_to_string(manifest("valid/helloworld.yml")).unwrap();
    let d = parse(&raw).unwrap();
    assert_eq!(d.name(), "helloworld");
    assert_eq!(d.spec.replicas, 1);
    assert_eq!(d.containers()[0].ports[0].container_port, 80);
    assert_eq!(d.containers()[0].image, "mcr.microsoft.com/dotnet/framework/samples:aspnetapp");
    assert!(d.validate().is_empty());
}

#[test]
fn round_trip() {
    setup();
    for f in &["valid/helloworld.yml", "valid/frontends.yaml"] {
        for d in load_file(&manifest(f), true).unwrap().deployments {
            let reparsed = parse(&d.to_yaml().unwrap()).unwrap();
            assert_eq!(reparsed, d);
            let json = serde_json::to_string(&d).unwrap();
            assert_eq!(parse(&json).unwrap(), d);
        }
    }
}

#[test]
fn selector_mismatch() {
    setup();
    let raw = fs::read_to_string(manifest("invalid/mismatch.yml")).unwrap();
    let errs = parse(&raw).unwrap().validate();
    assert_eq!(errs.len(), 1);
    match &errs[0] {
        ValidationError::SelectorMismatch { unmatched } => {
            assert_eq!(unmatched, &vec![("app".to_string(), "other".to_string())]);
        }
        e => panic!("expected a selector mismatch, got {}", e),
    }
}

#[test]
fn duplicate_containers() {
    setup();
    let raw = fs::read_to_string(manifest("invalid/duplicate.yml")).unwrap();
    let errs = parse(&raw).unwrap().validate();
    assert_eq!(errs, vec![ValidationError::DuplicateContainerName { name: "proxy".into() }]);
}

#[test]
fn negative_replicas_fail_to_parse() {
    setup();
    let raw = fs::read_to_string(manifest("invalid/negative.yml")).unwrap();
    let err = parse(&raw).unwrap_err();
    match err.kind() {
        ErrorKind::NegativeReplicas(n) => assert_eq!(*n, -1),
        e => panic!("unexpected error {}", e),
    }
}

#[test]
fn validate_directories() {
    let dir = setup();
    let conf = Config::default();
    assert!(validate(vec![dir.join("valid")], &conf, true, false).is_ok());

    // the negative replica document aborts a strict run
    assert!(validate(vec![dir.join("invalid")], &conf, true, false).is_err());

    // a lenient run reports the two that parse
    let (reps, skipped) = reports(&[dir.join("invalid")], &conf, false).unwrap();
    assert_eq!(skipped, 1);
    assert_eq!(reps.len(), 2);
    assert!(reps.iter().all(|r| !r.is_valid()));
    assert!(validate(vec![dir.join("invalid")], &conf, false, false).is_err());

    assert!(validate(vec![dir.join("does-not-exist")], &conf, false, false).is_err());
}

#[test]
fn validate_with_policy() {
    let dir = setup();
    let conf: Config = serde_yaml::from_str(
        "allowedRegistries: [mcr.microsoft.com]\nrequiredNodeSelector:\n  kubernetes.io/os: windows\n",
    )
    .unwrap();
    assert!(validate(vec![dir.join("valid/helloworld.yml")], &conf, true, false).is_ok());

    let (reps, _) = reports(&[dir.join("valid/frontends.yaml")], &conf, true).unwrap();
    assert_eq!(reps.len(), 2);
    for r in reps {
        // wrong registry and no windows node selector
        assert_eq!(r.errors.len(), 2, "{:?}", r);
    }
}

#[test]
fn json_reports() {
    let dir = setup();
    let (reps, _) = reports(&[dir.join("invalid/mismatch.yml")], &Config::default(), true).unwrap();
    let out: serde_json::Value = serde_json::from_str(&to_json(&reps).unwrap()).unwrap();
    assert_eq!(out[0]["errors"][0]["kind"], "selectorMismatch");
    assert_eq!(out[0]["errors"][0]["unmatched"], serde_json::json!([["app", "other"]]));
    assert!(validate(vec![dir.join("invalid/mismatch.yml")], &Config::default(), true, true).is_err());
}
