//! Integration tests for simdext-verify.

use std::io::Write;

use simdext_kernels::SimdCapability;
use simdext_verify::{ElementType, VerifyConfig, VerifyError, verify};

#[test]
fn test_default_config_passes_on_host() {
    let config = VerifyConfig {
        extra_counts: vec![1000],
        ..Default::default()
    };
    let report = verify(&config).unwrap();

    println!("Report:\n{}", report.to_text());
    assert!(report.passed, "every kernel should match its reference");
    assert_eq!(report.detected, SimdCapability::cached().name());
    assert_eq!(report.capabilities.len(), SimdCapability::available().len());
    assert_eq!(report.summary.failed_cases, 0);
    assert!(report.summary.total_calls > report.summary.total_cases);
}

#[test]
fn test_each_capability_reports_every_kernel() {
    let config = VerifyConfig {
        max_count: 5,
        extra_counts: Vec::new(),
        ..Default::default()
    };
    let report = verify(&config).unwrap();

    for cap in SimdCapability::available() {
        for kernel in [
            "add_f32x3",
            "sub_f64x16",
            "abs_f32x2",
            "add_f64",
            "abs_f32",
            "sub_f32",
            "min_f32x4",
            "max_f64",
            "floor_f64x3",
            "fract_f32x16",
            "sign_f32",
            "recip_f64x8",
            "rsqrt_f32x2",
            "clamp_f32x3",
            "lerp_f64x4",
            "smoothstep_f64",
        ] {
            assert!(
                report
                    .cases
                    .iter()
                    .any(|c| c.capability == cap.name() && c.kernel == kernel),
                "missing {kernel} on {cap}"
            );
        }
    }
}

#[test]
fn test_single_element_type() {
    let config = VerifyConfig {
        capabilities: vec!["scalar".to_string()],
        element_types: vec![ElementType::F64],
        max_count: 3,
        extra_counts: Vec::new(),
        ..Default::default()
    };
    let report = verify(&config).unwrap();
    assert!(report.passed);
    assert!(report.cases.iter().all(|c| c.kernel.contains("f64")));
    assert_eq!(report.summary.total_cases, 78);
}

#[test]
fn test_without_special_values() {
    let config = VerifyConfig {
        special_values: false,
        max_count: 20,
        extra_counts: Vec::new(),
        seed: 42,
        ..Default::default()
    };
    assert!(verify(&config).unwrap().passed);
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"capabilities": ["scalar"], "element_types": ["f32"], "max_count": 6, "extra_counts": [], "seed": 7}}"#
    )
    .unwrap();

    let config = VerifyConfig::from_file(file.path()).unwrap();
    assert_eq!(config.seed, 7);
    assert_eq!(config.element_types, vec![ElementType::F32]);

    let report = verify(&config).unwrap();
    assert!(report.passed);
    assert_eq!(report.capabilities, vec!["scalar".to_string()]);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(matches!(
        VerifyConfig::from_file(&path),
        Err(VerifyError::ConfigNotFound { .. })
    ));
}

#[test]
fn test_unknown_capability() {
    let config = VerifyConfig {
        capabilities: vec!["altivec".to_string()],
        ..Default::default()
    };
    let err = verify(&config).unwrap_err();
    assert!(matches!(err, VerifyError::UnknownCapability(ref name) if name == "altivec"));
    assert_eq!(err.to_string(), "unknown SIMD capability: altivec");
}

#[test]
fn test_json_report() {
    let config = VerifyConfig {
        capabilities: vec!["scalar".to_string()],
        max_count: 2,
        extra_counts: Vec::new(),
        ..Default::default()
    };
    let report = verify(&config).unwrap();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["passed"], true);
    assert_eq!(value["capabilities"][0], "scalar");
}
