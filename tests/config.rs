use std::num::NonZeroU64;

use vmal_rs::VmConfig;

#[test]
fn json_config_fills_defaults() {
    let cfg = VmConfig::from_json_str(r#"{ "step_limit": 100, "breakpoints": [1, 2] }"#).unwrap();
    assert_eq!(cfg.step_limit, NonZeroU64::new(100));
    assert_eq!(cfg.breakpoints, vec![1, 2]);
    assert!(!cfg.show_listing);

    assert_eq!(VmConfig::from_json_str("{}").unwrap(), VmConfig::default());
}

#[test]
fn zero_step_limit_is_rejected() {
    assert!(VmConfig::from_json_str(r#"{ "step_limit": 0 }"#).is_err());
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("_vmal_cfg_test_{}.json", std::process::id()));
    let cfg = VmConfig {
        step_limit: NonZeroU64::new(7),
        breakpoints: vec![4],
        show_listing: true,
    };
    std::fs::write(&path, serde_json::to_string(&cfg).unwrap()).unwrap();
    assert_eq!(VmConfig::from_json_file(&path).unwrap(), cfg);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_config_file_names_the_path() {
    let err = VmConfig::from_json_file(std::path::Path::new("/nonexistent/vmal.json")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/vmal.json"));
}
