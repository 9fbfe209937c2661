use healthboard::config::{AppConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn test_default_template_matches_defaults() {
    let parsed = AppConfig::from_toml_str(AppConfig::default_template()).unwrap();
    let defaults = AppConfig::default();

    assert_eq!(parsed.data_root, defaults.data_root);
    assert_eq!(parsed.hospitals_file, defaults.hospitals_file);
    assert_eq!(parsed.years, defaults.years);
    assert_eq!(parsed.infer_schema_length, defaults.infer_schema_length);
    assert_eq!(parsed.rating_bins, defaults.rating_bins);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = AppConfig::from_toml_str(
        r#"
data_root = "/srv/health"

[years]
first = 2021
last = 2023
"#,
    )
    .unwrap();

    assert_eq!(config.data_root.to_str(), Some("/srv/health"));
    assert!(config.years.contains(2022));
    assert!(!config.years.contains(2020));
    assert_eq!(config.years.iter().collect::<Vec<_>>(), vec![2021, 2022, 2023]);
    assert_eq!(config.hospitals_file, "UAE_hospitals_data.csv");
    assert_eq!(config.loader().data_root().to_str(), Some("/srv/health"));
}

#[test]
fn test_custom_rating_bins() {
    let config = AppConfig::from_toml_str(
        r#"
[rating_bins]
unclassified = "Not rated"

[[rating_bins.ranges]]
lower = 0.0
upper = 2.5
label = "Poor"

[[rating_bins.ranges]]
lower = 2.5
upper = 5.01
label = "Good"
"#,
    )
    .unwrap();

    assert_eq!(config.rating_bins.ranges().len(), 2);
    assert_eq!(config.rating_bins.label_for(Some(5.0)), "Good");
    assert_eq!(config.rating_bins.label_for(None), "Not rated");
}

#[test]
fn test_overlapping_bins_are_rejected() {
    let result = AppConfig::from_toml_str(
        r#"
[[rating_bins.ranges]]
lower = 0.0
upper = 3.0
label = "Low"

[[rating_bins.ranges]]
lower = 2.0
upper = 5.0
label = "High"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_inverted_year_range_is_rejected() {
    let result = AppConfig::from_toml_str("[years]\nfirst = 2025\nlast = 2020\n");
    assert!(matches!(
        result,
        Err(ConfigError::InvalidYears { first: 2025, last: 2020 })
    ));
}

#[test]
fn test_write_default_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("healthboard.toml");

    AppConfig::write_default(&path, false).unwrap();
    let loaded = AppConfig::load(&path).unwrap();
    assert_eq!(loaded.years, AppConfig::default().years);

    assert!(matches!(
        AppConfig::write_default(&path, false),
        Err(ConfigError::AlreadyExists(_))
    ));
    AppConfig::write_default(&path, true).unwrap();
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_unclassified_label_cannot_reuse_a_range_label() {
    let result = AppConfig::from_toml_str(
        r#"
[rating_bins]
unclassified = "Poor"

[[rating_bins.ranges]]
lower = 0.0
upper = 2.5
label = "Poor"
"#,
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
