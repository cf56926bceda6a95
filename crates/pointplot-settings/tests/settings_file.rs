use pointplot_settings::{GenerationSettings, SettingsError, SheetSize};
use tempfile::TempDir;

#[test]
fn test_save_and_load_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.toml");

    let mut settings = GenerationSettings::default();
    settings.grid_size = 2;
    settings.layer_count = 8;
    settings.machine.travel_z = 6.5;
    settings.sheet = SheetSize::new(297.0, 210.0);

    settings.save_to_file(&path).expect("Failed to save settings");
    let loaded = GenerationSettings::load_from_file(&path).expect("Failed to load settings");

    assert_eq!(loaded, settings);
}

#[test]
fn test_save_and_load_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");

    let mut settings = GenerationSettings::default();
    settings.machine.feed_rate_xy = 6000.0;

    settings.save_to_file(&path).expect("Failed to save settings");
    let loaded = GenerationSettings::load_from_file(&path).expect("Failed to load settings");

    assert_eq!(loaded.machine.feed_rate_xy, 6000.0);
}

#[test]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.yaml");

    let result = GenerationSettings::default().save_to_file(&path);
    assert!(matches!(result, Err(SettingsError::UnsupportedFormat(_))));
}

#[test]
fn test_load_invalid_values_fall_back() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(
        &path,
        r#"
grid_size = "abc"
layer_count = 0

[machine]
feed_rate_xy = -5.0
travel_z = "7.5"
"#,
    )
    .unwrap();

    let loaded = GenerationSettings::load_from_file(&path).expect("Failed to load settings");
    let defaults = GenerationSettings::default();
    assert_eq!(loaded.grid_size, defaults.grid_size);
    assert_eq!(loaded.layer_count, defaults.layer_count);
    assert_eq!(loaded.machine.feed_rate_xy, defaults.machine.feed_rate_xy);
    assert_eq!(loaded.machine.travel_z, 7.5);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_load_json_with_strings_and_nulls() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"grid_size": "3", "layer_count": 4000000000, "sheet": {"width_mm": null, "height_mm": 100}}"#,
    )
    .unwrap();

    let loaded = GenerationSettings::load_from_file(&path).expect("Failed to load settings");
    assert_eq!(loaded.grid_size, 3);
    assert_eq!(loaded.layer_count, GenerationSettings::default().layer_count);
    assert_eq!(loaded.sheet, SheetSize::default());
}

#[test]
fn test_load_broken_syntax_is_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "grid_size = = 3\n").unwrap();

    let result = GenerationSettings::load_from_file(&path);
    assert!(matches!(result, Err(SettingsError::TomlError(_))));
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.json");

    let result = GenerationSettings::load_from_file(&path);
    assert!(matches!(result, Err(SettingsError::IoError(_))));
}
