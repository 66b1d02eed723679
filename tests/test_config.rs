use std::fs;
use std::path::Path;
use std::process;

use gravity_runner::config::ConfigError;
use gravity_runner::*;

// ── parsing ───────────────────────────────────────────────────────────────────

#[test]
fn empty_toml_gives_defaults() {
    let config = GameConfig::from_toml_str("").unwrap();
    assert_eq!(config, GameConfig::default());
    assert_eq!(config.frame_ms, 16);
    assert_eq!(config.window, Size::new(800.0, 600.0));
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        frame_ms = 33

        [window]
        width = 1024.0

        [player]
        gravity = -800.0
        "#,
    )
    .unwrap();
    assert_eq!(config.frame_ms, 33);
    assert_eq!(config.window.width, 1024.0);
    assert_eq!(config.window.height, 600.0);
    assert_eq!(config.player.gravity, -800.0);
    assert_eq!(config.player.start_x, 200.0);
    assert_eq!(config.weapons, Arsenal::default());
}

#[test]
fn weapon_overrides_and_order() {
    let config = GameConfig::from_toml_str(
        r#"
        [player]
        weapons = ["rocket", "pistol"]

        [weapons.cannon]
        asset = "ball.png"
        speed = 250.0
        gravity_scale = 0.0
        spin = 90.0
        shape = "CIRCLE"
        "#,
    )
    .unwrap();
    assert_eq!(
        config.player.weapons,
        vec![WeaponKind::Rocket, WeaponKind::Pistol]
    );
    let cannon = config.weapons.spec(WeaponKind::Cannon);
    assert_eq!(cannon.asset, "ball.png");
    assert_eq!(cannon.speed, 250.0);
    assert_eq!(cannon.shape, ShapeKind::Circle);
    assert_eq!(config.weapons.spec(WeaponKind::Pistol).speed, 1500.0);
}

#[test]
fn spec_shape_defaults_to_rectangle() {
    let config = GameConfig::from_toml_str(
        r#"
        [weapons.rocket]
        asset = "r.png"
        speed = 300.0
        gravity_scale = 1.0
        "#,
    )
    .unwrap();
    let rocket = config.weapons.spec(WeaponKind::Rocket);
    assert_eq!(rocket.shape, ShapeKind::Rectangle);
    assert_eq!(rocket.spin, 0.0);
}

// ── errors ────────────────────────────────────────────────────────────────────

#[test]
fn unknown_shape_is_parse_error() {
    let err = GameConfig::from_toml_str(
        r#"
        [weapons.pistol]
        asset = "b.png"
        speed = 1.0
        gravity_scale = 1.0
        shape = "triangle"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn unknown_weapon_is_parse_error() {
    let err = GameConfig::from_toml_str("[player]\nweapons = [\"laser\"]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn empty_weapon_list_is_invalid() {
    let err = GameConfig::from_toml_str("[player]\nweapons = []").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("weapons"));
}

#[test]
fn non_positive_window_is_invalid() {
    let err = GameConfig::from_toml_str("[window]\nheight = 0.0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn nan_tile_size_is_invalid() {
    let err = GameConfig::from_toml_str("[tile_map]\ntile_size = nan").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn zero_frame_interval_is_invalid() {
    let err = GameConfig::from_toml_str("frame_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

// ── files ─────────────────────────────────────────────────────────────────────

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("gravity_runner_test_{}.toml", process::id()));
    fs::write(&path, "[tile_map]\nscroll_speed = 250.0\n").unwrap();

    let config = GameConfig::load(&path);
    fs::remove_file(&path).unwrap();

    let config = config.unwrap();
    assert_eq!(config.tile_map.scroll_speed, 250.0);
    assert_eq!(config.tile_map.tile_size, 32.0);
}

#[test]
fn missing_file_is_io_error() {
    let err = GameConfig::load(Path::new("/nonexistent/gravity_runner.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
