use platformer::compute::init_state;
use platformer::config::{Config, ConfigError, Scoring};
use platformer::entities::DisplayMode;

use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.scoring, Scoring::Pickup);
    assert_eq!(config.invulnerability_ticks, 0);
    assert_eq!(config.start_mode, DisplayMode::Plain);
}

#[test]
fn start_mode_read_from_json_and_applied() {
    let config = Config::from_json(r#"{ "start_mode": "rich" }"#).unwrap();
    assert_eq!(config.start_mode, DisplayMode::Rich);

    let s = init_state(&config, &mut StdRng::seed_from_u64(7));
    assert_eq!(s.mode, DisplayMode::Rich);
}

#[test]
fn unknown_start_mode_is_a_parse_error() {
    let err = Config::from_json(r#"{ "start_mode": "sparkly" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn partial_json_fills_in_defaults() {
    let config = Config::from_json(r#"{ "world_width": 200, "scoring": "per_tick" }"#).unwrap();
    assert_eq!(config.world_width, 200);
    assert_eq!(config.scoring, Scoring::PerTick);
    assert_eq!(config.view_width, 20);
    assert_eq!(config.lives, 3);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Config::from_json("{ world_width: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn view_wider_than_world_rejected() {
    let err = Config::from_json(r#"{ "world_width": 10, "view_width": 20 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn jump_higher_than_ground_rejected() {
    let config = Config {
        jump_height: 4,
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn ground_outside_view_rejected() {
    let config = Config {
        ground_level: 4,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn zero_lives_and_zero_fps_rejected() {
    let no_lives = Config {
        lives: 0,
        ..Config::default()
    };
    let no_fps = Config {
        fps: 0,
        ..Config::default()
    };
    assert!(no_lives.validate().is_err());
    assert!(no_fps.validate().is_err());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Config::load(std::path::Path::new("/nonexistent/platformer.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
