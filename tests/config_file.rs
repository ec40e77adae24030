//! Configuration file loading tests.
//!
//! Run with: `cargo test --test config_file`

use std::io::Write;

use rekha_nav::{BehaviorEvent, BehaviorState, HeadingModel, RekhaConfig, RekhaError, Simulation};
use tempfile::NamedTempFile;

fn write_config(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
        [robot]
        start = { x = 0.0, y = 0.0 }
        speed = 1.0
        heading_model = "linear"

        [controller]
        kp = 0.5
        ki = 0.01
        kd = 0.2

        [sensor]
        probe_offset = 1.0
        window_radius = 5
        falloff = 2.0
        obstacle_threshold = 3.0

        [behavior]
        avoid_turn_deg = 30.0
        search_turn_deg = 10.0

        [path]
        points = 60
        segment_length = 20

        [obstacles]
        count = 4
        max_size = 2.5
        seed = 21

        [[obstacles.fixed]]
        position = { x = 0.0, y = 0.0 }
        size = 5.0

        [simulation]
        steps = 30
        tick_delay_ms = 0
        "#,
    );

    let config = RekhaConfig::load(file.path()).unwrap();
    assert_eq!(config.robot.heading_model, HeadingModel::Linear);
    assert_eq!(config.line_path().unwrap().len(), 60);
    assert_eq!(config.simulation.steps, 30);

    let mut sim = Simulation::from_config(&config).unwrap();
    assert_eq!(sim.robot().obstacles().len(), 5);

    // the fixed obstacle covers the start
    let (summary, history) = sim.run(config.simulation.steps);
    assert_eq!(history[0].behavior, BehaviorState::AvoidObstacle);
    let detections = history
        .iter()
        .filter(|s| s.event == BehaviorEvent::ObstacleDetected)
        .count() as u64;
    assert_eq!(summary.obstacles_encountered, detections);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = RekhaConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, RekhaError::Io(_)));
}

#[test]
fn test_unknown_heading_model_rejected() {
    let file = write_config("[robot]\nheading_model = \"bicycle\"\n");
    let err = RekhaConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, RekhaError::Parse(_)));
}

#[test]
fn test_negative_speed_is_configuration_error() {
    let file = write_config("[robot]\nspeed = -1.0\n");
    let err = RekhaConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, RekhaError::Configuration(_)));
}
