use wave_shooter::config::*;

#[test]
fn default_config_is_valid() {
    assert_eq!(FieldConfig::default().validate(), Ok(()));
}

#[test]
fn default_matches_arcade_tuning() {
    let cfg = FieldConfig::default();
    assert_eq!(cfg.field_width, 1400.0);
    assert_eq!(cfg.field_height, 980.0);
    assert_eq!(cfg.segment_count, 5);
    assert_eq!(cfg.max_enemies, 12);
    assert_eq!(cfg.enemy_delay_height, 70.0);
    assert_eq!(cfg.bullet_delay_ms, 150);
    assert_eq!(cfg.segment_width(), 280.0);
}

#[test]
fn rejects_zero_segments() {
    let cfg = FieldConfig { segment_count: 0, ..FieldConfig::default() };
    assert_eq!(cfg.validate(), Err(ConfigError::NoSegments));
}

#[test]
fn rejects_empty_field() {
    let cfg = FieldConfig { field_height: 0.0, ..FieldConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::EmptyField { .. })));
}

#[test]
fn rejects_segments_narrower_than_an_enemy() {
    let cfg = FieldConfig { segment_count: 40, ..FieldConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::SegmentTooNarrow { .. })));
}

#[test]
fn rejects_non_positive_frame_clamp() {
    let cfg = FieldConfig { max_frame_dt: 0.0, ..FieldConfig::default() };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::NonPositive { name: "max_frame_dt", .. })
    ));
}

#[test]
fn rejects_ship_wider_than_field() {
    let cfg = FieldConfig { ship_width: 2000.0, ..FieldConfig::default() };
    assert!(matches!(cfg.validate(), Err(ConfigError::ShipTooWide { .. })));
}

#[test]
fn error_messages_name_the_problem() {
    let msg = ConfigError::NonPositive { name: "spawn_interval", value: 0.0 }.to_string();
    assert!(msg.contains("spawn_interval"));
}
