use super::*;

#[test]
fn defaults_match_reference_setup() {
    let cfg = SlideshowConfig::default();
    assert_eq!(cfg.canvas().unwrap(), Canvas::new(1920, 1088).unwrap());
    assert_eq!(cfg.frame_rate().unwrap().get(), 30);
    assert_eq!(cfg.total_ms().unwrap(), 20_000);
    assert_eq!(cfg.transition_ms, 2000);
    assert_eq!(cfg.crf, 10);
    cfg.validate().unwrap();
}

#[test]
fn json_fields_are_optional() {
    let cfg = SlideshowConfig::from_json_str(r#"{ "fps": 25, "duration": "1:00" }"#).unwrap();
    assert_eq!(cfg.fps, 25);
    assert_eq!(cfg.total_ms().unwrap(), 60_000);
    assert_eq!(cfg.width, 1920);
    assert_eq!(cfg.frames_dir, PathBuf::from("./frames"));
}

#[test]
fn unknown_json_fields_are_rejected() {
    let err = SlideshowConfig::from_json_str(r#"{ "framerate": 25 }"#).unwrap_err();
    assert!(matches!(err, CrossreelError::Config(_)));
}

#[test]
fn json_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slideshow.json");
    std::fs::write(&path, r#"{ "width": 640, "height": 360, "output": "out.mp4" }"#).unwrap();

    let cfg = SlideshowConfig::from_json_file(&path).unwrap();
    assert_eq!((cfg.width, cfg.height), (640, 360));
    assert_eq!(cfg.output, PathBuf::from("out.mp4"));

    let missing = SlideshowConfig::from_json_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, CrossreelError::Config(_)));
}

#[test]
fn validation_rejects_unusable_settings() {
    let zero_fps = SlideshowConfig {
        fps: 0,
        ..SlideshowConfig::default()
    };
    assert!(zero_fps.validate().is_err());

    let odd = SlideshowConfig {
        width: 641,
        ..SlideshowConfig::default()
    };
    assert!(odd.validate().is_err());

    let empty = SlideshowConfig {
        duration: "0:00".to_string(),
        ..SlideshowConfig::default()
    };
    assert!(empty.validate().is_err());

    let bad_clock = SlideshowConfig {
        duration: "twenty".to_string(),
        ..SlideshowConfig::default()
    };
    assert!(bad_clock.validate().is_err());
}

#[test]
fn overflowing_duration_fails_validation() {
    let cfg = SlideshowConfig {
        duration: "100000000000000:00".to_string(),
        ..SlideshowConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(matches!(err, CrossreelError::Config(_)));
}

#[test]
fn encode_config_carries_settings() {
    let cfg = SlideshowConfig {
        crf: 18,
        overwrite: false,
        ..SlideshowConfig::default()
    };
    let enc = cfg.encode_config().unwrap();
    assert_eq!(enc.crf, 18);
    assert!(!enc.overwrite);
    assert_eq!(enc.frames_dir, PathBuf::from("./frames"));
    assert_eq!((enc.width, enc.height), (1920, 1088));
}
