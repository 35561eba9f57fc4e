use super::*;

fn cfg() -> EncodeConfig {
    default_mp4_config(
        "frames",
        "out/result.mp4",
        Canvas::new(1920, 1088).unwrap(),
        Fps::new(30).unwrap(),
    )
}

#[test]
fn config_validation_catches_bad_values() {
    cfg().validate().unwrap();

    let mut odd = cfg();
    odd.width = 1921;
    assert!(odd.validate().is_err());

    let mut zero = cfg();
    zero.height = 0;
    assert!(zero.validate().is_err());

    let mut crf = cfg();
    crf.crf = 52;
    assert!(crf.validate().is_err());
}

#[test]
fn command_uses_fixed_profile() {
    let cmd = encoder_command(&cfg());
    assert_eq!(cmd.get_program(), "ffmpeg");
    let args: Vec<String> = cmd
        .get_args()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let frames_input = Path::new("frames")
        .join("%d.png")
        .to_string_lossy()
        .into_owned();
    let out = Path::new("out/result.mp4").to_string_lossy().into_owned();
    assert_eq!(
        args,
        vec![
            "-y",
            "-r",
            "30",
            "-f",
            "image2",
            "-s",
            "1920x1088",
            "-i",
            frames_input.as_str(),
            "-vcodec",
            "libx264",
            "-crf",
            "10",
            "-pix_fmt",
            "yuv420p",
            out.as_str(),
        ]
    );
}

#[test]
fn no_overwrite_uses_dash_n() {
    let mut c = cfg();
    c.overwrite = false;
    let cmd = encoder_command(&c);
    assert_eq!(cmd.get_args().next().unwrap(), "-n");
}

#[test]
fn missing_encoder_is_an_encode_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut c = cfg();
    c.out_path = dir.path().join("result.mp4");
    c.program = dir.path().join("no-such-ffmpeg");
    let err = run_encoder(&c).unwrap_err();
    assert!(matches!(err, CrossreelError::Encode(_)));
}

#[test]
fn existing_output_without_overwrite_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.mp4");
    std::fs::write(&out, b"existing").unwrap();
    let mut c = cfg();
    c.out_path = out;
    c.overwrite = false;
    assert!(matches!(
        run_encoder(&c).unwrap_err(),
        CrossreelError::Config(_)
    ));
}
