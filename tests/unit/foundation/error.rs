use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CrossreelError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        CrossreelError::encode("x")
            .to_string()
            .contains("encoder error:")
    );
    let err = CrossreelError::decode("inputs/3.png", anyhow::anyhow!("bad header"));
    let msg = err.to_string();
    assert!(msg.contains("inputs/3.png"));
    assert!(msg.contains("bad header"));
}

#[test]
fn stages_are_attributed() {
    assert_eq!(CrossreelError::config("x").stage(), Stage::Plan);
    assert_eq!(CrossreelError::encode("x").stage(), Stage::Encode);
    assert_eq!(
        CrossreelError::read("inputs", std::io::Error::other("gone")).stage(),
        Stage::Read
    );
    assert_eq!(
        CrossreelError::write(FrameNumber(7), "frames/7.png", std::io::Error::other("full"))
            .stage(),
        Stage::Write
    );
    assert_eq!(Stage::Decode.to_string(), "decode");
}

#[test]
fn write_error_names_the_frame() {
    let err = CrossreelError::write(
        FrameNumber(42),
        "frames/42.png",
        std::io::Error::other("disk full"),
    );
    let msg = err.to_string();
    assert!(msg.contains("frame 42"));
    assert!(msg.contains("disk full"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CrossreelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.stage(), Stage::Other);
}
