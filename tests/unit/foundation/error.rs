use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RainError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(RainError::render("x").to_string().contains("render error:"));
    assert!(RainError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn no_frames_names_the_missing_step() {
    let msg = RainError::NoFrames.to_string();
    assert!(msg.contains("generate_frames()"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RainError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
