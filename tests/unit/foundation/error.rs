use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SigntrackError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SigntrackError::not_found("x")
            .to_string()
            .contains("not found:")
    );
    assert!(
        SigntrackError::access_denied("x")
            .to_string()
            .contains("access denied:")
    );
    assert!(
        SigntrackError::surface("x")
            .to_string()
            .contains("surface error:")
    );
    assert!(
        SigntrackError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(
        SigntrackError::config("x")
            .to_string()
            .contains("config error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SigntrackError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
