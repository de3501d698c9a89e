use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(MorphError::parse("x").to_string().contains("parse error:"));
    assert!(
        MorphError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MorphError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        MorphError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MorphError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: MorphError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, MorphError::Serde(_)));
}
