use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        HighlightError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        HighlightError::encode("x")
            .to_string()
            .contains("encode error:")
    );
    assert!(HighlightError::shape("x").to_string().contains("shape error:"));
    assert!(
        HighlightError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HighlightError::compute("x")
            .to_string()
            .contains("compute error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HighlightError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_context_converts_with_question_mark() {
    fn inner() -> HighlightResult<()> {
        use anyhow::Context;
        let r: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
        r.context("read base image")?;
        Ok(())
    }

    let err = inner().unwrap_err();
    assert!(matches!(err, HighlightError::Other(_)));
    assert!(err.to_string().contains("read base image"));
}
