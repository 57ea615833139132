pub type PostfxResult<T> = Result<T, PostfxError>;

#[derive(thiserror::Error, Debug)]
pub enum PostfxError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PostfxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_render_their_category_and_message() {
        let cases = [
            (
                PostfxError::validation("vignette.radius must be finite and > 0"),
                "validation error: vignette.radius must be finite and > 0",
            ),
            (
                PostfxError::evaluation("failed to build rayon thread pool"),
                "evaluation error: failed to build rayon thread pool",
            ),
            (
                PostfxError::serde("invalid pipeline config"),
                "serialization error: invalid pipeline config",
            ),
        ];
        for (err, rendered) in cases {
            assert_eq!(err.to_string(), rendered);
        }
    }

    #[test]
    fn anyhow_errors_convert_and_keep_their_message() {
        fn fails() -> PostfxResult<()> {
            Err(anyhow::anyhow!("boom"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, PostfxError::Other(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
