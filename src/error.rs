pub type ScenewireResult<T> = Result<T, ScenewireError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenewireError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    #[error("structural error: {0}")]
    Structural(String),

    #[error("unknown color name '{0}'")]
    UnknownColorName(String),

    #[error("unknown palette '{0}'")]
    UnknownPalette(String),

    #[error("catalogue error: {0}")]
    Catalogue(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScenewireError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    pub fn catalogue(msg: impl Into<String>) -> Self {
        Self::Catalogue(msg.into())
    }
}

impl From<prost::DecodeError> for ScenewireError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Structural(err.to_string())
    }
}

impl From<zip::result::ZipError> for ScenewireError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Catalogue(err.to_string())
    }
}

/// Errors raised while resolving data references inside a text template.
///
/// Each variant carries the offending token as it appeared in the template.
/// Any of these is fatal to the encode call; a half-rewritten template is
/// never emitted.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("in '{0}': index out of range")]
    IndexOutOfRange(String),

    #[error("in '{0}': graphs do not provide axes")]
    InvalidAxis(String),

    #[error("in '{0}': cannot index named data")]
    NamedIndexConflict(String),

    #[error("in '{0}': the referenced data was not found")]
    ReferenceNotFound(String),

    #[error("in '{0}': the referenced data is not unique by name")]
    AmbiguousReference(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ScenewireError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ScenewireError::structural("x")
                .to_string()
                .contains("structural error:")
        );
        assert!(
            ScenewireError::catalogue("x")
                .to_string()
                .contains("catalogue error:")
        );
    }

    #[test]
    fn reference_errors_carry_the_token() {
        let err = ScenewireError::from(ReferenceError::AmbiguousReference("%(foo)".into()));
        assert!(err.to_string().contains("%(foo)"));
        assert!(err.to_string().contains("not unique"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ScenewireError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
