use thiserror::Error;

/// Failures raised by the pattern library.
///
/// Resolution through a provider never falls back to a default variant, so an
/// unmatched discriminator always surfaces as `UnknownVariant`. Lookups that
/// simply miss return `Option::None` instead; `NotFound` is reserved for the
/// collaborators that document a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A discriminator did not match any registered or enumerated variant.
    #[error("unknown {kind} variant: {name}")]
    UnknownVariant { kind: &'static str, name: String },

    /// A keyed lookup hit nothing and the caller asked for a hard failure.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Adapter input could not be converted to the target shape.
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl PatternError {
    pub fn unknown_variant(kind: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            name: name.into(),
        }
    }

    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_message_names_kind_and_value() {
        let err = PatternError::unknown_variant("auth platform", "Kakao");
        assert_eq!(err.to_string(), "unknown auth platform variant: Kakao");
    }

    #[test]
    fn test_not_found_message() {
        let err = PatternError::not_found("stock symbol", "TSLA");
        assert_eq!(err.to_string(), "stock symbol not found: TSLA");
    }
}
