//! Error types for option assembly.

use thiserror::Error;

/// Errors raised while building or rendering a filter invocation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// A value violates the declared range, emptiness, kind or predicate.
    #[error("Invalid value for option '{option}': {reason}")]
    InvalidArgument { option: String, reason: String },

    /// Two options that ffmpeg treats as mutually exclusive were both set.
    #[error("Option '{option}' cannot be combined with '{conflicts_with}'")]
    UnsupportedCombination {
        option: String,
        conflicts_with: String,
    },

    /// A mandatory option was never set before rendering.
    #[error("Filter '{filter}' requires option '{option}'")]
    MissingRequiredArgument { filter: String, option: String },

    /// The filter declares no option with this name.
    #[error("Filter '{filter}' has no option named '{option}'")]
    UnknownOption { filter: String, option: String },

    /// No filter with this name is registered.
    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    /// A filter invocation string could not be parsed.
    #[error("Parse error: {message}")]
    Parse { message: String },
}

impl FilterError {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new unsupported combination error.
    pub fn unsupported_combination(
        option: impl Into<String>,
        conflicts_with: impl Into<String>,
    ) -> Self {
        Self::UnsupportedCombination {
            option: option.into(),
            conflicts_with: conflicts_with.into(),
        }
    }

    /// Creates a new missing required argument error.
    pub fn missing_required(filter: impl Into<String>, option: impl Into<String>) -> Self {
        Self::MissingRequiredArgument {
            filter: filter.into(),
            option: option.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Name of the option this error is about, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { option, .. }
            | Self::UnsupportedCombination { option, .. }
            | Self::MissingRequiredArgument { option, .. }
            | Self::UnknownOption { option, .. } => Some(option),
            Self::UnknownFilter { .. } | Self::Parse { .. } => None,
        }
    }

    /// Whether the error was raised by a setter call rather than by render.
    pub fn is_setter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::UnsupportedCombination { .. }
                | Self::UnknownOption { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FilterError::invalid_argument("w", "must be in [0, 32767], got -5");
        assert_eq!(
            err.to_string(),
            "Invalid value for option 'w': must be in [0, 32767], got -5"
        );

        let err = FilterError::unsupported_combination("textfile", "text");
        assert_eq!(
            err.to_string(),
            "Option 'textfile' cannot be combined with 'text'"
        );

        let err = FilterError::missing_required("movie", "filename");
        assert_eq!(err.to_string(), "Filter 'movie' requires option 'filename'");
    }

    #[test]
    fn test_option_accessor() {
        assert_eq!(FilterError::invalid_argument("h", "bad").option(), Some("h"));
        assert_eq!(FilterError::parse("eof").option(), None);
    }

    #[test]
    fn test_is_setter_error() {
        assert!(FilterError::invalid_argument("h", "bad").is_setter_error());
        assert!(FilterError::unsupported_combination("a", "b").is_setter_error());
        assert!(!FilterError::missing_required("f", "o").is_setter_error());
    }
}
