//! Error types for typed environment variable bindings

use crate::underlying::Kind;

/// Errors that can occur while resolving or scanning environment variables.
///
/// Errors produced by the resolver are returned unchanged by the adapters and
/// by [`scan`](crate::scan), so matching on a variant works at every layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The destination type has no supported underlying kind.
    ///
    /// This is a programming error on the caller side; retrying with another
    /// input never helps.
    #[error("type '{type_name}' has no supported underlying kind")]
    UnsupportedType {
        /// Fully qualified name of the rejected type
        type_name: String,
    },

    /// The source string does not match the grammar of the classified kind.
    #[error("invalid {kind} value {input:?}: {message}")]
    Parse {
        /// Kind the input was parsed as
        kind: Kind,
        /// The offending source string
        input: String,
        /// Error message from the underlying parser
        message: String,
    },

    /// Required environment variable is not set.
    #[error("Environment variable '{name}' is required but not set")]
    Missing {
        /// Name of the missing environment variable
        name: String,
    },

    /// Failed to read from a file specified by a `{VAR}_FILE` environment variable.
    #[error("Failed to read file '{path}' for environment variable '{name}': {source}")]
    FileRead {
        /// Name of the `{VAR}_FILE` environment variable (e.g., "API_KEY_FILE")
        name: String,
        /// Path to the file that failed to be read
        path: String,
        /// Underlying I/O error that caused the failure
        source: std::io::Error,
    },
}

impl Error {
    /// Create a parse error for `input` interpreted as `kind`
    pub fn parse_error(kind: Kind, input: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            kind,
            input: input.into(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported type error naming `T`
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::UnsupportedType {
            type_name: std::any::type_name::<T>().to_string(),
        }
    }

    /// Create a missing environment variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }
}
