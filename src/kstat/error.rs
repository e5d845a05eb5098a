use std::io;

/// Errors that can occur while reading and parsing a kstat file
#[derive(Debug, thiserror::Error)]
pub enum KstatError {
    /// Reading from the underlying stream failed or the stream ended early
    #[error("Failed to read kstat {category}: {source}")]
    Stream {
        category: String,
        #[source]
        source: io::Error,
    },

    /// A data row did not split into exactly three fields, or its name is not UTF-8
    #[error("Malformed row in kstat {category} at line {line_number}: {reason} in '{line}'")]
    MalformedRow {
        category: String,
        line_number: usize,
        fields: usize,
        line: String,
        reason: String,
    },

    /// The value field is not a base-10 unsigned integer
    #[error("Invalid value '{value}' for {identifier} at line {line_number}")]
    ValueDecode {
        identifier: String,
        line_number: usize,
        value: String,
    },
}

impl KstatError {
    /// Create a stream error
    pub fn stream_error(category: &str, source: io::Error) -> Self {
        KstatError::Stream {
            category: category.to_string(),
            source,
        }
    }

    /// Create a malformed row error
    pub fn malformed_row(category: &str, line_number: usize, fields: usize, line: &str) -> Self {
        KstatError::MalformedRow {
            category: category.to_string(),
            line_number,
            fields,
            line: line.trim().to_string(),
            reason: format!("expected 3 fields, found {}", fields),
        }
    }

    /// Create a malformed row error for a name that is not valid UTF-8
    pub fn invalid_name(category: &str, line_number: usize, line: &str) -> Self {
        KstatError::MalformedRow {
            category: category.to_string(),
            line_number,
            fields: 3,
            line: line.trim().to_string(),
            reason: "name is not valid UTF-8".to_string(),
        }
    }

    /// Create a value decode error
    pub fn value_decode(identifier: &str, line_number: usize, value: &str) -> Self {
        KstatError::ValueDecode {
            identifier: identifier.to_string(),
            line_number,
            value: value.to_string(),
        }
    }

    /// Whether the error concerns a single data row rather than the stream itself.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            KstatError::MalformedRow { .. } | KstatError::ValueDecode { .. }
        )
    }
}

/// Result type alias for kstat operations
pub type KstatResult<T> = Result<T, KstatError>;
