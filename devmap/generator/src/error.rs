// Licensed under the Apache-2.0 license

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a device list into a device map.
///
/// Every variant is fatal: the generator never emits a partial document.
#[derive(Error, Debug)]
pub enum DevmapError {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not valid JSON or is not an array of objects.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A block device is missing a field the table needs.
    #[error("device `{device}`: missing field `{field}`")]
    MissingField { device: String, field: &'static str },

    /// A numeric field is neither `0` nor a literal of the expected base.
    #[error("device `{device}`: invalid {field} literal `{value}`")]
    InvalidNumericLiteral {
        device: String,
        field: &'static str,
        value: String,
    },

    /// A numeric field does not fit the record component it lands in.
    #[error("device `{device}`: {field} literal `{value}` does not fit in {bits} bits")]
    LiteralOutOfRange {
        device: String,
        field: &'static str,
        value: String,
        bits: u32,
    },

    /// The sanitized name is not a legal identifier in the target language.
    #[error("invalid identifier `{name}`: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },

    /// The sanitized name is wider than the name column (strict mode only).
    #[error("identifier `{name}` is longer than {width} characters")]
    IdentifierTooLong { name: String, width: usize },

    /// Two block devices sanitize to the same identifier.
    #[error("duplicate identifier `{0}`")]
    DuplicateIdentifier(String),

    /// A device lists more interrupts than the table has slots for.
    #[error("device `{device}`: {count} interrupts listed, at most {max} supported")]
    TooManyInterrupts {
        device: String,
        count: usize,
        max: usize,
    },

    /// An interrupt value is not a non-negative integer.
    #[error("device `{device}`: invalid interrupt value `{value}`")]
    InvalidInterrupt { device: String, value: String },
}

/// Result type for device map generation.
pub type DevmapResult<T> = std::result::Result<T, DevmapError>;
