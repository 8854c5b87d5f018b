use std::io;

use thiserror::Error;

/// Result alias for manifest, codec, and backend operations.
pub type AbiResult<T> = Result<T, Error>;

/// Failure modes of manifest parsing, witness encoding, and backend calls.
///
/// Encoding reports every failure synchronously and never yields a partial
/// witness map.
#[derive(Debug, Error)]
pub enum Error {
    /// The manifest or one of its type descriptions is structurally
    /// malformed.
    #[error("malformed circuit manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// A declared parameter or struct field is absent from the supplied
    /// inputs.
    #[error("missing parameter: {name}")]
    MissingParameter {
        /// Declared parameter or struct field name.
        name: String,
    },

    /// The supplied value's shape doesn't match the declared type.
    #[error("expected {expected} for parameter {name}, got {found}")]
    TypeMismatch {
        /// Declared parameter or struct field name.
        name: String,
        /// Shape the declared type requires.
        expected: &'static str,
        /// Shape of the supplied value.
        found: &'static str,
    },

    /// A scalar string is missing the `0x` prefix or, in strict mode,
    /// carries non-hex digits.
    #[error("expected hexadecimal value for parameter {name}")]
    InvalidFormat {
        /// Declared parameter or struct field name.
        name: String,
    },

    /// A numeric literal was supplied for an integer width that 64 bits
    /// can't represent losslessly.
    #[error(
        "unsupported numeric literal for {width}-bit parameter {name}, use a hexadecimal string"
    )]
    UnsupportedWidth {
        /// Declared parameter or struct field name.
        name: String,
        /// Declared integer width in bits.
        width: u32,
    },

    /// A flattened array or a string disagrees with its declared length.
    #[error("expected {expected} leaves for parameter {name}, got {found}")]
    LengthMismatch {
        /// Declared parameter or struct field name.
        name: String,
        /// Leaf count the declared type implies.
        expected: usize,
        /// Leaf count of the supplied value.
        found: usize,
    },

    /// The declared type carries a `kind` tag this codec doesn't know.
    #[error("unsupported type kind for parameter {name}")]
    UnsupportedType {
        /// Declared parameter or struct field name.
        name: String,
    },

    /// Proving or verifying was attempted before the SRS was set up.
    #[error("SRS not set up")]
    SrsNotSetup,

    /// The proving backend reported a failure.
    #[error("backend failure: {0}")]
    Backend(#[from] io::Error),
}
