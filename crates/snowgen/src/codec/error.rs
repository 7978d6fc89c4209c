use core::{num::ParseIntError, str::Utf8Error};

/// Errors returned by the `SnowflakeId::parse_*` decoders.
///
/// Decoders never substitute a default value: any failure is returned to the
/// caller as one of these variants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// Malformed or out-of-range signed integer text (decimal, base2, base36,
    /// decimal bytes, or the interior of a JSON string).
    #[error("invalid number: {0}")]
    Format(#[from] ParseIntError),

    /// Decimal bytes were not valid UTF-8.
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] Utf8Error),

    /// A byte outside the z-base-32 alphabet.
    #[error("invalid base32 byte {byte:#04x} at index {index}")]
    InvalidBase32 {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// A byte outside the base58 alphabet.
    #[error("invalid base58 byte {byte:#04x} at index {index}")]
    InvalidBase58 {
        /// The offending byte.
        byte: u8,
        /// Its position in the input.
        index: usize,
    },

    /// The decoded value does not fit in 64 bits.
    #[error("value overflows 64 bits in base {radix}")]
    Overflow {
        /// Radix of the rejected input.
        radix: u8,
    },

    /// Base32 or base58 input was empty.
    #[error("empty input")]
    Empty,

    /// The base64 layer failed before decimal parsing.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON input was not a quoted string of at least one character.
    #[error("invalid snowflake ID {:?}", String::from_utf8_lossy(.raw))]
    JsonSyntax {
        /// The rejected input, verbatim.
        raw: Vec<u8>,
    },
}
