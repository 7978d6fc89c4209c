use crate::{DecodeError, SnowflakeId};

impl SnowflakeId {
    /// The decimal text wrapped in double quotes, e.g. `"\"13587\""`.
    ///
    /// Emitting a string keeps the full 64-bit value intact for JSON readers
    /// that store numbers as doubles.
    pub fn marshal_json(&self) -> String {
        format!("\"{}\"", self.to_raw())
    }

    /// Parses a double-quoted decimal string.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::JsonSyntax`] unless the input is `"` followed by at
    ///   least one byte and a closing `"`
    /// - [`DecodeError::Utf8`] or [`DecodeError::Format`] for the interior
    pub fn unmarshal_json(input: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        match input.as_ref() {
            [b'"', interior @ .., b'"'] if !interior.is_empty() => Self::parse_bytes(interior),
            raw => Err(DecodeError::JsonSyntax { raw: raw.to_vec() }),
        }
    }
}
