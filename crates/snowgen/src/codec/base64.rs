use ::base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::{DecodeError, SnowflakeId};

impl SnowflakeId {
    /// Standard padded base64 of the decimal text, e.g. `"MTM1ODc="` for
    /// `13587`.
    pub fn base64(&self) -> String {
        STANDARD.encode(self.to_string())
    }

    /// Decodes standard padded base64 and parses the decimal text inside it.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Base64`] if the base64 layer is malformed or unpadded
    /// - [`DecodeError::Utf8`] or [`DecodeError::Format`] if the decoded
    ///   bytes are not signed decimal text
    pub fn parse_base64(input: &str) -> Result<Self, DecodeError> {
        let decoded = STANDARD.decode(input)?;
        Self::parse_bytes(decoded)
    }
}
