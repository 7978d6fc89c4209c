use crate::{DecodeError, SnowflakeId};

impl SnowflakeId {
    /// The decimal text as ASCII bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses decimal text given as bytes.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Utf8`] if the bytes are not UTF-8
    /// - [`DecodeError::Format`] if they are not signed decimal text
    pub fn parse_bytes(input: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        let text = core::str::from_utf8(input.as_ref())?;
        Self::parse_string(text)
    }

    /// The raw value as 8 big-endian bytes.
    pub const fn int_bytes(&self) -> [u8; 8] {
        self.to_raw().to_be_bytes()
    }

    /// Rebuilds an ID from 8 big-endian bytes. Every input is valid.
    pub const fn parse_int_bytes(bytes: [u8; 8]) -> Self {
        Self::from_raw(i64::from_be_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_decimal_ascii() {
        assert_eq!(SnowflakeId::from_raw(13_587).bytes(), b"13587");
        assert_eq!(SnowflakeId::from_raw(-42).bytes(), b"-42");
    }

    #[test]
    fn bytes_round_trip() {
        for v in [0, 1, 13_587, -1, i64::MAX, i64::MIN] {
            let id = SnowflakeId::from_raw(v);
            assert_eq!(SnowflakeId::parse_bytes(id.bytes()).unwrap(), id);
        }
    }

    #[test]
    fn parse_bytes_reports_utf8_and_format_errors() {
        assert!(matches!(
            SnowflakeId::parse_bytes([0xFF, b'1', b'2']),
            Err(DecodeError::Utf8(_))
        ));
        assert!(matches!(
            SnowflakeId::parse_bytes(b"12x"),
            Err(DecodeError::Format(_))
        ));
    }

    #[test]
    fn int_bytes_are_big_endian() {
        assert_eq!(
            SnowflakeId::from_raw(13_587).int_bytes(),
            [0, 0, 0, 0, 0, 0, 0x35, 0x13]
        );
        assert_eq!(
            SnowflakeId::parse_int_bytes([0x0F, 0x7F, 0xC0, 0xFC, 0x2F, 0x80, 0, 0]),
            SnowflakeId::from_raw(1_116_823_421_972_381_696)
        );
        assert_eq!(SnowflakeId::from_raw(-1).int_bytes(), [0xFF; 8]);
    }

    #[test]
    fn int_bytes_round_trip() {
        for v in [0, 1, 13_587, -1, i64::MAX, i64::MIN] {
            let id = SnowflakeId::from_raw(v);
            assert_eq!(SnowflakeId::parse_int_bytes(id.int_bytes()), id);
        }
    }
}
