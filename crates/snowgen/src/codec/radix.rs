use crate::{DecodeError, SnowflakeId};

const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Formats `value` as signed text in `radix` (2..=36), lowercase, with a `-`
/// prefix for negative values.
fn format_signed(value: i64, radix: u32) -> String {
    debug_assert!((2..=36).contains(&radix));
    // 64 binary digits plus sign
    let mut buf = [0_u8; 65];
    let mut pos = buf.len();
    let radix = u64::from(radix);
    let mut rest = value.unsigned_abs();

    loop {
        pos -= 1;
        buf[pos] = DIGITS[(rest % radix) as usize];
        rest /= radix;
        if rest == 0 {
            break;
        }
    }
    if value < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }

    buf[pos..].iter().copied().map(char::from).collect()
}

impl SnowflakeId {
    /// Parses signed decimal text.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Format`] for non-numeric or overflowing input.
    pub fn parse_string(input: &str) -> Result<Self, DecodeError> {
        Ok(Self::from_raw(input.parse::<i64>()?))
    }

    /// Signed base-2 text, e.g. `"-101"` for `-5`.
    pub fn base2(&self) -> String {
        format_signed(self.to_raw(), 2)
    }

    /// Parses signed base-2 text.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Format`] for invalid digits or overflow.
    pub fn parse_base2(input: &str) -> Result<Self, DecodeError> {
        Ok(Self::from_raw(i64::from_str_radix(input, 2)?))
    }

    /// Signed base-36 text using lowercase letters.
    pub fn base36(&self) -> String {
        format_signed(self.to_raw(), 36)
    }

    /// Parses signed base-36 text; letters may be either case.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Format`] for invalid digits or overflow.
    pub fn parse_base36(input: &str) -> Result<Self, DecodeError> {
        Ok(Self::from_raw(i64::from_str_radix(input, 36)?))
    }
}

impl core::str::FromStr for SnowflakeId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [i64; 7] = [0, 1, 13_587, -1, i64::MAX, i64::MIN, 1_116_766_490_855_473_152];

    #[test]
    fn format_matches_std_for_decimal_and_binary() {
        for v in VALUES {
            assert_eq!(format_signed(v, 10), v.to_string());
            let expected = if v < 0 {
                format!("-{:b}", v.unsigned_abs())
            } else {
                format!("{v:b}")
            };
            assert_eq!(format_signed(v, 2), expected);
        }
    }

    #[test]
    fn decimal_round_trip() {
        for v in VALUES {
            let id = SnowflakeId::from_raw(v);
            assert_eq!(SnowflakeId::parse_string(&id.to_string()).unwrap(), id);
            assert_eq!(id.to_string().parse::<SnowflakeId>().unwrap(), id);
        }
    }

    #[test]
    fn decimal_rejects_overflow_and_garbage() {
        assert!(SnowflakeId::parse_string("1116766490855473152").is_ok());
        assert!(matches!(
            SnowflakeId::parse_string("1112316766490855473152"),
            Err(DecodeError::Format(_))
        ));
        assert!(matches!(
            SnowflakeId::parse_string("12a"),
            Err(DecodeError::Format(_))
        ));
        assert!(matches!(
            SnowflakeId::parse_string(""),
            Err(DecodeError::Format(_))
        ));
    }

    #[test]
    fn base2_round_trip() {
        for v in VALUES {
            let id = SnowflakeId::from_raw(v);
            assert_eq!(SnowflakeId::parse_base2(&id.base2()).unwrap(), id);
        }
        assert_eq!(SnowflakeId::from_raw(5).base2(), "101");
        assert_eq!(SnowflakeId::from_raw(-5).base2(), "-101");
    }

    #[test]
    fn base2_accepts_known_value_and_rejects_non_binary() {
        let ms = "111101111111101110110101100101001000000000000000000000000000";
        assert!(SnowflakeId::parse_base2(ms).is_ok());
        assert!(matches!(
            SnowflakeId::parse_base2("1112316766490855473152"),
            Err(DecodeError::Format(_))
        ));
    }

    #[test]
    fn base36_round_trip() {
        for v in VALUES {
            let id = SnowflakeId::from_raw(v);
            assert_eq!(SnowflakeId::parse_base36(&id.base36()).unwrap(), id);
        }
        assert_eq!(SnowflakeId::from_raw(35).base36(), "z");
        assert_eq!(SnowflakeId::from_raw(36).base36(), "10");
        assert_eq!(SnowflakeId::from_raw(i64::MAX).base36(), "1y2p0ij32e8e7");
    }

    #[test]
    fn base36_accepts_known_value_and_rejects_overflow() {
        assert!(SnowflakeId::parse_base36("8hgmw4blvlkw").is_ok());
        assert_eq!(
            SnowflakeId::parse_base36("Z").unwrap(),
            SnowflakeId::from_raw(35)
        );
        assert!(matches!(
            SnowflakeId::parse_base36("68h5gmw443blv2lk1w"),
            Err(DecodeError::Format(_))
        ));
    }
}
