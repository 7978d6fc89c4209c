use crate::{DecodeError, SnowflakeId};

/// The z-base-32 alphabet, indexed by digit value.
///
/// Digits are written most-significant first without padding, so the output
/// is not interchangeable with RFC 4648 base32 or Crockford base32.
pub const ZBASE32_ALPHABET: &[u8; 32] = b"ybndrfg8ejkmcpqxot1uwisza345h769";

/// The Bitcoin-style base58 alphabet (no `0`, `O`, `I` or `l`), indexed by
/// digit value.
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

const NO_VALUE: u8 = 255;

const fn build_lookup<const N: usize>(alphabet: &[u8; N]) -> [u8; 256] {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < N {
        lut[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    lut
}

/// Lookup table for z-base-32 decoding
const ZBASE32_LOOKUP: [u8; 256] = build_lookup(ZBASE32_ALPHABET);

/// Lookup table for base58 decoding
const BASE58_LOOKUP: [u8; 256] = build_lookup(BASE58_ALPHABET);

/// Writes `value` in base `N`, most-significant digit first.
fn encode_positional<const N: usize>(value: u64, alphabet: &[u8; N]) -> String {
    let radix = N as u64;
    if value < radix {
        return char::from(alphabet[value as usize]).to_string();
    }

    // 13 digits is enough for u64 in base 32, fewer for base 58
    let mut buf = [0_u8; 13];
    let mut pos = buf.len();
    let mut rest = value;
    while rest >= radix {
        pos -= 1;
        buf[pos] = alphabet[(rest % radix) as usize];
        rest /= radix;
    }
    pos -= 1;
    buf[pos] = alphabet[rest as usize];

    buf[pos..].iter().copied().map(char::from).collect()
}

/// Decodes most-significant-first digits through `lookup`.
///
/// Bytes are validated before they are accumulated, so an invalid byte is
/// reported even when the prefix already overflowed.
fn decode_positional(
    input: &[u8],
    lookup: &[u8; 256],
    radix: u8,
    invalid: impl Fn(u8, usize) -> DecodeError,
) -> Result<u64, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut acc = 0_u64;
    for (index, &byte) in input.iter().enumerate() {
        let digit = lookup[usize::from(byte)];
        if digit == NO_VALUE {
            return Err(invalid(byte, index));
        }
        acc = acc
            .checked_mul(u64::from(radix))
            .and_then(|acc| acc.checked_add(u64::from(digit)))
            .ok_or(DecodeError::Overflow { radix })?;
    }

    Ok(acc)
}

impl SnowflakeId {
    /// Encodes the ID in z-base-32, most-significant digit first.
    ///
    /// Negative values are encoded through their two's-complement bit
    /// pattern.
    ///
    /// ```
    /// use snowgen::SnowflakeId;
    ///
    /// assert_eq!(SnowflakeId::from_raw(13_587).base32(), "peu");
    /// assert_eq!(SnowflakeId::from_raw(0).base32(), "y");
    /// ```
    pub fn base32(&self) -> String {
        encode_positional(self.to_raw() as u64, ZBASE32_ALPHABET)
    }

    /// Decodes a z-base-32 string produced by [`Self::base32`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidBase32`] for a byte outside the alphabet
    /// - [`DecodeError::Overflow`] if the value exceeds 64 bits
    /// - [`DecodeError::Empty`] for empty input
    pub fn parse_base32(input: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        let raw = decode_positional(input.as_ref(), &ZBASE32_LOOKUP, 32, |byte, index| {
            DecodeError::InvalidBase32 { byte, index }
        })?;
        Ok(Self::from_raw(raw as i64))
    }

    /// Encodes the ID in base58, most-significant digit first.
    ///
    /// ```
    /// use snowgen::SnowflakeId;
    ///
    /// assert_eq!(SnowflakeId::from_raw(13_587).base58(), "53g");
    /// ```
    pub fn base58(&self) -> String {
        encode_positional(self.to_raw() as u64, BASE58_ALPHABET)
    }

    /// Decodes a base58 string produced by [`Self::base58`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidBase58`] for a byte outside the alphabet
    /// - [`DecodeError::Overflow`] if the value exceeds 64 bits
    /// - [`DecodeError::Empty`] for empty input
    pub fn parse_base58(input: impl AsRef<[u8]>) -> Result<Self, DecodeError> {
        let raw = decode_positional(input.as_ref(), &BASE58_LOOKUP, 58, |byte, index| {
            DecodeError::InvalidBase58 { byte, index }
        })?;
        Ok(Self::from_raw(raw as i64))
    }
}
