use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

use crate::SnowflakeId;

/// Serializes as the quoted decimal string, the same text
/// [`SnowflakeId::marshal_json`] produces.
impl Serialize for SnowflakeId {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

/// Accepts a decimal string or an integer that fits in `i64`.
impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        d.deserialize_any(DecimalVisitor)
    }
}

struct DecimalVisitor;

impl Visitor<'_> for DecimalVisitor {
    type Value = SnowflakeId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a snowflake ID as a decimal string or 64-bit integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        SnowflakeId::parse_string(v).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(SnowflakeId::from_raw(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        i64::try_from(v)
            .map(SnowflakeId::from_raw)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }
}

/// Field adapter storing a [`SnowflakeId`] as a bare JSON-style integer.
///
/// ```
/// # use serde::{Deserialize, Serialize};
/// use snowgen::SnowflakeId;
///
/// #[derive(Serialize, Deserialize)]
/// struct Row {
///     #[serde(with = "snowgen::as_native")]
///     id: SnowflakeId,
/// }
/// ```
pub mod as_native {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::SnowflakeId;

    /// Serialize as the raw `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize from a raw `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not an integer in `i64` range.
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(SnowflakeId::from_raw)
    }
}

/// Field adapter storing a [`SnowflakeId`] as its base58 string.
pub mod as_base58 {
    use core::fmt;

    use serde::{Deserializer, Serializer, de};

    use crate::SnowflakeId;

    /// Serialize as [`SnowflakeId::base58`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &SnowflakeId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.base58())
    }

    /// Deserialize with [`SnowflakeId::parse_base58`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string contains bytes outside the base58 alphabet, is empty, or
    ///   overflows 64 bits
    pub fn deserialize<'de, D>(d: D) -> Result<SnowflakeId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base58Visitor;

        impl de::Visitor<'_> for Base58Visitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a base58 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                SnowflakeId::parse_base58(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base58Visitor)
    }
}
