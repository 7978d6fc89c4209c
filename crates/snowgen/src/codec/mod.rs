//! Text and byte encodings of [`SnowflakeId`].
//!
//! Every encoder is an inherent method on [`SnowflakeId`] and every decoder an
//! associated `parse_*` function, so that `SnowflakeId::parse_x(id.x())`
//! returns `id` for any 64-bit value.
//!
//! [`SnowflakeId`]: crate::SnowflakeId

mod alphabet;
mod base64;
mod bytes;
mod error;
mod json;
mod radix;

pub use alphabet::{BASE58_ALPHABET, ZBASE32_ALPHABET};
pub use error::*;
