use crate::{EPOCH_MILLIS, id::layout::write_bit_layout_debug};
use chrono::{DateTime, Local, Utc};
use core::fmt;

/// A 64-bit Snowflake ID.
///
/// - 1 bit reserved (always zero for generated IDs)
/// - 41 bits timestamp (ms since [`EPOCH_MILLIS`])
/// - 5 bits datacenter ID
/// - 5 bits worker ID
/// - 12 bits sequence
///
/// ```text
///  Bit Index:  63           63 62            22 21              17 16          12 11             0
///              +--------------+----------------+------------------+--------------+---------------+
///  Field:      | reserved (1) | timestamp (41) | datacenter ID (5)| worker ID (5)| sequence (12) |
///              +--------------+----------------+------------------+--------------+---------------+
///              |<---------------------- MSB ------- 64 bits ------- LSB ------------------------>|
/// ```
///
/// The value is stored as an `i64`. Generated IDs are never negative, but any
/// `i64` is accepted so that every codec round-trips every 64-bit pattern.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId {
    id: i64,
}

impl SnowflakeId {
    /// Bitmask for extracting the 41-bit timestamp field. Occupies bits 22
    /// through 62.
    pub const TIMESTAMP_MASK: i64 = (1 << 41) - 1;

    /// Bitmask for extracting the 5-bit datacenter ID field. Occupies bits 17
    /// through 21.
    pub const DATACENTER_ID_MASK: i64 = (1 << 5) - 1;

    /// Bitmask for extracting the 5-bit worker ID field. Occupies bits 12
    /// through 16.
    pub const WORKER_ID_MASK: i64 = (1 << 5) - 1;

    /// Bitmask for extracting the 12-bit sequence field. Occupies bits 0
    /// through 11.
    pub const SEQUENCE_MASK: i64 = (1 << 12) - 1;

    /// Number of bits to shift the timestamp to its correct position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = 22;

    /// Number of bits to shift the datacenter ID to its correct position (bit
    /// 17).
    pub const DATACENTER_ID_SHIFT: u32 = 17;

    /// Number of bits to shift the worker ID to its correct position (bit 12).
    pub const WORKER_ID_SHIFT: u32 = 12;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Packs the four fields into an ID. Each component is masked to its field
    /// width, so out-of-range values never bleed into neighbouring fields.
    pub const fn from_components(
        timestamp: i64,
        datacenter_id: i64,
        worker_id: i64,
        sequence: i64,
    ) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let datacenter_id = (datacenter_id & Self::DATACENTER_ID_MASK) << Self::DATACENTER_ID_SHIFT;
        let worker_id = (worker_id & Self::WORKER_ID_MASK) << Self::WORKER_ID_SHIFT;
        let sequence = (sequence & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | datacenter_id | worker_id | sequence,
        }
    }

    /// Wraps a raw 64-bit value without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw 64-bit value.
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Alias of [`Self::to_raw`].
    pub const fn as_i64(&self) -> i64 {
        self.id
    }

    /// Extracts the timestamp (milliseconds since [`EPOCH_MILLIS`]).
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the datacenter ID.
    pub const fn datacenter_id(&self) -> i64 {
        (self.id >> Self::DATACENTER_ID_SHIFT) & Self::DATACENTER_ID_MASK
    }

    /// Extracts the worker ID.
    pub const fn worker_id(&self) -> i64 {
        (self.id >> Self::WORKER_ID_SHIFT) & Self::WORKER_ID_MASK
    }

    /// Extracts the sequence number.
    pub const fn sequence(&self) -> i64 {
        (self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK
    }

    /// Returns `(datacenter_id, worker_id)`.
    pub const fn device_id(&self) -> (i64, i64) {
        (self.datacenter_id(), self.worker_id())
    }

    /// Largest timestamp delta the 41-bit field can hold.
    pub const fn max_timestamp() -> i64 {
        Self::TIMESTAMP_MASK
    }

    /// Largest datacenter ID (31).
    pub const fn max_datacenter_id() -> i64 {
        Self::DATACENTER_ID_MASK
    }

    /// Largest worker ID (31).
    pub const fn max_worker_id() -> i64 {
        Self::WORKER_ID_MASK
    }

    /// Largest sequence value (4095).
    pub const fn max_sequence() -> i64 {
        Self::SEQUENCE_MASK
    }

    /// Returns true if all reserved bits are zero.
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Unix timestamp in milliseconds at which this ID was generated.
    pub const fn gen_timestamp(&self) -> i64 {
        self.timestamp() + EPOCH_MILLIS
    }

    /// Unix timestamp in milliseconds computed from every bit above the
    /// worker fields, without masking.
    ///
    /// Equal to [`Self::gen_timestamp`] for valid IDs.
    pub const fn time(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) + EPOCH_MILLIS
    }

    /// The generation time as a UTC date-time.
    pub fn gen_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.gen_timestamp())
    }

    /// The generation time as `YYYY-MM-DD HH:MM:SS` in the local time zone,
    /// truncated to the second.
    pub fn gen_time(&self) -> String {
        DateTime::from_timestamp(self.gen_timestamp() / 1000, 0)
            .map(|utc| {
                utc.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_default()
    }

    /// Returns true if the sequence can be incremented without overflowing.
    pub(crate) const fn has_sequence_room(&self) -> bool {
        self.sequence() < Self::max_sequence()
    }

    /// Returns a new ID with the sequence incremented.
    pub(crate) const fn increment_sequence(&self) -> Self {
        Self::from_components(
            self.timestamp(),
            self.datacenter_id(),
            self.worker_id(),
            self.sequence() + 1,
        )
    }

    /// Returns a new ID for a newer timestamp with the sequence reset to zero.
    pub(crate) const fn rollover_to_timestamp(&self, timestamp: i64) -> Self {
        Self::from_components(timestamp, self.datacenter_id(), self.worker_id(), 0)
    }
}

impl From<i64> for SnowflakeId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for i64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bit_layout_debug(f, self)
    }
}
