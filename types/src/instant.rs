//! Nanosecond-precision consensus timestamps.

use std::fmt;

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_wire::Timestamp;

/// Seconds and nanoseconds since the epoch. `(0, 0)` means "missing".
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RichInstant {
    seconds: i64,
    nanos: i32,
}

impl RichInstant {
    pub const MISSING: Self = Self::new(0, 0);

    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    pub fn is_missing(&self) -> bool {
        *self == Self::MISSING
    }

    pub fn is_after(&self, other: &RichInstant) -> bool {
        self > other
    }

    pub fn minus_seconds(&self, seconds: i64) -> Self {
        Self::new(self.seconds.saturating_sub(seconds), self.nanos)
    }

    /// Convert from a possibly absent wire timestamp; absence maps to [`RichInstant::MISSING`].
    pub fn from_wire(ts: Option<&Timestamp>) -> Self {
        ts.map_or(Self::MISSING, Self::from)
    }

    pub fn to_wire(&self) -> Timestamp {
        Timestamp {
            seconds: self.seconds,
            nanos: self.nanos,
        }
    }
}

impl From<&Timestamp> for RichInstant {
    fn from(ts: &Timestamp) -> Self {
        Self::new(ts.seconds, ts.nanos)
    }
}

impl Versioned for RichInstant {
    const CLASS_ID: u64 = 0x2d3f_8b9c_6a1e_4b70;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for RichInstant {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i64(self.seconds);
        out.write_i32(self.nanos);
    }
}

impl SelfDeserializable for RichInstant {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        Ok(Self::new(input.read_i64()?, input.read_i32()?))
    }
}

impl fmt::Display for RichInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.seconds, self.nanos)
    }
}

impl fmt::Debug for RichInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RichInstant({self})")
    }
}
