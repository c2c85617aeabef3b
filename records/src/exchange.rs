//! Current and next native-currency exchange rates.

use strand_codec::{
    CodecError, DataReader, DataWriter, SelfDeserializable, SelfSerializable, Versioned,
};
use strand_wire::{ExchangeRate, ExchangeRateSet, TimestampSeconds};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ExchangeRates {
    current_hbar_equiv: i32,
    current_cent_equiv: i32,
    current_expiry: i64,
    next_hbar_equiv: i32,
    next_cent_equiv: i32,
    next_expiry: i64,
}

impl ExchangeRates {
    /// Build from `(hbar_equiv, cent_equiv, expiry_seconds)` for each rate.
    pub fn new(current: (i32, i32, i64), next: (i32, i32, i64)) -> Self {
        Self {
            current_hbar_equiv: current.0,
            current_cent_equiv: current.1,
            current_expiry: current.2,
            next_hbar_equiv: next.0,
            next_cent_equiv: next.1,
            next_expiry: next.2,
        }
    }

    pub fn current_hbar_equiv(&self) -> i32 {
        self.current_hbar_equiv
    }

    pub fn current_cent_equiv(&self) -> i32 {
        self.current_cent_equiv
    }

    pub fn current_expiry(&self) -> i64 {
        self.current_expiry
    }

    pub fn next_hbar_equiv(&self) -> i32 {
        self.next_hbar_equiv
    }

    pub fn next_cent_equiv(&self) -> i32 {
        self.next_cent_equiv
    }

    pub fn next_expiry(&self) -> i64 {
        self.next_expiry
    }

    pub fn to_wire(&self) -> ExchangeRateSet {
        let rate = |hbar_equiv, cent_equiv, seconds| ExchangeRate {
            hbar_equiv,
            cent_equiv,
            expiration_time: Some(TimestampSeconds { seconds }),
        };
        ExchangeRateSet {
            current_rate: Some(rate(
                self.current_hbar_equiv,
                self.current_cent_equiv,
                self.current_expiry,
            )),
            next_rate: Some(rate(self.next_hbar_equiv, self.next_cent_equiv, self.next_expiry)),
        }
    }

    /// Absent rates read as zero.
    pub fn from_wire(set: &ExchangeRateSet) -> Self {
        let parts = |rate: Option<&ExchangeRate>| {
            rate.map_or((0, 0, 0), |r| {
                (
                    r.hbar_equiv,
                    r.cent_equiv,
                    r.expiration_time.map_or(0, |t| t.seconds),
                )
            })
        };
        Self::new(parts(set.current_rate.as_ref()), parts(set.next_rate.as_ref()))
    }
}

impl Versioned for ExchangeRates {
    const CLASS_ID: u64 = 0x5dfb_7b68_d747_3416;
    const CURRENT_VERSION: u32 = 1;
}

impl SelfSerializable for ExchangeRates {
    fn serialize(&self, out: &mut DataWriter) {
        out.write_i32(self.current_hbar_equiv);
        out.write_i32(self.current_cent_equiv);
        out.write_i64(self.current_expiry);
        out.write_i32(self.next_hbar_equiv);
        out.write_i32(self.next_cent_equiv);
        out.write_i64(self.next_expiry);
    }
}

impl SelfDeserializable for ExchangeRates {
    fn deserialize(input: &mut DataReader<'_>, _version: u32) -> Result<Self, CodecError> {
        let current = (input.read_i32()?, input.read_i32()?, input.read_i64()?);
        let next = (input.read_i32()?, input.read_i32()?, input.read_i64()?);
        Ok(Self::new(current, next))
    }
}
