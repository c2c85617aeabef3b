//! The versioned self-serializable record contract.

use crate::{CodecError, DataReader, DataWriter, DecodeLimits};

/// Type identity and schema history of a state record.
///
/// `CLASS_ID` is unique across every record type and never reused.
/// `CURRENT_VERSION` grows by one for each layout change; bytes written at any
/// version in `MINIMUM_SUPPORTED_VERSION..=CURRENT_VERSION` must stay readable.
pub trait Versioned {
    const CLASS_ID: u64;
    const CURRENT_VERSION: u32;
    const MINIMUM_SUPPORTED_VERSION: u32 = 1;
}

/// A record that can be rebuilt from any supported version of its layout.
///
/// `deserialize` receives the version the bytes were written with and must
/// leave fields introduced after that version at their absent default.
pub trait SelfDeserializable: Versioned + Sized {
    fn deserialize(input: &mut DataReader<'_>, version: u32) -> Result<Self, CodecError>;
}

/// A record with a fixed, declared field order, always written at its
/// current version. Decode-only types (historical layouts kept for import)
/// implement [`SelfDeserializable`] alone.
pub trait SelfSerializable: SelfDeserializable {
    fn serialize(&self, out: &mut DataWriter);
}

/// Check that `version` lies inside the readable range of `T`.
pub fn check_version<T: Versioned>(version: i32) -> Result<u32, CodecError> {
    if version < 0 || (version as u32) < T::MINIMUM_SUPPORTED_VERSION {
        return Err(CodecError::VersionTooOld {
            class_id: T::CLASS_ID,
            version,
            minimum: T::MINIMUM_SUPPORTED_VERSION,
        });
    }
    if version as u32 > T::CURRENT_VERSION {
        return Err(CodecError::VersionTooNew {
            class_id: T::CLASS_ID,
            version,
            current: T::CURRENT_VERSION,
        });
    }
    Ok(version as u32)
}

/// Encode a record with its class id and version header.
pub fn encode<T: SelfSerializable>(value: &T) -> Vec<u8> {
    let mut out = DataWriter::new();
    out.write_serializable(value);
    out.into_bytes()
}

/// Decode a whole buffer holding exactly one tagged record of type `T`.
pub fn decode<T: SelfDeserializable>(bytes: &[u8], limits: &DecodeLimits) -> Result<T, CodecError> {
    let mut input = DataReader::new(bytes, limits);
    let value = input.read_serializable::<T>()?;
    input.expect_end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl Versioned for Sample {
        const CLASS_ID: u64 = 0x1234;
        const CURRENT_VERSION: u32 = 4;
        const MINIMUM_SUPPORTED_VERSION: u32 = 2;
    }

    #[test]
    fn version_range_is_inclusive() {
        assert_eq!(check_version::<Sample>(2).unwrap(), 2);
        assert_eq!(check_version::<Sample>(4).unwrap(), 4);
    }

    #[test]
    fn version_below_minimum_is_fatal() {
        let err = check_version::<Sample>(1).unwrap_err();
        assert!(matches!(err, CodecError::VersionTooOld { version: 1, minimum: 2, .. }));
        assert!(err.is_fatal());
        assert!(check_version::<Sample>(-3).is_err());
    }

    #[test]
    fn version_above_current_is_rejected() {
        let err = check_version::<Sample>(5).unwrap_err();
        assert!(matches!(err, CodecError::VersionTooNew { current: 4, .. }));
        assert!(!err.is_fatal());
    }
}
