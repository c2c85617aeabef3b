#![no_main]

use libfuzzer_sys::fuzz_target;
use strand_codec::{decode, encode, DecodeLimits};
use strand_records::{ExpirableTxnRecord, RecordHistory};

fuzz_target!(|data: &[u8]| {
    let limits = DecodeLimits::default();

    // Anything that decodes must re-encode to a value that decodes equal.
    if let Ok(record) = decode::<ExpirableTxnRecord>(data, &limits) {
        let again = decode::<ExpirableTxnRecord>(&encode(&record), &limits);
        assert_eq!(again.ok(), Some(record));
    }

    let _ = decode::<RecordHistory>(data, &limits);
});
