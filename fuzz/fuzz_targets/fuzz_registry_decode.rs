#![no_main]

use libfuzzer_sys::fuzz_target;
use strand_codec::DecodeLimits;
use strand_records::TypeRegistry;

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = TypeRegistry::global() else {
        return;
    };
    let limits = DecodeLimits::default();
    let Ok(value) = registry.decode_bytes(data, &limits) else {
        return;
    };
    if let Some(bytes) = value.encode() {
        let again = registry
            .decode_bytes(&bytes, &limits)
            .expect("re-encoded record must decode");
        assert_eq!(again.kind(), value.kind());
    }
});
