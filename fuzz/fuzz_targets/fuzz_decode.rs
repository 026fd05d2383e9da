#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpfm::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    // Must never panic, and must never allocate past the limit
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let _ = DecodeRequest::new()
        .with_limits(&limits)
        .decode_reader(data, enough::Unstoppable);
    let _ = zenpfm::pfm::read_header(&mut &data[..]);
});
