#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpfm::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical samples
    let limits = Limits {
        max_memory_bytes: Some(64 << 20),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new()
        .with_limits(&limits)
        .decode_reader(data, enough::Unstoppable)
    else {
        return;
    };

    for order in [ByteOrder::Little, ByteOrder::Big] {
        let reencoded = encode_pfm(&decoded, order, enough::Unstoppable)
            .expect("decoded raster must re-encode");
        let Ok(decoded2) = DecodeRequest::new().decode_reader(&reencoded[..], enough::Unstoppable)
        else {
            panic!("re-encoded data failed to decode");
        };

        assert_eq!(decoded.width, decoded2.width);
        assert_eq!(decoded.height, decoded2.height);
        assert_eq!(decoded.layout, decoded2.layout);
        let a: Vec<u32> = decoded.samples.iter().map(|s| s.to_bits()).collect();
        let b: Vec<u32> = decoded2.samples.iter().map(|s| s.to_bits()).collect();
        assert_eq!(a, b, "roundtrip sample mismatch");
    }
});
