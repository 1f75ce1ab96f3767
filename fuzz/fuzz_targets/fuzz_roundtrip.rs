#![no_main]
use libfuzzer_sys::fuzz_target;
use rawp::*;

fuzz_target!(|data: &[u8]| {
    let Ok(header) = decode_header(data) else {
        return;
    };
    if header.raw_size() > 1 << 20 {
        return;
    }
    let Ok(decoded) = decode_pixels(data) else {
        return;
    };

    // Re-encode with the same descriptor and options; the stored bytes may
    // differ (compressor choices), the pixels must not
    let options = EncodeOptions {
        use_checksum: header.use_checksum,
        use_compression: header.use_compression,
    };
    let reencoded = encode_to_vec(
        decoded.pixels(),
        u32::from(header.width),
        u32::from(header.height),
        header.channels,
        header.bit_depth,
        header.sample_type,
        options,
    )
    .expect("decoded container re-encodes");

    let redecoded = decode_pixels(&reencoded).expect("re-encoded container decodes");
    assert_eq!(
        decoded.pixels(),
        redecoded.pixels(),
        "roundtrip pixel mismatch"
    );
    assert_eq!(decoded.header.width, redecoded.header.width);
    assert_eq!(decoded.header.height, redecoded.header.height);
    assert_eq!(decoded.header.channels, redecoded.header.channels);
    assert_eq!(decoded.header.bit_depth, redecoded.header.bit_depth);
});
