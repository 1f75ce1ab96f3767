#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe on arbitrary bytes must never panic
    let Ok(header) = rawp::decode_header(data) else {
        return;
    };

    // Keep allocations reasonable; a hostile preamble can claim terabytes
    if header.raw_size() > 1 << 20 {
        return;
    }

    let _ = rawp::decode_pixels(data);

    let mut buf = vec![0u8; header.raw_size() as usize];
    let _ = rawp::decode(data, &mut buf);
});
