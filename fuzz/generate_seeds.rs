#!/usr/bin/env -S cargo +nightly -Zscript
---
[dependencies]
rawp = { path = ".." }
---
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use rawp::{EncodeOptions, SampleType, encode_to_vec};
    use std::fs;

    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let rgb8: Vec<u8> = (0..4 * 3 * 3).map(|i| i as u8).collect();
    let gray16: Vec<u8> = (0..6u16).flat_map(|v| (v * 4097).to_le_bytes()).collect();
    let grayf32: Vec<u8> = [0.0f32, 0.25, 0.5, 1.0]
        .into_iter()
        .flat_map(f32::to_le_bytes)
        .collect();

    // One RGB8 container per option combination
    for (name, use_checksum, use_compression) in [
        ("stored", false, false),
        ("checksummed", true, false),
        ("compressed", false, true),
        ("compressed_checksummed", true, true),
    ] {
        let options = EncodeOptions { use_checksum, use_compression };
        let data = encode_to_vec(&rgb8, 4, 3, 3, 8, SampleType::Unsigned, options).unwrap();
        fs::write(format!("{dir}/rgb8_4x3_{name}.rawp"), data).unwrap();
    }

    let options = EncodeOptions { use_checksum: false, use_compression: true };
    let data = encode_to_vec(&gray16, 3, 2, 1, 16, SampleType::Unsigned, options).unwrap();
    fs::write(format!("{dir}/gray16_3x2_compressed.rawp"), data).unwrap();

    let data = encode_to_vec(&grayf32, 2, 2, 1, 32, SampleType::Float, EncodeOptions::default())
        .unwrap();
    fs::write(format!("{dir}/grayf32_2x2.rawp"), data).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_sig.bin"), b"RawP").unwrap();
    let mut cut = b"RawP".to_vec();
    cut.extend_from_slice(&0x1BF2_380Au32.to_le_bytes());
    cut.push(0);
    fs::write(format!("{dir}/header_cut.bin"), cut).unwrap();

    println!("Generated seed corpus in {dir}/");
}
