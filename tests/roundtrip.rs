use rawp::*;

fn checkerboard(w: usize, h: usize, bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h * bpp];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * bpp;
            if (x + y) % 2 == 0 {
                for c in 0..bpp {
                    pixels[off + c] = 220 - (c as u8 * 15);
                }
            } else {
                for c in 0..bpp {
                    pixels[off + c] = 16 + (c as u8 * 25);
                }
            }
        }
    }
    pixels
}

fn noise(len: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; len];
    let mut state: u32 = 0x2545_F491;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn ramp(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

// ── Option matrix ────────────────────────────────────────────────────

#[test]
fn stored_roundtrip_rgb8() {
    let pixels = checkerboard(8, 6, 3);
    let encoded = encode_to_vec(
        &pixels,
        8,
        6,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(encoded.len(), RawpHeader::SIZE + pixels.len());

    let mut out = vec![0u8; pixels.len()];
    let header = decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
    assert_eq!(header.width, 8);
    assert_eq!(header.height, 6);
    assert_eq!(header.channels, 3);
    assert_eq!(header.bit_depth, 8);
    assert_eq!(header.sample_type, SampleType::Unsigned);
    assert!(!header.use_checksum);
    assert!(!header.use_compression);
    assert_eq!(header.data_size as usize, pixels.len());
}

#[test]
fn checksummed_roundtrip_rgb8() {
    let pixels = noise(8 * 6 * 3);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: false,
    };
    let encoded = encode_to_vec(&pixels, 8, 6, 3, 8, SampleType::Unsigned, options).unwrap();
    assert_eq!(encoded.len(), RawpHeader::SIZE + pixels.len() + 4);

    let mut out = vec![0u8; pixels.len()];
    let header = decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
    assert!(header.use_checksum);
}

#[test]
fn compressed_roundtrip_rgb8() {
    let pixels = checkerboard(32, 24, 3);
    let options = EncodeOptions {
        use_checksum: false,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 32, 24, 3, 8, SampleType::Unsigned, options).unwrap();

    let header = decode_header(&encoded).unwrap();
    assert!(header.use_compression);
    assert_eq!(encoded.len() as u64, header.encoded_len());

    let mut out = vec![0u8; pixels.len()];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

#[test]
fn compressed_checksummed_roundtrip_rgb8() {
    let pixels = noise(16 * 16 * 3);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 16, 16, 3, 8, SampleType::Unsigned, options).unwrap();

    let mut out = vec![0u8; pixels.len()];
    let header = decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
    assert!(header.use_checksum);
    assert!(header.use_compression);
    assert_eq!(encoded.len() as u64, header.encoded_len());
}

// ── Descriptor variety ───────────────────────────────────────────────

#[test]
fn gray16_compressed_roundtrip() {
    let pixels = checkerboard(12, 10, 2);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 12, 10, 1, 16, SampleType::Unsigned, options).unwrap();

    let header = decode_header(&encoded).unwrap();
    assert_eq!(header.raw_size(), 12 * 10 * 2);
    assert_eq!(header.pixel_format(), Some(PixelFormat::Gray16));

    let mut out = vec![0u8; pixels.len()];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

#[test]
fn rgbaf32_stored_roundtrip() {
    let floats: Vec<f32> = (0..5 * 4 * 4).map(|i| i as f32 / 79.0).collect();
    let pixels: Vec<u8> = floats.iter().flat_map(|f| f.to_ne_bytes()).collect();
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: false,
    };
    let encoded = encode_to_vec(&pixels, 5, 4, 4, 32, SampleType::Float, options).unwrap();

    let header = decode_header(&encoded).unwrap();
    assert_eq!(header.pixel_format(), Some(PixelFormat::RgbaF32));

    let mut out = vec![0u8; pixels.len()];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

#[test]
fn five_channel_roundtrip() {
    // Descriptors outside the standard set are first-class
    let pixels = noise(7 * 3 * 5);
    let encoded = encode_to_vec(
        &pixels,
        7,
        3,
        5,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();

    let header = decode_header(&encoded).unwrap();
    assert_eq!(header.channels, 5);
    assert_eq!(header.pixel_format(), None);

    let mut out = vec![0u8; pixels.len()];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

#[test]
fn gray64_signed_roundtrip() {
    let pixels = noise(6 * 2 * 8);
    let encoded = encode_to_vec(
        &pixels,
        6,
        2,
        1,
        64,
        SampleType::Signed,
        EncodeOptions::default(),
    )
    .unwrap();

    let mut out = vec![0u8; pixels.len()];
    let header = decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
    assert_eq!(header.bit_depth, 64);
    assert_eq!(header.sample_type, SampleType::Signed);
}

// ── Fixed-size scenarios ─────────────────────────────────────────────

#[test]
fn stored_800x600_rgb8_exact_size() {
    let pixels = ramp(800 * 600 * 3);
    let encoded = encode_to_vec(
        &pixels,
        800,
        600,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();
    assert_eq!(encoded.len(), RawpHeader::SIZE + 1_440_000);

    let mut out = vec![0u8; 1_440_000];
    let header = decode(&encoded, &mut out).unwrap();
    assert_eq!(header.data_size, 1_440_000);
    assert_eq!(out, pixels);
}

#[test]
fn compressed_800x600_ramp_shrinks() {
    let pixels = ramp(800 * 600 * 3);
    let options = EncodeOptions {
        use_checksum: false,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 800, 600, 3, 8, SampleType::Unsigned, options).unwrap();

    let header = decode_header(&encoded).unwrap();
    assert!(
        header.data_size < 1_440_000,
        "data_size = {}",
        header.data_size
    );
    assert_eq!(header.raw_size(), 1_440_000);

    let mut out = vec![0u8; 1_440_000];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

// ── Sizing and determinism ───────────────────────────────────────────

#[test]
fn sizing_is_idempotent() {
    let pixels = noise(20 * 20 * 3);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: true,
    };
    let a = RawpEncoder::init(&pixels, 20, 20, 3, 8, SampleType::Unsigned, options).unwrap();
    let b = RawpEncoder::init(&pixels, 20, 20, 3, 8, SampleType::Unsigned, options).unwrap();
    assert_eq!(a.max_encoded_len(), b.max_encoded_len());

    let mut out = vec![0u8; a.max_encoded_len()];
    let total = a.encode(&mut out).unwrap();
    assert!(total <= a.max_encoded_len());
}

#[test]
fn encode_is_deterministic() {
    let pixels = checkerboard(19, 7, 4);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: true,
    };
    let encoder = RawpEncoder::init(&pixels, 19, 7, 4, 8, SampleType::Unsigned, options).unwrap();

    let mut first = vec![0u8; encoder.max_encoded_len()];
    let mut second = vec![0xFFu8; encoder.max_encoded_len()];
    let total_first = encoder.encode(&mut first).unwrap();
    let total_second = encoder.encode(&mut second).unwrap();
    assert_eq!(total_first, total_second);
    assert_eq!(first[..total_first], second[..total_second]);

    let one_shot = encode_to_vec(&pixels, 19, 7, 4, 8, SampleType::Unsigned, options).unwrap();
    assert_eq!(one_shot, first[..total_first]);
}

#[test]
fn trailing_bytes_are_ignored() {
    let pixels = noise(4 * 4 * 3);
    let options = EncodeOptions {
        use_checksum: true,
        use_compression: false,
    };
    let mut encoded = encode_to_vec(&pixels, 4, 4, 3, 8, SampleType::Unsigned, options).unwrap();
    encoded.extend_from_slice(b"garbage");

    decode_header(&encoded).unwrap();
    let mut out = vec![0u8; pixels.len()];
    decode(&encoded, &mut out).unwrap();
    assert_eq!(out, pixels);
}

// ── Codec-managed output ─────────────────────────────────────────────

#[test]
fn decode_pixels_borrows_stored_rgb8() {
    let pixels = checkerboard(9, 5, 3);
    let encoded = encode_to_vec(
        &pixels,
        9,
        5,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    assert!(decoded.is_borrowed(), "stored 8-bit decode should be zero-copy");
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert_eq!(decoded.header.width, 9);
    assert_eq!(decoded.into_pixels(), pixels);
}

#[test]
fn decode_pixels_owns_compressed() {
    let pixels = checkerboard(9, 5, 3);
    let options = EncodeOptions {
        use_checksum: false,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 9, 5, 3, 8, SampleType::Unsigned, options).unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    assert!(!decoded.is_borrowed());
    assert_eq!(decoded.pixels(), &pixels[..]);
}

// ── Typed views ──────────────────────────────────────────────────────

#[cfg(feature = "rgb")]
#[test]
fn typed_view_matches_descriptor() {
    let pixels = checkerboard(6, 4, 3);
    let encoded = encode_to_vec(
        &pixels,
        6,
        4,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    let typed: &[rgb::RGB<u8>] = decoded.as_pixels().unwrap();
    assert_eq!(typed.len(), 6 * 4);
    assert_eq!(typed[0].r, pixels[0]);
    assert_eq!(typed[0].g, pixels[1]);
    assert_eq!(typed[0].b, pixels[2]);
}

#[cfg(feature = "rgb")]
#[test]
fn typed_view_rejects_other_descriptors() {
    let pixels = checkerboard(6, 4, 3);
    let encoded = encode_to_vec(
        &pixels,
        6,
        4,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    match decoded.as_pixels::<rgb::RGBA<u8>>() {
        Err(RawpError::FormatMismatch { requested }) => {
            assert_eq!(requested, PixelFormat::Rgba8);
        }
        other => panic!("expected FormatMismatch, got {other:?}"),
    }
}

#[cfg(feature = "rgb")]
#[test]
fn typed_view_of_owned_gray16() {
    // Compressed payloads decompress into a fresh buffer, so wide samples
    // stay viewable
    let values: Vec<u16> = (0..8u16 * 3).map(|v| v * 921).collect();
    let pixels: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let options = EncodeOptions {
        use_checksum: false,
        use_compression: true,
    };
    let encoded = encode_to_vec(&pixels, 8, 3, 1, 16, SampleType::Unsigned, options).unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    let typed: &[rgb::alt::Gray<u16>] = decoded.as_pixels().unwrap();
    assert_eq!(typed.len(), 8 * 3);
    assert_eq!(typed[1].0, 921);
}

#[cfg(feature = "rgb")]
#[test]
fn typed_view_of_stored_rgbf32() {
    // Stored wide samples start at byte 21 of the container. Whether decode
    // borrowed them in place or realigned into an owned copy, the typed view
    // must come back.
    let floats: Vec<f32> = (0..6 * 2 * 3).map(|i| i as f32 * 0.125).collect();
    let pixels: Vec<u8> = floats.iter().flat_map(|f| f.to_ne_bytes()).collect();
    let encoded = encode_to_vec(
        &pixels,
        6,
        2,
        3,
        32,
        SampleType::Float,
        EncodeOptions::default(),
    )
    .unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    let typed: &[rgb::RGB<f32>] = decoded.as_pixels().unwrap();
    assert_eq!(typed.len(), 6 * 2);
    assert_eq!(typed[1].g, 4.0 * 0.125);
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view_has_container_geometry() {
    let pixels = checkerboard(6, 4, 3);
    let encoded = encode_to_vec(
        &pixels,
        6,
        4,
        3,
        8,
        SampleType::Unsigned,
        EncodeOptions::default(),
    )
    .unwrap();

    let decoded = decode_pixels(&encoded).unwrap();
    let img = decoded.as_imgref::<rgb::RGB<u8>>().unwrap();
    assert_eq!(img.width(), 6);
    assert_eq!(img.height(), 4);
    assert_eq!(img.buf().len(), 6 * 4);
}
