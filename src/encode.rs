//! RawP encoder.
//!
//! Two phases: [`RawpEncoder::init`] validates the pixel descriptor and
//! computes a worst-case output size, [`RawpEncoder::encode`] writes into a
//! caller buffer of at least that size. The split exists because a
//! compressed payload's final length is unknown until compression runs;
//! sizing up front keeps buffer ownership with the caller.

use crate::error::RawpError;
use crate::header::{self, RawpHeader};
use crate::pixel::SampleType;
use crate::snappy;

/// Payload treatment for [`RawpEncoder::init`]. Both options default to off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Append a CRC-32 of the stored payload bytes after the payload.
    pub use_checksum: bool,
    /// Snappy-compress the pixel data.
    pub use_compression: bool,
}

/// Sized, validated encode of one pixel buffer.
///
/// Holds only the borrowed pixels and the precomputed sizing; independent
/// encoders may run concurrently.
#[derive(Debug)]
pub struct RawpEncoder<'a> {
    pixels: &'a [u8],
    header: RawpHeader,
    raw_size: usize,
    max_encoded_len: usize,
}

impl<'a> RawpEncoder<'a> {
    /// Validate an encode and compute its worst-case output size.
    ///
    /// Fails `InvalidField` for a descriptor no valid container can carry:
    /// zero or >65535 width/height, zero channels, a depth outside
    /// {8,16,32,64}, float samples at 8 or 16 bits, or pixel data too large
    /// for the u32 size field. Fails `BufferTooSmall` when `pixels` holds
    /// fewer than width x height x channels x depth/8 bytes.
    pub fn init(
        pixels: &'a [u8],
        width: u32,
        height: u32,
        channels: u8,
        bit_depth: u8,
        sample_type: SampleType,
        options: EncodeOptions,
    ) -> Result<RawpEncoder<'a>, RawpError> {
        if width == 0 || width > u16::MAX as u32 {
            return Err(RawpError::InvalidField("width not in 1..=65535"));
        }
        if height == 0 || height > u16::MAX as u32 {
            return Err(RawpError::InvalidField("height not in 1..=65535"));
        }
        header::validate_descriptor(sample_type, bit_depth, channels)?;

        let raw_size = width as u64 * height as u64 * channels as u64 * (bit_depth / 8) as u64;
        if raw_size > u32::MAX as u64 {
            return Err(RawpError::InvalidField(
                "pixel data exceeds the u32 size field",
            ));
        }
        let raw_size = raw_size as usize;
        if pixels.len() < raw_size {
            return Err(RawpError::BufferTooSmall {
                needed: raw_size as u64,
                actual: pixels.len(),
            });
        }

        // Worst-case stored payload length. Bounding it by u32 here means
        // encode can never produce a payload the size field cannot declare.
        let stored_bound = if options.use_compression {
            match snappy::max_compressed_len(raw_size) {
                0 => {
                    return Err(RawpError::InvalidField(
                        "worst-case compressed size exceeds the u32 size field",
                    ));
                }
                bound => bound,
            }
        } else {
            raw_size
        };
        let max_encoded_len = RawpHeader::SIZE
            .checked_add(stored_bound)
            .and_then(|n| n.checked_add(if options.use_checksum { 4 } else { 0 }))
            .ok_or(RawpError::InvalidField("container size overflows usize"))?;

        Ok(RawpEncoder {
            pixels,
            header: RawpHeader {
                use_checksum: options.use_checksum,
                use_compression: options.use_compression,
                sample_type,
                bit_depth,
                channels,
                width: width as u16,
                height: height as u16,
                // placeholder until encode learns the stored length
                data_size: raw_size as u32,
            },
            raw_size,
            max_encoded_len,
        })
    }

    /// Minimum `output` capacity for [`encode`](Self::encode).
    ///
    /// Deterministic in the init arguments. The encoded container may end up
    /// shorter when compression is on.
    pub fn max_encoded_len(&self) -> usize {
        self.max_encoded_len
    }

    /// Write the container into the front of `output`, returning its total
    /// length: header + stored payload + checksum if requested.
    ///
    /// Fails `BufferTooSmall` when `output` is shorter than
    /// [`max_encoded_len`](Self::max_encoded_len); nothing else can fail.
    /// Output is deterministic: identical pixels and options produce
    /// byte-identical containers.
    pub fn encode(&self, output: &mut [u8]) -> Result<usize, RawpError> {
        if output.len() < self.max_encoded_len {
            return Err(RawpError::BufferTooSmall {
                needed: self.max_encoded_len as u64,
                actual: output.len(),
            });
        }

        // Payload first; the header is back-filled once the stored length
        // is known.
        let data_size = if self.header.use_compression {
            snappy::compress_into(&self.pixels[..self.raw_size], &mut output[RawpHeader::SIZE..])?
        } else {
            output[RawpHeader::SIZE..RawpHeader::SIZE + self.raw_size]
                .copy_from_slice(&self.pixels[..self.raw_size]);
            self.raw_size
        };

        let mut total = RawpHeader::SIZE + data_size;
        if self.header.use_checksum {
            let crc = crc32fast::hash(&output[RawpHeader::SIZE..total]);
            output[total..total + 4].copy_from_slice(&crc.to_le_bytes());
            total += 4;
        }

        let header = RawpHeader {
            data_size: data_size as u32,
            ..self.header
        };
        header.write_into(output);

        Ok(total)
    }
}

/// One-shot encode into a fresh, exactly-sized buffer.
pub fn encode_to_vec(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: u8,
    bit_depth: u8,
    sample_type: SampleType,
    options: EncodeOptions,
) -> Result<Vec<u8>, RawpError> {
    let encoder =
        RawpEncoder::init(pixels, width, height, channels, bit_depth, sample_type, options)?;
    let mut out = vec![0u8; encoder.max_encoded_len()];
    let total = encoder.encode(&mut out)?;
    out.truncate(total);
    Ok(out)
}
