//! RawP decoder.
//!
//! Validation runs strictly before materialization: header fields, then
//! declared-vs-actual sizes, then the checksum, and only then is anything
//! copied or decompressed. A failed decode never leaves partial pixel data
//! in the caller's buffer.

use std::borrow::Cow;

use crate::error::RawpError;
use crate::header::{self, RawpHeader};
use crate::snappy;

/// Parse and validate a container header without touching pixel data.
///
/// Cross-checks the declared payload size against the geometry. For a
/// compressed container that means reading the Snappy length preamble, so
/// the payload bytes must be present; nothing is decompressed. For a
/// stored-raw container the check is pure arithmetic and 21 bytes suffice.
pub fn decode_header(input: &[u8]) -> Result<RawpHeader, RawpError> {
    let header = RawpHeader::parse(input)?;
    if header.use_compression {
        let payload = payload_slice(input, &header)?;
        check_uncompressed_len(payload, header.raw_size())?;
    } else {
        check_data_size(&header)?;
    }
    Ok(header)
}

/// Decode a container into a caller-owned buffer of at least
/// [`raw_size`](RawpHeader::raw_size) bytes, returning the validated header.
///
/// When a checksum is present it is verified before anything is written to
/// `output` and before any decompression, so corruption surfaces as
/// [`RawpError::ChecksumMismatch`] with `output` untouched.
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<RawpHeader, RawpError> {
    let (header, payload) = split_container(input)?;
    let raw_size = header.raw_size();

    if (output.len() as u64) < raw_size {
        return Err(RawpError::BufferTooSmall {
            needed: raw_size,
            actual: output.len(),
        });
    }
    verify_checksum(input, &header, payload)?;

    let out = &mut output[..raw_size as usize];
    if header.use_compression {
        check_uncompressed_len(payload, raw_size)?;
        snappy::uncompress_into(payload, out)?;
    } else {
        out.copy_from_slice(payload);
    }
    Ok(header)
}

/// Decode a container, letting the codec manage the pixel buffer.
///
/// Stored-raw payloads come back as a borrow of `input` (zero-copy) when
/// their wire position is aligned for the sample size; 8-bit samples always
/// are. Compressed payloads decompress into a fresh buffer of exactly
/// [`raw_size`](RawpHeader::raw_size) bytes. Validation is identical to
/// [`decode`].
pub fn decode_pixels(input: &[u8]) -> Result<DecodeOutput<'_>, RawpError> {
    let (header, payload) = split_container(input)?;
    verify_checksum(input, &header, payload)?;

    if header.use_compression {
        let raw_size = header.raw_size();
        check_uncompressed_len(payload, raw_size)?;
        let mut pixels = vec![0u8; raw_size as usize];
        snappy::uncompress_into(payload, &mut pixels)?;
        Ok(DecodeOutput {
            pixels: Cow::Owned(pixels),
            header,
        })
    } else {
        // Typed views reinterpret the buffer in place, so multi-byte
        // samples must sit sample-aligned; the payload starts at offset 21
        // and usually doesn't. Copy in that case.
        let sample_bytes = (header.bit_depth / 8) as usize;
        let pixels = if payload.as_ptr().align_offset(sample_bytes) == 0 {
            Cow::Borrowed(payload)
        } else {
            Cow::Owned(payload.to_vec())
        };
        Ok(DecodeOutput { pixels, header })
    }
}

/// Parse the header and locate the payload, requiring the whole container
/// to be present. Trailing bytes beyond the container are ignored.
fn split_container(input: &[u8]) -> Result<(RawpHeader, &[u8]), RawpError> {
    let header = RawpHeader::parse(input)?;
    if !header.use_compression {
        check_data_size(&header)?;
    }
    let needed = header.encoded_len();
    if (input.len() as u64) < needed {
        return Err(RawpError::Truncated {
            needed,
            actual: input.len(),
        });
    }
    Ok((
        header,
        &input[RawpHeader::SIZE..RawpHeader::SIZE + header.data_size as usize],
    ))
}

/// The payload slice for a header-only validation pass.
fn payload_slice<'a>(input: &'a [u8], header: &RawpHeader) -> Result<&'a [u8], RawpError> {
    let needed = RawpHeader::SIZE as u64 + header.data_size as u64;
    if (input.len() as u64) < needed {
        return Err(RawpError::Truncated {
            needed,
            actual: input.len(),
        });
    }
    Ok(&input[RawpHeader::SIZE..RawpHeader::SIZE + header.data_size as usize])
}

/// Stored-raw containers must declare exactly the geometric size.
fn check_data_size(header: &RawpHeader) -> Result<(), RawpError> {
    let raw_size = header.raw_size();
    if header.data_size as u64 != raw_size {
        return Err(RawpError::SizeMismatch {
            declared: header.data_size as u64,
            expected: raw_size,
        });
    }
    Ok(())
}

/// A compressed stream must declare exactly the geometric size before any
/// decompression is attempted.
fn check_uncompressed_len(payload: &[u8], raw_size: u64) -> Result<(), RawpError> {
    let declared = snappy::uncompressed_len(payload)?;
    if declared != raw_size {
        return Err(RawpError::SizeMismatch {
            declared,
            expected: raw_size,
        });
    }
    Ok(())
}

fn verify_checksum(input: &[u8], header: &RawpHeader, payload: &[u8]) -> Result<(), RawpError> {
    if !header.use_checksum {
        return Ok(());
    }
    // split_container already proved the 4 trailer bytes are present
    let stored = header::read_u32(input, RawpHeader::SIZE + payload.len());
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(RawpError::ChecksumMismatch { stored, computed });
    }
    Ok(())
}

/// Decoded pixel data plus the header it was validated against.
///
/// Pixels may borrow from the decode input or own a freshly decompressed
/// buffer; [`is_borrowed`](Self::is_borrowed) tells which.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    /// The validated container header.
    pub header: RawpHeader,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel bytes (copies if borrowed).
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels.into_owned()
    }

    /// Whether the pixels borrow from the decode input.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Reinterpret the pixel bytes as a typed pixel slice.
    ///
    /// Fails with [`RawpError::FormatMismatch`] unless the container's
    /// descriptor is exactly the one `P` maps onto.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::RawpPixel>(&self) -> Result<&[P], RawpError> {
        if self.header.pixel_format() != Some(P::format()) {
            return Err(RawpError::FormatMismatch {
                requested: P::format(),
            });
        }
        // A matching descriptor divides the length exactly and decode keeps
        // buffers sample-aligned, so the cast is expected to succeed
        bytemuck::try_cast_slice(self.pixels())
            .map_err(|_| RawpError::FormatMismatch { requested: P::format() })
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    ///
    /// Borrows directly from this `DecodeOutput`'s buffer, whether borrowed
    /// or owned.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::RawpPixel>(&self) -> Result<imgref::ImgRef<'_, P>, RawpError> {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.header.width as usize,
            self.header.height as usize,
        ))
    }
}
