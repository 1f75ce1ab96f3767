//! RawP header codec.
//!
//! Wire layout, little-endian, no padding:
//!
//! ```text
//! offset  size  field
//!      0     4  signature, b"RawP"
//!      4     4  magic, 0x1BF2380A
//!      8     1  use_checksum, 0 or 1
//!      9     1  use_compression, 0 or 1
//!     10     1  sample type, 1=unsigned 2=signed 3=float
//!     11     1  bit depth, 8/16/32/64
//!     12     1  channels, nonzero
//!     13     2  width, nonzero
//!     15     2  height, nonzero
//!     17     4  data size (stored payload length)
//!     21     -  payload, then a CRC-32 trailer iff use_checksum
//! ```
//!
//! Parsing validates field-level invariants only; cross-checks between the
//! declared payload size and the geometry belong to the decoder.

use crate::error::RawpError;
use crate::pixel::{PixelFormat, SampleType};

/// Signature bytes at the start of every container.
pub const RAWP_SIG: [u8; 4] = *b"RawP";

/// Format magic following the signature.
pub const RAWP_MAGIC: u32 = 0x1BF2_380A;

/// Field offsets. The layout is defined here and nowhere else.
pub(crate) mod offset {
    pub const SIG: usize = 0;
    pub const MAGIC: usize = 4;
    pub const USE_CHECKSUM: usize = 8;
    pub const USE_COMPRESSION: usize = 9;
    pub const SAMPLE_TYPE: usize = 10;
    pub const BIT_DEPTH: usize = 11;
    pub const CHANNELS: usize = 12;
    pub const WIDTH: usize = 13;
    pub const HEIGHT: usize = 15;
    pub const DATA_SIZE: usize = 17;
    pub const PAYLOAD: usize = 21;
}

pub(crate) fn read_u16(data: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([data[at], data[at + 1]])
}

pub(crate) fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// A validated RawP container header.
///
/// Exists only for the duration of one encode or decode call; it never
/// borrows the payload it describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawpHeader {
    /// A CRC-32 of the payload trails the container.
    pub use_checksum: bool,
    /// The payload is a Snappy block stream.
    pub use_compression: bool,
    /// Sample interpretation.
    pub sample_type: SampleType,
    /// Bits per sample: 8, 16, 32, or 64.
    pub bit_depth: u8,
    /// Samples per pixel, nonzero.
    pub channels: u8,
    /// Image width in pixels, nonzero.
    pub width: u16,
    /// Image height in pixels, nonzero.
    pub height: u16,
    /// Stored payload length: the compressed length when `use_compression`,
    /// the raw length otherwise.
    pub data_size: u32,
}

impl RawpHeader {
    /// Serialized header size in bytes.
    pub const SIZE: usize = offset::PAYLOAD;

    /// Uncompressed pixel data length: width x height x channels x depth/8.
    pub fn raw_size(&self) -> u64 {
        self.width as u64
            * self.height as u64
            * self.channels as u64
            * (self.bit_depth / 8) as u64
    }

    /// Total container length: header, stored payload, optional checksum.
    pub fn encoded_len(&self) -> u64 {
        Self::SIZE as u64 + self.data_size as u64 + if self.use_checksum { 4 } else { 0 }
    }

    /// The standard pixel format matching this descriptor, if any.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        PixelFormat::from_parts(self.channels, self.bit_depth, self.sample_type)
    }

    /// Serialize into the first [`Self::SIZE`] bytes of `out`.
    pub(crate) fn write_into(&self, out: &mut [u8]) {
        out[offset::SIG..offset::MAGIC].copy_from_slice(&RAWP_SIG);
        out[offset::MAGIC..offset::USE_CHECKSUM].copy_from_slice(&RAWP_MAGIC.to_le_bytes());
        out[offset::USE_CHECKSUM] = self.use_checksum as u8;
        out[offset::USE_COMPRESSION] = self.use_compression as u8;
        out[offset::SAMPLE_TYPE] = self.sample_type as u8;
        out[offset::BIT_DEPTH] = self.bit_depth;
        out[offset::CHANNELS] = self.channels;
        out[offset::WIDTH..offset::HEIGHT].copy_from_slice(&self.width.to_le_bytes());
        out[offset::HEIGHT..offset::DATA_SIZE].copy_from_slice(&self.height.to_le_bytes());
        out[offset::DATA_SIZE..offset::PAYLOAD].copy_from_slice(&self.data_size.to_le_bytes());
    }

    /// Parse and field-validate the header at the start of `data`.
    pub(crate) fn parse(data: &[u8]) -> Result<RawpHeader, RawpError> {
        if data.len() < Self::SIZE {
            return Err(RawpError::Truncated {
                needed: Self::SIZE as u64,
                actual: data.len(),
            });
        }

        let sig = [
            data[offset::SIG],
            data[offset::SIG + 1],
            data[offset::SIG + 2],
            data[offset::SIG + 3],
        ];
        if sig != RAWP_SIG {
            return Err(RawpError::BadSignature { found: sig });
        }
        let magic = read_u32(data, offset::MAGIC);
        if magic != RAWP_MAGIC {
            return Err(RawpError::BadMagic { found: magic });
        }

        let use_checksum = parse_flag(data[offset::USE_CHECKSUM], "use_checksum flag not 0 or 1")?;
        let use_compression =
            parse_flag(data[offset::USE_COMPRESSION], "use_compression flag not 0 or 1")?;
        let sample_type = SampleType::from_wire(data[offset::SAMPLE_TYPE])
            .ok_or(RawpError::InvalidField("unknown sample type"))?;
        let bit_depth = data[offset::BIT_DEPTH];
        let channels = data[offset::CHANNELS];
        validate_descriptor(sample_type, bit_depth, channels)?;

        let width = read_u16(data, offset::WIDTH);
        let height = read_u16(data, offset::HEIGHT);
        if width == 0 {
            return Err(RawpError::InvalidField("width is zero"));
        }
        if height == 0 {
            return Err(RawpError::InvalidField("height is zero"));
        }

        Ok(RawpHeader {
            use_checksum,
            use_compression,
            sample_type,
            bit_depth,
            channels,
            width,
            height,
            data_size: read_u32(data, offset::DATA_SIZE),
        })
    }
}

fn parse_flag(value: u8, what: &'static str) -> Result<bool, RawpError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(RawpError::InvalidField(what)),
    }
}

/// Validate the sample descriptor triple, shared by header parsing and
/// encoder argument checking.
pub(crate) fn validate_descriptor(
    sample_type: SampleType,
    bit_depth: u8,
    channels: u8,
) -> Result<(), RawpError> {
    if !matches!(bit_depth, 8 | 16 | 32 | 64) {
        return Err(RawpError::InvalidField("bit depth not 8, 16, 32, or 64"));
    }
    if channels == 0 {
        return Err(RawpError::InvalidField("channels is zero"));
    }
    // 8- and 16-bit IEEE floats don't exist in this format
    if sample_type == SampleType::Float && (bit_depth == 8 || bit_depth == 16) {
        return Err(RawpError::InvalidField(
            "float samples require 32- or 64-bit depth",
        ));
    }
    Ok(())
}
