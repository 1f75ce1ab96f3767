//! # rawp
//!
//! Encoder and decoder for the RawP raster container: a fixed 21-byte
//! little-endian header, pixel bytes stored raw or Snappy-compressed, and
//! an optional trailing CRC-32 over the stored payload.
//!
//! The codec works purely on in-memory buffers the caller owns. Encoding
//! and decoding are each split in two phases so buffers can be sized
//! exactly: [`RawpEncoder::init`] validates and bounds the output before
//! [`RawpEncoder::encode`] writes it, and [`decode_header`] validates a
//! container before [`decode`] materializes pixels into a caller buffer.
//!
//! ## Wire layout
//!
//! ```text
//! "RawP" | magic | flags | sample descriptor | width | height | data size
//! payload (data size bytes, raw or Snappy)
//! crc-32 of the payload, present iff the checksum flag is set
//! ```
//!
//! Field-exact offsets are documented in [`RawpHeader`]. A compressed
//! payload's self-declared uncompressed length is checked against the
//! header geometry before any decompression runs, so a hostile container
//! cannot make the decoder produce more than `width x height x channels x
//! depth/8` bytes.
//!
//! ## Zero-copy decoding
//!
//! [`decode_pixels`] borrows stored-raw payloads straight from the input
//! where alignment allows; only compressed payloads allocate. With the
//! `rgb`/`imgref` features the output can be viewed as typed pixel slices
//! or 2D buffers without further copies.
//!
//! ## Usage
//!
//! ```
//! use rawp::{EncodeOptions, RawpEncoder, SampleType};
//!
//! let pixels = vec![127u8; 4 * 4 * 3];
//! let options = EncodeOptions { use_checksum: true, use_compression: true };
//! let encoder = RawpEncoder::init(&pixels, 4, 4, 3, 8, SampleType::Unsigned, options)?;
//! let mut out = vec![0u8; encoder.max_encoded_len()];
//! let total = encoder.encode(&mut out)?;
//!
//! let header = rawp::decode_header(&out[..total])?;
//! let mut decoded = vec![0u8; header.raw_size() as usize];
//! rawp::decode(&out[..total], &mut decoded)?;
//! assert_eq!(decoded, pixels);
//! # Ok::<(), rawp::RawpError>(())
//! ```

#![forbid(unsafe_code)]

mod decode;
mod encode;
mod error;
mod header;
mod pixel;
mod snappy;

pub use decode::{DecodeOutput, decode, decode_header, decode_pixels};
pub use encode::{EncodeOptions, RawpEncoder, encode_to_vec};
pub use error::RawpError;
pub use header::{RAWP_MAGIC, RAWP_SIG, RawpHeader};
pub use pixel::{PixelFormat, SampleType};

#[cfg(feature = "rgb")]
pub use pixel::RawpPixel;
