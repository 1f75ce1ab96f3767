//! Snappy block-format glue over the `snap` crate.
//!
//! The decoder relies on the block format's length preamble: a stream's
//! uncompressed size can be read without decompressing anything, which is
//! what lets size validation run before any output is produced.

use crate::error::RawpError;

/// Worst-case stored length for compressing `n` raw bytes.
///
/// Zero means `n` is beyond the Snappy block limit and cannot be compressed.
pub(crate) fn max_compressed_len(n: usize) -> usize {
    snap::raw::max_compress_len(n)
}

/// Compress `src` into the front of `dst`, returning the stored length.
///
/// `dst` must hold at least [`max_compressed_len`]`(src.len())` bytes.
pub(crate) fn compress_into(src: &[u8], dst: &mut [u8]) -> Result<usize, RawpError> {
    snap::raw::Encoder::new().compress(src, dst).map_err(|e| match e {
        snap::Error::BufferTooSmall { given, min } => RawpError::BufferTooSmall {
            needed: min,
            actual: given as usize,
        },
        _ => RawpError::InvalidField("pixel data exceeds the snappy block limit"),
    })
}

/// The uncompressed length a Snappy stream declares in its preamble.
pub(crate) fn uncompressed_len(stream: &[u8]) -> Result<u64, RawpError> {
    // snap reports 0 for an empty slice, but a stream with no preamble
    // is corrupt, not a declaration of emptiness
    if stream.is_empty() {
        return Err(RawpError::CorruptCompressedStream);
    }
    match snap::raw::decompress_len(stream) {
        Ok(n) => Ok(n as u64),
        Err(_) => Err(RawpError::CorruptCompressedStream),
    }
}

/// Decompress `stream` into the front of `dst`, returning the bytes produced.
///
/// `dst` must hold at least [`uncompressed_len`]`(stream)` bytes.
pub(crate) fn uncompress_into(stream: &[u8], dst: &mut [u8]) -> Result<usize, RawpError> {
    snap::raw::Decoder::new().decompress(stream, dst).map_err(|e| match e {
        snap::Error::BufferTooSmall { given, min } => RawpError::BufferTooSmall {
            needed: min,
            actual: given as usize,
        },
        _ => RawpError::CorruptCompressedStream,
    })
}
