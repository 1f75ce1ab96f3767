use crate::pixel::PixelFormat;

/// Errors from RawP decoding and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RawpError {
    #[error("input ends early: need {needed} bytes, got {actual}")]
    Truncated { needed: u64, actual: usize },

    #[error("bad signature: expected \"RawP\", found {found:?}")]
    BadSignature { found: [u8; 4] },

    #[error("bad magic: expected 0x1BF2380A, found {found:#010X}")]
    BadMagic { found: u32 },

    #[error("invalid header field: {0}")]
    InvalidField(&'static str),

    #[error("payload size mismatch: declared {declared} bytes, geometry requires {expected}")]
    SizeMismatch { declared: u64, expected: u64 },

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },

    #[error("corrupt compressed stream")]
    CorruptCompressedStream,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: u64, actual: usize },

    #[error("pixel format mismatch: container does not hold {requested:?} pixels")]
    FormatMismatch { requested: PixelFormat },
}
