/// Sample value interpretation, one byte on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SampleType {
    /// Unsigned integer samples.
    Unsigned = 1,
    /// Signed integer samples.
    Signed = 2,
    /// IEEE-754 floating point samples (32- or 64-bit depths only).
    Float = 3,
}

impl SampleType {
    pub(crate) fn from_wire(value: u8) -> Option<SampleType> {
        match value {
            1 => Some(Self::Unsigned),
            2 => Some(Self::Signed),
            3 => Some(Self::Float),
            _ => None,
        }
    }
}

/// The standard channel/depth/type combinations.
///
/// A container is not restricted to these: any `channels > 0` with a valid
/// depth and sample type is encodable. `PixelFormat` names the combinations
/// image software commonly maps onto its own pixel types. Sample bytes are
/// native endian; names give bits per channel.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Single channel, 8-bit unsigned.
    Gray8,
    /// Single channel, 16-bit unsigned.
    Gray16,
    /// Single channel, 32-bit float.
    GrayF32,
    /// 3 channels, 8-bit unsigned.
    Rgb8,
    /// 3 channels, 16-bit unsigned.
    Rgb16,
    /// 3 channels, 32-bit float.
    RgbF32,
    /// 4 channels, 8-bit unsigned.
    Rgba8,
    /// 4 channels, 16-bit unsigned.
    Rgba16,
    /// 4 channels, 32-bit float.
    RgbaF32,
}

impl PixelFormat {
    /// Number of channels.
    pub fn channels(&self) -> u8 {
        match self {
            Self::Gray8 | Self::Gray16 | Self::GrayF32 => 1,
            Self::Rgb8 | Self::Rgb16 | Self::RgbF32 => 3,
            Self::Rgba8 | Self::Rgba16 | Self::RgbaF32 => 4,
        }
    }

    /// Bits per channel.
    pub fn bit_depth(&self) -> u8 {
        match self {
            Self::Gray8 | Self::Rgb8 | Self::Rgba8 => 8,
            Self::Gray16 | Self::Rgb16 | Self::Rgba16 => 16,
            Self::GrayF32 | Self::RgbF32 | Self::RgbaF32 => 32,
        }
    }

    /// Sample interpretation.
    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::GrayF32 | Self::RgbF32 | Self::RgbaF32 => SampleType::Float,
            _ => SampleType::Unsigned,
        }
    }

    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channels() as usize * self.bit_depth() as usize / 8
    }

    /// The standard format matching a raw descriptor triple, if any.
    pub fn from_parts(channels: u8, bit_depth: u8, sample_type: SampleType) -> Option<PixelFormat> {
        match (channels, bit_depth, sample_type) {
            (1, 8, SampleType::Unsigned) => Some(Self::Gray8),
            (1, 16, SampleType::Unsigned) => Some(Self::Gray16),
            (1, 32, SampleType::Float) => Some(Self::GrayF32),
            (3, 8, SampleType::Unsigned) => Some(Self::Rgb8),
            (3, 16, SampleType::Unsigned) => Some(Self::Rgb16),
            (3, 32, SampleType::Float) => Some(Self::RgbF32),
            (4, 8, SampleType::Unsigned) => Some(Self::Rgba8),
            (4, 16, SampleType::Unsigned) => Some(Self::Rgba16),
            (4, 32, SampleType::Float) => Some(Self::RgbaF32),
            _ => None,
        }
    }
}

/// Pixel types that map onto a RawP descriptor.
///
/// Implemented for the `rgb` crate's pixel types so decoded buffers can be
/// viewed as typed slices without copying. The `Pod` bound is what permits
/// reinterpreting raw bytes as `Self`.
#[cfg(feature = "rgb")]
pub trait RawpPixel: bytemuck::Pod {
    /// The container descriptor this pixel type matches.
    fn format() -> PixelFormat;
}

#[cfg(feature = "rgb")]
macro_rules! impl_rawp_pixel {
    ($($ty:ty => $fmt:ident,)*) => {
        $(impl RawpPixel for $ty {
            fn format() -> PixelFormat {
                PixelFormat::$fmt
            }
        })*
    };
}

#[cfg(feature = "rgb")]
impl_rawp_pixel! {
    rgb::alt::Gray<u8> => Gray8,
    rgb::alt::Gray<u16> => Gray16,
    rgb::alt::Gray<f32> => GrayF32,
    rgb::RGB<u8> => Rgb8,
    rgb::RGB<u16> => Rgb16,
    rgb::RGB<f32> => RgbF32,
    rgb::RGBA<u8> => Rgba8,
    rgb::RGBA<u16> => Rgba16,
    rgb::RGBA<f32> => RgbaF32,
}
