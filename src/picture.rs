//! Pixel layouts and the plane-addressing data model. See
//! `spec.md` 3. DATA MODEL.

use crate::error::{Error, Result};

/// One of the four pixel layouts this encoder accepts.
///
/// See: 3. DATA MODEL, 6. EXTERNAL INTERFACES ("Pixel layouts and
/// codec tags").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 24-bit RGB.
    Rgb24,
    /// Packed 32-bit RGBA.
    Rgba,
    /// Planar 8-bit Y/Cb/Cr, 4:2:0 subsampling. Width and height must
    /// both be even.
    Yuv420p,
    /// Planar 8-bit Y/Cb/Cr, 4:2:2 subsampling. Width must be even.
    Yuv422p,
}

impl PixelFormat {
    /// Number of planes emitted for this layout (3 for RGB/YUV, 4 for
    /// RGBA).
    pub(crate) fn plane_count(self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            _ => 3,
        }
    }

    /// Whether this layout is packed RGB/RGBA (as opposed to planar
    /// YUV).
    pub(crate) fn is_packed_rgb(self) -> bool {
        matches!(self, PixelFormat::Rgb24 | PixelFormat::Rgba)
    }

    /// The four-character codec tag identifying the stream to
    /// downstream muxers. See 6. EXTERNAL INTERFACES.
    pub fn codec_tag(self) -> [u8; 4] {
        match self {
            PixelFormat::Rgb24 => *b"ULRG",
            PixelFormat::Rgba => *b"ULRA",
            PixelFormat::Yuv420p => *b"ULY0",
            PixelFormat::Yuv422p => *b"ULY2",
        }
    }

    /// The `original_format` code written into extradata at init
    /// time. Values follow `utvideoenc.c`'s `UTVIDEO_RGB` /
    /// `UTVIDEO_RGBA` / `UTVIDEO_420` / `UTVIDEO_422` constants.
    pub(crate) fn original_format(self) -> u32 {
        match self {
            PixelFormat::Rgb24 => 0x00000000,
            PixelFormat::Rgba => 0x01000000,
            PixelFormat::Yuv420p => 0x00000100,
            PixelFormat::Yuv422p => 0x00000200,
        }
    }

    /// Validates width/height against this layout's subsampling
    /// constraints (3. DATA MODEL).
    pub(crate) fn validate_dimensions(
        self,
        width: u32,
        height: u32,
    ) -> Result<()> {
        match self {
            PixelFormat::Yuv420p if width % 2 != 0 || height % 2 != 0 => {
                Err(Error::InvalidData(
                    "4:2:0 video requires even width and height".to_owned(),
                ))
            }
            PixelFormat::Yuv422p if width % 2 != 0 => Err(Error::InvalidData(
                "4:2:2 video requires even width".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    /// Chroma plane dimensions for planar layouts, given the luma
    /// width/height.
    pub(crate) fn chroma_dimensions(
        self,
        width: usize,
        height: usize,
    ) -> (usize, usize) {
        match self {
            PixelFormat::Yuv420p => (width / 2, height / 2),
            PixelFormat::Yuv422p => (width / 2, height),
            _ => (width, height),
        }
    }
}

/// A picture to encode, addressed the way 3. DATA MODEL describes:
/// "Planes are addressable by a base pointer, a per-row stride, and a
/// per-sample step".
///
/// For packed RGB/RGBA layouts, `planes` holds exactly one buffer (the
/// whole interleaved image); the encoder mangles it in place and then
/// reads G/B/R(/A) out of it at a step of `plane_count()`. For planar
/// YUV layouts, `planes` holds one buffer per plane in Y, U, V order,
/// each read at a step of 1.
pub struct Picture<'a> {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// Plane base buffers, mutable so packed RGB/RGBA can be mangled
    /// in place before prediction (4.H step 2).
    pub planes: Vec<&'a mut [u8]>,
    /// Byte stride of each entry in `planes`, same length and order.
    pub strides: Vec<usize>,
}

impl<'a> Picture<'a> {
    pub(crate) fn validate(&self) -> Result<()> {
        self.format.validate_dimensions(self.width, self.height)?;
        let expected = if self.format.is_packed_rgb() { 1 } else { 3 };
        if self.planes.len() != expected || self.strides.len() != expected {
            return Err(Error::InvalidData(format!(
                "expected {} plane buffer(s) for {:?}, got {}",
                expected,
                self.format,
                self.planes.len()
            )));
        }
        Ok(())
    }
}
