//! Component H: frame encoder. Pre-processes pixel layouts, iterates
//! planes through the plane encoder, and emits the frame trailer and
//! extradata header. See `spec.md` 4.H and the "Initialization
//! contract".
//!
//! Grounded in `utvideoenc.c`'s `utvideo_encode_init`/
//! `utvideo_encode_frame`/`mangle_rgb_planes`.

use crate::bytesink::ByteSink;
use crate::constants::{
    COMP_HUFF, EXTRADATA_SIZE, FRAME_INFO_SIZE, SLICES, SLICE_BUFFER_PADDING,
    VERSION_TAG,
};
use crate::error::{Error, Result};
use crate::picture::{PixelFormat, Picture};
use crate::plane::encode_plane;
use crate::pred::PredictionMethod;
use crate::tables::RGB_ORDER;

/// Configuration supplied to `Encoder::init`. Mirrors the `config`
/// argument of `init` in 6. EXTERNAL INTERFACES.
pub struct EncoderConfig {
    pub pixel_format: PixelFormat,
    pub width: u32,
    pub height: u32,
    /// The caller-facing prediction-method selector, in [0, 4]. See
    /// `PredictionMethod::from_selector`.
    pub prediction_method: i32,
}

/// A Ut Video encoder instance. Owns the scratch buffers and
/// per-frame state described in 3. DATA MODEL ("Lifecycles") and
/// 5. CONCURRENCY & RESOURCE MODEL. Not `Sync`/`Send`-shared across
/// threads by design: each instance is for one caller's exclusive use.
pub struct Encoder {
    pixel_format: PixelFormat,
    width: u32,
    height: u32,
    frame_pred: PredictionMethod,
    extradata: [u8; EXTRADATA_SIZE],
    /// Residual/working buffer, `width * height` bytes, reused across
    /// frames.
    residual_scratch: Vec<u8>,
    /// Slice-bits buffer, grown on demand to at least `width * height
    /// + SLICE_BUFFER_PADDING` bytes (the padding absorbs the
    /// round-up-to-a-word a slice's packed length takes before
    /// byte-reversal).
    slice_bits_scratch: Vec<u8>,
}

impl Encoder {
    /// Validates `config` and builds an encoder instance, including
    /// the 16-byte extradata header (see the spec's "Initialization
    /// contract").
    pub fn init(config: EncoderConfig) -> Result<Self> {
        config
            .pixel_format
            .validate_dimensions(config.width, config.height)?;

        let frame_pred =
            PredictionMethod::from_selector(config.prediction_method)
                .map_err(|e| {
                    log::warn!("rejecting encoder config: {}", e);
                    e
                })?;

        let plane_area = config.width as usize * config.height as usize;

        let mut extradata = [0u8; EXTRADATA_SIZE];
        extradata[0..4].copy_from_slice(&VERSION_TAG);
        extradata[4..8]
            .copy_from_slice(&config.pixel_format.original_format().to_le_bytes());
        extradata[8..12].copy_from_slice(&FRAME_INFO_SIZE.to_le_bytes());
        let flags = ((SLICES - 1) << 24) | (0 << 11) | COMP_HUFF;
        extradata[12..16].copy_from_slice(&flags.to_le_bytes());

        log::debug!(
            "utvideo encoder initialized: format={:?} {}x{} predictor={:?}",
            config.pixel_format,
            config.width,
            config.height,
            frame_pred
        );

        Ok(Self {
            pixel_format: config.pixel_format,
            width: config.width,
            height: config.height,
            frame_pred,
            extradata,
            residual_scratch: vec![0u8; plane_area],
            slice_bits_scratch: vec![0u8; plane_area + SLICE_BUFFER_PADDING],
        })
    }

    /// The 16-byte extradata header produced at init time.
    pub fn extradata(&self) -> [u8; EXTRADATA_SIZE] {
        self.extradata
    }

    /// Encodes one frame, returning a self-contained compressed
    /// packet (6. EXTERNAL INTERFACES, "Wire format emitted").
    pub fn encode_frame(&mut self, picture: &mut Picture) -> Result<Vec<u8>> {
        if picture.format != self.pixel_format
            || picture.width != self.width
            || picture.height != self.height
        {
            return Err(Error::InvalidData(
                "picture does not match the encoder's configured layout"
                    .to_owned(),
            ));
        }
        picture.validate()?;

        let plane_area = self.width as usize * self.height as usize;
        if self.slice_bits_scratch.len() < plane_area + SLICE_BUFFER_PADDING {
            self.slice_bits_scratch
                .resize(plane_area + SLICE_BUFFER_PADDING, 0);
        }

        let planes = self.pixel_format.plane_count();
        let capacity = (256 + 4 * SLICES as usize + plane_area + SLICE_BUFFER_PADDING)
            * planes
            + 4;
        let mut packet = vec![0u8; capacity];

        {
            let mut sink = ByteSink::new(&mut packet);

            if self.pixel_format.is_packed_rgb() {
                let stride = picture.strides[0];
                mangle_rgb_planes(
                    &mut picture.planes[0][..],
                    planes,
                    stride,
                    self.width as usize,
                    self.height as usize,
                );
                for &offset in RGB_ORDER[..planes].iter() {
                    log::trace!("encoding packed plane at offset {}", offset);
                    encode_plane(
                        self.frame_pred,
                        &picture.planes[0][offset..],
                        planes,
                        stride,
                        self.width as usize,
                        self.height as usize,
                        &mut self.residual_scratch,
                        &mut self.slice_bits_scratch,
                        &mut sink,
                    )?;
                }
            } else {
                let (chroma_w, chroma_h) = self
                    .pixel_format
                    .chroma_dimensions(self.width as usize, self.height as usize);
                let dims = [
                    (self.width as usize, self.height as usize),
                    (chroma_w, chroma_h),
                    (chroma_w, chroma_h),
                ];
                for (i, &(w, h)) in dims.iter().enumerate() {
                    log::trace!("encoding planar plane {}", i);
                    encode_plane(
                        self.frame_pred,
                        &picture.planes[i][..],
                        1,
                        picture.strides[i],
                        w,
                        h,
                        &mut self.residual_scratch,
                        &mut self.slice_bits_scratch,
                        &mut sink,
                    )?;
                }
            }

            let frame_info = self.frame_pred.trailer_code() << 8;
            sink.put_le32(frame_info)?;

            let len = sink.tell();
            packet.truncate(len);
        }

        Ok(packet)
    }
}

/// Lossless R/B decorrelation applied to packed RGB/RGBA before
/// prediction: `R' = R - G + 0x80`, `B' = B - G + 0x80`, G (and A)
/// unchanged. See `spec.md` 4.H step 2 and GLOSSARY "Mangle".
fn mangle_rgb_planes(
    buf: &mut [u8],
    step: usize,
    stride: usize,
    width: usize,
    height: usize,
) {
    for row in 0..height {
        let row_base = row * stride;
        for col in 0..width {
            let px = row_base + col * step;
            let g = buf[px + 1];
            buf[px] = buf[px].wrapping_sub(g).wrapping_add(0x80);
            buf[px + 2] = buf[px + 2].wrapping_sub(g).wrapping_add(0x80);
        }
    }
}
