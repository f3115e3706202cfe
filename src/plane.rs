//! Component G: plane encoder. Composes predict → histogram → code
//! lengths → canonical codes → bit-pack, and emits a plane's header
//! and slice table through the byte-sink. See `spec.md` 4.G.
//!
//! Grounded in `utvideoenc.c`'s `encode_plane`/`write_huff_codes`; the
//! seek-interleave dance follows the original exactly (9. DESIGN
//! NOTES: "Byte-sink seek interleave").

use crate::bitpacker::BitPacker;
use crate::bytesink::ByteSink;
use crate::constants::{SLICES, UNUSED_SYMBOL_MARKER};
use crate::error::Result;
use crate::histogram;
use crate::huffman::{canonical_codes, code_lengths};
use crate::pred::{predict, PredictionMethod};

/// Encodes one plane: predicts `src` into `residual_scratch`, builds
/// (or fast-paths) its Huffman table, and writes the plane's 256
/// length bytes, slice offset table, and slice bit data into `sink`.
///
/// `residual_scratch` and `slice_bits_scratch` are caller-owned,
/// reused across planes and frames (5. CONCURRENCY & RESOURCE MODEL).
/// `residual_scratch` must be at least `width * height` bytes;
/// `slice_bits_scratch` must be at least `width * height +
/// SLICE_BUFFER_PADDING` bytes, since a slice's packed bit length is
/// rounded up to a multiple of 4 before the word byte-reversal.
#[allow(clippy::too_many_arguments)]
pub(crate) fn encode_plane(
    method: PredictionMethod,
    src: &[u8],
    step: usize,
    stride: usize,
    width: usize,
    height: usize,
    residual_scratch: &mut [u8],
    slice_bits_scratch: &mut [u8],
    sink: &mut ByteSink,
) -> Result<()> {
    let plane_len = width * height;
    let residual = &mut residual_scratch[..plane_len];
    predict(method, src, residual, step, stride, width, height);

    let counts = histogram::count(residual);

    if let Some(symbol) = histogram::single_symbol(&counts, plane_len as u32) {
        for i in 0..256u32 {
            sink.put_u8(if i as u8 == symbol {
                0
            } else {
                UNUSED_SYMBOL_MARKER
            })?;
        }
        for _ in 0..SLICES {
            sink.put_le32(0)?;
        }
        return Ok(());
    }

    let lengths = code_lengths(&counts);
    let table = canonical_codes(&lengths);

    for &len in lengths.iter() {
        sink.put_u8(len)?;
    }

    // With SLICES == 1 the interleave collapses to one offset word
    // followed by one bit payload (4.G). The seek dance below follows
    // `utvideoenc.c`'s `encode_plane` exactly: each iteration writes
    // its offset word, seeks past the remaining offset slots and the
    // bit data of earlier slices to reach its own slice's data
    // position, writes the bytes, then seeks back to the offset-table
    // cursor for the next iteration.
    let mut send = 0usize;
    let mut prev_cumulative = 0u32;
    for slice_idx in 0..SLICES as usize {
        let sstart = send;
        send = height * (slice_idx + 1) / SLICES as usize;
        let rows = send - sstart;
        let slice_residuals = &residual[sstart * width..send * width];
        let scratch_len = width * rows;
        // The packed length is rounded up to a word below; clear that
        // worst case up front so the round-up never exposes stale
        // bytes from a previous slice or plane (the caller sizes
        // `slice_bits_scratch` with `SLICE_BUFFER_PADDING` slack for
        // exactly this).
        let zero_len = (scratch_len + 3) / 4 * 4;

        for b in slice_bits_scratch[..zero_len].iter_mut() {
            *b = 0;
        }
        let mut packer =
            BitPacker::new(&mut slice_bits_scratch[..scratch_len], scratch_len);
        for &r in slice_residuals {
            let entry = table[r as usize];
            packer.append(entry.len as u32, entry.code);
        }
        let bit_count = packer.flush();
        let byte_len = (bit_count + 7) / 8;
        let padded_len = (byte_len + 3) / 4 * 4;

        byte_reverse_words(&mut slice_bits_scratch[..padded_len]);

        let cumulative = prev_cumulative + padded_len as u32;
        sink.put_le32(cumulative)?;

        let remaining_offset_slots = (SLICES as usize - slice_idx - 1) as isize;
        sink.seek_relative(4 * remaining_offset_slots + prev_cumulative as isize)?;
        sink.put_bytes(&slice_bits_scratch[..padded_len])?;
        sink.seek_relative(-4 * remaining_offset_slots - cumulative as isize)?;

        prev_cumulative = cumulative;
    }

    sink.seek_relative(prev_cumulative as isize)?;

    Ok(())
}

/// Byte-reverses each complete 32-bit word of `buf` in place, turning
/// the MSB-first packed bitstream into its canonical little-endian-of-
/// MSB-first wire form (4.G step 6c, 9. DESIGN NOTES "Endian of the
/// bitstream"). `buf.len()` must be a multiple of 4.
fn byte_reverse_words(buf: &mut [u8]) {
    debug_assert_eq!(buf.len() % 4, 0);
    for word in buf.chunks_exact_mut(4) {
        word.swap(0, 3);
        word.swap(1, 2);
    }
}
