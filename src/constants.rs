// Internal constants.

/// Bytes of extradata emitted at `init` time.
pub(crate) const EXTRADATA_SIZE: usize = 16;

/// `frame_info_size` field written into extradata; Ut Video's frame
/// trailer is always 4 bytes (the prediction-method word).
pub(crate) const FRAME_INFO_SIZE: u32 = 4;

/// The version/impl-id word written at extradata offset 0, as wire
/// bytes. `utvideoenc.c` writes this with `AV_WB32(extradata,
/// MKTAG(1, 0, 0, 0xF0))`: `MKTAG` packs its arguments into a 32-bit
/// value with the first argument in the lowest byte, and `AV_WB32`
/// then stores that value big-endian, so `0xF0` (the implementation
/// id a decoder reads back from `extradata[0]`) ends up first on the
/// wire.
pub(crate) const VERSION_TAG: [u8; 4] = [0xF0, 0, 0, 1];

/// Compression mode code for Huffman coding (the only mode this
/// encoder ever writes).
pub(crate) const COMP_HUFF: u32 = 1;

/// Fixed slice count. The wire format permits more; this encoder
/// only ever emits one.
pub(crate) const SLICES: u32 = 1;

/// Marker byte for "symbol unused" in the single-symbol fast path.
pub(crate) const UNUSED_SYMBOL_MARKER: u8 = 0xFF;

/// Slack reserved past `width * height` when sizing the slice-bits
/// scratch buffer and the packet capacity, mirroring
/// `FF_INPUT_BUFFER_PADDING_SIZE` in `utvideoenc.c`'s
/// `c->slice_buffer`/`c->slice_bits` allocations. Needed because a
/// slice's packed bit length is rounded up to a multiple of 4 before
/// the word byte-reversal; without this slack, a near-incompressible
/// plane whose `width * height` isn't itself a multiple of 4 can round
/// past the end of a buffer sized to exactly `width * height`.
pub(crate) const SLICE_BUFFER_PADDING: usize = 64;
