//! End-to-end encoder tests against the worked scenarios.

extern crate utvideo;

use utvideo::encoder::{Encoder, EncoderConfig};
use utvideo::picture::{PixelFormat, Picture};

fn encode_rgb24(
    width: u32,
    height: u32,
    predictor: i32,
    mut buf: Vec<u8>,
) -> Vec<u8> {
    let mut encoder = Encoder::init(EncoderConfig {
        pixel_format: PixelFormat::Rgb24,
        width,
        height,
        prediction_method: predictor,
    })
    .unwrap();
    let stride = width as usize * 3;
    let mut picture = Picture {
        format: PixelFormat::Rgb24,
        width,
        height,
        planes: vec![&mut buf],
        strides: vec![stride],
    };
    encoder.encode_frame(&mut picture).unwrap()
}

#[test]
fn uniform_rgb24_frame_hits_single_symbol_fast_path() {
    // Scenario 1: a 4x4 RGB24 frame that is uniformly mid-grey in every
    // channel stays uniform after the R-G/B-G mangle, so LEFT
    // prediction (whose initial predictor is also 0x80) zeroes every
    // residual and all three planes take the single-symbol fast path.
    let mut buf = Vec::with_capacity(4 * 4 * 3);
    for _ in 0..16 {
        buf.extend_from_slice(&[0x80, 0x80, 0x80]);
    }
    let packet = encode_rgb24(4, 4, 0, buf);

    assert_eq!(packet.len(), 784);
    // Trailer is the last 4 bytes: LEFT's trailer code is 1, shifted
    // into the second byte.
    let trailer = u32::from_le_bytes(packet[780..784].try_into().unwrap());
    assert_eq!(trailer, 0x0000_0100);

    // Each plane's offset table entry is zero: no bit data emitted.
    for plane in 0..3 {
        let base = plane * 260;
        assert_eq!(&packet[base + 256..base + 260], &[0, 0, 0, 0]);
    }
}

#[test]
fn rgb_mangle_feeds_per_plane_single_symbol_fast_path() {
    // Scenario 3: RGB24 1x1 pixel (R=10, G=20, B=30), NONE predictor.
    let packet = encode_rgb24(1, 1, 4, vec![10, 20, 30]);
    assert_eq!(packet.len(), 3 * (256 + 4) + 4);
    for plane in 0..3 {
        let base = plane * 260;
        let lengths = &packet[base..base + 256];
        assert_eq!(lengths.iter().filter(|&&l| l == 0).count(), 1);
    }
}

#[test]
fn identical_input_produces_byte_identical_packets() {
    // Scenario 5: canonical-code determinism across independent
    // instances.
    let mut buf = Vec::with_capacity(8 * 8 * 3);
    for i in 0..(8 * 8) {
        buf.extend_from_slice(&[(i % 7) as u8, (i % 5) as u8, (i % 3) as u8]);
    }
    let a = encode_rgb24(8, 8, 2, buf.clone());
    let b = encode_rgb24(8, 8, 2, buf);
    assert_eq!(a, b);
}

#[test]
fn single_slice_offset_table_precedes_bit_region() {
    // Scenario 6: slice-count=1 offset table is 4 bytes per plane and
    // sits right before that plane's bit data.
    let mut buf = Vec::with_capacity(8 * 8 * 3);
    for i in 0..(8 * 8) {
        buf.extend_from_slice(&[(i % 11) as u8, (i % 13) as u8, (i % 17) as u8]);
    }
    let packet = encode_rgb24(8, 8, 2, buf);

    let mut cursor = 0usize;
    for _ in 0..3 {
        let lengths_start = cursor;
        cursor += 256;
        let offset =
            u32::from_le_bytes(packet[cursor..cursor + 4].try_into().unwrap());
        cursor += 4;
        assert_eq!(offset % 4, 0, "slice byte length must be word-aligned");
        // Any nonzero-length symbol confirms the Huffman path ran.
        assert!(packet[lengths_start..lengths_start + 256]
            .iter()
            .any(|&l| l != 0));
        cursor += offset as usize;
    }
    // 4 bytes of frame trailer remain.
    assert_eq!(packet.len() - cursor, 4);
}

#[test]
fn non_multiple_of_four_plane_does_not_panic_on_word_round_up() {
    // A 1x3 RGB24 plane (area = 3, not a multiple of 4) with three
    // distinct residuals per channel after NONE prediction: every
    // symbol in the 256-leaf tree ties at weight 1, producing
    // length-8 codes, so 3 residuals pack to 24 bits (3 bytes), which
    // rounds up to a 4-byte word past the plane's own area. This must
    // not panic or overflow the packet buffer.
    let buf = vec![
        10, 20, 30, // R'=118 G=20 B'=138 after mangle
        50, 10, 90, // R'=168 G=10 B'=208
        200, 5, 2, // R'=67  G=5  B'=125
    ];
    let packet = encode_rgb24(1, 3, 4, buf);
    assert_eq!(packet.len() % 4, 0);
}

#[test]
fn rejects_mismatched_picture_format() {
    let mut encoder = Encoder::init(EncoderConfig {
        pixel_format: PixelFormat::Rgb24,
        width: 2,
        height: 2,
        prediction_method: 0,
    })
    .unwrap();
    let mut buf = vec![0u8; 2 * 2 * 4];
    let mut picture = Picture {
        format: PixelFormat::Rgba,
        width: 2,
        height: 2,
        planes: vec![&mut buf],
        strides: vec![8],
    };
    assert!(encoder.encode_frame(&mut picture).is_err());
}
