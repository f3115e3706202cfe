//! Read-only global tables. See 9. DESIGN NOTES: "Global tables" in
//! `spec.md` — these are compile-time constants, never mutated.

/// Byte offsets of G, B, R (and A) within one packed RGB/RGBA pixel,
/// in emission order. Grounded in `ff_ut_rgb_order` from
/// `utvideoenc.c`: `{1, 2, 0, 3}`.
pub(crate) const RGB_ORDER: [usize; 4] = [1, 2, 0, 3];
