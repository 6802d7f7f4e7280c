//! ## Leading zero count
//! Counts leading zero bits of a `u32`, returning 32 for zero input.
//!
//! Two interchangeable variants are provided:
//! - [`count_leading_zeros32`] compiles down to a single `lzcnt`/`clz` instruction
//!   on targets that have one.
//! - [`count_leading_zeros32_branchless`] is the portable arithmetic variant
//!   from Hacker's Delight (1st ed., figure 5-10).
//!
//! `Counter::add` calls one of them per inserted hash, selected by the `portable_clz` feature.

/// Return number of leading zero bits of `x` using the hardware instruction
#[inline]
pub fn count_leading_zeros32(x: u32) -> u32 {
    x.leading_zeros()
}

/// Return number of leading zero bits of `x` without branches or intrinsics.
///
/// Each step subtracts a threshold and picks the shift amount from the borrow
/// that lands in the upper half-word, so the whole computation is straight-line code.
#[inline]
pub fn count_leading_zeros32_branchless(mut x: u32) -> u32 {
    // Upper 16 bits zero -> n = 16, otherwise shift them down.
    let mut y = (x >> 16).wrapping_neg();
    let mut m = (y >> 16) & 16;
    let mut n = 16 - m;
    x >>= m;

    // x is now of the form 0000xxxx.
    y = x.wrapping_sub(0x100);
    m = (y >> 16) & 8;
    n += m;
    x <<= m;

    y = x.wrapping_sub(0x1000);
    m = (y >> 16) & 4;
    n += m;
    x <<= m;

    y = x.wrapping_sub(0x4000);
    m = (y >> 16) & 2;
    n += m;
    x <<= m;

    // y in [0, 3] maps to m in {0, 1, 2, 2}
    y = x >> 14;
    m = y & !(y >> 1);
    n + 2 - m
}
