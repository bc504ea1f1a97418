//! Arithmetic in GF(2^32) by the generator `alpha`.
//!
//! A 32-bit word is read as a polynomial of degree 3 in `alpha` whose
//! coefficients are the four bytes of the word, most significant byte first.
//! Multiplying or dividing by `alpha` is then a one-byte shift plus a table
//! lookup on the byte that falls off, so neither operation branches on the
//! value of `x`.

use crate::consts::{ALPHA_DIV_TABLE, ALPHA_MUL_TABLE};

/// Multiply `x` by `alpha`.
#[inline(always)]
#[must_use]
pub fn mul_alpha(x: u32) -> u32 {
    (x << 8) ^ ALPHA_MUL_TABLE[(x >> 24) as usize]
}

/// Divide `x` by `alpha`.
#[inline(always)]
#[must_use]
pub fn div_alpha(x: u32) -> u32 {
    (x >> 8) ^ ALPHA_DIV_TABLE[(x & 0xFF) as usize]
}
