//! Bitslice evaluation of the Serpent S-box S2.

/// Apply the Serpent S-box S2 to the 32 bit lanes of `input`.
///
/// Lane `j` is the nibble made of bit `j` of each input word, with
/// `input[0]` holding the least significant bit. Output word `k` holds bit
/// `k` of `S2[lane]` for every lane, where
/// `S2 = {8, 6, 7, 9, 3, 12, 10, 15, 13, 1, 14, 4, 0, 11, 5, 2}`.
///
/// Only logic gates are used, so all 32 lanes are computed at once and no
/// memory access depends on the input.
#[inline]
#[must_use]
pub fn bitslice_sbox(input: [u32; 4]) -> [u32; 4] {
    let [mut r0, mut r1, mut r2, mut r3] = input;

    let mut r4 = r0;
    r0 &= r2;
    r0 ^= r3;
    r2 ^= r1;
    r2 ^= r0;
    r3 |= r4;
    r3 ^= r1;
    r4 ^= r2;
    r1 = r3;
    r3 |= r4;
    r3 ^= r0;
    r0 &= r1;
    r4 ^= r0;
    r1 ^= r3;
    r1 ^= r4;
    r4 = !r4;

    [r2, r3, r1, r4]
}
