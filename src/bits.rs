//! Bit-level primitives shared by the sub-hash and geohash layers.
//!
//! A geohash stores two 32-bit sub-hashes interleaved into one 64-bit word:
//! the latitude sub-hash on the odd bits and the longitude sub-hash on the
//! even bits. [`spread`] and [`compact`] move a sub-hash in and out of that
//! layout; the remaining helpers locate the sentinel bit that encodes a
//! sub-hash's precision.

/// Mask of every even bit in a 64-bit word (the longitude lane).
pub const EVEN_BITS: u64 = 0x5555_5555_5555_5555;

/// Mask of every odd bit in a 64-bit word (the latitude lane).
pub const ODD_BITS: u64 = 0xaaaa_aaaa_aaaa_aaaa;

/// Inserts a zero above every bit of `x`, placing bit `i` of the input at
/// bit `2 * i` of the output.
///
/// ```
/// use spatio_geohash::bits::spread;
///
/// assert_eq!(spread(0b1011), 0b100_0101);
/// ```
pub const fn spread(x: u32) -> u64 {
    // https://graphics.stanford.edu/~seander/bithacks.html#InterleaveBMN
    let mut x = x as u64;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & EVEN_BITS;
    x
}

/// Inverse of [`spread`]: gathers the even bits of `x` into a contiguous
/// 32-bit value. Odd bits are ignored.
pub const fn compact(x: u64) -> u32 {
    let mut x = x & EVEN_BITS;
    x = (x ^ (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x ^ (x >> 2)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x ^ (x >> 4)) & 0x00ff_00ff_00ff_00ff;
    x = (x ^ (x >> 8)) & 0x0000_ffff_0000_ffff;
    x = (x ^ (x >> 16)) & 0x0000_0000_ffff_ffff;
    x as u32
}

/// Sets every bit at or below the highest set bit of `x`.
///
/// For a sub-hash this is the largest sub-hash of the same precision.
/// Zero maps to zero.
pub const fn fill_below_highest_set_bit(x: u32) -> u32 {
    if x == 0 { 0 } else { u32::MAX >> x.leading_zeros() }
}

/// Keeps only the highest set bit of `x` (the sentinel of a sub-hash).
/// Zero maps to zero.
pub const fn highest_set_bit(x: u32) -> u32 {
    let filled = fill_below_highest_set_bit(x);
    filled - (filled >> 1)
}

/// Number of leading zeros in the 32-bit value `x`, 32 when no bit is set.
///
/// A sub-hash of precision `p` has its sentinel at bit `p`, so this returns
/// `31 - p`; shifting `1 << 31` right by the result yields the number of
/// cells along the axis.
pub const fn inverse_precision(x: u32) -> u32 {
    x.leading_zeros()
}
