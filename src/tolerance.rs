//! Decoding of the factory-programmed R_AB tolerance.
//!
//! Each RDAC has two read-only bytes. The integer byte holds a sign bit
//! (bit 7) and a 7-bit integer magnitude; the fraction byte is a binary
//! fraction where bit 7 weighs 1/2, bit 6 weighs 1/4, and so on. The sign
//! applies to the combined magnitude.

const SIGN_MASK: u8 = 0x80;

/// Convert the raw tolerance bytes to a signed percentage.
pub fn decode_tolerance(integer: u8, fraction: u8) -> f32 {
    let mut magnitude = f32::from(integer & !SIGN_MASK);

    for bit in 0..8 {
        if fraction & (SIGN_MASK >> bit) != 0 {
            magnitude += 1.0 / f32::from(2u16 << bit);
        }
    }

    if integer & SIGN_MASK != 0 {
        -magnitude
    } else {
        magnitude
    }
}
