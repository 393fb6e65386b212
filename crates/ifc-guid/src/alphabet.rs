//! Format constants for both GUID encodings.
//!
//! The compact form packs 128 bits into 22 symbols: the first symbol carries
//! 2 bits, the remaining 21 carry 6 bits each.

/// The 64-symbol alphabet of the compact form, in index order.
pub const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz_$";

/// Number of symbols in a compact GUID.
pub const COMPACT_LEN: usize = 22;

/// Number of hex digits in a canonical GUID (dashes excluded).
pub const CANONICAL_HEX_LEN: usize = 32;

/// Length of a dashed canonical GUID.
pub const CANONICAL_LEN: usize = 36;

/// Bits carried by the first compact symbol.
pub const LEADING_BITS: u32 = 2;

/// Bits carried by every other compact symbol.
pub const SYMBOL_BITS: u32 = 6;

/// Largest alphabet index allowed at position 0.
pub const MAX_LEADING_INDEX: u8 = (1 << LEADING_BITS) - 1;

/// Marker for bytes outside the alphabet.
const INVALID: u8 = 0xFF;

const fn build_reverse_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

static REVERSE: [u8; 256] = build_reverse_table();

/// Returns the alphabet index of `byte`, or `None` if it is not a symbol.
#[inline]
pub fn symbol_index(byte: u8) -> Option<u8> {
    match REVERSE[byte as usize] {
        INVALID => None,
        index => Some(index),
    }
}

/// Returns the symbol for an alphabet index. Only the low 6 bits are used.
#[inline]
pub fn symbol(index: u8) -> u8 {
    ALPHABET[(index & 0x3F) as usize]
}
