//! The 22-character compact form (IFC GUID).
//!
//! Symbols are consumed most-significant first. The first symbol contributes
//! the top 2 bits of the value, each following symbol the next 6 bits.

use crate::alphabet::{
    symbol, symbol_index, COMPACT_LEN, LEADING_BITS, MAX_LEADING_INDEX, SYMBOL_BITS,
};
use crate::error::{GuidError, GuidForm};

const SYMBOL_MASK: u128 = (1 << SYMBOL_BITS) - 1;

/// Decodes a compact GUID into its 128-bit value.
///
/// Fails on a length other than 22 characters, on any character outside the
/// alphabet, and on a first symbol whose index does not fit in 2 bits.
pub fn decode_compact(compact: &str) -> Result<u128, GuidError> {
    let actual = compact.chars().count();
    if actual != COMPACT_LEN {
        return Err(GuidError::InvalidLength {
            form: GuidForm::Compact,
            expected: COMPACT_LEN,
            actual,
        });
    }

    let mut value: u128 = 0;
    for (position, ch) in compact.chars().enumerate() {
        let index = u8::try_from(ch)
            .ok()
            .and_then(symbol_index)
            .ok_or(GuidError::InvalidCharacter {
                form: GuidForm::Compact,
                position,
                found: ch,
            })?;

        if position == 0 {
            if index > MAX_LEADING_INDEX {
                return Err(GuidError::InvalidLeadingSymbol { found: ch, index });
            }
            value = u128::from(index);
        } else {
            value = (value << SYMBOL_BITS) | u128::from(index);
        }
    }

    Ok(value)
}

/// Encodes a 128-bit value as a compact GUID.
pub fn encode_compact(value: u128) -> String {
    let mut out = String::with_capacity(COMPACT_LEN);

    let leading = (value >> (u128::BITS - LEADING_BITS)) as u8;
    out.push(symbol(leading) as char);

    for group in (0..COMPACT_LEN as u32 - 1).rev() {
        let index = ((value >> (group * SYMBOL_BITS)) & SYMBOL_MASK) as u8;
        out.push(symbol(index) as char);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_decode_zero_and_max() {
        assert_eq!(decode_compact("0000000000000000000000").unwrap(), 0);
        assert_eq!(
            decode_compact("3$$$$$$$$$$$$$$$$$$$$$").unwrap(),
            u128::MAX
        );
    }

    #[test]
    fn test_leading_symbol_occupies_top_bits() {
        assert_eq!(decode_compact("1000000000000000000000").unwrap(), 1u128 << 126);
        assert_eq!(decode_compact("2000000000000000000000").unwrap(), 2u128 << 126);
        assert_eq!(decode_compact("3000000000000000000000").unwrap(), 3u128 << 126);
    }

    #[test]
    fn test_trailing_symbols() {
        assert_eq!(decode_compact("0000000000000000000001").unwrap(), 1);
        // '_' = 62 = 0b111110, '$' = 63 = 0b111111
        assert_eq!(decode_compact("00000000000000000000_$").unwrap(), 0xfbf);
    }

    #[test]
    fn test_encode_matches_decode() {
        assert_eq!(encode_compact(0), "0000000000000000000000");
        assert_eq!(encode_compact(u128::MAX), "3$$$$$$$$$$$$$$$$$$$$$");
        assert_eq!(encode_compact(0xfbf), "00000000000000000000_$");
        assert_eq!(encode_compact(2u128 << 126), "2000000000000000000000");
    }

    #[test]
    fn test_leading_symbol_overflow_rejected() {
        let err = decode_compact("4000000000000000000000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLeadingSymbol);
        assert_eq!(
            err,
            GuidError::InvalidLeadingSymbol {
                found: '4',
                index: 4
            }
        );

        let err = decode_compact("$000000000000000000000").unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidLeadingSymbol {
                found: '$',
                index: 63
            }
        );
    }

    #[test]
    fn test_unknown_leading_character_is_invalid_character() {
        let err = decode_compact("@000000000000000000000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
    }

    #[test]
    fn test_invalid_length() {
        for input in ["", "000000000000000000000", "00000000000000000000000"] {
            let err = decode_compact(input).unwrap_err();
            assert_eq!(
                err,
                GuidError::InvalidLength {
                    form: GuidForm::Compact,
                    expected: 22,
                    actual: input.len(),
                }
            );
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // 21 ASCII symbols plus one two-byte character: 22 chars, 23 bytes.
        let input = "000000000000000000000é";
        let err = decode_compact(input).unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidCharacter {
                form: GuidForm::Compact,
                position: 21,
                found: 'é',
            }
        );
    }

    #[test]
    fn test_invalid_character_position() {
        let err = decode_compact("0000000000-00000000000").unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidCharacter {
                form: GuidForm::Compact,
                position: 10,
                found: '-',
            }
        );
    }

    #[test]
    fn test_case_sensitive() {
        let a = decode_compact("000000000000000000000A").unwrap();
        let b = decode_compact("000000000000000000000a").unwrap();
        assert_eq!(a, 10);
        assert_eq!(b, 36);
    }
}
