//! Conversion between the two textual encodings of a 128-bit GUID.
//!
//! Both directions go through the plain `u128` value, so the pair of
//! operations below are exact inverses on valid input.

pub mod canonical;
pub mod compact;

pub use canonical::{format_canonical, parse_canonical, FormatOptions, HexCase};
pub use compact::{decode_compact, encode_compact};

use crate::error::GuidError;

/// Converts a 22-character IFC GUID into lowercase dashed UUID text.
///
/// ```
/// use ifc_guid::compact_to_canonical;
///
/// let canonical = compact_to_canonical("0YvctVUKr0kugbFTf53O9L").unwrap();
/// assert_eq!(canonical, "22e66ddf-794d-40bb-8aa5-3dda450d8255");
/// ```
pub fn compact_to_canonical(compact: &str) -> Result<String, GuidError> {
    let value = decode_compact(compact)?;
    Ok(format_canonical(value, FormatOptions::default()))
}

/// Converts UUID text (dashes optional, either case) into a 22-character IFC GUID.
///
/// ```
/// use ifc_guid::canonical_to_compact;
///
/// let compact = canonical_to_compact("22E66DDF794D40BB8AA53DDA450D8255").unwrap();
/// assert_eq!(compact, "0YvctVUKr0kugbFTf53O9L");
/// ```
pub fn canonical_to_compact(canonical: &str) -> Result<String, GuidError> {
    let value = parse_canonical(canonical)?;
    Ok(encode_compact(value))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::error::{ErrorKind, GuidForm};

    /// (compact, canonical) pairs, each checked bit-by-bit by hand.
    const VECTORS: &[(&str, &str)] = &[
        ("0000000000000000000000", "00000000-0000-0000-0000-000000000000"),
        ("3$$$$$$$$$$$$$$$$$$$$$", "ffffffff-ffff-ffff-ffff-ffffffffffff"),
        ("0YvctVUKr0kugbFTf53O9L", "22e66ddf-794d-40bb-8aa5-3dda450d8255"),
        ("1aB2cD3eF4gH5iJ6kL7mN8", "642c298d-0e83-c4a9-116c-4c6b951f05c8"),
        ("2XiiFKvVQXiiFKvVQXiiFK", "a1b2c3d4-e5f6-a1b2-c3d4-e5f6a1b2c3d4"),
        ("1L3eG0ufj1rASMH6PLH000", "550e8400-e29b-41d4-a716-446655440000"),
        ("00000000000000000000_$", "00000000-0000-0000-0000-000000000fbf"),
        ("2000000000000000000000", "80000000-0000-0000-0000-000000000000"),
    ];

    #[test]
    fn test_vectors_compact_to_canonical() {
        for (compact, canonical) in VECTORS {
            assert_eq!(
                compact_to_canonical(compact).unwrap(),
                *canonical,
                "failed for {}",
                compact
            );
        }
    }

    #[test]
    fn test_vectors_canonical_to_compact() {
        for (compact, canonical) in VECTORS {
            assert_eq!(
                canonical_to_compact(canonical).unwrap(),
                *compact,
                "failed for {}",
                canonical
            );
        }
    }

    #[test]
    fn test_mixed_alphabet_vector_bits() {
        // '1' -> 01, 'a' -> 100100, 'B' -> 001011, '2' -> 000010,
        // 'c' -> 100110, 'D' -> 001101: 01100100 00101100 00101001 1000 1101...
        let canonical = compact_to_canonical("1aB2cD3eF4gH5iJ6kL7mN8").unwrap();
        assert!(canonical.starts_with("642c298d"));
    }

    #[test]
    fn test_zero_fixed_point() {
        let zero = "0".repeat(22);
        let canonical = compact_to_canonical(&zero).unwrap();
        assert_eq!(canonical, "00000000-0000-0000-0000-000000000000");
        assert_eq!(canonical_to_compact(&canonical).unwrap(), zero);
    }

    #[test]
    fn test_leading_symbol_boundary() {
        for leading in ['0', '1', '2', '3'] {
            let input = format!("{leading}{}", "0".repeat(21));
            assert!(compact_to_canonical(&input).is_ok(), "rejected {}", input);
        }
        let err = compact_to_canonical(&format!("4{}", "0".repeat(21))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLeadingSymbol);
    }

    #[test]
    fn test_length_validation() {
        for len in [21, 23] {
            let err = compact_to_canonical(&"0".repeat(len)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidLength);
            assert_eq!(err.form(), GuidForm::Compact);
        }
        for len in [31, 33] {
            let err = canonical_to_compact(&"a".repeat(len)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidLength);
            assert_eq!(err.form(), GuidForm::Canonical);
        }
    }

    #[test]
    fn test_alphabet_validation() {
        for bad in ['-', '@'] {
            let input = format!("0{}{bad}", "0".repeat(20));
            let err = compact_to_canonical(&input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        }
        let err = canonical_to_compact("g0000000-0000-0000-0000-000000000000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
    }

    #[test]
    fn test_canonical_input_is_normalized() {
        let compact = canonical_to_compact("A1B2C3D4E5F6A1B2C3D4E5F6A1B2C3D4").unwrap();
        assert_eq!(
            compact_to_canonical(&compact).unwrap(),
            "a1b2c3d4-e5f6-a1b2-c3d4-e5f6a1b2c3d4"
        );
    }

    proptest! {
        #[test]
        fn prop_compact_roundtrip(compact in "[0-3][0-9A-Za-z_$]{21}") {
            let canonical = compact_to_canonical(&compact).unwrap();
            prop_assert_eq!(canonical.len(), 36);
            prop_assert_eq!(canonical_to_compact(&canonical).unwrap(), compact);
        }

        #[test]
        fn prop_canonical_roundtrip(hex in "[0-9a-fA-F]{32}", dashed in any::<bool>()) {
            let input = if dashed {
                format!("{}-{}-{}-{}-{}", &hex[0..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..32])
            } else {
                hex.clone()
            };
            let lower = hex.to_ascii_lowercase();
            let expected = format!(
                "{}-{}-{}-{}-{}",
                &lower[0..8], &lower[8..12], &lower[12..16], &lower[16..20], &lower[20..32]
            );

            let compact = canonical_to_compact(&input).unwrap();
            prop_assert_eq!(compact.len(), 22);
            prop_assert_eq!(compact_to_canonical(&compact).unwrap(), expected);
        }

        #[test]
        fn prop_value_roundtrip(value in any::<u128>()) {
            prop_assert_eq!(decode_compact(&encode_compact(value)).unwrap(), value);
            prop_assert_eq!(
                parse_canonical(&format_canonical(value, FormatOptions::upper())).unwrap(),
                value
            );
        }
    }
}
