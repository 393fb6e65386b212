//! The canonical form: 32 hex digits grouped 8-4-4-4-12.

use crate::alphabet::{CANONICAL_HEX_LEN, CANONICAL_LEN};
use crate::error::{GuidError, GuidForm};

/// Hex digit boundaries of the dashed groups.
const GROUP_BOUNDS: [usize; 6] = [0, 8, 12, 16, 20, 32];

/// Letter case of hex digits on output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HexCase {
    #[default]
    Lower,
    Upper,
}

/// Options for rendering the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatOptions {
    /// Letter case of the hex digits.
    pub case: HexCase,
    /// Insert dashes between the 8-4-4-4-12 groups.
    pub hyphenated: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            case: HexCase::Lower,
            hyphenated: true,
        }
    }
}

impl FormatOptions {
    /// Uppercase, dashed.
    pub fn upper() -> Self {
        Self {
            case: HexCase::Upper,
            ..Self::default()
        }
    }

    /// Returns these options with dashes turned on or off.
    pub fn with_hyphens(mut self, hyphenated: bool) -> Self {
        self.hyphenated = hyphenated;
        self
    }
}

/// Parses canonical GUID text into its 128-bit value.
///
/// Every `-` is stripped before validation, so dashes are accepted in any
/// position. The remaining characters must be exactly 32 hex digits in
/// either case. Reported positions index into the original input.
pub fn parse_canonical(canonical: &str) -> Result<u128, GuidError> {
    let actual = canonical.chars().filter(|&c| c != '-').count();
    if actual != CANONICAL_HEX_LEN {
        return Err(GuidError::InvalidLength {
            form: GuidForm::Canonical,
            expected: CANONICAL_HEX_LEN,
            actual,
        });
    }

    let mut value: u128 = 0;
    for (position, ch) in canonical.chars().enumerate() {
        if ch == '-' {
            continue;
        }
        let nibble = ch.to_digit(16).ok_or(GuidError::InvalidCharacter {
            form: GuidForm::Canonical,
            position,
            found: ch,
        })?;
        value = (value << 4) | u128::from(nibble);
    }

    Ok(value)
}

/// Renders a 128-bit value as canonical GUID text.
pub fn format_canonical(value: u128, options: FormatOptions) -> String {
    let hex = match options.case {
        HexCase::Lower => format!("{value:032x}"),
        HexCase::Upper => format!("{value:032X}"),
    };
    if !options.hyphenated {
        return hex;
    }

    let mut out = String::with_capacity(CANONICAL_LEN);
    for bounds in GROUP_BOUNDS.windows(2) {
        if bounds[0] > 0 {
            out.push('-');
        }
        out.push_str(&hex[bounds[0]..bounds[1]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SAMPLE: u128 = 0x550e8400_e29b_41d4_a716_446655440000;

    #[test]
    fn test_format_default() {
        assert_eq!(
            format_canonical(SAMPLE, FormatOptions::default()),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(
            format_canonical(0, FormatOptions::default()),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_format_options() {
        assert_eq!(
            format_canonical(SAMPLE, FormatOptions::upper()),
            "550E8400-E29B-41D4-A716-446655440000"
        );
        assert_eq!(
            format_canonical(SAMPLE, FormatOptions::default().with_hyphens(false)),
            "550e8400e29b41d4a716446655440000"
        );
    }

    #[test]
    fn test_parse_with_and_without_dashes() {
        let dashed = parse_canonical("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let plain = parse_canonical("550e8400e29b41d4a716446655440000").unwrap();
        let upper = parse_canonical("550E8400-E29B-41D4-A716-446655440000").unwrap();
        assert_eq!(dashed, SAMPLE);
        assert_eq!(plain, SAMPLE);
        assert_eq!(upper, SAMPLE);
    }

    #[test]
    fn test_parse_dashes_anywhere() {
        let odd = parse_canonical("-550e-8400e29b41d4a7164466554400--00-").unwrap();
        assert_eq!(odd, SAMPLE);
    }

    #[test]
    fn test_parse_invalid_length() {
        let short = parse_canonical("550e8400-e29b-41d4-a716-44665544000").unwrap_err();
        assert_eq!(
            short,
            GuidError::InvalidLength {
                form: GuidForm::Canonical,
                expected: 32,
                actual: 31,
            }
        );

        let long = parse_canonical("550e8400-e29b-41d4-a716-4466554400000").unwrap_err();
        assert_eq!(long.kind(), ErrorKind::InvalidLength);

        let braced = parse_canonical("{550e8400-e29b-41d4-a716-446655440000}").unwrap_err();
        assert_eq!(braced.kind(), ErrorKind::InvalidLength);
    }

    #[test]
    fn test_parse_invalid_character() {
        let err = parse_canonical("550e8400-e29b-41d4-a716-44665544000g").unwrap_err();
        assert_eq!(
            err,
            GuidError::InvalidCharacter {
                form: GuidForm::Canonical,
                position: 35,
                found: 'g',
            }
        );
    }

    #[test]
    fn test_parse_rejects_sign_and_whitespace() {
        let err = parse_canonical("+50e8400-e29b-41d4-a716-446655440000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        let err = parse_canonical(" 50e8400-e29b-41d4-a716-446655440000").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
    }
}
