//! A typed 128-bit identifier with both textual encodings.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::alphabet::COMPACT_LEN;
use crate::codec::{decode_compact, encode_compact, format_canonical, parse_canonical, FormatOptions};
use crate::error::GuidError;

/// A 128-bit GUID.
///
/// `Display` prints the canonical form; the alternate flag (`{:#}`) prints
/// the compact IFC form.
///
/// ```
/// use ifc_guid::Guid;
///
/// let guid: Guid = "0YvctVUKr0kugbFTf53O9L".parse().unwrap();
/// assert_eq!(guid.to_string(), "22e66ddf-794d-40bb-8aa5-3dda450d8255");
/// assert_eq!(format!("{guid:#}"), "0YvctVUKr0kugbFTf53O9L");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(u128);

impl Guid {
    /// The all-zero GUID.
    pub const NIL: Guid = Guid(0);

    /// Creates a GUID from its 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Returns the 128-bit value.
    pub const fn as_u128(&self) -> u128 {
        self.0
    }

    /// Creates a GUID from 16 big-endian bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Returns the 16 big-endian bytes, in the order the canonical text shows them.
    pub const fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }

    /// Decodes a 22-character IFC GUID.
    pub fn from_compact(compact: &str) -> Result<Self, GuidError> {
        decode_compact(compact).map(Self)
    }

    /// Parses canonical UUID text (dashes optional, either case).
    pub fn from_canonical(canonical: &str) -> Result<Self, GuidError> {
        parse_canonical(canonical).map(Self)
    }

    /// Parses either form, picking the compact decoder for 22-character input.
    pub fn parse(s: &str) -> Result<Self, GuidError> {
        if s.chars().count() == COMPACT_LEN {
            Self::from_compact(s)
        } else {
            Self::from_canonical(s)
        }
    }

    /// Returns the 22-character IFC GUID.
    pub fn to_compact(&self) -> String {
        encode_compact(self.0)
    }

    /// Returns lowercase dashed UUID text.
    pub fn to_canonical(&self) -> String {
        format_canonical(self.0, FormatOptions::default())
    }

    /// Returns UUID text rendered with the given options.
    pub fn format(&self, options: FormatOptions) -> String {
        format_canonical(self.0, options)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str(&self.to_compact())
        } else {
            f.write_str(&self.to_canonical())
        }
    }
}

impl FromStr for Guid {
    type Err = GuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u128> for Guid {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Guid> for u128 {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.as_u128())
    }
}

impl From<Guid> for Uuid {
    fn from(guid: Guid) -> Self {
        Uuid::from_u128(guid.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Guid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_canonical())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Guid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
