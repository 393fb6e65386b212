//! IFC GUID: conversion between the two textual encodings of a 128-bit identifier.
//!
//! IFC models and the viewer platform identify objects by a 22-character
//! "IFC GUID"; external records use the canonical dashed UUID text. Both
//! are serializations of the same 128 bits.
//!
//! # Quick Start
//!
//! ```rust
//! use ifc_guid::{canonical_to_compact, compact_to_canonical, Guid};
//!
//! let canonical = compact_to_canonical("1L3eG0ufj1rASMH6PLH000").unwrap();
//! assert_eq!(canonical, "550e8400-e29b-41d4-a716-446655440000");
//!
//! let compact = canonical_to_compact(&canonical).unwrap();
//! assert_eq!(compact, "1L3eG0ufj1rASMH6PLH000");
//!
//! let guid: Guid = compact.parse().unwrap();
//! assert_eq!(guid.to_string(), canonical);
//! ```
//!
//! # Formats
//!
//! - Compact: 22 symbols from `0-9A-Za-z_$` (in that order). The first
//!   symbol carries 2 bits and must be one of `0123`; the other 21 carry
//!   6 bits each. Case-sensitive.
//! - Canonical: 32 hex digits grouped 8-4-4-4-12. Input may omit dashes and
//!   use either case; output is lowercase and dashed.
//!
//! # Modules
//!
//! - [`codec`]: Encoding and decoding of both forms
//! - [`guid`]: The [`Guid`] value type
//! - [`alphabet`]: Format constants
//! - [`error`]: Error types
//!
//! All functions are pure and allocate only their output.

pub mod alphabet;
pub mod codec;
pub mod error;
pub mod guid;

pub use codec::{
    canonical_to_compact, compact_to_canonical, decode_compact, encode_compact,
    format_canonical, parse_canonical, FormatOptions, HexCase,
};
pub use error::{ErrorKind, GuidError, GuidForm};
pub use guid::Guid;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
