#![forbid(unsafe_code)]

//! Code point classification for terminal grapheme handling.
//!
//! This crate provides the primitives a grapheme segmenter and a column-width
//! calculator need to get emoji sequences right:
//! - [`classify`] - variation selectors, ZWJ, skin tones, gender signs, regional indicators
//! - [`utf16`] - surrogate-level checks and a single-pass UTF-16 cluster scanner
//!
//! # Example
//! ```
//! use termglyph_core::classify::{ClassificationTag, classify, is_regional_indicator};
//! use termglyph_core::utf16::{Utf16Clusters, is_regional_indicator_high_surrogate};
//!
//! assert!(is_regional_indicator(0x1F1FA));
//! assert_eq!(classify(0x200D), ClassificationTag::ZeroWidthJoiner);
//!
//! // "🇺🇸" in UTF-16 is two surrogate pairs sharing the same high surrogate.
//! let units: Vec<u16> = "🇺🇸".encode_utf16().collect();
//! assert!(is_regional_indicator_high_surrogate(units[0]));
//! assert_eq!(Utf16Clusters::new(&units).count(), 1);
//! ```

pub mod classify;
pub mod utf16;

pub use classify::{ClassificationTag, classify};
pub use utf16::Utf16Clusters;
