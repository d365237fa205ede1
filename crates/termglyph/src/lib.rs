#![forbid(unsafe_code)]

//! termglyph: grapheme classification and column width for terminals.
//!
//! Re-exports [`termglyph_core`] and [`termglyph_text`], plus a [`prelude`].
//!
//! ```
//! use termglyph::prelude::*;
//!
//! assert_eq!(classify(0x1F3FB), ClassificationTag::SkinToneModifier);
//! assert_eq!(display_width("🇺🇸 ok"), 5);
//! ```

pub use termglyph_core;
pub use termglyph_text;

/// Common imports.
pub mod prelude {
    pub use termglyph_core::classify::{
        ClassificationTag, classify, is_gender_symbol, is_regional_indicator,
        is_skin_tone_modifier, is_variation_selector, is_zwj,
    };
    pub use termglyph_core::utf16::Utf16Clusters;
    pub use termglyph_text::{
        AmbiguousWidth, ColumnMap, GraphemeInfo, WidthCache, WidthConfig, analyze, display_width,
        grapheme_width, graphemes, truncate_to_width,
    };
}
