#![forbid(unsafe_code)]

//! Terminal text measurement for termglyph.
//!
//! This crate turns strings into terminal cells:
//! - [`graphemes`] / [`analyze`] - user-perceived characters and what they contain
//! - [`display_width`] / [`grapheme_width`] - column widths (0, 1 or 2 per cluster)
//! - [`WidthConfig`] - ambiguous-width and presentation-selector policy
//! - [`ColumnMap`] / [`truncate_to_width`] - column <-> byte conversion
//! - [`WidthCache`] - LRU cache for repeated cluster measurement
//!
//! # Example
//! ```
//! use termglyph_text::{ColumnMap, WidthConfig, display_width, truncate_to_width};
//!
//! assert_eq!(display_width("hi👍🏽"), 4);
//! assert_eq!(display_width("🇺🇸"), 2);
//!
//! let map = ColumnMap::new("a你b", &WidthConfig::default());
//! assert_eq!(map.total_width(), 4);
//! assert_eq!(map.byte_at_column(2), Some(1)); // second column of 你
//!
//! assert_eq!(truncate_to_width("你好世界", 5), "你好");
//! ```

pub mod cache;
pub mod column;
pub mod config;
pub mod grapheme;
pub mod width;

pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY, WidthCache};
#[cfg(feature = "thread_local_cache")]
pub use cache::with_thread_local_cache;
pub use column::{
    ColumnMap, pad_to_width, pad_to_width_with, truncate_to_width, truncate_to_width_with,
};
pub use config::{AmbiguousWidth, ParseWidthConfigError, WidthConfig};
pub use grapheme::{Grapheme, GraphemeInfo, analyze, grapheme_count, graphemes};
pub use width::{
    char_width, char_width_with, display_width, display_width_with, grapheme_width,
    grapheme_width_with,
};
