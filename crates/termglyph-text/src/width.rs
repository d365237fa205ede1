#![forbid(unsafe_code)]

//! Display width of characters, grapheme clusters, and strings in terminal cells.
//!
//! Character widths come from Unicode East Asian Width via [`unicode_width`],
//! with the emoji pictograph blocks forced to 2. Cluster widths are decided
//! from the cluster's [`GraphemeInfo`]:
//!
//! | Cluster | Width |
//! |---------|-------|
//! | single code point | [`char_width_with`] |
//! | starts with a control (`\r\n`) | 0 |
//! | flag (two regional indicators) | 2 |
//! | ZWJ / skin tone / keycap sequence | 2 |
//! | contains VS16, `emoji_presentation` on | 2 |
//! | pictograph + VS15, `text_presentation` on | 1 |
//! | anything else | width of the base character |
//!
//! No cluster is wider than 2 columns.

use termglyph_core::classify::{classify, is_combining_mark, is_control, is_regional_indicator};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

use crate::config::{AmbiguousWidth, WidthConfig};
use crate::grapheme::{GraphemeInfo, analyze};

/// Inputs at least this long get a debug log line when measured.
pub(crate) const LARGE_INPUT_BYTES: usize = 10_000;

/// Display width of a single character under the default policy.
///
/// - `0` for controls, combining marks, ZWJ and variation selectors
/// - `1` for narrow characters and a lone regional indicator
/// - `2` for wide characters (CJK, fullwidth forms, emoji pictographs)
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    char_width_with(c, &WidthConfig::DEFAULT)
}

/// Display width of a single character under `config`.
#[must_use]
pub fn char_width_with(c: char, config: &WidthConfig) -> usize {
    let cp = c as u32;
    if is_control(cp) || classify(cp).is_zero_width() || is_combining_mark(cp) {
        return 0;
    }
    if is_regional_indicator(cp) {
        return 1;
    }
    match cp {
        // Misc Symbols and Pictographs (includes skin tone swatches)
        0x1F300..=0x1F5FF => 2,
        // Emoticons
        0x1F600..=0x1F64F => 2,
        // Transport and Map Symbols
        0x1F680..=0x1F6FF => 2,
        // Supplemental Symbols and Pictographs
        0x1F900..=0x1F9FF => 2,
        // Symbols and Pictographs Extended-A
        0x1FA70..=0x1FAFF => 2,
        _ => {
            let width = match config.ambiguous {
                AmbiguousWidth::Narrow => c.width(),
                AmbiguousWidth::Wide => c.width_cjk(),
            };
            width.unwrap_or(0).min(2)
        }
    }
}

/// Display width of a grapheme cluster under the default policy.
///
/// - `e` + combining acute: 1
/// - family ZWJ sequence: 2
/// - `🇺🇸`: 2
/// - thumbs up + skin tone: 2
#[inline]
#[must_use]
pub fn grapheme_width(grapheme: &str) -> usize {
    grapheme_width_with(grapheme, &WidthConfig::DEFAULT)
}

/// Display width of a grapheme cluster under `config`.
#[must_use]
pub fn grapheme_width_with(grapheme: &str, config: &WidthConfig) -> usize {
    let Some(first) = grapheme.chars().next() else {
        return 0;
    };
    if grapheme.len() == first.len_utf8() {
        return char_width_with(first, config);
    }

    let info = analyze(grapheme);
    if info.contains(GraphemeInfo::CONTROL) {
        return 0;
    }
    if info.is_emoji_sequence() {
        return 2;
    }
    if config.emoji_presentation && info.contains(GraphemeInfo::EMOJI_PRESENTATION) {
        return 2;
    }
    if config.text_presentation
        && info.contains(GraphemeInfo::TEXT_PRESENTATION | GraphemeInfo::PICTOGRAPHIC_BASE)
    {
        return 1;
    }
    char_width_with(first, config)
}

/// Display width of a string under the default policy.
#[inline]
#[must_use]
pub fn display_width(s: &str) -> usize {
    display_width_with(s, &WidthConfig::DEFAULT)
}

/// Display width of a string under `config`.
///
/// Pure ASCII takes a byte-counting fast path (printable bytes count 1,
/// controls 0). Everything else is summed cluster by cluster.
#[must_use]
pub fn display_width_with(s: &str, config: &WidthConfig) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..0x7F).contains(b)).count();
    }
    if s.len() >= LARGE_INPUT_BYTES {
        tracing::debug!(len = s.len(), "measuring large text");
    }
    s.graphemes(true)
        .map(|g| grapheme_width_with(g, config))
        .sum()
}
