#![forbid(unsafe_code)]

//! Grapheme segmentation and per-cluster metadata.
//!
//! Cluster boundaries come from [`unicode_segmentation`] (UAX #29 extended
//! grapheme clusters). Regional indicators pair greedily from the left; a
//! run of three yields one flag followed by a lone indicator. That is the
//! same policy [`termglyph_core::utf16::Utf16Clusters`] applies to UTF-16.
//!
//! [`analyze`] walks one cluster and records which emoji mechanisms it uses,
//! which is what the width rules in [`crate::width`] key off.

use bitflags::bitflags;
use termglyph_core::classify::{
    ClassificationTag, classify, is_combining_mark, is_control, is_keycap_combiner,
    is_pictographic,
};
use unicode_segmentation::UnicodeSegmentation;

use crate::config::WidthConfig;
use crate::width::grapheme_width_with;

bitflags! {
    /// What a single grapheme cluster is made of.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GraphemeInfo: u16 {
        /// A ZWJ joins this cluster to a following code point.
        const ZWJ_SEQUENCE = 1 << 0;
        /// Contains VS16.
        const EMOJI_PRESENTATION = 1 << 1;
        /// Contains VS15.
        const TEXT_PRESENTATION = 1 << 2;
        /// A skin tone modifier follows a base.
        const SKIN_TONE = 1 << 3;
        /// A gender sign follows a ZWJ.
        const GENDERED = 1 << 4;
        /// Two regional indicators.
        const FLAG = 1 << 5;
        /// A single regional indicator with no partner.
        const LONE_REGIONAL_INDICATOR = 1 << 6;
        /// Contains combining marks.
        const COMBINING = 1 << 7;
        /// Contains the combining enclosing keycap.
        const KEYCAP = 1 << 8;
        /// Starts with a C0/C1 control.
        const CONTROL = 1 << 9;
        /// Starts with an emoji pictograph.
        const PICTOGRAPHIC_BASE = 1 << 10;
    }
}

impl GraphemeInfo {
    /// Flags that make a cluster render as a single wide emoji glyph.
    pub const EMOJI_SEQUENCE: Self = Self::ZWJ_SEQUENCE
        .union(Self::SKIN_TONE)
        .union(Self::FLAG)
        .union(Self::KEYCAP);

    /// Returns `true` if the cluster is a composite emoji (ZWJ, skin tone,
    /// flag, or keycap sequence).
    #[must_use]
    pub const fn is_emoji_sequence(self) -> bool {
        self.intersects(Self::EMOJI_SEQUENCE)
    }
}

/// Classify the code points of one cluster.
///
/// Intended for a single cluster as produced by [`graphemes`]; passing a
/// longer string merges the flags of everything in it.
#[must_use]
pub fn analyze(grapheme: &str) -> GraphemeInfo {
    let mut info = GraphemeInfo::empty();
    let mut regional = 0usize;
    let mut after_zwj = false;

    for (i, c) in grapheme.chars().enumerate() {
        let cp = c as u32;
        if i == 0 {
            if is_control(cp) {
                info |= GraphemeInfo::CONTROL;
            }
            if is_pictographic(cp) {
                info |= GraphemeInfo::PICTOGRAPHIC_BASE;
            }
        }
        if after_zwj {
            info |= GraphemeInfo::ZWJ_SEQUENCE;
        }

        let tag = classify(cp);
        match tag {
            ClassificationTag::VariationSelectorText => info |= GraphemeInfo::TEXT_PRESENTATION,
            ClassificationTag::VariationSelectorEmoji => info |= GraphemeInfo::EMOJI_PRESENTATION,
            ClassificationTag::SkinToneModifier if i > 0 => info |= GraphemeInfo::SKIN_TONE,
            ClassificationTag::GenderSymbol if after_zwj => info |= GraphemeInfo::GENDERED,
            ClassificationTag::RegionalIndicator => regional += 1,
            ClassificationTag::Ordinary if is_keycap_combiner(cp) => info |= GraphemeInfo::KEYCAP,
            ClassificationTag::Ordinary if is_combining_mark(cp) => info |= GraphemeInfo::COMBINING,
            _ => {}
        }
        after_zwj = tag == ClassificationTag::ZeroWidthJoiner;
    }

    match regional {
        0 => {}
        1 => info |= GraphemeInfo::LONE_REGIONAL_INDICATOR,
        _ => info |= GraphemeInfo::FLAG,
    }
    info
}

/// One grapheme cluster and where it sits in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grapheme<'a> {
    /// The cluster text.
    pub text: &'a str,
    /// Byte offset of the cluster in the source.
    pub byte_offset: usize,
    /// Cluster index in the source.
    pub index: usize,
}

impl Grapheme<'_> {
    /// Byte offset one past the end of the cluster.
    #[must_use]
    pub fn end(&self) -> usize {
        self.byte_offset + self.text.len()
    }

    /// Byte range of the cluster in the source.
    #[must_use]
    pub fn byte_range(&self) -> std::ops::Range<usize> {
        self.byte_offset..self.end()
    }

    /// Metadata for this cluster.
    #[must_use]
    pub fn info(&self) -> GraphemeInfo {
        analyze(self.text)
    }

    /// Column width under the default policy.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width_with(&WidthConfig::DEFAULT)
    }

    /// Column width under `config`.
    #[must_use]
    pub fn width_with(&self, config: &WidthConfig) -> usize {
        grapheme_width_with(self.text, config)
    }

    /// Number of Unicode scalar values in the cluster.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Iterate the extended grapheme clusters of `s` with their offsets.
pub fn graphemes(s: &str) -> impl Iterator<Item = Grapheme<'_>> + '_ {
    s.grapheme_indices(true)
        .enumerate()
        .map(|(index, (byte_offset, text))| Grapheme {
            text,
            byte_offset,
            index,
        })
}

/// Number of grapheme clusters in `s`.
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}
