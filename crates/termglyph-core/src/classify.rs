#![forbid(unsafe_code)]

//! Code point classification for emoji-aware grapheme handling.
//!
//! Every predicate here is a `const fn` over a raw `u32` so callers can feed
//! it whatever they decoded, including values that are not valid Unicode
//! scalars. Anything outside the ranges below is simply `false`.
//!
//! | Constant | Value | Role |
//! |----------|-------|------|
//! | [`VARIATION_SELECTOR_TEXT`] | U+FE0E | VS15, text presentation |
//! | [`VARIATION_SELECTOR_EMOJI`] | U+FE0F | VS16, emoji presentation |
//! | [`ZWJ`] | U+200D | joins emoji into one composite glyph |
//! | [`SKIN_TONE_RANGE`] | U+1F3FB..=U+1F3FF | Fitzpatrick modifiers |
//! | [`FEMALE_SIGN`] / [`MALE_SIGN`] | U+2640 / U+2642 | gendered ZWJ sequences |
//! | [`REGIONAL_INDICATOR_RANGE`] | U+1F1E6..=U+1F1FF | flag letters A-Z |
//!
//! The ranges do not overlap, so [`classify`] is total and yields exactly one
//! [`ClassificationTag`] per code point.

use std::fmt;
use std::ops::RangeInclusive;

use unicode_normalization::char::is_combining_mark as is_general_mark;

/// VS15: request text presentation of the preceding character.
pub const VARIATION_SELECTOR_TEXT: u32 = 0xFE0E;
/// VS16: request emoji presentation of the preceding character.
pub const VARIATION_SELECTOR_EMOJI: u32 = 0xFE0F;
/// Zero-width joiner.
pub const ZWJ: u32 = 0x200D;
/// Fitzpatrick skin tone modifiers (type 1-2 through type 6).
pub const SKIN_TONE_RANGE: RangeInclusive<u32> = 0x1F3FB..=0x1F3FF;
/// Female sign, used in gendered ZWJ sequences.
pub const FEMALE_SIGN: u32 = 0x2640;
/// Male sign, used in gendered ZWJ sequences.
pub const MALE_SIGN: u32 = 0x2642;
/// Regional indicator symbols A through Z.
pub const REGIONAL_INDICATOR_RANGE: RangeInclusive<u32> = 0x1F1E6..=0x1F1FF;
/// Combining enclosing keycap (`1️⃣`).
pub const COMBINING_ENCLOSING_KEYCAP: u32 = 0x20E3;

#[inline]
const fn in_range(cp: u32, range: &RangeInclusive<u32>) -> bool {
    *range.start() <= cp && cp <= *range.end()
}

/// Returns `true` for VS15 or VS16.
#[inline]
pub const fn is_variation_selector(cp: u32) -> bool {
    cp == VARIATION_SELECTOR_TEXT || cp == VARIATION_SELECTOR_EMOJI
}

/// Returns `true` if a single UTF-16 code unit is VS15 or VS16.
///
/// Both selectors live in the BMP, so one unit is always enough.
#[inline]
pub const fn is_variation_selector_unit(unit: u16) -> bool {
    is_variation_selector(unit as u32)
}

/// Returns `true` for the zero-width joiner.
#[inline]
pub const fn is_zwj(cp: u32) -> bool {
    cp == ZWJ
}

/// Returns `true` for a Fitzpatrick skin tone modifier.
#[inline]
pub const fn is_skin_tone_modifier(cp: u32) -> bool {
    in_range(cp, &SKIN_TONE_RANGE)
}

/// Returns `true` for the female or male sign.
#[inline]
pub const fn is_gender_symbol(cp: u32) -> bool {
    cp == FEMALE_SIGN || cp == MALE_SIGN
}

/// Returns `true` for one of the 26 regional indicator symbols.
#[inline]
pub const fn is_regional_indicator(cp: u32) -> bool {
    in_range(cp, &REGIONAL_INDICATOR_RANGE)
}

/// Returns `true` for the combining enclosing keycap.
#[inline]
pub const fn is_keycap_combiner(cp: u32) -> bool {
    cp == COMBINING_ENCLOSING_KEYCAP
}

/// Returns `true` for C0 and C1 control characters.
#[inline]
pub const fn is_control(cp: u32) -> bool {
    cp < 0x20 || matches!(cp, 0x7F..=0x9F)
}

/// Returns `true` for code points that extend the previous cluster without
/// starting one of their own: combining diacritics, enclosing marks,
/// VS1-VS14, the variation selector supplement, and emoji tag characters.
///
/// VS15/VS16 are not included; they carry their own tag.
#[inline]
pub const fn is_combining_mark(cp: u32) -> bool {
    matches!(
        cp,
        0x0300..=0x036F     // Combining Diacritical Marks
            | 0x0483..=0x0489   // Cyrillic combining marks
            | 0x0591..=0x05BD   // Hebrew points
            | 0x064B..=0x065F   // Arabic harakat
            | 0x1AB0..=0x1AFF   // Combining Diacritical Marks Extended
            | 0x1DC0..=0x1DFF   // Combining Diacritical Marks Supplement
            | 0x20D0..=0x20FF   // Combining Marks for Symbols (incl. keycap)
            | 0xFE00..=0xFE0D   // VS1-VS14
            | 0xFE20..=0xFE2F   // Combining Half Marks
            | 0xE0020..=0xE007F // Tag characters (subdivision flags)
            | 0xE0100..=0xE01EF // Variation Selectors Supplement
    )
}

/// Spacing marks that are letters by general category (Thai and Lao SARA AM).
const fn is_spacing_mark_letter(cp: u32) -> bool {
    matches!(cp, 0x0E33 | 0x0EB3)
}

/// Spacing combining marks (`Mc`) that still start their own cluster.
const fn is_detached_spacing_mark(cp: u32) -> bool {
    matches!(
        cp,
        0x102B..=0x102C
            | 0x1038
            | 0x1062..=0x1064
            | 0x1067..=0x106D
            | 0x1083
            | 0x1087..=0x108C
            | 0x108F
            | 0x109A..=0x109C
            | 0x1A61
            | 0x1A63..=0x1A64
            | 0xAA7B
            | 0xAA7D
            | 0x11720..=0x11721
    )
}

/// Returns `true` if `cp` joins the cluster before it.
///
/// Covers everything [`ClassificationTag::attaches_to_previous`] reports
/// except the ZWJ (which needs lookahead), [`is_combining_mark`], every
/// code point of general category Mark, the spacing mark letters, ZWNJ and
/// the halfwidth katakana sound marks.
#[must_use]
pub fn extends_cluster(cp: u32) -> bool {
    if is_zwj(cp) || is_detached_spacing_mark(cp) {
        return false;
    }
    classify(cp).attaches_to_previous()
        || is_combining_mark(cp)
        || is_spacing_mark_letter(cp)
        || matches!(cp, 0x200C | 0xFF9E..=0xFF9F)
        || char::from_u32(cp).is_some_and(is_general_mark)
}

/// Returns `true` for code points in the emoji pictograph blocks.
///
/// This is a block-level approximation of `Extended_Pictographic`, used to
/// decide whether a ZWJ glues two code points together. Regional indicators
/// and skin tone modifiers are excluded; the gender signs are included.
#[inline]
pub const fn is_pictographic(cp: u32) -> bool {
    if is_regional_indicator(cp) || is_skin_tone_modifier(cp) {
        return false;
    }
    matches!(
        cp,
        0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2194..=0x21AA
            | 0x231A..=0x23FF
            | 0x25AA..=0x25FE
            | 0x2600..=0x27BF
            | 0x2934..=0x2935
            | 0x2B05..=0x2B55
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0x1F000..=0x1FAFF
    )
}

/// Classification of a single code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassificationTag {
    /// U+FE0E.
    VariationSelectorText,
    /// U+FE0F.
    VariationSelectorEmoji,
    /// U+200D.
    ZeroWidthJoiner,
    /// U+1F3FB..=U+1F3FF.
    SkinToneModifier,
    /// U+2640 or U+2642.
    GenderSymbol,
    /// U+1F1E6..=U+1F1FF.
    RegionalIndicator,
    /// Everything else.
    #[default]
    Ordinary,
}

impl ClassificationTag {
    /// All tags, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::VariationSelectorText,
        Self::VariationSelectorEmoji,
        Self::ZeroWidthJoiner,
        Self::SkinToneModifier,
        Self::GenderSymbol,
        Self::RegionalIndicator,
        Self::Ordinary,
    ];

    /// Classify a `char`.
    #[inline]
    #[must_use]
    pub const fn of_char(c: char) -> Self {
        classify(c as u32)
    }

    /// Stable lowercase name, suitable for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VariationSelectorText => "vs-text",
            Self::VariationSelectorEmoji => "vs-emoji",
            Self::ZeroWidthJoiner => "zwj",
            Self::SkinToneModifier => "skin-tone",
            Self::GenderSymbol => "gender",
            Self::RegionalIndicator => "regional-indicator",
            Self::Ordinary => "ordinary",
        }
    }

    /// Returns `true` if a code point with this tag never starts a cluster
    /// when something precedes it.
    #[inline]
    #[must_use]
    pub const fn attaches_to_previous(&self) -> bool {
        matches!(
            self,
            Self::VariationSelectorText
                | Self::VariationSelectorEmoji
                | Self::ZeroWidthJoiner
                | Self::SkinToneModifier
        )
    }

    /// Returns `true` if a code point with this tag occupies no columns on its own.
    #[inline]
    #[must_use]
    pub const fn is_zero_width(&self) -> bool {
        matches!(
            self,
            Self::VariationSelectorText | Self::VariationSelectorEmoji | Self::ZeroWidthJoiner
        )
    }
}

impl fmt::Display for ClassificationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a code point. Total: unknown or invalid values are [`ClassificationTag::Ordinary`].
#[inline]
#[must_use]
pub const fn classify(cp: u32) -> ClassificationTag {
    if cp == VARIATION_SELECTOR_TEXT {
        ClassificationTag::VariationSelectorText
    } else if cp == VARIATION_SELECTOR_EMOJI {
        ClassificationTag::VariationSelectorEmoji
    } else if is_zwj(cp) {
        ClassificationTag::ZeroWidthJoiner
    } else if is_skin_tone_modifier(cp) {
        ClassificationTag::SkinToneModifier
    } else if is_gender_symbol(cp) {
        ClassificationTag::GenderSymbol
    } else if is_regional_indicator(cp) {
        ClassificationTag::RegionalIndicator
    } else {
        ClassificationTag::Ordinary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAMILY: [u32; 7] = [0x1F468, 0x200D, 0x1F469, 0x200D, 0x1F467, 0x200D, 0x1F466];

    // --- variation selectors ---

    #[test]
    fn variation_selectors_exact() {
        assert!(is_variation_selector(0xFE0E));
        assert!(is_variation_selector(0xFE0F));
        assert!(!is_variation_selector(0xFE0D));
        assert!(!is_variation_selector(0xFE10));
        assert!(!is_variation_selector(0));
    }

    #[test]
    fn variation_selector_unit_matches_code_point_form() {
        for unit in [0xFE0Du16, 0xFE0E, 0xFE0F, 0xFE10, 0x0041, 0xD83C] {
            assert_eq!(
                is_variation_selector_unit(unit),
                is_variation_selector(unit as u32),
                "unit {unit:#06X}"
            );
        }
    }

    // --- skin tones ---

    #[test]
    fn skin_tone_bounds() {
        assert!(!is_skin_tone_modifier(0x1F3FA));
        for cp in 0x1F3FB..=0x1F3FF {
            assert!(is_skin_tone_modifier(cp));
        }
        assert!(!is_skin_tone_modifier(0x1F400));
    }

    // --- gender ---

    #[test]
    fn gender_symbols() {
        assert!(is_gender_symbol(0x2640));
        assert!(is_gender_symbol(0x2642));
        assert!(!is_gender_symbol(0x2641));
        assert!(!is_gender_symbol(0x263F));
        assert!(!is_gender_symbol(0x2643));
    }

    // --- regional indicators ---

    #[test]
    fn regional_indicator_bounds() {
        assert!(!is_regional_indicator(0x1F1E5));
        assert!(is_regional_indicator(0x1F1E6));
        assert!(is_regional_indicator(0x1F1FF));
        assert!(!is_regional_indicator(0x1F200));
        assert_eq!(REGIONAL_INDICATOR_RANGE.clone().count(), 26);
    }

    #[test]
    fn us_flag_is_two_regional_indicators() {
        for c in "🇺🇸".chars() {
            let cp = c as u32;
            assert!(is_regional_indicator(cp));
            assert!(!is_variation_selector(cp));
            assert!(!is_zwj(cp));
            assert!(!is_skin_tone_modifier(cp));
            assert!(!is_gender_symbol(cp));
            assert_eq!(classify(cp), ClassificationTag::RegionalIndicator);
        }
    }

    // --- zwj ---

    #[test]
    fn family_sequence_zwj_positions() {
        for (i, &cp) in FAMILY.iter().enumerate() {
            if i % 2 == 1 {
                assert!(is_zwj(cp), "index {i} should be ZWJ");
                assert_eq!(classify(cp), ClassificationTag::ZeroWidthJoiner);
            } else {
                assert_eq!(classify(cp), ClassificationTag::Ordinary, "index {i}");
                assert!(!is_regional_indicator(cp));
                assert!(!is_skin_tone_modifier(cp));
                assert!(!is_variation_selector(cp));
            }
        }
    }

    // --- classify ---

    #[test]
    fn classify_each_tag() {
        assert_eq!(classify(0xFE0E), ClassificationTag::VariationSelectorText);
        assert_eq!(classify(0xFE0F), ClassificationTag::VariationSelectorEmoji);
        assert_eq!(classify(0x200D), ClassificationTag::ZeroWidthJoiner);
        assert_eq!(classify(0x1F3FD), ClassificationTag::SkinToneModifier);
        assert_eq!(classify(0x2642), ClassificationTag::GenderSymbol);
        assert_eq!(classify(0x1F1E6), ClassificationTag::RegionalIndicator);
        assert_eq!(classify('a' as u32), ClassificationTag::Ordinary);
    }

    #[test]
    fn classify_out_of_range_is_ordinary() {
        assert_eq!(classify(0x110000), ClassificationTag::Ordinary);
        assert_eq!(classify(u32::MAX), ClassificationTag::Ordinary);
        assert_eq!(classify(0xD83C), ClassificationTag::Ordinary);
    }

    #[test]
    fn of_char_matches_classify() {
        assert_eq!(
            ClassificationTag::of_char('\u{1F3FB}'),
            ClassificationTag::SkinToneModifier
        );
        assert_eq!(ClassificationTag::of_char('x'), ClassificationTag::Ordinary);
    }

    #[test]
    fn tag_names_are_distinct() {
        let mut names: Vec<_> = ClassificationTag::ALL.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ClassificationTag::ALL.len());
        assert_eq!(ClassificationTag::ZeroWidthJoiner.to_string(), "zwj");
    }

    #[test]
    fn attach_and_zero_width_flags() {
        assert!(ClassificationTag::ZeroWidthJoiner.attaches_to_previous());
        assert!(ClassificationTag::SkinToneModifier.attaches_to_previous());
        assert!(!ClassificationTag::SkinToneModifier.is_zero_width());
        assert!(!ClassificationTag::RegionalIndicator.attaches_to_previous());
        assert!(!ClassificationTag::GenderSymbol.attaches_to_previous());
    }

    // --- pictographs ---

    #[test]
    fn pictographic_blocks() {
        assert!(is_pictographic(0x1F468)); // man
        assert!(is_pictographic(0x2764)); // heavy black heart
        assert!(is_pictographic(FEMALE_SIGN));
        assert!(!is_pictographic(0x1F1FA));
        assert!(!is_pictographic(0x1F3FD));
        assert!(!is_pictographic('a' as u32));
        assert!(!is_pictographic(ZWJ));
    }

    // --- combining marks ---

    #[test]
    fn combining_marks() {
        assert!(is_combining_mark(0x0301));
        assert!(is_combining_mark(COMBINING_ENCLOSING_KEYCAP));
        assert!(is_combining_mark(0xE0067)); // TAG LATIN SMALL LETTER G
        assert!(!is_combining_mark(0xFE0E));
        assert!(!is_combining_mark(0xFE0F));
        assert!(!is_combining_mark('e' as u32));
        assert!(is_keycap_combiner(0x20E3));
        assert!(!is_keycap_combiner(0x20E2));
    }

    #[test]
    fn controls() {
        assert!(is_control(0x00));
        assert!(is_control(0x1F));
        assert!(!is_control(0x20));
        assert!(is_control(0x7F));
        assert!(is_control(0x9F));
        assert!(!is_control(0xA0));
    }

    // --- cluster extension ---

    #[test]
    fn extends_cluster_emoji_parts() {
        assert!(extends_cluster(0xFE0F));
        assert!(extends_cluster(0xFE0E));
        assert!(extends_cluster(0x1F3FD));
        assert!(extends_cluster(0x20E3));
        // The ZWJ is handled with lookahead by the scanner.
        assert!(!extends_cluster(ZWJ));
        assert!(!extends_cluster(0x1F1FA));
        assert!(!extends_cluster(FEMALE_SIGN));
    }

    #[test]
    fn extends_cluster_marks_in_other_scripts() {
        assert!(extends_cluster(0x094D)); // DEVANAGARI SIGN VIRAMA
        assert!(extends_cluster(0x093F)); // DEVANAGARI VOWEL SIGN I (spacing)
        assert!(extends_cluster(0x0610)); // ARABIC SIGN SALLALLAHOU ALAYHE WASSALLAM
        assert!(extends_cluster(0x0E33)); // THAI CHARACTER SARA AM
        assert!(extends_cluster(0x0EB3)); // LAO VOWEL SIGN AM
        assert!(extends_cluster(0x200C));
        assert!(extends_cluster(0xFF9E));
    }

    #[test]
    fn extends_cluster_rejects_bases() {
        assert!(!extends_cluster('a' as u32));
        assert!(!extends_cluster(0x0915)); // DEVANAGARI LETTER KA
        assert!(!extends_cluster(0x0E01)); // THAI CHARACTER KO KAI
        assert!(!extends_cluster(0x1100)); // HANGUL CHOSEONG KIYEOK
        assert!(!extends_cluster(0x102B)); // MYANMAR VOWEL SIGN TALL AA
        assert!(!extends_cluster(0xD800));
        assert!(!extends_cluster(0x11_0000));
    }
}
