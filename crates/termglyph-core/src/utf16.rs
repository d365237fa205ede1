#![forbid(unsafe_code)]

//! UTF-16 code unit helpers and a streaming cluster scanner.
//!
//! All 26 regional indicators (U+1F1E6..=U+1F1FF) sit inside one 0x400 block,
//! so their UTF-16 forms share the high surrogate `0xD83C` and differ only in
//! the low surrogate (`0xDDE6..=0xDDFF`). A scanner working on raw code units
//! can therefore spot a flag letter by looking at one unit, then confirm with
//! a single unit of lookahead, without decoding anything first.
//!
//! [`Utf16Clusters`] uses that to walk a `&[u16]` in one pass and yield the
//! unit range of each cluster. It never allocates and never fails: isolated
//! surrogates are treated as ordinary one-unit code points.

use std::iter::FusedIterator;
use std::ops::{Range, RangeInclusive};

use crate::classify::{
    extends_cluster, is_control, is_pictographic, is_regional_indicator, is_zwj,
};

/// The high surrogate shared by every regional indicator.
pub const REGIONAL_INDICATOR_HIGH_SURROGATE: u16 = 0xD83C;
/// Low surrogates of U+1F1E6..=U+1F1FF.
pub const REGIONAL_INDICATOR_LOW_SURROGATE_RANGE: RangeInclusive<u16> = 0xDDE6..=0xDDFF;

const CR: u16 = 0x000D;
const LF: u16 = 0x000A;

/// Returns `true` if `unit` is `0xD83C`.
#[inline]
pub const fn is_regional_indicator_high_surrogate(unit: u16) -> bool {
    unit == REGIONAL_INDICATOR_HIGH_SURROGATE
}

/// Returns `true` if `unit` is in `0xDDE6..=0xDDFF`.
#[inline]
pub const fn is_regional_indicator_low_surrogate(unit: u16) -> bool {
    *REGIONAL_INDICATOR_LOW_SURROGATE_RANGE.start() <= unit
        && unit <= *REGIONAL_INDICATOR_LOW_SURROGATE_RANGE.end()
}

/// Returns `true` for `0xD800..=0xDBFF`.
#[inline]
pub const fn is_high_surrogate(unit: u16) -> bool {
    matches!(unit, 0xD800..=0xDBFF)
}

/// Returns `true` for `0xDC00..=0xDFFF`.
#[inline]
pub const fn is_low_surrogate(unit: u16) -> bool {
    matches!(unit, 0xDC00..=0xDFFF)
}

/// Combine a surrogate pair into a code point.
///
/// Returns `None` unless `high` is a high surrogate and `low` a low surrogate.
#[inline]
pub const fn decode_surrogate_pair(high: u16, low: u16) -> Option<u32> {
    if is_high_surrogate(high) && is_low_surrogate(low) {
        Some(0x1_0000 + (((high as u32) - 0xD800) << 10) + ((low as u32) - 0xDC00))
    } else {
        None
    }
}

/// Split a supplementary-plane code point into its surrogate pair.
///
/// Returns `None` for BMP code points and values above U+10FFFF.
#[inline]
pub const fn encode_surrogate_pair(cp: u32) -> Option<(u16, u16)> {
    if cp < 0x1_0000 || cp > 0x10_FFFF {
        return None;
    }
    let v = cp - 0x1_0000;
    Some(((0xD800 + (v >> 10)) as u16, (0xDC00 + (v & 0x3FF)) as u16))
}

/// Regional indicator starting at `idx`, if any.
///
/// Checks `units[idx]` against the shared high surrogate and `units[idx + 1]`
/// against the low surrogate range. Out-of-bounds indices yield `None`.
#[inline]
pub fn regional_indicator_at(units: &[u16], idx: usize) -> Option<u32> {
    let high = *units.get(idx)?;
    if !is_regional_indicator_high_surrogate(high) {
        return None;
    }
    let low = *units.get(idx.checked_add(1)?)?;
    if !is_regional_indicator_low_surrogate(low) {
        return None;
    }
    decode_surrogate_pair(high, low)
}

/// Decode the code point starting at `idx` and report how many units it used.
///
/// An isolated surrogate comes back as its own value with length 1.
/// Returns `None` only when `idx` is past the end.
#[inline]
pub fn code_point_at(units: &[u16], idx: usize) -> Option<(u32, usize)> {
    let unit = *units.get(idx)?;
    if is_high_surrogate(unit) {
        if let Some(cp) = units
            .get(idx + 1)
            .and_then(|&low| decode_surrogate_pair(unit, low))
        {
            return Some((cp, 2));
        }
    }
    if is_high_surrogate(unit) || is_low_surrogate(unit) {
        #[cfg(feature = "tracing")]
        tracing::trace!(index = idx, unit, "isolated surrogate");
    }
    Some((u32::from(unit), 1))
}

/// Hangul syllable type of a code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hangul {
    L,
    V,
    T,
    Lv,
    Lvt,
}

impl Hangul {
    const fn of(cp: u32) -> Option<Self> {
        match cp {
            0x1100..=0x115F | 0xA960..=0xA97C => Some(Self::L),
            0x1160..=0x11A7 | 0xD7B0..=0xD7C6 => Some(Self::V),
            0x11A8..=0x11FF | 0xD7CB..=0xD7FB => Some(Self::T),
            0xAC00..=0xD7A3 if (cp - 0xAC00) % 28 == 0 => Some(Self::Lv),
            0xAC00..=0xD7A3 => Some(Self::Lvt),
            _ => None,
        }
    }

    /// Whether `next` continues a syllable ending in `self`.
    const fn joins(self, next: Self) -> bool {
        match self {
            Self::L => !matches!(next, Self::T),
            Self::V | Self::Lv => matches!(next, Self::V | Self::T),
            Self::T | Self::Lvt => matches!(next, Self::T),
        }
    }
}

/// Viramas that glue two consonants into a conjunct.
const fn is_conjunct_linker(cp: u32) -> bool {
    matches!(cp, 0x094D | 0x09CD | 0x0ACD | 0x0B4D | 0x0C4D | 0x0D4D)
}

/// Consonants of the scripts in [`is_conjunct_linker`].
const fn is_conjunct_consonant(cp: u32) -> bool {
    matches!(
        cp,
        // Devanagari
        0x0915..=0x0939 | 0x0958..=0x095F | 0x0978..=0x097F
        // Bengali
        | 0x0995..=0x09A8 | 0x09AA..=0x09B0 | 0x09B2 | 0x09B6..=0x09B9
        | 0x09DC..=0x09DD | 0x09DF | 0x09F0..=0x09F1
        // Gujarati
        | 0x0A95..=0x0AA8 | 0x0AAA..=0x0AB0 | 0x0AB2..=0x0AB3 | 0x0AB5..=0x0AB9 | 0x0AF9
        // Oriya
        | 0x0B15..=0x0B28 | 0x0B2A..=0x0B30 | 0x0B32..=0x0B33 | 0x0B35..=0x0B39
        | 0x0B5C..=0x0B5D | 0x0B5F | 0x0B71
        // Telugu
        | 0x0C15..=0x0C28 | 0x0C2A..=0x0C39 | 0x0C58..=0x0C5A
        // Malayalam
        | 0x0D15..=0x0D3A
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunct {
    Off,
    Consonant,
    Linked,
}

/// Single-pass cluster scanner over UTF-16 code units.
///
/// Yields the unit range of each cluster. Rules, applied in order:
/// 1. CR LF stays together; any other C0/C1 control is a cluster of its own.
/// 2. Two adjacent regional indicators form one flag; pairing is greedy from
///    the left, so an odd run leaves its last indicator alone.
/// 3. Hangul jamo and syllables chain into one syllable (L+V, LV+T, ...).
/// 4. Variation selectors, skin tone modifiers, combining and spacing marks
///    attach to the current cluster (see [`extends_cluster`]).
/// 5. A ZWJ attaches to the current cluster; if the cluster started with a
///    pictograph and the code point after the ZWJ is a pictograph, that code
///    point joins too.
/// 6. A consonant followed by a virama absorbs the next consonant (Indic
///    conjuncts such as `क्ष`).
///
/// The result matches extended grapheme clusters, except that prepended
/// concatenation marks and format characters (`Cf`) other than ZWJ/ZWNJ get
/// no special treatment.
///
/// ```
/// use termglyph_core::utf16::Utf16Clusters;
///
/// let units: Vec<u16> = "a👍🏽b".encode_utf16().collect();
/// let ranges: Vec<_> = Utf16Clusters::new(&units).collect();
/// assert_eq!(ranges, vec![0..1, 1..5, 5..6]);
/// ```
#[derive(Debug, Clone)]
pub struct Utf16Clusters<'a> {
    units: &'a [u16],
    pos: usize,
}

impl<'a> Utf16Clusters<'a> {
    /// Start scanning `units` from the beginning.
    #[must_use]
    pub const fn new(units: &'a [u16]) -> Self {
        Self { units, pos: 0 }
    }

    /// Unit offset of the next cluster.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    fn extend_cluster(&self, base: u32, mut end: usize) -> usize {
        let mut joinable = is_pictographic(base);
        let mut hangul = Hangul::of(base);
        let mut conjunct = if is_conjunct_consonant(base) {
            Conjunct::Consonant
        } else {
            Conjunct::Off
        };

        while let Some((cp, len)) = code_point_at(self.units, end) {
            match (hangul, Hangul::of(cp)) {
                (Some(prev), Some(next)) if prev.joins(next) => {
                    end += len;
                    hangul = Some(next);
                    continue;
                }
                _ => hangul = None,
            }

            if conjunct == Conjunct::Linked && is_conjunct_consonant(cp) {
                end += len;
                conjunct = Conjunct::Consonant;
            } else if is_zwj(cp) {
                end += len;
                if joinable {
                    match code_point_at(self.units, end) {
                        Some((next, next_len)) if is_pictographic(next) => end += next_len,
                        _ => joinable = false,
                    }
                }
            } else if extends_cluster(cp) {
                end += len;
                if is_conjunct_linker(cp) && conjunct != Conjunct::Off {
                    conjunct = Conjunct::Linked;
                }
            } else {
                break;
            }
        }
        end
    }
}

impl Iterator for Utf16Clusters<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let (base, len) = code_point_at(self.units, start)?;
        let mut end = start + len;

        if is_control(base) {
            if u32::from(CR) == base && self.units.get(end) == Some(&LF) {
                end += 1;
            }
        } else {
            if is_regional_indicator(base) && regional_indicator_at(self.units, end).is_some() {
                end += 2;
            }
            end = self.extend_cluster(base, end);
        }

        self.pos = end;
        Some(start..end)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len().saturating_sub(self.pos);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Utf16Clusters<'_> {}

/// Number of clusters in `units`.
#[must_use]
pub fn cluster_count(units: &[u16]) -> usize {
    Utf16Clusters::new(units).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn clusters(s: &str) -> Vec<String> {
        let units = utf16(s);
        Utf16Clusters::new(&units)
            .map(|r| String::from_utf16_lossy(&units[r]))
            .collect()
    }

    // --- surrogate predicates ---

    #[test]
    fn high_surrogate_is_fixed() {
        assert!(is_regional_indicator_high_surrogate(0xD83C));
        assert!(!is_regional_indicator_high_surrogate(0xD83D));
        assert!(!is_regional_indicator_high_surrogate(0xD83B));
    }

    #[test]
    fn low_surrogate_bounds() {
        assert!(!is_regional_indicator_low_surrogate(0xDDE5));
        assert!(is_regional_indicator_low_surrogate(0xDDE6));
        assert!(is_regional_indicator_low_surrogate(0xDDFF));
        assert!(!is_regional_indicator_low_surrogate(0xDE00));
    }

    #[test]
    fn regional_indicator_u_round_trip() {
        let units = utf16("\u{1F1FA}");
        assert_eq!(units, vec![0xD83C, 0xDDFA]);
        assert!(is_regional_indicator_high_surrogate(units[0]));
        assert!(is_regional_indicator_low_surrogate(units[1]));
        let cp = decode_surrogate_pair(units[0], units[1]);
        assert_eq!(cp, Some(0x1F1FA));
        assert!(cp.is_some_and(is_regional_indicator));
        assert_eq!(encode_surrogate_pair(0x1F1FA), Some((0xD83C, 0xDDFA)));
    }

    #[test]
    fn every_regional_indicator_shares_high_surrogate() {
        for cp in 0x1F1E6..=0x1F1FF {
            let (high, low) = encode_surrogate_pair(cp).unwrap();
            assert!(is_regional_indicator_high_surrogate(high));
            assert!(is_regional_indicator_low_surrogate(low));
        }
    }

    #[test]
    fn decode_rejects_wrong_kinds() {
        assert_eq!(decode_surrogate_pair(0xDC00, 0xD800), None);
        assert_eq!(decode_surrogate_pair(0x0041, 0xDC00), None);
        assert_eq!(encode_surrogate_pair(0x41), None);
        assert_eq!(encode_surrogate_pair(0x11_0000), None);
    }

    // --- lookahead ---

    #[test]
    fn regional_indicator_at_needs_both_units() {
        let units = utf16("x🇺");
        assert_eq!(regional_indicator_at(&units, 0), None);
        assert_eq!(regional_indicator_at(&units, 1), Some(0x1F1FA));
        // Truncated pair.
        assert_eq!(regional_indicator_at(&units[..2], 1), None);
        assert_eq!(regional_indicator_at(&units, 99), None);
        // Same high surrogate, non-RI low half (U+1F300 is 0xD83C 0xDF00).
        assert_eq!(regional_indicator_at(&utf16("\u{1F300}"), 0), None);
    }

    #[test]
    fn code_point_at_isolated_surrogates() {
        let units = [0xD83C, 0x0041, 0xDC00];
        assert_eq!(code_point_at(&units, 0), Some((0xD83C, 1)));
        assert_eq!(code_point_at(&units, 1), Some((0x41, 1)));
        assert_eq!(code_point_at(&units, 2), Some((0xDC00, 1)));
        assert_eq!(code_point_at(&units, 3), None);
    }

    // --- scanner ---

    #[test]
    fn scan_empty() {
        assert_eq!(Utf16Clusters::new(&[]).next(), None);
        assert_eq!(cluster_count(&[]), 0);
    }

    #[test]
    fn scan_ascii() {
        assert_eq!(clusters("abc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn scan_crlf() {
        assert_eq!(clusters("a\r\nb\n"), vec!["a", "\r\n", "b", "\n"]);
    }

    #[test]
    fn scan_family_zwj_sequence() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
        assert_eq!(clusters(family), vec![family]);
    }

    #[test]
    fn scan_gendered_sequence() {
        let runner = "\u{1F3C3}\u{200D}\u{2640}\u{FE0F}";
        assert_eq!(clusters(runner), vec![runner]);
    }

    #[test]
    fn scan_skin_tone_and_vs() {
        assert_eq!(clusters("👍🏽☀\u{FE0F}"), vec!["👍🏽", "☀\u{FE0F}"]);
    }

    #[test]
    fn scan_keycap() {
        assert_eq!(clusters("1\u{FE0F}\u{20E3}2"), vec!["1\u{FE0F}\u{20E3}", "2"]);
    }

    #[test]
    fn scan_flags_pair_greedily() {
        assert_eq!(clusters("🇺🇸"), vec!["🇺🇸"]);
        assert_eq!(clusters("🇺🇸🇫"), vec!["🇺🇸", "🇫"]);
        assert_eq!(clusters("🇺🇸🇫🇷"), vec!["🇺🇸", "🇫🇷"]);
        assert_eq!(clusters("🇺"), vec!["🇺"]);
    }

    #[test]
    fn scan_zwj_between_letters_does_not_join() {
        assert_eq!(clusters("a\u{200D}b"), vec!["a\u{200D}", "b"]);
    }

    #[test]
    fn scan_combining() {
        assert_eq!(clusters("e\u{301}x"), vec!["e\u{301}", "x"]);
    }

    #[test]
    fn scan_indic_conjunct_and_vowel_sign() {
        assert_eq!(clusters("क्षि"), vec!["क्षि"]);
        assert_eq!(clusters("नमस्ते"), vec!["न", "म", "स्ते"]);
        // Without a virama the next consonant starts a new cluster.
        assert_eq!(clusters("कि"), vec!["कि"]);
        assert_eq!(clusters("कक"), vec!["क", "क"]);
    }

    #[test]
    fn scan_hangul_jamo() {
        let jamo = "\u{1100}\u{1161}\u{11A8}";
        assert_eq!(clusters(jamo), vec![jamo]);
        // LV syllable takes a trailing T; LVT does not take a V.
        assert_eq!(clusters("\u{AC00}\u{11A8}"), vec!["\u{AC00}\u{11A8}"]);
        assert_eq!(clusters("\u{AC01}\u{1161}"), vec!["\u{AC01}", "\u{1161}"]);
        assert_eq!(clusters("한국"), vec!["한", "국"]);
    }

    #[test]
    fn scan_spacing_marks_and_arabic_signs() {
        assert_eq!(clusters("กำ"), vec!["กำ"]);
        assert_eq!(clusters("a\u{610}b"), vec!["a\u{610}", "b"]);
        // Myanmar tall AA is a spacing mark that does not attach.
        assert_eq!(clusters("\u{1000}\u{102B}"), vec!["\u{1000}", "\u{102B}"]);
    }

    #[test]
    fn scan_control_is_not_extended() {
        assert_eq!(clusters("\r\u{301}"), vec!["\r", "\u{301}"]);
        assert_eq!(clusters("\u{85}a"), vec!["\u{85}", "a"]);
    }

    #[test]
    fn scan_isolated_surrogate() {
        let units = [0x0061, 0xD83C, 0x0062];
        let ranges: Vec<_> = Utf16Clusters::new(&units).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3]);
    }

    #[cfg(feature = "tracing")]
    #[test]
    #[tracing_test::traced_test]
    fn isolated_surrogate_is_traced() {
        assert_eq!(code_point_at(&[0xD83C, 0x0041], 0), Some((0xD83C, 1)));
        assert!(logs_contain("isolated surrogate"));
        assert_eq!(cluster_count(&[0x0061, 0xDC00]), 2);
    }

    #[test]
    fn scan_is_fused() {
        let units = utf16("a");
        let mut it = Utf16Clusters::new(&units);
        assert_eq!(it.next(), Some(0..1));
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
        assert_eq!(it.position(), 1);
    }
}
