#![forbid(unsafe_code)]

//! Conversion between terminal columns and positions in a line of text.
//!
//! A wide cluster covers two columns but starts at one byte offset, and a
//! cluster may span several code points. [`ColumnMap`] precomputes one entry
//! per cluster so cursor movement, selection, and mouse hit-testing can go
//! from a column to a byte or char index (and back) with a binary search.
//!
//! # Invariants
//!
//! 1. Entries are in source order; `byte_offset`, `char_offset` and `column`
//!    are all non-decreasing.
//! 2. `column` of entry `i + 1` equals `column + width` of entry `i`.
//! 3. A column inside a wide cluster resolves to that cluster's start.
//! 4. Zero-width clusters (e.g. `\r\n`) occupy no column and are never the
//!    result of a column lookup.

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::config::WidthConfig;
use crate::grapheme::graphemes;
use crate::width::{LARGE_INPUT_BYTES, display_width_with, grapheme_width_with};

/// Position and width of one cluster in a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterCell {
    /// Byte offset of the cluster.
    pub byte_offset: usize,
    /// Char (scalar value) offset of the cluster.
    pub char_offset: usize,
    /// First column the cluster occupies.
    pub column: usize,
    /// Columns occupied (0, 1 or 2).
    pub width: usize,
}

impl ClusterCell {
    /// Column one past the cluster.
    #[inline]
    #[must_use]
    pub const fn end_column(&self) -> usize {
        self.column + self.width
    }
}

/// Per-cluster column table for one line of text.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    cells: SmallVec<[ClusterCell; 32]>,
    total_width: usize,
    byte_len: usize,
    char_len: usize,
}

impl ColumnMap {
    /// Build the table for `line` under `config`.
    #[must_use]
    pub fn new(line: &str, config: &WidthConfig) -> Self {
        if line.len() >= LARGE_INPUT_BYTES {
            tracing::debug!(len = line.len(), "column map for large line");
        }

        let mut cells = SmallVec::new();
        let mut column = 0usize;
        let mut char_offset = 0usize;
        for g in graphemes(line) {
            let width = grapheme_width_with(g.text, config);
            cells.push(ClusterCell {
                byte_offset: g.byte_offset,
                char_offset,
                column,
                width,
            });
            column += width;
            char_offset += g.char_count();
        }

        Self {
            cells,
            total_width: column,
            byte_len: line.len(),
            char_len: char_offset,
        }
    }

    /// Total display width of the line.
    #[must_use]
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the line is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cluster entries in order.
    #[must_use]
    pub fn cells(&self) -> &[ClusterCell] {
        &self.cells
    }

    /// Index of the cluster covering `column`, if any.
    #[must_use]
    pub fn cluster_at_column(&self, column: usize) -> Option<usize> {
        let idx = self.cells.partition_point(|c| c.end_column() <= column);
        self.cells
            .get(idx)
            .filter(|c| c.column <= column)
            .map(|_| idx)
    }

    /// Byte offset of the cluster covering `column`.
    #[must_use]
    pub fn byte_at_column(&self, column: usize) -> Option<usize> {
        self.cluster_at_column(column)
            .map(|idx| self.cells[idx].byte_offset)
    }

    /// Char offset of the cluster covering `column`.
    #[must_use]
    pub fn char_index_at_column(&self, column: usize) -> Option<usize> {
        self.cluster_at_column(column)
            .map(|idx| self.cells[idx].char_offset)
    }

    /// First column of cluster `idx`.
    #[must_use]
    pub fn column_of_cluster(&self, idx: usize) -> Option<usize> {
        self.cells.get(idx).map(|c| c.column)
    }

    /// Column of the cluster containing byte `byte`.
    ///
    /// Offsets at or past the end map to [`total_width`](Self::total_width).
    #[must_use]
    pub fn column_of_byte(&self, byte: usize) -> usize {
        if byte >= self.byte_len {
            return self.total_width;
        }
        let idx = self.cells.partition_point(|c| c.byte_offset <= byte);
        idx.checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .map_or(0, |c| c.column)
    }

    /// Column of the cluster containing char index `char_idx`.
    ///
    /// Indices at or past the end map to [`total_width`](Self::total_width).
    #[must_use]
    pub fn column_of_char(&self, char_idx: usize) -> usize {
        if char_idx >= self.char_len {
            return self.total_width;
        }
        let idx = self.cells.partition_point(|c| c.char_offset <= char_idx);
        idx.checked_sub(1)
            .and_then(|i| self.cells.get(i))
            .map_or(0, |c| c.column)
    }
}

/// Longest prefix of `s` that fits in `max_width` columns (default policy).
#[must_use]
pub fn truncate_to_width(s: &str, max_width: usize) -> &str {
    truncate_to_width_with(s, max_width, &WidthConfig::DEFAULT)
}

/// Longest prefix of `s` that fits in `max_width` columns under `config`.
///
/// Never splits a cluster: a wide cluster that would straddle the limit is
/// dropped along with everything after it.
#[must_use]
pub fn truncate_to_width_with<'a>(s: &'a str, max_width: usize, config: &WidthConfig) -> &'a str {
    let mut used = 0usize;
    for g in graphemes(s) {
        let width = grapheme_width_with(g.text, config);
        if used + width > max_width {
            return &s[..g.byte_offset];
        }
        used += width;
    }
    s
}

/// Fit `s` to exactly `width` columns (default policy).
#[must_use]
pub fn pad_to_width(s: &str, width: usize) -> Cow<'_, str> {
    pad_to_width_with(s, width, &WidthConfig::DEFAULT)
}

/// Fit `s` to exactly `width` columns under `config`: truncate, then
/// right-pad with spaces.
///
/// Borrows when `s` already fits exactly.
#[must_use]
pub fn pad_to_width_with<'a>(s: &'a str, width: usize, config: &WidthConfig) -> Cow<'a, str> {
    let truncated = truncate_to_width_with(s, width, config);
    let used = display_width_with(truncated, config);
    if used == width {
        return Cow::Borrowed(truncated);
    }
    let mut out = String::with_capacity(truncated.len() + (width - used));
    out.push_str(truncated);
    out.extend(std::iter::repeat_n(' ', width - used));
    Cow::Owned(out)
}
