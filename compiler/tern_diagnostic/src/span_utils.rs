//! Line and column resolution for byte offsets.
//!
//! The scanner tracks only a flat byte offset. Line/column numbers are
//! derived here, lazily, when a diagnostic is rendered:
//! - lines are 1-based and split on `\n` (a preceding `\r` stays on its line)
//! - columns are 1-based and count Unicode scalar values, not bytes

/// Pre-computed line start offsets for O(log L) lookups.
///
/// # Example
///
/// ```
/// use tern_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "var a;\nreturn a;";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 7), (2, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (2, 8));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Scan the source once, recording the byte after every `\n`.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)` for `offset`.
    ///
    /// Offsets past the end of `source` clamp to the end, so the synthetic
    /// end-of-input position resolves to the column after the last character.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(line_start);

        let col_text = source.get(line_start..end).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;
        (line, col)
    }
}

#[cfg(test)]
mod tests;
