//! Line/column lookup for byte offsets.
//!
//! The frontend stores raw byte offsets everywhere; this map converts them
//! to 1-based line/column pairs only when output is being formatted.

/// Precomputed line-start table for one source string.
#[derive(Debug, Clone)]
pub struct LineMap {
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based `(line, column)` pair.
    ///
    /// Offsets past the end of the source resolve to the end of the last
    /// line, so error spans at end-of-input stay printable.
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        (line + 1, offset - self.line_starts[line] + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_offsets_across_lines() {
        let map = LineMap::new("ab\ncd\n\nx");
        assert_eq!(map.offset_to_line_col(0), (1, 1));
        assert_eq!(map.offset_to_line_col(1), (1, 2));
        assert_eq!(map.offset_to_line_col(3), (2, 1));
        assert_eq!(map.offset_to_line_col(6), (3, 1));
        assert_eq!(map.offset_to_line_col(7), (4, 1));
    }

    #[test]
    fn empty_source_is_line_one() {
        let map = LineMap::new("");
        assert_eq!(map.offset_to_line_col(0), (1, 1));
    }
}
