use serde::Serialize;
use std::fmt;

/// A span of the original source text
///
/// Locations borrow the source buffer, so the buffer outlives every token
/// and error derived from it. Rows and columns are 1-indexed.
#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation<'a> {
    filename: &'a str,
    #[serde(skip)]
    source: &'a str,
    offset: usize,
    length: usize,
    row: usize,
    column: usize,
}

impl<'a> SourceLocation<'a> {
    /// Creates a location; `offset + length` must not exceed `source.len()`
    /// and both ends must fall on character boundaries
    pub fn new(
        filename: &'a str,
        source: &'a str,
        offset: usize,
        length: usize,
        row: usize,
        column: usize,
    ) -> Self {
        debug_assert!(offset + length <= source.len());
        SourceLocation {
            filename,
            source,
            offset,
            length,
            row,
            column,
        }
    }

    /// Name of the file the source came from
    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Byte offset of the span
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte length of the span
    pub fn length(&self) -> usize {
        self.length
    }

    /// 1-indexed row
    pub fn row(&self) -> usize {
        self.row
    }

    /// 1-indexed column
    pub fn column(&self) -> usize {
        self.column
    }

    /// The spanned text
    pub fn lexeme(&self) -> &'a str {
        &self.source[self.offset..self.offset + self.length]
    }

    /// The full line containing the start of the span, without its line break
    pub fn surrounding_line(&self) -> &'a str {
        let start = self.source[..self.offset]
            .rfind('\n')
            .map_or(0, |index| index + 1);
        let end = self.source[self.offset..]
            .find('\n')
            .map_or(self.source.len(), |index| self.offset + index);
        let line = &self.source[start..end];
        line.strip_suffix('\r').unwrap_or(line)
    }
}

impl fmt::Debug for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SourceLocation")
            .field("filename", &self.filename)
            .field("offset", &self.offset)
            .field("length", &self.length)
            .field("row", &self.row)
            .field("column", &self.column)
            .finish()
    }
}

impl fmt::Display for SourceLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.row, self.column)
    }
}
