//! Text utilities for position conversion.
//!
//! Provides byte offset <-> LSP position conversion with proper UTF-16 handling,
//! and the labeled `TextDocument` snapshot that both composite and virtual
//! documents are represented with.

use tower_lsp::lsp_types::{Position, Range, Url};

use crate::regions::LanguageId;

/// Pre-computed line index for efficient position lookups.
///
/// LSP positions use line/column where column is in UTF-16 code units.
/// This struct pre-computes line start offsets for O(log n) lookup.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset where each line starts.
    line_starts: Vec<usize>,
    /// Source text (needed for UTF-16 column calculation).
    source: String,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];

        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }

        Self {
            line_starts,
            source,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Convert a byte offset to an LSP position.
    ///
    /// Offsets past the end of the text clamp to the end position.
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .copied()
            .unwrap_or(self.source.len());

        let mut col = 0u32;
        for (i, c) in self.source[line_start..line_end].char_indices() {
            if line_start + i >= offset {
                break;
            }
            col += c.len_utf16() as u32;
        }

        Position::new(line as u32, col)
    }

    /// Convert an LSP position to a byte offset.
    ///
    /// Returns None if the line is out of bounds. A column past the end of the
    /// line resolves to the end of that line.
    pub fn position_to_offset(&self, position: Position) -> Option<usize> {
        let line = position.line as usize;

        if line >= self.line_starts.len() {
            return None;
        }

        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&end| end.saturating_sub(1))
            .unwrap_or(self.source.len());

        let line_slice = &self.source[line_start..line_end];
        let line_slice = line_slice.strip_suffix('\r').unwrap_or(line_slice);

        let mut utf16_col = 0u32;
        for (i, c) in line_slice.char_indices() {
            if utf16_col >= position.character {
                return Some(line_start + i);
            }
            utf16_col += c.len_utf16() as u32;
        }

        Some(line_start + line_slice.len())
    }

    /// Convert a byte span to an LSP range.
    pub fn span_to_range(&self, span: &std::ops::Range<usize>) -> Range {
        let start = self.offset_to_position(span.start);
        let end = self.offset_to_position(span.end);
        Range::new(start, end)
    }
}

/// An immutable, labeled snapshot of a document's text.
///
/// Composite documents and the virtual documents projected from them share
/// this representation, so tools can consume either one the same way.
#[derive(Debug, Clone)]
pub struct TextDocument {
    uri: Url,
    language_id: LanguageId,
    version: i32,
    line_index: LineIndex,
}

impl TextDocument {
    pub fn new(uri: Url, language_id: LanguageId, version: i32, text: String) -> Self {
        Self {
            uri,
            language_id,
            version,
            line_index: LineIndex::new(text),
        }
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn language_id(&self) -> LanguageId {
        self.language_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn text(&self) -> &str {
        self.line_index.source()
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Position of a byte offset, clamped to the end of the document.
    pub fn position_at(&self, offset: usize) -> Position {
        self.line_index.offset_to_position(offset)
    }

    /// Byte offset of a position, clamped to the document bounds.
    pub fn offset_at(&self, position: Position) -> usize {
        self.line_index
            .position_to_offset(position)
            .unwrap_or(self.text().len())
    }
}
