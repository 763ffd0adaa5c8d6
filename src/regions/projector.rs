//! Language classification and virtual document projection over embedded regions.
//!
//! A `DocumentRegions` pairs a composite document with the regions scanned from
//! it. Every query reads that immutable pair and returns a fresh value, so a
//! projector is cheap to rebuild whenever the document text changes.

use std::sync::Arc;

use tower_lsp::lsp_types::{Position, Range};
use tracing::debug;

use crate::document::TextDocument;

use super::language::{DefaultLanguages, LanguageId, RegionType, HOST_LANGUAGE};
use super::region::{EmbeddedRegion, RegionScanner, ScanResult};

/// A range of the composite document written in a single language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRange {
    pub range: Range,
    pub language_id: LanguageId,
    pub attribute_value: bool,
}

impl LanguageRange {
    fn host(start: Position, end: Position) -> Self {
        Self {
            range: Range::new(start, end),
            language_id: HOST_LANGUAGE,
            attribute_value: false,
        }
    }

    fn for_region(region: &EmbeddedRegion, start: Position, end: Position) -> Self {
        Self {
            range: Range::new(start, end),
            language_id: region.language_id,
            attribute_value: region.attribute_value,
        }
    }
}

/// Region-aware view of a composite document.
#[derive(Debug, Clone)]
pub struct DocumentRegions {
    document: Arc<TextDocument>,
    regions: Vec<EmbeddedRegion>,
    imported_scripts: Vec<String>,
    defaults: DefaultLanguages,
}

impl DocumentRegions {
    pub fn new(document: Arc<TextDocument>, scan: ScanResult, defaults: DefaultLanguages) -> Self {
        debug!(
            uri = %document.uri(),
            version = document.version(),
            regions = scan.regions.len(),
            imported_scripts = scan.imported_scripts.len(),
            "built document regions"
        );
        Self {
            document,
            regions: scan.regions,
            imported_scripts: scan.imported_scripts,
            defaults,
        }
    }

    /// Scan `document` and build its regions in one step.
    pub fn scan(
        document: Arc<TextDocument>,
        scanner: &impl RegionScanner,
        defaults: DefaultLanguages,
    ) -> Self {
        let scan = scanner.scan(&document);
        Self::new(document, scan, defaults)
    }

    pub fn document(&self) -> &TextDocument {
        &self.document
    }

    pub fn regions(&self) -> &[EmbeddedRegion] {
        &self.regions
    }

    pub fn defaults(&self) -> &DefaultLanguages {
        &self.defaults
    }

    pub fn imported_scripts(&self) -> &[String] {
        &self.imported_scripts
    }

    /// Partition `range` (the whole document when `None`) into consecutive
    /// language ranges. Gaps between regions are labeled with the host language.
    pub fn language_ranges(&self, range: Option<Range>) -> Vec<LanguageRange> {
        let doc = &self.document;
        let mut result = Vec::new();

        let (mut current_pos, mut current_offset, end_offset) = match range {
            Some(range) => (range.start, doc.offset_at(range.start), doc.offset_at(range.end)),
            None => (Position::new(0, 0), 0, doc.text().len()),
        };

        for region in &self.regions {
            if region.end <= current_offset || region.start >= end_offset {
                continue;
            }

            let start = region.start.max(current_offset);
            let start_pos = doc.position_at(start);
            if current_offset < region.start {
                result.push(LanguageRange::host(current_pos, start_pos));
            }

            let end = region.end.min(end_offset);
            let end_pos = doc.position_at(end);
            if end > region.start {
                result.push(LanguageRange::for_region(region, start_pos, end_pos));
            }

            current_offset = end;
            current_pos = end_pos;
        }

        if current_offset < end_offset {
            let end_pos = match range {
                Some(range) => range.end,
                None => doc.position_at(end_offset),
            };
            result.push(LanguageRange::host(current_pos, end_pos));
        }

        result
    }

    /// Language at `position`.
    ///
    /// Region bounds are inclusive, so a position shared by two adjacent
    /// regions belongs to the earlier one.
    pub fn language_at_position(&self, position: Position) -> LanguageId {
        self.region_at_offset(self.document.offset_at(position))
            .map(|region| region.language_id)
            .unwrap_or(HOST_LANGUAGE)
    }

    /// First region (in document order) containing `offset`.
    pub fn region_at_offset(&self, offset: usize) -> Option<&EmbeddedRegion> {
        for region in &self.regions {
            if region.start > offset {
                break;
            }
            if region.contains_offset(offset) {
                return Some(region);
            }
        }
        None
    }

    /// The host language followed by every region language, in order of
    /// first appearance.
    pub fn languages_in_document(&self) -> Vec<LanguageId> {
        let mut result = vec![HOST_LANGUAGE];
        for region in &self.regions {
            if !result.contains(&region.language_id) {
                result.push(region.language_id);
            }
        }
        result
    }

    /// Document where only regions written in `language_id` keep their text.
    pub fn single_language_document(&self, language_id: LanguageId) -> TextDocument {
        let text = self.masked_text(|region| region.language_id == language_id);
        self.virtual_document(language_id, text)
    }

    /// Document where only regions of `region_type` keep their text, declared
    /// with the default language for that type whatever the regions' dialects.
    pub fn single_type_document(&self, region_type: RegionType) -> TextDocument {
        let text = self.masked_text(|region| region.region_type == region_type);
        self.virtual_document(self.defaults.for_type(region_type), text)
    }

    /// Range of the first region of `region_type`.
    pub fn language_range_by_type(&self, region_type: RegionType) -> Option<LanguageRange> {
        self.regions
            .iter()
            .find(|region| region.region_type == region_type)
            .map(|region| self.region_range(region))
    }

    /// Ranges of every region of `region_type`, in document order.
    pub fn language_ranges_by_type(&self, region_type: RegionType) -> Vec<LanguageRange> {
        self.regions
            .iter()
            .filter(|region| region.region_type == region_type)
            .map(|region| self.region_range(region))
            .collect()
    }

    fn region_range(&self, region: &EmbeddedRegion) -> LanguageRange {
        LanguageRange::for_region(
            region,
            self.document.position_at(region.start),
            self.document.position_at(region.end),
        )
    }

    fn virtual_document(&self, language_id: LanguageId, text: String) -> TextDocument {
        TextDocument::new(
            self.document.uri().clone(),
            language_id,
            self.document.version(),
            text,
        )
    }

    /// Copy of the document text with every character outside the kept regions
    /// replaced by spaces. Line breaks survive, and each masked character turns
    /// into as many spaces as it has UTF-16 code units, so LSP positions line up
    /// with the composite document.
    fn masked_text(&self, keep: impl Fn(&EmbeddedRegion) -> bool) -> String {
        let source = self.document.text();
        let mut out = String::with_capacity(source.len());
        let mut kept = self.regions.iter().filter(|region| keep(*region)).peekable();

        for (offset, c) in source.char_indices() {
            while kept.peek().is_some_and(|region| region.end <= offset) {
                kept.next();
            }
            let inside = kept.peek().is_some_and(|region| region.start <= offset);

            if inside || is_line_break(c) {
                out.push(c);
            } else {
                out.extend(std::iter::repeat(' ').take(c.len_utf16()));
            }
        }

        out
    }
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
