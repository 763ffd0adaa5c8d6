//! Embedded region descriptors produced by a region scanner.

use std::ops::Range;

use crate::document::TextDocument;

use super::language::{LanguageId, RegionType};

/// One contiguous span of a composite document written in a single language.
///
/// `start` and `end` are byte offsets into the composite document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedRegion {
    pub start: usize,
    pub end: usize,
    pub language_id: LanguageId,
    pub region_type: RegionType,
    /// True when the span is an attribute value inside markup (an inline
    /// style or event handler) rather than a top-level block.
    pub attribute_value: bool,
}

impl EmbeddedRegion {
    pub fn new(start: usize, end: usize, language_id: LanguageId, region_type: RegionType) -> Self {
        Self {
            start,
            end,
            language_id,
            region_type,
            attribute_value: false,
        }
    }

    pub fn with_attribute_value(mut self) -> Self {
        self.attribute_value = true;
        self
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Inclusive on both ends, so a cursor sitting right after the last
    /// character of a region still belongs to it.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

/// Output of a region scan.
///
/// Regions are ordered by `start` and never overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub regions: Vec<EmbeddedRegion>,
    /// References collected from script blocks that point at external sources.
    pub imported_scripts: Vec<String>,
}

/// Splits a composite document into embedded regions.
pub trait RegionScanner {
    fn scan(&self, document: &TextDocument) -> ScanResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_offset_is_inclusive() {
        let region = EmbeddedRegion::new(10, 20, LanguageId::Css, RegionType::Style);
        assert!(region.contains_offset(10));
        assert!(region.contains_offset(20));
        assert!(!region.contains_offset(9));
        assert!(!region.contains_offset(21));
    }

    #[test]
    fn attribute_value_flag() {
        let region =
            EmbeddedRegion::new(3, 8, LanguageId::Css, RegionType::Style).with_attribute_value();
        assert!(region.attribute_value);
        assert_eq!(region.span(), 3..8);
    }
}
