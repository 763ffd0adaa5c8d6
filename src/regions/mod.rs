//! Embedded-region model and document projection.
//!
//! This module provides:
//! - `LanguageId`, `RegionType` and the injectable `DefaultLanguages` table
//! - `EmbeddedRegion`, `ScanResult` and the `RegionScanner` seam
//! - `BlockScanner`, a scanner for top-level single-file component blocks
//! - `DocumentRegions`, which classifies positions/ranges and projects virtual documents

mod language;
mod projector;
mod region;
mod scanner;

pub use language::{DefaultLanguages, LanguageId, RegionType, HOST_LANGUAGE};
pub use projector::{DocumentRegions, LanguageRange};
pub use region::{EmbeddedRegion, RegionScanner, ScanResult};
pub use scanner::BlockScanner;
