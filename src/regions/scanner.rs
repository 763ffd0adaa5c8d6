//! Regex-based scanner for the top-level blocks of a single-file component.
//!
//! Finds `<template>`, `<script>`, `<style>` and custom blocks, resolves their
//! `lang` attribute, and records `<script src="...">` references. It does not
//! look inside blocks, so it never reports attribute-value regions.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use tracing::trace;

use crate::document::TextDocument;

use super::language::{DefaultLanguages, LanguageId, RegionType};
use super::region::{EmbeddedRegion, RegionScanner, ScanResult};

/// Opening tag of a top-level block: name and raw attribute text.
static BLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9_-]*)(\s[^>]*)?>").unwrap());

/// A single attribute with an optional quoted or bare value.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/"'>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#).unwrap()
});

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?(?:-->|\z)").unwrap());

/// Scanner for top-level SFC blocks.
#[derive(Debug, Clone, Default)]
pub struct BlockScanner {
    defaults: DefaultLanguages,
}

impl BlockScanner {
    pub fn new(defaults: DefaultLanguages) -> Self {
        Self { defaults }
    }

    /// Scan raw source text.
    pub fn scan_source(&self, source: &str) -> ScanResult {
        let mut result = ScanResult::default();
        let mut pos = 0;

        while let Some(caps) = BLOCK_OPEN.captures_at(source, pos) {
            let Some(open) = caps.get(0) else { break };
            if let Some(comment) = HTML_COMMENT.find_at(source, pos) {
                if comment.start() < open.start() {
                    pos = comment.end();
                    continue;
                }
            }

            let name = &caps[1];
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let region_type = RegionType::from_tag(name);
            let attributes = parse_attributes(attrs);

            if region_type == RegionType::Script {
                if let Some(src) = attribute(&attributes, "src") {
                    result.imported_scripts.push(src.to_string());
                }
            }

            if attrs.trim_end().ends_with('/') {
                trace!(block = name, "self-closing block has no content");
                pos = open.end();
                continue;
            }

            let nested = region_type == RegionType::Template;
            let Some(close) = find_closing_tag(source, name, open.end(), nested) else {
                trace!(block = name, offset = open.start(), "unterminated block");
                break;
            };

            let language_id = attribute(&attributes, "lang")
                .and_then(LanguageId::from_lang_attr)
                .unwrap_or_else(|| self.defaults.for_type(region_type));

            trace!(
                block = name,
                language = %language_id,
                start = open.end(),
                end = close.start,
                "found block"
            );
            result.regions.push(EmbeddedRegion::new(
                open.end(),
                close.start,
                language_id,
                region_type,
            ));
            pos = close.end;
        }

        result
    }
}

impl RegionScanner for BlockScanner {
    fn scan(&self, document: &TextDocument) -> ScanResult {
        self.scan_source(document.text())
    }
}

/// Parse attribute text into (name, value) pairs. Valueless attributes get "".
fn parse_attributes(attrs: &str) -> Vec<(String, String)> {
    ATTRIBUTE
        .captures_iter(attrs)
        .map(|caps| {
            let name = caps[1].to_ascii_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

/// Find the closing tag matching a block opened before `from`.
///
/// Returns the span of the closing tag itself. With `nested`, opening tags of
/// the same name increase the depth, which template blocks need because
/// `<template v-if>` may appear inside them. Nested blocks hold markup, so
/// tags inside their HTML comments are skipped; other blocks are raw text.
fn find_closing_tag(source: &str, name: &str, from: usize, nested: bool) -> Option<Range<usize>> {
    let mut depth = 1usize;
    let mut pos = from;

    while let Some(rel) = source[pos..].find('<') {
        let lt = pos + rel;
        if nested && source[lt..].starts_with("<!--") {
            pos = HTML_COMMENT.find_at(source, lt).map_or(source.len(), |m| m.end());
            continue;
        }
        let rest = &source[lt + 1..];
        let (closing, tag) = match rest.strip_prefix('/') {
            Some(tag) => (true, tag),
            None => (false, rest),
        };

        if !starts_with_tag_name(tag, name) {
            pos = lt + 1;
            continue;
        }

        let tag_end = lt + source[lt..].find('>')? + 1;
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(lt..tag_end);
            }
        } else if nested && !source[lt..tag_end].ends_with("/>") {
            depth += 1;
        }
        pos = tag_end;
    }

    None
}

fn starts_with_tag_name(s: &str, name: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < name.len() || !bytes[..name.len()].eq_ignore_ascii_case(name.as_bytes()) {
        return false;
    }
    match bytes.get(name.len()) {
        None => true,
        Some(&b) => b.is_ascii_whitespace() || b == b'>' || b == b'/',
    }
}
