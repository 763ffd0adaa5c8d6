//! Folding ranges for embedded blocks.

use tower_lsp::lsp_types::{FoldingRange, FoldingRangeKind};

use crate::document::DocumentState;
use crate::regions::HOST_LANGUAGE;

/// One fold per embedded language range that spans more than one line.
///
/// A block's last line usually holds its closing tag, so the fold ends on the
/// line before the range end when the range ends at column 0.
pub fn folding_ranges(state: &DocumentState) -> Vec<FoldingRange> {
    state
        .regions
        .language_ranges(None)
        .into_iter()
        .filter(|range| range.language_id != HOST_LANGUAGE)
        .filter_map(|range| {
            let start_line = range.range.start.line;
            let mut end_line = range.range.end.line;
            if range.range.end.character == 0 {
                end_line = end_line.saturating_sub(1);
            }
            (end_line > start_line).then(|| FoldingRange {
                start_line,
                end_line,
                kind: Some(FoldingRangeKind::Region),
                ..Default::default()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use tower_lsp::lsp_types::Url;

    use super::*;
    use crate::regions::DefaultLanguages;

    #[test]
    fn folds_multi_line_blocks_only() {
        let source = "<template><p/></template>\n<script>\nexport default {}\n</script>\n<style>\n.a {}\n.b {}\n</style>\n";
        let uri = Url::parse("file:///App.vue").unwrap();
        let state = DocumentState::new(uri, source.to_string(), 1, DefaultLanguages::default());

        let folds: Vec<_> = folding_ranges(&state)
            .iter()
            .map(|f| (f.start_line, f.end_line))
            .collect();
        assert_eq!(folds, vec![(1, 2), (4, 6)]);
    }
}
