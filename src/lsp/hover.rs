//! Hover information describing the embedded language under the cursor.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};

use crate::document::DocumentState;
use crate::regions::EmbeddedRegion;

fn format_region(region: &EmbeddedRegion) -> String {
    let mut doc = format!("**{}** `<{}>` block", region.language_id, region.region_type);
    if region.attribute_value {
        doc.push_str(" (attribute value)");
    }
    doc
}

/// Hover for the region under `position`. Host-language text has no hover.
pub fn hover_at_position(state: &DocumentState, position: Position) -> Option<Hover> {
    let regions = &state.regions;
    let offset = regions.document().offset_at(position);
    let region = regions.region_at_offset(offset)?;

    Some(Hover {
        contents: HoverContents::Markup(MarkupContent {
            kind: MarkupKind::Markdown,
            value: format_region(region),
        }),
        range: Some(regions.document().line_index().span_to_range(&region.span())),
    })
}

#[cfg(test)]
mod tests {
    use tower_lsp::lsp_types::{Range, Url};

    use super::*;
    use crate::regions::DefaultLanguages;

    fn state(source: &str) -> DocumentState {
        let uri = Url::parse("file:///App.vue").unwrap();
        DocumentState::new(uri, source.to_string(), 1, DefaultLanguages::default())
    }

    fn hover_text(hover: &Hover) -> &str {
        match &hover.contents {
            HoverContents::Markup(markup) => &markup.value,
            _ => "",
        }
    }

    #[test]
    fn hover_inside_style_block() {
        let state = state("<template>\n</template>\n<style lang=\"scss\">\n.a { }\n</style>\n");
        let hover = hover_at_position(&state, Position::new(3, 2)).unwrap();
        assert_eq!(hover_text(&hover), "**scss** `<style>` block");
        assert_eq!(
            hover.range,
            Some(Range::new(Position::new(2, 19), Position::new(4, 0)))
        );
    }

    #[test]
    fn no_hover_on_host_text() {
        let state = state("<template>a</template>\n\n<script>b</script>");
        assert!(hover_at_position(&state, Position::new(1, 0)).is_none());
    }
}
