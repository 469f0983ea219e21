use tracing::debug;

use crate::ids::NodeId;
use crate::index::SpanIndex;
use crate::sheet::AnalysisSheet;
use crate::style::{HighlightStyle, InlineStyle};
use crate::surface::Surface;
use crate::tables::RuleTables;

/// Paints a node's spans and fills the tooltip with its rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlighter {
    index: SpanIndex,
    tables: RuleTables,
    style: HighlightStyle,
}

impl Highlighter {
    pub fn new(index: SpanIndex, tables: RuleTables, style: HighlightStyle) -> Self {
        Self {
            index,
            tables,
            style,
        }
    }

    pub fn from_sheet(sheet: &AnalysisSheet) -> Self {
        Self::new(
            SpanIndex::from_sheet(sheet),
            sheet.tables.clone(),
            sheet.style.clone(),
        )
    }

    pub fn index(&self) -> &SpanIndex {
        &self.index
    }

    pub fn tables(&self) -> &RuleTables {
        &self.tables
    }

    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    pub fn highlight<S: Surface + ?Sized>(&self, node: NodeId, surface: &mut S) {
        debug!(%node, "highlight");
        self.paint(node, self.style.phrase(), self.style.range(), surface);
        surface.set_tooltip_markup(self.tables.tooltip_markup(node, &self.style.missing_rule));
    }

    /// Clears the inline styles set by [`Highlighter::highlight`]. Leaves the
    /// tooltip content alone.
    pub fn unhighlight<S: Surface + ?Sized>(&self, node: NodeId, surface: &mut S) {
        debug!(%node, "unhighlight");
        self.paint(node, InlineStyle::default(), InlineStyle::default(), surface);
    }

    fn paint<S: Surface + ?Sized>(
        &self,
        node: NodeId,
        text: InlineStyle,
        range: InlineStyle,
        surface: &mut S,
    ) {
        let Some(elements) = self.index.elements(node) else {
            debug!(%node, "node owns no elements");
            return;
        };
        for span in &elements.texts {
            surface.set_text_style(span, text.clone());
        }
        for id in &elements.ranges {
            surface.set_range_style(id, range.clone());
        }
    }
}
