use std::collections::HashMap;

use crate::ids::{RangeId, TextSpanId};
use crate::position::TooltipPlacement;
use crate::style::InlineStyle;

/// Whatever the highlighter paints on: a page, a terminal, a test recorder.
pub trait Surface {
    fn set_text_style(&mut self, span: &TextSpanId, style: InlineStyle);
    fn set_range_style(&mut self, range: &RangeId, style: InlineStyle);
    fn set_tooltip_markup(&mut self, markup: String);
    fn set_tooltip_visible(&mut self, visible: bool);
    fn set_tooltip_placement(&mut self, placement: TooltipPlacement);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub markup: String,
    pub visible: bool,
    pub placement: Option<TooltipPlacement>,
}

impl Tooltip {
    /// Inline style of the `.rules` element.
    pub fn to_css(&self) -> String {
        let display = if self.visible { "block" } else { "none" };
        match &self.placement {
            Some(placement) => format!("display: {display}; {}", placement.to_css()),
            None => format!("display: {display};"),
        }
    }
}

/// In-memory inline styles of every element plus the tooltip. Only elements
/// with a non-empty style are stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyles {
    texts: HashMap<TextSpanId, InlineStyle>,
    ranges: HashMap<RangeId, InlineStyle>,
    pub tooltip: Tooltip,
}

impl InlineStyles {
    pub fn text_style(&self, span: &TextSpanId) -> InlineStyle {
        self.texts.get(span).cloned().unwrap_or_default()
    }

    pub fn range_style(&self, range: &RangeId) -> InlineStyle {
        self.ranges.get(range).cloned().unwrap_or_default()
    }

    pub fn styled_text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn styled_range_count(&self) -> usize {
        self.ranges.len()
    }

    /// True when no element carries an inline style.
    pub fn is_unstyled(&self) -> bool {
        self.texts.is_empty() && self.ranges.is_empty()
    }
}

impl Surface for InlineStyles {
    fn set_text_style(&mut self, span: &TextSpanId, style: InlineStyle) {
        if style.is_empty() {
            self.texts.remove(span);
        } else {
            self.texts.insert(span.clone(), style);
        }
    }

    fn set_range_style(&mut self, range: &RangeId, style: InlineStyle) {
        if style.is_empty() {
            self.ranges.remove(range);
        } else {
            self.ranges.insert(*range, style);
        }
    }

    fn set_tooltip_markup(&mut self, markup: String) {
        self.tooltip.markup = markup;
    }

    fn set_tooltip_visible(&mut self, visible: bool) {
        self.tooltip.visible = visible;
    }

    fn set_tooltip_placement(&mut self, placement: TooltipPlacement) {
        self.tooltip.placement = Some(placement);
    }
}
