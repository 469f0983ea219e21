#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::highlight::Highlighter;
use crate::ids::{IdError, NodeId, TextSpanId};
use crate::position::{PointerGeometry, TooltipPlacement, place_tooltip};
use crate::sheet::AnalysisSheet;
use crate::surface::{InlineStyles, Surface};

/// Page-lifetime interaction state. The current node survives hover-out so a
/// later click still knows where to zoom out from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub current: Option<NodeId>,
    pub hovering: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    ZoomedOut { from: NodeId, to: NodeId },
    NoParent,
    NoSelection,
}

/// Pointer input as data, for replaying interactions without a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Enter {
        span: TextSpanId,
    },
    Leave,
    Move {
        span: TextSpanId,
        geometry: PointerGeometry,
    },
    Click,
}

/// Snapshot taken after each replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub step: usize,
    pub current: Option<NodeId>,
    pub tooltip_visible: bool,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<TooltipPlacement>,
    pub highlighted_spans: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click: Option<ClickOutcome>,
}

/// Hover, move and click handling for one rendered sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Viewer {
    highlighter: Highlighter,
    state: ViewerState,
}

impl Viewer {
    pub fn new(highlighter: Highlighter) -> Self {
        Self {
            highlighter,
            state: ViewerState::default(),
        }
    }

    pub fn from_sheet(sheet: &AnalysisSheet) -> Self {
        Self::new(Highlighter::from_sheet(sheet))
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn current(&self) -> Option<NodeId> {
        self.state.current
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    pub fn hover_in<S: Surface + ?Sized>(&mut self, span: &TextSpanId, surface: &mut S) {
        self.state.current = Some(span.node);
        self.state.hovering = true;
        self.highlighter.highlight(span.node, surface);
        surface.set_tooltip_visible(true);
    }

    /// Hover-in for an element known only by its DOM id. A malformed id is
    /// reported and leaves the state untouched.
    pub fn hover_raw<S: Surface + ?Sized>(
        &mut self,
        element_id: &str,
        surface: &mut S,
    ) -> Result<(), IdError> {
        let span = element_id.parse::<TextSpanId>().inspect_err(|err| {
            warn!(%err, "ignoring hover on malformed element");
        })?;
        self.hover_in(&span, surface);
        Ok(())
    }

    pub fn hover_out<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if let Some(current) = self.state.current {
            self.highlighter.unhighlight(current, surface);
        }
        self.state.hovering = false;
        surface.set_tooltip_visible(false);
    }

    pub fn pointer_move<S: Surface + ?Sized>(
        &mut self,
        span: &TextSpanId,
        geometry: &PointerGeometry,
        surface: &mut S,
    ) -> TooltipPlacement {
        let placement = place_tooltip(span.role, geometry);
        surface.set_tooltip_placement(placement);
        placement
    }

    /// Moves the selection to the current node's parent, if it has one.
    pub fn click<S: Surface + ?Sized>(&mut self, surface: &mut S) -> ClickOutcome {
        let Some(current) = self.state.current else {
            return ClickOutcome::NoSelection;
        };
        let Some(parent) = self.highlighter.tables().parent(current) else {
            debug!(node = %current, "no parent to zoom out to");
            return ClickOutcome::NoParent;
        };
        self.highlighter.unhighlight(current, surface);
        self.state.current = Some(parent);
        self.highlighter.highlight(parent, surface);
        debug!(from = %current, to = %parent, "zoomed out");
        ClickOutcome::ZoomedOut {
            from: current,
            to: parent,
        }
    }

    pub fn dispatch<S: Surface + ?Sized>(
        &mut self,
        event: &PointerEvent,
        surface: &mut S,
    ) -> Option<ClickOutcome> {
        match event {
            PointerEvent::Enter { span } => self.hover_in(span, surface),
            PointerEvent::Leave => self.hover_out(surface),
            PointerEvent::Move { span, geometry } => {
                self.pointer_move(span, geometry, surface);
            }
            PointerEvent::Click => return Some(self.click(surface)),
        }
        None
    }

    pub fn replay<'a, I>(&mut self, events: I, styles: &mut InlineStyles) -> Vec<TraceStep>
    where
        I: IntoIterator<Item = &'a PointerEvent>,
    {
        events
            .into_iter()
            .enumerate()
            .map(|(step, event)| {
                let click = self.dispatch(event, styles);
                TraceStep {
                    step,
                    current: self.state.current,
                    tooltip_visible: styles.tooltip.visible,
                    tooltip: styles.tooltip.markup.clone(),
                    placement: styles.tooltip.placement,
                    highlighted_spans: styles.styled_text_count(),
                    click,
                }
            })
            .collect()
    }
}
