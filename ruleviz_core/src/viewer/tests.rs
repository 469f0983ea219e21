use super::*;
use crate::ids::{RangeId, Role};
use crate::include_test_file;
use crate::index::SpanIndex;
use crate::position::HorizontalAnchor;
use crate::style::{HighlightStyle, InlineStyle};
use crate::tables::RuleTables;

/// Records which nodes were painted so click behavior can be checked call by
/// call.
#[derive(Default)]
struct RecordingSurface {
    styled: Vec<(String, bool)>,
    markups: Vec<String>,
    visible: Option<bool>,
}

impl Surface for RecordingSurface {
    fn set_text_style(&mut self, span: &TextSpanId, style: InlineStyle) {
        self.styled.push((span.to_string(), !style.is_empty()));
    }

    fn set_range_style(&mut self, range: &RangeId, style: InlineStyle) {
        self.styled.push((range.to_string(), !style.is_empty()));
    }

    fn set_tooltip_markup(&mut self, markup: String) {
        self.markups.push(markup);
    }

    fn set_tooltip_visible(&mut self, visible: bool) {
        self.visible = Some(visible);
    }

    fn set_tooltip_placement(&mut self, _placement: TooltipPlacement) {}
}

fn viewer(parentref: &[(&str, &str)]) -> Viewer {
    let index = SpanIndex::from_dom_ids([
        "text-3-7-0-src",
        "text-3-7-2-trg",
        "range-3-7-src",
        "text-1-2-0-src",
        "range-1-2-src",
    ]);
    let mut tables = RuleTables::default();
    for node in ["3-7", "1-2"] {
        let node: NodeId = node.parse().unwrap();
        tables.insert_rule(node, Role::Source, format!("src of {node}"));
        tables.insert_rule(node, Role::Target, format!("trg of {node}"));
    }
    for (child, parent) in parentref {
        tables.set_parent(child.parse().unwrap(), parent.parse().unwrap());
    }
    Viewer::new(Highlighter::new(index, tables, HighlightStyle::default()))
}

#[test]
fn starts_with_nothing_selected() {
    let viewer = viewer(&[]);
    assert_eq!(viewer.state(), ViewerState::default());
    assert_eq!(viewer.current(), None);
}

#[test]
fn hover_selects_node_and_shows_tooltip() {
    let mut viewer = viewer(&[]);
    let mut styles = InlineStyles::default();

    viewer.hover_raw("text-3-7-foo-src-bar", &mut styles).unwrap();
    assert_eq!(viewer.current(), Some(NodeId::new(3, 7)));
    assert!(styles.tooltip.visible);
    assert_eq!(styles.tooltip.markup, "src of 3-7<br/><br/>trg of 3-7");
    assert_eq!(styles.styled_text_count(), 2);

    viewer.hover_out(&mut styles);
    assert!(!styles.tooltip.visible);
    assert!(styles.is_unstyled());
    // value is kept, only visuals are cleared
    assert_eq!(viewer.current(), Some(NodeId::new(3, 7)));
    assert!(!viewer.state().hovering);
}

#[test]
fn malformed_hover_is_ignored() {
    let mut viewer = viewer(&[]);
    let mut styles = InlineStyles::default();

    let err = viewer.hover_raw("text-3", &mut styles).unwrap_err();
    assert_eq!(err, IdError::TooFewSegments("text-3".to_string()));
    assert_eq!(viewer.current(), None);
    assert!(!styles.tooltip.visible);
    assert!(styles.is_unstyled());
}

#[test]
fn click_zooms_out_to_parent() {
    let mut viewer = viewer(&[("3-7", "1-2")]);
    let mut styles = InlineStyles::default();
    let span: TextSpanId = "text-3-7-0-src".parse().unwrap();

    viewer.hover_in(&span, &mut styles);
    let outcome = viewer.click(&mut styles);

    assert_eq!(
        outcome,
        ClickOutcome::ZoomedOut {
            from: NodeId::new(3, 7),
            to: NodeId::new(1, 2),
        }
    );
    assert_eq!(viewer.current(), Some(NodeId::new(1, 2)));
    assert!(styles.text_style(&span).is_empty());
    let parent_span: TextSpanId = "text-1-2-0-src".parse().unwrap();
    assert!(!styles.text_style(&parent_span).is_empty());
    assert_eq!(
        styles.range_style(&RangeId::new(NodeId::new(1, 2), Role::Source)),
        HighlightStyle::default().range()
    );
    assert_eq!(styles.tooltip.markup, "src of 1-2<br/><br/>trg of 1-2");
}

#[test]
fn click_without_parent_changes_nothing() {
    let mut viewer = viewer(&[("1-2", "0-1")]);
    let mut surface = RecordingSurface::default();
    let span: TextSpanId = "text-3-7-0-src".parse().unwrap();

    viewer.hover_in(&span, &mut surface);
    let styled_before = surface.styled.len();
    let markups_before = surface.markups.len();

    assert_eq!(viewer.click(&mut surface), ClickOutcome::NoParent);
    assert_eq!(viewer.current(), Some(NodeId::new(3, 7)));
    assert_eq!(surface.styled.len(), styled_before);
    assert_eq!(surface.markups.len(), markups_before);
}

#[test]
fn click_before_any_hover_is_a_no_op() {
    let mut viewer = viewer(&[("3-7", "1-2")]);
    let mut surface = RecordingSurface::default();
    assert_eq!(viewer.click(&mut surface), ClickOutcome::NoSelection);
    assert!(surface.styled.is_empty());
    assert_eq!(surface.visible, None);
}

#[test]
fn click_unhighlights_before_highlighting_parent() {
    let mut viewer = viewer(&[("3-7", "1-2")]);
    let mut surface = RecordingSurface::default();
    viewer.hover_in(&"text-3-7-0-src".parse().unwrap(), &mut surface);
    surface.styled.clear();

    viewer.click(&mut surface);
    let order: Vec<(&str, bool)> = surface
        .styled
        .iter()
        .map(|(id, on)| (id.as_str(), *on))
        .collect();
    assert_eq!(
        order,
        vec![
            ("text-3-7-0-src", false),
            ("text-3-7-2-trg", false),
            ("range-3-7-src", false),
            ("text-1-2-0-src", true),
            ("range-1-2-src", true),
        ]
    );
}

#[test]
fn move_places_tooltip_by_role() {
    let mut viewer = viewer(&[]);
    let mut styles = InlineStyles::default();
    let geometry = PointerGeometry {
        cursor_x: 850.0,
        element_top: 100.0,
        element_height: 20.0,
        tooltip_width: 200.0,
        tooltip_height: 30.0,
        viewport_width: 1000.0,
    };

    let src: TextSpanId = "text-3-7-0-src".parse().unwrap();
    let placement = viewer.pointer_move(&src, &geometry, &mut styles);
    assert_eq!(placement.horizontal, HorizontalAnchor::Right(0.0));
    assert_eq!(placement.top, 49.0);
    assert_eq!(styles.tooltip.placement, Some(placement));

    let trg: TextSpanId = "text-3-7-2-trg".parse().unwrap();
    let placement = viewer.pointer_move(&trg, &geometry, &mut styles);
    assert_eq!(placement.top, 125.0);
}

#[test]
fn replay_demo_walks_up_to_the_root() {
    let sheet = AnalysisSheet::from_json(include_test_file!("demo-sheet.json")).unwrap();
    let events: Vec<PointerEvent> =
        serde_json::from_str(include_test_file!("demo-events.json")).unwrap();
    let mut viewer = Viewer::from_sheet(&sheet);
    let mut styles = InlineStyles::default();

    let trace = viewer.replay(&events, &mut styles);
    let currents: Vec<Option<String>> = trace
        .iter()
        .map(|step| step.current.map(|node| node.to_string()))
        .collect();
    assert_eq!(
        currents,
        vec![
            Some("0-4".to_string()),
            Some("0-4".to_string()),
            Some("0-3".to_string()),
            Some("0-1".to_string()),
            Some("0-1".to_string()),
            Some("0-1".to_string()),
        ]
    );

    // "a dog" on the source side, "inu" on the target side
    assert_eq!(trace[0].highlighted_spans, 3);
    assert_eq!(
        trace[1].placement.map(|p| p.horizontal),
        Some(HorizontalAnchor::Right(0.0))
    );
    assert_eq!(trace[4].click, Some(ClickOutcome::NoParent));
    assert!(trace[4].tooltip.starts_with("S ( x0:NP x1:VP )"));

    let last = trace.last().unwrap();
    assert!(!last.tooltip_visible);
    assert_eq!(last.highlighted_spans, 0);
}

#[test]
fn trace_serializes_for_the_cli() {
    let mut viewer = viewer(&[]);
    let mut styles = InlineStyles::default();
    let events = vec![PointerEvent::Click];
    let trace = viewer.replay(&events, &mut styles);
    let json = serde_json::to_value(&trace).unwrap();
    assert_eq!(json[0]["click"]["outcome"], "no_selection");
    assert!(json[0]["current"].is_null());
    assert!(json[0].get("placement").is_none());
}
