use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, warn};
use ruleviz_core::sheet::{Sentence, SpanItem, SpanNode};
use ruleviz_core::{InlineStyles, NodeId, RangeId, Role, TextSpanId, Viewer};

use crate::geometry;

/// One sentence laid out the way the analysis sheet pages are: id, source,
/// optional reference and the MT output.
#[component]
#[allow(non_snake_case)]
pub fn SentenceView(
    sentence: Sentence,
    viewer: Signal<Viewer>,
    styles: Signal<InlineStyles>,
) -> Element {
    rsx! {
        table { class: "sentence",
            tr {
                td { "Sentence ID:" }
                td { "{sentence.id}" }
            }
            tr {
                td { "Source:" }
                td {
                    SpanTreeView {
                        group: sentence.id,
                        role: Role::Source,
                        span: sentence.source.clone(),
                        viewer,
                        styles,
                    }
                }
            }
            if let Some(reference) = &sentence.reference {
                tr {
                    td { "Target Ref:" }
                    td { "{reference}" }
                }
            }
            tr {
                td { "Target MT:" }
                td {
                    SpanTreeView {
                        group: sentence.id,
                        role: Role::Target,
                        span: sentence.target.clone(),
                        viewer,
                        styles,
                    }
                }
            }
        }
    }
}

#[component]
#[allow(non_snake_case)]
fn SpanTreeView(
    group: u32,
    role: Role,
    span: SpanNode,
    viewer: Signal<Viewer>,
    styles: Signal<InlineStyles>,
) -> Element {
    let node = NodeId::new(group, span.node);
    let range = RangeId::new(node, role);
    let range_style = styles.read().range_style(&range).to_css();

    rsx! {
        span { id: "{range}", style: "{range_style}",
            for (position, item) in span.items.iter().enumerate() {
                {
                    match item {
                        SpanItem::Word(word) => rsx! {
                            TextSpan {
                                key: "{position}",
                                id: TextSpanId::new(node, position, role),
                                word: word.clone(),
                                viewer,
                                styles,
                            }
                        },
                        SpanItem::Span(child) => rsx! {
                            SpanTreeView {
                                key: "{position}",
                                group,
                                role,
                                span: child.clone(),
                                viewer,
                                styles,
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
#[allow(non_snake_case)]
fn TextSpan(
    id: TextSpanId,
    word: String,
    viewer: Signal<Viewer>,
    styles: Signal<InlineStyles>,
) -> Element {
    let style = styles.read().text_style(&id).to_css();
    let dom_id = id.to_string();

    let enter_id = id.clone();
    let move_id = id.clone();
    let move_dom_id = dom_id.clone();

    rsx! {
        span {
            id: "{dom_id}",
            class: "text",
            style: "{style}",
            onmouseenter: move |_| {
                viewer.write().hover_in(&enter_id, &mut *styles.write());
            },
            onmouseleave: move |_| {
                viewer.write().hover_out(&mut *styles.write());
            },
            onmousemove: move |e| {
                let cursor_x = e.client_coordinates().x;
                match geometry::measure(&move_dom_id, cursor_x) {
                    Some(geometry) => {
                        viewer.write().pointer_move(&move_id, &geometry, &mut *styles.write());
                    }
                    None => warn!("could not measure {move_dom_id}"),
                }
            },
            onclick: move |e| {
                e.prevent_default();
                let outcome = viewer.write().click(&mut *styles.write());
                debug!(?outcome, "click");
            },
            " {word} "
        }
    }
}
