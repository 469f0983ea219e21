use dioxus::prelude::*;
use ruleviz_core::InlineStyles;

use crate::geometry::RULES_ELEMENT_ID;

#[component]
#[allow(non_snake_case)]
pub fn RulesTooltip(styles: ReadOnlySignal<InlineStyles>) -> Element {
    let tooltip = styles.read().tooltip.clone();
    let tooltip_style = tooltip.to_css();

    rsx! {
        div {
            id: RULES_ELEMENT_ID,
            class: "rules",
            style: "{tooltip_style}",
            dangerous_inner_html: tooltip.markup,
        }
    }
}
