use ruleviz_core::position::PointerGeometry;

/// DOM id of the floating `.rules` tooltip.
pub const RULES_ELEMENT_ID: &str = "rules";

/// Reads the hovered span, the tooltip and the window. `None` when any of
/// them is not mounted yet.
pub fn measure(element_id: &str, cursor_x: f64) -> Option<PointerGeometry> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let element = document.get_element_by_id(element_id)?.get_bounding_client_rect();
    let tooltip = document
        .get_element_by_id(RULES_ELEMENT_ID)?
        .get_bounding_client_rect();

    // the tooltip is absolutely positioned in the page, so the span's top
    // has to be in page coordinates too
    let scroll_y = window.scroll_y().ok()?;
    let viewport_width = window.inner_width().ok()?.as_f64()?;

    Some(PointerGeometry {
        cursor_x,
        element_top: element.top() + scroll_y,
        element_height: element.height(),
        tooltip_width: tooltip.width(),
        tooltip_height: tooltip.height(),
        viewport_width,
    })
}
