//! Thin `web-sys` helpers.
//!
//! Two error styles on purpose: structural lookups (window, document,
//! head) return `Result` because nothing works without them, while
//! selector lookups return `Option`/empty collections because a missing
//! element just disables one effect.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

use vitrine_core::Transform;

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// First match for `selector`, or `None` on miss or selector error.
pub(crate) fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// All matches for `selector`; a miss is an empty vector.
pub(crate) fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let mut out = Vec::new();
    if let Ok(list) = doc.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.get(i)
                && let Ok(el) = node.dyn_into::<Element>()
            {
                out.push(el);
            }
        }
    }
    out
}

/// All matches that are HTML elements (carry an inline style).
pub(crate) fn query_all_html(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(doc, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub(crate) fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub(crate) fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub(crate) fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub(crate) fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub(crate) fn set_transform(el: &HtmlElement, transform: &Transform) {
    set_style(el, "transform", &transform.to_css());
}

/// Append a `<style>` with `css` to `<head>`; returns the node so the
/// caller can remove it on teardown.
pub(crate) fn inject_style(doc: &Document, css: &str) -> Result<Element, JsValue> {
    let style = doc.create_element("style")?;
    style.set_text_content(Some(css));
    doc.head()
        .ok_or_else(|| JsValue::from_str("document has no head"))?
        .append_child(&style)?;
    Ok(style)
}

/// Animated scroll to a vertical document offset.
pub(crate) fn scroll_to_smooth(win: &Window, top: f64) {
    let options = web_sys::ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

/// Current vertical scroll offset.
pub(crate) fn scroll_offset(win: &Window) -> f64 {
    win.page_y_offset().unwrap_or(0.0)
}

/// Scrollable range: document height minus viewport height. May be zero
/// or negative on short pages; the progress math guards that.
pub(crate) fn max_scroll(win: &Window, doc: &Document) -> f64 {
    let doc_height = doc
        .document_element()
        .map(|el| f64::from(el.scroll_height()))
        .unwrap_or(0.0);
    let viewport = win
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    doc_height - viewport
}

/// Whether the environment has hover plus a fine pointer.
///
/// A failed or unsupported media query counts as "no hover", matching
/// how touch-first browsers answer it.
pub(crate) fn supports_hover(win: &Window, query: &str) -> bool {
    win.match_media(query)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches())
}
