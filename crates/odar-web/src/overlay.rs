use crate::dom::{create_element, js_err};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const LOADING_CLASS: &str = "odar-loading";
const ERROR_CLASS: &str = "odar-error";
const TOAST_HOST_ID: &str = "odar-toasts";

const OVERLAY_STYLE: &str = "position:absolute;inset:0;display:flex;flex-direction:column;\
align-items:center;justify-content:center;background:rgba(247,250,252,0.9);\
font-family:sans-serif;color:#2d3748;";

/// One-shot `setTimeout` that is cleared if dropped before it fires.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(ms: u32, f: impl FnOnce() + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut f = Some(f);
        let closure = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                ms as i32,
            )
            .map_err(js_err)?;
        Ok(Self {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

fn ensure_positioned(container: &web::Element) {
    let positioned = web::window()
        .and_then(|w| w.get_computed_style(container).ok().flatten())
        .and_then(|s| s.get_property_value("position").ok())
        .map(|p| p != "static")
        .unwrap_or(false);
    if !positioned {
        if let Some(el) = container.dyn_ref::<web::HtmlElement>() {
            _ = el.style().set_property("position", "relative");
        }
    }
}

fn remove_by_class(container: &web::Element, class: &str) {
    let found = container.get_elements_by_class_name(class);
    while let Some(el) = found.item(0) {
        el.remove();
    }
}

pub fn show_loading(document: &web::Document, container: &web::Element) -> anyhow::Result<()> {
    ensure_positioned(container);
    remove_by_class(container, LOADING_CLASS);
    let overlay = create_element(document, "div", LOADING_CLASS)?;
    _ = overlay.set_attribute("style", OVERLAY_STYLE);
    overlay.set_text_content(Some("Loading 3D Model..."));
    container.append_child(&overlay).map_err(js_err)?;
    Ok(())
}

#[inline]
pub fn hide_loading(container: &web::Element) {
    remove_by_class(container, LOADING_CLASS);
}

/// Replace the loading overlay with a visible failure message.
pub fn show_error(document: &web::Document, container: &web::Element, message: &str) {
    hide_loading(container);
    remove_by_class(container, ERROR_CLASS);
    let Ok(overlay) = create_element(document, "div", ERROR_CLASS) else {
        return;
    };
    _ = overlay.set_attribute("style", &format!("{}color:#c53030;", OVERLAY_STYLE));
    if let (Ok(title), Ok(detail)) = (
        create_element(document, "strong", ""),
        create_element(document, "span", ""),
    ) {
        title.set_text_content(Some("3D view unavailable"));
        detail.set_text_content(Some(message));
        _ = overlay.append_child(&title);
        _ = overlay.append_child(&detail);
    }
    _ = container.append_child(&overlay);
}

pub fn clear(container: &web::Element) {
    remove_by_class(container, LOADING_CLASS);
    remove_by_class(container, ERROR_CLASS);
}

fn toast_host(document: &web::Document) -> anyhow::Result<web::Element> {
    if let Some(host) = document.get_element_by_id(TOAST_HOST_ID) {
        return Ok(host);
    }
    let host = create_element(document, "div", "")?;
    host.set_id(TOAST_HOST_ID);
    _ = host.set_attribute(
        "style",
        "position:fixed;right:16px;bottom:16px;z-index:1000;display:flex;flex-direction:column;gap:8px;",
    );
    document
        .body()
        .ok_or_else(|| anyhow::anyhow!("no body"))?
        .append_child(&host)
        .map_err(js_err)?;
    Ok(host)
}

/// Show a toast that removes itself after `duration_ms`. Not tied to any viewer.
pub fn show_toast(
    document: &web::Document,
    title: &str,
    body: &str,
    duration_ms: u32,
) -> anyhow::Result<()> {
    let toast = create_element(document, "div", "odar-toast")?;
    _ = toast.set_attribute(
        "style",
        "background:#fff;border-left:4px solid #4FC3F7;box-shadow:0 2px 8px rgba(0,0,0,0.15);\
padding:12px 16px;font-family:sans-serif;max-width:320px;",
    );
    let heading = create_element(document, "strong", "")?;
    heading.set_text_content(Some(title));
    let text = create_element(document, "div", "")?;
    text.set_text_content(Some(body));
    toast.append_child(&heading).map_err(js_err)?;
    toast.append_child(&text).map_err(js_err)?;
    toast_host(document)?.append_child(&toast).map_err(js_err)?;

    let dismiss = Closure::once_into_js(move || toast.remove());
    web::window()
        .ok_or_else(|| anyhow::anyhow!("no window"))?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            dismiss.unchecked_ref(),
            duration_ms as i32,
        )
        .map_err(js_err)?;
    Ok(())
}
