use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Page-level click handler that lives as long as the page.
pub fn add_click_listener(element: &web::Element, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    _ = element.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn create_element(document: &web::Document, tag: &str, class: &str) -> anyhow::Result<web::Element> {
    let el = document.create_element(tag).map_err(js_err)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

/// Append a canvas that fills `container` and will receive the WebGPU surface.
pub fn create_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = create_element(document, "canvas", "odar-canvas")?
        .dyn_into()
        .map_err(|e| anyhow!("{:?}", e))?;
    // touch-action none keeps the browser from scrolling while the model is dragged
    _ = canvas.set_attribute(
        "style",
        "display:block;width:100%;height:100%;touch-action:none;",
    );
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

/// Match the canvas backing store to the container's CSS size * devicePixelRatio.
///
/// Returns the new backing size in physical pixels.
pub fn sync_canvas_backing_size(
    container: &web::Element,
    canvas: &web::HtmlCanvasElement,
) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = container.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}
