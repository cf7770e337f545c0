use crate::dom::js_err;
use odar_core::{LABEL_COLOR, LABEL_FONT, LABEL_TEXTURE_SIZE};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Straight-alpha RGBA8 pixels, row-major from the top-left.
pub struct LabelImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Draw `text` centred on a transparent offscreen canvas and read the pixels back.
pub fn rasterize(document: &web::Document, text: &str) -> anyhow::Result<LabelImage> {
    let [width, height] = LABEL_TEXTURE_SIZE;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    ctx.set_font(LABEL_FONT);
    ctx.set_fill_style_str(LABEL_COLOR);
    ctx.set_text_align("center");
    ctx.fill_text(text, width as f64 / 2.0, height as f64 / 2.0)
        .map_err(js_err)?;

    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(js_err)?;
    let rgba = data.data().0;
    if rgba.len() != (width * height * 4) as usize {
        anyhow::bail!("label readback returned {} bytes", rgba.len());
    }
    log::info!("[label] rasterized {:?} at {}x{}", text, width, height);
    Ok(LabelImage {
        width,
        height,
        rgba,
    })
}
