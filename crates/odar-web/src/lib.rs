#![cfg(target_arch = "wasm32")]
mod dom;
mod events;
mod frame;
mod input;
mod label;
mod overlay;
mod panel;
mod render;

use odar_core::mesh::bake_device;
use odar_core::{
    InputEvent, ViewPreset, Viewer, ViewerConfig, DEFAULT_CONTAINER_ID, LABEL_TEXT,
    LOADED_NOTICE_BODY, LOADED_NOTICE_TITLE,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static AUTO_MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("odar-web starting");

    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    if let Err(e) = panel::render_info_panel(&document) {
        log::error!("[panel] info panel error: {:?}", e);
    }
    if document.get_element_by_id(DEFAULT_CONTAINER_ID).is_none() {
        log::info!("no #{} on page; waiting for mount_viewer", DEFAULT_CONTAINER_ID);
        return Ok(());
    }
    spawn_local(async move {
        match mount(DEFAULT_CONTAINER_ID, ViewerConfig::default(), true).await {
            Ok(mounted) => AUTO_MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted)),
            Err(e) => log::error!("init error: {:?}", e),
        }
    });
    Ok(())
}

/// Mount a viewer into the element with id `container_id`.
#[wasm_bindgen]
pub async fn mount_viewer(container_id: String) -> Result<ViewerHandle, JsValue> {
    let mounted = mount(&container_id, ViewerConfig::default(), false)
        .await
        .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
    Ok(ViewerHandle {
        inner: Some(mounted),
    })
}

#[wasm_bindgen]
pub struct ViewerHandle {
    inner: Option<Mounted>,
}

#[wasm_bindgen]
impl ViewerHandle {
    /// Frame the camera on one of `isometric`, `front`, `top` or `side`.
    pub fn select_view(&self, id: &str) -> Result<(), JsValue> {
        let mounted = self
            .inner
            .as_ref()
            .ok_or_else(|| JsValue::from_str("viewer is unmounted"))?;
        let preset: ViewPreset = id.parse().map_err(|e: odar_core::ViewerError| {
            JsValue::from_str(&e.to_string())
        })?;
        mounted.select_view(preset);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.inner.is_some()
    }

    pub fn unmount(&mut self) {
        if let Some(mounted) = self.inner.take() {
            drop(mounted);
        }
    }
}

/// Everything one live viewer owns in the page. Dropping it tears the viewer down.
struct Mounted {
    viewer: Rc<RefCell<Viewer>>,
    container: web::Element,
    canvas: web::HtmlCanvasElement,
    listeners: events::ListenerSet,
    frame_loop: frame::FrameLoop,
    loaded_notice: Option<overlay::Timeout>,
}

impl Mounted {
    fn select_view(&self, preset: ViewPreset) {
        match self.viewer.try_borrow_mut() {
            Ok(mut viewer) => {
                viewer.handle(InputEvent::SelectView(preset));
            }
            Err(_) => {
                log::warn!("[viewer] busy, ignored view change to {}", preset);
                return;
            }
        }
        if let Some(document) = dom::window_document() {
            panel::set_view_indicator(&document, preset);
        }
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.listeners.detach_all();
        self.frame_loop.cancel();
        self.loaded_notice.take();
        if let Ok(mut viewer) = self.viewer.try_borrow_mut() {
            viewer.dispose();
        }
        overlay::clear(&self.container);
        self.canvas.remove();
        log::info!("[viewer] unmounted");
    }
}

async fn mount(container_id: &str, config: ViewerConfig, page_controls: bool) -> anyhow::Result<Mounted> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?;
    config.validate()?;
    let (delay_ms, duration_ms) = (config.loaded_notice_delay_ms, config.loaded_notice_duration_ms);

    overlay::show_loading(&document, &container)?;
    let canvas = dom::create_canvas(&document, &container)?;
    let (width, height) = dom::sync_canvas_backing_size(&container, &canvas);
    let viewer = Viewer::new(config, width, height)?;
    let mesh = bake_device(viewer.scene());

    let gpu = match setup_gpu(&document, &canvas, &mesh).await {
        Ok(gpu) => gpu,
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            canvas.remove();
            overlay::show_error(&document, &container, &format!("{:#}", e));
            return Err(e);
        }
    };

    let viewer = Rc::new(RefCell::new(viewer));
    let mut listeners = events::ListenerSet::new();
    let wiring = events::InputWiring {
        viewer: viewer.clone(),
        window: window.clone(),
        container: container.clone(),
        canvas: canvas.clone(),
    };
    events::wire_input_handlers(&wiring, &mut listeners)?;
    if page_controls {
        panel::wire_view_controls(&document, &viewer, &mut listeners)?;
    }

    let frame_loop = frame::FrameLoop::start(frame::FrameContext::new(viewer.clone(), gpu));

    let notice_container = container.clone();
    let loaded_notice = overlay::Timeout::new(delay_ms, move || {
        overlay::hide_loading(&notice_container);
        if let Some(document) = dom::window_document() {
            if let Err(e) =
                overlay::show_toast(&document, LOADED_NOTICE_TITLE, LOADED_NOTICE_BODY, duration_ms)
            {
                log::warn!("[viewer] toast error: {:?}", e);
            }
        }
    })?;

    log::info!("[viewer] mounted into #{} at {}x{}", container_id, width, height);
    Ok(Mounted {
        viewer,
        container,
        canvas,
        listeners,
        frame_loop,
        loaded_notice: Some(loaded_notice),
    })
}

async fn setup_gpu(
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    mesh: &odar_core::mesh::BakedMesh,
) -> anyhow::Result<render::GpuState> {
    let label = label::rasterize(document, LABEL_TEXT)?;
    render::GpuState::new(canvas, mesh, &label).await
}
