//! Page furniture around the viewer: the device info tabs and the view preset buttons.

use crate::dom::{self, create_element, js_err};
use crate::events::ListenerSet;
use odar_core::info::{Feature, InfoTab, SpecRow, TabBody, INFO_TABS};
use odar_core::{InputEvent, ViewPreset, Viewer};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub const INFO_PANEL_ID: &str = "odar-info";
pub const VIEW_CONTROLS_ID: &str = "odar-view-controls";
pub const VIEW_INDICATOR_ID: &str = "odar-view-indicator";

const TAB_ACTIVE_STYLE: &str = "font-weight:bold;border-bottom:2px solid #4FC3F7;";
const TAB_IDLE_STYLE: &str = "font-weight:normal;border-bottom:2px solid transparent;";

fn spec_table(document: &web::Document, rows: &[SpecRow]) -> anyhow::Result<web::Element> {
    let table = create_element(document, "table", "odar-specs")?;
    for row in rows {
        let tr = create_element(document, "tr", "")?;
        let th = create_element(document, "th", "")?;
        th.set_text_content(Some(row.label));
        let td = create_element(document, "td", "")?;
        td.set_text_content(Some(row.value));
        tr.append_child(&th).map_err(js_err)?;
        tr.append_child(&td).map_err(js_err)?;
        table.append_child(&tr).map_err(js_err)?;
    }
    Ok(table)
}

fn feature_list(document: &web::Document, features: &[Feature]) -> anyhow::Result<web::Element> {
    let list = create_element(document, "ul", "odar-features")?;
    for f in features {
        let class = if f.highlight {
            "odar-feature odar-feature-highlight"
        } else {
            "odar-feature"
        };
        let li = create_element(document, "li", class)?;
        let title = create_element(document, "strong", "")?;
        title.set_text_content(Some(f.title));
        let desc = create_element(document, "p", "")?;
        desc.set_text_content(Some(f.description));
        li.append_child(&title).map_err(js_err)?;
        li.append_child(&desc).map_err(js_err)?;
        list.append_child(&li).map_err(js_err)?;
    }
    Ok(list)
}

fn tab_content(document: &web::Document, tab: &InfoTab) -> anyhow::Result<web::Element> {
    let section = create_element(document, "section", "odar-tab-content")?;
    _ = section.set_attribute("data-tab", tab.id);
    let heading = create_element(document, "h3", "")?;
    heading.set_text_content(Some(tab.heading));
    let desc = create_element(document, "p", "")?;
    desc.set_text_content(Some(tab.description));
    section.append_child(&heading).map_err(js_err)?;
    section.append_child(&desc).map_err(js_err)?;
    let body = match tab.body {
        TabBody::Specs(rows) => spec_table(document, rows)?,
        TabBody::Features(features) => feature_list(document, features)?,
    };
    section.append_child(&body).map_err(js_err)?;
    Ok(section)
}

fn activate_tab(buttons: &[web::Element], sections: &[web::Element], index: usize) {
    for (i, (button, section)) in buttons.iter().zip(sections).enumerate() {
        let active = i == index;
        _ = button.set_attribute("style", if active { TAB_ACTIVE_STYLE } else { TAB_IDLE_STYLE });
        _ = button.set_attribute("aria-selected", if active { "true" } else { "false" });
        _ = section.set_attribute("style", if active { "" } else { "display:none" });
    }
}

/// Fill `#odar-info` with the device tabs. No-op when the page has no panel.
pub fn render_info_panel(document: &web::Document) -> anyhow::Result<()> {
    let Some(host) = document.get_element_by_id(INFO_PANEL_ID) else {
        return Ok(());
    };
    host.set_text_content(None);
    let nav = create_element(document, "nav", "odar-tabs")?;
    host.append_child(&nav).map_err(js_err)?;

    let mut buttons = Vec::with_capacity(INFO_TABS.len());
    let mut sections = Vec::with_capacity(INFO_TABS.len());
    for tab in INFO_TABS.iter() {
        let button = create_element(document, "button", "odar-tab")?;
        _ = button.set_attribute("type", "button");
        button.set_text_content(Some(tab.title));
        nav.append_child(&button).map_err(js_err)?;
        let section = tab_content(document, tab)?;
        host.append_child(&section).map_err(js_err)?;
        buttons.push(button);
        sections.push(section);
    }
    activate_tab(&buttons, &sections, 0);

    let buttons = Rc::new(buttons);
    let sections = Rc::new(sections);
    for (i, button) in buttons.iter().enumerate() {
        let (b, s) = (buttons.clone(), sections.clone());
        dom::add_click_listener(button, move || activate_tab(&b, &s, i));
    }
    log::info!("[panel] rendered {} info tabs", INFO_TABS.len());
    Ok(())
}

pub fn set_view_indicator(document: &web::Document, preset: ViewPreset) {
    if let Some(el) = document.get_element_by_id(VIEW_INDICATOR_ID) {
        el.set_text_content(Some(preset.label()));
    }
}

/// Build the preset buttons in `#odar-view-controls`, wired to `viewer`.
///
/// Listeners go into `set` so they are detached with the viewer.
pub fn wire_view_controls(
    document: &web::Document,
    viewer: &Rc<RefCell<Viewer>>,
    set: &mut ListenerSet,
) -> anyhow::Result<()> {
    let Some(host) = document.get_element_by_id(VIEW_CONTROLS_ID) else {
        return Ok(());
    };
    host.set_text_content(None);
    for preset in ViewPreset::ALL {
        let button = create_element(document, "button", "odar-view-button")?;
        _ = button.set_attribute("type", "button");
        _ = button.set_attribute("data-view", preset.id());
        button.set_text_content(Some(preset.label()));
        host.append_child(&button).map_err(js_err)?;

        let viewer = viewer.clone();
        let document = document.clone();
        set.listen(button.as_ref(), "click", move |_: web::MouseEvent| {
            if let Ok(mut v) = viewer.try_borrow_mut() {
                v.handle(InputEvent::SelectView(preset));
                set_view_indicator(&document, preset);
            }
        })?;
    }
    set_view_indicator(document, viewer.borrow().camera().preset);
    Ok(())
}
