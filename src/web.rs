//! Browser binding.
//!
//! [`WebPage`] implements [`Page`] over the live DOM, and [`mount`] wires a
//! [`PageController`] to the window's events:
//!
//! - click on a TOC link → animated scroll, driven by `requestAnimationFrame`
//! - `scroll` → active entry tracking
//! - `resize`, every `<img>` `load`, and DOM ready → section fitting
//!
//! Listeners live for the lifetime of the page and are never removed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::config::NavConfig;
use crate::controller::PageController;
use crate::error::NavError;
use crate::page::{Heading, NavEntry, Page, SectionBox, Viewport};

type SharedController = Rc<RefCell<PageController<WebPage>>>;

// ---------------------------------------------------------------------------
// JS interop
// ---------------------------------------------------------------------------

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        let js_error = js_sys::Error::new(&err.to_string());
        js_sys::Reflect::set(&js_error, &"code".into(), &JsValue::from_str(err.code())).ok();
        js_error.into()
    }
}

fn dom_err(value: JsValue) -> NavError {
    NavError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

/// Module start: panic messages and `log` output go to the console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Info).ok();
    }
}

/// Derive the anchor slug for a heading text.
#[wasm_bindgen(js_name = slugify)]
pub fn slugify_js(text: &str) -> String {
    crate::slug::slugify(text)
}

/// Build the TOC and install the page listeners.
///
/// `config` may be `undefined`, a configuration object, or a JSON string.
/// When the document is still loading, setup is deferred to
/// `DOMContentLoaded`.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue> {
    let config = parse_config(config)?;
    let window = web_sys::window().ok_or_else(|| NavError::Dom("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| NavError::Dom("window has no document".into()))?;

    if document.ready_state() == "loading" {
        log::debug!("[mount] deferred until DOMContentLoaded");
        let on_ready = Closure::once(move || {
            if let Err(err) = attach(window, config) {
                log::warn!("[mount] failed: {err}");
            }
        });
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        on_ready.forget();
        return Ok(());
    }

    attach(window, config).map_err(Into::into)
}

fn parse_config(value: JsValue) -> Result<NavConfig, NavError> {
    if value.is_undefined() || value.is_null() {
        return Ok(NavConfig::default());
    }
    if let Some(json) = value.as_string() {
        return NavConfig::from_json(&json);
    }
    let config: NavConfig =
        serde_wasm_bindgen::from_value(value).map_err(|e| NavError::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Event wiring
// ---------------------------------------------------------------------------

/// Drives the controller's scroll animation one frame at a time.
struct Animator {
    window: Window,
    nav: SharedController,
    running: Cell<bool>,
    tick: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl Animator {
    fn new(window: Window, nav: SharedController) -> Rc<Self> {
        let animator = Rc::new(Self {
            window,
            nav,
            running: Cell::new(false),
            tick: RefCell::new(None),
        });
        // The closure keeps the animator alive; both live as long as the page.
        let this = animator.clone();
        *animator.tick.borrow_mut() = Some(Closure::new(move |now: f64| {
            let more = match this.nav.try_borrow_mut() {
                Ok(mut nav) => nav.frame(now),
                Err(_) => true,
            };
            if more {
                this.request();
            } else {
                this.running.set(false);
            }
        }));
        animator
    }

    fn start(&self) {
        if !self.running.replace(true) {
            self.request();
        }
    }

    fn request(&self) {
        let tick = self.tick.borrow();
        let Some(tick) = tick.as_ref() else {
            return;
        };
        if let Err(err) = self
            .window
            .request_animation_frame(tick.as_ref().unchecked_ref())
        {
            log::warn!("[route] requestAnimationFrame failed: {}", dom_err(err));
            self.running.set(false);
        }
    }
}

fn now(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: &Closure<dyn FnMut(Event)>,
) -> Result<(), NavError> {
    target
        .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
        .map_err(dom_err)
}

fn attach(window: Window, config: NavConfig) -> Result<(), NavError> {
    let page = WebPage::new(window.clone(), &config)?;
    for selector in page.missing_containers(&config) {
        log::warn!("[mount] no element matches `{selector}`");
    }
    let has_list = page.toc_list.is_some();
    let document = page.document.clone();

    let nav: SharedController = Rc::new(RefCell::new(PageController::new(page, config)));
    let sections = nav.borrow_mut().build();

    let animator = Animator::new(window.clone(), nav.clone());

    // --- entry clicks ---
    let anchors = nav.borrow().page().anchors();
    for (index, anchor) in anchors {
        let nav = nav.clone();
        let animator = animator.clone();
        let window = window.clone();
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let result = nav.borrow_mut().click_entry(index, now(&window));
            match result {
                Ok(_) => {
                    event.prevent_default();
                    animator.start();
                }
                Err(err) => log::warn!("[route] {err}"),
            }
        });
        listen(&anchor, "click", &on_click)?;
        on_click.forget();
    }

    // --- scroll tracking ---
    let on_scroll = {
        let nav = nav.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Ok(mut nav) = nav.try_borrow_mut() {
                nav.scroll();
            }
        })
    };
    listen(&window, "scroll", &on_scroll)?;
    on_scroll.forget();

    // --- section fitting ---
    let on_resize = {
        let nav = nav.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            if let Ok(mut nav) = nav.try_borrow_mut() {
                nav.resize();
            }
        })
    };
    listen(&window, "resize", &on_resize)?;
    let images = query_all(&document, "img")?;
    for image in &images {
        listen(image, "load", &on_resize)?;
    }
    on_resize.forget();

    nav.borrow_mut().resize();

    log::info!(
        "[mount] sections={} images={} list={}",
        sections,
        images.len(),
        has_list
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// WebPage
// ---------------------------------------------------------------------------

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, NavError> {
    if selector.is_empty() {
        return Ok(Vec::new());
    }
    let list = document.query_selector_all(selector).map_err(dom_err)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// Parse a computed CSS length such as `12.5px`; anything else is `0`.
fn px(style: &web_sys::CssStyleDeclaration, property: &str) -> f64 {
    style
        .get_property_value(property)
        .ok()
        .and_then(|v| v.trim().trim_end_matches("px").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// The `<li>` and `<a>` of one navigation entry.
struct EntryNodes {
    item: Element,
    anchor: Element,
}

/// The live document, as seen by the controller.
pub struct WebPage {
    window: Window,
    document: Document,
    headings: Vec<Element>,
    toc_list: Option<Element>,
    /// One slot per appended entry, `None` where the DOM insert failed, so
    /// entry indices stay aligned with section indices.
    entries: Vec<Option<EntryNodes>>,
    section: Option<HtmlElement>,
    /// Padding + border of the section, needed when it uses
    /// `box-sizing: border-box`.
    section_inset: Option<f64>,
    active_class: String,
}

impl WebPage {
    pub fn new(window: Window, config: &NavConfig) -> Result<Self, NavError> {
        let document = window
            .document()
            .ok_or_else(|| NavError::Dom("window has no document".into()))?;
        let headings = query_all(&document, &config.heading_selector())?;
        let toc_list = document
            .query_selector(&config.toc_list_selector)
            .map_err(dom_err)?;
        let section = document
            .query_selector(&config.section_selector)
            .map_err(dom_err)?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            window,
            document,
            headings,
            toc_list,
            entries: Vec::new(),
            section,
            section_inset: None,
            active_class: config.active_class.clone(),
        })
    }

    /// Selectors from `config` whose container is absent from the page.
    pub fn missing_containers<'c>(&self, config: &'c NavConfig) -> Vec<&'c str> {
        let mut missing = Vec::new();
        if self.toc_list.is_none() {
            missing.push(config.toc_list_selector.as_str());
        }
        if self.section.is_none() {
            missing.push(config.section_selector.as_str());
        }
        missing
    }

    /// Link of every entry that made it into the DOM, with its entry index.
    fn anchors(&self) -> Vec<(usize, Element)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (i, n.anchor.clone())))
            .collect()
    }

    fn try_append(&self, list: &Element, entry: &NavEntry) -> Result<EntryNodes, JsValue> {
        let item = self.document.create_element("li")?;
        item.set_class_name(&entry.class);
        let anchor = self.document.create_element("a")?;
        anchor.set_attribute("href", &entry.href)?;
        anchor.set_text_content(Some(&entry.text));
        item.append_child(&anchor)?;
        list.append_child(&item)?;
        Ok(EntryNodes { item, anchor })
    }

    fn document_element(&self) -> Option<Element> {
        self.document.document_element()
    }
}

impl Page for WebPage {
    fn headings(&self) -> Vec<Heading> {
        self.headings
            .iter()
            .map(|el| Heading {
                level: el.tag_name()[1..].parse().unwrap_or(0),
                text: el.text_content().unwrap_or_default(),
            })
            .collect()
    }

    fn set_heading_id(&mut self, index: usize, id: &str) {
        if let Some(el) = self.headings.get(index) {
            el.set_id(id);
        }
    }

    fn append_entry(&mut self, entry: &NavEntry) {
        let Some(list) = self.toc_list.clone() else {
            return;
        };
        let slot = match self.try_append(&list, entry) {
            Ok(nodes) => Some(nodes),
            Err(err) => {
                log::warn!("[toc] append href={} failed: {}", entry.href, dom_err(err));
                None
            }
        };
        self.entries.push(slot);
    }

    fn set_entry_active(&mut self, index: usize, active: bool) {
        let Some(Some(nodes)) = self.entries.get(index) else {
            return;
        };
        let classes = nodes.item.class_list();
        let result = if active {
            classes.add_1(&self.active_class)
        } else {
            classes.remove_1(&self.active_class)
        };
        if let Err(err) = result {
            log::warn!("[toc] class toggle failed: {}", dom_err(err));
        }
    }

    fn offset_of(&self, id: &str) -> Option<f64> {
        let el = self.document.get_element_by_id(id)?;
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        Some(el.get_bounding_client_rect().top() + scroll_y)
    }

    fn viewport(&self) -> Viewport {
        let root = self.document_element();
        let body = self.document.body();

        let height = root
            .as_ref()
            .map(|r| r.client_height() as f64)
            .or_else(|| self.window.inner_height().ok().and_then(|h| h.as_f64()))
            .unwrap_or(0.0);

        // Largest of the candidate document extents, like `$(document).height()`.
        let mut document_height = height;
        if let Some(root) = &root {
            document_height = document_height.max(root.scroll_height() as f64);
            if let Some(root) = root.dyn_ref::<HtmlElement>() {
                document_height = document_height.max(root.offset_height() as f64);
            }
        }
        if let Some(body) = &body {
            document_height = document_height
                .max(body.scroll_height() as f64)
                .max(body.offset_height() as f64);
        }

        Viewport {
            scroll_top: self.window.scroll_y().unwrap_or(0.0),
            height,
            document_height,
        }
    }

    fn set_scroll_top(&mut self, top: f64) {
        let x = self.window.scroll_x().unwrap_or(0.0);
        self.window.scroll_to_with_x_and_y(x, top);
    }

    fn measure_section(&mut self) -> Option<SectionBox> {
        let section = self.section.as_ref()?;
        section.style().set_property("height", "auto").ok()?;

        let style = self.window.get_computed_style(section).ok()??;
        let border_box = section.get_bounding_client_rect().height();
        let margins = px(&style, "margin-top") + px(&style, "margin-bottom");
        let inset = px(&style, "padding-top")
            + px(&style, "padding-bottom")
            + px(&style, "border-top-width")
            + px(&style, "border-bottom-width");

        self.section_inset = (style.get_property_value("box-sizing").ok().as_deref()
            == Some("border-box"))
        .then_some(inset);

        Some(SectionBox {
            outer_height: border_box + margins,
            content_height: border_box - inset,
        })
    }

    fn set_section_height(&mut self, height: Option<f64>) {
        let Some(section) = &self.section else {
            return;
        };
        let value = match height {
            Some(h) => format!("{}px", h + self.section_inset.unwrap_or(0.0)),
            None => "auto".to_owned(),
        };
        if let Err(err) = section.style().set_property("height", &value) {
            log::warn!("[layout] set height failed: {}", dom_err(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn window() -> Window {
        web_sys::window().expect("test runs in a browser window")
    }

    fn page_with(html: &str) -> WebPage {
        let window = window();
        let document = window.document().expect("window has a document");
        document
            .body()
            .expect("document has a body")
            .set_inner_html(html);
        WebPage::new(window, &NavConfig::default()).expect("page binds")
    }

    fn entry(href: &str) -> NavEntry {
        NavEntry {
            class: "tag-h2".into(),
            href: href.into(),
            text: href.trim_start_matches('#').into(),
        }
    }

    #[wasm_bindgen_test]
    fn failed_entry_keeps_later_indices_aligned() {
        let mut page = page_with(r#"<nav id="toc"><ul></ul></nav><section></section>"#);
        page.entries.push(None);
        page.append_entry(&entry("#second"));
        assert_eq!(page.entries.len(), 2);

        page.set_entry_active(0, true);
        page.set_entry_active(1, true);
        let second = page.entries[1].as_ref().expect("second entry was inserted");
        assert!(second.item.class_list().contains("active"));

        let anchors = page.anchors();
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].0, 1, "anchor must keep its entry index");
    }

    #[wasm_bindgen_test]
    fn missing_list_and_section_are_reported() {
        let config = NavConfig::default();
        let page = page_with(r#"<div id="content"><h1>Only</h1></div>"#);
        assert_eq!(page.missing_containers(&config), ["nav#toc ul", "section"]);

        let page = page_with(r#"<nav id="toc"><ul></ul></nav><section></section>"#);
        assert!(page.missing_containers(&config).is_empty());
    }

    #[wasm_bindgen_test]
    fn page_without_list_records_no_entries() {
        let mut page = page_with(r#"<section></section>"#);
        page.append_entry(&entry("#intro"));
        assert!(page.entries.is_empty());
    }
}
