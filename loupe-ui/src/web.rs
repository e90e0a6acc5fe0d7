//! Browser host
//!
//! [`WebHost`] drives a real document through `web-sys`. Listeners are
//! [`EventListener`] guards and timers are `gloo-timers` timeouts, both of
//! which clean up on drop.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use loupe_common::LightboxConfig;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::LightboxError;
use crate::host::{ClickHandler, DomHost, KeyHandler, Task};
use crate::wasm_utils::EventListener;
use crate::widget::Lightbox;

thread_local! {
    /// Widgets installed for the page lifetime
    static INSTALLED: RefCell<Vec<Lightbox<WebHost>>> = const { RefCell::new(Vec::new()) };
}

fn js_error(value: JsValue) -> LightboxError {
    LightboxError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

pub struct WebHost {
    document: web_sys::Document,
}

impl WebHost {
    pub fn new() -> Result<Self, LightboxError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(LightboxError::NoDocument)?;
        Ok(Self { document })
    }
}

impl DomHost for WebHost {
    type Node = web_sys::Element;
    type Listener = EventListener;
    type Timer = Timeout;

    fn create_element(&self, tag: &str) -> Result<web_sys::Element, LightboxError> {
        self.document.create_element(tag).map_err(js_error)
    }

    fn append_child(
        &self,
        parent: &web_sys::Element,
        child: &web_sys::Element,
    ) -> Result<(), LightboxError> {
        parent.append_child(child).map(|_| ()).map_err(js_error)
    }

    fn remove(&self, node: &web_sys::Element) {
        node.remove();
    }

    fn mount_root(&self) -> Option<web_sys::Element> {
        self.document.body().map(Into::into)
    }

    fn element_by_id(&self, id: &str) -> Option<web_sys::Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&web_sys::Element>, selector: &str) -> Vec<web_sys::Element> {
        let list = match scope {
            Some(scope) => scope.query_selector_all(selector),
            None => self.document.query_selector_all(selector),
        };
        match list {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
                .collect(),
            Err(e) => {
                warn!("Invalid selector {:?}: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn attribute(&self, node: &web_sys::Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &web_sys::Element, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn remove_attribute(&self, node: &web_sys::Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn add_class(&self, node: &web_sys::Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn set_style(&self, node: &web_sys::Element, property: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element.style().set_property(property, value);
        }
    }

    fn set_text(&self, node: &web_sys::Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn focus(&self, node: &web_sys::Element) {
        if let Some(element) = node.dyn_ref::<web_sys::HtmlElement>() {
            let _ = element.focus();
        }
    }

    fn on_click(&self, node: &web_sys::Element, mut handler: ClickHandler) -> EventListener {
        EventListener::new(node.clone().into(), "click", move |_| handler())
    }

    fn on_keydown(&self, mut handler: KeyHandler) -> EventListener {
        EventListener::new(self.document.clone().into(), "keydown", move |event| {
            let Some(keyboard) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if handler(&keyboard.key()) {
                event.prevent_default();
            }
        })
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) -> Timeout {
        Timeout::new(delay_ms, task)
    }
}

/// Wire thumbnails below the element with id `container_id`.
///
/// The caller owns the returned widget; dropping it unwires everything.
pub fn attach_within(
    container_id: &str,
    config: LightboxConfig,
) -> Result<Lightbox<WebHost>, LightboxError> {
    let host = WebHost::new()?;
    let scope = host
        .element_by_id(container_id)
        .ok_or_else(|| LightboxError::MissingRoot(container_id.to_string()))?;
    Lightbox::attach_within(host, &scope, config)
}

/// Wire every matching thumbnail in the document and keep the widget for the page lifetime.
pub fn install(config: LightboxConfig) -> Result<Lightbox<WebHost>, LightboxError> {
    let lightbox = Lightbox::attach(WebHost::new()?, config)?;
    debug!("Installed {:?}", lightbox);
    INSTALLED.with(|installed| installed.borrow_mut().push(lightbox.clone()));
    Ok(lightbox)
}

/// Entry point for plain HTML pages: `installLightbox()` or
/// `installLightbox('{"transition_ms": 200}')`.
#[wasm_bindgen(js_name = installLightbox)]
pub fn install_from_js(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => {
            LightboxConfig::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?
        }
        None => LightboxConfig::default(),
    };
    install(config)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
