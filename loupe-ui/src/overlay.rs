//! Overlay builder
//!
//! Creates the modal subtree for one open lightbox. Construction only: no
//! listeners are registered here and nothing is attached to the document.

use loupe_common::LightboxConfig;

use crate::error::LightboxError;
use crate::host::DomHost;

/// Inline styles that hide the dialog label visually but keep it for screen readers
const VISUALLY_HIDDEN: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("width", "1px"),
    ("height", "1px"),
    ("margin", "-1px"),
    ("clip", "rect(0, 0, 0, 0)"),
    ("overflow", "hidden"),
];

/// Nodes of one overlay instance
#[derive(Debug, Clone)]
pub struct OverlayHandle<N> {
    pub root: N,
    pub container: N,
    pub label: N,
    pub image: N,
    pub previous: N,
    pub next: N,
    pub close: N,
    pub counter: Option<N>,
}

pub fn label_id(id: &str) -> String {
    format!("{id}-label")
}

pub fn image_id(id: &str) -> String {
    format!("{id}-image")
}

/// Build a detached overlay subtree with element id `id`.
pub fn build<H: DomHost>(
    host: &H,
    config: &LightboxConfig,
    id: &str,
) -> Result<OverlayHandle<H::Node>, LightboxError> {
    let root = host.create_element("div")?;
    host.set_attribute(&root, "id", id);
    host.add_class(&root, "lightbox");
    host.set_attribute(&root, "role", "dialog");
    host.set_attribute(&root, "aria-modal", "true");
    host.set_attribute(&root, "aria-labelledby", &label_id(id));
    host.set_attribute(&root, "tabindex", "-1");

    let container = host.create_element("div")?;
    host.add_class(&container, "lightbox__container");

    let label = host.create_element("h2")?;
    host.set_attribute(&label, "id", &label_id(id));
    host.set_text(&label, &config.label);
    for (property, value) in VISUALLY_HIDDEN {
        host.set_style(&label, property, value);
    }

    let close = control(host, "lightbox__close", &config.close_label, "×")?;

    let navigation = host.create_element("div")?;
    host.add_class(&navigation, "lightbox__navigation");
    let previous = control(host, "lightbox__prev", &config.previous_label, "‹")?;
    let next = control(host, "lightbox__next", &config.next_label, "›")?;
    host.append_child(&navigation, &previous)?;
    host.append_child(&navigation, &next)?;

    let image_slot = host.create_element("div")?;
    host.add_class(&image_slot, "lightbox__image");
    let image = host.create_element("img")?;
    host.set_attribute(&image, "id", &image_id(id));
    host.set_attribute(&image, "alt", "");
    host.set_attribute(&image, "tabindex", "0");
    host.append_child(&image_slot, &image)?;

    host.append_child(&container, &label)?;
    host.append_child(&container, &close)?;
    host.append_child(&container, &navigation)?;
    host.append_child(&container, &image_slot)?;

    let counter = if config.show_counter {
        let counter = host.create_element("span")?;
        host.add_class(&counter, "lightbox__counter");
        host.set_attribute(&counter, "aria-live", "polite");
        host.append_child(&container, &counter)?;
        Some(counter)
    } else {
        None
    };

    host.append_child(&root, &container)?;

    Ok(OverlayHandle {
        root,
        container,
        label,
        image,
        previous,
        next,
        close,
        counter,
    })
}

/// Icon button with an accessible label
fn control<H: DomHost>(
    host: &H,
    class: &str,
    aria_label: &str,
    glyph: &str,
) -> Result<H::Node, LightboxError> {
    let button = host.create_element("button")?;
    host.set_attribute(&button, "type", "button");
    host.add_class(&button, class);
    host.set_attribute(&button, "aria-label", aria_label);

    let icon = host.create_element("span")?;
    host.add_class(&icon, "lightbox__icon");
    host.set_attribute(&icon, "aria-hidden", "true");
    host.set_text(&icon, glyph);
    host.append_child(&button, &icon)?;

    Ok(button)
}
