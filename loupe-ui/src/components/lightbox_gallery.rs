//! Lightbox gallery component
//!
//! Renders a thumbnail grid and wires a [`crate::Lightbox`] to it once the
//! thumbnails are in the document. The widget is kept in a signal for the
//! lifetime of the component, so its listeners go away on unmount.

use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::prelude::*;
use loupe_common::LightboxConfig;

/// Counter for generating unique gallery container IDs
static GALLERY_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Attribute the rendered thumbnails carry their full-size URL in
const SOURCE_ATTRIBUTE: &str = "data-lightbox";

/// A thumbnail in a [`LightboxGallery`]
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryImage {
    pub thumbnail_url: String,
    pub full_url: String,
    pub alt: String,
}

#[cfg(target_arch = "wasm32")]
type AttachedLightbox = crate::Lightbox<crate::web::WebHost>;

#[cfg(not(target_arch = "wasm32"))]
type AttachedLightbox = ();

#[cfg(target_arch = "wasm32")]
fn attach(container_id: &str, config: LightboxConfig) -> Option<AttachedLightbox> {
    match crate::web::attach_within(container_id, config) {
        Ok(lightbox) => Some(lightbox),
        Err(e) => {
            tracing::warn!("Failed to attach lightbox to #{}: {}", container_id, e);
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn attach(container_id: &str, _config: LightboxConfig) -> Option<AttachedLightbox> {
    tracing::debug!("Skipping lightbox wiring for #{}: no browser document", container_id);
    None
}

/// `config` with the selector and source attribute of the rendered markup
fn wiring_config(config: LightboxConfig) -> LightboxConfig {
    LightboxConfig {
        selector: format!("img[{}]", SOURCE_ATTRIBUTE),
        source_attribute: SOURCE_ATTRIBUTE.to_string(),
        ..config
    }
}

/// Thumbnail grid that opens a lightbox on click.
///
/// `config.selector` and `config.source_attribute` are ignored: the component
/// renders its own `img[data-lightbox]` markup and always matches that.
#[component]
pub fn LightboxGallery(
    images: Vec<GalleryImage>,
    #[props(default)] config: LightboxConfig,
    #[props(default)] class: Option<String>,
) -> Element {
    let container_id = use_hook(|| {
        let id = GALLERY_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("loupe-gallery-{}", id)
    });
    let container_id_for_effect = container_id.clone();

    let config = wiring_config(config);

    let mut items = use_signal(|| images.clone());
    let mut settings = use_signal(|| config.clone());
    let mut attached = use_signal(|| None::<AttachedLightbox>);

    // Sync with the props so the effect re-wires on change
    if *items.peek() != images {
        items.set(images.clone());
    }
    if *settings.peek() != config {
        settings.set(config);
    }

    use_effect(move || {
        let count = items.read().len();
        let config = settings.read().clone();
        // Drop the old widget first so its overlay and listeners are gone
        // before the new one collects thumbnails.
        attached.set(None);
        if count == 0 {
            return;
        }
        attached.set(attach(&container_id_for_effect, config));
    });

    let grid_class = class.unwrap_or_default();

    rsx! {
        div { id: "{container_id}", class: "lightbox-gallery {grid_class}",
            for (i , image) in items.read().iter().enumerate() {
                img {
                    key: "{image.full_url}-{i}",
                    class: "lightbox-gallery__thumbnail",
                    src: "{image.thumbnail_url}",
                    alt: "{image.alt}",
                    "data-lightbox": "{image.full_url}",
                }
            }
        }
    }
}
