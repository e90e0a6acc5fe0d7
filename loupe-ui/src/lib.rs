//! loupe-ui - Image lightbox for the browser
//!
//! Contains the lightbox widget, the DOM host seam it runs on, the browser and
//! headless hosts, and a Dioxus component that renders a thumbnail grid wired
//! to a lightbox.

pub mod components;
pub mod error;
pub mod host;
pub mod memory;
pub mod overlay;
pub mod wasm_utils;
#[cfg(target_arch = "wasm32")]
pub mod web;
pub mod widget;

pub use components::*;
pub use error::LightboxError;
pub use host::DomHost;
pub use loupe_common::{Gallery, GalleryItem, LightboxConfig, LightboxState};
pub use memory::{MemoryHost, NodeId};
pub use overlay::OverlayHandle;
pub use widget::{Lightbox, WeakLightbox};
