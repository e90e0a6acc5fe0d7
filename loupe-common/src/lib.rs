//! loupe-common - DOM-free building blocks for the loupe lightbox
//!
//! Holds the gallery index, the navigation cursor state machine and the
//! widget configuration. Nothing in here touches the browser, so the
//! decision logic can be tested on any target.

mod config;
mod gallery;
mod navigator;

pub use config::{ConfigError, LightboxConfig};
pub use gallery::{Gallery, GalleryItem};
pub use navigator::{LightboxState, NavigationError, Navigator, OpenAction};
