//! Dioxus components

pub mod lightbox_gallery;

pub use lightbox_gallery::{GalleryImage, LightboxGallery};
