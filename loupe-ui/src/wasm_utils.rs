//! WASM utilities for browser interop
//!
//! # Event Listener Cleanup Pattern
//!
//! In Rust/WASM, when you attach a JavaScript event listener using a `Closure`,
//! you need to ensure the closure lives as long as the listener is attached.
//! The naive approach is `closure.forget()`, but this leaks memory and leaves
//! the listener attached forever.
//!
//! Instead the closure is stored in a struct that implements `Drop`, removing
//! the listener when the struct is dropped. This ties the listener lifetime to
//! Rust's ownership system:
//!
//! ```ignore
//! // Listener is attached when EventListener is created
//! let listener = EventListener::new(button.into(), "click", callback);
//!
//! // Listener is automatically removed when `listener` goes out of scope or is dropped
//! drop(listener);
//! ```
//!
//! The lightbox keeps thumbnail listeners for its whole lifetime and overlay
//! listeners only while the overlay is mounted.

use wasm_bindgen::prelude::*;

/// An event listener that automatically removes itself when dropped.
pub struct EventListener {
    target: web_sys::EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListener {
    /// Attaches an event listener to `target`.
    ///
    /// The listener is automatically removed when this struct is dropped.
    pub fn new(
        target: web_sys::EventTarget,
        event_name: &'static str,
        callback: impl FnMut(web_sys::Event) + 'static,
    ) -> Self {
        let callback: Closure<dyn FnMut(web_sys::Event)> = Closure::wrap(Box::new(callback));

        target
            .add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())
            .ok();

        Self {
            target,
            event_name,
            callback,
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}
