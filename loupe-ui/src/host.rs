//! DOM host seam
//!
//! The lightbox never talks to `web-sys` directly. Everything it needs from a
//! document goes through [`DomHost`], which has a browser implementation
//! ([`crate::web::WebHost`], wasm32 only) and a headless one
//! ([`crate::memory::MemoryHost`]).
//!
//! Listener and timer handles follow the RAII pattern from
//! [`crate::wasm_utils`]: dropping a `Listener` detaches it, dropping a `Timer`
//! cancels it if it has not fired yet.

use crate::error::LightboxError;

/// Boxed click handler
pub type ClickHandler = Box<dyn FnMut()>;

/// Boxed keydown handler. Receives the `KeyboardEvent.key` value and returns
/// `true` when the key was handled (the host then prevents the default action).
pub type KeyHandler = Box<dyn FnMut(&str) -> bool>;

/// Boxed deferred task
pub type Task = Box<dyn FnOnce()>;

pub trait DomHost: 'static {
    type Node: Clone + 'static;
    /// Registered event listener; removed on drop
    type Listener: 'static;
    /// Pending timeout; cancelled on drop
    type Timer: 'static;

    fn create_element(&self, tag: &str) -> Result<Self::Node, LightboxError>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), LightboxError>;
    /// Remove `node` and its subtree from the document and release them.
    /// The node must not be used afterwards.
    fn remove(&self, node: &Self::Node);

    /// Default mount point for overlays (`document.body`)
    fn mount_root(&self) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Elements matching `selector`, in document order, below `scope` or the whole document.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &str) -> Vec<Self::Node>;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn set_text(&self, node: &Self::Node, text: &str);
    fn focus(&self, node: &Self::Node);

    fn on_click(&self, node: &Self::Node, handler: ClickHandler) -> Self::Listener;
    /// Document-level keydown listener
    fn on_keydown(&self, handler: KeyHandler) -> Self::Listener;
    fn set_timeout(&self, delay_ms: u32, task: Task) -> Self::Timer;
}
