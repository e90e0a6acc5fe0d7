//! Lightbox widget
//!
//! [`Lightbox`] owns one gallery, its navigation cursor and at most one mounted
//! overlay. All state lives in an `Rc<RefCell<_>>`; every DOM handler holds a
//! [`WeakLightbox`], so dropping the last `Lightbox` disarms the handlers and
//! removes any overlay still in the document.
//!
//! Opening runs in two steps: the overlay is appended with `opacity: 0`, then a
//! short timeout sets `opacity: 1` so the stylesheet's transition runs. Closing
//! adds the fade-out class and removes the overlay after `transition_ms`. Both
//! timeouts are stored on the mounted overlay and are cancelled when it is
//! replaced or torn down; callbacks also check the overlay generation and
//! ignore anything stale.
//!
//! Keyboard input goes to one widget at a time: the one whose overlay was
//! opened most recently and is still open.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use loupe_common::{Gallery, LightboxConfig, LightboxState, Navigator, OpenAction};
use tracing::{debug, warn};

use crate::error::LightboxError;
use crate::host::DomHost;
use crate::overlay::{self, OverlayHandle};

/// Counter for generating unique overlay ids across widget instances
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(0);

thread_local! {
    /// Instances with an open overlay, most recently opened last
    static KEYBOARD_OWNERS: RefCell<Vec<u64>> = const { RefCell::new(Vec::new()) };
}

fn claim_keyboard(instance: u64) {
    let _ = KEYBOARD_OWNERS.try_with(|owners| {
        let mut owners = owners.borrow_mut();
        owners.retain(|&owner| owner != instance);
        owners.push(instance);
    });
}

fn release_keyboard(instance: u64) {
    let _ = KEYBOARD_OWNERS.try_with(|owners| {
        owners.borrow_mut().retain(|&owner| owner != instance);
    });
}

fn owns_keyboard(instance: u64) -> bool {
    KEYBOARD_OWNERS
        .try_with(|owners| owners.borrow().last() == Some(&instance))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Mounted, waiting for the reveal timeout
    Entering,
    Shown,
    /// Fading out, waiting for the removal timeout
    Leaving,
}

struct Mounted<H: DomHost> {
    handle: OverlayHandle<H::Node>,
    generation: u64,
    phase: Phase,
    pending: Option<H::Timer>,
    _listeners: Vec<H::Listener>,
}

struct Inner<H: DomHost> {
    host: H,
    mount: H::Node,
    config: LightboxConfig,
    gallery: Gallery,
    navigator: Navigator,
    instance: u64,
    id: String,
    generation: u64,
    overlay: Option<Mounted<H>>,
    thumbnails: Vec<H::Listener>,
}

impl<H: DomHost> Inner<H> {
    /// Remove any mounted overlay right away, cancelling its timers and listeners.
    fn teardown(&mut self) {
        release_keyboard(self.instance);
        if let Some(mounted) = self.overlay.take() {
            debug!(
                "Tearing down lightbox {} (generation {})",
                self.id, mounted.generation
            );
            self.host.remove(&mounted.handle.root);
        }
    }

    /// Sync the overlay with the cursor: image, counter and control states.
    fn render(&self) {
        let (Some(mounted), Some(index)) = (self.overlay.as_ref(), self.navigator.cursor()) else {
            return;
        };
        let Some(item) = self.gallery.get(index) else {
            return;
        };
        let handle = &mounted.handle;

        self.host.set_attribute(&handle.image, "src", &item.image_url);
        self.host.set_attribute(&handle.image, "alt", &item.alt);

        if let Some(counter) = &handle.counter {
            self.host
                .set_text(counter, &format!("{} / {}", index + 1, self.gallery.len()));
        }

        self.set_disabled(&handle.previous, !self.navigator.can_previous());
        self.set_disabled(&handle.next, !self.navigator.can_next());
    }

    fn set_disabled(&self, button: &H::Node, disabled: bool) {
        if disabled {
            self.host.set_attribute(button, "disabled", "");
            self.host.set_attribute(button, "aria-disabled", "true");
        } else {
            self.host.remove_attribute(button, "disabled");
            self.host.remove_attribute(button, "aria-disabled");
        }
    }
}

impl<H: DomHost> Drop for Inner<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Image lightbox bound to one gallery.
///
/// Cheap to clone; clones share the same widget.
pub struct Lightbox<H: DomHost> {
    inner: Rc<RefCell<Inner<H>>>,
}

impl<H: DomHost> Clone for Lightbox<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: DomHost> std::fmt::Debug for Lightbox<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Lightbox")
            .field("id", &inner.id)
            .field("items", &inner.gallery.len())
            .field("state", &inner.navigator.state())
            .finish()
    }
}

/// Non-owning handle held by event handlers and timers
pub struct WeakLightbox<H: DomHost> {
    inner: Weak<RefCell<Inner<H>>>,
}

impl<H: DomHost> Clone for WeakLightbox<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<H: DomHost> WeakLightbox<H> {
    pub fn upgrade(&self) -> Option<Lightbox<H>> {
        self.inner.upgrade().map(|inner| Lightbox { inner })
    }
}

impl<H: DomHost> Lightbox<H> {
    /// Create a widget for `gallery` that mounts overlays on the host's body.
    ///
    /// No thumbnails are wired; drive it through [`open`](Self::open) or use
    /// [`attach`](Self::attach) to collect and wire thumbnails from the document.
    pub fn new(host: H, gallery: Gallery, config: LightboxConfig) -> Result<Self, LightboxError> {
        let mount = host
            .mount_root()
            .ok_or_else(|| LightboxError::MissingRoot("body".to_string()))?;
        Ok(Self::with_mount(host, mount, gallery, config))
    }

    /// Create a widget that mounts overlays under `mount` instead of the body.
    pub fn with_mount(host: H, mount: H::Node, gallery: Gallery, config: LightboxConfig) -> Self {
        let instance = INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let id = format!("{}-{}", config.id_prefix, instance);
        debug!("Created lightbox {} with {} items", id, gallery.len());

        Self {
            inner: Rc::new(RefCell::new(Inner {
                navigator: Navigator::new(gallery.len()),
                host,
                mount,
                config,
                gallery,
                instance,
                id,
                generation: 0,
                overlay: None,
                thumbnails: Vec::new(),
            })),
        }
    }

    /// Collect every thumbnail in the document matching `config.selector` and wire it.
    pub fn attach(host: H, config: LightboxConfig) -> Result<Self, LightboxError> {
        let thumbnails = host.query_all(None, &config.selector);
        Self::from_thumbnails(host, thumbnails, config)
    }

    /// Like [`attach`](Self::attach), restricted to thumbnails below `scope`.
    pub fn attach_within(
        host: H,
        scope: &H::Node,
        config: LightboxConfig,
    ) -> Result<Self, LightboxError> {
        let thumbnails = host.query_all(Some(scope), &config.selector);
        Self::from_thumbnails(host, thumbnails, config)
    }

    /// Build the gallery from `thumbnails` (in order) and register a click
    /// handler on each that opens the lightbox at its index.
    ///
    /// The full-size URL comes from `config.source_attribute`, falling back to
    /// `src`. Thumbnails with neither are skipped.
    pub fn from_thumbnails(
        host: H,
        thumbnails: Vec<H::Node>,
        config: LightboxConfig,
    ) -> Result<Self, LightboxError> {
        let mut entries = Vec::with_capacity(thumbnails.len());
        let mut wired = Vec::with_capacity(thumbnails.len());
        for node in thumbnails {
            let url = host
                .attribute(&node, &config.source_attribute)
                .filter(|url| !url.is_empty())
                .or_else(|| host.attribute(&node, "src"))
                .filter(|url| !url.is_empty());
            let Some(url) = url else {
                warn!("Skipping lightbox thumbnail without an image URL");
                continue;
            };
            let alt = host.attribute(&node, "alt").unwrap_or_default();
            entries.push((url, alt));
            wired.push(node);
        }

        let lightbox = Self::new(host, Gallery::from_entries(entries), config)?;
        let weak = lightbox.downgrade();

        let mut guard = lightbox.inner.borrow_mut();
        let inner = &mut *guard;
        for (index, node) in wired.iter().enumerate() {
            let weak = weak.clone();
            let listener = inner.host.on_click(
                node,
                Box::new(move || {
                    let Some(lightbox) = weak.upgrade() else {
                        return;
                    };
                    if let Err(e) = lightbox.open(index) {
                        warn!("Failed to open lightbox: {}", e);
                    }
                }),
            );
            inner.thumbnails.push(listener);
        }
        debug!("Wired {} thumbnails to lightbox {}", wired.len(), inner.id);
        drop(guard);

        Ok(lightbox)
    }

    pub fn downgrade(&self) -> WeakLightbox<H> {
        WeakLightbox {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Open the overlay at `index`, replacing any overlay that is open or fading out.
    pub fn open(&self, index: usize) -> Result<(), LightboxError> {
        let weak = self.downgrade();
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let action = inner.navigator.open(index)?;
        match action {
            OpenAction::Show(index) => debug!("Opening lightbox {} at {}", inner.id, index),
            OpenAction::Replace { previous, index } => debug!(
                "Replacing lightbox {} overlay at {} with {}",
                inner.id, previous, index
            ),
        }

        inner.teardown();
        inner.generation += 1;
        let generation = inner.generation;

        let handle = match overlay::build(&inner.host, &inner.config, &inner.id) {
            Ok(handle) => handle,
            Err(e) => {
                inner.navigator.close();
                return Err(e);
            }
        };
        let keyboard = inner.config.keyboard.then_some(inner.instance);
        let listeners = wire_controls(&inner.host, &handle, &weak, keyboard);

        inner.host.set_style(&handle.root, "opacity", "0");
        if let Err(e) = inner.host.append_child(&inner.mount, &handle.root) {
            inner.navigator.close();
            return Err(e);
        }
        inner.host.focus(&handle.root);
        claim_keyboard(inner.instance);

        let reveal = {
            let weak = weak.clone();
            inner.host.set_timeout(
                inner.config.reveal_delay_ms,
                Box::new(move || {
                    if let Some(lightbox) = weak.upgrade() {
                        lightbox.reveal(generation);
                    }
                }),
            )
        };

        inner.overlay = Some(Mounted {
            handle,
            generation,
            phase: Phase::Entering,
            pending: Some(reveal),
            _listeners: listeners,
        });
        inner.render();
        Ok(())
    }

    /// Show the next item. Returns false (and changes nothing) at the last item or when closed.
    pub fn next(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.navigator.next() {
            Some(index) => {
                debug!("Lightbox {} moved to {}", inner.id, index);
                inner.render();
                true
            }
            None => false,
        }
    }

    /// Show the previous item. Returns false (and changes nothing) at the first item or when closed.
    pub fn previous(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.navigator.previous() {
            Some(index) => {
                debug!("Lightbox {} moved to {}", inner.id, index);
                inner.render();
                true
            }
            None => false,
        }
    }

    /// Start closing: clear the cursor, fade the overlay out and schedule its removal.
    /// Returns false if the lightbox was already closed.
    pub fn close(&self) -> bool {
        let weak = self.downgrade();
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let Some(index) = inner.navigator.close() else {
            return false;
        };
        debug!("Closing lightbox {} (was at {})", inner.id, index);
        release_keyboard(inner.instance);

        let Some(mounted) = inner.overlay.as_mut() else {
            debug!("Lightbox {} closed with no overlay mounted", inner.id);
            return true;
        };

        inner
            .host
            .add_class(&mounted.handle.root, &inner.config.fade_out_class);
        inner.host.set_style(&mounted.handle.root, "opacity", "0");
        mounted.phase = Phase::Leaving;

        let generation = mounted.generation;
        // Replacing the pending timer cancels a reveal that has not fired yet
        mounted.pending = Some(inner.host.set_timeout(
            inner.config.transition_ms,
            Box::new(move || {
                if let Some(lightbox) = weak.upgrade() {
                    lightbox.finish_close(generation);
                }
            }),
        ));
        true
    }

    fn reveal(&self, generation: u64) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let Some(mounted) = inner.overlay.as_mut() else {
            return;
        };
        if mounted.generation != generation || mounted.phase != Phase::Entering {
            debug!("Ignoring stale reveal for lightbox {}", inner.id);
            return;
        }
        inner.host.set_style(&mounted.handle.root, "opacity", "1");
        mounted.phase = Phase::Shown;
        mounted.pending = None;
    }

    fn finish_close(&self, generation: u64) {
        let mut inner = self.inner.borrow_mut();
        let current = inner
            .overlay
            .as_ref()
            .map(|mounted| (mounted.generation, mounted.phase));
        if current != Some((generation, Phase::Leaving)) {
            debug!("Ignoring stale removal for lightbox {}", inner.id);
            return;
        }
        inner.teardown();
    }

    pub fn state(&self) -> LightboxState {
        self.inner.borrow().navigator.state()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.inner.borrow().navigator.cursor()
    }

    pub fn gallery(&self) -> Gallery {
        self.inner.borrow().gallery.clone()
    }

    /// Element id of this widget's overlay root
    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    /// Nodes of the mounted overlay, including one that is fading out
    pub fn overlay(&self) -> Option<OverlayHandle<H::Node>> {
        self.inner
            .borrow()
            .overlay
            .as_ref()
            .map(|mounted| mounted.handle.clone())
    }

    /// `src` of the overlay image, if an overlay is mounted
    pub fn displayed_url(&self) -> Option<String> {
        let inner = self.inner.borrow();
        let mounted = inner.overlay.as_ref()?;
        inner.host.attribute(&mounted.handle.image, "src")
    }
}

/// Register the overlay control handlers, plus a keyboard handler for
/// `keyboard` (the widget instance) when given.
fn wire_controls<H: DomHost>(
    host: &H,
    handle: &OverlayHandle<H::Node>,
    weak: &WeakLightbox<H>,
    keyboard: Option<u64>,
) -> Vec<H::Listener> {
    let mut listeners = Vec::with_capacity(4);

    let lightbox = weak.clone();
    listeners.push(host.on_click(
        &handle.previous,
        Box::new(move || {
            if let Some(lightbox) = lightbox.upgrade() {
                lightbox.previous();
            }
        }),
    ));

    let lightbox = weak.clone();
    listeners.push(host.on_click(
        &handle.next,
        Box::new(move || {
            if let Some(lightbox) = lightbox.upgrade() {
                lightbox.next();
            }
        }),
    ));

    let lightbox = weak.clone();
    listeners.push(host.on_click(
        &handle.close,
        Box::new(move || {
            if let Some(lightbox) = lightbox.upgrade() {
                lightbox.close();
            }
        }),
    ));

    if let Some(instance) = keyboard {
        let lightbox = weak.clone();
        listeners.push(host.on_keydown(Box::new(move |key| {
            if !owns_keyboard(instance) {
                return false;
            }
            let Some(lightbox) = lightbox.upgrade() else {
                return false;
            };
            match key {
                "ArrowLeft" => lightbox.previous(),
                "ArrowRight" => lightbox.next(),
                "Escape" => lightbox.close(),
                _ => false,
            }
        })));
    }

    listeners
}
