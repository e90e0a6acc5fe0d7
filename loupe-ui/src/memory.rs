//! Headless DOM host
//!
//! A slotmap-backed element arena with a virtual clock. Implements [`DomHost`]
//! so the lightbox can run without a browser, and exposes inspection helpers
//! (`click`, `press_key`, `advance`, ...) for driving it from tests.
//!
//! Removing a node frees it and its subtree from the arena; ids of removed
//! nodes read as detached and empty afterwards.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::error::LightboxError;
use crate::host::{ClickHandler, DomHost, KeyHandler, Task};

new_key_type! {
    /// Handle to an element in a [`MemoryHost`]
    pub struct NodeId;
}

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
}

struct ClickEntry {
    node: NodeId,
    handler: Rc<RefCell<ClickHandler>>,
}

struct TimerEntry {
    due_ms: u64,
    task: Task,
}

struct Document {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    body: NodeId,
    active: Option<NodeId>,
    next_handle: u64,
    clicks: BTreeMap<u64, ClickEntry>,
    keys: BTreeMap<u64, Rc<RefCell<KeyHandler>>>,
    timers: BTreeMap<u64, TimerEntry>,
    now_ms: u64,
}

impl Document {
    fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(NodeData {
            tag: "body".to_string(),
            ..NodeData::default()
        });
        let mut children = SecondaryMap::new();
        children.insert(body, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            body,
            active: None,
            next_handle: 0,
            clicks: BTreeMap::new(),
            keys: BTreeMap::new(),
            timers: BTreeMap::new(),
            now_ms: 0,
        }
    }

    fn handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn unlink(&mut self, node: NodeId) {
        if let Some(parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(parent) {
                siblings.retain(|&child| child != node);
            }
        }
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.body {
                return true;
            }
            match self.parent.get(current) {
                Some(&parent) => current = parent,
                None => return false,
            }
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent.get(id).copied();
        }
        false
    }

    /// Descendants of `root` in document order, excluding `root`
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .children
            .get(root)
            .map(|kids| kids.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(kids) = self.children.get(id) {
                stack.extend(kids.iter().rev().copied());
            }
        }
        out
    }

    fn is_disabled(&self, node: NodeId) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|data| data.tag == "button" && data.attributes.contains_key("disabled"))
    }
}

/// In-memory [`DomHost`]. Cloning shares the same document.
#[derive(Clone)]
pub struct MemoryHost {
    doc: Rc<RefCell<Document>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let doc = self.doc.borrow();
        f.debug_struct("MemoryHost")
            .field("nodes", &doc.nodes.len())
            .field("listeners", &(doc.clicks.len() + doc.keys.len()))
            .field("timers", &doc.timers.len())
            .field("now_ms", &doc.now_ms)
            .finish()
    }
}

/// Registered listener; removed from the document on drop
pub struct MemoryListener {
    doc: Weak<RefCell<Document>>,
    handle: u64,
}

impl Drop for MemoryListener {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.upgrade() {
            if let Ok(mut doc) = doc.try_borrow_mut() {
                doc.clicks.remove(&self.handle);
                doc.keys.remove(&self.handle);
            }
        }
    }
}

/// Pending timeout; cancelled on drop
pub struct MemoryTimer {
    doc: Weak<RefCell<Document>>,
    handle: u64,
}

impl Drop for MemoryTimer {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.upgrade() {
            if let Ok(mut doc) = doc.try_borrow_mut() {
                doc.timers.remove(&self.handle);
            }
        }
    }
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            doc: Rc::new(RefCell::new(Document::new())),
        }
    }

    pub fn body(&self) -> NodeId {
        self.doc.borrow().body
    }

    pub fn tag(&self, node: &NodeId) -> Option<String> {
        self.doc.borrow().nodes.get(*node).map(|data| data.tag.clone())
    }

    pub fn text(&self, node: &NodeId) -> String {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .map(|data| data.text.clone())
            .unwrap_or_default()
    }

    pub fn style(&self, node: &NodeId, property: &str) -> Option<String> {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .and_then(|data| data.styles.get(property).cloned())
    }

    pub fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    pub fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.doc
            .borrow()
            .children
            .get(*node)
            .cloned()
            .unwrap_or_default()
    }

    pub fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.doc.borrow().parent.get(*node).copied()
    }

    /// Whether `node` is reachable from the body
    pub fn is_attached(&self, node: &NodeId) -> bool {
        self.doc.borrow().is_attached(*node)
    }

    /// Number of attached elements matching `selector`
    pub fn count(&self, selector: &str) -> usize {
        self.query_all(None, selector).len()
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.doc.borrow().active
    }

    /// Registered click and keydown listeners
    pub fn listener_count(&self) -> usize {
        let doc = self.doc.borrow();
        doc.clicks.len() + doc.keys.len()
    }

    pub fn pending_timers(&self) -> usize {
        self.doc.borrow().timers.len()
    }

    /// Live elements in the arena, including the body and detached ones
    pub fn node_count(&self) -> usize {
        self.doc.borrow().nodes.len()
    }

    pub fn now_ms(&self) -> u64 {
        self.doc.borrow().now_ms
    }

    /// Dispatch a click on `node`, bubbling to its ancestors.
    ///
    /// Clicks on or inside a disabled button are swallowed, as in a browser.
    pub fn click(&self, node: &NodeId) {
        let handlers: Vec<Rc<RefCell<ClickHandler>>> = {
            let doc = self.doc.borrow();
            let mut path = Vec::new();
            let mut current = Some(*node);
            while let Some(id) = current {
                if doc.is_disabled(id) {
                    return;
                }
                path.push(id);
                current = doc.parent.get(id).copied();
            }
            path.iter()
                .flat_map(|id| {
                    doc.clicks
                        .values()
                        .filter(move |entry| entry.node == *id)
                        .map(|entry| entry.handler.clone())
                })
                .collect()
        };

        for handler in handlers {
            (handler.borrow_mut())();
        }
    }

    /// Dispatch a keydown with `KeyboardEvent.key` value `key`.
    /// Returns true if any listener handled it.
    pub fn press_key(&self, key: &str) -> bool {
        let handlers: Vec<Rc<RefCell<KeyHandler>>> =
            self.doc.borrow().keys.values().cloned().collect();

        let mut handled = false;
        for handler in handlers {
            handled |= (handler.borrow_mut())(key);
        }
        handled
    }

    /// Advance the virtual clock by `ms`, running every timer that falls due.
    pub fn advance(&self, ms: u64) {
        let target = self.doc.borrow().now_ms + ms;
        while let Some(task) = self.pop_due(target) {
            task();
        }
        self.doc.borrow_mut().now_ms = target;
    }

    /// Run all pending timers (including ones scheduled while running) in due order.
    pub fn flush_timers(&self) {
        while let Some(task) = self.pop_due(u64::MAX) {
            task();
        }
    }

    fn pop_due(&self, limit: u64) -> Option<Task> {
        let mut doc = self.doc.borrow_mut();
        let (&handle, due_ms) = doc
            .timers
            .iter()
            .map(|(handle, entry)| (handle, entry.due_ms))
            .filter(|(_, due_ms)| *due_ms <= limit)
            .min_by_key(|(handle, due_ms)| (*due_ms, **handle))?;
        let entry = doc.timers.remove(&handle)?;
        doc.now_ms = doc.now_ms.max(due_ms);
        Some(entry.task)
    }
}

impl DomHost for MemoryHost {
    type Node = NodeId;
    type Listener = MemoryListener;
    type Timer = MemoryTimer;

    fn create_element(&self, tag: &str) -> Result<NodeId, LightboxError> {
        let mut doc = self.doc.borrow_mut();
        let id = doc.nodes.insert(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        });
        doc.children.insert(id, Vec::new());
        Ok(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), LightboxError> {
        let mut doc = self.doc.borrow_mut();
        if !doc.nodes.contains_key(*parent) || !doc.nodes.contains_key(*child) {
            return Err(LightboxError::Dom("unknown node".to_string()));
        }
        if doc.contains(*child, *parent) {
            return Err(LightboxError::Dom(
                "cannot insert a node into its own subtree".to_string(),
            ));
        }
        doc.unlink(*child);
        doc.parent.insert(*child, *parent);
        if let Some(kids) = doc.children.get_mut(*parent) {
            kids.push(*child);
        }
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        if *node == doc.body || !doc.nodes.contains_key(*node) {
            return;
        }
        if let Some(active) = doc.active {
            if doc.contains(*node, active) {
                doc.active = None;
            }
        }
        doc.unlink(*node);

        let mut freed = doc.descendants(*node);
        freed.push(*node);
        for id in &freed {
            doc.nodes.remove(*id);
            doc.children.remove(*id);
            doc.parent.remove(*id);
        }
        doc.clicks.retain(|_, entry| !freed.contains(&entry.node));
    }

    fn mount_root(&self) -> Option<NodeId> {
        Some(self.body())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.doc.borrow();
        doc.descendants(doc.body).into_iter().find(|node| {
            doc.nodes
                .get(*node)
                .and_then(|data| data.attributes.get("id"))
                .is_some_and(|value| value == id)
        })
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &str) -> Vec<NodeId> {
        let selector = SimpleSelector::parse(selector);
        let doc = self.doc.borrow();
        let root = scope.copied().unwrap_or(doc.body);
        doc.descendants(root)
            .into_iter()
            .filter(|node| {
                doc.nodes
                    .get(*node)
                    .is_some_and(|data| selector.matches(data))
            })
            .collect()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.doc
            .borrow()
            .nodes
            .get(*node)
            .and_then(|data| data.attributes.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.attributes.remove(name);
        }
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        if let Some(data) = self.doc.borrow_mut().nodes.get_mut(*node) {
            data.text = text.to_string();
        }
    }

    fn focus(&self, node: &NodeId) {
        let mut doc = self.doc.borrow_mut();
        if doc.is_attached(*node) {
            doc.active = Some(*node);
        }
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler) -> MemoryListener {
        let mut doc = self.doc.borrow_mut();
        let handle = doc.handle();
        doc.clicks.insert(
            handle,
            ClickEntry {
                node: *node,
                handler: Rc::new(RefCell::new(handler)),
            },
        );
        MemoryListener {
            doc: Rc::downgrade(&self.doc),
            handle,
        }
    }

    fn on_keydown(&self, handler: KeyHandler) -> MemoryListener {
        let mut doc = self.doc.borrow_mut();
        let handle = doc.handle();
        doc.keys.insert(handle, Rc::new(RefCell::new(handler)));
        MemoryListener {
            doc: Rc::downgrade(&self.doc),
            handle,
        }
    }

    fn set_timeout(&self, delay_ms: u32, task: Task) -> MemoryTimer {
        let mut doc = self.doc.borrow_mut();
        let handle = doc.handle();
        let due_ms = doc.now_ms + u64::from(delay_ms);
        doc.timers.insert(handle, TimerEntry { due_ms, task });
        MemoryTimer {
            doc: Rc::downgrade(&self.doc),
            handle,
        }
    }
}

/// Compound selector: `tag#id.class[attr][attr=value]`, every part optional.
#[derive(Debug, Default, PartialEq)]
struct SimpleSelector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl SimpleSelector {
    fn parse(selector: &str) -> Self {
        let mut out = Self::default();
        let mut rest = selector.trim();

        let tag_end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
        if tag_end > 0 && &rest[..tag_end] != "*" {
            out.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            rest = &rest[marker.len_utf8()..];
            match marker {
                '[' => {
                    let end = rest.find(']').unwrap_or(rest.len());
                    let body = &rest[..end];
                    rest = rest.get(end + 1..).unwrap_or("");
                    match body.split_once('=') {
                        Some((name, value)) => out.attributes.push((
                            name.trim().to_string(),
                            Some(value.trim().trim_matches(['"', '\'']).to_string()),
                        )),
                        None => out.attributes.push((body.trim().to_string(), None)),
                    }
                }
                '#' | '.' => {
                    let end = rest.find(['#', '.', '[']).unwrap_or(rest.len());
                    let name = rest[..end].to_string();
                    rest = &rest[end..];
                    if marker == '#' {
                        out.id = Some(name);
                    } else {
                        out.classes.push(name);
                    }
                }
                _ => break,
            }
        }
        out
    }

    fn matches(&self, data: &NodeData) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != data.tag) {
            return false;
        }
        if let Some(id) = &self.id {
            if data.attributes.get("id") != Some(id) {
                return false;
            }
        }
        if !self
            .classes
            .iter()
            .all(|class| data.classes.iter().any(|c| c == class))
        {
            return false;
        }
        self.attributes
            .iter()
            .all(|(name, expected)| match (data.attributes.get(name), expected) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}
