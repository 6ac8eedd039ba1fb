// src/core/dom.rs
//
// Minimal host DOM: an arena of element/text nodes plus mutation observers.
//
// Observers buffer `Mutation` records the way a browser MutationObserver does;
// nothing is delivered until the owner drains them with `take_records`. That
// keeps the whole thing single-threaded and deterministic: the capture session
// decides when callbacks run.
//
// Disconnected observer slots are reused, with a generation check so a stale
// id never reaches the new occupant. Nodes are never freed: subtrees dropped
// by `replace_children_html` stay in the arena, unreachable, for the life of
// the document. Replays and sessions are short-lived enough for that.

use super::html;
use super::selector::Selector;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId {
    slot: usize,
    generation: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserveConfig {
    pub attributes: bool,
    pub child_list: bool,
    pub subtree: bool,
}

impl ObserveConfig {
    /// `{ attributes: true, childList: true, subtree: true }`
    pub const ALL: ObserveConfig = ObserveConfig { attributes: true, child_list: true, subtree: true };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    ChildList { target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId> },
    Attributes { target: NodeId, name: String },
}

impl Mutation {
    pub fn target(&self) -> NodeId {
        match self {
            Mutation::ChildList { target, .. } | Mutation::Attributes { target, .. } => *target,
        }
    }
}

#[derive(Debug)]
struct ObserverSlot {
    generation: u32,
    target: NodeId,
    config: ObserveConfig,
    active: bool,
    queue: Vec<Mutation>,
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    observers: Vec<ObserverSlot>,
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl Document {
    /// Empty document whose root is a `<body>` element.
    pub fn new() -> Self {
        let mut doc = Self { nodes: Vec::new(), root: NodeId(0), observers: Vec::new() };
        doc.root = doc.create_element("body", &[]);
        doc
    }

    /// Document whose body holds the parsed fragment. No observers exist yet,
    /// so nothing is recorded.
    pub fn parse(markup: &str) -> Self {
        let mut doc = Self::new();
        let root = doc.root;
        html::parse_into(&mut doc, root, markup);
        doc
    }

    pub fn root(&self) -> NodeId { self.root }

    /* ---------------- Construction (detached, no records) ---------------- */

    pub fn create_element(&mut self, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attrs = attrs.iter().map(|(k, v)| (html::to_lower(k), s!(*v))).collect();
        self.alloc(NodeKind::Element { tag: html::to_lower(tag), attrs })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(s!(text)))
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent: None, children: Vec::new() });
        id
    }

    /// Link without notifying observers. Used while building detached subtrees.
    pub(crate) fn link(&mut self, parent: NodeId, child: NodeId) {
        self.detach_silently(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    fn detach_silently(&mut self, child: NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| *c != child);
        }
    }

    /* ---------------- Mutations (recorded) ---------------- */

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.link(parent, child);
        self.notify(Mutation::ChildList { target: parent, added: vec![child], removed: Vec::new() });
    }

    /// Parse `markup` and append the resulting nodes to `parent` as one
    /// child-list record. Returns the top-level nodes added.
    pub fn append_html(&mut self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        let added = html::parse_detached(self, markup);
        for &n in &added {
            self.link(parent, n);
        }
        if !added.is_empty() {
            self.notify(Mutation::ChildList { target: parent, added: added.clone(), removed: Vec::new() });
        }
        added
    }

    /// Swap every child of `parent` for the parsed `markup`, as one record.
    pub fn replace_children_html(&mut self, parent: NodeId, markup: &str) -> Vec<NodeId> {
        let removed = std::mem::take(&mut self.nodes[parent.0].children);
        for &r in &removed {
            self.nodes[r.0].parent = None;
        }
        let added = html::parse_detached(self, markup);
        for &n in &added {
            self.link(parent, n);
        }
        if !added.is_empty() || !removed.is_empty() {
            self.notify(Mutation::ChildList { target: parent, added: added.clone(), removed });
        }
        added
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.nodes[child.0].parent != Some(parent) { return false; }
        self.detach_silently(child);
        self.notify(Mutation::ChildList { target: parent, added: Vec::new(), removed: vec![child] });
        true
    }

    /// Set (or overwrite) an attribute. Text nodes are ignored.
    pub fn set_attribute(&mut self, el: NodeId, name: &str, value: &str) {
        let name = html::to_lower(name);
        let NodeKind::Element { attrs, .. } = &mut self.nodes[el.0].kind else { return; };
        match attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = s!(value),
            None => attrs.push((name.clone(), s!(value))),
        }
        self.notify(Mutation::Attributes { target: el, name });
    }

    /* ---------------- Observers ---------------- */

    /// Start buffering records for `target`. Takes over a disconnected slot
    /// when one is free.
    pub fn observe(&mut self, target: NodeId, config: ObserveConfig) -> ObserverId {
        match self.observers.iter().position(|s| !s.active) {
            Some(i) => {
                let slot = &mut self.observers[i];
                slot.generation = slot.generation.wrapping_add(1);
                slot.target = target;
                slot.config = config;
                slot.active = true;
                slot.queue.clear();
                ObserverId { slot: i, generation: slot.generation }
            }
            None => {
                let id = ObserverId { slot: self.observers.len(), generation: 0 };
                self.observers.push(ObserverSlot { generation: 0, target, config, active: true, queue: Vec::new() });
                id
            }
        }
    }

    fn slot(&self, id: ObserverId) -> Option<&ObserverSlot> {
        self.observers.get(id.slot).filter(|s| s.active && s.generation == id.generation)
    }

    fn slot_mut(&mut self, id: ObserverId) -> Option<&mut ObserverSlot> {
        self.observers.get_mut(id.slot).filter(|s| s.active && s.generation == id.generation)
    }

    /// Stop delivery and drop anything still queued. Unknown or stale ids are fine.
    pub fn disconnect(&mut self, id: ObserverId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.active = false;
            slot.queue.clear();
        }
    }

    pub fn is_observing(&self, id: ObserverId) -> bool {
        self.slot(id).is_some()
    }

    pub fn take_records(&mut self, id: ObserverId) -> Vec<Mutation> {
        match self.slot_mut(id) {
            Some(slot) => std::mem::take(&mut slot.queue),
            None => Vec::new(),
        }
    }

    pub fn has_pending(&self, id: ObserverId) -> bool {
        self.slot(id).is_some_and(|s| !s.queue.is_empty())
    }

    /// Slots allocated so far, live or free.
    pub fn observer_capacity(&self) -> usize { self.observers.len() }

    fn notify(&mut self, m: Mutation) {
        let target = m.target();
        let mut hits = Vec::new();
        for (i, slot) in self.observers.iter().enumerate() {
            if !slot.active { continue; }
            let wanted = match m {
                Mutation::ChildList { .. } => slot.config.child_list,
                Mutation::Attributes { .. } => slot.config.attributes,
            };
            if !wanted { continue; }
            let in_scope = slot.target == target
                || (slot.config.subtree && self.contains(slot.target, target));
            if in_scope { hits.push(i); }
        }
        for i in hits {
            self.observers[i].queue.push(m.clone());
        }
    }

    /* ---------------- Reads ---------------- */

    pub fn kind(&self, id: NodeId) -> &NodeKind { &self.nodes[id.0].kind }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    /// Lowercase tag name; `None` for text nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .is_some_and(|c| c.split_ascii_whitespace().any(|c| c == class))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> { self.nodes[id.0].parent }

    pub fn children(&self, id: NodeId) -> &[NodeId] { &self.nodes[id.0].children }

    /// `true` if `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor { return true; }
            cur = self.nodes[n.0].parent;
        }
        false
    }

    /// Still reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root, id)
    }

    /// Concatenated text of every descendant text node, untouched.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = s!();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(t) => out.push_str(t),
            NodeKind::Element { .. } => {
                for &c in &self.nodes[id.0].children {
                    self.collect_text(c, out);
                }
            }
        }
    }

    /// Pre-order walk of the subtree below `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&n| self.attr(n, "id") == Some(value))
    }

    pub fn matches(&self, id: NodeId, sel: &Selector) -> bool {
        sel.matches(self, id)
    }

    /// First descendant of `scope` matching `sel`, in document order.
    pub fn query_selector(&self, scope: NodeId, sel: &Selector) -> Option<NodeId> {
        self.descendants(scope).find(|&n| sel.matches(self, n))
    }

    pub fn query_selector_all(&self, scope: NodeId, sel: &Selector) -> Vec<NodeId> {
        self.descendants(scope).filter(|&n| sel.matches(self, n)).collect()
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;
    fn next(&mut self) -> Option<NodeId> {
        let n = self.stack.pop()?;
        self.stack.extend(self.doc.nodes[n.0].children.iter().rev().copied());
        Some(n)
    }
}
