//! The open-element stack (spec §4.3) and namespace resolution over it
//! (spec §4.4).
//!
//! Grounded on the teacher's `name::NamespaceResolver` (a `Vec` of scoped
//! bindings with a `level` used to pop a whole element's worth of
//! declarations at once, `src/name.rs`). This crate's stack is simpler in
//! one respect and richer in another: simpler because each element node
//! owns its *own* `namespace_map` directly (spec §3) rather than sharing one
//! flat buffer with level-tagged entries; richer because the stack also
//! doubles as the open-element list tree construction needs for implicit
//! closes and synthesis (spec §4.5).

use std::rc::Rc;

use crate::namespace::{HTML_NS, MATHML_NS, SVG_NS, XLINK_NS, XML_NS};
use crate::node::{Node, StackHandle};

/// Stack of currently open [`NodeKind::Element`] nodes.
///
/// Implemented as an append-only `Vec`: since HTML elements nest strictly
/// (an element's children are always popped before the element itself),
/// an element's position in the vector *is* its depth (spec §3 invariant 6
/// — computed lazily in the general model, but equal to the push-time
/// stack length here since no reordering ever happens after push).
#[derive(Default)]
pub struct ElementStack {
    frames: Vec<Node>,
}

impl ElementStack {
    pub fn new() -> Self {
        ElementStack { frames: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// The depth a node being opened right now would receive.
    pub fn next_depth(&self) -> usize {
        self.frames.len()
    }

    pub fn top(&self) -> Option<&Node> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Node> {
        self.frames.last_mut()
    }

    pub fn top_handle(&self) -> Option<StackHandle> {
        if self.frames.is_empty() {
            None
        } else {
            Some(self.frames.len() - 1)
        }
    }

    /// Pushes an already-constructed element node. The caller is
    /// responsible for having set `node.parent` to [`Self::top_handle`]
    /// *before* calling this (spec §4.5 Step D).
    pub fn push(&mut self, mut node: Node) -> StackHandle {
        node.depth = Some(self.frames.len());
        self.frames.push(node);
        self.frames.len() - 1
    }

    /// Pops the top element, returning it (its identity is still needed to
    /// build the matching `EndElement`).
    pub fn pop(&mut self) -> Option<Node> {
        self.frames.pop()
    }

    /// Walks from top to root, by local name only (used for the "is
    /// `colgroup`/`tbody`/etc. on the stack" checks in spec §4.5 Step B).
    pub fn has_local_name(&self, name: &str) -> bool {
        self.frames.iter().any(|n| &*n.local_name == name)
    }

    pub fn has_any_local_name(&self, names: &[&str]) -> bool {
        self.frames
            .iter()
            .any(|n| names.contains(&&*n.local_name))
    }

    /// Finds, from the top down, the nearest open element with the given
    /// local name (used to locate the match for an end tag).
    pub fn position_of_local_name(&self, name: &str) -> Option<usize> {
        self.frames.iter().rposition(|n| &*n.local_name == name)
    }

    pub fn get(&self, handle: StackHandle) -> Option<&Node> {
        self.frames.get(handle)
    }

    /// Resolves `prefix` against the current stack (spec §4.4): the
    /// context element's own map, then each ancestor's map from top down,
    /// then the special `xlink`/`xml` prefixes, then a synthesized
    /// placeholder. The empty-prefix / default-namespace case is handled by
    /// the caller (it additionally depends on `emit-html-namespace` and on
    /// whether the context element is inside an `svg`/`math` subtree, which
    /// this method folds in by walking the same map chain).
    pub fn resolve(&self, prefix: &str, emit_html_namespace: bool) -> Rc<str> {
        for frame in self.frames.iter().rev() {
            if let Some((_, uri)) = frame.namespace_map.iter().find(|(p, _)| &**p == prefix) {
                return uri.clone();
            }
        }
        if prefix.is_empty() {
            return if emit_html_namespace {
                Rc::from(HTML_NS)
            } else {
                Rc::from("")
            };
        }
        match prefix {
            "xlink" => Rc::from(XLINK_NS),
            "xml" => Rc::from(XML_NS),
            _ => Rc::from(format!("uri:namespace:{prefix}")),
        }
    }

    /// The namespace a bare (unprefixed) element name should take, given
    /// the stack's current nesting. Mirrors [`Self::resolve`] for the empty
    /// prefix case but additionally recognizes that the default namespace
    /// set on an `svg`/`math` ancestor (spec §4.4) propagates to unprefixed
    /// descendants without requiring a literal `xmlns` attribute.
    pub fn default_namespace(&self, emit_html_namespace: bool) -> Rc<str> {
        self.resolve("", emit_html_namespace)
    }

    pub fn iter_top_down(&self) -> impl Iterator<Item = &Node> {
        self.frames.iter().rev()
    }
}

/// Returns the fixed namespace URI an element named `local_name` (with no
/// explicit prefix) establishes as its own default namespace, per spec
/// §4.4: "When an element named `math` ... or `svg` ... is scanned, its
/// default namespace is set ... before resolving its own prefix/URI".
pub fn implicit_default_namespace(local_name: &str) -> Option<&'static str> {
    match local_name {
        "math" => Some(MATHML_NS),
        "svg" => Some(SVG_NS),
        // SPEC_FULL.md §4 Supplemented: `foreignObject` re-enters the HTML
        // namespace for its own subtree, the one integration-point
        // simplification this crate carries over from the original
        // FileMeta `HtmlReader` behavior.
        "foreignobject" => Some(HTML_NS),
        _ => None,
    }
}
