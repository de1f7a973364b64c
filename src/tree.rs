//! The tree-construction engine (spec §4.5): implicit sibling closes,
//! synthesized ancestors, void-element forcing, and end-tag resolution.
//!
//! Grounded in shape on `other_examples/983f26a2_yonasBSD-hiwave-windows__crates-rustkit-html-src-tree_builder.rs.rs`'s
//! `VOID_ELEMENTS`/`P_CLOSING_ELEMENTS` constant tables and its
//! `open_elements` stack-walking style, and on the teacher's general
//! preference (spec §9 / `name.rs`) for small `Vec`/slice-based static
//! tables over a macro-generated perfect-hash table — several
//! `other_examples/` files reach for `phf` here, but the teacher's own
//! dependency graph never does, so this crate sticks to plain constants plus
//! a `OnceLock`-cached lookup, matching spec §9's "global statics ...
//! compile-time constants / once-initialized tables" note.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::namespace::HTML_NS;
use crate::node::{Node, NodeKind};
use crate::stack::ElementStack;

/// Void elements (spec §4.5 Step C): reported as self-closing, never
/// balanced by an `EndElement`.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// The can-close table (spec §4.5 Step A): `(open_on_left, [tags_on_right])`
/// — an element with local name `open_on_left` is implicitly closed when a
/// sibling open tag with a local name from its list is encountered.
const CAN_CLOSE: &[(&str, &[&str])] = &[
    ("li", &["li"]),
    ("dt", &["dt", "dd"]),
    ("dd", &["dd", "dt"]),
    (
        "p",
        &[
            "address",
            "article",
            "aside",
            "blockquote",
            "details",
            "div",
            "dl",
            "fieldset",
            "figcaption",
            "figure",
            "footer",
            "form",
            "h1",
            "h2",
            "h3",
            "h4",
            "h5",
            "h6",
            "header",
            "hr",
            "main",
            "menu",
            "nav",
            "ol",
            "p",
            "pre",
            "section",
            "table",
            "ul",
        ],
    ),
    ("rt", &["rt", "rp"]),
    ("rp", &["rp", "rt"]),
    ("optgroup", &["optgroup"]),
    ("option", &["option", "optgroup"]),
    ("thead", &["tbody", "tfoot"]),
    ("tbody", &["tbody", "tfoot"]),
    ("tfoot", &["tbody"]),
    ("tr", &["tr"]),
    ("td", &["td", "th"]),
    ("th", &["th", "td"]),
];

/// `script`/`style` (SPEC_FULL.md §4 Supplemented): their content is
/// scanned as opaque raw text, not tag soup, up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn void_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| VOID_ELEMENTS.iter().copied().collect())
}

fn raw_text_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| RAW_TEXT_ELEMENTS.iter().copied().collect())
}

pub fn is_raw_text_element(local_name: &str) -> bool {
    raw_text_set().contains(local_name)
}

fn can_close_map() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static MAP: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    MAP.get_or_init(|| CAN_CLOSE.iter().copied().collect())
}

pub fn is_void_element(local_name: &str) -> bool {
    void_set().contains(local_name)
}

pub fn can_close(open_local_name: &str, incoming_local_name: &str) -> bool {
    can_close_map()
        .get(open_local_name)
        .map_or(false, |rights| rights.contains(&incoming_local_name))
}

/// An element is "in the HTML namespace" for the purposes of Step A/C if
/// its namespace URI is the HTML namespace or empty (empty is what
/// unprefixed elements resolve to when `emit-html-namespace` is off).
pub fn is_html_namespace(uri: &str) -> bool {
    uri.is_empty() || uri == HTML_NS
}

/// Runs spec §4.5 Steps A–D for a freshly scanned start-tag token,
/// returning the node that should be emitted now (after any synthesized
/// predecessors already sitting in `queue` have been drained ahead of it).
///
/// `element` must already have its `namespace_uri`/`namespace_map` resolved
/// (done by the caller before this is invoked, since that depends on the
/// reader's `emit-html-namespace` setting and on ancestor `xmlns`
/// declarations — concerns of namespace resolution, not tree construction).
pub fn open_element(
    stack: &mut ElementStack,
    queue: &mut std::collections::VecDeque<Node>,
    mut element: Node,
) -> Node {
    let incoming_is_html = is_html_namespace(&element.namespace_uri);

    // Step A: implicit sibling close.
    while let Some(top) = stack.top() {
        if !incoming_is_html || !is_html_namespace(&top.namespace_uri) {
            break;
        }
        if !can_close(&top.local_name, &element.local_name) {
            break;
        }
        #[cfg(feature = "log")]
        log::trace!(
            "implicit close of <{}> before <{}>",
            top.local_name,
            element.local_name
        );
        let closed = stack.pop().unwrap();
        queue.push_back(make_end_element(&closed));
    }

    // Step B: synthesized ancestors.
    if stack.is_empty() && &*element.local_name != "html" {
        synthesize_open(stack, queue, "html");
    }
    if !stack.has_any_local_name(&["head", "body"])
        && !matches!(&*element.local_name, "html" | "head" | "body")
    {
        synthesize_open(stack, queue, "body");
    }
    if &*element.local_name == "col" && !stack.has_local_name("colgroup") {
        synthesize_open(stack, queue, "colgroup");
    } else if &*element.local_name == "tr"
        && !stack.has_any_local_name(&["tbody", "thead", "tfoot"])
    {
        synthesize_open(stack, queue, "tbody");
    }

    // Step C: void elements.
    if incoming_is_html && is_void_element(&element.local_name) {
        element.is_empty_element = true;
    }

    // Step D: finalize parent & emit.
    element.parent = stack.top_handle();
    if element.is_empty_element {
        element.depth = Some(stack.next_depth());
    } else {
        let handle = stack.push(element);
        element = stack.get(handle).unwrap().clone();
    }
    queue.push_back(element);
    queue.pop_front().expect("just pushed at least one node")
}

/// Synthesizes enclosing `<html>`/`<body>` for a top-level text run with no
/// open element to belong to (spec §4.6: "synthesize the `<html>` and
/// `<body>` opens into the queue and return"). Pushes whatever is missing;
/// a caller then drains `queue` before retrying the text scan.
pub fn synthesize_root_wrappers(stack: &mut ElementStack, queue: &mut std::collections::VecDeque<Node>) {
    if stack.is_empty() {
        synthesize_open(stack, queue, "html");
    }
    if !stack.has_any_local_name(&["head", "body"]) {
        synthesize_open(stack, queue, "body");
    }
}

/// Pushes a synthesized `<name>` element (HTML namespace, not empty) onto
/// the stack and its queue entry, per spec §4.5 Step B.
fn synthesize_open(stack: &mut ElementStack, queue: &mut std::collections::VecDeque<Node>, name: &str) {
    #[cfg(feature = "log")]
    log::trace!("synthesizing implicit <{}>", name);
    let mut node = Node::empty(NodeKind::Element);
    node.local_name = name.into();
    node.namespace_uri = HTML_NS.into();
    node.parent = stack.top_handle();
    let handle = stack.push(node);
    queue.push_back(stack.get(handle).unwrap().clone());
}

pub(crate) fn make_end_element(open: &Node) -> Node {
    Node {
        kind: NodeKind::EndElement,
        prefix: open.prefix.clone(),
        local_name: open.local_name.clone(),
        namespace_uri: open.namespace_uri.clone(),
        value: String::new(),
        is_empty_element: false,
        attributes: Vec::new(),
        namespace_map: Vec::new(),
        parent: open.parent,
        depth: open.depth,
        whitespace_significant: false,
    }
}

/// Resolves an end tag against the stack (spec §4.5 "End-tag handling").
/// Returns the node to emit now, or `None` if the tag was discarded
/// silently (it names a void element, or no matching open element exists).
pub fn close_element(
    stack: &mut ElementStack,
    queue: &mut std::collections::VecDeque<Node>,
    local_name: &str,
) -> Option<Node> {
    if is_void_element(local_name) {
        return None;
    }
    let pos = stack.position_of_local_name(local_name)?;
    while stack.len() > pos {
        let popped = stack.pop().unwrap();
        queue.push_back(make_end_element(&popped));
    }
    queue.pop_front()
}

/// A normalized `DocumentType` node: name always `"html"`, value always
/// empty, regardless of the doctype's actual content (spec §4.5 "Doctype").
pub fn make_doctype_node() -> Node {
    let mut node = Node::empty(NodeKind::DocumentType);
    node.local_name = "html".into();
    node
}
