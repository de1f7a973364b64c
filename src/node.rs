//! The node record: a single tagged-variant value carrier for every kind of
//! thing the reader can expose, per spec §3.
//!
//! Grounded on the teacher's `events::Event` enum (which tags a payload by
//! kind) generalized into a single struct-with-kind-tag per spec §9's
//! "prefer a tagged-variant node with a single payload type rather than a
//! class hierarchy" design note — the spec's node has many more shared
//! fields (prefix/namespace/depth/attributes) than `quick-xml`'s `Event`,
//! so a flat struct reads more naturally here than an enum-of-structs.

use std::fmt;
use std::rc::Rc;

/// Discriminates what a [`Node`] represents. Named after the historical
/// `XmlNodeType`-style enumerations this design descends from (see spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    None,
    Element,
    EndElement,
    Attribute,
    Text,
    Whitespace,
    SignificantWhitespace,
    Comment,
    CDATA,
    ProcessingInstruction,
    DocumentType,
    EndEntity,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::None => "None",
            NodeKind::Element => "Element",
            NodeKind::EndElement => "EndElement",
            NodeKind::Attribute => "Attribute",
            NodeKind::Text => "Text",
            NodeKind::Whitespace => "Whitespace",
            NodeKind::SignificantWhitespace => "SignificantWhitespace",
            NodeKind::Comment => "Comment",
            NodeKind::CDATA => "CDATA",
            NodeKind::ProcessingInstruction => "ProcessingInstruction",
            NodeKind::DocumentType => "DocumentType",
            NodeKind::EndEntity => "EndEntity",
        };
        f.write_str(s)
    }
}

/// One attribute belonging to an [`Node`] of kind [`NodeKind::Element`].
///
/// Attributes are owned by their element (spec §3: "an ordered list of
/// attribute-nodes owned by their element") but kept as a plain `Vec` field
/// on [`Node`] rather than a back-reference, since the attribute cursor
/// (§4.7) only ever addresses attributes of the *current* element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeNode {
    pub prefix: Rc<str>,
    pub local_name: Rc<str>,
    pub namespace_uri: Rc<str>,
    pub value: String,
}

/// A handle into the open-element stack, used as the `parent` link.
///
/// Spec §9 models parent references as "an arena/linked chain where child
/// nodes hold a back-reference to parent by handle, not by owning pointer".
/// [`StackHandle`] is that handle: an index into
/// [`crate::stack::ElementStack`]'s backing storage, valid only while the
/// referenced frame is still open.
pub type StackHandle = usize;

/// A single emitted node, spec §3.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub prefix: Rc<str>,
    pub local_name: Rc<str>,
    pub namespace_uri: Rc<str>,
    pub value: String,
    pub is_empty_element: bool,
    pub attributes: Vec<AttributeNode>,
    /// Namespace bindings introduced *at this element* (spec §3: "holds
    /// only bindings introduced at that element"). Empty for non-element
    /// kinds.
    pub namespace_map: Vec<(Rc<str>, Rc<str>)>,
    pub parent: Option<StackHandle>,
    /// Computed lazily (spec §3 invariant 6) the first time a consumer
    /// observes the node; `None` until then.
    pub depth: Option<usize>,
    /// Whether a run of leading whitespace collected while this element was
    /// the innermost open element should be treated as significant (spec
    /// §4.6). Meaningful only while the node is an open [`NodeKind::Element`]
    /// frame on the stack; ignored otherwise.
    pub whitespace_significant: bool,
}

impl Node {
    pub fn empty(kind: NodeKind) -> Self {
        Node {
            kind,
            prefix: Rc::from(""),
            local_name: Rc::from(""),
            namespace_uri: Rc::from(""),
            value: String::new(),
            is_empty_element: false,
            attributes: Vec::new(),
            namespace_map: Vec::new(),
            parent: None,
            depth: None,
            whitespace_significant: false,
        }
    }

    pub fn text(kind: NodeKind, value: String) -> Self {
        Node {
            value,
            ..Node::empty(kind)
        }
    }

    /// Identity used by the balancedness invariant (spec §8): an `End`
    /// matches a `Start` with the same `(prefix, local_name, namespace_uri)`.
    pub fn identity(&self) -> (Rc<str>, Rc<str>, Rc<str>) {
        (
            self.prefix.clone(),
            self.local_name.clone(),
            self.namespace_uri.clone(),
        )
    }
}
