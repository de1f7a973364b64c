//! The pull driver (spec §4.7) and read-state machine (spec §4.8): the
//! public [`Reader`] surface consumers drive with [`Reader::read`].
//!
//! Grounded on the teacher's own `Reader` split between a thin public
//! surface (`reader/mod.rs`) and source-specific constructors
//! (`reader/slice_reader.rs`, `reader/buffered_reader.rs`), and on
//! `reader/ns_reader.rs` for the shape of a namespace-aware wrapper around
//! a lower-level event stream — here folded into one type because, unlike
//! `quick-xml`, namespace resolution is not an optional add-on: spec §1
//! requires every emitted element to already be namespace-qualified.

mod scan;

use std::collections::VecDeque;

use crate::attributes;
use crate::config::ReaderConfig;
use crate::cursor::{CharCursor, EOF_CHAR};
use crate::error::{Error, Result};
use crate::node::{Node, NodeKind};
use crate::source::{CharSource, ReadSource, StrSource};
use crate::stack::ElementStack;
use crate::tree;

/// Read-state machine, spec §4.8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Initial,
    Interactive,
    EndOfFile,
    Closed,
}

/// Where the cursor is currently positioned relative to the last-returned
/// node: on the node itself, or (after `move_to_attribute`/
/// `move_to_first_attribute`/`read_attribute_value`) on one of its
/// attributes or that attribute's synthetic text child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Node,
    Attribute(usize),
    AttributeValue(usize),
}

/// A pull-mode HTML reader. Consumes a character source and exposes a
/// linear stream of [`Node`]s via [`Reader::read`].
pub struct Reader<S> {
    cursor: CharCursor<S>,
    config: ReaderConfig,
    stack: ElementStack,
    queue: VecDeque<Node>,
    current: Node,
    position: Position,
    /// The element `move_to_attribute`-family calls moved away from;
    /// restored as `current` by `move_to_element`.
    saved_element: Option<Node>,
    read_state: ReadState,
    close_input: bool,
    /// Whether the last node *produced* (not necessarily emitted past an
    /// `ignore_*` filter) was a `Text` node, used by the text scanner's
    /// leading-whitespace rule (spec §4.6). Tracked independently of
    /// filtering so `ignore_insignificant_whitespace` cannot change how
    /// unrelated nodes are scanned (spec §8).
    last_was_text: bool,
    /// Backing store for the `name_table` setting; unused (and empty) when
    /// that setting is off.
    names: crate::intern::NameTable,
}

impl<'a> Reader<StrSource<'a>> {
    /// Creates a reader borrowing directly from a `&str` (no allocation for
    /// the source itself). Mirrors the teacher's `Reader::from_str`
    /// (`reader/slice_reader.rs`).
    pub fn from_str(input: &'a str) -> Self {
        Reader::new(StrSource::new(input), ReaderConfig::default())
    }

    pub fn from_str_with_config(input: &'a str, config: ReaderConfig) -> Self {
        Reader::new(StrSource::new(input), config)
    }
}

impl<R: std::io::Read> Reader<ReadSource<R>> {
    /// Creates a reader over anything implementing [`std::io::Read`],
    /// decoding UTF-8 incrementally. Mirrors the teacher's buffered
    /// `Reader::from_reader` (`reader/buffered_reader.rs`).
    pub fn from_reader(input: R) -> Self {
        Reader::new(ReadSource::new(input), ReaderConfig::default())
    }

    pub fn from_reader_with_config(input: R, config: ReaderConfig) -> Self {
        Reader::new(ReadSource::new(input), config)
    }
}

impl<S: CharSource> Reader<S> {
    fn new(source: S, config: ReaderConfig) -> Self {
        let close_input = config.close_input;
        Reader {
            cursor: CharCursor::new(source),
            config,
            stack: ElementStack::new(),
            queue: VecDeque::new(),
            current: Node::empty(NodeKind::None),
            position: Position::Node,
            saved_element: None,
            read_state: ReadState::Initial,
            close_input,
            last_was_text: false,
            names: crate::intern::NameTable::new(),
        }
    }

    /// Returns an `Rc<str>` for `name`, routed through the `name_table`
    /// interner when that setting is enabled (spec §6).
    pub(super) fn intern_name(&mut self, name: &str) -> std::rc::Rc<str> {
        if self.config.name_table {
            self.names.intern(name)
        } else {
            std::rc::Rc::from(name)
        }
    }

    // -- Properties (spec §6) -------------------------------------------------

    pub fn node_kind(&self) -> NodeKind {
        self.current.kind
    }

    pub fn local_name(&self) -> &str {
        &self.current.local_name
    }

    pub fn prefix(&self) -> &str {
        &self.current.prefix
    }

    pub fn namespace_uri(&self) -> &str {
        &self.current.namespace_uri
    }

    pub fn value(&self) -> &str {
        &self.current.value
    }

    pub fn depth(&self) -> usize {
        self.current.depth.unwrap_or(0)
    }

    pub fn is_empty_element(&self) -> bool {
        self.current.is_empty_element
    }

    pub fn attribute_count(&self) -> usize {
        self.current.attributes.len()
    }

    pub fn eof(&self) -> bool {
        self.read_state == ReadState::EndOfFile
    }

    pub fn read_state(&self) -> ReadState {
        self.read_state
    }

    // -- Attribute cursor (spec §4.7) -----------------------------------------

    pub fn get_attribute(&self, index: usize) -> Result<&str> {
        let attrs = self.element_attributes()?;
        attributes::by_index(attrs, index)
            .map(|a| a.value.as_str())
            .ok_or_else(|| Error::OutOfRange(format!("attribute index {index}")))
    }

    pub fn get_attribute_by_name(&self, local_name: &str, namespace_uri: Option<&str>) -> Option<&str> {
        let attrs = self.element_attributes().ok()?;
        attributes::by_name(attrs, local_name, namespace_uri).map(|(_, a)| a.value.as_str())
    }

    pub fn move_to_attribute(&mut self, index: usize) -> Result<()> {
        let attrs = self.element_attributes()?;
        if index >= attrs.len() {
            return Err(Error::OutOfRange(format!("attribute index {index}")));
        }
        self.enter_attribute(index);
        Ok(())
    }

    pub fn move_to_attribute_by_name(
        &mut self,
        local_name: &str,
        namespace_uri: Option<&str>,
    ) -> Result<bool> {
        let attrs = self.element_attributes()?;
        match attributes::by_name(attrs, local_name, namespace_uri) {
            Some((idx, _)) => {
                self.enter_attribute(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn move_to_first_attribute(&mut self) -> Result<bool> {
        let attrs = self.element_attributes()?;
        if attrs.is_empty() {
            return Ok(false);
        }
        self.enter_attribute(0);
        Ok(true)
    }

    pub fn move_to_next_attribute(&mut self) -> Result<bool> {
        let next = match self.position {
            Position::Attribute(i) | Position::AttributeValue(i) => i + 1,
            Position::Node if self.current.kind == NodeKind::Element => 0,
            Position::Node => {
                return Err(Error::InvalidState(
                    "not positioned on an element or attribute".into(),
                ))
            }
        };
        let attrs = self.element_attributes()?;
        if next >= attrs.len() {
            return Ok(false);
        }
        self.enter_attribute(next);
        Ok(true)
    }

    pub fn move_to_element(&mut self) -> Result<()> {
        match self.saved_element.take() {
            Some(element) => {
                self.current = element;
                self.position = Position::Node;
                Ok(())
            }
            None if self.current.kind == NodeKind::Element => {
                self.position = Position::Node;
                Ok(())
            }
            None => Err(Error::InvalidState(
                "not positioned on an element or attribute".into(),
            )),
        }
    }

    /// Pushes a synthetic `Text` child for the attribute the cursor is
    /// currently positioned on, so the consumer sees exactly one text child
    /// per attribute (spec §4.7).
    pub fn read_attribute_value(&mut self) -> Result<bool> {
        let index = match self.position {
            Position::Attribute(i) => i,
            Position::AttributeValue(i) => i,
            Position::Node => {
                return Err(Error::InvalidState(
                    "not positioned on an attribute".into(),
                ))
            }
        };
        let value = {
            let attrs = self.element_attributes()?;
            match attributes::by_index(attrs, index) {
                Some(a) => a.value.clone(),
                None => return Err(Error::OutOfRange(format!("attribute index {index}"))),
            }
        };
        self.current = Node::text(NodeKind::Text, value);
        self.position = Position::AttributeValue(index);
        Ok(true)
    }

    fn enter_attribute(&mut self, index: usize) {
        if self.saved_element.is_none() {
            self.saved_element = Some(self.current.clone());
        }
        let attrs = self.saved_element.as_ref().unwrap().attributes.clone();
        let attr = &attrs[index];
        let mut node = Node::text(NodeKind::Attribute, attr.value.clone());
        node.prefix = attr.prefix.clone();
        node.local_name = attr.local_name.clone();
        node.namespace_uri = attr.namespace_uri.clone();
        node.depth = self.saved_element.as_ref().unwrap().depth.map(|d| d + 1);
        self.current = node;
        self.position = Position::Attribute(index);
    }

    fn element_attributes(&self) -> Result<&[crate::node::AttributeNode]> {
        let element = match self.position {
            Position::Node => &self.current,
            Position::Attribute(_) | Position::AttributeValue(_) => {
                self.saved_element.as_ref().unwrap()
            }
        };
        if element.kind != NodeKind::Element {
            return Err(Error::InvalidState(
                "current node is not an element".into(),
            ));
        }
        Ok(&element.attributes)
    }

    // -- Namespace lookups -----------------------------------------------------

    /// Resolves `prefix` in the context of the currently open element stack
    /// (spec §4.4, §6 "Methods: lookup_namespace").
    pub fn lookup_namespace(&self, prefix: &str) -> String {
        self.stack.resolve(prefix, self.config.emit_html_namespace).to_string()
    }

    // -- Lifecycle ---------------------------------------------------------

    pub fn close(&mut self) {
        self.read_state = ReadState::Closed;
        self.stack = ElementStack::new();
        self.queue.clear();
        // Nothing further to release: owned sources (`ReadSource<R>`) drop
        // their inner reader when `self` drops; `close_input` only matters
        // for the non-owning collaborator contract described in spec §5,
        // which this in-process design satisfies by always owning `S`.
        let _ = self.close_input;
    }

    // -- The read cycle (spec §4.7) ------------------------------------------

    pub fn read(&mut self) -> Result<bool> {
        if self.read_state == ReadState::Closed {
            return Ok(false);
        }
        if self.read_state == ReadState::EndOfFile {
            return Ok(false);
        }
        if self.read_state == ReadState::Initial {
            self.read_state = ReadState::Interactive;
        }
        self.position = Position::Node;
        self.saved_element = None;

        let mut iterations = 0usize;
        loop {
            iterations += 1;
            if iterations > self.config.iteration_cap {
                return Err(Error::MalformedInput(
                    "inner read loop exceeded the safety iteration cap".into(),
                ));
            }

            let produced = if let Some(node) = self.queue.pop_front() {
                Some(node)
            } else {
                let c = self.cursor.peek();
                if c == EOF_CHAR && self.cursor.eof() {
                    match self.handle_eof() {
                        Some(node) => Some(node),
                        None => return Ok(false),
                    }
                } else if c == '<' {
                    self.scan_markup()?
                } else {
                    self.scan_text()?
                }
            };

            let node = match produced {
                Some(node) => node,
                None => continue,
            };
            // Tracked regardless of `should_emit` so an `ignore_*` filter
            // cannot change how later text is scanned (spec §8).
            self.last_was_text = node.kind == NodeKind::Text;
            if self.should_emit(&node) {
                self.adopt(node);
                return Ok(true);
            }
        }
    }

    fn adopt(&mut self, node: Node) {
        self.current = node;
        self.position = Position::Node;
    }

    fn should_emit(&self, node: &Node) -> bool {
        match node.kind {
            NodeKind::Comment => !self.config.ignore_comments,
            NodeKind::ProcessingInstruction => !self.config.ignore_processing_instructions,
            NodeKind::Whitespace => !self.config.ignore_insignificant_whitespace,
            _ => true,
        }
    }

    fn handle_eof(&mut self) -> Option<Node> {
        if let Some(top) = self.stack.pop() {
            Some(tree::make_end_element(&top))
        } else if self.read_state != ReadState::EndOfFile {
            self.read_state = ReadState::EndOfFile;
            Some(Node::empty(NodeKind::EndEntity))
        } else {
            None
        }
    }
}
