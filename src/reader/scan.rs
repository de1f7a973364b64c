//! Markup and text scanning (spec §4.2, §4.5, §4.6): turns the raw character
//! stream into the [`Node`]s [`super::Reader::read`] hands back.
//!
//! Grounded on the teacher's `parser` module (`src/parser/mod.rs` and its
//! `comment`/`cdata`/`pi`/`doctype`/`element` submodules), which dispatches
//! on the byte right after `<` the same way [`Reader::scan_markup`] dispatches
//! on the char right after it; the attribute loop is grounded on
//! `reader/buffered_reader.rs`'s `read_bang_element`/`read_elem_until`
//! pairing of "read a name, then greedily read name=value pairs until the
//! tag closes".

use std::rc::Rc;

use crate::cursor::EOF_CHAR;
use crate::entities;
use crate::error::Result;
use crate::node::{AttributeNode, Node, NodeKind};
use crate::scanner::{self, is_whitespace};
use crate::source::CharSource;
use crate::stack;
use crate::tree;

use super::Reader;

impl<S: CharSource> Reader<S> {
    /// Entry point once the cursor sits on `<`. Consumes the `<` and
    /// dispatches on what follows (spec §4.5).
    pub(super) fn scan_markup(&mut self) -> Result<Option<Node>> {
        self.cursor.read(); // consume '<'
        match self.cursor.peek() {
            '!' => self.scan_bang(),
            '/' => self.scan_end_tag(),
            '?' => self.scan_processing_instruction(),
            _ => self.scan_start_tag(),
        }
    }

    /// `<!--`, `<![CDATA[`, or `<!DOCTYPE` (spec §4.5 "Doctype", §3 `CDATA`).
    /// A bang that matches none of these is tolerated the same way a
    /// malformed start tag is: treated as a one-character literal and the
    /// cursor advances past just the `<` (spec §7 kind 6, bounded progress).
    fn scan_bang(&mut self) -> Result<Option<Node>> {
        if scanner::match_literal(&mut self.cursor, "--", false) {
            let text = scanner::scan_until_string(&mut self.cursor, "-->");
            return Ok(Some(Node::text(NodeKind::Comment, text)));
        }
        if scanner::match_literal(&mut self.cursor, "[CDATA[", false) {
            let text = scanner::scan_until_string(&mut self.cursor, "]]>");
            return Ok(Some(Node::text(NodeKind::CDATA, text)));
        }
        if scanner::match_literal(&mut self.cursor, "DOCTYPE", true) {
            scanner::scan_until_char(&mut self.cursor, '>');
            return Ok(Some(tree::make_doctype_node()));
        }
        Ok(Some(Node::text(NodeKind::Text, "<".to_string())))
    }

    /// `<?...?>` (spec §3 `ProcessingInstruction`). The target is the name
    /// immediately after `?`; everything up to `?>` is the value, trimmed of
    /// its own leading whitespace.
    fn scan_processing_instruction(&mut self) -> Result<Option<Node>> {
        self.cursor.read(); // consume '?'
        let (prefix, local) = scanner::scan_name(&mut self.cursor);
        scanner::skip_whitespace(&mut self.cursor);
        let value = scanner::scan_until_string(&mut self.cursor, "?>");
        let mut node = Node::text(NodeKind::ProcessingInstruction, value);
        node.prefix = prefix.into();
        node.local_name = local.into();
        Ok(Some(node))
    }

    /// `</name>` (spec §4.5 "End-tag handling"). A name-less end tag (e.g.
    /// `</>` or `</ >`) is discarded silently after consuming up to the next
    /// `>`, the same bounded-progress tolerance as a malformed start tag.
    fn scan_end_tag(&mut self) -> Result<Option<Node>> {
        self.cursor.read(); // consume '/'
        let (_prefix, local) = scanner::scan_name(&mut self.cursor);
        scanner::scan_until_char(&mut self.cursor, '>');
        if local.is_empty() {
            return Ok(None);
        }
        Ok(tree::close_element(&mut self.stack, &mut self.queue, &local))
    }

    /// `<name ...>` or `<name .../>` (spec §4.5 Steps A-D, §4.4 for
    /// namespace resolution of the tag and its attributes).
    fn scan_start_tag(&mut self) -> Result<Option<Node>> {
        let (prefix, local) = scanner::scan_name(&mut self.cursor);
        if local.is_empty() {
            // Not actually a tag after all: consume just the '<' so the
            // loop is guaranteed to make progress (spec §7 kind 6) and
            // retry the rest as text on the next iteration.
            return Ok(Some(Node::text(NodeKind::Text, "<".to_string())));
        }

        let mut raw_attrs: Vec<(String, String, String)> = Vec::new();
        loop {
            scanner::skip_whitespace(&mut self.cursor);
            let c = self.cursor.peek();
            if c == '/' || c == '>' || (c == EOF_CHAR && self.cursor.eof()) {
                break;
            }
            let (aprefix, alocal) = scanner::scan_name(&mut self.cursor);
            if alocal.is_empty() {
                // Junk character where an attribute name was expected;
                // consume it and keep looking (bounded progress).
                self.cursor.read();
                continue;
            }
            scanner::skip_whitespace(&mut self.cursor);
            let value = if self.cursor.peek() == '=' {
                self.cursor.read();
                scanner::scan_attr_value(&mut self.cursor)
            } else {
                String::new()
            };
            raw_attrs.push((aprefix, alocal, value));
        }

        let mut self_closing = false;
        if self.cursor.peek() == '/' {
            self.cursor.read();
            self_closing = true;
        }
        scanner::skip_whitespace(&mut self.cursor);
        if self.cursor.peek() == '>' {
            self.cursor.read();
        }
        // A still-unclosed tag (EOF before '>') is tolerated: whatever was
        // scanned is used as-is (spec §7 kind 6).

        let mut element = Node::empty(NodeKind::Element);
        element.local_name = self.intern_name(&local);
        element.prefix = self.intern_name(&prefix);
        element.is_empty_element = self_closing;

        let mut namespace_map: Vec<(Rc<str>, Rc<str>)> = Vec::new();
        for (aprefix, alocal, value) in &raw_attrs {
            if aprefix.is_empty() && alocal == "xmlns" {
                namespace_map.push((Rc::from(""), Rc::from(value.as_str())));
            } else if aprefix == "xmlns" {
                namespace_map.push((Rc::from(alocal.as_str()), Rc::from(value.as_str())));
            }
        }
        if prefix.is_empty() && !namespace_map.iter().any(|(p, _)| p.is_empty()) {
            if let Some(implicit) = stack::implicit_default_namespace(&local) {
                namespace_map.push((Rc::from(""), Rc::from(implicit)));
            }
        }
        element.namespace_map = namespace_map;
        element.namespace_uri = self.resolve_own_namespace(&prefix, &element.namespace_map);

        let mut attributes = Vec::with_capacity(raw_attrs.len());
        for (aprefix, alocal, value) in raw_attrs {
            let is_xmlns_decl = (aprefix.is_empty() && alocal == "xmlns") || aprefix == "xmlns";
            let namespace_uri: Rc<str> = if aprefix.is_empty() || is_xmlns_decl {
                Rc::from("")
            } else {
                self.resolve_attribute_namespace(&aprefix, &element.namespace_map)
            };
            let aprefix_rc = self.intern_name(&aprefix);
            let alocal_rc = self.intern_name(&alocal);
            attributes.push(AttributeNode {
                prefix: aprefix_rc,
                local_name: alocal_rc,
                namespace_uri,
                value,
            });
        }
        element.attributes = attributes;

        Ok(Some(tree::open_element(&mut self.stack, &mut self.queue, element)))
    }

    /// Resolves the namespace URI an element itself takes, given its own
    /// prefix and the namespace bindings it declares (spec §4.4). An empty
    /// prefix falls back to the namespace map chain (which already captures
    /// `emit-html-namespace` and `svg`/`math` defaulting via
    /// [`stack::implicit_default_namespace`]); any other prefix is resolved
    /// by walking the map chain, including this element's own just-built map
    /// so a tag can declare and use a prefix in the same attribute list.
    fn resolve_own_namespace(&self, prefix: &str, own_map: &[(Rc<str>, Rc<str>)]) -> Rc<str> {
        if let Some((_, uri)) = own_map.iter().find(|(p, _)| &**p == prefix) {
            return uri.clone();
        }
        self.stack.resolve(prefix, self.config.emit_html_namespace)
    }

    fn resolve_attribute_namespace(&self, prefix: &str, own_map: &[(Rc<str>, Rc<str>)]) -> Rc<str> {
        if let Some((_, uri)) = own_map.iter().find(|(p, _)| &**p == prefix) {
            return uri.clone();
        }
        // Attributes never inherit the ambient default namespace (spec
        // §4.4): an unprefixed attribute is always unqualified, handled by
        // the caller before reaching here; a *prefixed* attribute whose
        // prefix isn't declared anywhere falls through to the same
        // xlink/xml/synthetic resolution elements use.
        self.stack.resolve(prefix, false)
    }

    /// Scans one run of non-markup content (spec §4.6): leading whitespace
    /// significance tracking, the "nothing open yet" synthesis case, and the
    /// main body/trailing-whitespace split. Dispatches to
    /// [`Self::scan_raw_text_node`] first when the innermost open element is
    /// an HTML `script`/`style`.
    pub(super) fn scan_text(&mut self) -> Result<Option<Node>> {
        if self.config.raw_text_elements {
            if let Some(top) = self.stack.top() {
                if tree::is_raw_text_element(&top.local_name) && tree::is_html_namespace(&top.namespace_uri) {
                    return Ok(self.scan_raw_text_node());
                }
            }
        }

        let leading_ws = scanner::skip_whitespace(&mut self.cursor);
        let next_is_lt = self.cursor.peek() == '<';
        if !next_is_lt {
            if let Some(top) = self.stack.top_mut() {
                top.whitespace_significant = true;
            }
        }
        let at_eof = self.cursor.eof();

        if !leading_ws.is_empty() && (!self.last_was_text || at_eof) {
            let significant = self.stack.top().map_or(false, |t| t.whitespace_significant);
            let kind = if significant {
                NodeKind::SignificantWhitespace
            } else {
                NodeKind::Whitespace
            };
            return Ok(Some(Node::text(kind, leading_ws)));
        }

        if self.stack.is_empty() {
            tree::synthesize_root_wrappers(&mut self.stack, &mut self.queue);
            // Whatever was skipped as leading whitespace belongs after the
            // synthesized ancestors now sitting in the queue, not before
            // them; push it back character by character so it's rescanned
            // once `html`/`body` have been drained.
            for c in leading_ws.chars().rev() {
                self.cursor.unread(c);
            }
            return Ok(None);
        }

        let mut body = leading_ws;
        loop {
            let c = self.cursor.peek();
            if c == '<' || (c == EOF_CHAR && self.cursor.eof()) {
                break;
            }
            body.push(self.cursor.read());
        }

        let mut chars: Vec<char> = body.chars().collect();
        let trailing_len = chars.iter().rev().take_while(|&&c| is_whitespace(c)).count();
        let trailing: String = chars.split_off(chars.len() - trailing_len).into_iter().collect();
        let main: String = chars.into_iter().collect();

        if !trailing.is_empty() {
            self.queue.push_back(Node::text(NodeKind::SignificantWhitespace, trailing));
        }
        if main.is_empty() {
            return Ok(None);
        }
        let decoded = entities::decode(&main).into_owned();
        Ok(Some(Node::text(NodeKind::Text, decoded)))
    }

    /// Raw-text body for the currently open `script`/`style` element.
    /// Returns `None` (rather than an empty `Text` node) when nothing
    /// precedes the end tag, so the outer loop falls straight through to
    /// scanning that end tag.
    fn scan_raw_text_node(&mut self) -> Option<Node> {
        let name = self.stack.top().expect("checked by caller").local_name.to_string();
        let text = scanner::scan_raw_text(&mut self.cursor, &name);
        if text.is_empty() {
            None
        } else {
            Some(Node::text(NodeKind::Text, text))
        }
    }
}
