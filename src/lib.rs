//! A pull-mode, tag-soup-tolerant HTML5 reader.
//!
//! `quick-html` scans HTML the way a browser's tree builder does —
//! implicitly closing unbalanced tags, synthesizing missing `<html>`/
//! `<body>`/`<tbody>` ancestors, forcing void elements empty — but exposes
//! the result as a flat, namespace-qualified, well-formed-in-the-XML-sense
//! node stream through a cursor-style [`Reader`] API, instead of building an
//! in-memory DOM.
//!
//! ```
//! use quick_html::{NodeKind, Reader};
//!
//! let mut reader = Reader::from_str("<p>Hello <b>world</b></p>");
//! let mut seen = Vec::new();
//! while reader.read().unwrap() {
//!     if reader.node_kind() == NodeKind::Element {
//!         seen.push(reader.local_name().to_string());
//!     }
//! }
//! assert_eq!(seen, vec!["html", "body", "p", "b"]);
//! ```
//!
//! # Features
//!
//! - `log`: emits `trace!`-level diagnostics at tree-construction decision
//!   points (implicit closes, synthesized ancestors). Off by default so the
//!   crate has no required dependency at all.
#![forbid(unsafe_code)]

mod attributes;
mod config;
mod cursor;
mod entities;
mod error;
mod intern;
mod namespace;
mod node;
mod reader;
mod scanner;
mod source;
mod stack;
mod tree;

pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use namespace::{HTML_NS, MATHML_NS, SVG_NS, XLINK_NS, XML_NS};
pub use node::{AttributeNode, NodeKind};
pub use reader::{ReadState, Reader};
