//! Shared helpers for the integration test files.

use quick_html::{NodeKind, Reader, ReaderConfig};

/// A flattened snapshot of one emitted node: its kind, qualified name
/// (empty for kinds that have none), and text value. Compact enough to
/// compare a whole document's worth of nodes in one `assert_eq!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: NodeKind,
    pub name: String,
    pub value: String,
}

pub fn snap(kind: NodeKind, name: &str, value: &str) -> Snapshot {
    Snapshot {
        kind,
        name: name.to_string(),
        value: value.to_string(),
    }
}

pub fn drain_str(input: &str) -> Vec<Snapshot> {
    drain_str_with_config(input, ReaderConfig::default())
}

pub fn drain_str_with_config(input: &str, config: ReaderConfig) -> Vec<Snapshot> {
    let mut reader = Reader::from_str_with_config(input, config);
    let mut out = Vec::new();
    while reader.read().unwrap() {
        let name = if reader.prefix().is_empty() {
            reader.local_name().to_string()
        } else {
            format!("{}:{}", reader.prefix(), reader.local_name())
        };
        out.push(Snapshot {
            kind: reader.node_kind(),
            name,
            value: reader.value().to_string(),
        });
    }
    out
}
