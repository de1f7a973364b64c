//! Free functions backing the attribute cursor (spec §4.7).
//!
//! Kept as small standalone lookups — rather than methods directly on
//! [`crate::reader::Reader`] — the way the teacher keeps attribute
//! addressing (`attributes::Attributes`, `events::attributes::Attribute`)
//! separate from the main `Reader` type even though it's only ever used
//! from there.

use crate::node::AttributeNode;

/// Finds the attribute at `index`, by its position in document order.
pub fn by_index(attrs: &[AttributeNode], index: usize) -> Option<&AttributeNode> {
    attrs.get(index)
}

/// Finds an attribute by local name, optionally constrained to a namespace
/// URI. Returns its index alongside the attribute so the cursor can record
/// "currently positioned on attribute N".
pub fn by_name<'a>(
    attrs: &'a [AttributeNode],
    local_name: &str,
    namespace_uri: Option<&str>,
) -> Option<(usize, &'a AttributeNode)> {
    attrs.iter().enumerate().find(|(_, a)| {
        &*a.local_name == local_name
            && namespace_uri.map_or(true, |ns| &*a.namespace_uri == ns)
    })
}
