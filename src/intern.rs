//! The optional `name-table` setting (spec §6: "Optional interning table for
//! prefixes and local names"). The teacher pulls no interning crate, so this
//! is a crate-local `HashMap<Box<str>, Rc<str>>`, consulted only when
//! [`crate::config::ReaderConfig::name_table`] is set; otherwise every
//! element/attribute name is allocated fresh, matching the teacher's default
//! behavior exactly.

use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub(crate) struct NameTable {
    table: HashMap<Box<str>, Rc<str>>,
}

impl NameTable {
    pub(crate) fn new() -> Self {
        Self { table: HashMap::new() }
    }

    /// Returns a shared `Rc<str>` for `name`, reusing a prior allocation for
    /// the same text when one exists.
    pub(crate) fn intern(&mut self, name: &str) -> Rc<str> {
        if let Some(existing) = self.table.get(name) {
            return existing.clone();
        }
        let rc: Rc<str> = Rc::from(name);
        self.table.insert(name.into(), rc.clone());
        rc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_names_share_one_allocation() {
        let mut table = NameTable::new();
        let a = table.intern("div");
        let b = table.intern("div");
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_names_stay_distinct() {
        let mut table = NameTable::new();
        let a = table.intern("div");
        let b = table.intern("span");
        assert!(!Rc::ptr_eq(&a, &b));
    }
}
