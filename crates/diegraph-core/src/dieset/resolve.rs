//! Name-path resolution.

use gimli::constants;

use super::DieSet;
use crate::types::Offset;

/// Bound on consecutive type-qualifier hops, in case a malformed file
/// chains qualifiers in a cycle.
const MAX_QUALIFIER_DEPTH: usize = 32;

impl DieSet
{
    /// Follow `path` by name from `start`.
    ///
    /// An empty path names `start` itself. Type qualifiers (`const`,
    /// `volatile`, pointers, typedefs, ...) are transparent: lookup continues
    /// at the type they refer to with the same remaining path. Entries whose
    /// kind has named children (and the root) are searched child by child
    /// for the next component. Anything else ends the lookup; there are no
    /// partial matches.
    ///
    /// ```rust
    /// use diegraph_core::prelude::*;
    /// use gimli::constants::{DW_TAG_compile_unit, DW_TAG_subprogram};
    ///
    /// let factory = Factory::new();
    /// let mut set = DieSet::new();
    /// let cu = factory.create(&mut set, DW_TAG_compile_unit, Offset::ROOT, Some("a.c")).unwrap();
    /// let main = factory.create(&mut set, DW_TAG_subprogram, cu, Some("main")).unwrap();
    /// assert_eq!(set.resolve_named_path(Offset::ROOT, &["a.c", "main"]), Some(main));
    /// assert_eq!(set.resolve_named_path(cu, &["nope"]), None);
    /// ```
    #[must_use]
    pub fn resolve_named_path<S: AsRef<str>>(&self, start: Offset, path: &[S]) -> Option<Offset>
    {
        let mut current = start;
        let mut remaining = path;
        let mut qualifier_hops = 0;

        loop {
            let die = self.find(current)?;
            let Some((wanted, rest)) = remaining.split_first() else {
                return Some(current);
            };

            let kind = die.kind();
            if kind.is_type() && !kind.has_named_children() {
                qualifier_hops += 1;
                if qualifier_hops > MAX_QUALIFIER_DEPTH {
                    return None;
                }
                current = die
                    .get_attr(constants::DW_AT_type)
                    .and_then(|value| value.as_reference())
                    .map(|r| r.target)?;
                continue;
            }

            if !(kind.has_named_children() || die.is_root()) {
                return None;
            }
            let wanted = wanted.as_ref();
            current = die
                .children()
                .iter()
                .copied()
                .find(|child| self.find(*child).and_then(|c| c.name()) == Some(wanted))?;
            remaining = rest;
            qualifier_hops = 0;
        }
    }

    /// Resolve a single name directly under any compilation unit, trying
    /// units in order. This is where a file-scope declaration lives.
    #[must_use]
    pub fn resolve_toplevel_name(&self, name: &str) -> Option<Offset>
    {
        self.root()
            .children()
            .iter()
            .find_map(|unit| self.resolve_named_path(*unit, &[name]))
    }
}
