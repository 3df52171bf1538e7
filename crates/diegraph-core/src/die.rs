//! # Entries
//!
//! A [`Die`] is one node of the graph. It owns its attributes and the
//! ordered set of its children's offsets; its parent and any references it
//! holds are plain offsets, re-resolved through the owning
//! [`DieSet`](crate::dieset::DieSet) whenever they are followed.
//!
//! Navigation that needs more than the node itself (next sibling, the parent
//! node, the path from the root) lives on `DieSet`.

use std::collections::{BTreeMap, BTreeSet};

use gimli::{constants, DwAt, DwTag};

use crate::attr::{AttributeValue, DieRef};
use crate::types::Offset;
use crate::variants::DieKind;

/// Discriminant used in the back-reference index for the parent link.
///
/// Attribute kind 0 is not a valid DWARF attribute, so it cannot collide
/// with a real one.
pub const PARENT_LINK: DwAt = DwAt(0);

/// Attribute map of an entry, ordered by attribute kind.
pub type AttributeMap = BTreeMap<DwAt, AttributeValue>;

/// One debugging-information entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Die
{
    kind: DieKind,
    offset: Offset,
    cu_offset: Offset,
    parent: Option<Offset>,
    attrs: AttributeMap,
    children: BTreeSet<Offset>,
}

impl Die
{
    /// A childless, attribute-less entry under `parent`.
    #[must_use]
    pub fn new(kind: DieKind, offset: Offset, parent: Offset, cu_offset: Offset) -> Self
    {
        Self {
            kind,
            offset,
            cu_offset,
            parent: Some(parent),
            attrs: AttributeMap::new(),
            children: BTreeSet::new(),
        }
    }

    /// The synthetic file-level root at offset 0.
    pub(crate) fn toplevel() -> Self
    {
        Self {
            kind: DieKind::FileToplevel,
            offset: Offset::ROOT,
            cu_offset: Offset::ROOT,
            parent: None,
            attrs: AttributeMap::new(),
            children: BTreeSet::new(),
        }
    }

    /// Same entry re-keyed; used when cloning into another set.
    pub(crate) fn with_parts(
        kind: DieKind,
        offset: Offset,
        parent: Option<Offset>,
        cu_offset: Offset,
        attrs: AttributeMap,
        children: BTreeSet<Offset>,
    ) -> Self
    {
        Self {
            kind,
            offset,
            cu_offset,
            parent,
            attrs,
            children,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DieKind
    {
        self.kind
    }

    #[must_use]
    pub fn tag(&self) -> DwTag
    {
        self.kind.tag()
    }

    #[must_use]
    pub fn offset(&self) -> Offset
    {
        self.offset
    }

    /// Offset of the compilation unit this entry belongs to.
    #[must_use]
    pub fn cu_offset(&self) -> Offset
    {
        self.cu_offset
    }

    /// Parent offset; `None` only for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Offset>
    {
        self.parent
    }

    #[must_use]
    pub fn is_root(&self) -> bool
    {
        self.parent.is_none()
    }

    #[must_use]
    pub fn attrs(&self) -> &AttributeMap
    {
        &self.attrs
    }

    #[must_use]
    pub fn has_attr(&self, attr: DwAt) -> bool
    {
        self.attrs.contains_key(&attr)
    }

    #[must_use]
    pub fn get_attr(&self, attr: DwAt) -> Option<&AttributeValue>
    {
        self.attrs.get(&attr)
    }

    /// Insert or overwrite an attribute, returning the previous value.
    ///
    /// A reference value is re-stamped with this entry's offset and `attr`
    /// as its holder, whatever the caller put there.
    pub fn put_attr(&mut self, attr: DwAt, value: AttributeValue) -> Option<AttributeValue>
    {
        let value = match value {
            AttributeValue::Reference(r) => AttributeValue::Reference(DieRef {
                referencing: self.offset,
                attr,
                ..r
            }),
            other => other,
        };
        self.attrs.insert(attr, value)
    }

    /// Store a reference to `target` under `attr`.
    pub fn put_ref(&mut self, attr: DwAt, target: Offset) -> Option<AttributeValue>
    {
        self.put_attr(attr, AttributeValue::Reference(DieRef::to(target)))
    }

    pub fn remove_attr(&mut self, attr: DwAt) -> Option<AttributeValue>
    {
        self.attrs.remove(&attr)
    }

    #[must_use]
    pub fn name(&self) -> Option<&str>
    {
        self.get_attr(constants::DW_AT_name).and_then(AttributeValue::as_str)
    }

    pub fn set_name(&mut self, name: Option<&str>)
    {
        match name {
            Some(name) => {
                self.put_attr(constants::DW_AT_name, AttributeValue::from(name));
            }
            None => {
                self.remove_attr(constants::DW_AT_name);
            }
        }
    }

    /// Children offsets in ascending order, which is sibling order.
    #[must_use]
    pub fn children(&self) -> &BTreeSet<Offset>
    {
        &self.children
    }

    #[must_use]
    pub fn first_child(&self) -> Option<Offset>
    {
        self.children.first().copied()
    }

    /// The child following `child` in sibling order.
    #[must_use]
    pub fn child_after(&self, child: Offset) -> Option<Offset>
    {
        use std::ops::Bound::{Excluded, Unbounded};
        self.children.range((Excluded(child), Unbounded)).next().copied()
    }

    /// Reference-kind attributes, excluding `DW_AT_sibling`, which is an
    /// encoding artifact rather than a graph edge.
    pub fn ref_attrs(&self) -> impl Iterator<Item = (DwAt, &DieRef)> + '_
    {
        self.attrs.iter().filter_map(|(attr, value)| match value {
            AttributeValue::Reference(r) if *attr != constants::DW_AT_sibling => Some((*attr, r)),
            _ => None,
        })
    }

    pub(crate) fn children_mut(&mut self) -> &mut BTreeSet<Offset>
    {
        &mut self.children
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut AttributeMap
    {
        &mut self.attrs
    }
}
