//! # Debug-info reader seam
//!
//! [`GraphBuilder`](crate::builder::GraphBuilder) never decodes DWARF bytes
//! itself. It walks whatever implements [`DebugInfoReader`]: a cursor over
//! compilation-unit headers that hands out one [`RawEntry`] at a time and
//! answers "first child" and "next sibling" questions about it.
//!
//! The end of a child chain, a sibling chain or the unit list is `None`,
//! never an error. Errors are reserved for input the reader cannot parse.
//!
//! [`GimliReader`] is the implementation used for real files.

mod dwarf;

pub use self::dwarf::{GimliReader, OwnedDwarf, OwnedReader};

use gimli::{DwAt, DwTag};

use crate::attr::AttributeValue;
use crate::error::DieResult;
use crate::types::Offset;

/// Header of one compilation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitHeader
{
    /// DWARF version stamp
    pub version: u16,
    /// Section offset of the unit header (not of its root entry)
    pub offset: Offset,
    /// Size of a target address in bytes
    pub address_size: u8,
}

/// One attribute as the reader decoded it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAttribute
{
    pub name: DwAt,
    /// `None` for encodings the graph does not model (`DW_FORM_block*`).
    pub value: Option<AttributeValue>,
}

/// One entry handed out by a reader.
pub trait RawEntry
{
    fn tag(&self) -> DwTag;

    /// Section offset of the entry.
    fn offset(&self) -> Offset;

    /// Section offset of the root entry of the entry's unit.
    fn cu_offset(&self) -> Offset;

    fn attr_count(&self) -> usize;

    /// Attribute at `index`, `None` past the end.
    fn attr(&self, index: usize) -> Option<&RawAttribute>;

    /// All attributes in file order.
    fn attrs(&self) -> impl Iterator<Item = &RawAttribute>
    {
        (0..self.attr_count()).filter_map(|index| self.attr(index))
    }
}

/// Cursor over the compilation units of one file.
pub trait DebugInfoReader
{
    type Entry: RawEntry;

    /// Advance to the next unit. `None` once every unit has been seen.
    fn next_unit_header(&mut self) -> DieResult<Option<UnitHeader>>;

    /// Root entry of the unit last returned by
    /// [`next_unit_header`](Self::next_unit_header).
    fn unit_root(&mut self) -> DieResult<Self::Entry>;

    fn first_child(&mut self, entry: &Self::Entry) -> DieResult<Option<Self::Entry>>;

    fn next_sibling(&mut self, entry: &Self::Entry) -> DieResult<Option<Self::Entry>>;
}
