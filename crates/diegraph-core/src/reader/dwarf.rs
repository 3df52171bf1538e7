//! `gimli`-backed reader.

use gimli::{
    AttributeValue as GimliValue, DebugInfoUnitHeadersIter, DebuggingInformationEntry, Dwarf, DwAt, DwTag,
    EndianArcSlice, EntriesTreeNode, Reader, RunTimeEndian, Unit, UnitOffset, UnitSectionOffset,
};
use tracing::{debug, trace};

use super::{DebugInfoReader, RawAttribute, RawEntry, UnitHeader};
use crate::attr::{AttributeValue, DieRef, LocList, LocationEntry, Range, RangeList, SectionOffset};
use crate::error::{map_dwarf_error, DieError, DieResult};
use crate::types::{Address, Offset};

pub type OwnedReader = EndianArcSlice<RunTimeEndian>;
pub type OwnedDwarf = Dwarf<OwnedReader>;

/// Entry of the unit currently loaded by a [`GimliReader`].
#[derive(Debug, Clone)]
pub struct GimliEntry
{
    tag: DwTag,
    offset: Offset,
    cu_offset: Offset,
    attrs: Vec<RawAttribute>,
    first_child: Option<usize>,
    next_sibling: Option<usize>,
}

impl RawEntry for GimliEntry
{
    fn tag(&self) -> DwTag
    {
        self.tag
    }

    fn offset(&self) -> Offset
    {
        self.offset
    }

    fn cu_offset(&self) -> Offset
    {
        self.cu_offset
    }

    fn attr_count(&self) -> usize
    {
        self.attrs.len()
    }

    fn attr(&self, index: usize) -> Option<&RawAttribute>
    {
        self.attrs.get(index)
    }
}

/// Reader over the `.debug_info` units of a loaded [`Dwarf`].
///
/// Each unit is decoded in full when its root is requested; entries are
/// then handed out by moving them out of that buffer, so every entry is
/// produced at most once.
pub struct GimliReader<'a>
{
    dwarf: &'a OwnedDwarf,
    headers: DebugInfoUnitHeadersIter<OwnedReader>,
    pending: Option<gimli::UnitHeader<OwnedReader>>,
    entries: Vec<Option<GimliEntry>>,
}

impl<'a> GimliReader<'a>
{
    #[must_use]
    pub fn new(dwarf: &'a OwnedDwarf) -> Self
    {
        Self {
            dwarf,
            headers: dwarf.units(),
            pending: None,
            entries: Vec::new(),
        }
    }

    fn materialize(&self, unit: &Unit<OwnedReader>) -> DieResult<Vec<Option<GimliEntry>>>
    {
        let mut entries = Vec::new();
        let mut tree = unit
            .entries_tree(None)
            .map_err(|err| map_dwarf_error("building unit entry tree", err))?;
        let root = tree
            .root()
            .map_err(|err| map_dwarf_error("navigating unit root", err))?;
        let cu_offset = section_offset(unit, root.entry().offset());
        self.collect(unit, cu_offset, root, &mut entries)?;
        debug!("decoded {} entries of unit {}", entries.len(), cu_offset);
        Ok(entries)
    }

    /// Append `node` and its subtree to `out` in pre-order, returning the
    /// index of `node`.
    fn collect(
        &self,
        unit: &Unit<OwnedReader>,
        cu_offset: Offset,
        node: EntriesTreeNode<'_, '_, '_, OwnedReader>,
        out: &mut Vec<Option<GimliEntry>>,
    ) -> DieResult<usize>
    {
        let index = out.len();
        out.push(Some(self.convert_entry(unit, cu_offset, node.entry())?));

        let mut previous: Option<usize> = None;
        let mut children = node.children();
        while let Some(child) = children
            .next()
            .map_err(|err| map_dwarf_error("iterating entry children", err))?
        {
            let child_index = self.collect(unit, cu_offset, child, out)?;
            let link = previous.unwrap_or(index);
            if let Some(Some(linked)) = out.get_mut(link) {
                if previous.is_some() {
                    linked.next_sibling = Some(child_index);
                } else {
                    linked.first_child = Some(child_index);
                }
            }
            previous = Some(child_index);
        }
        Ok(index)
    }

    fn convert_entry(
        &self,
        unit: &Unit<OwnedReader>,
        cu_offset: Offset,
        entry: &DebuggingInformationEntry<'_, '_, OwnedReader>,
    ) -> DieResult<GimliEntry>
    {
        let mut attrs = Vec::new();
        let mut iter = entry.attrs();
        while let Some(attr) = iter
            .next()
            .map_err(|err| map_dwarf_error("reading entry attributes", err))?
        {
            let value = self.convert_value(unit, attr.name(), attr.value())?;
            attrs.push(RawAttribute { name: attr.name(), value });
        }

        Ok(GimliEntry {
            tag: entry.tag(),
            offset: section_offset(unit, entry.offset()),
            cu_offset,
            attrs,
            first_child: None,
            next_sibling: None,
        })
    }

    fn convert_value(
        &self,
        unit: &Unit<OwnedReader>,
        name: DwAt,
        value: GimliValue<OwnedReader>,
    ) -> DieResult<Option<AttributeValue>>
    {
        let converted = match value {
            GimliValue::Addr(_) | GimliValue::DebugAddrIndex(_) => self
                .dwarf
                .attr_address(unit, value)
                .map_err(|err| map_dwarf_error("resolving address attribute", err))?
                .map(|addr| AttributeValue::Address(Address::new(addr))),
            GimliValue::String(_)
            | GimliValue::DebugStrRef(_)
            | GimliValue::DebugStrRefSup(_)
            | GimliValue::DebugStrOffsetsIndex(_)
            | GimliValue::DebugLineStrRef(_) => Some(AttributeValue::String(self.attr_to_string(unit, value)?)),
            GimliValue::UnitRef(offset) => Some(AttributeValue::Reference(DieRef {
                cross_unit: false,
                ..DieRef::to(section_offset(unit, offset))
            })),
            GimliValue::DebugInfoRef(offset) => Some(AttributeValue::Reference(DieRef {
                cross_unit: true,
                ..DieRef::to(Offset::new(offset.0 as u64))
            })),
            GimliValue::Flag(flag) => Some(AttributeValue::Flag(flag)),
            GimliValue::Data1(v) => Some(AttributeValue::Unsigned(u64::from(v))),
            GimliValue::Data2(v) => Some(AttributeValue::Half(v)),
            GimliValue::Data4(v) => Some(AttributeValue::Unsigned(u64::from(v))),
            GimliValue::Data8(v) | GimliValue::Udata(v) | GimliValue::FileIndex(v) => Some(AttributeValue::Unsigned(v)),
            GimliValue::Sdata(v) => Some(AttributeValue::Signed(v)),
            GimliValue::Encoding(ate) => Some(AttributeValue::Unsigned(u64::from(ate.0))),
            GimliValue::Language(lang) => Some(AttributeValue::Unsigned(u64::from(lang.0))),
            GimliValue::Accessibility(access) => Some(AttributeValue::Unsigned(u64::from(access.0))),
            GimliValue::Visibility(vis) => Some(AttributeValue::Unsigned(u64::from(vis.0))),
            GimliValue::Virtuality(virt) => Some(AttributeValue::Unsigned(u64::from(virt.0))),
            GimliValue::Inline(inl) => Some(AttributeValue::Unsigned(u64::from(inl.0))),
            GimliValue::Ordering(ord) => Some(AttributeValue::Unsigned(u64::from(ord.0))),
            GimliValue::CallingConvention(cc) => Some(AttributeValue::Unsigned(u64::from(cc.0))),
            GimliValue::IdentifierCase(case) => Some(AttributeValue::Unsigned(u64::from(case.0))),
            GimliValue::DecimalSign(sign) => Some(AttributeValue::Unsigned(u64::from(sign.0))),
            GimliValue::Endianity(end) => Some(AttributeValue::Unsigned(u64::from(end.0))),
            GimliValue::AddressClass(class) => Some(AttributeValue::Unsigned(class.0)),
            GimliValue::SecOffset(offset) => Some(AttributeValue::SectionOffset(SectionOffset(offset as u64))),
            GimliValue::DebugLineRef(offset) => Some(AttributeValue::SectionOffset(SectionOffset(offset.0 as u64))),
            GimliValue::DebugMacinfoRef(offset) => Some(AttributeValue::SectionOffset(SectionOffset(offset.0 as u64))),
            GimliValue::DebugMacroRef(offset) => Some(AttributeValue::SectionOffset(SectionOffset(offset.0 as u64))),
            GimliValue::DebugAddrBase(base) => Some(AttributeValue::SectionOffset(SectionOffset(base.0 as u64))),
            GimliValue::DebugStrOffsetsBase(base) => Some(AttributeValue::SectionOffset(SectionOffset(base.0 as u64))),
            GimliValue::DebugLocListsBase(base) => Some(AttributeValue::SectionOffset(SectionOffset(base.0 as u64))),
            GimliValue::DebugRngListsBase(base) => Some(AttributeValue::SectionOffset(SectionOffset(base.0 as u64))),
            GimliValue::RangeListsRef(_) | GimliValue::DebugRngListsIndex(_) => {
                self.convert_ranges(unit, value)?.map(AttributeValue::RangeList)
            }
            GimliValue::LocationListsRef(_) | GimliValue::DebugLocListsIndex(_) => {
                self.convert_locations(unit, value)?.map(AttributeValue::LocList)
            }
            GimliValue::Exprloc(expr) => {
                let bytes = expr
                    .0
                    .to_slice()
                    .map_err(|err| map_dwarf_error("reading location expression", err))?;
                Some(AttributeValue::LocList(vec![LocationEntry::everywhere(bytes.into_owned())]))
            }
            _ => None,
        };

        if converted.is_none() {
            trace!("skipping attribute {} with an unmodelled form", name);
        }
        Ok(converted)
    }

    fn convert_ranges(&self, unit: &Unit<OwnedReader>, value: GimliValue<OwnedReader>) -> DieResult<Option<RangeList>>
    {
        let Some(offset) = self
            .dwarf
            .attr_ranges_offset(unit, value)
            .map_err(|err| map_dwarf_error("resolving range list offset", err))?
        else {
            return Ok(None);
        };
        let mut iter = self
            .dwarf
            .ranges(unit, offset)
            .map_err(|err| map_dwarf_error("reading range list", err))?;
        let mut ranges = RangeList::new();
        while let Some(range) = iter
            .next()
            .map_err(|err| map_dwarf_error("iterating range list", err))?
        {
            ranges.push(Range {
                begin: Address::new(range.begin),
                end: Address::new(range.end),
            });
        }
        Ok(Some(ranges))
    }

    fn convert_locations(&self, unit: &Unit<OwnedReader>, value: GimliValue<OwnedReader>) -> DieResult<Option<LocList>>
    {
        let Some(offset) = self
            .dwarf
            .attr_locations_offset(unit, value)
            .map_err(|err| map_dwarf_error("resolving location list offset", err))?
        else {
            return Ok(None);
        };
        let mut iter = self
            .dwarf
            .locations(unit, offset)
            .map_err(|err| map_dwarf_error("reading location list", err))?;
        let mut list = LocList::new();
        while let Some(entry) = iter
            .next()
            .map_err(|err| map_dwarf_error("iterating location list", err))?
        {
            let expr = entry
                .data
                .0
                .to_slice()
                .map_err(|err| map_dwarf_error("reading location expression", err))?;
            list.push(LocationEntry {
                begin: Address::new(entry.range.begin),
                end: Address::new(entry.range.end),
                expr: expr.into_owned(),
            });
        }
        Ok(Some(list))
    }

    fn attr_to_string(&self, unit: &Unit<OwnedReader>, value: GimliValue<OwnedReader>) -> DieResult<String>
    {
        let reader = self
            .dwarf
            .attr_string(unit, value)
            .map_err(|err| map_dwarf_error("resolving DWARF string", err))?;
        let owned = match reader.to_string() {
            Ok(cow) => cow.into_owned(),
            Err(_) => reader
                .to_string_lossy()
                .map_err(|err| map_dwarf_error("decoding DWARF string", err))?
                .into_owned(),
        };
        Ok(owned)
    }

    fn take(&mut self, index: Option<usize>) -> Option<GimliEntry>
    {
        index.and_then(|index| self.entries.get_mut(index)).and_then(Option::take)
    }
}

impl DebugInfoReader for GimliReader<'_>
{
    type Entry = GimliEntry;

    fn next_unit_header(&mut self) -> DieResult<Option<UnitHeader>>
    {
        self.entries.clear();
        let Some(header) = self
            .headers
            .next()
            .map_err(|err| map_dwarf_error("reading .debug_info unit header", err))?
        else {
            self.pending = None;
            return Ok(None);
        };

        let offset = match header.offset() {
            UnitSectionOffset::DebugInfoOffset(offset) => offset.0,
            UnitSectionOffset::DebugTypesOffset(offset) => offset.0,
        };
        let summary = UnitHeader {
            version: header.version(),
            offset: Offset::new(offset as u64),
            address_size: header.address_size(),
        };
        self.pending = Some(header);
        Ok(Some(summary))
    }

    fn unit_root(&mut self) -> DieResult<GimliEntry>
    {
        let header = self.pending.take().ok_or(DieError::NoCompileUnit)?;
        let unit = self
            .dwarf
            .unit(header)
            .map_err(|err| map_dwarf_error("parsing compilation unit", err))?;
        self.entries = self.materialize(&unit)?;
        self.take(Some(0)).ok_or(DieError::NoCompileUnit)
    }

    fn first_child(&mut self, entry: &GimliEntry) -> DieResult<Option<GimliEntry>>
    {
        Ok(self.take(entry.first_child))
    }

    fn next_sibling(&mut self, entry: &GimliEntry) -> DieResult<Option<GimliEntry>>
    {
        Ok(self.take(entry.next_sibling))
    }
}

/// `.debug_info` offset of an entry given its unit-relative offset.
fn section_offset(unit: &Unit<OwnedReader>, offset: UnitOffset<usize>) -> Offset
{
    let absolute = offset
        .to_debug_info_offset(&unit.header)
        .map_or(offset.0, |offset| offset.0);
    Offset::new(absolute as u64)
}
