//! In-memory reader and symbol table shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use diegraph_core::attr::{AttributeValue, DieRef};
use diegraph_core::error::DieResult;
use diegraph_core::reader::{DebugInfoReader, RawAttribute, RawEntry, UnitHeader};
use diegraph_core::symbols::{AddressClass, ImageKind, RawSymbol, SymbolSection, SymbolSource};
use diegraph_core::symbols::make_symbol_name;
use diegraph_core::types::Offset;
use gimli::{constants, DwAt, DwTag};

/// Tree description of one entry and its descendants.
#[derive(Debug, Clone)]
pub struct Node
{
    pub tag: DwTag,
    pub offset: u64,
    pub attrs: Vec<RawAttribute>,
    pub children: Vec<Node>,
}

pub fn node(tag: DwTag, offset: u64) -> Node
{
    Node {
        tag,
        offset,
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

impl Node
{
    pub fn named(self, name: &str) -> Self
    {
        self.attr(constants::DW_AT_name, AttributeValue::from(name))
    }

    pub fn attr(mut self, name: DwAt, value: AttributeValue) -> Self
    {
        self.attrs.push(RawAttribute { name, value: Some(value) });
        self
    }

    /// An attribute whose encoding the reader could not model.
    pub fn opaque(mut self, name: DwAt) -> Self
    {
        self.attrs.push(RawAttribute { name, value: None });
        self
    }

    pub fn reference(self, name: DwAt, target: u64) -> Self
    {
        self.attr(name, AttributeValue::Reference(DieRef::to(Offset::new(target))))
    }

    pub fn child(mut self, child: Node) -> Self
    {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone)]
pub struct FakeEntry
{
    tag: DwTag,
    offset: Offset,
    cu_offset: Offset,
    attrs: Vec<RawAttribute>,
    first_child: Option<usize>,
    next_sibling: Option<usize>,
}

impl RawEntry for FakeEntry
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

/// Hands out prepared units one at a time.
#[derive(Debug, Default)]
pub struct FakeReader
{
    units: VecDeque<(u16, Node)>,
    pending: Option<Node>,
    entries: Vec<FakeEntry>,
}

impl FakeReader
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn unit(mut self, version: u16, root: Node) -> Self
    {
        self.units.push_back((version, root));
        self
    }

    fn flatten(node: &Node, cu_offset: Offset, out: &mut Vec<FakeEntry>) -> usize
    {
        let index = out.len();
        out.push(FakeEntry {
            tag: node.tag,
            offset: Offset::new(node.offset),
            cu_offset,
            attrs: node.attrs.clone(),
            first_child: None,
            next_sibling: None,
        });
        let mut previous: Option<usize> = None;
        for child in &node.children {
            let child_index = Self::flatten(child, cu_offset, out);
            match previous {
                Some(prev) => out[prev].next_sibling = Some(child_index),
                None => out[index].first_child = Some(child_index),
            }
            previous = Some(child_index);
        }
        index
    }
}

impl DebugInfoReader for FakeReader
{
    type Entry = FakeEntry;

    fn next_unit_header(&mut self) -> DieResult<Option<UnitHeader>>
    {
        let Some((version, root)) = self.units.pop_front() else {
            return Ok(None);
        };
        let header = UnitHeader {
            version,
            offset: Offset::new(root.offset.saturating_sub(0xb)),
            address_size: 8,
        };
        self.pending = Some(root);
        Ok(Some(header))
    }

    fn unit_root(&mut self) -> DieResult<FakeEntry>
    {
        let root = self
            .pending
            .take()
            .expect("unit_root called without a pending unit header");
        self.entries.clear();
        Self::flatten(&root, Offset::new(root.offset), &mut self.entries);
        Ok(self.entries[0].clone())
    }

    fn first_child(&mut self, entry: &FakeEntry) -> DieResult<Option<FakeEntry>>
    {
        Ok(entry.first_child.map(|index| self.entries[index].clone()))
    }

    fn next_sibling(&mut self, entry: &FakeEntry) -> DieResult<Option<FakeEntry>>
    {
        Ok(entry.next_sibling.map(|index| self.entries[index].clone()))
    }
}

/// Symbol table with a fixed container kind and address class.
#[derive(Debug, Clone)]
pub struct FakeSymbols
{
    pub kind: ImageKind,
    pub class: AddressClass,
    pub symbols: Vec<RawSymbol>,
}

impl FakeSymbols
{
    pub fn elf64() -> Self
    {
        Self {
            kind: ImageKind::Relocatable,
            class: AddressClass::Bits64,
            symbols: Vec::new(),
        }
    }

    pub fn undefined(mut self, name: &str) -> Self
    {
        self.symbols.push(RawSymbol {
            name: make_symbol_name(name.to_string()),
            section: SymbolSection::Undefined,
        });
        self
    }

    pub fn defined(mut self, name: &str) -> Self
    {
        self.symbols.push(RawSymbol {
            name: make_symbol_name(name.to_string()),
            section: SymbolSection::Index(1),
        });
        self
    }
}

impl SymbolSource for FakeSymbols
{
    fn image_kind(&self) -> ImageKind
    {
        self.kind
    }

    fn address_class(&self) -> AddressClass
    {
        self.class
    }

    fn symbols(&self) -> DieResult<Vec<RawSymbol>>
    {
        Ok(self.symbols.clone())
    }
}

/// A small C-like unit at 0xb:
///
/// ```text
/// compile_unit "main.c"            0xb
///   base_type "int"                0x20
///   structure_type "point"         0x30
///     member "x" -> int            0x38
///     member "y" -> int            0x40
///   typedef "point_t" -> point     0x50
///   const_type -> point_t          0x58
///   subprogram "main" -> int       0x60
///     formal_parameter "argc"      0x70
///     variable "p" -> const point  0x78
/// ```
pub fn c_unit() -> Node
{
    node(constants::DW_TAG_compile_unit, 0xb)
        .named("main.c")
        .attr(constants::DW_AT_producer, AttributeValue::from("cc 1.0"))
        .child(
            node(constants::DW_TAG_base_type, 0x20)
                .named("int")
                .attr(constants::DW_AT_byte_size, AttributeValue::Unsigned(4))
                .attr(constants::DW_AT_encoding, AttributeValue::Unsigned(u64::from(constants::DW_ATE_signed.0))),
        )
        .child(
            node(constants::DW_TAG_structure_type, 0x30)
                .named("point")
                .attr(constants::DW_AT_byte_size, AttributeValue::Unsigned(8))
                .child(node(constants::DW_TAG_member, 0x38).named("x").reference(constants::DW_AT_type, 0x20))
                .child(node(constants::DW_TAG_member, 0x40).named("y").reference(constants::DW_AT_type, 0x20)),
        )
        .child(
            node(constants::DW_TAG_typedef, 0x50)
                .named("point_t")
                .reference(constants::DW_AT_type, 0x30),
        )
        .child(node(constants::DW_TAG_const_type, 0x58).reference(constants::DW_AT_type, 0x50))
        .child(
            node(constants::DW_TAG_subprogram, 0x60)
                .named("main")
                .attr(constants::DW_AT_external, AttributeValue::Flag(true))
                .reference(constants::DW_AT_type, 0x20)
                .child(
                    node(constants::DW_TAG_formal_parameter, 0x70)
                        .named("argc")
                        .reference(constants::DW_AT_type, 0x20),
                )
                .child(
                    node(constants::DW_TAG_variable, 0x78)
                        .named("p")
                        .reference(constants::DW_AT_type, 0x58),
                ),
        )
}
