//! Tests for entry and tree printing

mod common;

use diegraph_core::print::{write_synthetic, write_tree};
use diegraph_core::prelude::*;

fn loaded() -> (Factory, DieSet)
{
    let factory = Factory::new();
    let set = {
        let builder = GraphBuilder::new(&factory, LoadOptions::default());
        let mut reader = common::FakeReader::new().unit(4, common::c_unit());
        builder.build(&mut reader).unwrap().0
    };
    (factory, set)
}

#[test]
fn test_display_header_and_attributes()
{
    let (_, set) = loaded();
    let text = set.find(Offset::new(0x60)).unwrap().to_string();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("DIE, child of 0xb, tag: DW_TAG_subprogram, offset: 0x60, name: main")
    );
    let rest: Vec<&str> = lines.collect();
    assert_eq!(rest, vec!["    DW_AT_external: true", "    DW_AT_type: <0x20>"]);
}

#[test]
fn test_display_root_and_unnamed()
{
    let (_, set) = loaded();
    assert_eq!(
        set.root().to_string(),
        "DIE, file root, tag: file_toplevel, offset: 0x0, name: (no name)"
    );
    let text = set.find(Offset::new(0x58)).unwrap().to_string();
    assert!(text.starts_with("DIE, child of 0xb, tag: DW_TAG_const_type, offset: 0x58, name: (no name)"));
}

#[test]
fn test_write_tree_indents_by_depth()
{
    let (_, set) = loaded();
    let mut out = Vec::new();
    write_tree(&set, Offset::new(0x30), &mut out, |_| true).unwrap();
    let text = String::from_utf8(out).unwrap();
    let headers: Vec<&str> = text.lines().filter(|line| line.contains("DIE,")).collect();

    assert_eq!(headers.len(), 3);
    assert!(headers[0].starts_with("    DIE, child of 0xb, tag: DW_TAG_structure_type"));
    assert!(headers[1].starts_with("      DIE, child of 0x30, tag: DW_TAG_member, offset: 0x38, name: x"));
    assert!(headers[2].contains("name: y"));
}

#[test]
fn test_write_tree_filter()
{
    let (_, set) = loaded();
    let mut out = Vec::new();
    write_tree(&set, Offset::ROOT, &mut out, |die| die.name().is_some()).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("file root"));
    assert!(!text.contains("DW_TAG_const_type"));
    assert!(text.contains("name: argc"));
}

#[test]
fn test_write_tree_unknown_start_is_an_error()
{
    let (_, set) = loaded();
    let mut out = Vec::new();
    let err = write_tree(&set, Offset::new(0x999), &mut out, |_| true).unwrap_err();
    assert!(matches!(err, DieError::UnknownOffset(o) if o == Offset::new(0x999)));
    assert!(out.is_empty());
}

#[test]
fn test_write_synthetic_only_lists_added_entries()
{
    let (factory, mut set) = loaded();
    let mut out = Vec::new();
    write_synthetic(&set, &mut out).unwrap();
    assert!(out.is_empty());

    let symbols = common::FakeSymbols::elf64().undefined("abort");
    reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();

    write_synthetic(&set, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let headers: Vec<&str> = text.lines().filter(|line| line.contains("DIE,")).collect();
    assert_eq!(headers.len(), 3);
    assert!(headers[0].contains("DW_TAG_base_type"));
    assert!(headers[1].contains("DW_TAG_subprogram") && headers[1].contains("name: abort"));
    assert!(headers[2].contains("DW_TAG_unspecified_parameters"));
    assert!(!text.contains("name: main"));
}
