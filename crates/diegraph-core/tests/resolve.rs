//! Tests for resolving paths of names

mod common;

use diegraph_core::prelude::*;
use gimli::constants;

fn loaded() -> DieSet
{
    let factory = Factory::new();
    let builder = GraphBuilder::new(&factory, LoadOptions::default());
    let mut reader = common::FakeReader::new().unit(4, common::c_unit());
    builder.build(&mut reader).unwrap().0
}

#[test]
fn test_empty_path_names_start()
{
    let set = loaded();
    let empty: [&str; 0] = [];
    assert_eq!(set.resolve_named_path(Offset::new(0x60), &empty), Some(Offset::new(0x60)));
    assert_eq!(set.resolve_named_path(Offset::new(0x999), &empty), None);
}

#[test]
fn test_resolve_from_root_through_unit()
{
    let set = loaded();
    assert_eq!(set.resolve_named_path(Offset::ROOT, &["main.c", "main"]), Some(Offset::new(0x60)));
    assert_eq!(
        set.resolve_named_path(Offset::ROOT, &["main.c", "main", "argc"]),
        Some(Offset::new(0x70))
    );
    assert_eq!(set.resolve_named_path(Offset::ROOT, &["other.c", "main"]), None);
}

#[test]
fn test_struct_members_by_name()
{
    let set = loaded();
    let unit = Offset::new(0xb);
    assert_eq!(set.resolve_named_path(unit, &["point", "y"]), Some(Offset::new(0x40)));
    assert_eq!(set.resolve_named_path(unit, &["point", "z"]), None);
}

#[test]
fn test_qualifiers_are_transparent()
{
    let set = loaded();
    // typedef point_t -> point
    assert_eq!(
        set.resolve_named_path(Offset::new(0x50), &["x"]),
        Some(Offset::new(0x38))
    );
    // const -> typedef -> point
    assert_eq!(
        set.resolve_named_path(Offset::new(0x58), &["y"]),
        Some(Offset::new(0x40))
    );
    assert_eq!(
        set.resolve_named_path(Offset::new(0xb), &["point_t", "x"]),
        Some(Offset::new(0x38))
    );
}

#[test]
fn test_leaf_kinds_end_lookup()
{
    let set = loaded();
    // A member has no named children, and neither does a base type
    assert_eq!(set.resolve_named_path(Offset::new(0x38), &["anything"]), None);
    assert_eq!(set.resolve_named_path(Offset::new(0x20), &["anything"]), None);
}

#[test]
fn test_qualifier_cycle_terminates()
{
    let mut set = loaded();
    let factory = Factory::new();
    let unit = Offset::new(0xb);
    let a = factory.create(&mut set, constants::DW_TAG_const_type, unit, None).unwrap();
    let b = factory.create(&mut set, constants::DW_TAG_volatile_type, unit, None).unwrap();
    set.find_mut(a).unwrap().put_ref(constants::DW_AT_type, b);
    set.find_mut(b).unwrap().put_ref(constants::DW_AT_type, a);

    assert_eq!(set.resolve_named_path(a, &["x"]), None);
}

#[test]
fn test_qualifier_without_target_fails()
{
    let mut set = loaded();
    let factory = Factory::new();
    let dangling = factory
        .create(&mut set, constants::DW_TAG_pointer_type, Offset::new(0xb), None)
        .unwrap();
    assert_eq!(set.resolve_named_path(dangling, &["x"]), None);
}

#[test]
fn test_toplevel_name_searches_every_unit()
{
    let factory = Factory::new();
    let builder = GraphBuilder::new(&factory, LoadOptions::default());
    let second = common::node(constants::DW_TAG_compile_unit, 0x200)
        .named("util.c")
        .child(common::node(constants::DW_TAG_subprogram, 0x210).named("helper"));
    let mut reader = common::FakeReader::new()
        .unit(4, common::c_unit())
        .unit(4, second);
    let (set, _) = builder.build(&mut reader).unwrap();

    assert_eq!(set.resolve_toplevel_name("main"), Some(Offset::new(0x60)));
    assert_eq!(set.resolve_toplevel_name("helper"), Some(Offset::new(0x210)));
    assert_eq!(set.resolve_toplevel_name("argc"), None);
    assert_eq!(set.resolve_toplevel_name("missing"), None);
}
