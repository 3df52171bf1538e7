//! Tests for declaring undefined symbols the debug info leaves out

mod common;

use common::FakeSymbols;
use diegraph_core::error::DieError;
use diegraph_core::prelude::*;
use diegraph_core::symbols::{AddressClass, ImageKind};
use diegraph_core::variants::UnspecifiedParameters;
use gimli::constants;

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
fn test_undefined_symbols_are_declared()
{
    let (factory, mut set) = loaded();
    let symbols = FakeSymbols::elf64()
        .defined("main")
        .undefined("printf")
        .undefined("malloc");
    let report = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();

    assert_eq!(report.considered, 2);
    let names: Vec<&str> = report.declared.iter().map(|(_, name)| name.raw()).collect();
    assert_eq!(names, vec!["printf", "malloc"]);

    let printf = set.resolve_toplevel_name("printf").unwrap();
    assert_eq!(printf, report.declared[0].0);
    assert_eq!(set.find_parent_offset_of(printf), Some(Offset::new(0xb)));
    assert!(set.is_synthetic(printf));
}

#[test]
fn test_declaration_shape()
{
    let (factory, mut set) = loaded();
    let symbols = FakeSymbols::elf64().undefined("puts");
    let report = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();

    let word = set.find(report.word_type).unwrap().view::<BaseType>().unwrap();
    assert_eq!(word.byte_size().unwrap(), 8);
    assert_eq!(word.encoding().unwrap(), constants::DW_ATE_signed);
    assert_eq!(set.find_parent_offset_of(report.word_type), Some(Offset::new(0xb)));

    let decl = report.declared[0].0;
    let die = set.find(decl).unwrap();
    let sub = die.view::<Subprogram>().unwrap();
    assert_eq!(sub.name(), Some("puts"));
    assert_eq!(sub.external(), Some(true));
    assert_eq!(sub.prototyped(), Some(true));
    assert_eq!(sub.declaration(), Some(true));
    assert_eq!(sub.return_type(), Some(report.word_type));
    assert!(sub.low_pc().is_none());

    let params = die.first_child().unwrap();
    assert!(set
        .find(params)
        .unwrap()
        .view::<UnspecifiedParameters>()
        .is_some());
    assert_eq!(die.children().len(), 1);
    assert!(set.integrity_check(Offset::ROOT).unwrap().is_clean());
}

#[test]
fn test_word_type_follows_address_class()
{
    let (factory, mut set) = loaded();
    let symbols = FakeSymbols {
        class: AddressClass::Bits32,
        ..FakeSymbols::elf64()
    };
    let report = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();
    let word = set.find(report.word_type).unwrap().view::<BaseType>().unwrap();
    assert_eq!(word.byte_size().unwrap(), 4);
    assert!(report.declared.is_empty());
}

#[test]
fn test_existing_declarations_are_kept()
{
    let (factory, mut set) = loaded();
    let before = set.len();
    let symbols = FakeSymbols::elf64().undefined("main").undefined("");
    let report = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();

    assert_eq!(report.considered, 1);
    assert!(report.declared.is_empty());
    // only the word type was added
    assert_eq!(set.len(), before + 1);
    assert_eq!(set.resolve_toplevel_name("main"), Some(Offset::new(0x60)));
}

#[test]
fn test_second_pass_adds_nothing_new()
{
    let (factory, mut set) = loaded();
    let symbols = FakeSymbols::elf64().undefined("exit").undefined("exit");
    let first = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();
    assert_eq!(first.declared.len(), 1);

    let second = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();
    assert!(second.declared.is_empty());
    assert_eq!(second.considered, 2);
}

#[test]
fn test_mangled_names_keep_raw_lookup()
{
    let (factory, mut set) = loaded();
    let symbols = FakeSymbols::elf64().undefined("_ZN4core9panicking5panic17h0123456789abcdefE");
    let report = reconcile_undefined_symbols(&mut set, &factory, &symbols).unwrap();

    let (decl, name) = &report.declared[0];
    assert_eq!(name.demangled(), Some("core::panicking::panic"));
    assert_eq!(
        set.find(*decl).unwrap().name(),
        Some("_ZN4core9panicking5panic17h0123456789abcdefE")
    );
}

#[test]
fn test_unsupported_images_are_refused()
{
    let (factory, mut set) = loaded();
    for kind in [ImageKind::Archive, ImageKind::Data] {
        let symbols = FakeSymbols {
            kind,
            ..FakeSymbols::elf64().undefined("printf")
        };
        let result = reconcile_undefined_symbols(&mut set, &factory, &symbols);
        assert!(matches!(result, Err(DieError::UnsupportedImage(k)) if k == kind));
    }
}

#[test]
fn test_unknown_address_class_is_refused()
{
    let (factory, mut set) = loaded();
    let before = set.len();
    let symbols = FakeSymbols {
        class: AddressClass::Unknown,
        ..FakeSymbols::elf64().undefined("printf")
    };
    let result = reconcile_undefined_symbols(&mut set, &factory, &symbols);
    assert!(matches!(result, Err(DieError::UnknownAddressClass)));
    assert_eq!(set.len(), before);
}

#[test]
fn test_no_compile_unit()
{
    let factory = Factory::new();
    let mut set = DieSet::new();
    let symbols = FakeSymbols::elf64().undefined("printf");
    let result = reconcile_undefined_symbols(&mut set, &factory, &symbols);
    assert!(matches!(result, Err(DieError::NoCompileUnit)));
    assert!(set.is_empty());
}
