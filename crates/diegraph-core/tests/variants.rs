//! Tests for entry kinds and their typed views

use diegraph_core::attr::{AttributeValue, LocationEntry, SectionOffset};
use diegraph_core::error::DieError;
use diegraph_core::prelude::*;
use diegraph_core::variants::{
    Enumerator, EnumeratorMut, InheritanceMut, Member, StructureType, SubrangeType, SubrangeTypeMut, TypedDieMut,
    Typedef, TOPLEVEL_TAG,
};
use gimli::constants;

fn unit_with(tag: gimli::DwTag, name: Option<&str>) -> (DieSet, Offset)
{
    let factory = Factory::new();
    let mut set = DieSet::new();
    let cu = factory
        .create(&mut set, constants::DW_TAG_compile_unit, Offset::ROOT, Some("t.c"))
        .unwrap();
    let die = factory.create(&mut set, tag, cu, name).unwrap();
    (set, die)
}

#[test]
fn test_kind_tag_round_trip()
{
    for kind in DieKind::ALL {
        assert_eq!(DieKind::from_tag(kind.tag()), Some(*kind), "{kind}");
    }
    assert_eq!(DieKind::from_tag(TOPLEVEL_TAG), None);
    assert_eq!(DieKind::FileToplevel.tag(), TOPLEVEL_TAG);
}

#[test]
fn test_kind_display_uses_tag_name()
{
    assert_eq!(DieKind::Subprogram.to_string(), "DW_TAG_subprogram");
    assert_eq!(DieKind::GnuCallSite.to_string(), "DW_TAG_GNU_call_site");
    assert_eq!(DieKind::FileToplevel.to_string(), "file_toplevel");
}

#[test]
fn test_kind_classification()
{
    assert!(DieKind::StructureType.has_named_children());
    assert!(DieKind::StructureType.is_type());
    assert!(DieKind::Typedef.is_type());
    assert!(!DieKind::Typedef.has_named_children());
    assert!(DieKind::Namespace.has_named_children());
    assert!(!DieKind::Member.is_type());
    assert!(DieKind::FileToplevel.has_named_children());
    assert!(DieKind::CompileUnit.is_unit());
    assert!(DieKind::TypeUnit.is_unit());
    assert!(!DieKind::Subprogram.is_unit());
}

#[test]
fn test_view_only_matches_own_kind()
{
    let (set, sub) = unit_with(constants::DW_TAG_subprogram, Some("f"));
    let die = set.find(sub).unwrap();
    assert!(die.view::<Subprogram>().is_some());
    assert!(die.view::<Variable>().is_none());
    assert!(die.view::<BaseType>().is_none());
    assert_eq!(die.view::<Subprogram>().unwrap().name(), Some("f"));
}

#[test]
fn test_subprogram_accessors()
{
    let (mut set, sub) = unit_with(constants::DW_TAG_subprogram, Some("f"));
    {
        let mut view = set.find_mut(sub).unwrap().view_mut::<SubprogramMut>().unwrap();
        view.set_external(Some(true))
            .set_declaration(Some(true))
            .set_return_type(Some(Offset::new(0x20)))
            .set_linkage_name(Some("_Z1fv".to_string()))
            .set_frame_base(Some(vec![LocationEntry::everywhere(vec![0x9c])]));
        assert_eq!(view.external(), Some(true));
    }

    let die = set.find(sub).unwrap();
    let view = die.view::<Subprogram>().unwrap();
    assert_eq!(view.external(), Some(true));
    assert_eq!(view.declaration(), Some(true));
    assert_eq!(view.prototyped(), None);
    assert_eq!(view.return_type(), Some(Offset::new(0x20)));
    assert_eq!(view.linkage_name().as_deref(), Some("_Z1fv"));
    assert_eq!(view.frame_base().map(|list| list.len()), Some(1));

    // The reference is stamped with its holder
    let stored = die.get_attr(constants::DW_AT_type).unwrap().as_reference().unwrap();
    assert_eq!(stored.referencing, sub);
    assert_eq!(stored.attr, constants::DW_AT_type);
}

#[test]
fn test_optional_setter_none_removes()
{
    let (mut set, var) = unit_with(constants::DW_TAG_variable, Some("v"));
    let die = set.find_mut(var).unwrap();
    let mut view = die.view_mut::<VariableMut>().unwrap();
    view.set_external(Some(false));
    assert_eq!(view.external(), Some(false));
    view.set_external(None);
    assert_eq!(view.external(), None);
    assert!(!view.die().has_attr(constants::DW_AT_external));
}

#[test]
fn test_mandatory_attribute_missing()
{
    let (mut set, base) = unit_with(constants::DW_TAG_base_type, Some("int"));
    let view = set.find(base).unwrap().view::<BaseType>().unwrap();
    assert!(matches!(
        view.byte_size(),
        Err(DieError::MissingAttribute { offset, attr }) if offset == base && attr == constants::DW_AT_byte_size
    ));
    assert!(view.bit_size().is_none());

    let mut view = set.find_mut(base).unwrap().view_mut::<BaseTypeMut>().unwrap();
    view.set_byte_size(4).set_encoding(constants::DW_ATE_unsigned);
    assert_eq!(view.byte_size().unwrap(), 4);
    assert_eq!(view.encoding().unwrap(), constants::DW_ATE_unsigned);
}

#[test]
fn test_mandatory_attribute_of_wrong_kind()
{
    let (mut set, enumerator) = unit_with(constants::DW_TAG_enumerator, Some("RED"));
    let die = set.find_mut(enumerator).unwrap();
    die.put_attr(constants::DW_AT_const_value, AttributeValue::from("not a number"));
    let view = die.view_mut::<EnumeratorMut>().unwrap();
    assert!(matches!(view.const_value(), Err(DieError::MissingAttribute { .. })));
}

#[test]
fn test_enumerator_const_value_from_half_word()
{
    let (mut set, enumerator) = unit_with(constants::DW_TAG_enumerator, Some("BIG"));
    set.find_mut(enumerator)
        .unwrap()
        .put_attr(constants::DW_AT_const_value, AttributeValue::Half(300));
    let view = set.find(enumerator).unwrap().view::<Enumerator>().unwrap();
    assert_eq!(view.const_value().unwrap(), 300);
    assert_eq!(AttributeValue::Half(u16::MAX).as_signed(), Some(65535));
}

#[test]
fn test_subrange_bounds_are_signed()
{
    let (mut set, subrange) = unit_with(constants::DW_TAG_subrange_type, None);
    let die = set.find_mut(subrange).unwrap();
    die.put_attr(constants::DW_AT_lower_bound, AttributeValue::Signed(-5));
    die.put_attr(constants::DW_AT_upper_bound, AttributeValue::Signed(-1));
    let view = set.find(subrange).unwrap().view::<SubrangeType>().unwrap();
    assert_eq!(view.lower_bound(), Some(-5));
    assert_eq!(view.upper_bound(), Some(-1));

    let mut view = set
        .find_mut(subrange)
        .unwrap()
        .view_mut::<SubrangeTypeMut>()
        .unwrap();
    view.set_upper_bound(Some(9));
    assert_eq!(view.upper_bound(), Some(9));
    assert_eq!(
        view.die().get_attr(constants::DW_AT_upper_bound),
        Some(&AttributeValue::Signed(9))
    );
}

#[test]
fn test_mandatory_reference()
{
    let (mut set, inheritance) = unit_with(constants::DW_TAG_inheritance, None);
    let mut view = set
        .find_mut(inheritance)
        .unwrap()
        .view_mut::<InheritanceMut>()
        .unwrap();
    assert!(view.base_type().is_err());
    view.set_base_type(Offset::new(0x30));
    assert_eq!(view.base_type().unwrap(), Offset::new(0x30));
}

#[test]
fn test_compile_unit_attributes()
{
    let factory = Factory::new();
    let mut set = DieSet::new();
    let cu = factory
        .create(&mut set, constants::DW_TAG_compile_unit, Offset::ROOT, Some("a.c"))
        .unwrap();
    let die = set.find_mut(cu).unwrap();
    die.put_attr(
        constants::DW_AT_language,
        AttributeValue::Unsigned(u64::from(constants::DW_LANG_C11.0)),
    );
    die.put_attr(constants::DW_AT_stmt_list, AttributeValue::SectionOffset(SectionOffset(0x40)));
    die.put_attr(constants::DW_AT_producer, AttributeValue::from("cc"));

    let view = set.find(cu).unwrap().view::<CompileUnit>().unwrap();
    assert_eq!(view.language(), Some(constants::DW_LANG_C11));
    assert_eq!(view.stmt_list(), Some(SectionOffset(0x40)));
    assert_eq!(view.producer().as_deref(), Some("cc"));
    assert!(view.comp_dir().is_none());
}

#[test]
fn test_typed_dispatch()
{
    let (mut set, typedef) = unit_with(constants::DW_TAG_typedef, Some("size_t"));
    match set.find(typedef).unwrap().typed() {
        TypedDie::Typedef(view) => assert_eq!(view.name(), Some("size_t")),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(set.root().typed(), TypedDie::FileToplevel(_)));

    match set.find_mut(typedef).unwrap().typed_mut() {
        TypedDieMut::Typedef(mut view) => {
            view.set_aliased_type(Some(Offset::new(0x20)));
        }
        _ => panic!("expected a typedef"),
    }
    let view: Typedef<'_> = set.find(typedef).unwrap().view().unwrap();
    assert_eq!(view.aliased_type(), Some(Offset::new(0x20)));
}

#[test]
fn test_view_mut_set_name()
{
    let (mut set, member) = unit_with(constants::DW_TAG_member, None);
    {
        let die = set.find_mut(member).unwrap();
        let mut view: diegraph_core::variants::MemberMut<'_> = die.view_mut().unwrap();
        view.set_name(Some("x")).set_data_member_location(Some(4));
    }
    let view = set.find(member).unwrap().view::<Member>().unwrap();
    assert_eq!(view.name(), Some("x"));
    assert_eq!(view.data_member_location(), Some(4));
    assert!(set.find(member).unwrap().view::<StructureType>().is_none());
}
