//! Tests for error handling

use diegraph_core::error::{DieError, DieResult};
use diegraph_core::symbols::ImageKind;
use diegraph_core::types::Offset;
use gimli::constants;

#[test]
fn test_duplicate_offset_display()
{
    let error = DieError::DuplicateOffset(Offset::new(0x2d));
    let message = format!("{}", error);
    assert!(message.contains("Duplicate offset"));
    assert!(message.contains("0x2d"));
}

#[test]
fn test_unknown_parent_display()
{
    let error = DieError::UnknownParent {
        offset: Offset::new(0x40),
        parent: Offset::new(0x10),
    };
    let message = format!("{}", error);
    assert!(message.contains("0x40"));
    assert!(message.contains("0x10"));
}

#[test]
fn test_unknown_tag_display()
{
    let error = DieError::UnknownTag(constants::DW_TAG_subprogram);
    let message = format!("{}", error);
    assert!(message.contains("Unknown tag"));
    assert!(message.contains("DW_TAG_subprogram"));
}

#[test]
fn test_missing_attribute_display()
{
    let error = DieError::MissingAttribute {
        offset: Offset::new(0x20),
        attr: constants::DW_AT_byte_size,
    };
    let message = format!("{}", error);
    assert!(message.contains("0x20"));
    assert!(message.contains("DW_AT_byte_size"));
}

#[test]
fn test_version_errors_display()
{
    let error = DieError::UnsupportedVersion(7);
    assert!(format!("{}", error).contains('7'));

    let error = DieError::MixedVersions {
        expected: 4,
        found: 5,
        unit: Offset::new(0x100),
    };
    let message = format!("{}", error);
    assert!(message.contains("Mixed DWARF versions"));
    assert!(message.contains("0x100"));
}

#[test]
fn test_unsupported_image_display()
{
    let error = DieError::UnsupportedImage(ImageKind::Archive);
    let message = format!("{}", error);
    assert!(message.contains("archive"));
}

#[test]
fn test_fatal_load_errors_display()
{
    assert!(format!("{}", DieError::UnknownAddressClass).contains("address class"));
    assert!(format!("{}", DieError::NoCompileUnit).contains("no compilation unit"));
    assert!(format!("{}", DieError::RootImmutable).contains("root"));
}

#[test]
fn test_io_error_conversion()
{
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let die_error: DieError = io_error.into();

    match die_error {
        DieError::Io(_) => {
            // Expected: io::Error should convert to Io variant
        }
        _ => panic!("Expected Io variant"),
    }
}

#[test]
fn test_result_type()
{
    fn returns_result() -> DieResult<u64>
    {
        Ok(42)
    }

    assert_eq!(returns_result().unwrap(), 42);
}

#[test]
fn test_error_debug()
{
    let error = DieError::TagMismatch {
        expected: constants::DW_TAG_compile_unit,
        found: constants::DW_TAG_partial_unit,
    };
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("TagMismatch"));
}
