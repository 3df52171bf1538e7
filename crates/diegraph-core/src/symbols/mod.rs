//! # Object-file symbols
//!
//! The symbol-table side of a file, as the reconciliation pass sees it.
//! [`SymbolSource`] is the seam; [`ObjectImage`] implements it over the
//! `object` crate and also hands the loader its DWARF sections.

mod demangle;
mod image;

pub use image::ObjectImage;

pub use demangle::make_symbol_name;

use std::fmt;

use crate::error::DieResult;
use crate::types::SymbolName;

/// What kind of container a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind
{
    /// Object file awaiting linking (`.o`)
    Relocatable,
    Executable,
    /// Shared library or position-independent executable
    Dynamic,
    Core,
    /// Archive or other multi-image container
    Archive,
    /// Not an object file at all
    Data,
    Unknown,
}

impl ImageKind
{
    /// Whether this is one image with one symbol table.
    #[must_use]
    pub const fn is_single_image(self) -> bool
    {
        !matches!(self, ImageKind::Archive | ImageKind::Data)
    }
}

impl fmt::Display for ImageKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            ImageKind::Relocatable => "relocatable object",
            ImageKind::Executable => "executable",
            ImageKind::Dynamic => "dynamic object",
            ImageKind::Core => "core file",
            ImageKind::Archive => "archive",
            ImageKind::Data => "data",
            ImageKind::Unknown => "unknown object",
        })
    }
}

/// Width of a target address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass
{
    Bits32,
    Bits64,
    Unknown,
}

impl AddressClass
{
    /// Size of a machine word in bytes.
    #[must_use]
    pub const fn word_size(self) -> Option<u64>
    {
        match self {
            AddressClass::Bits32 => Some(4),
            AddressClass::Bits64 => Some(8),
            AddressClass::Unknown => None,
        }
    }
}

/// Section a symbol is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolSection
{
    /// Defined elsewhere; resolved at link or load time
    Undefined,
    Absolute,
    Common,
    Index(usize),
    Unknown,
}

/// One symbol-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSymbol
{
    pub name: SymbolName,
    pub section: SymbolSection,
}

impl RawSymbol
{
    #[must_use]
    pub fn is_undefined(&self) -> bool
    {
        self.section == SymbolSection::Undefined
    }
}

/// Symbol table of one object image.
pub trait SymbolSource
{
    fn image_kind(&self) -> ImageKind;

    fn address_class(&self) -> AddressClass;

    /// Every symbol in the static symbol table. Names that are not UTF-8
    /// are decoded lossily. The dynamic table is not consulted.
    fn symbols(&self) -> DieResult<Vec<RawSymbol>>;
}
