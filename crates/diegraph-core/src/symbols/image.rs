//! Object image parsing and DWARF section loading.

use std::borrow::Cow;
use std::sync::Arc;

use gimli::{Dwarf, EndianArcSlice, RunTimeEndian, SectionId};
use object::{FileKind, Object, ObjectKind, ObjectSection, ObjectSymbol};
use tracing::debug;

use super::{make_symbol_name, AddressClass, ImageKind, RawSymbol, SymbolSection, SymbolSource};
use crate::error::{map_object_error, DieError, DieResult};
use crate::reader::{OwnedDwarf, OwnedReader};

const ARCHIVE_MAGIC: &[u8] = b"!<arch>\n";
const THIN_ARCHIVE_MAGIC: &[u8] = b"!<thin>\n";

/// One parsed object file, or the reason it is not one.
pub struct ObjectImage<'data>
{
    file: Option<object::File<'data>>,
    kind: ImageKind,
}

impl std::fmt::Debug for ObjectImage<'_>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        f.debug_struct("ObjectImage")
            .field("kind", &self.kind)
            .field("parsed", &self.file.is_some())
            .finish()
    }
}

impl<'data> ObjectImage<'data>
{
    /// Identify and parse `data`.
    ///
    /// Archives, fat binaries and unrecognised bytes are *not* errors here:
    /// they produce an image whose kind says so, and which refuses to list
    /// symbols or sections.
    ///
    /// ## Errors
    ///
    /// `Object` when the bytes look like a single object file but its
    /// header cannot be read.
    pub fn parse(data: &'data [u8]) -> DieResult<Self>
    {
        // An empty archive is only its magic, too short for `FileKind`.
        let container = if data.starts_with(ARCHIVE_MAGIC) || data.starts_with(THIN_ARCHIVE_MAGIC) {
            Some(ImageKind::Archive)
        } else {
            match FileKind::parse(data) {
                Ok(FileKind::Archive | FileKind::MachOFat32 | FileKind::MachOFat64 | FileKind::DyldCache) => {
                    Some(ImageKind::Archive)
                }
                Ok(_) => None,
                Err(_) => Some(ImageKind::Data),
            }
        };
        if let Some(kind) = container {
            debug!("not a single object image: {}", kind);
            return Ok(Self { file: None, kind });
        }

        let file = object::File::parse(data).map_err(|err| map_object_error("parsing object header", err))?;
        let kind = match file.kind() {
            ObjectKind::Relocatable => ImageKind::Relocatable,
            ObjectKind::Executable => ImageKind::Executable,
            ObjectKind::Dynamic => ImageKind::Dynamic,
            ObjectKind::Core => ImageKind::Core,
            _ => ImageKind::Unknown,
        };
        Ok(Self { file: Some(file), kind })
    }

    #[must_use]
    pub fn kind(&self) -> ImageKind
    {
        self.kind
    }

    fn file(&self) -> DieResult<&object::File<'data>>
    {
        self.file.as_ref().ok_or(DieError::UnsupportedImage(self.kind))
    }

    #[must_use]
    pub fn endian(&self) -> RunTimeEndian
    {
        match &self.file {
            Some(file) if !file.is_little_endian() => RunTimeEndian::Big,
            _ => RunTimeEndian::Little,
        }
    }

    /// Load every DWARF section `gimli` asks for. Missing sections load as
    /// empty.
    pub fn load_dwarf(&self) -> DieResult<OwnedDwarf>
    {
        let file = self.file()?;
        let endian = self.endian();
        Dwarf::load(|id| load_section(file, id, endian))
    }
}

impl SymbolSource for ObjectImage<'_>
{
    fn image_kind(&self) -> ImageKind
    {
        self.kind
    }

    fn address_class(&self) -> AddressClass
    {
        match &self.file {
            Some(file) if file.is_64() => AddressClass::Bits64,
            Some(_) => AddressClass::Bits32,
            None => AddressClass::Unknown,
        }
    }

    fn symbols(&self) -> DieResult<Vec<RawSymbol>>
    {
        let file = self.file()?;
        let mut symbols = Vec::new();
        for symbol in file.symbols() {
            let name = symbol
                .name_bytes()
                .map_err(|err| map_object_error("reading symbol name", err))?;
            let section = match symbol.section() {
                object::SymbolSection::Undefined => SymbolSection::Undefined,
                object::SymbolSection::Absolute => SymbolSection::Absolute,
                object::SymbolSection::Common => SymbolSection::Common,
                object::SymbolSection::Section(index) => SymbolSection::Index(index.0),
                _ => SymbolSection::Unknown,
            };
            symbols.push(RawSymbol {
                name: make_symbol_name(String::from_utf8_lossy(name).into_owned()),
                section,
            });
        }
        debug!("read {} symbols from {}", symbols.len(), self.kind);
        Ok(symbols)
    }
}

fn load_section(file: &object::File<'_>, id: SectionId, endian: RunTimeEndian) -> DieResult<OwnedReader>
{
    let name = id.name();
    let macho_name = name.strip_prefix('.').map(|rest| format!("__{rest}"));
    let mut names = vec![name];
    if let Some(macho_name) = macho_name.as_deref() {
        names.push(macho_name);
    }
    let data = load_section_bytes(file, &names)?;
    Ok(EndianArcSlice::new(data, endian))
}

fn load_section_bytes(file: &object::File<'_>, names: &[&str]) -> DieResult<Arc<[u8]>>
{
    for name in names {
        if let Some(section) = file.section_by_name(name) {
            let data = section
                .uncompressed_data()
                .map_err(|err| map_object_error(&format!("reading {name}"), err))?;
            return Ok(match data {
                Cow::Borrowed(bytes) => Arc::<[u8]>::from(bytes.to_vec()),
                Cow::Owned(vec) => vec.into(),
            });
        }
    }

    Ok(Arc::<[u8]>::from(Vec::new()))
}
