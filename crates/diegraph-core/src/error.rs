//! # Error Types
//!
//! Error handling for building and editing a DIE graph.
//!
//! We use `thiserror` to generate the `Error` implementations and messages.
//! Reaching the end of a child or sibling chain is *not* an error anywhere in
//! this crate; those cases are expressed as `Option::None`. Integrity
//! violations are not errors either: they are collected into an
//! [`IntegrityReport`](crate::dieset::IntegrityReport).

use gimli::{DwAt, DwTag};
use thiserror::Error;

use crate::symbols::ImageKind;
use crate::types::Offset;

/// Main error type for DIE graph operations
///
/// ## Error Categories
///
/// 1. **Structural errors** (recoverable, raised at the point of misuse):
///    DuplicateOffset, OffsetMismatch, UnknownOffset, UnknownParent,
///    RootImmutable, UnknownTag, TagMismatch, MissingAttribute,
///    OffsetSpaceExhausted
/// 2. **Fatal load errors**: UnsupportedVersion, MixedVersions,
///    UnsupportedImage, UnknownAddressClass, NoCompileUnit
/// 3. **Reader errors**: Dwarf, Object, Io
#[derive(Error, Debug)]
pub enum DieError
{
    /// An entry already occupies the offset
    ///
    /// The existing entry is left untouched.
    #[error("Duplicate offset: an entry already exists at {0}")]
    DuplicateOffset(Offset),

    /// The slot an entry was inserted at differs from the entry's own offset
    #[error("Offset mismatch: inserting entry {die} at slot {slot}")]
    OffsetMismatch
    {
        /// Slot requested by the caller
        slot: Offset,
        /// Offset recorded in the entry
        die: Offset,
    },

    /// No entry exists at the offset
    #[error("No entry at offset {0}")]
    UnknownOffset(Offset),

    /// The parent named by an entry is not in the set
    #[error("Entry {offset} names parent {parent}, which is not in the set")]
    UnknownParent
    {
        /// Entry being inserted
        offset: Offset,
        /// Missing parent
        parent: Offset,
    },

    /// The synthetic root at offset 0 cannot be replaced or erased
    #[error("The file-level root entry cannot be modified this way")]
    RootImmutable,

    /// An entry already sits at the highest representable offset
    #[error("No free offset above {0}")]
    OffsetSpaceExhausted(Offset),

    /// The factory has no variant registered for the tag
    #[error("Unknown tag: {0}")]
    UnknownTag(DwTag),

    /// An external entry reported a different tag than the one requested
    #[error("Tag mismatch: expected {expected}, reader reported {found}")]
    TagMismatch
    {
        /// Tag the caller asked for
        expected: DwTag,
        /// Tag the reader produced
        found: DwTag,
    },

    /// A mandatory attribute was read but is absent (or has the wrong kind)
    #[error("Entry {offset} is missing mandatory attribute {attr}")]
    MissingAttribute
    {
        /// Entry that was read
        offset: Offset,
        /// Attribute kind that was expected
        attr: DwAt,
    },

    /// The first compilation unit carries a version stamp we cannot handle
    #[error("Unsupported DWARF version stamp {0}")]
    UnsupportedVersion(u16),

    /// Compilation units in one file disagree on the version stamp
    ///
    /// References may cross units, so a single session fixes one version.
    #[error("Mixed DWARF versions: session fixed at {expected}, unit at {unit} has {found}")]
    MixedVersions
    {
        /// Version fixed by the first unit
        expected: u16,
        /// Version found on a later unit
        found: u16,
        /// Offset of the offending unit
        unit: Offset,
    },

    /// Archives and bare data are not single object images
    #[error("Unsupported object container: {0}")]
    UnsupportedImage(ImageKind),

    /// The object image has no usable address class (neither 32 nor 64 bit)
    #[error("Object image has no known address class")]
    UnknownAddressClass,

    /// An operation needed a compilation unit but the set has none
    #[error("The entry set contains no compilation unit")]
    NoCompileUnit,

    /// Error reported by `gimli` while reading debug information
    #[error("{context}: {source}")]
    Dwarf
    {
        /// What we were doing when the reader failed
        context: String,
        /// Underlying reader error
        source: gimli::Error,
    },

    /// Error reported by `object` while reading the container
    #[error("{context}: {source}")]
    Object
    {
        /// What we were doing when the reader failed
        context: String,
        /// Underlying reader error
        source: object::Error,
    },

    /// I/O error (reading the input file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for `Result<T, DieError>`
///
/// ```rust
/// use diegraph_core::error::DieResult;
/// fn foo() -> DieResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type DieResult<T> = std::result::Result<T, DieError>;

/// Wrap a `gimli` error with what we were doing when it happened.
pub(crate) fn map_dwarf_error(context: &str, err: gimli::Error) -> DieError
{
    DieError::Dwarf {
        context: context.to_string(),
        source: err,
    }
}

/// Wrap an `object` error with what we were doing when it happened.
pub(crate) fn map_object_error(context: &str, err: object::Error) -> DieError
{
    DieError::Object {
        context: context.to_string(),
        source: err,
    }
}
