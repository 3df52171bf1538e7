//! # Attribute values
//!
//! The closed set of value kinds an entry attribute can hold, independent of
//! the on-disk form it was decoded from.
//!
//! References to other entries are stored by offset and are never resolved
//! at construction time. Whether their targets exist is the business of
//! [`DieSet::integrity_check`](crate::dieset::DieSet::integrity_check).

use std::fmt;

use gimli::{DwAt, DwAte, DwLang, DwTag};

use crate::types::{Address, Offset};

/// A reference from one entry to another.
///
/// `referencing` and `attr` name the holder of the reference. They are
/// filled in by [`Die::put_attr`](crate::die::Die::put_attr) and exist so
/// that an integrity violation can say which entry and attribute dangled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieRef
{
    /// Offset of the entry referred to
    pub target: Offset,
    /// Whether the reference was encoded relative to the whole section
    /// (and may therefore point into another compilation unit)
    pub cross_unit: bool,
    /// Offset of the entry holding the reference
    pub referencing: Offset,
    /// Attribute under which the reference is held
    pub attr: DwAt,
}

impl DieRef
{
    /// A reference to `target` whose holder is not yet known.
    #[must_use]
    pub fn to(target: Offset) -> Self
    {
        Self {
            target,
            cross_unit: false,
            referencing: Offset::ROOT,
            attr: DwAt(0),
        }
    }
}

/// Offset into some non-`.debug_info` section (`DW_AT_stmt_list`,
/// `DW_AT_macro_info`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionOffset(pub u64);

/// Half-open address range `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range
{
    pub begin: Address,
    pub end: Address,
}

pub type RangeList = Vec<Range>;

/// One entry of a location list: a location expression valid over
/// `[begin, end)`. The expression bytes are kept opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry
{
    pub begin: Address,
    pub end: Address,
    pub expr: Vec<u8>,
}

impl LocationEntry
{
    /// A single expression valid at every address, as produced by an
    /// `exprloc` attribute.
    #[must_use]
    pub fn everywhere(expr: Vec<u8>) -> Self
    {
        Self {
            begin: Address::ZERO,
            end: Address::MAX,
            expr,
        }
    }
}

pub type LocList = Vec<LocationEntry>;

/// Discriminant of an [`AttributeValue`], for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind
{
    String,
    Flag,
    Unsigned,
    Signed,
    SectionOffset,
    Half,
    Tag,
    LocList,
    Address,
    RangeList,
    Reference,
}

/// Value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue
{
    String(String),
    Flag(bool),
    Unsigned(u64),
    Signed(i64),
    SectionOffset(SectionOffset),
    Half(u16),
    Tag(DwTag),
    LocList(LocList),
    Address(Address),
    RangeList(RangeList),
    Reference(DieRef),
}

impl AttributeValue
{
    #[must_use]
    pub fn kind(&self) -> ValueKind
    {
        match self {
            AttributeValue::String(_) => ValueKind::String,
            AttributeValue::Flag(_) => ValueKind::Flag,
            AttributeValue::Unsigned(_) => ValueKind::Unsigned,
            AttributeValue::Signed(_) => ValueKind::Signed,
            AttributeValue::SectionOffset(_) => ValueKind::SectionOffset,
            AttributeValue::Half(_) => ValueKind::Half,
            AttributeValue::Tag(_) => ValueKind::Tag,
            AttributeValue::LocList(_) => ValueKind::LocList,
            AttributeValue::Address(_) => ValueKind::Address,
            AttributeValue::RangeList(_) => ValueKind::RangeList,
            AttributeValue::Reference(_) => ValueKind::Reference,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str>
    {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_flag(&self) -> Option<bool>
    {
        match self {
            AttributeValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Unsigned view, widening half-words.
    #[must_use]
    pub fn as_unsigned(&self) -> Option<u64>
    {
        match self {
            AttributeValue::Unsigned(v) => Some(*v),
            AttributeValue::Half(v) => Some(u64::from(*v)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_signed(&self) -> Option<i64>
    {
        match self {
            AttributeValue::Signed(v) => Some(*v),
            AttributeValue::Unsigned(v) => i64::try_from(*v).ok(),
            AttributeValue::Half(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_reference(&self) -> Option<&DieRef>
    {
        match self {
            AttributeValue::Reference(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_reference(&self) -> bool
    {
        matches!(self, AttributeValue::Reference(_))
    }
}

impl From<&str> for AttributeValue
{
    fn from(value: &str) -> Self
    {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue
{
    fn from(value: String) -> Self
    {
        AttributeValue::String(value)
    }
}

impl From<bool> for AttributeValue
{
    fn from(value: bool) -> Self
    {
        AttributeValue::Flag(value)
    }
}

impl From<u64> for AttributeValue
{
    fn from(value: u64) -> Self
    {
        AttributeValue::Unsigned(value)
    }
}

impl From<i64> for AttributeValue
{
    fn from(value: i64) -> Self
    {
        AttributeValue::Signed(value)
    }
}

impl From<Address> for AttributeValue
{
    fn from(value: Address) -> Self
    {
        AttributeValue::Address(value)
    }
}

impl fmt::Display for AttributeValue
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            AttributeValue::String(s) => write!(f, "\"{s}\""),
            AttributeValue::Flag(b) => write!(f, "{b}"),
            AttributeValue::Unsigned(v) => write!(f, "{v}"),
            AttributeValue::Signed(v) => write!(f, "{v}"),
            AttributeValue::SectionOffset(off) => write!(f, "section+0x{:x}", off.0),
            AttributeValue::Half(v) => write!(f, "{v}"),
            AttributeValue::Tag(tag) => write!(f, "{tag}"),
            AttributeValue::Address(addr) => write!(f, "{addr}"),
            AttributeValue::Reference(r) => write!(f, "<{}>", r.target),
            AttributeValue::LocList(list) => {
                f.write_str("[")?;
                for (i, entry) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    if entry.begin == Address::ZERO && entry.end == Address::MAX {
                        write!(f, "{} expr bytes", entry.expr.len())?;
                    } else {
                        write!(f, "[{}, {}): {} expr bytes", entry.begin, entry.end, entry.expr.len())?;
                    }
                }
                f.write_str("]")
            }
            AttributeValue::RangeList(ranges) => {
                f.write_str("[")?;
                for (i, range) in ranges.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "[{}, {})", range.begin, range.end)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Conversion between a typed accessor's Rust type and the stored value.
///
/// Implemented once per stored kind; the per-tag accessors generated in
/// [`variants`](crate::variants) go through this trait.
pub trait StoredValue: Sized
{
    fn from_value(value: &AttributeValue) -> Option<Self>;

    /// Build the stored value. `holder` and `attr` identify where it will be
    /// stored; only references use them.
    fn into_value(self, holder: Offset, attr: DwAt) -> AttributeValue;
}

impl StoredValue for String
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_str().map(str::to_string)
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::String(self)
    }
}

impl StoredValue for bool
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_flag()
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Flag(self)
    }
}

impl StoredValue for u64
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_unsigned()
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Unsigned(self)
    }
}

impl StoredValue for i64
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_signed()
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Signed(self)
    }
}

impl StoredValue for u16
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::Half(v) => Some(*v),
            AttributeValue::Unsigned(v) => u16::try_from(*v).ok(),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Half(self)
    }
}

impl StoredValue for SectionOffset
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::SectionOffset(off) => Some(*off),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::SectionOffset(self)
    }
}

impl StoredValue for DwTag
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::Tag(tag) => Some(*tag),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Tag(self)
    }
}

impl StoredValue for Address
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::Address(addr) => Some(*addr),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Address(self)
    }
}

impl StoredValue for LocList
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::LocList(list) => Some(list.clone()),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::LocList(self)
    }
}

impl StoredValue for RangeList
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        match value {
            AttributeValue::RangeList(ranges) => Some(ranges.clone()),
            _ => None,
        }
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::RangeList(self)
    }
}

/// Reference-typed accessors read and write the target offset.
impl StoredValue for Offset
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_reference().map(|r| r.target)
    }

    fn into_value(self, holder: Offset, attr: DwAt) -> AttributeValue
    {
        AttributeValue::Reference(DieRef {
            target: self,
            cross_unit: false,
            referencing: holder,
            attr,
        })
    }
}

/// Encodings are stored as plain unsigned constants.
impl StoredValue for DwAte
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_unsigned().and_then(|v| u8::try_from(v).ok()).map(DwAte)
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Unsigned(u64::from(self.0))
    }
}

impl StoredValue for DwLang
{
    fn from_value(value: &AttributeValue) -> Option<Self>
    {
        value.as_unsigned().and_then(|v| u16::try_from(v).ok()).map(DwLang)
    }

    fn into_value(self, _holder: Offset, _attr: DwAt) -> AttributeValue
    {
        AttributeValue::Unsigned(u64::from(self.0))
    }
}
