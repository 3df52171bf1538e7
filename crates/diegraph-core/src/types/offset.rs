//! Entry offset type.

use std::fmt;

/// Key of an entry within a [`DieSet`](crate::dieset::DieSet)
///
/// For entries mirrored from a file this is the entry's offset in
/// `.debug_info`. Synthesized entries get offsets past everything the file
/// used, so offsets are unique but carry no ordering guarantee relative to
/// the tree.
///
/// ```rust
/// use diegraph_core::types::Offset;
///
/// let off = Offset::from(0x2d);
/// assert_eq!(off.value(), 0x2d);
/// assert_eq!(off.to_string(), "0x2d");
/// assert!(Offset::ROOT.is_root());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Offset(u64);

impl Offset
{
    /// The synthetic file-level root.
    pub const ROOT: Self = Offset(0);

    #[must_use]
    pub const fn new(value: u64) -> Self
    {
        Offset(value)
    }

    #[must_use]
    pub const fn value(self) -> u64
    {
        self.0
    }

    #[must_use]
    pub const fn is_root(self) -> bool
    {
        self.0 == 0
    }

    /// The offset immediately after this one, or `None` at `u64::MAX`.
    #[must_use]
    pub const fn successor(self) -> Option<Self>
    {
        match self.0.checked_add(1) {
            Some(next) => Some(Offset(next)),
            None => None,
        }
    }
}

impl From<u64> for Offset
{
    fn from(value: u64) -> Self
    {
        Offset(value)
    }
}

impl From<Offset> for u64
{
    fn from(offset: Offset) -> Self
    {
        offset.0
    }
}

impl fmt::Display for Offset
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for Offset
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
