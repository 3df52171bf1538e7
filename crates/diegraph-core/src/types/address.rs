//! Target address type.

use std::fmt;
use std::ops::Add;

/// Address in the target program's address space
///
/// Stored by address-kind attributes (`DW_AT_low_pc`, `DW_AT_entry_pc`, ...)
/// and used for the bounds of range and location lists. Keeping it distinct
/// from [`Offset`](super::Offset) stops a `.debug_info` offset from being
/// written where a code address belongs.
///
/// ```rust
/// use diegraph_core::types::Address;
///
/// let pc = Address::from(0x401000);
/// assert_eq!((pc + 0x10).value(), 0x401010);
/// assert_eq!(pc.checked_add(u64::MAX), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address(u64);

impl Address
{
    pub const ZERO: Self = Address(0);

    /// Highest representable address, used as the open end of a
    /// location expression that is valid everywhere.
    pub const MAX: Self = Address(u64::MAX);

    #[must_use]
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    #[must_use]
    pub const fn value(self) -> u64
    {
        self.0
    }

    #[must_use]
    pub fn checked_add(self, delta: u64) -> Option<Self>
    {
        self.0.checked_add(delta).map(Address)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:x}", self.0)
    }
}

impl Add<u64> for Address
{
    type Output = Address;

    fn add(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}
