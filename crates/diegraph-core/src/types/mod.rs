//! # Types
//!
//! Small value types shared by every layer of the graph: entry offsets,
//! target addresses and symbol names.

pub mod address;
pub mod offset;
pub mod symbols;

pub use address::Address;
pub use offset::Offset;
pub use symbols::{SymbolLanguage, SymbolName};
