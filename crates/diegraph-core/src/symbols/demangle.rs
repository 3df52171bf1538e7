//! Symbol demangling.
//!
//! Language detection looks only at the mangling prefix:
//!
//! - Rust: `_R` (v0) or `_ZN` with a Rust hash, or a name containing `::`
//! - C++: any other `_Z` (Itanium)
//! - C: everything else

use rustc_demangle::try_demangle;

use crate::types::{SymbolLanguage, SymbolName};

/// Build a [`SymbolName`] from a raw symbol-table string, demangling it when
/// `rustc-demangle` recognises the scheme.
pub fn make_symbol_name(raw: String) -> SymbolName
{
    let demangled = try_demangle(&raw).ok().map(|d| format!("{d:#}"));
    let language = if raw.starts_with("_R") || (raw.starts_with("_ZN") && demangled.is_some()) || raw.contains("::") {
        SymbolLanguage::Rust
    } else if raw.starts_with("_Z") {
        SymbolLanguage::Cpp
    } else {
        SymbolLanguage::C
    };

    SymbolName::new(raw, demangled, language)
}
