//! Object-file symbol types.

use std::fmt;

/// Programming language guessed from a symbol's mangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolLanguage
{
    /// Rust legacy (`_ZN...E` with hash) or v0 (`_R...`) mangling.
    Rust,
    /// Itanium C++ mangling.
    Cpp,
    /// No mangling; C or assembly.
    C,
}

impl fmt::Display for SymbolLanguage
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(match self {
            SymbolLanguage::Rust => "rust",
            SymbolLanguage::Cpp => "c++",
            SymbolLanguage::C => "c",
        })
    }
}

/// Linkage name of a symbol, with its demangled form when one exists.
///
/// Lookups against the entry graph always use [`raw`](Self::raw): that is
/// the string a compiler would have put in `DW_AT_name` for an external C
/// declaration, and the one a later reconciliation pass re-checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolName
{
    raw: String,
    demangled: Option<String>,
    language: SymbolLanguage,
}

impl SymbolName
{
    pub fn new(raw: String, demangled: Option<String>, language: SymbolLanguage) -> Self
    {
        Self {
            raw,
            demangled,
            language,
        }
    }

    pub fn raw(&self) -> &str
    {
        &self.raw
    }

    pub fn demangled(&self) -> Option<&str>
    {
        self.demangled.as_deref()
    }

    /// Demangled name if there is one, raw name otherwise.
    pub fn display_name(&self) -> &str
    {
        self.demangled.as_deref().unwrap_or(&self.raw)
    }

    pub fn language(&self) -> SymbolLanguage
    {
        self.language
    }

    pub fn is_empty(&self) -> bool
    {
        self.raw.is_empty()
    }
}

impl fmt::Display for SymbolName
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.display_name())
    }
}
