//! Load configuration.

use std::ops::RangeInclusive;

/// How a file is turned into a [`DieSet`](crate::dieset::DieSet).
///
/// ## Example
///
/// ```rust
/// use diegraph_core::options::LoadOptions;
///
/// let options = LoadOptions::default()
///     .with_supported_versions(4..=5)
///     .with_symbol_reconciliation(true);
/// assert!(options.supports_version(4));
/// assert!(!options.supports_version(2));
/// assert!(options.check_integrity());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions
{
    supported_versions: RangeInclusive<u16>,
    check_integrity: bool,
    reconcile_symbols: bool,
    skip_unknown_tags: bool,
}

impl Default for LoadOptions
{
    fn default() -> Self
    {
        Self {
            supported_versions: 2..=5,
            check_integrity: true,
            reconcile_symbols: false,
            skip_unknown_tags: false,
        }
    }
}

impl LoadOptions
{
    /// Version stamps accepted on the first unit of a file.
    #[must_use]
    pub fn with_supported_versions(mut self, versions: RangeInclusive<u16>) -> Self
    {
        self.supported_versions = versions;
        self
    }

    /// Run the integrity check once the tree is loaded.
    #[must_use]
    pub fn with_integrity_check(mut self, enabled: bool) -> Self
    {
        self.check_integrity = enabled;
        self
    }

    /// Backfill declarations for undefined symbols after loading.
    #[must_use]
    pub fn with_symbol_reconciliation(mut self, enabled: bool) -> Self
    {
        self.reconcile_symbols = enabled;
        self
    }

    /// Skip (with a warning) entries whose tag the factory does not know,
    /// together with their subtrees, instead of failing the load.
    #[must_use]
    pub fn with_unknown_tags_skipped(mut self, enabled: bool) -> Self
    {
        self.skip_unknown_tags = enabled;
        self
    }

    #[must_use]
    pub fn supports_version(&self, version: u16) -> bool
    {
        self.supported_versions.contains(&version)
    }

    #[must_use]
    pub fn supported_versions(&self) -> &RangeInclusive<u16>
    {
        &self.supported_versions
    }

    #[must_use]
    pub fn check_integrity(&self) -> bool
    {
        self.check_integrity
    }

    #[must_use]
    pub fn reconcile_symbols(&self) -> bool
    {
        self.reconcile_symbols
    }

    #[must_use]
    pub fn skip_unknown_tags(&self) -> bool
    {
        self.skip_unknown_tags
    }
}
