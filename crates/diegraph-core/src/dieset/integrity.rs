//! Referential integrity.

use gimli::DwAt;
use tracing::{debug, warn};

use super::DieSet;
use crate::attr::DieRef;
use crate::error::{DieError, DieResult};
use crate::types::Offset;

/// A reference attribute whose target is not in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityViolation
{
    /// Entry holding the reference
    pub referencing: Offset,
    /// Attribute holding the reference
    pub attr: DwAt,
    /// Offset that does not resolve
    pub target: Offset,
}

/// Result of [`DieSet::integrity_check`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport
{
    /// Number of reference attributes examined
    pub checked: usize,
    pub violations: Vec<IntegrityViolation>,
}

impl IntegrityReport
{
    /// True when every reference resolved.
    #[must_use]
    pub fn is_clean(&self) -> bool
    {
        self.violations.is_empty()
    }
}

impl DieSet
{
    /// Every reference attribute (except `DW_AT_sibling`) held by an entry
    /// in the subtree rooted at `root`, in pre-order.
    pub fn all_refs_dfs(&self, root: Offset) -> DieResult<Vec<DieRef>>
    {
        let root_path = self.path_from_root(root).ok_or(DieError::UnknownOffset(root))?;
        let refs = self
            .subtree(&root_path)
            .filter_map(|position| self.find(position.offset()))
            .flat_map(|die| die.ref_attrs().map(|(_, r)| *r))
            .collect();
        Ok(refs)
    }

    /// Check that every reference in the subtree rooted at `root` names an
    /// entry that exists.
    ///
    /// Violations are logged and collected; the walk never stops early.
    /// Real toolchains do not always emit self-consistent debug info, so
    /// callers usually treat a dirty report as a warning.
    pub fn integrity_check(&self, root: Offset) -> DieResult<IntegrityReport>
    {
        let refs = self.all_refs_dfs(root)?;
        let mut report = IntegrityReport {
            checked: refs.len(),
            violations: Vec::new(),
        };

        for r in refs {
            if self.contains(r.target) {
                continue;
            }
            let holder = self.find(r.referencing);
            warn!(
                "referential integrity violation: attribute {} of {} ({}, name: {}) refers to nonexistent entry {}",
                r.attr,
                r.referencing,
                holder.map_or_else(|| "?".to_string(), |die| die.kind().to_string()),
                holder.and_then(|die| die.name()).unwrap_or("(no name)"),
                r.target
            );
            report.violations.push(IntegrityViolation {
                referencing: r.referencing,
                attr: r.attr,
                target: r.target,
            });
        }

        debug!(
            "integrity check under {}: {} references, {} dangling",
            root,
            report.checked,
            report.violations.len()
        );
        Ok(report)
    }
}
