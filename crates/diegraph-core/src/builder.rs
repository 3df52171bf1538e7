//! # Graph builder
//!
//! Mirrors every unit a [`DebugInfoReader`] hands out into a [`DieSet`],
//! exactly once, depth first: an entry is inserted before its children, and
//! its children before its later siblings.
//!
//! The first unit's version stamp fixes the version for the whole file. A
//! later unit with a different stamp aborts the load: references may cross
//! units, and no policy for reconciling two encodings exists.

use tracing::{debug, info, warn};

use crate::dieset::{DieSet, IntegrityReport};
use crate::error::{DieError, DieResult};
use crate::factory::Factory;
use crate::options::LoadOptions;
use crate::reader::{DebugInfoReader, RawEntry};
use crate::types::Offset;

/// What a build did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport
{
    /// Units mirrored
    pub units: usize,
    /// Entries mirrored (the root not included)
    pub entries: usize,
    /// Entries skipped because their tag was unknown, subtrees included
    pub skipped: usize,
    /// Version stamp shared by every unit
    pub version: Option<u16>,
    /// Present when the integrity check ran
    pub integrity: Option<IntegrityReport>,
}

/// Walks a reader's tree into a [`DieSet`].
#[derive(Debug, Clone)]
pub struct GraphBuilder<'f>
{
    factory: &'f Factory,
    options: LoadOptions,
}

impl<'f> GraphBuilder<'f>
{
    #[must_use]
    pub fn new(factory: &'f Factory, options: LoadOptions) -> Self
    {
        Self { factory, options }
    }

    #[must_use]
    pub fn options(&self) -> &LoadOptions
    {
        &self.options
    }

    /// Build a fresh set from `reader`.
    pub fn build<R: DebugInfoReader>(&self, reader: &mut R) -> DieResult<(DieSet, BuildReport)>
    {
        let mut set = DieSet::new();
        let report = self.build_into(&mut set, reader)?;
        Ok((set, report))
    }

    /// Mirror every unit of `reader` under the root of `set`.
    ///
    /// ## Errors
    ///
    /// - `UnsupportedVersion` if the first unit's stamp is not accepted
    /// - `MixedVersions` if a later unit disagrees with the first
    /// - `UnknownTag` for an unregistered tag, unless skipping is enabled
    /// - any reader error
    ///
    /// Integrity violations are reported in the returned [`BuildReport`]
    /// and logged; they never fail the build.
    pub fn build_into<R: DebugInfoReader>(&self, set: &mut DieSet, reader: &mut R) -> DieResult<BuildReport>
    {
        let mut report = BuildReport {
            version: set.version(),
            ..BuildReport::default()
        };

        while let Some(header) = reader.next_unit_header()? {
            match report.version {
                None => {
                    if !self.options.supports_version(header.version) {
                        return Err(DieError::UnsupportedVersion(header.version));
                    }
                    debug!("session fixed at DWARF version {}", header.version);
                    report.version = Some(header.version);
                    set.set_version(header.version);
                }
                Some(expected) if expected != header.version => {
                    return Err(DieError::MixedVersions {
                        expected,
                        found: header.version,
                        unit: header.offset,
                    });
                }
                Some(_) => {}
            }

            let before = set.len();
            let root = reader.unit_root()?;
            self.mirror(set, reader, root, Offset::ROOT, &mut report)?;
            debug!(
                "unit at {} (version {}, {}-byte addresses): {} entries",
                header.offset,
                header.version,
                header.address_size,
                set.len() - before
            );
            report.units += 1;
        }

        set.seal_monotonic_range();
        report.entries = set.len() - 1;

        if self.options.check_integrity() {
            let integrity = set.integrity_check(Offset::ROOT)?;
            if !integrity.is_clean() {
                warn!(
                    "{} of {} references do not resolve; continuing",
                    integrity.violations.len(),
                    integrity.checked
                );
            }
            report.integrity = Some(integrity);
        }

        info!(
            "loaded {} units, {} entries (last mirrored offset {})",
            report.units,
            report.entries,
            set.last_monotonic_offset()
        );
        Ok(report)
    }

    /// Mirror `first` and its following siblings under `parent`, recursing
    /// into each one's children before moving on.
    fn mirror<R: DebugInfoReader>(
        &self,
        set: &mut DieSet,
        reader: &mut R,
        first: R::Entry,
        parent: Offset,
        report: &mut BuildReport,
    ) -> DieResult<()>
    {
        let mut current = Some(first);
        while let Some(entry) = current {
            match self.factory.encapsulate(set, entry.tag(), &entry, parent) {
                Ok(offset) => {
                    if let Some(child) = reader.first_child(&entry)? {
                        self.mirror(set, reader, child, offset, report)?;
                    }
                }
                Err(DieError::UnknownTag(tag)) if self.options.skip_unknown_tags() => {
                    let skipped = 1 + self.skip_children(reader, &entry)?;
                    warn!("skipping {} entries rooted at {} with unknown tag {}", skipped, entry.offset(), tag);
                    report.skipped += skipped;
                }
                Err(err) => return Err(err),
            }
            current = reader.next_sibling(&entry)?;
        }
        Ok(())
    }

    /// Drain the reader below `entry`, returning how many entries that was.
    fn skip_children<R: DebugInfoReader>(&self, reader: &mut R, entry: &R::Entry) -> DieResult<usize>
    {
        let mut skipped = 0;
        let mut current = reader.first_child(entry)?;
        while let Some(child) = current {
            skipped += 1 + self.skip_children(reader, &child)?;
            current = reader.next_sibling(&child)?;
        }
        Ok(skipped)
    }
}
