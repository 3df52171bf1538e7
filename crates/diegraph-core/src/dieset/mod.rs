//! # Entry set
//!
//! [`DieSet`] is the arena that owns every [`Die`] of one file, keyed by
//! offset. Parent links, children sets and reference attributes are all
//! offsets into this arena, so removing a slot can never leave another slot
//! holding a dangling pointer; at worst it leaves a dangling *offset*, which
//! [`DieSet::integrity_check`] reports.
//!
//! ## Invariants
//!
//! - Offset 0 always holds the synthetic file-level root.
//! - Every other entry names a parent that exists and lists it as a child.
//! - The back-reference index maps each parent offset to the
//!   `(child, discriminant)` records that name it as parent. It is only
//!   consulted when a single entry is erased, and is never touched once the
//!   set has started tearing down.
//! - Offsets are unique but not monotonic in tree order once entries have
//!   been synthesized. [`DieSet::last_monotonic_offset`] records where the
//!   mirrored range ended.

mod integrity;
mod resolve;
mod traverse;

use std::collections::btree_map::{self, BTreeMap};
use std::mem;

use gimli::DwAt;
use smallvec::SmallVec;
use tracing::trace;

pub use integrity::{IntegrityReport, IntegrityViolation};
pub use traverse::{DepthFirst, Position};

use crate::die::{Die, PARENT_LINK};
use crate::error::{DieError, DieResult};
use crate::types::Offset;
use crate::variants::DieKind;

/// Root-to-node sequence of offsets, root first.
pub type Path = SmallVec<[Offset; 8]>;

/// One back-reference record: the child offset and the discriminant under
/// which it points at its parent ([`PARENT_LINK`] for the parent link).
pub type BackrefRecord = (Offset, DwAt);

/// What a whole-set teardown did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Teardown
{
    /// Entries released
    pub released: usize,
    /// Back-reference records still present afterwards; teardown never
    /// edits the index, so this is everything that was there before.
    pub backrefs_untouched: usize,
}

/// Offset-keyed store of all entries of one file.
#[derive(Debug)]
pub struct DieSet
{
    entries: BTreeMap<Offset, Die>,
    backrefs: BTreeMap<Offset, Vec<BackrefRecord>>,
    tearing_down: bool,
    last_monotonic_offset: Offset,
    version: Option<u16>,
}

impl Default for DieSet
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl DieSet
{
    /// An empty set holding only the file-level root.
    #[must_use]
    pub fn new() -> Self
    {
        let mut entries = BTreeMap::new();
        entries.insert(Offset::ROOT, Die::toplevel());
        Self {
            entries,
            backrefs: BTreeMap::new(),
            tearing_down: false,
            last_monotonic_offset: Offset::ROOT,
            version: None,
        }
    }

    /// Number of entries, root included.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.entries.len()
    }

    /// True when nothing but the root is present.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.entries.len() <= 1
    }

    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool
    {
        self.entries.contains_key(&offset)
    }

    #[must_use]
    pub fn find(&self, offset: Offset) -> Option<&Die>
    {
        self.entries.get(&offset)
    }

    pub fn find_mut(&mut self, offset: Offset) -> Option<&mut Die>
    {
        self.entries.get_mut(&offset)
    }

    /// Like [`find`](Self::find) but an unknown offset is an error.
    pub fn get(&self, offset: Offset) -> DieResult<&Die>
    {
        self.find(offset).ok_or(DieError::UnknownOffset(offset))
    }

    pub fn get_mut(&mut self, offset: Offset) -> DieResult<&mut Die>
    {
        self.find_mut(offset).ok_or(DieError::UnknownOffset(offset))
    }

    /// The file-level root.
    #[must_use]
    pub fn root(&self) -> &Die
    {
        // Inserted by the constructor, refused by `insert` and `erase`, and
        // only drained by a teardown that consumes the set.
        &self.entries[&Offset::ROOT]
    }

    /// Entries in offset order. This is *not* tree order.
    pub fn iter(&self) -> btree_map::Values<'_, Offset, Die>
    {
        self.entries.values()
    }

    /// Insert `die` at `offset` and link it under its parent.
    ///
    /// The parent must already be present; its children set gains `offset`
    /// and its back-reference list gains the parent-link record.
    ///
    /// ## Errors
    ///
    /// - `DuplicateOffset` if the slot is taken (the occupant is unchanged)
    /// - `OffsetMismatch` if `die.offset() != offset`
    /// - `RootImmutable` for offset 0
    /// - `UnknownParent` if the parent is absent
    pub fn insert(&mut self, offset: Offset, die: Die) -> DieResult<&mut Die>
    {
        if die.offset() != offset {
            return Err(DieError::OffsetMismatch {
                slot: offset,
                die: die.offset(),
            });
        }
        if offset.is_root() {
            return Err(DieError::RootImmutable);
        }
        if self.entries.contains_key(&offset) {
            return Err(DieError::DuplicateOffset(offset));
        }
        let parent = die.parent().ok_or(DieError::RootImmutable)?;
        let parent_die = self
            .entries
            .get_mut(&parent)
            .ok_or(DieError::UnknownParent { offset, parent })?;
        parent_die.children_mut().insert(offset);
        self.register_backref(parent, offset, PARENT_LINK);

        trace!("inserted {} ({}) under {}", offset, die.kind(), parent);
        Ok(self.entries.entry(offset).or_insert(die))
    }

    /// One more than the highest offset in use.
    ///
    /// Every synthesized entry takes its offset from here, so inserting at
    /// the returned offset never collides.
    ///
    /// ## Errors
    ///
    /// `OffsetSpaceExhausted` when an entry already sits at `u64::MAX`.
    pub fn next_free_offset(&self) -> DieResult<Offset>
    {
        let highest = self.entries.last_key_value().map_or(Offset::ROOT, |(offset, _)| *offset);
        highest.successor().ok_or(DieError::OffsetSpaceExhausted(highest))
    }

    /// Highest offset that was mirrored from the file. Anything above it
    /// was synthesized afterwards.
    #[must_use]
    pub fn last_monotonic_offset(&self) -> Offset
    {
        self.last_monotonic_offset
    }

    /// Whether `offset` lies past the mirrored range.
    #[must_use]
    pub fn is_synthetic(&self, offset: Offset) -> bool
    {
        offset > self.last_monotonic_offset
    }

    /// Fix the mirrored range at the current highest offset.
    pub(crate) fn seal_monotonic_range(&mut self)
    {
        self.last_monotonic_offset = self.entries.last_key_value().map_or(Offset::ROOT, |(offset, _)| *offset);
    }

    /// DWARF version stamp shared by every unit of the file, once loaded.
    #[must_use]
    pub fn version(&self) -> Option<u16>
    {
        self.version
    }

    pub(crate) fn set_version(&mut self, version: u16)
    {
        self.version = Some(version);
    }

    #[must_use]
    pub fn find_parent_offset_of(&self, offset: Offset) -> Option<Offset>
    {
        self.find(offset).and_then(Die::parent)
    }

    #[must_use]
    pub fn parent_of(&self, offset: Offset) -> Option<&Die>
    {
        self.find_parent_offset_of(offset).and_then(|parent| self.find(parent))
    }

    #[must_use]
    pub fn first_child(&self, offset: Offset) -> Option<Offset>
    {
        self.find(offset).and_then(Die::first_child)
    }

    /// The entry after `offset` in its parent's children, or `None` at the
    /// end of the chain (and for the root).
    #[must_use]
    pub fn next_sibling(&self, offset: Offset) -> Option<Offset>
    {
        self.parent_of(offset).and_then(|parent| parent.child_after(offset))
    }

    /// First compilation unit under the root, if any.
    #[must_use]
    pub fn first_compile_unit(&self) -> Option<Offset>
    {
        self.root()
            .children()
            .iter()
            .copied()
            .find(|unit| self.find(*unit).is_some_and(|die| die.kind() == DieKind::CompileUnit))
    }

    /// Records naming `parent` as their parent.
    #[must_use]
    pub fn backrefs(&self, parent: Offset) -> &[BackrefRecord]
    {
        self.backrefs.get(&parent).map_or(&[], Vec::as_slice)
    }

    pub fn register_backref(&mut self, parent: Offset, child: Offset, discriminant: DwAt)
    {
        if self.tearing_down {
            return;
        }
        self.backrefs.entry(parent).or_default().push((child, discriminant));
    }

    /// Remove one back-reference record. Returns whether a record was
    /// removed; always `false` once teardown has begun.
    pub fn unregister_backref(&mut self, parent: Offset, child: Offset, discriminant: DwAt) -> bool
    {
        if self.tearing_down {
            return false;
        }
        let Some(list) = self.backrefs.get_mut(&parent) else {
            return false;
        };
        let Some(pos) = list.iter().position(|record| *record == (child, discriminant)) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.backrefs.remove(&parent);
        }
        true
    }

    #[must_use]
    pub fn is_tearing_down(&self) -> bool
    {
        self.tearing_down
    }

    /// Remove the entry at `offset` together with its whole subtree.
    ///
    /// Each removed entry unregisters its own parent-link record, so the
    /// siblings of `offset` keep theirs. Returns the removed entry.
    ///
    /// ## Errors
    ///
    /// `RootImmutable` for offset 0, `UnknownOffset` if nothing is there.
    pub fn erase(&mut self, offset: Offset) -> DieResult<Die>
    {
        if offset.is_root() {
            return Err(DieError::RootImmutable);
        }
        let root_path = self.path_from_root(offset).ok_or(DieError::UnknownOffset(offset))?;
        let mut doomed: Vec<Offset> = self.subtree(&root_path).map(|pos| pos.offset()).collect();

        if let Some(parent) = self.find_parent_offset_of(offset) {
            if let Some(parent_die) = self.entries.get_mut(&parent) {
                parent_die.children_mut().remove(&offset);
            }
        }

        // Children before parents, so every release still finds its own
        // parent's record list.
        doomed.reverse();
        let mut erased = None;
        for victim in doomed {
            if let Some(die) = self.entries.remove(&victim) {
                self.backrefs.remove(&victim);
                erased = Some(self.release(die));
            }
        }
        erased.ok_or(DieError::UnknownOffset(offset))
    }

    /// Release every entry at once.
    ///
    /// The teardown flag is raised first, so no entry's release touches the
    /// back-reference index. The set is empty (not even a root) afterwards.
    pub fn tear_down(mut self) -> Teardown
    {
        self.begin_teardown()
    }

    fn begin_teardown(&mut self) -> Teardown
    {
        self.tearing_down = true;
        let entries = mem::take(&mut self.entries);
        let released = entries.len();
        for (_, die) in entries {
            self.release(die);
        }
        Teardown {
            released,
            backrefs_untouched: self.backrefs.values().map(Vec::len).sum(),
        }
    }

    /// The per-entry half of destruction.
    fn release(&mut self, die: Die) -> Die
    {
        if !self.tearing_down {
            if let Some(parent) = die.parent() {
                self.unregister_backref(parent, die.offset(), PARENT_LINK);
            }
        }
        die
    }
}

impl Drop for DieSet
{
    fn drop(&mut self)
    {
        self.begin_teardown();
    }
}
