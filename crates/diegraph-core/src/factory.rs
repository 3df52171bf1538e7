//! # Factory
//!
//! Tag-indexed construction of entries. There are three ways an entry comes
//! into being, and each goes through here:
//!
//! - [`Factory::create`]: a brand-new entry, given a parent and maybe a name
//! - [`Factory::encapsulate`]: a mirror of one entry handed out by a reader
//! - [`Factory::clone_die`] / [`Factory::clone_subtree`]: a copy of an
//!   entry from another set
//!
//! Dispatch looks only at the tag. A tag with no registered [`DieKind`] is
//! refused with [`DieError::UnknownTag`].

use std::collections::HashMap;

use gimli::DwTag;
use tracing::{debug, trace};

use crate::die::Die;
use crate::dieset::DieSet;
use crate::error::{DieError, DieResult};
use crate::reader::RawEntry;
use crate::types::Offset;
use crate::variants::DieKind;

/// Registry from tag to entry kind.
#[derive(Debug, Clone)]
pub struct Factory
{
    kinds: HashMap<DwTag, DieKind>,
}

impl Default for Factory
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl Factory
{
    /// A factory that knows every kind in [`DieKind::ALL`].
    #[must_use]
    pub fn new() -> Self
    {
        Self::with_kinds(DieKind::ALL)
    }

    /// A factory that knows only `kinds`.
    #[must_use]
    pub fn with_kinds(kinds: &[DieKind]) -> Self
    {
        Self {
            kinds: kinds.iter().map(|kind| (kind.tag(), *kind)).collect(),
        }
    }

    /// Register one more kind, returning the kind it replaced for that tag.
    pub fn register(&mut self, kind: DieKind) -> Option<DieKind>
    {
        self.kinds.insert(kind.tag(), kind)
    }

    #[must_use]
    pub fn supports(&self, tag: DwTag) -> bool
    {
        self.kinds.contains_key(&tag)
    }

    /// Kind registered for `tag`.
    ///
    /// ## Errors
    ///
    /// `UnknownTag` when nothing is registered.
    pub fn kind_for(&self, tag: DwTag) -> DieResult<DieKind>
    {
        self.kinds.get(&tag).copied().ok_or(DieError::UnknownTag(tag))
    }

    /// Create a new, empty entry of kind `tag` under `parent`.
    ///
    /// The entry takes [`DieSet::next_free_offset`], carries no attributes
    /// other than the optional `DW_AT_name`, and is linked into `parent`'s
    /// children.
    ///
    /// ## Errors
    ///
    /// - `UnknownTag` if the tag is not registered
    /// - `UnknownParent` if `parent` is not in the set
    /// - `OffsetSpaceExhausted` if no offset is left above the highest one
    pub fn create(&self, set: &mut DieSet, tag: DwTag, parent: Offset, name: Option<&str>) -> DieResult<Offset>
    {
        let kind = self.kind_for(tag)?;
        let offset = set.next_free_offset()?;
        let parent_die = set.find(parent).ok_or(DieError::UnknownParent { offset, parent })?;
        let cu_offset = if kind.is_unit() {
            offset
        } else if parent_die.kind().is_unit() {
            parent
        } else {
            parent_die.cu_offset()
        };

        let mut die = Die::new(kind, offset, parent, cu_offset);
        die.set_name(name);
        set.insert(offset, die)?;
        debug!("created {} at {} under {} (name: {})", kind, offset, parent, name.unwrap_or("(none)"));
        Ok(offset)
    }

    /// Mirror one reader entry into `set` under `parent`.
    ///
    /// Only the entry itself is copied; walking its children is the
    /// caller's job. Attributes the reader could not decode are dropped.
    ///
    /// ## Errors
    ///
    /// - `TagMismatch` if the reader reports a tag other than `tag`
    /// - `UnknownTag` if the tag is not registered
    /// - anything [`DieSet::insert`] returns
    pub fn encapsulate<E: RawEntry>(&self, set: &mut DieSet, tag: DwTag, entry: &E, parent: Offset) -> DieResult<Offset>
    {
        if entry.tag() != tag {
            return Err(DieError::TagMismatch {
                expected: tag,
                found: entry.tag(),
            });
        }
        let kind = self.kind_for(tag)?;
        let offset = entry.offset();

        let mut die = Die::new(kind, offset, parent, entry.cu_offset());
        for attr in entry.attrs() {
            match &attr.value {
                Some(value) => {
                    die.put_attr(attr.name, value.clone());
                }
                None => debug!("{} ({}): dropping attribute {} with an unmodelled encoding", offset, kind, attr.name),
            }
        }
        set.insert(offset, die)?;
        Ok(offset)
    }

    /// Copy `source` into `dest` under `parent`, keeping its offset, unit
    /// offset and attributes.
    ///
    /// The copy starts with no children; they are linked in as they are
    /// cloned themselves (see [`clone_subtree`](Self::clone_subtree)).
    ///
    /// ## Errors
    ///
    /// - `UnknownTag` if the source kind is not registered here
    /// - anything [`DieSet::insert`] returns (`DuplicateOffset`,
    ///   `UnknownParent`, ...)
    pub fn clone_die(&self, dest: &mut DieSet, source: &Die, parent: Offset) -> DieResult<Offset>
    {
        let kind = self.kind_for(source.tag())?;
        let offset = source.offset();
        let die = Die::with_parts(
            kind,
            offset,
            Some(parent),
            source.cu_offset(),
            source.attrs().clone(),
            Default::default(),
        );
        dest.insert(offset, die)?;
        trace!("cloned {} ({}) under {}", offset, kind, parent);
        Ok(offset)
    }

    /// Clone `root` and all its descendants from `source` into `dest`, with
    /// `root` attached under `parent`. Returns the number of entries cloned.
    ///
    /// Offsets are preserved, so references inside the subtree still
    /// resolve in `dest`.
    pub fn clone_subtree(&self, dest: &mut DieSet, source: &DieSet, root: Offset, parent: Offset) -> DieResult<usize>
    {
        let root_path = source.path_from_root(root).ok_or(DieError::UnknownOffset(root))?;
        let mut cloned = 0;
        for position in source.subtree(&root_path) {
            let die = source.get(position.offset())?;
            let dest_parent = if position.offset() == root {
                parent
            } else {
                die.parent().ok_or(DieError::RootImmutable)?
            };
            self.clone_die(dest, die, dest_parent)?;
            cloned += 1;
        }
        debug!("cloned {} entries rooted at {} under {}", cloned, root, parent);
        Ok(cloned)
    }
}
