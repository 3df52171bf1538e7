//! Depth-first traversal.
//!
//! Offsets say nothing about ancestry once entries have been synthesized, so
//! the iterator here carries the full root-to-node path at every step, and
//! "is this node inside that subtree" is answered by comparing paths, never
//! offset ranges.

use super::{DieSet, Path};
use crate::die::Die;
use crate::types::Offset;

/// A node reached by a depth-first walk, with its path from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position
{
    path: Path,
}

impl Position
{
    /// Offset of the node itself.
    #[must_use]
    pub fn offset(&self) -> Offset
    {
        self.path.last().copied().unwrap_or(Offset::ROOT)
    }

    /// Root first, node last.
    #[must_use]
    pub fn path(&self) -> &[Offset]
    {
        &self.path
    }

    /// Number of edges from the root (the root has depth 0).
    #[must_use]
    pub fn depth(&self) -> usize
    {
        self.path.len().saturating_sub(1)
    }

    /// Whether this node is `ancestor_path`'s last node or one of its
    /// descendants.
    #[must_use]
    pub fn is_within(&self, ancestor_path: &[Offset]) -> bool
    {
        self.path.starts_with(ancestor_path)
    }
}

/// Pre-order iterator over a [`DieSet`].
///
/// Started anywhere, it keeps going past the starting node's subtree into
/// the rest of the tree, exactly like a whole-tree walk resumed at that
/// node. Use [`DieSet::subtree`] to stop at the subtree boundary.
#[derive(Debug, Clone)]
pub struct DepthFirst<'a>
{
    set: &'a DieSet,
    next: Option<Path>,
}

impl Iterator for DepthFirst<'_>
{
    type Item = Position;

    fn next(&mut self) -> Option<Position>
    {
        let current = self.next.take()?;
        self.next = self.successor(&current);
        Some(Position { path: current })
    }
}

impl DepthFirst<'_>
{
    fn successor(&self, current: &Path) -> Option<Path>
    {
        let here = *current.last()?;
        if let Some(child) = self.set.first_child(here) {
            let mut path = current.clone();
            path.push(child);
            return Some(path);
        }

        // No children: climb until some ancestor has a following sibling.
        let mut path = current.clone();
        loop {
            let done = path.pop()?;
            let parent = *path.last()?;
            if let Some(sibling) = self.set.find(parent).and_then(|die| die.child_after(done)) {
                path.push(sibling);
                return Some(path);
            }
        }
    }
}

impl DieSet
{
    /// Root-to-node offsets for `offset`, built by following parent links.
    /// `[0]` for the root; `None` for an unknown offset.
    #[must_use]
    pub fn path_from_root(&self, offset: Offset) -> Option<Path>
    {
        let mut path = Path::new();
        let mut current = self.find(offset)?;
        path.push(current.offset());
        while let Some(parent) = current.parent() {
            current = self.find(parent)?;
            path.push(parent);
        }
        path.reverse();
        Some(path)
    }

    /// Whole-tree pre-order walk starting at the root.
    #[must_use]
    pub fn iter_depthfirst(&self) -> DepthFirst<'_>
    {
        DepthFirst {
            set: self,
            next: self.path_from_root(Offset::ROOT),
        }
    }

    /// Pre-order walk resumed at `start`; empty for an unknown offset.
    #[must_use]
    pub fn depthfirst_from(&self, start: Offset) -> DepthFirst<'_>
    {
        DepthFirst {
            set: self,
            next: self.path_from_root(start),
        }
    }

    /// The subtree whose root has path `root_path`, in pre-order.
    pub fn subtree<'a>(&'a self, root_path: &'a [Offset]) -> impl Iterator<Item = Position> + 'a
    {
        let start = root_path.last().copied().unwrap_or(Offset::ROOT);
        self.depthfirst_from(start)
            .take_while(move |position| position.is_within(root_path))
    }

    /// Visit `start` and its descendants in pre-order.
    ///
    /// `visit` receives every node accepted by `entry` together with its
    /// depth below the root. The walk only descends below nodes accepted by
    /// `recurse`. Children are visited in ascending offset order.
    pub fn walk_depthfirst<V, E, R>(&self, start: Offset, mut visit: V, entry: E, recurse: R)
    where
        V: FnMut(&Die, usize),
        E: Fn(&Die) -> bool,
        R: Fn(&Die) -> bool,
    {
        let Some(start_path) = self.path_from_root(start) else {
            return;
        };
        let mut stack = vec![(start, start_path.len() - 1)];
        while let Some((offset, depth)) = stack.pop() {
            let Some(die) = self.find(offset) else {
                continue;
            };
            if entry(die) {
                visit(die, depth);
            }
            if recurse(die) {
                stack.extend(die.children().iter().rev().map(|child| (*child, depth + 1)));
            }
        }
    }
}
