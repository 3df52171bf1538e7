//! Tree printing.

use std::fmt;
use std::io::Write;

use gimli::constants::DW_AT_name;

use crate::die::Die;
use crate::dieset::DieSet;
use crate::error::DieResult;
use crate::types::Offset;

const INDENT: usize = 2;

/// Header line naming parent, kind, offset and name, then one indented line
/// per remaining attribute.
impl fmt::Display for Die
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.parent() {
            Some(parent) => write!(f, "DIE, child of {parent}, ")?,
            None => f.write_str("DIE, file root, ")?,
        }
        write!(
            f,
            "tag: {}, offset: {}, name: {}",
            self.kind(),
            self.offset(),
            self.name().unwrap_or("(no name)")
        )?;
        for (attr, value) in self.attrs() {
            if *attr == DW_AT_name {
                continue;
            }
            write!(f, "\n    {attr}: {value}")?;
        }
        Ok(())
    }
}

/// Write the subtree at `start` in pre-order, indented by depth, keeping
/// only entries accepted by `filter`.
///
/// ## Errors
///
/// `UnknownOffset` when `start` is not in the set, or `Io` when writing fails.
pub fn write_tree<W, F>(set: &DieSet, start: Offset, out: &mut W, filter: F) -> DieResult<()>
where
    W: Write,
    F: Fn(&Die) -> bool,
{
    set.get(start)?;
    let mut failure = None;
    set.walk_depthfirst(
        start,
        |die, depth| {
            if failure.is_none() {
                failure = write_indented(out, die, depth).err();
            }
        },
        filter,
        |_| true,
    );
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Write only the entries synthesized after loading, in tree order.
pub fn write_synthetic<W: Write>(set: &DieSet, out: &mut W) -> DieResult<()>
{
    write_tree(set, Offset::ROOT, out, |die| set.is_synthetic(die.offset()))
}

fn write_indented<W: Write>(out: &mut W, die: &Die, depth: usize) -> std::io::Result<()>
{
    let indent = depth * INDENT;
    for line in die.to_string().lines() {
        writeln!(out, "{:indent$}{line}", "")?;
    }
    Ok(())
}
