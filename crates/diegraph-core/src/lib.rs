//! # diegraph-core
//!
//! An in-memory, mutable graph of a program's DWARF debugging-information
//! entries.
//!
//! This crate provides:
//! - An offset-keyed entry store ([`DieSet`]) with a synthetic file-level
//!   root, back-references and depth-first traversal that carries the path
//!   from the root at every step
//! - Entries ([`Die`]) with typed attribute values and per-tag typed views
//! - A tag-indexed [`Factory`] for creating, mirroring and cloning entries
//! - A [`GraphBuilder`] that mirrors a file's units through a reader seam
//! - Referential-integrity checking and named-path resolution
//! - A reconciliation pass declaring undefined symbols the debug info omits
//!
//! ## Layering
//!
//! Bytes are never decoded here: `gimli` reads DWARF and `object` reads the
//! container, each behind a small trait ([`reader::DebugInfoReader`],
//! [`symbols::SymbolSource`]) so the graph logic can be driven by anything.
//!
//! ## Ownership
//!
//! The set owns every entry. Parent links, children and reference
//! attributes are offsets re-resolved through the set, so erasing an entry
//! can leave a dangling *offset* (which the integrity check reports) but
//! never a dangling pointer.

pub mod attr;
pub mod builder;
pub mod die;
pub mod dieset;
pub mod error;
pub mod factory;
pub mod loader;
pub mod options;
pub mod prelude;
pub mod print;
pub mod reader;
pub mod reconcile;
pub mod symbols;
pub mod types;
pub mod variants;

pub use builder::{BuildReport, GraphBuilder};
pub use die::Die;
pub use dieset::DieSet;
pub use error::{DieError, DieResult};
pub use factory::Factory;
pub use loader::DebugFile;
pub use options::LoadOptions;
pub use types::{Address, Offset};
