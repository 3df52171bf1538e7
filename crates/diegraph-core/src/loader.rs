//! # Loading files
//!
//! [`DebugFile`] ties the pieces together for a file on disk: parse the
//! container with `object`, hand its DWARF sections to `gimli`, mirror every
//! unit into a [`DieSet`], and optionally backfill declarations for
//! undefined symbols.
//!
//! ## Example
//!
//! ```rust,no_run
//! use diegraph_core::loader::DebugFile;
//! use diegraph_core::options::LoadOptions;
//!
//! let file = DebugFile::open("target/debug/app", LoadOptions::default())?;
//! println!("{} entries", file.dieset().len());
//! # Ok::<(), diegraph_core::error::DieError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::builder::{BuildReport, GraphBuilder};
use crate::dieset::DieSet;
use crate::error::DieResult;
use crate::factory::Factory;
use crate::options::LoadOptions;
use crate::reader::GimliReader;
use crate::reconcile::{reconcile_undefined_symbols, ReconcileReport};
use crate::symbols::ObjectImage;

/// A file's debug information, loaded into a [`DieSet`].
#[derive(Debug)]
pub struct DebugFile
{
    path: PathBuf,
    set: DieSet,
    build: BuildReport,
    reconcile: Option<ReconcileReport>,
}

impl DebugFile
{
    /// Read and load the file at `path`.
    ///
    /// ## Errors
    ///
    /// I/O errors, container errors (`UnsupportedImage`, `Object`), DWARF
    /// errors, and any fatal error of [`GraphBuilder::build_into`] or
    /// [`reconcile_undefined_symbols`].
    pub fn open(path: impl AsRef<Path>, options: LoadOptions) -> DieResult<Self>
    {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Self::from_bytes(path, &bytes, options)
    }

    /// Load an in-memory copy of a file; `path` is only recorded.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8], options: LoadOptions) -> DieResult<Self>
    {
        let path = path.into();
        let image = ObjectImage::parse(bytes)?;
        let dwarf = image.load_dwarf()?;

        let factory = Factory::new();
        let reconcile_symbols = options.reconcile_symbols();
        let builder = GraphBuilder::new(&factory, options);
        let mut reader = GimliReader::new(&dwarf);
        let (mut set, build) = builder.build(&mut reader)?;

        let reconcile = if reconcile_symbols {
            Some(reconcile_undefined_symbols(&mut set, &factory, &image)?)
        } else {
            None
        };

        info!("loaded {} ({}): {} entries", path.display(), image.kind(), set.len());
        Ok(Self {
            path,
            set,
            build,
            reconcile,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path
    {
        &self.path
    }

    #[must_use]
    pub fn dieset(&self) -> &DieSet
    {
        &self.set
    }

    pub fn dieset_mut(&mut self) -> &mut DieSet
    {
        &mut self.set
    }

    #[must_use]
    pub fn into_dieset(self) -> DieSet
    {
        self.set
    }

    #[must_use]
    pub fn build_report(&self) -> &BuildReport
    {
        &self.build
    }

    /// Present when reconciliation was enabled.
    #[must_use]
    pub fn reconcile_report(&self) -> Option<&ReconcileReport>
    {
        self.reconcile.as_ref()
    }
}
