//! # Symbol reconciliation
//!
//! Some toolchains emit no debug entry for functions a unit calls but does
//! not define. This pass backfills them: for every undefined symbol of the
//! image that no compilation unit declares, it adds a declaration-only
//! `DW_TAG_subprogram` under the first compilation unit.
//!
//! Nothing is known about these functions beyond their names, so each
//! declaration takes unspecified parameters and returns a signed
//! machine-word integer. That base type is synthesized once per pass.
//!
//! Existing entries are never modified or removed, and a symbol that
//! already resolves by name (including one declared by an earlier pass) is
//! left alone.

use gimli::constants::{DW_ATE_signed, DW_TAG_base_type, DW_TAG_subprogram, DW_TAG_unspecified_parameters};
use tracing::{debug, info, trace};

use crate::dieset::DieSet;
use crate::error::{DieError, DieResult};
use crate::factory::Factory;
use crate::symbols::SymbolSource;
use crate::types::{Offset, SymbolName};
use crate::variants::{BaseTypeMut, SubprogramMut};

/// What one reconciliation pass added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport
{
    /// The synthesized word-sized base type
    pub word_type: Offset,
    /// Undefined, named symbols examined
    pub considered: usize,
    /// Declarations added, with the symbol each stands for
    pub declared: Vec<(Offset, SymbolName)>,
}

/// Declare every undefined symbol of `source` that `set` does not name.
///
/// ## Errors
///
/// - `UnsupportedImage` for archives and non-object data
/// - `UnknownAddressClass` if the image is neither 32 nor 64 bit
/// - `NoCompileUnit` if there is nowhere to attach declarations
/// - any error listing the symbols
pub fn reconcile_undefined_symbols<S: SymbolSource>(
    set: &mut DieSet,
    factory: &Factory,
    source: &S,
) -> DieResult<ReconcileReport>
{
    let kind = source.image_kind();
    if !kind.is_single_image() {
        return Err(DieError::UnsupportedImage(kind));
    }
    let word_size = source.address_class().word_size().ok_or(DieError::UnknownAddressClass)?;
    let unit = set.first_compile_unit().ok_or(DieError::NoCompileUnit)?;
    let symbols = source.symbols()?;

    let word_type = factory.create(set, DW_TAG_base_type, unit, None)?;
    if let Some(mut base) = set.get_mut(word_type)?.view_mut::<BaseTypeMut>() {
        base.set_byte_size(word_size).set_encoding(DW_ATE_signed);
    }
    debug!("synthesized {}-byte word type at {}", word_size, word_type);

    let mut report = ReconcileReport {
        word_type,
        considered: 0,
        declared: Vec::new(),
    };

    for symbol in symbols {
        if !symbol.is_undefined() || symbol.name.is_empty() {
            continue;
        }
        report.considered += 1;
        if let Some(existing) = set.resolve_toplevel_name(symbol.name.raw()) {
            trace!("{} already described at {}", symbol.name.raw(), existing);
            continue;
        }

        let decl = factory.create(set, DW_TAG_subprogram, unit, Some(symbol.name.raw()))?;
        if let Some(mut subprogram) = set.get_mut(decl)?.view_mut::<SubprogramMut>() {
            subprogram
                .set_external(Some(true))
                .set_prototyped(Some(true))
                .set_declaration(Some(true))
                .set_return_type(Some(word_type));
        }
        factory.create(set, DW_TAG_unspecified_parameters, decl, None)?;

        debug!(
            "declared {} ({}) at {}",
            symbol.name.display_name(),
            symbol.name.language(),
            decl
        );
        report.declared.push((decl, symbol.name));
    }

    info!(
        "reconciled {} undefined symbols: {} declarations added",
        report.considered,
        report.declared.len()
    );
    Ok(report)
}
