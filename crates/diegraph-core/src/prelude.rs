//! Common module for library exports

pub use crate::attr::{AttributeValue, DieRef};
pub use crate::builder::{BuildReport, GraphBuilder};
pub use crate::die::Die;
pub use crate::dieset::{DieSet, IntegrityReport, Position};
pub use crate::error::{DieError, DieResult};
pub use crate::factory::Factory;
pub use crate::loader::DebugFile;
pub use crate::options::LoadOptions;
pub use crate::reconcile::{reconcile_undefined_symbols, ReconcileReport};
pub use crate::types::{Address, Offset, SymbolName};
pub use crate::variants::{
    BaseType, BaseTypeMut, CompileUnit, CompileUnitMut, DieKind, Subprogram, SubprogramMut, TypedDie, Variable,
    VariableMut, View, ViewMut,
};
