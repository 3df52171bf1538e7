//! # Entry kinds and typed views
//!
//! [`DieKind`] is the closed set of entry kinds this crate understands, one
//! case per DWARF tag plus the synthetic file-level root. Every kind also
//! gets a pair of typed views over a [`Die`]: a read view named after the
//! kind (`Subprogram`, `BaseType`, ...) and a mutable `...Mut` view. The
//! views expose exactly the attributes listed for the kind in the table at
//! the bottom of this file.
//!
//! ## Accessor conventions
//!
//! - Optional attributes read as `Option<T>` and are written with
//!   `Option<T>`; writing `None` removes the attribute.
//! - Mandatory attributes read as [`DieResult<T>`] and fail with
//!   [`DieError::MissingAttribute`] when absent or of the wrong kind.
//! - Reference attributes read and write the target [`Offset`].
//!
//! ## Example
//!
//! ```rust
//! use diegraph_core::prelude::*;
//! use gimli::constants::{DW_ATE_signed, DW_TAG_base_type, DW_TAG_compile_unit};
//!
//! let factory = Factory::new();
//! let mut set = DieSet::new();
//! let cu = factory.create(&mut set, DW_TAG_compile_unit, Offset::ROOT, None).unwrap();
//! let int = factory.create(&mut set, DW_TAG_base_type, cu, Some("int")).unwrap();
//!
//! let die = set.find_mut(int).unwrap();
//! let mut base = die.view_mut::<BaseTypeMut>().unwrap();
//! base.set_byte_size(4).set_encoding(DW_ATE_signed);
//!
//! let base = set.find(int).unwrap().view::<BaseType>().unwrap();
//! assert_eq!(base.byte_size().unwrap(), 4);
//! assert!(base.bit_size().is_none());
//! ```

use std::collections::HashMap;
use std::fmt;

use gimli::{constants, DwAte, DwLang, DwTag};
use once_cell::sync::Lazy;

use crate::attr::{LocList, RangeList, SectionOffset, StoredValue};
use crate::die::Die;
use crate::error::{DieError, DieResult};
use crate::types::{Address, Offset};

/// Tag value of the synthetic root (`DW_TAG_null` is never a real entry).
pub const TOPLEVEL_TAG: DwTag = DwTag(0);

const NONE: u8 = 0;
/// Children are looked up by name during path resolution.
const NAMED: u8 = 1;
/// The entry describes a type.
const TYPE: u8 = 2;

static KINDS_BY_TAG: Lazy<HashMap<DwTag, DieKind>> =
    Lazy::new(|| DieKind::ALL.iter().map(|kind| (kind.tag(), *kind)).collect());

/// Read-only typed view of one entry kind.
pub trait View<'a>: Sized
{
    const KIND: DieKind;

    /// Wrap `die` without checking its kind. Use [`Die::view`] instead.
    #[doc(hidden)]
    fn wrap(die: &'a Die) -> Self;

    fn die(&self) -> &'a Die;

    fn offset(&self) -> Offset
    {
        self.die().offset()
    }

    fn name(&self) -> Option<&'a str>
    {
        self.die().name()
    }
}

/// Mutable typed view of one entry kind.
pub trait ViewMut<'a>: Sized
{
    const KIND: DieKind;

    /// Wrap `die` without checking its kind. Use [`Die::view_mut`] instead.
    #[doc(hidden)]
    fn wrap(die: &'a mut Die) -> Self;

    fn die(&self) -> &Die;

    fn die_mut(&mut self) -> &mut Die;

    fn offset(&self) -> Offset
    {
        self.die().offset()
    }

    fn name(&self) -> Option<&str>
    {
        self.die().name()
    }

    fn set_name(&mut self, name: Option<&str>) -> &mut Self
    {
        self.die_mut().set_name(name);
        self
    }
}

macro_rules! getter {
    (opt $get:ident, $attr:ident, $ty:ty) => {
        #[must_use]
        pub fn $get(&self) -> Option<$ty>
        {
            self.die
                .get_attr(constants::$attr)
                .and_then(<$ty as StoredValue>::from_value)
        }
    };
    (req $get:ident, $attr:ident, $ty:ty) => {
        pub fn $get(&self) -> DieResult<$ty>
        {
            self.die
                .get_attr(constants::$attr)
                .and_then(<$ty as StoredValue>::from_value)
                .ok_or(DieError::MissingAttribute {
                    offset: self.die.offset(),
                    attr: constants::$attr,
                })
        }
    };
}

macro_rules! setter {
    (opt $set:ident, $attr:ident, $ty:ty) => {
        pub fn $set(&mut self, value: Option<$ty>) -> &mut Self
        {
            match value {
                Some(value) => {
                    let stored = <$ty as StoredValue>::into_value(value, self.die.offset(), constants::$attr);
                    self.die.put_attr(constants::$attr, stored);
                }
                None => {
                    self.die.remove_attr(constants::$attr);
                }
            }
            self
        }
    };
    (req $set:ident, $attr:ident, $ty:ty) => {
        pub fn $set(&mut self, value: $ty) -> &mut Self
        {
            let stored = <$ty as StoredValue>::into_value(value, self.die.offset(), constants::$attr);
            self.die.put_attr(constants::$attr, stored);
            self
        }
    };
}

macro_rules! die_kinds {
    (
        $(
            $kind:ident / $kind_mut:ident = $tag:ident, $flags:expr, {
                $( $mode:ident $get:ident / $set:ident : $attr:ident => $ty:ty ; )*
            }
        )*
    ) => {
        /// Kind of an entry; one case per DWARF tag this crate models.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum DieKind
        {
            /// The synthetic root at offset 0
            FileToplevel,
            $(
                #[doc = concat!("`", stringify!($tag), "`")]
                $kind,
            )*
        }

        impl DieKind
        {
            /// Every kind a factory can build (the root excluded).
            pub const ALL: &'static [DieKind] = &[$(DieKind::$kind,)*];

            #[must_use]
            pub const fn tag(self) -> DwTag
            {
                match self {
                    DieKind::FileToplevel => TOPLEVEL_TAG,
                    $(DieKind::$kind => constants::$tag,)*
                }
            }

            #[must_use]
            pub const fn tag_name(self) -> &'static str
            {
                match self {
                    DieKind::FileToplevel => "file_toplevel",
                    $(DieKind::$kind => stringify!($tag),)*
                }
            }

            const fn flags(self) -> u8
            {
                match self {
                    DieKind::FileToplevel => NAMED,
                    $(DieKind::$kind => $flags,)*
                }
            }
        }

        $(
            #[doc = concat!("Read view of a `", stringify!($tag), "` entry.")]
            #[derive(Debug, Clone, Copy)]
            pub struct $kind<'a>
            {
                die: &'a Die,
            }

            impl $kind<'_>
            {
                $( getter!($mode $get, $attr, $ty); )*
            }

            impl<'a> View<'a> for $kind<'a>
            {
                const KIND: DieKind = DieKind::$kind;

                fn wrap(die: &'a Die) -> Self
                {
                    Self { die }
                }

                fn die(&self) -> &'a Die
                {
                    self.die
                }
            }

            #[doc = concat!("Mutable view of a `", stringify!($tag), "` entry.")]
            #[derive(Debug)]
            pub struct $kind_mut<'a>
            {
                die: &'a mut Die,
            }

            impl $kind_mut<'_>
            {
                $( getter!($mode $get, $attr, $ty); )*
                $( setter!($mode $set, $attr, $ty); )*
            }

            impl<'a> ViewMut<'a> for $kind_mut<'a>
            {
                const KIND: DieKind = DieKind::$kind;

                fn wrap(die: &'a mut Die) -> Self
                {
                    Self { die }
                }

                fn die(&self) -> &Die
                {
                    &*self.die
                }

                fn die_mut(&mut self) -> &mut Die
                {
                    &mut *self.die
                }
            }
        )*

        /// An entry seen through the view of its own kind.
        #[derive(Debug, Clone, Copy)]
        pub enum TypedDie<'a>
        {
            FileToplevel(&'a Die),
            $($kind($kind<'a>),)*
        }

        /// Mutable counterpart of [`TypedDie`].
        #[derive(Debug)]
        pub enum TypedDieMut<'a>
        {
            FileToplevel(&'a mut Die),
            $($kind($kind_mut<'a>),)*
        }

        impl Die
        {
            /// Dispatch on this entry's kind.
            #[must_use]
            pub fn typed(&self) -> TypedDie<'_>
            {
                match self.kind() {
                    DieKind::FileToplevel => TypedDie::FileToplevel(self),
                    $(DieKind::$kind => TypedDie::$kind($kind { die: self }),)*
                }
            }

            pub fn typed_mut(&mut self) -> TypedDieMut<'_>
            {
                match self.kind() {
                    DieKind::FileToplevel => TypedDieMut::FileToplevel(self),
                    $(DieKind::$kind => TypedDieMut::$kind($kind_mut { die: self }),)*
                }
            }
        }
    };
}

impl DieKind
{
    /// Kind registered for `tag`, if any.
    #[must_use]
    pub fn from_tag(tag: DwTag) -> Option<Self>
    {
        KINDS_BY_TAG.get(&tag).copied()
    }

    /// Whether path resolution searches this kind's children by name.
    #[must_use]
    pub const fn has_named_children(self) -> bool
    {
        self.flags() & NAMED != 0
    }

    #[must_use]
    pub const fn is_type(self) -> bool
    {
        self.flags() & TYPE != 0
    }

    /// Root of a unit: entries below it record its offset as their unit.
    #[must_use]
    pub const fn is_unit(self) -> bool
    {
        matches!(
            self,
            DieKind::CompileUnit | DieKind::PartialUnit | DieKind::TypeUnit | DieKind::SkeletonUnit
        )
    }
}

impl fmt::Display for DieKind
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.tag_name())
    }
}

impl Die
{
    /// This entry as a `V`, or `None` if it is of another kind.
    #[must_use]
    pub fn view<'a, V: View<'a>>(&'a self) -> Option<V>
    {
        (self.kind() == V::KIND).then(|| V::wrap(self))
    }

    pub fn view_mut<'a, V: ViewMut<'a>>(&'a mut self) -> Option<V>
    {
        if self.kind() == V::KIND {
            Some(V::wrap(self))
        } else {
            None
        }
    }
}

die_kinds! {
    ArrayType / ArrayTypeMut = DW_TAG_array_type, TYPE, {
        req element_type / set_element_type: DW_AT_type => Offset;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt ordering / set_ordering: DW_AT_ordering => u64;
    }
    ClassType / ClassTypeMut = DW_TAG_class_type, NAMED | TYPE, {
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt declaration / set_declaration: DW_AT_declaration => bool;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    EntryPoint / EntryPointMut = DW_TAG_entry_point, NONE, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt return_type / set_return_type: DW_AT_type => Offset;
    }
    EnumerationType / EnumerationTypeMut = DW_TAG_enumeration_type, NAMED | TYPE, {
        opt underlying_type / set_underlying_type: DW_AT_type => Offset;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt enum_class / set_enum_class: DW_AT_enum_class => bool;
        opt declaration / set_declaration: DW_AT_declaration => bool;
    }
    FormalParameter / FormalParameterMut = DW_TAG_formal_parameter, NONE, {
        opt param_type / set_param_type: DW_AT_type => Offset;
        opt location / set_location: DW_AT_location => LocList;
        opt artificial / set_artificial: DW_AT_artificial => bool;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    ImportedDeclaration / ImportedDeclarationMut = DW_TAG_imported_declaration, NONE, {
        opt import / set_import: DW_AT_import => Offset;
    }
    Label / LabelMut = DW_TAG_label, NONE, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
    }
    LexicalBlock / LexicalBlockMut = DW_TAG_lexical_block, NAMED, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt ranges / set_ranges: DW_AT_ranges => RangeList;
    }
    Member / MemberMut = DW_TAG_member, NONE, {
        opt member_type / set_member_type: DW_AT_type => Offset;
        opt data_member_location / set_data_member_location: DW_AT_data_member_location => u64;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt bit_size / set_bit_size: DW_AT_bit_size => u64;
        opt data_bit_offset / set_data_bit_offset: DW_AT_data_bit_offset => u64;
        opt artificial / set_artificial: DW_AT_artificial => bool;
    }
    PointerType / PointerTypeMut = DW_TAG_pointer_type, TYPE, {
        opt pointee_type / set_pointee_type: DW_AT_type => Offset;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
    }
    ReferenceType / ReferenceTypeMut = DW_TAG_reference_type, TYPE, {
        opt referent_type / set_referent_type: DW_AT_type => Offset;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
    }
    CompileUnit / CompileUnitMut = DW_TAG_compile_unit, NAMED, {
        opt producer / set_producer: DW_AT_producer => String;
        opt language / set_language: DW_AT_language => DwLang;
        opt comp_dir / set_comp_dir: DW_AT_comp_dir => String;
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt ranges / set_ranges: DW_AT_ranges => RangeList;
        opt stmt_list / set_stmt_list: DW_AT_stmt_list => SectionOffset;
    }
    StringType / StringTypeMut = DW_TAG_string_type, TYPE, {
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
    }
    StructureType / StructureTypeMut = DW_TAG_structure_type, NAMED | TYPE, {
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt declaration / set_declaration: DW_AT_declaration => bool;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    SubroutineType / SubroutineTypeMut = DW_TAG_subroutine_type, TYPE, {
        opt return_type / set_return_type: DW_AT_type => Offset;
        opt prototyped / set_prototyped: DW_AT_prototyped => bool;
    }
    Typedef / TypedefMut = DW_TAG_typedef, TYPE, {
        opt aliased_type / set_aliased_type: DW_AT_type => Offset;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    UnionType / UnionTypeMut = DW_TAG_union_type, NAMED | TYPE, {
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
        opt declaration / set_declaration: DW_AT_declaration => bool;
    }
    UnspecifiedParameters / UnspecifiedParametersMut = DW_TAG_unspecified_parameters, NONE, {
        opt artificial / set_artificial: DW_AT_artificial => bool;
    }
    Variant / VariantMut = DW_TAG_variant, NONE, {
        opt discr_value / set_discr_value: DW_AT_discr_value => u64;
    }
    CommonBlock / CommonBlockMut = DW_TAG_common_block, NAMED, {
        opt location / set_location: DW_AT_location => LocList;
    }
    CommonInclusion / CommonInclusionMut = DW_TAG_common_inclusion, NONE, {
        opt common_reference / set_common_reference: DW_AT_common_reference => Offset;
    }
    Inheritance / InheritanceMut = DW_TAG_inheritance, NONE, {
        req base_type / set_base_type: DW_AT_type => Offset;
        opt data_member_location / set_data_member_location: DW_AT_data_member_location => u64;
    }
    InlinedSubroutine / InlinedSubroutineMut = DW_TAG_inlined_subroutine, NAMED, {
        req abstract_origin / set_abstract_origin: DW_AT_abstract_origin => Offset;
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt ranges / set_ranges: DW_AT_ranges => RangeList;
        opt call_file / set_call_file: DW_AT_call_file => u64;
        opt call_line / set_call_line: DW_AT_call_line => u64;
    }
    Module / ModuleMut = DW_TAG_module, NAMED, {
        opt declaration / set_declaration: DW_AT_declaration => bool;
    }
    PtrToMemberType / PtrToMemberTypeMut = DW_TAG_ptr_to_member_type, TYPE, {
        opt member_type / set_member_type: DW_AT_type => Offset;
        opt containing_type / set_containing_type: DW_AT_containing_type => Offset;
    }
    SetType / SetTypeMut = DW_TAG_set_type, TYPE, {
        opt element_type / set_element_type: DW_AT_type => Offset;
        opt byte_size / set_byte_size: DW_AT_byte_size => u64;
    }
    SubrangeType / SubrangeTypeMut = DW_TAG_subrange_type, TYPE, {
        opt index_type / set_index_type: DW_AT_type => Offset;
        opt lower_bound / set_lower_bound: DW_AT_lower_bound => i64;
        opt upper_bound / set_upper_bound: DW_AT_upper_bound => i64;
        opt count / set_count: DW_AT_count => u64;
    }
    WithStmt / WithStmtMut = DW_TAG_with_stmt, NONE, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
    }
    AccessDeclaration / AccessDeclarationMut = DW_TAG_access_declaration, NONE, {}
    BaseType / BaseTypeMut = DW_TAG_base_type, TYPE, {
        req byte_size / set_byte_size: DW_AT_byte_size => u64;
        req encoding / set_encoding: DW_AT_encoding => DwAte;
        opt bit_size / set_bit_size: DW_AT_bit_size => u64;
    }
    CatchBlock / CatchBlockMut = DW_TAG_catch_block, NAMED, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
    }
    ConstType / ConstTypeMut = DW_TAG_const_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
    }
    Constant / ConstantMut = DW_TAG_constant, NONE, {
        opt constant_type / set_constant_type: DW_AT_type => Offset;
        opt external / set_external: DW_AT_external => bool;
        opt declaration / set_declaration: DW_AT_declaration => bool;
    }
    Enumerator / EnumeratorMut = DW_TAG_enumerator, NONE, {
        req const_value / set_const_value: DW_AT_const_value => i64;
    }
    FileType / FileTypeMut = DW_TAG_file_type, TYPE, {
        opt element_type / set_element_type: DW_AT_type => Offset;
    }
    Friend / FriendMut = DW_TAG_friend, NONE, {
        opt friend / set_friend: DW_AT_friend => Offset;
    }
    Namelist / NamelistMut = DW_TAG_namelist, NAMED, {}
    NamelistItem / NamelistItemMut = DW_TAG_namelist_item, NONE, {
        opt namelist_item / set_namelist_item: DW_AT_namelist_item => Offset;
    }
    PackedType / PackedTypeMut = DW_TAG_packed_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
    }
    Subprogram / SubprogramMut = DW_TAG_subprogram, NAMED, {
        opt external / set_external: DW_AT_external => bool;
        opt prototyped / set_prototyped: DW_AT_prototyped => bool;
        opt declaration / set_declaration: DW_AT_declaration => bool;
        opt return_type / set_return_type: DW_AT_type => Offset;
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt frame_base / set_frame_base: DW_AT_frame_base => LocList;
        opt linkage_name / set_linkage_name: DW_AT_linkage_name => String;
        opt artificial / set_artificial: DW_AT_artificial => bool;
        opt specification / set_specification: DW_AT_specification => Offset;
        opt abstract_origin / set_abstract_origin: DW_AT_abstract_origin => Offset;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    TemplateTypeParameter / TemplateTypeParameterMut = DW_TAG_template_type_parameter, NONE, {
        opt param_type / set_param_type: DW_AT_type => Offset;
    }
    TemplateValueParameter / TemplateValueParameterMut = DW_TAG_template_value_parameter, NONE, {
        opt param_type / set_param_type: DW_AT_type => Offset;
        opt const_value / set_const_value: DW_AT_const_value => i64;
    }
    ThrownType / ThrownTypeMut = DW_TAG_thrown_type, NONE, {
        opt thrown_type / set_thrown_type: DW_AT_type => Offset;
    }
    TryBlock / TryBlockMut = DW_TAG_try_block, NAMED, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
    }
    VariantPart / VariantPartMut = DW_TAG_variant_part, NONE, {
        opt discr / set_discr: DW_AT_discr => Offset;
    }
    Variable / VariableMut = DW_TAG_variable, NONE, {
        opt var_type / set_var_type: DW_AT_type => Offset;
        opt external / set_external: DW_AT_external => bool;
        opt declaration / set_declaration: DW_AT_declaration => bool;
        opt location / set_location: DW_AT_location => LocList;
        opt linkage_name / set_linkage_name: DW_AT_linkage_name => String;
        opt artificial / set_artificial: DW_AT_artificial => bool;
        opt specification / set_specification: DW_AT_specification => Offset;
        opt decl_line / set_decl_line: DW_AT_decl_line => u64;
        opt decl_file / set_decl_file: DW_AT_decl_file => u64;
    }
    VolatileType / VolatileTypeMut = DW_TAG_volatile_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
    }
    DwarfProcedure / DwarfProcedureMut = DW_TAG_dwarf_procedure, NONE, {
        opt location / set_location: DW_AT_location => LocList;
    }
    RestrictType / RestrictTypeMut = DW_TAG_restrict_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
    }
    InterfaceType / InterfaceTypeMut = DW_TAG_interface_type, NAMED | TYPE, {}
    Namespace / NamespaceMut = DW_TAG_namespace, NAMED, {
        opt export_symbols / set_export_symbols: DW_AT_export_symbols => bool;
    }
    ImportedModule / ImportedModuleMut = DW_TAG_imported_module, NONE, {
        opt import / set_import: DW_AT_import => Offset;
    }
    UnspecifiedType / UnspecifiedTypeMut = DW_TAG_unspecified_type, TYPE, {}
    PartialUnit / PartialUnitMut = DW_TAG_partial_unit, NAMED, {
        opt language / set_language: DW_AT_language => DwLang;
        opt stmt_list / set_stmt_list: DW_AT_stmt_list => SectionOffset;
    }
    ImportedUnit / ImportedUnitMut = DW_TAG_imported_unit, NONE, {
        opt import / set_import: DW_AT_import => Offset;
    }
    Condition / ConditionMut = DW_TAG_condition, NONE, {}
    SharedType / SharedTypeMut = DW_TAG_shared_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
        opt count / set_count: DW_AT_count => u64;
    }
    TypeUnit / TypeUnitMut = DW_TAG_type_unit, NAMED, {
        opt language / set_language: DW_AT_language => DwLang;
        opt stmt_list / set_stmt_list: DW_AT_stmt_list => SectionOffset;
    }
    RvalueReferenceType / RvalueReferenceTypeMut = DW_TAG_rvalue_reference_type, TYPE, {
        opt referent_type / set_referent_type: DW_AT_type => Offset;
    }
    TemplateAlias / TemplateAliasMut = DW_TAG_template_alias, TYPE, {
        opt aliased_type / set_aliased_type: DW_AT_type => Offset;
    }
    CoarrayType / CoarrayTypeMut = DW_TAG_coarray_type, TYPE, {
        opt element_type / set_element_type: DW_AT_type => Offset;
    }
    GenericSubrange / GenericSubrangeMut = DW_TAG_generic_subrange, TYPE, {
        opt index_type / set_index_type: DW_AT_type => Offset;
    }
    DynamicType / DynamicTypeMut = DW_TAG_dynamic_type, TYPE, {
        opt data_type / set_data_type: DW_AT_type => Offset;
    }
    AtomicType / AtomicTypeMut = DW_TAG_atomic_type, TYPE, {
        opt qualified_type / set_qualified_type: DW_AT_type => Offset;
    }
    CallSite / CallSiteMut = DW_TAG_call_site, NONE, {
        opt call_origin / set_call_origin: DW_AT_call_origin => Offset;
        opt call_return_pc / set_call_return_pc: DW_AT_call_return_pc => Address;
        opt call_tail_call / set_call_tail_call: DW_AT_call_tail_call => bool;
    }
    CallSiteParameter / CallSiteParameterMut = DW_TAG_call_site_parameter, NONE, {
        opt location / set_location: DW_AT_location => LocList;
        opt call_value / set_call_value: DW_AT_call_value => LocList;
    }
    SkeletonUnit / SkeletonUnitMut = DW_TAG_skeleton_unit, NAMED, {
        opt comp_dir / set_comp_dir: DW_AT_comp_dir => String;
        opt dwo_name / set_dwo_name: DW_AT_dwo_name => String;
    }
    GnuTemplateTemplateParam / GnuTemplateTemplateParamMut = DW_TAG_GNU_template_template_param, NONE, {}
    GnuTemplateParameterPack / GnuTemplateParameterPackMut = DW_TAG_GNU_template_parameter_pack, NONE, {}
    GnuFormalParameterPack / GnuFormalParameterPackMut = DW_TAG_GNU_formal_parameter_pack, NONE, {}
    GnuCallSite / GnuCallSiteMut = DW_TAG_GNU_call_site, NONE, {
        opt low_pc / set_low_pc: DW_AT_low_pc => Address;
        opt abstract_origin / set_abstract_origin: DW_AT_abstract_origin => Offset;
    }
    GnuCallSiteParameter / GnuCallSiteParameterMut = DW_TAG_GNU_call_site_parameter, NONE, {
        opt location / set_location: DW_AT_location => LocList;
    }
}
