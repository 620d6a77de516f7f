//! Errors raised while building types.
//!
//! Comparing types never fails; only construction of a malformed type does.

use miette::Diagnostic;
use thiserror::Error;

/// A type could not be constructed from the given parts.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ConstructionError {
    /// `[]` as a tuple type has no elements to fix an arity for.
    #[error("a tuple type must have at least one element")]
    #[diagnostic(code(tycompat::empty_tuple))]
    EmptyTuple,

    #[error("duplicate property '{name}' in object type")]
    #[diagnostic(
        code(tycompat::duplicate_property),
        help("an object type maps each property name to exactly one type")
    )]
    DuplicateProperty { name: String },

    #[error("duplicate member '{member}' in enum '{enum_name}'")]
    #[diagnostic(code(tycompat::duplicate_enum_member))]
    DuplicateEnumMember { enum_name: String, member: String },

    /// Auto-numbering cannot continue after a string-valued member.
    #[error("enum member '{member}' in enum '{enum_name}' must have an initializer")]
    #[diagnostic(
        code(tycompat::enum_member_needs_initializer),
        help("members following a string-valued member need an explicit value")
    )]
    EnumMemberNeedsInitializer { enum_name: String, member: String },
}
