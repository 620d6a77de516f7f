//! tycompat_types: The type model.
//!
//! Primitive, literal, union, array, tuple, object, function and the special
//! `any`/`unknown`/`void`/`undefined`/`never`/`object` types, stored in a
//! structurally interned [`TypeTable`].

mod display;
mod enums;
mod flags;
mod types;

pub use enums::{EnumMemberInit, EnumType};
pub use flags::{TypeFlags, TypeId};
pub use types::{LiteralValue, NumberValue, PrimitiveKind, Signature, Type, TypeKind, TypeTable};
pub use tycompat_core::ConstructionError;
