//! Type flags and type handles.

use std::fmt;

bitflags::bitflags! {
    /// One bit per type variant, plus composite masks used by the checker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u32 {
        const NONE              = 0;
        const ANY               = 1 << 0;
        const UNKNOWN           = 1 << 1;
        const STRING            = 1 << 2;
        const NUMBER            = 1 << 3;
        const BOOLEAN           = 1 << 4;
        const STRING_LITERAL    = 1 << 5;
        const NUMBER_LITERAL    = 1 << 6;
        const BOOLEAN_LITERAL   = 1 << 7;
        const VOID              = 1 << 8;
        const UNDEFINED         = 1 << 9;
        const NEVER             = 1 << 10;
        const NON_PRIMITIVE     = 1 << 11;
        const UNION             = 1 << 12;
        const ARRAY             = 1 << 13;
        const TUPLE             = 1 << 14;
        const OBJECT            = 1 << 15;
        const FUNCTION          = 1 << 16;

        const LITERAL = Self::STRING_LITERAL.bits()
            | Self::NUMBER_LITERAL.bits()
            | Self::BOOLEAN_LITERAL.bits();

        const STRING_LIKE = Self::STRING.bits() | Self::STRING_LITERAL.bits();
        const NUMBER_LIKE = Self::NUMBER.bits() | Self::NUMBER_LITERAL.bits();
        const BOOLEAN_LIKE = Self::BOOLEAN.bits() | Self::BOOLEAN_LITERAL.bits();
        const VOID_LIKE = Self::VOID.bits() | Self::UNDEFINED.bits();

        const PRIMITIVE = Self::STRING.bits()
            | Self::NUMBER.bits()
            | Self::BOOLEAN.bits()
            | Self::LITERAL.bits()
            | Self::VOID.bits()
            | Self::UNDEFINED.bits();

        /// Types whose values are objects at runtime; all of them fit `object`.
        const STRUCTURED = Self::ARRAY.bits()
            | Self::TUPLE.bits()
            | Self::OBJECT.bits()
            | Self::FUNCTION.bits()
            | Self::NON_PRIMITIVE.bits();
    }
}

/// The type ID is a lightweight handle to a type stored in a `TypeTable`.
///
/// Ids are only meaningful for the table that issued them, and only a table
/// can issue one:
///
/// ```compile_fail
/// let forged = tycompat_types::TypeId(3);
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}
