//! Type system representation.
//!
//! Types are stored in a TypeTable (type arena) and referenced by TypeId.
//! The table interns every type by structure, so two structurally equal types
//! always share one TypeId and type equality is an integer comparison.

use crate::flags::{TypeFlags, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::hash::{Hash, Hasher};
use tycompat_core::{ConstructionError, InternedString, StringInterner};

/// The three primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Number,
    String,
    Boolean,
}

impl PrimitiveKind {
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

/// A number usable as a hash key.
///
/// `-0` is stored as `0` and every NaN as the canonical NaN, so equality is
/// bitwise.
#[derive(Debug, Clone, Copy)]
pub struct NumberValue(f64);

impl NumberValue {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            Self(0.0)
        } else if value.is_nan() {
            Self(f64::NAN)
        } else {
            Self(value)
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for NumberValue {}

impl Hash for NumberValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// The value carried by a literal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    String(InternedString),
    Number(NumberValue),
    Boolean(bool),
}

impl LiteralValue {
    /// The primitive kind this literal widens to.
    pub fn kind(self) -> PrimitiveKind {
        match self {
            LiteralValue::String(_) => PrimitiveKind::String,
            LiteralValue::Number(_) => PrimitiveKind::Number,
            LiteralValue::Boolean(_) => PrimitiveKind::Boolean,
        }
    }
}

/// A function signature. Parameter names do not take part in compatibility,
/// so only their types are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub parameters: Vec<TypeId>,
    pub return_type: TypeId,
}

/// The specific data for each type kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Intrinsic types: any, unknown, string, number, boolean, void, undefined, never, object
    Intrinsic { name: &'static str },
    /// A single string, number or boolean value
    Literal { value: LiteralValue },
    /// Union type (A | B | C); members are sorted and unique
    Union { types: Vec<TypeId> },
    /// Array type (T[])
    Array { element_type: TypeId },
    /// Fixed-arity tuple type ([A, B])
    Tuple { element_types: Vec<TypeId> },
    /// Object type ({ a: A; b: B }); members are sorted by name and unique
    Object { members: Vec<(InternedString, TypeId)> },
    /// Function type ((A, B) => R)
    Function(Signature),
}

/// A type in the type system.
#[derive(Debug, Clone)]
pub struct Type {
    pub id: TypeId,
    /// Type flags describing what kind of type this is.
    pub flags: TypeFlags,
    pub kind: TypeKind,
}

/// The type table stores all types and provides access by TypeId.
#[derive(Debug)]
pub struct TypeTable {
    types: Vec<Type>,
    interned: FxHashMap<TypeKind, TypeId>,
    names: StringInterner,
    // Well-known types
    pub any_type: TypeId,
    pub unknown_type: TypeId,
    pub string_type: TypeId,
    pub number_type: TypeId,
    pub boolean_type: TypeId,
    pub void_type: TypeId,
    pub undefined_type: TypeId,
    pub never_type: TypeId,
    pub object_type: TypeId,
    pub true_type: TypeId,
    pub false_type: TypeId,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::with_capacity(256),
            interned: FxHashMap::default(),
            names: StringInterner::new(),
            any_type: TypeId(0),
            unknown_type: TypeId(1),
            string_type: TypeId(2),
            number_type: TypeId(3),
            boolean_type: TypeId(4),
            void_type: TypeId(5),
            undefined_type: TypeId(6),
            never_type: TypeId(7),
            object_type: TypeId(8),
            true_type: TypeId(9),
            false_type: TypeId(10),
        };

        // Create intrinsic types
        table.create_intrinsic(TypeFlags::ANY, "any");
        table.create_intrinsic(TypeFlags::UNKNOWN, "unknown");
        table.create_intrinsic(TypeFlags::STRING, "string");
        table.create_intrinsic(TypeFlags::NUMBER, "number");
        table.create_intrinsic(TypeFlags::BOOLEAN, "boolean");
        table.create_intrinsic(TypeFlags::VOID, "void");
        table.create_intrinsic(TypeFlags::UNDEFINED, "undefined");
        table.create_intrinsic(TypeFlags::NEVER, "never");
        table.create_intrinsic(TypeFlags::NON_PRIMITIVE, "object");
        // true/false literal types
        table.literal(LiteralValue::Boolean(true));
        table.literal(LiteralValue::Boolean(false));

        table
    }

    fn create_intrinsic(&mut self, flags: TypeFlags, name: &'static str) -> TypeId {
        self.intern(flags, TypeKind::Intrinsic { name })
    }

    /// Return the id of an existing structurally equal type, or add `kind`.
    fn intern(&mut self, flags: TypeFlags, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.interned.get(&kind) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.interned.insert(kind.clone(), id);
        self.types.push(Type { id, flags, kind });
        id
    }

    // ========================================================================
    // Construction
    // ========================================================================

    pub fn primitive(&self, kind: PrimitiveKind) -> TypeId {
        match kind {
            PrimitiveKind::Number => self.number_type,
            PrimitiveKind::String => self.string_type,
            PrimitiveKind::Boolean => self.boolean_type,
        }
    }

    pub fn literal(&mut self, value: LiteralValue) -> TypeId {
        let flags = match value {
            LiteralValue::String(_) => TypeFlags::STRING_LITERAL,
            LiteralValue::Number(_) => TypeFlags::NUMBER_LITERAL,
            LiteralValue::Boolean(_) => TypeFlags::BOOLEAN_LITERAL,
        };
        self.intern(flags, TypeKind::Literal { value })
    }

    pub fn string_literal(&mut self, value: &str) -> TypeId {
        let value = self.names.intern(value);
        self.literal(LiteralValue::String(value))
    }

    pub fn number_literal(&mut self, value: f64) -> TypeId {
        self.literal(LiteralValue::Number(NumberValue::new(value)))
    }

    pub fn boolean_literal(&self, value: bool) -> TypeId {
        if value {
            self.true_type
        } else {
            self.false_type
        }
    }

    /// Create a union type.
    ///
    /// Nested unions are flattened and duplicates removed. `any` or `unknown`
    /// absorb the whole union, `never` members vanish, and a literal is
    /// dropped when its primitive is also a member. `true | false` becomes
    /// `boolean`. Zero members give `never`, one member gives that member.
    pub fn union<I>(&mut self, members: I) -> TypeId
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut flat = Vec::new();
        for member in members {
            match &self.get(member).kind {
                TypeKind::Union { types } => flat.extend_from_slice(types),
                _ => flat.push(member),
            }
        }

        let mut present = TypeFlags::NONE;
        for &member in &flat {
            present |= self.get(member).flags;
        }
        if present.contains(TypeFlags::ANY) {
            return self.any_type;
        }
        if present.contains(TypeFlags::UNKNOWN) {
            return self.unknown_type;
        }

        let has_both_booleans = flat.contains(&self.true_type) && flat.contains(&self.false_type);
        if has_both_booleans {
            present |= TypeFlags::BOOLEAN;
            flat.push(self.boolean_type);
        }

        let mut seen = FxHashSet::default();
        let mut unique: Vec<TypeId> = flat
            .into_iter()
            .filter(|&t| {
                let flags = self.get(t).flags;
                if flags.contains(TypeFlags::NEVER) {
                    return false;
                }
                let widened_present = (flags.contains(TypeFlags::STRING_LITERAL) && present.contains(TypeFlags::STRING))
                    || (flags.contains(TypeFlags::NUMBER_LITERAL) && present.contains(TypeFlags::NUMBER))
                    || (flags.contains(TypeFlags::BOOLEAN_LITERAL) && present.contains(TypeFlags::BOOLEAN));
                !widened_present && seen.insert(t)
            })
            .collect();
        unique.sort_unstable();

        match unique.len() {
            0 => self.never_type,
            1 => unique[0],
            _ => self.intern(TypeFlags::UNION, TypeKind::Union { types: unique }),
        }
    }

    pub fn array_of(&mut self, element_type: TypeId) -> TypeId {
        self.intern(TypeFlags::ARRAY, TypeKind::Array { element_type })
    }

    /// Create a tuple type. A tuple needs at least one element.
    pub fn tuple_of(&mut self, element_types: Vec<TypeId>) -> Result<TypeId, ConstructionError> {
        if element_types.is_empty() {
            return Err(ConstructionError::EmptyTuple);
        }
        Ok(self.intern(TypeFlags::TUPLE, TypeKind::Tuple { element_types }))
    }

    /// Create an object type from `(name, type)` pairs. Property order does not
    /// matter; a repeated property name is an error.
    pub fn object_shape<I, S>(&mut self, fields: I) -> Result<TypeId, ConstructionError>
    where
        I: IntoIterator<Item = (S, TypeId)>,
        S: AsRef<str>,
    {
        let mut members: Vec<(InternedString, TypeId)> = Vec::new();
        let mut seen = FxHashSet::default();
        for (name, type_id) in fields {
            let name = name.as_ref();
            let key = self.names.intern(name);
            if !seen.insert(key) {
                return Err(ConstructionError::DuplicateProperty { name: name.to_string() });
            }
            members.push((key, type_id));
        }
        let names = &self.names;
        members.sort_by(|a, b| names.resolve(a.0).cmp(names.resolve(b.0)));
        Ok(self.intern(TypeFlags::OBJECT, TypeKind::Object { members }))
    }

    pub fn function_sig(&mut self, parameters: Vec<TypeId>, return_type: TypeId) -> TypeId {
        self.intern(
            TypeFlags::FUNCTION,
            TypeKind::Function(Signature { parameters, return_type }),
        )
    }

    /// Map literal types to their primitive kind. Unions are widened member
    /// by member; every other type is returned unchanged.
    pub fn widen_literal(&mut self, type_id: TypeId) -> TypeId {
        match &self.get(type_id).kind {
            TypeKind::Literal { value } => self.primitive(value.kind()),
            TypeKind::Union { types } => {
                let types = types.clone();
                let widened: Vec<TypeId> = types.into_iter().map(|t| self.widen_literal(t)).collect();
                self.union(widened)
            }
            _ => type_id,
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Get a type by its ID.
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    #[inline]
    pub fn flags(&self, id: TypeId) -> TypeFlags {
        self.get(id).flags
    }

    /// Look up a property of an object type by name.
    pub fn property(&self, object: TypeId, name: &str) -> Option<TypeId> {
        let key = self.names.get(name)?;
        match &self.get(object).kind {
            TypeKind::Object { members } => members.iter().find(|(n, _)| *n == key).map(|(_, t)| *t),
            _ => None,
        }
    }

    /// The interner holding property names and string literal values.
    pub fn names(&self) -> &StringInterner {
        &self.names
    }

    /// Get the total number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
