//! Enum declarations.
//!
//! An enum is a closed union of literal types together with the mapping from
//! member names to those literals. Nothing is created at runtime; the enum
//! exists only as types in the table.

use crate::flags::TypeId;
use crate::types::TypeTable;
use indexmap::IndexMap;
use tycompat_core::ConstructionError;

/// The initializer written for an enum member.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumMemberInit {
    /// No initializer: one more than the previous numeric member, or 0 first.
    Auto,
    Number(f64),
    String(String),
}

/// A declared enum.
#[derive(Debug, Clone)]
pub struct EnumType {
    name: String,
    /// Member name to literal type, in declaration order.
    members: IndexMap<String, TypeId>,
    union: TypeId,
}

impl EnumType {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The literal type of the member called `name`.
    pub fn member(&self, name: &str) -> Option<TypeId> {
        self.members.get(name).copied()
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.members.iter().map(|(name, ty)| (name.as_str(), *ty))
    }

    /// The enum's own type: the union of all member literals.
    pub fn union(&self) -> TypeId {
        self.union
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl TypeTable {
    /// Declare an enum from its members in source order.
    pub fn declare_enum<I, S>(&mut self, name: &str, members: I) -> Result<EnumType, ConstructionError>
    where
        I: IntoIterator<Item = (S, EnumMemberInit)>,
        S: Into<String>,
    {
        let mut table: IndexMap<String, TypeId> = IndexMap::new();
        // `None` once a string member has been seen
        let mut next_auto = Some(0.0);

        for (member, init) in members {
            let member = member.into();
            if table.contains_key(&member) {
                return Err(ConstructionError::DuplicateEnumMember {
                    enum_name: name.to_string(),
                    member,
                });
            }
            let literal = match init {
                EnumMemberInit::Auto => {
                    let Some(value) = next_auto else {
                        return Err(ConstructionError::EnumMemberNeedsInitializer {
                            enum_name: name.to_string(),
                            member,
                        });
                    };
                    next_auto = Some(value + 1.0);
                    self.number_literal(value)
                }
                EnumMemberInit::Number(value) => {
                    next_auto = Some(value + 1.0);
                    self.number_literal(value)
                }
                EnumMemberInit::String(value) => {
                    next_auto = None;
                    self.string_literal(&value)
                }
            };
            table.insert(member, literal);
        }

        let union = self.union(table.values().copied());
        tracing::debug!(name, members = table.len(), "declared enum");

        Ok(EnumType {
            name: name.to_string(),
            members: table,
            union,
        })
    }
}
