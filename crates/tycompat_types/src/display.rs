//! Rendering types as TypeScript source text.

use crate::flags::TypeId;
use crate::types::{LiteralValue, TypeKind, TypeTable};

/// Maximum recursion depth for type stringification to prevent stack overflow.
const MAX_TYPE_TO_STRING_DEPTH: u32 = 20;

impl TypeTable {
    pub fn type_to_string(&self, type_id: TypeId) -> String {
        self.type_to_string_inner(type_id, 0)
    }

    fn type_to_string_inner(&self, type_id: TypeId, depth: u32) -> String {
        if depth > MAX_TYPE_TO_STRING_DEPTH {
            return "...".to_string();
        }
        match &self.get(type_id).kind {
            TypeKind::Intrinsic { name } => name.to_string(),
            TypeKind::Literal { value } => match value {
                LiteralValue::String(s) => format!("{:?}", self.names().resolve(*s)),
                LiteralValue::Number(n) => n.get().to_string(),
                LiteralValue::Boolean(b) => b.to_string(),
            },
            TypeKind::Union { types } => types
                .iter()
                .map(|t| {
                    let member = self.type_to_string_inner(*t, depth + 1);
                    // `string | (number) => number` would read as a function returning a union
                    if matches!(self.get(*t).kind, TypeKind::Function(_)) {
                        format!("({})", member)
                    } else {
                        member
                    }
                })
                .collect::<Vec<_>>()
                .join(" | "),
            TypeKind::Array { element_type } => {
                let elem = self.type_to_string_inner(*element_type, depth + 1);
                // `string | number[]` would read as a union with an array member
                if matches!(self.get(*element_type).kind, TypeKind::Union { .. } | TypeKind::Function(_)) {
                    format!("({})[]", elem)
                } else {
                    format!("{}[]", elem)
                }
            }
            TypeKind::Tuple { element_types } => {
                let elems = element_types
                    .iter()
                    .map(|t| self.type_to_string_inner(*t, depth + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("[{}]", elems)
            }
            TypeKind::Object { members } => {
                if members.is_empty() {
                    "{}".to_string()
                } else {
                    let props = members
                        .iter()
                        .map(|(name, tid)| {
                            format!("{}: {}", self.names().resolve(*name), self.type_to_string_inner(*tid, depth + 1))
                        })
                        .collect::<Vec<_>>()
                        .join("; ");
                    format!("{{ {} }}", props)
                }
            }
            TypeKind::Function(sig) => {
                let params = sig
                    .parameters
                    .iter()
                    .map(|p| self.type_to_string_inner(*p, depth + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                let ret = self.type_to_string_inner(sig.return_type, depth + 1);
                format!("({}) => {}", params, ret)
            }
        }
    }
}
