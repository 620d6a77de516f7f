//! Type inference for literal value expressions.
//!
//! A mutable binding (`let`) widens literal types to their primitive kind so
//! the variable can later hold other values of that kind. An immutable
//! binding (`const`) keeps the narrowest literal type.

use tycompat_core::ConstructionError;
use tycompat_types::{EnumType, TypeId, TypeTable};

/// How the inferred value is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Reassignable binding: infer the widened type.
    Let,
    /// Immutable binding: infer the narrowest literal type.
    Const,
}

/// A literal value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    String(String),
    Boolean(bool),
    Undefined,
    Array(Vec<Expr>),
    /// Object literal properties in source order.
    Object(Vec<(String, Expr)>),
    /// Arrow function with annotated parameter types, returning `body`.
    Arrow { params: Vec<TypeId>, body: Box<Expr> },
    /// A reference to an enum member such as `Color.Red`.
    EnumMember { member: TypeId, enum_type: TypeId },
}

impl Expr {
    pub fn string(value: impl Into<String>) -> Self {
        Expr::String(value.into())
    }

    pub fn object<S: Into<String>>(properties: impl IntoIterator<Item = (S, Expr)>) -> Self {
        Expr::Object(properties.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn arrow(params: Vec<TypeId>, body: Expr) -> Self {
        Expr::Arrow { params, body: Box::new(body) }
    }

    /// Reference member `name` of `enum_type`, if it has one.
    pub fn enum_member(enum_type: &EnumType, name: &str) -> Option<Self> {
        Some(Expr::EnumMember {
            member: enum_type.member(name)?,
            enum_type: enum_type.union(),
        })
    }
}

/// Infer the type of `expr` bound with `binding`.
///
/// Array elements, object property values and arrow function bodies are
/// always widened, whatever the binding: only the outermost literal of a
/// `const` keeps its literal type.
pub fn infer(types: &mut TypeTable, expr: &Expr, binding: BindingKind) -> Result<TypeId, ConstructionError> {
    let inferred = match expr {
        Expr::Number(value) => types.number_literal(*value),
        Expr::String(value) => types.string_literal(value),
        Expr::Boolean(value) => types.boolean_literal(*value),
        Expr::Undefined => types.undefined_type,
        Expr::Array(elements) => {
            let element_type = if elements.is_empty() {
                types.any_type
            } else {
                let element_types = elements
                    .iter()
                    .map(|e| infer(types, e, BindingKind::Let))
                    .collect::<Result<Vec<_>, _>>()?;
                types.union(element_types)
            };
            types.array_of(element_type)
        }
        Expr::Object(properties) => {
            let mut fields = Vec::with_capacity(properties.len());
            for (name, value) in properties {
                fields.push((name.as_str(), infer(types, value, BindingKind::Let)?));
            }
            types.object_shape(fields)?
        }
        Expr::Arrow { params, body } => {
            let return_type = infer(types, body, BindingKind::Let)?;
            types.function_sig(params.clone(), return_type)
        }
        // An enum literal widens to its enum, not to `number`/`string`
        Expr::EnumMember { member, enum_type } => {
            return Ok(match binding {
                BindingKind::Const => *member,
                BindingKind::Let => *enum_type,
            });
        }
    };

    let result = match binding {
        BindingKind::Const => inferred,
        BindingKind::Let => types.widen_literal(inferred),
    };
    tracing::trace!(?binding, ty = %types.type_to_string(result), "inferred");
    Ok(result)
}
