//! Elaborating failed assignments into diagnostics.

use crate::checker::Checker;
use rustc_hash::FxHashMap;
use tycompat_diagnostics::{messages, Diagnostic};
use tycompat_types::{TypeId, TypeKind};

impl Checker<'_> {
    /// Explain why `source` is not assignable to `target`.
    ///
    /// Returns `None` when the assignment is allowed. Otherwise the result is
    /// a TS2322 diagnostic whose related information drills down to the first
    /// part of the source that does not fit.
    pub fn explain(&mut self, source: TypeId, target: TypeId) -> Option<Diagnostic> {
        if self.is_assignable(source, target) {
            return None;
        }
        let types = self.type_table();
        let head = Diagnostic::new(
            &messages::TYPE_0_IS_NOT_ASSIGNABLE_TO_TYPE_1,
            &[&types.type_to_string(source), &types.type_to_string(target)],
        );
        Some(match self.elaborate(source, target) {
            Some(detail) => head.with_related(detail),
            None => head,
        })
    }

    fn elaborate(&mut self, source: TypeId, target: TypeId) -> Option<Diagnostic> {
        let types = self.type_table();

        if let TypeKind::Union { types: members } = &types.get(source).kind {
            let failing = members.iter().copied().find(|&m| !self.is_assignable(m, target))?;
            return self.explain(failing, target);
        }

        match (&types.get(source).kind, &types.get(target).kind) {
            (TypeKind::Array { element_type: s }, TypeKind::Array { element_type: t }) => self.explain(*s, *t),
            (TypeKind::Tuple { element_types: s }, TypeKind::Tuple { element_types: t }) => {
                if s.len() < t.len() {
                    return Some(Diagnostic::new(
                        &messages::SOURCE_HAS_0_ELEMENT_S_BUT_TARGET_REQUIRES_1,
                        &[&s.len().to_string(), &t.len().to_string()],
                    ));
                }
                if s.len() > t.len() {
                    return Some(Diagnostic::new(
                        &messages::SOURCE_HAS_0_ELEMENT_S_BUT_TARGET_ALLOWS_ONLY_1,
                        &[&s.len().to_string(), &t.len().to_string()],
                    ));
                }
                let (index, (&se, &te)) = s
                    .iter()
                    .zip(t)
                    .enumerate()
                    .find(|&(_, (&se, &te))| !self.is_assignable(se, te))?;
                let position = index.to_string();
                let detail = Diagnostic::new(
                    &messages::TYPE_AT_POSITION_0_IN_SOURCE_IS_NOT_COMPATIBLE_WITH_TYPE_AT_POSITION_1_IN_TARGET,
                    &[&position, &position],
                );
                Some(with_optional_related(detail, self.explain(se, te)))
            }
            (TypeKind::Tuple { element_types: s }, TypeKind::Array { element_type: t }) => {
                let failing = s.iter().copied().find(|&se| !self.is_assignable(se, *t))?;
                self.explain(failing, *t)
            }
            (TypeKind::Object { members: s }, TypeKind::Object { members: t }) => {
                let source_map: FxHashMap<_, TypeId> = s.iter().copied().collect();
                for &(name, target_prop) in t {
                    let name_text = types.names().resolve(name);
                    let Some(&source_prop) = source_map.get(&name) else {
                        return Some(Diagnostic::new(
                            &messages::PROPERTY_0_IS_MISSING_IN_TYPE_1_BUT_REQUIRED_IN_TYPE_2,
                            &[name_text, &types.type_to_string(source), &types.type_to_string(target)],
                        ));
                    };
                    if !self.is_assignable(source_prop, target_prop) {
                        let detail = Diagnostic::new(&messages::TYPES_OF_PROPERTY_0_ARE_INCOMPATIBLE, &[name_text]);
                        return Some(with_optional_related(detail, self.explain(source_prop, target_prop)));
                    }
                }
                None
            }
            (TypeKind::Function(s), TypeKind::Function(t)) => {
                if s.parameters.len() > t.parameters.len() {
                    return Some(Diagnostic::new(
                        &messages::TARGET_SIGNATURE_PROVIDES_TOO_FEW_ARGUMENTS_EXPECTED_0_OR_MORE_BUT_GOT_1,
                        &[&s.parameters.len().to_string(), &t.parameters.len().to_string()],
                    ));
                }
                let strict = self.options().strict_function_types;
                for (index, (&sp, &tp)) in s.parameters.iter().zip(&t.parameters).enumerate() {
                    if !self.is_assignable(tp, sp) && (strict || !self.is_assignable(sp, tp)) {
                        let detail = Diagnostic::new(
                            &messages::TYPES_OF_PARAMETERS_AT_POSITION_0_ARE_INCOMPATIBLE,
                            &[&index.to_string()],
                        );
                        return Some(with_optional_related(detail, self.explain(tp, sp)));
                    }
                }
                let detail = Diagnostic::new(
                    &messages::CALL_SIGNATURE_RETURN_TYPES_0_AND_1_ARE_INCOMPATIBLE,
                    &[&types.type_to_string(s.return_type), &types.type_to_string(t.return_type)],
                );
                Some(with_optional_related(detail, self.explain(s.return_type, t.return_type)))
            }
            _ => None,
        }
    }
}

fn with_optional_related(diagnostic: Diagnostic, related: Option<Diagnostic>) -> Diagnostic {
    match related {
        Some(related) => diagnostic.with_related(related),
        None => diagnostic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tycompat_types::TypeTable;

    #[test]
    fn test_assignable_has_no_explanation() {
        let table = TypeTable::new();
        let mut checker = Checker::new(&table);
        assert!(checker.explain(table.number_type, table.any_type).is_none());
    }

    #[test]
    fn test_primitive_mismatch() {
        let table = TypeTable::new();
        let mut checker = Checker::new(&table);
        let diag = checker.explain(table.boolean_type, table.number_type).unwrap();
        assert_eq!(diag.code, 2322);
        assert_eq!(diag.message_text, "Type 'boolean' is not assignable to type 'number'.");
        assert!(diag.related_information.is_empty());
    }

    #[test]
    fn test_unknown_source_has_no_elaboration() {
        let table = TypeTable::new();
        let mut checker = Checker::new(&table);
        let diag = checker.explain(table.unknown_type, table.string_type).unwrap();
        assert_eq!(diag.message_text, "Type 'unknown' is not assignable to type 'string'.");
        assert!(diag.related_information.is_empty());
    }

    #[test]
    fn test_placeholder_like_literal_is_rendered_verbatim() {
        let mut table = TypeTable::new();
        let braces = table.string_literal("{1}");
        let mut checker = Checker::new(&table);
        let diag = checker.explain(braces, table.number_type).unwrap();
        assert_eq!(diag.message_text, "Type '\"{1}\"' is not assignable to type 'number'.");
    }

    #[test]
    fn test_union_source_names_failing_member() {
        let mut table = TypeTable::new();
        let sn = table.union([table.string_type, table.number_type]);
        let mut checker = Checker::new(&table);
        let diag = checker.explain(sn, table.number_type).unwrap();
        let inner = &diag.related_information[0];
        assert_eq!(inner.message_text, "Type 'string' is not assignable to type 'number'.");
    }
}
