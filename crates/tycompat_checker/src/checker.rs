//! The assignability checker.
//!
//! Decides whether a value of a source type may be stored in a location
//! declared with a target type. Comparison is total: every pair of types
//! from the same table yields a verdict.

use rustc_hash::FxHashMap;
use tycompat_core::InternedString;
use tycompat_diagnostics::{Diagnostic, DiagnosticCollection};
use tycompat_options::CheckerOptions;
use tycompat_types::{Signature, TypeFlags, TypeId, TypeKind, TypeTable};

/// Compares types from one [`TypeTable`].
///
/// A checker only reads the table, so any number of checkers (one per
/// thread, say) can share it.
pub struct Checker<'a> {
    types: &'a TypeTable,
    options: CheckerOptions,
    /// Failed assignments recorded by `check_assignment`.
    diagnostics: DiagnosticCollection,
    /// Memoized verdicts per (source, target) pair.
    assignability_cache: FxHashMap<(TypeId, TypeId), bool>,
}

impl<'a> Checker<'a> {
    pub fn new(types: &'a TypeTable) -> Self {
        Self::with_options(types, CheckerOptions::default())
    }

    pub fn with_options(types: &'a TypeTable, options: CheckerOptions) -> Self {
        Self {
            types,
            options,
            diagnostics: DiagnosticCollection::new(),
            assignability_cache: FxHashMap::default(),
        }
    }

    pub fn type_table(&self) -> &'a TypeTable {
        self.types
    }

    pub fn options(&self) -> CheckerOptions {
        self.options
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection { &self.diagnostics }
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection { std::mem::take(&mut self.diagnostics) }

    /// Check an assignment, recording a diagnostic when it is not allowed.
    pub fn check_assignment(&mut self, source: TypeId, target: TypeId) -> Result<(), Diagnostic> {
        match self.explain(source, target) {
            None => Ok(()),
            Some(diagnostic) => {
                self.diagnostics.add(diagnostic.clone());
                Err(diagnostic)
            }
        }
    }

    // ========================================================================
    // Type relationship checking
    // ========================================================================

    pub fn is_assignable(&mut self, source: TypeId, target: TypeId) -> bool {
        if source == target { return true; }

        if let Some(&result) = self.assignability_cache.get(&(source, target)) {
            return result;
        }

        let result = self.is_assignable_worker(source, target);
        self.assignability_cache.insert((source, target), result);
        tracing::trace!(
            source = %self.types.type_to_string(source),
            target = %self.types.type_to_string(target),
            result,
            "assignability"
        );
        result
    }

    /// Core assignability rules, in precedence order. Kept apart from the
    /// public entry point so the identity check and cache live in one place.
    fn is_assignable_worker(&mut self, source: TypeId, target: TypeId) -> bool {
        let types = self.types;
        let source_flags = types.flags(source);
        let target_flags = types.flags(target);

        if target_flags.contains(TypeFlags::ANY) { return true; }
        // `unknown` only flows into `unknown` (and `any`, above)
        if source_flags.contains(TypeFlags::UNKNOWN) {
            return target_flags.contains(TypeFlags::UNKNOWN);
        }
        if source_flags.contains(TypeFlags::ANY) { return true; }
        if source_flags.contains(TypeFlags::NEVER) { return true; }
        if target_flags.contains(TypeFlags::NEVER) { return false; }
        if target_flags.contains(TypeFlags::UNKNOWN) { return true; }

        if !self.options.strict_null_checks && source_flags.contains(TypeFlags::UNDEFINED) {
            return true;
        }

        // Union source: each constituent must be assignable to target.
        // Checked before a union target so that `A | B` fits `A | B | C`.
        if let TypeKind::Union { types: members } = &types.get(source).kind {
            return members.iter().all(|&m| self.is_assignable(m, target));
        }

        // Union target: source must be assignable to at least one constituent
        if let TypeKind::Union { types: members } = &types.get(target).kind {
            return members.iter().any(|&m| self.is_assignable(source, m));
        }

        match (&types.get(source).kind, &types.get(target).kind) {
            // Distinct literals never match; equal ones took the identity path
            (TypeKind::Literal { .. }, TypeKind::Literal { .. }) => false,
            (TypeKind::Literal { value }, TypeKind::Intrinsic { .. }) => {
                target == types.primitive(value.kind())
            }
            (TypeKind::Array { element_type: s }, TypeKind::Array { element_type: t }) => {
                self.is_assignable(*s, *t)
            }
            (TypeKind::Tuple { element_types: s }, TypeKind::Tuple { element_types: t }) => {
                s.len() == t.len() && s.iter().zip(t).all(|(&se, &te)| self.is_assignable(se, te))
            }
            (TypeKind::Tuple { element_types: s }, TypeKind::Array { element_type: t }) => {
                s.iter().all(|&se| self.is_assignable(se, *t))
            }
            (TypeKind::Object { members: s }, TypeKind::Object { members: t }) => {
                self.is_object_assignable(s, t)
            }
            (TypeKind::Function(s), TypeKind::Function(t)) => self.is_signature_assignable(s, t),
            _ => {
                if target_flags.contains(TypeFlags::NON_PRIMITIVE) {
                    return source_flags.intersects(TypeFlags::STRUCTURED);
                }
                if target_flags.contains(TypeFlags::VOID) {
                    return source_flags.intersects(TypeFlags::VOID_LIKE);
                }
                // Same-kind primitives share an id and never reach here
                false
            }
        }
    }

    /// Width subtyping: every target property must exist in the source with an
    /// assignable type. Extra source properties are fine.
    fn is_object_assignable(
        &mut self,
        source_members: &[(InternedString, TypeId)],
        target_members: &[(InternedString, TypeId)],
    ) -> bool {
        let source_map: FxHashMap<InternedString, TypeId> = source_members.iter().copied().collect();
        for &(name, target_prop) in target_members {
            let Some(&source_prop) = source_map.get(&name) else {
                return false;
            };
            if !self.is_assignable(source_prop, target_prop) {
                return false;
            }
        }
        true
    }

    /// The source may declare fewer parameters than the target supplies.
    /// Parameters are contravariant (bivariant without `strictFunctionTypes`)
    /// and the return type is covariant.
    fn is_signature_assignable(&mut self, source: &Signature, target: &Signature) -> bool {
        if source.parameters.len() > target.parameters.len() {
            return false;
        }
        let strict = self.options.strict_function_types;
        let params_ok = source
            .parameters
            .iter()
            .zip(&target.parameters)
            .all(|(&sp, &tp)| self.is_assignable(tp, sp) || (!strict && self.is_assignable(sp, tp)));
        params_ok && self.is_assignable(source.return_type, target.return_type)
    }
}

/// Decide assignability with the default (strict) options.
pub fn is_assignable(types: &TypeTable, source: TypeId, target: TypeId) -> bool {
    Checker::new(types).is_assignable(source, target)
}
