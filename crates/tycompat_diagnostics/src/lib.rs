//! tycompat_diagnostics: Diagnostic messages for failed type relations.
//!
//! Messages reuse the codes and wording of TypeScript's
//! `diagnosticMessages.json` for the relations the engine checks. A failed
//! assignment is reported as one top-level diagnostic whose related
//! information narrows down the part of the type that did not fit.
//! Every message is an error.

use std::fmt;

/// A diagnostic message template with a code.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    /// The diagnostic error code (e.g., 2322).
    pub code: u32,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with resolved message text.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub message_text: String,
    pub code: u32,
    /// Elaborations of this diagnostic, outermost first.
    pub related_information: Vec<Diagnostic>,
}

impl Diagnostic {
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            message_text: format_message(message.message, args),
            code: message.code,
            related_information: Vec::new(),
        }
    }

    /// Add related diagnostic information.
    pub fn with_related(mut self, related: Diagnostic) -> Self {
        self.related_information.push(related);
        self
    }

    /// Walk the first related diagnostic at each level, starting with `self`.
    ///
    /// The chain ends at the most specific elaboration.
    pub fn chain(&self) -> impl Iterator<Item = &Diagnostic> {
        std::iter::successors(Some(self), |d| d.related_information.first())
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth == 0 {
            write!(f, "error TS{}: {}", self.code, self.message_text)?;
        } else {
            write!(f, "\n{:width$}{}", "", self.message_text, width = depth * 2)?;
        }
        for related in &self.related_information {
            related.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// Only placeholders written in the template are substituted; argument text
/// is copied verbatim even when it looks like a placeholder. A placeholder
/// without a matching argument is left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let arg = (digits > 0 && after[digits..].starts_with('}'))
            .then(|| after[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|index| args.get(index));
        match arg {
            Some(arg) => {
                result.push_str(arg);
                rest = &after[digits + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A collection of diagnostics accumulated while checking.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

// ============================================================================
// Diagnostic Messages - codes follow TypeScript's diagnosticMessages.json
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, $msg:expr) => {
            DiagnosticMessage { code: $code, message: $msg }
        };
    }

    // ========================================================================
    // Assignability (2000-2999)
    // ========================================================================
    pub const CALL_SIGNATURE_RETURN_TYPES_0_AND_1_ARE_INCOMPATIBLE: DiagnosticMessage = diag!(2202, "Call signature return types '{0}' and '{1}' are incompatible.");
    pub const TYPE_0_IS_NOT_ASSIGNABLE_TO_TYPE_1: DiagnosticMessage = diag!(2322, "Type '{0}' is not assignable to type '{1}'.");
    pub const TYPES_OF_PROPERTY_0_ARE_INCOMPATIBLE: DiagnosticMessage = diag!(2326, "Types of property '{0}' are incompatible.");
    pub const TYPES_OF_PARAMETERS_AT_POSITION_0_ARE_INCOMPATIBLE: DiagnosticMessage = diag!(2328, "Types of parameters at position {0} are incompatible.");
    pub const SOURCE_HAS_0_ELEMENT_S_BUT_TARGET_REQUIRES_1: DiagnosticMessage = diag!(2618, "Source has {0} element(s) but target requires {1}.");
    pub const SOURCE_HAS_0_ELEMENT_S_BUT_TARGET_ALLOWS_ONLY_1: DiagnosticMessage = diag!(2619, "Source has {0} element(s) but target allows only {1}.");
    pub const TYPE_AT_POSITION_0_IN_SOURCE_IS_NOT_COMPATIBLE_WITH_TYPE_AT_POSITION_1_IN_TARGET: DiagnosticMessage = diag!(2626, "Type at position {0} in source is not compatible with type at position {1} in target.");
    pub const PROPERTY_0_IS_MISSING_IN_TYPE_1_BUT_REQUIRED_IN_TYPE_2: DiagnosticMessage = diag!(2741, "Property '{0}' is missing in type '{1}' but required in type '{2}'.");
    pub const TARGET_SIGNATURE_PROVIDES_TOO_FEW_ARGUMENTS_EXPECTED_0_OR_MORE_BUT_GOT_1: DiagnosticMessage = diag!(2849, "Target signature provides too few arguments. Expected {0} or more, but got {1}.");
}
