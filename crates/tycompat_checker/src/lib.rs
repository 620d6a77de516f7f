//! tycompat_checker: The assignability checker and inference engine.
//!
//! The checker decides whether a value of one type may be assigned to a
//! location of another type and, when it may not, explains why. Inference
//! derives the type of a literal value expression, widening for mutable
//! bindings and narrowing for immutable ones.

mod checker;
mod explain;
mod infer;

pub use checker::{is_assignable, Checker};
pub use infer::{infer, BindingKind, Expr};
pub use tycompat_options::CheckerOptions;
