//! Weft Eval - tree-walking evaluator for Weft programs.
//!
//! # Architecture
//!
//! All evaluation goes through [`Interpreter::eval`], an exhaustive match
//! over `NodeKind` with one arm per syntactic form. Helper modules in
//! [`exec`] provide the per-construct logic:
//!
//! - `exec::operators` - binary/unary dispatch and the short-circuit forms
//! - `exec::control` - if, loops, switch, and statement sequences
//! - `exec::call` - function calls and argument binding
//! - `exec::access` - lvalue resolution (variables, fields, indexed slots)
//! - `exec::class` - class definition/instantiation, member access, enums
//! - `exec::tag` - tag instantiation and rendering
//! - `exec::html` - HTML tree construction
//!
//! Control flow (return/break/continue) and errors travel through the
//! [`Signal`] carrier from `weft_value`; every composite evaluation stops
//! at the first halting sub-result via `?`. The evaluator never relies on
//! host panics or exceptions for language semantics.
//!
//! # Re-exports
//!
//! Value and scope types from `weft_value` are re-exported for
//! convenience: `Value`, `Context`, `Signal`, `EvalResult`,
//! `RuntimeError`, `ErrorKind`.

pub mod exec;
pub mod interpreter;

pub use interpreter::Interpreter;
pub use weft_value::{
    Context, ErrorKind, EvalResult, Mutability, RuntimeError, Signal, Value,
};

#[cfg(test)]
mod tests;
