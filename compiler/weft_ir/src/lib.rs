//! Weft IR - source positions, tokens, and the AST node catalog.
//!
//! This crate defines the data the rest of the interpreter operates on:
//!
//! - [`Position`]: per-character source coordinates with copy-on-branch
//!   semantics
//! - [`Token`] / [`TokenKind`]: the lexer→parser exchange format
//! - [`ast`]: the closed catalog of every syntactic form, plus the
//!   human-readable rendering used in diagnostics
//!
//! No evaluation behavior lives here; the evaluator is `weft_eval`.

pub mod ast;
mod position;
mod token;

pub use ast::{
    Argument, BinaryOp, ClassMethod, ClassProperty, HtmlAttribute, IfCase, IndexSelector, Node,
    NodeKind, SwitchCase, TagProp, TagState, UnaryOp, Visibility,
};
pub use position::Position;
pub use token::{Token, TokenKind};
