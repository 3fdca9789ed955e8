//! AST types.
//!
//! # Module Structure
//!
//! - `node`: the `Node` / `NodeKind` catalog
//! - `operators`: binary and unary operator enums
//! - `members`: side structures (arguments, class members, tag props,
//!   cases, index selectors, HTML attributes)
//! - `display`: human-readable rendering for diagnostics

mod display;
mod members;
mod node;
mod operators;

pub use members::{
    Argument, ClassMethod, ClassProperty, HtmlAttribute, IfCase, IndexSelector, SwitchCase,
    TagProp, TagState, Visibility,
};
pub use node::{Node, NodeKind};
pub use operators::{BinaryOp, UnaryOp};

#[cfg(test)]
mod tests;
