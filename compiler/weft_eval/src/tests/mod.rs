//! Evaluator test suites.
//!
//! Trees are built directly through the small constructors below; every
//! suite runs them through a fresh [`Interpreter`] and asserts on the
//! resulting value or the typed error kind.

mod classes;
mod collections;
mod functions;
mod tags;

use weft_ir::{BinaryOp, Node, NodeKind, Position, Token, TokenKind};
use weft_value::{Context, ErrorKind, RuntimeError, Value};

use crate::Interpreter;

pub(crate) fn pos() -> Position {
    Position::start("test.wf", "")
}

pub(crate) fn node(kind: NodeKind) -> Node {
    Node::new(kind, pos(), pos())
}

pub(crate) fn ident(name: &str) -> Token {
    Token::new(TokenKind::Ident(name.to_string()), pos(), pos())
}

pub(crate) fn num(n: f64) -> Node {
    node(NodeKind::Number(n))
}

pub(crate) fn text(value: &str) -> Node {
    node(NodeKind::Str {
        value: value.to_string(),
        allows_concat: false,
    })
}

pub(crate) fn boolean(state: bool) -> Node {
    node(NodeKind::Bool {
        state,
        display_name: state.to_string(),
    })
}

pub(crate) fn none_lit() -> Node {
    node(NodeKind::NoneLiteral)
}

pub(crate) fn var(name: &str) -> Node {
    node(NodeKind::VarAccess { name: ident(name) })
}

pub(crate) fn declare(name: &str, value: Node) -> Node {
    node(NodeKind::VarAssign {
        name: ident(name),
        value: value.boxed(),
        declared_type: None,
    })
}

pub(crate) fn assign(name: &str, value: Node) -> Node {
    node(NodeKind::VarModify {
        name: ident(name),
        value: value.boxed(),
    })
}

pub(crate) fn binary(op: BinaryOp, lhs: Node, rhs: Node) -> Node {
    node(NodeKind::Binary {
        op,
        lhs: lhs.boxed(),
        rhs: rhs.boxed(),
    })
}

pub(crate) fn stmts(body: Vec<Node>) -> Node {
    node(NodeKind::Statements { body })
}

/// Evaluate a program in a fresh interpreter and root scope.
pub(crate) fn run(program: &Node) -> Result<Value, RuntimeError> {
    Interpreter::new().run(program, &Context::new())
}

/// The error kind a program fails with.
pub(crate) fn run_err(program: &Node) -> Option<ErrorKind> {
    run(program).err().map(|e| e.kind)
}
