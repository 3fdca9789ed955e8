//! AST construction and rendering tests.

use super::*;
use crate::{Position, Token, TokenKind};
use pretty_assertions::assert_eq;

fn pos() -> Position {
    Position::start("test.wf", "")
}

fn node(kind: NodeKind) -> Node {
    Node::new(kind, pos(), pos())
}

fn ident(name: &str) -> Token {
    Token::new(TokenKind::Ident(name.into()), pos(), pos())
}

fn num(n: f64) -> Node {
    node(NodeKind::Number(n))
}

#[test]
fn binary_renders_operator_and_children() {
    let add = node(NodeKind::Binary {
        op: BinaryOp::Add,
        lhs: num(1.0).boxed(),
        rhs: num(2.0).boxed(),
    });
    assert_eq!(add.to_string(), "(1 + 2)");
}

#[test]
fn every_binary_op_symbol_is_distinct() {
    let ops = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
        BinaryOp::Mod,
        BinaryOp::Shl,
        BinaryOp::Shr,
        BinaryOp::UShr,
        BinaryOp::BitAnd,
        BinaryOp::BitOr,
        BinaryOp::BitXor,
        BinaryOp::Eq,
        BinaryOp::NotEq,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
    ];
    let mut symbols: Vec<&str> = ops.iter().map(|op| op.as_symbol()).collect();
    symbols.sort_unstable();
    symbols.dedup();
    assert_eq!(symbols.len(), ops.len());
}

#[test]
fn prefix_and_postfix_render_on_the_correct_side() {
    let target = node(NodeKind::VarAccess { name: ident("x") });
    let pre = node(NodeKind::Prefix {
        target: target.clone().boxed(),
        difference: 1,
    });
    let post = node(NodeKind::Postfix {
        target: target.boxed(),
        difference: -1,
    });
    assert_eq!(pre.to_string(), "(++x)");
    assert_eq!(post.to_string(), "(x--)");
}

#[test]
fn slice_renders_optional_bounds() {
    let access = node(NodeKind::ListAccess {
        target: node(NodeKind::VarAccess { name: ident("xs") }).boxed(),
        selectors: vec![IndexSelector::Slice {
            start: Some(num(1.0)),
            end: None,
        }],
    });
    assert_eq!(access.to_string(), "xs[1:]");
}

#[test]
fn set_pos_respans_without_touching_children() {
    let child = num(1.0);
    let mut wrapper = node(NodeKind::Return {
        value: Some(child.clone().boxed()),
    });
    let mut moved = pos();
    moved.advance('x');
    wrapper.set_pos(moved.clone(), moved.clone());
    assert_eq!(wrapper.pos_start, moved);
    if let NodeKind::Return { value: Some(inner) } = &wrapper.kind {
        assert_eq!(inner.pos_start, child.pos_start);
    } else {
        panic!("expected Return node");
    }
}

#[test]
fn statements_render_in_order() {
    let seq = node(NodeKind::Statements {
        body: vec![num(1.0), num(2.0)],
    });
    assert_eq!(seq.to_string(), "{ 1; 2 }");
}

#[test]
fn describe_names_the_form() {
    assert_eq!(node(NodeKind::Break).kind.describe(), "break");
    assert_eq!(
        node(NodeKind::Super { args: vec![] }).kind.describe(),
        "super call"
    );
}

#[test]
fn html_fragment_renders_without_tag_name() {
    let frag = node(NodeKind::Html {
        tag: None,
        classes: vec![],
        id: None,
        attributes: vec![],
        events: vec![],
        children: vec![num(7.0)],
    });
    assert_eq!(frag.to_string(), "<>7</>");
}
