//! Eager and short-circuit operator evaluation.
//!
//! Eager binary and unary application lives in `weft_value::ops`; this
//! module evaluates the operands and attaches spans. The short-circuit
//! forms (`and`, `or`, `??`) decide whether the right side runs at all,
//! so they cannot share the eager path.

use weft_ir::{BinaryOp, Node, UnaryOp};
use weft_value::{binary_op, unary_op, Context, EvalResult};

use crate::interpreter::{fail, Interpreter};

pub fn eval_binary(
    it: &mut Interpreter,
    op: BinaryOp,
    lhs: &Node,
    rhs: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let left = it.eval(lhs, ctx)?;
    let right = it.eval(rhs, ctx)?;
    binary_op(op, &left, &right).map_err(|e| fail(node, e))
}

pub fn eval_unary(
    it: &mut Interpreter,
    op: UnaryOp,
    operand: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let value = it.eval(operand, ctx)?;
    unary_op(op, &value).map_err(|e| fail(node, e))
}

/// `a and b`: yields the left value when falsy, otherwise the right.
pub fn eval_and(it: &mut Interpreter, lhs: &Node, rhs: &Node, ctx: &Context) -> EvalResult {
    let left = it.eval(lhs, ctx)?;
    if left.is_truthy() {
        it.eval(rhs, ctx)
    } else {
        Ok(left)
    }
}

/// `a or b`: yields the left value when truthy, otherwise the right.
pub fn eval_or(it: &mut Interpreter, lhs: &Node, rhs: &Node, ctx: &Context) -> EvalResult {
    let left = it.eval(lhs, ctx)?;
    if left.is_truthy() {
        Ok(left)
    } else {
        it.eval(rhs, ctx)
    }
}

/// `a ?? b`: falls through to the right only on `none`, never on other
/// falsy values.
pub fn eval_nullish(it: &mut Interpreter, lhs: &Node, rhs: &Node, ctx: &Context) -> EvalResult {
    let left = it.eval(lhs, ctx)?;
    if left.is_none() {
        it.eval(rhs, ctx)
    } else {
        Ok(left)
    }
}
