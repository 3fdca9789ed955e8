//! Assignment targets and mutation forms.
//!
//! Steps (`++x`, `x--`), short-circuit compound assignment (`??=`, `&&=`,
//! `||=`) and indexed assignment all resolve their lvalue to a `Place`
//! first, so every form accepts exactly the same set of assignable targets:
//! variables, indexed elements, and object properties.

use weft_ir::{IndexSelector, Node, NodeKind};
use weft_value::{
    immutable_assignment, index, invalid_lvalue, push, remove_index, slice, store_index,
    type_mismatch, undefined_variable, AssignError, Context, EvalResult, Signal, Value,
};

use crate::exec::class;
use crate::interpreter::{fail, token_name, Interpreter};

/// Whether a step yields the value before or after mutation.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum StepOrder {
    Prefix,
    Postfix,
}

/// Which short-circuit compound assignment is running.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Compound {
    /// `??=` assigns only over `none`.
    Nullish,
    /// `&&=` assigns only over a truthy current value.
    And,
    /// `||=` assigns only over a falsy current value.
    Or,
}

/// An assignable target with every sub-expression already evaluated.
///
/// Forms that both read and write the same target (steps, compound
/// assignment) resolve it once, so side effects inside an index or
/// receiver expression run exactly once.
enum Place {
    Var(String),
    Element { container: Value, key: Value },
    Append { container: Value },
    Property { receiver: Value, name: String },
    Static { receiver: Value, name: String },
}

/// Evaluate an lvalue expression down to its place.
fn resolve_place(it: &mut Interpreter, target: &Node, ctx: &Context) -> Result<Place, Signal> {
    match &target.kind {
        NodeKind::VarAccess { name } => Ok(Place::Var(token_name(name, target)?.to_string())),
        NodeKind::ListAccess {
            target: container,
            selectors,
        } => {
            let (container, last) = resolve_container(it, container, selectors, ctx, target)?;
            let IndexSelector::Index(key_node) = last else {
                return Err(fail(target, invalid_lvalue("slice")));
            };
            let key = it.eval(key_node, ctx)?;
            Ok(Place::Element { container, key })
        }
        NodeKind::ListPushBrackets { target: container } => Ok(Place::Append {
            container: it.eval(container, ctx)?,
        }),
        NodeKind::CallProperty {
            target: receiver,
            property,
            ..
        } => Ok(Place::Property {
            receiver: it.eval(receiver, ctx)?,
            name: token_name(property, target)?.to_string(),
        }),
        NodeKind::CallStaticProperty {
            target: receiver,
            property,
            ..
        } => Ok(Place::Static {
            receiver: it.eval(receiver, ctx)?,
            name: token_name(property, target)?.to_string(),
        }),
        other => Err(fail(target, invalid_lvalue(other.describe()))),
    }
}

fn read_place(it: &mut Interpreter, place: &Place, ctx: &Context, node: &Node) -> EvalResult {
    match place {
        Place::Var(name) => ctx
            .lookup(name)
            .ok_or_else(|| fail(node, undefined_variable(name))),
        Place::Element { container, key } => index(container, key).map_err(|e| fail(node, e)),
        Place::Append { .. } => Err(fail(node, invalid_lvalue("list append target"))),
        Place::Property { receiver, name } => class::property_on_value(it, receiver, name, node),
        Place::Static { receiver, name } => class::static_on_value(it, receiver, name, node),
    }
}

fn write_place(
    it: &mut Interpreter,
    place: &Place,
    value: Value,
    ctx: &Context,
    node: &Node,
) -> Result<(), Signal> {
    match place {
        Place::Var(name) => match ctx.assign(name, value) {
            Ok(()) => Ok(()),
            Err(AssignError::Immutable) => Err(fail(node, immutable_assignment(name))),
            Err(AssignError::Undefined) => Err(fail(node, undefined_variable(name))),
        },
        Place::Element { container, key } => {
            store_index(container, key, value).map_err(|e| fail(node, e))
        }
        Place::Append { container } => push(container, value).map_err(|e| fail(node, e)),
        Place::Property { receiver, name } => {
            class::write_property_on_value(it, receiver, name, value, node)
        }
        Place::Static { receiver, name } => {
            class::write_static_on_value(it, receiver, name, value, node)
        }
    }
}

/// Walk every selector but the last, returning the innermost container and
/// the selector that addresses into it.
fn resolve_container<'s>(
    it: &mut Interpreter,
    container: &Node,
    selectors: &'s [IndexSelector],
    ctx: &Context,
    node: &Node,
) -> Result<(Value, &'s IndexSelector), Signal> {
    let Some((last, leading)) = selectors.split_last() else {
        return Err(fail(node, invalid_lvalue("index access without selectors")));
    };
    let mut value = it.eval(container, ctx)?;
    for selector in leading {
        value = apply_selector(it, &value, selector, ctx, node)?;
    }
    Ok((value, last))
}

fn apply_selector(
    it: &mut Interpreter,
    value: &Value,
    selector: &IndexSelector,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    match selector {
        IndexSelector::Index(key) => {
            let key = it.eval(key, ctx)?;
            index(value, &key).map_err(|e| fail(node, e))
        }
        IndexSelector::Slice { start, end } => {
            let start = match start {
                Some(start) => Some(it.eval(start, ctx)?),
                None => None,
            };
            let end = match end {
                Some(end) => Some(it.eval(end, ctx)?),
                None => None,
            };
            slice(value, start.as_ref(), end.as_ref()).map_err(|e| fail(node, e))
        }
    }
}

pub fn eval_list_access(
    it: &mut Interpreter,
    target: &Node,
    selectors: &[IndexSelector],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let mut value = it.eval(target, ctx)?;
    for selector in selectors {
        value = apply_selector(it, &value, selector, ctx, node)?;
    }
    Ok(value)
}

pub fn eval_list_assign(
    it: &mut Interpreter,
    access: &Node,
    value: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let value = it.eval(value, ctx)?;
    match &access.kind {
        NodeKind::ListAccess { .. } | NodeKind::ListPushBrackets { .. } => {
            let place = resolve_place(it, access, ctx)?;
            write_place(it, &place, value.clone(), ctx, node)?;
            Ok(value)
        }
        other => Err(fail(node, invalid_lvalue(other.describe()))),
    }
}

pub fn eval_step(
    it: &mut Interpreter,
    target: &Node,
    difference: i64,
    order: StepOrder,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let place = resolve_place(it, target, ctx)?;
    let current = read_place(it, &place, ctx, node)?;
    let Value::Number(n) = current else {
        return Err(fail(node, type_mismatch("number", current.type_name())));
    };
    let stepped = n + difference as f64;
    write_place(it, &place, Value::Number(stepped), ctx, node)?;
    Ok(Value::Number(match order {
        StepOrder::Prefix => stepped,
        StepOrder::Postfix => n,
    }))
}

pub fn eval_compound(
    it: &mut Interpreter,
    kind: Compound,
    target: &Node,
    value: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let place = resolve_place(it, target, ctx)?;
    let current = read_place(it, &place, ctx, node)?;
    let should_assign = match kind {
        Compound::Nullish => current.is_none(),
        Compound::And => current.is_truthy(),
        Compound::Or => !current.is_truthy(),
    };
    if !should_assign {
        return Ok(current);
    }
    let value = it.eval(value, ctx)?;
    write_place(it, &place, value.clone(), ctx, node)?;
    Ok(value)
}

/// `delete` removes a variable binding or an indexed element. Anything else
/// is not deletable.
pub fn eval_delete(
    it: &mut Interpreter,
    target: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    match &target.kind {
        NodeKind::VarAccess { name } => {
            let name = token_name(name, target)?;
            if ctx.remove(name) {
                Ok(Value::None)
            } else {
                Err(fail(target, undefined_variable(name)))
            }
        }
        NodeKind::ListAccess {
            target: container,
            selectors,
        } => {
            let (container, last) = resolve_container(it, container, selectors, ctx, node)?;
            let IndexSelector::Index(key_node) = last else {
                return Err(fail(node, invalid_lvalue("slice")));
            };
            let key = it.eval(key_node, ctx)?;
            remove_index(&container, &key).map_err(|e| fail(node, e))
        }
        other => Err(fail(node, invalid_lvalue(other.describe()))),
    }
}
