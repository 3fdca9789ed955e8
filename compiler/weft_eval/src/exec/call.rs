//! Function definition and invocation.
//!
//! A call binds arguments into a child scope of the function's *defining*
//! context (lexical scoping), runs the body, and absorbs the `Return`
//! signal at its boundary. Arrow-form functions return their body's value
//! implicitly; block-form functions return `none` unless they hit an
//! explicit `return`.

use std::rc::Rc;

use weft_ir::{Argument, Node, NodeKind};
use weft_value::{
    already_declared, malformed_node, missing_argument, not_callable, too_many_arguments,
    Context, EvalResult, FunctionValue, Mutability, Signal, Value,
};

use crate::exec::class;
use crate::interpreter::{check_declared_type, fail, token_name, Interpreter};

pub fn eval_func_def(
    _it: &mut Interpreter,
    name: Option<&weft_ir::Token>,
    args: &[Argument],
    body: &Node,
    should_auto_return: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    for (position, arg) in args.iter().enumerate() {
        if arg.is_rest {
            if position + 1 != args.len() {
                return Err(fail(node, malformed_node("rest parameter must be declared last")));
            }
            if arg.default_value.is_some() {
                return Err(fail(node, malformed_node("rest parameter cannot take a default")));
            }
        }
    }
    let name = match name {
        Some(name) => Some(token_name(name, node)?.to_string()),
        None => None,
    };
    let func = Value::Function(Rc::new(FunctionValue {
        name: name.clone(),
        args: args.to_vec(),
        body: body.clone(),
        should_auto_return,
        closure: ctx.clone(),
    }));
    if let Some(name) = name {
        ctx.declare(&name, func.clone(), Mutability::Mutable)
            .map_err(|_| fail(node, already_declared(name)))?;
    }
    Ok(func)
}

pub fn eval_call(
    it: &mut Interpreter,
    callee: &Node,
    args: &[Node],
    is_optional: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    // Method-shaped callees keep their receiver: the class machinery needs
    // it for `this`, visibility, and `super` resolution.
    match &callee.kind {
        NodeKind::CallProperty {
            target,
            property,
            is_optional: access_optional,
        } => {
            return class::eval_method_call(
                it,
                target,
                property,
                args,
                is_optional || *access_optional,
                ctx,
                node,
            );
        }
        NodeKind::CallStaticProperty {
            target,
            property,
            is_optional: access_optional,
        } => {
            return class::eval_static_call(
                it,
                target,
                property,
                args,
                is_optional || *access_optional,
                ctx,
                node,
            );
        }
        _ => {}
    }

    let callee_value = it.eval(callee, ctx)?;
    if is_optional && callee_value.is_none() {
        return Ok(Value::None);
    }
    let Value::Function(func) = callee_value else {
        return Err(fail(node, not_callable(callee_value.type_name())));
    };
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(it.eval(arg, ctx)?);
    }
    call_function(it, &func, values, node)
}

/// Invoke a function value in a fresh child of its defining scope.
pub(crate) fn call_function(
    it: &mut Interpreter,
    func: &Rc<FunctionValue>,
    args: Vec<Value>,
    node: &Node,
) -> EvalResult {
    let scope = func.closure.child();
    call_in_scope(it, func, args, &scope, node)
}

/// Invoke a function value in a caller-prepared scope (methods seed `this`
/// into it first).
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(callee = func.name.as_deref().unwrap_or("<anonymous>"))
)]
pub(crate) fn call_in_scope(
    it: &mut Interpreter,
    func: &Rc<FunctionValue>,
    args: Vec<Value>,
    scope: &Context,
    node: &Node,
) -> EvalResult {
    bind_arguments(it, func, args, scope, node)?;
    match it.eval(&func.body, scope) {
        Ok(value) => Ok(if func.should_auto_return { value } else { Value::None }),
        Err(Signal::Return(value)) => Ok(value),
        Err(other) => Err(other),
    }
}

/// Bind call arguments to declared parameters.
///
/// Defaults are evaluated in the callee scope, left to right, so a default
/// may refer to parameters bound before it. A trailing rest parameter
/// collects whatever remains into a list.
fn bind_arguments(
    it: &mut Interpreter,
    func: &Rc<FunctionValue>,
    args: Vec<Value>,
    scope: &Context,
    node: &Node,
) -> Result<(), Signal> {
    let has_rest = func.args.last().is_some_and(|arg| arg.is_rest);
    let declared = func.args.len() - usize::from(has_rest);
    if args.len() > declared && !has_rest {
        return Err(fail(node, too_many_arguments(declared, args.len())));
    }

    let mut supplied = args.into_iter();
    for arg in &func.args[..declared] {
        let name = token_name(&arg.name, node)?;
        let value = match supplied.next() {
            Some(value) => value,
            None => match &arg.default_value {
                Some(default) => it.eval(default, scope)?,
                None if arg.is_optional => Value::None,
                None => return Err(fail(node, missing_argument(name))),
            },
        };
        check_declared_type(arg.declared_type.as_deref(), &value).map_err(|e| fail(node, e))?;
        scope
            .declare(name, value, Mutability::Mutable)
            .map_err(|_| fail(node, malformed_node("duplicate parameter name")))?;
    }
    if has_rest {
        let rest = &func.args[declared];
        let name = token_name(&rest.name, node)?;
        scope
            .declare(name, Value::list(supplied.collect()), Mutability::Mutable)
            .map_err(|_| fail(node, malformed_node("duplicate parameter name")))?;
    }
    Ok(())
}
