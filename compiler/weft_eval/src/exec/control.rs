//! Control-flow constructs.
//!
//! Loops are the only boundary that absorbs `Break` and `Continue`; a
//! signal that escapes every loop reaches the top level and reports as a
//! misplaced-statement error. Loop and branch bodies always run in a child
//! scope, so bindings made inside never leak outward.
//!
//! Loops in expression position collect their per-iteration values into a
//! list. With `prevent_null_return` set (bodies inside an HTML tree) the
//! `none` iterations are dropped, so the surrounding element splices only
//! the rendered children.

use weft_ir::{IfCase, Node, SwitchCase, Token};
use weft_value::{malformed_node, type_mismatch, Context, EvalResult, Mutability, Signal, Value};

use crate::interpreter::{fail, token_name, Interpreter};

/// Accumulates the value a loop yields to expression position.
struct LoopOutput {
    collected: Option<Vec<Value>>,
    skip_none: bool,
}

impl LoopOutput {
    fn new(should_return_null: bool, prevent_null_return: bool) -> Self {
        LoopOutput {
            collected: (!should_return_null).then(Vec::new),
            skip_none: prevent_null_return,
        }
    }

    fn push(&mut self, value: Value) {
        if let Some(items) = &mut self.collected {
            if !(self.skip_none && value.is_none()) {
                items.push(value);
            }
        }
    }

    fn finish(self) -> Value {
        match self.collected {
            Some(items) => Value::list(items),
            None => Value::None,
        }
    }
}

/// Run one loop iteration, absorbing `Continue`. `Break` is left for the
/// caller to absorb, since it must also end the loop.
fn run_iteration(it: &mut Interpreter, body: &Node, ctx: &Context) -> Result<Option<Value>, Signal> {
    match it.eval(body, ctx) {
        Ok(value) => Ok(Some(value)),
        Err(Signal::Continue) => Ok(None),
        Err(other) => Err(other),
    }
}

pub fn eval_statements(it: &mut Interpreter, body: &[Node], ctx: &Context) -> EvalResult {
    let mut last = Value::None;
    for statement in body {
        last = it.eval(statement, ctx)?;
    }
    Ok(last)
}

pub fn eval_if(
    it: &mut Interpreter,
    cases: &[IfCase],
    else_case: Option<&Node>,
    should_return_null: bool,
    prevent_null_return: bool,
    ctx: &Context,
) -> EvalResult {
    for case in cases {
        if it.eval(&case.condition, ctx)?.is_truthy() {
            let value = it.eval(&case.body, &ctx.child())?;
            return Ok(if should_return_null { Value::None } else { value });
        }
    }
    if let Some(else_body) = else_case {
        let value = it.eval(else_body, &ctx.child())?;
        return Ok(if should_return_null { Value::None } else { value });
    }
    // No branch taken. In an HTML tree this renders as nothing.
    let _ = prevent_null_return;
    Ok(Value::None)
}

fn loop_number(it: &mut Interpreter, node: &Node, ctx: &Context, what: &str) -> Result<f64, Signal> {
    match it.eval(node, ctx)? {
        Value::Number(n) => Ok(n),
        other => Err(fail(node, type_mismatch(what, other.type_name()))),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn eval_for(
    it: &mut Interpreter,
    var: &Token,
    start: Option<&Node>,
    end: &Node,
    step: Option<&Node>,
    body: &Node,
    should_return_null: bool,
    prevent_null_return: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let var = token_name(var, node)?;
    let start = match start {
        Some(start) => loop_number(it, start, ctx, "number start bound")?,
        None => 0.0,
    };
    let end = loop_number(it, end, ctx, "number end bound")?;
    let step = match step {
        Some(step) => loop_number(it, step, ctx, "number step")?,
        None => 1.0,
    };
    if step == 0.0 {
        return Err(fail(node, malformed_node("for loop step must not be zero")));
    }

    let mut output = LoopOutput::new(should_return_null, prevent_null_return);
    let mut counter = start;
    loop {
        let in_range = if step > 0.0 { counter < end } else { counter > end };
        if !in_range {
            break;
        }
        let scope = ctx.child();
        scope
            .declare(var, Value::Number(counter), Mutability::Mutable)
            .map_err(|_| fail(node, malformed_node("loop variable redeclared")))?;
        match run_iteration(it, body, &scope) {
            Ok(Some(value)) => output.push(value),
            Ok(None) => {}
            Err(Signal::Break) => break,
            Err(other) => return Err(other),
        }
        counter += step;
    }
    Ok(output.finish())
}

#[allow(clippy::too_many_arguments)]
pub fn eval_foreach(
    it: &mut Interpreter,
    iterable: &Node,
    key: Option<&Token>,
    value: &Token,
    body: &Node,
    should_return_null: bool,
    prevent_null_return: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let value_name = token_name(value, node)?;
    let key_name = match key {
        Some(key) => Some(token_name(key, node)?),
        None => None,
    };

    // Snapshot the entries so body mutations of the collection cannot
    // invalidate the walk.
    let entries: Vec<(Value, Value)> = match it.eval(iterable, ctx)? {
        Value::List(items) => items
            .borrow()
            .iter()
            .enumerate()
            .map(|(i, item)| (Value::number(i as f64), item.clone()))
            .collect(),
        Value::Dict(entries) => entries
            .borrow()
            .iter()
            .map(|(k, v)| (Value::string(k.clone()), v.clone()))
            .collect(),
        Value::Str(s) => s
            .chars()
            .enumerate()
            .map(|(i, ch)| (Value::number(i as f64), Value::string(ch.to_string())))
            .collect(),
        other => {
            return Err(fail(
                iterable,
                type_mismatch("iterable collection", other.type_name()),
            ));
        }
    };

    let mut output = LoopOutput::new(should_return_null, prevent_null_return);
    for (entry_key, entry_value) in entries {
        let scope = ctx.child();
        if let Some(key_name) = key_name {
            scope
                .declare(key_name, entry_key, Mutability::Mutable)
                .map_err(|_| fail(node, malformed_node("loop variable redeclared")))?;
        }
        scope
            .declare(value_name, entry_value, Mutability::Mutable)
            .map_err(|_| fail(node, malformed_node("loop variable redeclared")))?;
        match run_iteration(it, body, &scope) {
            Ok(Some(value)) => output.push(value),
            Ok(None) => {}
            Err(Signal::Break) => break,
            Err(other) => return Err(other),
        }
    }
    Ok(output.finish())
}

pub fn eval_while(
    it: &mut Interpreter,
    condition: &Node,
    body: &Node,
    should_return_null: bool,
    ctx: &Context,
) -> EvalResult {
    let mut output = LoopOutput::new(should_return_null, false);
    while it.eval(condition, ctx)?.is_truthy() {
        match run_iteration(it, body, &ctx.child()) {
            Ok(Some(value)) => output.push(value),
            Ok(None) => {}
            Err(Signal::Break) => break,
            Err(other) => return Err(other),
        }
    }
    Ok(output.finish())
}

/// First case whose condition list contains a value equal to the subject
/// wins; cases never fall through into each other.
pub fn eval_switch(
    it: &mut Interpreter,
    subject: &Node,
    cases: &[SwitchCase],
    default_case: Option<&Node>,
    ctx: &Context,
) -> EvalResult {
    let subject = it.eval(subject, ctx)?;
    for case in cases {
        for condition in &case.conditions {
            if it.eval(condition, ctx)?.equals(&subject) {
                return run_case_body(it, &case.body, ctx);
            }
        }
    }
    match default_case {
        Some(body) => run_case_body(it, body, ctx),
        None => Ok(Value::None),
    }
}

/// A `break` inside a case body exits the switch.
fn run_case_body(it: &mut Interpreter, body: &Node, ctx: &Context) -> EvalResult {
    match it.eval(body, &ctx.child()) {
        Err(Signal::Break) => Ok(Value::None),
        other => other,
    }
}
