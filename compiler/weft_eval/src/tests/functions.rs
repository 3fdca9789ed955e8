//! Functions: binding, defaults, rest, returns, closures.

use pretty_assertions::assert_eq;
use weft_ir::{Argument, BinaryOp, Node, NodeKind};
use weft_value::{ErrorKind, Value};

use super::{assign, binary, declare, ident, node, num, run, run_err, stmts, var};

fn func_def(name: &str, args: Vec<Argument>, body: Node, auto_return: bool) -> Node {
    node(NodeKind::FuncDef {
        name: Some(ident(name)),
        args,
        body: body.boxed(),
        should_auto_return: auto_return,
    })
}

fn call(callee: Node, args: Vec<Node>) -> Node {
    node(NodeKind::Call {
        callee: callee.boxed(),
        args,
        is_optional: false,
    })
}

#[test]
fn arrow_body_returns_implicitly() {
    let program = stmts(vec![
        func_def(
            "double",
            vec![Argument::required(ident("n"))],
            binary(BinaryOp::Mul, var("n"), num(2.0)),
            true,
        ),
        call(var("double"), vec![num(21.0)]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(42.0)));
}

#[test]
fn block_body_returns_none_without_return() {
    let program = stmts(vec![
        func_def("noop", vec![], num(5.0), false),
        call(var("noop"), vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::None));
}

#[test]
fn return_stops_at_the_call_boundary() {
    // f() { return 1; 2 }; f() then continue outside
    let body = stmts(vec![
        node(NodeKind::Return {
            value: Some(num(1.0).boxed()),
        }),
        num(2.0),
    ]);
    let program = stmts(vec![
        func_def("f", vec![], body, false),
        binary(BinaryOp::Add, call(var("f"), vec![]), num(10.0)),
    ]);
    assert_eq!(run(&program), Ok(Value::number(11.0)));
}

#[test]
fn defaults_fill_missing_arguments() {
    let program = stmts(vec![
        func_def(
            "greet",
            vec![
                Argument::required(ident("a")),
                Argument::optional(ident("b"), num(10.0)),
            ],
            binary(BinaryOp::Add, var("a"), var("b")),
            true,
        ),
        call(var("greet"), vec![num(1.0)]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(11.0)));
}

#[test]
fn missing_required_argument_is_reported_by_name() {
    let program = stmts(vec![
        func_def(
            "f",
            vec![Argument::required(ident("x"))],
            var("x"),
            true,
        ),
        call(var("f"), vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::MissingArgument("x".to_string()))
    );
}

#[test]
fn surplus_arguments_are_rejected_without_rest() {
    let program = stmts(vec![
        func_def("f", vec![Argument::required(ident("x"))], var("x"), true),
        call(var("f"), vec![num(1.0), num(2.0)]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::TooManyArguments { expected: 1, got: 2 })
    );
}

#[test]
fn rest_parameter_collects_the_tail() {
    let program = stmts(vec![
        func_def(
            "tail",
            vec![Argument::required(ident("first")), Argument::rest(ident("rest"))],
            var("rest"),
            true,
        ),
        call(var("tail"), vec![num(1.0), num(2.0), num(3.0)]),
    ]);
    assert_eq!(
        run(&program),
        Ok(Value::list(vec![Value::number(2.0), Value::number(3.0)]))
    );
}

#[test]
fn closures_observe_later_mutation() {
    // var n = 1; read() => n; n = 5; read()
    let program = stmts(vec![
        declare("n", num(1.0)),
        func_def("read", vec![], var("n"), true),
        assign("n", num(5.0)),
        call(var("read"), vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(5.0)));
}

#[test]
fn call_scope_does_not_leak_parameters() {
    let program = stmts(vec![
        func_def("f", vec![Argument::required(ident("x"))], var("x"), true),
        call(var("f"), vec![num(1.0)]),
        var("x"),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::UndefinedVariable("x".to_string()))
    );
}

#[test]
fn optional_call_short_circuits_on_none() {
    let program = stmts(vec![
        declare("f", super::none_lit()),
        node(NodeKind::Call {
            callee: var("f").boxed(),
            args: vec![],
            is_optional: true,
        }),
    ]);
    assert_eq!(run(&program), Ok(Value::None));
}

#[test]
fn calling_a_number_is_a_typed_error() {
    let program = call(num(4.0), vec![]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::NotCallable("number".to_string()))
    );
}
