//! The object model: inheritance, visibility, statics, super, enums.

use pretty_assertions::assert_eq;
use weft_ir::{Argument, BinaryOp, ClassMethod, ClassProperty, Node, NodeKind, Visibility};
use weft_value::{ErrorKind, Value};

use super::{binary, ident, node, num, run, run_err, stmts, text, var};

fn prop(name: &str, value: Node) -> ClassProperty {
    ClassProperty {
        name: ident(name),
        value,
        declared_type: None,
        visibility: Visibility::Public,
        is_override: false,
        is_static: false,
    }
}

fn func(name: &str, args: Vec<Argument>, body: Node, auto_return: bool) -> Node {
    node(NodeKind::FuncDef {
        name: Some(ident(name)),
        args,
        body: body.boxed(),
        should_auto_return: auto_return,
    })
}

fn method(func: Node) -> ClassMethod {
    ClassMethod {
        func,
        visibility: Visibility::Public,
        is_override: false,
        is_static: false,
    }
}

fn class_def(
    name: &str,
    parent: Option<&str>,
    properties: Vec<ClassProperty>,
    methods: Vec<ClassMethod>,
) -> Node {
    node(NodeKind::ClassDef {
        name: ident(name),
        parent: parent.map(ident),
        properties,
        methods,
        getters: vec![],
        setters: vec![],
    })
}

fn new_instance(name: &str, args: Vec<Node>) -> Node {
    node(NodeKind::ClassCall {
        name: ident(name),
        args,
    })
}

fn get(target: Node, property: &str) -> Node {
    node(NodeKind::CallProperty {
        target: target.boxed(),
        property: ident(property),
        is_optional: false,
    })
}

fn set(target: Node, property: &str, value: Node) -> Node {
    node(NodeKind::AssignProperty {
        access: get(target, property).boxed(),
        value: value.boxed(),
    })
}

fn static_get(target: Node, property: &str) -> Node {
    node(NodeKind::CallStaticProperty {
        target: target.boxed(),
        property: ident(property),
        is_optional: false,
    })
}

fn method_call(target: Node, property: &str, args: Vec<Node>) -> Node {
    node(NodeKind::Call {
        callee: get(target, property).boxed(),
        args,
        is_optional: false,
    })
}

#[test]
fn properties_seed_from_the_class_table() {
    let program = stmts(vec![
        class_def("Point", None, vec![prop("x", num(3.0))], vec![]),
        get(new_instance("Point", vec![]), "x"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(3.0)));
}

#[test]
fn overridden_property_wins_on_the_child() {
    let mut overriding = prop("n", num(2.0));
    overriding.is_override = true;
    let program = stmts(vec![
        class_def("A", None, vec![prop("n", num(1.0))], vec![]),
        class_def("B", Some("A"), vec![overriding], vec![]),
        get(new_instance("B", vec![]), "n"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(2.0)));
}

#[test]
fn redeclaring_without_override_is_rejected() {
    let program = stmts(vec![
        class_def("A", None, vec![prop("n", num(1.0))], vec![]),
        class_def("B", Some("A"), vec![prop("n", num(2.0))], vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::InvalidOverride { member: "n".to_string() })
    );
}

#[test]
fn constructor_assigns_through_this() {
    let ctor = func(
        "constructor",
        vec![Argument::required(ident("x"))],
        stmts(vec![set(var("this"), "x", var("x"))]),
        false,
    );
    let program = stmts(vec![
        class_def("Point", None, vec![], vec![method(ctor)]),
        get(new_instance("Point", vec![num(7.0)]), "x"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(7.0)));
}

#[test]
fn methods_read_their_receiver() {
    let ctor = func(
        "constructor",
        vec![Argument::required(ident("n"))],
        stmts(vec![set(var("this"), "n", var("n"))]),
        false,
    );
    let doubled = func(
        "doubled",
        vec![],
        binary(BinaryOp::Mul, get(var("this"), "n"), num(2.0)),
        true,
    );
    let program = stmts(vec![
        class_def("Counter", None, vec![], vec![method(ctor), method(doubled)]),
        method_call(new_instance("Counter", vec![num(4.0)]), "doubled", vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(8.0)));
}

#[test]
fn inherited_methods_run_on_the_child() {
    let name_of = func("name_of", vec![], text("animal"), true);
    let program = stmts(vec![
        class_def("Animal", None, vec![], vec![method(name_of)]),
        class_def("Dog", Some("Animal"), vec![], vec![]),
        method_call(new_instance("Dog", vec![]), "name_of", vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::string("animal")));
}

#[test]
fn private_property_is_sealed_from_outside() {
    let mut secret = prop("secret", num(1.0));
    secret.visibility = Visibility::Private;
    let program = stmts(vec![
        class_def("Safe", None, vec![secret], vec![]),
        get(new_instance("Safe", vec![]), "secret"),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::VisibilityViolation {
            member: "secret".to_string(),
            visibility: "private".to_string(),
            class: "Safe".to_string(),
        })
    );
}

#[test]
fn private_property_is_readable_from_own_methods() {
    let mut secret = prop("secret", num(42.0));
    secret.visibility = Visibility::Private;
    let reveal = func("reveal", vec![], get(var("this"), "secret"), true);
    let program = stmts(vec![
        class_def("Safe", None, vec![secret], vec![method(reveal)]),
        method_call(new_instance("Safe", vec![]), "reveal", vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(42.0)));
}

#[test]
fn protected_member_opens_to_subclasses_only() {
    let mut base = prop("base", num(5.0));
    base.visibility = Visibility::Protected;
    let read_base = func("read_base", vec![], get(var("this"), "base"), true);
    let program = stmts(vec![
        class_def("A", None, vec![base], vec![]),
        class_def("B", Some("A"), vec![], vec![method(read_base)]),
        method_call(new_instance("B", vec![]), "read_base", vec![]),
    ]);
    assert_eq!(run(&program), Ok(Value::number(5.0)));

    let mut sealed = prop("base", num(5.0));
    sealed.visibility = Visibility::Protected;
    let outside = stmts(vec![
        class_def("A", None, vec![sealed], vec![]),
        get(new_instance("A", vec![]), "base"),
    ]);
    assert!(matches!(
        run_err(&outside),
        Some(ErrorKind::VisibilityViolation { .. })
    ));
}

#[test]
fn statics_live_on_the_class() {
    let mut count = prop("count", num(0.0));
    count.is_static = true;
    let program = stmts(vec![
        class_def("Registry", None, vec![count], vec![]),
        node(NodeKind::AssignProperty {
            access: static_get(var("Registry"), "count").boxed(),
            value: num(3.0).boxed(),
        }),
        static_get(var("Registry"), "count"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(3.0)));
}

#[test]
fn static_method_runs_without_a_receiver() {
    let make = func("origin", vec![], num(0.0), true);
    let mut origin = method(make);
    origin.is_static = true;
    let program = stmts(vec![
        class_def("Point", None, vec![], vec![origin]),
        node(NodeKind::Call {
            callee: static_get(var("Point"), "origin").boxed(),
            args: vec![],
            is_optional: false,
        }),
    ]);
    assert_eq!(run(&program), Ok(Value::number(0.0)));
}

#[test]
fn child_constructor_must_forward_to_super() {
    let parent_ctor = func(
        "constructor",
        vec![],
        stmts(vec![set(var("this"), "ready", num(1.0))]),
        false,
    );
    let child_ctor = func("constructor", vec![], stmts(vec![]), false);
    let program = stmts(vec![
        class_def("A", None, vec![], vec![method(parent_ctor)]),
        class_def("B", Some("A"), vec![], vec![method(child_ctor)]),
        new_instance("B", vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::SuperCallMissing("B".to_string()))
    );
}

#[test]
fn super_runs_the_parent_constructor_on_the_same_instance() {
    let parent_ctor = func(
        "constructor",
        vec![Argument::required(ident("n"))],
        stmts(vec![set(var("this"), "n", var("n"))]),
        false,
    );
    let child_ctor = func(
        "constructor",
        vec![],
        stmts(vec![node(NodeKind::Super {
            args: vec![num(9.0)],
        })]),
        false,
    );
    let program = stmts(vec![
        class_def("A", None, vec![], vec![method(parent_ctor)]),
        class_def("B", Some("A"), vec![], vec![method(child_ctor)]),
        get(new_instance("B", vec![]), "n"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(9.0)));
}

#[test]
fn super_is_rejected_outside_a_constructor() {
    let parent_ctor = func(
        "constructor",
        vec![],
        stmts(vec![set(var("this"), "n", num(1.0))]),
        false,
    );
    let child_ctor = func(
        "constructor",
        vec![],
        stmts(vec![
            node(NodeKind::Super { args: vec![] }),
            set(var("this"), "n", num(5.0)),
        ]),
        false,
    );
    // A plain method calling super() would re-run the parent constructor
    // and reset `this.n`; it must report instead.
    let poke = func(
        "poke",
        vec![],
        stmts(vec![node(NodeKind::Super { args: vec![] })]),
        false,
    );
    let program = stmts(vec![
        class_def("A", None, vec![], vec![method(parent_ctor)]),
        class_def("B", Some("A"), vec![], vec![method(child_ctor), method(poke)]),
        super::declare("b", new_instance("B", vec![])),
        method_call(var("b"), "poke", vec![]),
    ]);
    assert!(matches!(run_err(&program), Some(ErrorKind::MalformedNode(_))));
}

#[test]
fn instanceof_walks_the_chain() {
    let program = stmts(vec![
        class_def("A", None, vec![], vec![]),
        class_def("B", Some("A"), vec![], vec![]),
        class_def("C", None, vec![], vec![]),
        node(NodeKind::List {
            elements: vec![
                node(NodeKind::Instanceof {
                    target: new_instance("B", vec![]).boxed(),
                    class_name: ident("A"),
                }),
                node(NodeKind::Instanceof {
                    target: new_instance("B", vec![]).boxed(),
                    class_name: ident("C"),
                }),
            ],
        }),
    ]);
    assert_eq!(
        run(&program),
        Ok(Value::list(vec![Value::Bool(true), Value::Bool(false)]))
    );
}

#[test]
fn getters_and_setters_mediate_access() {
    let mut raw = prop("raw", num(0.0));
    raw.visibility = Visibility::Private;
    let getter = method(func("celsius", vec![], get(var("this"), "raw"), true));
    let setter = method(func(
        "celsius",
        vec![Argument::required(ident("value"))],
        stmts(vec![set(var("this"), "raw", var("value"))]),
        false,
    ));
    let program = stmts(vec![
        node(NodeKind::ClassDef {
            name: ident("Thermo"),
            parent: None,
            properties: vec![raw],
            methods: vec![],
            getters: vec![getter],
            setters: vec![setter],
        }),
        super::declare("t", new_instance("Thermo", vec![])),
        set(var("t"), "celsius", num(21.0)),
        get(var("t"), "celsius"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(21.0)));
}

#[test]
fn enum_members_number_from_zero() {
    let program = stmts(vec![
        node(NodeKind::EnumDef {
            name: ident("Color"),
            members: vec![ident("Red"), ident("Green"), ident("Blue")],
        }),
        static_get(var("Color"), "Green"),
    ]);
    assert_eq!(run(&program), Ok(Value::number(1.0)));
}

#[test]
fn unknown_enum_member_is_a_typed_error() {
    let program = stmts(vec![
        node(NodeKind::EnumDef {
            name: ident("Color"),
            members: vec![ident("Red")],
        }),
        static_get(var("Color"), "Teal"),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::UndefinedMember {
            member: "Teal".to_string(),
            target: "Color".to_string(),
        })
    );
}

#[test]
fn length_is_a_builtin_property() {
    let program = get(
        node(NodeKind::List {
            elements: vec![num(1.0), num(2.0)],
        }),
        "length",
    );
    assert_eq!(run(&program), Ok(Value::number(2.0)));
}
