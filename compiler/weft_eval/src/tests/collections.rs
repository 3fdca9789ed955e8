//! Lists and dictionaries: reads, writes, slices, append, delete.

use pretty_assertions::assert_eq;
use weft_ir::{IndexSelector, Node, NodeKind};
use weft_value::{ErrorKind, Value};

use super::{declare, node, num, run, run_err, stmts, text, var};

fn list(elements: Vec<Node>) -> Node {
    node(NodeKind::List { elements })
}

fn index(target: Node, key: Node) -> Node {
    node(NodeKind::ListAccess {
        target: target.boxed(),
        selectors: vec![IndexSelector::Index(key)],
    })
}

#[test]
fn index_reads_and_negative_indices_count_from_the_end() {
    let program = stmts(vec![
        declare("xs", list(vec![num(1.0), num(2.0), num(3.0)])),
        index(var("xs"), num(-1.0)),
    ]);
    assert_eq!(run(&program), Ok(Value::number(3.0)));
}

#[test]
fn chained_index_reaches_nested_lists() {
    let grid = list(vec![list(vec![num(1.0), num(2.0)]), list(vec![num(3.0), num(4.0)])]);
    let program = node(NodeKind::ListAccess {
        target: grid.boxed(),
        selectors: vec![
            IndexSelector::Index(num(1.0)),
            IndexSelector::Index(num(0.0)),
        ],
    });
    assert_eq!(run(&program), Ok(Value::number(3.0)));
}

#[test]
fn slice_with_open_end_clamps() {
    let program = node(NodeKind::ListAccess {
        target: list(vec![num(1.0), num(2.0), num(3.0)]).boxed(),
        selectors: vec![IndexSelector::Slice {
            start: Some(num(1.0)),
            end: None,
        }],
    });
    assert_eq!(
        run(&program),
        Ok(Value::list(vec![Value::number(2.0), Value::number(3.0)]))
    );
}

#[test]
fn index_assignment_mutates_in_place() {
    let program = stmts(vec![
        declare("xs", list(vec![num(1.0), num(2.0)])),
        node(NodeKind::ListAssign {
            access: index(var("xs"), num(0.0)).boxed(),
            value: num(9.0).boxed(),
        }),
        index(var("xs"), num(0.0)),
    ]);
    assert_eq!(run(&program), Ok(Value::number(9.0)));
}

#[test]
fn empty_brackets_append() {
    let program = stmts(vec![
        declare("xs", list(vec![num(1.0)])),
        node(NodeKind::ListAssign {
            access: node(NodeKind::ListPushBrackets {
                target: var("xs").boxed(),
            })
            .boxed(),
            value: num(2.0).boxed(),
        }),
        var("xs"),
    ]);
    assert_eq!(
        run(&program),
        Ok(Value::list(vec![Value::number(1.0), Value::number(2.0)]))
    );
}

#[test]
fn out_of_range_index_is_a_typed_error() {
    let program = index(list(vec![num(1.0)]), num(4.0));
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::IndexOutOfRange { index: 4, len: 1 })
    );
}

#[test]
fn dictionary_reads_by_string_key() {
    let dict = node(NodeKind::Dictionary {
        entries: vec![(text("name"), text("weft")), (text("age"), num(1.0))],
    });
    let program = stmts(vec![
        declare("d", dict),
        index(var("d"), text("name")),
    ]);
    assert_eq!(run(&program), Ok(Value::string("weft")));
}

#[test]
fn dictionary_write_upserts_missing_keys() {
    let dict = node(NodeKind::Dictionary { entries: vec![] });
    let program = stmts(vec![
        declare("d", dict),
        node(NodeKind::ListAssign {
            access: index(var("d"), text("k")).boxed(),
            value: num(5.0).boxed(),
        }),
        index(var("d"), text("k")),
    ]);
    assert_eq!(run(&program), Ok(Value::number(5.0)));
}

#[test]
fn delete_removes_a_list_element() {
    let program = stmts(vec![
        declare("xs", list(vec![num(1.0), num(2.0), num(3.0)])),
        node(NodeKind::Delete {
            target: index(var("xs"), num(1.0)).boxed(),
        }),
        var("xs"),
    ]);
    assert_eq!(
        run(&program),
        Ok(Value::list(vec![Value::number(1.0), Value::number(3.0)]))
    );
}

#[test]
fn delete_removes_a_binding() {
    let program = stmts(vec![
        declare("x", num(1.0)),
        node(NodeKind::Delete {
            target: var("x").boxed(),
        }),
        var("x"),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::UndefinedVariable("x".to_string()))
    );
}

#[test]
fn string_indexing_respects_characters() {
    let program = index(text("héllo"), num(1.0));
    assert_eq!(run(&program), Ok(Value::string("é")));
}
