//! Tag components and HTML tree construction.

use pretty_assertions::assert_eq;
use weft_ir::{HtmlAttribute, IfCase, Node, NodeKind, TagProp, TagState};
use weft_value::ErrorKind;

use super::{binary, ident, node, num, run, run_err, stmts, text, var};
use weft_ir::BinaryOp;

fn element(tag: &str, attributes: Vec<(&str, Node)>, children: Vec<Node>) -> Node {
    node(NodeKind::Html {
        tag: Some(ident(tag)),
        classes: vec![],
        id: None,
        attributes: attributes
            .into_iter()
            .map(|(name, value)| HtmlAttribute {
                name: ident(name),
                value,
            })
            .collect(),
        events: vec![],
        children,
    })
}

fn fragment(children: Vec<Node>) -> Node {
    node(NodeKind::Html {
        tag: None,
        classes: vec![],
        id: None,
        attributes: vec![],
        events: vec![],
        children,
    })
}

fn render_method(body: Node) -> Node {
    node(NodeKind::FuncDef {
        name: Some(ident("render")),
        args: vec![],
        body: body.boxed(),
        should_auto_return: true,
    })
}

fn tag_def(name: &str, props: Vec<TagProp>, states: Vec<TagState>, methods: Vec<Node>) -> Node {
    node(NodeKind::TagDef {
        name: ident(name),
        props,
        states,
        methods,
    })
}

fn required_prop(name: &str) -> TagProp {
    TagProp {
        name: ident(name),
        default_value: None,
        declared_type: None,
        is_optional: false,
    }
}

fn rendered(program: &Node) -> Result<String, ErrorKind> {
    run(program).map(|v| v.to_string()).map_err(|e| e.kind)
}

#[test]
fn plain_element_renders_attributes_and_children() {
    let program = element(
        "a",
        vec![("href", text("/home"))],
        vec![text("Home")],
    );
    assert_eq!(
        rendered(&program),
        Ok("<a href=\"/home\">Home</a>".to_string())
    );
}

#[test]
fn fragment_renders_children_without_a_wrapper() {
    let program = fragment(vec![text("a"), text("b")]);
    assert_eq!(rendered(&program), Ok("ab".to_string()));
}

#[test]
fn classes_and_id_render_on_the_element() {
    let program = node(NodeKind::Html {
        tag: Some(ident("div")),
        classes: vec![ident("card"), ident("wide")],
        id: Some(ident("main")),
        attributes: vec![],
        events: vec![],
        children: vec![],
    });
    assert_eq!(
        rendered(&program),
        Ok("<div class=\"card wide\" id=\"main\"></div>".to_string())
    );
}

#[test]
fn none_children_render_as_nothing() {
    // an untaken if-branch inside markup leaves no placeholder
    let hidden = node(NodeKind::If {
        cases: vec![IfCase {
            condition: super::boolean(false),
            body: text("secret"),
        }],
        else_case: None,
        should_return_null: false,
        prevent_null_return: true,
    });
    let program = element("p", vec![], vec![text("shown"), hidden]);
    assert_eq!(rendered(&program), Ok("<p>shown</p>".to_string()));
}

#[test]
fn loop_children_splice_into_the_parent() {
    let items = node(NodeKind::For {
        var: ident("i"),
        start: None,
        end: num(3.0).boxed(),
        step: None,
        body: element("li", vec![], vec![var("i")]).boxed(),
        should_return_null: false,
        prevent_null_return: true,
    });
    let program = element("ul", vec![], vec![items]);
    assert_eq!(
        rendered(&program),
        Ok("<ul><li>0</li><li>1</li><li>2</li></ul>".to_string())
    );
}

#[test]
fn tag_instantiates_through_markup() {
    let render = render_method(element("span", vec![], vec![var("label")]));
    let program = stmts(vec![
        tag_def("Badge", vec![required_prop("label")], vec![], vec![render]),
        element("Badge", vec![("label", text("new"))], vec![]),
    ]);
    assert_eq!(rendered(&program), Ok("<span>new</span>".to_string()));
}

#[test]
fn missing_required_prop_is_reported_by_name() {
    let render = render_method(element("span", vec![], vec![]));
    let program = stmts(vec![
        tag_def("Badge", vec![required_prop("label")], vec![], vec![render]),
        element("Badge", vec![], vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::MissingArgument("label".to_string()))
    );
}

#[test]
fn unknown_attribute_is_rejected() {
    let render = render_method(element("span", vec![], vec![]));
    let program = stmts(vec![
        tag_def("Badge", vec![], vec![], vec![render]),
        element("Badge", vec![("labell", text("oops"))], vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::UndefinedMember {
            member: "labell".to_string(),
            target: "Badge".to_string(),
        })
    );
}

#[test]
fn prop_defaults_evaluate_in_the_tag_scope() {
    let with_default = TagProp {
        name: ident("count"),
        default_value: Some(num(2.0)),
        declared_type: None,
        is_optional: false,
    };
    let render = render_method(element(
        "b",
        vec![],
        vec![binary(BinaryOp::Mul, var("count"), num(10.0))],
    ));
    let program = stmts(vec![
        tag_def("Repeat", vec![with_default], vec![], vec![render]),
        element("Repeat", vec![], vec![]),
    ]);
    assert_eq!(rendered(&program), Ok("<b>20</b>".to_string()));
}

#[test]
fn states_seed_before_render() {
    let state = TagState {
        name: ident("open"),
        default_value: super::boolean(true),
        declared_type: None,
    };
    let render = render_method(element("i", vec![], vec![var("open")]));
    let program = stmts(vec![
        tag_def("Panel", vec![], vec![state], vec![render]),
        element("Panel", vec![], vec![]),
    ]);
    assert_eq!(rendered(&program), Ok("<i>true</i>".to_string()));
}

#[test]
fn use_site_children_append_to_the_rendered_root() {
    let render = render_method(element("div", vec![], vec![text("head")]));
    let program = stmts(vec![
        tag_def("Box", vec![], vec![], vec![render]),
        element("Box", vec![], vec![text("tail")]),
    ]);
    assert_eq!(rendered(&program), Ok("<div>headtail</div>".to_string()));
}

#[test]
fn tag_without_render_is_an_error() {
    let program = stmts(vec![
        tag_def("Empty", vec![], vec![], vec![]),
        element("Empty", vec![], vec![]),
    ]);
    assert_eq!(
        run_err(&program),
        Some(ErrorKind::UndefinedMember {
            member: "render".to_string(),
            target: "Empty".to_string(),
        })
    );
}
