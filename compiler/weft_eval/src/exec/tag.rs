//! Tag components.
//!
//! A tag is a template with declared props (supplied at the use site),
//! internal mutable states, and methods, of which `render` produces the
//! instance's HTML tree. Each instantiation gets a fresh child scope of
//! the tag's defining context: props are bound immutable, states mutable,
//! and the method definitions run in that scope so they close over both.

use std::rc::Rc;

use weft_ir::{Node, NodeKind, TagProp, TagState, Token};
use weft_value::{
    already_declared, malformed_node, missing_argument, type_mismatch, undefined_member, Context,
    EvalResult, Mutability, TagValue, Value,
};

use crate::exec::call;
use crate::interpreter::{check_declared_type, fail, token_name, Interpreter};

pub fn eval_tag_def(
    _it: &mut Interpreter,
    name: &Token,
    props: &[TagProp],
    states: &[TagState],
    methods: &[Node],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let tag_name = token_name(name, node)?.to_string();
    for method in methods {
        let NodeKind::FuncDef { name: Some(_), .. } = &method.kind else {
            return Err(fail(node, malformed_node("tag method without a name")));
        };
    }
    let tag = Value::Tag(Rc::new(TagValue {
        name: tag_name.clone(),
        props: props.to_vec(),
        states: states.to_vec(),
        methods: methods.to_vec(),
        closure: ctx.clone(),
    }));
    ctx.declare(&tag_name, tag.clone(), Mutability::Immutable)
        .map_err(|_| fail(node, already_declared(tag_name)))?;
    Ok(tag)
}

/// Instantiate a tag: bind the supplied attributes to its props, seed its
/// states, define its methods, and run `render`.
pub(crate) fn instantiate(
    it: &mut Interpreter,
    tag: &Rc<TagValue>,
    supplied: Vec<(String, Value)>,
    node: &Node,
) -> EvalResult {
    for (attr, _) in &supplied {
        if !tag.props.iter().any(|prop| prop.name.text() == Some(attr.as_str())) {
            return Err(fail(node, undefined_member(attr.clone(), tag.name.clone())));
        }
    }

    let scope = tag.closure.child();
    for prop in &tag.props {
        let prop_name = token_name(&prop.name, node)?;
        let value = match supplied.iter().find(|(attr, _)| attr == prop_name) {
            Some((_, value)) => value.clone(),
            None => match &prop.default_value {
                Some(default) => it.eval(default, &scope)?,
                None if prop.is_optional => Value::None,
                None => return Err(fail(node, missing_argument(prop_name))),
            },
        };
        check_declared_type(prop.declared_type.as_deref(), &value).map_err(|e| fail(node, e))?;
        scope
            .declare(prop_name, value, Mutability::Immutable)
            .map_err(|_| fail(node, already_declared(prop_name)))?;
    }
    for state in &tag.states {
        let state_name = token_name(&state.name, node)?;
        let value = it.eval(&state.default_value, &scope)?;
        check_declared_type(state.declared_type.as_deref(), &value).map_err(|e| fail(node, e))?;
        scope
            .declare(state_name, value, Mutability::Mutable)
            .map_err(|_| fail(node, already_declared(state_name)))?;
    }
    for method in &tag.methods {
        it.eval(method, &scope)?;
    }

    let rendered = match scope.lookup("render") {
        Some(Value::Function(render)) => call::call_function(it, &render, Vec::new(), node)?,
        Some(other) => return Err(fail(node, type_mismatch("function", other.type_name()))),
        None => {
            return Err(fail(
                node,
                undefined_member("render", tag.name.clone()),
            ));
        }
    };
    match rendered {
        Value::Html(_) => Ok(rendered),
        other => Err(fail(node, type_mismatch("html", other.type_name()))),
    }
}
