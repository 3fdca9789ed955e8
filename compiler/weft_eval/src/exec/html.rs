//! HTML tree construction.
//!
//! An `Html` node either builds a plain element (or fragment) or, when its
//! tag name resolves to a tag value in scope, instantiates that component.
//! Loop children splice their collected lists into the parent's child
//! sequence; `none` children (untaken branches, skipped iterations) render
//! as nothing.

use weft_ir::{HtmlAttribute, Node, NodeKind, Token};
use weft_value::{Context, EvalResult, HtmlValue, Signal, Value};

use crate::exec::tag;
use crate::interpreter::{token_name, Interpreter};

#[allow(clippy::too_many_arguments)]
pub fn eval_html(
    it: &mut Interpreter,
    tag_token: Option<&Token>,
    classes: &[Token],
    id: Option<&Token>,
    attributes: &[HtmlAttribute],
    events: &[HtmlAttribute],
    children: &[Node],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let class_names = {
        let mut names = Vec::with_capacity(classes.len());
        for class in classes {
            names.push(token_name(class, node)?.to_string());
        }
        names
    };
    let id = match id {
        Some(id) => Some(token_name(id, node)?.to_string()),
        None => None,
    };
    let attributes = eval_attribute_pairs(it, attributes, ctx, node)?;
    let events = eval_attribute_pairs(it, events, ctx, node)?;
    let child_values = eval_children(it, children, ctx)?;

    let tag_name = match tag_token {
        Some(token) => token_name(token, node)?.to_string(),
        None => {
            // Fragment.
            return Ok(Value::html(HtmlValue {
                children: child_values,
                ..HtmlValue::default()
            }));
        }
    };

    // A tag value in scope under the element's name makes this a component
    // instantiation; its attributes become the component's props.
    if let Some(Value::Tag(component)) = ctx.lookup(&tag_name) {
        let rendered = tag::instantiate(it, &component, attributes, node)?;
        if let Value::Html(root) = &rendered {
            let mut root = root.borrow_mut();
            root.classes.extend(class_names);
            if id.is_some() {
                root.id = id;
            }
            root.events.extend(events);
            root.children.extend(child_values);
        }
        return Ok(rendered);
    }

    Ok(Value::html(HtmlValue {
        tag: Some(tag_name),
        classes: class_names,
        id,
        attributes,
        events,
        children: child_values,
    }))
}

fn eval_attribute_pairs(
    it: &mut Interpreter,
    pairs: &[HtmlAttribute],
    ctx: &Context,
    node: &Node,
) -> Result<Vec<(String, Value)>, Signal> {
    let mut out = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let name = token_name(&pair.name, node)?.to_string();
        let value = it.eval(&pair.value, ctx)?;
        out.push((name, value));
    }
    Ok(out)
}

fn eval_children(
    it: &mut Interpreter,
    children: &[Node],
    ctx: &Context,
) -> Result<Vec<Value>, Signal> {
    let mut out = Vec::new();
    for child in children {
        let value = it.eval(child, ctx)?;
        match (&child.kind, value) {
            (_, Value::None) => {}
            (NodeKind::For { .. } | NodeKind::Foreach { .. }, Value::List(items)) => {
                for item in items.borrow().iter() {
                    if !item.is_none() {
                        out.push(item.clone());
                    }
                }
            }
            (_, value) => out.push(value),
        }
    }
    Ok(out)
}
