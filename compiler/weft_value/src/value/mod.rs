//! Runtime values.
//!
//! Scalar values are stored inline; composite values share their payload
//! through [`Shared`] (or plain `Rc` when immutable), so cloning a `Value`
//! is always cheap and two handles to the same list observe each other's
//! mutation.
//!
//! Equality is structural for data (numbers, strings, lists, dictionaries)
//! and identity-based for behavior carriers (functions, classes, instances,
//! tags). Stringification here is the language's `Display`; diagnostic
//! rendering lives elsewhere.

mod ops;
mod runtime;

pub use ops::{binary_op, index, push, remove_index, slice, store_index, unary_op};
pub use runtime::{
    ClassValue, EnumValue, FunctionValue, HtmlValue, InstanceValue, MethodDef, PropertyDef,
    StaticMember, TagValue,
};

use crate::Shared;
use std::fmt;
use std::rc::Rc;

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Number(f64),
    Str(Rc<String>),
    Bool(bool),
    None,
    List(Shared<Vec<Value>>),
    /// Insertion-ordered key/value pairs, so iteration matches source order.
    Dict(Shared<Vec<(String, Value)>>),
    Function(Rc<FunctionValue>),
    Class(Rc<ClassValue>),
    Instance(InstanceValue),
    Enum(Rc<EnumValue>),
    Tag(Rc<TagValue>),
    Html(Shared<HtmlValue>),
}

impl Value {
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Rc::new(s.into()))
    }

    pub fn boolean(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn none() -> Self {
        Value::None
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Shared::new(items))
    }

    pub fn dict(entries: Vec<(String, Value)>) -> Self {
        Value::Dict(Shared::new(entries))
    }

    pub fn html(node: HtmlValue) -> Self {
        Value::Html(Shared::new(node))
    }

    /// The language-level type name, as reported by `typeof`.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::None => "none",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::Enum(_) => "enum",
            Value::Tag(_) => "tag",
            Value::Html(_) => "html",
        }
    }

    /// Truthiness: `none`, `false`, `0`, and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Language equality: structural for data, identity for behavior.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::None, Value::None) => true,
            (Value::List(a), Value::List(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Dict(a), Value::Dict(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, val)| {
                        b.iter().any(|(k, v)| k == key && v.equals(val))
                    })
            }
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.fields.ptr_eq(&b.fields),
            (Value::Enum(a), Value::Enum(b)) => Rc::ptr_eq(a, b),
            (Value::Tag(a), Value::Tag(b)) => Rc::ptr_eq(a, b),
            (Value::Html(a), Value::Html(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Render a number without a trailing `.0` when it is integral.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{n}")
    }
}

/// Element rendering inside collections: strings are quoted there.
fn fmt_element(value: &Value, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match value {
        Value::Str(s) => write!(f, "\"{s}\""),
        other => write!(f, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::None => f.write_str("none"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt_element(item, f)?;
                }
                f.write_str("]")
            }
            Value::Dict(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: ")?;
                    fmt_element(value, f)?;
                }
                f.write_str("}")
            }
            Value::Function(func) => match &func.name {
                Some(name) => write!(f, "<function {name}>"),
                None => f.write_str("<function>"),
            },
            Value::Class(class) => write!(f, "<class {}>", class.name),
            Value::Instance(instance) => write!(f, "<{} instance>", instance.class.name),
            Value::Enum(enum_val) => write!(f, "<enum {}>", enum_val.name),
            Value::Tag(tag) => write!(f, "<tag {}>", tag.name),
            Value::Html(html) => write!(f, "{}", html.borrow()),
        }
    }
}
