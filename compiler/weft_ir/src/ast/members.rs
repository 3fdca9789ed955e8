//! Side structures carried by composite nodes.
//!
//! These are the non-node shapes the catalog refers to: function arguments,
//! class members, tag props/states, if/switch cases, index selectors, and
//! HTML attribute pairs. Each owns its child nodes directly.

use super::node::Node;
use crate::Token;

/// Member visibility on class properties and methods.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    pub const fn as_keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        }
    }
}

/// A declared function parameter.
///
/// A rest argument (`...args`) must be declared last and carries no default
/// value; the evaluator reports either inconsistency instead of crashing.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Token,
    /// Advisory type annotation, checked at assignment time only.
    pub declared_type: Option<String>,
    pub is_rest: bool,
    pub is_optional: bool,
    pub default_value: Option<Node>,
}

impl Argument {
    /// A plain required parameter.
    pub fn required(name: Token) -> Self {
        Argument {
            name,
            declared_type: None,
            is_rest: false,
            is_optional: false,
            default_value: None,
        }
    }

    /// An optional parameter with a default expression.
    pub fn optional(name: Token, default_value: Node) -> Self {
        Argument {
            name,
            declared_type: None,
            is_rest: false,
            is_optional: true,
            default_value: Some(default_value),
        }
    }

    /// A trailing rest parameter.
    pub fn rest(name: Token) -> Self {
        Argument {
            name,
            declared_type: None,
            is_rest: true,
            is_optional: false,
            default_value: None,
        }
    }
}

/// One property declaration inside a class body.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassProperty {
    pub name: Token,
    pub value: Node,
    pub declared_type: Option<String>,
    pub visibility: Visibility,
    pub is_override: bool,
    pub is_static: bool,
}

/// One method (or getter/setter) declaration inside a class body.
///
/// `func` is always a `FuncDef` node carrying the method's name.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassMethod {
    pub func: Node,
    pub visibility: Visibility,
    pub is_override: bool,
    pub is_static: bool,
}

/// An externally-supplied tag input.
#[derive(Clone, Debug, PartialEq)]
pub struct TagProp {
    pub name: Token,
    pub default_value: Option<Node>,
    pub declared_type: Option<String>,
    pub is_optional: bool,
}

/// An internally-mutable tag state slot.
#[derive(Clone, Debug, PartialEq)]
pub struct TagState {
    pub name: Token,
    pub default_value: Node,
    pub declared_type: Option<String>,
}

/// One `(condition, body)` arm of an if-chain.
#[derive(Clone, Debug, PartialEq)]
pub struct IfCase {
    pub condition: Node,
    pub body: Node,
}

/// One switch case: any matching condition selects `body`.
///
/// Fallthrough is implicit between the listed conditions of a single case,
/// never across cases.
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchCase {
    pub conditions: Vec<Node>,
    pub body: Node,
}

/// One step of a (possibly chained) index access.
#[derive(Clone, Debug, PartialEq)]
pub enum IndexSelector {
    /// `target[expr]`
    Index(Node),
    /// `target[a:b]`, either bound optional.
    Slice {
        start: Option<Node>,
        end: Option<Node>,
    },
}

/// An HTML attribute or event handler pair.
#[derive(Clone, Debug, PartialEq)]
pub struct HtmlAttribute {
    pub name: Token,
    pub value: Node,
}
