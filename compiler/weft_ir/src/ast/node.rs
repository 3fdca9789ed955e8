//! The AST node catalog.
//!
//! One closed sum type covers every syntactic form the parser can produce.
//! Each node owns its children (boxed, not arena-indexed: nodes here are
//! built once by the parser and walked by the evaluator, with no
//! incremental-reuse consumer) and carries independent copies of the
//! positions spanning its source text.

use super::members::{
    Argument, ClassMethod, ClassProperty, HtmlAttribute, IfCase, IndexSelector, SwitchCase,
    TagProp, TagState,
};
use super::operators::{BinaryOp, UnaryOp};
use crate::{Position, Token};

/// An AST element: a syntactic form plus its source span.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub pos_start: Position,
    pub pos_end: Position,
}

impl Node {
    pub fn new(kind: NodeKind, pos_start: Position, pos_end: Position) -> Self {
        Node {
            kind,
            pos_start,
            pos_end,
        }
    }

    /// Re-span this node.
    ///
    /// Used when a node is reinterpreted in a wider syntactic context, e.g.
    /// an expression later wrapped into an assignment target.
    pub fn set_pos(&mut self, pos_start: Position, pos_end: Position) {
        self.pos_start = pos_start;
        self.pos_end = pos_end;
    }

    /// Box this node as a child of another.
    #[must_use]
    pub fn boxed(self) -> Box<Node> {
        Box::new(self)
    }
}

/// Every syntactic form of the language.
///
/// Grouped as in the grammar: literals, operators, variables, collections,
/// control flow, functions, the object model, tags/enums, and HTML trees.
/// Adding a variant without handling it in the evaluator is a compile
/// error (exhaustive match).
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // --- Literals ---
    Number(f64),
    Str {
        value: String,
        /// Carried from the token: adjacent literal may merge with this one.
        allows_concat: bool,
    },
    Bool {
        state: bool,
        display_name: String,
    },
    NoneLiteral,

    // --- Operators ---
    /// Eager binary operation; span = lhs.start..rhs.end.
    Binary {
        op: BinaryOp,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    /// `a and b` — rhs evaluated only when lhs is truthy.
    And { lhs: Box<Node>, rhs: Box<Node> },
    /// `a or b` — rhs evaluated only when lhs is falsy.
    Or { lhs: Box<Node>, rhs: Box<Node> },
    /// `a ?? b` — rhs evaluated only when lhs is `none`.
    Nullish { lhs: Box<Node>, rhs: Box<Node> },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
    },
    /// `++x` / `--x` (and repeated forms). Mutates, then yields the new value.
    ///
    /// `difference`: magnitude = repetition count, sign = increment vs
    /// decrement.
    Prefix {
        target: Box<Node>,
        difference: i64,
    },
    /// `x++` / `x--`. Yields the prior value, then mutates.
    Postfix {
        target: Box<Node>,
        difference: i64,
    },

    // --- Short-circuit compound assignment ---
    /// `target ??= value` — assigns only when target is `none`.
    NullishAssign {
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `target &&= value` — assigns only when target is truthy.
    AndAssign {
        target: Box<Node>,
        value: Box<Node>,
    },
    /// `target ||= value` — assigns only when target is falsy.
    OrAssign {
        target: Box<Node>,
        value: Box<Node>,
    },

    // --- Variable lifecycle ---
    /// `var name = value` — declares a mutable binding in the current scope.
    VarAssign {
        name: Token,
        value: Box<Node>,
        declared_type: Option<String>,
    },
    VarAccess { name: Token },
    /// `name = value` — mutates an existing binding wherever it lives.
    VarModify {
        name: Token,
        value: Box<Node>,
    },
    /// `define name = value` — declares an immutable binding.
    Define {
        name: Token,
        value: Box<Node>,
        declared_type: Option<String>,
    },
    /// `delete target` — removes a binding or an indexed element.
    Delete { target: Box<Node> },

    // --- Collections ---
    List { elements: Vec<Node> },
    /// Key nodes are always `Str` literals.
    Dictionary { entries: Vec<(Node, Node)> },
    /// Chained or multi-dimensional read: `a[0]`, `grid[1][2]`, `xs[1:3]`.
    ListAccess {
        target: Box<Node>,
        selectors: Vec<IndexSelector>,
    },
    /// `access = value` where access is a `ListAccess` or `ListPushBrackets`.
    ListAssign {
        access: Box<Node>,
        value: Box<Node>,
    },
    /// `list[]` append marker; only valid as an assignment target.
    ListPushBrackets { target: Box<Node> },

    // --- Control flow ---
    If {
        cases: Vec<IfCase>,
        else_case: Option<Box<Node>>,
        /// Statement form: the construct's value is discarded.
        should_return_null: bool,
        /// Inside an HTML tree: produce nothing rather than a placeholder.
        prevent_null_return: bool,
    },
    For {
        var: Token,
        /// Defaults to 0 when absent.
        start: Option<Box<Node>>,
        end: Box<Node>,
        /// Defaults to 1 when absent.
        step: Option<Box<Node>>,
        body: Box<Node>,
        should_return_null: bool,
        prevent_null_return: bool,
    },
    Foreach {
        iterable: Box<Node>,
        /// List index or dictionary key, bound when named.
        key: Option<Token>,
        value: Token,
        body: Box<Node>,
        should_return_null: bool,
        prevent_null_return: bool,
    },
    While {
        condition: Box<Node>,
        body: Box<Node>,
        should_return_null: bool,
    },
    Switch {
        subject: Box<Node>,
        cases: Vec<SwitchCase>,
        default_case: Option<Box<Node>>,
    },
    Break,
    Continue,
    Return { value: Option<Box<Node>> },
    /// Ordered statement sequence; also the root node of a program.
    Statements { body: Vec<Node> },

    // --- Functions ---
    FuncDef {
        name: Option<Token>,
        args: Vec<Argument>,
        body: Box<Node>,
        /// Arrow form: the body expression's value is the implicit return.
        should_auto_return: bool,
    },
    Call {
        callee: Box<Node>,
        args: Vec<Node>,
        /// `f?.()` — short-circuits to `none` on a `none` callee.
        is_optional: bool,
    },

    // --- Object model ---
    ClassDef {
        name: Token,
        parent: Option<Token>,
        properties: Vec<ClassProperty>,
        methods: Vec<ClassMethod>,
        getters: Vec<ClassMethod>,
        setters: Vec<ClassMethod>,
    },
    /// `new Name(args)`
    ClassCall {
        name: Token,
        args: Vec<Node>,
    },
    /// `target.property` (`?.` when optional).
    CallProperty {
        target: Box<Node>,
        property: Token,
        is_optional: bool,
    },
    /// `Target::property` (`?::` when optional).
    CallStaticProperty {
        target: Box<Node>,
        property: Token,
        is_optional: bool,
    },
    /// A method invocation: `call` is the `Call`, `origin` the receiver
    /// access it was parsed from.
    CallMethod {
        call: Box<Node>,
        origin: Box<Node>,
        is_optional: bool,
    },
    /// `target.property = value` — `access` is a `CallProperty` or
    /// `CallStaticProperty`.
    AssignProperty {
        access: Box<Node>,
        value: Box<Node>,
    },
    /// `super(args)` inside a constructor.
    Super { args: Vec<Node> },
    /// `target instanceof ClassName`
    Instanceof {
        target: Box<Node>,
        class_name: Token,
    },

    // --- Tags and enums ---
    TagDef {
        name: Token,
        props: Vec<TagProp>,
        states: Vec<TagState>,
        /// `FuncDef` nodes; `render` produces the instance's HTML tree.
        methods: Vec<Node>,
    },
    /// Members become auto-numbered constants, 0 upward.
    EnumDef {
        name: Token,
        members: Vec<Token>,
    },

    // --- HTML ---
    /// `tag = None` denotes a fragment with no wrapping element.
    Html {
        tag: Option<Token>,
        classes: Vec<Token>,
        id: Option<Token>,
        attributes: Vec<HtmlAttribute>,
        events: Vec<HtmlAttribute>,
        children: Vec<Node>,
    },
}

impl NodeKind {
    /// Short name of this syntactic form, for diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            NodeKind::Number(_) => "number literal",
            NodeKind::Str { .. } => "string literal",
            NodeKind::Bool { .. } => "boolean literal",
            NodeKind::NoneLiteral => "none",
            NodeKind::Binary { .. } => "binary operation",
            NodeKind::And { .. } => "logical and",
            NodeKind::Or { .. } => "logical or",
            NodeKind::Nullish { .. } => "nullish coalescing",
            NodeKind::Unary { .. } => "unary operation",
            NodeKind::Prefix { .. } => "prefix operation",
            NodeKind::Postfix { .. } => "postfix operation",
            NodeKind::NullishAssign { .. } => "nullish assignment",
            NodeKind::AndAssign { .. } => "and-assignment",
            NodeKind::OrAssign { .. } => "or-assignment",
            NodeKind::VarAssign { .. } => "variable declaration",
            NodeKind::VarAccess { .. } => "variable access",
            NodeKind::VarModify { .. } => "variable assignment",
            NodeKind::Define { .. } => "constant declaration",
            NodeKind::Delete { .. } => "delete",
            NodeKind::List { .. } => "list literal",
            NodeKind::Dictionary { .. } => "dictionary literal",
            NodeKind::ListAccess { .. } => "index access",
            NodeKind::ListAssign { .. } => "index assignment",
            NodeKind::ListPushBrackets { .. } => "list append target",
            NodeKind::If { .. } => "if",
            NodeKind::For { .. } => "for loop",
            NodeKind::Foreach { .. } => "foreach loop",
            NodeKind::While { .. } => "while loop",
            NodeKind::Switch { .. } => "switch",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::Return { .. } => "return",
            NodeKind::Statements { .. } => "statement sequence",
            NodeKind::FuncDef { .. } => "function definition",
            NodeKind::Call { .. } => "call",
            NodeKind::ClassDef { .. } => "class definition",
            NodeKind::ClassCall { .. } => "class instantiation",
            NodeKind::CallProperty { .. } => "property access",
            NodeKind::CallStaticProperty { .. } => "static property access",
            NodeKind::CallMethod { .. } => "method call",
            NodeKind::AssignProperty { .. } => "property assignment",
            NodeKind::Super { .. } => "super call",
            NodeKind::Instanceof { .. } => "instanceof",
            NodeKind::TagDef { .. } => "tag definition",
            NodeKind::EnumDef { .. } => "enum definition",
            NodeKind::Html { .. } => "html element",
        }
    }
}
