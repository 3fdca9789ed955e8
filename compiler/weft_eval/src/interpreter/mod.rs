//! The tree-walking interpreter.
//!
//! One dispatch arm per node variant; the match is exhaustive, so adding a
//! syntactic form without deciding its semantics is a compile error. Child
//! nodes are always evaluated left to right, and every composite arm stops
//! at the first halting sub-result (`?` on the [`Signal`] carrier).

use std::rc::Rc;

use weft_ir::{Node, NodeKind, Token};
use weft_value::{
    already_declared, immutable_assignment, malformed_node, type_mismatch, undefined_variable,
    AssignError, ClassValue, Context, EvalResult, InstanceValue, Mutability, RuntimeError, Signal,
    Value,
};

use crate::exec::{access, call, class, control, html, operators, tag};

/// Attach a node's span to an error and lift it into the carrier.
pub(crate) fn fail(node: &Node, err: RuntimeError) -> Signal {
    Signal::Error(err.at(&node.pos_start, &node.pos_end))
}

/// Read the textual payload of a name token.
pub(crate) fn token_name<'t>(tok: &'t Token, node: &Node) -> Result<&'t str, Signal> {
    tok.text()
        .ok_or_else(|| fail(node, malformed_node("expected a name token")))
}

/// Advisory declared-type check, applied at assignment time only.
///
/// `none` is accepted by every annotation; instances match their class name
/// or any ancestor's.
pub(crate) fn check_declared_type(
    declared: Option<&str>,
    value: &Value,
) -> Result<(), RuntimeError> {
    let Some(declared) = declared else {
        return Ok(());
    };
    if declared == "any" || value.is_none() || value.type_name() == declared {
        return Ok(());
    }
    if let Value::Instance(instance) = value {
        if instance.class.named_derives_from(declared) {
            return Ok(());
        }
    }
    Err(type_mismatch(declared, value.type_name()))
}

/// One class body currently executing: governs visibility checks and
/// `super(...)` resolution.
pub(crate) struct ClassFrame {
    /// Name of the class that declared the running method; `private`
    /// access is limited to it.
    pub class_name: String,
    /// Receiver, absent in static methods.
    pub instance: Option<InstanceValue>,
    /// Where `super(...)` forwards, when the declaring class has a parent.
    pub super_target: Option<Rc<ClassValue>>,
    /// Whether the running method is a constructor; only constructor
    /// frames may forward to `super(...)`.
    pub is_constructor: bool,
    /// Set once the constructor has forwarded to its parent.
    pub super_called: bool,
}

/// The evaluator.
#[derive(Default)]
pub struct Interpreter {
    pub(crate) frames: Vec<ClassFrame>,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter::default()
    }

    /// Evaluate a whole program, converting any leaked signal into the
    /// error the top-level caller presents.
    pub fn run(&mut self, node: &Node, ctx: &Context) -> Result<Value, RuntimeError> {
        self.eval(node, ctx).map_err(Signal::into_error)
    }

    pub(crate) fn current_frame(&self) -> Option<&ClassFrame> {
        self.frames.last()
    }

    /// Evaluate one node.
    pub fn eval(&mut self, node: &Node, ctx: &Context) -> EvalResult {
        match &node.kind {
            // Literals
            NodeKind::Number(n) => Ok(Value::Number(*n)),
            NodeKind::Str { value, .. } => Ok(Value::string(value.clone())),
            NodeKind::Bool { state, .. } => Ok(Value::Bool(*state)),
            NodeKind::NoneLiteral => Ok(Value::None),

            // Operators
            NodeKind::Binary { op, lhs, rhs } => {
                operators::eval_binary(self, *op, lhs, rhs, ctx, node)
            }
            NodeKind::And { lhs, rhs } => operators::eval_and(self, lhs, rhs, ctx),
            NodeKind::Or { lhs, rhs } => operators::eval_or(self, lhs, rhs, ctx),
            NodeKind::Nullish { lhs, rhs } => operators::eval_nullish(self, lhs, rhs, ctx),
            NodeKind::Unary { op, operand } => {
                operators::eval_unary(self, *op, operand, ctx, node)
            }
            NodeKind::Prefix { target, difference } => {
                access::eval_step(self, target, *difference, access::StepOrder::Prefix, ctx, node)
            }
            NodeKind::Postfix { target, difference } => {
                access::eval_step(self, target, *difference, access::StepOrder::Postfix, ctx, node)
            }

            // Short-circuit compound assignment
            NodeKind::NullishAssign { target, value } => {
                access::eval_compound(self, access::Compound::Nullish, target, value, ctx, node)
            }
            NodeKind::AndAssign { target, value } => {
                access::eval_compound(self, access::Compound::And, target, value, ctx, node)
            }
            NodeKind::OrAssign { target, value } => {
                access::eval_compound(self, access::Compound::Or, target, value, ctx, node)
            }

            // Variable lifecycle
            NodeKind::VarAssign {
                name,
                value,
                declared_type,
            } => self.eval_declaration(name, value, declared_type.as_deref(), Mutability::Mutable, ctx, node),
            NodeKind::Define {
                name,
                value,
                declared_type,
            } => self.eval_declaration(name, value, declared_type.as_deref(), Mutability::Immutable, ctx, node),
            NodeKind::VarAccess { name } => {
                let name = token_name(name, node)?;
                ctx.lookup(name)
                    .ok_or_else(|| fail(node, undefined_variable(name)))
            }
            NodeKind::VarModify { name, value } => self.eval_var_modify(name, value, ctx, node),
            NodeKind::Delete { target } => access::eval_delete(self, target, ctx, node),

            // Collections
            NodeKind::List { elements } => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval(element, ctx)?);
                }
                Ok(Value::list(items))
            }
            NodeKind::Dictionary { entries } => self.eval_dictionary(entries, ctx, node),
            NodeKind::ListAccess { target, selectors } => {
                access::eval_list_access(self, target, selectors, ctx, node)
            }
            NodeKind::ListAssign { access: target, value } => {
                access::eval_list_assign(self, target, value, ctx, node)
            }
            NodeKind::ListPushBrackets { .. } => Err(fail(
                node,
                malformed_node("list append target outside of an assignment"),
            )),

            // Control flow
            NodeKind::If {
                cases,
                else_case,
                should_return_null,
                prevent_null_return,
            } => control::eval_if(
                self,
                cases,
                else_case.as_deref(),
                *should_return_null,
                *prevent_null_return,
                ctx,
            ),
            NodeKind::For {
                var,
                start,
                end,
                step,
                body,
                should_return_null,
                prevent_null_return,
            } => control::eval_for(
                self,
                var,
                start.as_deref(),
                end,
                step.as_deref(),
                body,
                *should_return_null,
                *prevent_null_return,
                ctx,
                node,
            ),
            NodeKind::Foreach {
                iterable,
                key,
                value,
                body,
                should_return_null,
                prevent_null_return,
            } => control::eval_foreach(
                self,
                iterable,
                key.as_ref(),
                value,
                body,
                *should_return_null,
                *prevent_null_return,
                ctx,
                node,
            ),
            NodeKind::While {
                condition,
                body,
                should_return_null,
            } => control::eval_while(self, condition, body, *should_return_null, ctx),
            NodeKind::Switch {
                subject,
                cases,
                default_case,
            } => control::eval_switch(self, subject, cases, default_case.as_deref(), ctx),
            NodeKind::Break => Err(Signal::Break),
            NodeKind::Continue => Err(Signal::Continue),
            NodeKind::Return { value } => {
                let value = match value {
                    Some(value) => self.eval(value, ctx)?,
                    None => Value::None,
                };
                Err(Signal::Return(value))
            }
            NodeKind::Statements { body } => control::eval_statements(self, body, ctx),

            // Functions
            NodeKind::FuncDef {
                name,
                args,
                body,
                should_auto_return,
            } => call::eval_func_def(self, name.as_ref(), args, body, *should_auto_return, ctx, node),
            NodeKind::Call {
                callee,
                args,
                is_optional,
            } => call::eval_call(self, callee, args, *is_optional, ctx, node),

            // Object model
            NodeKind::ClassDef {
                name,
                parent,
                properties,
                methods,
                getters,
                setters,
            } => class::eval_class_def(
                self, name, parent.as_ref(), properties, methods, getters, setters, ctx, node,
            ),
            NodeKind::ClassCall { name, args } => class::eval_class_call(self, name, args, ctx, node),
            NodeKind::CallProperty {
                target,
                property,
                is_optional,
            } => class::eval_property_access(self, target, property, *is_optional, ctx, node),
            NodeKind::CallStaticProperty {
                target,
                property,
                is_optional,
            } => class::eval_static_access(self, target, property, *is_optional, ctx, node),
            // The inner call already carries the receiver access and the
            // optional flag; the wrapper adds no behavior of its own.
            NodeKind::CallMethod { call, .. } => self.eval(call, ctx),
            NodeKind::AssignProperty { access: target, value } => {
                class::eval_assign_property(self, target, value, ctx, node)
            }
            NodeKind::Super { args } => class::eval_super(self, args, ctx, node),
            NodeKind::Instanceof { target, class_name } => {
                class::eval_instanceof(self, target, class_name, ctx, node)
            }

            // Tags and enums
            NodeKind::TagDef {
                name,
                props,
                states,
                methods,
            } => tag::eval_tag_def(self, name, props, states, methods, ctx, node),
            NodeKind::EnumDef { name, members } => class::eval_enum_def(self, name, members, ctx, node),

            // HTML
            NodeKind::Html {
                tag,
                classes,
                id,
                attributes,
                events,
                children,
            } => html::eval_html(
                self,
                tag.as_ref(),
                classes,
                id.as_ref(),
                attributes,
                events,
                children,
                ctx,
                node,
            ),
        }
    }

    fn eval_declaration(
        &mut self,
        name: &Token,
        value: &Node,
        declared_type: Option<&str>,
        mutability: Mutability,
        ctx: &Context,
        node: &Node,
    ) -> EvalResult {
        let value = self.eval(value, ctx)?;
        check_declared_type(declared_type, &value).map_err(|e| fail(node, e))?;
        let name = token_name(name, node)?;
        ctx.declare(name, value.clone(), mutability)
            .map_err(|_| fail(node, already_declared(name)))?;
        Ok(value)
    }

    fn eval_var_modify(
        &mut self,
        name: &Token,
        value: &Node,
        ctx: &Context,
        node: &Node,
    ) -> EvalResult {
        let value = self.eval(value, ctx)?;
        let name = token_name(name, node)?;
        match ctx.assign(name, value.clone()) {
            Ok(()) => Ok(value),
            Err(AssignError::Immutable) => Err(fail(node, immutable_assignment(name))),
            Err(AssignError::Undefined) => Err(fail(node, undefined_variable(name))),
        }
    }

    fn eval_dictionary(
        &mut self,
        entries: &[(Node, Node)],
        ctx: &Context,
        node: &Node,
    ) -> EvalResult {
        let mut pairs: Vec<(String, Value)> = Vec::with_capacity(entries.len());
        for (key_node, value_node) in entries {
            let NodeKind::Str { value: key, .. } = &key_node.kind else {
                return Err(fail(
                    node,
                    malformed_node("dictionary keys must be string literals"),
                ));
            };
            let value = self.eval(value_node, ctx)?;
            match pairs.iter_mut().find(|(k, _)| k == key) {
                Some((_, slot)) => *slot = value,
                None => pairs.push((key.clone(), value)),
            }
        }
        Ok(Value::dict(pairs))
    }
}
