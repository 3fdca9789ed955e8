//! The object model: classes, instances, statics, enums.
//!
//! Member tables are folded flat at class-definition time: a child starts
//! from copies of its parent's tables and applies its own declarations on
//! top, with `override` required to replace an inherited slot. Member
//! access therefore never walks the inheritance chain; `parent` survives
//! only for `instanceof` and `super(...)`.
//!
//! Visibility is enforced against the interpreter's class-frame stack:
//! `private` members open up only inside bodies of their declaring class,
//! `protected` also inside bodies of its subclasses.

use std::rc::Rc;

use weft_ir::{ClassMethod, ClassProperty, Node, NodeKind, Token, Visibility};
use weft_value::{
    already_declared, invalid_lvalue, invalid_override, malformed_node, not_callable,
    super_call_missing, too_many_arguments, type_mismatch, undefined_member, undefined_property,
    undefined_variable, visibility_violation, ClassValue, Context, EnumValue, EvalResult,
    FunctionValue, InstanceValue, MethodDef, Mutability, PropertyDef, Shared, Signal,
    StaticMember, Value,
};

use crate::exec::call;
use crate::interpreter::{check_declared_type, fail, token_name, ClassFrame, Interpreter};

// --- Definition ---

#[allow(clippy::too_many_arguments)]
pub fn eval_class_def(
    it: &mut Interpreter,
    name: &Token,
    parent: Option<&Token>,
    properties: &[ClassProperty],
    methods: &[ClassMethod],
    getters: &[ClassMethod],
    setters: &[ClassMethod],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let class_name = token_name(name, node)?.to_string();
    let parent = match parent {
        Some(parent) => {
            let parent_name = token_name(parent, node)?;
            match ctx.lookup(parent_name) {
                Some(Value::Class(class)) => Some(class),
                Some(other) => {
                    return Err(fail(node, type_mismatch("class", other.type_name())));
                }
                None => return Err(fail(node, undefined_variable(parent_name))),
            }
        }
        None => None,
    };

    // Start from the parent's flat tables and fold the new declarations in.
    let mut property_table: Vec<(String, PropertyDef)> = parent
        .as_ref()
        .map(|p| p.properties.clone())
        .unwrap_or_default();
    let mut method_table = parent.as_ref().map(|p| p.methods.clone()).unwrap_or_default();
    let mut getter_table = parent.as_ref().map(|p| p.getters.clone()).unwrap_or_default();
    let mut setter_table = parent.as_ref().map(|p| p.setters.clone()).unwrap_or_default();
    let mut static_table = parent
        .as_ref()
        .map(|p| p.statics.borrow().clone())
        .unwrap_or_default();

    for prop in properties {
        let prop_name = token_name(&prop.name, node)?.to_string();
        let value = it.eval(&prop.value, ctx)?;
        check_declared_type(prop.declared_type.as_deref(), &value).map_err(|e| fail(node, e))?;
        if prop.is_static {
            static_table.insert(
                prop_name,
                StaticMember {
                    value,
                    visibility: prop.visibility,
                    owner: class_name.clone(),
                },
            );
            continue;
        }
        let inherited = property_table.iter_mut().find(|(n, _)| *n == prop_name);
        if prop.is_override != inherited.is_some() {
            return Err(fail(node, invalid_override(prop_name)));
        }
        let def = PropertyDef {
            value,
            visibility: prop.visibility,
            owner: class_name.clone(),
        };
        match inherited {
            Some((_, slot)) => *slot = def,
            None => property_table.push((prop_name, def)),
        }
    }

    for (declared, table) in [
        (methods, &mut method_table),
        (getters, &mut getter_table),
        (setters, &mut setter_table),
    ] {
        for method in declared {
            let NodeKind::FuncDef {
                name: func_name,
                args,
                body,
                should_auto_return,
            } = &method.func.kind
            else {
                return Err(fail(node, malformed_node("class method without a function body")));
            };
            let Some(method_name) = func_name.as_ref().and_then(Token::text) else {
                return Err(fail(node, malformed_node("class method without a name")));
            };
            // A constructor always replaces the inherited one.
            if method_name != "constructor" && method.is_override != table.contains_key(method_name)
            {
                return Err(fail(node, invalid_override(method_name)));
            }
            let func = Rc::new(FunctionValue {
                name: Some(method_name.to_string()),
                args: args.clone(),
                body: (**body).clone(),
                should_auto_return: *should_auto_return,
                closure: ctx.clone(),
            });
            table.insert(
                method_name.to_string(),
                MethodDef {
                    func,
                    visibility: method.visibility,
                    is_static: method.is_static,
                    owner: class_name.clone(),
                    super_target: parent.clone(),
                },
            );
        }
    }

    let class = Value::Class(Rc::new(ClassValue {
        name: class_name.clone(),
        parent,
        properties: property_table,
        methods: method_table,
        getters: getter_table,
        setters: setter_table,
        statics: Shared::new(static_table),
    }));
    ctx.declare(&class_name, class.clone(), Mutability::Immutable)
        .map_err(|_| fail(node, already_declared(class_name)))?;
    Ok(class)
}

pub fn eval_enum_def(
    _it: &mut Interpreter,
    name: &Token,
    members: &[Token],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let enum_name = token_name(name, node)?.to_string();
    let mut numbered = Vec::with_capacity(members.len());
    for (ordinal, member) in members.iter().enumerate() {
        numbered.push((token_name(member, node)?.to_string(), ordinal as f64));
    }
    let value = Value::Enum(Rc::new(EnumValue {
        name: enum_name.clone(),
        members: numbered,
    }));
    ctx.declare(&enum_name, value.clone(), Mutability::Immutable)
        .map_err(|_| fail(node, already_declared(enum_name)))?;
    Ok(value)
}

// --- Instantiation ---

pub fn eval_class_call(
    it: &mut Interpreter,
    name: &Token,
    args: &[Node],
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let class_name = token_name(name, node)?;
    let class = match ctx.lookup(class_name) {
        Some(Value::Class(class)) => class,
        Some(other) => return Err(fail(node, type_mismatch("class", other.type_name()))),
        None => return Err(fail(node, undefined_variable(class_name))),
    };
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(it.eval(arg, ctx)?);
    }
    let instance = InstanceValue::new(class);
    invoke_constructor(it, &instance, values, node)?;
    Ok(Value::Instance(instance))
}

/// Run the instance's (possibly inherited) constructor and enforce the
/// `super(...)` obligation on it.
fn invoke_constructor(
    it: &mut Interpreter,
    instance: &InstanceValue,
    args: Vec<Value>,
    node: &Node,
) -> Result<(), Signal> {
    let Some(ctor) = instance.class.constructor().cloned() else {
        if args.is_empty() {
            return Ok(());
        }
        return Err(fail(node, too_many_arguments(0, args.len())));
    };
    let (_, super_called) = run_method(it, &ctor, Some(instance.clone()), args, true, node)?;
    if let Some(parent) = &ctor.super_target {
        if parent.constructor().is_some() && !super_called {
            return Err(fail(node, super_call_missing(ctor.owner)));
        }
    }
    Ok(())
}

pub fn eval_super(it: &mut Interpreter, args: &[Node], ctx: &Context, node: &Node) -> EvalResult {
    // Only a constructor frame may forward; `super()` inside an ordinary
    // method would re-run the parent constructor on a live instance.
    let (parent, instance) = match it.frames.last_mut() {
        Some(frame) if frame.is_constructor => {
            frame.super_called = true;
            match (&frame.super_target, &frame.instance) {
                (Some(parent), Some(instance)) => (parent.clone(), instance.clone()),
                _ => {
                    return Err(fail(node, malformed_node("super() outside of a constructor")));
                }
            }
        }
        _ => return Err(fail(node, malformed_node("super() outside of a constructor"))),
    };
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(it.eval(arg, ctx)?);
    }
    let Some(ctor) = parent.constructor().cloned() else {
        if values.is_empty() {
            return Ok(Value::None);
        }
        return Err(fail(node, too_many_arguments(0, values.len())));
    };
    let (_, super_called) = run_method(it, &ctor, Some(instance), values, true, node)?;
    if let Some(grandparent) = &ctor.super_target {
        if grandparent.constructor().is_some() && !super_called {
            return Err(fail(node, super_call_missing(ctor.owner)));
        }
    }
    Ok(Value::None)
}

/// Execute a method with its class frame pushed. Returns the body's value
/// and whether the frame saw a `super(...)` call.
fn run_method(
    it: &mut Interpreter,
    method: &MethodDef,
    instance: Option<InstanceValue>,
    args: Vec<Value>,
    is_constructor: bool,
    node: &Node,
) -> Result<(Value, bool), Signal> {
    let scope = method.func.closure.child();
    if let Some(instance) = &instance {
        scope
            .declare("this", Value::Instance(instance.clone()), Mutability::Immutable)
            .map_err(|_| fail(node, malformed_node("receiver binding shadowed")))?;
    }
    it.frames.push(ClassFrame {
        class_name: method.owner.clone(),
        instance,
        super_target: method.super_target.clone(),
        is_constructor,
        super_called: false,
    });
    let result = call::call_in_scope(it, &method.func, args, &scope, node);
    let super_called = it.frames.pop().is_some_and(|frame| frame.super_called);
    Ok((result?, super_called))
}

fn call_accessor(
    it: &mut Interpreter,
    method: &MethodDef,
    instance: &InstanceValue,
    args: Vec<Value>,
    node: &Node,
) -> EvalResult {
    run_method(it, method, Some(instance.clone()), args, false, node).map(|(value, _)| value)
}

// --- Visibility ---

fn check_visibility(
    it: &Interpreter,
    member: &str,
    visibility: Visibility,
    owner: &str,
    receiver_class: &Rc<ClassValue>,
    node: &Node,
) -> Result<(), Signal> {
    let allowed = match visibility {
        Visibility::Public => true,
        Visibility::Private => it
            .current_frame()
            .is_some_and(|frame| frame.class_name == owner),
        Visibility::Protected => it.current_frame().is_some_and(|frame| {
            // The accessing class must appear in the receiver's chain and
            // itself derive from the declaring class.
            let mut cursor = Some(receiver_class.clone());
            while let Some(class) = cursor {
                if class.name == frame.class_name {
                    return class.named_derives_from(owner);
                }
                cursor = class.parent.clone();
            }
            false
        }),
    };
    if allowed {
        Ok(())
    } else {
        Err(fail(
            node,
            visibility_violation(member, visibility.as_keyword(), owner),
        ))
    }
}

// --- Property reads ---

/// Resolve a dot access on an already-evaluated receiver.
pub(crate) fn property_on_value(
    it: &mut Interpreter,
    target: &Value,
    property: &str,
    node: &Node,
) -> EvalResult {
    if let Some(length) = builtin_length(target) {
        if property == "length" {
            return Ok(Value::number(length));
        }
    }
    match target {
        Value::Instance(instance) => {
            if let Some(getter) = instance.class.getters.get(property).cloned() {
                check_visibility(it, property, getter.visibility, &getter.owner, &instance.class, node)?;
                return call_accessor(it, &getter, instance, Vec::new(), node);
            }
            if let Some((_, slot)) = instance
                .class
                .properties
                .iter()
                .find(|(name, _)| name == property)
            {
                check_visibility(it, property, slot.visibility, &slot.owner, &instance.class, node)?;
                let fields = instance.fields.borrow();
                return Ok(fields.get(property).cloned().unwrap_or(Value::None));
            }
            if let Some(method) = instance.class.methods.get(property) {
                if !method.is_static {
                    let method = method.clone();
                    check_visibility(
                        it,
                        property,
                        method.visibility,
                        &method.owner,
                        &instance.class,
                        node,
                    )?;
                    return Ok(bind_method(&method, instance, node)?);
                }
            }
            // Fields created by assignment rather than declaration.
            if let Some(value) = instance.fields.borrow().get(property) {
                return Ok(value.clone());
            }
            Err(fail(node, undefined_property(property, target)))
        }
        Value::Dict(entries) => entries
            .borrow()
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| fail(node, undefined_member(property, "dictionary"))),
        other => Err(fail(node, undefined_property(property, other))),
    }
}

/// Reading a method as a value yields a function with the receiver already
/// bound. Detached calls run without a class frame, so any private access
/// inside such a method fails like an outside access would.
fn bind_method(
    method: &MethodDef,
    instance: &InstanceValue,
    node: &Node,
) -> Result<Value, Signal> {
    let scope = method.func.closure.child();
    scope
        .declare("this", Value::Instance(instance.clone()), Mutability::Immutable)
        .map_err(|_| fail(node, malformed_node("receiver binding shadowed")))?;
    Ok(Value::Function(Rc::new(FunctionValue {
        name: method.func.name.clone(),
        args: method.func.args.clone(),
        body: method.func.body.clone(),
        should_auto_return: method.func.should_auto_return,
        closure: scope,
    })))
}

fn builtin_length(value: &Value) -> Option<f64> {
    match value {
        Value::Str(s) => Some(s.chars().count() as f64),
        Value::List(items) => Some(items.borrow().len() as f64),
        Value::Dict(entries) => Some(entries.borrow().len() as f64),
        _ => None,
    }
}

pub fn eval_property_access(
    it: &mut Interpreter,
    target: &Node,
    property: &Token,
    is_optional: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let target = it.eval(target, ctx)?;
    if is_optional && target.is_none() {
        return Ok(Value::None);
    }
    let property = token_name(property, node)?;
    property_on_value(it, &target, property, node)
}

pub fn eval_static_access(
    it: &mut Interpreter,
    target: &Node,
    property: &Token,
    is_optional: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let target = it.eval(target, ctx)?;
    if is_optional && target.is_none() {
        return Ok(Value::None);
    }
    let property = token_name(property, node)?;
    static_on_value(it, &target, property, node)
}

pub(crate) fn static_on_value(
    it: &mut Interpreter,
    target: &Value,
    property: &str,
    node: &Node,
) -> EvalResult {
    match target {
        Value::Enum(def) => def
            .member(property)
            .map(Value::number)
            .ok_or_else(|| fail(node, undefined_member(property, def.name.clone()))),
        Value::Class(class) => {
            if let Some(member) = class.statics.borrow().get(property).cloned() {
                check_visibility(it, property, member.visibility, &member.owner, class, node)?;
                return Ok(member.value);
            }
            if let Some(method) = class.methods.get(property) {
                if method.is_static {
                    let method = method.clone();
                    check_visibility(it, property, method.visibility, &method.owner, class, node)?;
                    return Ok(Value::Function(method.func));
                }
            }
            Err(fail(node, undefined_member(property, class.name.clone())))
        }
        other => Err(fail(node, type_mismatch("class or enum", other.type_name()))),
    }
}

// --- Method calls ---

pub fn eval_method_call(
    it: &mut Interpreter,
    target: &Node,
    property: &Token,
    args: &[Node],
    is_optional: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let target = it.eval(target, ctx)?;
    if is_optional && target.is_none() {
        return Ok(Value::None);
    }
    let property = token_name(property, node)?;
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(it.eval(arg, ctx)?);
    }
    if let Value::Instance(instance) = &target {
        if let Some(method) = instance.class.methods.get(property) {
            if !method.is_static {
                let method = method.clone();
                check_visibility(
                    it,
                    property,
                    method.visibility,
                    &method.owner,
                    &instance.class,
                    node,
                )?;
                return run_method(it, &method, Some(instance.clone()), values, false, node)
                    .map(|(value, _)| value);
            }
        }
    }
    // Fields or dictionary entries holding plain function values.
    let member = property_on_value(it, &target, property, node)?;
    let Value::Function(func) = member else {
        return Err(fail(node, not_callable(member.type_name())));
    };
    call::call_function(it, &func, values, node)
}

pub fn eval_static_call(
    it: &mut Interpreter,
    target: &Node,
    property: &Token,
    args: &[Node],
    is_optional: bool,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let target_value = it.eval(target, ctx)?;
    if is_optional && target_value.is_none() {
        return Ok(Value::None);
    }
    let property = token_name(property, node)?;
    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(it.eval(arg, ctx)?);
    }
    if let Value::Class(class) = &target_value {
        if let Some(method) = class.methods.get(property) {
            if method.is_static {
                let method = method.clone();
                check_visibility(it, property, method.visibility, &method.owner, class, node)?;
                return run_method(it, &method, None, values, false, node).map(|(value, _)| value);
            }
        }
    }
    let member = static_on_value(it, &target_value, property, node)?;
    let Value::Function(func) = member else {
        return Err(fail(node, not_callable(member.type_name())));
    };
    call::call_function(it, &func, values, node)
}

// --- Property writes ---

/// Write a dot-access member on an already-evaluated receiver.
pub(crate) fn write_property_on_value(
    it: &mut Interpreter,
    target: &Value,
    property: &str,
    value: Value,
    node: &Node,
) -> Result<(), Signal> {
    match target {
        Value::Instance(instance) => {
            if let Some(setter) = instance.class.setters.get(property).cloned() {
                check_visibility(it, property, setter.visibility, &setter.owner, &instance.class, node)?;
                call_accessor(it, &setter, instance, vec![value], node)?;
                return Ok(());
            }
            // A declared slot carries visibility; assignment to an
            // undeclared name creates a public field on this instance.
            if let Some((_, slot)) = instance
                .class
                .properties
                .iter()
                .find(|(name, _)| name == property)
            {
                check_visibility(it, property, slot.visibility, &slot.owner, &instance.class, node)?;
            }
            instance.fields.borrow_mut().insert(property.to_string(), value);
            Ok(())
        }
        Value::Dict(entries) => {
            let mut entries = entries.borrow_mut();
            match entries.iter_mut().find(|(key, _)| key == property) {
                Some((_, slot)) => *slot = value,
                None => entries.push((property.to_string(), value)),
            }
            Ok(())
        }
        other => Err(fail(node, invalid_lvalue(other.type_name()))),
    }
}

/// Write a `::` member on an already-evaluated class value.
pub(crate) fn write_static_on_value(
    it: &mut Interpreter,
    target: &Value,
    property: &str,
    value: Value,
    node: &Node,
) -> Result<(), Signal> {
    let Value::Class(class) = target else {
        return Err(fail(node, invalid_lvalue(target.type_name())));
    };
    let statics = class.statics.borrow_mut();
    let Some(member) = statics.get(property) else {
        return Err(fail(node, undefined_member(property, class.name.clone())));
    };
    let (visibility, owner) = (member.visibility, member.owner.clone());
    drop(statics);
    check_visibility(it, property, visibility, &owner, class, node)?;
    if let Some(member) = class.statics.borrow_mut().get_mut(property) {
        member.value = value;
    }
    Ok(())
}

pub fn eval_assign_property(
    it: &mut Interpreter,
    access: &Node,
    value: &Node,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let value = it.eval(value, ctx)?;
    match &access.kind {
        NodeKind::CallProperty {
            target, property, ..
        } => {
            let receiver = it.eval(target, ctx)?;
            let property = token_name(property, node)?;
            write_property_on_value(it, &receiver, property, value.clone(), node)?;
        }
        NodeKind::CallStaticProperty {
            target, property, ..
        } => {
            let receiver = it.eval(target, ctx)?;
            let property = token_name(property, node)?;
            write_static_on_value(it, &receiver, property, value.clone(), node)?;
        }
        other => return Err(fail(node, invalid_lvalue(other.describe()))),
    }
    Ok(value)
}

// --- instanceof ---

pub fn eval_instanceof(
    it: &mut Interpreter,
    target: &Node,
    class_name: &Token,
    ctx: &Context,
    node: &Node,
) -> EvalResult {
    let target = it.eval(target, ctx)?;
    let class_name = token_name(class_name, node)?;
    let class = match ctx.lookup(class_name) {
        Some(Value::Class(class)) => class,
        Some(other) => return Err(fail(node, type_mismatch("class", other.type_name()))),
        None => return Err(fail(node, undefined_variable(class_name))),
    };
    let result = match &target {
        Value::Instance(instance) => instance.class.derives_from(&class),
        _ => false,
    };
    Ok(Value::Bool(result))
}
