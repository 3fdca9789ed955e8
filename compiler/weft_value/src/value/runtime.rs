//! Behavior-carrying runtime values: functions, classes, instances, enums,
//! tags, and HTML fragments.
//!
//! Class member tables here are already *flat*: the evaluator folds the
//! parent's table into the child's at class-definition time (applying
//! override and visibility rules once), so member access never walks an
//! inheritance chain at runtime. `parent` is kept for `instanceof` and for
//! `super(...)` constructor forwarding only.

use crate::{Context, Shared, Value};
use rustc_hash::FxHashMap;
use std::fmt;
use std::rc::Rc;
use weft_ir::{Argument, Node, TagProp, TagState, Visibility};

/// A user-defined function or method.
///
/// Holds its defining [`Context`] so the body observes later mutation of
/// outer bindings.
#[derive(Clone)]
pub struct FunctionValue {
    pub name: Option<String>,
    pub args: Vec<Argument>,
    pub body: Node,
    /// Arrow form: the body expression's value is the implicit return.
    pub should_auto_return: bool,
    pub closure: Context,
}

// Shallow by hand: the closure links back into scopes that may themselves
// hold this function, so a derived Debug would recurse forever.
impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("arity", &self.args.len())
            .field("should_auto_return", &self.should_auto_return)
            .finish_non_exhaustive()
    }
}

/// One instance-property slot in a class's flat member table.
#[derive(Clone, Debug)]
pub struct PropertyDef {
    /// Seed value, evaluated once at class-definition time and cloned into
    /// each new instance.
    pub value: Value,
    pub visibility: Visibility,
    /// Name of the class that declared this slot; `private` access is
    /// limited to that class's own bodies.
    pub owner: String,
}

/// One method, getter, or setter slot in a class's flat member table.
#[derive(Clone, Debug)]
pub struct MethodDef {
    pub func: Rc<FunctionValue>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Name of the class that declared this slot.
    pub owner: String,
    /// Parent of the declaring class at declaration time; `super(...)`
    /// inside this method forwards here. Points upward only, so no
    /// reference cycle.
    pub super_target: Option<Rc<ClassValue>>,
}

/// A static member: shared per class, mutable at runtime.
#[derive(Clone, Debug)]
pub struct StaticMember {
    pub value: Value,
    pub visibility: Visibility,
    pub owner: String,
}

/// A class definition after member-table folding.
#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    /// For `instanceof` and `super(...)`; member lookup never walks this.
    pub parent: Option<Rc<ClassValue>>,
    /// Instance properties in seed order, inherited slots first.
    pub properties: Vec<(String, PropertyDef)>,
    pub methods: FxHashMap<String, MethodDef>,
    pub getters: FxHashMap<String, MethodDef>,
    pub setters: FxHashMap<String, MethodDef>,
    pub statics: Shared<FxHashMap<String, StaticMember>>,
}

impl ClassValue {
    /// Whether this class is `other` or inherits from it.
    pub fn derives_from(&self, other: &Rc<ClassValue>) -> bool {
        if std::ptr::eq(self, Rc::as_ptr(other)) {
            return true;
        }
        let mut cursor = self.parent.clone();
        while let Some(class) = cursor {
            if Rc::ptr_eq(&class, other) {
                return true;
            }
            cursor = class.parent.clone();
        }
        false
    }

    /// Whether this class is `other` or inherits from it, by name.
    pub fn named_derives_from(&self, other: &str) -> bool {
        if self.name == other {
            return true;
        }
        let mut cursor = self.parent.clone();
        while let Some(class) = cursor {
            if class.name == other {
                return true;
            }
            cursor = class.parent.clone();
        }
        false
    }

    /// The constructor reachable on this class (own or inherited).
    pub fn constructor(&self) -> Option<&MethodDef> {
        self.methods
            .get("constructor")
            .filter(|def| !def.is_static)
    }
}

/// A class instance: shared mutable field map plus its class.
#[derive(Clone, Debug)]
pub struct InstanceValue {
    pub class: Rc<ClassValue>,
    pub fields: Shared<FxHashMap<String, Value>>,
}

impl InstanceValue {
    /// A new instance seeded from the class's flat property table.
    pub fn new(class: Rc<ClassValue>) -> Self {
        let mut fields = FxHashMap::default();
        for (name, prop) in &class.properties {
            fields.insert(name.clone(), prop.value.clone());
        }
        InstanceValue {
            class,
            fields: Shared::new(fields),
        }
    }
}

/// An enum definition: auto-numbered constant members.
#[derive(Clone, Debug)]
pub struct EnumValue {
    pub name: String,
    /// Declaration order; values are 0, 1, 2, ...
    pub members: Vec<(String, f64)>,
}

impl EnumValue {
    pub fn member(&self, name: &str) -> Option<f64> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| *value)
    }
}

/// A tag definition: a class-like template rendering to HTML.
///
/// Props are supplied externally at instantiation; states are internal and
/// mutable. Default expressions stay as nodes and are evaluated per
/// instantiation, in the tag's own scope.
#[derive(Clone)]
pub struct TagValue {
    pub name: String,
    pub props: Vec<TagProp>,
    pub states: Vec<TagState>,
    /// `FuncDef` nodes; `render` produces the instance's HTML tree.
    pub methods: Vec<Node>,
    pub closure: Context,
}

impl fmt::Debug for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagValue")
            .field("name", &self.name)
            .field("props", &self.props.len())
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}

/// An HTML element or fragment.
#[derive(Clone, Debug, Default)]
pub struct HtmlValue {
    /// `None` denotes a fragment: children render with no wrapping element.
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub id: Option<String>,
    pub attributes: Vec<(String, Value)>,
    pub events: Vec<(String, Value)>,
    pub children: Vec<Value>,
}

impl fmt::Display for HtmlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(tag) = &self.tag else {
            for child in &self.children {
                write!(f, "{child}")?;
            }
            return Ok(());
        };
        write!(f, "<{tag}")?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", self.classes.join(" "))?;
        }
        if let Some(id) = &self.id {
            write!(f, " id=\"{id}\"")?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"{value}\"")?;
        }
        for (name, value) in &self.events {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">")?;
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{tag}>")
    }
}
