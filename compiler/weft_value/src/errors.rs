//! Runtime error object model.
//!
//! Every failure the evaluator or the value system can report is a typed
//! [`ErrorKind`] wrapped in a [`RuntimeError`] carrying optional source
//! positions. Formatting beyond `Display` (underlined excerpts, colors) is
//! a diagnostics concern outside this core.
//!
//! Factory functions are the public construction surface; callers match on
//! `kind` rather than parsing strings.

use crate::Value;
use weft_ir::Position;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),
    #[error("cannot assign to constant '{0}'")]
    ImmutableAssignment(String),
    #[error("'{0}' is already declared in this scope")]
    AlreadyDeclared(String),
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("value of type '{0}' is not callable")]
    NotCallable(String),
    #[error("value of type '{0}' cannot be indexed")]
    NotIndexable(String),
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("missing required argument '{0}'")]
    MissingArgument(String),
    #[error("expected at most {expected} arguments, got {got}")]
    TooManyArguments { expected: usize, got: usize },
    #[error("'{member}' is {visibility} on class '{class}'")]
    VisibilityViolation {
        member: String,
        visibility: String,
        class: String,
    },
    #[error("constructor of '{0}' must call super() because its parent defines a constructor")]
    SuperCallMissing(String),
    #[error("cannot assign to {0}")]
    InvalidLvalue(String),
    #[error("malformed node: {0}")]
    MalformedNode(String),
    #[error("no property '{property}' on {target}")]
    UndefinedProperty { property: String, target: String },
    #[error("no member '{member}' in {target}")]
    UndefinedMember { member: String, target: String },
    #[error("'{member}' can only override a parent member of the same kind")]
    InvalidOverride { member: String },
    #[error("cannot apply '{op}' to {left} and {right}")]
    InvalidBinaryOp {
        op: String,
        left: String,
        right: String,
    },
    #[error("cannot apply '{op}' to {operand}")]
    InvalidUnaryOp { op: String, operand: String },
    #[error("{0}")]
    Custom(String),
}

/// A runtime failure with optional source coordinates.
///
/// Positions are attached by the evaluator (which knows the failing node's
/// span); value-level operations construct position-less errors.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub pos_start: Option<Position>,
    pub pos_end: Option<Position>,
}

impl RuntimeError {
    pub fn new(kind: ErrorKind) -> Self {
        RuntimeError {
            kind,
            pos_start: None,
            pos_end: None,
        }
    }

    /// Attach source positions, keeping any already present.
    ///
    /// The first (innermost) span wins: a propagating error keeps the
    /// coordinates of the node that actually failed.
    #[must_use]
    pub fn at(mut self, pos_start: &Position, pos_end: &Position) -> Self {
        if self.pos_start.is_none() {
            self.pos_start = Some(pos_start.clone());
            self.pos_end = Some(pos_end.clone());
        }
        self
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(pos) = &self.pos_start {
            write!(f, " at {pos}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RuntimeError {}

// --- Factory functions ---

pub fn undefined_variable(name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::UndefinedVariable(name.into()))
}

pub fn immutable_assignment(name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::ImmutableAssignment(name.into()))
}

pub fn already_declared(name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::AlreadyDeclared(name.into()))
}

pub fn type_mismatch(expected: impl Into<String>, got: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::TypeMismatch {
        expected: expected.into(),
        got: got.into(),
    })
}

pub fn not_callable(type_name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::NotCallable(type_name.into()))
}

pub fn not_indexable(type_name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::NotIndexable(type_name.into()))
}

pub fn index_out_of_range(index: i64, len: usize) -> RuntimeError {
    RuntimeError::new(ErrorKind::IndexOutOfRange { index, len })
}

pub fn division_by_zero() -> RuntimeError {
    RuntimeError::new(ErrorKind::DivisionByZero)
}

pub fn missing_argument(name: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::MissingArgument(name.into()))
}

pub fn too_many_arguments(expected: usize, got: usize) -> RuntimeError {
    RuntimeError::new(ErrorKind::TooManyArguments { expected, got })
}

pub fn visibility_violation(
    member: impl Into<String>,
    visibility: impl Into<String>,
    class: impl Into<String>,
) -> RuntimeError {
    RuntimeError::new(ErrorKind::VisibilityViolation {
        member: member.into(),
        visibility: visibility.into(),
        class: class.into(),
    })
}

pub fn super_call_missing(class: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::SuperCallMissing(class.into()))
}

pub fn invalid_lvalue(described: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::InvalidLvalue(described.into()))
}

pub fn malformed_node(detail: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::MalformedNode(detail.into()))
}

pub fn undefined_property(property: impl Into<String>, target: &Value) -> RuntimeError {
    RuntimeError::new(ErrorKind::UndefinedProperty {
        property: property.into(),
        target: target.type_name().to_string(),
    })
}

pub fn undefined_member(member: impl Into<String>, target: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::UndefinedMember {
        member: member.into(),
        target: target.into(),
    })
}

pub fn invalid_binary_op(
    op: impl Into<String>,
    left: impl Into<String>,
    right: impl Into<String>,
) -> RuntimeError {
    RuntimeError::new(ErrorKind::InvalidBinaryOp {
        op: op.into(),
        left: left.into(),
        right: right.into(),
    })
}

pub fn invalid_unary_op(op: impl Into<String>, operand: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::InvalidUnaryOp {
        op: op.into(),
        operand: operand.into(),
    })
}

pub fn invalid_override(member: impl Into<String>) -> RuntimeError {
    RuntimeError::new(ErrorKind::InvalidOverride {
        member: member.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_position_when_attached() {
        let pos = Position::start("test.wf", "x");
        let err = undefined_variable("x").at(&pos, &pos);
        assert_eq!(err.to_string(), "variable 'x' is not defined at test.wf:1:1");
    }

    #[test]
    fn innermost_position_wins() {
        let inner = Position::start("inner.wf", "");
        let mut outer = Position::start("outer.wf", "");
        outer.advance('a');
        let err = division_by_zero().at(&inner, &inner).at(&outer, &outer);
        let start = err.pos_start.clone();
        assert_eq!(start.map(|p| p.filename.to_string()), Some("inner.wf".into()));
    }
}
