//! Primitive value operations.
//!
//! Direct enum-based dispatch for binary and unary operators, plus the
//! indexing/slicing/storing primitives the evaluator calls into. Every
//! invalid operand combination yields a typed [`RuntimeError`], never a
//! host-level fault.
//!
//! Short-circuit operators (`and`, `or`, `??`) are not here: the evaluator
//! owns them, because their right operand must not be evaluated eagerly.

use super::Value;
use crate::errors::{
    division_by_zero, index_out_of_range, invalid_binary_op, invalid_unary_op, not_indexable,
    type_mismatch, undefined_member, RuntimeError,
};
use weft_ir::{BinaryOp, UnaryOp};

/// Evaluate an eager binary operation.
pub fn binary_op(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    match op {
        BinaryOp::Add => add(lhs, rhs),
        BinaryOp::Sub => numeric(op, lhs, rhs, |a, b| Ok(a - b)),
        BinaryOp::Mul => numeric(op, lhs, rhs, |a, b| Ok(a * b)),
        BinaryOp::Div => numeric(op, lhs, rhs, |a, b| {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(a / b)
            }
        }),
        BinaryOp::Pow => numeric(op, lhs, rhs, |a, b| Ok(a.powf(b))),
        BinaryOp::Mod => numeric(op, lhs, rhs, |a, b| {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(a % b)
            }
        }),

        BinaryOp::Shl => bitwise(op, lhs, rhs, |a, b| a.wrapping_shl(b as u32 & 63)),
        BinaryOp::Shr => bitwise(op, lhs, rhs, |a, b| a.wrapping_shr(b as u32 & 63)),
        // Unsigned shift operates on the low 32 bits, like the scripting
        // family this grammar descends from.
        BinaryOp::UShr => bitwise(op, lhs, rhs, |a, b| {
            i64::from((a as u32).wrapping_shr(b as u32 & 31))
        }),
        BinaryOp::BitAnd => bitwise(op, lhs, rhs, |a, b| a & b),
        BinaryOp::BitOr => bitwise(op, lhs, rhs, |a, b| a | b),
        BinaryOp::BitXor => bitwise(op, lhs, rhs, |a, b| a ^ b),

        BinaryOp::Eq => Ok(Value::Bool(lhs.equals(rhs))),
        BinaryOp::NotEq => Ok(Value::Bool(!lhs.equals(rhs))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => compare(op, lhs, rhs),
    }
}

/// Evaluate a unary operation.
pub fn unary_op(op: UnaryOp, operand: &Value) -> Result<Value, RuntimeError> {
    match (op, operand) {
        (UnaryOp::Plus, Value::Number(n)) => Ok(Value::Number(*n)),
        (UnaryOp::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOp::BitNot, Value::Number(n)) => Ok(Value::Number(!(n.trunc() as i64) as f64)),
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Typeof, value) => Ok(Value::string(value.type_name())),
        (op, value) => Err(invalid_unary_op(op.as_symbol(), value.type_name())),
    }
}

fn add(lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        // String concatenation stringifies the other operand.
        (Value::Str(a), b) => Ok(Value::string(format!("{a}{b}"))),
        (a, Value::Str(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Ok(Value::list(items))
        }
        (a, b) => Err(invalid_binary_op("+", a.type_name(), b.type_name())),
    }
}

fn numeric(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    apply: impl FnOnce(f64, f64) -> Result<f64, RuntimeError>,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => apply(*a, *b).map(Value::Number),
        (a, b) => Err(invalid_binary_op(
            op.as_symbol(),
            a.type_name(),
            b.type_name(),
        )),
    }
}

fn bitwise(
    op: BinaryOp,
    lhs: &Value,
    rhs: &Value,
    apply: impl FnOnce(i64, i64) -> i64,
) -> Result<Value, RuntimeError> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => {
            Ok(Value::Number(apply(a.trunc() as i64, b.trunc() as i64) as f64))
        }
        (a, b) => Err(invalid_binary_op(
            op.as_symbol(),
            a.type_name(),
            b.type_name(),
        )),
    }
}

fn compare(op: BinaryOp, lhs: &Value, rhs: &Value) -> Result<Value, RuntimeError> {
    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        (a, b) => {
            return Err(invalid_binary_op(
                op.as_symbol(),
                a.type_name(),
                b.type_name(),
            ))
        }
    };
    let Some(ordering) = ordering else {
        // NaN comparisons are false, matching IEEE semantics.
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering.is_lt(),
        BinaryOp::LtEq => ordering.is_le(),
        BinaryOp::Gt => ordering.is_gt(),
        BinaryOp::GtEq => ordering.is_ge(),
        _ => false,
    };
    Ok(Value::Bool(result))
}

/// Resolve a numeric index against a length, counting negatives from the
/// end.
fn resolve_index(index: &Value, len: usize) -> Result<usize, RuntimeError> {
    let Value::Number(n) = index else {
        return Err(type_mismatch("number index", index.type_name()));
    };
    if n.fract() != 0.0 {
        return Err(type_mismatch("integer index", "fractional number"));
    }
    let raw = *n as i64;
    let resolved = if raw >= 0 {
        usize::try_from(raw).ok().filter(|&i| i < len)
    } else {
        usize::try_from(-raw)
            .ok()
            .filter(|&back| back <= len)
            .map(|back| len - back)
    };
    resolved.ok_or_else(|| index_out_of_range(raw, len))
}

/// Clamp an optional slice bound into `0..=len`.
fn resolve_bound(bound: Option<&Value>, default: usize, len: usize) -> Result<usize, RuntimeError> {
    let Some(bound) = bound else {
        return Ok(default);
    };
    let Value::Number(n) = bound else {
        return Err(type_mismatch("number bound", bound.type_name()));
    };
    let raw = n.trunc() as i64;
    let resolved = if raw >= 0 {
        usize::try_from(raw).unwrap_or(len).min(len)
    } else {
        len.saturating_sub(usize::try_from(-raw).unwrap_or(len))
    };
    Ok(resolved)
}

/// Read one element: `list[i]`, `string[i]`, `dict[key]`.
pub fn index(target: &Value, key: &Value) -> Result<Value, RuntimeError> {
    match target {
        Value::List(items) => {
            let items = items.borrow();
            let idx = resolve_index(key, items.len())?;
            Ok(items[idx].clone())
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let idx = resolve_index(key, chars.len())?;
            Ok(Value::string(chars[idx].to_string()))
        }
        Value::Dict(entries) => {
            let Value::Str(wanted) = key else {
                return Err(type_mismatch("string key", key.type_name()));
            };
            entries
                .borrow()
                .iter()
                .find(|(k, _)| k == wanted.as_str())
                .map(|(_, v)| v.clone())
                .ok_or_else(|| undefined_member(wanted.as_str(), "dictionary"))
        }
        other => Err(not_indexable(other.type_name())),
    }
}

/// Read a slice: `list[a:b]`, `string[a:b]`; either bound optional.
pub fn slice(
    target: &Value,
    start: Option<&Value>,
    end: Option<&Value>,
) -> Result<Value, RuntimeError> {
    match target {
        Value::List(items) => {
            let items = items.borrow();
            let from = resolve_bound(start, 0, items.len())?;
            let to = resolve_bound(end, items.len(), items.len())?;
            Ok(Value::list(items[from..to.max(from)].to_vec()))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let from = resolve_bound(start, 0, chars.len())?;
            let to = resolve_bound(end, chars.len(), chars.len())?;
            Ok(Value::string(chars[from..to.max(from)].iter().collect::<String>()))
        }
        other => Err(not_indexable(other.type_name())),
    }
}

/// Write one element in place: `list[i] = v`, `dict[key] = v` (upsert).
pub fn store_index(target: &Value, key: &Value, value: Value) -> Result<(), RuntimeError> {
    match target {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            let len = items.len();
            let idx = resolve_index(key, len)?;
            items[idx] = value;
            Ok(())
        }
        Value::Dict(entries) => {
            let Value::Str(wanted) = key else {
                return Err(type_mismatch("string key", key.type_name()));
            };
            let mut entries = entries.borrow_mut();
            match entries.iter_mut().find(|(k, _)| k == wanted.as_str()) {
                Some((_, slot)) => *slot = value,
                None => entries.push((wanted.to_string(), value)),
            }
            Ok(())
        }
        other => Err(not_indexable(other.type_name())),
    }
}

/// Append to a list: the `list[] = v` form.
pub fn push(target: &Value, value: Value) -> Result<(), RuntimeError> {
    match target {
        Value::List(items) => {
            items.borrow_mut().push(value);
            Ok(())
        }
        other => Err(not_indexable(other.type_name())),
    }
}

/// Remove one element: `delete list[i]`, `delete dict[key]`.
pub fn remove_index(target: &Value, key: &Value) -> Result<Value, RuntimeError> {
    match target {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            let len = items.len();
            let idx = resolve_index(key, len)?;
            Ok(items.remove(idx))
        }
        Value::Dict(entries) => {
            let Value::Str(wanted) = key else {
                return Err(type_mismatch("string key", key.type_name()));
            };
            let mut entries = entries.borrow_mut();
            match entries.iter().position(|(k, _)| k == wanted.as_str()) {
                Some(at) => Ok(entries.remove(at).1),
                None => Err(undefined_member(wanted.as_str(), "dictionary")),
            }
        }
        other => Err(not_indexable(other.type_name())),
    }
}
