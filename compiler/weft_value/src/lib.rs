//! Weft Value - the runtime value system and evaluation-result carrier.
//!
//! This crate provides everything the evaluator manipulates at runtime:
//!
//! - [`Value`] and its primitive operations ([`binary_op`], [`unary_op`],
//!   indexing/slicing/storing) with typed failures
//! - [`RuntimeError`] / [`ErrorKind`] and the factory-function surface
//! - [`Signal`] / [`EvalResult`]: the explicit control-flow carrier
//!   (value | error | return | break | continue)
//! - [`Context`]: the chained scope environment, hosted here because
//!   function values capture their defining scope
//! - [`Shared`]: the single-threaded shared-cell wrapper used by composite
//!   values and scopes

mod context;
pub mod errors;
mod flow;
mod shared;
mod value;

pub use context::{AssignError, Context, DeclareError, Mutability};
pub use errors::{
    already_declared, division_by_zero, immutable_assignment, index_out_of_range,
    invalid_binary_op, invalid_lvalue, invalid_override, invalid_unary_op, malformed_node,
    missing_argument, not_callable, not_indexable, super_call_missing, too_many_arguments,
    type_mismatch, undefined_member, undefined_property, undefined_variable,
    visibility_violation, ErrorKind, RuntimeError,
};
pub use flow::{EvalResult, Signal};
pub use shared::Shared;
pub use value::{
    binary_op, index, push, remove_index, slice, store_index, unary_op, ClassValue, EnumValue,
    FunctionValue, HtmlValue, InstanceValue, MethodDef, PropertyDef, StaticMember, TagValue,
    Value,
};
