//! The evaluation-result carrier.
//!
//! Every evaluation step returns [`EvalResult`]: a produced [`Value`], or a
//! [`Signal`] that must propagate. Exactly one of the four signal-or-value
//! outcomes is active at a time, enforced by the sum type. The "should halt
//! propagation" predicate is simply `Result::is_err`, so composite
//! evaluations stop at the first halting sub-result via `?`.
//!
//! Boundaries intercept their own signal and nothing else:
//! - a loop catches `Break` (terminating the loop) and `Continue`
//!   (terminating the iteration), clearing the signal,
//! - the function-call boundary catches `Return`, clearing it,
//! - `Error` is forwarded untouched all the way to the top-level caller.
//!
//! No host panic/throw machinery is involved; the carrier is an ordinary
//! return value and the active signal kind is inspectable by `match`.

use crate::{RuntimeError, Value};

/// A non-local control-flow signal in flight.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// Propagating failure; forwarded untouched to the top level.
    Error(RuntimeError),
    /// Unwind to the nearest function boundary with this value.
    Return(Value),
    /// Unwind to the nearest loop boundary, terminating the loop.
    Break,
    /// Unwind to the nearest loop boundary, terminating the iteration.
    Continue,
}

impl Signal {
    /// Convert into the error payload, treating a leaked `return`, `break`
    /// or `continue` at top level as a malformed-program report.
    pub fn into_error(self) -> RuntimeError {
        match self {
            Signal::Error(err) => err,
            Signal::Return(_) => crate::malformed_node("return outside of a function"),
            Signal::Break => crate::malformed_node("break outside of a loop"),
            Signal::Continue => crate::malformed_node("continue outside of a loop"),
        }
    }
}

impl From<RuntimeError> for Signal {
    fn from(err: RuntimeError) -> Self {
        Signal::Error(err)
    }
}

/// Result of evaluating one node.
pub type EvalResult = Result<Value, Signal>;
