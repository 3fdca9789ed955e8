//! Evaluation helpers, grouped by language area.
//!
//! Each module hosts the arms of the interpreter's dispatch that share
//! state or helpers: operator application, control flow, calls, assignment
//! targets, the object model, tag components, and HTML construction.

pub mod access;
pub mod call;
pub mod class;
pub mod control;
pub mod html;
pub mod operators;
pub mod tag;
