//! Human-readable node rendering.
//!
//! Used for diagnostics, never re-parsed. The rendering is structurally
//! faithful: the printed operator and child count always agree with the
//! node's kind.

use super::members::IndexSelector;
use super::node::{Node, NodeKind};
use std::fmt;

fn token_text(tok: &crate::Token) -> &str {
    tok.text().unwrap_or("<?>")
}

fn join(nodes: &[Node]) -> String {
    let parts: Vec<String> = nodes.iter().map(ToString::to_string).collect();
    parts.join(", ")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Number(n) => write!(f, "{n}"),
            NodeKind::Str { value, .. } => write!(f, "\"{value}\""),
            NodeKind::Bool { display_name, .. } => f.write_str(display_name),
            NodeKind::NoneLiteral => f.write_str("none"),

            NodeKind::Binary { op, lhs, rhs } => {
                write!(f, "({lhs} {} {rhs})", op.as_symbol())
            }
            NodeKind::And { lhs, rhs } => write!(f, "({lhs} and {rhs})"),
            NodeKind::Or { lhs, rhs } => write!(f, "({lhs} or {rhs})"),
            NodeKind::Nullish { lhs, rhs } => write!(f, "({lhs} ?? {rhs})"),
            NodeKind::Unary { op, operand } => write!(f, "({} {operand})", op.as_symbol()),
            NodeKind::Prefix { target, difference } => {
                let sym = if *difference >= 0 { "++" } else { "--" };
                write!(f, "({sym}{target})")
            }
            NodeKind::Postfix { target, difference } => {
                let sym = if *difference >= 0 { "++" } else { "--" };
                write!(f, "({target}{sym})")
            }

            NodeKind::NullishAssign { target, value } => write!(f, "({target} ??= {value})"),
            NodeKind::AndAssign { target, value } => write!(f, "({target} &&= {value})"),
            NodeKind::OrAssign { target, value } => write!(f, "({target} ||= {value})"),

            NodeKind::VarAssign { name, value, .. } => {
                write!(f, "(var {} = {value})", token_text(name))
            }
            NodeKind::VarAccess { name } => f.write_str(token_text(name)),
            NodeKind::VarModify { name, value } => {
                write!(f, "({} = {value})", token_text(name))
            }
            NodeKind::Define { name, value, .. } => {
                write!(f, "(define {} = {value})", token_text(name))
            }
            NodeKind::Delete { target } => write!(f, "(delete {target})"),

            NodeKind::List { elements } => write!(f, "[{}]", join(elements)),
            NodeKind::Dictionary { entries } => {
                let parts: Vec<String> =
                    entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            NodeKind::ListAccess { target, selectors } => {
                write!(f, "{target}")?;
                for sel in selectors {
                    match sel {
                        IndexSelector::Index(idx) => write!(f, "[{idx}]")?,
                        IndexSelector::Slice { start, end } => {
                            f.write_str("[")?;
                            if let Some(s) = start {
                                write!(f, "{s}")?;
                            }
                            f.write_str(":")?;
                            if let Some(e) = end {
                                write!(f, "{e}")?;
                            }
                            f.write_str("]")?;
                        }
                    }
                }
                Ok(())
            }
            NodeKind::ListAssign { access, value } => write!(f, "({access} = {value})"),
            NodeKind::ListPushBrackets { target } => write!(f, "{target}[]"),

            NodeKind::If { cases, else_case, .. } => {
                f.write_str("(if")?;
                for case in cases {
                    write!(f, " {} -> {}", case.condition, case.body)?;
                }
                if let Some(else_case) = else_case {
                    write!(f, " else {else_case}")?;
                }
                f.write_str(")")
            }
            NodeKind::For {
                var, start, end, step, body, ..
            } => {
                write!(f, "(for {} = ", token_text(var))?;
                match start {
                    Some(start) => write!(f, "{start}")?,
                    None => f.write_str("0")?,
                }
                write!(f, " to {end}")?;
                if let Some(step) = step {
                    write!(f, " step {step}")?;
                }
                write!(f, " {body})")
            }
            NodeKind::Foreach {
                iterable, key, value, body, ..
            } => {
                f.write_str("(foreach ")?;
                if let Some(key) = key {
                    write!(f, "{} : ", token_text(key))?;
                }
                write!(f, "{} in {iterable} {body})", token_text(value))
            }
            NodeKind::While { condition, body, .. } => {
                write!(f, "(while {condition} {body})")
            }
            NodeKind::Switch {
                subject, cases, default_case,
            } => {
                write!(f, "(switch {subject}")?;
                for case in cases {
                    write!(f, " case {} -> {}", join(&case.conditions), case.body)?;
                }
                if let Some(default_case) = default_case {
                    write!(f, " default {default_case}")?;
                }
                f.write_str(")")
            }
            NodeKind::Break => f.write_str("(break)"),
            NodeKind::Continue => f.write_str("(continue)"),
            NodeKind::Return { value } => match value {
                Some(value) => write!(f, "(return {value})"),
                None => f.write_str("(return)"),
            },
            NodeKind::Statements { body } => {
                let parts: Vec<String> = body.iter().map(ToString::to_string).collect();
                write!(f, "{{ {} }}", parts.join("; "))
            }

            NodeKind::FuncDef { name, args, body, .. } => {
                f.write_str("(func")?;
                if let Some(name) = name {
                    write!(f, " {}", token_text(name))?;
                }
                f.write_str("(")?;
                let mut first = true;
                for arg in args {
                    if !first {
                        f.write_str(", ")?;
                    }
                    first = false;
                    if arg.is_rest {
                        f.write_str("...")?;
                    }
                    f.write_str(token_text(&arg.name))?;
                    if let Some(default) = &arg.default_value {
                        write!(f, " = {default}")?;
                    }
                }
                write!(f, ") {body})")
            }
            NodeKind::Call { callee, args, is_optional } => {
                let q = if *is_optional { "?." } else { "" };
                write!(f, "{callee}{q}({})", join(args))
            }

            NodeKind::ClassDef { name, parent, .. } => {
                write!(f, "(class {}", token_text(name))?;
                if let Some(parent) = parent {
                    write!(f, " extends {}", token_text(parent))?;
                }
                f.write_str(")")
            }
            NodeKind::ClassCall { name, args } => {
                write!(f, "(new {}({}))", token_text(name), join(args))
            }
            NodeKind::CallProperty { target, property, is_optional } => {
                let dot = if *is_optional { "?." } else { "." };
                write!(f, "{target}{dot}{}", token_text(property))
            }
            NodeKind::CallStaticProperty { target, property, is_optional } => {
                let sep = if *is_optional { "?::" } else { "::" };
                write!(f, "{target}{sep}{}", token_text(property))
            }
            NodeKind::CallMethod { call, .. } => write!(f, "{call}"),
            NodeKind::AssignProperty { access, value } => write!(f, "({access} = {value})"),
            NodeKind::Super { args } => write!(f, "super({})", join(args)),
            NodeKind::Instanceof { target, class_name } => {
                write!(f, "({target} instanceof {})", token_text(class_name))
            }

            NodeKind::TagDef { name, .. } => write!(f, "(tag {})", token_text(name)),
            NodeKind::EnumDef { name, members } => {
                let parts: Vec<&str> = members.iter().map(token_text).collect();
                write!(f, "(enum {} {{{}}})", token_text(name), parts.join(", "))
            }

            NodeKind::Html { tag, children, .. } => {
                let name = tag.as_ref().map_or("", |t| token_text(t));
                write!(f, "<{name}>")?;
                for child in children {
                    write!(f, "{child}")?;
                }
                write!(f, "</{name}>")
            }
        }
    }
}
