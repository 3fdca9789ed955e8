//! Binary and unary operators.
//!
//! Short-circuit forms (`and`, `or`, `??`) are *not* listed here: their
//! right operand is conditionally evaluated, so they are distinct node
//! variants rather than `BinaryOp` cases.

/// Eagerly-evaluated binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,

    // Bitwise
    Shl,
    Shr,
    UShr,
    BitAnd,
    BitOr,
    BitXor,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// The source-level symbol, used in error messages and node rendering.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Mod => "%",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `+x` (numeric identity; reports on non-numbers).
    Plus,
    /// `-x`
    Minus,
    /// `~x`
    BitNot,
    /// `not x` / `!x`
    Not,
    /// `typeof x`
    Typeof,
}

impl UnaryOp {
    /// The source-level symbol, used in error messages and node rendering.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::BitNot => "~",
            Self::Not => "not",
            Self::Typeof => "typeof",
        }
    }
}
