//! The closed table of built-in function names.
//!
//! Every name here compiles to exactly one opcode; there is no way for
//! source text to introduce a new one. Arguments are pushed left to
//! right except the last, which is left in the accumulator for the
//! opcode to consume directly.

use mshade::Opcode;

pub struct Builtin {
    pub name: &'static str,
    pub opcode: Opcode,
    pub arity: u8,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "sel", opcode: Opcode::Sel, arity: 3 },
    Builtin { name: "min", opcode: Opcode::Min, arity: 2 },
    Builtin { name: "max", opcode: Opcode::Max, arity: 2 },
    Builtin { name: "clamp", opcode: Opcode::Clamp, arity: 3 },
    Builtin { name: "saturate", opcode: Opcode::Saturate, arity: 1 },
    Builtin { name: "floor", opcode: Opcode::Floor, arity: 1 },
    Builtin { name: "ceil", opcode: Opcode::Ceil, arity: 1 },
    Builtin { name: "abs", opcode: Opcode::Abs, arity: 1 },
    Builtin { name: "sqr", opcode: Opcode::Sqr, arity: 1 },
    Builtin { name: "sqrt", opcode: Opcode::Sqrt, arity: 1 },
    Builtin { name: "pow", opcode: Opcode::Pow, arity: 2 },
    Builtin { name: "exp", opcode: Opcode::Exp, arity: 1 },
    Builtin { name: "sin", opcode: Opcode::Sin, arity: 1 },
    Builtin { name: "cos", opcode: Opcode::Cos, arity: 1 },
    Builtin { name: "asin", opcode: Opcode::Asin, arity: 1 },
    Builtin { name: "acos", opcode: Opcode::Acos, arity: 1 },
];

/// `pi` is a constant, not a call - there is no opcode to look up for it,
/// so it is handled by name directly in the term parser.
pub const PI_NAME: &str = "pi";

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|b| b.name == name)
}
