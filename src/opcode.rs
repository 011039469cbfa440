use num::traits::{FromPrimitive, ToPrimitive};

// Bytecode operations for the micro-shader stack machine.
//
//   Op        | Operand | Effect
//--------------+---------+-------------------------------------------------
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    Stop,      // |    -    | halt
    Push,      // |    -    | *--sp = eax
    Const,     // |  f32    | eax = imm
    Load,      // |  u8     | eax = v[idx]
    Store,     // |  u8     | v[idx] = eax
    Sel,       // |    -    | eax = sp[1] >= 0 ? sp[0] : eax; sp += 2
    Min,       // |    -    | eax = min(*sp, eax); sp += 1
    Max,       // |    -    | eax = max(*sp, eax); sp += 1
    Clamp,     // |    -    | eax = sp[1] >= sp[0] ? clamp(eax, sp[0], sp[1]) : sp[0]; sp += 2
    Saturate,  // |    -    | eax = clamp(eax, 0, 1)
    Add,       // |    -    | eax = *sp + eax; sp += 1
    Sub,       // |    -    | eax = *sp - eax; sp += 1
    Mul,       // |    -    | eax = *sp * eax; sp += 1
    Div,       // |    -    | eax = *sp / eax; sp += 1
    Floor,     // |    -    | eax = floor(eax)
    Ceil,      // |    -    | eax = ceil(eax)
    Abs,       // |    -    | eax = abs(eax)
    Sqr,       // |    -    | eax = eax * eax
    Sqrt,      // |    -    | eax = sqrt(eax)
    Pow,       // |    -    | eax = pow(*sp, eax); sp += 1
    Exp,       // |    -    | eax = exp(eax)
    Sin,       // |    -    | eax = sin(eax)
    Cos,       // |    -    | eax = cos(eax)
    Asin,      // |    -    | eax = asin(eax)
    Acos,      // |    -    | eax = acos(eax)
}

impl Opcode {
    pub fn from_byte(b: u8) -> Option<Opcode> {
        FromPrimitive::from_u8(b)
    }

    pub fn to_byte(self) -> u8 {
        ToPrimitive::to_u8(&self).expect("Opcode always fits in a byte")
    }
}
