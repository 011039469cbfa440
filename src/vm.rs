//! Stack-based interpreter over compiled bytecode.
//!
//! Registers: `eax` (the accumulator, f32), `sp` (operand stack pointer,
//! grows downward from a fixed 64-element stack), `pc` (bytecode cursor).
//! Dispatch fetches one opcode byte, advances `pc`, executes, repeats
//! until `STOP`. No suspension, no allocation, no intermediate state
//! observable to the caller (spec.md §4.4).

use tracing::trace;

use crate::constants::STACK_DEPTH;
use crate::error::CallError;
use crate::image::RuntimeImage;
use crate::opcode::Opcode;

/// Runs the named function, reading and writing `vars` in place.
///
/// `vars` is pre-filled by the caller with values for parameter slots
/// `0..argc`; the remaining slots are read as whatever they already
/// contain (the self-referential-initializer case, spec.md §9). On
/// return, `vars` holds the post-execution values.
#[tracing::instrument(skip(image, vars), fields(function = function_name))]
pub fn call(image: &RuntimeImage, function_name: &str, vars: &mut [f32]) -> Result<(), CallError> {
    let desc = image.find(function_name).ok_or(CallError::NotFound)?;
    trace!("entering function");
    run(image.code_from(desc), vars);
    trace!("function returned");
    Ok(())
}

fn run(code: &[u8], vars: &mut [f32]) {
    let mut stack = [0f32; STACK_DEPTH];
    let mut sp = STACK_DEPTH;
    let mut pc = 0usize;
    let mut eax = 0f32;

    loop {
        let op = Opcode::from_byte(code[pc])
            .unwrap_or_else(|| panic!("invalid opcode byte {} in compiled bytecode", code[pc]));
        pc += 1;

        match op {
            Opcode::Stop => break,

            Opcode::Push => {
                sp -= 1;
                stack[sp] = eax;
            }

            Opcode::Const => {
                let bytes = [code[pc], code[pc + 1], code[pc + 2], code[pc + 3]];
                eax = f32::from_ne_bytes(bytes);
                pc += 4;
                trace!(value = eax, "const");
            }

            Opcode::Load => {
                let idx = code[pc] as usize;
                pc += 1;
                eax = vars[idx];
                trace!(idx, value = eax, "load");
            }

            Opcode::Store => {
                let idx = code[pc] as usize;
                pc += 1;
                vars[idx] = eax;
                trace!(idx, value = eax, "store");
            }

            Opcode::Sel => {
                eax = if stack[sp + 1] >= 0.0 { stack[sp] } else { eax };
                sp += 2;
            }

            Opcode::Min => {
                eax = if stack[sp] < eax { stack[sp] } else { eax };
                sp += 1;
            }

            Opcode::Max => {
                eax = if stack[sp] < eax { eax } else { stack[sp] };
                sp += 1;
            }

            Opcode::Clamp => {
                let sp0 = stack[sp];
                let sp1 = stack[sp + 1];
                eax = if sp1 >= sp0 {
                    if sp1 <= eax {
                        sp1
                    } else {
                        eax
                    }
                } else {
                    sp0
                };
                sp += 2;
            }

            Opcode::Saturate => {
                eax = if eax >= 0.0 {
                    if eax <= 1.0 {
                        eax
                    } else {
                        1.0
                    }
                } else {
                    0.0
                };
            }

            Opcode::Add => {
                eax = stack[sp] + eax;
                sp += 1;
            }

            Opcode::Sub => {
                eax = stack[sp] - eax;
                sp += 1;
            }

            Opcode::Mul => {
                eax = stack[sp] * eax;
                sp += 1;
            }

            Opcode::Div => {
                eax = stack[sp] / eax;
                sp += 1;
            }

            Opcode::Floor => eax = eax.floor(),
            Opcode::Ceil => eax = eax.ceil(),
            Opcode::Abs => eax = eax.abs(),
            Opcode::Sqr => eax *= eax,
            Opcode::Sqrt => eax = eax.sqrt(),

            Opcode::Pow => {
                eax = stack[sp].powf(eax);
                sp += 1;
            }

            Opcode::Exp => eax = eax.exp(),
            Opcode::Sin => eax = eax.sin(),
            Opcode::Cos => eax = eax.cos(),
            Opcode::Asin => eax = eax.asin(),
            Opcode::Acos => eax = eax.acos(),
        }
    }

    debug_assert_eq!(
        sp, STACK_DEPTH,
        "operand stack unbalanced after call - this indicates a compiler bug, not a user error"
    );
}
