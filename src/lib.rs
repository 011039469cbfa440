//! Bytecode and stack VM for an embeddable micro-shader expression
//! language.
//!
//! This crate is the back half of the pipeline: it defines the closed
//! [`Opcode`] set, the [`RuntimeImage`] format a compiled program is
//! stored in, and the stack-based [`call`] interpreter that executes a
//! named function against a caller-owned variable vector. The front
//! half — tokenizing and compiling source text into a [`RuntimeImage`]
//! — lives in the sibling `mshadec` crate, which depends on the types
//! defined here.
//!
//! A [`RuntimeImage`] is built once and is immutable afterwards: it may
//! be shared across threads for concurrent calls against disjoint
//! variable vectors.

extern crate num;
#[macro_use]
extern crate num_derive;

pub mod constants;
mod error;
mod image;
mod opcode;
mod vm;

pub use error::{CallError, LoadError};
pub use image::{FunctionDescriptor, RuntimeImage};
pub use opcode::Opcode;
pub use vm::call;

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_const(code: &mut Vec<u8>, value: f32) {
        code.push(Opcode::Const.to_byte());
        code.extend_from_slice(&value.to_ne_bytes());
    }

    fn emit(code: &mut Vec<u8>, op: Opcode) {
        code.push(op.to_byte());
    }

    fn emit_idx(code: &mut Vec<u8>, op: Opcode, idx: u8) {
        code.push(op.to_byte());
        code.push(idx);
    }

    fn image_of(code: Vec<u8>) -> RuntimeImage {
        RuntimeImage::from_parts(vec![FunctionDescriptor::new("f", 0)], code)
    }

    fn run(code: Vec<u8>, vars: &mut [f32]) {
        call(&image_of(code), "f", vars).expect("function exists");
    }

    #[test]
    fn not_found_is_reported() {
        let image = RuntimeImage::from_parts(vec![], vec![Opcode::Stop.to_byte()]);
        let mut vars = [0f32; 1];
        assert_eq!(call(&image, "missing", &mut vars), Err(CallError::NotFound));
    }

    #[test]
    fn load_store_roundtrip() {
        // x = x + 1
        let mut code = Vec::new();
        emit_idx(&mut code, Opcode::Load, 0);
        emit(&mut code, Opcode::Push);
        emit_const(&mut code, 1.0);
        emit(&mut code, Opcode::Add);
        emit_idx(&mut code, Opcode::Store, 0);
        emit(&mut code, Opcode::Stop);

        let mut vars = [10.0f32];
        run(code, &mut vars);
        assert_eq!(vars[0], 11.0);
    }

    #[test]
    fn multiply_two_vars() {
        // x = x * y
        let mut code = Vec::new();
        emit_idx(&mut code, Opcode::Load, 0);
        emit(&mut code, Opcode::Push);
        emit_idx(&mut code, Opcode::Load, 1);
        emit(&mut code, Opcode::Mul);
        emit_idx(&mut code, Opcode::Store, 0);
        emit(&mut code, Opcode::Stop);

        let mut vars = [3.0f32, 4.0];
        run(code, &mut vars);
        assert_eq!(vars[0], 12.0);
    }

    #[test]
    fn saturate_clamps_to_unit_interval() {
        fn saturate_of(x: f32) -> f32 {
            let mut code = Vec::new();
            emit_idx(&mut code, Opcode::Load, 0);
            emit(&mut code, Opcode::Saturate);
            emit_idx(&mut code, Opcode::Store, 0);
            emit(&mut code, Opcode::Stop);
            let mut vars = [x];
            run(code, &mut vars);
            vars[0]
        }

        assert_eq!(saturate_of(-1.0), 0.0);
        assert_eq!(saturate_of(0.5), 0.5);
        assert_eq!(saturate_of(2.0), 1.0);
        assert_eq!(saturate_of(f32::NAN), 0.0);
    }

    #[test]
    fn sel_picks_branch_by_sign() {
        fn sel_of(x: f32) -> f32 {
            // x = sel(x, 1, -1)
            let mut code = Vec::new();
            emit_idx(&mut code, Opcode::Load, 0);
            emit(&mut code, Opcode::Push);
            emit_const(&mut code, 1.0);
            emit(&mut code, Opcode::Push);
            emit_const(&mut code, -1.0);
            emit(&mut code, Opcode::Sel);
            emit_idx(&mut code, Opcode::Store, 0);
            emit(&mut code, Opcode::Stop);
            let mut vars = [x];
            run(code, &mut vars);
            vars[0]
        }

        assert_eq!(sel_of(0.0), 1.0);
        assert_eq!(sel_of(-0.1), -1.0);
    }

    #[test]
    fn min_max_use_strict_ternary_not_ieee_minmax() {
        // min(a, b) = a < b ? a : b ; max(a, b) = a < b ? b : a
        let mut min_code = Vec::new();
        emit_const(&mut min_code, 3.0);
        emit(&mut min_code, Opcode::Push);
        emit_const(&mut min_code, 2.0);
        emit(&mut min_code, Opcode::Min);
        emit_idx(&mut min_code, Opcode::Store, 0);
        emit(&mut min_code, Opcode::Stop);
        let mut vars = [0.0f32];
        run(min_code, &mut vars);
        assert_eq!(vars[0], 2.0);

        let mut max_code = Vec::new();
        emit_const(&mut max_code, 3.0);
        emit(&mut max_code, Opcode::Push);
        emit_const(&mut max_code, 2.0);
        emit(&mut max_code, Opcode::Max);
        emit_idx(&mut max_code, Opcode::Store, 0);
        emit(&mut max_code, Opcode::Stop);
        let mut vars = [0.0f32];
        run(max_code, &mut vars);
        assert_eq!(vars[0], 3.0);
    }

    #[test]
    fn clamp_lower_bound_wins_when_range_is_inverted() {
        // clamp(x, lo, hi) bytecode argument order: x pushed, lo pushed, hi in eax
        fn clamp_of(x: f32, lo: f32, hi: f32) -> f32 {
            let mut code = Vec::new();
            emit_const(&mut code, x);
            emit(&mut code, Opcode::Push);
            emit_const(&mut code, lo);
            emit(&mut code, Opcode::Push);
            emit_const(&mut code, hi);
            emit(&mut code, Opcode::Clamp);
            emit_idx(&mut code, Opcode::Store, 0);
            emit(&mut code, Opcode::Stop);
            let mut vars = [0.0f32];
            run(code, &mut vars);
            vars[0]
        }

        assert_eq!(clamp_of(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_of(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_of(50.0, 0.0, 10.0), 10.0);
        // inverted range: lower bound wins whenever x < lo
        assert_eq!(clamp_of(3.0, 5.0, 2.0), 5.0);
    }

    #[test]
    #[tracing_test::traced_test]
    fn call_traces_entry_and_exit() {
        let image = image_of(vec![Opcode::Stop.to_byte()]);
        let mut vars = [0f32; 1];
        call(&image, "f", &mut vars).expect("function exists");
        assert!(tracing_test::logs_contain("entering function"));
        assert!(tracing_test::logs_contain("function returned"));
    }

    #[test]
    fn stack_returns_to_initial_position() {
        // a deeply nested expression still balances the stack exactly.
        let mut code = Vec::new();
        emit_const(&mut code, 1.0);
        for _ in 0..10 {
            emit(&mut code, Opcode::Push);
            emit_const(&mut code, 1.0);
            emit(&mut code, Opcode::Add);
        }
        emit_idx(&mut code, Opcode::Store, 0);
        emit(&mut code, Opcode::Stop);

        let mut vars = [0.0f32];
        run(code, &mut vars);
        assert_eq!(vars[0], 11.0);
    }
}
