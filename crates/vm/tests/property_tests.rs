//! Property-based tests for the Intcode VM
//!
//! These tests use proptest to verify:
//! - Comparison instructions only ever store 0 or 1
//! - Memory growth is stable across repeated reads
//! - Mode digits decode least-significant-first
//! - Program text survives a print/parse cycle

use intcode_vm::addressing::{mode_digit, ParameterMode};
use intcode_vm::execution_engine::ExecutionEngine;
use intcode_vm::instruction::Instruction;
use intcode_vm::memory::Memory;
use intcode_vm::op_code::OpCode;
use intcode_vm::program::Program;
use proptest::prelude::*;

fn compare(opcode: i64, a: i64, b: i64) -> i64 {
    let mut engine = ExecutionEngine::new(&[1100 + opcode, a, b, 7, 4, 7, 99, 0]);
    engine.run(None).expect("comparison should halt");
    engine.take_output()[0]
}

proptest! {
    /// Test that less-than stores exactly 0 or 1
    #[test]
    fn test_less_than_is_boolean(a in any::<i64>(), b in any::<i64>()) {
        let result = compare(7, a, b);
        prop_assert!(result == 0 || result == 1);
        prop_assert_eq!(result == 1, a < b);
    }

    /// Test that equals stores exactly 0 or 1
    #[test]
    fn test_equals_is_boolean(a in any::<i64>(), b in prop_oneof![any::<i64>(), Just(0), Just(-1)]) {
        let result = compare(8, a, b);
        prop_assert!(result == 0 || result == 1);
        prop_assert_eq!(compare(8, a, a), 1);
        prop_assert_eq!(result == 1, a == b);
    }

    /// Test that reading past the end twice neither shrinks nor corrupts memory
    #[test]
    fn test_memory_growth_is_stable(
        cells in prop::collection::vec(any::<i64>(), 0..32),
        offset in 0usize..256,
    ) {
        let mut memory = Memory::new(&cells);
        let index = cells.len() + offset;

        prop_assert_eq!(memory.get(index), Ok(0));
        let grown = memory.len();
        prop_assert_eq!(memory.get(index), Ok(0));
        prop_assert_eq!(memory.len(), grown);
        prop_assert_eq!(grown, index + 1);
        prop_assert_eq!(&memory.as_slice()[..cells.len()], &cells[..]);
    }

    /// Test that each parameter takes the digit at its own decimal position
    #[test]
    fn test_mode_digits_decode(m1 in 0i64..3, m2 in 0i64..3, m3 in 0i64..3) {
        let word = m3 * 10_000 + m2 * 1_000 + m1 * 100 + OpCode::ADD.code();
        prop_assert_eq!(mode_digit(word, 0), m1);
        prop_assert_eq!(mode_digit(word, 1), m2);
        prop_assert_eq!(mode_digit(word, 2), m3);

        let instruction = Instruction::decode_at(&[word, 0, 0, 0], 0).expect("valid word");
        let expected: Vec<_> = [m1, m2, m3]
            .iter()
            .map(|&digit| ParameterMode::from_digit(digit).expect("valid digit"))
            .collect();
        prop_assert_eq!(instruction.modes(), &expected[..]);
    }

    /// Test that printing a program and parsing it back is lossless
    #[test]
    fn test_program_text_is_lossless(cells in prop::collection::vec(any::<i64>(), 0..64)) {
        let program = Program::new(cells.clone());
        let reparsed: Program = program.to_string().parse().expect("canonical text parses");
        prop_assert_eq!(reparsed.into_vec(), cells);
    }
}
