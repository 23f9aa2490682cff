//! Instruction decoding for the Intcode virtual machine.
//!
//! An instruction is decoded fresh from memory every time the engine reaches
//! it, so a program that rewrites its own code executes the rewritten cells.

use crate::addressing::{mode_digit, ParameterMode};
use crate::error::{VmError, VmResult};
use crate::memory::Memory;
use crate::op_code::{OpCode, ParameterRole};
use intcode_config::{MAX_PARAMETERS, OPCODE_MODULUS};
use std::fmt;

/// A decoded instruction: the opcode plus its raw parameters and their modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pointer: usize,
    opcode: OpCode,
    modes: [ParameterMode; MAX_PARAMETERS],
    parameters: [i64; MAX_PARAMETERS],
}

impl Instruction {
    /// Decodes the instruction at `pointer`, growing memory as needed to read
    /// its parameter cells. Fails without growing if a parameter cell lies
    /// past the memory limit.
    pub fn decode(memory: &mut Memory, pointer: usize) -> VmResult<Self> {
        Self::decode_with(pointer, |index| memory.get(index))
    }

    /// Decodes the instruction at `pointer` from a memory image without
    /// modifying it. Cells past the end read as zero.
    pub fn decode_at(cells: &[i64], pointer: usize) -> VmResult<Self> {
        Self::decode_with(pointer, |index| Ok(cells.get(index).copied().unwrap_or(0)))
    }

    fn decode_with(
        pointer: usize,
        mut read: impl FnMut(usize) -> VmResult<i64>,
    ) -> VmResult<Self> {
        let word = read(pointer)?;
        let opcode = OpCode::decode(word % OPCODE_MODULUS, pointer)?;

        let mut modes = [ParameterMode::Position; MAX_PARAMETERS];
        let mut parameters = [0; MAX_PARAMETERS];
        for index in 0..opcode.parameter_count() {
            let digit = mode_digit(word, index);
            modes[index] =
                ParameterMode::from_digit(digit).ok_or(VmError::UnknownParameterMode {
                    mode: digit,
                    pointer,
                    parameter: index,
                })?;
            parameters[index] = read(pointer + 1 + index)?;
        }

        Ok(Self {
            pointer,
            opcode,
            modes,
            parameters,
        })
    }

    /// Address the instruction was decoded from.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn opcode(&self) -> OpCode {
        self.opcode
    }

    /// Raw parameter cells, in order.
    pub fn parameters(&self) -> &[i64] {
        &self.parameters[..self.opcode.parameter_count()]
    }

    /// Parameter modes, in order.
    pub fn modes(&self) -> &[ParameterMode] {
        &self.modes[..self.opcode.parameter_count()]
    }

    /// Raw parameter `index` and its mode.
    pub fn operand(&self, index: usize) -> (ParameterMode, i64) {
        (self.modes[index], self.parameters[index])
    }

    /// Number of cells the instruction occupies.
    pub fn size(&self) -> usize {
        self.opcode.size()
    }

    /// Address of the instruction that follows when no jump is taken.
    pub fn next_pointer(&self) -> usize {
        self.pointer + self.size()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode)?;
        let roles = self.opcode.parameter_roles();
        for (index, (mode, parameter)) in self.modes().iter().zip(self.parameters()).enumerate() {
            f.write_str(if index == 0 { " " } else { ", " })?;
            match (mode, roles[index]) {
                (ParameterMode::Immediate, ParameterRole::Address) => write!(f, "!{parameter}")?,
                (ParameterMode::Immediate, ParameterRole::Value) => write!(f, "{parameter}")?,
                (ParameterMode::Position, _) => write!(f, "[{parameter}]")?,
                (ParameterMode::Relative, _) if *parameter < 0 => write!(f, "[rb{parameter}]")?,
                (ParameterMode::Relative, _) => write!(f, "[rb+{parameter}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_position_and_immediate_modes() {
        let mut memory = Memory::new(&[1002, 4, 3, 4, 33]);
        let instruction = Instruction::decode(&mut memory, 0).expect("decode should succeed");

        assert_eq!(instruction.opcode(), OpCode::MUL);
        assert_eq!(instruction.parameters(), &[4, 3, 4]);
        assert_eq!(
            instruction.modes(),
            &[
                ParameterMode::Position,
                ParameterMode::Immediate,
                ParameterMode::Position
            ]
        );
        assert_eq!(instruction.next_pointer(), 4);
    }

    #[test]
    fn test_decode_halt_reads_no_parameters() {
        let mut memory = Memory::new(&[99]);
        let instruction = Instruction::decode(&mut memory, 0).expect("decode should succeed");
        assert_eq!(instruction.opcode(), OpCode::HALT);
        assert!(instruction.parameters().is_empty());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_decode_reads_parameters_past_end_as_zero() {
        let mut memory = Memory::new(&[4]);
        let instruction = Instruction::decode(&mut memory, 0).expect("decode should succeed");
        assert_eq!(instruction.parameters(), &[0]);
        assert_eq!(memory.len(), 2);
    }

    #[test]
    fn test_decode_parameters_past_limit_fail_without_growing() {
        let mut memory = Memory::new(&[0, 0, 0, 1]).with_limit(Some(4));
        assert_eq!(
            Instruction::decode(&mut memory, 3),
            Err(VmError::MemoryLimitExceeded {
                requested: 5,
                limit: 4
            })
        );
        assert_eq!(memory.len(), 4);
    }

    #[test]
    fn test_decode_unknown_opcode_reports_pointer() {
        let mut memory = Memory::new(&[99, 42]);
        assert_eq!(
            Instruction::decode(&mut memory, 1),
            Err(VmError::UnknownOpcode {
                opcode: 42,
                pointer: 1
            })
        );
    }

    #[test]
    fn test_decode_unknown_mode_digit() {
        let mut memory = Memory::new(&[301, 0, 0, 0]);
        assert_eq!(
            Instruction::decode(&mut memory, 0),
            Err(VmError::UnknownParameterMode {
                mode: 3,
                pointer: 0,
                parameter: 0
            })
        );
    }

    #[test]
    fn test_mode_digits_past_parameter_count_are_ignored() {
        let instruction = Instruction::decode_at(&[90004, 7], 0).expect("decode should succeed");
        assert_eq!(instruction.opcode(), OpCode::OUTPUT);
        assert_eq!(instruction.modes(), &[ParameterMode::Position]);
    }

    #[test]
    fn test_display() {
        let add = Instruction::decode_at(&[21101, 5, -6, 3], 0).expect("decode should succeed");
        assert_eq!(add.to_string(), "ADD 5, -6, [rb+3]");

        let input = Instruction::decode_at(&[203, -1], 0).expect("decode should succeed");
        assert_eq!(input.to_string(), "IN [rb-1]");

        let jump = Instruction::decode_at(&[1005, 9, 0], 0).expect("decode should succeed");
        assert_eq!(jump.to_string(), "JNZ [9], 0");

        let halt = Instruction::decode_at(&[99], 0).expect("decode should succeed");
        assert_eq!(halt.to_string(), "HALT");
    }
}
