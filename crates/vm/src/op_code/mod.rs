//! OpCode module for the Intcode virtual machine.
//!
//! The instruction set is a closed table: each opcode fixes how many
//! parameters follow it in memory and whether each one is read as a value
//! or used as a destination address.

pub mod parameter_role;

pub use parameter_role::ParameterRole;

use crate::error::{VmError, VmResult};
use std::fmt;

use parameter_role::ParameterRole::{Address, Value};

/// Intcode instruction identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    /// `dest := a + b`
    ADD = 1,

    /// `dest := a * b`
    MUL = 2,

    /// `dest := Input.read()`
    INPUT = 3,

    /// `Output.write(a)`; suspends a coroutine.
    OUTPUT = 4,

    /// Jumps to `b` if `a` is non-zero.
    JMPIF = 5,

    /// Jumps to `b` if `a` is zero.
    JMPIFNOT = 6,

    /// `dest := if a < b { 1 } else { 0 }`
    LT = 7,

    /// `dest := if a == b { 1 } else { 0 }`
    EQ = 8,

    /// `relative_base += a`
    ARB = 9,

    /// Stops the engine.
    HALT = 99,
}

impl OpCode {
    /// Every opcode, in identifier order.
    pub const ALL: [OpCode; 10] = [
        OpCode::ADD,
        OpCode::MUL,
        OpCode::INPUT,
        OpCode::OUTPUT,
        OpCode::JMPIF,
        OpCode::JMPIFNOT,
        OpCode::LT,
        OpCode::EQ,
        OpCode::ARB,
        OpCode::HALT,
    ];

    /// Looks up the opcode with the given identifier.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(OpCode::ADD),
            2 => Some(OpCode::MUL),
            3 => Some(OpCode::INPUT),
            4 => Some(OpCode::OUTPUT),
            5 => Some(OpCode::JMPIF),
            6 => Some(OpCode::JMPIFNOT),
            7 => Some(OpCode::LT),
            8 => Some(OpCode::EQ),
            9 => Some(OpCode::ARB),
            99 => Some(OpCode::HALT),
            _ => None,
        }
    }

    /// Looks up the opcode for `code`, reporting `pointer` if there is none.
    pub fn decode(code: i64, pointer: usize) -> VmResult<Self> {
        Self::from_code(code).ok_or(VmError::UnknownOpcode {
            opcode: code,
            pointer,
        })
    }

    /// The numeric identifier.
    pub fn code(self) -> i64 {
        self as u8 as i64
    }

    /// Roles of the parameters, in the order they follow the opcode.
    pub fn parameter_roles(self) -> &'static [ParameterRole] {
        match self {
            OpCode::ADD | OpCode::MUL | OpCode::LT | OpCode::EQ => &[Value, Value, Address],
            OpCode::INPUT => &[Address],
            OpCode::OUTPUT | OpCode::ARB => &[Value],
            OpCode::JMPIF | OpCode::JMPIFNOT => &[Value, Value],
            OpCode::HALT => &[],
        }
    }

    /// Number of parameter cells following the opcode.
    pub fn parameter_count(self) -> usize {
        self.parameter_roles().len()
    }

    /// Number of cells the whole instruction occupies.
    pub fn size(self) -> usize {
        1 + self.parameter_count()
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::ADD => "ADD",
            OpCode::MUL => "MUL",
            OpCode::INPUT => "IN",
            OpCode::OUTPUT => "OUT",
            OpCode::JMPIF => "JNZ",
            OpCode::JMPIFNOT => "JZ",
            OpCode::LT => "LT",
            OpCode::EQ => "EQ",
            OpCode::ARB => "ARB",
            OpCode::HALT => "HALT",
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(code)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for opcode in OpCode::ALL {
            assert_eq!(OpCode::from_code(opcode.code()), Some(opcode));
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0, 10, 42, 98, 100, -1] {
            assert_eq!(OpCode::from_code(code), None);
            assert_eq!(OpCode::try_from(code), Err(code));
        }
        assert_eq!(
            OpCode::decode(42, 3),
            Err(VmError::UnknownOpcode {
                opcode: 42,
                pointer: 3
            })
        );
    }

    #[test]
    fn test_instruction_sizes() {
        assert_eq!(OpCode::ADD.size(), 4);
        assert_eq!(OpCode::MUL.size(), 4);
        assert_eq!(OpCode::INPUT.size(), 2);
        assert_eq!(OpCode::OUTPUT.size(), 2);
        assert_eq!(OpCode::JMPIF.size(), 3);
        assert_eq!(OpCode::JMPIFNOT.size(), 3);
        assert_eq!(OpCode::LT.size(), 4);
        assert_eq!(OpCode::EQ.size(), 4);
        assert_eq!(OpCode::ARB.size(), 2);
        assert_eq!(OpCode::HALT.size(), 1);
    }

    #[test]
    fn test_destinations_are_last() {
        for opcode in OpCode::ALL {
            let roles = opcode.parameter_roles();
            let destinations = roles.iter().filter(|role| role.is_address()).count();
            assert!(destinations <= 1, "{opcode:?} has {destinations} destinations");
            if destinations == 1 {
                assert_eq!(roles.last(), Some(&Address));
            }
        }
    }
}
