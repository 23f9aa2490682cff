//! Parameter addressing modes.
//!
//! Each parameter of an instruction carries a mode digit taken from the
//! instruction word. The mode decides whether the raw parameter is an
//! address, a literal, or an offset from the relative base.

use crate::error::{VmError, VmResult};
use crate::memory::Memory;
use std::fmt;

/// Addressing mode of a single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ParameterMode {
    /// The parameter is an absolute address.
    #[default]
    Position = 0,

    /// The parameter is a literal value.
    Immediate = 1,

    /// The parameter is an address offset from the relative base.
    Relative = 2,
}

impl ParameterMode {
    /// Looks up the mode with the given digit.
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(ParameterMode::Position),
            1 => Some(ParameterMode::Immediate),
            2 => Some(ParameterMode::Relative),
            _ => None,
        }
    }

    /// The mode digit.
    pub fn digit(self) -> i64 {
        self as u8 as i64
    }
}

impl fmt::Display for ParameterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterMode::Position => "position",
            ParameterMode::Immediate => "immediate",
            ParameterMode::Relative => "relative",
        };
        f.write_str(name)
    }
}

/// Returns the mode digit of parameter `index` (zero-based) in `word`.
///
/// The hundreds digit belongs to the first parameter, the thousands digit to
/// the second, and so on. Digits the word does not have are zero.
pub fn mode_digit(word: i64, index: usize) -> i64 {
    let mut rest = word / 100;
    for _ in 0..index {
        if rest == 0 {
            return 0;
        }
        rest /= 10;
    }
    rest % 10
}

/// Resolves parameters against one engine's memory and relative base.
pub struct Resolver<'a> {
    memory: &'a mut Memory,
    relative_base: i64,
    pointer: usize,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver for the instruction at `pointer`.
    pub fn new(memory: &'a mut Memory, relative_base: i64, pointer: usize) -> Self {
        Self {
            memory,
            relative_base,
            pointer,
        }
    }

    /// Resolves a parameter that is read.
    pub fn value(&mut self, mode: ParameterMode, parameter: i64) -> VmResult<i64> {
        match mode {
            ParameterMode::Immediate => Ok(parameter),
            ParameterMode::Position => {
                let address = self.to_index(parameter)?;
                self.memory.get(address)
            }
            ParameterMode::Relative => {
                let address = self.to_index(self.offset(parameter)?)?;
                self.memory.get(address)
            }
        }
    }

    /// Resolves a parameter that is written; `index` is its position in the
    /// instruction and is only used for error reporting.
    pub fn address(&self, mode: ParameterMode, parameter: i64, index: usize) -> VmResult<usize> {
        match mode {
            ParameterMode::Position => self.to_index(parameter),
            ParameterMode::Relative => self.to_index(self.offset(parameter)?),
            ParameterMode::Immediate => Err(VmError::InvalidAddressingMode {
                pointer: self.pointer,
                parameter: index,
            }),
        }
    }

    fn offset(&self, parameter: i64) -> VmResult<i64> {
        self.relative_base
            .checked_add(parameter)
            .ok_or(VmError::AddressOverflow {
                base: self.relative_base,
                offset: parameter,
                pointer: self.pointer,
            })
    }

    fn to_index(&self, address: i64) -> VmResult<usize> {
        usize::try_from(address).map_err(|_| VmError::NegativeAddress {
            address,
            pointer: self.pointer,
        })
    }
}
