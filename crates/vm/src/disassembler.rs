//! Static disassembly of Intcode programs.
//!
//! A linear sweep from address 0. Code and data share memory, so anything
//! that does not decode is listed as a raw `DATA` cell and the sweep moves on
//! by one cell. Nothing is executed.

use crate::instruction::Instruction;
use std::fmt;

/// What a disassembled line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Instruction(Instruction),
    Data(i64),
}

/// One line of a disassembly listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisassembledLine {
    pub address: usize,
    pub kind: LineKind,
}

impl DisassembledLine {
    /// Number of cells the line covers.
    pub fn size(&self) -> usize {
        match &self.kind {
            LineKind::Instruction(instruction) => instruction.size(),
            LineKind::Data(_) => 1,
        }
    }
}

impl fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LineKind::Instruction(instruction) => write!(f, "{:04}: {}", self.address, instruction),
            LineKind::Data(value) => write!(f, "{:04}: DATA {}", self.address, value),
        }
    }
}

/// Disassembles `program` from address 0 to its end.
///
/// An instruction whose parameters run past the end of the program is still
/// listed; the missing cells read as zero.
pub fn disassemble(program: &[i64]) -> Vec<DisassembledLine> {
    let mut lines = Vec::new();
    let mut address = 0;

    while address < program.len() {
        let kind = match Instruction::decode_at(program, address) {
            Ok(instruction) => LineKind::Instruction(instruction),
            Err(_) => LineKind::Data(program[address]),
        };
        let line = DisassembledLine { address, kind };
        address += line.size();
        lines.push(line);
    }

    lines
}
