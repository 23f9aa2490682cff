//! Intcode program text.
//!
//! Programs are written as signed integers separated by commas, usually on
//! a single line.

use crate::error::VmError;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// An owned Intcode program image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Program(Vec<i64>);

impl Program {
    pub fn new(cells: Vec<i64>) -> Self {
        Self(cells)
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl Deref for Program {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for Program {
    fn from(cells: Vec<i64>) -> Self {
        Self(cells)
    }
}

impl FromStr for Program {
    type Err = VmError;

    /// Parses comma-separated integers. Surrounding whitespace, including a
    /// trailing newline, is ignored; blank text is an empty program.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }

        text.split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| VmError::InvalidProgram {
                    position,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cell) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
