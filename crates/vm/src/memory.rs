//! Growable memory for the Intcode virtual machine.
//!
//! Program code and working data share one flat array of signed integers.
//! Any access past the end zero-fills the array up to and including the
//! accessed cell, so memory never reports an out-of-bounds index. Growth is
//! fallible: it stops at the configured cell limit, and an allocation the
//! system cannot satisfy is an error rather than an abort.

use crate::error::{VmError, VmResult};
use std::fmt;

/// The VM's sole data store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<i64>,
    limit: Option<usize>,
}

impl Memory {
    /// Creates memory holding a copy of `program`.
    pub fn new(program: &[i64]) -> Self {
        Self {
            cells: program.to_vec(),
            limit: None,
        }
    }

    /// Stops memory from growing past `limit` cells.
    ///
    /// A program longer than the limit keeps all of its cells; only growth is
    /// refused.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Returns the value at `index`, growing memory if `index` is past the end.
    pub fn get(&mut self, index: usize) -> VmResult<i64> {
        self.ensure(index)?;
        Ok(self.cells[index])
    }

    /// Writes `value` at `index`, growing memory if `index` is past the end.
    pub fn set(&mut self, index: usize, value: i64) -> VmResult<()> {
        self.ensure(index)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Returns the value at `index` without growing memory.
    ///
    /// Cells past the end read as zero, which is what [`Memory::get`] would
    /// return for them.
    pub fn peek(&self, index: usize) -> i64 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Number of cells currently backed by storage.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if no cell has been allocated.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The current memory image.
    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }

    /// Consumes the memory and returns its cells.
    pub fn into_vec(self) -> Vec<i64> {
        self.cells
    }

    fn ensure(&mut self, index: usize) -> VmResult<()> {
        if index < self.cells.len() {
            return Ok(());
        }

        let requested = index
            .checked_add(1)
            .ok_or(VmError::OutOfMemory { requested: index })?;
        if let Some(limit) = self.limit {
            if requested > limit {
                return Err(VmError::MemoryLimitExceeded { requested, limit });
            }
        }

        self.cells
            .try_reserve_exact(requested - self.cells.len())
            .map_err(|_| VmError::OutOfMemory { requested })?;
        self.cells.resize(requested, 0);
        Ok(())
    }
}

impl From<Vec<i64>> for Memory {
    fn from(cells: Vec<i64>) -> Self {
        Self { cells, limit: None }
    }
}

impl fmt::Display for Memory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, cell) in self.cells.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
