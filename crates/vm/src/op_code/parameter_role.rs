//! Parameter role information for Intcode opcodes.

/// How an instruction uses one of its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    /// The parameter is resolved to a value and read.
    Value,

    /// The parameter is resolved to a memory address and written.
    Address,
}

impl ParameterRole {
    /// Checks if the parameter is read.
    pub fn is_value(&self) -> bool {
        matches!(self, ParameterRole::Value)
    }

    /// Checks if the parameter is a write destination.
    pub fn is_address(&self) -> bool {
        matches!(self, ParameterRole::Address)
    }
}
