use serde::{Deserialize, Serialize};

use crate::isa::{Instruction, Reg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegInit {
    pub reg: Reg,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemInit {
    pub addr: u32,
    pub value: u32,
}

/// Assembler output: resolved code plus the initial machine state, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    pub reg_inits: Vec<RegInit>,
    pub mem_inits: Vec<MemInit>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
