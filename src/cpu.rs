use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::exec::Executor;
use crate::isa::{Instruction, Reg};
use crate::memory::Bus;

/// Registers hard-wired after initialization: 5 = 0, 6 = 1, 7 = -1.
pub const FIXED_REGISTERS: [(u8, u32); 3] = [(5, 0), (6, 1), (7, u32::MAX)];

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Flags: u8 {
const N = 1 << 0; // Negative: bit 31 of the last SF operand
const Z = 1 << 1; // Zero
}
}

/// Architectural state: register file, memory latches and condition flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cpu {
    pub regs: [u32; 16], // R0 is the program counter
    pub mar: u32,        // Memory address register
    pub mbr: u32,        // Memory buffer register
    pub flags: Flags,
}

/// Result of one fetch-execute cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// `insn` ran from address `pc`.
    Executed { pc: u32, insn: Instruction },
    /// PC is past the end of the program; nothing changed.
    Halted,
}

impl Cpu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reg(&self, r: Reg) -> u32 {
        self.regs[r.index()]
    }

    pub fn set_reg(&mut self, r: Reg, val: u32) {
        self.regs[r.index()] = val;
    }

    pub fn pc(&self) -> u32 {
        self.regs[Reg::PC.index()]
    }

    pub fn set_pc(&mut self, pc: u32) {
        self.regs[Reg::PC.index()] = pc;
    }

    pub fn apply_fixed_registers(&mut self) {
        for (r, v) in FIXED_REGISTERS {
            self.regs[r as usize] = v;
        }
    }

    pub fn step<B: Bus, X: Executor>(
        &mut self,
        bus: &mut B,
        program: &[Instruction],
        exec: &X,
    ) -> StepResult {
        let pc = self.pc();
        let Some(&insn) = program.get(pc as usize) else {
            return StepResult::Halted;
        };
        exec.exec(self, bus, insn);
        // PC advances after the effect, jumps included
        self.set_pc(self.pc().wrapping_add(1));
        StepResult::Executed { pc, insn }
    }
}
