//! The execution engine: one [`Cpu`], its memory and a step counter.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::cpu::{Cpu, Flags, StepResult, FIXED_REGISTERS};
use crate::exec::IntExecutor;
use crate::isa::{Instruction, Reg};
use crate::memory::SparseMemory;
use crate::program::{MemInit, Program, RegInit};

/// How a [`Vm::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// PC left the program after `steps` instructions.
    Completed { steps: u64 },
    /// The step budget ran out first. Not an error: state reflects exactly `steps` instructions.
    Incomplete { steps: u64 },
}

impl RunOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn steps(&self) -> u64 {
        match *self {
            RunOutcome::Completed { steps } | RunOutcome::Incomplete { steps } => steps,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Vm {
    cpu: Cpu,
    mem: SparseMemory,
    steps: u64,
}

impl Vm {
    /// Builds the initial state. Initializers apply in order (last write wins),
    /// then registers 5, 6 and 7 are forced to their fixed values and PC is
    /// reset so execution starts at instruction 0.
    pub fn new(reg_inits: &[RegInit], mem_inits: &[MemInit]) -> Self {
        let mut cpu = Cpu::new();
        for init in reg_inits {
            if FIXED_REGISTERS.iter().any(|&(r, _)| r as usize == init.reg.index()) {
                warn!(reg = init.reg.index(), value = init.value, "initializer overridden by fixed register");
            }
            cpu.set_reg(init.reg, init.value);
        }
        cpu.apply_fixed_registers();
        cpu.set_pc(0);

        let mut mem = SparseMemory::new();
        for init in mem_inits {
            mem.words.insert(init.addr, init.value);
        }
        debug!(
            reg_inits = reg_inits.len(),
            mem_inits = mem_inits.len(),
            "vm constructed"
        );
        Self { cpu, mem, steps: 0 }
    }

    pub fn from_program(program: &Program) -> Self {
        Self::new(&program.reg_inits, &program.mem_inits)
    }

    /// One fetch-execute cycle.
    pub fn step(&mut self, program: &[Instruction]) -> StepResult {
        let res = self.cpu.step(&mut self.mem, program, &IntExecutor);
        if let StepResult::Executed { pc, insn } = res {
            self.steps += 1;
            trace!(pc, ?insn, "step");
        }
        res
    }

    /// Steps until PC leaves the program, or until `limit` steps have run.
    pub fn run(&mut self, program: &[Instruction], limit: Option<NonZeroU64>) -> RunOutcome {
        let mut steps = 0u64;
        let outcome = loop {
            if self.is_halted(program) {
                break RunOutcome::Completed { steps };
            }
            if limit.is_some_and(|l| steps >= l.get()) {
                break RunOutcome::Incomplete { steps };
            }
            self.step(program);
            steps += 1;
        };
        debug!(?outcome, pc = self.pc(), "run finished");
        outcome
    }

    pub fn is_halted(&self, program: &[Instruction]) -> bool {
        self.pc() as usize >= program.len()
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn registers(&self) -> &[u32; 16] {
        &self.cpu.regs
    }

    pub fn reg(&self, r: Reg) -> u32 {
        self.cpu.reg(r)
    }

    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    pub fn mar(&self) -> u32 {
        self.cpu.mar
    }

    pub fn mbr(&self) -> u32 {
        self.cpu.mbr
    }

    pub fn flags(&self) -> Flags {
        self.cpu.flags
    }

    pub fn memory(&self) -> &SparseMemory {
        &self.mem
    }

    /// Memory read with the read-as-zero rule, without touching the latches.
    pub fn peek(&self, addr: u32) -> u32 {
        self.mem.get(addr).unwrap_or(0)
    }

    /// Instructions executed over this VM's lifetime.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
