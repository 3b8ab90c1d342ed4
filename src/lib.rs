pub mod asm;
pub mod config;
pub mod cpu;
pub mod debug;
pub mod disasm;
pub mod error;
pub mod exec;
pub mod instructions;
pub mod isa;
pub mod line;
pub mod literal;
pub mod memory;
pub mod program;
pub mod vm;

pub use asm::{assemble, assemble_str};
pub use config::VmConfig;
pub use cpu::{Cpu, Flags, StepResult};
pub use error::{AsmError, AsmErrorKind};
pub use isa::{Instruction, Reg, Target};
pub use memory::{Bus, SparseMemory};
pub use program::{MemInit, Program, RegInit};
pub use vm::{RunOutcome, Vm};
