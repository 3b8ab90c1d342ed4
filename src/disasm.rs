use std::fmt::Write;

use crate::cpu::Flags;
use crate::isa::{Instruction, Reg};
use crate::memory::SparseMemory;

fn r(x: Reg) -> String {
    format!("{:X}", x.index())
}

/// Renders an instruction as source-like text. Jumps show the landing index.
pub fn fmt_instruction(insn: &Instruction) -> String {
    let mn = insn.mnemonic().name();
    match *insn {
        Instruction::Rd | Instruction::Wr => mn.to_string(),
        Instruction::Sa(x) | Instruction::Rb(x) | Instruction::Sb(x) | Instruction::Sf(x) => {
            format!("{mn} {}", r(x))
        }
        Instruction::Go(t) | Instruction::Bin(t) | Instruction::Biz(t) => {
            format!("{mn} {}", t.landing())
        }
        Instruction::Add(x, y)
        | Instruction::And(x, y)
        | Instruction::Mv(x, y)
        | Instruction::Not(x, y)
        | Instruction::Rs(x, y)
        | Instruction::Ls(x, y)
        | Instruction::Sw(x, y) => format!("{mn} {}, {}", r(x), r(y)),
    }
}

/// `index: text` lines for a whole program.
pub fn fmt_listing(program: &[Instruction]) -> String {
    let mut out = String::new();
    for (i, insn) in program.iter().enumerate() {
        let _ = writeln!(out, "{i}: {}", fmt_instruction(insn));
    }
    out
}

/// One `X: value` line per register, values as signed 32-bit.
pub fn fmt_registers(regs: &[u32; 16]) -> String {
    let mut out = String::new();
    for (i, v) in regs.iter().enumerate() {
        let _ = writeln!(out, "{i:X}: {}", *v as i32);
    }
    out
}

pub fn fmt_flags(flags: Flags) -> String {
    format!(
        "N: {}\nZ: {}\n",
        flags.contains(Flags::N),
        flags.contains(Flags::Z)
    )
}

pub fn fmt_memory(mem: &SparseMemory) -> String {
    let mut out = String::new();
    for (addr, v) in mem.iter() {
        let _ = writeln!(out, "[{addr:#x}]: {}", v as i32);
    }
    out
}
