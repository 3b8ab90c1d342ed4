use std::fmt::Write;

use serde::Serialize;
use vmal_rs::disasm::fmt_instruction;
use vmal_rs::{Instruction, MemInit, Program};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingLine {
    pub index: usize,
    pub text: String,
    pub insn: Instruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegLine {
    pub reg: String,
    pub value: u32,
}

/// Human/JSON view of an assembled program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub registers: Vec<RegLine>,
    pub memory: Vec<MemInit>,
    pub code: Vec<ListingLine>,
}

impl Listing {
    pub fn new(program: &Program) -> Self {
        let registers = program
            .reg_inits
            .iter()
            .map(|i| RegLine {
                reg: format!("{:X}", i.reg.index()),
                value: i.value,
            })
            .collect();
        let code = program
            .instructions
            .iter()
            .enumerate()
            .map(|(index, insn)| ListingLine {
                index,
                text: fmt_instruction(insn),
                insn: *insn,
            })
            .collect();
        Self {
            registers,
            memory: program.mem_inits.clone(),
            code,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if !self.registers.is_empty() {
            let _ = writeln!(out, "; registers");
            for r in &self.registers {
                let _ = writeln!(out, "{}: {:#010x}", r.reg, r.value);
            }
        }
        if !self.memory.is_empty() {
            let _ = writeln!(out, "; memory");
            for m in &self.memory {
                let _ = writeln!(out, "[{:#x}]: {:#010x}", m.addr, m.value);
            }
        }
        let _ = writeln!(out, "; code");
        for l in &self.code {
            let _ = writeln!(out, "{:>4}: {}", l.index, l.text);
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
