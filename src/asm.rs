//! Two-pass VMAL assembler.
//!
//! Pass one classifies every line, collects initializers, appends
//! instructions and records labels. Jumps keep their label name until pass
//! two, so forward references are legal. Pass two swaps each name for the
//! index recorded in the label table.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{AsmError, AsmErrorKind};
use crate::instructions::{InstrDesc, Mnemonic};
use crate::isa::{Instruction, Reg, Target};
use crate::line::{classify, Statement};
use crate::program::{MemInit, Program, RegInit};

/// Source position of an instruction, kept for the label pass diagnostics.
#[derive(Debug, Clone)]
struct Site {
    line: usize,
    text: String,
}

#[derive(Debug, Default)]
struct AsmContext {
    code: Vec<(Instruction<String>, Site)>,
    labels: HashMap<String, Target>,
    reg_inits: Vec<RegInit>,
    mem_inits: Vec<MemInit>,
}

fn is_cname(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

fn reg(token: &str) -> Result<Reg, AsmErrorKind> {
    Reg::parse(token).ok_or_else(|| AsmErrorKind::InvalidRegister(token.to_string()))
}

impl AsmContext {
    /// Labels point one slot before the next instruction; see [`Target`].
    fn define_label(&mut self, name: &str) -> Result<(), AsmErrorKind> {
        if !is_cname(name) {
            return Err(AsmErrorKind::InvalidLabelName(name.to_string()));
        }
        if self.labels.contains_key(name) {
            return Err(AsmErrorKind::DuplicateLabel(name.to_string()));
        }
        let target = Target((self.code.len() as u32).wrapping_sub(1));
        debug!(label = name, landing = target.landing(), "label defined");
        self.labels.insert(name.to_string(), target);
        Ok(())
    }

    fn operation(
        &mut self,
        desc: &'static InstrDesc,
        args: &[&str],
        line: usize,
        text: &str,
    ) -> Result<(), AsmErrorKind> {
        if args.len() != desc.class.arity() {
            return Err(AsmErrorKind::ArityMismatch {
                op: desc.mnemonic,
                expected: desc.class.describe(),
                actual: args.len(),
            });
        }
        let insn = match desc.op {
            Mnemonic::Lbl => return self.define_label(args[0]),
            Mnemonic::Go => Instruction::Go(args[0].to_string()),
            Mnemonic::Bin => Instruction::Bin(args[0].to_string()),
            Mnemonic::Biz => Instruction::Biz(args[0].to_string()),
            Mnemonic::Rd => Instruction::Rd,
            Mnemonic::Wr => Instruction::Wr,
            Mnemonic::Sa => Instruction::Sa(reg(args[0])?),
            Mnemonic::Rb => Instruction::Rb(reg(args[0])?),
            Mnemonic::Sb => Instruction::Sb(reg(args[0])?),
            Mnemonic::Sf => Instruction::Sf(reg(args[0])?),
            Mnemonic::Add => Instruction::Add(reg(args[0])?, reg(args[1])?),
            Mnemonic::And => Instruction::And(reg(args[0])?, reg(args[1])?),
            Mnemonic::Mv => Instruction::Mv(reg(args[0])?, reg(args[1])?),
            Mnemonic::Not => Instruction::Not(reg(args[0])?, reg(args[1])?),
            Mnemonic::Rs => Instruction::Rs(reg(args[0])?, reg(args[1])?),
            Mnemonic::Ls => Instruction::Ls(reg(args[0])?, reg(args[1])?),
            Mnemonic::Sw => Instruction::Sw(reg(args[0])?, reg(args[1])?),
        };
        let site = Site {
            line,
            text: text.to_string(),
        };
        trace!(index = self.code.len(), ?insn, "append");
        self.code.push((insn, site));
        Ok(())
    }

    fn line(&mut self, line: usize, text: &str) -> Result<(), AsmErrorKind> {
        match classify(text)? {
            Statement::Blank => {}
            Statement::Reg(init) => self.reg_inits.push(init),
            Statement::Mem(init) => self.mem_inits.push(init),
            Statement::Op { desc, args } => self.operation(desc, &args, line, text)?,
        }
        Ok(())
    }

    fn resolve(self) -> Result<Program, AsmError> {
        let labels = self.labels;
        let instructions = self
            .code
            .into_iter()
            .map(|(insn, site)| {
                insn.try_map_target(|name| match labels.get(&name) {
                    Some(target) => Ok(*target),
                    None => Err(AsmError::new(
                        site.line,
                        site.text,
                        AsmErrorKind::UndefinedLabel(name),
                    )),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Program {
            instructions,
            reg_inits: self.reg_inits,
            mem_inits: self.mem_inits,
        })
    }
}

/// Assembles VMAL source given as individual lines.
///
/// Stops at the first error; no partial program is ever returned.
pub fn assemble<I, S>(lines: I) -> Result<Program, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ctx = AsmContext::default();
    for (i, text) in lines.into_iter().enumerate() {
        let text = text.as_ref();
        ctx.line(i + 1, text)
            .map_err(|kind| AsmError::new(i + 1, text, kind))?;
    }
    let program = ctx.resolve()?;
    debug!(
        instructions = program.instructions.len(),
        reg_inits = program.reg_inits.len(),
        mem_inits = program.mem_inits.len(),
        "assembled"
    );
    Ok(program)
}

pub fn assemble_str(source: &str) -> Result<Program, AsmError> {
    assemble(source.lines())
}
