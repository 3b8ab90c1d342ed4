use crate::cpu::{Cpu, Flags};
use crate::isa::{Instruction, Reg};
use crate::memory::Bus;

pub trait Executor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, insn: Instruction);
}

/// Integer executor for the 16 VMAL opcodes. All arithmetic wraps mod 2^32.
pub struct IntExecutor;
impl Executor for IntExecutor {
    fn exec<B: Bus>(&self, cpu: &mut Cpu, bus: &mut B, insn: Instruction) {
        match insn {
            Instruction::Sa(x) => {
                cpu.mar = cpu.reg(x);
            }
            Instruction::Rb(x) => {
                cpu.set_reg(x, cpu.mbr);
            }
            Instruction::Rd => {
                cpu.mbr = bus.read_u32(cpu.mar);
            }
            Instruction::Wr => {
                bus.write_u32(cpu.mar, cpu.mbr);
            }
            Instruction::Sb(x) => {
                cpu.mbr = cpu.reg(x);
            }
            Instruction::Sf(x) => {
                let v = cpu.reg(x);
                cpu.flags.set(Flags::Z, v == 0);
                cpu.flags.set(Flags::N, (v as i32) < 0);
            }
            Instruction::Go(t) => {
                cpu.set_reg(Reg::PC, t.0);
            }
            Instruction::Bin(t) => {
                if cpu.flags.contains(Flags::N) {
                    cpu.set_reg(Reg::PC, t.0);
                }
            }
            Instruction::Biz(t) => {
                if cpu.flags.contains(Flags::Z) {
                    cpu.set_reg(Reg::PC, t.0);
                }
            }
            Instruction::Add(x, y) => {
                cpu.set_reg(x, cpu.reg(x).wrapping_add(cpu.reg(y)));
            }
            Instruction::And(x, y) => {
                cpu.set_reg(x, cpu.reg(x) & cpu.reg(y));
            }
            Instruction::Mv(x, y) => {
                cpu.set_reg(x, cpu.reg(y));
            }
            Instruction::Not(x, y) => {
                cpu.set_reg(x, !cpu.reg(y));
            }
            Instruction::Rs(x, y) => {
                cpu.set_reg(x, cpu.reg(y) >> 1);
            }
            Instruction::Ls(x, y) => {
                cpu.set_reg(x, cpu.reg(y) << 1);
            }
            Instruction::Sw(x, y) => {
                cpu.mar = cpu.reg(x);
                cpu.mbr = cpu.reg(y);
                bus.write_u32(cpu.mar, cpu.mbr);
            }
        }
    }
}
