use serde::{Deserialize, Serialize};

use crate::instructions::Mnemonic;
use crate::literal::parse_hex_digit;

/// Index into the 16-entry register file. Construction guarantees `0..=0xF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Reg(u8);

impl Reg {
    /// Program counter.
    pub const PC: Reg = Reg(0);

    pub fn new(index: u8) -> Option<Reg> {
        (index < 16).then_some(Reg(index))
    }

    /// Single hex digit, as written in source (`A`, `f`, `3`).
    pub fn parse(token: &str) -> Option<Reg> {
        parse_hex_digit(token).map(Reg)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Reg {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Reg::new(v).ok_or_else(|| format!("register index {v} out of range"))
    }
}

impl From<Reg> for u8 {
    fn from(r: Reg) -> u8 {
        r.0
    }
}

/// Resolved jump target: the index *before* the landing instruction.
///
/// The VM increments PC after every instruction, jumps included, so a jump
/// that stores `landing - 1` continues at `landing`. A label ahead of the first
/// instruction wraps to `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(pub u32);

impl Target {
    pub fn landing(self) -> u32 {
        self.0.wrapping_add(1)
    }
}

/// One VMAL instruction, generic over the jump payload.
///
/// The assembler builds `Instruction<String>` (symbolic label) and the label
/// pass turns it into `Instruction<Target>`; the VM only accepts the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args")]
pub enum Instruction<T = Target> {
    Sa(Reg),
    Rb(Reg),
    Rd,
    Wr,
    Sb(Reg),
    Sf(Reg),
    Go(T),
    Bin(T),
    Biz(T),
    Add(Reg, Reg),
    And(Reg, Reg),
    Mv(Reg, Reg),
    Not(Reg, Reg),
    Rs(Reg, Reg),
    Ls(Reg, Reg),
    Sw(Reg, Reg),
}

impl<T> Instruction<T> {
    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Instruction::Sa(_) => Mnemonic::Sa,
            Instruction::Rb(_) => Mnemonic::Rb,
            Instruction::Rd => Mnemonic::Rd,
            Instruction::Wr => Mnemonic::Wr,
            Instruction::Sb(_) => Mnemonic::Sb,
            Instruction::Sf(_) => Mnemonic::Sf,
            Instruction::Go(_) => Mnemonic::Go,
            Instruction::Bin(_) => Mnemonic::Bin,
            Instruction::Biz(_) => Mnemonic::Biz,
            Instruction::Add(..) => Mnemonic::Add,
            Instruction::And(..) => Mnemonic::And,
            Instruction::Mv(..) => Mnemonic::Mv,
            Instruction::Not(..) => Mnemonic::Not,
            Instruction::Rs(..) => Mnemonic::Rs,
            Instruction::Ls(..) => Mnemonic::Ls,
            Instruction::Sw(..) => Mnemonic::Sw,
        }
    }

    pub fn target(&self) -> Option<&T> {
        match self {
            Instruction::Go(t) | Instruction::Bin(t) | Instruction::Biz(t) => Some(t),
            _ => None,
        }
    }

    /// Rewrites the jump payload, leaving every other instruction untouched.
    pub fn try_map_target<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<Instruction<U>, E> {
        Ok(match self {
            Instruction::Go(t) => Instruction::Go(f(t)?),
            Instruction::Bin(t) => Instruction::Bin(f(t)?),
            Instruction::Biz(t) => Instruction::Biz(f(t)?),
            Instruction::Sa(x) => Instruction::Sa(x),
            Instruction::Rb(x) => Instruction::Rb(x),
            Instruction::Rd => Instruction::Rd,
            Instruction::Wr => Instruction::Wr,
            Instruction::Sb(x) => Instruction::Sb(x),
            Instruction::Sf(x) => Instruction::Sf(x),
            Instruction::Add(x, y) => Instruction::Add(x, y),
            Instruction::And(x, y) => Instruction::And(x, y),
            Instruction::Mv(x, y) => Instruction::Mv(x, y),
            Instruction::Not(x, y) => Instruction::Not(x, y),
            Instruction::Rs(x, y) => Instruction::Rs(x, y),
            Instruction::Ls(x, y) => Instruction::Ls(x, y),
            Instruction::Sw(x, y) => Instruction::Sw(x, y),
        })
    }
}
