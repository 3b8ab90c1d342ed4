use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mnemonic {
    Sa,
    Rb,
    Rd,
    Wr,
    Sb,
    Sf,
    Lbl,
    Go,
    Bin,
    Biz,
    Add,
    And,
    Mv,
    Not,
    Rs,
    Ls,
    Sw,
}

/// Operand shape of a mnemonic. Every mnemonic belongs to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandClass {
    None,
    Reg,
    RegPair,
    Label,
}

impl OperandClass {
    pub fn arity(self) -> usize {
        match self {
            OperandClass::None => 0,
            OperandClass::Reg | OperandClass::Label => 1,
            OperandClass::RegPair => 2,
        }
    }

    /// Noun used in arity diagnostics ("expected 2 registers").
    pub fn describe(self) -> &'static str {
        match self {
            OperandClass::None => "no arguments",
            OperandClass::Reg => "1 register",
            OperandClass::RegPair => "2 registers",
            OperandClass::Label => "1 label",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    pub op: Mnemonic,
    pub mnemonic: &'static str,
    pub class: OperandClass,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        op: Mnemonic::Sa,
        mnemonic: "SA",
        class: OperandClass::Reg,
    },
    InstrDesc {
        op: Mnemonic::Rb,
        mnemonic: "RB",
        class: OperandClass::Reg,
    },
    InstrDesc {
        op: Mnemonic::Rd,
        mnemonic: "RD",
        class: OperandClass::None,
    },
    InstrDesc {
        op: Mnemonic::Wr,
        mnemonic: "WR",
        class: OperandClass::None,
    },
    InstrDesc {
        op: Mnemonic::Sb,
        mnemonic: "SB",
        class: OperandClass::Reg,
    },
    InstrDesc {
        op: Mnemonic::Sf,
        mnemonic: "SF",
        class: OperandClass::Reg,
    },
    InstrDesc {
        op: Mnemonic::Lbl,
        mnemonic: "LBL",
        class: OperandClass::Label,
    },
    InstrDesc {
        op: Mnemonic::Go,
        mnemonic: "GO",
        class: OperandClass::Label,
    },
    InstrDesc {
        op: Mnemonic::Bin,
        mnemonic: "BIN",
        class: OperandClass::Label,
    },
    InstrDesc {
        op: Mnemonic::Biz,
        mnemonic: "BIZ",
        class: OperandClass::Label,
    },
    InstrDesc {
        op: Mnemonic::Add,
        mnemonic: "ADD",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::And,
        mnemonic: "AND",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::Mv,
        mnemonic: "MV",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::Not,
        mnemonic: "NOT",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::Rs,
        mnemonic: "RS",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::Ls,
        mnemonic: "LS",
        class: OperandClass::RegPair,
    },
    InstrDesc {
        op: Mnemonic::Sw,
        mnemonic: "SW",
        class: OperandClass::RegPair,
    },
];

/// Case-insensitive mnemonic lookup.
pub fn lookup(name: &str) -> Option<&'static InstrDesc> {
    TABLE.iter().find(|d| d.mnemonic.eq_ignore_ascii_case(name))
}

impl Mnemonic {
    pub fn desc(self) -> &'static InstrDesc {
        // TABLE holds every variant in declaration order
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.desc().mnemonic
    }
}
