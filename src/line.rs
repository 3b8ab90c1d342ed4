use crate::error::AsmErrorKind;
use crate::instructions::{lookup, InstrDesc};
use crate::isa::Reg;
use crate::literal::{parse_literal, LiteralContext};
use crate::program::{MemInit, RegInit};

const COMMENT_CHAR: char = '#';
const TERMINATOR: char = ';';
const INIT_SEPARATOR: char = ':';

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement<'a> {
    /// Empty or comment-only.
    Blank,
    Reg(RegInit),
    Mem(MemInit),
    /// A known mnemonic with its raw, trimmed, non-empty arguments. Arity is not checked here.
    Op {
        desc: &'static InstrDesc,
        args: Vec<&'a str>,
    },
}

fn literal(text: &str, context: LiteralContext) -> Result<u32, AsmErrorKind> {
    parse_literal(text).map_err(|base| AsmErrorKind::InvalidLiteral {
        context,
        base,
        text: text.to_string(),
    })
}

fn initializer<'a>(loc: &str, val: &str) -> Result<Statement<'a>, AsmErrorKind> {
    let loc = loc.trim();
    let val = val.trim();
    if loc.chars().count() == 1 {
        let reg = Reg::parse(loc).ok_or_else(|| AsmErrorKind::InvalidRegister(loc.to_string()))?;
        let value = literal(val, LiteralContext::Register)?;
        return Ok(Statement::Reg(RegInit { reg, value }));
    }
    match loc.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(addr) => {
            let addr = literal(addr.trim(), LiteralContext::Memory)?;
            let value = literal(val, LiteralContext::Memory)?;
            Ok(Statement::Mem(MemInit { addr, value }))
        }
        None => Err(AsmErrorKind::InvalidInitializerSyntax),
    }
}

fn operation(stmt: &str) -> Result<Statement<'_>, AsmErrorKind> {
    let (name, rest) = stmt
        .split_once(char::is_whitespace)
        .unwrap_or((stmt, ""));
    let desc = lookup(name).ok_or_else(|| AsmErrorKind::UnknownOperation(name.to_uppercase()))?;
    let args = rest
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .collect();
    Ok(Statement::Op { desc, args })
}

/// Classifies a single source line.
///
/// Comments run from the first `#`. A statement must end with `;` and only
/// whitespace may follow it. A `:` marks a register (`A: 5;`) or memory
/// (`[0x10]: 5;`) initializer, anything else is an operation.
pub fn classify(line: &str) -> Result<Statement<'_>, AsmErrorKind> {
    let code = line.split(COMMENT_CHAR).next().unwrap_or_default().trim();
    if code.is_empty() {
        return Ok(Statement::Blank);
    }
    let (stmt, rest) = code
        .split_once(TERMINATOR)
        .ok_or(AsmErrorKind::MissingTerminator)?;
    let rest = rest.trim();
    if !rest.is_empty() {
        return Err(AsmErrorKind::TrailingContent(rest.to_string()));
    }
    match stmt.split_once(INIT_SEPARATOR) {
        Some((loc, val)) => initializer(loc, val),
        None => operation(stmt.trim()),
    }
}
