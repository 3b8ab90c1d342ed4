use crate::literal::{Base, LiteralContext};

/// What went wrong on a source line. Every kind is fatal to assembly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    #[error("Missing semicolon")]
    MissingTerminator,
    #[error("Extra non-comment character sequence after semicolon - \"{0}\"")]
    TrailingContent(String),
    #[error("Invalid syntax for register/memory initializer")]
    InvalidInitializerSyntax,
    #[error("Invalid {base} literal in {context} initializer - \"{text}\"")]
    InvalidLiteral {
        context: LiteralContext,
        base: Base,
        text: String,
    },
    #[error("Unknown operation \"{0}\"")]
    UnknownOperation(String),
    #[error("Wrong number of arguments for {op} operation (expected {expected}, got {actual} args)")]
    ArityMismatch {
        op: &'static str,
        expected: &'static str,
        actual: usize,
    },
    #[error("Invalid register specifier - \"{0}\"")]
    InvalidRegister(String),
    #[error("Label \"{0}\" already defined")]
    DuplicateLabel(String),
    #[error("Label name is not a valid cname - \"{0}\"")]
    InvalidLabelName(String),
    #[error("Undefined label reference - \"{0}\"")]
    UndefinedLabel(String),
}

/// A fatal assembly diagnostic pinned to its source line.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Error on line #{line}: {kind}")]
pub struct AsmError {
    /// 1-based line number.
    pub line: usize,
    /// The line as it appeared in the source, comment included.
    pub text: String,
    pub kind: AsmErrorKind,
}

impl AsmError {
    pub fn new(line: usize, text: impl Into<String>, kind: AsmErrorKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }

    /// Two-line report: the message, then the offending line.
    pub fn render(&self) -> String {
        format!("{self}\n\t> {}", self.text.trim_end())
    }
}
