//! Assembly errors. Every failure carries the source line it was raised on,
//! except for an empty source which has no line to point at.

use std::fmt;

use crate::session::SourceLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmErrorKind {
    EmptySource,
    MalformedLine,
    UnknownOperator(String),
    UnknownSymbol(String),
    LabelRedeclared(String),
    NotEnoughRam,
    NotEnoughRom,
}

impl fmt::Display for AsmErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmErrorKind::EmptySource => write!(f, "no assembly code in source"),
            AsmErrorKind::MalformedLine => write!(f, "bad format"),
            AsmErrorKind::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
            AsmErrorKind::UnknownSymbol(symbol) => write!(f, "unknown symbol '{}'", symbol),
            AsmErrorKind::LabelRedeclared(label) => write!(f, "label '{}' redeclared", label),
            AsmErrorKind::NotEnoughRam => write!(f, "not enough RAM"),
            AsmErrorKind::NotEnoughRom => write!(f, "not enough ROM"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    kind: AsmErrorKind,
    line: Option<SourceLine>,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind) -> Self {
        Self { kind, line: None }
    }

    pub fn at(kind: AsmErrorKind, line: &SourceLine) -> Self {
        Self {
            kind,
            line: Some(line.clone()),
        }
    }

    pub fn kind(&self) -> &AsmErrorKind {
        &self.kind
    }

    pub fn line(&self) -> Option<&SourceLine> {
        self.line.as_ref()
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.line {
            Some(line) => write!(f, "{}: {}", line, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for AsmError {}
