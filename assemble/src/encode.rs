//! Second pass: one machine word per retained line.

use hack_common::{Computation, Dest, Instruction, Jump};
use log::trace;

use crate::error::{AsmError, AsmErrorKind};
use crate::session::{Session, SourceLine};
use crate::syntax::{self, Operand, Statement};

/// Stops at the first line that does not encode.
pub fn second_pass(session: &Session, lines: &[SourceLine]) -> Result<Vec<u16>, AsmError> {
    lines
        .iter()
        .enumerate()
        .map(|(pc, line)| {
            let word = encode_line(session, line.text()).map_err(|kind| AsmError::at(kind, line))?;
            trace!("{:05} {:016b} {}", pc, word, line.text());
            Ok(word)
        })
        .collect()
}

pub fn encode_line(session: &Session, text: &str) -> Result<u16, AsmErrorKind> {
    Ok(parse_instruction(session, text)?.encode())
}

pub fn parse_instruction(session: &Session, text: &str) -> Result<Instruction, AsmErrorKind> {
    match syntax::statement(text)? {
        Statement::Address(Operand::Constant(value)) => Ok(Instruction::Address(value)),
        Statement::Address(Operand::Symbol(name)) => session
            .resolve(name)
            .map(Instruction::Address)
            .ok_or_else(|| AsmErrorKind::UnknownSymbol(name.to_owned())),
        Statement::Compute(text) => compute(text),
        // labels are consumed by the first pass
        Statement::Label(_) => Err(AsmErrorKind::MalformedLine),
    }
}

fn compute(text: &str) -> Result<Instruction, AsmErrorKind> {
    let fields = syntax::compute_fields(text)?;

    let jump = fields.jump.map(jump).transpose()?;
    let dest = fields.dest.map(destination).transpose()?.unwrap_or_else(Dest::empty);
    let comp = computation(fields.comp)?;

    Ok(Instruction::Compute { dest, comp, jump })
}

fn jump(mnemonic: &str) -> Result<Jump, AsmErrorKind> {
    mnemonic
        .parse()
        .map_err(|_| AsmErrorKind::UnknownOperator(mnemonic.to_owned()))
}

fn destination(letters: &str) -> Result<Dest, AsmErrorKind> {
    let mut dest = Dest::empty();
    for c in letters.chars() {
        match Dest::from_letter(c) {
            Some(flag) if !dest.contains(flag) => dest.insert(flag),
            _ => return Err(AsmErrorKind::UnknownOperator(letters.to_owned())),
        }
    }
    Ok(dest)
}

fn computation(expression: &str) -> Result<Computation, AsmErrorKind> {
    let cleaned: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    Computation::parse(&cleaned).ok_or(AsmErrorKind::UnknownOperator(cleaned))
}
