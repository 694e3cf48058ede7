//! First pass: filter the raw source down to real instructions, bind labels
//! and reserve RAM for variables.

use std::collections::HashSet;

use log::debug;

use crate::error::{AsmError, AsmErrorKind};
use crate::session::{Session, SourceLine};
use crate::syntax::{self, Operand, Statement};

/// Returns the retained instruction lines in source order.
///
/// Variable candidates are collected during the scan and bound once it is
/// complete, in order of first appearance. Binding after the scan lets a
/// forward reference to a label declared further down resolve to the label.
pub fn first_pass<I, S>(session: &mut Session, source: I) -> Result<Vec<SourceLine>, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rom_max = session.config().rom_max as usize;
    let mut lines: Vec<SourceLine> = Vec::new();
    let mut seen = HashSet::new();
    let mut candidates: Vec<(String, usize)> = Vec::new();

    for (index, raw) in source.into_iter().enumerate() {
        let text = syntax::strip(raw.as_ref());
        if text.is_empty() {
            continue;
        }

        let line = SourceLine::new(index, text);
        let statement = syntax::statement(text).map_err(|kind| AsmError::at(kind, &line))?;

        if let Statement::Label(name) = statement {
            session
                .bind_label(name, lines.len())
                .map_err(|kind| AsmError::at(kind, &line))?;
            continue;
        }

        if lines.len() > rom_max {
            return Err(AsmError::at(AsmErrorKind::NotEnoughRom, &line));
        }

        if let Statement::Address(Operand::Symbol(name)) = statement {
            if seen.insert(name.to_owned()) {
                candidates.push((name.to_owned(), lines.len()));
            }
        }

        lines.push(line);
    }

    if lines.is_empty() {
        return Err(AsmError::new(AsmErrorKind::EmptySource));
    }

    for (name, at) in &candidates {
        session
            .reserve_variable(name)
            .map_err(|kind| AsmError::at(kind, &lines[*at]))?;
    }

    debug!(
        "first pass: {} instructions, {} symbols referenced, next free RAM {}",
        lines.len(),
        candidates.len(),
        session.next_free());

    Ok(lines)
}
