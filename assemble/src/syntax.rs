use pest::Parser;

use hack_common::ADDRESS_MASK;

use crate::error::AsmErrorKind;

#[derive(Parser)]
#[grammar = "hack.pest"]
struct HackParser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand<'a> {
    Constant(u16),
    Symbol(&'a str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statement<'a> {
    Label(&'a str),
    Address(Operand<'a>),
    Compute(&'a str),
}

/// Raw `dest=comp;jump` parts, not yet looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputeFields<'a> {
    pub dest: Option<&'a str>,
    pub comp: &'a str,
    pub jump: Option<&'a str>,
}

/// Trims the line and drops everything from the first `//`.
pub fn strip(line: &str) -> &str {
    let line = line.trim();
    match line.find("//") {
        Some(pos) => line[..pos].trim(),
        None => line,
    }
}

/// Classifies a stripped, non-empty line by its first character.
pub fn statement(text: &str) -> Result<Statement<'_>, AsmErrorKind> {
    if text.starts_with('(') {
        label(text).map(Statement::Label)
    } else if text.starts_with('@') {
        address(text).map(Statement::Address)
    } else {
        Ok(Statement::Compute(text))
    }
}

fn label(text: &str) -> Result<&str, AsmErrorKind> {
    HackParser::parse(Rule::label, text)
        .map_err(|_| AsmErrorKind::MalformedLine)?
        .next()
        .and_then(|label| label.into_inner().next())
        .map(|symbol| symbol.as_str())
        .ok_or(AsmErrorKind::MalformedLine)
}

fn address(text: &str) -> Result<Operand<'_>, AsmErrorKind> {
    let operand = HackParser::parse(Rule::address, text)
        .map_err(|_| AsmErrorKind::MalformedLine)?
        .next()
        .and_then(|address| address.into_inner().next())
        .ok_or(AsmErrorKind::MalformedLine)?;

    match operand.as_rule() {
        Rule::constant => Ok(Operand::Constant(parse_constant(operand.as_str()))),
        Rule::symbol => Ok(Operand::Symbol(operand.as_str())),
        _ => Err(AsmErrorKind::MalformedLine),
    }
}

/// Decimal digits reduced to the 15 bits an address instruction holds.
fn parse_constant(digits: &str) -> u16 {
    digits.bytes().fold(0u16, |value, digit| {
        value.wrapping_mul(10).wrapping_add((digit - b'0') as u16) & ADDRESS_MASK
    })
}

pub fn compute_fields(text: &str) -> Result<ComputeFields<'_>, AsmErrorKind> {
    let compute = HackParser::parse(Rule::compute, text)
        .map_err(|_| AsmErrorKind::MalformedLine)?
        .next()
        .ok_or(AsmErrorKind::MalformedLine)?;

    let mut fields = ComputeFields {
        dest: None,
        comp: "",
        jump: None,
    };
    for part in compute.into_inner() {
        match part.as_rule() {
            Rule::dest => fields.dest = part.into_inner().next().map(|f| f.as_str()),
            Rule::field => fields.comp = part.as_str(),
            Rule::jump => fields.jump = Some(part.as_str()),
            _ => {}
        }
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_comments_and_whitespace() {
        assert_eq!("D=M", strip("  D=M   // load"));
        assert_eq!("@i", strip("\t@i\t"));
        assert_eq!("", strip("// only a comment"));
        assert_eq!("", strip("   "));
        assert_eq!("0;JMP", strip("0;JMP// no space // twice"));
    }

    #[test]
    fn labels() {
        assert_eq!(Ok(Statement::Label("LOOP")), statement("(LOOP)"));
        assert_eq!(Ok(Statement::Label("sys.init$ret.1")), statement("(sys.init$ret.1)"));
        assert_eq!(Ok(Statement::Label("_a:b")), statement("(_a:b)"));
        for bad in ["(", "()", "(LOOP", "(1ST)", "(A B)", "((X))", "(X)Y"] {
            assert_eq!(Err(AsmErrorKind::MalformedLine), statement(bad), "{}", bad);
        }
    }

    #[test]
    fn addresses() {
        assert_eq!(Ok(Statement::Address(Operand::Constant(0))), statement("@0"));
        assert_eq!(Ok(Statement::Address(Operand::Constant(32767))), statement("@32767"));
        assert_eq!(Ok(Statement::Address(Operand::Symbol("R1"))), statement("@R1"));
        assert_eq!(Ok(Statement::Address(Operand::Symbol("x.y$z"))), statement("@x.y$z"));
        for bad in ["@", "@-1", "@1x", "@a b", "@@a", "@+3"] {
            assert_eq!(Err(AsmErrorKind::MalformedLine), statement(bad), "{}", bad);
        }
    }

    #[test]
    fn constants_keep_fifteen_bits() {
        assert_eq!(0, parse_constant("32768"));
        assert_eq!(1, parse_constant("32769"));
        assert_eq!(40000 - 32768, parse_constant("40000"));
        assert_eq!(7, parse_constant("0007"));
        assert_eq!((123456789012345678u64 % 32768) as u16, parse_constant("123456789012345678"));
    }

    #[test]
    fn compute_statements() {
        assert_eq!(Ok(Statement::Compute("D=M")), statement("D=M"));
        assert_eq!(Ok(Statement::Compute("0;JMP")), statement("0;JMP"));
    }

    #[test]
    fn compute_parts() {
        assert_eq!(
            Ok(ComputeFields { dest: Some("AMD"), comp: "D+1", jump: Some("JGT") }),
            compute_fields("AMD=D+1;JGT"));
        assert_eq!(
            Ok(ComputeFields { dest: None, comp: "D", jump: Some("JEQ") }),
            compute_fields("D;JEQ"));
        assert_eq!(
            Ok(ComputeFields { dest: Some("M"), comp: "M + 1", jump: None }),
            compute_fields("M=M + 1"));
        assert_eq!(
            Ok(ComputeFields { dest: None, comp: "-1", jump: None }),
            compute_fields("-1"));
        assert_eq!(
            Ok(ComputeFields { dest: Some("D"), comp: "", jump: Some("") }),
            compute_fields("D=;"));
        // the jump part is split off first, so `=` inside it is not a destination
        assert_eq!(
            Ok(ComputeFields { dest: None, comp: "D", jump: Some("A=M") }),
            compute_fields("D;A=M"));
    }

    #[test]
    fn extra_separators() {
        for bad in ["A=D=M", "D;JMP;JMP", "A=M=D;JGT", "==D", "0;;JMP"] {
            assert_eq!(Err(AsmErrorKind::MalformedLine), compute_fields(bad), "{}", bad);
        }
    }
}
