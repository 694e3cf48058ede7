use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use packed_struct::prelude::*;

use crate::Source;

/// 6-bit ALU control code (zx nx zy ny f no). `Y` is the A-or-M operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(EnumCount, EnumIter)]
#[derive(PrimitiveEnum_u8)]
pub enum AluOp {
    Zero = 0b101010,
    One = 0b111111,
    MinusOne = 0b111010,
    D = 0b001100,
    Y = 0b110000,
    NotD = 0b001101,
    NotY = 0b110001,
    NegD = 0b001111,
    NegY = 0b110011,
    IncD = 0b011111,
    IncY = 0b110111,
    DecD = 0b001110,
    DecY = 0b110010,
    DPlusY = 0b000010,
    DMinusY = 0b010011,
    YMinusD = 0b000111,
    DAndY = 0b000000,
    DOrY = 0b010101,
}

// Canonical spelling first: the decoder renders the first match.
const COMPUTATION_MNEMONICS: &[(&str, AluOp)] = &[
    ("0", AluOp::Zero),
    ("1", AluOp::One),
    ("-1", AluOp::MinusOne),
    ("D", AluOp::D),
    ("A", AluOp::Y),
    ("M", AluOp::Y),
    ("!D", AluOp::NotD),
    ("!A", AluOp::NotY),
    ("!M", AluOp::NotY),
    ("-D", AluOp::NegD),
    ("-A", AluOp::NegY),
    ("-M", AluOp::NegY),
    ("D+1", AluOp::IncD),
    ("A+1", AluOp::IncY),
    ("M+1", AluOp::IncY),
    ("D-1", AluOp::DecD),
    ("A-1", AluOp::DecY),
    ("M-1", AluOp::DecY),
    ("D+A", AluOp::DPlusY),
    ("D+M", AluOp::DPlusY),
    ("A+D", AluOp::DPlusY),
    ("M+D", AluOp::DPlusY),
    ("D-A", AluOp::DMinusY),
    ("D-M", AluOp::DMinusY),
    ("A-D", AluOp::YMinusD),
    ("M-D", AluOp::YMinusD),
    ("D&A", AluOp::DAndY),
    ("D&M", AluOp::DAndY),
    ("D|A", AluOp::DOrY),
    ("D|M", AluOp::DOrY),
];

lazy_static! {
    pub static ref COMPUTATIONS: HashMap<&'static str, AluOp> =
        COMPUTATION_MNEMONICS.iter().copied().collect();
}

pub fn computation_mnemonics() -> impl Iterator<Item = &'static str> {
    COMPUTATION_MNEMONICS.iter().map(|(mnemonic, _)| *mnemonic)
}

/// The `a` bit and ALU code of a computation instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Computation {
    pub source: Source,
    pub op: AluOp,
}

impl Computation {
    /// Looks `expression` up verbatim; the source bit is only derived once the
    /// mnemonic is known to be valid.
    pub fn parse(expression: &str) -> Option<Computation> {
        let op = *COMPUTATIONS.get(expression)?;
        Some(Computation {
            source: Source::of(expression),
            op,
        })
    }

    pub fn mnemonic(&self) -> Option<&'static str> {
        COMPUTATION_MNEMONICS.iter()
            .find(|(mnemonic, op)| *op == self.op && Source::of(mnemonic) == self.source)
            .map(|(mnemonic, _)| *mnemonic)
    }

    pub fn bits(&self) -> u16 {
        (self.source.to_primitive() as u16) << 6 | self.op.to_primitive() as u16
    }
}

impl fmt::Display for Computation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => write!(f, "{}", mnemonic),
            None => write!(f, "<{:07b}>", self.bits()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    #[test]
    fn alu_codes_are_distinct() {
        assert_eq!(18, AluOp::COUNT);
        for op in AluOp::iter() {
            assert!(op.to_primitive() < 0b100_0000);
            assert_eq!(Some(op), AluOp::from_primitive(op.to_primitive()));
        }
    }

    #[test]
    fn every_op_has_a_mnemonic() {
        for op in AluOp::iter() {
            let comp = Computation { source: Source::A, op };
            assert!(comp.mnemonic().is_some(), "{:?}", op);
        }
    }

    #[test]
    fn table_entries() {
        for (mnemonic, bits) in [
            ("0", 0b0101010),
            ("1", 0b0111111),
            ("-1", 0b0111010),
            ("D", 0b0001100),
            ("A", 0b0110000),
            ("M", 0b1110000),
            ("!D", 0b0001101),
            ("!A", 0b0110001),
            ("!M", 0b1110001),
            ("-D", 0b0001111),
            ("-A", 0b0110011),
            ("-M", 0b1110011),
            ("D+1", 0b0011111),
            ("A+1", 0b0110111),
            ("M+1", 0b1110111),
            ("D-1", 0b0001110),
            ("A-1", 0b0110010),
            ("M-1", 0b1110010),
            ("D+A", 0b0000010),
            ("D+M", 0b1000010),
            ("D-A", 0b0010011),
            ("D-M", 0b1010011),
            ("A-D", 0b0000111),
            ("M-D", 0b1000111),
            ("D&A", 0b0000000),
            ("D&M", 0b1000000),
            ("D|A", 0b0010101),
            ("D|M", 0b1010101),
        ] {
            let comp = Computation::parse(mnemonic).unwrap();
            assert_eq!(bits, comp.bits(), "{}", mnemonic);
        }
    }

    #[test]
    fn memory_forms_share_alu_codes() {
        for mnemonic in computation_mnemonics().filter(|m| m.contains('M')) {
            let memory = Computation::parse(mnemonic).unwrap();
            let register = Computation::parse(&mnemonic.replace('M', "A")).unwrap();
            assert_eq!(Source::M, memory.source);
            assert_eq!(Source::A, register.source);
            assert_eq!(register.op, memory.op);
        }
    }

    #[test]
    fn commuted_addition() {
        assert_eq!(Computation::parse("D+A"), Computation::parse("A+D"));
        assert_eq!(Computation::parse("D+M"), Computation::parse("M+D"));
        assert_eq!(Some("D+M"), Computation::parse("M+D").unwrap().mnemonic());
    }

    #[test]
    fn unknown_expressions() {
        for expression in ["", "D+2", "A+M", "M&D", "D + 1", "d+1", "MD"] {
            assert_eq!(None, Computation::parse(expression), "{}", expression);
        }
    }

    #[test]
    fn constants_have_no_memory_form() {
        let comp = Computation { source: Source::M, op: AluOp::Zero };
        assert_eq!(None, comp.mnemonic());
        assert_eq!("<1101010>", comp.to_string());
    }
}
