extern crate strum;
#[macro_use]
extern crate strum_macros;

extern crate packed_struct;
extern crate packed_struct_codegen;
use std::collections::BTreeMap;
use std::fmt;

use packed_struct::prelude::*;

#[macro_use]
extern crate bitflags;

pub mod comp;
pub mod hexfile;
pub mod word;

pub use comp::*;
pub use word::*;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Dest: u8 {
        const M = 0b001;
        const D = 0b010;
        const A = 0b100;
    }
}

impl Dest {
    pub fn from_letter(c: char) -> Option<Dest> {
        match c {
            'A' => Some(Dest::A),
            'D' => Some(Dest::D),
            'M' => Some(Dest::M),
            _ => None,
        }
    }
}

impl fmt::Display for Dest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, letter) in [(Dest::A, 'A'), (Dest::M, 'M'), (Dest::D, 'D')] {
            if self.contains(flag) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Display, Debug, PartialEq, Eq, Hash)]
#[derive(EnumCount, EnumIter, EnumString)]
#[derive(PrimitiveEnum_u8)]
pub enum Jump {
    JGT = 0b001, // out > 0
    JEQ = 0b010, // out == 0
    JGE = 0b011, // out >= 0
    JLT = 0b100, // out < 0
    JNE = 0b101, // out != 0
    JLE = 0b110, // out <= 0
    JMP = 0b111, // always
}

/// Which register feeds the ALU's second input.
#[derive(Clone, Copy, Display, Debug, PartialEq, Eq, Hash)]
#[derive(EnumCount, EnumIter)]
#[derive(PrimitiveEnum_u8)]
pub enum Source {
    A = 0,
    M = 1,
}

impl Source {
    /// Presence of the memory operand anywhere in the expression selects `M`.
    pub fn of(expression: &str) -> Source {
        if expression.contains('M') {
            Source::M
        } else {
            Source::A
        }
    }
}

pub const WORD_BITS: u32 = 16;

pub const SCREEN: u16 = 0x4000;
pub const KBD: u16 = 0x6000;

pub const REGISTER_ALIAS_COUNT: u16 = 16;
pub const VARIABLE_BASE: u16 = REGISTER_ALIAS_COUNT;

// An address instruction carries 15 bits; bit 15 selects the instruction class.
pub const ADDRESS_MASK: u16 = 0x7FFF;
pub const COMPUTE_MARKER: u16 = 0b111 << 13;

pub const ROM_MAX: u16 = ADDRESS_MASK;
pub const RAM_MAX: u16 = SCREEN - 1;

const PREDEFINED_SYMBOLS: &[(&str, u16)] = &[
    ("SCREEN", SCREEN),
    ("KBD", KBD),
    ("R0", 0),
    ("R1", 1),
    ("R2", 2),
    ("R3", 3),
    ("R4", 4),
    ("R5", 5),
    ("R6", 6),
    ("R7", 7),
    ("R8", 8),
    ("R9", 9),
    ("R10", 10),
    ("R11", 11),
    ("R12", 12),
    ("R13", 13),
    ("R14", 14),
    ("R15", 15),
];

use lazy_static::lazy_static;
lazy_static! {
    pub static ref PREDEFINED: BTreeMap<&'static str, u16> =
        PREDEFINED_SYMBOLS.iter().copied().collect();
}
