use std::fmt;

use packed_struct::prelude::*;

use crate::*;

/// Bit layout of a computation word, numbered from the least significant bit.
#[derive(Debug, PackedStruct)]
#[packed_struct(size_bytes = "2", endian = "msb", bit_numbering = "lsb0")]
pub struct ComputeWord {
    #[packed_field(bits = "0..=2")]
    pub jump: Integer<u8, packed_bits::Bits::<3>>,
    #[packed_field(bits = "3..=5")]
    pub dest: Integer<u8, packed_bits::Bits::<3>>,
    #[packed_field(bits = "6..=11", ty = "enum")]
    pub op: AluOp,
    #[packed_field(bits = "12..=12", ty = "enum")]
    pub source: Source,
    #[packed_field(bits = "13..=15")]
    pub marker: Integer<u8, packed_bits::Bits::<3>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Address(u16),
    Compute {
        dest: Dest,
        comp: Computation,
        jump: Option<Jump>,
    },
}

impl Instruction {
    pub fn encode(&self) -> u16 {
        match self {
            Instruction::Address(address) => address & ADDRESS_MASK,
            Instruction::Compute { dest, comp, jump } => {
                COMPUTE_MARKER
                    | comp.bits() << 6
                    | (dest.bits() as u16) << 3
                    | jump.map_or(0, |j| j.to_primitive() as u16)
            }
        }
    }

    /// Reference decoder. Returns `None` for words no mnemonic can produce.
    pub fn decode(word: u16) -> Option<Instruction> {
        if word & !ADDRESS_MASK == 0 {
            return Some(Instruction::Address(word));
        }

        let fields = ComputeWord::unpack(&word.to_be_bytes()).ok()?;
        if *fields.marker != 0b111 {
            return None;
        }

        let comp = Computation {
            source: fields.source,
            op: fields.op,
        };
        comp.mnemonic()?;

        Some(Instruction::Compute {
            dest: Dest::from_bits_truncate(*fields.dest),
            comp,
            jump: Jump::from_primitive(*fields.jump),
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Address(address) => write!(f, "@{}", address),
            Instruction::Compute { dest, comp, jump } => {
                if !dest.is_empty() {
                    write!(f, "{}=", dest)?;
                }
                write!(f, "{}", comp)?;
                if let Some(jump) = jump {
                    write!(f, ";{}", jump)?;
                }
                Ok(())
            }
        }
    }
}
