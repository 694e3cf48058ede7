use std::io::{self, Write};

use hack_common::hexfile::HexFile;
use hack_common::Instruction;

use crate::session::SourceLine;

#[derive(Clone, Copy, Display, Debug, PartialEq, Eq)]
#[derive(EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One 16-character binary string per word.
    Text,
    /// Two bytes per word, big-endian, no header.
    Bin,
    /// Logisim `v2.0 raw` image.
    Hex,
}

/// Assembled words together with the lines they came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineCode {
    words: Vec<u16>,
    sources: Vec<SourceLine>,
}

impl MachineCode {
    pub fn new(words: Vec<u16>, sources: Vec<SourceLine>) -> Self {
        debug_assert_eq!(words.len(), sources.len());
        Self { words, sources }
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn sources(&self) -> &[SourceLine] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn to_text_lines(&self) -> Vec<String> {
        self.words.iter().map(|w| format!("{:016b}", w)).collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    pub fn to_hex_file(&self) -> HexFile {
        HexFile::from_words(&self.words)
    }

    /// `address  word  source  ; decoded` per instruction.
    pub fn listing(&self) -> Vec<String> {
        self.words
            .iter()
            .zip(&self.sources)
            .enumerate()
            .map(|(pc, (word, source))| {
                let decoded = Instruction::decode(*word)
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| "?".to_owned());
                format!(
                    "{:05} {:04x} {:016b}  {:<24} ; {}",
                    pc,
                    word,
                    word,
                    source.text(),
                    decoded)
            })
            .collect()
    }

    pub fn write_to<W: Write>(&self, format: OutputFormat, out: &mut W) -> io::Result<()> {
        match format {
            OutputFormat::Text => {
                for line in self.to_text_lines() {
                    writeln!(out, "{}", line)?;
                }
            }
            OutputFormat::Bin => out.write_all(&self.to_bytes())?,
            OutputFormat::Hex => self.to_hex_file().write(out)?,
        }
        out.flush()
    }
}
