//! Per-run assembler state. A fresh [`Session`] is built for every run so
//! labels and variables never leak from one program into the next.

use std::collections::BTreeMap;
use std::fmt;

use hack_common::PREDEFINED;
use log::debug;

use crate::config::AssemblerConfig;
use crate::error::AsmErrorKind;

/// A retained source line: 0-based index into the raw input plus the trimmed,
/// comment-free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    index: usize,
    text: String,
}

impl SourceLine {
    pub fn new(index: usize, text: &str) -> Self {
        Self {
            index,
            text: text.to_owned(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number for diagnostics.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.number(), self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Predefined,
    Label,
    Variable,
}

#[derive(Debug)]
pub struct Session {
    config: AssemblerConfig,
    symbols: BTreeMap<String, (u16, SymbolKind)>,
    // u32 so the cursor can step past a ceiling of 0xFFFF
    next_free: u32,
}

impl Session {
    pub fn new(config: AssemblerConfig) -> Self {
        let symbols = PREDEFINED.iter()
            .map(|(name, addr)| (name.to_string(), (*addr, SymbolKind::Predefined)))
            .collect();

        Self {
            config,
            symbols,
            next_free: config.variable_base as u32,
        }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    pub fn bind_label(&mut self, name: &str, address: usize) -> Result<u16, AsmErrorKind> {
        if address > self.config.rom_max as usize {
            return Err(AsmErrorKind::NotEnoughRom);
        }
        if self.symbols.contains_key(name) {
            return Err(AsmErrorKind::LabelRedeclared(name.to_owned()));
        }

        let address = address as u16;
        debug!("label {} = {}", name, address);
        self.symbols.insert(name.to_owned(), (address, SymbolKind::Label));
        Ok(address)
    }

    /// Binds `name` to the next free RAM address unless it is already bound.
    pub fn reserve_variable(&mut self, name: &str) -> Result<u16, AsmErrorKind> {
        if let Some((address, _)) = self.symbols.get(name) {
            return Ok(*address);
        }
        if self.next_free > self.config.ram_max as u32 {
            return Err(AsmErrorKind::NotEnoughRam);
        }

        let address = self.next_free as u16;
        self.next_free += 1;
        debug!("variable {} = {}", name, address);
        self.symbols.insert(name.to_owned(), (address, SymbolKind::Variable));
        Ok(address)
    }

    pub fn resolve(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).map(|(address, _)| *address)
    }

    pub fn kind(&self, name: &str) -> Option<SymbolKind> {
        self.symbols.get(name).map(|(_, kind)| *kind)
    }

    pub fn next_free(&self) -> u32 {
        self.next_free
    }

    /// Labels and variables bound during this run, by name.
    pub fn bound_symbols(&self) -> impl Iterator<Item = (&str, u16, SymbolKind)> + '_ {
        self.symbols.iter()
            .filter(|(_, (_, kind))| *kind != SymbolKind::Predefined)
            .map(|(name, (address, kind))| (name.as_str(), *address, *kind))
    }
}
