extern crate pest;
#[macro_use]
extern crate pest_derive;

extern crate strum;
#[macro_use]
extern crate strum_macros;

use log::info;

pub mod config;
pub mod encode;
pub mod error;
pub mod output;
pub mod preprocess;
pub mod session;
mod syntax;

pub use config::AssemblerConfig;
pub use error::{AsmError, AsmErrorKind};
pub use output::{MachineCode, OutputFormat};
pub use session::{Session, SourceLine, SymbolKind};

use encode::second_pass;
use preprocess::first_pass;

/// Two-pass Hack assembler. Each call to [`Assembler::assemble`] runs in a
/// session of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct Assembler {
    config: AssemblerConfig,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn assemble<I, S>(&self, source: I) -> Result<MachineCode, AsmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.assemble_session(source).map(|(code, _)| code)
    }

    /// Like [`Assembler::assemble`], also handing back the session so the
    /// bound labels and variables can be inspected.
    pub fn assemble_session<I, S>(&self, source: I) -> Result<(MachineCode, Session), AsmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut session = Session::new(self.config);
        let lines = first_pass(&mut session, source)?;
        let words = second_pass(&session, &lines)?;
        info!("assembled {} instructions", words.len());
        Ok((MachineCode::new(words, lines), session))
    }
}

pub fn assemble<I, S>(source: I) -> Result<MachineCode, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Assembler::new().assemble(source)
}

pub fn assemble_from_str(input: &str) -> Result<MachineCode, AsmError> {
    assemble(input.lines())
}
