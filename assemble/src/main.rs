use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use hack_assemble::{Assembler, OutputFormat};

/// Hack assembler
#[derive(Parser, Debug)]
#[command(name = "hackasm", version, about)]
struct Cli {
    /// Source file (.asm)
    #[arg(short = 'i', long = "infile", value_name = "FILE")]
    infile: PathBuf,

    /// Output file, stdout when omitted
    #[arg(short = 'o', long = "outfile", value_name = "FILE")]
    outfile: Option<PathBuf>,

    /// Output format: text, bin or hex
    #[arg(short = 'f', long = "format", default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print a listing to stderr
    #[arg(short = 'l', long = "list")]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    debug!("{:?}", cli);

    let source = fs::read_to_string(&cli.infile)
        .with_context(|| format!("reading {}", cli.infile.display()))?;
    let (code, session) = Assembler::new()
        .assemble_session(source.lines())
        .with_context(|| format!("assembling {}", cli.infile.display()))?;

    for (name, address, kind) in session.bound_symbols() {
        debug!("{:?} {} = {}", kind, name, address);
    }

    if cli.list {
        for line in code.listing() {
            eprintln!("{}", line);
        }
    }

    match &cli.outfile {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            code.write_to(cli.format, &mut BufWriter::new(file))
                .with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} words to {}", code.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            code.write_to(cli.format, &mut stdout.lock())
                .context("writing stdout")?;
        }
    }

    Ok(())
}
