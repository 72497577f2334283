use std::{
    fs::File,
    io::{self, BufWriter},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use lzw12::{CodewordReader, Decoder, SymbolTable, DEFAULT_TABLE_SIZE};

#[derive(Parser)]
#[command(name = "unlzw12")]
#[command(about = "Decompress a file of 12 bit LZW codewords")]
struct Args {
    /// Compressed input file
    input: PathBuf,

    /// Capacity of the symbol table, at least 256
    #[arg(short, long, default_value_t = DEFAULT_TABLE_SIZE)]
    table_size: usize,

    /// Write to this file instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let table = SymbolTable::new(args.table_size)?;
    let reader = CodewordReader::open(&args.input)
        .with_context(|| format!("Couldn't open {}", args.input.display()))?;
    debug!(
        "{}: {} bytes, {} codewords, table size {}",
        args.input.display(),
        reader.byte_len(),
        reader.codeword_count(),
        args.table_size
    );

    let decoder = Decoder::with_table(reader, table);
    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Couldn't create {}", path.display()))?;
            decoder.decode_to(BufWriter::new(file))
        }
        None => decoder.decode_to(BufWriter::new(io::stdout().lock())),
    }
    .with_context(|| format!("Couldn't decode {}", args.input.display()))?;

    info!("Decoded {} bytes from {}", written, args.input.display());
    Ok(())
}
