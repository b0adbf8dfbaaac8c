//! Demo data command implementation

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use flowcast_core::import::write_csv;
use flowcast_core::{SyntheticGenerator, Transaction};
use tracing::info;

use super::parse_as_of;

pub fn cmd_demo(
    seed: Option<u64>,
    as_of: Option<&str>,
    output: Option<&Path>,
    csv: bool,
) -> Result<()> {
    let anchor = parse_as_of(as_of)?;
    let mut generator = match seed {
        Some(seed) => SyntheticGenerator::with_seed(seed),
        None => SyntheticGenerator::new(),
    };
    let transactions = generator.generate(anchor);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_transactions(BufWriter::new(file), &transactions, csv)?;
            info!(
                path = %path.display(),
                count = transactions.len(),
                "Wrote demo transactions"
            );
            eprintln!(
                "✅ Wrote {} transactions to {}",
                transactions.len(),
                path.display()
            );
        }
        None => write_transactions(io::stdout().lock(), &transactions, csv)?,
    }

    Ok(())
}

fn write_transactions<W: Write>(mut writer: W, transactions: &[Transaction], csv: bool) -> Result<()> {
    if csv {
        write_csv(writer, transactions)?;
    } else {
        serde_json::to_writer_pretty(&mut writer, transactions)?;
        writeln!(writer)?;
        writer.flush()?;
    }
    Ok(())
}
