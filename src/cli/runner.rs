use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use capital_gains::operation::Operation;
use capital_gains::tax::{TaxEngine, TaxResult, TaxRules};
use capital_gains::wire;
use capital_gains::CapitalGainsError;

use super::formatters::{format_error, format_simulation};
use super::OutputFormat;

/// Counters for one run of the read loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub simulations: usize,
    pub failed: usize,
}

/// Parse one simulation line and compute its taxes with a fresh engine.
pub fn process_line(
    line: &str,
    rules: &TaxRules,
) -> Result<(Vec<Operation>, Vec<TaxResult>), CapitalGainsError> {
    let operations = wire::parse_operations(line)?;
    let results = TaxEngine::with_rules(*rules).calculate_taxes(&operations)?;
    Ok((operations, results))
}

/// Read simulations line by line until EOF or the first empty line, writing
/// one rendered result (or error line) per simulation in input order.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    rules: &TaxRules,
    format: OutputFormat,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        summary.simulations += 1;
        let index = summary.simulations;

        let rendered = process_line(line, rules).and_then(|(operations, results)| {
            info!(
                simulation = index,
                operations = operations.len(),
                "simulation processed"
            );
            format_simulation(format, index, &operations, &results)
        });

        let output = match rendered {
            Ok(output) => output,
            Err(err) => {
                summary.failed += 1;
                warn!(simulation = index, error = %err, "simulation rejected");
                format_error(&err)
            }
        };

        writeln!(writer, "{}", output).context("failed to write output")?;
    }

    writer.flush().context("failed to flush output")?;
    Ok(summary)
}
