//! Output formatting module for CLI display
//!
//! Keeps presentation separate from the tax calculation: JSON lines for
//! machines, tables for people.

use capital_gains::operation::Operation;
use capital_gains::tax::TaxResult;
use capital_gains::utils::{format_currency, format_decimal_br};
use capital_gains::wire;
use capital_gains::CapitalGainsError;
use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{
    settings::{object::Columns, Alignment, Style},
    Table, Tabled,
};

use super::OutputFormat;

/// Render one processed simulation in the requested format
pub fn format_simulation(
    format: OutputFormat,
    index: usize,
    operations: &[Operation],
    results: &[TaxResult],
) -> Result<String, CapitalGainsError> {
    match format {
        OutputFormat::Json => wire::format_results(results),
        OutputFormat::Table => format_simulation_table(index, operations, results),
    }
}

/// Format a simulation as a table of operations and the tax due on each
pub fn format_simulation_table(
    index: usize,
    operations: &[Operation],
    results: &[TaxResult],
) -> Result<String, CapitalGainsError> {
    #[derive(Tabled)]
    struct OperationRow {
        #[tabled(rename = "#")]
        position: usize,
        #[tabled(rename = "Operation")]
        kind: String,
        #[tabled(rename = "Unit Cost")]
        unit_cost: String,
        #[tabled(rename = "Quantity")]
        quantity: i64,
        #[tabled(rename = "Total")]
        total: String,
        #[tabled(rename = "Tax")]
        tax: String,
    }

    let rows = operations
        .iter()
        .zip(results)
        .enumerate()
        .map(|(i, (op, result))| {
            Ok(OperationRow {
                position: i + 1,
                kind: op.kind.as_str().to_uppercase(),
                unit_cost: format_decimal_br(op.unit_cost),
                quantity: op.quantity,
                total: format_decimal_br(op.total_value()?),
                tax: if result.tax > Decimal::ZERO {
                    format_decimal_br(result.tax).yellow().bold().to_string()
                } else {
                    format_decimal_br(result.tax)
                },
            })
        })
        .collect::<Result<Vec<_>, CapitalGainsError>>()?;

    let mut output = format!("\n{} Simulation {}\n", "📊".cyan().bold(), index);

    let mut table = Table::new(&rows);
    table.with(Style::modern());
    // Right-align all columns except # (0) and Operation (1)
    table.modify(Columns::new(2..), Alignment::right());
    output.push_str(&table.to_string());

    let total_tax = results
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.tax))
        .ok_or_else(|| CapitalGainsError::ArithmeticOverflow("total tax".to_string()))?;
    output.push_str(&format!(
        "\n{:<12} {}\n",
        "Total tax:".bold(),
        format_currency(total_tax)
    ));

    Ok(output)
}

/// Error line printed in place of a simulation's result
pub fn format_error(err: &CapitalGainsError) -> String {
    match err {
        CapitalGainsError::InvalidJson(_) => "Error: Invalid JSON format".to_string(),
        other => format!("Error: {}", other),
    }
}
