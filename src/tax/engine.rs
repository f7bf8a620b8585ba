use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::rules::TaxRules;
use crate::error::CapitalGainsError;
use crate::operation::{Operation, OperationKind};
use crate::utils::round_currency;

/// Tax owed on a single operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxResult {
    pub tax: Decimal,
}

impl TaxResult {
    pub fn new(tax: Decimal) -> Self {
        Self { tax }
    }

    pub fn zero() -> Self {
        Self::new(Decimal::ZERO)
    }
}

fn overflow(what: &str) -> CapitalGainsError {
    CapitalGainsError::ArithmeticOverflow(what.to_string())
}

/// Weighted-average cost engine for one simulation.
///
/// Holds the running average price, the share count and the loss carried
/// forward. A simulation should get its own engine; `calculate_taxes` resets
/// the state anyway, so a reused engine never leaks a previous run.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    rules: TaxRules,
    weighted_average_price: Decimal,
    total_shares: i64,
    accumulated_loss: Decimal,
}

impl TaxEngine {
    pub fn new() -> Self {
        Self::with_rules(TaxRules::default())
    }

    pub fn with_rules(rules: TaxRules) -> Self {
        Self {
            rules,
            weighted_average_price: Decimal::ZERO,
            total_shares: 0,
            accumulated_loss: Decimal::ZERO,
        }
    }

    pub fn reset_state(&mut self) {
        self.weighted_average_price = Decimal::ZERO;
        self.total_shares = 0;
        self.accumulated_loss = Decimal::ZERO;
    }

    /// Process `operations` in order and return one result per operation.
    ///
    /// Fails only when a value leaves the representable range of `i64`
    /// shares or `Decimal` amounts; no partial results are returned.
    pub fn calculate_taxes(
        &mut self,
        operations: &[Operation],
    ) -> Result<Vec<TaxResult>, CapitalGainsError> {
        self.reset_state();

        let mut results = Vec::with_capacity(operations.len());
        for operation in operations {
            let result = match operation.kind {
                OperationKind::Buy => {
                    self.update_weighted_average(operation.unit_cost, operation.quantity)?;
                    TaxResult::zero()
                }
                OperationKind::Sell => {
                    TaxResult::new(self.calculate_sell_tax(operation.unit_cost, operation.quantity)?)
                }
            };

            debug!(
                kind = %operation.kind,
                unit_cost = %operation.unit_cost,
                quantity = operation.quantity,
                tax = %result.tax,
                average_price = %self.weighted_average_price,
                shares = self.total_shares,
                accumulated_loss = %self.accumulated_loss,
                "processed operation"
            );
            results.push(result);
        }

        Ok(results)
    }

    /// Blend a purchase into the running average price.
    ///
    /// The first lot (or a lot bought after the position went flat) sets the
    /// average as-is; later lots re-average and round to cents.
    pub fn update_weighted_average(
        &mut self,
        unit_cost: Decimal,
        quantity: i64,
    ) -> Result<(), CapitalGainsError> {
        if self.total_shares == 0 {
            self.weighted_average_price = unit_cost;
            self.total_shares = quantity;
            return Ok(());
        }

        let held_value = self
            .weighted_average_price
            .checked_mul(Decimal::from(self.total_shares))
            .ok_or_else(|| overflow("value of held shares"))?;
        let lot_value = unit_cost
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| overflow("purchase value"))?;
        let total_value = held_value
            .checked_add(lot_value)
            .ok_or_else(|| overflow("position value"))?;
        let total_shares = self
            .total_shares
            .checked_add(quantity)
            .ok_or_else(|| overflow("share count"))?;

        // Buying back an oversold position can land on zero shares; keep the last average
        if total_shares == 0 {
            self.total_shares = 0;
            trace!("position flattened by purchase, average unchanged");
            return Ok(());
        }

        let average = total_value
            .checked_div(Decimal::from(total_shares))
            .ok_or_else(|| overflow("weighted average price"))?;
        self.total_shares = total_shares;
        self.weighted_average_price = round_currency(average);
        trace!(
            average_price = %self.weighted_average_price,
            shares = self.total_shares,
            "weighted average updated"
        );
        Ok(())
    }

    /// Tax due on a sale, updating the share count and the carried loss.
    ///
    /// Profit is measured against the average price before the sale. Losses
    /// accumulate unrounded; sales up to the exemption threshold are tax free
    /// and leave the carried loss untouched.
    pub fn calculate_sell_tax(
        &mut self,
        unit_cost: Decimal,
        quantity: i64,
    ) -> Result<Decimal, CapitalGainsError> {
        let total_shares = self
            .total_shares
            .checked_sub(quantity)
            .ok_or_else(|| overflow("share count"))?;

        let quantity = Decimal::from(quantity);
        let operation_value = unit_cost
            .checked_mul(quantity)
            .ok_or_else(|| overflow("sale value"))?;
        let cost_basis = self
            .weighted_average_price
            .checked_mul(quantity)
            .ok_or_else(|| overflow("cost basis"))?;
        let profit_or_loss = operation_value
            .checked_sub(cost_basis)
            .ok_or_else(|| overflow("profit or loss"))?;

        self.total_shares = total_shares;

        if profit_or_loss < Decimal::ZERO {
            self.accumulated_loss = self
                .accumulated_loss
                .checked_add(profit_or_loss.abs())
                .ok_or_else(|| overflow("accumulated loss"))?;
            return Ok(Decimal::ZERO);
        }

        if operation_value <= self.rules.exemption_threshold {
            return Ok(Decimal::ZERO);
        }

        let taxable_profit = if self.accumulated_loss > Decimal::ZERO {
            if profit_or_loss <= self.accumulated_loss {
                self.accumulated_loss -= profit_or_loss;
                return Ok(Decimal::ZERO);
            }
            let excess = profit_or_loss - self.accumulated_loss;
            self.accumulated_loss = Decimal::ZERO;
            excess
        } else {
            profit_or_loss
        };

        let tax = taxable_profit
            .checked_mul(self.rules.rate)
            .map(round_currency)
            .ok_or_else(|| overflow("tax"))?;

        // Sub-cent taxes round to 0.00; report them as plain zero
        if tax.is_zero() {
            return Ok(Decimal::ZERO);
        }
        Ok(tax)
    }

    pub fn weighted_average_price(&self) -> Decimal {
        self.weighted_average_price
    }

    pub fn total_shares(&self) -> i64 {
        self.total_shares
    }

    pub fn accumulated_loss(&self) -> Decimal {
        self.accumulated_loss
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }
}

impl Default for TaxEngine {
    fn default() -> Self {
        Self::new()
    }
}
