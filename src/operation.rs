use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::error::CapitalGainsError;

/// Operation kind (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Buy,
    Sell,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Buy => "buy",
            OperationKind::Sell => "sell",
        }
    }
}

impl FromStr for OperationKind {
    type Err = CapitalGainsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(OperationKind::Buy),
            "sell" => Ok(OperationKind::Sell),
            other => Err(CapitalGainsError::InvalidOperationKind(other.to_string())),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single buy or sell instruction within a simulation.
///
/// Prices are kept at the precision they were supplied with; quantities are
/// not range-checked (negative values and over-selling reach the engine as-is).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub unit_cost: Decimal,
    pub quantity: i64,
}

impl Operation {
    /// Build an operation from its wire kind name (`"buy"` or `"sell"`).
    pub fn new(kind: &str, unit_cost: Decimal, quantity: i64) -> Result<Self, CapitalGainsError> {
        Ok(Self::from_kind(kind.parse()?, unit_cost, quantity))
    }

    pub fn from_kind(kind: OperationKind, unit_cost: Decimal, quantity: i64) -> Self {
        Self {
            kind,
            unit_cost,
            quantity,
        }
    }

    pub fn buy(unit_cost: Decimal, quantity: i64) -> Self {
        Self::from_kind(OperationKind::Buy, unit_cost, quantity)
    }

    pub fn sell(unit_cost: Decimal, quantity: i64) -> Self {
        Self::from_kind(OperationKind::Sell, unit_cost, quantity)
    }

    /// Exact, unrounded `unit_cost * quantity`
    pub fn total_value(&self) -> Result<Decimal, CapitalGainsError> {
        self.unit_cost
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CapitalGainsError::ArithmeticOverflow("operation total value".to_string()))
    }
}
