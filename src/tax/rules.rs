use rust_decimal::Decimal;
use serde::Deserialize;

/// Parameters of the capital-gains rule set.
///
/// Sales whose total value does not exceed `exemption_threshold` are tax
/// free; taxable profit is charged at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxRules {
    pub exemption_threshold: Decimal,
    pub rate: Decimal,
}

impl TaxRules {
    /// R$ 20.000,00 per sale, 20% on profit
    pub fn standard() -> Self {
        Self {
            exemption_threshold: Decimal::from(20000),
            rate: Decimal::new(20, 2),
        }
    }
}

impl Default for TaxRules {
    fn default() -> Self {
        Self::standard()
    }
}
