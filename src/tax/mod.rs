// Tax module - weighted average cost, loss carryforward and per-sale exemption

pub mod engine;
pub mod rules;

pub use engine::{TaxEngine, TaxResult};
pub use rules::TaxRules;
