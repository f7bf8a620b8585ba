//! capital-gains - capital gains tax on stock operations
//!
//! This library computes the tax due on each operation of a simulation
//! (an ordered list of buys and sells) using a weighted average cost basis,
//! loss carryforward and a per-sale exemption threshold.

pub mod config;
pub mod error;
pub mod operation;
pub mod tax;
pub mod utils;
pub mod wire;

pub use error::CapitalGainsError;
pub use operation::{Operation, OperationKind};
pub use tax::{TaxEngine, TaxResult, TaxRules};
