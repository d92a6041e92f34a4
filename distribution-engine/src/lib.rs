//! Waqf Distribution Engine
//!
//! Allocates an endowment's periodic net revenue among its beneficiaries.
//!
//! # Pipeline
//!
//! 1. **Deductions**: nazer, reserve, waqf corpus, maintenance and development
//!    shares are taken off the gross amount
//! 2. **Weights**: the selected policy (equal, shariah, need-based, custom or
//!    hybrid) assigns a non-negative weight to every beneficiary
//! 3. **Allocation**: largest-remainder apportionment to the currency minor unit
//! 4. **Report**: per-beneficiary results and a summary block
//!
//! # Invariants
//!
//! - Σ(allocated_amount) == distributable_amount, to the minor unit
//! - deductions.total == Σ(individual deductions)
//! - distributable_amount == total_amount − deductions.total, never negative
//! - One result per input beneficiary, in input order
//!
//! # Example
//!
//! ```
//! use distribution_engine::{calculate, Beneficiary, DeductionsConfig, DistributionParams};
//! use rust_decimal::Decimal;
//!
//! let params = DistributionParams {
//!     total_amount: Decimal::from(100_000),
//!     beneficiaries: vec![
//!         Beneficiary::new("b1", "Ahmad", "son"),
//!         Beneficiary::new("b2", "Fatimah", "daughter"),
//!     ],
//!     deductions: DeductionsConfig {
//!         nazer_percentage: Decimal::new(5, 2),
//!         ..Default::default()
//!     },
//!     pattern: "shariah".to_string(),
//!     custom_weights: None,
//!     hybrid_config: None,
//! };
//!
//! let result = calculate(&params)?;
//! assert_eq!(result.summary.distributable_amount, Decimal::from(95_000));
//! assert_eq!(result.summary.total_distributed, Decimal::from(95_000));
//! # Ok::<(), distribution_engine::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod allocator;
pub mod config;
pub mod deductions;
pub mod engine;
pub mod error;
pub mod policy;
pub mod report;
pub mod types;
pub mod weights;

// Re-exports
pub use config::EngineConfig;
pub use engine::{calculate, DistributionEngine};
pub use error::{Error, Result};
pub use policy::{DistributionPattern, Policy};
pub use types::*;
