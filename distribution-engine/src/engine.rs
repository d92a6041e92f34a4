//! Main distribution engine
//!
//! Orchestrates deductions, weight resolution, allocation and reporting.

use crate::{
    allocator::Allocator,
    config::EngineConfig,
    deductions::DeductionCalculator,
    policy::Policy,
    report::{self, ReportInput},
    types::{DistributionParams, DistributionResult},
    Result,
};

/// Distribution engine
///
/// Holds only immutable configuration; a single instance can serve any
/// number of concurrent callers.
#[derive(Debug, Clone)]
pub struct DistributionEngine {
    /// Configuration
    config: EngineConfig,

    /// Deduction calculator
    deductions: DeductionCalculator,

    /// Largest-remainder allocator
    allocator: Allocator,
}

impl DistributionEngine {
    /// Create new distribution engine
    pub fn new(config: EngineConfig) -> Self {
        let deductions = DeductionCalculator::new(config.currency.clone());
        let allocator = Allocator::new(config.currency.clone());

        Self {
            config,
            deductions,
            allocator,
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculate a distribution
    ///
    /// Fails only for an unsupported pattern or a custom pattern without
    /// weights; every other irregularity is reported in
    /// `summary.warnings`.
    pub fn calculate(&self, params: &DistributionParams) -> Result<DistributionResult> {
        let policy = Policy::from_params(params, self.config.hybrid)?;

        tracing::debug!(
            pattern = %policy.pattern(),
            beneficiaries = params.beneficiaries.len(),
            total_amount = %params.total_amount,
            "Starting distribution"
        );

        // Step 1: Deductions
        let deductions = self.deductions.compute(params.total_amount, &params.deductions);
        tracing::debug!(
            deductions = %deductions.breakdown.total,
            distributable = %deductions.distributable_amount,
            "Deductions applied"
        );

        // Step 2: Weights
        let weights = policy.resolve(&self.config, params);

        // Step 3: Allocation
        let amounts = self
            .allocator
            .allocate(deductions.distributable_amount, &weights.weights());

        // Step 4: Report
        let result = report::assemble(ReportInput {
            beneficiaries: &params.beneficiaries,
            deductions,
            weights,
            amounts,
            pattern_used: policy.label(),
            currency: self.config.currency.code.clone(),
        });

        tracing::info!(
            pattern = %policy.pattern(),
            beneficiaries = result.summary.beneficiaries_count,
            distributable = %result.summary.distributable_amount,
            distributed = %result.summary.total_distributed,
            warnings = result.summary.warnings.len(),
            "Distribution calculated"
        );

        Ok(result)
    }

    /// Calculate many independent distributions
    ///
    /// One result per input, in the same order; a failure in one does not
    /// affect the others.
    pub fn calculate_batch(&self, batch: &[DistributionParams]) -> Vec<Result<DistributionResult>> {
        batch.iter().map(|params| self.calculate(params)).collect()
    }
}

impl Default for DistributionEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// Calculate a distribution with the default configuration
pub fn calculate(params: &DistributionParams) -> Result<DistributionResult> {
    DistributionEngine::default().calculate(params)
}
