//! Result assembly

use crate::{
    deductions::DeductionOutcome,
    types::{AllocationResult, Beneficiary, DistributionResult, DistributionSummary, DistributionWarning},
    weights::WeightSet,
};
use rust_decimal::Decimal;

/// Everything the assembler needs from the earlier stages
#[derive(Debug)]
pub struct ReportInput<'a> {
    /// Beneficiaries in input order
    pub beneficiaries: &'a [Beneficiary],

    /// Deduction stage output
    pub deductions: DeductionOutcome,

    /// Resolved weights, aligned with `beneficiaries`
    pub weights: WeightSet,

    /// Allocated amounts, aligned with `beneficiaries`
    pub amounts: Vec<Decimal>,

    /// Human-readable policy name
    pub pattern_used: String,

    /// Currency code
    pub currency: String,
}

/// Allocated amount as a percentage of the pool, 2 dp
pub fn share_percentage(amount: Decimal, distributable: Decimal) -> Decimal {
    if distributable.is_zero() {
        return Decimal::ZERO;
    }
    (amount / distributable * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Build per-beneficiary results and the summary block
pub fn assemble(input: ReportInput<'_>) -> DistributionResult {
    let ReportInput {
        beneficiaries,
        deductions,
        weights,
        amounts,
        pattern_used,
        currency,
    } = input;

    let distributable = deductions.distributable_amount;

    let results: Vec<AllocationResult> = beneficiaries
        .iter()
        .zip(weights.entries)
        .zip(amounts)
        .map(|((beneficiary, resolved), amount)| AllocationResult {
            beneficiary_id: beneficiary.id.clone(),
            beneficiary_name: beneficiary.full_name.clone(),
            beneficiary_number: beneficiary.beneficiary_number.clone(),
            allocated_amount: amount,
            percentage: resolved
                .percentage
                .unwrap_or_else(|| share_percentage(amount, distributable)),
            weight: resolved.weight,
            calculation_basis: format!("{}; allocated {} {}", resolved.basis, amount, currency),
        })
        .collect();

    let total_distributed: Decimal = results.iter().map(|r| r.allocated_amount).sum();

    let mut warnings = deductions.warnings;
    warnings.extend(weights.warnings);
    if !distributable.is_zero() && total_distributed.is_zero() && !results.is_empty() {
        tracing::warn!(pattern = %pattern_used, "No beneficiary carries a positive weight; nothing allocated");
        warnings.push(DistributionWarning::NoPositiveWeight);
    }

    DistributionResult {
        summary: DistributionSummary {
            total_amount: deductions.total_amount,
            distributable_amount: distributable,
            total_distributed,
            beneficiaries_count: results.len(),
            deductions: deductions.breakdown,
            pattern_used,
            currency,
            warnings,
        },
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::DeductionsBreakdown, weights::ResolvedWeight};

    fn outcome(distributable: i64) -> DeductionOutcome {
        DeductionOutcome {
            total_amount: Decimal::from(distributable),
            breakdown: DeductionsBreakdown::default(),
            distributable_amount: Decimal::from(distributable),
            warnings: vec![],
        }
    }

    #[test]
    fn test_assemble_preserves_order_and_sums() {
        let beneficiaries = vec![
            Beneficiary::new("b1", "Ahmad", "son"),
            Beneficiary::new("b2", "Fatimah", "daughter"),
        ];
        let weights: WeightSet = vec![
            ResolvedWeight::new(Decimal::from(2), "two"),
            ResolvedWeight::new(Decimal::ONE, "one"),
        ]
        .into_iter()
        .collect();

        let result = assemble(ReportInput {
            beneficiaries: &beneficiaries,
            deductions: outcome(300),
            weights,
            amounts: vec![Decimal::from(200), Decimal::from(100)],
            pattern_used: "Test".to_string(),
            currency: "SAR".to_string(),
        });

        assert_eq!(result.results[0].beneficiary_id, "b1");
        assert_eq!(result.results[1].beneficiary_id, "b2");
        assert_eq!(result.results[0].percentage, Decimal::new(6667, 2));
        assert_eq!(result.results[1].percentage, Decimal::new(3333, 2));
        assert!(result.results[0].calculation_basis.starts_with("two"));
        assert_eq!(result.summary.total_distributed, Decimal::from(300));
        assert_eq!(result.summary.beneficiaries_count, 2);
        assert!(result.summary.warnings.is_empty());
    }

    #[test]
    fn test_percentage_override_is_kept() {
        let beneficiaries = vec![Beneficiary::new("b1", "Ahmad", "son")];
        let weights: WeightSet = vec![ResolvedWeight {
            weight: Decimal::from(50),
            basis: "custom".to_string(),
            percentage: Some(Decimal::from(50)),
        }]
        .into_iter()
        .collect();

        let result = assemble(ReportInput {
            beneficiaries: &beneficiaries,
            deductions: outcome(100),
            weights,
            amounts: vec![Decimal::from(100)],
            pattern_used: "Custom".to_string(),
            currency: "SAR".to_string(),
        });

        assert_eq!(result.results[0].percentage, Decimal::from(50));
    }

    #[test]
    fn test_nothing_allocated_warns() {
        let beneficiaries = vec![Beneficiary::new("b1", "Ahmad", "son")];
        let weights: WeightSet = vec![ResolvedWeight::new(Decimal::ZERO, "none")].into_iter().collect();

        let result = assemble(ReportInput {
            beneficiaries: &beneficiaries,
            deductions: outcome(100),
            weights,
            amounts: vec![Decimal::ZERO],
            pattern_used: "Shariah".to_string(),
            currency: "SAR".to_string(),
        });

        assert_eq!(result.summary.warnings, vec![DistributionWarning::NoPositiveWeight]);
    }

    #[test]
    fn test_share_percentage_zero_pool() {
        assert_eq!(share_percentage(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
    }
}
