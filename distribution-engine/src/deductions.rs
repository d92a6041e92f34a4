//! Institutional deductions
//!
//! Turns the five percentage rates into rounded amounts and the net
//! distributable amount. Deductions never consume more than the gross
//! amount: when the rates would, they are capped in declaration order and a
//! warning is raised instead of an error.

use crate::{
    config::CurrencyConfig,
    types::{DeductionsBreakdown, DeductionsConfig, DistributionWarning},
};
use rust_decimal::Decimal;

/// Result of applying deductions to a gross amount
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionOutcome {
    /// Gross amount on the currency grid
    pub total_amount: Decimal,

    /// Rounded deduction amounts
    pub breakdown: DeductionsBreakdown,

    /// `total_amount - breakdown.total`, never negative
    pub distributable_amount: Decimal,

    /// Degradations applied
    pub warnings: Vec<DistributionWarning>,
}

/// Deduction calculator
#[derive(Debug, Clone)]
pub struct DeductionCalculator {
    currency: CurrencyConfig,
}

impl DeductionCalculator {
    /// Create new deduction calculator
    pub fn new(currency: CurrencyConfig) -> Self {
        Self { currency }
    }

    /// Compute deductions and the distributable amount
    pub fn compute(&self, total_amount: Decimal, config: &DeductionsConfig) -> DeductionOutcome {
        let mut warnings = Vec::new();

        let mut gross = self.currency.round(total_amount);
        if gross.is_sign_negative() && !gross.is_zero() {
            tracing::warn!(amount = %total_amount, "Negative total amount treated as zero");
            warnings.push(DistributionWarning::NegativeTotalAmount { amount: total_amount });
            gross = Decimal::ZERO;
        }

        let mut amounts = [Decimal::ZERO; 5];
        for (slot, (name, rate)) in amounts.iter_mut().zip(config.rates()) {
            let rate = self.clamp_rate(name, rate, &mut warnings);
            *slot = self.currency.round(gross * rate);
        }

        let requested = amounts
            .iter()
            .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(*amount));
        if requested.map_or(true, |requested| requested > gross) {
            let requested = requested.unwrap_or(Decimal::MAX);
            tracing::warn!(
                requested = %requested,
                available = %gross,
                "Deductions exceed total amount; distributable amount clamped to zero"
            );
            warnings.push(DistributionWarning::DeductionsExceedTotal {
                requested,
                available: gross,
            });

            let mut remaining = gross;
            for amount in amounts.iter_mut() {
                *amount = (*amount).min(remaining);
                remaining -= *amount;
            }
        }

        let [nazer_share, reserve, waqf_corpus, maintenance, development] = amounts;
        let mut breakdown = DeductionsBreakdown {
            nazer_share,
            reserve,
            waqf_corpus,
            maintenance,
            development,
            total: Decimal::ZERO,
        };
        breakdown.total = breakdown.sum_of_parts();

        DeductionOutcome {
            total_amount: gross,
            distributable_amount: (gross - breakdown.total).max(Decimal::ZERO),
            breakdown,
            warnings,
        }
    }

    fn clamp_rate(&self, name: &str, rate: Decimal, warnings: &mut Vec<DistributionWarning>) -> Decimal {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            tracing::warn!(deduction = name, rate = %rate, "Deduction rate outside [0, 1], clamping");
            warnings.push(DistributionWarning::RateOutOfRange {
                deduction: name.to_string(),
                rate,
            });
            rate.max(Decimal::ZERO).min(Decimal::ONE)
        } else {
            rate
        }
    }
}

impl Default for DeductionCalculator {
    fn default() -> Self {
        Self::new(CurrencyConfig::default())
    }
}
