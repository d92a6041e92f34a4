//! Caller-supplied weights

use super::{fit_weights, ResolvedWeight, WeightResolver, WeightSet};
use crate::types::{Beneficiary, DistributionWarning};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Resolves weights from an explicit id -> weight map
///
/// Beneficiaries missing from the map get weight zero. When the weights of
/// the beneficiary set add up to exactly 100 they are taken as target
/// percentages and echoed back unchanged.
#[derive(Debug, Clone)]
pub struct CustomResolver<'a> {
    weights: &'a HashMap<String, Decimal>,
}

impl<'a> CustomResolver<'a> {
    /// Create a resolver over caller weights
    pub fn new(weights: &'a HashMap<String, Decimal>) -> Self {
        Self { weights }
    }
}

impl WeightResolver for CustomResolver<'_> {
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet {
        let mut warnings = Vec::new();

        let weights: Vec<Option<Decimal>> = beneficiaries
            .iter()
            .map(|b| {
                self.weights.get(&b.id).map(|&weight| {
                    if weight.is_sign_negative() && !weight.is_zero() {
                        tracing::warn!(beneficiary_id = %b.id, weight = %weight, "Negative custom weight treated as zero");
                        warnings.push(DistributionWarning::NegativeWeight {
                            beneficiary_id: b.id.clone(),
                            weight,
                        });
                        Decimal::ZERO
                    } else {
                        weight
                    }
                })
            })
            .collect();

        let supplied: Vec<Decimal> = weights.iter().map(|w| w.unwrap_or(Decimal::ZERO)).collect();
        let fitted = fit_weights(&supplied);
        if fitted.divisor != Decimal::ONE {
            tracing::warn!(divisor = %fitted.divisor, "Custom weights overflow when summed, scaling down");
            warnings.push(DistributionWarning::WeightsRescaled {
                divisor: fitted.divisor,
            });
        }
        let total = fitted.total;
        let as_percentages = total == Decimal::ONE_HUNDRED;

        let entries = weights
            .into_iter()
            .zip(fitted.weights)
            .zip(beneficiaries)
            .map(|((supplied, weight), b)| match supplied {
                Some(_) => {
                    let percentage = if as_percentages {
                        weight
                    } else if total.is_zero() {
                        Decimal::ZERO
                    } else {
                        (weight / total * Decimal::ONE_HUNDRED).round_dp(2)
                    };
                    ResolvedWeight {
                        weight,
                        basis: format!("Custom share: weight {} of {}", weight.normalize(), total.normalize()),
                        percentage: Some(percentage),
                    }
                }
                None => {
                    tracing::debug!(beneficiary_id = %b.id, "No custom weight supplied, excluded");
                    ResolvedWeight {
                        weight: Decimal::ZERO,
                        basis: "Custom share: no weight supplied, excluded".to_string(),
                        percentage: Some(Decimal::ZERO),
                    }
                }
            })
            .collect();

        WeightSet { entries, warnings }
    }
}
