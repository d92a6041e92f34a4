//! Mixed Shariah-like and need-based weighting
//!
//! Both component weight vectors are normalized to sum to one before mixing,
//! so neither dominates just because its raw numbers are larger.

use super::{normalize, whole_percent, NeedResolver, ResolvedWeight, ShariahResolver, WeightResolver, WeightSet};
use crate::{
    config::{NeedScoringConfig, ShariahTable},
    types::{Beneficiary, DistributionWarning, HybridConfig},
};
use rust_decimal::Decimal;

/// Resolves `shariah_weight * S + need_weight * N`
#[derive(Debug, Clone)]
pub struct HybridResolver<'a> {
    shariah: ShariahResolver<'a>,
    need: NeedResolver<'a>,
    mix: HybridConfig,
}

impl<'a> HybridResolver<'a> {
    /// Create a resolver from both component configurations and a mix
    pub fn new(table: &'a ShariahTable, need: &'a NeedScoringConfig, mix: HybridConfig) -> Self {
        Self {
            shariah: ShariahResolver::new(table),
            need: NeedResolver::new(need),
            mix,
        }
    }

    /// Human-readable mix, e.g. "30% shariah / 70% need"
    pub fn describe_mix(mix: &HybridConfig) -> String {
        format!(
            "{} shariah / {} need",
            whole_percent(mix.shariah_weight),
            whole_percent(mix.need_weight)
        )
    }

    fn clamped_mix(&self, warnings: &mut Vec<DistributionWarning>) -> HybridConfig {
        let mut clamp = |component: &str, factor: Decimal| {
            if factor < Decimal::ZERO || factor > Decimal::ONE {
                tracing::warn!(component, factor = %factor, "Hybrid mixing factor outside [0, 1], clamping");
                warnings.push(DistributionWarning::MixingFactorOutOfRange {
                    component: component.to_string(),
                    factor,
                });
            }
            factor.max(Decimal::ZERO).min(Decimal::ONE)
        };

        HybridConfig {
            shariah_weight: clamp("shariah", self.mix.shariah_weight),
            need_weight: clamp("need", self.mix.need_weight),
        }
    }
}

impl WeightResolver for HybridResolver<'_> {
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet {
        let mut warnings = Vec::new();
        let mix = self.clamped_mix(&mut warnings);

        let categories: Vec<_> = beneficiaries.iter().map(|b| self.shariah.lookup(b)).collect();
        let scores: Vec<_> = beneficiaries.iter().map(|b| self.need.score(b)).collect();

        let shariah_shares = normalize(&categories.iter().map(|c| c.weight).collect::<Vec<_>>());
        let need_shares = normalize(&scores.iter().map(|s| s.total).collect::<Vec<_>>());

        let shariah_pct = whole_percent(mix.shariah_weight);
        let need_pct = whole_percent(mix.need_weight);

        let entries = categories
            .iter()
            .zip(&scores)
            .zip(shariah_shares.iter().zip(&need_shares))
            .map(|((category, score), (s, n))| {
                let weight = mix.shariah_weight * s + mix.need_weight * n;
                ResolvedWeight::new(
                    weight,
                    format!(
                        "Hybrid (mixed) share: {} Shariah (category '{}' weight {}) + {} need ({})",
                        shariah_pct,
                        category.key,
                        category.weight.normalize(),
                        need_pct,
                        score.describe()
                    ),
                )
            })
            .collect();

        WeightSet { entries, warnings }
    }
}
