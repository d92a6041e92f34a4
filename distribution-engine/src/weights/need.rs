//! Need-based weighting
//!
//! The need score ("need points") is the sum of three capped factors:
//!
//! - income: full points at zero income, decaying linearly to zero at the
//!   configured ceiling
//! - family: points per household member
//! - dependents: points per son or daughter
//!
//! Only the direction of each factor is load-bearing; the curve is tunable
//! through [`NeedScoringConfig`].

use super::{checked_total, ResolvedWeight, WeightResolver, WeightSet};
use crate::{config::NeedScoringConfig, types::Beneficiary};
use rust_decimal::Decimal;

/// Need points for one beneficiary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeedScore {
    /// Points from income
    pub income: Decimal,

    /// Points from household size
    pub family: Decimal,

    /// Points from sons and daughters
    pub dependents: Decimal,

    /// Sum of the three factors
    pub total: Decimal,
}

impl NeedScore {
    /// Short description, always naming need points
    pub fn describe(&self) -> String {
        format!(
            "{} need points (income {}, family {}, dependents {})",
            self.total, self.income, self.family, self.dependents
        )
    }
}

/// Resolves weights from need scores
#[derive(Debug, Clone)]
pub struct NeedResolver<'a> {
    config: &'a NeedScoringConfig,
}

impl<'a> NeedResolver<'a> {
    /// Create a resolver with the given scoring parameters
    pub fn new(config: &'a NeedScoringConfig) -> Self {
        Self { config }
    }

    /// Score one beneficiary
    pub fn score(&self, beneficiary: &Beneficiary) -> NeedScore {
        let income = self.income_points(beneficiary.monthly_income);

        let family = (Decimal::from(beneficiary.family_size) * self.config.points_per_member)
            .min(self.config.max_family_points);

        let dependents = (Decimal::from(beneficiary.dependents()) * self.config.points_per_dependent)
            .min(self.config.max_dependent_points);

        let income = income.round_dp(2);
        let family = family.round_dp(2);
        let dependents = dependents.round_dp(2);

        NeedScore {
            income,
            family,
            dependents,
            total: (income + family + dependents).max(Decimal::ZERO),
        }
    }

    fn income_points(&self, monthly_income: Decimal) -> Decimal {
        let ceiling = self.config.income_ceiling;
        if ceiling <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let income = monthly_income.max(Decimal::ZERO).min(ceiling);
        self.config.max_income_points * (Decimal::ONE - income / ceiling)
    }
}

impl WeightResolver for NeedResolver<'_> {
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet {
        let scores: Vec<NeedScore> = beneficiaries.iter().map(|b| self.score(b)).collect();
        let total = checked_total(&scores.iter().map(|s| s.total).collect::<Vec<_>>()).unwrap_or(Decimal::MAX);

        scores
            .into_iter()
            .map(|score| {
                ResolvedWeight::new(
                    score.total,
                    format!("Need-based share: {} of {} total need points", score.describe(), total),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn household(income: i64, family_size: u32, sons: u32, daughters: u32) -> Beneficiary {
        Beneficiary {
            monthly_income: Decimal::from(income),
            family_size,
            number_of_sons: Some(sons),
            number_of_daughters: Some(daughters),
            ..Beneficiary::new("b", "Test", "other")
        }
    }

    #[test]
    fn test_zero_income_scores_maximum_income_points() {
        let config = NeedScoringConfig::default();
        let resolver = NeedResolver::new(&config);

        let score = resolver.score(&household(0, 1, 0, 0));
        assert_eq!(score.income, Decimal::from(10));
        assert_eq!(score.family, Decimal::ONE);
        assert_eq!(score.dependents, Decimal::ZERO);
        assert_eq!(score.total, Decimal::from(11));
    }

    #[test]
    fn test_income_decays_to_zero_at_ceiling() {
        let config = NeedScoringConfig::default();
        let resolver = NeedResolver::new(&config);

        assert_eq!(resolver.score(&household(5_000, 1, 0, 0)).income, Decimal::from(5));
        assert_eq!(resolver.score(&household(10_000, 1, 0, 0)).income, Decimal::ZERO);
        assert_eq!(resolver.score(&household(50_000, 1, 0, 0)).income, Decimal::ZERO);
    }

    #[test]
    fn test_monotonic_in_income_and_family() {
        let config = NeedScoringConfig::default();
        let resolver = NeedResolver::new(&config);

        let poor = resolver.score(&household(0, 4, 1, 1));
        let earning = resolver.score(&household(3_000, 4, 1, 1));
        assert!(poor.total >= earning.total);

        let large = resolver.score(&household(2_000, 8, 0, 0));
        let small = resolver.score(&household(2_000, 3, 0, 0));
        assert!(large.total >= small.total);
    }

    #[test]
    fn test_factors_are_capped() {
        let config = NeedScoringConfig::default();
        let resolver = NeedResolver::new(&config);

        let score = resolver.score(&household(0, 40, 20, 20));
        assert_eq!(score.family, Decimal::from(10));
        assert_eq!(score.dependents, Decimal::from(5));
        assert_eq!(score.total, Decimal::from(25));
    }

    #[test]
    fn test_extreme_dependent_counts_stay_capped() {
        let config = NeedScoringConfig::default();
        let resolver = NeedResolver::new(&config);

        let score = resolver.score(&household(0, 1, u32::MAX, 1));
        assert_eq!(score.dependents, Decimal::from(5));
        assert!(score.total >= resolver.score(&household(0, 1, 3, 3)).total);
    }

    #[test]
    fn test_basis_always_mentions_need_points() {
        let config = NeedScoringConfig {
            max_income_points: Decimal::ZERO,
            points_per_member: Decimal::ZERO,
            points_per_dependent: Decimal::ZERO,
            ..Default::default()
        };
        let resolver = NeedResolver::new(&config);

        let set = resolver.resolve(&[household(0, 2, 0, 0), household(100, 3, 1, 0)]);
        assert_eq!(set.total(), Decimal::ZERO);
        assert!(set.entries.iter().all(|e| e.basis.contains("need points")));
    }
}
