//! Weight resolvers
//!
//! Each allocation policy turns the beneficiary set into one non-negative
//! weight per beneficiary, positionally aligned with the input slice. The
//! allocator only ever sees the weights; the basis strings travel alongside
//! them into the report.

pub mod custom;
pub mod equal;
pub mod hybrid;
pub mod need;
pub mod shariah;

pub use custom::CustomResolver;
pub use equal::EqualResolver;
pub use hybrid::HybridResolver;
pub use need::{NeedResolver, NeedScore};
pub use shariah::ShariahResolver;

use crate::types::{Beneficiary, DistributionWarning};
use rust_decimal::Decimal;

/// Weight for one beneficiary
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWeight {
    /// Non-negative weight
    pub weight: Decimal,

    /// Human-readable description of how the weight was derived
    pub basis: String,

    /// Percentage to report instead of the allocated share, if the policy
    /// carries the caller's own figure
    pub percentage: Option<Decimal>,
}

impl ResolvedWeight {
    /// Weight with a basis and no percentage override
    pub fn new(weight: Decimal, basis: impl Into<String>) -> Self {
        Self {
            weight,
            basis: basis.into(),
            percentage: None,
        }
    }
}

/// Weights for a whole beneficiary set
#[derive(Debug, Clone, Default)]
pub struct WeightSet {
    /// One entry per beneficiary, in input order
    pub entries: Vec<ResolvedWeight>,

    /// Degradations applied while resolving
    pub warnings: Vec<DistributionWarning>,
}

impl WeightSet {
    /// Plain weight vector
    pub fn weights(&self) -> Vec<Decimal> {
        self.entries.iter().map(|e| e.weight).collect()
    }

    /// Sum of all weights, saturating at `Decimal::MAX`
    pub fn total(&self) -> Decimal {
        checked_total(&self.weights()).unwrap_or(Decimal::MAX)
    }
}

impl FromIterator<ResolvedWeight> for WeightSet {
    fn from_iter<I: IntoIterator<Item = ResolvedWeight>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
            warnings: Vec::new(),
        }
    }
}

/// Resolves a weight for every beneficiary
pub trait WeightResolver {
    /// Resolve weights, one per beneficiary in input order
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet;
}

/// Sum of a weight vector, `None` when it leaves the decimal range
pub fn checked_total(weights: &[Decimal]) -> Option<Decimal> {
    weights.iter().try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))
}

/// Weights brought into summable range, with their total
#[derive(Debug, Clone, PartialEq)]
pub struct FittedWeights {
    /// Weights, proportional to the input
    pub weights: Vec<Decimal>,

    /// Sum of `weights`
    pub total: Decimal,

    /// Factor every input weight was divided by (1 when untouched)
    pub divisor: Decimal,
}

/// Scale non-negative weights down until their sum fits in a `Decimal`
///
/// Each pass divides by `len + 1`, after which the sum of `len` weights
/// bounded by `Decimal::MAX` is guaranteed to fit. Proportions are kept up to
/// decimal precision.
pub fn fit_weights(weights: &[Decimal]) -> FittedWeights {
    let step = Decimal::from(weights.len() as u64 + 1);
    let mut scaled = weights.to_vec();
    let mut divisor = Decimal::ONE;

    loop {
        if let Some(total) = checked_total(&scaled) {
            return FittedWeights {
                weights: scaled,
                total,
                divisor,
            };
        }
        scaled = scaled.iter().map(|w| w / step).collect();
        divisor = divisor.checked_mul(step).unwrap_or(Decimal::MAX);
    }
}

/// Scale a weight vector so that it sums to one
///
/// An all-zero vector stays all-zero.
pub fn normalize(weights: &[Decimal]) -> Vec<Decimal> {
    let fitted = fit_weights(weights);
    if fitted.total.is_zero() {
        return vec![Decimal::ZERO; weights.len()];
    }
    fitted.weights.iter().map(|w| w / fitted.total).collect()
}

/// Render a 0-1 fraction as a whole-number percentage, e.g. `0.3` -> `30%`
pub fn whole_percent(fraction: Decimal) -> String {
    format!("{}%", (fraction * Decimal::ONE_HUNDRED).round().normalize())
}
