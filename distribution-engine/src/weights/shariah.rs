//! Shariah-like category weighting
//!
//! A plain multiplier table keyed by family role. It reproduces the
//! two-to-one male/female descendant ratio and nothing more; it is not a
//! fara'id calculator.

use super::{checked_total, ResolvedWeight, WeightResolver, WeightSet};
use crate::{config::ShariahTable, types::Beneficiary};
use rust_decimal::Decimal;

/// Category table lookup result
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMatch {
    /// Canonical key the beneficiary resolved to
    pub key: String,

    /// Multiplier from the table
    pub weight: Decimal,

    /// Whether the fallback key was used
    pub fallback: bool,
}

/// Resolves weights from a [`ShariahTable`]
#[derive(Debug, Clone)]
pub struct ShariahResolver<'a> {
    table: &'a ShariahTable,
}

impl<'a> ShariahResolver<'a> {
    /// Create a resolver over a category table
    pub fn new(table: &'a ShariahTable) -> Self {
        Self { table }
    }

    /// Look up a beneficiary, trying `category` before `beneficiary_type`
    pub fn lookup(&self, beneficiary: &Beneficiary) -> CategoryMatch {
        [&beneficiary.category, &beneficiary.beneficiary_type]
            .into_iter()
            .find_map(|label| self.lookup_label(label))
            .unwrap_or_else(|| CategoryMatch {
                key: self.table.fallback_key.clone(),
                weight: self.fallback_weight(),
                fallback: true,
            })
    }

    fn lookup_label(&self, label: &str) -> Option<CategoryMatch> {
        let normalized = label.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        let key = self.table.aliases.get(&normalized).unwrap_or(&normalized);
        self.table.weights.get(key).map(|weight| CategoryMatch {
            key: key.clone(),
            weight: *weight,
            fallback: false,
        })
    }

    fn fallback_weight(&self) -> Decimal {
        self.table
            .weights
            .get(&self.table.fallback_key)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl WeightResolver for ShariahResolver<'_> {
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet {
        let matches: Vec<CategoryMatch> = beneficiaries.iter().map(|b| self.lookup(b)).collect();
        let total = checked_total(&matches.iter().map(|m| m.weight).collect::<Vec<_>>()).unwrap_or(Decimal::MAX);

        matches
            .into_iter()
            .zip(beneficiaries)
            .map(|(m, b)| {
                if m.fallback {
                    tracing::debug!(
                        beneficiary_id = %b.id,
                        category = %b.category,
                        beneficiary_type = %b.beneficiary_type,
                        "No category match, using fallback weight"
                    );
                }
                ResolvedWeight::new(
                    m.weight,
                    format!(
                        "Shariah share: category '{}' weight {} of {} total weight units",
                        m.key,
                        m.weight.normalize(),
                        total.normalize()
                    ),
                )
            })
            .collect()
    }
}
