//! Equal shares

use super::{ResolvedWeight, WeightResolver, WeightSet};
use crate::types::Beneficiary;
use rust_decimal::Decimal;

/// Gives every beneficiary weight 1
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualResolver;

impl WeightResolver for EqualResolver {
    fn resolve(&self, beneficiaries: &[Beneficiary]) -> WeightSet {
        let count = beneficiaries.len();
        beneficiaries
            .iter()
            .map(|_| ResolvedWeight::new(Decimal::ONE, format!("Equal share: 1/{} of the distributable amount", count)))
            .collect()
    }
}
