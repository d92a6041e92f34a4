//! Largest-remainder allocation
//!
//! Converts a weight vector into minor-unit amounts that add up exactly to
//! the distributable amount.
//!
//! # Algorithm
//!
//! 1. Exact share per beneficiary: `amount * w / sum(w)`
//! 2. Truncate every share to the minor unit
//! 3. Hand the leftover units out one at a time, largest fractional
//!    remainder first, ties broken by input order
//!
//! # Example
//!
//! ```text
//! 100.00 over weights [1, 1, 1]
//!   exact:     33.333.. 33.333.. 33.333..
//!   truncated: 33.33    33.33    33.33     (99.99)
//!   leftover:  0.01 -> first in input order
//!   result:    33.34    33.33    33.33     (100.00)
//! ```

use crate::{config::CurrencyConfig, weights::fit_weights};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Largest-remainder allocator
#[derive(Debug, Clone)]
pub struct Allocator {
    currency: CurrencyConfig,
}

impl Allocator {
    /// Create new allocator for a currency
    pub fn new(currency: CurrencyConfig) -> Self {
        Self { currency }
    }

    /// Split `distributable` proportionally to `weights`
    ///
    /// Returns one amount per weight, in the same order. Negative weights are
    /// treated as zero. When no weight is positive every amount is zero.
    pub fn allocate(&self, distributable: Decimal, weights: &[Decimal]) -> Vec<Decimal> {
        let distributable = self.currency.round(distributable);
        let clamped: Vec<Decimal> = weights.iter().map(|w| (*w).max(Decimal::ZERO)).collect();
        let fitted = fit_weights(&clamped);
        if fitted.divisor != Decimal::ONE {
            tracing::debug!(divisor = %fitted.divisor, "Weight total out of range, scaled down");
        }
        let weights = fitted.weights;
        let total_weight = fitted.total;

        if distributable <= Decimal::ZERO || total_weight.is_zero() {
            return vec![Decimal::ZERO; weights.len()];
        }

        let mut amounts = Vec::with_capacity(weights.len());
        let mut remainders = Vec::with_capacity(weights.len());
        for weight in &weights {
            let exact = distributable
                .checked_mul(*weight)
                .map(|product| product / total_weight)
                .unwrap_or_else(|| distributable * (weight / total_weight));
            let truncated = self.currency.floor(exact);
            amounts.push(truncated);
            remainders.push(exact - truncated);
        }

        let leftover = distributable - amounts.iter().sum::<Decimal>();
        let unit = self.currency.minor_unit();
        let mut leftover_units = (leftover / unit).round().to_u64().unwrap_or(0);

        if leftover_units > 0 {
            let mut order: Vec<usize> = (0..weights.len())
                .filter(|&i| weights[i] > Decimal::ZERO)
                .collect();
            // stable sort keeps input order among equal remainders
            order.sort_by(|&a, &b| remainders[b].cmp(&remainders[a]));

            tracing::trace!(leftover_units, candidates = order.len(), "Distributing rounding remainder");

            for &index in order.iter().cycle() {
                if leftover_units == 0 {
                    break;
                }
                amounts[index] += unit;
                leftover_units -= 1;
            }
        }

        amounts
    }
}

impl Default for Allocator {
    fn default() -> Self {
        Self::new(CurrencyConfig::default())
    }
}
