//! Core types for the distribution engine

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Beneficiary eligible to receive a share of a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub full_name: String,

    /// External reference code
    pub beneficiary_number: String,

    /// Free-text type label in the operating language (e.g. "son", "ابن")
    pub beneficiary_type: String,

    /// Normalized classification key (e.g. "sons", "daughters")
    #[serde(default)]
    pub category: String,

    /// Household size dependent on this beneficiary
    pub family_size: u32,

    /// Monthly income; zero signals maximal need
    #[serde(default)]
    pub monthly_income: Decimal,

    /// Number of sons
    #[serde(default)]
    pub number_of_sons: Option<u32>,

    /// Number of daughters
    #[serde(default)]
    pub number_of_daughters: Option<u32>,
}

impl Beneficiary {
    /// Create a beneficiary with a single-person household and no income
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            id: id.into(),
            full_name: full_name.into(),
            beneficiary_number: String::new(),
            beneficiary_type: category.clone(),
            category,
            family_size: 1,
            monthly_income: Decimal::ZERO,
            number_of_sons: None,
            number_of_daughters: None,
        }
    }

    /// Sons plus daughters, saturating at `u32::MAX`
    pub fn dependents(&self) -> u32 {
        self.number_of_sons
            .unwrap_or(0)
            .saturating_add(self.number_of_daughters.unwrap_or(0))
    }
}

/// Percentage-based institutional deductions, expressed as fractions
/// (`0.05` = 5%)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionsConfig {
    /// Administrator's cut
    pub nazer_percentage: Decimal,

    /// Reserve set-aside
    pub reserve_percentage: Decimal,

    /// Capital-preservation set-aside
    pub waqf_corpus_percentage: Decimal,

    /// Maintenance set-aside
    pub maintenance_percentage: Decimal,

    /// Development set-aside
    pub development_percentage: Decimal,
}

impl DeductionsConfig {
    /// Rates in declaration order, paired with their names
    pub fn rates(&self) -> [(&'static str, Decimal); 5] {
        [
            ("nazer", self.nazer_percentage),
            ("reserve", self.reserve_percentage),
            ("waqf_corpus", self.waqf_corpus_percentage),
            ("maintenance", self.maintenance_percentage),
            ("development", self.development_percentage),
        ]
    }
}

/// Mixing factors for the hybrid policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    /// Share of the Shariah-like component (0-1)
    pub shariah_weight: Decimal,

    /// Share of the need-based component (0-1)
    pub need_weight: Decimal,
}

impl Default for HybridConfig {
    fn default() -> Self {
        Self {
            shariah_weight: Decimal::new(5, 1),
            need_weight: Decimal::new(5, 1),
        }
    }
}

/// Input snapshot for a single distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Gross pool
    pub total_amount: Decimal,

    /// Beneficiaries in insertion order
    pub beneficiaries: Vec<Beneficiary>,

    /// Deduction rates
    #[serde(default)]
    pub deductions: DeductionsConfig,

    /// Allocation pattern: shariah, equal, need_based, custom or hybrid
    pub pattern: String,

    /// Beneficiary id -> weight, required for the custom pattern
    #[serde(default)]
    pub custom_weights: Option<HashMap<String, Decimal>>,

    /// Mixing factors, used only by the hybrid pattern
    #[serde(default)]
    pub hybrid_config: Option<HybridConfig>,
}

/// Computed deduction amounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeductionsBreakdown {
    /// Administrator's share
    pub nazer_share: Decimal,

    /// Reserve
    pub reserve: Decimal,

    /// Waqf corpus
    pub waqf_corpus: Decimal,

    /// Maintenance
    pub maintenance: Decimal,

    /// Development
    pub development: Decimal,

    /// Sum of the five amounts above
    pub total: Decimal,
}

impl DeductionsBreakdown {
    /// Sum of the individual deductions
    pub fn sum_of_parts(&self) -> Decimal {
        self.nazer_share + self.reserve + self.waqf_corpus + self.maintenance + self.development
    }
}

/// Allocation for one beneficiary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Beneficiary ID
    pub beneficiary_id: String,

    /// Beneficiary display name
    pub beneficiary_name: String,

    /// External reference code
    pub beneficiary_number: String,

    /// Amount rounded to the currency minor unit
    pub allocated_amount: Decimal,

    /// Share of the distributable amount, in percent
    pub percentage: Decimal,

    /// Weight the policy resolved for this beneficiary
    pub weight: Decimal,

    /// How the amount was derived
    pub calculation_basis: String,
}

/// Non-fatal conditions detected while calculating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionWarning {
    /// Deduction rates consume more than the gross amount
    DeductionsExceedTotal {
        /// Uncapped deduction total
        requested: Decimal,
        /// Gross amount available
        available: Decimal,
    },

    /// A deduction rate was outside [0, 1] and was clamped
    RateOutOfRange {
        /// Deduction name
        deduction: String,
        /// Rate as configured
        rate: Decimal,
    },

    /// Gross amount was negative and treated as zero
    NegativeTotalAmount {
        /// Amount as supplied
        amount: Decimal,
    },

    /// A negative weight was treated as zero
    NegativeWeight {
        /// Beneficiary ID
        beneficiary_id: String,
        /// Weight as supplied
        weight: Decimal,
    },

    /// A hybrid mixing factor was outside [0, 1] and was clamped
    MixingFactorOutOfRange {
        /// Component name
        component: String,
        /// Factor as configured
        factor: Decimal,
    },

    /// Weights summed past the decimal range and were scaled down
    WeightsRescaled {
        /// Factor every weight was divided by
        divisor: Decimal,
    },

    /// No beneficiary carries a positive weight; nothing was allocated
    NoPositiveWeight,
}

/// Aggregate block of a distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Gross pool
    pub total_amount: Decimal,

    /// Gross pool minus deductions
    pub distributable_amount: Decimal,

    /// Sum of all allocated amounts
    pub total_distributed: Decimal,

    /// Number of beneficiaries
    pub beneficiaries_count: usize,

    /// Deduction amounts
    pub deductions: DeductionsBreakdown,

    /// Human-readable policy name
    pub pattern_used: String,

    /// Currency code
    pub currency: String,

    /// Degradations applied during the calculation
    pub warnings: Vec<DistributionWarning>,
}

/// Output snapshot for a single distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    /// One entry per beneficiary, in input order
    pub results: Vec<AllocationResult>,

    /// Aggregates
    pub summary: DistributionSummary,
}

impl DistributionResult {
    /// Look up the allocation for a beneficiary
    pub fn allocation_for(&self, beneficiary_id: &str) -> Option<&AllocationResult> {
        self.results.iter().find(|r| r.beneficiary_id == beneficiary_id)
    }

    /// Whether any degradation was applied
    pub fn has_warnings(&self) -> bool {
        !self.summary.warnings.is_empty()
    }
}
