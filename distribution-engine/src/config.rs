//! Configuration for the distribution engine

use crate::types::HybridConfig;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Currency and minor unit
    pub currency: CurrencyConfig,

    /// Category weight table for the Shariah-like policy
    pub shariah: ShariahTable,

    /// Need scoring parameters
    pub need: NeedScoringConfig,

    /// Mix used by the hybrid policy when the caller supplies none
    pub hybrid: HybridConfig,
}

/// Currency configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// ISO 4217 code, reporting only
    pub code: String,

    /// Decimal places of the minor unit (2 = cents/halalas)
    pub minor_unit_scale: u32,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            code: "SAR".to_string(),
            minor_unit_scale: 2,
        }
    }
}

impl CurrencyConfig {
    /// Round to the minor unit, half to even
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.minor_unit_scale, RoundingStrategy::MidpointNearestEven)
    }

    /// Truncate towards zero at the minor unit
    pub fn floor(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.minor_unit_scale, RoundingStrategy::ToZero)
    }

    /// Smallest representable amount (0.01 for scale 2)
    pub fn minor_unit(&self) -> Decimal {
        Decimal::new(1, self.minor_unit_scale)
    }
}

/// Category weight table for the Shariah-like policy
///
/// Labels are normalized (trimmed, lowercased), mapped through `aliases` to a
/// canonical key, and the key is looked up in `weights`. Anything that does
/// not resolve falls back to `fallback_key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShariahTable {
    /// Canonical key -> multiplier
    pub weights: BTreeMap<String, Decimal>,

    /// Free-text label -> canonical key
    pub aliases: BTreeMap<String, String>,

    /// Key used when neither category nor type resolves
    pub fallback_key: String,
}

impl Default for ShariahTable {
    fn default() -> Self {
        let weights = [
            ("son", Decimal::from(2)),
            ("daughter", Decimal::ONE),
            ("wife", Decimal::ONE),
            ("other", Decimal::ONE),
        ]
        .into_iter()
        .map(|(k, w)| (k.to_string(), w))
        .collect();

        let aliases = [
            ("sons", "son"),
            ("male", "son"),
            ("ابن", "son"),
            ("أبناء", "son"),
            ("ذكر", "son"),
            ("daughters", "daughter"),
            ("female", "daughter"),
            ("بنت", "daughter"),
            ("ابنة", "daughter"),
            ("بنات", "daughter"),
            ("أنثى", "daughter"),
            ("wives", "wife"),
            ("زوجة", "wife"),
            ("زوجات", "wife"),
        ]
        .into_iter()
        .map(|(a, k)| (a.to_string(), k.to_string()))
        .collect();

        Self {
            weights,
            aliases,
            fallback_key: "other".to_string(),
        }
    }
}

/// Need scoring parameters
///
/// Each factor is capped; the score is the plain sum of the three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedScoringConfig {
    /// Points awarded at zero income
    pub max_income_points: Decimal,

    /// Monthly income at which income points reach zero
    pub income_ceiling: Decimal,

    /// Points per household member
    pub points_per_member: Decimal,

    /// Cap on household points
    pub max_family_points: Decimal,

    /// Points per son or daughter
    pub points_per_dependent: Decimal,

    /// Cap on dependents points
    pub max_dependent_points: Decimal,
}

impl Default for NeedScoringConfig {
    fn default() -> Self {
        Self {
            max_income_points: Decimal::from(10),
            income_ceiling: Decimal::from(10_000),
            points_per_member: Decimal::ONE,
            max_family_points: Decimal::from(10),
            points_per_dependent: Decimal::new(5, 1),
            max_dependent_points: Decimal::from(5),
        }
    }
}

impl EngineConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = EngineConfig::default();

        if let Ok(code) = std::env::var("DISTRIBUTION_CURRENCY") {
            config.currency.code = code;
        }

        if let Ok(scale) = std::env::var("DISTRIBUTION_MINOR_UNITS") {
            config.currency.minor_unit_scale = scale.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid DISTRIBUTION_MINOR_UNITS '{}': {}", scale, e))
            })?;
        }

        if let Ok(ceiling) = std::env::var("DISTRIBUTION_INCOME_CEILING") {
            config.need.income_ceiling = ceiling.parse().map_err(|e| {
                crate::Error::Config(format!("Invalid DISTRIBUTION_INCOME_CEILING '{}': {}", ceiling, e))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency
    pub fn validate(&self) -> crate::Result<()> {
        if self.currency.minor_unit_scale > 8 {
            return Err(crate::Error::Config(format!(
                "minor_unit_scale {} is out of range (0-8)",
                self.currency.minor_unit_scale
            )));
        }

        if self.need.income_ceiling <= Decimal::ZERO {
            return Err(crate::Error::Config(
                "need.income_ceiling must be positive".to_string(),
            ));
        }

        let need = &self.need;
        for (name, value) in [
            ("max_income_points", need.max_income_points),
            ("points_per_member", need.points_per_member),
            ("max_family_points", need.max_family_points),
            ("points_per_dependent", need.points_per_dependent),
            ("max_dependent_points", need.max_dependent_points),
        ] {
            if value.is_sign_negative() {
                return Err(crate::Error::Config(format!("need.{} must not be negative", name)));
            }
        }

        if let Some((key, _)) = self.shariah.weights.iter().find(|(_, w)| w.is_sign_negative()) {
            return Err(crate::Error::Config(format!(
                "shariah weight for '{}' must not be negative",
                key
            )));
        }

        if !self.shariah.weights.contains_key(&self.shariah.fallback_key) {
            return Err(crate::Error::Config(format!(
                "shariah fallback key '{}' has no weight",
                self.shariah.fallback_key
            )));
        }

        Ok(())
    }
}
