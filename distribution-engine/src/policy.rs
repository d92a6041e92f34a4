//! Allocation policy selection
//!
//! The raw `pattern` string is parsed exactly once into a closed [`Policy`]
//! value that carries whatever configuration the chosen resolver needs.

use crate::{
    config::EngineConfig,
    types::{DistributionParams, HybridConfig},
    weights::{CustomResolver, EqualResolver, HybridResolver, NeedResolver, ShariahResolver, WeightResolver, WeightSet},
    Error, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// Recognized allocation patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionPattern {
    /// Category multiplier table
    Shariah,
    /// Equal shares
    Equal,
    /// Need points
    NeedBased,
    /// Caller-supplied weights
    Custom,
    /// Shariah and need mixed
    Hybrid,
}

impl DistributionPattern {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionPattern::Shariah => "shariah",
            DistributionPattern::Equal => "equal",
            DistributionPattern::NeedBased => "need_based",
            DistributionPattern::Custom => "custom",
            DistributionPattern::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for DistributionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shariah" => Ok(DistributionPattern::Shariah),
            "equal" => Ok(DistributionPattern::Equal),
            "need_based" => Ok(DistributionPattern::NeedBased),
            "custom" => Ok(DistributionPattern::Custom),
            "hybrid" => Ok(DistributionPattern::Hybrid),
            _ => Err(Error::UnsupportedPolicy(s.to_string())),
        }
    }
}

/// Allocation policy with its configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Policy {
    /// Equal shares
    Equal,
    /// Category multiplier table
    Shariah,
    /// Need points
    NeedBased,
    /// Caller-supplied weights
    Custom(HashMap<String, Decimal>),
    /// Shariah and need mixed
    Hybrid(HybridConfig),
}

impl Policy {
    /// Build the policy requested by `params`
    ///
    /// `default_mix` is used for the hybrid pattern when the caller supplies
    /// no mix of their own.
    pub fn from_params(params: &DistributionParams, default_mix: HybridConfig) -> Result<Self> {
        let pattern: DistributionPattern = params.pattern.parse()?;

        Ok(match pattern {
            DistributionPattern::Equal => Policy::Equal,
            DistributionPattern::Shariah => Policy::Shariah,
            DistributionPattern::NeedBased => Policy::NeedBased,
            DistributionPattern::Custom => match &params.custom_weights {
                Some(weights) if !weights.is_empty() => Policy::Custom(weights.clone()),
                _ => return Err(Error::MissingCustomWeights),
            },
            DistributionPattern::Hybrid => Policy::Hybrid(params.hybrid_config.unwrap_or(default_mix)),
        })
    }

    /// Pattern this policy implements
    pub fn pattern(&self) -> DistributionPattern {
        match self {
            Policy::Equal => DistributionPattern::Equal,
            Policy::Shariah => DistributionPattern::Shariah,
            Policy::NeedBased => DistributionPattern::NeedBased,
            Policy::Custom(_) => DistributionPattern::Custom,
            Policy::Hybrid(_) => DistributionPattern::Hybrid,
        }
    }

    /// Human-readable policy name for reports
    pub fn label(&self) -> String {
        match self {
            Policy::Equal => "Equal distribution".to_string(),
            Policy::Shariah => "Shariah distribution (category weights)".to_string(),
            Policy::NeedBased => "Need-based distribution".to_string(),
            Policy::Custom(_) => "Custom distribution".to_string(),
            Policy::Hybrid(mix) => format!(
                "Hybrid distribution (mixed: {})",
                HybridResolver::describe_mix(mix)
            ),
        }
    }

    /// Resolve weights for the beneficiary set
    pub fn resolve(&self, config: &EngineConfig, params: &DistributionParams) -> WeightSet {
        let beneficiaries = &params.beneficiaries;
        match self {
            Policy::Equal => EqualResolver.resolve(beneficiaries),
            Policy::Shariah => ShariahResolver::new(&config.shariah).resolve(beneficiaries),
            Policy::NeedBased => NeedResolver::new(&config.need).resolve(beneficiaries),
            Policy::Custom(weights) => CustomResolver::new(weights).resolve(beneficiaries),
            Policy::Hybrid(mix) => HybridResolver::new(&config.shariah, &config.need, *mix).resolve(beneficiaries),
        }
    }
}
