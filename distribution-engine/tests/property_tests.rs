//! Property-based tests for distribution invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Money conservation: Σ(allocated) == distributable for every policy
//! - Deduction additivity: total == Σ(parts), distributable == gross − total
//! - Non-negativity and bounded rounding error
//! - Order preservation: one result per beneficiary, in input order

use distribution_engine::{
    allocator::Allocator, calculate, Beneficiary, DeductionsConfig, DistributionParams, HybridConfig,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Strategy for generating gross amounts (positive, 2 dp)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating a single deduction rate (0 - 30%, basis points)
fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=3_000i64).prop_map(|bp| Decimal::new(bp, 4))
}

/// Strategy for generating deduction configurations
fn deductions_strategy() -> impl Strategy<Value = DeductionsConfig> {
    (rate_strategy(), rate_strategy(), rate_strategy(), rate_strategy(), rate_strategy()).prop_map(
        |(nazer, reserve, corpus, maintenance, development)| DeductionsConfig {
            nazer_percentage: nazer,
            reserve_percentage: reserve,
            waqf_corpus_percentage: corpus,
            maintenance_percentage: maintenance,
            development_percentage: development,
        },
    )
}

/// Strategy for generating beneficiaries
fn beneficiary_strategy() -> impl Strategy<Value = Beneficiary> {
    (
        prop_oneof![
            Just("son"),
            Just("daughters"),
            Just("wife"),
            Just("ابن"),
            Just("cousin"),
        ],
        1u32..12,
        0i64..20_000,
        proptest::option::of(0u32..6),
        proptest::option::of(0u32..6),
    )
        .prop_map(|(category, family_size, income, sons, daughters)| Beneficiary {
            family_size,
            monthly_income: Decimal::from(income),
            number_of_sons: sons,
            number_of_daughters: daughters,
            ..Beneficiary::new("", "Beneficiary", category)
        })
}

/// Strategy for generating beneficiary sets with unique ids
fn beneficiaries_strategy() -> impl Strategy<Value = Vec<Beneficiary>> {
    prop::collection::vec(beneficiary_strategy(), 1..25).prop_map(|mut beneficiaries| {
        for (i, b) in beneficiaries.iter_mut().enumerate() {
            b.id = format!("b{}", i);
        }
        beneficiaries
    })
}

fn pattern_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("shariah"),
        Just("equal"),
        Just("need_based"),
        Just("custom"),
        Just("hybrid"),
    ]
}

fn build_params(
    total_amount: Decimal,
    beneficiaries: Vec<Beneficiary>,
    deductions: DeductionsConfig,
    pattern: &str,
    weight_seed: u64,
    mix_tenths: i64,
) -> DistributionParams {
    let custom_weights: HashMap<String, Decimal> = beneficiaries
        .iter()
        .enumerate()
        .map(|(i, b)| (b.id.clone(), Decimal::from((weight_seed + i as u64 * 7) % 13)))
        .collect();

    DistributionParams {
        total_amount,
        beneficiaries,
        deductions,
        pattern: pattern.to_string(),
        custom_weights: Some(custom_weights),
        hybrid_config: Some(HybridConfig {
            shariah_weight: Decimal::new(mix_tenths, 1),
            need_weight: Decimal::new(10 - mix_tenths, 1),
        }),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: Allocated amounts always sum to the distributable amount
    #[test]
    fn prop_sum_invariant(
        total in amount_strategy(),
        beneficiaries in beneficiaries_strategy(),
        deductions in deductions_strategy(),
        pattern in pattern_strategy(),
        seed in 0u64..1_000,
        mix in 0i64..=10,
    ) {
        let params = build_params(total, beneficiaries, deductions, pattern, seed, mix);
        let result = calculate(&params).unwrap();

        let sum: Decimal = result.results.iter().map(|r| r.allocated_amount).sum();
        if result.results.iter().any(|r| r.weight > Decimal::ZERO) {
            prop_assert_eq!(sum, result.summary.distributable_amount);
        } else {
            prop_assert_eq!(sum, Decimal::ZERO);
        }
        prop_assert_eq!(sum, result.summary.total_distributed);
    }

    /// Property: Deduction breakdown is internally additive
    #[test]
    fn prop_deduction_additivity(
        total in amount_strategy(),
        deductions in deductions_strategy(),
    ) {
        let params = build_params(total, vec![Beneficiary::new("b0", "Test", "son")], deductions, "equal", 0, 5);
        let result = calculate(&params).unwrap();
        let summary = &result.summary;
        let d = &summary.deductions;

        prop_assert_eq!(d.total, d.nazer_share + d.reserve + d.waqf_corpus + d.maintenance + d.development);
        prop_assert_eq!(summary.distributable_amount, summary.total_amount - d.total);
        prop_assert!(summary.distributable_amount >= Decimal::ZERO);
    }

    /// Property: Over-allocating rates never produce a negative pool
    #[test]
    fn prop_over_deduction_clamped(
        total in amount_strategy(),
        extra in 1i64..10_000,
    ) {
        let deductions = DeductionsConfig {
            nazer_percentage: Decimal::ONE,
            reserve_percentage: Decimal::new(extra, 4),
            ..Default::default()
        };
        let params = build_params(total, vec![Beneficiary::new("b0", "Test", "son")], deductions, "equal", 0, 5);
        let result = calculate(&params).unwrap();

        prop_assert_eq!(result.summary.distributable_amount, Decimal::ZERO);
        prop_assert_eq!(result.summary.deductions.total, result.summary.total_amount);
        prop_assert_eq!(result.results[0].allocated_amount, Decimal::ZERO);
    }

    /// Property: One non-negative result per beneficiary, in input order
    #[test]
    fn prop_order_preserved(
        beneficiaries in beneficiaries_strategy(),
        pattern in pattern_strategy(),
    ) {
        let ids: Vec<String> = beneficiaries.iter().map(|b| b.id.clone()).collect();
        let params = build_params(Decimal::from(10_000), beneficiaries, DeductionsConfig::default(), pattern, 3, 4);
        let result = calculate(&params).unwrap();

        let out: Vec<String> = result.results.iter().map(|r| r.beneficiary_id.clone()).collect();
        prop_assert_eq!(out, ids);
        prop_assert!(result.results.iter().all(|r| r.allocated_amount >= Decimal::ZERO));
        prop_assert_eq!(result.summary.beneficiaries_count, result.results.len());
    }

    /// Property: Equal split never deviates from the exact share by a full unit
    #[test]
    fn prop_equal_split_within_one_unit(
        total in amount_strategy(),
        count in 1usize..40,
    ) {
        let weights = vec![Decimal::ONE; count];
        let amounts = Allocator::default().allocate(total, &weights);
        let exact = total / Decimal::from(count as u64);

        for amount in &amounts {
            prop_assert!((*amount - exact).abs() < Decimal::new(1, 2));
        }
        let max = amounts.iter().max().unwrap();
        let min = amounts.iter().min().unwrap();
        prop_assert!(*max - *min <= Decimal::new(1, 2));
    }

    /// Property: Zero weights never receive any allocation
    #[test]
    fn prop_zero_weight_gets_nothing(
        total in amount_strategy(),
        raw in prop::collection::vec(0u32..5, 1..30),
    ) {
        let weights: Vec<Decimal> = raw.iter().map(|w| Decimal::from(*w)).collect();
        let amounts = Allocator::default().allocate(total, &weights);

        for (weight, amount) in weights.iter().zip(&amounts) {
            if weight.is_zero() {
                prop_assert_eq!(*amount, Decimal::ZERO);
            }
        }
    }
}
