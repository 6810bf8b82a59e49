//! Property tests for split optimization and quoting
//!
//! Reserves are whole tokens scaled to 18 decimals. Amounts are either whole
//! tokens, where one token always moves the output by far more than rounding,
//! or sub-token dust down to a single wei.

use num_bigint::BigUint;
use num_traits::Zero;
use proptest::prelude::*;
use uniswap_v2::{
    adjust_to_exact_total, amount_out_for_pool, compute_split, split_amount_outs,
    swaps_to_execute, Pool,
};

fn units(n: u64) -> BigUint {
    BigUint::from(n) * BigUint::from(10u32).pow(18)
}

fn pool_strategy() -> impl Strategy<Value = (u64, u64)> {
    (1_000u64..1_000_000, 1_000u64..1_000_000)
}

fn pools_strategy() -> impl Strategy<Value = Vec<Pool>> {
    prop::collection::vec(pool_strategy(), 1..6).prop_map(|reserves| {
        reserves
            .into_iter()
            .enumerate()
            .map(|(i, (reserve_in, reserve_out))| {
                Pool::new(i as u64 + 1, units(reserve_in), units(reserve_out))
            })
            .collect()
    })
}

fn whole_amount_strategy() -> impl Strategy<Value = BigUint> {
    (1u64..10_000, 0u64..1_000_000_000_000_000_000)
        .prop_map(|(whole, wei)| units(whole) + BigUint::from(wei))
}

fn dust_amount_strategy() -> impl Strategy<Value = BigUint> {
    prop_oneof![
        (1u64..1_000).prop_map(BigUint::from),
        (1u64..1_000_000_000_000_000_000).prop_map(BigUint::from),
    ]
}

fn amount_strategy() -> impl Strategy<Value = BigUint> {
    prop_oneof![whole_amount_strategy(), dust_amount_strategy()]
}

fn total(allocations: &[uniswap_v2::Allocation]) -> BigUint {
    allocations.iter().map(|a| &a.amount).sum()
}

proptest! {
    #[test]
    fn prop_adjusted_split_sums_to_amount(pools in pools_strategy(), amount in amount_strategy()) {
        let swaps = swaps_to_execute(&amount, &pools).unwrap();
        prop_assert_eq!(total(&swaps), amount);
    }

    #[test]
    fn prop_split_is_close_before_adjustment(pools in pools_strategy(), amount in amount_strategy()) {
        let split = compute_split(&amount, &pools).unwrap();
        prop_assert!(!split.is_empty());
        prop_assert!(split.len() <= pools.len());
        for allocation in &split {
            prop_assert!(pools.iter().any(|p| p.chain_id == allocation.chain_id));
        }

        let sum = total(&split);
        let slack = BigUint::from(pools.len() as u64 + 1);
        prop_assert!(sum <= &amount + &slack);
        prop_assert!(sum + &slack >= amount);
    }

    #[test]
    fn prop_single_pool_gets_whole_amount(pool in pool_strategy(), amount in amount_strategy()) {
        let pools = vec![Pool::new(7u64, units(pool.0), units(pool.1))];
        let split = compute_split(&amount, &pools).unwrap();
        prop_assert_eq!(split.len(), 1);
        prop_assert!(split[0].amount >= amount);
        prop_assert!(split[0].amount <= &amount + BigUint::from(1u32));

        let adjusted = adjust_to_exact_total(&amount, &split).unwrap();
        prop_assert_eq!(&adjusted[0].amount, &amount);
    }

    #[test]
    fn prop_total_out_grows_with_amount(
        pools in pools_strategy(),
        amount in amount_strategy(),
        extra in 1u64..1_000,
    ) {
        let larger = &amount + units(extra) / 1_000u32;

        let small = swaps_to_execute(&amount, &pools).unwrap();
        let large = swaps_to_execute(&larger, &pools).unwrap();

        let small_out = split_amount_outs(&pools, &small).total_out;
        let large_out = split_amount_outs(&pools, &large).total_out;
        prop_assert!(large_out >= small_out);
    }

    #[test]
    fn prop_amount_out_monotonic_in_reserves(
        (reserve_in, reserve_out) in pool_strategy(),
        amount in whole_amount_strategy(),
    ) {
        let reserve_in = units(reserve_in);
        let reserve_out = units(reserve_out);
        let base = amount_out_for_pool(&amount, &reserve_in, &reserve_out);

        prop_assert!(amount_out_for_pool(&BigUint::zero(), &reserve_in, &reserve_out).is_zero());
        prop_assert!(amount_out_for_pool(&amount, &reserve_in, &(&reserve_out * 2u32)) > base);
        prop_assert!(amount_out_for_pool(&amount, &(&reserve_in * 2u32), &reserve_out) < base);
        prop_assert!(base < reserve_out);
    }

    #[test]
    fn prop_dust_amount_out_never_decreases_with_depth(
        (reserve_in, reserve_out) in pool_strategy(),
        amount in dust_amount_strategy(),
    ) {
        let reserve_in = units(reserve_in);
        let reserve_out = units(reserve_out);
        let base = amount_out_for_pool(&amount, &reserve_in, &reserve_out);

        prop_assert!(amount_out_for_pool(&amount, &reserve_in, &(&reserve_out * 2u32)) >= base);
        prop_assert!(amount_out_for_pool(&amount, &(&reserve_in * 2u32), &reserve_out) <= base);
    }

    #[test]
    fn prop_dust_split_routes_whole_amount(pools in pools_strategy(), amount in dust_amount_strategy()) {
        let swaps = swaps_to_execute(&amount, &pools).unwrap();
        prop_assert!(!swaps.is_empty());
        prop_assert_eq!(total(&swaps), amount);
    }
}
