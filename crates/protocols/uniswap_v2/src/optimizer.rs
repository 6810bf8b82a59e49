//! Split Optimizer
//!
//! Splits one input amount across pools of the same pair on different chains
//! so that every used pool ends at approximately the same marginal price.
//!
//! All pools are first treated as one merged pool whose post-trade rate is the
//! shadow price `lambda = Σout * 10^36 / (Σin + amount_in)`. Each pool is then
//! assigned the input that moves its own rate onto `lambda`. Pools that would
//! need a negative input are dropped and the shadow price is recomputed over
//! the rest.

use std::collections::HashSet;

use num_bigint::{BigInt, BigUint};
use num_traits::{Signed, Zero};
use superswap_core::ChainId;

use crate::constants::scale::{precision_scale, scale};
use crate::state::{Allocation, Pool, SplitError};

/// Reject pool sets the optimizer cannot work with
pub fn validate_pools(pools: &[Pool]) -> Result<(), SplitError> {
    if pools.is_empty() {
        return Err(SplitError::InvalidInput("no pools to split across".to_string()));
    }

    let mut seen = HashSet::new();
    for pool in pools {
        if !pool.is_usable() {
            return Err(SplitError::InvalidInput(format!(
                "pool on chain {} has a zero reserve",
                pool.chain_id
            )));
        }
        if !seen.insert(pool.chain_id) {
            return Err(SplitError::InvalidInput(format!(
                "more than one pool for chain {}",
                pool.chain_id
            )));
        }
    }
    Ok(())
}

/// Compute how much of `amount_in` to route through each pool.
///
/// Returns one allocation per surviving pool, in input order. Pools that were
/// eliminated are omitted. Amounts are truncated and may sum to slightly less
/// or more than `amount_in`; see [`adjust_to_exact_total`].
pub fn compute_split(amount_in: &BigUint, pools: &[Pool]) -> Result<Vec<Allocation>, SplitError> {
    validate_pools(pools)?;

    let precision = precision_scale();
    let mut candidates: Vec<&Pool> = pools.iter().collect();

    while !candidates.is_empty() {
        let total_in: BigUint = candidates.iter().map(|p| &p.reserve_in).sum();
        let total_out: BigUint = candidates.iter().map(|p| &p.reserve_out).sum();

        let lambda = total_out * &precision / (total_in + amount_in);
        if lambda.is_zero() {
            return Err(SplitError::Arithmetic(
                "shadow price rounds to zero".to_string(),
            ));
        }

        let provisional: Vec<(ChainId, BigInt)> = candidates
            .iter()
            .map(|pool| {
                let target_in = &pool.reserve_out * &precision / &lambda;
                let amount = BigInt::from(target_in) - BigInt::from(pool.reserve_in.clone());
                (pool.chain_id, amount)
            })
            .collect();

        let eliminated: Vec<ChainId> = provisional
            .iter()
            .filter(|(_, amount)| amount.is_negative())
            .map(|(chain_id, _)| *chain_id)
            .collect();

        if eliminated.is_empty() {
            return provisional
                .into_iter()
                .map(|(chain_id, amount)| {
                    let amount = amount.to_biguint().ok_or_else(|| {
                        SplitError::Arithmetic(format!("negative allocation on chain {}", chain_id))
                    })?;
                    Ok(Allocation { chain_id, amount })
                })
                .collect();
        }

        candidates.retain(|p| !eliminated.contains(&p.chain_id));
        tracing::debug!(
            "Eliminated pools on chains {:?}, {} candidates remain",
            eliminated,
            candidates.len()
        );
    }

    Err(SplitError::InvalidInput(
        "every pool was eliminated from the split".to_string(),
    ))
}

/// Rescale allocations so they sum exactly to `amount_in`.
///
/// Allocations are scaled by `amount_in * 10^18 / Σ amounts`, truncating, and
/// whatever is left over goes to the first allocation. Allocations that are
/// all zero are not scaled, so the first one receives the whole amount.
pub fn adjust_to_exact_total(
    amount_in: &BigUint,
    allocations: &[Allocation],
) -> Result<Vec<Allocation>, SplitError> {
    if amount_in.is_zero() {
        return Ok(allocations
            .iter()
            .map(|a| Allocation {
                chain_id: a.chain_id,
                amount: BigUint::zero(),
            })
            .collect());
    }
    if allocations.is_empty() {
        return Err(SplitError::InvalidInput(
            "no allocations to adjust".to_string(),
        ));
    }

    let current_sum: BigUint = allocations.iter().map(|a| &a.amount).sum();
    if &current_sum == amount_in {
        return Ok(allocations.to_vec());
    }

    // Dust inputs truncate every allocation to zero
    let mut adjusted: Vec<Allocation> = if current_sum.is_zero() {
        allocations.to_vec()
    } else {
        let scale = scale();
        let factor = amount_in * &scale / &current_sum;
        allocations
            .iter()
            .map(|a| Allocation {
                chain_id: a.chain_id,
                amount: &a.amount * &factor / &scale,
            })
            .collect()
    };

    let adjusted_sum: BigUint = adjusted.iter().map(|a| &a.amount).sum();
    let difference = BigInt::from(amount_in.clone()) - BigInt::from(adjusted_sum);
    if !difference.is_zero() {
        let first = &mut adjusted[0];
        first.amount = (BigInt::from(first.amount.clone()) + difference)
            .to_biguint()
            .ok_or_else(|| {
                SplitError::Arithmetic(format!(
                    "rounding residual exceeds allocation on chain {}",
                    first.chain_id
                ))
            })?;
    }

    Ok(adjusted)
}

/// Split `amount_in` across `pools` and fix rounding so the parts sum to it
pub fn swaps_to_execute(
    amount_in: &BigUint,
    pools: &[Pool],
) -> Result<Vec<Allocation>, SplitError> {
    let split = compute_split(amount_in, pools)?;
    let adjusted = adjust_to_exact_total(amount_in, &split)?;
    tracing::debug!(
        "Split {} across {} of {} pools",
        amount_in,
        adjusted.len(),
        pools.len()
    );
    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(n: u64) -> BigUint {
        BigUint::from(n) * BigUint::from(10u32).pow(18)
    }

    fn big(s: &str) -> BigUint {
        s.parse().unwrap()
    }

    fn amounts(allocations: &[Allocation]) -> Vec<BigUint> {
        allocations.iter().map(|a| a.amount.clone()).collect()
    }

    fn total(allocations: &[Allocation]) -> BigUint {
        allocations.iter().map(|a| &a.amount).sum()
    }

    /// Four WETH/DAI pools priced at 2000 DAI per WETH
    fn fixture_pools() -> Vec<Pool> {
        vec![
            Pool::new(123u64, units(1000), units(2_000_000)),
            Pool::new(234u64, units(500), units(1_000_000)),
            Pool::new(345u64, units(200), units(400_000)),
            Pool::new(456u64, units(100), units(200_000)),
        ]
    }

    #[test]
    fn test_compute_split_fixture_proportional_to_reserves() {
        let split = compute_split(&units(100), &fixture_pools()).unwrap();
        assert_eq!(
            amounts(&split),
            vec![
                big("55555555555555555555"),
                big("27777777777777777777"),
                big("11111111111111111111"),
                big("5555555555555555555"),
            ]
        );
        // 100 * reserve_in / 1800, truncated
        assert_eq!(total(&split), big("99999999999999999998"));
    }

    #[test]
    fn test_swaps_to_execute_fixture() {
        let swaps = swaps_to_execute(&units(100), &fixture_pools()).unwrap();
        assert_eq!(
            amounts(&swaps),
            vec![
                big("55555555555555555557"),
                big("27777777777777777777"),
                big("11111111111111111111"),
                big("5555555555555555555"),
            ]
        );
        assert_eq!(total(&swaps), units(100));
    }

    #[test]
    fn test_swaps_to_execute_fixture_500() {
        let swaps = swaps_to_execute(&units(500), &fixture_pools()).unwrap();
        let ids: Vec<u64> = swaps.iter().map(|s| s.chain_id.0).collect();
        assert_eq!(ids, vec![123, 234, 345, 456]);
        assert_eq!(
            amounts(&swaps),
            vec![
                big("277777777777777777780"),
                big("138888888888888888888"),
                big("55555555555555555555"),
                big("27777777777777777777"),
            ]
        );
    }

    #[test]
    fn test_single_pool_takes_everything() {
        let pools = vec![Pool::new(9u64, units(3), units(11))];
        let split = compute_split(&units(7), &pools).unwrap();
        assert_eq!(split, vec![Allocation::new(9u64, units(7))]);
    }

    #[test]
    fn test_compute_split_eliminates_expensive_pool() {
        // Chain 2 prices at 1 out per in, the others at 10: it cannot take
        // any share without worsening the shared rate.
        let pools = vec![
            Pool::new(1u64, units(100), units(1000)),
            Pool::new(2u64, units(100), units(100)),
            Pool::new(3u64, units(1000), units(10_000)),
        ];
        let split = compute_split(&units(10), &pools).unwrap();
        let ids: Vec<u64> = split.iter().map(|s| s.chain_id.0).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(
            amounts(&split),
            vec![big("909090909090909090"), big("9090909090909090909")]
        );

        let adjusted = adjust_to_exact_total(&units(10), &split).unwrap();
        assert_eq!(adjusted[0].amount, big("909090909090909091"));
        assert_eq!(total(&adjusted), units(10));
    }

    #[test]
    fn test_compute_split_zero_amount() {
        let split = compute_split(&BigUint::zero(), &fixture_pools()).unwrap();
        assert_eq!(split.len(), 4);
        assert!(split.iter().all(|a| a.amount.is_zero()));
    }

    #[test]
    fn test_compute_split_rejects_empty_pools() {
        let err = compute_split(&units(1), &[]).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));
    }

    #[test]
    fn test_compute_split_rejects_zero_reserve() {
        let pools = vec![
            Pool::new(1u64, units(10), units(10)),
            Pool::new(2u64, BigUint::zero(), units(10)),
        ];
        let err = compute_split(&units(1), &pools).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));

        let pools = vec![Pool::new(1u64, units(10), BigUint::zero())];
        assert!(compute_split(&units(1), &pools).is_err());
    }

    #[test]
    fn test_compute_split_rejects_duplicate_chain() {
        let pools = vec![
            Pool::new(1u64, units(10), units(10)),
            Pool::new(1u64, units(20), units(20)),
        ];
        let err = compute_split(&units(1), &pools).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));
    }

    #[test]
    fn test_adjust_adds_residual_to_first() {
        let allocations = vec![
            Allocation::new(1u64, 1u32),
            Allocation::new(2u64, 1u32),
            Allocation::new(3u64, 1u32),
        ];
        let adjusted = adjust_to_exact_total(&BigUint::from(10u32), &allocations).unwrap();
        assert_eq!(
            amounts(&adjusted),
            vec![BigUint::from(4u32), BigUint::from(3u32), BigUint::from(3u32)]
        );
    }

    #[test]
    fn test_adjust_scales_proportionally() {
        let allocations = vec![Allocation::new(1u64, 3u32), Allocation::new(2u64, 7u32)];
        let adjusted = adjust_to_exact_total(&units(1), &allocations).unwrap();
        assert_eq!(
            amounts(&adjusted),
            vec![big("300000000000000000"), big("700000000000000000")]
        );
    }

    #[test]
    fn test_adjust_exact_total_is_unchanged() {
        let allocations = vec![Allocation::new(1u64, 6u32), Allocation::new(2u64, 4u32)];
        let adjusted = adjust_to_exact_total(&BigUint::from(10u32), &allocations).unwrap();
        assert_eq!(adjusted, allocations);
    }

    #[test]
    fn test_adjust_zero_amount_returns_zeros() {
        let allocations = vec![Allocation::new(1u64, 6u32), Allocation::new(2u64, 4u32)];
        let adjusted = adjust_to_exact_total(&BigUint::zero(), &allocations).unwrap();
        assert_eq!(adjusted.len(), 2);
        assert!(adjusted.iter().all(|a| a.amount.is_zero()));
    }

    #[test]
    fn test_adjust_zero_sum_goes_to_first() {
        let allocations = vec![Allocation::new(1u64, 0u32), Allocation::new(2u64, 0u32)];
        let adjusted = adjust_to_exact_total(&BigUint::from(5u32), &allocations).unwrap();
        assert_eq!(
            adjusted,
            vec![Allocation::new(1u64, 5u32), Allocation::new(2u64, 0u32)]
        );
    }

    #[test]
    fn test_swaps_to_execute_one_wei() {
        let pools = vec![
            Pool::new(1u64, units(1), units(2)),
            Pool::new(2u64, units(1), units(2)),
        ];
        let one = BigUint::from(1u32);

        let split = compute_split(&one, &pools).unwrap();
        assert!(split.iter().all(|a| a.amount.is_zero()));

        let swaps = swaps_to_execute(&one, &pools).unwrap();
        assert_eq!(
            swaps,
            vec![Allocation::new(1u64, 1u32), Allocation::new(2u64, 0u32)]
        );
        assert_eq!(total(&swaps), one);
    }

    #[test]
    fn test_adjust_empty_allocations() {
        let err = adjust_to_exact_total(&BigUint::from(5u32), &[]).unwrap_err();
        assert!(matches!(err, SplitError::InvalidInput(_)));
    }
}
