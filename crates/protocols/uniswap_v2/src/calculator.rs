//! Uniswap V2 Calculator
//!
//! Swap math using constant product formula (x * y = k) with a fixed 0.3% fee.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::constants::fees::{FEE_DENOM, FEE_NUM};
use crate::state::{Allocation, Pool, PoolOutput, SplitQuote};

/// Parts-per-million resolution used for display ratios
const PPM: u32 = 1_000_000;

/// Calculate swap output for a single pool
///
/// Formula: output = (input * reserves_out * fee_num) / ((reserves_in + input) * fee_denom)
pub fn amount_out_for_pool(
    amount_in: &BigUint,
    reserve_in: &BigUint,
    reserve_out: &BigUint,
) -> BigUint {
    let denominator = (reserve_in + amount_in) * FEE_DENOM;
    if denominator.is_zero() {
        return BigUint::zero();
    }
    amount_in * reserve_out * FEE_NUM / denominator
}

/// Calculate per-pool outputs for an optimized split.
///
/// Pools without an allocation were excluded by the optimizer and produce
/// zero. Outputs follow the order of `pools`.
pub fn split_amount_outs(pools: &[Pool], allocations: &[Allocation]) -> SplitQuote {
    let outputs: Vec<PoolOutput> = pools
        .iter()
        .map(|pool| {
            let amount_in = allocations
                .iter()
                .find(|a| a.chain_id == pool.chain_id)
                .map(|a| a.amount.clone())
                .unwrap_or_default();
            let amount_out = if amount_in.is_zero() {
                BigUint::zero()
            } else {
                amount_out_for_pool(&amount_in, &pool.reserve_in, &pool.reserve_out)
            };
            PoolOutput {
                chain_id: pool.chain_id,
                amount_in,
                amount_out,
            }
        })
        .collect();

    let total_out = outputs.iter().map(|o| &o.amount_out).sum();
    SplitQuote { outputs, total_out }
}

/// Calculate what each pool would return if it received the whole input
/// of `allocations` on its own.
pub fn single_pool_amount_outs(pools: &[Pool], allocations: &[Allocation]) -> Vec<PoolOutput> {
    let total_in: BigUint = allocations.iter().map(|a| &a.amount).sum();
    pools
        .iter()
        .map(|pool| PoolOutput {
            chain_id: pool.chain_id,
            amount_in: total_in.clone(),
            amount_out: amount_out_for_pool(&total_in, &pool.reserve_in, &pool.reserve_out),
        })
        .collect()
}

/// Calculate price impact as percentage
///
/// Compares the execution price (output / input) with the spot price
/// (reserves_out / reserves_in). Fee is included in the impact.
pub fn calculate_price_impact(
    reserve_in: &BigUint,
    reserve_out: &BigUint,
    amount_in: &BigUint,
    amount_out: &BigUint,
) -> f64 {
    if amount_in.is_zero() || amount_out.is_zero() || reserve_in.is_zero() || reserve_out.is_zero()
    {
        return 0.0;
    }

    // execution / spot, in ppm
    let ratio = amount_out * reserve_in * PPM / (amount_in * reserve_out);
    let ratio = ratio.to_f64().unwrap_or(0.0) / PPM as f64;
    ((1.0 - ratio) * 100.0).abs()
}

/// Share of `part` in `total` as a percentage
pub fn calculate_percentage(part: &BigUint, total: &BigUint) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    let ppm = part * PPM / total;
    ppm.to_f64().unwrap_or(0.0) / PPM as f64 * 100.0
}

/// Percentage gain of `split_out` over `single_out`; zero when the split is
/// not better or there is nothing to compare against
pub fn calculate_improvement(split_out: &BigUint, single_out: &BigUint) -> f64 {
    if single_out.is_zero() || split_out <= single_out {
        return 0.0;
    }
    calculate_percentage(&(split_out - single_out), single_out)
}
