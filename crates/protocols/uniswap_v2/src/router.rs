//! Cross-Chain Router
//!
//! Turns an optimized split into the views callers need: the split route
//! compared against routing everything through one chain, and the argument
//! arrays for the superswapper contract.

use num_bigint::BigUint;
use superswap_core::AppConfig;

use crate::calculator::{
    calculate_improvement, calculate_percentage, calculate_price_impact,
    single_pool_amount_outs, split_amount_outs,
};
use crate::optimizer::swaps_to_execute;
use crate::state::{
    Allocation, OptimizedRoute, OptimizedRouteStep, Pool, SingleChainRoute, SplitError,
    SwapPlan, SwapRoutes,
};

/// Quote the optimized split of `amount_in` and every single-chain route.
///
/// Steps and single-chain routes follow the order of `pools`. Pools the
/// optimizer excluded appear as steps with zero input.
pub fn quote_swap_routes(
    config: &AppConfig,
    pools: &[Pool],
    amount_in: &BigUint,
) -> Result<SwapRoutes, SplitError> {
    let allocations = swaps_to_execute(amount_in, pools)?;
    let split = split_amount_outs(pools, &allocations);
    let singles = single_pool_amount_outs(pools, &allocations);

    let steps: Vec<OptimizedRouteStep> = split
        .outputs
        .into_iter()
        .map(|output| OptimizedRouteStep {
            chain_id: output.chain_id,
            chain_name: config.chain_name(output.chain_id),
            percentage: calculate_percentage(&output.amount_in, amount_in),
            amount_in: output.amount_in,
            amount_out: output.amount_out,
        })
        .collect();

    let single_chain_routes: Vec<SingleChainRoute> = pools
        .iter()
        .zip(singles)
        .map(|(pool, output)| SingleChainRoute {
            chain_id: pool.chain_id,
            chain_name: config.chain_name(pool.chain_id),
            price_impact: calculate_price_impact(
                &pool.reserve_in,
                &pool.reserve_out,
                &output.amount_in,
                &output.amount_out,
            ),
            amount_out: output.amount_out,
        })
        .collect();

    let best_single = single_chain_routes
        .iter()
        .map(|r| &r.amount_out)
        .max()
        .cloned()
        .unwrap_or_default();
    let improvement_pct = calculate_improvement(&split.total_out, &best_single);

    Ok(SwapRoutes {
        optimized: OptimizedRoute {
            steps,
            total_amount_in: amount_in.clone(),
            total_amount_out: split.total_out,
            improvement_pct,
        },
        single_chain_routes,
    })
}

/// Flatten allocations into the superswapper's parallel argument arrays
pub fn build_swap_plan(allocations: &[Allocation]) -> SwapPlan {
    let chain_ids = allocations.iter().map(|a| a.chain_id).collect();
    let amounts: Vec<BigUint> = allocations.iter().map(|a| a.amount.clone()).collect();
    let total = amounts.iter().sum();
    SwapPlan {
        chain_ids,
        amounts,
        total,
    }
}
