//! Uniswap V2 Cross-Chain Split Routing
//!
//! This crate splits a swap across Uniswap V2 pools of the same pair on
//! several chains and quotes the result against single-chain routing.

pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod optimizer;
pub mod router;
pub mod service;
pub mod state;

// Re-exports
pub use calculator::{
    amount_out_for_pool, calculate_price_impact, single_pool_amount_outs, split_amount_outs,
};
pub use constants::{fees, scale};
pub use fetch::{fetch_pairs_on_all_chains, PairReserves, ReserveSource, StaticReserveSource};
pub use optimizer::{adjust_to_exact_total, compute_split, swaps_to_execute, validate_pools};
pub use router::{build_swap_plan, quote_swap_routes};
pub use service::SuperswapService;
pub use state::{
    Allocation, OptimizedRoute, OptimizedRouteStep, PairInfo, Pool, PoolOutput,
    SingleChainRoute, SplitError, SplitQuote, SuperswapPlan, SwapPlan, SwapRoutes,
};
