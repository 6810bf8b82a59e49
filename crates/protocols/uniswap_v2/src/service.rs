//! Superswap Service
//!
//! Ties pair discovery, split optimization, and quoting together for one
//! configured set of chains.

use num_bigint::BigUint;
use superswap_core::{check_agent_amount, format_units, parse_units, AppConfig, ChainId};

use crate::fetch::{fetch_pairs_on_all_chains, ReserveSource};
use crate::optimizer::swaps_to_execute;
use crate::router::{build_swap_plan, quote_swap_routes};
use crate::state::{Pool, SplitError, SuperswapPlan, SwapRoutes};

/// Quotes and plans superswaps against live reserves
pub struct SuperswapService<S> {
    config: AppConfig,
    source: S,
}

impl<S: ReserveSource> SuperswapService<S> {
    pub fn new(config: AppConfig, source: S) -> Self {
        Self { config, source }
    }

    /// Current pools for the pair on every reachable chain
    pub fn pools(&self, token_in: &str, token_out: &str) -> Result<Vec<Pool>, SplitError> {
        let pairs = fetch_pairs_on_all_chains(&self.source, &self.config, token_in, token_out)?;
        Ok(pairs.iter().map(|p| p.pool()).collect())
    }

    /// Quote selling `amount_in` (token units) of `token_in` for `token_out`
    pub fn quote(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: &BigUint,
    ) -> Result<SwapRoutes, SplitError> {
        let pools = self.pools(token_in, token_out)?;
        quote_swap_routes(&self.config, &pools, amount_in)
    }

    /// Build the approval and swap arguments for a human-entered amount.
    ///
    /// `origin_chain` is the chain the wallet signs on; the sold token's
    /// address is resolved there.
    pub fn plan_swap(
        &self,
        origin_chain: ChainId,
        token_in: &str,
        token_out: &str,
        human_amount: &str,
    ) -> Result<SuperswapPlan, SplitError> {
        check_agent_amount(human_amount)?;
        let amount_in = parse_units(human_amount, self.config.token_decimals)?;

        let origin = self
            .config
            .chain(origin_chain)
            .ok_or(SplitError::UnknownChain(origin_chain))?;
        let token_in_address = origin
            .token_address(token_in)
            .ok_or_else(|| SplitError::UnknownToken {
                chain_id: origin_chain,
                symbol: token_in.to_string(),
            })?
            .clone();

        let pools = self.pools(token_in, token_out)?;
        let allocations = swaps_to_execute(&amount_in, &pools)?;
        let plan = build_swap_plan(&allocations);

        tracing::info!(
            "Planned superswap of {} {} -> {} across chains {:?}",
            format_units(&plan.total, self.config.token_decimals),
            token_in,
            token_out,
            plan.chain_ids
        );

        Ok(SuperswapPlan {
            token_in: token_in_address,
            superswapper: self.config.superswapper.clone(),
            plan,
        })
    }
}
