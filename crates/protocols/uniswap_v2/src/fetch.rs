//! Pair Discovery
//!
//! Reads the pair for a token pair on every configured chain and orients its
//! reserves input-side first.

use std::collections::HashMap;

use num_bigint::BigUint;
use superswap_core::{Address, AppConfig, ChainConfig, ChainId, SourceError};

use crate::state::{PairInfo, SplitError};

/// Raw view of a V2 pair as returned by `token0()` and `getReserves()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairReserves {
    pub pair: Address,
    pub token0: Address,
    pub reserve0: BigUint,
    pub reserve1: BigUint,
}

impl PairReserves {
    /// Return `(reserve_in, reserve_out)` for a swap selling `token_in`
    pub fn orient(&self, token_in: &Address) -> (BigUint, BigUint) {
        if self.token0.matches(token_in) {
            (self.reserve0.clone(), self.reserve1.clone())
        } else {
            (self.reserve1.clone(), self.reserve0.clone())
        }
    }
}

/// Source of live pair reserves (typically a node RPC client)
pub trait ReserveSource {
    fn pair_reserves(
        &self,
        chain: &ChainConfig,
        token_in: &Address,
        token_out: &Address,
    ) -> Result<PairReserves, SourceError>;
}

/// Reserves held in memory, keyed by chain
#[derive(Debug, Clone, Default)]
pub struct StaticReserveSource {
    pairs: HashMap<ChainId, PairReserves>,
}

impl StaticReserveSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(mut self, chain_id: ChainId, reserves: PairReserves) -> Self {
        self.pairs.insert(chain_id, reserves);
        self
    }
}

impl ReserveSource for StaticReserveSource {
    fn pair_reserves(
        &self,
        chain: &ChainConfig,
        token_in: &Address,
        token_out: &Address,
    ) -> Result<PairReserves, SourceError> {
        self.pairs
            .get(&chain.chain_id)
            .cloned()
            .ok_or_else(|| SourceError::PairNotFound {
                chain_id: chain.chain_id,
                token_in: token_in.to_string(),
                token_out: token_out.to_string(),
            })
    }
}

/// Collect the `token_in`/`token_out` pair on every configured chain.
///
/// Chains whose source call fails or whose pair holds a zero reserve are
/// skipped. Fails if no chain is left.
pub fn fetch_pairs_on_all_chains<S: ReserveSource + ?Sized>(
    source: &S,
    config: &AppConfig,
    token_in: &str,
    token_out: &str,
) -> Result<Vec<PairInfo>, SplitError> {
    let mut pairs = Vec::new();

    for chain in &config.chains {
        let token_in_address = resolve_token(chain, token_in)?;
        let token_out_address = resolve_token(chain, token_out)?;

        let reserves = match source.pair_reserves(chain, token_in_address, token_out_address) {
            Ok(reserves) => reserves,
            Err(e) => {
                tracing::warn!("Skipping chain {} ({}): {}", chain.chain_id, chain.name, e);
                continue;
            }
        };

        let (reserve_in, reserve_out) = reserves.orient(token_in_address);
        let pair = PairInfo {
            chain_id: chain.chain_id,
            pair: reserves.pair,
            token_in: token_in_address.clone(),
            token_out: token_out_address.clone(),
            reserve_in,
            reserve_out,
        };
        if !pair.pool().is_usable() {
            tracing::warn!(
                "Skipping chain {} ({}): pair {} has no liquidity",
                chain.chain_id,
                chain.name,
                pair.pair
            );
            continue;
        }
        pairs.push(pair);
    }

    if pairs.is_empty() {
        return Err(SplitError::NoLiquidity(format!("{}/{}", token_in, token_out)));
    }
    tracing::info!(
        "Discovered {} {}/{} pools across {} chains",
        pairs.len(),
        token_in,
        token_out,
        config.chains.len()
    );
    Ok(pairs)
}

fn resolve_token<'a>(chain: &'a ChainConfig, symbol: &str) -> Result<&'a Address, SplitError> {
    chain
        .token_address(symbol)
        .ok_or_else(|| SplitError::UnknownToken {
            chain_id: chain.chain_id,
            symbol: symbol.to_string(),
        })
}
