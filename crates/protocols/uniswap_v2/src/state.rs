//! Uniswap V2 State Types
//!
//! Data structures for pools, allocations, quotes, and swap plans.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use superswap_core::{
    amount_string, amount_string_vec, Address, ChainId, ProtocolError, SourceError,
};
use thiserror::Error;

/// Reserves of one chain's pool for the pair being swapped, oriented
/// input-side first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub chain_id: ChainId,
    /// Reserve of the token being sold (10^18 scaled)
    #[serde(with = "amount_string")]
    pub reserve_in: BigUint,
    /// Reserve of the token being bought (10^18 scaled)
    #[serde(with = "amount_string")]
    pub reserve_out: BigUint,
}

impl Pool {
    pub fn new(
        chain_id: impl Into<ChainId>,
        reserve_in: impl Into<BigUint>,
        reserve_out: impl Into<BigUint>,
    ) -> Self {
        Self {
            chain_id: chain_id.into(),
            reserve_in: reserve_in.into(),
            reserve_out: reserve_out.into(),
        }
    }

    /// Both reserves are non-zero
    pub fn is_usable(&self) -> bool {
        !self.reserve_in.is_zero() && !self.reserve_out.is_zero()
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pool on chain {} | in: {} | out: {}",
            self.chain_id, self.reserve_in, self.reserve_out
        )
    }
}

/// A discovered pair with its addresses and oriented reserves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairInfo {
    pub chain_id: ChainId,
    /// Pair contract address
    pub pair: Address,
    pub token_in: Address,
    pub token_out: Address,
    #[serde(with = "amount_string")]
    pub reserve_in: BigUint,
    #[serde(with = "amount_string")]
    pub reserve_out: BigUint,
}

impl PairInfo {
    pub fn pool(&self) -> Pool {
        Pool {
            chain_id: self.chain_id,
            reserve_in: self.reserve_in.clone(),
            reserve_out: self.reserve_out.clone(),
        }
    }
}

/// Portion of the total input routed to one chain's pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub chain_id: ChainId,
    #[serde(with = "amount_string")]
    pub amount: BigUint,
}

impl Allocation {
    pub fn new(chain_id: impl Into<ChainId>, amount: impl Into<BigUint>) -> Self {
        Self {
            chain_id: chain_id.into(),
            amount: amount.into(),
        }
    }
}

/// Realized output of one pool for a given input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolOutput {
    pub chain_id: ChainId,
    #[serde(with = "amount_string")]
    pub amount_in: BigUint,
    #[serde(with = "amount_string")]
    pub amount_out: BigUint,
}

/// Per-pool outputs of a split plus their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitQuote {
    /// One entry per pool, in pool order
    pub outputs: Vec<PoolOutput>,
    #[serde(with = "amount_string")]
    pub total_out: BigUint,
}

/// One chain's leg of the optimized route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedRouteStep {
    pub chain_id: ChainId,
    pub chain_name: String,
    /// Share of the total input, 0-100
    pub percentage: f64,
    #[serde(with = "amount_string")]
    pub amount_in: BigUint,
    #[serde(with = "amount_string")]
    pub amount_out: BigUint,
}

/// Split route across all chains
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedRoute {
    pub steps: Vec<OptimizedRouteStep>,
    #[serde(with = "amount_string")]
    pub total_amount_in: BigUint,
    #[serde(with = "amount_string")]
    pub total_amount_out: BigUint,
    /// How much more output the split gives vs the best single chain
    pub improvement_pct: f64,
}

/// The whole input routed through one chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleChainRoute {
    pub chain_id: ChainId,
    pub chain_name: String,
    #[serde(with = "amount_string")]
    pub amount_out: BigUint,
    /// Price impact percentage
    pub price_impact: f64,
}

/// Optimized route alongside every single-chain alternative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRoutes {
    pub optimized: OptimizedRoute,
    pub single_chain_routes: Vec<SingleChainRoute>,
}

impl SwapRoutes {
    /// Steps that receive a non-zero input
    pub fn active_steps(&self) -> impl Iterator<Item = &OptimizedRouteStep> {
        self.optimized
            .steps
            .iter()
            .filter(|s| !s.amount_in.is_zero())
    }

    /// Single-chain route with the highest output
    pub fn best_single_chain(&self) -> Option<&SingleChainRoute> {
        self.single_chain_routes
            .iter()
            .max_by(|a, b| a.amount_out.cmp(&b.amount_out))
    }

    /// Whether the optimized route is worth presenting next to the
    /// single-chain routes.
    ///
    /// A split that collapsed onto one chain and yields exactly what that
    /// chain's single route yields adds nothing.
    pub fn shows_split(&self) -> bool {
        let mut active = self.active_steps();
        let (Some(step), None) = (active.next(), active.next()) else {
            return true;
        };
        !self.single_chain_routes.iter().any(|route| {
            route.chain_id == step.chain_id && route.amount_out == self.optimized.total_amount_out
        })
    }
}

/// Argument arrays for the superswapper's `initiateSwap`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPlan {
    pub chain_ids: Vec<ChainId>,
    #[serde(with = "amount_string_vec")]
    pub amounts: Vec<BigUint>,
    /// Sum of `amounts`, the ERC-20 approval to grant the superswapper
    #[serde(with = "amount_string")]
    pub total: BigUint,
}

/// Everything a wallet needs to approve and submit a superswap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuperswapPlan {
    /// Address of the sold token on the origin chain
    pub token_in: Address,
    /// Spender for the approval and target of the swap call
    pub superswapper: Address,
    pub plan: SwapPlan,
}

/// Split routing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Reserve source error: {0}")]
    Source(#[from] SourceError),

    #[error("No usable liquidity for {0}")]
    NoLiquidity(String),

    #[error("Chain {0} is not configured")]
    UnknownChain(ChainId),

    #[error("Token {symbol} is not configured on chain {chain_id}")]
    UnknownToken { chain_id: ChainId, symbol: String },
}

impl From<ProtocolError> for SplitError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::InvalidInput { reason } => Self::InvalidInput(reason),
            ProtocolError::Arithmetic { reason } => Self::Arithmetic(reason),
            ProtocolError::InvalidAmount { message } => Self::InvalidAmount(message),
            ProtocolError::NoLiquidity { pair } => Self::NoLiquidity(pair),
            ProtocolError::ChainNotConfigured { chain_id } => Self::UnknownChain(chain_id),
        }
    }
}

impl From<SplitError> for superswap_core::Error {
    fn from(err: SplitError) -> Self {
        match err {
            SplitError::InvalidInput(reason) => ProtocolError::InvalidInput { reason }.into(),
            SplitError::Arithmetic(reason) => ProtocolError::Arithmetic { reason }.into(),
            SplitError::InvalidAmount(message) => ProtocolError::InvalidAmount { message }.into(),
            SplitError::Source(e) => e.into(),
            SplitError::NoLiquidity(pair) => ProtocolError::NoLiquidity { pair }.into(),
            SplitError::UnknownChain(chain_id) => {
                ProtocolError::ChainNotConfigured { chain_id }.into()
            }
            SplitError::UnknownToken { chain_id, symbol } => superswap_core::Error::Config(
                format!("token {} is not configured on chain {}", symbol, chain_id),
            ),
        }
    }
}
