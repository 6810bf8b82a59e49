//! Configuration types for Superswap

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants::TOKEN_DECIMALS;
use crate::{Address, ChainId, Error, Result};

/// Superchain ERC-20 deployed at the same address on every chain
const ST9000_ADDRESS: &str = "0xcD630A5bDBb4DA3d1c79237bB326b1293950935D";

/// Predeployed wrapped ETH on OP-stack chains
const ETH_ADDRESS: &str = "0x4200000000000000000000000000000000000024";

/// One chain hosting a Uniswap V2 deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: ChainId,

    /// Display name (e.g., "Optimism")
    pub name: String,

    /// JSON-RPC endpoint used by the reserve source
    pub rpc_url: String,

    /// Uniswap V2 factory address
    pub factory: Address,

    /// Known token symbols and their addresses on this chain
    #[serde(default)]
    pub tokens: BTreeMap<String, Address>,
}

impl ChainConfig {
    fn superchain(chain_id: u64, name: &str, rpc_url: &str, factory: &str) -> Self {
        let tokens = BTreeMap::from([
            ("ST9000".to_string(), Address::new(ST9000_ADDRESS)),
            ("ETH".to_string(), Address::new(ETH_ADDRESS)),
        ]);
        Self {
            chain_id: ChainId(chain_id),
            name: name.to_string(),
            rpc_url: rpc_url.to_string(),
            factory: Address::new(factory),
            tokens,
        }
    }

    pub fn token_address(&self, symbol: &str) -> Option<&Address> {
        self.tokens.get(symbol)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chains swaps may be routed through, in routing order
    pub chains: Vec<ChainConfig>,

    /// Superswapper contract receiving the split swap
    pub superswapper: Address,

    /// Decimals of the routed tokens
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u32,
}

fn default_token_decimals() -> u32 {
    TOKEN_DECIMALS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chains: vec![
                ChainConfig::superchain(
                    10,
                    "Optimism",
                    "https://mainnet.optimism.io",
                    "0x0c3c1c532F1e39EdF36BE9Fe0bE1410313E074Bf",
                ),
                ChainConfig::superchain(
                    8453,
                    "Base",
                    "https://mainnet.base.org",
                    "0x8909Dc15e40173Ff4699343b6eB8132c65e18eC6",
                ),
                ChainConfig::superchain(
                    130,
                    "Unichain",
                    "https://mainnet.unichain.org",
                    "0x1F98400000000000000000000000000000000002",
                ),
                ChainConfig::superchain(
                    34443,
                    "Mode",
                    "https://mainnet.mode.network",
                    "0x50fD14F0eba5A678c1eBC16bDd3794f09362a95C",
                ),
            ],
            superswapper: Address::new("0x7B42F440353999e506f44CC955d12b3b8Dc7544B"),
            token_decimals: default_token_decimals(),
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check chain ids are unique and every address decodes
    pub fn validate(&self) -> Result<()> {
        if self.chains.is_empty() {
            return Err(Error::Config("no chains configured".to_string()));
        }
        if !self.superswapper.is_valid() {
            return Err(Error::Config(format!(
                "invalid superswapper address: {}",
                self.superswapper
            )));
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.chain_id) {
                return Err(Error::Config(format!(
                    "duplicate chain id {}",
                    chain.chain_id
                )));
            }
            if !chain.factory.is_valid() {
                return Err(Error::Config(format!(
                    "invalid factory address on chain {}: {}",
                    chain.chain_id, chain.factory
                )));
            }
            if let Some((symbol, addr)) = chain.tokens.iter().find(|(_, a)| !a.is_valid()) {
                return Err(Error::Config(format!(
                    "invalid {} address on chain {}: {}",
                    symbol, chain.chain_id, addr
                )));
            }
        }
        Ok(())
    }

    pub fn chain(&self, chain_id: ChainId) -> Option<&ChainConfig> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// Display name for a chain, falling back to its numeric id
    pub fn chain_name(&self, chain_id: ChainId) -> String {
        self.chain(chain_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Chain {}", chain_id))
    }
}
