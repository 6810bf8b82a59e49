//! Uniswap V2 Constants
//!
//! Fixed-point scales and fee parameters for constant-product pools.

/// Fixed-point scales
pub mod scale {
    use num_bigint::BigUint;

    /// Token amount scale (10^18)
    pub const SCALE: u128 = 1_000_000_000_000_000_000;

    /// Intermediate scale for the shadow price division (10^36)
    pub const PRECISION_SCALE: u128 = 1_000_000_000_000_000_000_000_000_000_000_000_000;

    pub fn scale() -> BigUint {
        BigUint::from(SCALE)
    }

    pub fn precision_scale() -> BigUint {
        BigUint::from(PRECISION_SCALE)
    }
}

/// Fee constants
pub mod fees {
    /// Fee numerator (0.3% fee = 997/1000)
    pub const FEE_NUM: u32 = 997;

    /// Fee denominator
    pub const FEE_DENOM: u32 = 1000;
}
