//! Single-hop swap evaluation against a pool snapshot.
//!
//! Pool snapshots carry plain wei amounts; this module converts them to the
//! fixed point representation at the boundary, applies the weighted pool
//! formulas and converts back.

pub mod error;
pub mod fixed_point;
pub mod weighted_math;

use {error::Error, fixed_point::Bfp, model::Pool, primitive_types::U256};

/// Output amount for swapping `amount_in` of the pool's in-token.
pub fn amount_out_given_in(pool: &Pool, amount_in: U256) -> Result<U256, Error> {
    Ok(weighted_math::calc_out_given_in(
        Bfp::from_wei(pool.balance_in),
        Bfp::from_wei(pool.weight_in),
        Bfp::from_wei(pool.balance_out),
        Bfp::from_wei(pool.weight_out),
        Bfp::from_wei(amount_in),
        Bfp::from_wei(pool.swap_fee),
    )?
    .as_uint256())
}

/// Input amount required to receive `amount_out` of the pool's out-token.
pub fn amount_in_given_out(pool: &Pool, amount_out: U256) -> Result<U256, Error> {
    Ok(weighted_math::calc_in_given_out(
        Bfp::from_wei(pool.balance_in),
        Bfp::from_wei(pool.weight_in),
        Bfp::from_wei(pool.balance_out),
        Bfp::from_wei(pool.weight_out),
        Bfp::from_wei(amount_out),
        Bfp::from_wei(pool.swap_fee),
    )?
    .as_uint256())
}

/// The pool's marginal in-per-out exchange rate at zero trade size.
pub fn spot_price(pool: &Pool) -> Result<U256, Error> {
    Ok(weighted_math::calc_spot_price(
        Bfp::from_wei(pool.balance_in),
        Bfp::from_wei(pool.weight_in),
        Bfp::from_wei(pool.balance_out),
        Bfp::from_wei(pool.weight_out),
        Bfp::from_wei(pool.swap_fee),
    )?
    .as_uint256())
}
