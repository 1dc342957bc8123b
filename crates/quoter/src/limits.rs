//! Slippage-guarded execution bounds derived from a spot-value estimate.
//!
//! The bounds are what the execution submitter forwards on-chain: the worst
//! outcome the caller is willing to accept, computed from the zero-slippage
//! value of the trade plus the caller's explicit tolerance.

use {
    crate::swap::{error::Error, fixed_point::Bfp},
    primitive_types::U256,
};

/// Minimum output an exact-in execution may settle at:
/// `spot_value * (1 - tolerance)`, floored at zero for tolerances of 100%
/// or more (a negative acceptable minimum has no meaning).
pub fn minimum_acceptable_output(spot_value: U256, tolerance: U256) -> Result<U256, Error> {
    let factor = Bfp::from_wei(tolerance).complement();
    Ok(Bfp::from_wei(spot_value).mul(factor)?.as_uint256())
}

/// Maximum input an exact-out execution may settle at:
/// `spot_value * (1 + tolerance)`. Always at least `spot_value`, so no
/// floor is needed.
pub fn maximum_acceptable_input(spot_value: U256, tolerance: U256) -> Result<U256, Error> {
    let factor = Bfp::one().add(Bfp::from_wei(tolerance))?;
    Ok(Bfp::from_wei(spot_value).mul(factor)?.as_uint256())
}

/// How much worse the realized effective price is than the zero-impact spot
/// price, as a fixed point percentage (`10^18` = 1%):
/// `100 - (spot / effective) * 100`, floored at zero when the route beats
/// its spot price. Callers add their explicit extra tolerance on top before
/// deriving the two bounds above.
pub fn expected_slippage_percent(spot_price: U256, effective_price: U256) -> Result<U256, Error> {
    let hundred = Bfp::exp10(2);
    let ratio = Bfp::from_wei(spot_price).div(Bfp::from_wei(effective_price))?;
    let scaled = ratio.mul(hundred)?;
    Ok(hundred
        .as_uint256()
        .saturating_sub(scaled.as_uint256()))
}
