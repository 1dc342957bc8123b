//! Module emulating the swap formulas of the weighted constant-product pool
//! contract, `balance_in^weight_in * balance_out^weight_out = k`, with a
//! proportional fee taken from the input side.
//!
//! All functions are pure: they never read or write pool state, and every
//! intermediate value goes through the rounding arithmetic in
//! [`super::fixed_point`] so results match the contract exactly.

use super::{error::Error, fixed_point::Bfp};

/// Amount of output token received for a known input amount.
///
/// The fee is deducted from the input before the swap is applied, so the
/// pool balance ratio `y = balance_in / (balance_in + adjusted_in)` is
/// always in `(0, 1)` and the output is strictly below `balance_out`: a
/// single swap can never fully drain one side of the pool.
pub fn calc_out_given_in(
    balance_in: Bfp,
    weight_in: Bfp,
    balance_out: Bfp,
    weight_out: Bfp,
    amount_in: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp, Error> {
    let weight_ratio = weight_in.div(weight_out)?;
    let adjusted_in = amount_in.mul(swap_fee.complement())?;
    let y = balance_in.div(balance_in.add(adjusted_in)?)?;
    let foo = y.pow(weight_ratio)?;
    balance_out.mul(foo.complement())
}

/// Amount of input token required to receive a known output amount.
///
/// Requires `amount_out < balance_out`; the pool cannot pay out more than
/// one side holds.
pub fn calc_in_given_out(
    balance_in: Bfp,
    weight_in: Bfp,
    balance_out: Bfp,
    weight_out: Bfp,
    amount_out: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp, Error> {
    if amount_out >= balance_out {
        return Err(Error::InsufficientLiquidity);
    }
    let weight_ratio = weight_out.div(weight_in)?;
    let diff = balance_out.sub(amount_out)?;
    let y = balance_out.div(diff)?;
    let foo = y.pow(weight_ratio)?.sub(Bfp::one())?;
    balance_in.mul(foo)?.div(swap_fee.complement())
}

/// Marginal exchange rate at zero trade size,
/// `(balance_in / weight_in) / (balance_out / weight_out) / (1 - fee)`.
///
/// Used only for blended price reporting; trade sizing always goes through
/// the two amount formulas above, which account for price impact.
pub fn calc_spot_price(
    balance_in: Bfp,
    weight_in: Bfp,
    balance_out: Bfp,
    weight_out: Bfp,
    swap_fee: Bfp,
) -> Result<Bfp, Error> {
    let numer = balance_in.div(weight_in)?;
    let denom = balance_out.div(weight_out)?;
    let ratio = numer.div(denom)?;
    let scale = Bfp::one().div(swap_fee.complement())?;
    ratio.mul(scale)
}
