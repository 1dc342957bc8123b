//! One-shot quote preview: one immutable request in, one immutable result
//! out.
//!
//! The caller owns sequencing and staleness (a result superseded by a newer
//! request is simply discarded); the engine is a pure synchronous function
//! with no state between calls.

use {
    crate::{
        aggregate::{self, QuoteError},
        limits,
        swap::fixed_point::Bfp,
    },
    model::{QuoteRequest, QuoteResult, SwapKind},
    primitive_types::U256,
};

/// Replays the requested sequences against the pool snapshot and derives the
/// blended prices and the slippage-guarded execution limit.
///
/// An empty sequence set is a legitimate "no liquidity found" state and
/// produces a result with zero totals, distinct from a failed preview.
pub fn quote(request: &QuoteRequest) -> Result<QuoteResult, QuoteError> {
    if request.sequences.is_empty() {
        return Ok(empty_route(request));
    }

    let pools = aggregate::pools_by_id(request.pools.iter().cloned());
    let total = match request.kind {
        SwapKind::ExactIn => aggregate::total_output_for_exact_in(&request.sequences, &pools)?,
        SwapKind::ExactOut => aggregate::total_input_for_exact_out(&request.sequences, &pools)?,
    };
    let sequence_spot_prices = aggregate::sequence_spot_prices(&request.sequences, &pools)?;
    let spot_value = aggregate::total_spot_value(request.kind, &request.sequences, &pools)?;

    let spot_price = price(request.amount, spot_value)?;
    let effective_price = price(request.amount, total)?;
    // Both prices are quoted as request amount per counterpart amount, which
    // flips which of the two is larger between the directions: exact-in
    // deteriorates toward a higher effective price, exact-out toward a lower
    // one.
    let expected_slippage_percent = match request.kind {
        SwapKind::ExactIn => limits::expected_slippage_percent(spot_price, effective_price)?,
        SwapKind::ExactOut => limits::expected_slippage_percent(effective_price, spot_price)?,
    };
    let limit_amount = match request.kind {
        SwapKind::ExactIn => {
            limits::minimum_acceptable_output(spot_value, request.slippage_tolerance)?
        }
        SwapKind::ExactOut => {
            limits::maximum_acceptable_input(spot_value, request.slippage_tolerance)?
        }
    };

    tracing::debug!(
        kind = ?request.kind,
        amount = %request.amount,
        %total,
        %spot_value,
        %spot_price,
        %effective_price,
        %limit_amount,
        "computed swap preview",
    );

    Ok(QuoteResult {
        kind: request.kind,
        amount: request.amount,
        total,
        spot_value,
        spot_price,
        effective_price,
        sequence_spot_prices,
        expected_slippage_percent,
        limit_amount,
    })
}

/// `amount / counterpart` in the fixed point scale.
fn price(amount: U256, counterpart: U256) -> Result<U256, QuoteError> {
    Ok(Bfp::from_wei(amount)
        .div(Bfp::from_wei(counterpart))?
        .as_uint256())
}

fn empty_route(request: &QuoteRequest) -> QuoteResult {
    QuoteResult {
        kind: request.kind,
        amount: request.amount,
        total: U256::zero(),
        spot_value: U256::zero(),
        spot_price: U256::zero(),
        effective_price: U256::zero(),
        sequence_spot_prices: Vec::new(),
        expected_slippage_percent: U256::zero(),
        limit_amount: U256::zero(),
    }
}
