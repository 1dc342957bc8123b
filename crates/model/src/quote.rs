//! The request/response pair exchanged with the quoting engine.
//!
//! A request captures everything one preview needs: the trade direction and
//! size, the candidate swap sequences, the pool snapshot they refer to, and
//! the caller's slippage tolerance. The engine is a pure function of this
//! value; sequencing and staleness (discarding a result superseded by a newer
//! request) are the caller's concern.

use {
    crate::{
        pool::Pool,
        swap::{SwapKind, SwapSequence},
    },
    primitive_types::U256,
    serde::{Deserialize, Serialize},
};

#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub kind: SwapKind,
    /// Total trade size in the fixed direction: input amount for exact-in,
    /// output amount for exact-out.
    #[serde(with = "crate::u256_decimal")]
    pub amount: U256,
    pub sequences: Vec<SwapSequence>,
    /// Pool snapshot from the same fetch that produced `sequences`.
    pub pools: Vec<Pool>,
    /// Fractional slippage tolerance in the 18-decimal scale (`10^16` = 1%).
    #[serde(with = "crate::u256_decimal")]
    pub slippage_tolerance: U256,
}

/// Economic outcome of replaying the requested sequences, plus the guarded
/// limit to pass to the execution submitter. Zero totals with empty
/// `sequence_spot_prices` represent a valid "no route found" result.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub kind: SwapKind,
    /// The requested trade size, echoed back.
    #[serde(with = "crate::u256_decimal")]
    pub amount: U256,
    /// Realized counterpart of `amount`: total output for exact-in, total
    /// required input for exact-out.
    #[serde(with = "crate::u256_decimal")]
    pub total: U256,
    /// Zero-slippage counterpart of `total`, from blending per-sequence spot
    /// prices.
    #[serde(with = "crate::u256_decimal")]
    pub spot_value: U256,
    /// Blended marginal price at zero trade size, `amount / spot_value`.
    #[serde(with = "crate::u256_decimal")]
    pub spot_price: U256,
    /// Realized average price, `amount / total`.
    #[serde(with = "crate::u256_decimal")]
    pub effective_price: U256,
    /// Spot price of each sequence (product over its hops), in request order.
    #[serde(with = "crate::u256_decimal::vec")]
    pub sequence_spot_prices: Vec<U256>,
    /// How much worse the effective price is than spot, as a fixed-point
    /// percentage (`10^18` = 1%). Zero when the route beats its spot price.
    #[serde(with = "crate::u256_decimal")]
    pub expected_slippage_percent: U256,
    /// Slippage-guarded execution bound: minimum acceptable output for
    /// exact-in, maximum acceptable input for exact-out.
    #[serde(with = "crate::u256_decimal")]
    pub limit_amount: U256,
}
