//! Data model shared between the quoting engine and its callers.
//!
//! Everything in this crate is a plain value type: pool snapshots as supplied
//! by an external pool-data provider, swap sequences as chosen by an external
//! allocation selector, and the quote request/result pair exchanged with the
//! engine. Amounts are `U256` wei quantities already normalized to the
//! pools' 18-decimal fixed-point scale; the engine converts them to its
//! internal fixed-point representation at the boundary.

pub mod pool;
pub mod quote;
pub mod swap;
pub mod u256_decimal;

pub use {
    pool::{Pool, PoolId},
    quote::{QuoteRequest, QuoteResult},
    swap::{Swap, SwapKind, SwapSequence},
};
