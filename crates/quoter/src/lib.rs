//! Off-chain quoting engine for weighted constant-product liquidity pools.
//!
//! Given a pool snapshot and a set of pre-selected swap sequences, the engine
//! replays the pools' own fixed-point math to compute the total realized
//! output (or required input) of a trade, the blended spot price across the
//! chosen routes, and the slippage-guarded execution limit. The arithmetic
//! reproduces the on-chain contract bit-for-bit so that previewed amounts
//! match executed outcomes exactly, not approximately.
//!
//! The engine is purely computational: it performs no I/O, holds no state
//! between calls, and operates on borrowed immutable data. Route discovery,
//! pool retrieval and transaction submission belong to the surrounding
//! application.

pub mod aggregate;
pub mod limits;
pub mod quote;
pub mod swap;

pub use quote::quote;
