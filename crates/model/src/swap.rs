//! Swap legs and multi-hop sequences as chosen by the external allocation
//! selector.

use {
    crate::pool::PoolId,
    anyhow::{Result, ensure},
    primitive_types::U256,
    serde::{Deserialize, Serialize},
};

/// Which side of a trade is fixed by the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SwapKind {
    /// The input amount is known; the engine solves for output.
    ExactIn,
    /// The output amount is known; the engine solves for required input.
    ExactOut,
}

/// One hop through one pool.
///
/// Exactly one of `token_in_amount`/`token_out_amount` carries the
/// allocator-chosen swap amount; the other carries the guarded execution
/// limit that is forwarded verbatim to the on-chain call (zero minimum out
/// for exact-in legs, maximum in for exact-out legs). `max_price` bounds the
/// pool's post-swap marginal price.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Swap {
    pub pool: PoolId,
    #[serde(with = "crate::u256_decimal")]
    pub token_in_amount: U256,
    #[serde(with = "crate::u256_decimal")]
    pub token_out_amount: U256,
    #[serde(with = "crate::u256_decimal")]
    pub max_price: U256,
}

impl Swap {
    /// A leg whose input amount is fixed. `token_out_amount` becomes the
    /// minimum acceptable output limit.
    pub fn exact_in(pool: PoolId, amount_in: U256, min_amount_out: U256, max_price: U256) -> Self {
        Self {
            pool,
            token_in_amount: amount_in,
            token_out_amount: min_amount_out,
            max_price,
        }
    }

    /// A leg whose output amount is fixed. `token_in_amount` becomes the
    /// maximum acceptable input limit.
    pub fn exact_out(pool: PoolId, amount_out: U256, max_amount_in: U256, max_price: U256) -> Self {
        Self {
            pool,
            token_in_amount: max_amount_in,
            token_out_amount: amount_out,
            max_price,
        }
    }
}

/// An ordered, non-empty chain of hops from the trade's source token to its
/// destination token. Consecutive hops chain token-out(i) = token-in(i+1);
/// the token identities themselves are resolved by the allocation selector
/// and do not appear here.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SwapSequence(Vec<Swap>);

impl<'de> Deserialize<'de> for SwapSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hops = Vec::<Swap>::deserialize(deserializer)?;
        Self::new(hops).map_err(serde::de::Error::custom)
    }
}

impl SwapSequence {
    pub fn new(hops: Vec<Swap>) -> Result<Self> {
        ensure!(!hops.is_empty(), "swap sequence must contain at least one hop");
        Ok(Self(hops))
    }

    pub fn single(hop: Swap) -> Self {
        Self(vec![hop])
    }

    pub fn hops(&self) -> &[Swap] {
        &self.0
    }

    pub fn first(&self) -> &Swap {
        self.0.first().expect("sequence is non-empty")
    }

    pub fn last(&self) -> &Swap {
        self.0.last().expect("sequence is non-empty")
    }
}
