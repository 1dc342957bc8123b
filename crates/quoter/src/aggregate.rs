//! Aggregation of pre-selected swap sequences into verifiable totals.
//!
//! The sequences and the pool snapshot both come from the same external
//! fetch; this module only replays the pools' math over them. Internal hop
//! amounts are always recomputed leg by leg rather than trusted from the
//! allocator, so the totals are exactly what execution would produce against
//! the snapshot state.

use {
    crate::swap::{self, error, fixed_point::Bfp},
    model::{Pool, PoolId, SwapKind, SwapSequence},
    primitive_types::U256,
    std::collections::HashMap,
};

/// Pool snapshot keyed by pool id.
pub type PoolMap = HashMap<PoolId, Pool>;

/// Errors aborting an entire quote computation.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum QuoteError {
    /// A sequence references a pool the snapshot does not contain. The
    /// sequences and the snapshot are required to come from the same fetch,
    /// so this is a caller consistency bug, not a market condition.
    #[error("swap references pool {0} missing from the snapshot")]
    UnknownPool(PoolId),
    #[error(transparent)]
    Math(#[from] error::Error),
}

pub fn pools_by_id(pools: impl IntoIterator<Item = Pool>) -> PoolMap {
    pools.into_iter().map(|pool| (pool.id, pool)).collect()
}

fn lookup(pools: &PoolMap, id: PoolId) -> Result<&Pool, QuoteError> {
    pools.get(&id).ok_or(QuoteError::UnknownPool(id))
}

/// Total realized output over all sequences for an exact-in trade.
///
/// Within a sequence the computed output of hop `i` becomes the input of hop
/// `i + 1`. An empty sequence list is a valid "no route found" state and
/// yields zero.
pub fn total_output_for_exact_in(
    sequences: &[SwapSequence],
    pools: &PoolMap,
) -> Result<U256, QuoteError> {
    let mut total = U256::zero();
    for sequence in sequences {
        let mut amount = sequence.first().token_in_amount;
        for hop in sequence.hops() {
            let pool = lookup(pools, hop.pool)?;
            amount = swap::amount_out_given_in(pool, amount)?;
        }
        total = total
            .checked_add(amount)
            .ok_or(error::Error::AddOverflow)?;
    }
    Ok(total)
}

/// Total required input over all sequences for an exact-out trade.
///
/// Hops are walked in reverse: the final hop's output is known, and each
/// earlier hop must produce the input the next hop requires.
pub fn total_input_for_exact_out(
    sequences: &[SwapSequence],
    pools: &PoolMap,
) -> Result<U256, QuoteError> {
    let mut total = U256::zero();
    for sequence in sequences {
        let mut amount = sequence.last().token_out_amount;
        for hop in sequence.hops().iter().rev() {
            let pool = lookup(pools, hop.pool)?;
            amount = swap::amount_in_given_out(pool, amount)?;
        }
        total = total
            .checked_add(amount)
            .ok_or(error::Error::AddOverflow)?;
    }
    Ok(total)
}

fn sequence_spot_price(sequence: &SwapSequence, pools: &PoolMap) -> Result<Bfp, QuoteError> {
    // spot price composes multiplicatively along a path
    let mut price = Bfp::one();
    for hop in sequence.hops() {
        let pool = lookup(pools, hop.pool)?;
        price = price
            .mul(Bfp::from_wei(swap::spot_price(pool)?))
            .map_err(error::Error::from)?;
    }
    Ok(price)
}

/// Spot price of every sequence, in input order.
pub fn sequence_spot_prices(
    sequences: &[SwapSequence],
    pools: &PoolMap,
) -> Result<Vec<U256>, QuoteError> {
    sequences
        .iter()
        .map(|sequence| Ok(sequence_spot_price(sequence, pools)?.as_uint256()))
        .collect()
}

/// The zero-slippage counterpart of the realized total: what the chosen
/// amounts would convert to at each sequence's spot price.
///
/// For exact-in each sequence contributes `input / spot_price` (its
/// zero-impact output); for exact-out it contributes `output * spot_price`
/// (its zero-impact input). The direction asymmetry mirrors the two price
/// conventions of the trade directions.
pub fn total_spot_value(
    kind: SwapKind,
    sequences: &[SwapSequence],
    pools: &PoolMap,
) -> Result<U256, QuoteError> {
    let mut total = Bfp::zero();
    for sequence in sequences {
        let price = sequence_spot_price(sequence, pools)?;
        let contribution = match kind {
            SwapKind::ExactIn => Bfp::from_wei(sequence.first().token_in_amount)
                .div(price)
                .map_err(error::Error::from)?,
            SwapKind::ExactOut => Bfp::from_wei(sequence.last().token_out_amount)
                .mul(price)
                .map_err(error::Error::from)?,
        };
        total = total.add(contribution).map_err(error::Error::from)?;
    }
    Ok(total.as_uint256())
}
