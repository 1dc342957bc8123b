//! Math domain errors, one per failure mode of the pool contracts' checked
//! arithmetic. Surfacing these explicitly (instead of a NaN-like sentinel)
//! lets the aggregator abort a preview with a meaningful message.

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("addition overflow")]
    AddOverflow,
    #[error("subtraction overflow")]
    SubOverflow,
    #[error("multiplication overflow")]
    MulOverflow,
    #[error("internal overflow while dividing")]
    DivInternal,
    #[error("division by zero")]
    ZeroDivision,
    #[error("power base below the series convergence domain")]
    PowBaseTooLow,
    #[error("power base above the series convergence domain")]
    PowBaseTooHigh,
    #[error("amount out exceeds pool liquidity")]
    InsufficientLiquidity,
}
