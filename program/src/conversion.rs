//! Decimal rescaling between token smallest-unit representations
//!
//! All conversion truncates toward zero. For a swap, the source amount is
//! settled first and the credited destination amount is recomputed from it,
//! so rounding can never favor the caller.

use {
    crate::error::CanonicalSwapError, solana_program_error::ProgramError, std::cmp::Ordering,
};

/// Amounts settled for one swap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwapAmounts {
    /// Amount debited from the user's source token account
    pub source: u64,
    /// Amount credited to the user's destination token account
    pub destination: u64,
}

fn conversion_factor(decimal_diff: u8) -> Result<u64, ProgramError> {
    10u64
        .checked_pow(u32::from(decimal_diff))
        .ok_or_else(|| CanonicalSwapError::ArithmeticOverflow.into())
}

/// Rescale `amount` from `from_decimals` into `to_decimals`.
///
/// Scaling up is exact and checked; scaling down floor-divides, truncating
/// toward zero.
pub fn rescale(amount: u64, from_decimals: u8, to_decimals: u8) -> Result<u64, ProgramError> {
    match to_decimals.cmp(&from_decimals) {
        Ordering::Equal => Ok(amount),
        Ordering::Greater => {
            let factor = conversion_factor(to_decimals.abs_diff(from_decimals))?;
            amount
                .checked_mul(factor)
                .ok_or_else(|| CanonicalSwapError::ArithmeticOverflow.into())
        }
        Ordering::Less => {
            let factor = conversion_factor(to_decimals.abs_diff(from_decimals))?;
            amount
                .checked_div(factor)
                .ok_or_else(|| CanonicalSwapError::ArithmeticOverflow.into())
        }
    }
}

/// Settle the amounts for a swap requesting `destination_amount` units of the
/// destination token.
///
/// The source amount is the floor of the requested amount rescaled into
/// source units; the credited destination amount is then recomputed from
/// that floored source. The credited amount never exceeds the request, and a
/// request too small to represent one source unit settles as `(0, 0)`.
pub fn swap_amounts(
    destination_amount: u64,
    destination_decimals: u8,
    source_decimals: u8,
) -> Result<SwapAmounts, ProgramError> {
    let source = rescale(destination_amount, destination_decimals, source_decimals)?;
    let destination = rescale(source, source_decimals, destination_decimals)?;
    Ok(SwapAmounts {
        source,
        destination,
    })
}
