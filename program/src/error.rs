//! Error types

use {
    num_derive::FromPrimitive,
    num_traits::FromPrimitive as _,
    solana_decode_error::DecodeError,
    solana_msg::msg,
    solana_program_error::ProgramError,
    thiserror::Error,
};

/// Errors that may be returned by the Canonical Swap program.
#[derive(Clone, Debug, Eq, Error, PartialEq, FromPrimitive)]
pub enum CanonicalSwapError {
    // 0
    /// Signer does not match the authority stored on the canonical record
    #[error("Signer does not match the authority stored on the canonical record")]
    NotAuthorized,
    /// Supplied account does not match the expected derived address
    #[error("Supplied account does not match the expected derived address")]
    AddressMismatch,
    /// This swap direction is disabled for the wrapped token
    #[error("This swap direction is disabled for the wrapped token")]
    DirectionDisabled,
    /// Canonical or wrapped token is already registered
    #[error("Canonical or wrapped token is already registered")]
    AlreadyRegistered,
    /// Initializer is not the current mint authority of the canonical mint
    #[error("Initializer is not the current mint authority of the canonical mint")]
    NotMintAuthority,

    // 5
    /// Amount rescaling overflowed
    #[error("Amount rescaling overflowed")]
    ArithmeticOverflow,
    /// Wrapped record does not reference the supplied canonical record
    #[error("Wrapped record does not reference the supplied canonical record")]
    CanonicalRecordMismatch,
    /// Provided decimals do not match the mint configuration
    #[error("Provided decimals do not match the mint configuration")]
    DecimalsMismatch,
}

impl From<CanonicalSwapError> for ProgramError {
    fn from(e: CanonicalSwapError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl<T> DecodeError<T> for CanonicalSwapError {
    fn type_of() -> &'static str {
        "CanonicalSwapError"
    }
}

/// Logs a program error, decoding custom codes into their message
pub fn log_error(error: &ProgramError) {
    if let ProgramError::Custom(code) = error {
        if let Some(e) = CanonicalSwapError::from_u32(*code) {
            msg!("Error: {}", e);
            return;
        }
    }
    msg!("Error: {}", error);
}
