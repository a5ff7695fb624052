//! Canonical Swap program
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod entrypoint;
pub mod conversion;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod state;

use solana_pubkey::Pubkey;

solana_pubkey::declare_id!("ConPeKgtSQHBBHJQ9swWUftVhTZVz3rTqDLpoYy9VxUo");

const CANONICAL_MINT_AUTHORITY_SEED: &[u8] = br"canonical_mint_authority";

pub(crate) fn get_canonical_mint_authority_seeds(canonical_mint: &Pubkey) -> [&[u8]; 2] {
    [CANONICAL_MINT_AUTHORITY_SEED, canonical_mint.as_ref()]
}

pub(crate) fn get_canonical_mint_authority_signer_seeds<'a>(
    canonical_mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 3] {
    [
        CANONICAL_MINT_AUTHORITY_SEED,
        canonical_mint.as_ref(),
        bump_seed,
    ]
}

pub(crate) fn get_canonical_mint_authority_with_seed_for_program(
    canonical_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &get_canonical_mint_authority_seeds(canonical_mint),
        program_id,
    )
}

/// Derive the address holding mint authority over a registered canonical mint
pub fn get_canonical_mint_authority(canonical_mint: &Pubkey) -> Pubkey {
    get_canonical_mint_authority_for_program(canonical_mint, &id())
}

/// Derive the canonical mint authority address for a specific Canonical Swap
/// program deployment
pub fn get_canonical_mint_authority_for_program(
    canonical_mint: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    get_canonical_mint_authority_with_seed_for_program(canonical_mint, program_id).0
}

const WRAPPED_VAULT_SEED: &[u8] = br"wrapped_vault";

pub(crate) fn get_wrapped_vault_seeds<'a>(
    canonical_mint: &'a Pubkey,
    wrapped_mint: &'a Pubkey,
) -> [&'a [u8]; 3] {
    [
        WRAPPED_VAULT_SEED,
        canonical_mint.as_ref(),
        wrapped_mint.as_ref(),
    ]
}

pub(crate) fn get_wrapped_vault_signer_seeds<'a>(
    canonical_mint: &'a Pubkey,
    wrapped_mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 4] {
    [
        WRAPPED_VAULT_SEED,
        canonical_mint.as_ref(),
        wrapped_mint.as_ref(),
        bump_seed,
    ]
}

pub(crate) fn get_wrapped_vault_address_with_seed_for_program(
    canonical_mint: &Pubkey,
    wrapped_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &get_wrapped_vault_seeds(canonical_mint, wrapped_mint),
        program_id,
    )
}

/// Derive the custody vault address for a (canonical mint, wrapped mint) pair
pub fn get_wrapped_vault_address(canonical_mint: &Pubkey, wrapped_mint: &Pubkey) -> Pubkey {
    get_wrapped_vault_address_for_program(canonical_mint, wrapped_mint, &id())
}

/// Derive the custody vault address for a specific Canonical Swap program
/// deployment
pub fn get_wrapped_vault_address_for_program(
    canonical_mint: &Pubkey,
    wrapped_mint: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    get_wrapped_vault_address_with_seed_for_program(canonical_mint, wrapped_mint, program_id).0
}

const WRAPPED_VAULT_AUTHORITY_SEED: &[u8] = br"wrapped_vault_authority";

pub(crate) fn get_wrapped_vault_authority_seeds<'a>(
    canonical_mint: &'a Pubkey,
    wrapped_mint: &'a Pubkey,
) -> [&'a [u8]; 3] {
    [
        WRAPPED_VAULT_AUTHORITY_SEED,
        canonical_mint.as_ref(),
        wrapped_mint.as_ref(),
    ]
}

pub(crate) fn get_wrapped_vault_authority_signer_seeds<'a>(
    canonical_mint: &'a Pubkey,
    wrapped_mint: &'a Pubkey,
    bump_seed: &'a [u8],
) -> [&'a [u8]; 4] {
    [
        WRAPPED_VAULT_AUTHORITY_SEED,
        canonical_mint.as_ref(),
        wrapped_mint.as_ref(),
        bump_seed,
    ]
}

pub(crate) fn get_wrapped_vault_authority_with_seed_for_program(
    canonical_mint: &Pubkey,
    wrapped_mint: &Pubkey,
    program_id: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &get_wrapped_vault_authority_seeds(canonical_mint, wrapped_mint),
        program_id,
    )
}

/// Derive the address owning the custody vault for a (canonical mint, wrapped
/// mint) pair
pub fn get_wrapped_vault_authority(canonical_mint: &Pubkey, wrapped_mint: &Pubkey) -> Pubkey {
    get_wrapped_vault_authority_for_program(canonical_mint, wrapped_mint, &id())
}

/// Derive the custody vault authority address for a specific Canonical Swap
/// program deployment
pub fn get_wrapped_vault_authority_for_program(
    canonical_mint: &Pubkey,
    wrapped_mint: &Pubkey,
    program_id: &Pubkey,
) -> Pubkey {
    get_wrapped_vault_authority_with_seed_for_program(canonical_mint, wrapped_mint, program_id).0
}
