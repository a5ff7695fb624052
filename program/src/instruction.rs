//! Program instructions

use {
    crate::{
        get_canonical_mint_authority_for_program, get_wrapped_vault_address_for_program,
        get_wrapped_vault_authority_for_program,
    },
    solana_instruction::{AccountMeta, Instruction},
    solana_program_error::ProgramError,
    solana_pubkey::Pubkey,
    solana_system_interface::program as system_program,
};

/// One of the two swap directions a wrapped record gates independently.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(u8)]
pub enum SwapDirection {
    /// Deposit wrapped tokens, receive freshly minted canonical tokens
    WrappedForCanonical = 0,
    /// Burn canonical tokens, receive custodied wrapped tokens
    CanonicalForWrapped = 1,
}

impl SwapDirection {
    fn unpack(value: u8) -> Result<Self, ProgramError> {
        match value {
            0 => Ok(SwapDirection::WrappedForCanonical),
            1 => Ok(SwapDirection::CanonicalForWrapped),
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Instructions supported by the Canonical Swap program
#[derive(Clone, Debug, PartialEq)]
#[repr(u8)]
pub enum CanonicalSwapInstruction {
    /// Register a canonical token, transferring mint authority over to a
    /// program-derived address. The initializer must be the mint's current
    /// mint authority.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Initializer, current mint authority of the canonical mint
    /// 1. `[w]` Canonical mint
    /// 2. `[w]` Canonical record account, owned by this program, zeroed,
    ///    exactly `CanonicalRecord::LEN` bytes
    /// 3. `[]` Canonical mint authority, address must be:
    ///    `get_canonical_mint_authority(canonical_mint)`
    /// 4. `[]` SPL Token program for the canonical mint
    RegisterCanonical {
        /// Expected decimals of the canonical mint, checked against the mint
        decimals: u8,
    },

    /// Register a wrapped token under a canonical record and create its
    /// custody vault. The vault account must be pre-funded with rent.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Current authority of the canonical record
    /// 1. `[]` Wrapped mint
    /// 2. `[]` Canonical record
    /// 3. `[w]` Wrapped record account, owned by this program, zeroed,
    ///    exactly `WrappedRecord::LEN` bytes
    /// 4. `[w]` Custody vault, address must be:
    ///    `get_wrapped_vault_address(canonical_mint, wrapped_mint)`
    /// 5. `[]` Custody vault authority, address must be:
    ///    `get_wrapped_vault_authority(canonical_mint, wrapped_mint)`
    /// 6. `[]` SPL Token program for the wrapped mint
    /// 7. `[]` System program
    RegisterWrapped {
        /// Expected decimals of the wrapped mint, checked against the mint
        decimals: u8,
    },

    /// Deposit wrapped tokens into custody and mint canonical tokens to the
    /// user, signed by the program as the canonical mint authority.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` User performing the swap
    /// 1. `[w]` User's wrapped token account to debit
    /// 2. `[]` Wrapped mint
    /// 3. `[w]` Custody vault (PDA, re-derived and checked)
    /// 4. `[w]` Canonical mint
    /// 5. `[w]` User's canonical token account to credit
    /// 6. `[]` Canonical mint authority (PDA, re-derived and checked)
    /// 7. `[]` Canonical record
    /// 8. `[]` Wrapped record
    /// 9. `[]` SPL Token program for the wrapped mint
    /// 10. `[]` SPL Token program for the canonical mint
    SwapWrappedForCanonical {
        /// Requested canonical amount, in the canonical mint's smallest unit.
        /// The wrapped amount debited is the floor of this amount rescaled
        /// into wrapped units; the credited amount is recomputed from that
        /// floor and may be smaller than requested.
        amount: u64,
    },

    /// Burn canonical tokens from the user and release custodied wrapped
    /// tokens, signed by the program as the custody vault authority.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` User performing the swap
    /// 1. `[w]` User's canonical token account to burn from
    /// 2. `[w]` Canonical mint
    /// 3. `[w]` Custody vault (PDA, re-derived and checked)
    /// 4. `[w]` User's wrapped token account to credit
    /// 5. `[]` Wrapped mint
    /// 6. `[]` Custody vault authority (PDA, re-derived and checked)
    /// 7. `[]` Canonical record
    /// 8. `[]` Wrapped record
    /// 9. `[]` SPL Token program for the canonical mint
    /// 10. `[]` SPL Token program for the wrapped mint
    SwapCanonicalForWrapped {
        /// Requested wrapped amount, in the wrapped mint's smallest unit,
        /// settled with the same floor-first policy
        amount: u64,
    },

    /// Enable or disable one swap direction on a wrapped record.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Current authority of the canonical record
    /// 1. `[]` Canonical record
    /// 2. `[w]` Wrapped record
    SetEnabled {
        /// The direction to gate
        direction: SwapDirection,
        /// New flag value
        enabled: bool,
    },

    /// Replace the authority on a canonical record. Takes effect immediately
    /// for every wrapped record referencing it.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Current authority of the canonical record
    /// 1. `[]` New authority
    /// 2. `[w]` Canonical record
    SetAuthority,

    /// Return mint authority over the canonical mint from the program-derived
    /// address to a recipient, signed by the program as that address.
    ///
    /// Accounts expected by this instruction:
    ///
    /// 0. `[s]` Current authority of the canonical record
    /// 1. `[]` Recipient of mint authority
    /// 2. `[]` Canonical record
    /// 3. `[w]` Canonical mint
    /// 4. `[]` Canonical mint authority (PDA, re-derived and checked)
    /// 5. `[]` SPL Token program for the canonical mint
    ReleaseMintAuthority,
}

impl CanonicalSwapInstruction {
    /// Packs a [`CanonicalSwapInstruction`] into a byte array.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        match self {
            CanonicalSwapInstruction::RegisterCanonical { decimals } => {
                buf.push(0);
                buf.push(*decimals);
            }
            CanonicalSwapInstruction::RegisterWrapped { decimals } => {
                buf.push(1);
                buf.push(*decimals);
            }
            CanonicalSwapInstruction::SwapWrappedForCanonical { amount } => {
                buf.push(2);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            CanonicalSwapInstruction::SwapCanonicalForWrapped { amount } => {
                buf.push(3);
                buf.extend_from_slice(&amount.to_le_bytes());
            }
            CanonicalSwapInstruction::SetEnabled { direction, enabled } => {
                buf.push(4);
                buf.push(*direction as u8);
                buf.push(u8::from(*enabled));
            }
            CanonicalSwapInstruction::SetAuthority => buf.push(5),
            CanonicalSwapInstruction::ReleaseMintAuthority => buf.push(6),
        }
        buf
    }

    /// Unpacks a byte array into a [`CanonicalSwapInstruction`].
    pub fn unpack(input: &[u8]) -> Result<Self, ProgramError> {
        match input.split_first() {
            Some((&0, rest)) if rest.len() == 1 => {
                Ok(CanonicalSwapInstruction::RegisterCanonical { decimals: rest[0] })
            }
            Some((&1, rest)) if rest.len() == 1 => {
                Ok(CanonicalSwapInstruction::RegisterWrapped { decimals: rest[0] })
            }
            Some((&2, rest)) if rest.len() == 8 => {
                let amount = u64::from_le_bytes(rest.try_into().unwrap());
                Ok(CanonicalSwapInstruction::SwapWrappedForCanonical { amount })
            }
            Some((&3, rest)) if rest.len() == 8 => {
                let amount = u64::from_le_bytes(rest.try_into().unwrap());
                Ok(CanonicalSwapInstruction::SwapCanonicalForWrapped { amount })
            }
            Some((&4, rest)) if rest.len() == 2 => {
                let direction = SwapDirection::unpack(rest[0])?;
                let enabled = match rest[1] {
                    0 => false,
                    1 => true,
                    _ => return Err(ProgramError::InvalidInstructionData),
                };
                Ok(CanonicalSwapInstruction::SetEnabled { direction, enabled })
            }
            Some((&5, rest)) if rest.is_empty() => Ok(CanonicalSwapInstruction::SetAuthority),
            Some((&6, rest)) if rest.is_empty() => {
                Ok(CanonicalSwapInstruction::ReleaseMintAuthority)
            }
            _ => Err(ProgramError::InvalidInstructionData),
        }
    }
}

/// Creates a `RegisterCanonical` instruction.
pub fn register_canonical(
    program_id: &Pubkey,
    initializer: &Pubkey,
    canonical_mint: &Pubkey,
    canonical_record: &Pubkey,
    token_program_id: &Pubkey,
    decimals: u8,
) -> Instruction {
    let mint_authority = get_canonical_mint_authority_for_program(canonical_mint, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*initializer, true),
            AccountMeta::new(*canonical_mint, false),
            AccountMeta::new(*canonical_record, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data: CanonicalSwapInstruction::RegisterCanonical { decimals }.pack(),
    }
}

/// Creates a `RegisterWrapped` instruction.
#[allow(clippy::too_many_arguments)]
pub fn register_wrapped(
    program_id: &Pubkey,
    current_authority: &Pubkey,
    wrapped_mint: &Pubkey,
    canonical_mint: &Pubkey,
    canonical_record: &Pubkey,
    wrapped_record: &Pubkey,
    token_program_id: &Pubkey,
    decimals: u8,
) -> Instruction {
    let vault = get_wrapped_vault_address_for_program(canonical_mint, wrapped_mint, program_id);
    let vault_authority =
        get_wrapped_vault_authority_for_program(canonical_mint, wrapped_mint, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*current_authority, true),
            AccountMeta::new_readonly(*wrapped_mint, false),
            AccountMeta::new_readonly(*canonical_record, false),
            AccountMeta::new(*wrapped_record, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new_readonly(*token_program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: CanonicalSwapInstruction::RegisterWrapped { decimals }.pack(),
    }
}

/// Creates a `SwapWrappedForCanonical` instruction.
#[allow(clippy::too_many_arguments)]
pub fn swap_wrapped_for_canonical(
    program_id: &Pubkey,
    user: &Pubkey,
    source_wrapped_account: &Pubkey,
    wrapped_mint: &Pubkey,
    canonical_mint: &Pubkey,
    destination_canonical_account: &Pubkey,
    canonical_record: &Pubkey,
    wrapped_record: &Pubkey,
    wrapped_token_program_id: &Pubkey,
    canonical_token_program_id: &Pubkey,
    amount: u64,
) -> Instruction {
    let vault = get_wrapped_vault_address_for_program(canonical_mint, wrapped_mint, program_id);
    let mint_authority = get_canonical_mint_authority_for_program(canonical_mint, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*user, true),
            AccountMeta::new(*source_wrapped_account, false),
            AccountMeta::new_readonly(*wrapped_mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*canonical_mint, false),
            AccountMeta::new(*destination_canonical_account, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(*canonical_record, false),
            AccountMeta::new_readonly(*wrapped_record, false),
            AccountMeta::new_readonly(*wrapped_token_program_id, false),
            AccountMeta::new_readonly(*canonical_token_program_id, false),
        ],
        data: CanonicalSwapInstruction::SwapWrappedForCanonical { amount }.pack(),
    }
}

/// Creates a `SwapCanonicalForWrapped` instruction.
#[allow(clippy::too_many_arguments)]
pub fn swap_canonical_for_wrapped(
    program_id: &Pubkey,
    user: &Pubkey,
    source_canonical_account: &Pubkey,
    canonical_mint: &Pubkey,
    wrapped_mint: &Pubkey,
    destination_wrapped_account: &Pubkey,
    canonical_record: &Pubkey,
    wrapped_record: &Pubkey,
    canonical_token_program_id: &Pubkey,
    wrapped_token_program_id: &Pubkey,
    amount: u64,
) -> Instruction {
    let vault = get_wrapped_vault_address_for_program(canonical_mint, wrapped_mint, program_id);
    let vault_authority =
        get_wrapped_vault_authority_for_program(canonical_mint, wrapped_mint, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*user, true),
            AccountMeta::new(*source_canonical_account, false),
            AccountMeta::new(*canonical_mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*destination_wrapped_account, false),
            AccountMeta::new_readonly(*wrapped_mint, false),
            AccountMeta::new_readonly(vault_authority, false),
            AccountMeta::new_readonly(*canonical_record, false),
            AccountMeta::new_readonly(*wrapped_record, false),
            AccountMeta::new_readonly(*canonical_token_program_id, false),
            AccountMeta::new_readonly(*wrapped_token_program_id, false),
        ],
        data: CanonicalSwapInstruction::SwapCanonicalForWrapped { amount }.pack(),
    }
}

/// Creates a `SetEnabled` instruction.
pub fn set_enabled(
    program_id: &Pubkey,
    current_authority: &Pubkey,
    canonical_record: &Pubkey,
    wrapped_record: &Pubkey,
    direction: SwapDirection,
    enabled: bool,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*current_authority, true),
            AccountMeta::new_readonly(*canonical_record, false),
            AccountMeta::new(*wrapped_record, false),
        ],
        data: CanonicalSwapInstruction::SetEnabled { direction, enabled }.pack(),
    }
}

/// Creates a `SetAuthority` instruction.
pub fn set_authority(
    program_id: &Pubkey,
    current_authority: &Pubkey,
    new_authority: &Pubkey,
    canonical_record: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*current_authority, true),
            AccountMeta::new_readonly(*new_authority, false),
            AccountMeta::new(*canonical_record, false),
        ],
        data: CanonicalSwapInstruction::SetAuthority.pack(),
    }
}

/// Creates a `ReleaseMintAuthority` instruction.
pub fn release_mint_authority(
    program_id: &Pubkey,
    current_authority: &Pubkey,
    recipient: &Pubkey,
    canonical_record: &Pubkey,
    canonical_mint: &Pubkey,
    token_program_id: &Pubkey,
) -> Instruction {
    let mint_authority = get_canonical_mint_authority_for_program(canonical_mint, program_id);
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new_readonly(*current_authority, true),
            AccountMeta::new_readonly(*recipient, false),
            AccountMeta::new_readonly(*canonical_record, false),
            AccountMeta::new(*canonical_mint, false),
            AccountMeta::new_readonly(mint_authority, false),
            AccountMeta::new_readonly(*token_program_id, false),
        ],
        data: CanonicalSwapInstruction::ReleaseMintAuthority.pack(),
    }
}
