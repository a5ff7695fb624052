//! Program state processor

use {
    crate::{
        conversion::swap_amounts,
        error::CanonicalSwapError,
        get_canonical_mint_authority_signer_seeds,
        get_canonical_mint_authority_with_seed_for_program,
        get_wrapped_vault_address_with_seed_for_program,
        get_wrapped_vault_authority_signer_seeds,
        get_wrapped_vault_authority_with_seed_for_program, get_wrapped_vault_signer_seeds,
        instruction::{CanonicalSwapInstruction, SwapDirection},
        state::{CanonicalRecord, WrappedRecord},
    },
    solana_account_info::{next_account_info, AccountInfo},
    solana_cpi::{invoke, invoke_signed},
    solana_msg::msg,
    solana_program_error::{ProgramError, ProgramResult},
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_rent::Rent,
    solana_system_interface::instruction::{allocate, assign},
    solana_sysvar::Sysvar,
    spl_pod::{
        bytemuck::{pod_from_bytes, pod_from_bytes_mut},
        primitives::PodBool,
    },
    spl_token_2022::{
        extension::PodStateWithExtensions,
        instruction::{
            burn, initialize_account3, mint_to, set_authority, transfer_checked, AuthorityType,
        },
        pod::{PodCOption, PodMint},
    },
};

fn check_signer(account: &AccountInfo) -> ProgramResult {
    if !account.is_signer {
        msg!("Error: account {} must be a signer", account.key);
        return Err(ProgramError::MissingRequiredSignature);
    }
    Ok(())
}

fn check_token_program(account: &AccountInfo) -> ProgramResult {
    if *account.key != spl_token::id() && *account.key != spl_token_2022::id() {
        msg!("Error: {} is not a supported token program", account.key);
        return Err(ProgramError::IncorrectProgramId);
    }
    Ok(())
}

fn check_record_account(
    account: &AccountInfo,
    program_id: &Pubkey,
    expected_len: usize,
) -> ProgramResult {
    if account.owner != program_id {
        msg!("Error: record account {} is not owned by this program", account.key);
        return Err(ProgramError::InvalidAccountOwner);
    }
    if account.data_len() != expected_len {
        msg!("Error: record account {} has an unexpected size", account.key);
        return Err(ProgramError::InvalidAccountData);
    }
    Ok(())
}

fn load_canonical_record(
    account: &AccountInfo,
    program_id: &Pubkey,
) -> Result<CanonicalRecord, ProgramError> {
    check_record_account(account, program_id, CanonicalRecord::LEN)?;
    let data = account.try_borrow_data()?;
    let record = *pod_from_bytes::<CanonicalRecord>(&data)?;
    if !record.is_initialized() {
        msg!("Error: canonical record {} is not initialized", account.key);
        return Err(ProgramError::UninitializedAccount);
    }
    Ok(record)
}

fn load_wrapped_record(
    account: &AccountInfo,
    program_id: &Pubkey,
    canonical_record_account: &AccountInfo,
) -> Result<WrappedRecord, ProgramError> {
    check_record_account(account, program_id, WrappedRecord::LEN)?;
    let data = account.try_borrow_data()?;
    let record = *pod_from_bytes::<WrappedRecord>(&data)?;
    if !record.is_initialized() {
        msg!("Error: wrapped record {} is not initialized", account.key);
        return Err(ProgramError::UninitializedAccount);
    }
    if record.canonical_record != *canonical_record_account.key {
        msg!("Error: wrapped record does not reference the supplied canonical record");
        return Err(CanonicalSwapError::CanonicalRecordMismatch.into());
    }
    Ok(record)
}

// The authority is read through the canonical record at call time, never
// from a cached copy on a wrapped record.
fn check_authority(authority: &AccountInfo, record: &CanonicalRecord) -> ProgramResult {
    check_signer(authority)?;
    if record.authority != *authority.key {
        msg!("Error: signer does not match the canonical record authority");
        return Err(CanonicalSwapError::NotAuthorized.into());
    }
    Ok(())
}

fn mint_decimals(mint_account: &AccountInfo) -> Result<u8, ProgramError> {
    let data = mint_account.try_borrow_data()?;
    let mint = PodStateWithExtensions::<PodMint>::unpack(&data)?.base;
    Ok(mint.decimals)
}

/// Processes [`RegisterCanonical`](enum.CanonicalSwapInstruction.html)
/// instruction.
pub fn process_register_canonical(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    decimals: u8,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let initializer = next_account_info(account_info_iter)?;
    let canonical_mint = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let mint_authority_account = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    check_signer(initializer)?;
    check_token_program(token_program)?;
    check_record_account(canonical_record_account, program_id, CanonicalRecord::LEN)?;

    let (mint_authority_address, _) =
        get_canonical_mint_authority_with_seed_for_program(canonical_mint.key, program_id);
    if *mint_authority_account.key != mint_authority_address {
        msg!("Error: canonical mint authority account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }

    let mint_decimals = {
        let data = canonical_mint.try_borrow_data()?;
        let mint = PodStateWithExtensions::<PodMint>::unpack(&data)?.base;
        if mint.mint_authority != PodCOption::some(*initializer.key) {
            msg!("Error: initializer is not the current mint authority");
            return Err(CanonicalSwapError::NotMintAuthority.into());
        }
        mint.decimals
    };
    if decimals != mint_decimals {
        msg!("Error: provided decimals do not match the canonical mint");
        return Err(CanonicalSwapError::DecimalsMismatch.into());
    }

    {
        let mut data = canonical_record_account.try_borrow_mut_data()?;
        let record = pod_from_bytes_mut::<CanonicalRecord>(&mut data)?;
        if record.is_initialized() {
            msg!("Error: canonical record is already initialized");
            return Err(CanonicalSwapError::AlreadyRegistered.into());
        }
        record.authority = *initializer.key;
        record.mint = *canonical_mint.key;
        record.decimals = mint_decimals;
    }

    // Take over mint authority for the canonical mint
    invoke(
        &set_authority(
            token_program.key,
            canonical_mint.key,
            Some(&mint_authority_address),
            AuthorityType::MintTokens,
            initializer.key,
            &[],
        )?,
        &[canonical_mint.clone(), initializer.clone()],
    )
}

/// Processes [`RegisterWrapped`](enum.CanonicalSwapInstruction.html)
/// instruction.
pub fn process_register_wrapped(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    decimals: u8,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let current_authority = next_account_info(account_info_iter)?;
    let wrapped_mint = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let wrapped_record_account = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let vault_authority_account = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;
    let _system_program = next_account_info(account_info_iter)?;

    check_token_program(token_program)?;
    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    check_authority(current_authority, &canonical_record)?;
    check_record_account(wrapped_record_account, program_id, WrappedRecord::LEN)?;

    let (vault_address, vault_bump) = get_wrapped_vault_address_with_seed_for_program(
        &canonical_record.mint,
        wrapped_mint.key,
        program_id,
    );
    if *vault_account.key != vault_address {
        msg!("Error: custody vault account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    let (vault_authority_address, _) = get_wrapped_vault_authority_with_seed_for_program(
        &canonical_record.mint,
        wrapped_mint.key,
        program_id,
    );
    if *vault_authority_account.key != vault_authority_address {
        msg!("Error: custody vault authority account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }

    if vault_account.data_len() > 0 {
        msg!("Error: custody vault already exists for this pair");
        return Err(CanonicalSwapError::AlreadyRegistered.into());
    }

    let wrapped_decimals = mint_decimals(wrapped_mint)?;
    if decimals != wrapped_decimals {
        msg!("Error: provided decimals do not match the wrapped mint");
        return Err(CanonicalSwapError::DecimalsMismatch.into());
    }

    {
        let mut data = wrapped_record_account.try_borrow_mut_data()?;
        let record = pod_from_bytes_mut::<WrappedRecord>(&mut data)?;
        if record.is_initialized() {
            msg!("Error: wrapped record is already initialized");
            return Err(CanonicalSwapError::AlreadyRegistered.into());
        }
        record.canonical_record = *canonical_record_account.key;
        record.mint = *wrapped_mint.key;
        record.decimals = wrapped_decimals;
        record.swap_wrapped_for_canonical_enabled = PodBool::from_bool(true);
        record.swap_canonical_for_wrapped_enabled = PodBool::from_bool(true);
    }

    // Create the custody vault at its derived address, owned by the derived
    // vault authority
    let space = spl_token_2022::state::Account::get_packed_len();
    let rent = Rent::get()?;
    let vault_rent_required = rent.minimum_balance(space);
    if vault_account.lamports() < vault_rent_required {
        msg!(
            "Error: custody vault requires pre-funding of {} lamports",
            vault_rent_required
        );
        return Err(ProgramError::InsufficientFunds);
    }

    let bump_seed = [vault_bump];
    let canonical_mint_key = canonical_record.mint;
    let signer_seeds =
        get_wrapped_vault_signer_seeds(&canonical_mint_key, wrapped_mint.key, &bump_seed);
    invoke_signed(
        &allocate(&vault_address, space as u64),
        &[vault_account.clone()],
        &[&signer_seeds],
    )?;
    invoke_signed(
        &assign(&vault_address, token_program.key),
        &[vault_account.clone()],
        &[&signer_seeds],
    )?;
    invoke(
        &initialize_account3(
            token_program.key,
            &vault_address,
            wrapped_mint.key,
            &vault_authority_address,
        )?,
        &[vault_account.clone(), wrapped_mint.clone()],
    )
}

/// Processes [`SwapWrappedForCanonical`](enum.CanonicalSwapInstruction.html)
/// instruction.
pub fn process_swap_wrapped_for_canonical(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let user = next_account_info(account_info_iter)?;
    let source_wrapped_account = next_account_info(account_info_iter)?;
    let wrapped_mint = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let canonical_mint = next_account_info(account_info_iter)?;
    let destination_canonical_account = next_account_info(account_info_iter)?;
    let mint_authority_account = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let wrapped_record_account = next_account_info(account_info_iter)?;
    let wrapped_token_program = next_account_info(account_info_iter)?;
    let canonical_token_program = next_account_info(account_info_iter)?;

    check_signer(user)?;
    check_token_program(wrapped_token_program)?;
    check_token_program(canonical_token_program)?;

    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    let wrapped_record =
        load_wrapped_record(wrapped_record_account, program_id, canonical_record_account)?;

    if canonical_record.mint != *canonical_mint.key {
        msg!("Error: canonical mint does not match the canonical record");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    if wrapped_record.mint != *wrapped_mint.key {
        msg!("Error: wrapped mint does not match the wrapped record");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    if !bool::from(wrapped_record.swap_wrapped_for_canonical_enabled) {
        msg!("Error: swapping wrapped for canonical is disabled for this pair");
        return Err(CanonicalSwapError::DirectionDisabled.into());
    }

    let (vault_address, _) = get_wrapped_vault_address_with_seed_for_program(
        &canonical_record.mint,
        &wrapped_record.mint,
        program_id,
    );
    if *vault_account.key != vault_address {
        msg!("Error: custody vault account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    let (mint_authority_address, mint_authority_bump) =
        get_canonical_mint_authority_with_seed_for_program(&canonical_record.mint, program_id);
    if *mint_authority_account.key != mint_authority_address {
        msg!("Error: canonical mint authority account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }

    // Decimals come from the mint accounts, not from the records
    let canonical_decimals = mint_decimals(canonical_mint)?;
    let wrapped_decimals = mint_decimals(wrapped_mint)?;

    let amounts = swap_amounts(amount, canonical_decimals, wrapped_decimals)?;

    // Move wrapped tokens from the user into custody
    invoke(
        &transfer_checked(
            wrapped_token_program.key,
            source_wrapped_account.key,
            wrapped_mint.key,
            vault_account.key,
            user.key,
            &[],
            amounts.source,
            wrapped_decimals,
        )?,
        &[
            source_wrapped_account.clone(),
            wrapped_mint.clone(),
            vault_account.clone(),
            user.clone(),
        ],
    )?;

    // Mint canonical tokens, signed as the derived mint authority
    let bump_seed = [mint_authority_bump];
    let canonical_mint_key = canonical_record.mint;
    let signer_seeds = get_canonical_mint_authority_signer_seeds(&canonical_mint_key, &bump_seed);
    invoke_signed(
        &mint_to(
            canonical_token_program.key,
            canonical_mint.key,
            destination_canonical_account.key,
            &mint_authority_address,
            &[],
            amounts.destination,
        )?,
        &[
            canonical_mint.clone(),
            destination_canonical_account.clone(),
            mint_authority_account.clone(),
        ],
        &[&signer_seeds],
    )
}

/// Processes [`SwapCanonicalForWrapped`](enum.CanonicalSwapInstruction.html)
/// instruction.
pub fn process_swap_canonical_for_wrapped(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    amount: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let user = next_account_info(account_info_iter)?;
    let source_canonical_account = next_account_info(account_info_iter)?;
    let canonical_mint = next_account_info(account_info_iter)?;
    let vault_account = next_account_info(account_info_iter)?;
    let destination_wrapped_account = next_account_info(account_info_iter)?;
    let wrapped_mint = next_account_info(account_info_iter)?;
    let vault_authority_account = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let wrapped_record_account = next_account_info(account_info_iter)?;
    let canonical_token_program = next_account_info(account_info_iter)?;
    let wrapped_token_program = next_account_info(account_info_iter)?;

    check_signer(user)?;
    check_token_program(canonical_token_program)?;
    check_token_program(wrapped_token_program)?;

    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    let wrapped_record =
        load_wrapped_record(wrapped_record_account, program_id, canonical_record_account)?;

    if canonical_record.mint != *canonical_mint.key {
        msg!("Error: canonical mint does not match the canonical record");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    if wrapped_record.mint != *wrapped_mint.key {
        msg!("Error: wrapped mint does not match the wrapped record");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    if !bool::from(wrapped_record.swap_canonical_for_wrapped_enabled) {
        msg!("Error: swapping canonical for wrapped is disabled for this pair");
        return Err(CanonicalSwapError::DirectionDisabled.into());
    }

    let (vault_address, _) = get_wrapped_vault_address_with_seed_for_program(
        &canonical_record.mint,
        &wrapped_record.mint,
        program_id,
    );
    if *vault_account.key != vault_address {
        msg!("Error: custody vault account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    let (vault_authority_address, vault_authority_bump) =
        get_wrapped_vault_authority_with_seed_for_program(
            &canonical_record.mint,
            &wrapped_record.mint,
            program_id,
        );
    if *vault_authority_account.key != vault_authority_address {
        msg!("Error: custody vault authority account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }

    // Decimals come from the mint accounts, not from the records
    let canonical_decimals = mint_decimals(canonical_mint)?;
    let wrapped_decimals = mint_decimals(wrapped_mint)?;

    let amounts = swap_amounts(amount, wrapped_decimals, canonical_decimals)?;

    // Burn the canonical source amount from the user's account; burning only
    // requires the user's own approval
    invoke(
        &burn(
            canonical_token_program.key,
            source_canonical_account.key,
            canonical_mint.key,
            user.key,
            &[],
            amounts.source,
        )?,
        &[
            source_canonical_account.clone(),
            canonical_mint.clone(),
            user.clone(),
        ],
    )?;

    // Release custodied wrapped tokens, signed as the derived vault authority
    let bump_seed = [vault_authority_bump];
    let canonical_mint_key = canonical_record.mint;
    let wrapped_mint_key = wrapped_record.mint;
    let signer_seeds = get_wrapped_vault_authority_signer_seeds(
        &canonical_mint_key,
        &wrapped_mint_key,
        &bump_seed,
    );
    invoke_signed(
        &transfer_checked(
            wrapped_token_program.key,
            vault_account.key,
            wrapped_mint.key,
            destination_wrapped_account.key,
            &vault_authority_address,
            &[],
            amounts.destination,
            wrapped_decimals,
        )?,
        &[
            vault_account.clone(),
            wrapped_mint.clone(),
            destination_wrapped_account.clone(),
            vault_authority_account.clone(),
        ],
        &[&signer_seeds],
    )
}

/// Processes [`SetEnabled`](enum.CanonicalSwapInstruction.html) instruction.
pub fn process_set_enabled(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    direction: SwapDirection,
    enabled: bool,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let current_authority = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let wrapped_record_account = next_account_info(account_info_iter)?;

    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    check_authority(current_authority, &canonical_record)?;
    load_wrapped_record(wrapped_record_account, program_id, canonical_record_account)?;

    let mut data = wrapped_record_account.try_borrow_mut_data()?;
    let record = pod_from_bytes_mut::<WrappedRecord>(&mut data)?;
    match direction {
        SwapDirection::WrappedForCanonical => {
            record.swap_wrapped_for_canonical_enabled = PodBool::from_bool(enabled);
        }
        SwapDirection::CanonicalForWrapped => {
            record.swap_canonical_for_wrapped_enabled = PodBool::from_bool(enabled);
        }
    }
    Ok(())
}

/// Processes [`SetAuthority`](enum.CanonicalSwapInstruction.html) instruction.
pub fn process_set_authority(program_id: &Pubkey, accounts: &[AccountInfo]) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let current_authority = next_account_info(account_info_iter)?;
    let new_authority = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;

    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    check_authority(current_authority, &canonical_record)?;

    let mut data = canonical_record_account.try_borrow_mut_data()?;
    pod_from_bytes_mut::<CanonicalRecord>(&mut data)?.authority = *new_authority.key;
    Ok(())
}

/// Processes [`ReleaseMintAuthority`](enum.CanonicalSwapInstruction.html)
/// instruction.
pub fn process_release_mint_authority(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();

    let current_authority = next_account_info(account_info_iter)?;
    let recipient = next_account_info(account_info_iter)?;
    let canonical_record_account = next_account_info(account_info_iter)?;
    let canonical_mint = next_account_info(account_info_iter)?;
    let mint_authority_account = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    check_token_program(token_program)?;
    let canonical_record = load_canonical_record(canonical_record_account, program_id)?;
    check_authority(current_authority, &canonical_record)?;

    if canonical_record.mint != *canonical_mint.key {
        msg!("Error: canonical mint does not match the canonical record");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }
    let (mint_authority_address, mint_authority_bump) =
        get_canonical_mint_authority_with_seed_for_program(&canonical_record.mint, program_id);
    if *mint_authority_account.key != mint_authority_address {
        msg!("Error: canonical mint authority account does not match the derived address");
        return Err(CanonicalSwapError::AddressMismatch.into());
    }

    // Hand mint authority back to the recipient, signed as the derived
    // authority
    let bump_seed = [mint_authority_bump];
    let canonical_mint_key = canonical_record.mint;
    let signer_seeds = get_canonical_mint_authority_signer_seeds(&canonical_mint_key, &bump_seed);
    invoke_signed(
        &set_authority(
            token_program.key,
            canonical_mint.key,
            Some(recipient.key),
            AuthorityType::MintTokens,
            &mint_authority_address,
            &[],
        )?,
        &[canonical_mint.clone(), mint_authority_account.clone()],
        &[&signer_seeds],
    )
}

/// Instruction processor
pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    input: &[u8],
) -> ProgramResult {
    match CanonicalSwapInstruction::unpack(input)? {
        CanonicalSwapInstruction::RegisterCanonical { decimals } => {
            msg!("Instruction: RegisterCanonical");
            process_register_canonical(program_id, accounts, decimals)
        }
        CanonicalSwapInstruction::RegisterWrapped { decimals } => {
            msg!("Instruction: RegisterWrapped");
            process_register_wrapped(program_id, accounts, decimals)
        }
        CanonicalSwapInstruction::SwapWrappedForCanonical { amount } => {
            msg!("Instruction: SwapWrappedForCanonical");
            process_swap_wrapped_for_canonical(program_id, accounts, amount)
        }
        CanonicalSwapInstruction::SwapCanonicalForWrapped { amount } => {
            msg!("Instruction: SwapCanonicalForWrapped");
            process_swap_canonical_for_wrapped(program_id, accounts, amount)
        }
        CanonicalSwapInstruction::SetEnabled { direction, enabled } => {
            msg!("Instruction: SetEnabled");
            process_set_enabled(program_id, accounts, direction, enabled)
        }
        CanonicalSwapInstruction::SetAuthority => {
            msg!("Instruction: SetAuthority");
            process_set_authority(program_id, accounts)
        }
        CanonicalSwapInstruction::ReleaseMintAuthority => {
            msg!("Instruction: ReleaseMintAuthority");
            process_release_mint_authority(program_id, accounts)
        }
    }
}
