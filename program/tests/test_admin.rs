#![cfg(feature = "test-sbf")]

mod helpers;

use {
    canonical_swap::{
        error::CanonicalSwapError,
        get_canonical_mint_authority,
        instruction::{release_mint_authority, set_authority, set_enabled, SwapDirection},
    },
    helpers::common::{
        canonical_record_account, init_mollusk, mint_authority, setup_mint,
        unpack_canonical_record, unpack_wrapped_record, wrapped_record_account,
        CANONICAL_DECIMALS, WRAPPED_DECIMALS,
    },
    mollusk_svm::result::Check,
    solana_account::Account,
    solana_program_option::COption,
    solana_pubkey::Pubkey,
};

#[test]
fn set_enabled_toggles_one_direction_only() {
    let mollusk = init_mollusk();

    let authority = Pubkey::new_unique();
    let canonical_mint = Pubkey::new_unique();
    let wrapped_mint = Pubkey::new_unique();
    let canonical_record = Pubkey::new_unique();
    let wrapped_record = Pubkey::new_unique();

    let accounts = &[
        (authority, Account::default()),
        (
            canonical_record,
            canonical_record_account(&authority, &canonical_mint, CANONICAL_DECIMALS),
        ),
        (
            wrapped_record,
            wrapped_record_account(
                &canonical_record,
                &wrapped_mint,
                WRAPPED_DECIMALS,
                true,
                true,
            ),
        ),
    ];

    let instruction = set_enabled(
        &canonical_swap::id(),
        &authority,
        &canonical_record,
        &wrapped_record,
        SwapDirection::WrappedForCanonical,
        false,
    );
    let result =
        mollusk.process_and_validate_instruction(&instruction, accounts, &[Check::success()]);

    let record = unpack_wrapped_record(result.get_account(&wrapped_record).unwrap());
    assert!(!bool::from(record.swap_wrapped_for_canonical_enabled));
    assert!(bool::from(record.swap_canonical_for_wrapped_enabled));

    // Re-enable it from the resulting state
    let instruction = set_enabled(
        &canonical_swap::id(),
        &authority,
        &canonical_record,
        &wrapped_record,
        SwapDirection::WrappedForCanonical,
        true,
    );
    let result = mollusk.process_and_validate_instruction(
        &instruction,
        &result.resulting_accounts,
        &[Check::success()],
    );

    let record = unpack_wrapped_record(result.get_account(&wrapped_record).unwrap());
    assert!(bool::from(record.swap_wrapped_for_canonical_enabled));
    assert!(bool::from(record.swap_canonical_for_wrapped_enabled));
}

#[test]
fn set_enabled_rejects_non_authority() {
    let mollusk = init_mollusk();

    let authority = Pubkey::new_unique();
    let interloper = Pubkey::new_unique();
    let canonical_mint = Pubkey::new_unique();
    let wrapped_mint = Pubkey::new_unique();
    let canonical_record = Pubkey::new_unique();
    let wrapped_record = Pubkey::new_unique();

    let instruction = set_enabled(
        &canonical_swap::id(),
        &interloper,
        &canonical_record,
        &wrapped_record,
        SwapDirection::CanonicalForWrapped,
        false,
    );
    let accounts = &[
        (interloper, Account::default()),
        (
            canonical_record,
            canonical_record_account(&authority, &canonical_mint, CANONICAL_DECIMALS),
        ),
        (
            wrapped_record,
            wrapped_record_account(
                &canonical_record,
                &wrapped_mint,
                WRAPPED_DECIMALS,
                true,
                true,
            ),
        ),
    ];

    mollusk.process_and_validate_instruction(
        &instruction,
        accounts,
        &[Check::err(CanonicalSwapError::NotAuthorized.into())],
    );
}

#[test]
fn set_authority_takes_effect_immediately() {
    let mollusk = init_mollusk();

    let old_authority = Pubkey::new_unique();
    let new_authority = Pubkey::new_unique();
    let canonical_mint = Pubkey::new_unique();
    let wrapped_mint = Pubkey::new_unique();
    let canonical_record = Pubkey::new_unique();
    let wrapped_record = Pubkey::new_unique();

    let instruction = set_authority(
        &canonical_swap::id(),
        &old_authority,
        &new_authority,
        &canonical_record,
    );
    let accounts = &[
        (old_authority, Account::default()),
        (new_authority, Account::default()),
        (
            canonical_record,
            canonical_record_account(&old_authority, &canonical_mint, CANONICAL_DECIMALS),
        ),
    ];

    let result =
        mollusk.process_and_validate_instruction(&instruction, accounts, &[Check::success()]);

    let updated_record = result.get_account(&canonical_record).unwrap().clone();
    let record = unpack_canonical_record(&updated_record);
    assert_eq!(record.authority, new_authority);

    // The old authority loses control of every wrapped record referencing
    // this canonical record, with no per-record update.
    let accounts = &[
        (old_authority, Account::default()),
        (new_authority, Account::default()),
        (canonical_record, updated_record),
        (
            wrapped_record,
            wrapped_record_account(
                &canonical_record,
                &wrapped_mint,
                WRAPPED_DECIMALS,
                true,
                true,
            ),
        ),
    ];
    let instruction = set_enabled(
        &canonical_swap::id(),
        &old_authority,
        &canonical_record,
        &wrapped_record,
        SwapDirection::WrappedForCanonical,
        false,
    );
    mollusk.process_and_validate_instruction(
        &instruction,
        accounts,
        &[Check::err(CanonicalSwapError::NotAuthorized.into())],
    );

    let instruction = set_enabled(
        &canonical_swap::id(),
        &new_authority,
        &canonical_record,
        &wrapped_record,
        SwapDirection::WrappedForCanonical,
        false,
    );
    mollusk.process_and_validate_instruction(&instruction, accounts, &[Check::success()]);
}

#[test]
fn release_mint_authority_hands_minting_back() {
    let mollusk = init_mollusk();

    let authority = Pubkey::new_unique();
    let recipient = Pubkey::new_unique();
    let canonical_mint = Pubkey::new_unique();
    let canonical_record = Pubkey::new_unique();
    let mint_authority_address = get_canonical_mint_authority(&canonical_mint);

    let instruction = release_mint_authority(
        &canonical_swap::id(),
        &authority,
        &recipient,
        &canonical_record,
        &canonical_mint,
        &spl_token::id(),
    );
    let accounts = &[
        (authority, Account::default()),
        (recipient, Account::default()),
        (
            canonical_record,
            canonical_record_account(&authority, &canonical_mint, CANONICAL_DECIMALS),
        ),
        (
            canonical_mint,
            setup_mint(CANONICAL_DECIMALS, 1_000, COption::Some(mint_authority_address)),
        ),
        (mint_authority_address, Account::default()),
        mollusk_svm_programs_token::token::keyed_account(),
    ];

    let result =
        mollusk.process_and_validate_instruction(&instruction, accounts, &[Check::success()]);

    assert_eq!(
        mint_authority(result.get_account(&canonical_mint).unwrap()),
        COption::Some(recipient),
    );
}

#[test]
fn release_mint_authority_rejects_non_authority() {
    let mollusk = init_mollusk();

    let authority = Pubkey::new_unique();
    let interloper = Pubkey::new_unique();
    let canonical_mint = Pubkey::new_unique();
    let canonical_record = Pubkey::new_unique();
    let mint_authority_address = get_canonical_mint_authority(&canonical_mint);

    let instruction = release_mint_authority(
        &canonical_swap::id(),
        &interloper,
        &interloper,
        &canonical_record,
        &canonical_mint,
        &spl_token::id(),
    );
    let accounts = &[
        (interloper, Account::default()),
        (
            canonical_record,
            canonical_record_account(&authority, &canonical_mint, CANONICAL_DECIMALS),
        ),
        (
            canonical_mint,
            setup_mint(CANONICAL_DECIMALS, 1_000, COption::Some(mint_authority_address)),
        ),
        (mint_authority_address, Account::default()),
        mollusk_svm_programs_token::token::keyed_account(),
    ];

    mollusk.process_and_validate_instruction(
        &instruction,
        accounts,
        &[Check::err(CanonicalSwapError::NotAuthorized.into())],
    );
}
