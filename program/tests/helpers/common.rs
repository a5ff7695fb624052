use {
    canonical_swap::state::{CanonicalRecord, WrappedRecord},
    mollusk_svm::Mollusk,
    solana_account::Account,
    solana_program_option::COption,
    solana_program_pack::Pack,
    solana_pubkey::Pubkey,
    solana_rent::Rent,
    spl_pod::primitives::PodBool,
    spl_token::state::AccountState,
};

pub const CANONICAL_DECIMALS: u8 = 9;
pub const WRAPPED_DECIMALS: u8 = 8;

pub fn init_mollusk() -> Mollusk {
    let mut mollusk = Mollusk::new(&canonical_swap::id(), "canonical_swap");
    mollusk_svm_programs_token::token::add_program(&mut mollusk);
    mollusk_svm_programs_token::token2022::add_program(&mut mollusk);
    mollusk
}

pub fn setup_mint(decimals: u8, supply: u64, mint_authority: COption<Pubkey>) -> Account {
    let state = spl_token::state::Mint {
        mint_authority,
        supply,
        decimals,
        is_initialized: true,
        freeze_authority: COption::None,
    };
    let mut data = vec![0u8; spl_token::state::Mint::LEN];
    state.pack_into_slice(&mut data);
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner: spl_token::id(),
        ..Default::default()
    }
}

pub fn setup_token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let state = spl_token::state::Account {
        mint: *mint,
        owner: *owner,
        amount,
        state: AccountState::Initialized,
        ..Default::default()
    };
    let mut data = vec![0u8; spl_token::state::Account::LEN];
    state.pack_into_slice(&mut data);
    Account {
        lamports: Rent::default().minimum_balance(data.len()),
        data,
        owner: spl_token::id(),
        ..Default::default()
    }
}

/// A program-owned record account holding only zeroes, as expected before
/// registration.
pub fn zeroed_record_account(len: usize) -> Account {
    Account {
        lamports: Rent::default().minimum_balance(len),
        data: vec![0u8; len],
        owner: canonical_swap::id(),
        ..Default::default()
    }
}

pub fn canonical_record_account(authority: &Pubkey, mint: &Pubkey, decimals: u8) -> Account {
    let record = CanonicalRecord {
        authority: *authority,
        mint: *mint,
        decimals,
    };
    Account {
        lamports: Rent::default().minimum_balance(CanonicalRecord::LEN),
        data: bytemuck::bytes_of(&record).to_vec(),
        owner: canonical_swap::id(),
        ..Default::default()
    }
}

pub fn wrapped_record_account(
    canonical_record: &Pubkey,
    mint: &Pubkey,
    decimals: u8,
    wrapped_for_canonical_enabled: bool,
    canonical_for_wrapped_enabled: bool,
) -> Account {
    let record = WrappedRecord {
        canonical_record: *canonical_record,
        mint: *mint,
        decimals,
        swap_wrapped_for_canonical_enabled: PodBool::from_bool(wrapped_for_canonical_enabled),
        swap_canonical_for_wrapped_enabled: PodBool::from_bool(canonical_for_wrapped_enabled),
    };
    Account {
        lamports: Rent::default().minimum_balance(WrappedRecord::LEN),
        data: bytemuck::bytes_of(&record).to_vec(),
        owner: canonical_swap::id(),
        ..Default::default()
    }
}

/// An empty system account pre-funded with enough lamports to cover the
/// custody vault's rent.
pub fn prefunded_vault_account() -> Account {
    Account {
        lamports: Rent::default().minimum_balance(spl_token::state::Account::LEN),
        ..Default::default()
    }
}

pub fn token_balance(account: &Account) -> u64 {
    spl_token::state::Account::unpack(&account.data)
        .unwrap()
        .amount
}

pub fn mint_supply(account: &Account) -> u64 {
    spl_token::state::Mint::unpack(&account.data).unwrap().supply
}

pub fn mint_authority(account: &Account) -> COption<Pubkey> {
    spl_token::state::Mint::unpack(&account.data)
        .unwrap()
        .mint_authority
}

pub fn unpack_canonical_record(account: &Account) -> CanonicalRecord {
    *bytemuck::from_bytes::<CanonicalRecord>(&account.data)
}

pub fn unpack_wrapped_record(account: &Account) -> WrappedRecord {
    *bytemuck::from_bytes::<WrappedRecord>(&account.data)
}
