//! Program state

use {
    bytemuck::{Pod, Zeroable},
    solana_pubkey::Pubkey,
    spl_pod::primitives::PodBool,
};

/// Registry record for a canonical mint whose minting rights have been
/// delegated to this program.
///
/// Stored at a caller-chosen address, pre-allocated to the program with
/// exactly [`CanonicalRecord::LEN`] zeroed bytes before registration. A
/// record whose `mint` is the default pubkey is uninitialized.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CanonicalRecord {
    /// Identity permitted to administer this record and every wrapped record
    /// referencing it
    pub authority: Pubkey,
    /// The canonical token mint
    pub mint: Pubkey,
    /// Smallest-unit precision of the canonical mint at registration time
    pub decimals: u8,
}

impl CanonicalRecord {
    /// Serialized size of a canonical record
    pub const LEN: usize = core::mem::size_of::<CanonicalRecord>();

    /// Whether the record has been written
    pub fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}

/// Registry record pairing a wrapped mint with its canonical record.
///
/// The administering authority is never cached here; it is always read
/// through the referenced canonical record at call time.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct WrappedRecord {
    /// Address of the owning canonical record
    pub canonical_record: Pubkey,
    /// The wrapped token mint
    pub mint: Pubkey,
    /// Smallest-unit precision of the wrapped mint at registration time
    pub decimals: u8,
    /// Gate for depositing wrapped tokens to mint canonical tokens
    pub swap_wrapped_for_canonical_enabled: PodBool,
    /// Gate for burning canonical tokens to release custodied wrapped tokens
    pub swap_canonical_for_wrapped_enabled: PodBool,
}

impl WrappedRecord {
    /// Serialized size of a wrapped record
    pub const LEN: usize = core::mem::size_of::<WrappedRecord>();

    /// Whether the record has been written
    pub fn is_initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}
