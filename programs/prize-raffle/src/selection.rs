use anchor_lang::{prelude::*, solana_program::hash::hashv};

use crate::{
    error::RaffleError,
    state::{EntryRecords, Raffle, Winner},
};

/// Entry number drawn for `tier` from the oracle's random value.
///
/// Each tier hashes the random value with its own index, so one 32-byte value
/// yields an independent draw per tier. The whole 256-bit digest is reduced modulo
/// `entries_sold`, which keeps the bias far below anything measurable.
pub fn tier_entry_index(random_value: &[u8; 32], tier: u8, entries_sold: u64) -> u64 {
    let digest = hashv(&[random_value.as_slice(), &(tier as u64).to_le_bytes()]).to_bytes();
    let modulus = entries_sold as u128;
    let reduced = digest
        .iter()
        .fold(0u128, |acc, byte| (acc * 256 + *byte as u128) % modulus);
    reduced as u64
}

/// Picks one winning entry per prize tier, with replacement.
///
/// The same participant, or even the same entry, may win several tiers.
pub fn select_winners(
    raffle: &Raffle,
    records: &EntryRecords,
    random_value: &[u8; 32],
) -> Result<Vec<Winner>> {
    require!(raffle.entries_sold > 0, RaffleError::InsufficientEntries);
    require!(
        records.total_entries() == raffle.entries_sold,
        RaffleError::InvalidIndex
    );

    (0..raffle.prize_tiers.len())
        .map(|tier| -> Result<Winner> {
            let tier_index = u8::try_from(tier).map_err(|_| RaffleError::InvalidIndex)?;
            let entry_index = tier_entry_index(random_value, tier_index, raffle.entries_sold);
            Ok(Winner {
                tier_index,
                participant: records.owner_at(entry_index)?,
                entry_index,
                claimed: false,
            })
        })
        .collect()
}
