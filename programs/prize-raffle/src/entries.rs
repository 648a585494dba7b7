use anchor_lang::prelude::*;

use crate::{
    custody::AssetCustodian,
    draw,
    error::RaffleError,
    state::{EntryLedger, EntryRecord, ParticipantStats, Prize, Raffle},
};

/// One line of a purchase: `count` units of the pricing option at `pricing_option_index`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryOption {
    pub pricing_option_index: u8,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub records: Vec<EntryRecord>,
    pub entries_granted: u64,
    pub amount_paid: u64,
    /// Set when this purchase pushed the raffle into drawing
    pub request_id: Option<u64>,
}

/// Price and entries of a basket of options, before any capacity check.
pub fn quote(raffle: &Raffle, options: &[EntryOption]) -> Result<(u64, Vec<u64>)> {
    require!(!options.is_empty(), RaffleError::InvalidCount);
    let mut price = 0u64;
    let mut entries = Vec::with_capacity(options.len());
    for option in options {
        require!(option.count > 0, RaffleError::InvalidCount);
        let pricing = raffle.pricing_option(option.pricing_option_index)?;
        let line_price = pricing
            .price
            .checked_mul(option.count as u64)
            .ok_or(RaffleError::Overflow)?;
        price = price.checked_add(line_price).ok_or(RaffleError::Overflow)?;
        entries.push(
            pricing
                .entry_count
                .checked_mul(option.count as u64)
                .ok_or(RaffleError::Overflow)?,
        );
    }
    Ok((price, entries))
}

/// Sells entries to `stats.owner`.
///
/// Every check runs before anything is written: status and cutoff, the per
/// participant cap, the fixed-minimum cap, then the exact payment. On success the
/// payment is locked, one record per option is written into `slots` (the ledger's
/// record area, already sized for them) and the raffle is asked whether its draw
/// is now due.
#[allow(clippy::too_many_arguments)]
pub fn purchase_entries<C: AssetCustodian>(
    raffle: &mut Raffle,
    ledger: &mut EntryLedger,
    slots: &mut [u8],
    stats: &mut ParticipantStats,
    options: &[EntryOption],
    tendered: u64,
    now: i64,
    request_counter: &mut u64,
    custodian: &mut C,
) -> Result<PurchaseReceipt> {
    raffle.ensure_accepting_entries(now)?;

    let (required, entries) = quote(raffle, options)?;
    let granted = entries
        .iter()
        .try_fold(0u64, |total, entries| total.checked_add(*entries))
        .ok_or(RaffleError::Overflow)?;

    let participant_total = stats
        .entries
        .checked_add(granted)
        .ok_or(RaffleError::Overflow)?;
    require!(
        participant_total <= raffle.maximum_entries_per_participant,
        RaffleError::MaximumEntriesExceeded
    );

    let raffle_total = raffle
        .entries_sold
        .checked_add(granted)
        .ok_or(RaffleError::Overflow)?;
    if raffle.is_minimum_entries_fixed {
        require!(
            raffle_total <= raffle.minimum_entries,
            RaffleError::EntriesOversold
        );
    }

    require!(tendered == required, RaffleError::IncorrectPayment);

    let participant = stats.owner;
    let held_before = custodian.balance_held()?;
    custodian.lock(&Prize::native(required), &participant)?;
    let held_after = custodian.balance_held()?;
    require!(
        held_after == held_before.checked_add(required).ok_or(RaffleError::Overflow)?,
        RaffleError::TransferFailed
    );

    let mut records = Vec::with_capacity(entries.len());
    for entries in entries {
        records.push(ledger.append(slots, participant, entries)?);
    }

    stats.entries = participant_total;
    stats.amount_paid = stats
        .amount_paid
        .checked_add(required)
        .ok_or(RaffleError::Overflow)?;
    raffle.record_sale(granted, required)?;

    let request_id = draw::request_draw_if_due(raffle, request_counter)?;

    Ok(PurchaseReceipt {
        records,
        entries_granted: granted,
        amount_paid: required,
        request_id,
    })
}
