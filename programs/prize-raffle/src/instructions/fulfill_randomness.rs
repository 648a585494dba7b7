use anchor_lang::prelude::*;

use crate::{
    draw,
    error::RaffleError,
    state::{Config, EntryLedger, Raffle, ENTRY_LEDGER_HEADER_SIZE},
};

/// Event emitted when the winners of a raffle are drawn
#[event]
pub struct WinnersDrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The request that was fulfilled
    pub request_id: u64,
    /// Random value used for the draw
    pub random_value: [u8; 32],
    /// Winning participant per prize tier, in tier order
    pub winners: Vec<Pubkey>,
    /// Winning entry number per prize tier, in tier order
    pub entry_indices: Vec<u64>,
}

/// Callback delivering the random value for an outstanding draw request.
///
/// One winning entry is derived per prize tier from the random value. Entries are
/// drawn with replacement, so one participant may win several tiers. Only the
/// ledger header is deserialized; winners are resolved by binary search over the
/// record slots in the account data.
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `request_id` - Id announced in `RandomnessRequested`
/// * `random_value` - 32 bytes of randomness from the provider
///
/// # Errors
/// - `NotRandomnessProvider` if the signer is not the configured randomness authority
/// - `InvalidRequestId` if the request is unknown or was already fulfilled
pub fn fulfill_randomness(
    ctx: Context<FulfillRandomness>,
    request_id: u64,
    random_value: [u8; 32],
) -> Result<()> {
    let ledger_info = ctx.accounts.entry_ledger.to_account_info();
    let ledger_data = ledger_info.try_borrow_data()?;
    let slots = ledger_data
        .get(ENTRY_LEDGER_HEADER_SIZE..)
        .ok_or(RaffleError::EntryLedgerFull)?;
    let records = ctx.accounts.entry_ledger.records(slots)?;

    let winners = draw::on_fulfilled(
        &mut ctx.accounts.raffle,
        &records,
        request_id,
        random_value,
    )?;

    emit!(WinnersDrawn {
        raffle: ctx.accounts.raffle.key(),
        request_id,
        random_value,
        winners: winners.iter().map(|winner| winner.participant).collect(),
        entry_indices: winners.iter().map(|winner| winner.entry_index).collect(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FulfillRandomness<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    #[account(
        seeds = [
            b"entries",
            raffle.key().as_ref(),
        ],
        bump = entry_ledger.bump,
    )]
    pub entry_ledger: Account<'info, EntryLedger>,

    pub randomness_authority: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
        has_one = randomness_authority @ RaffleError::NotRandomnessProvider,
    )]
    pub config: Account<'info, Config>,
}
