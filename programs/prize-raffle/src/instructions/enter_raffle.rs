use anchor_lang::prelude::*;

use crate::{
    custody::ProgramCustodian,
    entries::{self, EntryOption},
    error::RaffleError,
    instructions::force_draw::RandomnessRequested,
    state::{Config, EntryLedger, ParticipantStats, Raffle, Treasury, ENTRY_LEDGER_HEADER_SIZE},
};

/// Event emitted when entries are purchased
#[event]
pub struct EntriesPurchased {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The buyer's address
    pub buyer: Pubkey,
    /// Entries granted by this purchase
    pub entries: u64,
    /// Total amount paid in lamports
    pub payment_amount: u64,
    /// First entry number granted by this purchase
    pub first_entry: u64,
    /// Entries sold in the raffle after this purchase
    pub entries_sold: u64,
}

/// Instruction to purchase entries in bulk
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `options` - Pricing option index and unit count per line
/// * `tendered` - Lamports the buyer is paying, must equal the quoted price
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Raffle must be Open, funded and before its cutoff
/// 2. The buyer's running total may not exceed the per participant maximum
/// 3. A fixed-minimum raffle never sells beyond its minimum
/// 4. Payment must match the quote exactly, nothing is refunded implicitly
/// 5. The treasury balance is checked after the transfer
///
/// # Account Validations
/// * Raffle - Target raffle
/// * EntryLedger - Grown by one record slot per option line
/// * ParticipantStats - Buyer's PDA, seeds ["participant", raffle_key, signer_key]
/// * Treasury - Must use proper PDA seeds
/// * Config - Supplies the randomness request counter
///
/// # Implementation Notes
/// - Selling the last entry of a fixed-minimum raffle requests the draw in the same transaction
pub fn enter_raffle(
    ctx: Context<EnterRaffle>,
    options: Vec<EntryOption>,
    tendered: u64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let raffle_key = ctx.accounts.raffle.key();

    let mut custodian = ProgramCustodian::new(
        raffle_key,
        &ctx.accounts.treasury,
        ctx.accounts.signer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        None,
        &[],
    );
    let ledger_info = ctx.accounts.entry_ledger.to_account_info();
    let mut ledger_data = ledger_info.try_borrow_mut_data()?;
    let slots = ledger_data
        .get_mut(ENTRY_LEDGER_HEADER_SIZE..)
        .ok_or(RaffleError::EntryLedgerFull)?;

    let receipt = entries::purchase_entries(
        &mut ctx.accounts.raffle,
        &mut ctx.accounts.entry_ledger,
        slots,
        &mut ctx.accounts.participant_stats,
        &options,
        tendered,
        now,
        &mut ctx.accounts.config.request_counter,
        &mut custodian,
    )?;

    emit!(EntriesPurchased {
        raffle: raffle_key,
        buyer: ctx.accounts.signer.key(),
        entries: receipt.entries_granted,
        payment_amount: receipt.amount_paid,
        first_entry: receipt.records.first().map_or(0, |record| record.start),
        entries_sold: ctx.accounts.raffle.entries_sold,
    });

    if let Some(request_id) = receipt.request_id {
        emit!(RandomnessRequested {
            raffle: raffle_key,
            raffle_id: ctx.accounts.raffle.id,
            request_id,
        });
    }

    Ok(())
}

/// Accounts required for the enter_raffle instruction
#[derive(Accounts)]
#[instruction(options: Vec<EntryOption>)]
pub struct EnterRaffle<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    /// Grows by one record slot per option line, paid by the buyer
    #[account(
        mut,
        seeds = [
            b"entries",
            raffle.key().as_ref(),
        ],
        bump = entry_ledger.bump,
        realloc = EntryLedger::space_for(entry_ledger.record_count as usize + options.len()),
        realloc::payer = signer,
        realloc::zero = false,
    )]
    pub entry_ledger: Account<'info, EntryLedger>,

    #[account(
        mut,
        seeds = [
            b"participant",
            raffle.key().as_ref(),
            signer.key().as_ref()
        ],
        bump = participant_stats.bump
    )]
    pub participant_stats: Account<'info, ParticipantStats>,

    /// The account purchasing entries and paying for ledger growth
    #[account(mut)]
    pub signer: Signer<'info>,

    /// Treasury account that receives payment for entries
    /// PDA with seeds ["treasury", raffle_key]
    #[account(
        mut,
        seeds = [
            b"treasury",
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}
