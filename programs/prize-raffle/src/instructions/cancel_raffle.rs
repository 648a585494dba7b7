use anchor_lang::prelude::*;

use crate::state::{Config, Raffle};

/// Event emitted when a raffle is cancelled
#[event]
pub struct RaffleCancelled {
    /// The pubkey of the cancelled raffle
    pub raffle: Pubkey,
    /// The timestamp when the raffle was cancelled
    pub cancelled_at: i64,
    /// The final number of entries sold
    pub entries_sold: u64,
}

/// Instruction to cancel a raffle that didn't reach its minimum by the cutoff
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Only the operator may cancel
/// 2. Ensures raffle is in Open state
/// 3. Validates that the minimum entry threshold was not met
/// 4. Verifies the cutoff time has passed
///
/// # Implementation Notes
/// - Changes raffle state to Cancelled
/// - No funds are transferred in this instruction, prizes and refunds are claimed separately
pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
    let is_operator = ctx
        .accounts
        .config
        .is_operator(&ctx.accounts.management_authority.key());

    let clock = Clock::get()?;
    ctx.accounts.raffle.cancel(is_operator, clock.unix_timestamp)?;

    emit!(RaffleCancelled {
        raffle: ctx.accounts.raffle.key(),
        cancelled_at: clock.unix_timestamp,
        entries_sold: ctx.accounts.raffle.entries_sold,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CancelRaffle<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    pub management_authority: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}
