use anchor_lang::prelude::*;

use crate::{
    custody::ProgramCustodian,
    settlement,
    state::{ParticipantStats, Raffle, Treasury},
};

/// Event emitted when a participant is refunded
#[event]
pub struct RefundClaimed {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The refunded participant
    pub participant: Pubkey,
    /// Lamports returned
    pub amount: u64,
}

/// Instruction to refund entries purchased in a cancelled raffle
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Validates the raffle is Cancelled
/// 2. Ensures signer is the owner of the participant stats
/// 3. Refunds at most once per participant
/// 4. Confirms the participant paid something
///
/// # Implementation Notes
/// - Refunds exactly the lamports tendered across all purchases
/// - Funds move directly from the treasury PDA, which this program owns
pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
    let participant = ctx.accounts.signer.key();
    let mut custodian = ProgramCustodian::new(
        ctx.accounts.raffle.key(),
        &ctx.accounts.treasury,
        ctx.accounts.signer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        None,
        &[],
    );
    let amount = settlement::claim_refund(
        &ctx.accounts.raffle,
        &mut ctx.accounts.participant_stats,
        &participant,
        &mut custodian,
    )?;

    emit!(RefundClaimed {
        raffle: ctx.accounts.raffle.key(),
        participant,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub signer: Signer<'info>,

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

    #[account(
        mut,
        seeds = [
            b"treasury",
            raffle.key().as_ref(),
        ],
        bump = treasury.bump,
    )]
    pub treasury: Account<'info, Treasury>,

    pub system_program: Program<'info, System>,
}
