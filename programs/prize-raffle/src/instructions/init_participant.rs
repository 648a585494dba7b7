use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{ParticipantStats, Raffle, RaffleStatus, PARTICIPANT_STATS_ACCOUNT_SIZE},
};

/// Initializes the stats account of a participant in a specific raffle.
/// It tracks how many entries the participant owns and how much they paid, which is
/// exactly what a refund returns if the raffle is cancelled.
///
/// # Account Structure
/// - `signer` (Signer): The participant who will own the stats account
/// - `participant_stats` (PDA): Seeds ["participant", raffle.key(), signer.key()]
/// - `raffle` (Account): The raffle the stats belong to
/// - `system_program`: Required for account creation
///
/// # Access Control
/// - Anyone can initialize their own stats account
/// - One stats account per participant per raffle
pub fn init_participant(ctx: Context<InitParticipant>) -> Result<()> {
    require!(
        ctx.accounts.raffle.status == RaffleStatus::Open,
        RaffleError::InvalidRaffleStatus
    );

    ctx.accounts.participant_stats.set_inner(ParticipantStats::new(
        ctx.accounts.signer.key(),
        ctx.bumps.participant_stats,
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct InitParticipant<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = PARTICIPANT_STATS_ACCOUNT_SIZE,
        seeds = [
            b"participant",
            raffle.key().as_ref(),
            signer.key().as_ref(),
        ],
        bump,
    )]
    pub participant_stats: Account<'info, ParticipantStats>,

    pub raffle: Account<'info, Raffle>,
    pub system_program: Program<'info, System>,
}
