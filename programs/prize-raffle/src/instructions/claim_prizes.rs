use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenInterface;

use crate::{
    custody::ProgramCustodian,
    settlement,
    state::{Raffle, Treasury},
};

/// Event emitted when a winner claims prize tiers
#[event]
pub struct PrizesClaimed {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winner receiving the prizes
    pub winner: Pubkey,
    /// Tiers paid out by this claim
    pub tier_indices: Vec<u8>,
    /// True once every tier of the raffle has been claimed
    pub raffle_complete: bool,
}

/// Instruction for a winner to collect the prizes of the tiers they won
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `tier_indices` - Tiers to claim, a subset of the tiers won by the signer
///
/// # Security Considerations
/// 1. Raffle must be Drawn or Complete
/// 2. The signer must be the winner of every listed tier
/// 3. A tier can be claimed once, duplicates in one call are rejected
/// 4. Either every listed tier is paid out or none is
///
/// # Account Validations
/// * Treasury - PDA with seeds ["treasury", raffle_key], signs token transfers
/// * Remaining accounts - `[mint, winner token account, vault]` per token prize of the
///   claimed tiers
pub fn claim_prizes<'info>(
    ctx: Context<'_, '_, '_, 'info, ClaimPrizes<'info>>,
    tier_indices: Vec<u8>,
) -> Result<()> {
    let winner = ctx.accounts.signer.key();
    let mut custodian = ProgramCustodian::new(
        ctx.accounts.raffle.key(),
        &ctx.accounts.treasury,
        ctx.accounts.signer.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts
            .token_program
            .as_ref()
            .map(|program| program.to_account_info()),
        ctx.remaining_accounts,
    );
    settlement::claim_prizes(
        &mut ctx.accounts.raffle,
        &winner,
        &tier_indices,
        &mut custodian,
    )?;

    emit!(PrizesClaimed {
        raffle: ctx.accounts.raffle.key(),
        winner,
        tier_indices,
        raffle_complete: ctx.accounts.raffle.winners.iter().all(|w| w.claimed),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ClaimPrizes<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub signer: Signer<'info>,

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

    /// Needed only when a claimed tier holds token prizes
    pub token_program: Option<Interface<'info, TokenInterface>>,
}
