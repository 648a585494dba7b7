use anchor_lang::prelude::*;

use crate::{
    custody::ProgramCustodian,
    error::RaffleError,
    settlement,
    state::{Config, Raffle, Treasury},
};

/// Event emitted when entry revenue is withdrawn
#[event]
pub struct RevenueWithdrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Amount withdrawn in lamports
    pub amount: u64,
}

/// Instruction to pay the entry revenue of a drawn raffle to the payout authority
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Verifies the signer is the operator
/// 2. Raffle must be Drawn or Complete, cancelled raffles refund their participants instead
/// 3. Revenue can be withdrawn once
/// 4. Only entry revenue leaves the treasury, native prizes stay for the winners
///
/// # Account Validations
/// * Treasury - Must use proper PDA seeds
/// * Config - Payout authority must match the one stored in config
pub fn withdraw_revenue(ctx: Context<WithdrawRevenue>) -> Result<()> {
    let is_operator = ctx
        .accounts
        .config
        .is_operator(&ctx.accounts.management_authority.key());
    let payout = ctx.accounts.payout_authority.key();

    let mut custodian = ProgramCustodian::new(
        ctx.accounts.raffle.key(),
        &ctx.accounts.treasury,
        ctx.accounts.payout_authority.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        None,
        &[],
    );
    let amount = settlement::withdraw_revenue(
        &mut ctx.accounts.raffle,
        is_operator,
        &payout,
        &mut custodian,
    )?;

    emit!(RevenueWithdrawn {
        raffle: ctx.accounts.raffle.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawRevenue<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    pub management_authority: Signer<'info>,

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
        seeds = [b"config"],
        bump = config.bump,
        has_one = payout_authority @ RaffleError::OwnerMismatch,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,

    #[account(mut)]
    pub payout_authority: SystemAccount<'info>,
}
