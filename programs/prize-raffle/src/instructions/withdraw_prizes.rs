use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenInterface;

use crate::{
    custody::ProgramCustodian,
    error::RaffleError,
    settlement,
    state::{Config, Raffle, Treasury},
};

/// Event emitted when the prizes of a cancelled raffle are returned
#[event]
pub struct PrizesWithdrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The raffle owner receiving the prizes
    pub owner: Pubkey,
    /// False when the prizes had already been returned
    pub returned: bool,
}

/// Instruction to return deposited prizes of a cancelled raffle to its owner
///
/// Calling it again after the prizes are back is a no-op.
///
/// # Security Considerations
/// 1. Only the operator may withdraw
/// 2. Raffle must be Cancelled
/// 3. Prizes go to the raffle owner recorded at creation, never to the signer
///
/// # Account Validations
/// * Owner - Must match the raffle owner
/// * Remaining accounts - `[mint, owner token account, vault]` per token prize in tier order
pub fn withdraw_prizes<'info>(
    ctx: Context<'_, '_, '_, 'info, WithdrawPrizes<'info>>,
) -> Result<()> {
    let is_operator = ctx
        .accounts
        .config
        .is_operator(&ctx.accounts.management_authority.key());

    let mut custodian = ProgramCustodian::new(
        ctx.accounts.raffle.key(),
        &ctx.accounts.treasury,
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts
            .token_program
            .as_ref()
            .map(|program| program.to_account_info()),
        ctx.remaining_accounts,
    );
    let returned =
        settlement::withdraw_prizes(&mut ctx.accounts.raffle, is_operator, &mut custodian)?;

    emit!(PrizesWithdrawn {
        raffle: ctx.accounts.raffle.key(),
        owner: ctx.accounts.owner.key(),
        returned,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawPrizes<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    pub management_authority: Signer<'info>,

    #[account(
        mut,
        address = raffle.owner @ RaffleError::OwnerMismatch,
    )]
    pub owner: SystemAccount<'info>,

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
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,

    pub token_program: Option<Interface<'info, TokenInterface>>,
}
