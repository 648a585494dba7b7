use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenInterface;

use crate::{
    custody::ProgramCustodian,
    settlement,
    state::{Config, Raffle, Treasury},
};

/// Event emitted when the prizes of a raffle are moved into custody
#[event]
pub struct PrizesDeposited {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Lamports locked for native prizes
    pub native_amount: u64,
    /// Number of token prizes locked
    pub token_prizes: u8,
}

/// Instruction to deposit every prize of a raffle into its treasury
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `native_amount` - Lamports for native prizes, must equal their sum
///
/// # Security Considerations
/// 1. Only the operator may deposit
/// 2. Prizes can be deposited once, while the raffle is Open
/// 3. The native amount must match the configured native prizes exactly
/// 4. Token accounts are checked against the prize mint, the operator and the treasury
///
/// # Account Validations
/// * Raffle - Must be Open and not yet funded
/// * Treasury - Must match raffle's treasury and use proper PDA seeds
/// * Remaining accounts - `[mint, operator token account, vault]` per token prize in tier order
pub fn deposit_prizes<'info>(
    ctx: Context<'_, '_, '_, 'info, DepositPrizes<'info>>,
    native_amount: u64,
) -> Result<()> {
    let operator = ctx.accounts.management_authority.key();
    let is_operator = ctx.accounts.config.is_operator(&operator);

    let mut custodian = ProgramCustodian::new(
        ctx.accounts.raffle.key(),
        &ctx.accounts.treasury,
        ctx.accounts.management_authority.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ctx.accounts
            .token_program
            .as_ref()
            .map(|program| program.to_account_info()),
        ctx.remaining_accounts,
    );
    settlement::deposit_prizes(
        &mut ctx.accounts.raffle,
        is_operator,
        &operator,
        native_amount,
        &mut custodian,
    )?;

    let token_prizes = ctx
        .accounts
        .raffle
        .prize_tiers
        .iter()
        .flat_map(|tier| tier.prizes.iter())
        .filter(|prize| !prize.is_native())
        .count();

    emit!(PrizesDeposited {
        raffle: ctx.accounts.raffle.key(),
        native_amount,
        token_prizes: token_prizes as u8,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct DepositPrizes<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
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
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,

    /// Needed only when the raffle has token prizes
    pub token_program: Option<Interface<'info, TokenInterface>>,
}
