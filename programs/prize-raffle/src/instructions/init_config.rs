use crate::state::{Config, CONFIG_ACCOUNT_SIZE};
use anchor_lang::prelude::*;

/// Instruction to initialize the program configuration
/// This should be called once during program deployment
///
/// # Security Considerations
/// - Creates a PDA with seed "config" to store program authorities
/// - Only needs to be called once during deployment
/// - The caller of this instruction must be the owner of the program
/// - The management authority becomes the raffle operator
/// - The randomness authority is the only signer accepted for fulfilled draws
///
/// # Account Validations
/// * Config - New PDA initialized with proper space allocation
/// * Upgrade Authority - Signer needs to be the owner of the program
/// * Management Authority - Account becomes the program operator
/// * Payout Authority - Account receives entry revenue of drawn raffles
/// * Randomness Authority - Account allowed to deliver random values
pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.payout_authority = ctx.accounts.payout_authority.key();
    config.management_authority = ctx.accounts.management_authority.key();
    config.randomness_authority = ctx.accounts.randomness_authority.key();
    config.upgrade_authority = ctx.accounts.upgrade_authority.key();
    config.bump = ctx.bumps.config;
    config.raffle_counter = 0;
    config.request_counter = 0;
    Ok(())
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        payer = upgrade_authority,
        space = CONFIG_ACCOUNT_SIZE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub upgrade_authority: Signer<'info>,
    pub payout_authority: SystemAccount<'info>,
    pub management_authority: SystemAccount<'info>,
    /// CHECK: only its key is stored, it may be a program-derived signer
    pub randomness_authority: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}
