use crate::{
    error::RaffleError,
    pricing::validate_raffle_params,
    state::{Config, EntryLedger, Raffle, RaffleParams, Treasury, TREASURY_ACCOUNT_SIZE},
};
use anchor_lang::prelude::*;

/// Event emitted when a raffle is created
#[event]
pub struct RaffleCreated {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// Sequential raffle id taken from the config counter
    pub raffle_id: u64,
    /// When the raffle stops accepting entries
    pub cutoff_time: i64,
    /// Entries required before a winner can be drawn
    pub minimum_entries: u64,
    /// Whether the draw starts as soon as the minimum is sold
    pub is_minimum_entries_fixed: bool,
    /// Number of prize tiers, one winner each
    pub prize_tiers: u8,
    /// When the raffle was created
    pub creation_time: i64,
}

/// Instruction to create a new raffle from operator supplied parameters
///
/// # Arguments
/// * `ctx` - The context object containing all required accounts
/// * `params` - Cutoff, entry limits, pricing options and prize tiers
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Validates caller is the program operator via config PDA
/// 2. Rejects a cutoff time that is not in the future
/// 3. Requires pricing options whose unit price strictly decreases as bulk size grows
/// 4. Validates entry limits and the shape of every prize tier
///
/// # Account Validations
/// * Raffle - New PDA with seeds ["raffle", raffle_counter]
/// * Treasury - New PDA with seeds ["treasury", raffle_key]
/// * EntryLedger - New, empty PDA with seeds ["entries", raffle_key]
/// * Config - PDA storing program authorities and the raffle counter
///
/// # Implementation Notes
/// - Raffle starts Open but accepts entries only after prizes are deposited
/// - The entry ledger grows with every purchase
pub fn create_raffle(ctx: Context<CreateRaffle>, params: RaffleParams) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    require!(
        ctx.accounts
            .config
            .is_operator(&ctx.accounts.management_authority.key()),
        RaffleError::NotOperator
    );
    validate_raffle_params(&params, current_time)?;

    let raffle_id = ctx.accounts.config.raffle_counter;
    let raffle_key = ctx.accounts.raffle.key();
    let treasury_key = ctx.accounts.treasury.key();

    ctx.accounts.treasury.raffle = raffle_key;
    ctx.accounts.treasury.bump = ctx.bumps.treasury;
    ctx.accounts
        .entry_ledger
        .set_inner(EntryLedger::new(raffle_key, ctx.bumps.entry_ledger));
    ctx.accounts.raffle.set_inner(Raffle::open(
        raffle_id,
        ctx.accounts.management_authority.key(),
        treasury_key,
        params,
        current_time,
        ctx.bumps.raffle,
    ));

    // Increment the raffle counter
    ctx.accounts.config.raffle_counter = raffle_id
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;

    let raffle = &ctx.accounts.raffle;
    emit!(RaffleCreated {
        raffle: raffle_key,
        raffle_id,
        cutoff_time: raffle.cutoff_time,
        minimum_entries: raffle.minimum_entries,
        is_minimum_entries_fixed: raffle.is_minimum_entries_fixed,
        prize_tiers: raffle.prize_tiers.len() as u8,
        creation_time: current_time,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct CreateRaffle<'info> {
    #[account(
        init,
        payer = management_authority,
        space = 8 + Raffle::INIT_SPACE,
        seeds = [
            b"raffle",
            config.raffle_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub management_authority: Signer<'info>,

    #[account(
        init,
        payer = management_authority,
        space = TREASURY_ACCOUNT_SIZE,
        seeds = [
            b"treasury",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub treasury: Account<'info, Treasury>,

    #[account(
        init,
        payer = management_authority,
        space = EntryLedger::space_for(0),
        seeds = [
            b"entries",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub entry_ledger: Account<'info, EntryLedger>,

    /// The config account storing program authorities and counters
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}
