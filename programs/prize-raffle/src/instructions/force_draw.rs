use anchor_lang::prelude::*;

use crate::{
    draw,
    state::{Config, Raffle},
};

/// Event emitted when a raffle asks the randomness authority for a random value.
/// The oracle watches for this event and answers with `fulfill_randomness`.
#[event]
pub struct RandomnessRequested {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Sequential id of the raffle
    pub raffle_id: u64,
    /// Id the fulfillment must quote back
    pub request_id: u64,
}

/// Instruction for the operator to start the draw of a raffle without a fixed minimum
///
/// # Security Considerations
/// 1. Only the operator may force a draw
/// 2. The raffle must be Open and must not use a fixed minimum
/// 3. The cutoff time must have passed
/// 4. At least the minimum number of entries must have been sold
///
/// # Account Validations
/// * Raffle - Moves from Open to Drawing
/// * Config - Supplies the operator key and the request counter
pub fn force_draw(ctx: Context<ForceDraw>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let is_operator = ctx
        .accounts
        .config
        .is_operator(&ctx.accounts.management_authority.key());

    let request_id = draw::force_draw(
        &mut ctx.accounts.raffle,
        is_operator,
        now,
        &mut ctx.accounts.config.request_counter,
    )?;

    emit!(RandomnessRequested {
        raffle: ctx.accounts.raffle.key(),
        raffle_id: ctx.accounts.raffle.id,
        request_id,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct ForceDraw<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    pub management_authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}
