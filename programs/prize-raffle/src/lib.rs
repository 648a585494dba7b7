use anchor_lang::prelude::*;
use instructions::*;

pub mod custody;
pub mod draw;
pub mod entries;
pub mod error;
pub mod instructions;
pub mod pricing;
pub mod selection;
pub mod settlement;
pub mod state;

#[cfg(test)]
mod test_utils;

use entries::EntryOption;
use state::RaffleParams;

declare_id!("o5ArHo59R9px575uwW3xzghqsDpfSctvNDonrjkq3tL");

#[program]
pub mod prize_raffle {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        instructions::init_config::init_config(ctx)
    }

    pub fn create_raffle(ctx: Context<CreateRaffle>, params: RaffleParams) -> Result<()> {
        instructions::create_raffle::create_raffle(ctx, params)
    }

    pub fn deposit_prizes<'info>(
        ctx: Context<'_, '_, '_, 'info, DepositPrizes<'info>>,
        native_amount: u64,
    ) -> Result<()> {
        instructions::deposit_prizes::deposit_prizes(ctx, native_amount)
    }

    pub fn init_participant(ctx: Context<InitParticipant>) -> Result<()> {
        instructions::init_participant::init_participant(ctx)
    }

    pub fn enter_raffle(
        ctx: Context<EnterRaffle>,
        options: Vec<EntryOption>,
        tendered: u64,
    ) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx, options, tendered)
    }

    pub fn force_draw(ctx: Context<ForceDraw>) -> Result<()> {
        instructions::force_draw::force_draw(ctx)
    }

    pub fn fulfill_randomness(
        ctx: Context<FulfillRandomness>,
        request_id: u64,
        random_value: [u8; 32],
    ) -> Result<()> {
        instructions::fulfill_randomness::fulfill_randomness(ctx, request_id, random_value)
    }

    pub fn claim_prizes<'info>(
        ctx: Context<'_, '_, '_, 'info, ClaimPrizes<'info>>,
        tier_indices: Vec<u8>,
    ) -> Result<()> {
        instructions::claim_prizes::claim_prizes(ctx, tier_indices)
    }

    pub fn cancel_raffle(ctx: Context<CancelRaffle>) -> Result<()> {
        instructions::cancel_raffle::cancel_raffle(ctx)
    }

    pub fn withdraw_prizes<'info>(
        ctx: Context<'_, '_, '_, 'info, WithdrawPrizes<'info>>,
    ) -> Result<()> {
        instructions::withdraw_prizes::withdraw_prizes(ctx)
    }

    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        instructions::claim_refund::claim_refund(ctx)
    }

    pub fn withdraw_revenue(ctx: Context<WithdrawRevenue>) -> Result<()> {
        instructions::withdraw_revenue::withdraw_revenue(ctx)
    }
}
