use anchor_lang::prelude::*;

// 8 discriminator + 32 payout_authority + 32 management_authority + 32 randomness_authority
// + 32 upgrade_authority + 1 bump + 8 raffle_counter + 8 request_counter
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 32 + 32 + 32 + 32 + 1 + 8 + 8;

#[account]
pub struct Config {
    pub payout_authority: Pubkey,
    /// Operator allowed to create, fund, cancel and force-draw raffles
    pub management_authority: Pubkey,
    /// Oracle signer allowed to fulfill randomness requests
    pub randomness_authority: Pubkey,
    pub upgrade_authority: Pubkey,
    pub bump: u8,
    pub raffle_counter: u64,
    pub request_counter: u64,
}

impl Config {
    pub fn is_operator(&self, key: &Pubkey) -> bool {
        self.management_authority == *key
    }
}
