use anchor_lang::prelude::*;

// 8 discriminator + 32 owner + 8 entries + 8 amount_paid + 1 refunded + 1 bump
pub const PARTICIPANT_STATS_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 8 + 1 + 1;

/// Running totals for one participant in one raffle.
#[account]
pub struct ParticipantStats {
    pub owner: Pubkey,
    pub entries: u64,
    /// Lamports tendered across every purchase, refunded in full on cancellation
    pub amount_paid: u64,
    pub refunded: bool,
    pub bump: u8,
}

impl ParticipantStats {
    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            owner,
            entries: 0,
            amount_paid: 0,
            refunded: false,
            bump,
        }
    }
}
