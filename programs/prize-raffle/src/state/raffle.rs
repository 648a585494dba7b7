use anchor_lang::prelude::*;

use crate::error::RaffleError;

pub const MAX_PRICING_OPTIONS: usize = 5;
pub const MAX_PRIZE_TIERS: usize = 10;
pub const MAX_PRIZES_PER_TIER: usize = 5;

/// Lifecycle of a raffle.
///
/// `Open -> Drawing -> Drawn -> Complete` on the happy path and `Open -> Cancelled`
/// when the minimum is never reached. `Complete` and `Cancelled` are terminal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum RaffleStatus {
    Open = 0,
    Drawing = 1,
    Drawn = 2,
    Complete = 3,
    Cancelled = 4,
}

/// Price of one bulk unit of entries.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct PricingOption {
    /// Lamports for one unit
    pub price: u64,
    /// Entries granted per unit
    pub entry_count: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum PrizeKind {
    Native = 0,
    /// NFT mint, always moved with an amount of 1
    SingleUnit = 1,
    /// Fungible or semi-fungible token mint
    MultiUnit = 2,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct Prize {
    pub kind: PrizeKind,
    /// Token mint, `Pubkey::default()` for native prizes
    pub mint: Pubkey,
    pub amount: u64,
}

impl Prize {
    pub fn native(amount: u64) -> Self {
        Self {
            kind: PrizeKind::Native,
            mint: Pubkey::default(),
            amount,
        }
    }

    pub fn is_native(&self) -> bool {
        self.kind == PrizeKind::Native
    }
}

/// One winner slot and the prizes it pays out.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug, InitSpace)]
pub struct PrizeTier {
    #[max_len(5)]
    pub prizes: Vec<Prize>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub struct Winner {
    pub tier_index: u8,
    pub participant: Pubkey,
    /// Drawn entry number, kept so the draw can be replayed
    pub entry_index: u64,
    pub claimed: bool,
}

/// Raffle configuration supplied by the operator at creation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, PartialEq, Eq, Debug)]
pub struct RaffleParams {
    pub cutoff_time: i64,
    pub is_minimum_entries_fixed: bool,
    pub minimum_entries: u64,
    pub maximum_entries_per_participant: u64,
    pub pricing_options: Vec<PricingOption>,
    pub prize_tiers: Vec<PrizeTier>,
}

#[account]
#[derive(InitSpace)]
pub struct Raffle {
    pub id: u64,
    /// Operator that created the raffle, receives prizes back on cancellation
    pub owner: Pubkey,
    pub treasury: Pubkey,
    pub status: RaffleStatus,
    pub cutoff_time: i64,
    pub is_minimum_entries_fixed: bool,
    pub minimum_entries: u64,
    pub maximum_entries_per_participant: u64,
    #[max_len(5)]
    pub pricing_options: Vec<PricingOption>,
    #[max_len(10)]
    pub prize_tiers: Vec<PrizeTier>,
    pub prizes_deposited: bool,
    pub entries_sold: u64,
    /// Lamports tendered for entries
    pub revenue: u64,
    pub revenue_withdrawn: bool,
    pub pending_request: Option<u64>,
    pub random_value: Option<[u8; 32]>,
    #[max_len(10)]
    pub winners: Vec<Winner>,
    pub created_at: i64,
    pub bump: u8,
}

impl Raffle {
    pub fn open(
        id: u64,
        owner: Pubkey,
        treasury: Pubkey,
        params: RaffleParams,
        now: i64,
        bump: u8,
    ) -> Self {
        Self {
            id,
            owner,
            treasury,
            status: RaffleStatus::Open,
            cutoff_time: params.cutoff_time,
            is_minimum_entries_fixed: params.is_minimum_entries_fixed,
            minimum_entries: params.minimum_entries,
            maximum_entries_per_participant: params.maximum_entries_per_participant,
            pricing_options: params.pricing_options,
            prize_tiers: params.prize_tiers,
            prizes_deposited: false,
            entries_sold: 0,
            revenue: 0,
            revenue_withdrawn: false,
            pending_request: None,
            random_value: None,
            winners: Vec::new(),
            created_at: now,
            bump,
        }
    }

    pub fn ensure_status(&self, allowed: &[RaffleStatus]) -> Result<()> {
        require!(
            allowed.contains(&self.status),
            RaffleError::InvalidRaffleStatus
        );
        Ok(())
    }

    pub fn ensure_accepting_entries(&self, now: i64) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Open])?;
        require!(now < self.cutoff_time, RaffleError::CutoffTimeReached);
        require!(self.prizes_deposited, RaffleError::PrizesNotDeposited);
        Ok(())
    }

    pub fn record_sale(&mut self, entries: u64, amount: u64) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Open])?;
        self.entries_sold = self
            .entries_sold
            .checked_add(entries)
            .ok_or(RaffleError::Overflow)?;
        self.revenue = self
            .revenue
            .checked_add(amount)
            .ok_or(RaffleError::Overflow)?;
        Ok(())
    }

    pub fn minimum_reached(&self) -> bool {
        self.entries_sold >= self.minimum_entries
    }

    /// A fixed-minimum raffle draws the moment its minimum is sold.
    pub fn draw_due(&self) -> bool {
        self.status == RaffleStatus::Open && self.is_minimum_entries_fixed && self.minimum_reached()
    }

    pub fn ensure_force_drawable(&self, now: i64) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Open])?;
        require!(
            !self.is_minimum_entries_fixed,
            RaffleError::InvalidRaffleStatus
        );
        require!(now >= self.cutoff_time, RaffleError::CutoffTimeNotReached);
        require!(self.minimum_reached(), RaffleError::InsufficientEntries);
        Ok(())
    }

    pub fn begin_drawing(&mut self, request_id: u64) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Open])?;
        require!(self.pending_request.is_none(), RaffleError::InvalidRaffleStatus);
        self.pending_request = Some(request_id);
        self.status = RaffleStatus::Drawing;
        Ok(())
    }

    pub fn ensure_pending_request(&self, request_id: u64) -> Result<()> {
        require!(
            self.status == RaffleStatus::Drawing && self.pending_request == Some(request_id),
            RaffleError::InvalidRequestId
        );
        Ok(())
    }

    pub fn settle_draw(
        &mut self,
        request_id: u64,
        random_value: [u8; 32],
        winners: Vec<Winner>,
    ) -> Result<()> {
        self.ensure_pending_request(request_id)?;
        require!(
            winners.len() == self.prize_tiers.len(),
            RaffleError::InvalidPrizesCount
        );
        self.pending_request = None;
        self.random_value = Some(random_value);
        self.winners = winners;
        self.status = RaffleStatus::Drawn;
        Ok(())
    }

    /// Cancels an open raffle that missed its minimum once the cutoff has passed.
    pub fn cancel(&mut self, is_operator: bool, now: i64) -> Result<()> {
        require!(is_operator, RaffleError::NotOperator);
        self.ensure_status(&[RaffleStatus::Open])?;
        require!(
            !self.minimum_reached(),
            RaffleError::RaffleNotEligibleForCancellation
        );
        require!(now >= self.cutoff_time, RaffleError::CutoffTimeNotReached);
        self.status = RaffleStatus::Cancelled;
        Ok(())
    }

    /// Flags the given tiers as claimed. Callers validate ownership first.
    pub fn mark_claimed(&mut self, tier_indices: &[u8]) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Drawn, RaffleStatus::Complete])?;
        for (position, &index) in tier_indices.iter().enumerate() {
            let winner = self
                .winners
                .get(index as usize)
                .ok_or(RaffleError::InvalidIndex)?;
            require!(
                !winner.claimed && !tier_indices[..position].contains(&index),
                RaffleError::AlreadyClaimed
            );
        }
        for &index in tier_indices {
            self.winners[index as usize].claimed = true;
        }
        if self.winners.iter().all(|winner| winner.claimed) {
            self.status = RaffleStatus::Complete;
        }
        Ok(())
    }

    pub fn mark_prizes_deposited(&mut self) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Open])?;
        require!(!self.prizes_deposited, RaffleError::PrizesAlreadyDeposited);
        self.prizes_deposited = true;
        Ok(())
    }

    pub fn mark_prizes_returned(&mut self) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Cancelled])?;
        self.prizes_deposited = false;
        Ok(())
    }

    pub fn mark_revenue_withdrawn(&mut self) -> Result<()> {
        self.ensure_status(&[RaffleStatus::Drawn, RaffleStatus::Complete])?;
        require!(!self.revenue_withdrawn, RaffleError::RevenueAlreadyWithdrawn);
        self.revenue_withdrawn = true;
        Ok(())
    }

    pub fn native_prize_total(&self) -> Result<u64> {
        self.prize_tiers
            .iter()
            .flat_map(|tier| tier.prizes.iter())
            .filter(|prize| prize.is_native())
            .try_fold(0u64, |total, prize| total.checked_add(prize.amount))
            .ok_or_else(|| RaffleError::Overflow.into())
    }

    pub fn pricing_option(&self, index: u8) -> Result<&PricingOption> {
        self.pricing_options
            .get(index as usize)
            .ok_or_else(|| RaffleError::InvalidIndex.into())
    }
}
