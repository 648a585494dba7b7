use anchor_lang::prelude::*;

use crate::{
    custody::AssetCustodian,
    error::RaffleError,
    state::{ParticipantStats, Prize, Raffle, RaffleStatus},
};

fn token_prizes(raffle: &Raffle) -> impl Iterator<Item = &Prize> {
    raffle
        .prize_tiers
        .iter()
        .flat_map(|tier| tier.prizes.iter())
        .filter(|prize| !prize.is_native())
}

/// Moves every prize of a freshly created raffle into custody.
///
/// Native prizes are locked as one lump of `native_amount`, which must match their
/// sum exactly. Token prizes follow one by one in tier order.
pub fn deposit_prizes<C: AssetCustodian>(
    raffle: &mut Raffle,
    is_operator: bool,
    depositor: &Pubkey,
    native_amount: u64,
    custodian: &mut C,
) -> Result<()> {
    require!(is_operator, RaffleError::NotOperator);
    raffle.ensure_status(&[RaffleStatus::Open])?;
    require!(!raffle.prizes_deposited, RaffleError::PrizesAlreadyDeposited);
    require!(
        native_amount == raffle.native_prize_total()?,
        RaffleError::IncorrectPayment
    );

    if native_amount > 0 {
        let held_before = custodian.balance_held()?;
        custodian.lock(&Prize::native(native_amount), depositor)?;
        require!(
            custodian.balance_held()?
                == held_before
                    .checked_add(native_amount)
                    .ok_or(RaffleError::Overflow)?,
            RaffleError::TransferFailed
        );
    }
    for prize in token_prizes(raffle) {
        custodian.lock(prize, depositor)?;
    }

    raffle.mark_prizes_deposited()
}

/// Pays out the prizes of the given tiers to their winner.
///
/// All indices are validated before any asset moves, so a bad index anywhere in
/// the list leaves every tier untouched.
pub fn claim_prizes<C: AssetCustodian>(
    raffle: &mut Raffle,
    claimant: &Pubkey,
    tier_indices: &[u8],
    custodian: &mut C,
) -> Result<()> {
    raffle.ensure_status(&[RaffleStatus::Drawn, RaffleStatus::Complete])?;
    require!(!tier_indices.is_empty(), RaffleError::InvalidCount);

    for (position, &index) in tier_indices.iter().enumerate() {
        let winner = raffle
            .winners
            .get(index as usize)
            .ok_or(RaffleError::InvalidIndex)?;
        require_keys_eq!(winner.participant, *claimant, RaffleError::NotWinner);
        require!(
            !winner.claimed && !tier_indices[..position].contains(&index),
            RaffleError::AlreadyClaimed
        );
    }

    for &index in tier_indices {
        for prize in &raffle.prize_tiers[index as usize].prizes {
            custodian.release(prize, claimant)?;
        }
    }

    raffle.mark_claimed(tier_indices)?;
    msg!("Raffle {} paid out tiers {:?}", raffle.id, tier_indices);
    Ok(())
}

/// Returns deposited prizes of a cancelled raffle to its owner.
///
/// Returns `false` when there was nothing left to move.
pub fn withdraw_prizes<C: AssetCustodian>(
    raffle: &mut Raffle,
    is_operator: bool,
    custodian: &mut C,
) -> Result<bool> {
    require!(is_operator, RaffleError::NotOperator);
    raffle.ensure_status(&[RaffleStatus::Cancelled])?;
    if !raffle.prizes_deposited {
        return Ok(false);
    }

    let owner = raffle.owner;
    let native_amount = raffle.native_prize_total()?;
    if native_amount > 0 {
        custodian.release(&Prize::native(native_amount), &owner)?;
    }
    for prize in token_prizes(raffle) {
        custodian.release(prize, &owner)?;
    }

    raffle.mark_prizes_returned()?;
    Ok(true)
}

/// Refunds everything a participant paid into a cancelled raffle. Returns the amount.
pub fn claim_refund<C: AssetCustodian>(
    raffle: &Raffle,
    stats: &mut ParticipantStats,
    claimant: &Pubkey,
    custodian: &mut C,
) -> Result<u64> {
    raffle.ensure_status(&[RaffleStatus::Cancelled])?;
    require_keys_eq!(stats.owner, *claimant, RaffleError::OwnerMismatch);
    require!(!stats.refunded, RaffleError::AlreadyRefunded);
    require!(stats.amount_paid > 0, RaffleError::NoEntriesOwned);

    let amount = stats.amount_paid;
    custodian.release(&Prize::native(amount), claimant)?;
    stats.refunded = true;
    Ok(amount)
}

/// Pays the entry revenue of a drawn raffle to the payout authority. Returns the amount.
pub fn withdraw_revenue<C: AssetCustodian>(
    raffle: &mut Raffle,
    is_operator: bool,
    payout: &Pubkey,
    custodian: &mut C,
) -> Result<u64> {
    require!(is_operator, RaffleError::NotOperator);
    raffle.mark_revenue_withdrawn()?;

    let amount = raffle.revenue;
    if amount > 0 {
        custodian.release(&Prize::native(amount), payout)?;
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::state::Winner;
    use crate::test_utils::{error_code, sample_params};

    #[derive(Default)]
    struct Ledger {
        held: u64,
        moves: Vec<(bool, Prize, Pubkey)>,
        paid_out: HashMap<Pubkey, u64>,
    }

    impl AssetCustodian for Ledger {
        fn lock(&mut self, asset: &Prize, from: &Pubkey) -> Result<()> {
            if asset.is_native() {
                self.held += asset.amount;
            }
            self.moves.push((true, *asset, *from));
            Ok(())
        }

        fn release(&mut self, asset: &Prize, to: &Pubkey) -> Result<()> {
            if asset.is_native() {
                self.held = self
                    .held
                    .checked_sub(asset.amount)
                    .ok_or(RaffleError::TransferFailed)?;
                *self.paid_out.entry(*to).or_default() += asset.amount;
            }
            self.moves.push((false, *asset, *to));
            Ok(())
        }

        fn balance_held(&self) -> Result<u64> {
            Ok(self.held)
        }
    }

    fn deposited_raffle(custodian: &mut Ledger) -> Raffle {
        let owner = Pubkey::new_unique();
        let mut raffle = Raffle::open(2, owner, Pubkey::new_unique(), sample_params(1_000), 0, 255);
        deposit_prizes(&mut raffle, true, &owner, 10_000_000_000_000, custodian).unwrap();
        raffle
    }

    fn drawn_raffle(custodian: &mut Ledger, winners: [Pubkey; 3]) -> Raffle {
        let mut raffle = deposited_raffle(custodian);
        raffle.record_sale(500, 1_000).unwrap();
        raffle.begin_drawing(1).unwrap();
        let winners = winners
            .iter()
            .enumerate()
            .map(|(tier, participant)| Winner {
                tier_index: tier as u8,
                participant: *participant,
                entry_index: tier as u64,
                claimed: false,
            })
            .collect();
        raffle.settle_draw(1, [0; 32], winners).unwrap();
        raffle
    }

    #[test]
    fn deposit_locks_every_prize_once() {
        let mut custodian = Ledger::default();
        let mut raffle = deposited_raffle(&mut custodian);
        assert!(raffle.prizes_deposited);
        assert_eq!(custodian.held, 10_000_000_000_000);
        // one native lump and three token prizes
        assert_eq!(custodian.moves.len(), 4);

        let owner = raffle.owner;
        assert_eq!(
            error_code(
                deposit_prizes(&mut raffle, true, &owner, 10_000_000_000_000, &mut custodian)
                    .unwrap_err()
            ),
            u32::from(RaffleError::PrizesAlreadyDeposited)
        );
    }

    #[test]
    fn deposit_requires_exact_native_amount() {
        let mut custodian = Ledger::default();
        let owner = Pubkey::new_unique();
        let mut raffle = Raffle::open(2, owner, Pubkey::new_unique(), sample_params(1_000), 0, 255);
        assert_eq!(
            error_code(deposit_prizes(&mut raffle, true, &owner, 1, &mut custodian).unwrap_err()),
            u32::from(RaffleError::IncorrectPayment)
        );
        assert_eq!(
            error_code(
                deposit_prizes(&mut raffle, false, &owner, 10_000_000_000_000, &mut custodian)
                    .unwrap_err()
            ),
            u32::from(RaffleError::NotOperator)
        );
        assert!(custodian.moves.is_empty());
        assert!(!raffle.prizes_deposited);
    }

    #[test]
    fn claim_moves_only_the_claimed_tier() {
        let mut custodian = Ledger::default();
        let (alice, bob) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut raffle = drawn_raffle(&mut custodian, [alice, bob, alice]);
        custodian.moves.clear();

        claim_prizes(&mut raffle, &bob, &[1], &mut custodian).unwrap();
        assert_eq!(custodian.moves.len(), 2);
        assert!(custodian.moves.iter().all(|(locked, _, to)| !locked && *to == bob));
        assert!(raffle.winners[1].claimed);
        assert!(!raffle.winners[0].claimed && !raffle.winners[2].claimed);

        assert_eq!(
            error_code(claim_prizes(&mut raffle, &bob, &[1], &mut custodian).unwrap_err()),
            u32::from(RaffleError::AlreadyClaimed)
        );
        assert_eq!(
            error_code(claim_prizes(&mut raffle, &bob, &[0], &mut custodian).unwrap_err()),
            u32::from(RaffleError::NotWinner)
        );
        assert_eq!(custodian.moves.len(), 2);

        claim_prizes(&mut raffle, &alice, &[0, 2], &mut custodian).unwrap();
        assert_eq!(raffle.status, RaffleStatus::Complete);
        assert_eq!(custodian.paid_out[&alice], 10_000_000_000_000);
        assert_eq!(custodian.held, 0);
    }

    #[test]
    fn invalid_claim_list_moves_nothing() {
        let mut custodian = Ledger::default();
        let alice = Pubkey::new_unique();
        let mut raffle = drawn_raffle(&mut custodian, [alice; 3]);
        custodian.moves.clear();

        assert_eq!(
            error_code(claim_prizes(&mut raffle, &alice, &[0, 0], &mut custodian).unwrap_err()),
            u32::from(RaffleError::AlreadyClaimed)
        );
        assert_eq!(
            error_code(claim_prizes(&mut raffle, &alice, &[2, 3], &mut custodian).unwrap_err()),
            u32::from(RaffleError::InvalidIndex)
        );
        assert!(custodian.moves.is_empty());
        assert!(raffle.winners.iter().all(|winner| !winner.claimed));
    }

    #[test]
    fn revenue_is_paid_once_after_the_draw() {
        let mut custodian = Ledger::default();
        let mut raffle = drawn_raffle(&mut custodian, [Pubkey::new_unique(); 3]);
        custodian.held += raffle.revenue;
        let payout = Pubkey::new_unique();

        assert_eq!(
            withdraw_revenue(&mut raffle, true, &payout, &mut custodian).unwrap(),
            1_000
        );
        assert_eq!(custodian.paid_out[&payout], 1_000);
        assert_eq!(
            error_code(withdraw_revenue(&mut raffle, true, &payout, &mut custodian).unwrap_err()),
            u32::from(RaffleError::RevenueAlreadyWithdrawn)
        );
    }

    #[test]
    fn refund_requires_cancelled_raffle_and_matching_owner() {
        let mut custodian = Ledger::default();
        let mut raffle = deposited_raffle(&mut custodian);
        let alice = Pubkey::new_unique();
        let mut stats = ParticipantStats::new(alice, 1);
        stats.entries = 10;
        stats.amount_paid = 700;
        custodian.held += 700;

        assert_eq!(
            error_code(claim_refund(&raffle, &mut stats, &alice, &mut custodian).unwrap_err()),
            u32::from(RaffleError::InvalidRaffleStatus)
        );

        raffle.cancel(true, raffle.cutoff_time).unwrap();
        assert_eq!(
            error_code(
                claim_refund(&raffle, &mut stats, &Pubkey::new_unique(), &mut custodian)
                    .unwrap_err()
            ),
            u32::from(RaffleError::OwnerMismatch)
        );
        assert_eq!(claim_refund(&raffle, &mut stats, &alice, &mut custodian).unwrap(), 700);
        assert_eq!(
            error_code(claim_refund(&raffle, &mut stats, &alice, &mut custodian).unwrap_err()),
            u32::from(RaffleError::AlreadyRefunded)
        );

        let bob = Pubkey::new_unique();
        let mut empty = ParticipantStats::new(bob, 1);
        assert_eq!(
            error_code(claim_refund(&raffle, &mut empty, &bob, &mut custodian).unwrap_err()),
            u32::from(RaffleError::NoEntriesOwned)
        );
    }

    #[test]
    fn withdraw_prizes_is_idempotent() {
        let mut custodian = Ledger::default();
        let mut raffle = deposited_raffle(&mut custodian);
        raffle.cancel(true, raffle.cutoff_time).unwrap();
        custodian.moves.clear();

        assert!(withdraw_prizes(&mut raffle, true, &mut custodian).unwrap());
        assert_eq!(custodian.moves.len(), 4);
        assert_eq!(custodian.paid_out[&raffle.owner], 10_000_000_000_000);

        assert!(!withdraw_prizes(&mut raffle, true, &mut custodian).unwrap());
        assert_eq!(custodian.moves.len(), 4);
    }
}
