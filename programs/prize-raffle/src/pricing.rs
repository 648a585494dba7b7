use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{
        PricingOption, PrizeKind, PrizeTier, RaffleParams, MAX_PRICING_OPTIONS, MAX_PRIZES_PER_TIER,
        MAX_PRIZE_TIERS,
    },
};

/// Validates a raffle configuration before it is stored.
///
/// The cutoff is checked first, then pricing, entry limits and prizes. Entry limits
/// are part of the pricing setup and fail as `InvalidPricingOption`. Nothing is
/// mutated; a failure leaves no trace.
pub fn validate_raffle_params(params: &RaffleParams, now: i64) -> Result<()> {
    require!(params.cutoff_time > now, RaffleError::InvalidCutoffTime);

    validate_pricing_options(&params.pricing_options)?;

    require!(params.minimum_entries >= 1, RaffleError::InvalidPricingOption);
    let largest_unit = params
        .pricing_options
        .last()
        .map_or(0, |option| option.entry_count);
    require!(
        params.maximum_entries_per_participant >= largest_unit,
        RaffleError::InvalidPricingOption
    );

    validate_prize_tiers(&params.prize_tiers)
}

/// Entry counts must strictly increase and unit prices strictly decrease.
///
/// Unit prices are compared by cross-multiplying in u128 so no fractional
/// rounding can make two different deals look equal, or two equal ones different.
pub fn validate_pricing_options(options: &[PricingOption]) -> Result<()> {
    require!(
        !options.is_empty() && options.len() <= MAX_PRICING_OPTIONS,
        RaffleError::InvalidPricingOption
    );
    require!(options[0].entry_count > 0, RaffleError::InvalidPricingOption);

    for pair in options.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        require!(
            b.entry_count > a.entry_count,
            RaffleError::InvalidPricingOption
        );
        let b_scaled = b.price as u128 * a.entry_count as u128;
        let a_scaled = a.price as u128 * b.entry_count as u128;
        require!(b_scaled < a_scaled, RaffleError::InvalidPricingOption);
    }
    Ok(())
}

fn validate_prize_tiers(tiers: &[PrizeTier]) -> Result<()> {
    require!(
        !tiers.is_empty() && tiers.len() <= MAX_PRIZE_TIERS,
        RaffleError::InvalidPrizesCount
    );
    for tier in tiers {
        require!(
            !tier.prizes.is_empty() && tier.prizes.len() <= MAX_PRIZES_PER_TIER,
            RaffleError::InvalidPrizesCount
        );
        for prize in &tier.prizes {
            require!(prize.amount > 0, RaffleError::InvalidPrize);
            match prize.kind {
                PrizeKind::Native => {
                    require_keys_eq!(prize.mint, Pubkey::default(), RaffleError::InvalidPrize)
                }
                PrizeKind::SingleUnit => require!(prize.amount == 1, RaffleError::InvalidPrize),
                PrizeKind::MultiUnit => {}
            }
        }
    }
    Ok(())
}
