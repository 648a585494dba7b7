use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    selection,
    state::{EntryRecords, Raffle, Winner},
};

fn next_request_id(request_counter: &mut u64) -> Result<u64> {
    *request_counter = request_counter
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;
    Ok(*request_counter)
}

/// Requests randomness if a fixed-minimum raffle just sold out.
///
/// Returns `None` when no draw is due, including when one was already requested.
pub fn request_draw_if_due(
    raffle: &mut Raffle,
    request_counter: &mut u64,
) -> Result<Option<u64>> {
    if !raffle.draw_due() {
        return Ok(None);
    }
    let request_id = next_request_id(request_counter)?;
    raffle.begin_drawing(request_id)?;
    msg!("Raffle {} requested randomness {}", raffle.id, request_id);
    Ok(Some(request_id))
}

/// Operator-triggered draw for raffles without a fixed minimum.
pub fn force_draw(
    raffle: &mut Raffle,
    is_operator: bool,
    now: i64,
    request_counter: &mut u64,
) -> Result<u64> {
    require!(is_operator, RaffleError::NotOperator);
    raffle.ensure_force_drawable(now)?;
    let request_id = next_request_id(request_counter)?;
    raffle.begin_drawing(request_id)?;
    msg!("Raffle {} forced draw with request {}", raffle.id, request_id);
    Ok(request_id)
}

/// Consumes the random value for an outstanding request and settles the draw.
pub fn on_fulfilled(
    raffle: &mut Raffle,
    records: &EntryRecords,
    request_id: u64,
    random_value: [u8; 32],
) -> Result<Vec<Winner>> {
    raffle.ensure_pending_request(request_id)?;
    let winners = selection::select_winners(raffle, records, &random_value)?;
    raffle.settle_draw(request_id, random_value, winners.clone())?;
    Ok(winners)
}
