use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    #[msg("Cutoff time must be in the future")]
    InvalidCutoffTime,
    #[msg("Pricing options must grow in entry count and shrink in unit price")]
    InvalidPricingOption,
    #[msg("Invalid number of prize tiers or prizes in a tier")]
    InvalidPrizesCount,
    #[msg("Invalid prize definition")]
    InvalidPrize,
    #[msg("Raffle is not in the required status for this operation")]
    InvalidRaffleStatus,
    #[msg("Unknown or already consumed randomness request")]
    InvalidRequestId,
    #[msg("Raffle reached its minimum entries and cannot be cancelled")]
    RaffleNotEligibleForCancellation,
    #[msg("Raffle cutoff time has been reached")]
    CutoffTimeReached,
    #[msg("Raffle cutoff time has not been reached yet")]
    CutoffTimeNotReached,
    #[msg("Prizes have not been deposited for this raffle")]
    PrizesNotDeposited,
    #[msg("Prizes were already deposited for this raffle")]
    PrizesAlreadyDeposited,
    #[msg("Not enough entries sold to draw winners")]
    InsufficientEntries,
    #[msg("Purchase exceeds the maximum entries per participant")]
    MaximumEntriesExceeded,
    #[msg("Purchase exceeds the fixed number of entries. Please buy fewer entries.")]
    EntriesOversold,
    #[msg("Tendered payment does not match the price of the entries")]
    IncorrectPayment,
    InvalidIndex,
    InvalidCount,
    #[msg("Entry ledger has no allocated slot for another record")]
    EntryLedgerFull,
    #[msg("Only the raffle operator can perform this action")]
    NotOperator,
    #[msg("Only the randomness provider can fulfill draws")]
    NotRandomnessProvider,
    #[msg("Only the winner of a tier can claim its prizes")]
    NotWinner,
    OwnerMismatch,
    #[msg("Prize tier has already been claimed")]
    AlreadyClaimed,
    #[msg("Refund has already been claimed")]
    AlreadyRefunded,
    NoEntriesOwned,
    #[msg("Entry revenue has already been withdrawn")]
    RevenueAlreadyWithdrawn,
    #[msg("Prize account does not match the prize or the raffle treasury")]
    InvalidPrizeAccount,
    #[msg("Treasury transfer failed")]
    TransferFailed,
}
