use anchor_lang::{error::Error, prelude::Pubkey};

use crate::state::{PricingOption, Prize, PrizeKind, PrizeTier, RaffleParams};

pub fn error_code(err: Error) -> u32 {
    match err {
        Error::AnchorError(err) => err.error_code_number,
        Error::ProgramError(err) => panic!("expected a raffle error, got {err:?}"),
    }
}

/// Two pricing tiers and three prize tiers: an NFT, an NFT with a token bundle, and lamports.
pub fn sample_params(cutoff_time: i64) -> RaffleParams {
    RaffleParams {
        cutoff_time,
        is_minimum_entries_fixed: true,
        minimum_entries: 500,
        maximum_entries_per_participant: 500,
        pricing_options: vec![
            PricingOption {
                price: 1_000_000_000_000,
                entry_count: 10,
            },
            PricingOption {
                price: 1_700_000_000_000,
                entry_count: 20,
            },
        ],
        prize_tiers: vec![
            PrizeTier {
                prizes: vec![Prize {
                    kind: PrizeKind::SingleUnit,
                    mint: Pubkey::new_unique(),
                    amount: 1,
                }],
            },
            PrizeTier {
                prizes: vec![
                    Prize {
                        kind: PrizeKind::MultiUnit,
                        mint: Pubkey::new_unique(),
                        amount: 1,
                    },
                    Prize {
                        kind: PrizeKind::SingleUnit,
                        mint: Pubkey::new_unique(),
                        amount: 1,
                    },
                ],
            },
            PrizeTier {
                prizes: vec![Prize::native(10_000_000_000_000)],
            },
        ],
    }
}
