pub mod cancel_raffle;
pub mod claim_prizes;
pub mod claim_refund;
pub mod create_raffle;
pub mod deposit_prizes;
pub mod enter_raffle;
pub mod force_draw;
pub mod fulfill_randomness;
pub mod init_config;
pub mod init_participant;
pub mod withdraw_prizes;
pub mod withdraw_revenue;

pub use cancel_raffle::*;
pub use claim_prizes::*;
pub use claim_refund::*;
pub use create_raffle::*;
pub use deposit_prizes::*;
pub use enter_raffle::*;
pub use force_draw::*;
pub use fulfill_randomness::*;
pub use init_config::*;
pub use init_participant::*;
pub use withdraw_prizes::*;
pub use withdraw_revenue::*;
