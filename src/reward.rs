//! Loyalty reward policy.
//!
//! Pure function over ledger state: earning is always a single point, and a
//! threshold crossing redeems exactly one reward.

use crate::domain::LoyaltyLedger;

/// Points required for a free-item reward.
pub const REWARD_THRESHOLD: u32 = 10;

/// Result of applying one earn event to a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarnOutcome {
    pub ledger: LoyaltyLedger,
    pub reward_granted: bool,
}

/// Applies a one-point earn event to `state`.
///
/// Increments are always +1, so the balance crosses the threshold at most
/// once per event and never overshoots.
pub fn apply_earn(state: &LoyaltyLedger) -> EarnOutcome {
    let mut ledger = state.clone();
    ledger.total_earned += 1;
    ledger.points += 1;

    let reward_granted = ledger.points >= REWARD_THRESHOLD;
    if reward_granted {
        ledger.points -= REWARD_THRESHOLD;
        ledger.rewards_redeemed += 1;
    }

    EarnOutcome {
        ledger,
        reward_granted,
    }
}
