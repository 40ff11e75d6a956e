//! Ledger reconciliation from order history.
//!
//! When a purchase reports an integrity failure the order is durable but the
//! point is not. The sweep recomputes what the ledger should say from the
//! customer's recorded orders and commits the corrected state through the
//! same compare-and-swap path as a normal settlement.

use tracing::{info, instrument, warn};

use crate::clients::{LedgerClient, OrderClient};
use crate::domain::LoyaltyLedger;
use crate::error::LedgerError;
use crate::reward::REWARD_THRESHOLD;

const RECONCILE_RETRY_LIMIT: u32 = 5;

/// Expected ledger state for a customer with `purchases` recorded orders.
fn expected_state(customer_id: &str, purchases: usize) -> LoyaltyLedger {
    let total = purchases as u32;
    LoyaltyLedger {
        customer_id: customer_id.to_string(),
        points: total % REWARD_THRESHOLD,
        total_earned: total,
        rewards_redeemed: total / REWARD_THRESHOLD,
    }
}

/// Recomputes one customer's ledger from their order history and commits the
/// corrected state. The order count is re-read on every attempt so purchases
/// that settle mid-sweep are never undone.
#[instrument(skip(orders, ledger))]
pub(crate) async fn reconcile_customer(
    orders: &OrderClient,
    ledger: &LedgerClient,
    customer_id: &str,
) -> Result<LoyaltyLedger, LedgerError> {
    for attempt in 1..=RECONCILE_RETRY_LIMIT {
        let recorded = orders
            .count_orders(customer_id.to_string())
            .await
            .map_err(|e| LedgerError::ActorCommunicationError(e.to_string()))?;

        let current = ledger.create_if_absent(customer_id.to_string()).await?;
        let expected = expected_state(customer_id, recorded);

        if current.state == expected {
            info!(recorded, "Ledger already consistent with order history");
            return Ok(current.state);
        }

        match ledger
            .compare_and_swap(customer_id.to_string(), current.version, expected)
            .await
        {
            Ok(committed) => {
                info!(
                    recorded,
                    points = committed.state.points,
                    rewards_redeemed = committed.state.rewards_redeemed,
                    "Ledger reconciled from order history"
                );
                return Ok(committed.state);
            }
            Err(LedgerError::VersionConflict(_)) => {
                warn!(attempt, "Ledger moved during reconciliation, retrying");
            }
            Err(other) => return Err(other),
        }
    }

    Err(LedgerError::VersionConflict(customer_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_state_settles_rewards() {
        let state = expected_state("customer_1", 23);
        assert_eq!(state.points, 3);
        assert_eq!(state.total_earned, 23);
        assert_eq!(state.rewards_redeemed, 2);
    }
}
