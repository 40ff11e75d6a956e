//! The purchase transaction: order recording plus loyalty settlement.

use tracing::{error, info, instrument, warn};

use crate::auth::AuthContext;
use crate::clients::{CatalogClient, LedgerClient, NotificationClient, OrderClient};
use crate::domain::{LoyaltyLedger, Order, OrderLine};
use crate::error::{LedgerError, OrderError, PurchaseError};
use crate::reward;

/// Bounded attempts for the read-policy-write cycle when concurrent
/// purchases by the same customer collide on the ledger version.
pub(crate) const LEDGER_RETRY_LIMIT: u32 = 5;

/// Outcome of a settled purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOutcome {
    pub order: Order,
    pub new_points: u32,
    pub reward_granted: bool,
}

/// Coordinates the purchase transaction across the catalog, order recorder,
/// and ledger store.
///
/// This is the only holder of ledger write access: presentation code sees
/// the ledger through `LedgerReader` and orders through the read methods of
/// `OrderClient`, so every loyalty mutation funnels through [`purchase`].
///
/// [`purchase`]: PurchaseCoordinator::purchase
#[derive(Clone)]
pub struct PurchaseCoordinator {
    catalog: CatalogClient,
    orders: OrderClient,
    ledger: LedgerClient,
    notifications: NotificationClient,
}

impl PurchaseCoordinator {
    pub(crate) fn new(
        catalog: CatalogClient,
        orders: OrderClient,
        ledger: LedgerClient,
        notifications: NotificationClient,
    ) -> Self {
        Self {
            catalog,
            orders,
            ledger,
            notifications,
        }
    }

    /// Records one purchase for the authenticated customer: the order and
    /// its line item, then one loyalty point, redeeming a reward when the
    /// balance crosses the threshold.
    ///
    /// Failures before the order commits are [`PurchaseError::Transient`]
    /// and safe to retry from the caller side. A ledger failure after the
    /// order commits surfaces as [`PurchaseError::Integrity`] so the
    /// recorded order is never paired with a silently dropped point.
    #[instrument(fields(product_id = %product_id), skip(self, auth))]
    pub async fn purchase(
        &self,
        auth: &AuthContext,
        product_id: &str,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let Some(customer_id) = auth.current_principal() else {
            warn!("Purchase attempt without authenticated customer");
            return Err(PurchaseError::Unauthenticated);
        };
        let customer_id = customer_id.to_string();

        // Step 1: capture the price now; the order line never re-reads it.
        let product = self
            .catalog
            .get_product(product_id.to_string())
            .await
            .map_err(|e| PurchaseError::Transient(e.to_string()))?
            .ok_or_else(|| PurchaseError::ProductUnavailable(product_id.to_string()))?;

        if !product.available || product.price_cents <= 0 {
            info!(
                available = product.available,
                price_cents = product.price_cents,
                "Product not purchasable"
            );
            return Err(PurchaseError::ProductUnavailable(product_id.to_string()));
        }

        // Step 2: record the order. From here on a failure is an integrity
        // failure, not a transient one.
        let line = OrderLine {
            product_id: product.id.clone(),
            quantity: 1,
            unit_price_cents: product.price_cents,
        };
        let order = self
            .orders
            .create_order(customer_id.clone(), vec![line])
            .await
            .map_err(|e| match e {
                OrderError::InvalidInput(msg) => PurchaseError::InvalidInput(msg),
                other => PurchaseError::Transient(other.to_string()),
            })?;

        // Steps 3 and 4: settle the ledger against the recorded order.
        let (ledger, reward_granted) = match self.settle_ledger(&customer_id).await {
            Ok(settled) => settled,
            Err(reason) => {
                error!(
                    order_id = %order.id,
                    customer_id = %customer_id,
                    %reason,
                    "Order recorded but ledger settlement failed, flagged for reconciliation"
                );
                return Err(PurchaseError::Integrity {
                    order_id: order.id,
                    reason,
                });
            }
        };

        info!(
            order_id = %order.id,
            new_points = ledger.points,
            reward_granted,
            "Purchase settled"
        );

        if reward_granted {
            self.notifications
                .broadcast(format!(
                    "Congratulations {customer_id}, you've earned a free coffee!"
                ))
                .await;
        }

        Ok(PurchaseOutcome {
            order,
            new_points: ledger.points,
            reward_granted,
        })
    }

    /// Bounded read-policy-write cycle against the ledger store.
    ///
    /// A version conflict means a concurrent purchase by the same customer
    /// committed first; the cycle re-reads and retries without touching the
    /// already-recorded order.
    async fn settle_ledger(&self, customer_id: &str) -> Result<(LoyaltyLedger, bool), String> {
        let mut current = self
            .ledger
            .create_if_absent(customer_id.to_string())
            .await
            .map_err(|e| e.to_string())?;

        for attempt in 1..=LEDGER_RETRY_LIMIT {
            let outcome = reward::apply_earn(&current.state);
            match self
                .ledger
                .compare_and_swap(customer_id.to_string(), current.version, outcome.ledger)
                .await
            {
                Ok(committed) => return Ok((committed.state, outcome.reward_granted)),
                Err(LedgerError::VersionConflict(_)) => {
                    warn!(attempt, "Ledger version conflict during settlement");
                    if attempt == LEDGER_RETRY_LIMIT {
                        break;
                    }
                    current = self
                        .ledger
                        .get(customer_id.to_string())
                        .await
                        .map_err(|e| e.to_string())?
                        .ok_or_else(|| format!("ledger row missing for customer {customer_id}"))?;
                }
                Err(other) => return Err(other.to_string()),
            }
        }

        Err(format!(
            "ledger contention persisted after {LEDGER_RETRY_LIMIT} attempts"
        ))
    }
}
