use tracing::{error, info, instrument};

use crate::actors::{CatalogService, LedgerService, NotificationService, OrderService};
use crate::clients::{CatalogClient, LedgerClient, LedgerReader, NotificationClient, OrderClient};
use crate::domain::LoyaltyLedger;
use crate::error::LedgerError;
use crate::purchase::PurchaseCoordinator;
use crate::reconcile;

const CHANNEL_CAPACITY: usize = 100;

/// The assembled purchase and loyalty system.
///
/// Starts every service task, wires the coordinator, and hands out the
/// capability each layer is allowed to hold: the coordinator keeps ledger
/// write access, everything public here is read-only or append-free.
pub struct RewardsSystem {
    pub purchases: PurchaseCoordinator,
    pub catalog: CatalogClient,
    pub orders: OrderClient,
    pub ledger: LedgerReader,
    pub notifications: NotificationClient,
    pub(crate) ledger_writer: LedgerClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for RewardsSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardsSystem {
    /// Create and start the entire system.
    ///
    /// Collaborator services start first, then the coordinator is wired with
    /// their clients.
    #[instrument(name = "rewards_system")]
    pub fn new() -> Self {
        let mut handles = Vec::new();

        info!("Starting rewards system");

        let (catalog_service, catalog_client) = CatalogService::new(CHANNEL_CAPACITY);
        handles.push(tokio::spawn(catalog_service.run()));

        let (order_service, order_client) = OrderService::new(CHANNEL_CAPACITY);
        handles.push(tokio::spawn(order_service.run()));

        let (ledger_service, ledger_client) = LedgerService::new(CHANNEL_CAPACITY);
        handles.push(tokio::spawn(ledger_service.run()));

        let (notification_service, notification_client) =
            NotificationService::new(CHANNEL_CAPACITY);
        handles.push(tokio::spawn(notification_service.run()));

        let purchases = PurchaseCoordinator::new(
            catalog_client.clone(),
            order_client.clone(),
            ledger_client.clone(),
            notification_client.clone(),
        );

        info!("Rewards system started successfully");

        Self {
            purchases,
            catalog: catalog_client,
            orders: order_client,
            ledger: LedgerReader::new(ledger_client.clone()),
            notifications: notification_client,
            ledger_writer: ledger_client,
            handles,
        }
    }

    /// Recompute one customer's ledger from their recorded orders, repairing
    /// the aftermath of an [`Integrity`] failure.
    ///
    /// [`Integrity`]: crate::error::PurchaseError::Integrity
    #[instrument(skip(self))]
    pub async fn reconcile(&self, customer_id: &str) -> Result<LoyaltyLedger, LedgerError> {
        reconcile::reconcile_customer(&self.orders, &self.ledger_writer, customer_id).await
    }

    /// Gracefully shut down every service task.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down rewards system");

        let _ = self.catalog.shutdown().await;
        let _ = self.orders.shutdown().await;
        let _ = self.ledger_writer.shutdown().await;
        self.notifications.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
            }
        }

        info!("Rewards system shutdown complete");
        Ok(())
    }
}
