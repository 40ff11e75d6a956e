use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::LedgerClient;
use crate::domain::{LoyaltyLedger, VersionedLedger};
use crate::error::LedgerError;
use crate::messages::{LedgerRequest, ServiceResponse};

/// Keyed store of loyalty ledgers, one row per customer.
///
/// Compare-and-swap is the only write path for an existing row, and the
/// serialized message loop makes each request atomic with respect to every
/// other. Readers never observe a row mid-write.
pub struct LedgerService {
    receiver: mpsc::Receiver<LedgerRequest>,
    ledgers: HashMap<String, VersionedLedger>,
}

impl LedgerService {
    pub fn new(buffer_size: usize) -> (Self, LedgerClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            ledgers: HashMap::new(),
        };
        let client = LedgerClient::new(sender);
        (service, client)
    }

    #[instrument(name = "ledger_service", skip(self))]
    pub async fn run(mut self) {
        info!("LedgerService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                LedgerRequest::Get {
                    customer_id,
                    respond_to,
                } => {
                    self.handle_get(customer_id, respond_to);
                }
                LedgerRequest::CreateIfAbsent {
                    customer_id,
                    respond_to,
                } => {
                    self.handle_create_if_absent(customer_id, respond_to);
                }
                LedgerRequest::CompareAndSwap {
                    customer_id,
                    expected_version,
                    new_state,
                    respond_to,
                } => {
                    self.handle_compare_and_swap(customer_id, expected_version, new_state, respond_to);
                }
                LedgerRequest::Shutdown => {
                    info!("LedgerService shutting down");
                    break;
                }
            }
        }

        info!("LedgerService stopped");
    }

    #[instrument(fields(customer_id = %customer_id), skip(self, respond_to))]
    fn handle_get(
        &self,
        customer_id: String,
        respond_to: ServiceResponse<Option<VersionedLedger>, LedgerError>,
    ) {
        debug!("Processing get request");

        let record = self.ledgers.get(&customer_id).cloned();

        match &record {
            Some(record) => debug!(version = record.version, points = record.state.points, "Ledger found"),
            None => debug!("Ledger not found"),
        }

        let _ = respond_to.send(Ok(record));
    }

    /// Idempotent: a customer's first purchase and a concurrent duplicate of
    /// it both land here, and exactly one zeroed row is ever created.
    #[instrument(fields(customer_id = %customer_id), skip(self, respond_to))]
    fn handle_create_if_absent(
        &mut self,
        customer_id: String,
        respond_to: ServiceResponse<VersionedLedger, LedgerError>,
    ) {
        debug!("Processing create_if_absent request");

        let record = self
            .ledgers
            .entry(customer_id.clone())
            .or_insert_with(|| {
                info!("Created zeroed ledger");
                VersionedLedger {
                    version: 0,
                    state: LoyaltyLedger::zeroed(customer_id.clone()),
                }
            })
            .clone();

        let _ = respond_to.send(Ok(record));
    }

    #[instrument(fields(customer_id = %customer_id, expected_version), skip(self, new_state, respond_to))]
    fn handle_compare_and_swap(
        &mut self,
        customer_id: String,
        expected_version: u64,
        new_state: LoyaltyLedger,
        respond_to: ServiceResponse<VersionedLedger, LedgerError>,
    ) {
        debug!("Processing compare_and_swap request");

        let result = match self.ledgers.get_mut(&customer_id) {
            Some(record) if record.version == expected_version => {
                record.version += 1;
                record.state = new_state;
                info!(
                    version = record.version,
                    points = record.state.points,
                    total_earned = record.state.total_earned,
                    "Ledger committed"
                );
                Ok(record.clone())
            }
            Some(record) => {
                warn!(stored_version = record.version, "Version conflict, write rejected");
                Err(LedgerError::VersionConflict(customer_id))
            }
            None => {
                warn!("Write to missing ledger rejected");
                Err(LedgerError::NotFound(customer_id))
            }
        };

        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_if_absent_is_idempotent() {
        let (service, client) = LedgerService::new(10);
        let _handle = tokio::spawn(service.run());

        let first = client
            .create_if_absent("customer_1".to_string())
            .await
            .unwrap();
        assert_eq!(first.version, 0);
        assert_eq!(first.state, LoyaltyLedger::zeroed("customer_1"));

        // Bump the row, then ask again: the existing record must come back.
        let committed = client
            .compare_and_swap(
                "customer_1".to_string(),
                0,
                LoyaltyLedger {
                    customer_id: "customer_1".to_string(),
                    points: 1,
                    total_earned: 1,
                    rewards_redeemed: 0,
                },
            )
            .await
            .unwrap();
        assert_eq!(committed.version, 1);

        let again = client
            .create_if_absent("customer_1".to_string())
            .await
            .unwrap();
        assert_eq!(again, committed);
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let (service, client) = LedgerService::new(10);
        let _handle = tokio::spawn(service.run());

        client
            .create_if_absent("customer_1".to_string())
            .await
            .unwrap();

        let mut state = LoyaltyLedger::zeroed("customer_1");
        state.points = 1;
        state.total_earned = 1;

        client
            .compare_and_swap("customer_1".to_string(), 0, state.clone())
            .await
            .unwrap();

        // A second writer still holding version 0 must lose.
        let conflict = client
            .compare_and_swap("customer_1".to_string(), 0, state)
            .await;
        assert_eq!(
            conflict,
            Err(LedgerError::VersionConflict("customer_1".to_string()))
        );
    }

    #[tokio::test]
    async fn write_to_missing_row_is_rejected() {
        let (service, client) = LedgerService::new(10);
        let _handle = tokio::spawn(service.run());

        let result = client
            .compare_and_swap("ghost".to_string(), 0, LoyaltyLedger::zeroed("ghost"))
            .await;
        assert_eq!(result, Err(LedgerError::NotFound("ghost".to_string())));
    }
}
