use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::clients::macros::client_method;
use crate::domain::{LoyaltyLedger, VersionedLedger};
use crate::error::LedgerError;
use crate::messages::LedgerRequest;

/// Client for the loyalty ledger store.
///
/// The mutation primitives are crate-private: only the purchase coordinator
/// and the reconciliation sweep hold write access. Everything else reads
/// through [`LedgerReader`], so a ledger can never be mutated from outside
/// the settlement path.
#[derive(Clone)]
pub struct LedgerClient {
    sender: mpsc::Sender<LedgerRequest>,
}

impl LedgerClient {
    pub(crate) fn new(sender: mpsc::Sender<LedgerRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub(crate) async fn create_if_absent(
        &self,
        customer_id: String,
    ) -> Result<VersionedLedger, LedgerError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::CreateIfAbsent {
                customer_id,
                respond_to,
            })
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    #[instrument(skip(self, new_state))]
    pub(crate) async fn compare_and_swap(
        &self,
        customer_id: String,
        expected_version: u64,
        new_state: LoyaltyLedger,
    ) -> Result<VersionedLedger, LedgerError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(LedgerRequest::CompareAndSwap {
                customer_id,
                expected_version,
                new_state,
                respond_to,
            })
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), LedgerError> {
        debug!("Sending shutdown request");
        self.sender
            .send(LedgerRequest::Shutdown)
            .await
            .map_err(|_| LedgerError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(LedgerClient => fn get(customer_id: String) -> Option<VersionedLedger> as LedgerRequest::Get, Error = LedgerError);

/// Read-only view of the ledger store for profile and loyalty display.
#[derive(Clone)]
pub struct LedgerReader {
    inner: LedgerClient,
}

impl LedgerReader {
    pub(crate) fn new(inner: LedgerClient) -> Self {
        Self { inner }
    }

    /// Current loyalty state for a customer, if a ledger row exists yet.
    #[instrument(skip(self))]
    pub async fn get_ledger(
        &self,
        customer_id: String,
    ) -> Result<Option<LoyaltyLedger>, LedgerError> {
        Ok(self
            .inner
            .get(customer_id)
            .await?
            .map(|record| record.state))
    }
}
