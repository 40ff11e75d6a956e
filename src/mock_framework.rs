//! Utilities for testing the purchase coordinator in isolation.
//!
//! Each `mock_*` function returns a real client wired to a receiver the test
//! controls; the `expect_*` helpers assert which request arrives next and
//! hand back the responder so the test scripts the collaborator's behavior
//! (success, conflict, outage) deterministically.

use tokio::sync::mpsc;

use crate::clients::{CatalogClient, LedgerClient, NotificationClient, OrderClient};
use crate::domain::{LoyaltyLedger, Order, OrderLine, Product, VersionedLedger};
use crate::error::{CatalogError, LedgerError, OrderError};
use crate::messages::{
    CatalogRequest, LedgerRequest, NotificationRequest, OrderRequest, ServiceResponse,
};

pub fn mock_catalog(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

pub fn mock_orders(buffer_size: usize) -> (OrderClient, mpsc::Receiver<OrderRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (OrderClient::new(sender), receiver)
}

pub fn mock_ledger(buffer_size: usize) -> (LedgerClient, mpsc::Receiver<LedgerRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (LedgerClient::new(sender), receiver)
}

pub fn mock_notifications(
    buffer_size: usize,
) -> (NotificationClient, mpsc::Receiver<NotificationRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (NotificationClient::new(sender), receiver)
}

/// Helper to verify that the next catalog message is a GetProduct request
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(String, ServiceResponse<Option<Product>, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next order message is a CreateOrder request
pub async fn expect_create_order(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(String, Vec<OrderLine>, ServiceResponse<Order, OrderError>)> {
    match receiver.recv().await {
        Some(OrderRequest::CreateOrder {
            customer_id,
            lines,
            respond_to,
        }) => Some((customer_id, lines, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next ledger message is a CreateIfAbsent request
pub async fn expect_create_if_absent(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(String, ServiceResponse<VersionedLedger, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::CreateIfAbsent {
            customer_id,
            respond_to,
        }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next ledger message is a Get request
pub async fn expect_get_ledger(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(String, ServiceResponse<Option<VersionedLedger>, LedgerError>)> {
    match receiver.recv().await {
        Some(LedgerRequest::Get {
            customer_id,
            respond_to,
        }) => Some((customer_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next ledger message is a CompareAndSwap request
pub async fn expect_compare_and_swap(
    receiver: &mut mpsc::Receiver<LedgerRequest>,
) -> Option<(
    String,
    u64,
    LoyaltyLedger,
    ServiceResponse<VersionedLedger, LedgerError>,
)> {
    match receiver.recv().await {
        Some(LedgerRequest::CompareAndSwap {
            customer_id,
            expected_version,
            new_state,
            respond_to,
        }) => Some((customer_id, expected_version, new_state, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_round_trips_a_request() {
        let (client, mut receiver) = mock_catalog(10);

        let get_task = tokio::spawn(async move { client.get_product("espresso".to_string()).await });

        let (id, responder) = expect_get_product(&mut receiver)
            .await
            .expect("Expected GetProduct request");
        assert_eq!(id, "espresso");
        responder
            .send(Ok(Some(Product::new("espresso", "Espresso", 350))))
            .unwrap();

        let result = get_task.await.unwrap().unwrap();
        assert_eq!(result, Some(Product::new("espresso", "Espresso", 350)));
    }
}
