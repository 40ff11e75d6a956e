use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid order input: {0}")]
    InvalidInput(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("No ledger for customer: {0}")]
    NotFound(String),
    #[error("Ledger version conflict for customer: {0}")]
    VersionConflict(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Failure taxonomy of the purchase transaction, as surfaced to callers.
///
/// `Transient` means nothing was committed and the whole call is safe to
/// retry. `Integrity` means the order is durable but the ledger update was
/// not; retrying the call would double-charge, so the customer's ledger must
/// be reconciled instead.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PurchaseError {
    #[error("No authenticated customer")]
    Unauthenticated,
    #[error("Product unavailable: {0}")]
    ProductUnavailable(String),
    #[error("Invalid purchase input: {0}")]
    InvalidInput(String),
    #[error("Transient failure before settlement: {0}")]
    Transient(String),
    #[error("Order {order_id} recorded but ledger settlement failed: {reason}")]
    Integrity { order_id: String, reason: String },
}
