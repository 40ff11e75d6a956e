use tokio::sync::oneshot;

use crate::domain::{LoyaltyLedger, Order, OrderLine, Product, VersionedLedger};
use crate::error::{CatalogError, LedgerError, OrderError};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed message enums for actor communication. Each variant includes
/// parameters and a oneshot channel for responses.

#[derive(Debug)]
pub enum CatalogRequest {
    GetProduct {
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    ListAvailable {
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    UpsertProduct {
        product: Product,
        respond_to: ServiceResponse<String, CatalogError>,
    },
    Shutdown,
}

/// Append-only store: there is deliberately no update or delete variant.
#[derive(Debug)]
pub enum OrderRequest {
    CreateOrder {
        customer_id: String,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<Option<Order>, OrderError>,
    },
    ListOrders {
        customer_id: String,
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    CountOrders {
        customer_id: String,
        respond_to: ServiceResponse<usize, OrderError>,
    },
    Shutdown,
}

/// `CompareAndSwap` is the only write path for an existing ledger row.
#[derive(Debug)]
pub enum LedgerRequest {
    Get {
        customer_id: String,
        respond_to: ServiceResponse<Option<VersionedLedger>, LedgerError>,
    },
    CreateIfAbsent {
        customer_id: String,
        respond_to: ServiceResponse<VersionedLedger, LedgerError>,
    },
    CompareAndSwap {
        customer_id: String,
        expected_version: u64,
        new_state: LoyaltyLedger,
        respond_to: ServiceResponse<VersionedLedger, LedgerError>,
    },
    Shutdown,
}

#[derive(Debug)]
pub enum NotificationRequest {
    /// Fire-and-forget: no response channel by design.
    Broadcast { message: String },
    Shutdown,
    #[cfg(test)]
    Sent {
        respond_to: oneshot::Sender<Vec<String>>,
    },
}
