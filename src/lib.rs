//! Ordering and loyalty rewards core for a cafe storefront.
//!
//! Customers purchase catalog items; every completed purchase records an
//! order and earns one loyalty point, with a free-item reward redeemed
//! automatically at the threshold. The ledger behind those points has a
//! single write path guarded by optimistic concurrency control, so
//! concurrent purchases never lose an update.

pub mod actors;
pub mod app_system;
pub mod auth;
pub mod clients;
pub mod domain;
pub mod error;
pub mod messages;
pub mod purchase;
pub mod reward;

mod reconcile;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, RewardsSystem};
pub use auth::AuthContext;
pub use error::PurchaseError;
pub use purchase::{PurchaseCoordinator, PurchaseOutcome};
