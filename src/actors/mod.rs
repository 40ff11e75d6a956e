pub mod catalog;
pub mod ledger;
pub mod notifications;
pub mod orders;

pub use catalog::CatalogService;
pub use ledger::LedgerService;
pub use notifications::NotificationService;
pub use orders::OrderService;
