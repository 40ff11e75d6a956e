pub(crate) mod macros;

pub mod catalog_client;
pub mod ledger_client;
pub mod notification_client;
pub mod order_client;

pub use catalog_client::CatalogClient;
pub use ledger_client::{LedgerClient, LedgerReader};
pub use notification_client::NotificationClient;
pub use order_client::OrderClient;
