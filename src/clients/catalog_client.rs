use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::clients::macros::client_method;
use crate::domain::Product;
use crate::error::CatalogError;
use crate::messages::CatalogRequest;

/// Client for the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub(crate) fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CatalogClient => fn get_product(id: String) -> Option<Product> as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn list_available() -> Vec<Product> as CatalogRequest::ListAvailable, Error = CatalogError);
client_method!(CatalogClient => fn upsert_product(product: Product) -> String as CatalogRequest::UpsertProduct, Error = CatalogError);
