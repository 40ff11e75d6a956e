use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::CatalogClient;
use crate::domain::Product;
use crate::error::CatalogError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// Product catalog collaborator.
///
/// The purchase core only reads from it; `UpsertProduct` is the
/// administration surface used for seeding and price edits.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: HashMap<String, Product>,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: HashMap::new(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::ListAvailable { respond_to } => {
                    self.handle_list_available(respond_to);
                }
                CatalogRequest::UpsertProduct {
                    product,
                    respond_to,
                } => {
                    self.handle_upsert_product(product, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(
        &self,
        id: String,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    ) {
        debug!("Processing get_product request");

        let product = self.products.get(&id).cloned();

        match &product {
            Some(product) => {
                info!(product_name = %product.name, price_cents = product.price_cents, "Product found")
            }
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_list_available(&self, respond_to: ServiceResponse<Vec<Product>, CatalogError>) {
        debug!("Processing list_available request");

        let mut products: Vec<Product> = self
            .products
            .values()
            .filter(|product| product.available)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));

        info!(product_count = products.len(), "Listed available products");
        let _ = respond_to.send(Ok(products));
    }

    #[instrument(fields(product_id = %product.id, product_name = %product.name), skip(self, product, respond_to))]
    fn handle_upsert_product(
        &mut self,
        product: Product,
        respond_to: ServiceResponse<String, CatalogError>,
    ) {
        debug!("Processing upsert_product request");

        let id = product.id.clone();
        self.products.insert(id.clone(), product);

        info!("Product stored");
        let _ = respond_to.send(Ok(id));
    }
}
