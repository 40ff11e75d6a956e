use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::clients::macros::client_method;
use crate::domain::{Order, OrderLine};
use crate::error::OrderError;
use crate::messages::OrderRequest;

/// Client for the order recorder.
///
/// `create_order` is crate-private: orders enter the store only through the
/// purchase coordinator, so the presentation layer cannot append an order
/// without its loyalty settlement.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
}

impl OrderClient {
    pub(crate) fn new(sender: mpsc::Sender<OrderRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self, lines))]
    pub(crate) async fn create_order(
        &self,
        customer_id: String,
        lines: Vec<OrderLine>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(OrderRequest::CreateOrder {
                customer_id,
                lines,
                respond_to,
            })
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), OrderError> {
        debug!("Sending shutdown request");
        self.sender
            .send(OrderRequest::Shutdown)
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(OrderClient => fn get_order(id: String) -> Option<Order> as OrderRequest::GetOrder, Error = OrderError);
client_method!(OrderClient => fn list_orders(customer_id: String) -> Vec<Order> as OrderRequest::ListOrders, Error = OrderError);
client_method!(OrderClient => fn count_orders(customer_id: String) -> usize as OrderRequest::CountOrders, Error = OrderError);
