use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::clients::OrderClient;
use crate::domain::{Order, OrderLine, OrderStatus};
use crate::error::OrderError;
use crate::messages::{OrderRequest, ServiceResponse};

/// Append-only order recorder.
///
/// Orders are immutable once written; the request enum exposes no update or
/// delete path. Line prices are captured by the caller at purchase time and
/// stored verbatim.
pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    orders: HashMap<String, Order>,
}

impl OrderService {
    pub fn new(buffer_size: usize) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            orders: HashMap::new(),
        };
        let client = OrderClient::new(sender);
        (service, client)
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::CreateOrder {
                    customer_id,
                    lines,
                    respond_to,
                } => {
                    self.handle_create_order(customer_id, lines, respond_to);
                }
                OrderRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                OrderRequest::ListOrders {
                    customer_id,
                    respond_to,
                } => {
                    self.handle_list_orders(customer_id, respond_to);
                }
                OrderRequest::CountOrders {
                    customer_id,
                    respond_to,
                } => {
                    self.handle_count_orders(customer_id, respond_to);
                }
                OrderRequest::Shutdown => {
                    info!("OrderService shutting down");
                    break;
                }
            }
        }

        info!("OrderService stopped");
    }

    #[instrument(fields(customer_id = %customer_id, line_count = lines.len()), skip(self, lines, respond_to))]
    fn handle_create_order(
        &mut self,
        customer_id: String,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<Order, OrderError>,
    ) {
        debug!("Processing create_order request");

        if lines.is_empty() {
            error!("Rejected order with no lines");
            let _ = respond_to.send(Err(OrderError::InvalidInput(
                "order has no lines".to_string(),
            )));
            return;
        }

        if let Some(line) = lines
            .iter()
            .find(|line| line.unit_price_cents <= 0 || line.quantity == 0)
        {
            error!(
                product_id = %line.product_id,
                unit_price_cents = line.unit_price_cents,
                quantity = line.quantity,
                "Rejected degenerate order line"
            );
            let _ = respond_to.send(Err(OrderError::InvalidInput(format!(
                "degenerate line for product {}",
                line.product_id
            ))));
            return;
        }

        let total_cents: i64 = lines
            .iter()
            .map(|line| line.unit_price_cents * i64::from(line.quantity))
            .sum();

        let order = Order {
            id: Uuid::new_v4().to_string(),
            customer_id,
            total_cents,
            status: OrderStatus::Completed,
            created_at: Utc::now(),
            lines,
        };

        self.orders.insert(order.id.clone(), order.clone());

        info!(order_id = %order.id, total_cents, "Order recorded");
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(&self, id: String, respond_to: ServiceResponse<Option<Order>, OrderError>) {
        debug!("Processing get_order request");

        let order = self.orders.get(&id).cloned();

        match &order {
            Some(order) => info!(total_cents = order.total_cents, "Order found"),
            None => debug!("Order not found"),
        }

        let _ = respond_to.send(Ok(order));
    }

    /// Newest first, the shape the profile's order history renders.
    #[instrument(fields(customer_id = %customer_id), skip(self, respond_to))]
    fn handle_list_orders(
        &self,
        customer_id: String,
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    ) {
        debug!("Processing list_orders request");

        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        info!(order_count = orders.len(), "Listed orders");
        let _ = respond_to.send(Ok(orders));
    }

    #[instrument(fields(customer_id = %customer_id), skip(self, respond_to))]
    fn handle_count_orders(
        &self,
        customer_id: String,
        respond_to: ServiceResponse<usize, OrderError>,
    ) {
        debug!("Processing count_orders request");

        let count = self
            .orders
            .values()
            .filter(|order| order.customer_id == customer_id)
            .count();

        let _ = respond_to.send(Ok(count));
    }
}
