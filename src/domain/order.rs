use chrono::{DateTime, Utc};

/// A completed purchase as recorded at settlement time.
///
/// Orders are immutable once written.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
}

/// A single line of an order.
///
/// `unit_price_cents` is the catalog price at purchase time and is never
/// re-read from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

/// The purchase flow settles orders immediately, so `Completed` is the only
/// status it records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Completed,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "completed"),
        }
    }
}
