/// A catalog item as the storefront sells it.
///
/// Prices are minor currency units (cents). Orders capture the price at
/// purchase time, so later edits here never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub available: bool,
}

impl Product {
    /// Creates a listed product.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_cents: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_cents,
            available: true,
        }
    }
}
