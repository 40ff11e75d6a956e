/// Per-customer loyalty record. Exactly one row per customer.
///
/// After every committed purchase: `total_earned` equals the number of
/// recorded purchase events, `rewards_redeemed == total_earned / threshold`,
/// and `points == total_earned % threshold`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyLedger {
    pub customer_id: String,
    pub points: u32,
    pub total_earned: u32,
    pub rewards_redeemed: u32,
}

impl LoyaltyLedger {
    /// Zeroed record for a customer's first purchase.
    pub fn zeroed(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            points: 0,
            total_earned: 0,
            rewards_redeemed: 0,
        }
    }
}

/// Ledger state paired with the version the store checks on every write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedLedger {
    pub version: u64,
    pub state: LoyaltyLedger,
}
