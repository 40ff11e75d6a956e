//! Authenticated-principal capability.
//!
//! Identity itself (sign-up, sign-in, session persistence) lives outside
//! this crate; the core only consumes the resolved principal.

/// The current authenticated principal, as handed in by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    principal: Option<String>,
}

impl AuthContext {
    /// Context for a signed-in customer.
    pub fn signed_in(customer_id: impl Into<String>) -> Self {
        Self {
            principal: Some(customer_id.into()),
        }
    }

    /// Context with no authenticated customer.
    pub fn anonymous() -> Self {
        Self { principal: None }
    }

    pub fn current_principal(&self) -> Option<&str> {
        self.principal.as_deref()
    }
}
