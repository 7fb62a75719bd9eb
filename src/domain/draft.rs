use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a persisted order draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(pub u64);

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Store view the draft is priced in. Tax configuration is scoped by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub code: String,
}

impl PaymentMethod {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// An in-progress order, read-only from the fee computation's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Absent until the draft has been persisted.
    pub id: Option<DraftId>,
    pub store: StoreId,
    /// The `payment.method` selector.
    pub payment_method: Option<String>,
}

impl OrderDraft {
    pub fn new(id: Option<DraftId>, store: StoreId) -> Self {
        Self {
            id,
            store,
            payment_method: None,
        }
    }

    pub fn with_payment_method(mut self, code: impl Into<String>) -> Self {
        self.payment_method = Some(code.into());
        self
    }
}
