use crate::domain::draft::{DraftId, PaymentMethod};
use crate::domain::ports::PaymentMethodRegistry;
use crate::error::{FeeError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A thread-safe in-memory payment method registry.
///
/// Clones share the same underlying map, so a caller can keep a handle for
/// registering drafts after handing a boxed clone to the eligibility gate.
#[derive(Default, Clone)]
pub struct InMemoryPaymentMethodRegistry {
    methods: Arc<RwLock<HashMap<DraftId, Vec<PaymentMethod>>>>,
}

impl InMemoryPaymentMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ordered list of methods offered for `draft`, replacing any previous list.
    pub fn register(&self, draft: DraftId, methods: Vec<PaymentMethod>) {
        let mut map = match self.methods.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.insert(draft, methods);
    }
}

impl PaymentMethodRegistry for InMemoryPaymentMethodRegistry {
    fn list_methods(&self, draft: DraftId) -> Result<Vec<PaymentMethod>> {
        let map = self.methods.read().map_err(|_| FeeError::LookupFailed {
            draft,
            reason: "registry lock poisoned".to_string(),
        })?;
        map.get(&draft).cloned().ok_or_else(|| FeeError::LookupFailed {
            draft,
            reason: "no such draft".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_list_keeps_order() {
        let registry = InMemoryPaymentMethodRegistry::new();
        registry.register(
            DraftId(1),
            vec![PaymentMethod::new("credit_card"), PaymentMethod::new("msp_cashondelivery")],
        );

        let methods = registry.list_methods(DraftId(1)).unwrap();
        let codes: Vec<&str> = methods.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, ["credit_card", "msp_cashondelivery"]);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = InMemoryPaymentMethodRegistry::new();
        let handle = registry.clone();
        handle.register(DraftId(5), vec![PaymentMethod::new("checkmo")]);
        assert_eq!(registry.list_methods(DraftId(5)).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_draft_is_a_lookup_failure() {
        let registry = InMemoryPaymentMethodRegistry::new();
        assert!(matches!(
            registry.list_methods(DraftId(42)),
            Err(FeeError::LookupFailed { draft: DraftId(42), .. })
        ));
    }
}
