use crate::domain::draft::OrderDraft;
use crate::domain::ports::PaymentMethodRegistryBox;
use crate::domain::tax::PAYMENT_METHOD_CODE;
use crate::error::Result;
use tracing::debug;

/// Decides whether the cash on delivery fee takes part in a draft's totals.
pub struct EligibilityGate {
    registry: PaymentMethodRegistryBox,
}

impl EligibilityGate {
    pub fn new(registry: PaymentMethodRegistryBox) -> Self {
        Self { registry }
    }

    /// Returns `true` when the fee applies to `draft`.
    ///
    /// A draft without identity is never eligible. When the registry offers
    /// exactly one method and it is cash on delivery, the fee applies whatever
    /// the selector says; otherwise the selected method decides.
    ///
    /// # Errors
    ///
    /// Registry lookup failures are propagated unchanged.
    pub fn is_applicable(&self, draft: &OrderDraft) -> Result<bool> {
        let Some(id) = draft.id else {
            debug!("draft has no identity yet, fee not applicable");
            return Ok(false);
        };

        let methods = self.registry.list_methods(id)?;
        if let [only] = methods.as_slice() {
            if only.code == PAYMENT_METHOD_CODE {
                debug!(draft = %id, "cash on delivery is the only payment method");
                return Ok(true);
            }
        }

        let selected = self.registry.selected_method_code(draft);
        debug!(draft = %id, methods = methods.len(), ?selected, "checking selected payment method");
        Ok(selected == Some(PAYMENT_METHOD_CODE))
    }
}
