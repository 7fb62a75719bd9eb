use super::draft::{DraftId, OrderDraft, PaymentMethod, StoreId};
use super::money::Money;
use super::tax::{TaxBreakdown, TaxClassId, TaxClassKey, TaxableLineItem};
use crate::error::Result;
use std::collections::BTreeMap;

/// Lists the payment methods offered for a draft.
pub trait PaymentMethodRegistry: Send + Sync {
    /// Available methods in display order. Lookup failures are returned as-is.
    fn list_methods(&self, draft: DraftId) -> Result<Vec<PaymentMethod>>;

    fn selected_method_code<'a>(&self, draft: &'a OrderDraft) -> Option<&'a str> {
        draft.payment_method.as_deref().filter(|code| !code.is_empty())
    }
}

/// Store-scoped tax settings.
pub trait TaxConfig: Send + Sync {
    fn shipping_tax_class(&self, store: StoreId) -> Result<TaxClassId>;
    fn shipping_price_includes_tax(&self) -> Result<bool>;
}

/// Builds classified line items for the tax engine.
pub trait TaxItemBuilder: Send + Sync {
    fn build_item(
        &self,
        store: StoreId,
        item_type: &str,
        code: &str,
        unit_price: Money,
    ) -> Result<TaxableLineItem>;
}

/// Turns a batch of line items into per-code tax breakdowns.
///
/// All items in one batch are priced in the same currency.
pub trait TaxEngine: Send + Sync {
    fn calculate(&self, items: &[TaxableLineItem]) -> Result<BTreeMap<String, TaxBreakdown>>;
}

pub type PaymentMethodRegistryBox = Box<dyn PaymentMethodRegistry>;
pub type TaxConfigBox = Box<dyn TaxConfig>;
pub type TaxItemBuilderBox = Box<dyn TaxItemBuilder>;
pub type TaxEngineBox = Box<dyn TaxEngine>;

/// [`TaxItemBuilder`] that taxes items under the shipping tax policy:
/// the store's shipping tax class, and shipping's tax-inclusive pricing flag.
pub struct ShippingPolicyItemBuilder {
    config: TaxConfigBox,
}

impl ShippingPolicyItemBuilder {
    pub fn new(config: TaxConfigBox) -> Self {
        Self { config }
    }
}

impl TaxItemBuilder for ShippingPolicyItemBuilder {
    fn build_item(
        &self,
        store: StoreId,
        item_type: &str,
        code: &str,
        unit_price: Money,
    ) -> Result<TaxableLineItem> {
        Ok(TaxableLineItem {
            item_type: item_type.to_string(),
            code: code.to_string(),
            quantity: 1,
            unit_price,
            tax_class_key: TaxClassKey::by_id(self.config.shipping_tax_class(store)?),
            is_tax_included: self.config.shipping_price_includes_tax()?,
        })
    }
}
