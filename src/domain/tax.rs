use super::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Line-item type tag for the cash on delivery fee.
pub const ITEM_TYPE_CASH_ON_DELIVERY: &str = "msp_cashondelivery";
/// Line-item code for the cash on delivery fee. Must match [`TOTAL_CODE`].
pub const ITEM_CODE_CASH_ON_DELIVERY: &str = "msp_cashondelivery";
/// Key of the fee's bucket in the total aggregate.
pub const TOTAL_CODE: &str = ITEM_CODE_CASH_ON_DELIVERY;
/// Payment method code that carries the fee.
pub const PAYMENT_METHOD_CODE: &str = "msp_cashondelivery";
/// Key of the aggregate tax bucket shared by every taxable contributor.
pub const TAX_TOTAL_CODE: &str = "tax";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxClassId(pub u32);

impl fmt::Display for TaxClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxClassKeyType {
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxClassKey {
    #[serde(rename = "type")]
    pub key_type: TaxClassKeyType,
    pub value: TaxClassId,
}

impl TaxClassKey {
    pub fn by_id(value: TaxClassId) -> Self {
        Self {
            key_type: TaxClassKeyType::Id,
            value,
        }
    }
}

/// One unit of something to be taxed, as submitted to the tax engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableLineItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub code: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub tax_class_key: TaxClassKey,
    pub is_tax_included: bool,
}

/// Tax engine output for one line item in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Row total excluding tax.
    pub row_total: Money,
    pub row_total_incl_tax: Money,
    pub row_tax: Money,
}
