use crate::config::TaxSettings;
use crate::domain::money::Money;
use crate::domain::ports::TaxEngine;
use crate::domain::tax::{TaxBreakdown, TaxClassId, TaxableLineItem};
use crate::error::{FeeError, Result};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

const PRICE_PRECISION: u32 = 2;

/// Tax engine applying one percentage rate per tax class.
///
/// Classes without a configured rate are taxed at zero.
#[derive(Debug, Clone, Default)]
pub struct FlatRateTaxEngine {
    rates: HashMap<TaxClassId, Decimal>,
}

impl FlatRateTaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, class: TaxClassId, percent: Decimal) -> Self {
        self.rates.insert(class, percent);
        self
    }

    pub fn from_settings(settings: &TaxSettings) -> Result<Self> {
        Ok(Self {
            rates: settings.class_rates()?.into_iter().collect(),
        })
    }

    fn breakdown(&self, item: &TaxableLineItem) -> Result<TaxBreakdown> {
        if item.quantity == 0 {
            return Err(FeeError::TaxEngine(format!(
                "line item {} has zero quantity",
                item.code
            )));
        }
        let rate = self
            .rates
            .get(&item.tax_class_key.value)
            .copied()
            .unwrap_or(Decimal::ZERO);
        let row = item.unit_price.value() * Decimal::from(item.quantity);
        let hundred = Decimal::ONE_HUNDRED;

        let breakdown = if item.is_tax_included {
            let row_tax = Money::new(row * rate / (hundred + rate)).round_dp(PRICE_PRECISION);
            TaxBreakdown {
                row_total: Money::new(row) - row_tax,
                row_total_incl_tax: Money::new(row),
                row_tax,
            }
        } else {
            let row_tax = Money::new(row * rate / hundred).round_dp(PRICE_PRECISION);
            TaxBreakdown {
                row_total: Money::new(row),
                row_total_incl_tax: Money::new(row) + row_tax,
                row_tax,
            }
        };
        trace!(code = %item.code, %rate, ?breakdown, "priced line item");
        Ok(breakdown)
    }
}

impl TaxEngine for FlatRateTaxEngine {
    fn calculate(&self, items: &[TaxableLineItem]) -> Result<BTreeMap<String, TaxBreakdown>> {
        items
            .iter()
            .map(|item| Ok((item.code.clone(), self.breakdown(item)?)))
            .collect()
    }
}
