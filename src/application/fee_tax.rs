use crate::domain::draft::OrderDraft;
use crate::domain::money::CurrencyMode;
use crate::domain::ports::TaxItemBuilderBox;
use crate::domain::tax::{
    ITEM_CODE_CASH_ON_DELIVERY, ITEM_TYPE_CASH_ON_DELIVERY, TAX_TOTAL_CODE, TOTAL_CODE,
    TaxBreakdown, TaxableLineItem,
};
use crate::domain::total::TotalAggregate;
use crate::error::{FeeError, Result};
use tracing::{debug, trace};

/// Turns the raw cash on delivery fee into a taxable line item and folds the
/// tax engine's answer back into the draft's totals.
///
/// Within one recompute pass the caller builds a line item for each currency
/// mode, has both priced by the tax engine, then applies the two breakdowns
/// together, once.
pub struct FeeTaxProcessor {
    item_builder: TaxItemBuilderBox,
}

impl FeeTaxProcessor {
    pub fn new(item_builder: TaxItemBuilderBox) -> Self {
        Self { item_builder }
    }

    /// Builds the fee's line item for `mode`, or `None` when no fee is set.
    ///
    /// The first call that sees an unset tax-calculation basis snapshots the
    /// raw fee into it. Later changes to the raw fee do not move the basis.
    pub fn build_line_item(
        &self,
        draft: &OrderDraft,
        total: &mut TotalAggregate,
        mode: CurrencyMode,
    ) -> Result<Option<TaxableLineItem>> {
        if total.capture_tax_calculation_basis() {
            trace!(
                basis = ?total.fee.tax_calculation_amount,
                "captured fee tax calculation basis"
            );
        }

        let Some(unit_price) = *total.fee.tax_calculation_amount.get(mode) else {
            debug!(%mode, "no cash on delivery fee set, skipping line item");
            return Ok(None);
        };

        let item = self.item_builder.build_item(
            draft.store,
            ITEM_TYPE_CASH_ON_DELIVERY,
            ITEM_CODE_CASH_ON_DELIVERY,
            unit_price,
        )?;
        total.mark_built(mode);
        debug!(
            %mode,
            %unit_price,
            tax_class = %item.tax_class_key.value,
            "built cash on delivery line item"
        );
        Ok(Some(item))
    }

    /// Writes the fee's tax breakdowns into `total` and adds the fee tax to the
    /// shared `tax` bucket.
    ///
    /// # Errors
    ///
    /// Returns [`FeeError::ContractViolation`] without touching `total` when the
    /// fee tax was already applied in this pass, or when a line item was not
    /// built for both currencies.
    pub fn apply_tax_result(
        &self,
        total: &mut TotalAggregate,
        store: &TaxBreakdown,
        base: &TaxBreakdown,
    ) -> Result<()> {
        if total.is_applied() {
            return Err(FeeError::ContractViolation(format!(
                "{TOTAL_CODE} tax already applied in pass {}",
                total.version()
            )));
        }
        for mode in CurrencyMode::ALL {
            if !total.is_built(mode) {
                return Err(FeeError::ContractViolation(format!(
                    "tax result applied without a {mode} currency line item for {TOTAL_CODE}"
                )));
            }
        }

        total.set_total_amount(TOTAL_CODE, store.row_total);
        total.set_base_total_amount(TOTAL_CODE, base.row_total);

        total.fee.incl_tax.store = Some(store.row_total_incl_tax);
        total.fee.incl_tax.base = Some(base.row_total_incl_tax);
        total.fee.tax_amount.store = Some(store.row_tax);
        total.fee.tax_amount.base = Some(base.row_tax);

        total.add_total_amount(TAX_TOTAL_CODE, store.row_tax);
        total.add_base_total_amount(TAX_TOTAL_CODE, base.row_tax);

        total.mark_applied();
        debug!(tax = %store.row_tax, base_tax = %base.row_tax, "applied cash on delivery tax");
        Ok(())
    }
}
