use super::money::{CurrencyMode, Money, PerCurrency};
use serde::Serialize;
use std::collections::BTreeMap;

/// Fee-specific fields carried on the total aggregate.
///
/// Writers:
/// * `amount` - the fee amount collector upstream of this crate.
/// * `tax_calculation_amount` - captured once by `FeeTaxProcessor::build_line_item`.
/// * `incl_tax`, `tax_amount` - written only by `FeeTaxProcessor::apply_tax_result`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeeAmounts {
    pub amount: PerCurrency<Option<Money>>,
    pub tax_calculation_amount: PerCurrency<Option<Money>>,
    pub incl_tax: PerCurrency<Option<Money>>,
    pub tax_amount: PerCurrency<Option<Money>>,
}

/// Mutable record of named total buckets for one order draft.
///
/// The aggregate outlives a single recompute: [`TotalAggregate::begin_recompute`]
/// starts a new pass, clearing every bucket and per-pass marker but keeping the
/// raw fee amount and the captured tax-calculation basis.
///
/// Bucket writers: the fee bucket is set by the fee processor only; the `tax`
/// bucket is added to by every taxable contributor, each exactly once per pass.
/// The fee processor's once-per-pass add is tracked by an applied marker that
/// only `begin_recompute` resets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalAggregate {
    version: u64,
    totals: PerCurrency<BTreeMap<String, Money>>,
    pub fee: FeeAmounts,
    #[serde(skip)]
    built: PerCurrency<bool>,
    #[serde(skip)]
    applied: bool,
}

impl TotalAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregate whose raw fee amount has already been set.
    pub fn with_fee(amount: Option<Money>, base_amount: Option<Money>) -> Self {
        let mut total = Self::new();
        total.fee.amount = PerCurrency::new(amount, base_amount);
        total
    }

    /// Number of recompute passes started on this aggregate.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn begin_recompute(&mut self) {
        self.version += 1;
        self.totals = PerCurrency::default();
        self.built = PerCurrency::default();
        self.applied = false;
        self.fee.incl_tax = PerCurrency::default();
        self.fee.tax_amount = PerCurrency::default();
    }

    pub fn amount(&self, mode: CurrencyMode, code: &str) -> Money {
        self.totals.get(mode).get(code).copied().unwrap_or_default()
    }

    pub fn set_amount(&mut self, mode: CurrencyMode, code: &str, amount: Money) {
        self.totals.get_mut(mode).insert(code.to_string(), amount);
    }

    pub fn add_amount(&mut self, mode: CurrencyMode, code: &str, amount: Money) {
        *self
            .totals
            .get_mut(mode)
            .entry(code.to_string())
            .or_default() += amount;
    }

    pub fn total_amount(&self, code: &str) -> Money {
        self.amount(CurrencyMode::Store, code)
    }

    pub fn base_total_amount(&self, code: &str) -> Money {
        self.amount(CurrencyMode::Base, code)
    }

    pub fn set_total_amount(&mut self, code: &str, amount: Money) {
        self.set_amount(CurrencyMode::Store, code, amount);
    }

    pub fn set_base_total_amount(&mut self, code: &str, amount: Money) {
        self.set_amount(CurrencyMode::Base, code, amount);
    }

    pub fn add_total_amount(&mut self, code: &str, amount: Money) {
        self.add_amount(CurrencyMode::Store, code, amount);
    }

    pub fn add_base_total_amount(&mut self, code: &str, amount: Money) {
        self.add_amount(CurrencyMode::Base, code, amount);
    }

    /// Snapshots the raw fee into the tax-calculation basis while the basis is unset.
    ///
    /// Returns `true` when a capture happened.
    pub fn capture_tax_calculation_basis(&mut self) -> bool {
        if self.fee.tax_calculation_amount.store.is_some() {
            return false;
        }
        self.fee.tax_calculation_amount = self.fee.amount;
        true
    }

    pub(crate) fn mark_built(&mut self, mode: CurrencyMode) {
        *self.built.get_mut(mode) = true;
    }

    pub(crate) fn is_built(&self, mode: CurrencyMode) -> bool {
        *self.built.get(mode)
    }

    /// Whether the fee tax has already been folded in during this pass.
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub(crate) fn mark_applied(&mut self) {
        self.applied = true;
    }
}
