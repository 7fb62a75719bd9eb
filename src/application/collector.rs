use super::eligibility::EligibilityGate;
use super::fee_tax::FeeTaxProcessor;
use crate::domain::draft::OrderDraft;
use crate::domain::money::CurrencyMode;
use crate::domain::ports::TaxEngineBox;
use crate::domain::tax::{ITEM_CODE_CASH_ON_DELIVERY, TaxBreakdown, TaxableLineItem};
use crate::domain::total::TotalAggregate;
use crate::error::{FeeError, Result};
use serde::Serialize;
use std::fmt;
use tracing::{debug, instrument};

/// What one fee recompute did to the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectOutcome {
    NotApplicable,
    NoFee,
    Applied,
}

impl fmt::Display for CollectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectOutcome::NotApplicable => f.write_str("not_applicable"),
            CollectOutcome::NoFee => f.write_str("no_fee"),
            CollectOutcome::Applied => f.write_str("applied"),
        }
    }
}

/// Runs the cash on delivery step of a total recompute:
/// gate, build both line items, price them, apply.
///
/// The collector does not start a recompute pass on the aggregate. Whoever
/// owns the aggregate calls [`TotalAggregate::begin_recompute`] before any
/// contributor runs, so tax added by other contributors is preserved.
pub struct CashOnDeliveryCollector {
    gate: EligibilityGate,
    processor: FeeTaxProcessor,
    engine: TaxEngineBox,
}

impl CashOnDeliveryCollector {
    pub fn new(gate: EligibilityGate, processor: FeeTaxProcessor, engine: TaxEngineBox) -> Self {
        Self {
            gate,
            processor,
            engine,
        }
    }

    #[instrument(skip_all, fields(draft = ?draft.id, pass = total.version()))]
    pub fn collect(
        &self,
        draft: &OrderDraft,
        total: &mut TotalAggregate,
    ) -> Result<CollectOutcome> {
        if !self.gate.is_applicable(draft)? {
            return Ok(CollectOutcome::NotApplicable);
        }

        let store_item = self.processor.build_line_item(draft, total, CurrencyMode::Store)?;
        let base_item = self.processor.build_line_item(draft, total, CurrencyMode::Base)?;
        let (Some(store_item), Some(base_item)) = (store_item, base_item) else {
            debug!("cash on delivery fee not set");
            return Ok(CollectOutcome::NoFee);
        };

        let store = self.price(store_item, CurrencyMode::Store)?;
        let base = self.price(base_item, CurrencyMode::Base)?;
        self.processor.apply_tax_result(total, &store, &base)?;
        Ok(CollectOutcome::Applied)
    }

    fn price(&self, item: TaxableLineItem, mode: CurrencyMode) -> Result<TaxBreakdown> {
        let mut details = self.engine.calculate(std::slice::from_ref(&item))?;
        details.remove(ITEM_CODE_CASH_ON_DELIVERY).ok_or_else(|| {
            FeeError::TaxEngine(format!(
                "no {mode} currency breakdown returned for {ITEM_CODE_CASH_ON_DELIVERY}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxSettings;
    use crate::domain::draft::{DraftId, PaymentMethod, StoreId};
    use crate::domain::money::Money;
    use crate::domain::ports::{ShippingPolicyItemBuilder, TaxEngine};
    use crate::domain::tax::{PAYMENT_METHOD_CODE, TAX_TOTAL_CODE, TOTAL_CODE, TaxClassId};
    use crate::infrastructure::flat_rate::FlatRateTaxEngine;
    use crate::infrastructure::in_memory::InMemoryPaymentMethodRegistry;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    struct SilentEngine;

    impl TaxEngine for SilentEngine {
        fn calculate(
            &self,
            _items: &[TaxableLineItem],
        ) -> Result<BTreeMap<String, TaxBreakdown>> {
            Ok(BTreeMap::new())
        }
    }

    fn collector(engine: TaxEngineBox) -> CashOnDeliveryCollector {
        let registry = InMemoryPaymentMethodRegistry::new();
        registry.register(DraftId(1), vec![PaymentMethod::new(PAYMENT_METHOD_CODE)]);
        registry.register(
            DraftId(2),
            vec![
                PaymentMethod::new("credit_card"),
                PaymentMethod::new(PAYMENT_METHOD_CODE),
            ],
        );
        let settings = TaxSettings {
            default_shipping_tax_class: TaxClassId(2),
            ..Default::default()
        };
        CashOnDeliveryCollector::new(
            EligibilityGate::new(Box::new(registry)),
            FeeTaxProcessor::new(Box::new(ShippingPolicyItemBuilder::new(Box::new(settings)))),
            engine,
        )
    }

    fn fee_total() -> TotalAggregate {
        TotalAggregate::with_fee(Some(Money::new(dec!(5.00))), Some(Money::new(dec!(4.50))))
    }

    fn flat_twenty() -> TaxEngineBox {
        Box::new(FlatRateTaxEngine::new().with_rate(TaxClassId(2), dec!(20)))
    }

    #[test]
    fn test_collect_applies_fee_tax() {
        let collector = collector(flat_twenty());
        let draft = OrderDraft::new(Some(DraftId(1)), StoreId(1));
        let mut total = fee_total();
        total.begin_recompute();

        let outcome = collector.collect(&draft, &mut total).unwrap();

        assert_eq!(outcome, CollectOutcome::Applied);
        assert_eq!(total.total_amount(TOTAL_CODE), Money::new(dec!(5.00)));
        assert_eq!(total.fee.incl_tax.base, Some(Money::new(dec!(5.40))));
        assert_eq!(total.base_total_amount(TAX_TOTAL_CODE), Money::new(dec!(0.90)));
    }

    #[test]
    fn test_collect_skips_ineligible_draft() {
        let collector = collector(flat_twenty());
        let draft =
            OrderDraft::new(Some(DraftId(2)), StoreId(1)).with_payment_method("credit_card");
        let mut total = fee_total();

        let outcome = collector.collect(&draft, &mut total).unwrap();

        assert_eq!(outcome, CollectOutcome::NotApplicable);
        assert_eq!(total.total_amount(TAX_TOTAL_CODE), Money::ZERO);
        assert_eq!(total.fee.tax_calculation_amount.store, None);
    }

    #[test]
    fn test_collect_without_fee() {
        let collector = collector(flat_twenty());
        let draft = OrderDraft::new(Some(DraftId(1)), StoreId(1));
        let mut total = TotalAggregate::new();
        assert_eq!(
            collector.collect(&draft, &mut total).unwrap(),
            CollectOutcome::NoFee
        );
    }

    #[test]
    fn test_collect_reports_missing_breakdown() {
        let collector = collector(Box::new(SilentEngine));
        let draft = OrderDraft::new(Some(DraftId(1)), StoreId(1));
        let mut total = fee_total();

        let result = collector.collect(&draft, &mut total);

        assert!(matches!(result, Err(FeeError::TaxEngine(_))));
        assert_eq!(total.total_amount(TOTAL_CODE), Money::ZERO);
    }

    #[test]
    fn test_collect_each_pass_adds_tax_once() {
        let collector = collector(flat_twenty());
        let draft = OrderDraft::new(Some(DraftId(1)), StoreId(1));
        let mut total = fee_total();

        for _ in 0..3 {
            total.begin_recompute();
            total.add_total_amount(TAX_TOTAL_CODE, Money::new(dec!(2.00)));
            collector.collect(&draft, &mut total).unwrap();
            assert_eq!(total.total_amount(TAX_TOTAL_CODE), Money::new(dec!(3.00)));
        }
        assert_eq!(total.version(), 3);
    }

    #[test]
    fn test_second_collect_in_same_pass_is_rejected() {
        let collector = collector(flat_twenty());
        let draft = OrderDraft::new(Some(DraftId(1)), StoreId(1));
        let mut total = fee_total();
        total.begin_recompute();

        let first = collector.collect(&draft, &mut total);
        let second = collector.collect(&draft, &mut total);

        assert!(matches!(first, Ok(CollectOutcome::Applied)));
        assert!(matches!(second, Err(FeeError::ContractViolation(_))));
        assert_eq!(total.version(), 1);
        assert_eq!(total.total_amount(TAX_TOTAL_CODE), Money::new(dec!(1.00)));
        assert_eq!(total.base_total_amount(TAX_TOTAL_CODE), Money::new(dec!(0.90)));
    }
}
