#![allow(dead_code)]

use cod_fee_tax::application::collector::CashOnDeliveryCollector;
use cod_fee_tax::application::eligibility::EligibilityGate;
use cod_fee_tax::application::fee_tax::FeeTaxProcessor;
use cod_fee_tax::config::TaxSettings;
use cod_fee_tax::domain::draft::{DraftId, PaymentMethod};
use cod_fee_tax::domain::money::Money;
use cod_fee_tax::domain::ports::ShippingPolicyItemBuilder;
use cod_fee_tax::domain::tax::TaxClassId;
use cod_fee_tax::infrastructure::flat_rate::FlatRateTaxEngine;
use cod_fee_tax::infrastructure::in_memory::InMemoryPaymentMethodRegistry;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HEADER: &str = "draft,store,methods,selected,fee,base_fee,tax,base_tax";

pub fn money(value: Decimal) -> Money {
    Money::new(value)
}

pub fn registry_with(entries: Vec<(u64, Vec<&str>)>) -> InMemoryPaymentMethodRegistry {
    let registry = InMemoryPaymentMethodRegistry::new();
    for (draft, codes) in entries {
        registry.register(
            DraftId(draft),
            codes.iter().map(|code| PaymentMethod::new(*code)).collect(),
        );
    }
    registry
}

pub fn settings() -> TaxSettings {
    TaxSettings {
        default_shipping_tax_class: TaxClassId(2),
        ..Default::default()
    }
}

pub fn processor() -> FeeTaxProcessor {
    FeeTaxProcessor::new(Box::new(ShippingPolicyItemBuilder::new(Box::new(settings()))))
}

/// Collector with a 20% rate on the shipping tax class.
pub fn collector(registry: InMemoryPaymentMethodRegistry) -> CashOnDeliveryCollector {
    CashOnDeliveryCollector::new(
        EligibilityGate::new(Box::new(registry)),
        processor(),
        Box::new(FlatRateTaxEngine::new().with_rate(TaxClassId(2), Decimal::from(20))),
    )
}

pub fn drafts_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}
