use crate::domain::draft::{DraftId, OrderDraft, PaymentMethod, StoreId};
use crate::domain::money::Money;
use crate::domain::tax::TAX_TOTAL_CODE;
use crate::domain::total::TotalAggregate;
use crate::error::{FeeError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Separator between payment method codes in the `methods` column.
pub const METHOD_SEPARATOR: char = '|';

/// One input row: a draft, the methods offered for it, and its totals so far.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct DraftRecord {
    pub draft: Option<u64>,
    pub store: u32,
    pub methods: Option<String>,
    pub selected: Option<String>,
    pub fee: Option<Decimal>,
    pub base_fee: Option<Decimal>,
    /// Tax already added by other contributors in this pass.
    pub tax: Option<Decimal>,
    pub base_tax: Option<Decimal>,
}

impl DraftRecord {
    pub fn draft(&self) -> OrderDraft {
        let mut draft = OrderDraft::new(self.draft.map(DraftId), StoreId(self.store));
        draft.payment_method = self.selected.clone();
        draft
    }

    pub fn payment_methods(&self) -> Vec<PaymentMethod> {
        self.methods
            .as_deref()
            .unwrap_or_default()
            .split(METHOD_SEPARATOR)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(PaymentMethod::new)
            .collect()
    }

    /// A fresh aggregate with the raw fee set and a recompute pass begun,
    /// seeded with the tax other contributors already added.
    pub fn total(&self) -> TotalAggregate {
        let mut total =
            TotalAggregate::with_fee(self.fee.map(Money::new), self.base_fee.map(Money::new));
        total.begin_recompute();
        if let Some(tax) = self.tax {
            total.add_total_amount(TAX_TOTAL_CODE, Money::new(tax));
        }
        if let Some(tax) = self.base_tax {
            total.add_base_total_amount(TAX_TOTAL_CODE, Money::new(tax));
        }
        total
    }
}

/// Reads draft records from a CSV source.
///
/// Whitespace is trimmed and short rows are accepted, missing trailing
/// columns read as empty.
pub struct DraftReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DraftReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes records, one `Result` per row.
    pub fn records(self) -> impl Iterator<Item = Result<DraftRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FeeError::from))
    }
}
