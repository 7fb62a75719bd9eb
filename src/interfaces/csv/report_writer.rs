use crate::application::collector::CollectOutcome;
use crate::domain::money::{CurrencyMode, Money};
use crate::domain::tax::{TAX_TOTAL_CODE, TOTAL_CODE};
use crate::domain::total::TotalAggregate;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Per-draft result of a fee recompute.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct FeeReport {
    pub draft: Option<u64>,
    pub outcome: CollectOutcome,
    pub fee: Option<Decimal>,
    pub base_fee: Option<Decimal>,
    pub fee_incl_tax: Option<Decimal>,
    pub base_fee_incl_tax: Option<Decimal>,
    pub fee_tax: Option<Decimal>,
    pub base_fee_tax: Option<Decimal>,
    pub tax: Decimal,
    pub base_tax: Decimal,
}

fn normalized(money: Money) -> Decimal {
    money.value().normalize()
}

impl FeeReport {
    pub fn new(draft: Option<u64>, outcome: CollectOutcome, total: &TotalAggregate) -> Self {
        let applied = outcome == CollectOutcome::Applied;
        let bucket = |mode| applied.then(|| normalized(total.amount(mode, TOTAL_CODE)));
        Self {
            draft,
            outcome,
            fee: bucket(CurrencyMode::Store),
            base_fee: bucket(CurrencyMode::Base),
            fee_incl_tax: total.fee.incl_tax.store.map(normalized),
            base_fee_incl_tax: total.fee.incl_tax.base.map(normalized),
            fee_tax: total.fee.tax_amount.store.map(normalized),
            base_fee_tax: total.fee.tax_amount.base.map(normalized),
            tax: normalized(total.total_amount(TAX_TOTAL_CODE)),
            base_tax: normalized(total.base_total_amount(TAX_TOTAL_CODE)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}

/// Writes fee reports as CSV with a header row, or as JSON lines.
pub struct ReportWriter<W: Write> {
    inner: Inner<W>,
}

enum Inner<W: Write> {
    Csv(csv::Writer<W>),
    Json(W),
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W, format: ReportFormat) -> Self {
        let inner = match format {
            ReportFormat::Csv => Inner::Csv(csv::Writer::from_writer(sink)),
            ReportFormat::Json => Inner::Json(sink),
        };
        Self { inner }
    }

    pub fn write(&mut self, report: &FeeReport) -> Result<()> {
        match &mut self.inner {
            Inner::Csv(writer) => writer.serialize(report)?,
            Inner::Json(sink) => {
                serde_json::to_writer(&mut *sink, report)?;
                sink.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        match &mut self.inner {
            Inner::Csv(writer) => writer.flush()?,
            Inner::Json(sink) => sink.flush()?,
        }
        Ok(())
    }
}
