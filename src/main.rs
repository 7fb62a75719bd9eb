use clap::Parser;
use cod_fee_tax::application::collector::CashOnDeliveryCollector;
use cod_fee_tax::application::eligibility::EligibilityGate;
use cod_fee_tax::application::fee_tax::FeeTaxProcessor;
use cod_fee_tax::config::Settings;
use cod_fee_tax::domain::draft::DraftId;
use cod_fee_tax::domain::ports::ShippingPolicyItemBuilder;
use cod_fee_tax::infrastructure::flat_rate::FlatRateTaxEngine;
use cod_fee_tax::infrastructure::in_memory::InMemoryPaymentMethodRegistry;
use cod_fee_tax::interfaces::csv::draft_reader::DraftReader;
use cod_fee_tax::interfaces::csv::report_writer::{FeeReport, ReportFormat, ReportWriter};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input drafts CSV file
    input: PathBuf,

    /// Tax settings file (TOML). Defaults to ./cod-fee-tax.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit one JSON object per draft instead of CSV
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).into_diagnostic()?;
    let engine = FlatRateTaxEngine::from_settings(&settings.tax).into_diagnostic()?;
    let registry = InMemoryPaymentMethodRegistry::new();

    let collector = CashOnDeliveryCollector::new(
        EligibilityGate::new(Box::new(registry.clone())),
        FeeTaxProcessor::new(Box::new(ShippingPolicyItemBuilder::new(Box::new(settings.tax)))),
        Box::new(engine),
    );

    let format = if cli.json { ReportFormat::Json } else { ReportFormat::Csv };
    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock(), format);

    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = DraftReader::new(file);
    let mut processed = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                error!("Error reading draft: {e}");
                continue;
            }
        };

        if let Some(id) = record.draft {
            registry.register(DraftId(id), record.payment_methods());
        }
        let draft = record.draft();
        let mut total = record.total();

        match collector.collect(&draft, &mut total) {
            Ok(outcome) => {
                writer
                    .write(&FeeReport::new(record.draft, outcome, &total))
                    .into_diagnostic()?;
                processed += 1;
            }
            Err(e) => error!(draft = ?record.draft, "Error recomputing fee: {e}"),
        }
    }

    writer.flush().into_diagnostic()?;
    info!(processed, "fee recompute finished");
    Ok(())
}
