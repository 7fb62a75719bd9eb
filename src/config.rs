use crate::domain::draft::StoreId;
use crate::domain::ports::TaxConfig;
use crate::domain::tax::TaxClassId;
use crate::error::{FeeError, Result};
use config::{Config, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

/// File tried when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "cod-fee-tax.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tax: TaxSettings,
}

/// Tax configuration as the fee computation sees it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxSettings {
    /// Whether shipping prices, and so the fee, are entered tax-inclusive.
    pub shipping_price_includes_tax: bool,
    pub default_shipping_tax_class: TaxClassId,
    /// Per-store overrides keyed by store id.
    pub store_shipping_tax_class: BTreeMap<String, TaxClassId>,
    /// Percentage rate per tax class id.
    pub rates: BTreeMap<String, Decimal>,
}

impl Settings {
    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_FILE`] when no path is given.
    ///
    /// A missing default file falls back to built-in defaults; an explicit path must load.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path, true),
            None => match Self::load_from_file(Path::new(DEFAULT_CONFIG_FILE), false) {
                Ok(settings) => Ok(settings),
                Err(err) => {
                    warn!("Could not read config file: {err}. Using default configuration.");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_from_file(path: &Path, required: bool) -> Result<Self> {
        let settings = Config::builder()
            .add_source(File::from(path).required(required))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}

impl TaxSettings {
    /// The `rates` table with its keys parsed as tax class ids.
    pub fn class_rates(&self) -> Result<BTreeMap<TaxClassId, Decimal>> {
        self.rates
            .iter()
            .map(|(class, rate)| {
                let id = class.parse::<u32>().map_err(|e| {
                    FeeError::TaxConfig(format!("invalid tax class id '{class}': {e}"))
                })?;
                Ok((TaxClassId(id), *rate))
            })
            .collect()
    }
}

impl TaxConfig for TaxSettings {
    fn shipping_tax_class(&self, store: StoreId) -> Result<TaxClassId> {
        Ok(self
            .store_shipping_tax_class
            .get(&store.to_string())
            .copied()
            .unwrap_or(self.default_shipping_tax_class))
    }

    fn shipping_price_includes_tax(&self) -> Result<bool> {
        Ok(self.shipping_price_includes_tax)
    }
}
