use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// A monetary value in a single currency.
///
/// Wraps `rust_decimal::Decimal` so fee, tax and bucket amounts never pass
/// through floating point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds to `dp` decimal places, half away from zero.
    pub fn round_dp(self, dp: u32) -> Self {
        Self(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Selects which of the two parallel currencies a computation runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyMode {
    /// The currency the customer sees for the draft's store.
    Store,
    /// The website base currency.
    Base,
}

impl CurrencyMode {
    pub const ALL: [CurrencyMode; 2] = [CurrencyMode::Store, CurrencyMode::Base];
}

impl fmt::Display for CurrencyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyMode::Store => f.write_str("store"),
            CurrencyMode::Base => f.write_str("base"),
        }
    }
}

/// A value held once per currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerCurrency<T> {
    pub store: T,
    pub base: T,
}

impl<T> PerCurrency<T> {
    pub fn new(store: T, base: T) -> Self {
        Self { store, base }
    }

    pub fn get(&self, mode: CurrencyMode) -> &T {
        match mode {
            CurrencyMode::Store => &self.store,
            CurrencyMode::Base => &self.base,
        }
    }

    pub fn get_mut(&mut self, mode: CurrencyMode) -> &mut T {
        match mode {
            CurrencyMode::Store => &mut self.store,
            CurrencyMode::Base => &mut self.base,
        }
    }
}
