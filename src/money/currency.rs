//! Currency identifiers and their ISO-4217 metadata.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::money::MoneyError;

/// The currency used by convenience constructors that don't take one.
pub const DEFAULT_CURRENCY: Currency = Currency::Usd;

/// An ISO-4217 currency. Each variant carries its canonical number of minor
/// units (digits after the decimal point) and a display symbol.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Chf,
    Jpy,
    Rub,
}

impl Currency {
    /// The alphabetic ISO-4217 code, e.g. `"USD"`.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Chf => "CHF",
            Currency::Jpy => "JPY",
            Currency::Rub => "RUB",
        }
    }

    /// The numeric ISO-4217 code, e.g. 840 for USD.
    pub fn numeric(&self) -> u16 {
        match self {
            Currency::Usd => 840,
            Currency::Eur => 978,
            Currency::Gbp => 826,
            Currency::Chf => 756,
            Currency::Jpy => 392,
            Currency::Rub => 643,
        }
    }

    /// How many decimal places the currency's smallest denomination
    /// represents: 2 for cents-based currencies, 0 for JPY.
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// The display symbol used by [`Money`](crate::money::Money) rendering.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Chf => "CHF",
            Currency::Jpy => "¥",
            Currency::Rub => "₽",
        }
    }

    /// Looks up a currency by its alphabetic code.
    /// Returns an error for an empty or unrecognized code.
    pub fn from_code(code: &str) -> Result<Currency, MoneyError> {
        match code {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "CHF" => Ok(Currency::Chf),
            "JPY" => Ok(Currency::Jpy),
            "RUB" => Ok(Currency::Rub),
            other => Err(MoneyError::InvalidCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s)
    }
}
