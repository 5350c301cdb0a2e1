//! Monetary values: currency-tagged exact decimals with checked arithmetic,
//! rounding policies, and both scale-sensitive and scale-insensitive
//! comparison.
mod currency;
mod rounding;
mod value;

pub use currency::*;
pub use rounding::*;
pub use value::*;
