//! Rounding policies applied when an operation needs more precision than a
//! currency's minor units allow.
use std::fmt;

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

/// The rounding rule a [`Money`](crate::money::Money) value carries.
///
/// Only multiplication and division ever round; addition and subtraction are
/// exact. The default is [`Rounding::HalfEven`] (banker's rounding), which
/// rounds ties to the even neighbor to avoid cumulative bias.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round ties to the even neighbor.
    #[default]
    HalfEven,
    /// Round ties away from zero.
    HalfUp,
    /// Round ties towards zero.
    HalfDown,
    /// Round away from zero.
    Up,
    /// Round towards zero (truncate).
    Down,
    /// Round towards negative infinity.
    Floor,
    /// Round towards positive infinity.
    Ceiling,
}

impl Rounding {
    pub(crate) fn strategy(&self) -> RoundingStrategy {
        match self {
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfDown => RoundingStrategy::MidpointTowardZero,
            Rounding::Up => RoundingStrategy::AwayFromZero,
            Rounding::Down => RoundingStrategy::ToZero,
            Rounding::Floor => RoundingStrategy::ToNegativeInfinity,
            Rounding::Ceiling => RoundingStrategy::ToPositiveInfinity,
        }
    }

    /// A stable ordinal, used as the final tie-break of
    /// [`Money::total_cmp`](crate::money::Money::total_cmp).
    pub fn ordinal(&self) -> u8 {
        match self {
            Rounding::HalfEven => 0,
            Rounding::HalfUp => 1,
            Rounding::HalfDown => 2,
            Rounding::Up => 3,
            Rounding::Down => 4,
            Rounding::Floor => 5,
            Rounding::Ceiling => 6,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rounding::HalfEven => "half-even",
            Rounding::HalfUp => "half-up",
            Rounding::HalfDown => "half-down",
            Rounding::Up => "up",
            Rounding::Down => "down",
            Rounding::Floor => "floor",
            Rounding::Ceiling => "ceiling",
        };
        f.write_str(name)
    }
}
