//! The monetary value type: an immutable decimal amount tagged with a
//! currency and a rounding policy.
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{Currency, DEFAULT_CURRENCY, Rounding};

/// An immutable monetary value.
///
/// Every operation that "changes" a value returns a new one; the operands are
/// never touched. Addition and subtraction are exact. Multiplication and
/// division by a non-integer scalar rescale the result to the currency's
/// minor units using the receiver's rounding policy.
///
/// Binary arithmetic and the relational predicates require both operands to
/// share a currency and fail with [`MoneyError::MismatchedCurrency`]
/// otherwise. [`Money::total_cmp`] is the one exception: it orders values of
/// any currency, for sorting (see its docs for how it differs from `==`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
    rounding: Rounding,
}

impl Money {
    /// Creates a value with the default rounding policy (half-even).
    /// The amount is stored exactly as given, scale included.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Money::with_rounding(amount, currency, Rounding::default())
    }

    /// Creates a value with an explicit rounding policy.
    pub fn with_rounding(amount: Decimal, currency: Currency, rounding: Rounding) -> Self {
        Money {
            amount,
            currency,
            rounding,
        }
    }

    /// Creates a value in the process-wide default currency.
    pub fn in_default_currency(amount: Decimal) -> Self {
        Money::new(amount, DEFAULT_CURRENCY)
    }

    /// Creates a value from a count of the currency's minor units, e.g.
    /// `from_minor_units(150, Currency::Usd)` is 1.50 USD. This is the only
    /// constructor that rescales its input.
    pub fn from_minor_units(count: i64, currency: Currency) -> Self {
        Money::new(Decimal::new(count, currency.minor_units()), currency)
    }

    /// The exact decimal amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency this value is denominated in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The rounding policy applied by multiplication and division.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Checks whether two values share a currency.
    pub fn is_same_currency_as(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Adds two currency-compatible values. Exact, never rounds.
    /// The result keeps the receiver's rounding policy.
    pub fn add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.check_currency(other)?;
        Ok(self.derive(self.amount + other.amount))
    }

    /// Subtracts a currency-compatible value. Exact, never rounds.
    pub fn subtract(&self, other: &Money) -> Result<Money, MoneyError> {
        self.check_currency(other)?;
        Ok(self.derive(self.amount - other.amount))
    }

    /// Multiplies by an integer factor. Exact, no rescaling.
    pub fn multiply(&self, factor: i64) -> Money {
        self.derive(self.amount * Decimal::from(factor))
    }

    /// Multiplies by a decimal factor at full precision, then rescales the
    /// product to the currency's minor units with the receiver's rounding.
    pub fn multiply_real(&self, factor: Decimal) -> Money {
        self.derive(self.rescale(self.amount * factor))
    }

    /// Multiplies by a float factor. The float is converted through its
    /// shortest round-trip decimal text, so `1.1` means 1.1 and not the
    /// binary expansion 1.100000000000000088…; a non-finite factor fails
    /// with [`MoneyError::InvalidAmount`].
    pub fn multiply_f64(&self, factor: f64) -> Result<Money, MoneyError> {
        Ok(self.multiply_real(decimal_from_f64(factor)?))
    }

    /// Divides by an integer divisor, rescaling the quotient to the
    /// currency's minor units with the receiver's rounding.
    /// Fails with [`MoneyError::DivisionByZero`] if the divisor is 0.
    pub fn divide(&self, divisor: i64) -> Result<Money, MoneyError> {
        self.divide_real(Decimal::from(divisor))
    }

    /// Divides by a decimal divisor, rescaling as [`Money::divide`] does.
    pub fn divide_real(&self, divisor: Decimal) -> Result<Money, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(self.derive(self.rescale(self.amount / divisor)))
    }

    /// Divides by a float divisor, converted as in [`Money::multiply_f64`].
    /// The zero check happens before the conversion.
    pub fn divide_f64(&self, divisor: f64) -> Result<Money, MoneyError> {
        if divisor == 0.0 {
            return Err(MoneyError::DivisionByZero);
        }
        self.divide_real(decimal_from_f64(divisor)?)
    }

    /// Flips the sign of the amount.
    pub fn negate(&self) -> Money {
        self.derive(-self.amount)
    }

    /// The absolute value of the amount.
    pub fn abs(&self) -> Money {
        self.derive(self.amount.abs())
    }

    /// Whether the amount is strictly greater than zero, at full precision.
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Whether the amount is strictly less than zero, at full precision.
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Whether the amount is zero, at full precision.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Numeric equivalence of two currency-compatible values, insensitive to
    /// trailing-zero scale: 0 and 0.00 are equivalent here even though they
    /// are distinct under `==`.
    pub fn amount_eq(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount == other.amount)
    }

    /// Strictly greater than, for currency-compatible values.
    pub fn gt(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount > other.amount)
    }

    /// Greater than or numerically equivalent.
    pub fn gte(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount >= other.amount)
    }

    /// Strictly less than, for currency-compatible values.
    pub fn lt(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount < other.amount)
    }

    /// Less than or numerically equivalent.
    pub fn lte(&self, other: &Money) -> Result<bool, MoneyError> {
        self.check_currency(other)?;
        Ok(self.amount <= other.amount)
    }

    /// A total order over all values, for sorting and ordered collections:
    /// by numeric amount, then currency code, then rounding policy.
    ///
    /// Unlike the relational predicates this never fails on a currency
    /// mismatch, and unlike `==` it ignores trailing-zero scale, so
    /// `total_cmp` can report `Equal` for values that compare unequal under
    /// `==` (0 vs 0.00 of the same currency and rounding). That asymmetry is
    /// deliberate; it is why this is an inherent method rather than an `Ord`
    /// implementation.
    pub fn total_cmp(&self, other: &Money) -> Ordering {
        self.amount
            .cmp(&other.amount)
            .then_with(|| self.currency.code().cmp(other.currency.code()))
            .then_with(|| self.rounding.ordinal().cmp(&other.rounding.ordinal()))
    }

    /// A new value in the receiver's currency and rounding policy.
    fn derive(&self, amount: Decimal) -> Money {
        Money {
            amount,
            currency: self.currency,
            rounding: self.rounding,
        }
    }

    /// Brings an intermediate result to exactly the currency's minor-unit
    /// scale, rounding excess digits with the receiver's policy.
    fn rescale(&self, amount: Decimal) -> Decimal {
        let scale = self.currency.minor_units();
        let mut result = amount.round_dp_with_strategy(scale, self.rounding.strategy());
        if result.scale() < scale {
            // Padding with trailing zeros, no digits are lost.
            result.rescale(scale);
        }
        result
    }

    fn check_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(MoneyError::MismatchedCurrency {
                expected: self.currency,
                actual: other.currency,
            })
        }
    }
}

/// Converts through the float's shortest round-trip decimal text rather than
/// its binary value, avoiding double-rounding error.
fn decimal_from_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::InvalidAmount(value.to_string()));
    }
    let text = value.to_string();
    text.parse::<Decimal>()
        .map_err(|_| MoneyError::InvalidAmount(text))
}

/// Scale-sensitive equality: amount digits, currency, and rounding policy
/// must all match. `1.5 USD` and `1.50 USD` are numerically equivalent (see
/// [`Money::amount_eq`]) but not equal here.
impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.amount.mantissa() == other.amount.mantissa()
            && self.amount.scale() == other.amount.scale()
            && self.currency == other.currency
            && self.rounding == other.rounding
    }
}

impl Eq for Money {}

impl Hash for Money {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.amount.mantissa().hash(state);
        self.amount.scale().hash(state);
        self.currency.hash(state);
        self.rounding.hash(state);
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.symbol())
    }
}

/// Errors raised by monetary construction, lookup, and arithmetic. All of
/// them signal caller error and propagate; nothing retries or suppresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("unrecognized currency code: {0:?}")]
    InvalidCurrency(String),
    #[error("currency {actual} doesn't match the expected currency {expected}")]
    MismatchedCurrency { expected: Currency, actual: Currency },
    #[error("division by zero")]
    DivisionByZero,
    #[error("amount is not a representable decimal: {0}")]
    InvalidAmount(String),
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use rust_decimal_macros::dec;

    use crate::money::{Currency, Money, MoneyError, Rounding};

    fn usd(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::Usd)
    }

    #[test]
    fn test_add_subtract_round_trip() {
        let a = usd(dec!(10.37));
        let b = usd(dec!(2.95));
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.amount(), dec!(13.32));
        assert_eq!(sum.subtract(&b).unwrap(), a);
    }

    #[test]
    fn test_add_is_commutative() {
        let a = usd(dec!(1.01));
        let b = usd(dec!(2.02));
        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn test_additive_identity() {
        let a = usd(dec!(7.77));
        assert_eq!(a.add(&usd(dec!(0))).unwrap(), a);
    }

    #[test]
    fn test_operands_unchanged() {
        let a = usd(dec!(5.00));
        let b = usd(dec!(3.00));
        let _ = a.add(&b).unwrap();
        let _ = a.multiply(4);
        let _ = a.negate();
        assert_eq!(a.amount(), dec!(5.00));
        assert_eq!(b.amount(), dec!(3.00));
    }

    #[test]
    fn test_mismatched_currency() {
        let a = Money::new(dec!(10), Currency::Usd);
        let b = Money::new(dec!(10), Currency::Eur);
        assert!(matches!(
            a.add(&b),
            Err(MoneyError::MismatchedCurrency {
                expected: Currency::Usd,
                actual: Currency::Eur,
            })
        ));
        assert!(a.subtract(&b).is_err());
        assert!(a.gt(&b).is_err());
        assert!(a.amount_eq(&b).is_err());
    }

    #[test]
    fn test_multiply_integer_is_exact() {
        let a = usd(dec!(1.005));
        // No rescaling for integer factors, the third decimal survives.
        assert_eq!(a.multiply(3).amount(), dec!(3.015));
    }

    #[test]
    fn test_multiply_real_rounds_half_even() {
        let a = usd(dec!(1.005));
        assert_eq!(a.multiply_real(dec!(1.0)).amount(), dec!(1.00));
        let b = usd(dec!(1.015));
        assert_eq!(b.multiply_real(dec!(1.0)).amount(), dec!(1.02));
    }

    #[test]
    fn test_multiply_real_rounds_half_up() {
        let a = Money::with_rounding(dec!(1.005), Currency::Usd, Rounding::HalfUp);
        assert_eq!(a.multiply_real(dec!(1.0)).amount(), dec!(1.01));
    }

    #[test]
    fn test_multiply_f64_uses_decimal_text() {
        // 1.1 has no exact binary form; the text path must still mean 1.1.
        let a = usd(dec!(10.00));
        assert_eq!(a.multiply_f64(1.1).unwrap().amount(), dec!(11.00));
    }

    #[test]
    fn test_multiply_f64_rejects_non_finite() {
        let a = usd(dec!(1));
        assert!(matches!(
            a.multiply_f64(f64::NAN),
            Err(MoneyError::InvalidAmount(_))
        ));
        assert!(matches!(
            a.multiply_f64(f64::INFINITY),
            Err(MoneyError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_divide() {
        let a = usd(dec!(10.00));
        assert_eq!(a.divide(3).unwrap().amount(), dec!(3.33));
        assert_eq!(a.divide_real(dec!(2.5)).unwrap().amount(), dec!(4.00));
        assert_eq!(a.divide_f64(2.5).unwrap().amount(), dec!(4.00));
    }

    #[test]
    fn test_same_currency_check() {
        let a = usd(dec!(1));
        assert!(a.is_same_currency_as(&usd(dec!(2))));
        assert!(!a.is_same_currency_as(&Money::new(dec!(1), Currency::Eur)));
    }

    #[test]
    fn test_divide_by_zero() {
        let a = usd(dec!(10));
        assert!(matches!(a.divide(0), Err(MoneyError::DivisionByZero)));
        assert!(matches!(
            a.divide_real(dec!(0.00)),
            Err(MoneyError::DivisionByZero)
        ));
        assert!(matches!(a.divide_f64(0.0), Err(MoneyError::DivisionByZero)));
    }

    #[test]
    fn test_zero_minor_unit_currency() {
        let a = Money::new(dec!(1000), Currency::Jpy);
        assert_eq!(a.divide(3).unwrap().amount(), dec!(333));
    }

    #[test]
    fn test_negate_abs() {
        let a = usd(dec!(4.20));
        assert_eq!(a.negate().amount(), dec!(-4.20));
        assert_eq!(a.negate().abs(), a);
        assert_eq!(a.abs(), a);
    }

    #[test]
    fn test_sign_predicates() {
        assert!(usd(dec!(0.001)).is_positive());
        assert!(usd(dec!(-0.001)).is_negative());
        assert!(usd(dec!(0.000)).is_zero());
        assert!(!usd(dec!(0.000)).is_positive());
    }

    #[test]
    fn test_amount_eq_ignores_scale() {
        let a = usd(dec!(0));
        let b = usd(dec!(0.00));
        assert!(a.amount_eq(&b).unwrap());
        // Scale-sensitive equality still tells them apart.
        assert_ne!(a, b);
    }

    #[test]
    fn test_amount_eq_is_an_equivalence() {
        let a = usd(dec!(1.5));
        let b = usd(dec!(1.50));
        let c = usd(dec!(1.500));
        assert!(a.amount_eq(&a).unwrap());
        assert!(a.amount_eq(&b).unwrap() && b.amount_eq(&a).unwrap());
        assert!(b.amount_eq(&c).unwrap() && a.amount_eq(&c).unwrap());
    }

    #[test]
    fn test_equals_requires_matching_rounding() {
        let a = usd(dec!(1.00));
        let b = Money::with_rounding(dec!(1.00), Currency::Usd, Rounding::HalfUp);
        assert_ne!(a, b);
        assert!(a.amount_eq(&b).unwrap());
    }

    #[test]
    fn test_relational_predicates() {
        let small = usd(dec!(1.00));
        let big = usd(dec!(2));
        assert!(big.gt(&small).unwrap());
        assert!(big.gte(&small).unwrap());
        assert!(small.lt(&big).unwrap());
        assert!(small.lte(&big).unwrap());
        assert!(small.gte(&usd(dec!(1))).unwrap());
        assert!(small.lte(&usd(dec!(1))).unwrap());
        assert!(!small.gt(&big).unwrap());
    }

    #[test]
    fn test_total_cmp_orders_by_amount_then_currency_then_rounding() {
        let a = Money::new(dec!(1), Currency::Usd);
        let b = Money::new(dec!(2), Currency::Eur);
        assert_eq!(a.total_cmp(&b), Ordering::Less);

        // Amount ties break on currency code: EUR < USD.
        let c = Money::new(dec!(1), Currency::Eur);
        assert_eq!(c.total_cmp(&a), Ordering::Less);

        // Full tie breaks on the rounding ordinal.
        let d = Money::with_rounding(dec!(1), Currency::Usd, Rounding::HalfUp);
        assert_eq!(a.total_cmp(&d), Ordering::Less);
        assert_eq!(d.total_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_total_cmp_consistent_with_equality_on_full_match() {
        let a = usd(dec!(3.33));
        let b = usd(dec!(3.33));
        assert_eq!(a.total_cmp(&b), Ordering::Equal);
        assert_eq!(a, b);
    }

    #[test]
    fn test_total_cmp_equal_despite_scale_difference() {
        // The documented asymmetry: a scale tie is Equal for ordering but
        // unequal under ==.
        let a = usd(dec!(1));
        let b = usd(dec!(1.00));
        assert_eq!(a.total_cmp(&b), Ordering::Equal);
        assert_ne!(a, b);
    }

    #[test]
    fn test_sorting_with_total_cmp() {
        let mut values = vec![usd(dec!(3)), usd(dec!(-1)), usd(dec!(0.50))];
        values.sort_by(|a, b| a.total_cmp(b));
        let amounts: Vec<_> = values.iter().map(|m| m.amount()).collect();
        assert_eq!(amounts, vec![dec!(-1), dec!(0.50), dec!(3)]);
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(
            Money::from_minor_units(150, Currency::Usd),
            Money::new(dec!(1.50), Currency::Usd)
        );
        assert_eq!(
            Money::from_minor_units(1000, Currency::Jpy).amount(),
            dec!(1000)
        );
    }

    #[test]
    fn test_default_currency_constructor() {
        let a = Money::in_default_currency(dec!(9.99));
        assert_eq!(a.currency(), Currency::Usd);
        assert_eq!(a.rounding(), Rounding::HalfEven);
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(dec!(1.50)).to_string(), "1.50 $");
        assert_eq!(Money::new(dec!(500), Currency::Jpy).to_string(), "500 ¥");
    }

    #[test]
    fn test_result_keeps_receiver_rounding() {
        let a = Money::with_rounding(dec!(1.00), Currency::Usd, Rounding::Floor);
        let b = usd(dec!(2.00));
        assert_eq!(a.add(&b).unwrap().rounding(), Rounding::Floor);
        assert_eq!(a.multiply(2).rounding(), Rounding::Floor);
    }
}
