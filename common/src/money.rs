//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// Non-negative amount of money, stored as an integer number of cents.
///
/// The decimal-dollar view is derived from the stored cents and never the
/// other way around, so the two views cannot drift apart.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(i64);

impl Money {
    /// [`Money`] amount of zero cents.
    pub const ZERO: Self = Self(0);

    /// Creates a new [`Money`] from the provided number of cents.
    ///
    /// [`None`] is returned if the provided number is negative.
    #[must_use]
    pub fn from_cents(cents: i64) -> Option<Self> {
        (cents >= 0).then_some(Self(cents))
    }

    /// Creates a new [`Money`] from the provided decimal-dollar amount,
    /// rounding to the nearest cent.
    ///
    /// [`None`] is returned if the amount is negative or too large.
    #[must_use]
    pub fn from_dollars(dollars: Decimal) -> Option<Self> {
        if dollars.is_sign_negative() {
            return None;
        }
        dollars
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round()
            .to_i64()
            .map(Self)
    }

    /// Returns the number of cents of this [`Money`].
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns the decimal-dollar view of this [`Money`].
    #[must_use]
    pub fn dollars(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dollars())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dollars =
            Decimal::from_str(s).map_err(|_| "invalid money amount")?;
        Self::from_dollars(dollars).ok_or("money amount out of range")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn converts_cents_to_dollars() {
        let money = Money::from_cents(505).unwrap();
        assert_eq!(money.dollars(), decimal("5.05"));
        assert_eq!(money.to_string(), "5.05");
    }

    #[test]
    fn converts_dollars_to_cents() {
        let money = Money::from_dollars(decimal("50.5")).unwrap();
        assert_eq!(money.cents(), 5050);
    }

    #[test]
    fn round_trips_to_the_cent() {
        for cents in [0, 1, 99, 100, 505, 5050, 123_456_789] {
            let money = Money::from_cents(cents).unwrap();
            assert_eq!(
                Money::from_dollars(money.dollars()).unwrap().cents(),
                cents,
            );
        }
    }

    #[test]
    fn rounds_sub_cent_amounts() {
        assert_eq!(
            Money::from_dollars(decimal("5.054")).unwrap().cents(),
            505,
        );
        assert_eq!(
            Money::from_dollars(decimal("5.056")).unwrap().cents(),
            506,
        );
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(Money::from_cents(-1).is_none());
        assert!(Money::from_dollars(decimal("-0.01")).is_none());
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("5.05").unwrap().cents(), 505);
        assert_eq!(Money::from_str("0").unwrap().cents(), 0);
        assert!(Money::from_str("five").is_err());
        assert!(Money::from_str("-1").is_err());
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(!Money::ZERO.is_positive());
        assert!(Money::from_cents(1).unwrap().is_positive());
    }
}
