use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// number of decimal places in the minor currency unit (cents)
pub const MINOR_UNIT_DP: u32 = 2;

/// Money type backed by a fixed-point decimal.
///
/// Amounts entering from documents are rounded half-up to the minor unit.
/// Addition and subtraction are exact. Rounding to the minor unit happens only
/// where a formula produces a new amount (see [`Money::percentage`]), never on
/// intermediate steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(from = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, MINOR_UNIT_DP));

    /// create from decimal, rounded half-up to the minor unit
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_half_up(d))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// create from minor amount (cents)
    pub fn from_minor(amount: i64) -> Self {
        Money(Decimal::new(amount, MINOR_UNIT_DP))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly below zero; `-0` is not negative
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// subtract, flooring the result at zero
    pub fn saturating_sub(self, other: Self) -> Self {
        (self - other).max(Money::ZERO)
    }

    /// percentage of this amount (e.g. 50% of $1,000), rounded half-up once
    pub fn percentage(&self, pct: Percentage) -> Self {
        Money::from_decimal(self.0 * pct.as_decimal() / Decimal::ONE_HUNDRED)
    }
}

fn round_half_up(d: Decimal) -> Decimal {
    d.round_dp_with_strategy(MINOR_UNIT_DP, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 -= other.0;
    }
}

/// percentage in the 0..=100 scale (e.g. 50 for 50%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Percentage(Decimal);

impl Percentage {
    pub const ZERO: Percentage = Percentage(Decimal::ZERO);
    pub const FULL: Percentage = Percentage(Decimal::ONE_HUNDRED);

    pub fn from_decimal(d: Decimal) -> Self {
        Percentage(d)
    }

    pub fn from_whole(p: u32) -> Self {
        Percentage(Decimal::from(p))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// true when within 0..=100
    pub fn is_valid(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 <= Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl From<Decimal> for Percentage {
    fn from(d: Decimal) -> Self {
        Percentage::from_decimal(d)
    }
}
