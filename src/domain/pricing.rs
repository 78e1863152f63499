//! Money handling and effective price resolution shared by products,
//! size variants, cart lines and order snapshots.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Monetary amount stored as integer minor units (cents).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Build an amount from minor units.
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole currency units.
    pub const fn from_units(units: i64) -> Self {
        Self(units * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Multiply the amount by a line quantity, saturating on overflow.
    pub fn times(self, quantity: i32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Parse a decimal string such as `"12"`, `"12.5"` or `"-0.99"`.
    ///
    /// At most two fractional digits are accepted. Returns `None` for
    /// anything that is not a plain decimal number.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.as_bytes().first()? {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if fraction.len() > 2 {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };
        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().ok()? * 10,
            _ => fraction.parse().ok()?,
        };

        let cents = whole_value
            .checked_mul(100)?
            .checked_add(fraction_value)?;
        Some(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a decimal amount with at most two fractional digits")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
                Money::parse(value).ok_or_else(|| E::custom(format!("invalid amount `{value}`")))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
                value
                    .checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
                i64::try_from(value)
                    .map_err(|_| E::custom("amount out of range"))
                    .and_then(|value| self.visit_i64(value))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// A price as it arrives at the pricing rules: either a usable amount or
/// something that could not be read as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceValue {
    Amount(Money),
    Invalid,
}

impl PriceValue {
    /// Interpret free text as a price; malformed text becomes `Invalid`.
    pub fn from_text(input: &str) -> Self {
        Money::parse(input).map_or(PriceValue::Invalid, PriceValue::Amount)
    }

    fn amount(self) -> Option<Money> {
        match self {
            PriceValue::Amount(money) => Some(money),
            PriceValue::Invalid => None,
        }
    }
}

impl From<Money> for PriceValue {
    fn from(value: Money) -> Self {
        PriceValue::Amount(value)
    }
}

/// Whether `offer` is a real discount on `original`.
pub fn has_offer(original: PriceValue, offer: Option<PriceValue>) -> bool {
    let (Some(original), Some(offer)) = (original.amount(), offer.and_then(PriceValue::amount))
    else {
        return false;
    };
    offer.is_positive() && offer < original
}

/// Whole-number discount percentage, rounded half up.
pub fn discount_percentage(original: PriceValue, offer: Option<PriceValue>) -> Option<i64> {
    if !has_offer(original, offer) {
        return None;
    }
    let original = original.amount()?.cents();
    let offer = offer.and_then(PriceValue::amount)?.cents();
    if original <= 0 {
        return None;
    }

    let diff = i128::from(original - offer);
    let original = i128::from(original);
    let rounded = (diff * 200 + original) / (2 * original);
    i64::try_from(rounded).ok()
}

/// Offer price when a valid offer applies, else the original price.
pub fn selling_price(original: PriceValue, offer: Option<PriceValue>) -> PriceValue {
    match offer {
        Some(offer) if has_offer(original, Some(offer)) => offer,
        _ => original,
    }
}

/// Price summary rendered next to every priced entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub original_price: Money,
    pub offer_price: Option<Money>,
    pub has_offer: bool,
    pub discount_percentage: Option<i64>,
    pub selling_price: Money,
}

impl PriceQuote {
    pub fn new(original: Money, offer: Option<Money>) -> Self {
        let original_value = PriceValue::from(original);
        let offer_value = offer.map(PriceValue::from);
        let selling_price = selling_price(original_value, offer_value)
            .amount()
            .unwrap_or(original);

        Self {
            original_price: original,
            offer_price: offer,
            has_offer: has_offer(original_value, offer_value),
            discount_percentage: discount_percentage(original_value, offer_value),
            selling_price,
        }
    }

    /// The offer price only when it applies.
    pub fn discounted_price(&self) -> Option<Money> {
        if self.has_offer { self.offer_price } else { None }
    }
}

/// Entities carrying an original price and an optional offer price.
pub trait Priced {
    fn original_price(&self) -> Money;
    fn offer_price(&self) -> Option<Money>;

    fn quote(&self) -> PriceQuote {
        PriceQuote::new(self.original_price(), self.offer_price())
    }
}

/// Rejections for an offer price submitted at a write site.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OfferPriceError {
    #[error("Invalid offer price")]
    Invalid,
    #[error("Offer price must be less than original price")]
    NotBelowOriginal,
}

/// Check that a submitted offer price can be stored against `original`.
pub fn check_offer_price(original: Money, offer: Money) -> Result<(), OfferPriceError> {
    if !offer.is_positive() {
        return Err(OfferPriceError::Invalid);
    }
    if offer >= original {
        return Err(OfferPriceError::NotBelowOriginal);
    }
    Ok(())
}
