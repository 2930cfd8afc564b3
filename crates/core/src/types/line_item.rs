//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::date::CourseDate;
use super::id::CourseId;

/// Errors raised when a new line item fails its preconditions.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// The course id is empty or whitespace.
    #[error("course id cannot be empty")]
    EmptyId,
    /// The session date is empty or whitespace.
    #[error("course date cannot be empty")]
    EmptyDate,
    /// The price is below zero.
    #[error("price cannot be negative (got {0})")]
    NegativePrice(Decimal),
    /// The change would push the cart total past what a `Decimal` can hold.
    #[error("cart total would overflow")]
    TotalOverflow,
}

/// Identity of a line item: the same course on different dates is a
/// different entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub id: CourseId,
    pub date: CourseDate,
}

impl LineKey {
    #[must_use]
    pub fn new(id: impl Into<CourseId>, date: impl Into<CourseDate>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
        }
    }
}

/// One (course, date) entry in the cart.
///
/// The serialized form matches what the site has always stored in the
/// browser: `price` is a JSON number, every other field a string except
/// `quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: CourseId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub date: CourseDate,
    pub location: String,
    /// Always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Whether this entry has the given identity.
    #[must_use]
    pub fn matches(&self, id: &CourseId, date: &CourseDate) -> bool {
        self.id == *id && self.date == *date
    }

    /// The identity key of this entry.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id.clone(),
            date: self.date.clone(),
        }
    }

    /// `price × quantity`, saturating at the `Decimal` range.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// `price × quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// A course offering about to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    pub id: CourseId,
    pub name: String,
    pub price: Decimal,
    pub date: CourseDate,
    pub location: String,
}

impl NewLineItem {
    #[must_use]
    pub fn new(
        id: impl Into<CourseId>,
        name: impl Into<String>,
        price: Decimal,
        date: impl Into<CourseDate>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            date: date.into(),
            location: location.into(),
        }
    }

    /// Check the preconditions for entering the cart.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition: empty id, empty date, or a
    /// negative price.
    pub fn validate(&self) -> Result<(), LineItemError> {
        if self.id.is_blank() {
            return Err(LineItemError::EmptyId);
        }
        if self.date.is_blank() {
            return Err(LineItemError::EmptyDate);
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(LineItemError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// The line item this offering becomes, with a quantity of one.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            price: self.price,
            date: self.date,
            location: self.location,
            quantity: 1,
        }
    }
}
