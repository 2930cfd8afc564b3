//! Display formatting for prices and course dates.

use mdi_core::{CourseDate, Price};
use rust_decimal::Decimal;

/// US-dollar amount as shown on the site, e.g. `$1,249.00`.
#[must_use]
pub fn currency(amount: Decimal) -> String {
    Price::usd(amount).to_string()
}

/// Price in its own currency.
#[must_use]
pub fn price(price: Price) -> String {
    price.to_string()
}

/// Course date in long form, e.g. `Saturday, March 15, 2025`.
#[must_use]
pub fn long_date(date: &CourseDate) -> String {
    date.long_format()
}

#[cfg(test)]
mod tests {
    use mdi_core::CurrencyCode;

    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(currency(Decimal::new(124_900, 2)), "$1,249.00");
        assert_eq!(currency(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn test_price_other_currency() {
        assert_eq!(
            price(Price::new(Decimal::from(15), CurrencyCode::EUR)),
            "€15.00"
        );
    }

    #[test]
    fn test_long_date() {
        assert_eq!(
            long_date(&CourseDate::new("2025-03-15")),
            "Saturday, March 15, 2025"
        );
    }
}
