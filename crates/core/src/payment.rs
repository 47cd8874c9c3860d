//! Payment totals, payment-method validation, and input formatters.
//!
//! Validation here is synchronous and local; actually charging the method is
//! the API crate's gateway concern.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::catalog::{BillingPeriod, SubscriptionPlan};
use crate::error::CoreError;

/// Flat VAT surcharge applied to every non-trial charge.
pub const VAT_RATE: f64 = 0.20;

/// Minimum digit count for a mobile-money phone number.
pub const MIN_MOBILE_DIGITS: usize = 9;

/// `MM/YY` with a calendar month.
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/\d{2}$").expect("valid expiry regex"));

/// A payment method as submitted on step 4.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentMethod {
    Card {
        number: String,
        /// `MM/YY`.
        expiry: String,
        cvc: String,
        holder: String,
    },
    MobileMoney {
        phone: String,
    },
}

/// Total to charge, VAT included.
///
/// Zero when trialing or when no plan applies (free roles); otherwise the
/// period price plus the flat 20% VAT. Plain float arithmetic, no
/// currency-specific rounding.
pub fn compute_total(
    plan: Option<&SubscriptionPlan>,
    period: BillingPeriod,
    use_trial: bool,
) -> f64 {
    match plan {
        Some(plan) if !use_trial => plan.price_for(period) * (1.0 + VAT_RATE),
        _ => 0.0,
    }
}

/// Validate a payment method locally, before any gateway contact.
///
/// Card: 16 digits once separators are stripped, `MM/YY` expiry, 3-4 digit
/// CVC, non-empty holder name. Mobile money: at least 9 digits.
pub fn validate_method(method: &PaymentMethod) -> Result<(), CoreError> {
    match method {
        PaymentMethod::Card {
            number,
            expiry,
            cvc,
            holder,
        } => {
            let digits: String = number.chars().filter(char::is_ascii_digit).collect();
            if digits.len() != 16 {
                return Err(CoreError::Validation(
                    "Card number must have 16 digits".to_string(),
                ));
            }
            if !EXPIRY_RE.is_match(expiry) {
                return Err(CoreError::Validation(
                    "Expiry must be in MM/YY format".to_string(),
                ));
            }
            if cvc.len() < 3 || cvc.len() > 4 || !cvc.chars().all(|c| c.is_ascii_digit()) {
                return Err(CoreError::Validation(
                    "CVC must have 3 or 4 digits".to_string(),
                ));
            }
            if holder.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Card holder name is required".to_string(),
                ));
            }
            Ok(())
        }
        PaymentMethod::MobileMoney { phone } => {
            let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
            if digits < MIN_MOBILE_DIGITS {
                return Err(CoreError::Validation(format!(
                    "Phone number must have at least {MIN_MOBILE_DIGITS} digits"
                )));
            }
            Ok(())
        }
    }
}

/// Format a card number for display: strip non-digits, cap at 16 digits,
/// group into blocks of 4 separated by single spaces.
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(16)
        .collect();
    digits
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format an expiry for display: strip non-digits, cap at 4 digits, insert a
/// `/` once more than two digits are present.
pub fn format_expiry(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(4)
        .collect();
    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Calendar-difference age check: at least 18 full years between `birth_date`
/// and `today`. Not a milliseconds/365.25 approximation.
pub fn is_adult(birth_date: NaiveDate, today: NaiveDate) -> bool {
    today.years_since(birth_date).is_some_and(|age| age >= 18)
}

/// [`is_adult`] against the current UTC date.
pub fn is_adult_today(birth_date: NaiveDate) -> bool {
    is_adult(birth_date, Utc::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog;

    fn card(number: &str, expiry: &str, cvc: &str, holder: &str) -> PaymentMethod {
        PaymentMethod::Card {
            number: number.to_string(),
            expiry: expiry.to_string(),
            cvc: cvc.to_string(),
            holder: holder.to_string(),
        }
    }

    // -- compute_total --

    #[test]
    fn trial_total_is_zero_for_every_plan() {
        for plan in catalog() {
            for period in [BillingPeriod::Monthly, BillingPeriod::Yearly] {
                assert_eq!(compute_total(Some(plan), period, true), 0.0);
            }
        }
    }

    #[test]
    fn no_plan_total_is_zero() {
        assert_eq!(compute_total(None, BillingPeriod::Monthly, false), 0.0);
    }

    #[test]
    fn total_applies_flat_vat_for_every_plan() {
        for plan in catalog() {
            for period in [BillingPeriod::Monthly, BillingPeriod::Yearly] {
                let total = compute_total(Some(plan), period, false);
                let expected = plan.price_for(period) * 1.2;
                assert!(
                    (total - expected).abs() < 1e-9,
                    "{} {:?}: {total} != {expected}",
                    plan.id,
                    period
                );
            }
        }
    }

    // -- validate_method --

    #[test]
    fn valid_card_passes() {
        assert!(validate_method(&card("4111 1111 1111 1111", "12/27", "123", "J MARTIN")).is_ok());
        assert!(validate_method(&card("4111111111111111", "01/30", "1234", "J MARTIN")).is_ok());
    }

    #[test]
    fn card_number_length_is_enforced() {
        assert!(validate_method(&card("4111", "12/27", "123", "J")).is_err());
        assert!(validate_method(&card("41111111111111112222", "12/27", "123", "J")).is_err());
    }

    #[test]
    fn expiry_pattern_is_enforced() {
        for bad in ["1227", "13/27", "00/27", "12-27", "12/2"] {
            assert!(
                validate_method(&card("4111111111111111", bad, "123", "J")).is_err(),
                "expiry '{bad}' should be rejected"
            );
        }
    }

    #[test]
    fn cvc_and_holder_are_enforced() {
        assert!(validate_method(&card("4111111111111111", "12/27", "12", "J")).is_err());
        assert!(validate_method(&card("4111111111111111", "12/27", "12345", "J")).is_err());
        assert!(validate_method(&card("4111111111111111", "12/27", "12a", "J")).is_err());
        assert!(validate_method(&card("4111111111111111", "12/27", "123", "   ")).is_err());
    }

    #[test]
    fn mobile_money_needs_nine_digits() {
        let short = PaymentMethod::MobileMoney {
            phone: "06 12 34".to_string(),
        };
        assert!(validate_method(&short).is_err());

        let ok = PaymentMethod::MobileMoney {
            phone: "+33 6 12 34 56 78".to_string(),
        };
        assert!(validate_method(&ok).is_ok());
    }

    // -- formatters --

    #[test]
    fn card_formatter_groups_by_four() {
        assert_eq!(format_card_number("4111111111111111"), "4111 1111 1111 1111");
        assert_eq!(format_card_number("4111"), "4111");
        assert_eq!(format_card_number("41111"), "4111 1");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn card_formatter_strips_letters_first() {
        assert_eq!(format_card_number("4111-abcd-1111"), "4111 1111");
        assert_eq!(format_card_number("4111 1111 1111 1111 999"), "4111 1111 1111 1111");
    }

    #[test]
    fn expiry_formatter_inserts_slash_after_two_digits() {
        assert_eq!(format_expiry("1225"), "12/25");
        assert_eq!(format_expiry("123"), "12/3");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12/25"), "12/25");
        assert_eq!(format_expiry("ab12cd25"), "12/25");
    }

    // -- age --

    #[test]
    fn eighteenth_birthday_counts_as_adult() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2018, 6, 15).unwrap();
        assert!(is_adult(birth, today));
    }

    #[test]
    fn one_day_short_of_eighteen_is_not_adult() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        let today = NaiveDate::from_ymd_opt(2018, 6, 14).unwrap();
        assert!(!is_adult(birth, today));
    }

    #[test]
    fn leap_day_birth_uses_calendar_years() {
        let birth = NaiveDate::from_ymd_opt(2004, 2, 29).unwrap();
        // Feb 28th of the 18th year is still one day short.
        assert!(!is_adult(birth, NaiveDate::from_ymd_opt(2022, 2, 28).unwrap()));
        assert!(is_adult(birth, NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()));
    }
}
