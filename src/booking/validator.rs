//! Trip form validation.
//!
//! Every field is checked independently and all problems are collected in a
//! single pass. Invalid input is reported through [`FieldErrorSet`], never as
//! an `Err`, and the cleaned record is always produced so callers can echo
//! trimmed values back to the form.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::booking::fields::{FieldErrorSet, RawTripInput, TripField};
use crate::booking::trip::{parse_event_date, TripRequest};
use crate::clock::Clock;

pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Outcome of a validation attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct TripValidation {
    pub cleaned: TripRequest,
    pub errors: FieldErrorSet,
}

impl TripValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the cleaned trip only when no field failed.
    pub fn into_result(self) -> Result<TripRequest, FieldErrorSet> {
        if self.errors.is_empty() {
            Ok(self.cleaned)
        } else {
            Err(self.errors)
        }
    }
}

/// Validates raw trip input against the clock's current day.
pub fn validate_trip(raw: &RawTripInput, clock: &dyn Clock) -> TripValidation {
    validate_trip_on(raw, clock.today())
}

/// Validates raw trip input, treating `today` as the earliest bookable day.
pub fn validate_trip_on(raw: &RawTripInput, today: NaiveDate) -> TripValidation {
    let cleaned = clean(raw);
    let mut errors = FieldErrorSet::new();

    if cleaned.full_name.is_empty() {
        errors.insert(TripField::FullName, "Please enter your full name.");
    }

    if cleaned.phone.is_empty() {
        errors.insert(TripField::Phone, "Please enter your phone number.");
    }
    if !cleaned.phone.is_empty()
        && !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&cleaned.phone.len())
    {
        errors.insert(TripField::Phone, "Please enter a valid phone number.");
    }

    if cleaned.email.is_empty() {
        errors.insert(TripField::Email, "Please enter your email.");
    }
    if !cleaned.email.is_empty() && !is_valid_email(&cleaned.email) {
        errors.insert(TripField::Email, "Please enter a valid email address.");
    }

    if cleaned.event_date.is_empty() {
        errors.insert(TripField::EventDate, "Please select an event date.");
    }
    if cleaned.start_location.is_empty() {
        errors.insert(
            TripField::StartLocation,
            "Please enter the trip start location.",
        );
    }
    if cleaned.end_location.is_empty() {
        errors.insert(TripField::EndLocation, "Please enter the trip end location.");
    }
    if cleaned.pickup_time.is_empty() {
        errors.insert(TripField::PickupTime, "Please select a pickup time.");
    }
    if !cleaned.hours.is_finite() || cleaned.hours <= 0.0 {
        errors.insert(TripField::Hours, "Please enter the number of hours required.");
    }

    // Unparsable dates are let through; only a parsed past day fails.
    if let Some(chosen) = parse_event_date(&cleaned.event_date) {
        if chosen < today {
            errors.insert(TripField::EventDate, "Please choose a date in the future.");
        }
    }

    if !errors.is_empty() {
        tracing::debug!(
            error_count = errors.len(),
            first_invalid = ?errors.first_invalid(),
            "trip validation failed"
        );
    }

    TripValidation { cleaned, errors }
}

fn clean(raw: &RawTripInput) -> TripRequest {
    TripRequest {
        full_name: raw.get(TripField::FullName).trim().to_string(),
        phone: normalize_phone(raw.get(TripField::Phone)),
        email: raw.get(TripField::Email).trim().to_string(),
        start_location: raw.get(TripField::StartLocation).trim().to_string(),
        end_location: raw.get(TripField::EndLocation).trim().to_string(),
        event_date: raw.get(TripField::EventDate).trim().to_string(),
        pickup_time: raw.get(TripField::PickupTime).trim().to_string(),
        hours: parse_hours(raw.get(TripField::Hours)),
    }
}

/// Keeps ASCII digits only: `"+91 98765-43210"` becomes `"919876543210"`.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Parses the hours field with the browser's numeric grammar: whitespace
/// is ignored, blank input is zero, `0x`/`0o`/`0b` integers are accepted and
/// `Infinity` is infinite. Anything else unparsable is NaN, so it fails the
/// positive-finite check.
fn parse_hours(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(value) = parse_prefixed_integer(trimmed) {
        return value;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust also reads `inf` and `nan`; the browser does not.
    let decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// `0x1f`, `0o17`, `0b101`. Unsigned only; a bad digit gives NaN.
fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let radix = match text.get(..2)?.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });
    Some(value.unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_input() -> RawTripInput {
        RawTripInput::from_pairs([
            ("fullName", "A"),
            ("phone", "98765-43210"),
            ("email", "a@b.co"),
            ("startLocation", "X"),
            ("endLocation", "Y"),
            ("eventDate", "2026-10-19"),
            ("pickupTime", "10:00"),
            ("hours", "3"),
        ])
    }

    fn with(field: TripField, value: &str) -> RawTripInput {
        let mut input = valid_input();
        input.set(field, value);
        input
    }

    fn error_for(input: &RawTripInput, field: TripField) -> Option<String> {
        validate_trip_on(input, today())
            .errors
            .get(field)
            .map(str::to_string)
    }

    #[test]
    fn accepts_complete_input_and_normalizes_phone() {
        let result = validate_trip_on(&valid_input(), today());
        assert!(result.is_valid(), "unexpected errors: {:?}", result.errors);
        assert_eq!(result.cleaned.phone, "9876543210");
        assert_eq!(result.cleaned.hours, 3.0);
    }

    #[test]
    fn empty_form_reports_every_field_at_once() {
        let result = validate_trip_on(&RawTripInput::new(), today());
        assert_eq!(result.errors.len(), TripField::ALL.len());
        assert_eq!(result.errors.first_invalid(), Some(TripField::FullName));
        assert_eq!(
            result.errors.get(TripField::Phone),
            Some("Please enter your phone number.")
        );
        assert_eq!(
            result.errors.get(TripField::Hours),
            Some("Please enter the number of hours required.")
        );
    }

    #[test]
    fn cleaned_values_are_trimmed_even_when_invalid() {
        let mut input = with(TripField::FullName, "   ");
        input.set(TripField::StartLocation, "  Powai  ");
        let result = validate_trip_on(&input, today());
        assert!(!result.is_valid());
        assert_eq!(result.cleaned.full_name, "");
        assert_eq!(result.cleaned.start_location, "Powai");
        assert_eq!(result.errors.first_invalid(), Some(TripField::FullName));
    }

    #[test]
    fn phone_digit_count_boundaries() {
        let invalid = Some("Please enter a valid phone number.".to_string());
        assert_eq!(error_for(&with(TripField::Phone, "987654321"), TripField::Phone), invalid);
        assert_eq!(error_for(&with(TripField::Phone, "9876543210"), TripField::Phone), None);
        assert_eq!(
            error_for(&with(TripField::Phone, "123456789012345"), TripField::Phone),
            None
        );
        assert_eq!(
            error_for(&with(TripField::Phone, "1234567890123456"), TripField::Phone),
            invalid
        );
    }

    #[test]
    fn phone_without_digits_counts_as_empty() {
        assert_eq!(
            error_for(&with(TripField::Phone, "call me"), TripField::Phone).as_deref(),
            Some("Please enter your phone number.")
        );
    }

    #[test]
    fn email_needs_a_dotted_domain() {
        assert_eq!(
            error_for(&with(TripField::Email, "foo@bar"), TripField::Email).as_deref(),
            Some("Please enter a valid email address.")
        );
        assert_eq!(error_for(&with(TripField::Email, "foo@bar.com"), TripField::Email), None);
        assert!(error_for(&with(TripField::Email, "foo bar@baz.com"), TripField::Email).is_some());
        assert!(error_for(&with(TripField::Email, "@bar.com"), TripField::Email).is_some());
        assert!(error_for(&with(TripField::Email, "foo@bar."), TripField::Email).is_some());
    }

    #[test]
    fn event_date_guard_is_soft() {
        let today_text = today().format("%Y-%m-%d").to_string();
        let yesterday = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();
        assert_eq!(error_for(&with(TripField::EventDate, &today_text), TripField::EventDate), None);
        assert_eq!(
            error_for(&with(TripField::EventDate, &yesterday), TripField::EventDate).as_deref(),
            Some("Please choose a date in the future.")
        );
        assert_eq!(
            error_for(&with(TripField::EventDate, "sometime soon"), TripField::EventDate),
            None
        );
        assert_eq!(
            error_for(&with(TripField::EventDate, ""), TripField::EventDate).as_deref(),
            Some("Please select an event date.")
        );
    }

    #[test]
    fn hours_must_be_positive_and_finite() {
        assert!(error_for(&with(TripField::Hours, "0"), TripField::Hours).is_some());
        assert!(error_for(&with(TripField::Hours, "-1"), TripField::Hours).is_some());
        assert!(error_for(&with(TripField::Hours, "abc"), TripField::Hours).is_some());
        assert!(error_for(&with(TripField::Hours, "inf"), TripField::Hours).is_some());
        assert_eq!(error_for(&with(TripField::Hours, "2.5"), TripField::Hours), None);
        assert_eq!(error_for(&with(TripField::Hours, " 4 "), TripField::Hours), None);
    }

    #[test]
    fn hours_follow_browser_number_grammar() {
        let hours = |raw: &str| validate_trip_on(&with(TripField::Hours, raw), today()).cleaned.hours;
        assert_eq!(hours("0x10"), 16.0);
        assert_eq!(hours("0B11"), 3.0);
        assert_eq!(hours(".5"), 0.5);
        assert_eq!(hours("1e1"), 10.0);
        assert!(hours("0x").is_nan());
        assert!(hours("0x1g").is_nan());
        assert!(hours("-0x10").is_nan());
        assert!(hours("nan").is_nan());
        assert_eq!(hours("Infinity"), f64::INFINITY);

        assert_eq!(error_for(&with(TripField::Hours, "0x10"), TripField::Hours), None);
        assert!(error_for(&with(TripField::Hours, "Infinity"), TripField::Hours).is_some());
        assert!(error_for(&with(TripField::Hours, "1_000"), TripField::Hours).is_some());
    }

    #[test]
    fn into_result_only_yields_valid_trips() {
        assert!(validate_trip_on(&valid_input(), today()).into_result().is_ok());
        let errors = validate_trip_on(&with(TripField::Hours, "0"), today())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first_invalid(), Some(TripField::Hours));
    }
}
