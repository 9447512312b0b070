//! Locale-aware whole-unit currency formatting.
//!
//! Prices are computed as plain numbers; this module is the only place that
//! turns them into display strings.

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("INR")
    }
}

/// How integer digits are grouped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupingStyle {
    /// 1,234,567
    Thousands,
    /// 12,34,567 (lakh/crore)
    Indian,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub grouping_separator: char,
    pub grouping: GroupingStyle,
}

impl LocaleConfig {
    /// Resolves a BCP 47 tag. Tags ending in `-IN` use Indian grouping, all
    /// others fall back to thousands grouping.
    pub fn for_tag(tag: &str) -> Self {
        let grouping = if tag.to_ascii_uppercase().ends_with("-IN") {
            GroupingStyle::Indian
        } else {
            GroupingStyle::Thousands
        };
        Self {
            language_tag: tag.to_string(),
            grouping_separator: ',',
            grouping,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("en-IN")
    }
}

/// Shown in place of amounts that overflowed or are not numbers.
pub const NON_FINITE_AMOUNT: &str = "—";

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "AED" => "AED ".into(),
        _ => format!("{} ", code),
    }
}

/// Formats a rounded whole amount with the locale's digit grouping.
pub fn format_whole_number(locale: &LocaleConfig, value: f64) -> String {
    if !value.is_finite() {
        return NON_FINITE_AMOUNT.to_string();
    }
    let rounded = value.abs().round();
    let digits = format!("{:.0}", rounded);
    let grouped = match locale.grouping {
        GroupingStyle::Thousands => group_thousands(&digits, locale.grouping_separator),
        GroupingStyle::Indian => group_indian(&digits, locale.grouping_separator),
    };
    if value < 0.0 && rounded > 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

fn group_indian(digits: &str, separator: char) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::new();
    for (count, ch) in head.chars().rev().enumerate() {
        if count != 0 && count % 2 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    format!("{}{}{}", grouped, separator, tail)
}

/// Renders `amount` as a whole-unit currency string, e.g. `₹12,34,567`.
pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    if !amount.is_finite() {
        return NON_FINITE_AMOUNT.to_string();
    }
    let body = format_whole_number(locale, amount);
    let symbol = symbol_for(code.as_str());
    match body.strip_prefix('-') {
        Some(magnitude) => format!("-{}{}", symbol, magnitude),
        None => format!("{}{}", symbol, body),
    }
}

/// Indian rupees with no fractional digits.
pub fn format_inr(amount: f64) -> String {
    format_currency_value(amount, &CurrencyCode::default(), &LocaleConfig::default())
}

/// Formats currency amounts for presentation.
pub trait CurrencyFormatter: Send + Sync {
    fn format(&self, amount: f64) -> String;
}

/// Formatter bound to one currency and locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFormatter {
    pub code: CurrencyCode,
    pub locale: LocaleConfig,
}

impl LocaleFormatter {
    pub fn new(code: CurrencyCode, locale: LocaleConfig) -> Self {
        Self { code, locale }
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new(CurrencyCode::default(), LocaleConfig::default())
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format(&self, amount: f64) -> String {
        format_currency_value(amount, &self.code, &self.locale)
    }
}
