use carhire_booking::currency::{
    format_currency_value, format_inr, CurrencyCode, CurrencyFormatter, GroupingStyle,
    LocaleConfig, LocaleFormatter,
};

#[test]
fn formats_rupees_without_fraction_digits() {
    assert_eq!(format_inr(2_500.0), "₹2,500");
    assert_eq!(format_inr(6_750.0), "₹6,750");
    assert_eq!(format_inr(99_999_999.0), "₹9,99,99,999");
    assert!(!format_inr(1_234.56).contains('.'));
}

#[test]
fn locale_tag_selects_grouping() {
    assert_eq!(LocaleConfig::for_tag("hi-IN").grouping, GroupingStyle::Indian);
    assert_eq!(LocaleConfig::for_tag("en-GB").grouping, GroupingStyle::Thousands);
    let code = CurrencyCode::new("gbp");
    assert_eq!(
        format_currency_value(1_000_000.0, &code, &LocaleConfig::for_tag("en-GB")),
        "£1,000,000"
    );
}

#[test]
fn formatter_trait_object_renders_amounts() {
    let formatter: Box<dyn CurrencyFormatter> = Box::new(LocaleFormatter::default());
    assert_eq!(formatter.format(16_800.0), "₹16,800");
}
