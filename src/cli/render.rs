//! Text renderings of booking snapshots for the shell.

use crate::booking::{FieldErrorSet, TripSummary};
use crate::catalog::Catalog;
use crate::confirmation::ConfirmationView;
use crate::currency::CurrencyFormatter;
use crate::pricing::VehicleOffer;

pub fn trip_summary_lines(summary: &TripSummary) -> Vec<String> {
    vec![
        format!("Route: {}", summary.route),
        format!("When: {}", summary.date_time),
        format!("Duration: {}", summary.duration),
    ]
}

pub fn catalog_lines(catalog: &Catalog, formatter: &dyn CurrencyFormatter) -> Vec<String> {
    catalog
        .vehicles()
        .iter()
        .map(|vehicle| {
            format!(
                "[{}] {} • {} / hour • {}",
                vehicle.id,
                vehicle.name,
                formatter.format(f64::from(vehicle.rate_per_hour)),
                vehicle.meta
            )
        })
        .collect()
}

/// One block per vehicle card; `*` marks the selected card.
pub fn vehicle_grid_lines(
    offers: &[VehicleOffer<'_>],
    formatter: &dyn CurrencyFormatter,
) -> Vec<String> {
    let mut lines = Vec::with_capacity(offers.len() * 3);
    for offer in offers {
        let marker = if offer.selected { '*' } else { ' ' };
        lines.push(format!(
            "{} [{}] {} • {} / hour",
            marker,
            offer.vehicle.id,
            offer.vehicle.name,
            formatter.format(f64::from(offer.vehicle.rate_per_hour))
        ));
        lines.push(format!("    {}", offer.vehicle.meta));
        lines.push(format!(
            "    Estimated base: {}",
            formatter.format(offer.estimated_base)
        ));
    }
    lines
}

pub fn confirmation_lines(view: &ConfirmationView, formatter: &dyn CurrencyFormatter) -> Vec<String> {
    vec![
        format!("Vehicle: {}", view.vehicle_name),
        format!("Trip: {}", view.route),
        format!("Date & time: {}", view.date_time),
        format!("Rate: {}", view.hourly_rate_label(formatter)),
        format!("Estimated total: {}", view.total_label(formatter)),
    ]
}

/// `field: message` lines in form order.
pub fn field_error_lines(errors: &FieldErrorSet) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field.key(), message))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::TripField;
    use crate::currency::LocaleFormatter;
    use crate::pricing::price_vehicles;

    #[test]
    fn grid_marks_selected_vehicle_and_prices_it() {
        let catalog = Catalog::builtin();
        let offers = price_vehicles(&catalog, 2.0, Some("a6"));
        let lines = vehicle_grid_lines(&offers, &LocaleFormatter::default());
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "  [bmw5] BMW 5 Series • ₹2,500 / hour");
        assert_eq!(lines[2], "    Estimated base: ₹5,000");
        assert_eq!(lines[3], "* [a6] Audi A6 • ₹2,700 / hour");
    }

    #[test]
    fn overflowing_estimate_renders_placeholder() {
        let catalog = Catalog::builtin();
        let offers = price_vehicles(&catalog, 1e308, None);
        assert!(offers[0].estimated_base.is_infinite());
        let lines = vehicle_grid_lines(&offers, &LocaleFormatter::default());
        assert_eq!(lines[2], "    Estimated base: —");
    }

    #[test]
    fn error_lines_follow_form_order() {
        let mut errors = FieldErrorSet::new();
        errors.insert(TripField::Hours, "Please enter the number of hours required.");
        errors.insert(TripField::Phone, "Please enter your phone number.");
        assert_eq!(
            field_error_lines(&errors),
            vec![
                "phone: Please enter your phone number.".to_string(),
                "hours: Please enter the number of hours required.".to_string(),
            ]
        );
    }
}
