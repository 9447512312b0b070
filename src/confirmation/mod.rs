//! Confirmation panel and booking request acknowledgement.

use serde::Serialize;
use uuid::Uuid;

use crate::booking::BookingState;
use crate::catalog::Catalog;
use crate::currency::CurrencyFormatter;
use crate::pricing::estimated_base;

/// Everything the confirmation panel shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationView {
    pub vehicle_name: String,
    pub route: String,
    /// `date • time • {hours}h`
    pub date_time: String,
    pub hourly_rate: u32,
    /// Equal to the estimated base; the décor add-on is not applied.
    pub total: f64,
}

impl ConfirmationView {
    /// `₹2,500/hr`
    pub fn hourly_rate_label(&self, formatter: &dyn CurrencyFormatter) -> String {
        format!("{}/hr", formatter.format(f64::from(self.hourly_rate)))
    }

    pub fn total_label(&self, formatter: &dyn CurrencyFormatter) -> String {
        formatter.format(self.total)
    }
}

/// Builds the confirmation view, or `None` when the trip or the selected
/// vehicle is missing.
pub fn build_confirmation(state: &BookingState, catalog: &Catalog) -> Option<ConfirmationView> {
    let trip = state.trip()?;
    let vehicle = state.selected_vehicle(catalog)?;
    Some(ConfirmationView {
        vehicle_name: vehicle.name.clone(),
        route: trip.route(),
        date_time: format!(
            "{} • {} • {}h",
            trip.event_date, trip.pickup_time, trip.hours
        ),
        hourly_rate: vehicle.rate_per_hour,
        total: estimated_base(vehicle, trip),
    })
}

/// Locally rendered reply to a booking request. Nothing is sent anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingAcknowledgement {
    /// Correlates the request in logs.
    pub reference: Uuid,
    pub message: String,
}

pub fn build_acknowledgement(
    state: &BookingState,
    catalog: &Catalog,
    formatter: &dyn CurrencyFormatter,
) -> Option<BookingAcknowledgement> {
    let trip = state.trip()?;
    let vehicle = state.selected_vehicle(catalog)?;
    let base = estimated_base(vehicle, trip);
    let message = [
        "Request received.".to_string(),
        format!(
            "We’ll contact {} shortly to confirm availability for {} at {}.",
            trip.full_name, trip.event_date, trip.pickup_time
        ),
        format!(
            "Selected: {} • Estimated: {}.",
            vehicle.name,
            formatter.format(base)
        ),
    ]
    .join(" ");
    Some(BookingAcknowledgement {
        reference: Uuid::new_v4(),
        message,
    })
}
