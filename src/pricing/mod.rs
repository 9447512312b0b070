use serde::Serialize;

use crate::booking::TripRequest;
use crate::catalog::{Catalog, Vehicle};

/// Hourly rate times requested hours, in whole rupees (fractional hours
/// carry through).
///
/// This single formula prices both the selection grid and the confirmation
/// total.
pub fn estimated_base(vehicle: &Vehicle, trip: &TripRequest) -> f64 {
    base_for_hours(vehicle, trip.hours)
}

pub fn base_for_hours(vehicle: &Vehicle, hours: f64) -> f64 {
    f64::from(vehicle.rate_per_hour) * hours
}

/// One card in the vehicle selection grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleOffer<'a> {
    pub vehicle: &'a Vehicle,
    pub estimated_base: f64,
    pub selected: bool,
}

/// Prices every catalog vehicle for `hours`, marking `selected_id` if present.
pub fn price_vehicles<'a>(
    catalog: &'a Catalog,
    hours: f64,
    selected_id: Option<&str>,
) -> Vec<VehicleOffer<'a>> {
    catalog
        .vehicles()
        .iter()
        .map(|vehicle| VehicleOffer {
            vehicle,
            estimated_base: base_for_hours(vehicle, hours),
            selected: selected_id == Some(vehicle.id.as_str()),
        })
        .collect()
}
