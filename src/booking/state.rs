use crate::booking::trip::TripRequest;
use crate::catalog::{Catalog, Vehicle};

/// In-memory booking data shared by the three steps.
///
/// Owned by [`crate::booking::BookingFlow`], which is the only writer; the
/// selected id always names a catalog vehicle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingState {
    trip: Option<TripRequest>,
    selected_vehicle_id: Option<String>,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self) -> Option<&TripRequest> {
        self.trip.as_ref()
    }

    pub fn selected_vehicle_id(&self) -> Option<&str> {
        self.selected_vehicle_id.as_deref()
    }

    /// Resolves the selection against `catalog`.
    pub fn selected_vehicle<'a>(&self, catalog: &'a Catalog) -> Option<&'a Vehicle> {
        self.selected_vehicle_id
            .as_deref()
            .and_then(|id| catalog.get(id))
    }

    /// Replaces the trip wholesale. A new trip never inherits a selection.
    pub(crate) fn commit_trip(&mut self, trip: TripRequest) {
        self.trip = Some(trip);
        self.selected_vehicle_id = None;
    }

    pub(crate) fn select(&mut self, vehicle_id: &str) {
        self.selected_vehicle_id = Some(vehicle_id.to_string());
    }

    pub fn is_ready_for_confirmation(&self) -> bool {
        self.trip.is_some() && self.selected_vehicle_id.is_some()
    }
}
