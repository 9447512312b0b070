//! Fixed fleet of vehicles offered by the booking flow.
//!
//! The catalog is built once at startup and never mutated afterwards. Ids are
//! checked for uniqueness at construction so every later lookup can assume a
//! single match.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

/// Flat décor add-on in whole rupees.
///
/// Reserved: no transition applies it to a quote or confirmation total.
pub const DECOR_ADDON_FLAT: u32 = 1500;

/// A vehicle that can be booked by the hour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    /// Hourly rate in whole rupees.
    pub rate_per_hour: u32,
    pub meta: String,
    /// Presentation tag, opaque to the booking logic.
    #[serde(default)]
    pub media_class: String,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        rate_per_hour: u32,
        meta: impl Into<String>,
        media_class: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rate_per_hour,
            meta: meta.into(),
            media_class: media_class.into(),
        }
    }
}

/// Read-only list of vehicles with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    /// Builds a catalog, rejecting empty fleets, duplicate ids, blank
    /// ids/names and zero rates.
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, BookingError> {
        if vehicles.is_empty() {
            return Err(BookingError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for vehicle in &vehicles {
            if vehicle.id.trim().is_empty() {
                return Err(BookingError::InvalidVehicle {
                    id: vehicle.id.clone(),
                    reason: "id cannot be blank".into(),
                });
            }
            if vehicle.name.trim().is_empty() {
                return Err(BookingError::InvalidVehicle {
                    id: vehicle.id.clone(),
                    reason: "name cannot be blank".into(),
                });
            }
            if vehicle.rate_per_hour == 0 {
                return Err(BookingError::InvalidVehicle {
                    id: vehicle.id.clone(),
                    reason: "hourly rate must be positive".into(),
                });
            }
            if !seen.insert(vehicle.id.as_str()) {
                return Err(BookingError::DuplicateVehicle(vehicle.id.clone()));
            }
        }
        tracing::debug!(count = vehicles.len(), "vehicle catalog loaded");
        Ok(Self { vehicles })
    }

    /// The fleet shipped with the site.
    pub fn builtin() -> Self {
        Self {
            vehicles: builtin_vehicles(),
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vehicles.iter().map(|vehicle| vehicle.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn builtin_vehicles() -> Vec<Vehicle> {
    vec![
        Vehicle::new(
            "bmw5",
            "BMW 5 Series",
            2500,
            "Luxury sedan • Chauffeur included • Wedding décor option",
            "car-media-bmw5",
        ),
        Vehicle::new(
            "a6",
            "Audi A6",
            2700,
            "Premium comfort • Quiet ride • Chauffeur included",
            "car-media-a6",
        ),
        Vehicle::new(
            "s90",
            "Volvo S90",
            2600,
            "Elegant & refined • Spacious rear seat • Décor option",
            "car-media-s90",
        ),
        Vehicle::new(
            "bmw7",
            "BMW 7 Series",
            4000,
            "Flagship luxury • Chauffeur included",
            "car-media-bmw7",
        ),
        Vehicle::new(
            "a8",
            "Audi A8",
            4200,
            "Ultra-premium • Chauffeur included • Wedding décor option",
            "car-media-a8",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fleet_passes_validation() {
        let catalog = Catalog::new(builtin_vehicles()).expect("builtin fleet is valid");
        assert_eq!(catalog, Catalog::builtin());
        assert_eq!(catalog.len(), 5);
        assert_eq!(
            catalog.ids().collect::<Vec<_>>(),
            vec!["bmw5", "a6", "s90", "bmw7", "a8"]
        );
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("a8").map(|v| v.rate_per_hour), Some(4200));
        assert!(catalog.contains("bmw7"));
        assert!(!catalog.contains("A8"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut vehicles = builtin_vehicles();
        vehicles.push(Vehicle::new("a6", "Audi A6 (again)", 2800, "", ""));
        let err = Catalog::new(vehicles).unwrap_err();
        assert!(matches!(err, BookingError::DuplicateVehicle(id) if id == "a6"));
    }

    #[test]
    fn empty_and_invalid_vehicles_are_rejected() {
        assert!(matches!(
            Catalog::new(Vec::new()),
            Err(BookingError::EmptyCatalog)
        ));
        let zero_rate = vec![Vehicle::new("x1", "Free Car", 0, "", "")];
        assert!(matches!(
            Catalog::new(zero_rate),
            Err(BookingError::InvalidVehicle { .. })
        ));
        let blank_id = vec![Vehicle::new("  ", "Nameless", 100, "", "")];
        assert!(matches!(
            Catalog::new(blank_id),
            Err(BookingError::InvalidVehicle { .. })
        ));
    }

    #[test]
    fn decor_addon_is_reserved_constant() {
        assert_eq!(DECOR_ADDON_FLAT, 1500);
    }
}
