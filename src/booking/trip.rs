use chrono::NaiveDate;
use serde::Serialize;

/// Date format used by the trip form.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Cleaned trip details gathered in the first step.
///
/// Only a record that validated with zero errors is ever committed to
/// [`crate::booking::BookingState`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    pub full_name: String,
    /// Digits only.
    pub phone: String,
    pub email: String,
    pub start_location: String,
    pub end_location: String,
    /// Trimmed date text as entered; see [`TripRequest::event_day`].
    pub event_date: String,
    pub pickup_time: String,
    pub hours: f64,
}

impl TripRequest {
    /// Calendar day of the event when the entered text parses.
    pub fn event_day(&self) -> Option<NaiveDate> {
        parse_event_date(&self.event_date)
    }

    pub fn route(&self) -> String {
        format!("{} → {}", self.start_location, self.end_location)
    }

    pub fn summary(&self) -> TripSummary {
        TripSummary {
            route: self.route(),
            date_time: format!("{} • {}", self.event_date, self.pickup_time),
            duration: hours_label(self.hours),
        }
    }
}

/// Text shown above the vehicle grid once a trip is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub route: String,
    pub date_time: String,
    pub duration: String,
}

pub(crate) fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), EVENT_DATE_FORMAT).ok()
}

/// `1 hour`, `2.5 hours`, `3 hours`.
pub fn hours_label(hours: f64) -> String {
    if hours == 1.0 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(hours: f64) -> TripRequest {
        TripRequest {
            full_name: "Asha Rao".into(),
            phone: "9876543210".into(),
            email: "asha@example.in".into(),
            start_location: "Bandra".into(),
            end_location: "Juhu".into(),
            event_date: "2026-12-01".into(),
            pickup_time: "18:30".into(),
            hours,
        }
    }

    #[test]
    fn summary_uses_route_arrow_and_bullets() {
        let summary = trip(3.0).summary();
        assert_eq!(summary.route, "Bandra → Juhu");
        assert_eq!(summary.date_time, "2026-12-01 • 18:30");
        assert_eq!(summary.duration, "3 hours");
    }

    #[test]
    fn singular_hour_label() {
        assert_eq!(hours_label(1.0), "1 hour");
        assert_eq!(hours_label(2.5), "2.5 hours");
    }

    #[test]
    fn event_day_parses_iso_dates_only() {
        assert_eq!(
            trip(2.0).event_day(),
            NaiveDate::from_ymd_opt(2026, 12, 1)
        );
        let mut odd = trip(2.0);
        odd.event_date = "next friday".into();
        assert_eq!(odd.event_day(), None);
    }
}
