//! Three-step booking state machine: trip entry, vehicle selection and
//! confirmation.
//!
//! Presentation layers translate user events into calls on [`BookingFlow`]
//! and render the snapshots it hands back. Guarded transitions that the UI is
//! expected to prevent are refused silently (logged, never an error).

use std::fmt;

use crate::booking::fields::{FieldErrorSet, RawTripInput, TripField};
use crate::booking::state::BookingState;
use crate::booking::trip::TripSummary;
use crate::booking::validator::validate_trip;
use crate::catalog::Catalog;
use crate::clock::{Clock, SystemClock};
use crate::confirmation::{
    build_acknowledgement, build_confirmation, BookingAcknowledgement, ConfirmationView,
};
use crate::currency::{CurrencyFormatter, LocaleFormatter};
use crate::pricing::{price_vehicles, VehicleOffer};

/// Active panel of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    TripEntry,
    VehicleSelection,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::TripEntry, Step::VehicleSelection, Step::Confirmation];

    pub fn number(self) -> u8 {
        match self {
            Step::TripEntry => 1,
            Step::VehicleSelection => 2,
            Step::Confirmation => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Step::ALL.into_iter().find(|step| step.number() == number)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::TripEntry => "Trip details",
            Step::VehicleSelection => "Choose your vehicle",
            Step::Confirmation => "Confirm booking",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of 3 – {}", self.number(), self.title())
    }
}

/// Visibility of one step indicator/panel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub step: Step,
    pub active: bool,
}

/// A completed step change; the presenter brings `to` into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Step,
    pub to: Step,
}

/// Result of submitting the trip form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Trip committed; the flow moved to vehicle selection.
    Accepted {
        summary: TripSummary,
        transition: Transition,
    },
    /// At least one field failed; `focus` is the first invalid field.
    Rejected {
        errors: FieldErrorSet,
        focus: TripField,
    },
    /// The trip form is not the active panel.
    Ignored,
}

/// Owns the booking state and drives step transitions.
pub struct BookingFlow {
    catalog: Catalog,
    clock: Box<dyn Clock>,
    formatter: Box<dyn CurrencyFormatter>,
    state: BookingState,
    step: Step,
    field_errors: FieldErrorSet,
    acknowledgement: Option<BookingAcknowledgement>,
}

impl BookingFlow {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_parts(
            catalog,
            Box::new(SystemClock),
            Box::new(LocaleFormatter::default()),
        )
    }

    pub fn with_parts(
        catalog: Catalog,
        clock: Box<dyn Clock>,
        formatter: Box<dyn CurrencyFormatter>,
    ) -> Self {
        Self {
            catalog,
            clock,
            formatter,
            state: BookingState::new(),
            step: Step::TripEntry,
            field_errors: FieldErrorSet::new(),
            acknowledgement: None,
        }
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn panels(&self) -> [PanelState; 3] {
        Step::ALL.map(|step| PanelState {
            step,
            active: step == self.step,
        })
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn formatter(&self) -> &dyn CurrencyFormatter {
        self.formatter.as_ref()
    }

    /// Errors from the latest submit, minus fields cleared since.
    pub fn field_errors(&self) -> &FieldErrorSet {
        &self.field_errors
    }

    pub fn acknowledgement(&self) -> Option<&BookingAcknowledgement> {
        self.acknowledgement.as_ref()
    }

    /// Validates and, when every field passes, commits the trip and moves to
    /// vehicle selection. Validation always finishes before anything changes.
    pub fn submit_trip(&mut self, raw: &RawTripInput) -> SubmitOutcome {
        if self.step != Step::TripEntry {
            tracing::warn!(step = ?self.step, "trip submitted while form is not active");
            return SubmitOutcome::Ignored;
        }
        self.acknowledgement = None;

        let validation = validate_trip(raw, self.clock.as_ref());
        self.field_errors = validation.errors.clone();

        match validation.into_result() {
            Ok(trip) => {
                tracing::info!(
                    hours = trip.hours,
                    event_date = %trip.event_date,
                    "trip accepted"
                );
                let summary = trip.summary();
                self.state.commit_trip(trip);
                let transition = self.move_to(Step::VehicleSelection);
                SubmitOutcome::Accepted {
                    summary,
                    transition,
                }
            }
            Err(errors) => {
                let focus = errors.first_invalid().unwrap_or(TripField::FullName);
                SubmitOutcome::Rejected { errors, focus }
            }
        }
    }

    /// Clears the error shown for `field`, as when the user edits it.
    pub fn clear_field_error(&mut self, field: TripField) {
        self.field_errors.remove(field);
    }

    /// Priced vehicle grid for the committed trip; empty without a trip.
    pub fn vehicle_offers(&self) -> Vec<VehicleOffer<'_>> {
        match self.state.trip() {
            Some(trip) => price_vehicles(
                &self.catalog,
                trip.hours,
                self.state.selected_vehicle_id(),
            ),
            None => Vec::new(),
        }
    }

    /// Selects a catalog vehicle. Reselecting the current id is harmless.
    /// Returns `false` outside vehicle selection and for ids the catalog
    /// does not know.
    pub fn select_vehicle(&mut self, vehicle_id: &str) -> bool {
        if self.step != Step::VehicleSelection {
            tracing::warn!(step = ?self.step, vehicle_id, "selection outside vehicle step");
            return false;
        }
        if !self.catalog.contains(vehicle_id) {
            tracing::warn!(vehicle_id, "ignoring selection of unknown vehicle");
            return false;
        }
        self.state.select(vehicle_id);
        tracing::debug!(vehicle_id, "vehicle selected");
        true
    }

    /// Whether the "continue" control should be enabled.
    pub fn can_advance(&self) -> bool {
        self.step == Step::VehicleSelection && self.state.is_ready_for_confirmation()
    }

    /// Moves from vehicle selection to confirmation. Refused without a trip
    /// and a selection, and from any other step.
    pub fn advance(&mut self) -> Option<Transition> {
        if !self.can_advance() {
            tracing::warn!(
                step = ?self.step,
                has_trip = self.state.trip().is_some(),
                has_selection = self.state.selected_vehicle_id().is_some(),
                "advance refused"
            );
            return None;
        }
        Some(self.move_to(Step::Confirmation))
    }

    /// Steps back one panel without touching booking data.
    pub fn back(&mut self) -> Option<Transition> {
        let previous = match self.step {
            Step::TripEntry => return None,
            Step::VehicleSelection => Step::TripEntry,
            Step::Confirmation => Step::VehicleSelection,
        };
        Some(self.move_to(previous))
    }

    pub fn confirmation(&self) -> Option<ConfirmationView> {
        build_confirmation(&self.state, &self.catalog)
    }

    /// Renders the acknowledgement for the confirmed booking. Does not change
    /// step; returns `None` outside the confirmation panel.
    pub fn request_booking(&mut self) -> Option<&BookingAcknowledgement> {
        if self.step != Step::Confirmation {
            tracing::warn!(step = ?self.step, "booking request outside confirmation");
            return None;
        }
        let ack = build_acknowledgement(&self.state, &self.catalog, self.formatter.as_ref())?;
        tracing::info!(reference = %ack.reference, "booking request acknowledged");
        self.acknowledgement = Some(ack);
        self.acknowledgement.as_ref()
    }

    fn move_to(&mut self, to: Step) -> Transition {
        let transition = Transition {
            from: self.step,
            to,
        };
        self.step = to;
        tracing::debug!(from = ?transition.from, to = ?transition.to, "step changed");
        transition
    }
}

impl fmt::Debug for BookingFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookingFlow")
            .field("step", &self.step)
            .field("state", &self.state)
            .field("field_errors", &self.field_errors)
            .finish_non_exhaustive()
    }
}
