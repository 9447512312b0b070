//! Trip entry, validation and the booking state machine.

pub mod fields;
pub mod flow;
pub mod state;
pub mod trip;
pub mod validator;

pub use fields::{FieldErrorSet, RawTripInput, TripField, UnknownField};
pub use flow::{BookingFlow, PanelState, Step, SubmitOutcome, Transition};
pub use state::BookingState;
pub use trip::{hours_label, TripRequest, TripSummary};
pub use validator::{validate_trip, validate_trip_on, TripValidation};
