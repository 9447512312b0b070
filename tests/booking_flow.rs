use carhire_booking::{
    booking::{BookingFlow, RawTripInput, Step, SubmitOutcome, TripField},
    catalog::Catalog,
    clock::FixedClock,
    currency::{format_inr, LocaleFormatter},
    pricing::estimated_base,
};
use chrono::{Duration, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

fn flow() -> BookingFlow {
    BookingFlow::with_parts(
        Catalog::builtin(),
        Box::new(FixedClock(today())),
        Box::new(LocaleFormatter::default()),
    )
}

fn input(hours: &str) -> RawTripInput {
    let tomorrow = (today() + Duration::days(1)).format("%Y-%m-%d").to_string();
    RawTripInput::from_pairs([
        ("fullName", "A".to_string()),
        ("phone", "98765-43210".to_string()),
        ("email", "a@b.co".to_string()),
        ("startLocation", "X".to_string()),
        ("endLocation", "Y".to_string()),
        ("eventDate", tomorrow),
        ("pickupTime", "10:00".to_string()),
        ("hours", hours.to_string()),
    ])
}

#[test]
fn booking_walkthrough() {
    let mut flow = flow();
    assert_eq!(flow.current_step(), Step::TripEntry);

    assert!(matches!(
        flow.submit_trip(&input("3")),
        SubmitOutcome::Accepted { .. }
    ));
    let trip = flow.state().trip().cloned().expect("committed trip");
    assert_eq!(trip.phone, "9876543210");

    assert_eq!(flow.advance(), None);
    assert_eq!(flow.current_step().number(), 2);

    assert!(flow.select_vehicle("a8"));
    assert!(flow.select_vehicle("a8"));
    assert_eq!(flow.state().selected_vehicle_id(), Some("a8"));

    flow.advance().expect("advance with selection");
    let view = flow.confirmation().expect("confirmation");
    let a8 = flow.catalog().get("a8").expect("a8 in catalog");
    assert_eq!(view.total, estimated_base(a8, &trip));
    assert_eq!(format_inr(view.total), "₹12,600");
}

#[test]
fn rejected_submit_keeps_state_untouched() {
    let mut flow = flow();
    let mut raw = input("3");
    raw.set(TripField::PickupTime, "   ");
    match flow.submit_trip(&raw) {
        SubmitOutcome::Rejected { focus, errors } => {
            assert_eq!(focus, TripField::PickupTime);
            assert_eq!(errors.len(), 1);
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert!(flow.state().trip().is_none());
    assert_eq!(flow.current_step(), Step::TripEntry);
}

#[test]
fn estimated_base_formats_as_whole_rupees() {
    let catalog = Catalog::builtin();
    let bmw5 = catalog.get("bmw5").unwrap();
    let mut flow = flow();
    flow.submit_trip(&input("4"));
    let trip = flow.state().trip().unwrap();
    let base = estimated_base(bmw5, trip);
    assert_eq!(base, 10_000.0);
    assert_eq!(format_inr(base), "₹10,000");
}
