use crate::availability::util::samples;
use opds_availability::{Availability, AvailabilityKind, Copies, Handlers, Unavailable};
use std::cell::RefCell;
use wasm_bindgen_test::wasm_bindgen_test;

/// Records which handlers run.
fn dispatch_all(availability: &Availability) -> Vec<AvailabilityKind> {
    let calls = RefCell::new(Vec::new());

    availability.dispatch(
        Handlers::new()
            .unavailable(|_| calls.borrow_mut().push(AvailabilityKind::Unavailable))
            .limited(|_| calls.borrow_mut().push(AvailabilityKind::Limited))
            .unlimited(|| calls.borrow_mut().push(AvailabilityKind::Unlimited))
            .reserved(|_| calls.borrow_mut().push(AvailabilityKind::Reserved))
            .ready(|_| calls.borrow_mut().push(AvailabilityKind::Ready)),
    );
    calls.into_inner()
}

#[test]
#[wasm_bindgen_test]
fn test_exactly_one_handler() {
    for availability in samples() {
        assert_eq!(vec![availability.kind()], dispatch_all(&availability));
    }
}

#[test]
#[wasm_bindgen_test]
fn test_missing_handler_is_skipped() {
    let unavailable = Availability::from(Unavailable::new(
        Copies::new(4),
        Copies::new(0),
        Copies::new(2),
    ));
    let mut invoked = false;

    let result = unavailable.dispatch(
        Handlers::new()
            .limited(|_| invoked = true)
            .unlimited(|| ()),
    );

    assert_eq!(None, result);
    assert!(!invoked);
    assert_eq!(None, Availability::Unlimited.dispatch(Handlers::<()>::default()));
}

#[test]
#[wasm_bindgen_test]
fn test_handler_receives_variant_data() {
    let unavailable = Availability::from(Unavailable::new(
        Copies::new(4),
        Copies::new(0),
        Copies::UNKNOWN,
    ));

    let holds = unavailable.dispatch(
        Handlers::new()
            .unavailable(|unavailable| unavailable.holds_total())
            .limited(|limited| limited.copies_available()),
    );

    assert_eq!(Some(Copies::new(4)), holds);
}
