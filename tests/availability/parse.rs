use crate::availability::util::{date, link};
use opds_availability::parser::ParseSettings;
use opds_availability::{Availability, Copies, Limited, Ready, Reserved, Unavailable};
use wasm_bindgen_test::wasm_bindgen_test;

#[test]
#[wasm_bindgen_test]
fn test_limited_from_exhausted_copies() {
    let link = link(
        r#"<link rel="http://opds-spec.org/acquisition/borrow" type="application/atom+xml">
             <opds:availability status="available"/>
             <opds:copies total="5" available="0"/>
           </link>"#,
    );

    assert_eq!(
        Availability::Limited(Limited::new(Copies::new(0), Copies::new(5), None, None)),
        Availability::from_link(&link),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_reserved_from_holds_position() {
    let link = link(
        r#"<link rel="http://opds-spec.org/acquisition/borrow">
             <opds:holds total="10" position="3"/>
             <opds:copies total="10"/>
           </link>"#,
    );

    let expected =
        Reserved::new(3, Copies::new(10), Copies::UNKNOWN, Copies::new(10), None, None).unwrap();
    assert_eq!(Availability::Reserved(expected), Availability::from_link(&link));
}

#[test]
#[wasm_bindgen_test]
fn test_reserved_window() {
    let link = link(
        r#"<link>
             <opds:availability status="reserved" since="2024-03-01T09:30:00Z" until="2024-04-01T09:30:00Z"/>
             <opds:holds total="2" position="1"/>
             <opds:copies total="1" available="0"/>
           </link>"#,
    );

    let Availability::Reserved(reserved) = Availability::from_link(&link) else {
        panic!("expected reserved");
    };
    assert_eq!(1, reserved.holds_position().get());
    assert_eq!(Copies::new(2), reserved.holds_total());
    assert_eq!(Copies::new(0), reserved.copies_available());
    assert_eq!(Some(date("2024-03-01T09:30:00Z")), reserved.since());
    assert_eq!(Some(date("2024-04-01T09:30:00Z")), reserved.until());
}

#[test]
#[wasm_bindgen_test]
fn test_unavailable() {
    let with_counts = link(
        r#"<link>
             <opds:availability status="unavailable"/>
             <opds:holds total="12"/>
             <opds:copies total="3" available="0"/>
           </link>"#,
    );
    let bare = link(r#"<link><opds:availability status="unavailable"/></link>"#);

    assert_eq!(
        Availability::Unavailable(Unavailable::new(
            Copies::new(12),
            Copies::new(0),
            Copies::new(3),
        )),
        Availability::from_link(&with_counts),
    );
    assert_eq!(
        Availability::Unavailable(Unavailable::new(
            Copies::UNKNOWN,
            Copies::UNKNOWN,
            Copies::UNKNOWN,
        )),
        Availability::from_link(&bare),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_unavailable_takes_precedence_over_holds() {
    let link = link(
        r#"<link>
             <opds:availability status="unavailable"/>
             <opds:holds total="12" position="4"/>
           </link>"#,
    );

    let availability = Availability::from_link(&link);
    assert!(matches!(availability, Availability::Unavailable(_)));
    assert_eq!(None, availability.since());
}

#[test]
#[wasm_bindgen_test]
fn test_ready_window() {
    let link = link(
        r#"<link>
             <opds:availability status="ready" until="2024-03-04T10:00:00-05:00"/>
             <opds:holds total="0" position="0"/>
           </link>"#,
    );

    assert_eq!(
        Availability::Ready(Ready::new(None, Some(date("2024-03-04T10:00:00-05:00")))),
        Availability::from_link(&link),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_zero_position_is_never_reserved() {
    #[rustfmt::skip]
    let expected = [
        // Reserved status, position 0, nothing else to go on
        (Availability::Unlimited, r#"<link><opds:availability status="reserved"/><opds:holds total="3" position="0"/></link>"#),
        (Availability::Unlimited, r#"<link><opds:holds position="0"/></link>"#),
        (Availability::Unlimited, r#"<link><opds:holds position="first"/></link>"#),
        (Availability::Unlimited, r#"<link><opds:availability status="reserved"/></link>"#),
    ];

    for (availability, xml) in expected {
        assert_eq!(availability, Availability::from_link(&link(xml)), "{xml}");
    }
}

#[test]
#[wasm_bindgen_test]
fn test_unrecognized_falls_back_to_unlimited() {
    #[rustfmt::skip]
    let expected = [
        r#"<link rel="http://opds-spec.org/acquisition/open-access" href="/book.epub"/>"#,
        r#"<link><opds:availability status="on-order"/></link>"#,
        r#"<link><opds:availability status="available"/></link>"#,
        r#"<link><opds:availability status="available"/><opds:copies total="?" available="n/a"/></link>"#,
        r#"<link><opds:copies total="5" available="3"/></link>"#,
        r#"<link><opds:copies total="0" available="0"/></link>"#,
        r#"<entry><title>Not a link</title></entry>"#,
    ];

    for xml in expected {
        assert_eq!(Availability::Unlimited, Availability::from_link(&link(xml)), "{xml}");
    }
}

#[test]
#[wasm_bindgen_test]
fn test_malformed_dates_are_absent() {
    let link = link(
        r#"<link>
             <opds:availability status="available" since="last tuesday" until="2024-02-30T00:00:00Z"/>
             <opds:copies total="4" available="1"/>
           </link>"#,
    );

    assert_eq!(
        Availability::Limited(Limited::new(Copies::new(1), Copies::new(4), None, None)),
        Availability::from_link(&link),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_status_less_inference() {
    let link = link(r#"<link><opds:copies total="5" available="0"/></link>"#);
    let no_infer = ParseSettings::builder().infer_from_counts(false);

    assert_eq!(
        Availability::Limited(Limited::new(Copies::new(0), Copies::new(5), None, None)),
        Availability::from_link(&link),
    );
    assert_eq!(Availability::Unlimited, Availability::from_link_with(&link, no_infer));
}

#[test]
#[wasm_bindgen_test]
fn test_exhausted_copies_under_any_status() {
    #[rustfmt::skip]
    let expected = [
        r#"<link><opds:availability status="reserved"/><opds:copies total="5" available="0"/></link>"#,
        r#"<link><opds:availability status="ready"/><opds:copies total="5" available="0"/></link>"#,
        r#"<link><opds:availability status="on-order"/><opds:copies total="5" available="0"/></link>"#,
        r#"<link><opds:availability status="reserved"/><opds:holds position="0"/><opds:copies total="5" available="0"/></link>"#,
    ];
    let no_infer = ParseSettings::builder().infer_from_counts(false).build();

    for xml in expected {
        let link = link(xml);

        assert_eq!(
            Availability::Limited(Limited::new(Copies::new(0), Copies::new(5), None, None)),
            Availability::from_link(&link),
            "{xml}",
        );
        let strict = Availability::from_link_with(&link, no_infer.clone());
        assert!(!matches!(strict, Availability::Limited(_)), "{xml}");
    }
}

#[test]
#[wasm_bindgen_test]
fn test_holds_position_takes_precedence_over_copies() {
    #[rustfmt::skip]
    let expected = [
        r#"<link>
             <opds:availability status="available"/>
             <opds:holds position="2" total="4"/>
             <opds:copies total="5" available="0"/>
           </link>"#,
        r#"<link>
             <opds:holds position="2" total="4"/>
             <opds:copies total="5" available="0"/>
           </link>"#,
    ];

    for xml in expected {
        let reserved =
            Reserved::new(2, Copies::new(4), Copies::new(0), Copies::new(5), None, None).unwrap();

        assert_eq!(
            Availability::Reserved(reserved),
            Availability::from_link(&link(xml)),
            "{xml}",
        );
    }
}

#[test]
#[wasm_bindgen_test]
fn test_clamp_copies() {
    let link = link(
        r#"<link>
             <opds:availability status="available"/>
             <opds:copies total="2" available="9"/>
           </link>"#,
    );

    let clamped = Availability::from_link(&link);
    let raw = Availability::from_link_with(
        &link,
        ParseSettings {
            clamp_copies: false,
            ..ParseSettings::default()
        },
    );

    assert_eq!(
        Availability::Limited(Limited::new(Copies::new(2), Copies::new(2), None, None)),
        clamped,
    );
    assert_eq!(
        Availability::Limited(Limited::new(Copies::new(9), Copies::new(2), None, None)),
        raw,
    );
}

#[test]
#[wasm_bindgen_test]
fn test_unprefixed_names() {
    let link = link(
        r#"<link xmlns="http://www.w3.org/2005/Atom">
             <availability status="ready"/>
           </link>"#,
    );

    assert_eq!(Availability::Ready(Ready::new(None, None)), Availability::from_link(&link));
}

#[test]
#[wasm_bindgen_test]
fn test_from_link_xml() {
    let availability = Availability::from_link_xml(
        r#"<link><opds:availability status="ready" since="2024-01-01"/></link>"#,
    )
    .unwrap();

    assert_eq!(Some(date("2024-01-01T00:00:00")), availability.since());
    assert!(Availability::from_link_xml("<link><opds:holds></link>").is_err());
}
