//! # opds-availability
//!
//! The lending state of an OPDS catalog item:
//! derived from a feed's acquisition link, persisted as a flat record,
//! and acted on per state.
//!
//! An [`Availability`] is one of five variants:
//!
//! | Variant                       | Meaning                                  |
//! |-------------------------------|------------------------------------------|
//! | [`Availability::Unavailable`] | cannot be borrowed; holds may be placed  |
//! | [`Availability::Limited`]     | borrowable from a limited set of copies  |
//! | [`Availability::Unlimited`]   | always borrowable                        |
//! | [`Availability::Reserved`]    | the patron is in the hold queue          |
//! | [`Availability::Ready`]       | the patron's hold can be checked out     |
//!
//! ## Features
//! - `xml` (default): [`xml::XmlElement`], an owned element tree parsed with `quick-xml`.
//!   Without it, implement [`xml::XmlNode`] for the XML tree at hand.
//!
//! ## Examples
//! Deriving availability from a link, persisting it, and reading it back:
//! ```
//! use opds_availability::{Availability, Handlers};
//!
//! # fn main() -> Result<(), opds_availability::errors::FormatError> {
//! let availability = Availability::from_link_xml(r#"
//!     <link rel="http://opds-spec.org/acquisition/borrow">
//!       <opds:availability status="reserved" since="2024-03-01T09:30:00Z"/>
//!       <opds:holds total="10" position="3"/>
//!       <opds:copies total="10"/>
//!     </link>
//! "#)?;
//!
//! let record = availability.to_record();
//! assert_eq!(Some("Reserved"), record["type"].as_str());
//! assert_eq!(Some(&availability), Availability::from_record(&record).as_ref());
//!
//! let label = availability.dispatch(
//!     Handlers::new()
//!         .reserved(|reserved| format!("#{} in line", reserved.holds_position()))
//!         .ready(|_| "Ready to borrow".to_owned()),
//! );
//! assert_eq!(Some("#3 in line"), label.as_deref());
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod datetime;
pub mod errors;
pub mod parser;
pub mod record;
pub mod xml;

pub use self::availability::{
    Availability, AvailabilityKind, BorrowAction, Copies, Handlers, Limited, Ready, Reserved,
    Unavailable, became_ready, count_ready,
};
