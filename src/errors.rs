//! Error-related types.
//!
//! Parsing a link fragment never fails (see [`Availability::from_link`]),
//! so these errors only surface where a caller asks for the reason
//! something was rejected.
//!
//! [`Availability::from_link`]: crate::Availability::from_link

use crate::availability::AvailabilityKind;
#[cfg(feature = "xml")]
use std::error::Error;

/// Alias for `Result<T, RecordError>`.
pub type RecordResult<T> = Result<T, RecordError>;

/// Structural errors when constructing an [`Availability`](crate::Availability) variant.
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    /// A reserved item's hold queue position is 1-based.
    #[error("holds position must be at least 1")]
    ZeroHoldsPosition,
}

/// Reasons a persisted [`Record`](crate::record::Record) is rejected.
///
/// [`Availability::from_record`](crate::Availability::from_record) collapses
/// all of these into [`None`].
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The record has no `type` discriminator.
    #[error("record has no discriminator")]
    MissingDiscriminator,

    /// The `type` discriminator does not name a known variant.
    #[error("unknown availability variant `{0}`")]
    UnknownVariant(String),

    /// The record was written by a newer schema.
    #[error("unsupported record version {0}")]
    UnsupportedVersion(u64),

    /// A key the variant requires is absent.
    #[error("{kind} record is missing `{key}`")]
    MissingField {
        /// The variant named by the discriminator.
        kind: AvailabilityKind,
        /// The absent key.
        key: &'static str,
    },

    /// A key is present but its value cannot be read.
    #[error("invalid value for `{key}`: {value}")]
    InvalidField {
        /// The offending key.
        key: &'static str,
        /// The value as found in the record.
        value: String,
    },

    /// The fields were readable but do not form a valid variant.
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
}

/// Malformed XML text handed to [`XmlElement::parse`](crate::xml::XmlElement::parse).
#[cfg(feature = "xml")]
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// The content causes an internal parser error, such as improper XML.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// The document ends before its root element is closed,
    /// or contains no element at all.
    #[error("no complete root element")]
    MissingRoot,
}
