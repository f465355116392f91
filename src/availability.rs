//! The lending state of a catalog item.
//!
//! An [`Availability`] is exactly one of five variants.
//! Each variant carries only the fields that apply to it;
//! the window accessors ([`Availability::since`], [`Availability::until`])
//! are the only data shared by all of them.

mod dispatch;
mod hold;

use crate::datetime::DateTime;
use crate::errors::AvailabilityError;
use std::fmt::Display;
use std::num::NonZeroU64;

pub use dispatch::Handlers;
pub use hold::{BorrowAction, became_ready, count_ready};

/// A number of copies or holds, which a feed may not disclose.
///
/// [`Copies::UNKNOWN`] is distinct from a count of zero.
///
/// # Examples
/// ```
/// # use opds_availability::Copies;
/// assert_eq!(Some(0), Copies::new(0).get());
/// assert_eq!(None, Copies::UNKNOWN.get());
/// assert_ne!(Copies::new(0), Copies::UNKNOWN);
/// assert_eq!("unknown", Copies::UNKNOWN.to_string());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Copies(Option<u64>);

impl Copies {
    /// The count could not be determined.
    pub const UNKNOWN: Copies = Copies(None);

    /// A known count.
    pub const fn new(count: u64) -> Self {
        Self(Some(count))
    }

    /// The count, or [`None`] if [unknown](Self::UNKNOWN).
    pub const fn get(self) -> Option<u64> {
        self.0
    }

    /// Returns `true` if this is [`Copies::UNKNOWN`].
    pub const fn is_unknown(self) -> bool {
        self.0.is_none()
    }

    pub(crate) const UNKNOWN_STR: &'static str = "unknown";

    /// Reads a decimal count or the `unknown` marker.
    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            Self::UNKNOWN_STR => Some(Self::UNKNOWN),
            count => count.parse().ok().map(Self::new),
        }
    }
}

impl From<u64> for Copies {
    fn from(count: u64) -> Self {
        Self::new(count)
    }
}

impl Display for Copies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(count) => write!(f, "{count}"),
            None => f.write_str(Self::UNKNOWN_STR),
        }
    }
}

/// The item cannot be borrowed or reserved right now.
///
/// The hold queue size and inventory are still reported for display.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Unavailable {
    holds_total: Copies,
    copies_available: Copies,
    copies_total: Copies,
}

impl Unavailable {
    /// Creates an unavailable state with the given hold and copy counts.
    pub fn new(holds_total: Copies, copies_available: Copies, copies_total: Copies) -> Self {
        Self {
            holds_total,
            copies_available,
            copies_total,
        }
    }

    /// The number of holds placed on the item.
    pub fn holds_total(&self) -> Copies {
        self.holds_total
    }

    /// The number of copies that can be borrowed right now.
    pub fn copies_available(&self) -> Copies {
        self.copies_available
    }

    /// The number of copies the lender owns.
    pub fn copies_total(&self) -> Copies {
        self.copies_total
    }
}

/// The item can be borrowed, but only a limited number of copies exist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Limited {
    copies_available: Copies,
    copies_total: Copies,
    since: Option<DateTime>,
    until: Option<DateTime>,
}

impl Limited {
    /// Creates a limited state; `since` and `until` bound the lending window.
    pub fn new(
        copies_available: Copies,
        copies_total: Copies,
        since: Option<DateTime>,
        until: Option<DateTime>,
    ) -> Self {
        Self {
            copies_available,
            copies_total,
            since,
            until,
        }
    }

    /// The number of copies that can be borrowed right now.
    pub fn copies_available(&self) -> Copies {
        self.copies_available
    }

    /// The number of copies the lender owns.
    pub fn copies_total(&self) -> Copies {
        self.copies_total
    }

    /// When the copies became available, if known.
    pub fn since(&self) -> Option<DateTime> {
        self.since
    }

    /// When the copies stop being available, if known.
    pub fn until(&self) -> Option<DateTime> {
        self.until
    }
}

/// The caller holds a place in the item's hold queue.
///
/// # Examples
/// ```
/// # use opds_availability::{Copies, Reserved};
/// # use opds_availability::errors::AvailabilityError;
/// let reserved = Reserved::new(3, Copies::new(10), Copies::UNKNOWN, Copies::new(10), None, None)?;
/// assert_eq!(3, reserved.holds_position().get());
///
/// let next_in_line = Reserved::new(0, Copies::new(10), Copies::UNKNOWN, Copies::new(10), None, None);
/// assert_eq!(Err(AvailabilityError::ZeroHoldsPosition), next_in_line);
/// # Ok::<(), AvailabilityError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Reserved {
    holds_position: NonZeroU64,
    holds_total: Copies,
    copies_available: Copies,
    copies_total: Copies,
    since: Option<DateTime>,
    until: Option<DateTime>,
}

impl Reserved {
    /// Returns [`AvailabilityError::ZeroHoldsPosition`] if `holds_position` is `0`.
    pub fn new(
        holds_position: u64,
        holds_total: Copies,
        copies_available: Copies,
        copies_total: Copies,
        since: Option<DateTime>,
        until: Option<DateTime>,
    ) -> Result<Self, AvailabilityError> {
        let holds_position =
            NonZeroU64::new(holds_position).ok_or(AvailabilityError::ZeroHoldsPosition)?;

        Ok(Self {
            holds_position,
            holds_total,
            copies_available,
            copies_total,
            since,
            until,
        })
    }

    /// The caller's place in the queue; `1` means next in line.
    pub fn holds_position(&self) -> NonZeroU64 {
        self.holds_position
    }

    /// The number of holds placed on the item, including the caller's.
    pub fn holds_total(&self) -> Copies {
        self.holds_total
    }

    /// The number of copies that can be borrowed right now.
    pub fn copies_available(&self) -> Copies {
        self.copies_available
    }

    /// The number of copies the lender owns.
    pub fn copies_total(&self) -> Copies {
        self.copies_total
    }

    /// When the hold was placed, if known.
    pub fn since(&self) -> Option<DateTime> {
        self.since
    }

    /// When the hold expires, if known.
    pub fn until(&self) -> Option<DateTime> {
        self.until
    }
}

/// The caller may check out the item now.
///
/// `until` is when the offer lapses, if the feed says.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ready {
    since: Option<DateTime>,
    until: Option<DateTime>,
}

impl Ready {
    /// Creates a ready state; `until` is when the offer lapses.
    pub fn new(since: Option<DateTime>, until: Option<DateTime>) -> Self {
        Self { since, until }
    }

    /// When the hold became ready, if known.
    pub fn since(&self) -> Option<DateTime> {
        self.since
    }

    /// When the offer to check out lapses, if known.
    pub fn until(&self) -> Option<DateTime> {
        self.until
    }
}

/// The acquisition availability of a catalog item.
///
/// Values are immutable; a change in state is a new value.
///
/// # See Also
/// - [`Self::from_link`] to derive an availability from an OPDS link.
/// - [`Self::to_record`] and [`Self::from_record`] for persistence.
/// - [`Self::dispatch`] to act on the variant without matching on it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Availability {
    Unavailable(Unavailable),
    Limited(Limited),
    /// Always borrowable, without constraints.
    Unlimited,
    Reserved(Reserved),
    Ready(Ready),
}

impl Availability {
    /// When the current state began, if known.
    ///
    /// Always [`None`] for [`Availability::Unavailable`] and [`Availability::Unlimited`].
    pub fn since(&self) -> Option<DateTime> {
        match self {
            Self::Limited(limited) => limited.since,
            Self::Reserved(reserved) => reserved.since,
            Self::Ready(ready) => ready.since,
            Self::Unavailable(_) | Self::Unlimited => None,
        }
    }

    /// When the current state ends, if known.
    ///
    /// Always [`None`] for [`Availability::Unavailable`] and [`Availability::Unlimited`].
    pub fn until(&self) -> Option<DateTime> {
        match self {
            Self::Limited(limited) => limited.until,
            Self::Reserved(reserved) => reserved.until,
            Self::Ready(ready) => ready.until,
            Self::Unavailable(_) | Self::Unlimited => None,
        }
    }

    /// The variant, without its data.
    pub fn kind(&self) -> AvailabilityKind {
        match self {
            Self::Unavailable(_) => AvailabilityKind::Unavailable,
            Self::Limited(_) => AvailabilityKind::Limited,
            Self::Unlimited => AvailabilityKind::Unlimited,
            Self::Reserved(_) => AvailabilityKind::Reserved,
            Self::Ready(_) => AvailabilityKind::Ready,
        }
    }
}

impl From<Unavailable> for Availability {
    fn from(unavailable: Unavailable) -> Self {
        Self::Unavailable(unavailable)
    }
}

impl From<Limited> for Availability {
    fn from(limited: Limited) -> Self {
        Self::Limited(limited)
    }
}

impl From<Reserved> for Availability {
    fn from(reserved: Reserved) -> Self {
        Self::Reserved(reserved)
    }
}

impl From<Ready> for Availability {
    fn from(ready: Ready) -> Self {
        Self::Ready(ready)
    }
}

/// The five kinds of [`Availability`].
///
/// The [`Display`] form is the persisted discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AvailabilityKind {
    Unavailable,
    Limited,
    Unlimited,
    Reserved,
    Ready,
}

impl AvailabilityKind {
    /// All kinds, in declaration order.
    pub const ALL: [AvailabilityKind; 5] = [
        Self::Unavailable,
        Self::Limited,
        Self::Unlimited,
        Self::Reserved,
        Self::Ready,
    ];

    /// The variant name, as written to the record discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "Unavailable",
            Self::Limited => "Limited",
            Self::Unlimited => "Unlimited",
            Self::Reserved => "Reserved",
            Self::Ready => "Ready",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl Display for AvailabilityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
