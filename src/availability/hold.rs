//! Hold queue helpers built on [`Availability::dispatch`].

use crate::availability::{Availability, Handlers};

/// What a patron can do next with an item, given its availability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorrowAction {
    /// Check the item out ([`Availability::Limited`], [`Availability::Unlimited`]).
    Borrow,
    /// Place a hold ([`Availability::Unavailable`]).
    Reserve,
    /// Wait in the hold queue ([`Availability::Reserved`]).
    Holding,
    /// The hold came through; check out or release it ([`Availability::Ready`]).
    HoldingFrontOfQueue,
}

impl Availability {
    /// The [`BorrowAction`] offered for this availability.
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::{Availability, BorrowAction, Ready};
    /// assert_eq!(BorrowAction::Borrow, Availability::Unlimited.borrow_action());
    /// assert_eq!(
    ///     BorrowAction::HoldingFrontOfQueue,
    ///     Availability::from(Ready::new(None, None)).borrow_action(),
    /// );
    /// ```
    pub fn borrow_action(&self) -> BorrowAction {
        match self {
            Self::Unavailable(_) => BorrowAction::Reserve,
            Self::Limited(_) | Self::Unlimited => BorrowAction::Borrow,
            Self::Reserved(_) => BorrowAction::Holding,
            Self::Ready(_) => BorrowAction::HoldingFrontOfQueue,
        }
    }

    /// Returns `true` while the patron has a hold on the item,
    /// whether still queued or ready for checkout.
    pub fn is_on_hold(&self) -> bool {
        self.dispatch(Handlers::new().reserved(|_| true).ready(|_| true))
            .unwrap_or(false)
    }

    fn is_ready(&self) -> bool {
        self.dispatch(Handlers::new().ready(|_| ())).is_some()
    }

    fn is_reserved(&self) -> bool {
        self.dispatch(Handlers::new().reserved(|_| ())).is_some()
    }
}

/// Returns `true` if an item that was waiting in the hold queue
/// is now ready for checkout.
///
/// This is the transition a patron is notified about.
///
/// # Examples
/// ```
/// # use opds_availability::{Availability, Copies, Ready, Reserved, became_ready};
/// let before = Availability::from(
///     Reserved::new(1, Copies::new(3), Copies::new(0), Copies::new(1), None, None).unwrap(),
/// );
/// let after = Availability::from(Ready::new(None, None));
///
/// assert!(became_ready(&before, &after));
/// assert!(!became_ready(&after, &after));
/// ```
pub fn became_ready(previous: &Availability, current: &Availability) -> bool {
    previous.is_reserved() && current.is_ready()
}

/// The number of items that are ready for checkout.
pub fn count_ready<'a>(availabilities: impl IntoIterator<Item = &'a Availability>) -> usize {
    availabilities
        .into_iter()
        .filter(|availability| availability.is_ready())
        .count()
}
