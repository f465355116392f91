use crate::availability::{Availability, Limited, Ready, Reserved, Unavailable};

type Handler<'h, T, R> = Option<Box<dyn FnOnce(&T) -> R + 'h>>;

/// Per-variant handlers for [`Availability::dispatch`].
///
/// Every handler is optional; a variant without a handler is skipped.
///
/// # Examples
/// ```
/// # use opds_availability::{Availability, Copies, Handlers, Reserved};
/// let reserved = Availability::from(
///     Reserved::new(2, Copies::new(5), Copies::new(0), Copies::new(1), None, None).unwrap(),
/// );
///
/// let position = reserved.dispatch(
///     Handlers::new()
///         .reserved(|reserved| reserved.holds_position().get())
///         .ready(|_| 0),
/// );
/// assert_eq!(Some(2), position);
///
/// // No handler for `Unlimited`
/// let skipped = Availability::Unlimited.dispatch(Handlers::new().ready(|_| 0));
/// assert_eq!(None, skipped);
/// ```
pub struct Handlers<'h, R> {
    unavailable: Handler<'h, Unavailable, R>,
    limited: Handler<'h, Limited, R>,
    unlimited: Option<Box<dyn FnOnce() -> R + 'h>>,
    reserved: Handler<'h, Reserved, R>,
    ready: Handler<'h, Ready, R>,
}

impl<'h, R> Handlers<'h, R> {
    /// A set with no handlers.
    pub fn new() -> Self {
        Self {
            unavailable: None,
            limited: None,
            unlimited: None,
            reserved: None,
            ready: None,
        }
    }

    /// Sets the handler for [`Availability::Unavailable`].
    pub fn unavailable(mut self, handler: impl FnOnce(&Unavailable) -> R + 'h) -> Self {
        self.unavailable = Some(Box::new(handler));
        self
    }

    /// Sets the handler for [`Availability::Limited`].
    pub fn limited(mut self, handler: impl FnOnce(&Limited) -> R + 'h) -> Self {
        self.limited = Some(Box::new(handler));
        self
    }

    /// [`Availability::Unlimited`] carries no data, so its handler takes no argument.
    pub fn unlimited(mut self, handler: impl FnOnce() -> R + 'h) -> Self {
        self.unlimited = Some(Box::new(handler));
        self
    }

    /// Sets the handler for [`Availability::Reserved`].
    pub fn reserved(mut self, handler: impl FnOnce(&Reserved) -> R + 'h) -> Self {
        self.reserved = Some(Box::new(handler));
        self
    }

    /// Sets the handler for [`Availability::Ready`].
    pub fn ready(mut self, handler: impl FnOnce(&Ready) -> R + 'h) -> Self {
        self.ready = Some(Box::new(handler));
        self
    }
}

impl<R> Default for Handlers<'_, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl Availability {
    /// Invokes the handler for the active variant, and no other.
    ///
    /// Returns the handler's result,
    /// or [`None`] if no handler was given for the active variant.
    pub fn dispatch<R>(&self, handlers: Handlers<'_, R>) -> Option<R> {
        match self {
            Self::Unavailable(unavailable) => handlers.unavailable.map(|f| f(unavailable)),
            Self::Limited(limited) => handlers.limited.map(|f| f(limited)),
            Self::Unlimited => handlers.unlimited.map(|f| f()),
            Self::Reserved(reserved) => handlers.reserved.map(|f| f(reserved)),
            Self::Ready(ready) => handlers.ready.map(|f| f(ready)),
        }
    }
}
