//! Deriving an [`Availability`](crate::Availability) from an OPDS link.

mod link;
#[cfg(feature = "xml")]
pub(crate) mod xml;

use crate::availability::Availability;
#[cfg(feature = "xml")]
use crate::errors::FormatError;
use crate::xml::XmlNode;

#[cfg(feature = "xml")]
pub(crate) type ParserResult<T> = Result<T, FormatError>;

impl Availability {
    /// Derives the availability described by an OPDS acquisition `link`
    /// with default [`ParseSettings`].
    ///
    /// Never fails: a link with no recognizable availability data,
    /// or with malformed data, is [`Availability::Unlimited`].
    /// Malformed dates and counts degrade to absent and
    /// [unknown](crate::Copies::UNKNOWN) respectively.
    ///
    /// # Examples
    /// ```
    /// # use opds_availability::{Availability, Copies, Limited};
    /// # use opds_availability::xml::XmlElement;
    /// # fn main() -> Result<(), opds_availability::errors::FormatError> {
    /// let link = XmlElement::parse(r#"
    ///     <link rel="http://opds-spec.org/acquisition/borrow">
    ///       <opds:availability status="available"/>
    ///       <opds:copies total="5" available="0"/>
    ///     </link>
    /// "#)?;
    ///
    /// assert_eq!(
    ///     Availability::Limited(Limited::new(Copies::new(0), Copies::new(5), None, None)),
    ///     Availability::from_link(&link),
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_link<N: XmlNode>(link: &N) -> Self {
        link::parse_link(link, &ParseSettings::default())
    }

    /// Derives the availability described by an OPDS acquisition `link`
    /// with the specified [`ParseSettings`].
    ///
    /// # See Also
    /// - [`Self::from_link`] for the decision rules.
    pub fn from_link_with<N: XmlNode>(link: &N, settings: impl Into<ParseSettings>) -> Self {
        link::parse_link(link, &settings.into())
    }

    /// Parses `xml` as an OPDS acquisition `link` element and derives its availability.
    ///
    /// Returns [`FormatError`] only if `xml` is not well-formed;
    /// availability data itself never causes an error.
    #[cfg(feature = "xml")]
    pub fn from_link_xml(xml: &str) -> Result<Self, FormatError> {
        crate::xml::XmlElement::parse(xml).map(|link| Self::from_link(&link))
    }
}

/// Configuration for [`Availability::from_link_with`](crate::Availability::from_link_with).
///
/// # Examples
/// - Keeping copy counts exactly as the feed reports them:
/// ```
/// # use opds_availability::{Availability, Copies};
/// # use opds_availability::parser::ParseSettings;
/// # use opds_availability::xml::XmlElement;
/// # fn main() -> Result<(), opds_availability::errors::FormatError> {
/// let link = XmlElement::parse(r#"
///     <link>
///       <opds:availability status="available"/>
///       <opds:copies total="2" available="3"/>
///     </link>
/// "#)?;
///
/// let Availability::Limited(clamped) = Availability::from_link(&link) else { panic!() };
/// assert_eq!(Copies::new(2), clamped.copies_available());
///
/// let settings = ParseSettings::builder().clamp_copies(false);
/// let Availability::Limited(raw) = Availability::from_link_with(&link, settings) else {
///     panic!()
/// };
/// assert_eq!(Copies::new(3), raw.copies_available());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSettings {
    /// When both counts are known, lower the number of available copies
    /// to the total if a feed reports more available than exist.
    ///
    /// Default: `true`
    pub clamp_copies: bool,
    /// Infer [`Limited`](crate::Availability::Limited) for a link without a
    /// holds position that reports zero available copies out of a nonzero
    /// total, whatever its status (other than `unavailable`).
    ///
    /// When set to `false`, only an `available` status yields
    /// [`Limited`](crate::Availability::Limited).
    ///
    /// Default: `true`
    pub infer_from_counts: bool,
}

impl ParseSettings {
    /// Returns a builder to create a [`ParseSettings`] instance.
    pub fn builder() -> ParseSettingsBuilder {
        ParseSettingsBuilder(Self::default())
    }
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            clamp_copies: true,
            infer_from_counts: true,
        }
    }
}

impl From<ParseSettingsBuilder> for ParseSettings {
    fn from(value: ParseSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct a [`ParseSettings`] instance.
#[derive(Debug, Clone)]
pub struct ParseSettingsBuilder(ParseSettings);

impl ParseSettingsBuilder {
    /// Turn this builder into a [`ParseSettings`] instance.
    pub fn build(self) -> ParseSettings {
        self.0
    }

    /// See [`ParseSettings::clamp_copies`].
    pub fn clamp_copies(mut self, clamp_copies: bool) -> Self {
        self.0.clamp_copies = clamp_copies;
        self
    }

    /// See [`ParseSettings::infer_from_counts`].
    pub fn infer_from_counts(mut self, infer_from_counts: bool) -> Self {
        self.0.infer_from_counts = infer_from_counts;
        self
    }
}
