//! XML node access for OPDS link fragments.
//!
//! The link parser only needs attribute and first-child lookup by name,
//! expressed as [`XmlNode`]. Any XML tree can be plugged in by implementing it;
//! with the `xml` feature (default), [`XmlElement`] provides an owned tree
//! parsed with `quick-xml`.

/// Read access to one XML element.
///
/// Names are matched by local name:
/// a lookup for `holds` finds `opds:holds` as well as `holds`.
pub trait XmlNode {
    /// The qualified name of this element (e.g., `opds:holds`).
    fn name(&self) -> &str;

    /// The value of the first attribute named `name`.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The first child element named `name`.
    fn first_child(&self, name: &str) -> Option<&Self>
    where
        Self: Sized;

    /// Returns `true` if the [local name](local_name) of this element is `name`.
    fn is_named(&self, name: &str) -> bool {
        local_name(self.name()) == name
    }
}

/// Strips the namespace prefix (`opds:holds` → `holds`).
pub fn local_name(qualified: &str) -> &str {
    qualified
        .split_once(':')
        .map_or(qualified, |(_, local)| local)
}

#[cfg(feature = "xml")]
pub use element::XmlElement;

#[cfg(feature = "xml")]
mod element {
    use super::{XmlNode, local_name};
    use crate::errors::FormatError;
    use crate::parser::xml::{ByteReader, XmlReader};

    /// An owned XML element: its name, attributes, and child elements.
    ///
    /// # Examples
    /// - Parsing an OPDS acquisition link:
    /// ```
    /// # use opds_availability::xml::{XmlElement, XmlNode};
    /// # fn main() -> Result<(), opds_availability::errors::FormatError> {
    /// let link = XmlElement::parse(r#"
    ///     <link rel="http://opds-spec.org/acquisition/borrow">
    ///       <opds:copies total="5" available="0"/>
    ///     </link>
    /// "#)?;
    /// let copies = link.first_child("copies").unwrap();
    ///
    /// assert_eq!("opds:copies", copies.name());
    /// assert_eq!(Some("5"), copies.attribute("total"));
    /// # Ok(())
    /// # }
    /// ```
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct XmlElement {
        pub(crate) name: String,
        pub(crate) attributes: Vec<(String, String)>,
        pub(crate) children: Vec<XmlElement>,
    }

    impl XmlElement {
        /// Parses the first element in `xml`, with all of its descendants.
        ///
        /// Content after the first element is not read.
        pub fn parse(xml: &str) -> Result<Self, FormatError> {
            ByteReader::from_str(xml).read_element()
        }

        /// All attributes as `(name, value)` pairs, in document order.
        pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
            self.attributes
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
        }

        /// All child elements, in document order.
        pub fn children(&self) -> &[XmlElement] {
            &self.children
        }
    }

    impl XmlNode for XmlElement {
        fn name(&self) -> &str {
            &self.name
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(key, _)| local_name(key) == name)
                .map(|(_, value)| value.as_str())
        }

        fn first_child(&self, name: &str) -> Option<&Self> {
            self.children.iter().find(|child| child.is_named(name))
        }
    }
}
