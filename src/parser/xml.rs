use crate::errors::FormatError;
use crate::parser::ParserResult;
use crate::xml::XmlElement;
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::str;

pub(crate) type ByteReader<'a> = Reader<&'a [u8]>;

pub(crate) trait XmlReader<'a> {
    /// Iterator-like method to read the next [`Event`].
    fn next(&mut self) -> Option<ParserResult<Event<'a>>>;

    /// Reads the first element and its descendants into an [`XmlElement`].
    ///
    /// Text content is skipped; availability data lives in attributes.
    fn read_element(&mut self) -> ParserResult<XmlElement> {
        let mut open: Vec<XmlElement> = Vec::new();

        while let Some(result) = self.next() {
            let closed = match result? {
                Event::Start(start) => {
                    open.push(start_to_element(&start)?);
                    continue;
                }
                Event::Empty(start) => start_to_element(&start)?,
                // Mismatched end tags are rejected by the reader itself
                Event::End(_) => open.pop().ok_or(FormatError::MissingRoot)?,
                _ => continue,
            };

            match open.last_mut() {
                Some(parent) => parent.children.push(closed),
                None => return Ok(closed),
            }
        }
        Err(FormatError::MissingRoot)
    }
}

impl<'a> XmlReader<'a> for ByteReader<'a> {
    fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(|error| FormatError::Unparsable(Box::new(error)))),
        }
    }
}

fn start_to_element(start: &BytesStart) -> ParserResult<XmlElement> {
    let name = str::from_utf8(start.name().as_ref())
        .map_err(|error| FormatError::Unparsable(Box::new(error)))?
        .to_owned();
    let attributes = start
        .attributes()
        .map(|attribute| {
            attribute
                .map_err(|error| FormatError::Unparsable(Box::new(error)))
                .and_then(attribute_to_pair)
        })
        .collect::<ParserResult<_>>()?;

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attribute_to_pair(attribute: Attribute<'_>) -> ParserResult<(String, String)> {
    let key = str::from_utf8(attribute.key.as_ref())
        .map_err(|error| FormatError::Unparsable(Box::new(error)))?
        .to_owned();
    let raw = String::from_utf8(attribute.value.into_owned())
        .map_err(|error| FormatError::Unparsable(Box::new(error)))?;

    // Keep the raw text if it contains an unknown entity
    let value = match unescape(&raw) {
        Ok(Cow::Owned(unescaped)) => unescaped,
        _ => raw,
    };
    Ok((key, value))
}
