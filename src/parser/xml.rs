//! maven-metadata.xml parser
//!
//! Collects the text of every `<version>` element at any depth, in document
//! order. Only the element's leading text counts (text before its first child
//! element), and elements without text are skipped.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::warn;

use crate::parser::traits::{ParseError, VersionParser};
use crate::parser::types::{SourceFormat, VersionList};

/// Element name whose text is collected
const VERSION_TAG: &[u8] = b"version";

/// Parser for Maven metadata manifests
pub struct XmlVersionParser;

impl XmlVersionParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlVersionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// An open element on the parse stack
struct Frame {
    /// Index into the collected slots when this element is a `<version>`
    slot: Option<usize>,
    /// Set once a child element starts; later text belongs to that child's tail
    text_closed: bool,
    /// Namespace prefixes declared on this element
    prefixes: Vec<Vec<u8>>,
}

impl VersionParser for XmlVersionParser {
    fn format(&self) -> SourceFormat {
        SourceFormat::Xml
    }

    fn parse(&self, body: &[u8]) -> Result<VersionList, ParseError> {
        let mut reader = Reader::from_reader(body);

        // Slots are reserved at the start tag so nested versions keep document order
        let mut slots: Vec<String> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut seen_root = false;

        loop {
            let event = reader.read_event().map_err(|e| {
                warn!("Failed to parse XML response: {}", e);
                ParseError::InvalidXml(format!("{} at position {}", e, reader.error_position()))
            })?;

            match event {
                Event::Start(ref e) => {
                    let prefixes = check_element(e, &stack, reader.buffer_position())?;
                    open_element(&mut stack, &mut seen_root, reader.buffer_position())?;
                    let slot = (e.name().as_ref() == VERSION_TAG).then(|| {
                        slots.push(String::new());
                        slots.len() - 1
                    });
                    stack.push(Frame {
                        slot,
                        text_closed: false,
                        prefixes,
                    });
                }
                Event::Empty(ref e) => {
                    // `<version/>` has no text and is skipped
                    check_element(e, &stack, reader.buffer_position())?;
                    open_element(&mut stack, &mut seen_root, reader.buffer_position())?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(ref e) => {
                    let text = e
                        .decode()
                        .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                    let text = normalize_line_endings(&text);
                    append_text(&stack, &mut slots, &text, reader.buffer_position())?;
                }
                Event::CData(ref e) => {
                    let text = String::from_utf8_lossy(e);
                    let text = normalize_line_endings(&text);
                    append_text(&stack, &mut slots, &text, reader.buffer_position())?;
                }
                Event::GeneralRef(ref e) => {
                    let resolved = match e
                        .resolve_char_ref()
                        .map_err(|e| ParseError::InvalidXml(e.to_string()))?
                    {
                        Some(ch) => ch.to_string(),
                        None => {
                            let name = e
                                .decode()
                                .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                            quick_xml::escape::resolve_predefined_entity(&name)
                                .ok_or_else(|| {
                                    ParseError::InvalidXml(format!("undefined entity: &{};", name))
                                })?
                                .to_string()
                        }
                    };
                    append_text(&stack, &mut slots, &resolved, reader.buffer_position())?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !stack.is_empty() {
            return Err(ParseError::InvalidXml(format!(
                "{} unclosed element(s) at end of document",
                stack.len()
            )));
        }
        if !seen_root {
            return Err(ParseError::InvalidXml("no root element found".to_string()));
        }

        let versions = slots.into_iter().filter(|v| !v.is_empty()).collect();
        Ok(VersionList::new(versions))
    }
}

/// Validate attributes and namespace prefixes of a start or empty tag.
/// Returns the prefixes the element declares.
fn check_element(
    element: &BytesStart,
    stack: &[Frame],
    position: u64,
) -> Result<Vec<Vec<u8>>, ParseError> {
    let tag = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    let mut declared: Vec<Vec<u8>> = Vec::new();
    let mut used: Vec<Vec<u8>> = Vec::new();

    if let Some(prefix) = element.name().prefix() {
        used.push(prefix.as_ref().to_vec());
    }

    // Duplicate and malformed attributes are rejected by the attribute iterator
    for attr in element.attributes() {
        let attr = attr.map_err(|e| {
            ParseError::InvalidXml(format!("{} in <{}> at position {}", e, tag, position))
        })?;
        let key = attr.key.as_ref();
        if let Some(prefix) = key.strip_prefix(b"xmlns:") {
            declared.push(prefix.to_vec());
        } else if key != b"xmlns" {
            if let Some(prefix) = attr.key.prefix() {
                used.push(prefix.as_ref().to_vec());
            }
        }
    }

    let is_bound = |prefix: &[u8]| {
        prefix == b"xml"
            || declared.iter().any(|p| p == prefix)
            || stack
                .iter()
                .any(|frame| frame.prefixes.iter().any(|p| p == prefix))
    };
    if let Some(prefix) = used.iter().find(|p| !is_bound(p.as_slice())) {
        return Err(ParseError::InvalidXml(format!(
            "unbound prefix \"{}\" in <{}> at position {}",
            String::from_utf8_lossy(prefix),
            tag,
            position
        )));
    }

    Ok(declared)
}

/// XML end-of-line handling: `\r\n` and lone `\r` become `\n`
fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn open_element(stack: &mut [Frame], seen_root: &mut bool, position: u64) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => parent.text_closed = true,
        None if *seen_root => {
            return Err(ParseError::InvalidXml(format!(
                "junk after document element at position {}",
                position
            )));
        }
        None => *seen_root = true,
    }
    Ok(())
}

fn append_text(
    stack: &[Frame],
    slots: &mut [String],
    text: &str,
    position: u64,
) -> Result<(), ParseError> {
    match stack.last() {
        None if !text.trim().is_empty() => Err(ParseError::InvalidXml(format!(
            "text outside of the document element at position {}",
            position
        ))),
        Some(Frame {
            slot: Some(index),
            text_closed: false,
            ..
        }) => {
            slots[*index].push_str(text);
            Ok(())
        }
        _ => Ok(()),
    }
}
