//! Parser layer
//! - traits.rs: VersionParser trait and ParseError
//! - types.rs: Common types (VersionList, SourceFormat)
//! - json.rs: version listing API parser
//! - xml.rs: maven-metadata.xml parser

pub mod json;
pub mod traits;
pub mod types;
pub mod xml;

pub use json::JsonVersionParser;
pub use traits::{ParseError, VersionParser};
pub use types::{SourceFormat, VersionList};
pub use xml::XmlVersionParser;

/// Returns the parser for the given source format
pub fn parser_for(format: SourceFormat) -> Box<dyn VersionParser> {
    match format {
        SourceFormat::Json => Box::new(JsonVersionParser::new()),
        SourceFormat::Xml => Box::new(XmlVersionParser::new()),
    }
}
