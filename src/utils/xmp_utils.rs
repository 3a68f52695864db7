//! XMP packet summary
//!
//! Collects the simple properties of every `rdf:Description` in an XMP
//! packet: its attributes and the text of its direct child elements.
//! Nested containers (`rdf:Seq`, `rdf:Alt`, `rdf:Bag`) are not expanded.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::meta::errors::{MetaError, MetaResult};

/// One property of an XMP packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmpProperty {
    /// Qualified name, e.g. `xmp:CreatorTool`
    pub name: String,
    pub value: String,
}

fn is_description(e: &BytesStart) -> bool {
    e.local_name().as_ref() == b"Description"
}

fn collect_attributes(e: &BytesStart, properties: &mut Vec<XmpProperty>) -> MetaResult<()> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| MetaError::GenericError(format!("XMP attribute: {}", err)))?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        if name.starts_with("xmlns") || name == "rdf:about" {
            continue;
        }
        let value = attr.unescape_value()
            .map_err(|err| MetaError::GenericError(format!("XMP attribute value: {}", err)))?;
        properties.push(XmpProperty { name, value: value.to_string() });
    }
    Ok(())
}

/// Summarises the properties of an XMP packet
pub fn summarize_xmp(packet: &[u8]) -> MetaResult<Vec<XmpProperty>> {
    let mut reader = Reader::from_reader(packet);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut properties = Vec::new();
    // Depth below the innermost open rdf:Description, if any
    let mut depth: Option<usize> = None;
    let mut current: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if is_description(e) {
                    collect_attributes(e, &mut properties)?;
                    depth = Some(0);
                } else if let Some(d) = depth {
                    if d == 0 {
                        current = Some(String::from_utf8_lossy(e.name().as_ref()).to_string());
                    }
                    depth = Some(d + 1);
                }
            }
            Ok(Event::Empty(ref e)) => {
                if is_description(e) {
                    collect_attributes(e, &mut properties)?;
                }
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(1), Some(name)) = (depth, current.as_ref()) {
                    let text = e.unescape()
                        .map_err(|err| MetaError::GenericError(format!("XMP text: {}", err)))?;
                    if !text.is_empty() {
                        properties.push(XmpProperty { name: name.clone(), value: text.to_string() });
                    }
                }
            }
            Ok(Event::End(_)) => {
                depth = match depth {
                    Some(0) | None => None,
                    Some(d) => {
                        if d == 1 {
                            current = None;
                        }
                        Some(d - 1)
                    }
                };
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(MetaError::GenericError(format!(
                    "XMP parse error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
        buf.clear();
    }

    Ok(properties)
}
