use std::borrow::Cow;
use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{PrefixDeclaration, QName, ResolveResult};
use quick_xml::reader::NsReader;
use thiserror::Error;
use tracing::debug;

use crate::tree::{Attribute, NodeId, XmlDocument};

/// Errors that can occur while parsing XML into an [`XmlDocument`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input XML could not be decoded or tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Input bytes were not valid UTF-8 for tag/attribute/text extraction.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Failed to decode text entity or bytes.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Failed to read input file.
    #[error("failed to read XML file: {0}")]
    Io(#[from] std::io::Error),
    /// Structural issue in XML document, including a missing root element.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Namespace bound to the `xml` prefix.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
/// Namespace of prefixed `xmlns:*` declarations.
const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Parse XML bytes into an [`XmlDocument`].
///
/// Line endings are normalized to `\n` and attribute values have their
/// whitespace characters replaced by spaces before entities are expanded.
/// Whitespace-only text fragments are dropped; other text and CDATA is
/// appended to the innermost open element in document order. Element names
/// are local names; attribute names in a namespace render as `{uri}local`.
pub fn parse(xml: &[u8]) -> Result<XmlDocument, ParseError> {
    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut builder = TreeBuilder::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let id = builder.open(&e, &reader)?;
                builder.stack.push(id);
            }
            Event::Empty(e) => {
                builder.open(&e, &reader)?;
            }
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e)?;
                let text = unescape(&normalize_line_endings(raw))?.into_owned();
                builder.text(&text)?;
            }
            Event::CData(e) => {
                let raw = std::str::from_utf8(&e)?;
                builder.text(&normalize_line_endings(raw))?;
            }
            Event::End(_) => {
                builder.stack.pop().ok_or_else(|| {
                    ParseError::Malformed("encountered closing tag without open tag".to_string())
                })?;
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
        }
        buf.clear();
    }

    if !builder.stack.is_empty() {
        return Err(ParseError::Malformed(
            "unclosed element(s) at end of document".to_string(),
        ));
    }

    builder
        .doc
        .ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
}

/// Parse an XML file into an [`XmlDocument`].
pub fn parse_file(path: &Path) -> Result<XmlDocument, ParseError> {
    let bytes = fs::read(path)?;
    let doc = parse(&bytes)?;
    debug!(path = %path.display(), elements = doc.element_count(), "loaded XML document");
    Ok(doc)
}

/// Replace `\r\n` and lone `\r` with `\n`.
fn normalize_line_endings(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Replace every line ending, tab or newline in a raw attribute value with a
/// single space. Character references are expanded afterwards and survive.
fn normalize_attribute_value(raw: &str) -> Cow<'_, str> {
    if raw.contains(['\t', '\n', '\r']) {
        Cow::Owned(
            raw.replace("\r\n", " ")
                .replace(|c: char| matches!(c, '\t' | '\n' | '\r'), " "),
        )
    } else {
        Cow::Borrowed(raw)
    }
}

#[derive(Default)]
struct TreeBuilder {
    doc: Option<XmlDocument>,
    stack: Vec<NodeId>,
}

impl TreeBuilder {
    /// Create the element for a start or empty tag under the open element.
    fn open(
        &mut self,
        e: &BytesStart<'_>,
        reader: &NsReader<&[u8]>,
    ) -> Result<NodeId, ParseError> {
        if let (ResolveResult::Unknown(prefix), _) = reader.resolve_element(e.name()) {
            return Err(unknown_prefix(&prefix));
        }
        let name = std::str::from_utf8(e.local_name().as_ref())?.to_string();

        let id = if let Some(doc) = self.doc.as_mut() {
            let parent = self.stack.last().copied().ok_or_else(|| {
                ParseError::Malformed("multiple top-level elements found".to_string())
            })?;
            doc.append_child(parent, name)
        } else {
            self.doc.insert(XmlDocument::new(name)).root()
        };

        for attr in e.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = attribute_name(attr.key, reader)?;
            let raw = std::str::from_utf8(&attr.value)?;
            let value = unescape(&normalize_attribute_value(raw))?.into_owned();
            if let Some(doc) = self.doc.as_mut() {
                doc.push_attribute(id, Attribute::new(key, value));
            }
        }

        Ok(id)
    }

    fn text(&mut self, text: &str) -> Result<(), ParseError> {
        if text.trim_start_matches('\u{feff}').trim().is_empty() {
            return Ok(());
        }
        match (self.doc.as_mut(), self.stack.last()) {
            (Some(doc), Some(current)) => {
                doc.push_text(*current, text);
                Ok(())
            }
            _ => Err(ParseError::Malformed(
                "text outside the root element".to_string(),
            )),
        }
    }
}

/// Render an attribute name: `local` outside any namespace, `{uri}local`
/// inside one. The default `xmlns` declaration keeps its bare name.
fn attribute_name(key: QName<'_>, reader: &NsReader<&[u8]>) -> Result<String, ParseError> {
    let local = std::str::from_utf8(key.local_name().into_inner())?;

    match key.as_namespace_binding() {
        Some(PrefixDeclaration::Default) => return Ok("xmlns".to_string()),
        Some(PrefixDeclaration::Named(prefix)) => {
            let prefix = std::str::from_utf8(prefix)?;
            return Ok(format!("{{{XMLNS_NAMESPACE}}}{prefix}"));
        }
        None => {}
    }
    if key.prefix().is_some_and(|p| p.as_ref() == b"xml") {
        return Ok(format!("{{{XML_NAMESPACE}}}{local}"));
    }

    match reader.resolve_attribute(key) {
        (ResolveResult::Bound(ns), _) => {
            let uri = std::str::from_utf8(ns.into_inner())?;
            Ok(format!("{{{uri}}}{local}"))
        }
        (ResolveResult::Unbound, _) => Ok(local.to_string()),
        (ResolveResult::Unknown(prefix), _) => Err(unknown_prefix(&prefix)),
    }
}

fn unknown_prefix(prefix: &[u8]) -> ParseError {
    ParseError::Malformed(format!(
        "unknown namespace prefix `{}`",
        String::from_utf8_lossy(prefix)
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse, ParseError};

    fn attribute_names(doc: &crate::XmlDocument, id: crate::NodeId) -> Vec<&str> {
        doc.node(id)
            .attributes
            .iter()
            .map(|a| a.name.as_str())
            .collect()
    }

    #[test]
    fn element_names_drop_namespace_prefix() {
        let doc = parse(br#"<p:root xmlns:p="urn:x"><p:item p:id="7" plain="1"/></p:root>"#)
            .expect("parse should succeed");
        let root = doc.node(doc.root());
        assert_eq!(root.name, "root");
        assert_eq!(
            attribute_names(&doc, doc.root()),
            vec!["{http://www.w3.org/2000/xmlns/}p"]
        );
        assert_eq!(root.attributes[0].value, "urn:x");

        let item = root.children()[0];
        assert_eq!(doc.node(item).name, "item");
        assert_eq!(attribute_names(&doc, item), vec!["{urn:x}id", "plain"]);
    }

    #[test]
    fn attribute_names_follow_namespace_not_prefix() {
        let left = parse(br#"<a xmlns:p="urn:x" p:id="1"/>"#).expect("parse");
        let right = parse(br#"<a xmlns:q="urn:x" q:id="1"/>"#).expect("parse");

        assert_eq!(attribute_names(&left, left.root())[1], "{urn:x}id");
        assert_eq!(attribute_names(&right, right.root())[1], "{urn:x}id");
    }

    #[test]
    fn default_namespace_and_xml_prefix_attributes() {
        let doc = parse(br#"<a xmlns="urn:d" xml:lang="en" k="v"/>"#).expect("parse");
        assert_eq!(
            attribute_names(&doc, doc.root()),
            vec![
                "xmlns",
                "{http://www.w3.org/XML/1998/namespace}lang",
                "k"
            ]
        );
    }

    #[test]
    fn undeclared_attribute_prefix_is_malformed() {
        let err = parse(br#"<a p:id="1"/>"#).unwrap_err();
        assert!(matches!(err, ParseError::Malformed(msg) if msg.contains("`p`")));
    }

    #[test]
    fn text_and_cdata_are_concatenated_without_whitespace_runs() {
        let doc = parse(b"<a>\n  <b>x &amp; <![CDATA[<y>]]></b>\n</a>").expect("parse");
        let b = doc.node(doc.root()).children()[0];
        assert_eq!(doc.node(b).text, "x & <y>");
        assert_eq!(doc.node(doc.root()).text, "");
    }

    #[test]
    fn line_endings_are_normalized_in_text_and_cdata() {
        let crlf = parse(b"<a><b>x\r\ny\rz</b><c><![CDATA[1\r\n2]]></c></a>").expect("parse");
        let lf = parse(b"<a><b>x\ny\nz</b><c><![CDATA[1\n2]]></c></a>").expect("parse");
        assert_eq!(crlf, lf);
    }

    #[test]
    fn character_reference_line_endings_survive() {
        let doc = parse(b"<a>x&#13;&#10;y</a>").expect("parse");
        assert_eq!(doc.node(doc.root()).text, "x\r\ny");
    }

    #[test]
    fn attribute_value_whitespace_becomes_spaces() {
        let doc = parse(b"<a x=\"1\n2\" y=\"3\t4\r\n5\" z=\"6&#10;7\"/>").expect("parse");
        let values: Vec<&str> = doc
            .node(doc.root())
            .attributes
            .iter()
            .map(|a| a.value.as_str())
            .collect();
        assert_eq!(values, vec!["1 2", "3 4 5", "6\n7"]);
    }

    #[test]
    fn text_outside_the_root_is_malformed() {
        for xml in [&b"<a/>junk"[..], &b"junk<a/>"[..], &b"<a/><![CDATA[x]]>"[..]] {
            let err = parse(xml).unwrap_err();
            assert!(
                matches!(&err, ParseError::Malformed(msg) if msg.contains("outside the root")),
                "{err}"
            );
        }
    }

    #[test]
    fn whitespace_around_the_root_is_allowed() {
        let doc = parse(b"\n <a/>\r\n\t").expect("parse");
        assert_eq!(doc.element_count(), 1);
    }

    #[test]
    fn missing_root_is_malformed() {
        let err = parse(b"<?xml version=\"1.0\"?><!-- nothing -->").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(msg) if msg.contains("no root")));
    }

    #[test]
    fn second_top_level_element_is_rejected() {
        let err = parse(b"<a/><b/>").unwrap_err();
        assert!(matches!(err, ParseError::Malformed(msg) if msg.contains("multiple")));
    }

    #[test]
    fn unclosed_element_is_rejected() {
        assert!(parse(b"<a><b></b>").is_err());
    }
}
