//! Per-element path strings.
//!
//! A path is the root-to-node chain of segments joined by `/`. Each segment
//! is the element's local name, optionally followed by `:` and its attribute
//! encoding, optionally followed by `/` and its text when the element is a
//! leaf. Separator characters inside names or values are not escaped.

use serde::Serialize;

use crate::tree::{NodeId, XmlDocument, XmlNode};

/// Joins segments of a path, and prefixes a leaf's text inside a segment.
pub const SEGMENT_SEPARATOR: &str = "/";
/// Introduces the attribute encoding, and splits attribute name from value.
pub const ATTRIBUTE_SEPARATOR: &str = ":";
/// Joins attributes within one segment.
pub const ATTRIBUTE_LIST_SEPARATOR: &str = "*";

/// Controls how much of each element ends up in its path.
///
/// `include_attribute_values` only matters when `include_attributes` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PathOptions {
    /// Append attribute names to every segment.
    pub include_attributes: bool,
    /// Render attributes as `name:value` instead of `name`.
    pub include_attribute_values: bool,
    /// Append the text of leaf elements.
    pub include_values: bool,
}

impl PathOptions {
    /// Structure only: element names.
    pub fn structure() -> Self {
        Self::default()
    }

    pub fn with_attributes(mut self, include: bool) -> Self {
        self.include_attributes = include;
        self
    }

    pub fn with_attribute_values(mut self, include: bool) -> Self {
        self.include_attribute_values = include;
        self
    }

    pub fn with_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }
}

/// Encode an element's own attributes, joined by `*` in document order.
pub fn encode_attributes(node: &XmlNode, include_attribute_values: bool) -> String {
    let mut out = String::new();
    for (i, attr) in node.attributes.iter().enumerate() {
        if i > 0 {
            out.push_str(ATTRIBUTE_LIST_SEPARATOR);
        }
        out.push_str(&attr.name);
        if include_attribute_values {
            out.push_str(ATTRIBUTE_SEPARATOR);
            out.push_str(&attr.value);
        }
    }
    out
}

/// Build the single segment contributed by `node`.
pub fn segment(node: &XmlNode, options: &PathOptions) -> String {
    let mut out = node.name.clone();

    if options.include_attributes {
        out.push_str(ATTRIBUTE_SEPARATOR);
        out.push_str(&encode_attributes(node, options.include_attribute_values));
    }

    // Elements with children never contribute their own text.
    if options.include_values && !node.has_children() {
        out.push_str(SEGMENT_SEPARATOR);
        out.push_str(&node.text);
    }

    out
}

/// Build the full path from the document root down to `id`.
pub fn build_path(doc: &XmlDocument, id: NodeId, options: &PathOptions) -> String {
    let mut segments: Vec<String> = doc
        .ancestors(id)
        .map(|ancestor| segment(doc.node(ancestor), options))
        .collect();
    segments.reverse();
    segments.join(SEGMENT_SEPARATOR)
}
