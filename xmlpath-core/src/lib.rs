//! Flatten XML documents into element paths and compare the path sets.
//!
//! Every element is rendered as the chain of segments from the document root
//! down to it. [`PathOptions`] decides whether a segment also carries the
//! element's attribute names, attribute values, or (for leaves) its text.
//! Two documents are then compared as sets of such paths: anything present on
//! one side only is reported for that side.
//!
//! ```
//! use xmlpath_core::{diff_documents, parse, PathOptions};
//!
//! let left = parse(b"<a><b/></a>").unwrap();
//! let right = parse(b"<a><c/></a>").unwrap();
//!
//! let diff = diff_documents(&left, &right, &PathOptions::structure());
//! assert_eq!(diff.only_left, vec!["a/b"]);
//! assert_eq!(diff.only_right, vec!["a/c"]);
//! ```

pub mod diff;
pub mod flatten;
pub mod format;
pub mod parser;
pub mod path;
pub mod tree;

pub use diff::{diff_documents, diff_paths, PathDiff};
pub use flatten::{flatten, flatten_document};
pub use format::{format_json, format_summary, format_text, report_lines, ReportLine};
pub use parser::{parse, parse_file, ParseError};
pub use path::{build_path, encode_attributes, segment, PathOptions};
pub use tree::{Attribute, NodeId, XmlDocument, XmlNode};
