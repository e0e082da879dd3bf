//! DOM-free markup parsing for rich-text messages
//!
//! Translations may carry inline HTML (`Click <a href="/x">here</a>`). The
//! localization context needs those fragments as a node sequence without a
//! browser DOM, so [`parse_markup`] reads them with a lenient XML reader:
//! mismatched end tags are tolerated, HTML void elements never take
//! children, unclosed elements are closed at end of input, and a reader
//! error turns the unread remainder into text. The function never fails and
//! is deterministic.

use quick_xml::escape::{escape, resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::fmt::Write as _;

/// HTML elements that never have children
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// A node of a parsed markup fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    /// Character data, entities already resolved
    Text(String),
    /// An element with lowercased name, attributes in source order, and children
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<MarkupNode>,
    },
}

impl MarkupNode {
    /// A text node
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An element without attributes
    pub fn element(name: impl Into<String>, children: Vec<MarkupNode>) -> Self {
        Self::Element {
            name: name.into(),
            attributes: Vec::new(),
            children,
        }
    }

    /// Element name, `None` for text
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Element { name, .. } => Some(name),
            Self::Text(_) => None,
        }
    }

    /// Value of attribute `key` on an element
    pub fn attribute(&self, key: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str()),
            Self::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Element { children, .. } => children.iter().for_each(|child| child.collect_text(out)),
        }
    }

    /// Serialize back to markup, escaping text and attribute values
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape(text.as_str())),
            Self::Element {
                name,
                attributes,
                children,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attributes {
                    let _ = write!(out, " {key}=\"{}\"", escape(value.as_str()));
                }
                out.push('>');
                if is_void(name) {
                    return;
                }
                children.iter().for_each(|child| child.write_html(out));
                let _ = write!(out, "</{name}>");
            }
        }
    }
}

/// Serialize a node sequence back to markup
pub fn to_html(nodes: &[MarkupNode]) -> String {
    nodes.iter().map(MarkupNode::to_html).collect()
}

/// Concatenated text of a node sequence
pub fn text_content(nodes: &[MarkupNode]) -> String {
    nodes.iter().map(MarkupNode::text_content).collect()
}

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<MarkupNode>,
}

#[derive(Default)]
struct TreeBuilder {
    roots: Vec<MarkupNode>,
    open: Vec<OpenElement>,
}

impl TreeBuilder {
    fn siblings(&mut self) -> &mut Vec<MarkupNode> {
        match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    fn push(&mut self, node: MarkupNode) {
        self.siblings().push(node);
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let siblings = self.siblings();
        if let Some(MarkupNode::Text(previous)) = siblings.last_mut() {
            previous.push_str(text);
        } else {
            siblings.push(MarkupNode::Text(text.to_string()));
        }
    }

    fn open(&mut self, name: String, attributes: Vec<(String, String)>) {
        if is_void(&name) {
            self.push(MarkupNode::Element {
                name,
                attributes,
                children: Vec::new(),
            });
        } else {
            self.open.push(OpenElement {
                name,
                attributes,
                children: Vec::new(),
            });
        }
    }

    fn close_top(&mut self) {
        if let Some(element) = self.open.pop() {
            self.push(MarkupNode::Element {
                name: element.name,
                attributes: element.attributes,
                children: element.children,
            });
        }
    }

    /// Close the innermost open element named `name` and everything opened inside it.
    /// End tags with no matching open element are ignored.
    fn close(&mut self, name: &str) {
        if let Some(index) = self.open.iter().rposition(|element| element.name == name) {
            while self.open.len() > index {
                self.close_top();
            }
        }
    }

    fn finish(mut self) -> Vec<MarkupNode> {
        while !self.open.is_empty() {
            self.close_top();
        }
        self.roots
    }
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_ascii_lowercase()
}

fn element_parts(start: &BytesStart<'_>) -> (String, Vec<(String, String)>) {
    let name = element_name(start.name().as_ref());
    let attributes = start
        .html_attributes()
        .filter_map(Result::ok)
        .map(|attr| {
            let key = element_name(attr.key.as_ref());
            let value = unescape_entities(&String::from_utf8_lossy(&attr.value));
            (key, value)
        })
        .collect();
    (name, attributes)
}

fn decode_text(text: &BytesText<'_>) -> String {
    unescape_entities(&String::from_utf8_lossy(text))
}

fn resolve_entity(name: &str) -> Option<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => number.parse::<u32>().ok(),
        };
        return code.and_then(char::from_u32).map(String::from);
    }
    resolve_predefined_entity(name)
        .or_else(|| resolve_html5_entity(name))
        .map(str::to_string)
}

/// Replace entity references one at a time; unknown or unterminated ones keep their raw text.
fn unescape_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        let candidate = &rest[start + 1..];
        let resolved = candidate
            .find(';')
            .and_then(|end| resolve_entity(&candidate[..end]).map(|value| (value, end)));

        match resolved {
            Some((value, end)) => {
                out.push_str(&value);
                rest = &candidate[end + 1..];
            }
            None => {
                out.push('&');
                rest = candidate;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Parse an HTML fragment into an ordered node sequence.
///
/// Comments, processing instructions and doctypes are dropped; CDATA becomes
/// text; adjacent text is merged.
pub fn parse_markup(html: &str) -> Vec<MarkupNode> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut tree = TreeBuilder::default();

    loop {
        let offset = usize::try_from(reader.buffer_position()).unwrap_or(html.len());
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let (name, attributes) = element_parts(&start);
                tree.open(name, attributes);
            }
            Ok(Event::Empty(start)) => {
                let (name, attributes) = element_parts(&start);
                tree.push(MarkupNode::Element {
                    name,
                    attributes,
                    children: Vec::new(),
                });
            }
            Ok(Event::End(end)) => tree.close(&element_name(end.name().as_ref())),
            Ok(Event::Text(text)) => tree.push_text(&decode_text(&text)),
            Ok(Event::CData(data)) => tree.push_text(&String::from_utf8_lossy(&data.into_inner())),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => {
                tree.push_text(html.get(offset..).unwrap_or_default());
                break;
            }
        }
    }

    tree.finish()
}
