//! In-memory tree produced by the parser and rewritten by the normalizer.

use std::collections::BTreeMap;
use std::fmt;

const SUMMARY_LIMIT: usize = 20;

/// A node in a parsed HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(TextNode),
    Comment(Comment),
    ConditionalComment(ConditionalComment),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    /// Attribute names are unique; their order carries no meaning.
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Node>,
    /// Whether the source used `<tag/>` syntax.
    pub is_self_closing: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub content: String,
}

/// An IE conditional comment (`<!--[if COND]>...<![endif]-->`) whose body
/// has been parsed as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalComment {
    pub condition: String,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

/// Root of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Node>,
    pub doctype: Option<Doctype>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(TextNode {
            content: content.into(),
        })
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Node::Comment(Comment {
            content: content.into(),
        })
    }

    /// Human readable name of the node kind, used in mismatch messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
            Node::Comment(_) => "comment",
            Node::ConditionalComment(_) => "conditional comment",
        }
    }

    /// Short rendering for difference reports: `<tag>` for elements, and
    /// content cut after 20 characters for text and comments.
    pub fn summary(&self) -> String {
        match self {
            Node::Element(element) => format!("<{}>", element.tag),
            Node::Text(text) => truncate(&text.content),
            Node::Comment(comment) => format!("<!--{}-->", truncate(&comment.content)),
            Node::ConditionalComment(conditional) => {
                format!("<!--[if {}]>", conditional.condition)
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl fmt::Display for Doctype {
    /// Reconstructs the declaration, e.g. `<!DOCTYPE html>` or
    /// `<!DOCTYPE html PUBLIC "..." "...">`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<!DOCTYPE {}", self.name)?;
        match (self.public_id.is_empty(), self.system_id.is_empty()) {
            (true, true) => {}
            (false, true) => write!(f, " PUBLIC \"{}\"", self.public_id)?,
            (false, false) => write!(f, " PUBLIC \"{}\" \"{}\"", self.public_id, self.system_id)?,
            (true, false) => write!(f, " SYSTEM \"{}\"", self.system_id)?,
        }
        f.write_str(">")
    }
}

fn truncate(content: &str) -> String {
    match content.char_indices().nth(SUMMARY_LIMIT) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_owned(),
    }
}
