//! HTML text to [`Document`] conversion.
//!
//! Parsing is delegated to `scraper` (html5ever), which recovers from any
//! malformed input. On top of that this module recovers what the HTML5 tree
//! builder throws away:
//!
//! - whether a tag was written self-closing (`<v:rect/>`), tracked through a
//!   marker attribute injected before tokenizing;
//! - IE conditional comments, whose bodies are parsed as markup;
//! - the doctype name and public/system identifiers.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::Html;

use crate::nodes::{Comment, ConditionalComment, Doctype, Document, Element, Node, TextNode};

/// Attribute injected into self-closing tags so the flag survives tokenizing.
const SELF_CLOSING_MARKER: &str = "data-htmlcompare-self-closing";

/// Conditional comment bodies nested deeper than this stay plain comments.
const MAX_CONDITIONAL_DEPTH: usize = 16;

/// Start tag anchored at the scan position. Captures the name, the attribute
/// text and the trailing `/`. Unquoted values run to whitespace or `>`, so
/// `<a href=/docs/>` keeps its slash and is not self-closing.
static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\A<([A-Za-z][^\t\n\x0C\r />]*)((?:[\t\n\x0C\r /]+[^\t\n\x0C\r />=]+(?:[\t\n\x0C\r ]*=[\t\n\x0C\r ]*(?:"[^"]*"|'[^']*'|[^\t\n\x0C\r >]+))?)*)[\t\n\x0C\r ]*(/)?>"#,
    )
    .expect("start tag pattern is valid")
});

// `<!-->` and `<!--->` are complete empty comments. An unterminated comment
// runs to the end of input.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A<!--(?:>|->|.*?(?:--!?>|\z))").expect("comment pattern is valid")
});

/// Elements whose content the tokenizer reads as text up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "textarea", "title", "xmp", "iframe", "noembed", "noframes",
];

static CONDITIONAL_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[if\s+([^\]]+)\]>").expect("condition pattern is valid"));

static CONDITIONAL_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!\[endif\]$").expect("endif pattern is valid"));

/// Parse an HTML document into a [`Document`] tree.
///
/// Never fails: malformed markup is recovered by the HTML5 parsing algorithm,
/// so the result always contains the `html`/`head`/`body` skeleton.
pub fn parse_html(html: &str) -> Document {
    parse_document(html, 0)
}

fn parse_document(html: &str, depth: usize) -> Document {
    let marked = mark_self_closing_tags(html);
    let parsed = Html::parse_document(&marked);

    let mut document = Document::default();
    for child in parsed.tree.root().children() {
        if let scraper::Node::Doctype(doctype) = child.value() {
            if document.doctype.is_none() {
                document.doctype = Some(Doctype {
                    name: doctype.name().to_owned(),
                    public_id: doctype.public_id().to_owned(),
                    system_id: doctype.system_id().to_owned(),
                });
            }
            continue;
        }
        if let Some(node) = convert_node(child, depth) {
            document.children.push(node);
        }
    }
    document
}

/// Adds [`SELF_CLOSING_MARKER`] to every start tag written as `<name ... />`.
///
/// The scan walks tag boundaries only, so quoted attribute values are never
/// looked into. Comments, end tags, doctypes and the bodies of raw text
/// elements are copied untouched. Conditional comment bodies get their own
/// pass when they are re-parsed.
fn mark_self_closing_tags(html: &str) -> String {
    let mut marked = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        marked.push_str(&rest[..open]);
        rest = &rest[open..];

        let consumed = if let Some(comment) = COMMENT.find(rest) {
            marked.push_str(comment.as_str());
            comment.end()
        } else if let Some(tag) = START_TAG.captures(rest) {
            let (whole, name) = (&tag[0], &tag[1]);
            if tag.get(3).is_some() {
                marked.push_str(&format!("<{name}{} {SELF_CLOSING_MARKER} />", &tag[2]));
            } else {
                marked.push_str(whole);
            }
            let mut end = whole.len();
            if RAW_TEXT_ELEMENTS.iter().any(|raw| name.eq_ignore_ascii_case(raw)) {
                let text_len = raw_text_len(&rest[end..], name);
                marked.push_str(&rest[end..end + text_len]);
                end += text_len;
            }
            end
        } else if rest.starts_with("</") || rest.starts_with("<!") || rest.starts_with("<?") {
            let end = rest.find('>').map_or(rest.len(), |close| close + 1);
            marked.push_str(&rest[..end]);
            end
        } else {
            marked.push('<');
            1
        };
        rest = &rest[consumed..];
    }
    marked.push_str(rest);
    marked
}

/// Length of raw text up to the `</name` that closes it, or all of `text`.
fn raw_text_len(text: &str, name: &str) -> usize {
    let mut from = 0;
    while let Some(found) = text[from..].find("</") {
        let start = from + found;
        let after = &text.as_bytes()[start + 2..];
        let closes = after.len() >= name.len()
            && after[..name.len()].eq_ignore_ascii_case(name.as_bytes())
            && after.get(name.len()).map_or(true, |&b| ends_tag_name(b));
        if closes {
            return start;
        }
        from = start + 2;
    }
    text.len()
}

fn ends_tag_name(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ' | b'/' | b'>')
}

fn convert_node(node: NodeRef<scraper::Node>, depth: usize) -> Option<Node> {
    match node.value() {
        scraper::Node::Element(element) => {
            let mut converted = Element::new(element.name());
            for (name, value) in element.attrs() {
                if name == SELF_CLOSING_MARKER {
                    converted.is_self_closing = true;
                } else {
                    converted.attributes.insert(name.to_owned(), value.to_owned());
                }
            }
            converted.children = convert_children(node, depth);
            Some(Node::Element(converted))
        }
        scraper::Node::Text(text) => Some(Node::Text(TextNode {
            content: String::from(&**text),
        })),
        scraper::Node::Comment(comment) => Some(classify_comment(&**comment, depth)),
        scraper::Node::Doctype(_)
        | scraper::Node::ProcessingInstruction(_)
        | scraper::Node::Document
        | scraper::Node::Fragment => None,
    }
}

fn convert_children(node: NodeRef<scraper::Node>, depth: usize) -> Vec<Node> {
    node.children()
        .filter_map(|child| convert_node(child, depth))
        .collect()
}

fn classify_comment(content: &str, depth: usize) -> Node {
    match parse_conditional_comment(content, depth) {
        Some(conditional) => Node::ConditionalComment(conditional),
        None => Node::Comment(Comment {
            content: content.to_owned(),
        }),
    }
}

fn parse_conditional_comment(content: &str, depth: usize) -> Option<ConditionalComment> {
    let start = CONDITIONAL_START.captures(content)?;
    let end = CONDITIONAL_END.find(content)?;
    let body_start = start.get(0)?.end();
    if end.start() < body_start {
        return None;
    }
    if depth >= MAX_CONDITIONAL_DEPTH {
        log::debug!(
            target: "htmlcompare.parser",
            "conditional comment nested deeper than {MAX_CONDITIONAL_DEPTH}, keeping it as text"
        );
        return None;
    }

    let condition = start[1].trim().to_owned();
    log::trace!(target: "htmlcompare.parser", "conditional comment [if {condition}]");
    let inner = parse_document(&content[body_start..end.start()], depth + 1);
    Some(ConditionalComment {
        condition,
        children: lift_body_children(inner),
    })
}

/// Pulls the markup of a re-parsed fragment back out of the `html`/`head`/
/// `body` skeleton the tree builder wrapped it in. Anything the builder moved
/// into `head` preceded the body content in the source, so it comes first.
fn lift_body_children(document: Document) -> Vec<Node> {
    let mut lifted = Vec::new();
    for node in document.children {
        match node {
            Node::Element(html) if html.tag == "html" => {
                for section in html.children {
                    match section {
                        Node::Element(section) if section.tag == "head" || section.tag == "body" => {
                            lifted.extend(section.children)
                        }
                        other => lifted.push(other),
                    }
                }
            }
            other => lifted.push(other),
        }
    }
    lifted
}
