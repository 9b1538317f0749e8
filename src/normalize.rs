//! Whitespace and comment normalization.
//!
//! Children of a block-level element are in *block context* unless they mix
//! inline elements with non-whitespace text. In block context whitespace-only
//! text is dropped and other text is collapsed and trimmed; in inline context
//! whitespace runs collapse to a single space but the edges are kept, since
//! they decide whether adjacent inline content renders with a gap.

use std::sync::LazyLock;

use regex::Regex;

use crate::elements::is_block_element;
use crate::nodes::{ConditionalComment, Document, Element, Node, TextNode};
use crate::HtmlCompareOptions;

// HTML's whitespace set; U+00A0 renders as a visible space and is kept.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\r\x0C]+").expect("whitespace pattern is valid"));

const HTML_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0C'];

/// Returns a new document with insignificant whitespace and ignored comments
/// removed. Attributes and tag names are left untouched.
pub fn normalize_tree(document: &Document, options: &HtmlCompareOptions) -> Document {
    Document {
        children: normalize_children(&document.children, true, options),
        doctype: document.doctype.clone(),
    }
}

fn normalize_children(
    children: &[Node],
    in_block_context: bool,
    options: &HtmlCompareOptions,
) -> Vec<Node> {
    children
        .iter()
        .filter_map(|child| normalize_node(child, in_block_context, options))
        .collect()
}

fn normalize_node(
    node: &Node,
    in_block_context: bool,
    options: &HtmlCompareOptions,
) -> Option<Node> {
    match node {
        Node::Text(text) => normalize_text(text, in_block_context).map(Node::Text),
        Node::Element(element) => Some(Node::Element(normalize_element(element, options))),
        Node::Comment(_) if options.ignore_comments => None,
        Node::Comment(comment) => Some(Node::Comment(comment.clone())),
        Node::ConditionalComment(_) if options.ignore_conditional_comments => None,
        // the body of a conditional comment is a block-level fragment of its own
        Node::ConditionalComment(conditional) => {
            Some(Node::ConditionalComment(ConditionalComment {
                condition: conditional.condition.clone(),
                children: normalize_children(&conditional.children, true, options),
            }))
        }
    }
}

fn normalize_text(text: &TextNode, in_block_context: bool) -> Option<TextNode> {
    let collapsed = WHITESPACE_RUN.replace_all(&text.content, " ");
    let content = if in_block_context {
        collapsed.trim_matches(HTML_WHITESPACE)
    } else {
        &*collapsed
    };
    if content.is_empty() {
        return None;
    }
    Some(TextNode {
        content: content.to_owned(),
    })
}

fn normalize_element(element: &Element, options: &HtmlCompareOptions) -> Element {
    let children_in_block_context =
        is_block_element(&element.tag) && !mixes_inline_content(&element.children);
    log::trace!(
        target: "htmlcompare.normalize",
        "<{}> children in {} context",
        element.tag,
        if children_in_block_context { "block" } else { "inline" }
    );
    Element {
        tag: element.tag.clone(),
        attributes: element.attributes.clone(),
        children: normalize_children(&element.children, children_in_block_context, options),
        is_self_closing: element.is_self_closing,
    }
}

/// Whitespace between siblings only renders when text sits next to inline
/// elements. Children that are only text, or only elements, don't count.
fn mixes_inline_content(children: &[Node]) -> bool {
    let has_inline_element = children
        .iter()
        .any(|child| matches!(child, Node::Element(e) if !is_block_element(&e.tag)));
    let has_text = children.iter().any(|child| {
        matches!(child, Node::Text(t) if !t.content.trim_matches(HTML_WHITESPACE).is_empty())
    });
    has_inline_element && has_text
}
