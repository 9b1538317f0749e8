//! Element classification tables.

/// Block-level elements: whitespace between them does not affect rendering.
const BLOCK_ELEMENTS: &[&str] = &[
    // document sections
    "html", "head", "body",
    // content sectioning
    "address", "article", "aside", "footer", "header", "hgroup", "main", "nav", "section",
    // text content
    "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure", "hr", "li", "menu", "ol", "p",
    "pre", "ul",
    // tables
    "caption", "col", "colgroup", "table", "tbody", "td", "tfoot", "th", "thead", "tr",
    // forms
    "fieldset", "form", "legend", "optgroup", "option",
    // interactive
    "details", "dialog", "summary",
    // headings
    "h1", "h2", "h3", "h4", "h5", "h6",
    // metadata, not rendered
    "base", "link", "meta", "noscript", "script", "style", "template", "title",
    // VML, as used in Outlook conditional comments
    "v:image", "v:rect", "v:fill", "v:stroke", "v:textbox", "v:shape", "v:shapetype",
    "v:roundrect", "v:oval", "v:line", "v:polyline", "v:group", "v:background",
    // Microsoft Office
    "o:p", "o:wrapblock",
];

/// HTML5 void elements. `<br>`, `<br/>` and `<br />` are the same element.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements where `<tag />` and `<tag></tag>` render differently.
const SELF_CLOSING_SIGNIFICANT: &[&str] = &["script", "style", "textarea", "title", "iframe"];

/// Namespace prefixes (VML and Office) whose elements are XML-like.
const XML_NAMESPACE_PREFIXES: &[&str] = &["v", "o"];

pub fn is_block_element(tag: &str) -> bool {
    BLOCK_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// Whether `<tag/>` versus `<tag></tag>` should be reported as a difference.
///
/// Never true for void elements. True for VML/Office namespaced elements
/// (`v:*`, `o:*`) and for a handful of HTML elements that browsers mishandle
/// when written self-closing.
pub fn is_self_closing_significant(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    if VOID_ELEMENTS.contains(&tag.as_str()) {
        return false;
    }
    if let Some((prefix, _)) = tag.split_once(':') {
        if XML_NAMESPACE_PREFIXES.contains(&prefix) {
            return true;
        }
    }
    SELF_CLOSING_SIGNIFICANT.contains(&tag.as_str())
}
