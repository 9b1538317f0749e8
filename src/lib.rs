//! Semantic comparison of HTML documents.
//!
//! Two documents are compared the way a browser would render them, not byte by
//! byte: whitespace between block elements, attribute order, the order of
//! classes and CSS declarations, and zero units all compare equal. When the
//! documents differ, every difference is reported with its location.
//!
//! # Example
//! ```ignore
//! use htmlcompare::HtmlComparer;
//!
//! let html1 = "<div><p>Hello</p></div>";
//! let html2 = "<div>\n  <p>Hello</p>\n</div>";
//!
//! let comparer = HtmlComparer::new();
//! assert!(comparer.compare(html1, html2).unwrap().is_equal());
//! ```
//!
//! For testing, you can use the provided assertion macros:
//! ```ignore
//! # use htmlcompare::assert_html_eq;
//! assert_html_eq!(
//!     "<div><p>Hello</p></div>",
//!     "<div>\n  <p>Hello</p>\n</div>"
//! );
//! ```

/// Asserts that two HTML strings are equivalent according to the given comparison options.
///
/// # Examples
/// ```ignore
/// use htmlcompare::assert_html_eq;
///
/// assert_html_eq!(
///     "<div><p>Hello</p></div>",
///     "<div>\n  <p>Hello</p>\n</div>"
/// );
///
/// // With custom options
/// use htmlcompare::HtmlCompareOptions;
/// assert_html_eq!(
///     "<div><!-- a --><p>Hello</p></div>",
///     "<div><!-- a --><p>Hello</p></div>",
///     HtmlCompareOptions {
///         ignore_comments: false,
///         ..Default::default()
///     }
/// );
/// ```
#[macro_export]
macro_rules! assert_html_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_html_eq!($left, $right, $crate::HtmlCompareOptions::default())
    };
    ($left:expr, $right:expr, $options:expr $(,)?) => {{
        match (&$left, &$right, &$options) {
            (left_val, right_val, options) => {
                let comparer = $crate::HtmlComparer::with_options(options.clone());
                match comparer.compare(left_val, right_val) {
                    Ok(result) if result.is_equal() => {}
                    Ok(result) => panic!(
                        "\n\
                        {}\n\n\
                        left HTML:\n\
                        {}\n\n\
                        right HTML:\n\
                        {}\n\n\
                        options: {:#?}\
                    ",
                        result, left_val, right_val, options
                    ),
                    Err(err) => panic!(
                        "\n\
                        HTML comparison failed:\n\
                        {}\n\n\
                        left HTML:\n\
                        {}\n\n\
                        right HTML:\n\
                        {}\n\n\
                        options: {:#?}\
                    ",
                        err, left_val, right_val, options
                    ),
                }
            }
        }
    }};
}

/// Asserts that two HTML strings are not equivalent according to the given comparison options.
///
/// # Examples
/// ```ignore
/// use htmlcompare::assert_html_ne;
///
/// assert_html_ne!(
///     "<div><p>Hello</p></div>",
///     "<div><p>Different</p></div>"
/// );
/// ```
#[macro_export]
macro_rules! assert_html_ne {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_html_ne!($left, $right, $crate::HtmlCompareOptions::default())
    };
    ($left:expr, $right:expr, $options:expr $(,)?) => {{
        match (&$left, &$right, &$options) {
            (left_val, right_val, options) => {
                let comparer = $crate::HtmlComparer::with_options(options.clone());
                match comparer.compare(left_val, right_val) {
                    Ok(result) if !result.is_equal() => {}
                    Ok(_) => panic!(
                        "\n\
                        HTML strings were equal but expected to be different:\n\n\
                        HTML:\n\
                        {}\n\n\
                        options: {:#?}\
                    ",
                        left_val, options
                    ),
                    Err(err) => panic!(
                        "\n\
                        HTML comparison failed:\n\
                        {}\n\n\
                        left HTML:\n\
                        {}\n\n\
                        right HTML:\n\
                        {}\
                    ",
                        err, left_val, right_val
                    ),
                }
            }
        }
    }};
}

pub mod compare;
pub mod css;
pub mod elements;
pub mod nodes;
pub mod normalize;
pub mod parser;
pub mod result;

pub use compare::compare_trees;
pub use css::CssError;
pub use nodes::{Comment, ConditionalComment, Doctype, Document, Element, Node, TextNode};
pub use normalize::normalize_tree;
pub use parser::parse_html;
pub use result::{ComparisonResult, Difference, DifferenceType, DOCTYPE_PATH};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HtmlCompareError {
    /// A `style` attribute could not be read as a CSS declaration list.
    #[error("invalid style syntax at {path}: {source}")]
    InvalidStyleSyntax {
        path: String,
        #[source]
        source: CssError,
    },
}

/// Configuration for HTML comparison
#[derive(Debug, Clone)]
pub struct HtmlCompareOptions {
    /// Ignore regular comments
    pub ignore_comments: bool,
    /// Drop IE conditional comments (`<!--[if IE]>...<![endif]-->`) and their content
    pub ignore_conditional_comments: bool,
}

impl Default for HtmlCompareOptions {
    fn default() -> Self {
        Self {
            ignore_comments: true,
            ignore_conditional_comments: false,
        }
    }
}

/// Main struct for comparing HTML
#[derive(Debug)]
pub struct HtmlComparer {
    options: HtmlCompareOptions,
}

impl Default for HtmlComparer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlComparer {
    /// Create a new HTML comparer with default options.
    ///
    /// Note about whitespace handling:
    /// - Whitespace between block elements is ignored
    /// - Runs of whitespace in text collapse to a single space
    /// - Whitespace next to inline elements is significant: `foo <b>bar</b>` and
    ///   `foo<b>bar</b>` render differently
    /// - `<pre>` and `xml:space` get no special treatment
    pub fn new() -> Self {
        Self {
            options: HtmlCompareOptions::default(),
        }
    }

    /// Create a new HTML comparer with custom options
    pub fn with_options(options: HtmlCompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HtmlCompareOptions {
        &self.options
    }

    /// Compare two HTML strings.
    ///
    /// Differences are returned in the [`ComparisonResult`]; the only error is
    /// a `style` attribute that is not valid CSS.
    ///
    /// Parsing, normalization and comparison recurse once per nesting level,
    /// so input nested tens of thousands of elements deep can overflow the
    /// stack. Use it on trusted markup such as test fixtures.
    pub fn compare(
        &self,
        expected: &str,
        actual: &str,
    ) -> Result<ComparisonResult, HtmlCompareError> {
        let expected = normalize_tree(&parse_html(expected), &self.options);
        let actual = normalize_tree(&parse_html(actual), &self.options);
        compare_trees(&expected, &actual)
    }
}

/// Compare two HTML strings with the default options.
pub fn compare_html(expected: &str, actual: &str) -> Result<ComparisonResult, HtmlCompareError> {
    HtmlComparer::new().compare(expected, actual)
}

pub fn compare_html_with_options(
    expected: &str,
    actual: &str,
    options: &HtmlCompareOptions,
) -> Result<ComparisonResult, HtmlCompareError> {
    HtmlComparer::with_options(options.clone()).compare(expected, actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XHTML_TRANSITIONAL: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;
    const XHTML_STRICT: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#;

    fn kinds(expected: &str, actual: &str) -> Vec<DifferenceType> {
        compare_html(expected, actual)
            .unwrap()
            .differences
            .iter()
            .map(|d| d.kind)
            .collect()
    }

    #[test]
    fn test_basic_comparison() {
        assert_html_eq!("<div><p>Hello</p></div>", "<div><p>Hello</p></div>");
    }

    #[test]
    fn test_empty_elements() {
        assert_html_eq!("<div></div>", "<div></div>");
        assert_html_eq!("<div></div>", "<div/>");
        assert_html_eq!("<br>", "<br/>");
        assert_html_eq!("<br>", "<br />");
        assert_html_eq!("<img src='test.jpg'>", "<img src='test.jpg'/>");

        // Empty elements with whitespace
        assert_html_eq!("<div></div>", "<div>   </div>");
        assert_html_eq!("<p></p>", "<p>\n</p>");
    }

    #[test]
    fn test_whitespace_handling() {
        // Whitespace between block elements is ignored
        assert_html_eq!(
            "<div><p>Hello</p></div>",
            "<div>\n  <p>\n    Hello\n  </p>\n</div>"
        );
        assert_html_eq!(
            "<div>\n  <p>a</p>\n  <p>b</p>\n</div>",
            "<div><p>a</p><p>b</p></div>"
        );

        // Whitespace at start/end of text in a block is trimmed
        assert_html_eq!("<p>   Hello   </p>", "<p>Hello</p>");

        // Runs of whitespace in text render as one space
        assert_html_eq!("<p>Hello   World</p>", "<p>Hello World</p>");
        assert_html_eq!("<p>Hello \t World</p>", "<p>Hello World</p>");
        assert_html_eq!("<p>Hello\nWorld</p>", "<p>Hello World</p>");

        // A non-breaking space is not whitespace
        assert_html_ne!("<p>Hello&nbsp;World</p>", "<p>Hello World</p>");
    }

    #[test]
    fn test_whitespace_around_inline_elements() {
        assert_html_eq!(
            "<p>Hello <strong>beautiful</strong> World</p>",
            "<p>Hello <strong>beautiful</strong> World</p>"
        );
        assert_html_eq!(
            "<p>Hello   <strong>beautiful</strong>\n World</p>",
            "<p>Hello <strong>beautiful</strong> World</p>"
        );

        // The gap between text and an inline element is visible
        assert_html_ne!(
            "<p>Hello<strong>beautiful</strong>World</p>",
            "<p>Hello <strong>beautiful</strong> World</p>"
        );
        assert_html_ne!("foo <b>bar</b>", "foo<b>bar</b>");
    }

    #[test]
    fn test_attribute_handling() {
        // Different attribute order
        assert_html_eq!(
            "<div class='test' id='1'>Test</div>",
            "<div id='1' class='test'>Test</div>"
        );
        assert_html_eq!(r#"<div a="1" b="2"></div>"#, r#"<div b="2" a="1"></div>"#);

        // Different attribute values
        assert_html_ne!("<div id='a'>Test</div>", "<div id='b'>Test</div>");

        // Multiple attributes
        assert_html_eq!(
            "<div class='a b' id='1' data-test='value'>Content</div>",
            "<div data-test='value' class='a b' id='1'>Content</div>"
        );

        // Boolean attributes
        assert_html_eq!(
            "<input type='checkbox' checked>",
            "<input checked type='checkbox'>"
        );

        // Attribute values are compared verbatim
        assert_html_ne!("<a href='/x'>x</a>", "<a href='/x/'>x</a>");
    }

    #[test]
    fn test_empty_alt_is_not_absent_alt() {
        assert_html_ne!(r#"<img src="a.png" alt="">"#, r#"<img src="a.png">"#);
        assert_eq!(
            kinds(r#"<img alt="">"#, "<img>"),
            vec![DifferenceType::AttributeMissing]
        );
        assert_eq!(
            kinds("<img>", r#"<img alt="">"#),
            vec![DifferenceType::AttributeExtra]
        );
    }

    #[test]
    fn test_class_handling() {
        assert_html_eq!(
            r#"<div class="foo bar"></div>"#,
            r#"<div class="bar  foo"></div>"#
        );
        assert_html_eq!(r#"<div class=" foo "></div>"#, r#"<div class="foo"></div>"#);

        // Empty class is the same as no class
        assert_html_eq!(r#"<div class=""></div>"#, "<div></div>");
        assert_html_eq!(r#"<div class="  "></div>"#, "<div></div>");

        assert_html_ne!(
            r#"<div class="foo bar"></div>"#,
            r#"<div class="foobar"></div>"#
        );
        assert_eq!(
            kinds(r#"<div class="a b"></div>"#, r#"<div class="b c"></div>"#),
            vec![DifferenceType::ClassMissing, DifferenceType::ClassExtra]
        );

        // A blank class on one side is an absent class
        let result = compare_html(r#"<div class="foo"></div>"#, r#"<div class=""></div>"#).unwrap();
        assert!(!result.is_equal());
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceType::AttributeMissing);
        assert_eq!(result.differences[0].path, "html > body > div[0]@class");
        assert_eq!(
            kinds(r#"<div class=" "></div>"#, r#"<div class="foo"></div>"#),
            vec![DifferenceType::AttributeExtra]
        );
    }

    #[test]
    fn test_style_handling() {
        assert_html_eq!(
            r#"<div style="width:0px"></div>"#,
            r#"<div style="width:0"></div>"#
        );
        assert_html_eq!(
            r#"<div style="color: red; width: 10px;"></div>"#,
            r#"<div style="width:10px;color:red"></div>"#
        );
        assert_html_eq!(r#"<div style=""></div>"#, "<div></div>");

        assert_html_ne!(
            r#"<div style="width:1px"></div>"#,
            r#"<div style="width:1"></div>"#
        );
        assert_eq!(
            kinds(
                r#"<div style="color: red"></div>"#,
                r#"<div style="color: blue"></div>"#
            ),
            vec![DifferenceType::StyleMismatch]
        );
    }

    #[test]
    fn test_invalid_style_is_an_error() {
        let result = compare_html(
            r#"<div style="color red"></div>"#,
            r#"<div style="color: red"></div>"#,
        );
        match result {
            Err(HtmlCompareError::InvalidStyleSyntax { path, .. }) => {
                assert_eq!(path, "html > body > div[0]@style");
            }
            other => panic!("expected a style syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_stylesheets() {
        assert_html_eq!(
            "<style>.a { color: red; width: 0px }</style>",
            "<style>.a{width:0;color:red;}</style>"
        );
        assert_html_ne!(
            "<style>.a { color: red }</style>",
            "<style>.a { color: blue }</style>"
        );
    }

    #[test]
    fn test_text_handling() {
        // Basic text comparison
        assert_html_eq!("<p>Hello World</p>", "<p>Hello World</p>");

        // Different text content
        assert_html_ne!("<p>Hello World</p>", "<p>Goodbye World</p>");

        // Text with special characters
        assert_html_eq!("<p>Hello &amp; World</p>", "<p>Hello &amp; World</p>");

        // Mixed text and elements
        assert_html_eq!(
            "<div>Hello <strong>World</strong>!</div>",
            "<div>Hello <strong>World</strong>!</div>"
        );
    }

    #[test]
    fn test_nested_structure() {
        // Basic nesting
        assert_html_eq!(
            "<div><section><h1>Title</h1><p>Text</p></section></div>",
            "<div><section><h1>Title</h1><p>Text</p></section></div>"
        );

        // Different nesting
        assert_html_ne!(
            "<div><section><h1>Title</h1><p>Text</p></section></div>",
            "<div><h1>Title</h1><section><p>Text</p></section></div>"
        );

        // Deep nesting
        assert_html_eq!(
            "<div><article><section><header><h1>Title</h1></header><p>Text</p></section></article></div>",
            "<div><article><section><header><h1>Title</h1></header><p>Text</p></section></article></div>"
        );
    }

    #[test]
    fn test_comment_handling() {
        // Comments ignored by default
        assert_html_eq!(
            "<div><!-- Comment --><p>Test</p></div>",
            "<div><p>Test</p></div>"
        );

        assert_html_eq!(
            "<div><!-- Multiple --><!-- Comments --><p>Test</p></div>",
            "<div><p>Test</p></div>"
        );

        // Comments preserved
        let preserve_comments = HtmlCompareOptions {
            ignore_comments: false,
            ..Default::default()
        };

        // Same comments
        assert_html_eq!(
            "<div><!-- Comment --><p>Test</p></div>",
            "<div><!-- Comment --><p>Test</p></div>",
            preserve_comments.clone()
        );

        // Different comments
        assert_html_ne!(
            "<div><!-- Comment 1 --><p>Test</p></div>",
            "<div><!-- Comment 2 --><p>Test</p></div>",
            preserve_comments.clone()
        );

        // Missing comment
        assert_html_ne!(
            "<div><!-- Comment --><p>Test</p></div>",
            "<div><p>Test</p></div>",
            preserve_comments
        );
    }

    #[test]
    fn test_conditional_comments() {
        let expected = "<div><!--c1--><!--[if IE]><p>a</p><![endif]--></div>";
        let actual = "<div><!--c2--><!--[if IE]><p>b</p><![endif]--></div>";

        // Compared by default, while the regular comments are ignored
        let result = compare_html(expected, actual).unwrap();
        assert!(!result.is_equal());
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceType::TextMismatch);
        assert_eq!(
            result.differences[0].path,
            "html > body > div[0] > #conditional-comment[0] > p[0] > #text[0]"
        );

        let ignore_conditional = HtmlCompareOptions {
            ignore_conditional_comments: true,
            ..Default::default()
        };
        assert_html_eq!(expected, actual, ignore_conditional);

        assert_eq!(
            kinds(
                "<!--[if mso]><p>x</p><![endif]-->",
                "<!--[if !mso]><p>x</p><![endif]-->"
            ),
            vec![DifferenceType::ConditionalCommentConditionMismatch]
        );
        assert_html_eq!(
            "<!--[if mso]>\n  <p>x</p>\n<![endif]-->",
            "<!--[if mso]><p>x</p><![endif]-->"
        );
    }

    #[test]
    fn test_self_closing_syntax() {
        assert_html_ne!(
            r#"<v:rect fillcolor="red"/>"#,
            r#"<v:rect fillcolor="red"></v:rect>"#
        );
        assert_eq!(
            kinds("<v:rect/>", "<v:rect></v:rect>"),
            vec![DifferenceType::SelfClosingMismatch]
        );
        assert_html_eq!("<v:rect />", "<v:rect/>");
        assert_html_eq!(r#"<input type="text" />"#, r#"<input type="text">"#);

        // An empty comment does not hide the markup after it
        assert_eq!(
            kinds("<!--><v:rect/>", "<!--><v:rect></v:rect>"),
            vec![DifferenceType::SelfClosingMismatch]
        );
    }

    #[test]
    fn test_self_closing_scan_leaves_values_and_text_alone() {
        assert_html_eq!("<a href=/docs/>Docs</a>", r#"<a href="/docs/">Docs</a>"#);
        assert_html_eq!(r#"<img title="<b/>">"#, r#"<img title="&lt;b/&gt;">"#);
        assert_html_eq!(
            "<textarea>a<br/></textarea>",
            "<textarea>a&lt;br/&gt;</textarea>"
        );
        assert_html_eq!(
            "<script>if (a<b/>c) {}</script>",
            "<script>if (a<b/>c) {}</script>"
        );
    }

    #[test]
    fn test_doctype_handling() {
        assert_eq!(
            kinds("<!DOCTYPE html><html></html>", "<html></html>"),
            vec![DifferenceType::DoctypeMissing]
        );
        assert_eq!(
            kinds("<html></html>", "<!DOCTYPE html><html></html>"),
            vec![DifferenceType::DoctypeExtra]
        );
        assert_html_eq!("<!DOCTYPE html><p>a</p>", "<!doctype html>\n<p>a</p>");

        let result = compare_html(
            &format!("{XHTML_TRANSITIONAL}<html></html>"),
            &format!("{XHTML_STRICT}<html></html>"),
        )
        .unwrap();
        assert_eq!(result.differences.len(), 1);
        let difference = &result.differences[0];
        assert_eq!(difference.kind, DifferenceType::DoctypeMismatch);
        assert_eq!(difference.path, DOCTYPE_PATH);
        assert_eq!(difference.expected.as_deref(), Some(XHTML_TRANSITIONAL));
        assert_eq!(difference.actual.as_deref(), Some(XHTML_STRICT));

        let html4 = r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#;
        assert_html_eq!(format!("{html4}<p>a</p>"), format!("{html4}<p>a</p>"));
        assert_html_ne!(format!("{html4}<p>a</p>"), "<!DOCTYPE html><p>a</p>");
    }

    #[test]
    fn test_sibling_order() {
        assert_html_ne!(
            "<div><p>First</p><p>Second</p></div>",
            "<div><p>Second</p><p>First</p></div>"
        );
        assert_html_ne!("<ul><li>1</li><li>2</li></ul>", "<ul><li>2</li><li>1</li></ul>");
    }

    #[test]
    fn test_special_characters() {
        // HTML entities
        assert_html_eq!(
            "<p>&lt;div&gt; &amp; &quot;quotes&quot;</p>",
            "<p>&lt;div&gt; &amp; &quot;quotes&quot;</p>"
        );

        // Unicode characters
        assert_html_eq!("<p>Hello 世界 🌍</p>", "<p>Hello 世界 🌍</p>");

        // Mixed entities and Unicode
        assert_html_eq!("<p>&copy; 2024 • Hello 世界</p>", "<p>&copy; 2024 • Hello 世界</p>");

        // Different entities representing same character
        assert_html_eq!("<p>&quot;quoted&quot;</p>", "<p>&#34;quoted&#34;</p>");
    }

    #[test]
    fn test_difference_reports() {
        // Tag mismatch
        let result = HtmlComparer::new()
            .compare("<div>Test</div>", "<span>Test</span>")
            .unwrap();
        assert_eq!(
            result.differences,
            vec![Difference {
                kind: DifferenceType::TagMismatch,
                path: "html > body > div[0]".to_string(),
                expected: Some("div".to_string()),
                actual: Some("span".to_string()),
                message: None,
            }]
        );
        assert!(result.to_string().contains("TAG_MISMATCH"));

        // Text mismatch
        let result = HtmlComparer::new()
            .compare("<div>Hello</div>", "<div>World</div>")
            .unwrap();
        assert_eq!(
            result.differences[0].to_string(),
            "TEXT_MISMATCH at html > body > div[0] > #text[0]: expected 'Hello', got 'World'"
        );

        // Structure mismatch
        let result = HtmlComparer::new()
            .compare("<div><p>Text</p></div>", "<div>Text</div>")
            .unwrap();
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceType::NodeTypeMismatch);
        assert_eq!(result.differences[0].path, "html > body > div[0] > p[0]");
        assert_eq!(result.differences[0].unified(), "html > body > div[0] > p[0]: -<p> +Text");
    }

    #[test]
    fn test_edge_cases() {
        // Empty HTML
        assert_html_eq!("", "");

        // Just whitespace
        assert_html_eq!("   ", "");
        assert_html_eq!("\n\t  \n", "");

        // Single text node
        assert_html_eq!("Hello", "Hello");

        // Deeply nested single element
        assert_html_eq!(
            "<div><div><div><div><div>Text</div></div></div></div></div>",
            "<div><div><div><div><div>Text</div></div></div></div></div>"
        );

        // Many siblings
        let many_siblings: String = (0..100).map(|i| format!("<p>{i}</p>")).collect();
        assert_html_eq!(
            format!("<div>{many_siblings}</div>"),
            format!("<div>\n{many_siblings}\n</div>")
        );

        // HTML with all sorts of content
        assert_html_eq!(
            r#"<div class="wrapper" id="main">
                <!-- Header section -->
                <header class="header">
                    <h1>Title &amp; Subtitle</h1>
                </header>
                <main>
                    <p>Hello 世界!</p>
                    <ul>
                        <li>Item 1</li>
                        <li>Item 2</li>
                    </ul>
                    <img src="test.jpg" alt="Test Image"/>
                </main>
                <!-- Footer section -->
                <footer>
                    <p>&copy; 2024</p>
                </footer>
            </div>"#,
            r#"<div id="main" class="wrapper"><header class="header"><h1>Title &amp; Subtitle</h1></header><main><p>Hello 世界!</p><ul><li>Item 1</li><li>Item 2</li></ul><img alt="Test Image" src="test.jpg"></main><footer><p>&copy; 2024</p></footer></div>"#
        );
    }

    #[test]
    fn test_malformed_html() {
        // Unclosed tags are closed by the parser
        assert_html_eq!("<p>Text", "<p>Text</p>");

        // A stray end tag creates an additional empty paragraph
        let result = compare_html("<p>Text</p></p>", "<p>Text</p>").unwrap();
        assert_eq!(result.differences.len(), 1);
        assert_eq!(result.differences[0].kind, DifferenceType::ChildMissing);
        assert_eq!(result.differences[0].path, "html > body > p[1]");
    }

    #[test]
    fn test_reflexivity() {
        for html in [
            "",
            "<p>a <b>b</b> c</p>",
            r#"<div class="x y" style="color: red">t</div>"#,
            "<!DOCTYPE html><!--[if IE]><p>ie</p><![endif]--><p>x</p>",
            "<table><tr><td> 1 </td></tr></table>",
        ] {
            assert!(compare_html(html, html).unwrap().is_equal(), "{html:?}");
            let keep_all = HtmlCompareOptions {
                ignore_comments: false,
                ignore_conditional_comments: false,
            };
            assert!(compare_html_with_options(html, html, &keep_all).unwrap().is_equal());
        }
    }
}
