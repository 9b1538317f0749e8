//! Lock-step walk over two normalized trees.
//!
//! Child lists are compared by position. An inserted or removed child shifts
//! every later sibling, so one insertion can surface as several mismatches
//! followed by a `CHILD_EXTRA`/`CHILD_MISSING`.

use std::collections::{BTreeMap, BTreeSet};

use crate::css;
use crate::elements::is_self_closing_significant;
use crate::nodes::{ConditionalComment, Doctype, Document, Element, Node};
use crate::result::{ComparisonResult, Difference, DifferenceType, DOCTYPE_PATH};
use crate::HtmlCompareError;

/// Compares two normalized documents and collects every difference.
///
/// Fails only when a `style` attribute is not a valid declaration list.
pub fn compare_trees(
    expected: &Document,
    actual: &Document,
) -> Result<ComparisonResult, HtmlCompareError> {
    let mut comparator = TreeComparator::default();
    comparator.compare_doctypes(expected.doctype.as_ref(), actual.doctype.as_ref());
    comparator.compare_children(&expected.children, &actual.children, "")?;
    Ok(ComparisonResult::from_differences(comparator.differences))
}

#[derive(Debug, Default)]
struct TreeComparator {
    differences: Vec<Difference>,
}

impl TreeComparator {
    fn record(&mut self, difference: Difference) {
        log::debug!(target: "htmlcompare.compare", "{difference}");
        self.differences.push(difference);
    }

    fn compare_doctypes(&mut self, expected: Option<&Doctype>, actual: Option<&Doctype>) {
        let kind = match (expected, actual) {
            (Some(_), None) => DifferenceType::DoctypeMissing,
            (None, Some(_)) => DifferenceType::DoctypeExtra,
            (Some(e), Some(a)) if e != a => DifferenceType::DoctypeMismatch,
            _ => return,
        };
        self.record(Difference::new(
            kind,
            DOCTYPE_PATH,
            expected.map(ToString::to_string),
            actual.map(ToString::to_string),
        ));
    }

    fn compare_children(
        &mut self,
        expected: &[Node],
        actual: &[Node],
        parent_path: &str,
    ) -> Result<(), HtmlCompareError> {
        for index in 0..expected.len().max(actual.len()) {
            match (expected.get(index), actual.get(index)) {
                (Some(e), Some(a)) => {
                    self.compare_nodes(e, a, &child_path(parent_path, e, index))?;
                }
                (Some(e), None) => self.record(Difference::new(
                    DifferenceType::ChildMissing,
                    child_path(parent_path, e, index),
                    Some(e.summary()),
                    None,
                )),
                (None, Some(a)) => self.record(Difference::new(
                    DifferenceType::ChildExtra,
                    child_path(parent_path, a, index),
                    None,
                    Some(a.summary()),
                )),
                (None, None) => break,
            }
        }
        Ok(())
    }

    fn compare_nodes(
        &mut self,
        expected: &Node,
        actual: &Node,
        path: &str,
    ) -> Result<(), HtmlCompareError> {
        match (expected, actual) {
            (Node::Element(e), Node::Element(a)) => self.compare_elements(e, a, path)?,
            (Node::Text(e), Node::Text(a)) => {
                if e.content != a.content {
                    self.record(Difference::new(
                        DifferenceType::TextMismatch,
                        path,
                        Some(e.content.clone()),
                        Some(a.content.clone()),
                    ));
                }
            }
            (Node::Comment(e), Node::Comment(a)) => {
                if e.content != a.content {
                    self.record(Difference::new(
                        DifferenceType::CommentMismatch,
                        path,
                        Some(e.content.clone()),
                        Some(a.content.clone()),
                    ));
                }
            }
            (Node::ConditionalComment(e), Node::ConditionalComment(a)) => {
                self.compare_conditional_comments(e, a, path)?
            }
            _ => self.record(
                Difference::new(
                    DifferenceType::NodeTypeMismatch,
                    path,
                    Some(expected.summary()),
                    Some(actual.summary()),
                )
                .with_message(format!(
                    "expected {} {}, got {} {}",
                    expected.kind_name(),
                    expected.summary(),
                    actual.kind_name(),
                    actual.summary()
                )),
            ),
        }
        Ok(())
    }

    fn compare_elements(
        &mut self,
        expected: &Element,
        actual: &Element,
        path: &str,
    ) -> Result<(), HtmlCompareError> {
        if expected.tag != actual.tag {
            self.record(Difference::new(
                DifferenceType::TagMismatch,
                path,
                Some(expected.tag.clone()),
                Some(actual.tag.clone()),
            ));
            return Ok(());
        }

        if expected.is_self_closing != actual.is_self_closing
            && is_self_closing_significant(&expected.tag)
        {
            self.record(Difference::new(
                DifferenceType::SelfClosingMismatch,
                path,
                Some(tag_syntax(expected)),
                Some(tag_syntax(actual)),
            ));
        }

        self.compare_attributes(expected, actual, path)?;

        if expected.tag == "style" && self.compare_stylesheets(expected, actual, path) {
            return Ok(());
        }
        self.compare_children(&expected.children, &actual.children, path)
    }

    fn compare_attributes(
        &mut self,
        expected: &Element,
        actual: &Element,
        path: &str,
    ) -> Result<(), HtmlCompareError> {
        let expected_attrs = significant_attributes(&expected.attributes);
        let actual_attrs = significant_attributes(&actual.attributes);
        let names: BTreeSet<&str> = expected_attrs
            .keys()
            .chain(actual_attrs.keys())
            .copied()
            .collect();

        for name in names {
            let attr_path = format!("{path}@{name}");
            match (expected_attrs.get(name), actual_attrs.get(name)) {
                (Some(&e), None) => self.record(Difference::new(
                    DifferenceType::AttributeMissing,
                    attr_path,
                    Some(e.to_owned()),
                    None,
                )),
                (None, Some(&a)) => self.record(Difference::new(
                    DifferenceType::AttributeExtra,
                    attr_path,
                    None,
                    Some(a.to_owned()),
                )),
                (Some(&e), Some(&a)) if name == "class" => self.compare_classes(e, a, &attr_path),
                (Some(&e), Some(&a)) if name == "style" => self.compare_styles(e, a, attr_path)?,
                (Some(&e), Some(&a)) => {
                    if e != a {
                        self.record(Difference::new(
                            DifferenceType::AttributeMismatch,
                            attr_path,
                            Some(e.to_owned()),
                            Some(a.to_owned()),
                        ));
                    }
                }
                (None, None) => {}
            }
        }
        Ok(())
    }

    fn compare_classes(&mut self, expected: &str, actual: &str, path: &str) {
        let expected: BTreeSet<&str> = expected.split_ascii_whitespace().collect();
        let actual: BTreeSet<&str> = actual.split_ascii_whitespace().collect();

        let missing = join(expected.difference(&actual));
        if !missing.is_empty() {
            let message = format!("missing classes: {missing}");
            self.record(
                Difference::new(DifferenceType::ClassMissing, path, Some(missing), None)
                    .with_message(message),
            );
        }
        let extra = join(actual.difference(&expected));
        if !extra.is_empty() {
            let message = format!("unexpected classes: {extra}");
            self.record(
                Difference::new(DifferenceType::ClassExtra, path, None, Some(extra))
                    .with_message(message),
            );
        }
    }

    fn compare_styles(
        &mut self,
        expected: &str,
        actual: &str,
        path: String,
    ) -> Result<(), HtmlCompareError> {
        let equivalent = match css::declarations_equivalent(expected, actual) {
            Ok(equivalent) => equivalent,
            Err(source) => return Err(HtmlCompareError::InvalidStyleSyntax { path, source }),
        };
        if !equivalent {
            self.record(Difference::new(
                DifferenceType::StyleMismatch,
                path,
                Some(expected.to_owned()),
                Some(actual.to_owned()),
            ));
        }
        Ok(())
    }

    /// Compares `<style>` bodies as stylesheets. Returns false, leaving the
    /// children to the plain text comparison, when either side has no single
    /// text child or cannot be tokenized.
    fn compare_stylesheets(&mut self, expected: &Element, actual: &Element, path: &str) -> bool {
        let ([Node::Text(e)], [Node::Text(a)]) =
            (expected.children.as_slice(), actual.children.as_slice())
        else {
            return false;
        };
        match css::stylesheets_equivalent(&e.content, &a.content) {
            Ok(true) => {}
            Ok(false) => self.record(
                Difference::new(
                    DifferenceType::StyleMismatch,
                    child_path(path, &expected.children[0], 0),
                    Some(e.content.clone()),
                    Some(a.content.clone()),
                )
                .with_message("stylesheets differ"),
            ),
            Err(error) => {
                log::debug!(
                    target: "htmlcompare.compare",
                    "{path}: comparing stylesheet as text: {error}"
                );
                return false;
            }
        }
        true
    }

    fn compare_conditional_comments(
        &mut self,
        expected: &ConditionalComment,
        actual: &ConditionalComment,
        path: &str,
    ) -> Result<(), HtmlCompareError> {
        if expected.condition != actual.condition {
            self.record(Difference::new(
                DifferenceType::ConditionalCommentConditionMismatch,
                path,
                Some(expected.condition.clone()),
                Some(actual.condition.clone()),
            ));
            return Ok(());
        }
        self.compare_children(&expected.children, &actual.children, path)
    }
}

/// Drops `class` and `style` attributes whose value is blank: they mean the
/// same as no attribute at all.
fn significant_attributes(attributes: &BTreeMap<String, String>) -> BTreeMap<&str, &str> {
    attributes
        .iter()
        .filter(|(name, value)| {
            !(matches!(name.as_str(), "class" | "style") && value.trim_ascii().is_empty())
        })
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect()
}

fn join<'a, 'b: 'a>(classes: impl Iterator<Item = &'a &'b str>) -> String {
    classes.copied().collect::<Vec<_>>().join(" ")
}

fn tag_syntax(element: &Element) -> String {
    if element.is_self_closing {
        format!("<{} />", element.tag)
    } else {
        format!("<{0}></{0}>", element.tag)
    }
}

fn child_path(parent: &str, node: &Node, index: usize) -> String {
    let segment = match node {
        Node::Element(e) if matches!(e.tag.as_str(), "html" | "head" | "body") => e.tag.clone(),
        Node::Element(e) => format!("{}[{index}]", e.tag),
        Node::Text(_) => format!("#text[{index}]"),
        Node::Comment(_) => format!("#comment[{index}]"),
        Node::ConditionalComment(_) => format!("#conditional-comment[{index}]"),
    };
    if parent.is_empty() {
        segment
    } else {
        format!("{parent} > {segment}")
    }
}
