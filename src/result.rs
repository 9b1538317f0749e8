use std::fmt;

/// Path of every doctype difference.
pub const DOCTYPE_PATH: &str = "DOCTYPE";

/// Kinds of differences between two normalized trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifferenceType {
    TagMismatch,
    TextMismatch,
    AttributeMismatch,
    AttributeMissing,
    AttributeExtra,
    ClassMissing,
    ClassExtra,
    StyleMismatch,
    SelfClosingMismatch,
    ChildMissing,
    ChildExtra,
    NodeTypeMismatch,
    CommentMismatch,
    ConditionalCommentConditionMismatch,
    DoctypeMissing,
    DoctypeExtra,
    DoctypeMismatch,
}

impl DifferenceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DifferenceType::TagMismatch => "TAG_MISMATCH",
            DifferenceType::TextMismatch => "TEXT_MISMATCH",
            DifferenceType::AttributeMismatch => "ATTRIBUTE_MISMATCH",
            DifferenceType::AttributeMissing => "ATTRIBUTE_MISSING",
            DifferenceType::AttributeExtra => "ATTRIBUTE_EXTRA",
            DifferenceType::ClassMissing => "CLASS_MISSING",
            DifferenceType::ClassExtra => "CLASS_EXTRA",
            DifferenceType::StyleMismatch => "STYLE_MISMATCH",
            DifferenceType::SelfClosingMismatch => "SELF_CLOSING_MISMATCH",
            DifferenceType::ChildMissing => "CHILD_MISSING",
            DifferenceType::ChildExtra => "CHILD_EXTRA",
            DifferenceType::NodeTypeMismatch => "NODE_TYPE_MISMATCH",
            DifferenceType::CommentMismatch => "COMMENT_MISMATCH",
            DifferenceType::ConditionalCommentConditionMismatch => {
                "CONDITIONAL_COMMENT_CONDITION_MISMATCH"
            }
            DifferenceType::DoctypeMissing => "DOCTYPE_MISSING",
            DifferenceType::DoctypeExtra => "DOCTYPE_EXTRA",
            DifferenceType::DoctypeMismatch => "DOCTYPE_MISMATCH",
        }
    }
}

impl fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single difference between the expected and the actual document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    pub kind: DifferenceType,
    /// Location from the document root, e.g. `html > body > div[0] > p[1]@class`.
    pub path: String,
    /// Raw value or node summary on the expected side, if there is one.
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub message: Option<String>,
}

impl Difference {
    pub(crate) fn new(
        kind: DifferenceType,
        path: impl Into<String>,
        expected: Option<String>,
        actual: Option<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            expected,
            actual,
            message: None,
        }
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// One-line `path: -expected +actual` rendering.
    pub fn unified(&self) -> String {
        format!(
            "{}: -{} +{}",
            self.path,
            self.expected.as_deref().unwrap_or(""),
            self.actual.as_deref().unwrap_or("")
        )
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: ", self.kind, self.path)?;
        if let Some(message) = &self.message {
            return f.write_str(message);
        }
        write!(
            f,
            "expected {}, got {}",
            quoted(self.expected.as_deref()),
            quoted(self.actual.as_deref())
        )
    }
}

fn quoted(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{value}'"),
        None => "nothing".to_owned(),
    }
}

/// Outcome of a comparison: equal iff no differences were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonResult {
    pub is_equal: bool,
    pub differences: Vec<Difference>,
}

impl ComparisonResult {
    pub fn from_differences(differences: Vec<Difference>) -> Self {
        Self {
            is_equal: differences.is_empty(),
            differences,
        }
    }

    pub fn is_equal(&self) -> bool {
        self.is_equal
    }

    /// Differences of one kind, in traversal order.
    pub fn of_kind(&self, kind: DifferenceType) -> impl Iterator<Item = &Difference> {
        self.differences.iter().filter(move |d| d.kind == kind)
    }
}

impl From<ComparisonResult> for bool {
    fn from(result: ComparisonResult) -> bool {
        result.is_equal
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_equal {
            return f.write_str("HTML documents are equal");
        }
        f.write_str("HTML documents differ:")?;
        for difference in &self.differences {
            write!(f, "\n  - {difference}")?;
        }
        Ok(())
    }
}
