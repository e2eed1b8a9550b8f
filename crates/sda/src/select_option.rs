// Select option variants for `<select>` fields
//
// An option can be addressed by its value attribute, its visible label, or
// its position.

/// Select option variant
///
/// # Example
///
/// ```ignore
/// use sda::SelectOption;
///
/// let by_value = SelectOption::Value("us".to_string());
/// let by_label = SelectOption::Label("United States".to_string());
/// let by_index = SelectOption::Index(0);
///
/// // Plain strings address the value attribute
/// assert_eq!(SelectOption::from("us"), by_value);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOption {
    /// Option value attribute
    Value(String),
    /// Option label (visible text)
    Label(String),
    /// Option index (0-based, document order)
    Index(usize),
}

impl SelectOption {
    /// True when the option with this value, label and position is addressed.
    ///
    /// Labels are compared after trimming, the way browsers render them.
    pub(crate) fn matches(&self, value: &str, label: &str, index: usize) -> bool {
        match self {
            SelectOption::Value(v) => v == value,
            SelectOption::Label(l) => l.trim() == label.trim(),
            SelectOption::Index(i) => *i == index,
        }
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        SelectOption::Value(value.to_string())
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        SelectOption::Value(value)
    }
}

impl From<usize> for SelectOption {
    fn from(index: usize) -> Self {
        SelectOption::Index(index)
    }
}

impl std::fmt::Display for SelectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectOption::Value(v) => write!(f, "value '{v}'"),
            SelectOption::Label(l) => write!(f, "label '{l}'"),
            SelectOption::Index(i) => write!(f, "index {i}"),
        }
    }
}
