// Locator - (strategy, value) pairs and their XPath normal form
//
// Every lookup in this crate is performed with an XPath expression. Locators
// written with any of the WebDriver strategies are rewritten into a
// `/descendant-or-self::` fragment starting with `/`, so fragments can be
// concatenated to express "B somewhere inside A".
//
// Normalization is pure and recomputed on every lookup. Strategies we do not
// know about, and CSS selectors we cannot translate, normalize to the empty
// expression: the lookup then finds nothing instead of failing up front.

pub mod css;

use crate::driver::NodeId;
use crate::error::{Error, Result};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Selector strategy of a [`Locator`].
///
/// Parses both the WebDriver wire spelling (`"css selector"`) and the
/// snake_case spelling (`"css_selector"`). Anything else is kept as
/// [`By::Unsupported`] so that a mistyped strategy surfaces as "element not
/// found" at lookup time, not as a construction error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum By {
    /// Match on a single class name (substring of the `class` attribute)
    ClassName,
    /// CSS selector, translated to XPath
    CssSelector,
    /// An already resolved element handle
    Element,
    /// Match on the `id` attribute
    Id,
    /// Exact, whitespace-normalized text of a link, button or input
    LinkText,
    /// Match on the `name` attribute
    Name,
    /// Substring of the text of a link, button or input
    PartialLinkText,
    /// Element name
    TagName,
    /// Raw XPath, passed through unchanged
    XPath,
    /// Any strategy name we do not recognise
    Unsupported(String),
}

impl By {
    /// Parse a strategy name. Never fails; see [`By::Unsupported`].
    pub fn parse(name: &str) -> By {
        match name {
            "class name" | "class_name" => By::ClassName,
            "css selector" | "css_selector" | "css" => By::CssSelector,
            "element" => By::Element,
            "id" => By::Id,
            "link text" | "link_text" => By::LinkText,
            "name" => By::Name,
            "partial link text" | "partial_link_text" => By::PartialLinkText,
            "tag name" | "tag_name" => By::TagName,
            "xpath" => By::XPath,
            other => By::Unsupported(other.to_string()),
        }
    }

    /// WebDriver spelling of the strategy
    pub fn as_str(&self) -> &str {
        match self {
            By::ClassName => "class name",
            By::CssSelector => "css selector",
            By::Element => "element",
            By::Id => "id",
            By::LinkText => "link text",
            By::Name => "name",
            By::PartialLinkText => "partial link text",
            By::TagName => "tag name",
            By::XPath => "xpath",
            By::Unsupported(name) => name,
        }
    }

    /// True for the eight strategies whose value is a selector string
    pub fn takes_selector(&self) -> bool {
        !matches!(self, By::Element | By::Unsupported(_))
    }
}

impl From<&str> for By {
    fn from(name: &str) -> Self {
        By::parse(name)
    }
}

impl From<String> for By {
    fn from(name: String) -> Self {
        By::parse(&name)
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved DOM node together with the normalized locator that found it.
///
/// Used as the value of a [`By::Element`] locator: normalizing such a
/// locator returns the stored locator verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRef {
    node: NodeId,
    locator: Arc<Locator>,
}

impl ElementRef {
    /// Creates a handle for `node`, remembering `locator` in normal form.
    pub fn new(node: NodeId, locator: &Locator) -> Self {
        Self {
            node,
            locator: Arc::new(locator.normalize()),
        }
    }

    /// Driver-side node id
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    /// Normalized locator this node was found by
    pub fn locator(&self) -> &Locator {
        &self.locator
    }
}

/// Value half of a [`Locator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorValue {
    /// Selector text
    Path(String),
    /// Resolved element handle
    Element(ElementRef),
}

/// Immutable `(strategy, value)` pair identifying how to find an element.
///
/// # Example
///
/// ```ignore
/// use sda::{By, Locator};
///
/// let button = Locator::id("save");
/// assert_eq!(button.expression(), r#"/descendant-or-self::*[@id="save"]"#);
///
/// let typed: Locator = ("css selector", "form > button").into();
/// assert_eq!(typed.by(), &By::CssSelector);
///
/// // "the button inside the toolbar"
/// let nested = Locator::class_name("toolbar").within(&Locator::tag_name("button"));
/// assert_eq!(nested.by(), &By::XPath);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    by: By,
    value: LocatorValue,
}

impl Locator {
    /// Creates a locator from any strategy name and selector text.
    pub fn new(by: impl Into<By>, value: impl Into<String>) -> Self {
        Self {
            by: by.into(),
            value: LocatorValue::Path(value.into()),
        }
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(By::ClassName, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(By::CssSelector, value)
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(By::Id, value)
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(By::LinkText, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(By::Name, value)
    }

    pub fn partial_link_text(value: impl Into<String>) -> Self {
        Self::new(By::PartialLinkText, value)
    }

    pub fn tag_name(value: impl Into<String>) -> Self {
        Self::new(By::TagName, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(By::XPath, value)
    }

    /// Locator for an element that has already been resolved.
    pub fn element(handle: ElementRef) -> Self {
        Self {
            by: By::Element,
            value: LocatorValue::Element(handle),
        }
    }

    pub fn by(&self) -> &By {
        &self.by
    }

    pub fn value(&self) -> &LocatorValue {
        &self.value
    }

    /// Selector text, or `None` when the value is an element handle
    pub fn path(&self) -> Option<&str> {
        match &self.value {
            LocatorValue::Path(path) => Some(path),
            LocatorValue::Element(_) => None,
        }
    }

    /// Element handle carried by a [`By::Element`] locator
    pub fn handle(&self) -> Option<&ElementRef> {
        match (&self.by, &self.value) {
            (By::Element, LocatorValue::Element(handle)) => Some(handle),
            _ => None,
        }
    }

    /// Returns the `(xpath, expression)` normal form. See [`normalize`].
    pub fn normalize(&self) -> Locator {
        normalize(&self.by, &self.value)
    }

    /// The normalized XPath expression
    pub fn expression(&self) -> String {
        match self.normalize().value {
            LocatorValue::Path(path) => path,
            LocatorValue::Element(handle) => handle.locator().expression(),
        }
    }

    /// True when a selector-string strategy carries a non-empty value.
    pub fn is_valid(&self) -> bool {
        match &self.value {
            LocatorValue::Path(path) => is_valid(&self.by, path),
            LocatorValue::Element(_) => false,
        }
    }

    /// The locator of `child` searched inside this locator's subtree.
    pub fn within(&self, child: &Locator) -> Locator {
        join([self, child])
    }
}

impl<B, S> From<(B, S)> for Locator
where
    B: Into<By>,
    S: Into<String>,
{
    fn from((by, value): (B, S)) -> Self {
        Locator::new(by, value)
    }
}

impl TryFrom<&Value> for Locator {
    type Error = Error;

    /// Accepts a two-element JSON array of strings: `["id", "save"]`.
    fn try_from(value: &Value) -> Result<Self> {
        match value.as_array().map(Vec::as_slice) {
            Some([Value::String(by), Value::String(path)]) => Ok(Locator::new(by.as_str(), path)),
            _ => Err(Error::InvalidArgument(format!(
                "expected a [strategy, value] pair, got {value}"
            ))),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            LocatorValue::Path(path) => write!(f, "({}, {})", self.by, path),
            LocatorValue::Element(handle) => write!(f, "({}, {})", self.by, handle.node()),
        }
    }
}

/// Translate `(strategy, value)` into its `(xpath, expression)` normal form.
///
/// | strategy            | expression                                                  |
/// |---------------------|-------------------------------------------------------------|
/// | `class_name(x)`     | `/descendant-or-self::*[contains(@class, "x")]`             |
/// | `id(x)`             | `/descendant-or-self::*[@id="x"]`                           |
/// | `name(x)`           | `/descendant-or-self::*[@name="x"]`                         |
/// | `tag_name(x)`       | `/descendant-or-self::x`                                    |
/// | `link_text(x)`      | link/input/button whose normalized text equals `x`          |
/// | `partial_link_text` | link/input/button whose normalized text contains `x`        |
/// | `css_selector(x)`   | translated CSS, or `""` when translation fails              |
/// | `xpath(x)`          | `x`                                                         |
/// | `element(handle)`   | the handle's stored locator                                 |
/// | anything else       | `""`                                                        |
pub fn normalize(by: &By, value: &LocatorValue) -> Locator {
    let path = match value {
        LocatorValue::Element(handle) => {
            if *by == By::Element {
                return handle.locator().clone();
            }
            tracing::debug!("Strategy '{}' cannot take an element handle", by);
            String::new()
        }
        LocatorValue::Path(path) => match by {
            By::XPath => path.clone(),
            By::ClassName => format!(
                "/descendant-or-self::*[contains(@class, {})]",
                literal(path)
            ),
            By::Id => format!("/descendant-or-self::*[@id={}]", literal(path)),
            By::Name => format!("/descendant-or-self::*[@name={}]", literal(path)),
            By::TagName => format!("/descendant-or-self::{path}"),
            By::LinkText => format!(
                "/descendant-or-self::*[contains(\"input a button\", name()) and normalize-space(text()) = {}]",
                literal(path)
            ),
            By::PartialLinkText => format!(
                "/descendant-or-self::*[contains(\"input a button\", name()) and contains(normalize-space(text()), {})]",
                literal(path)
            ),
            By::CssSelector => css::to_xpath(path).unwrap_or_else(|e| {
                tracing::debug!("CSS selector '{}' not translated: {}", path, e);
                String::new()
            }),
            By::Element => {
                tracing::debug!("Element locator without a handle: '{}'", path);
                String::new()
            }
            By::Unsupported(name) => {
                tracing::debug!("Unsupported locator strategy '{}'", name);
                String::new()
            }
        },
    };

    Locator::xpath(path)
}

/// Concatenate the normalized expressions of `locators`, in order.
///
/// The result is always an XPath locator; joining nothing gives the empty
/// expression.
pub fn join<I>(locators: I) -> Locator
where
    I: IntoIterator,
    I::Item: Borrow<Locator>,
{
    let path: String = locators
        .into_iter()
        .map(|locator| locator.borrow().expression())
        .collect();
    Locator::xpath(path)
}

/// [`join`] over untyped JSON input; entries that are not
/// `[strategy, value]` string pairs are skipped.
pub fn join_values(values: &[Value]) -> Locator {
    join(values.iter().filter_map(|value| Locator::try_from(value).ok()))
}

/// True when `by` is one of the selector-string strategies and `value` is
/// non-empty.
pub fn is_valid(by: &By, value: &str) -> bool {
    by.takes_selector() && !value.is_empty()
}

/// Render `value` as an XPath 1.0 string literal.
pub(crate) fn literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        let parts: Vec<String> = value.split('"').map(|part| format!("\"{part}\"")).collect();
        format!("concat({})", parts.join(", '\"', "))
    }
}

/// Named collection of locators for one page.
///
/// # Example
///
/// ```ignore
/// use sda::{Locator, LocatorSet};
///
/// let login = LocatorSet::new()
///     .with("USER_NAME", Locator::id("username"))
///     .with("PASSWORD", Locator::id("password"));
///
/// let from_file = LocatorSet::from_json(r#"{"SUBMIT": ["css selector", "form button"]}"#)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorSet {
    entries: BTreeMap<String, Locator>,
}

impl LocatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, locator: impl Into<Locator>) -> Self {
        self.insert(name, locator);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, locator: impl Into<Locator>) {
        self.entries.insert(name.into(), locator.into());
    }

    pub fn get(&self, name: &str) -> Option<&Locator> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Locator)> {
        self.entries.iter().map(|(name, locator)| (name.as_str(), locator))
    }

    /// Valid locators only, keyed by name
    pub fn as_map(&self) -> BTreeMap<&str, &Locator> {
        self.iter().filter(|(_, locator)| locator.is_valid()).collect()
    }

    /// Parse `{ "NAME": ["strategy", "value"], ... }`.
    ///
    /// Entries that are not valid locator pairs are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::InvalidArgument("locator set must be a JSON object".to_string())
        })?;

        let mut set = LocatorSet::new();
        for (name, entry) in object {
            match Locator::try_from(entry) {
                Ok(locator) if locator.is_valid() => set.insert(name.clone(), locator),
                Ok(locator) => {
                    tracing::warn!("Skipping locator '{}': invalid pair {}", name, locator)
                }
                Err(e) => tracing::warn!("Skipping locator '{}': {}", name, e),
            }
        }
        Ok(set)
    }
}
