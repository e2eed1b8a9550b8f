// Element - the single concrete page node type
//
// An `Element` is a locator bound to a driver. It is resolved lazily on each
// call, so an element built before the page renders works once the node
// appears. Absent nodes make the accessors return `false`, `""` or empty
// lists instead of failing.

use crate::config::Settings;
use crate::driver::{Driver, NodeId};
use crate::error::{Error, Result};
use crate::locator::{ElementRef, Locator, literal};
use crate::text;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A locator bound to a driver.
///
/// Structures (`Button`, `Form`, `Table`, ...) are thin wrappers around an
/// `Element`; everything they do goes through the methods here.
///
/// # Example
///
/// ```ignore
/// use sda::{Element, Locator, Settings};
/// use std::sync::Arc;
///
/// # async fn run(driver: Arc<dyn sda::Driver>) -> sda::Result<()> {
/// let settings = Arc::new(Settings::default());
/// let toolbar = Element::new(driver, Locator::class_name("toolbar"), settings);
///
/// if toolbar.exists().await? {
///     let save = toolbar.within(Locator::css("button.save"));
///     println!("save disabled: {}", save.is_disabled().await?);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Element {
    driver: Arc<dyn Driver>,
    locator: Locator,
    settings: Arc<Settings>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("locator", &self.locator)
            .finish_non_exhaustive()
    }
}

impl Element {
    pub fn new(driver: Arc<dyn Driver>, locator: impl Into<Locator>, settings: Arc<Settings>) -> Self {
        Self {
            driver,
            locator: locator.into(),
            settings,
        }
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn locator(&self) -> &Locator {
        &self.locator
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// The normalized XPath this element is looked up by
    pub fn expression(&self) -> String {
        self.locator.expression()
    }

    /// A sibling element sharing this element's driver and settings.
    pub fn with_locator(&self, locator: impl Into<Locator>) -> Element {
        Element::new(self.driver.clone(), locator, self.settings.clone())
    }

    /// The element matching `locator` inside this element's subtree.
    pub fn within(&self, locator: impl Into<Locator>) -> Element {
        self.with_locator(self.locator.within(&locator.into()))
    }

    /// Descendant whose identifier attribute contains `keyword`
    pub(crate) fn keyword_child(&self, keyword: &str) -> Element {
        self.within(self.contains_identifier("//*", keyword))
    }

    /// `<axis>[contains(@identifier, "<word>")]`
    pub(crate) fn contains_identifier(&self, axis: &str, word: &str) -> Locator {
        Locator::xpath(format!(
            "{axis}[contains(@{}, {})]",
            self.settings.identifier,
            literal(word)
        ))
    }

    /// First node matching the locator, if any.
    ///
    /// Element handles resolve to their node without a driver call. An empty
    /// expression or one the driver rejects is treated as no match.
    pub async fn resolve(&self) -> Result<Option<NodeId>> {
        if let Some(handle) = self.locator.handle() {
            return Ok(Some(handle.node().clone()));
        }

        let expression = self.expression();
        if expression.is_empty() {
            tracing::debug!("No usable expression for {}", self.locator);
            return Ok(None);
        }

        match self.driver.find_elements(&expression).await {
            Ok(nodes) => Ok(nodes.into_iter().next()),
            Err(e) if e.is_invalid_selector() => {
                tracing::debug!("Driver rejected {}: {}", expression, e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Every node matching `locator` inside this element, as handle elements.
    ///
    /// A handle searches from its own node; anything else searches the
    /// joined expression from the document root.
    pub(crate) async fn find_all(&self, locator: impl Into<Locator>) -> Result<Vec<Element>> {
        let child = locator.into();
        let Some(handle) = self.locator.handle() else {
            if self.expression().is_empty() {
                return Ok(Vec::new());
            }
            return self.within(child).resolve_all().await;
        };

        let expression = child.expression();
        if expression.is_empty() {
            return Ok(Vec::new());
        }

        let joined = self.locator.within(&child);
        let nodes = match self
            .driver
            .find_elements_from(handle.node(), &format!(".{expression}"))
            .await
        {
            Ok(nodes) => nodes,
            Err(e) if e.is_invalid_selector() => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(nodes
            .into_iter()
            .map(|node| self.with_locator(Locator::element(ElementRef::new(node, &joined))))
            .collect())
    }

    /// Every node matching this element's locator, as handle elements.
    pub(crate) async fn resolve_all(&self) -> Result<Vec<Element>> {
        if self.locator.handle().is_some() {
            return Ok(vec![self.clone()]);
        }

        let expression = self.expression();
        if expression.is_empty() {
            return Ok(Vec::new());
        }

        let nodes = match self.driver.find_elements(&expression).await {
            Ok(nodes) => nodes,
            Err(e) if e.is_invalid_selector() => Vec::new(),
            Err(e) => return Err(e),
        };

        Ok(nodes
            .into_iter()
            .map(|node| self.with_locator(Locator::element(ElementRef::new(node, &self.locator))))
            .collect())
    }

    /// Resolves the node or fails with `ElementNotFound`.
    pub(crate) async fn require(&self, what: &str) -> Result<NodeId> {
        self.resolve()
            .await?
            .ok_or_else(|| Error::ElementNotFound(format!("{what} {}", self.locator)))
    }

    pub async fn exists(&self) -> Result<bool> {
        Ok(self.resolve().await?.is_some())
    }

    /// Handle to the resolved node, usable as a `By::Element` locator.
    pub async fn handle(&self) -> Result<Option<ElementRef>> {
        if let Some(handle) = self.locator.handle() {
            return Ok(Some(handle.clone()));
        }
        Ok(self
            .resolve()
            .await?
            .map(|node| ElementRef::new(node, &self.locator)))
    }

    /// Attribute value, or `""` when the attribute or the element is missing.
    pub async fn attribute(&self, name: &str) -> Result<String> {
        match self.resolve().await? {
            Some(node) => Ok(self
                .driver
                .attribute(&node, name)
                .await?
                .map(|value| text::fold(&value))
                .unwrap_or_default()),
            None => Ok(String::new()),
        }
    }

    /// True when the element exists and carries `name`.
    pub async fn has_attribute(&self, name: &str) -> Result<bool> {
        match self.resolve().await? {
            Some(node) => Ok(self.driver.attribute(&node, name).await?.is_some()),
            None => Ok(false),
        }
    }

    pub async fn class_name(&self) -> Result<String> {
        self.attribute("class").await
    }

    pub async fn id(&self) -> Result<String> {
        self.attribute("id").await
    }

    /// Value of the identifier attribute (`data-qa-id` by default)
    pub async fn identifier(&self) -> Result<String> {
        self.attribute(&self.settings.identifier).await
    }

    pub async fn outer_html(&self) -> Result<String> {
        self.property("outerHTML").await
    }

    /// DOM property, or `""` when missing
    pub async fn property(&self, name: &str) -> Result<String> {
        match self.resolve().await? {
            Some(node) => Ok(self
                .driver
                .property(&node, name)
                .await?
                .map(|value| text::fold(&value))
                .unwrap_or_default()),
            None => Ok(String::new()),
        }
    }

    /// Lower-case element name, or `""` when absent
    pub async fn tag_name(&self) -> Result<String> {
        match self.resolve().await? {
            Some(node) => self.driver.tag_name(&node).await,
            None => Ok(String::new()),
        }
    }

    pub async fn is_disabled(&self) -> Result<bool> {
        self.has_attribute("disabled").await
    }

    pub async fn is_displayed(&self) -> Result<bool> {
        match self.resolve().await? {
            Some(node) => self.driver.is_displayed(&node).await,
            None => Ok(false),
        }
    }

    /// True when AngularJS hid the element (`ng-hide` class).
    pub async fn angular_hidden(&self) -> Result<bool> {
        let classes = self.class_name().await?;
        Ok(classes.split_whitespace().any(|class| class == "ng-hide"))
    }

    /// Move focus away from the element.
    pub async fn blur(&self) -> Result<()> {
        self.run_when_shown("arguments[0].blur();").await
    }

    /// Give the element focus.
    pub async fn focus(&self) -> Result<()> {
        self.run_when_shown("arguments[0].focus();").await
    }

    async fn run_when_shown(&self, script: &str) -> Result<()> {
        if self.angular_hidden().await? {
            return Ok(());
        }
        if let Some(node) = self.resolve().await? {
            self.driver.execute_on(script, &node).await?;
        }
        Ok(())
    }

    /// Scroll the window so the element sits just inside the viewport.
    pub async fn scroll_to(&self) -> Result<()> {
        let Some(node) = self.resolve().await? else {
            return Ok(());
        };
        let rect = self.driver.rect(&node).await?;
        let y = (rect.y - rect.height).round() as i64;
        self.driver
            .execute(&format!("window.scrollTo(0, {y})"))
            .await?;
        Ok(())
    }

    /// Wait for the element with the configured timeout.
    pub async fn wait_until_present(&self) -> Result<()> {
        self.wait_until_present_for(self.settings.wait_timeout).await
    }

    /// Poll until the element exists, failing with `Error::Timeout`.
    pub async fn wait_until_present_for(&self, timeout: Duration) -> Result<()> {
        let start = Instant::now();

        loop {
            if self.exists().await? {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(Error::Timeout(format!(
                    "{} not present after {:?}",
                    self.locator, timeout
                )));
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}
