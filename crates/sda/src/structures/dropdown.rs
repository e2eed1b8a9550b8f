// Dropdowns: a trigger element plus the container it opens

use super::{Form, FieldValue};
use crate::capabilities::{AsElement, Clickable, Expandable, TextBearing};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::locator::Locator;
use std::ops::Deref;

/// Following sibling list or panel of a trigger
const SIBLING_CONTAINER: &str = "/following-sibling::*[self::ul or self::ol or self::div]";

/// A trigger that shows and hides a container.
///
/// The container defaults to the trigger's first following `ul`, `ol` or
/// `div` sibling.
#[derive(Debug, Clone)]
pub struct Dropdown {
    element: Element,
    container: Element,
}

impl From<Element> for Dropdown {
    fn from(element: Element) -> Self {
        let container = element.within(Locator::xpath(SIBLING_CONTAINER));
        Self { element, container }
    }
}

impl Dropdown {
    /// A dropdown whose container is found by its own locator.
    pub fn with_container(element: Element, container: impl Into<Locator>) -> Self {
        let container = element.with_locator(container);
        Self { element, container }
    }
}

impl AsElement for Dropdown {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl Deref for Dropdown {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl Clickable for Dropdown {}
impl TextBearing for Dropdown {}

impl Expandable for Dropdown {
    fn container(&self) -> &Element {
        &self.container
    }
}

/// Dropdown whose container holds clickable menu items.
#[derive(Debug, Clone)]
pub struct DropdownMenu(Dropdown);

impl From<Element> for DropdownMenu {
    fn from(element: Element) -> Self {
        Self(Dropdown::from(element))
    }
}

impl From<Dropdown> for DropdownMenu {
    fn from(dropdown: Dropdown) -> Self {
        Self(dropdown)
    }
}

impl AsElement for DropdownMenu {
    fn element(&self) -> &Element {
        &self.0.element
    }
}

impl Deref for DropdownMenu {
    type Target = Dropdown;

    fn deref(&self) -> &Dropdown {
        &self.0
    }
}

impl Clickable for DropdownMenu {}

impl Expandable for DropdownMenu {
    fn container(&self) -> &Element {
        &self.0.container
    }
}

impl DropdownMenu {
    /// Open the menu and click the first item whose identifier contains
    /// `value`.
    ///
    /// Returns `false` when the menu container is absent, and
    /// `ElementNotFound` when no item matches.
    pub async fn select(&self, value: &str) -> Result<bool> {
        let container = &self.0.container;
        if !container.exists().await? {
            return Ok(false);
        }

        self.expand().await?;

        let items = container
            .find_all(container.contains_identifier("//*", value))
            .await?;
        match items.into_iter().next() {
            Some(item) => super::Button::from(item).click().await,
            None => Err(Error::ElementNotFound(format!("dropdown item '{value}'"))),
        }
    }
}

/// Dropdown whose container holds a form.
///
/// Every form operation opens the dropdown first.
#[derive(Debug, Clone)]
pub struct DropdownForm {
    dropdown: Dropdown,
    form: Form,
}

impl From<Element> for DropdownForm {
    fn from(element: Element) -> Self {
        let dropdown = Dropdown::from(element);
        let form = Form::from(dropdown.container.within(Locator::xpath(format!(
            "//form[@{}]",
            dropdown.settings().identifier
        ))));
        Self { dropdown, form }
    }
}

impl AsElement for DropdownForm {
    fn element(&self) -> &Element {
        &self.dropdown.element
    }
}

impl Deref for DropdownForm {
    type Target = Dropdown;

    fn deref(&self) -> &Dropdown {
        &self.dropdown
    }
}

impl Clickable for DropdownForm {}

impl Expandable for DropdownForm {
    fn container(&self) -> &Element {
        &self.dropdown.container
    }
}

impl DropdownForm {
    /// The form inside the container
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub async fn get(&self, name: &str) -> Result<String> {
        self.expand().await?;
        self.form.get(name).await
    }

    pub async fn set(&self, name: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.expand().await?;
        self.form.set(name, value).await
    }

    pub async fn submit(&self) -> Result<bool> {
        self.expand().await?;
        self.form.submit().await
    }

    pub async fn cancel(&self) -> Result<bool> {
        self.expand().await?;
        self.form.cancel().await
    }

    pub async fn field(&self, name: &str) -> Result<Element> {
        self.form.field(name).await
    }

    pub async fn fields(&self) -> Result<Vec<Element>> {
        self.form.fields().await
    }
}
