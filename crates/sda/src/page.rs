// Page - a driver plus the URL pattern that identifies one page
//
// Page objects hold a `Page` and build their structures through its
// factories, so every structure shares the page's driver and settings.

use crate::config::Settings;
use crate::driver::Driver;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::locator::{Locator, LocatorSet};
use crate::structures::{
    Button, Div, Dropdown, DropdownForm, DropdownMenu, Form, Image, InputCheckbox, InputRadio,
    InputText, Link, List, Modal, Search, SearchBox, Select, TabNavigation, Table, Text,
};
use crate::text;
use regex::Regex;
use std::sync::Arc;

/// One page of a site.
///
/// # Example
///
/// ```ignore
/// use sda::{Locator, Page, Settings};
/// use std::sync::Arc;
///
/// # async fn run(driver: Arc<dyn sda::Driver>) -> sda::Result<()> {
/// let login = Page::new(driver, Arc::new(Settings::default()))
///     .with_validation(r"/login$")?;
///
/// if login.in_view().await? {
///     let form = login.form(Locator::xpath(r#"//form[@data-qa-id="login"]"#));
///     form.set("username", "jlane").await?;
///     form.submit().await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Page {
    driver: Arc<dyn Driver>,
    validation: Option<Regex>,
    settings: Arc<Settings>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("validation", &self.validation.as_ref().map(Regex::as_str))
            .field("identifier", &self.settings.identifier)
            .finish_non_exhaustive()
    }
}

impl Page {
    pub fn new(driver: Arc<dyn Driver>, settings: Arc<Settings>) -> Self {
        Self {
            driver,
            validation: None,
            settings,
        }
    }

    /// Only consider the page in view when the current URL matches
    /// `pattern`. An empty pattern clears the check.
    pub fn with_validation(mut self, pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            self.validation = None;
            return Ok(self);
        }
        let regex = Regex::new(pattern)
            .map_err(|e| Error::InvalidArgument(format!("invalid URL pattern: {e}")))?;
        self.validation = Some(regex);
        Ok(self)
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn settings(&self) -> &Arc<Settings> {
        &self.settings
    }

    /// Every node carrying the identifier attribute
    pub async fn elements(&self) -> Result<Vec<Element>> {
        self.element(Locator::xpath(format!("//*[@{}]", self.settings.identifier)))
            .resolve_all()
            .await
    }

    /// True when the current URL matches the validation pattern, or no
    /// pattern is set.
    pub async fn in_view(&self) -> Result<bool> {
        let Some(validation) = &self.validation else {
            return Ok(true);
        };
        let url = self.url().await?;
        let matched = validation.is_match(&url);
        tracing::debug!("Page validation '{}' against {}: {}", validation, url, matched);
        Ok(matched)
    }

    pub async fn title(&self) -> Result<String> {
        Ok(text::fold(&self.driver.title().await?))
    }

    pub async fn url(&self) -> Result<String> {
        Ok(text::fold(&self.driver.current_url().await?))
    }

    /// An element bound to this page's driver and settings
    pub fn element(&self, locator: impl Into<Locator>) -> Element {
        Element::new(self.driver.clone(), locator, self.settings.clone())
    }

    /// Any structure, e.g. `page.structure::<Table>(locator)`
    pub fn structure<S: From<Element>>(&self, locator: impl Into<Locator>) -> S {
        S::from(self.element(locator))
    }

    /// The structure for entry `name` of `locators`.
    ///
    /// Fails with `InvalidArgument` when the set has no such entry.
    pub fn named<S: From<Element>>(&self, locators: &LocatorSet, name: &str) -> Result<S> {
        locators
            .get(name)
            .map(|locator| self.structure(locator.clone()))
            .ok_or_else(|| Error::InvalidArgument(format!("no locator named '{name}'")))
    }

    pub fn button(&self, locator: impl Into<Locator>) -> Button {
        self.structure(locator)
    }

    pub fn link(&self, locator: impl Into<Locator>) -> Link {
        self.structure(locator)
    }

    pub fn text(&self, locator: impl Into<Locator>) -> Text {
        self.structure(locator)
    }

    pub fn div(&self, locator: impl Into<Locator>) -> Div {
        self.structure(locator)
    }

    pub fn image(&self, locator: impl Into<Locator>) -> Image {
        self.structure(locator)
    }

    pub fn input_text(&self, locator: impl Into<Locator>) -> InputText {
        self.structure(locator)
    }

    pub fn checkbox(&self, locator: impl Into<Locator>) -> InputCheckbox {
        self.structure(locator)
    }

    pub fn radio(&self, locator: impl Into<Locator>) -> InputRadio {
        self.structure(locator)
    }

    pub fn select(&self, locator: impl Into<Locator>) -> Select {
        self.structure(locator)
    }

    pub fn form(&self, locator: impl Into<Locator>) -> Form {
        self.structure(locator)
    }

    pub fn modal(&self, locator: impl Into<Locator>) -> Modal {
        self.structure(locator)
    }

    pub fn list(&self, locator: impl Into<Locator>) -> List {
        self.structure(locator)
    }

    pub fn dropdown(&self, locator: impl Into<Locator>) -> Dropdown {
        self.structure(locator)
    }

    pub fn dropdown_menu(&self, locator: impl Into<Locator>) -> DropdownMenu {
        self.structure(locator)
    }

    pub fn dropdown_form(&self, locator: impl Into<Locator>) -> DropdownForm {
        self.structure(locator)
    }

    pub fn search(&self, locator: impl Into<Locator>) -> Search {
        self.structure(locator)
    }

    pub fn search_box(&self, locator: impl Into<Locator>) -> SearchBox {
        self.structure(locator)
    }

    pub fn tab_navigation(&self, locator: impl Into<Locator>) -> TabNavigation {
        self.structure(locator)
    }

    pub fn table(&self, locator: impl Into<Locator>) -> Table {
        self.structure(locator)
    }
}
