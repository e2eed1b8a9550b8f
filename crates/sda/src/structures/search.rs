// Search inputs, with and without a results panel

use super::Button;
use crate::capabilities::{AsElement, Clickable, Expandable, Input};
use crate::element::Element;
use crate::error::Result;
use crate::locator::Locator;
use async_trait::async_trait;
use std::ops::Deref;

/// Search input with a sibling clear button.
///
/// The clear button is the following sibling whose identifier contains the
/// `clear` keyword.
#[derive(Debug, Clone)]
pub struct Search {
    element: Element,
    clear: Button,
}

impl From<Element> for Search {
    fn from(element: Element) -> Self {
        let keyword = element.settings().keywords.clear.clone();
        let clear = Button::from(
            element.within(element.contains_identifier("/following-sibling::*", &keyword)),
        );
        Self { element, clear }
    }
}

impl AsElement for Search {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl Deref for Search {
    type Target = Element;

    fn deref(&self) -> &Element {
        &self.element
    }
}

impl Clickable for Search {}
impl Input for Search {}

impl Search {
    pub fn clear_button(&self) -> &Button {
        &self.clear
    }

    /// Click the clear button.
    pub async fn clear(&self) -> Result<bool> {
        self.clear.click().await
    }

    /// Replace the input's content with `criteria`.
    pub async fn search(&self, criteria: &str) -> Result<bool> {
        self.input(criteria, true).await
    }
}

/// Search input whose results open in a sibling panel.
#[derive(Debug, Clone)]
pub struct SearchBox {
    search: Search,
    results: Element,
}

impl From<Element> for SearchBox {
    fn from(element: Element) -> Self {
        let results = element.within(Locator::xpath(
            "/following-sibling::*[self::ul or self::ol or self::div]",
        ));
        Self {
            search: Search::from(element),
            results,
        }
    }
}

impl AsElement for SearchBox {
    fn element(&self) -> &Element {
        &self.search.element
    }
}

impl Deref for SearchBox {
    type Target = Search;

    fn deref(&self) -> &Search {
        &self.search
    }
}

impl Clickable for SearchBox {}
impl Input for SearchBox {}

#[async_trait]
impl Expandable for SearchBox {
    fn container(&self) -> &Element {
        &self.results
    }

    /// Results close when the input loses focus.
    async fn collapse(&self) -> Result<()> {
        if self.results.is_displayed().await? {
            self.search.blur().await?;
        }
        Ok(())
    }
}
